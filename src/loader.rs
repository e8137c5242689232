use crate::error::{CourseDumpError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Read the saved course-query page fully into memory as UTF-8.
///
/// The whole pipeline works on the complete text, so there is no streaming
/// variant. A missing file and any other read failure are distinct errors.
pub fn read_source<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();

    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CourseDumpError::SourceNotFound {
            path: path.display().to_string(),
        },
        _ => CourseDumpError::SourceRead {
            path: path.display().to_string(),
            source: e,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_reads_full_content() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("page.html");
        fs::write(&path, "<html>114學年</html>").unwrap();

        let content = read_source(&path).unwrap();
        assert_eq!(content, "<html>114學年</html>");
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let result = read_source(temp_dir.path().join("nope"));
        assert!(matches!(
            result,
            Err(CourseDumpError::SourceNotFound { .. })
        ));
    }

    #[test]
    fn test_invalid_utf8_is_read_failure() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("binary");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        let result = read_source(&path);
        assert!(matches!(result, Err(CourseDumpError::SourceRead { .. })));
    }
}
