use crate::error::{CourseDumpError, Result};
use crate::scanner::{CourseRecord, TermMetadata};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// The JSON document written on success. `total_courses` always equals
/// `courses.len()`; nothing is filtered between decode and write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub semester: String,
    pub department: String,
    #[serde(rename = "totalCourses")]
    pub total_courses: usize,
    pub courses: Vec<CourseRecord>,
}

/// Run summary handed back to the caller and to the report printer.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionReport {
    pub source_file: String,
    pub term_label: String,
    pub department: String,
    pub total_courses: usize,
    pub json_path: PathBuf,
    pub csv_path: PathBuf,
    pub extraction_time: DateTime<Utc>,
    pub duration: Duration,
}

/// Resolves output file names from the term metadata and writes the JSON and
/// CSV documents. File naming interpolates the raw extracted year/semester,
/// or the `unknown` sentinel when a marker was absent.
pub struct OutputManager {
    directory: PathBuf,
    file_stem: String,
    prefix: String,
}

impl OutputManager {
    pub fn new(directory: PathBuf, file_stem: String, prefix: String) -> Self {
        Self {
            directory,
            file_stem,
            prefix,
        }
    }

    /// Shared stem of both output files, e.g. `114_1_courses_114_上學期`.
    pub fn output_stem(&self, term: &TermMetadata) -> String {
        format!(
            "{}{}_{}_{}",
            self.prefix,
            self.file_stem,
            term.file_year(),
            term.file_semester()
        )
    }

    pub fn json_path(&self, term: &TermMetadata) -> PathBuf {
        self.directory
            .join(format!("{}.json", self.output_stem(term)))
    }

    pub fn csv_path(&self, term: &TermMetadata) -> PathBuf {
        self.directory
            .join(format!("{}.csv", self.output_stem(term)))
    }

    pub fn build_document(term: &TermMetadata, courses: Vec<CourseRecord>) -> CatalogDocument {
        CatalogDocument {
            semester: term.term_label(),
            department: term.department_label().to_string(),
            total_courses: courses.len(),
            courses,
        }
    }

    /// Write both output files. Returns their paths in (json, csv) order.
    pub fn write_outputs(
        &self,
        document: &CatalogDocument,
        csv_content: &str,
        term: &TermMetadata,
    ) -> Result<(PathBuf, PathBuf)> {
        if !self.directory.exists() {
            fs::create_dir_all(&self.directory).map_err(|e| CourseDumpError::OutputWrite {
                path: self.directory.display().to_string(),
                source: e,
            })?;
        }

        let json_path = self.json_path(term);
        let json_content =
            serde_json::to_string_pretty(document).map_err(|e| CourseDumpError::Config {
                message: format!("Failed to serialize catalog to JSON: {}", e),
            })?;
        write_file(&json_path, &json_content)?;

        let csv_path = self.csv_path(term);
        write_file(&csv_path, csv_content)?;

        Ok((json_path, csv_path))
    }

    pub fn create_extraction_report(
        &self,
        source_file: &Path,
        term: &TermMetadata,
        document: &CatalogDocument,
        json_path: PathBuf,
        csv_path: PathBuf,
        duration: Duration,
    ) -> ExtractionReport {
        ExtractionReport {
            source_file: source_file.display().to_string(),
            term_label: term.term_label(),
            department: term.department_label().to_string(),
            total_courses: document.total_courses,
            json_path,
            csv_path,
            extraction_time: Utc::now(),
            duration,
        }
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| CourseDumpError::OutputWrite {
        path: path.display().to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn term(year: Option<&str>, semester: Option<&str>) -> TermMetadata {
        TermMetadata {
            year: year.map(String::from),
            semester: semester.map(String::from),
            department: Some("資訊管理學系".to_string()),
        }
    }

    fn records() -> Vec<CourseRecord> {
        vec![
            json!({"CourseNo": "A001", "SemesterCourseName": "系統分析"})
                .as_object()
                .unwrap()
                .clone(),
            json!({"CourseNo": "A002"}).as_object().unwrap().clone(),
        ]
    }

    fn manager(dir: &Path) -> OutputManager {
        OutputManager::new(dir.to_path_buf(), "courses".to_string(), String::new())
    }

    #[test]
    fn test_output_stem_with_full_term() {
        let m = manager(Path::new("."));
        assert_eq!(
            m.output_stem(&term(Some("114"), Some("上學期"))),
            "courses_114_上學期"
        );
    }

    #[test]
    fn test_output_stem_with_sentinels() {
        let m = manager(Path::new("."));
        assert_eq!(m.output_stem(&term(None, None)), "courses_unknown_unknown");
        assert_eq!(
            m.output_stem(&term(None, Some("上學期"))),
            "courses_unknown_上學期"
        );
    }

    #[test]
    fn test_prefix_prepended() {
        let m = OutputManager::new(
            PathBuf::from("."),
            "courses".to_string(),
            "114_1_".to_string(),
        );
        assert_eq!(
            m.output_stem(&term(Some("114"), Some("上學期"))),
            "114_1_courses_114_上學期"
        );
    }

    #[test]
    fn test_document_count_matches_records() {
        let document = OutputManager::build_document(&term(Some("114"), Some("上學期")), records());
        assert_eq!(document.total_courses, 2);
        assert_eq!(document.total_courses, document.courses.len());
        assert_eq!(document.semester, "114學年上學期");
        assert_eq!(document.department, "資訊管理學系");
    }

    #[test]
    fn test_writes_both_files() {
        let temp_dir = TempDir::new().unwrap();
        let m = manager(temp_dir.path());
        let t = term(Some("114"), Some("上學期"));
        let document = OutputManager::build_document(&t, records());

        let (json_path, csv_path) = m
            .write_outputs(&document, "header\nrow", &t)
            .unwrap();

        assert!(json_path.exists());
        assert!(csv_path.exists());
        assert_eq!(
            json_path.file_name().unwrap(),
            "courses_114_上學期.json"
        );
        assert_eq!(csv_path.file_name().unwrap(), "courses_114_上學期.csv");
    }

    #[test]
    fn test_json_round_trip_preserves_fields() {
        let temp_dir = TempDir::new().unwrap();
        let m = manager(temp_dir.path());
        let t = term(Some("114"), Some("上學期"));
        let document = OutputManager::build_document(&t, records());

        let (json_path, _) = m.write_outputs(&document, "", &t).unwrap();
        let content = fs::read_to_string(json_path).unwrap();

        // Non-ASCII must be written literally, not numeric-escaped.
        assert!(content.contains("系統分析"));
        assert!(content.contains("\"totalCourses\": 2"));

        let parsed: CatalogDocument = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.total_courses, 2);
        assert_eq!(parsed.courses[0]["CourseNo"], "A001");
    }

    #[test]
    fn test_creates_missing_output_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("out").join("run1");
        let m = manager(&nested);
        let t = term(None, None);
        let document = OutputManager::build_document(&t, Vec::new());

        let (json_path, _) = m.write_outputs(&document, "", &t).unwrap();
        assert!(json_path.exists());
    }

    #[test]
    fn test_report_fields() {
        let m = manager(Path::new("."));
        let t = term(Some("114"), Some("上學期"));
        let document = OutputManager::build_document(&t, records());

        let report = m.create_extraction_report(
            Path::new("temp"),
            &t,
            &document,
            PathBuf::from("a.json"),
            PathBuf::from("a.csv"),
            Duration::from_millis(5),
        );

        assert_eq!(report.total_courses, 2);
        assert_eq!(report.term_label, "114學年上學期");
        assert_eq!(report.source_file, "temp");
    }
}
