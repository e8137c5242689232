use crate::error::{CourseDumpError, Result};
use regex::Regex;

/// Display sentinels substituted when a marker is absent from the page.
pub const UNKNOWN_YEAR: &str = "未知學年";
pub const UNKNOWN_SEMESTER: &str = "未知學期";
pub const UNKNOWN_DEPARTMENT: &str = "未知系所";

/// File-name sentinel. Output file names interpolate this literally, so
/// changing it changes the names of unknown-term output files.
pub const UNKNOWN_FILE_PART: &str = "unknown";

const YEAR_PATTERN: &str = r"(\d{3})學年";
const SEMESTER_PATTERN: &str = r"([上下])學期";
const SEMESTER_SUFFIX: &str = "學期";

/// The (year, semester, department) triple describing which academic
/// offering the record set belongs to. Derived once per run, immutable
/// thereafter. `None` means the corresponding marker was not found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermMetadata {
    pub year: Option<String>,
    pub semester: Option<String>,
    pub department: Option<String>,
}

impl TermMetadata {
    pub fn year_label(&self) -> String {
        match self.year {
            Some(ref year) => format!("{}學年", year),
            None => UNKNOWN_YEAR.to_string(),
        }
    }

    pub fn semester_label(&self) -> &str {
        self.semester.as_deref().unwrap_or(UNKNOWN_SEMESTER)
    }

    pub fn department_label(&self) -> &str {
        self.department.as_deref().unwrap_or(UNKNOWN_DEPARTMENT)
    }

    /// Term label used as the `semester` field of the JSON document,
    /// e.g. `114學年上學期`.
    pub fn term_label(&self) -> String {
        format!("{}{}", self.year_label(), self.semester_label())
    }

    /// Raw year for file naming, e.g. `114`, or the `unknown` sentinel.
    pub fn file_year(&self) -> &str {
        self.year.as_deref().unwrap_or(UNKNOWN_FILE_PART)
    }

    /// Raw semester for file naming, e.g. `上學期`, or the `unknown` sentinel.
    pub fn file_semester(&self) -> &str {
        self.semester.as_deref().unwrap_or(UNKNOWN_FILE_PART)
    }

    pub fn is_complete(&self) -> bool {
        self.year.is_some() && self.semester.is_some() && self.department.is_some()
    }
}

/// Scans the raw page text for the academic-year, semester, and department
/// markers. The three lookups are independent; a non-match is not an error.
pub struct TermScanner {
    year_re: Regex,
    semester_re: Regex,
    department: String,
}

impl TermScanner {
    pub fn new(department: &str) -> Result<Self> {
        let year_re = Regex::new(YEAR_PATTERN).map_err(|e| CourseDumpError::Config {
            message: format!("Invalid year pattern: {}", e),
        })?;
        let semester_re = Regex::new(SEMESTER_PATTERN).map_err(|e| CourseDumpError::Config {
            message: format!("Invalid semester pattern: {}", e),
        })?;

        Ok(Self {
            year_re,
            semester_re,
            department: department.to_string(),
        })
    }

    pub fn scan(&self, text: &str) -> TermMetadata {
        let year = self
            .year_re
            .captures(text)
            .map(|caps| caps[1].to_string());

        let semester = self
            .semester_re
            .captures(text)
            .map(|caps| format!("{}{}", &caps[1], SEMESTER_SUFFIX));

        // Literal presence check only; the matched text is the configured name.
        let department = text
            .contains(&self.department)
            .then(|| self.department.clone());

        TermMetadata {
            year,
            semester,
            department,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanner() -> TermScanner {
        TermScanner::new("資訊管理學系").unwrap()
    }

    #[test]
    fn test_full_term_extraction() {
        let text = "選課系統 114學年 上學期 資訊管理學系 課程查詢";
        let term = scanner().scan(text);

        assert_eq!(term.year.as_deref(), Some("114"));
        assert_eq!(term.semester.as_deref(), Some("上學期"));
        assert_eq!(term.department.as_deref(), Some("資訊管理學系"));
        assert!(term.is_complete());
        assert_eq!(term.term_label(), "114學年上學期");
    }

    #[test]
    fn test_second_semester() {
        let term = scanner().scan("113學年下學期");
        assert_eq!(term.semester.as_deref(), Some("下學期"));
        assert_eq!(term.file_semester(), "下學期");
    }

    #[test]
    fn test_first_occurrence_wins() {
        let term = scanner().scan("114學年 ... 113學年 上學期 下學期");
        assert_eq!(term.year.as_deref(), Some("114"));
        assert_eq!(term.semester.as_deref(), Some("上學期"));
    }

    #[test]
    fn test_partial_match_uses_sentinels() {
        let term = scanner().scan("上學期 course list");

        assert_eq!(term.year, None);
        assert_eq!(term.year_label(), UNKNOWN_YEAR);
        assert_eq!(term.department_label(), UNKNOWN_DEPARTMENT);
        assert_eq!(term.term_label(), "未知學年上學期");
        assert_eq!(term.file_year(), UNKNOWN_FILE_PART);
        assert_eq!(term.file_semester(), "上學期");
    }

    #[test]
    fn test_no_markers_at_all() {
        let term = scanner().scan("nothing to see here");
        assert_eq!(term.term_label(), "未知學年未知學期");
        assert_eq!(term.file_year(), UNKNOWN_FILE_PART);
        assert_eq!(term.file_semester(), UNKNOWN_FILE_PART);
        assert!(!term.is_complete());
    }

    #[test]
    fn test_year_requires_three_digits() {
        // A two-digit year must not match; a longer run matches its last three
        // digits only if they directly precede the marker.
        let term = scanner().scan("14學年");
        assert_eq!(term.year, None);

        let term = scanner().scan("1145學年");
        assert_eq!(term.year.as_deref(), Some("145"));
    }

    #[test]
    fn test_configured_department() {
        let scanner = TermScanner::new("企業管理學系").unwrap();
        let term = scanner.scan("企業管理學系 114學年");
        assert_eq!(term.department.as_deref(), Some("企業管理學系"));
    }
}
