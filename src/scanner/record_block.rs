use crate::error::{CourseDumpError, Result};
use regex::Regex;
use serde_json::{Map, Value};

/// One course-offering entry. The field set is institution-defined and not
/// validated against any schema; unknown fields ride along untouched.
pub type CourseRecord = Map<String, Value>;

/// Locates the record array embedded in the page as a JavaScript assignment
/// and parses it as JSON.
///
/// The contract is literal: first non-greedy match between the opening
/// bracket and the first `];` terminator. No balanced-bracket parsing.
pub struct RecordScanner {
    block_re: Regex,
    variable: String,
}

impl RecordScanner {
    pub fn new(variable: &str) -> Result<Self> {
        let pattern = format!(
            r"(?s)var\s+{}\s*=\s*(\[.*?\]);",
            regex::escape(variable)
        );
        let block_re = Regex::new(&pattern).map_err(|e| CourseDumpError::Config {
            message: format!("Invalid record-block pattern for `{}`: {}", variable, e),
        })?;

        Ok(Self {
            block_re,
            variable: variable.to_string(),
        })
    }

    /// Returns the ordered record sequence exactly as parsed: source order,
    /// duplicates preserved, no filtering.
    pub fn scan(&self, text: &str) -> Result<Vec<CourseRecord>> {
        let captures =
            self.block_re
                .captures(text)
                .ok_or_else(|| CourseDumpError::RecordBlockNotFound {
                    variable: self.variable.clone(),
                })?;

        let raw = captures
            .get(1)
            .map(|m| m.as_str())
            .unwrap_or_default();

        serde_json::from_str(raw).map_err(|source| CourseDumpError::RecordDecode { source })
    }
}
