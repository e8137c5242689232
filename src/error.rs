use thiserror::Error;

#[derive(Error, Debug)]
pub enum CourseDumpError {
    #[error("Source file not found: {path}")]
    SourceNotFound { path: String },

    #[error("Failed to read source file {path}")]
    SourceRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("No `var {variable} = [...]` block found in source")]
    RecordBlockNotFound { variable: String },

    #[error("Failed to decode course records as JSON")]
    RecordDecode {
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write output file {path}")]
    OutputWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for CourseDumpError {
    fn user_message(&self) -> String {
        match self {
            CourseDumpError::SourceNotFound { path } => {
                format!("Source file not found: {}", path)
            }
            CourseDumpError::SourceRead { path, source } => {
                format!("Failed to read source file {}: {}", path, source)
            }
            CourseDumpError::RecordBlockNotFound { variable } => {
                format!("No course data found: missing `var {} = [...]` block", variable)
            }
            CourseDumpError::RecordDecode { source } => {
                format!("Course data block is not valid JSON: {}", source)
            }
            CourseDumpError::OutputWrite { path, source } => {
                format!("Failed to write output file {}: {}", path, source)
            }
            CourseDumpError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            CourseDumpError::SourceNotFound { .. } => Some(
                "Save the course-query page to a file first, then pass its path as the first argument (default: temp).".to_string()
            ),
            CourseDumpError::SourceRead { .. } => Some(
                "Check that the file is readable and saved as UTF-8 text.".to_string()
            ),
            CourseDumpError::RecordBlockNotFound { .. } => Some(
                "Make sure the saved page is the full course-query result page. A different variable name can be set with [extract] data_variable in the configuration file.".to_string()
            ),
            CourseDumpError::RecordDecode { .. } => Some(
                "The page may have been truncated while saving. Re-save the page and try again.".to_string()
            ),
            CourseDumpError::OutputWrite { .. } => Some(
                "Check write permissions for the output directory, or choose another one with --output.".to_string()
            ),
            CourseDumpError::Config { .. } => Some(
                "Check your configuration file syntax, or regenerate one with --generate-config.".to_string()
            ),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CourseDumpError>;
