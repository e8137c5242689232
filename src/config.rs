use crate::error::{CourseDumpError, Result};
use crate::extractor::csv::TeacherQuoting;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub extract: ExtractConfig,
    pub output: OutputConfig,
    pub csv: CsvConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExtractConfig {
    /// Department name matched literally against the page text.
    pub department: String,
    /// Name of the JavaScript variable holding the record array.
    pub data_variable: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub file_stem: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CsvConfig {
    pub teacher_quoting: TeacherQuoting,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extract: ExtractConfig::default(),
            output: OutputConfig::default(),
            csv: CsvConfig::default(),
        }
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            department: "資訊管理學系".to_string(),
            data_variable: "data".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            file_stem: "courses".to_string(),
        }
    }
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            teacher_quoting: TeacherQuoting::Escaped,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(CourseDumpError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CourseDumpError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| CourseDumpError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = [
                    "coursedump.toml",
                    "coursedump.config.toml",
                    ".coursedump.toml",
                ];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref department) = cli_args.department {
            self.extract.department = department.clone();
        }

        if let Some(ref output_dir) = cli_args.output_dir {
            self.output.directory = output_dir.clone();
        }

        if let Some(teacher_quoting) = cli_args.teacher_quoting {
            self.csv.teacher_quoting = teacher_quoting;
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| CourseDumpError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| CourseDumpError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.extract.department.trim().is_empty() {
            return Err(CourseDumpError::Config {
                message: "Department name must not be empty".to_string(),
            });
        }

        if self.extract.data_variable.is_empty() {
            return Err(CourseDumpError::Config {
                message: "Data variable name must not be empty".to_string(),
            });
        }

        // The variable name gets spliced into the record-block pattern.
        let valid_variable = self
            .extract
            .data_variable
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
        if !valid_variable {
            return Err(CourseDumpError::Config {
                message: format!(
                    "Data variable name contains invalid characters: {}",
                    self.extract.data_variable
                ),
            });
        }

        if self.output.file_stem.trim().is_empty() {
            return Err(CourseDumpError::Config {
                message: "Output file stem must not be empty".to_string(),
            });
        }

        Ok(())
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub department: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub teacher_quoting: Option<TeacherQuoting>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_department(mut self, department: Option<String>) -> Self {
        self.department = department;
        self
    }

    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        self.output_dir = output_dir;
        self
    }

    pub fn with_teacher_quoting(mut self, teacher_quoting: Option<TeacherQuoting>) -> Self {
        self.teacher_quoting = teacher_quoting;
        self
    }
}
