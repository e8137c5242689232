use crate::config::{CliOverrides, Config};
use crate::error::Result;
use crate::extractor::csv::TeacherQuoting;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "coursedump")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extract course catalog data from saved course-query pages")]
#[command(
    long_about = "CourseDump scans a saved course-query result page for the embedded \
                       course record array, decodes HTML escaping in every text field, and \
                       writes the catalog as JSON and CSV files named after the extracted \
                       academic term."
)]
#[command(after_help = "EXAMPLES:\n  \
    coursedump                          # decode the default `temp` file\n  \
    coursedump page.html                # decode a specific saved page\n  \
    coursedump page.html 114_1_         # prefix both output file names\n  \
    coursedump page.html --output out --csv-teacher-quoting verbatim\n  \
    coursedump --generate-config        # write a sample coursedump.toml")]
pub struct Cli {
    /// Saved course-query page to decode
    #[arg(default_value = "temp")]
    pub input_file: PathBuf,

    /// Prefix prepended to both output file names
    #[arg(default_value = "")]
    pub output_prefix: String,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Directory to write output files into
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Department name to look for in the page text
    #[arg(long)]
    pub department: Option<String>,

    /// Quoting rule for comma-bearing teacher values in CSV output
    #[arg(long, value_enum)]
    pub csv_teacher_quoting: Option<TeacherQuoting>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Show what would be extracted without writing any files
    #[arg(long)]
    pub dry_run: bool,

    /// Generate a sample configuration file
    #[arg(long)]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_department(self.department.clone())
            .with_output_dir(self.output.clone())
            .with_teacher_quoting(self.csv_teacher_quoting)
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}
