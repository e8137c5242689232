pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod loader;
pub mod scanner;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, CsvConfig, ExtractConfig, OutputConfig};
pub use error::{CourseDumpError, Result, UserFriendlyError};

// Core functionality re-exports
pub use extractor::{CatalogDocument, CsvProjection, ExtractionReport, OutputManager, TeacherQuoting};
pub use scanner::{CourseRecord, RecordScanner, TermMetadata, TermScanner};
pub use ui::{OutputFormatter, OutputMode, ProgressManager};

use std::path::Path;
use std::time::Instant;

/// Main library interface: the whole extract-decode-write pipeline.
pub struct CourseDump {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl CourseDump {
    /// Create a new CourseDump instance with the provided configuration
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(!quiet && output_mode == OutputMode::Human);

        Self {
            config,
            output_formatter,
            progress_manager,
        }
    }

    /// Create CourseDump instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            crate::cli::OutputFormat::Human => OutputMode::Human,
            crate::cli::OutputFormat::Json => OutputMode::Json,
            crate::cli::OutputFormat::Plain => OutputMode::Plain,
        };

        Ok(Self::new(
            config,
            output_mode,
            cli_args.verbose,
            cli_args.quiet,
        ))
    }

    /// Run the full pipeline: load the saved page, scan term metadata and the
    /// record block, normalize every record, and write the JSON and CSV files.
    ///
    /// Any failure before the write stage aborts the run with no output files.
    pub fn extract_catalog(&self, input_file: &Path, output_prefix: &str) -> Result<ExtractionReport> {
        let start_time = Instant::now();

        self.output_formatter.start_operation("Decoding course data");
        self.output_formatter
            .info(&format!("Input file: {}", input_file.display()));
        if !output_prefix.is_empty() {
            self.output_formatter
                .info(&format!("Output prefix: {}", output_prefix));
        }

        // Stage 1: load the whole page into memory
        let text = self.load_source(input_file)?;

        // Stage 2: term metadata (non-matches degrade to sentinels)
        let term = self.scan_term_metadata(&text)?;

        // Stage 3: locate and decode the record block
        let raw_records = self.scan_records(&text)?;

        // Stage 4: normalize and write
        let courses = self.normalize_records(&raw_records);

        let projection = CsvProjection::new(self.config.csv.teacher_quoting)?;
        self.progress_manager.suspend(|| {
            self.output_formatter
                .print_course_listing(&courses, &term, &projection)
        });

        let output_manager = OutputManager::new(
            self.config.output.directory.clone(),
            self.config.output.file_stem.clone(),
            output_prefix.to_string(),
        );

        let document = OutputManager::build_document(&term, courses);
        let csv_content = projection.render(&document.courses);
        let (json_path, csv_path) = output_manager.write_outputs(&document, &csv_content, &term)?;

        self.output_formatter
            .success(&format!("Saved {}", json_path.display()));
        self.output_formatter
            .success(&format!("Saved {}", csv_path.display()));

        let report = output_manager.create_extraction_report(
            input_file,
            &term,
            &document,
            json_path,
            csv_path,
            start_time.elapsed(),
        );

        self.output_formatter.print_extraction_summary(&report);

        Ok(report)
    }

    fn load_source(&self, input_file: &Path) -> Result<String> {
        let spinner = self.progress_manager.create_spinner("Reading source file");
        let result = loader::read_source(input_file);
        spinner.finish_and_clear();

        if let Ok(ref text) = result {
            self.output_formatter
                .debug(&format!("Read {} bytes from source", text.len()));
        }
        result
    }

    fn scan_term_metadata(&self, text: &str) -> Result<TermMetadata> {
        let scanner = TermScanner::new(&self.config.extract.department)?;
        let term = scanner.scan(text);

        self.output_formatter
            .info(&format!("Term: {}", term.term_label()));
        self.output_formatter
            .info(&format!("Department: {}", term.department_label()));

        if term.year.is_none() {
            self.output_formatter
                .warning("Academic year marker not found, using sentinel");
        }
        if term.semester.is_none() {
            self.output_formatter
                .warning("Semester marker not found, using sentinel");
        }
        if term.department.is_none() {
            self.output_formatter
                .warning("Department name not found, using sentinel");
        }

        Ok(term)
    }

    fn scan_records(&self, text: &str) -> Result<Vec<CourseRecord>> {
        let scanner = RecordScanner::new(&self.config.extract.data_variable)?;
        let records = scanner.scan(text)?;

        self.output_formatter
            .info(&format!("Extracted {} course records", records.len()));

        Ok(records)
    }

    fn normalize_records(&self, raw_records: &[CourseRecord]) -> Vec<CourseRecord> {
        let progress = self
            .progress_manager
            .create_record_progress(raw_records.len() as u64);

        let courses: Vec<CourseRecord> = raw_records
            .iter()
            .map(|record| {
                let normalized = extractor::normalizer::normalize_record(record);
                progress.inc(1);
                normalized
            })
            .collect();

        ui::progress::finish_progress_with_summary(
            &progress,
            &format!("Normalized {} records", courses.len()),
            progress.elapsed(),
        );
        courses
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config).map_err(CourseDumpError::Io)?;
        Ok(())
    }

    /// Get configuration reference
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get output formatter reference
    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &CourseDumpError) {
        self.progress_manager.clear();
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Convenience function to run the pipeline with default configuration
pub fn extract_catalog_simple(
    input_file: &Path,
    output_prefix: &str,
    quiet: bool,
) -> Result<ExtractionReport> {
    let coursedump = CourseDump::new(Config::default(), OutputMode::Human, 0, quiet);
    coursedump.extract_catalog(input_file, output_prefix)
}

/// Get version information
pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
