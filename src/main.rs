use clap::Parser;
use coursedump::{
    Cli, CourseDump, CourseDumpError, OutputFormatter, OutputMode, UserFriendlyError,
};
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    // Parse CLI arguments (--help/-h is handled by clap before anything runs)
    let cli = Cli::parse();

    // Handle special commands first
    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    // Create CourseDump instance
    let coursedump = match CourseDump::from_cli(&cli) {
        Ok(coursedump) => coursedump,
        Err(e) => {
            print_startup_error(&e);
            return exit_code_for(&e);
        }
    };

    // Handle dry run mode
    if cli.dry_run {
        return handle_dry_run(&cli, &coursedump);
    }

    // Execute main extraction workflow
    match coursedump.extract_catalog(&cli.input_file, &cli.output_prefix) {
        Ok(report) => {
            coursedump.output_formatter().print_extraction_report(&report);
            0
        }
        Err(e) => {
            coursedump.handle_error(&e);
            exit_code_for(&e)
        }
    }
}

fn exit_code_for(error: &CourseDumpError) -> i32 {
    match error {
        CourseDumpError::Config { .. } => 2,
        CourseDumpError::SourceNotFound { .. } => 3,
        CourseDumpError::SourceRead { .. } => 4,
        CourseDumpError::RecordBlockNotFound { .. } => 5,
        CourseDumpError::RecordDecode { .. } => 6,
        CourseDumpError::OutputWrite { .. } => 7,
        _ => 1, // General error
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "coursedump.toml".to_string());

    match CourseDump::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  coursedump <input-file> --config {}", config_path);
            println!("\nEdit the file to customize settings for your needs.");
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn handle_dry_run(cli: &Cli, coursedump: &CourseDump) -> i32 {
    let formatter = coursedump.output_formatter();

    formatter.info("DRY RUN MODE - No files will be written");
    formatter.print_separator();

    if !cli.input_file.exists() {
        formatter.error(&format!(
            "✗ Input file does not exist: {}",
            cli.input_file.display()
        ));
        return 3;
    }
    formatter.success(&format!("✓ Input file found: {}", cli.input_file.display()));

    formatter.info("Configuration that would be used:");
    let config = coursedump.config();

    println!("  Department: {}", config.extract.department);
    println!("  Data variable: {}", config.extract.data_variable);
    println!("  Output directory: {}", config.output.directory.display());
    println!("  Teacher quoting: {:?}", config.csv.teacher_quoting);

    formatter.print_separator();

    formatter.info("Extraction plan:");
    println!(
        "  Outputs: {}{}_<year>_<semester>.json / .csv",
        cli.output_prefix, config.output.file_stem
    );
    if !cli.output_prefix.is_empty() {
        println!("  Output prefix: {}", cli.output_prefix);
    }

    formatter.print_separator();
    formatter.success("Dry run completed successfully");
    formatter.info("Run without --dry-run to perform actual extraction");

    0
}

fn print_startup_error(error: &CourseDumpError) {
    // Create a basic formatter for startup errors
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}
