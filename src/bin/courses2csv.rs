//! Re-projects an already-extracted catalog JSON file into CSV.
//!
//! Companion utility to `coursedump`: no arguments, fixed input and output
//! paths, and the verbatim (non-escaping) teacher quoting variant.

use anyhow::{Context, Result};
use coursedump::{CatalogDocument, CsvProjection, TeacherQuoting};
use std::fs;

const INPUT_PATH: &str = "courses_unknown_上學期.json";
const OUTPUT_PATH: &str = "courses_114_1_with_links.csv";

fn main() -> Result<()> {
    let content = fs::read_to_string(INPUT_PATH)
        .with_context(|| format!("failed to read {}", INPUT_PATH))?;

    let document: CatalogDocument = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a valid catalog document", INPUT_PATH))?;

    let projection = CsvProjection::new(TeacherQuoting::Verbatim)?;
    let csv_content = projection.render(&document.courses);

    fs::write(OUTPUT_PATH, csv_content)
        .with_context(|| format!("failed to write {}", OUTPUT_PATH))?;

    println!("Converted {} to {}", INPUT_PATH, OUTPUT_PATH);
    println!("Processed {} course records", document.courses.len());

    Ok(())
}
