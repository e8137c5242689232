pub mod csv;
pub mod normalizer;
pub mod output_manager;

pub use csv::{CsvProjection, TeacherQuoting};
pub use output_manager::{CatalogDocument, ExtractionReport, OutputManager};
