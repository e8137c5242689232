pub mod record_block;
pub mod term_meta;

pub use record_block::{CourseRecord, RecordScanner};
pub use term_meta::{TermMetadata, TermScanner};
