//! Input scanning and duplicate detection

pub mod file_scanner;
pub mod duplicate_detector;

pub use file_scanner::{collect_input_files, read_documents, SourceResult};
pub use duplicate_detector::{document_key, find_duplicates, DuplicateInfo};
