//! CPF/RG Document Validator Library
//! 
//! Classifies Brazilian identity document strings with a finite automaton,
//! verifies their check digits, and validates batches in parallel.

pub mod core;
pub mod scanner;
pub mod reporting;

pub use crate::core::validator;
pub use crate::scanner::file_scanner;
pub use crate::reporting::report_writer;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::core::automaton::{classify, FormatClassifier, State, TransitionTable};
    pub use crate::core::checksum::{check_cpf, check_rg, cpf_check_digits, rg_check_symbol};
    pub use crate::core::digits::has_repeated_digits;
    pub use crate::core::error::{DocumentError, DocumentFamily};
    pub use crate::core::validator::{
        validate_batch, validate_batch_parallel, validate_document, BatchSummary,
        ValidationRecord,
    };
    pub use crate::scanner::file_scanner::{collect_input_files, read_documents, SourceResult};
    pub use crate::scanner::duplicate_detector::{document_key, find_duplicates, DuplicateInfo};
    pub use crate::reporting::report_writer::{write_json_report, write_report, write_simple_report};
}
