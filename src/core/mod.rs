//! Document classification and check digit validation

pub mod automaton;
pub mod checksum;
pub mod digits;
pub mod error;
pub mod validator;

pub use automaton::{classify, FormatClassifier, State, TransitionTable};
pub use checksum::{check_cpf, check_rg};
pub use error::{DocumentError, DocumentFamily};
pub use validator::{validate_batch, validate_batch_parallel, validate_document, ValidationRecord};
