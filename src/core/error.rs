//! Error taxonomy for document validation
//!
//! Every variant is reported back to the caller inside a
//! [`ValidationRecord`](super::validator::ValidationRecord); none of them
//! aborts a batch.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The two document families recognized by the format automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFamily {
    /// 11 digits grouped 3-3-3-2, two trailing check digits.
    Cpf,
    /// 8 digits grouped 2-3-3 plus a terminal check symbol (digit or `X`).
    Rg,
}

impl DocumentFamily {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentFamily::Cpf => "CPF",
            DocumentFamily::Rg => "RG",
        }
    }
}

impl fmt::Display for DocumentFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons a document can fail validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// The automaton has no transition for this character at this position.
    #[error("invalid format: character '{character}' not allowed at position {position}")]
    UnrecognizedCharacter { character: char, position: usize },

    /// The input ended outside an accepting state.
    #[error("invalid format: incomplete document or incorrect format")]
    IncompleteOrMalformed,

    /// Every digit of the document is the same.
    #[error("repeated digits")]
    RepeatedDigits,

    /// The recomputed check digit(s) differ from the ones present.
    #[error("{family} check digits do not match")]
    ChecksumMismatch { family: DocumentFamily },

    /// A checksum routine was called with something that is not a
    /// document of its family.
    #[error("malformed {family} input for checksum: {reason}")]
    MalformedChecksumInput {
        family: DocumentFamily,
        reason: String,
    },
}

impl DocumentError {
    /// True for the two rejections produced by the format automaton.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            DocumentError::UnrecognizedCharacter { .. } | DocumentError::IncompleteOrMalformed
        )
    }
}
