//! Document validation: repeated-digit pre-check, format, check digits

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::automaton::FormatClassifier;
use super::checksum::{check_cpf, check_rg};
use super::digits::has_repeated_digits;
use super::error::DocumentFamily;

pub const VALID_MESSAGE: &str = "Document valid";
pub const INVALID_PREFIX: &str = "Document invalid: ";
pub const REPEATED_DIGITS: &str = "repeated digits";
pub const INVALID_FORMAT: &str = "invalid format";
pub const INCORRECT_CHECK_DIGITS: &str = "incorrect check digits";
const CATEGORY_SEPARATOR: &str = " + ";

/// Outcome of validating a single document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRecord {
    /// The document exactly as given
    pub document: String,
    /// True iff none of the checks below failed
    pub validated: bool,
    pub valid_format: bool,
    pub repeated_digits: bool,
    pub check_digits_valid: bool,
    /// Family detected by the format automaton, when the format is valid
    pub family: Option<DocumentFamily>,
    pub message: String,
}

/// Validate a single document with the shared transition table.
pub fn validate_document(document: &str) -> ValidationRecord {
    validate_with(&FormatClassifier::default(), document)
}

/// Validate a single document with an explicit classifier.
///
/// The checksum only runs when the format is valid; otherwise
/// `check_digits_valid` is false.
pub fn validate_with(classifier: &FormatClassifier<'_>, document: &str) -> ValidationRecord {
    let repeated_digits = has_repeated_digits(document);

    let classification = classifier.classify(document);
    let family = classification.as_ref().ok().copied();

    let check_digits_valid = match family {
        Some(DocumentFamily::Cpf) => check_cpf(document).is_ok(),
        Some(DocumentFamily::Rg) => check_rg(document).is_ok(),
        None => false,
    };

    let valid_format = family.is_some();
    let validated = !repeated_digits && valid_format && check_digits_valid;
    let message = verdict_message(validated, repeated_digits, valid_format, check_digits_valid);

    match &classification {
        Ok(family) => debug!(document, %family, validated, "validated document"),
        Err(reason) => debug!(document, %reason, "rejected document format"),
    }

    ValidationRecord {
        document: document.to_string(),
        validated,
        valid_format,
        repeated_digits,
        check_digits_valid,
        family,
        message,
    }
}

/// Build the user-facing message from the three check outcomes.
pub fn verdict_message(
    validated: bool,
    repeated_digits: bool,
    valid_format: bool,
    check_digits_valid: bool,
) -> String {
    if validated {
        return VALID_MESSAGE.to_string();
    }

    let mut errors = Vec::new();
    if repeated_digits {
        errors.push(REPEATED_DIGITS);
    }
    if !valid_format {
        errors.push(INVALID_FORMAT);
    }
    if valid_format && !check_digits_valid {
        errors.push(INCORRECT_CHECK_DIGITS);
    }

    format!("{}{}", INVALID_PREFIX, errors.join(CATEGORY_SEPARATOR))
}

/// Non-blank lines of a batch, trimmed, in input order.
pub fn batch_lines(documents: &str) -> Vec<&str> {
    documents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Validate every non-blank line of `documents`, in order.
pub fn validate_batch(documents: &str) -> Vec<ValidationRecord> {
    let classifier = FormatClassifier::default();
    batch_lines(documents)
        .into_iter()
        .map(|line| validate_with(&classifier, line))
        .collect()
}

/// Same as [`validate_batch`], spread across the rayon pool.
pub fn validate_batch_parallel(documents: &str) -> Vec<ValidationRecord> {
    let classifier = FormatClassifier::default();
    batch_lines(documents)
        .par_iter()
        .map(|line| validate_with(&classifier, line))
        .collect()
}

/// Tallies over a set of records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub repeated_digits: usize,
    pub invalid_format: usize,
    pub incorrect_check_digits: usize,
    pub cpf: usize,
    pub rg: usize,
}

impl BatchSummary {
    pub fn from_records(records: &[ValidationRecord]) -> Self {
        let mut summary = Self::default();
        for record in records {
            summary.total += 1;
            if record.validated {
                summary.valid += 1;
            } else {
                summary.invalid += 1;
            }
            if record.repeated_digits {
                summary.repeated_digits += 1;
            }
            if !record.valid_format {
                summary.invalid_format += 1;
            } else if !record.check_digits_valid {
                summary.incorrect_check_digits += 1;
            }
            match record.family {
                Some(DocumentFamily::Cpf) => summary.cpf += 1,
                Some(DocumentFamily::Rg) => summary.rg += 1,
                None => {}
            }
        }
        summary
    }

    /// Percentage of valid documents, `None` for an empty batch.
    pub fn success_rate(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(self.valid as f64 * 100.0 / self.total as f64)
        }
    }
}
