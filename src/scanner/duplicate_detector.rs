//! Duplicate document detection
//!
//! Two records are duplicates when they name the same document, however it
//! was punctuated or cased.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::validator::ValidationRecord;

/// A document that appears more than once
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateInfo {
    /// Normalized form shared by every occurrence
    pub key: String,
    /// The occurrences as originally written, in input order
    pub documents: Vec<String>,
}

/// Normalized identity of a document: its digits and check letter, uppercased
///
/// # Arguments
/// * `document` - Raw document string
///
/// # Returns
/// `None` when the document has no digits or letters at all
pub fn document_key(document: &str) -> Option<String> {
    let key: String = document
        .chars()
        .filter(|c| c.is_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .collect();
    (!key.is_empty()).then_some(key)
}

/// Find duplicate documents among records with a valid format
///
/// # Arguments
/// * `records` - Validation records to check
///
/// # Returns
/// One `DuplicateInfo` per repeated document, ordered by first occurrence
pub fn find_duplicates(records: &[ValidationRecord]) -> Vec<DuplicateInfo> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<String>> = HashMap::new();

    for record in records.iter().filter(|r| r.valid_format) {
        if let Some(key) = document_key(&record.document) {
            groups
                .entry(key.clone())
                .or_insert_with(|| {
                    order.push(key);
                    Vec::new()
                })
                .push(record.document.clone());
        }
    }

    order
        .into_iter()
        .filter_map(|key| {
            let documents = groups.remove(&key)?;
            (documents.len() > 1).then_some(DuplicateInfo { key, documents })
        })
        .collect()
}
