//! Integration tests for batch validation
//!
//! Tests that batches keep input order, drop blank lines, isolate failures
//! per line, and give the same answer sequentially and in parallel.

use br_doc_validator::prelude::*;
use std::fs;
use tempfile::TempDir;

const MIXED_BATCH: &str = "811.835.170-09\n\n   \n111.111.111-11\r\n  34.998.152-8  \n123a456b789-0c\n\t\n33.331.427-x\n";

/// Output order equals the order of non-blank input lines
#[test]
fn test_batch_preserves_order_and_trims() {
    let records = validate_batch(MIXED_BATCH);
    let documents: Vec<&str> = records.iter().map(|r| r.document.as_str()).collect();
    assert_eq!(
        documents,
        vec![
            "811.835.170-09",
            "111.111.111-11",
            "34.998.152-8",
            "123a456b789-0c",
            "33.331.427-x"
        ]
    );
    let verdicts: Vec<bool> = records.iter().map(|r| r.validated).collect();
    assert_eq!(verdicts, vec![true, false, true, false, true]);
}

/// Blank and whitespace-only input yields no records
#[test]
fn test_blank_batch_is_empty() {
    assert!(validate_batch("").is_empty());
    assert!(validate_batch("\n\n  \t\n").is_empty());
    assert!(validate_batch_parallel(" \r\n ").is_empty());
}

/// Each line matches validating it alone
#[test]
fn test_batch_lines_are_independent() {
    for record in validate_batch(MIXED_BATCH) {
        assert_eq!(record, validate_document(&record.document));
    }
}

/// Parallel and sequential batches agree, including order
#[test]
fn test_parallel_batch_matches_sequential() {
    let mut big = String::new();
    for i in 0..500 {
        match i % 4 {
            0 => big.push_str("811.835.170-09\n"),
            1 => big.push_str(&format!("{:011}\n", i)),
            2 => big.push_str("\n"),
            _ => big.push_str(&format!("{}a\n", i)),
        }
    }

    let sequential = validate_batch(&big);
    let parallel = validate_batch_parallel(&big);
    assert_eq!(sequential.len(), 375);
    assert_eq!(sequential, parallel);
}

/// Multiple threads can share the default automaton
#[test]
fn test_concurrent_validation_thread_safety() {
    use std::thread;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            thread::spawn(|| {
                for _ in 0..100 {
                    assert!(validate_document("34.998.152-8").validated);
                    assert!(!validate_document("34.998.152-9").validated);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread should not panic");
    }
}

/// Files found on disk validate line by line
#[test]
fn test_batch_from_input_files() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.txt"), "811.835.170-09\n81183517009\n").unwrap();
    fs::write(temp_dir.path().join("b.lst"), "34.998.152-9\n").unwrap();
    fs::write(temp_dir.path().join("ignored.pdf"), "34.998.152-8\n").unwrap();

    let files = collect_input_files(temp_dir.path(), false).unwrap();
    assert_eq!(files.len(), 2);

    let sources: Vec<SourceResult> = files
        .iter()
        .map(|path| SourceResult {
            source: path.display().to_string(),
            records: validate_batch(&read_documents(path).unwrap()),
        })
        .collect();

    assert_eq!(sources[0].valid_count(), 2);
    assert_eq!(sources[1].invalid_count(), 1);

    let all: Vec<ValidationRecord> = sources.iter().flat_map(|s| s.records.clone()).collect();
    let duplicates = find_duplicates(&all);
    assert_eq!(duplicates.len(), 1);
    assert_eq!(duplicates[0].documents.len(), 2);

    let summary = BatchSummary::from_records(&all);
    assert_eq!(summary.total, 3);
    assert_eq!(summary.incorrect_check_digits, 1);
}
