//! Report writing functionality

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::validator::{BatchSummary, ValidationRecord};
use crate::scanner::duplicate_detector::DuplicateInfo;
use crate::scanner::file_scanner::SourceResult;

fn all_records(sources: &[SourceResult]) -> Vec<ValidationRecord> {
    sources.iter().flat_map(|s| s.records.iter().cloned()).collect()
}

/// Write validation results to a file
///
/// # Arguments
/// * `output_path` - Path to output file
/// * `sources` - Validation results grouped by input source
/// * `duplicates` - Optional duplicate document information
///
/// # Returns
/// Result indicating success or failure
pub fn write_report(
    output_path: &Path,
    sources: &[SourceResult],
    duplicates: Option<&[DuplicateInfo]>,
) -> Result<()> {
    let file = File::create(output_path)
        .with_context(|| format!("Failed to create report {}", output_path.display()))?;
    let mut file = BufWriter::new(file);

    // Write header with timestamp
    let now = std::time::SystemTime::now();
    writeln!(file, "Document Validation Report")?;
    writeln!(file, "==========================")?;
    writeln!(file, "Generated: {:?}", now)?;
    writeln!(file)?;

    let records = all_records(sources);
    let summary = BatchSummary::from_records(&records);

    writeln!(file, "Summary Statistics:")?;
    writeln!(file, "-------------------")?;
    writeln!(file, "  Total documents: {}", summary.total)?;
    writeln!(file, "  Valid documents: {}", summary.valid)?;
    writeln!(file, "  Invalid documents: {}", summary.invalid)?;
    writeln!(file, "    Repeated digits: {}", summary.repeated_digits)?;
    writeln!(file, "    Invalid format: {}", summary.invalid_format)?;
    writeln!(file, "    Incorrect check digits: {}", summary.incorrect_check_digits)?;
    writeln!(file, "  CPF documents: {}", summary.cpf)?;
    writeln!(file, "  RG documents: {}", summary.rg)?;

    if let Some(rate) = summary.success_rate() {
        writeln!(file, "  Validation success rate: {:.2}%", rate)?;
    }

    writeln!(file)?;

    // Invalid documents, grouped by source
    if summary.invalid > 0 {
        writeln!(file, "Invalid Documents:")?;
        writeln!(file, "------------------")?;
        for source in sources.iter().filter(|s| s.invalid_count() > 0) {
            writeln!(file, "  [{}]", source.source)?;
            for record in source.records.iter().filter(|r| !r.validated) {
                writeln!(file, "    {} -> {}", record.document, record.message)?;
            }
        }
        writeln!(file)?;
    }

    if let Some(dups) = duplicates {
        if !dups.is_empty() {
            let total_dups: usize = dups.iter().map(|d| d.documents.len() - 1).sum();

            writeln!(file, "Duplicate Documents:")?;
            writeln!(file, "--------------------")?;
            writeln!(file, "  Total duplicate groups: {}", dups.len())?;
            writeln!(file, "  Total redundant entries: {}", total_dups)?;
            writeln!(file)?;

            for (idx, dup) in dups.iter().enumerate() {
                writeln!(file, "  Group {} ({}):", idx + 1, dup.key)?;
                for (doc_idx, document) in dup.documents.iter().enumerate() {
                    let marker = if doc_idx == 0 { "[FIRST]" } else { "[DUP]  " };
                    writeln!(file, "      {} {}", marker, document)?;
                }
                writeln!(file)?;
            }
        }
    }

    writeln!(file, "Valid Documents:")?;
    writeln!(file, "----------------")?;
    writeln!(file, "  Total: {}", summary.valid)?;
    writeln!(file)?;
    for record in records.iter().filter(|r| r.validated) {
        let family = record.family.map(|f| f.as_str()).unwrap_or("-");
        writeln!(file, "  {:<3} {}", family, record.document)?;
    }

    file.flush()?;
    Ok(())
}

/// Write one `VALID`/`INVALID` line per document
///
/// # Arguments
/// * `output_path` - Path to output file
/// * `records` - Validation records to write
pub fn write_simple_report(output_path: &Path, records: &[ValidationRecord]) -> Result<()> {
    let mut file = File::create(output_path)
        .with_context(|| format!("Failed to create report {}", output_path.display()))?;

    for record in records {
        let status = if record.validated { "VALID" } else { "INVALID" };
        writeln!(file, "{}: {}", status, record.document)?;
    }

    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: BatchSummary,
    sources: &'a [SourceResult],
    #[serde(skip_serializing_if = "Option::is_none")]
    duplicates: Option<&'a [DuplicateInfo]>,
}

/// Write the full results, summary included, as pretty-printed JSON
pub fn write_json_report(
    output_path: &Path,
    sources: &[SourceResult],
    duplicates: Option<&[DuplicateInfo]>,
) -> Result<()> {
    let report = JsonReport {
        summary: BatchSummary::from_records(&all_records(sources)),
        sources,
        duplicates,
    };
    let file = File::create(output_path)
        .with_context(|| format!("Failed to create report {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &report)
        .context("Failed to write JSON report")?;
    writer.flush()?;
    Ok(())
}
