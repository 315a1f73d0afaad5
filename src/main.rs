use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

// Import from our modularized library
use br_doc_validator::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    /// Summary, invalid documents with reasons, duplicates, valid documents
    Text,
    /// One VALID/INVALID line per document
    Simple,
    /// Full records and summary as JSON
    Json,
}

#[derive(Parser)]
#[command(name = "br_doc_validator")]
#[command(about = "CPF/RG document validator written in Rust", long_about = None)]
struct Cli {
    /// Documents to validate (read from stdin when no input is given)
    documents: Vec<String>,

    /// Newline-separated document list file (repeatable)
    #[arg(short, long = "input")]
    inputs: Vec<PathBuf>,

    /// Directory of document list files (*.txt, *.csv, *.lst)
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Scan --dir recursively
    #[arg(short, long)]
    recursive: bool,

    /// Number of parallel worker threads (default: number of CPUs)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Write a report to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,

    /// Detect and report documents that appear more than once
    #[arg(long)]
    detect_duplicates: bool,

    /// Run in batch mode (no progress bar)
    #[arg(long)]
    batch: bool,

    /// Verbose output. Repeat for more detail (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Set up rayon thread pool
    if let Some(workers) = cli.workers {
        rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build_global()
            .context("Failed to build thread pool")?;
    }
    info!(threads = rayon::current_num_threads(), "worker pool ready");

    let mut sources: Vec<SourceResult> = Vec::new();
    let mut read_failures = 0usize;

    if !cli.documents.is_empty() {
        let joined = cli.documents.join("\n");
        sources.push(SourceResult {
            source: "command line".to_string(),
            records: validate_batch(&joined),
        });
    }

    // Collect input files
    let mut input_files = cli.inputs.clone();
    if let Some(ref dir) = cli.dir {
        let found = collect_input_files(dir, cli.recursive)?;
        info!(dir = %dir.display(), files = found.len(), "collected input files");
        input_files.extend(found);
    }

    if !input_files.is_empty() {
        // Set up progress bar (skip in batch mode or for a single file)
        let progress = if cli.batch || input_files.len() == 1 {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(input_files.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
                    .context("Invalid progress bar template")?
                    .progress_chars("#>-"),
            );
            pb
        };

        // Files are validated in parallel; results keep the input file order
        let file_results: Vec<(PathBuf, Result<Vec<ValidationRecord>>)> = input_files
            .par_iter()
            .progress_with(progress.clone())
            .map(|path| {
                let records = read_documents(path).map(|text| validate_batch_parallel(&text));
                (path.clone(), records)
            })
            .collect();
        progress.finish_and_clear();

        for (path, records) in file_results {
            match records {
                Ok(records) => {
                    debug!(file = %path.display(), documents = records.len(), "validated file");
                    sources.push(SourceResult {
                        source: path.display().to_string(),
                        records,
                    });
                }
                Err(e) => {
                    warn!("{e:#}");
                    read_failures += 1;
                }
            }
        }
    }

    if cli.documents.is_empty() && cli.inputs.is_empty() && cli.dir.is_none() {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read documents from stdin")?;
        sources.push(SourceResult {
            source: "stdin".to_string(),
            records: validate_batch_parallel(&text),
        });
    }

    let records: Vec<ValidationRecord> = sources
        .iter()
        .flat_map(|s| s.records.iter().cloned())
        .collect();

    for record in &records {
        let status = if record.validated { "VALID" } else { "INVALID" };
        println!("{:<8} {:<16} {}", status, record.document, record.message);
    }

    let duplicates = if cli.detect_duplicates {
        let dups = find_duplicates(&records);
        for dup in &dups {
            println!("Duplicate {}: {}", dup.key, dup.documents.join(", "));
        }
        Some(dups)
    } else {
        None
    };

    // Print summary
    let summary = BatchSummary::from_records(&records);
    println!();
    println!("==================================================");
    println!("VALIDATION COMPLETE");
    println!("==================================================");
    println!("Valid documents: {}", summary.valid);
    println!("Invalid documents: {}", summary.invalid);

    if let Some(ref output) = cli.output {
        match cli.format {
            ReportFormat::Text => write_report(output, &sources, duplicates.as_deref())?,
            ReportFormat::Simple => write_simple_report(output, &records)?,
            ReportFormat::Json => write_json_report(output, &sources, duplicates.as_deref())?,
        }
        println!("Report saved to: {}", output.display());
    }

    if read_failures > 0 {
        warn!(read_failures, "some input files could not be read");
        Ok(ExitCode::from(1))
    } else if summary.invalid > 0 {
        Ok(ExitCode::from(2))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
