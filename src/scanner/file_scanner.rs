//! Input file scanning and collection

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::core::validator::ValidationRecord;

/// Extensions recognized as newline-separated document lists
pub const INPUT_EXTENSIONS: [&str; 3] = ["txt", "csv", "lst"];

/// Records produced from one input source (a file, the command line or stdin)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceResult {
    pub source: String,
    pub records: Vec<ValidationRecord>,
}

impl SourceResult {
    pub fn valid_count(&self) -> usize {
        self.records.iter().filter(|r| r.validated).count()
    }

    pub fn invalid_count(&self) -> usize {
        self.records.len() - self.valid_count()
    }
}

fn is_input_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| INPUT_EXTENSIONS.contains(&ext.as_str()))
}

/// Collect all document list files from a directory
///
/// # Arguments
/// * `dir` - Directory to scan
/// * `recursive` - Whether to scan subdirectories recursively
///
/// # Returns
/// Sorted vector of input file paths
pub fn collect_input_files(dir: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    let mut input_files = Vec::new();

    if recursive {
        for entry in WalkDir::new(dir).follow_links(false) {
            let entry = entry?;
            if entry.file_type().is_file() && is_input_file(entry.path()) {
                input_files.push(entry.path().to_path_buf());
            }
        }
    } else {
        let entries = fs::read_dir(dir)
            .with_context(|| format!("Failed to read directory {}", dir.display()))?;
        for entry in entries {
            let entry = entry?;
            if entry.file_type()?.is_file() && is_input_file(&entry.path()) {
                input_files.push(entry.path());
            }
        }
    }

    input_files.sort();
    Ok(input_files)
}

/// Read a newline-separated document list
pub fn read_documents(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    #[test]
    fn test_collect_input_files_non_recursive() {
        let temp_dir = TempDir::new().unwrap();
        let list_path = temp_dir.path().join("documents.txt");
        File::create(&list_path).unwrap();
        File::create(temp_dir.path().join("notes.md")).unwrap();
        
        let files = collect_input_files(temp_dir.path(), false).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0], list_path);
    }

    #[test]
    fn test_collect_input_files_recursive() {
        let temp_dir = TempDir::new().unwrap();
        let subdir = temp_dir.path().join("subdir");
        fs::create_dir(&subdir).unwrap();
        
        let list1 = temp_dir.path().join("batch1.TXT");
        let list2 = subdir.join("batch2.csv");
        File::create(&list1).unwrap();
        File::create(&list2).unwrap();
        
        let files = collect_input_files(temp_dir.path(), true).unwrap();
        assert_eq!(files.len(), 2);

        let shallow = collect_input_files(temp_dir.path(), false).unwrap();
        assert_eq!(shallow, vec![list1]);
    }

    #[test]
    fn test_read_documents_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = read_documents(&temp_dir.path().join("missing.txt")).unwrap_err();
        assert!(err.to_string().contains("missing.txt"));
    }

    #[test]
    fn test_source_result_counts() {
        let source = SourceResult {
            source: "inline".to_string(),
            records: crate::core::validator::validate_batch("811.835.170-09\n123"),
        };
        assert_eq!(source.valid_count(), 1);
        assert_eq!(source.invalid_count(), 1);
    }
}
