use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

use crate::scanner::ScannerError;

/// Errors that can occur while sweeping
#[derive(Error, Debug)]
pub enum SweepError {
    #[error(transparent)]
    Scan(#[from] ScannerError),

    #[error("Failed to delete '{path}': {source}")]
    DeleteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write sweep report: {0}")]
    ReportFailed(#[source] std::io::Error),
}

/// A file whose name ends with the sweep extension
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SweptFile {
    pub path: PathBuf,
    /// Whether the file was removed from disk
    pub deleted: bool,
}

/// Result of a sweep
#[derive(Debug, Clone, Serialize)]
pub struct SweepResult {
    pub root: PathBuf,
    pub extension: String,
    pub dry_run: bool,
    pub files: Vec<SweptFile>,
}

impl SweepResult {
    pub fn new(root: PathBuf, extension: String, dry_run: bool) -> Self {
        Self {
            root,
            extension,
            dry_run,
            files: Vec::new(),
        }
    }

    pub fn add(&mut self, file: SweptFile) {
        self.files.push(file);
    }

    pub fn deleted_count(&self) -> usize {
        self.files.iter().filter(|f| f.deleted).count()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }
}
