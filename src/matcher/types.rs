use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

use crate::scanner::{DirectoryEntry, ScannerError};

/// Errors that can occur while matching subtitles
#[derive(Error, Debug)]
pub enum MatchError {
    #[error(transparent)]
    Scan(#[from] ScannerError),

    #[error("Failed to move '{from}' to '{to}': {source}")]
    MoveFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to remove subtitle folder '{path}': {source}")]
    RemoveFolderFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A subtitle folder found next to video files
#[derive(Debug, Clone)]
pub struct SubtitleFolder {
    pub entry: DirectoryEntry,
    /// Subtitle files inside the folder, in pairing order
    pub files: Vec<DirectoryEntry>,
    /// Entries that are not subtitle files and would block folder removal
    pub other_entries: usize,
}

/// Language suffix of a subtitle folder name.
///
/// Only the second `-` separated token is used, so `subtitles-en-forced`
/// yields `en`.
pub fn language_suffix(folder_name: &str) -> Option<&str> {
    folder_name.split('-').nth(1).filter(|s| !s.is_empty())
}

/// A subtitle file moved next to its video
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubtitleMove {
    pub source: PathBuf,
    pub destination: PathBuf,
    /// Video file this subtitle was paired with
    pub video: PathBuf,
    pub language: String,
}

/// Result of a subtitle matching run
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    pub root: PathBuf,
    pub dry_run: bool,
    /// Moves performed or planned, in execution order
    pub moves: Vec<SubtitleMove>,
    /// Subtitle folders removed (or removable, in a dry run)
    pub removed_folders: Vec<PathBuf>,
}

impl MatchResult {
    pub fn new(root: PathBuf, dry_run: bool) -> Self {
        Self {
            root,
            dry_run,
            moves: Vec::new(),
            removed_folders: Vec::new(),
        }
    }

    pub fn add_move(&mut self, op: SubtitleMove) {
        self.moves.push(op);
    }

    pub fn add_removed_folder(&mut self, path: PathBuf) {
        self.removed_folders.push(path);
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_suffix() {
        assert_eq!(language_suffix("subtitles-en"), Some("en"));
        assert_eq!(language_suffix("Subtitles-PT_br"), Some("PT_br"));
        assert_eq!(language_suffix("subtitles-en-forced"), Some("en"));
        assert_eq!(language_suffix("subtitles-en-sdh-cc"), Some("en"));
    }

    #[test]
    fn test_language_suffix_missing() {
        assert_eq!(language_suffix("subtitles"), None);
        assert_eq!(language_suffix("subtitles-"), None);
        assert_eq!(language_suffix("subtitles--en"), None);
    }

    #[test]
    fn test_match_result() {
        let mut result = MatchResult::new(PathBuf::from("/show"), false);
        assert!(result.is_empty());

        result.add_move(SubtitleMove {
            source: PathBuf::from("/show/subtitles-en/1.srt"),
            destination: PathBuf::from("/show/ep1.en.srt"),
            video: PathBuf::from("/show/ep1.mkv"),
            language: "en".to_string(),
        });
        result.add_removed_folder(PathBuf::from("/show/subtitles-en"));

        assert_eq!(result.len(), 1);
        assert_eq!(result.removed_folders.len(), 1);
    }
}
