//! Run configuration for both pipelines.
//!
//! Values are resolved as CLI flag > environment variable > built-in default.
//! Environment variables can also be set in a `.env` file in the working
//! directory.

use once_cell::sync::Lazy;
use regex::Regex;
use std::env;
use std::path::PathBuf;
use thiserror::Error;

use crate::scanner::ListingOrder;

pub const ENV_DELETE_EXT: &str = "MEDIATIDY_DELETE_EXT";
pub const ENV_VIDEO_EXT: &str = "MEDIATIDY_VIDEO_EXT";
pub const ENV_SUBTITLE_EXT: &str = "MEDIATIDY_SUBTITLE_EXT";
pub const ENV_SUBTITLE_PATTERN: &str = "MEDIATIDY_SUBTITLE_PATTERN";

pub const DEFAULT_VIDEO_EXT: &str = ".mkv";
pub const DEFAULT_SUBTITLE_EXT: &str = ".srt";

// "subtitles-" followed by at least one ASCII word character, ASCII case folding only
pub const DEFAULT_SUBTITLE_PATTERN: &str = r"(?i-u)^subtitles-[0-9A-Za-z_]";

static DEFAULT_PATTERN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(DEFAULT_SUBTITLE_PATTERN).unwrap());

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No extension configured for sweep (use --ext or set MEDIATIDY_DELETE_EXT)")]
    MissingDeleteExtension,

    #[error("Extension must not be empty")]
    EmptyExtension,

    #[error("Invalid subtitle folder pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// How the sweeper continues after descending into a subdirectory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraversalMode {
    /// Visit every entry of every folder
    #[default]
    Full,
    /// Stop processing a folder once its first subdirectory has been walked
    FirstSubdirectoryOnly,
}

/// Pattern identifying subtitle folders such as `subtitles-en`
#[derive(Debug, Clone)]
pub struct SubtitleFolderPattern {
    regex: Regex,
}

impl Default for SubtitleFolderPattern {
    fn default() -> Self {
        Self {
            regex: DEFAULT_PATTERN_REGEX.clone(),
        }
    }
}

impl SubtitleFolderPattern {
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        let regex = Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { regex })
    }

    pub fn is_match(&self, folder_name: &str) -> bool {
        self.regex.is_match(folder_name)
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// Configuration for the sweeper
#[derive(Debug, Clone)]
pub struct SweepConfig {
    pub root: PathBuf,
    /// Exact, case-sensitive name suffix of files to sweep
    pub delete_ext: String,
    pub dry_run: bool,
    pub traversal: TraversalMode,
    pub order: ListingOrder,
}

impl SweepConfig {
    /// Dry-run config walking the whole tree
    pub fn new(root: impl Into<PathBuf>, delete_ext: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            delete_ext: delete_ext.into(),
            dry_run: true,
            traversal: TraversalMode::Full,
            order: ListingOrder::Sorted,
        }
    }
}

/// Configuration for the subtitle matcher
#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub root: PathBuf,
    /// Lowercase, dot-prefixed
    pub video_ext: String,
    /// Lowercase, dot-prefixed
    pub subtitle_ext: String,
    pub subtitle_folder_pattern: SubtitleFolderPattern,
    pub dry_run: bool,
    pub order: ListingOrder,
}

impl MatchConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            video_ext: DEFAULT_VIDEO_EXT.to_string(),
            subtitle_ext: DEFAULT_SUBTITLE_EXT.to_string(),
            subtitle_folder_pattern: SubtitleFolderPattern::default(),
            dry_run: false,
            order: ListingOrder::Sorted,
        }
    }
}

/// Defaults read from the environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvDefaults {
    pub delete_ext: Option<String>,
    pub video_ext: Option<String>,
    pub subtitle_ext: Option<String>,
    pub subtitle_pattern: Option<String>,
}

/// Load configuration defaults from environment variables
pub fn defaults_from_env() -> EnvDefaults {
    let read = |name: &str| env::var(name).ok().filter(|v| !v.trim().is_empty());

    EnvDefaults {
        delete_ext: read(ENV_DELETE_EXT),
        video_ext: read(ENV_VIDEO_EXT),
        subtitle_ext: read(ENV_SUBTITLE_EXT),
        subtitle_pattern: read(ENV_SUBTITLE_PATTERN),
    }
}

/// Normalize an extension to a lowercase, dot-prefixed form (`MKV` -> `.mkv`)
pub fn normalize_extension(ext: &str) -> Result<String, ConfigError> {
    let trimmed = ext.trim().trim_start_matches('.');
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyExtension);
    }
    Ok(format!(".{}", trimmed.to_lowercase()))
}
