pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod matcher;
pub mod output;
pub mod progress;
pub mod scanner;
pub mod sweeper;

pub use config::{
    defaults_from_env, normalize_extension, ConfigError, EnvDefaults, MatchConfig,
    SubtitleFolderPattern, SweepConfig, TraversalMode,
};
pub use error::{AppError, ExitCode};
pub use matcher::{language_suffix, match_subtitles, MatchError, MatchResult, SubtitleMove};
pub use progress::Progress;
pub use scanner::{list_directory, DirectoryEntry, ListingOrder, ScannerError};
pub use sweeper::{sweep, SweepError, SweepResult, SweptFile};
