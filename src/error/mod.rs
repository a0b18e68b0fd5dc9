mod codes;

pub use codes::ExitCode;

use crate::config::ConfigError;
use crate::matcher::MatchError;
use crate::scanner::ScannerError;
use crate::sweeper::SweepError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Failed to {operation}: {path}")]
    FilesystemError {
        operation: &'static str,
        path: PathBuf,
        destination: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("{0}")]
    Other(String),
}

impl AppError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            AppError::DirectoryNotFound { .. } => ExitCode::DirectoryNotFound,
            AppError::NotADirectory { .. } => ExitCode::DirectoryNotFound,
            AppError::PermissionDenied { .. } => ExitCode::PermissionError,
            AppError::FilesystemError { .. } => ExitCode::FilesystemError,
            AppError::ConfigError { .. } => ExitCode::ConfigError,
            AppError::Other(_) => ExitCode::GeneralError,
        }
    }

    pub fn detailed_message(&self) -> String {
        match self {
            AppError::DirectoryNotFound { path } => {
                format!(
                    "The specified directory does not exist:\n  {}\n\n\
                     Please verify the path and try again.",
                    path.display()
                )
            }

            AppError::NotADirectory { path } => {
                format!(
                    "The specified path is not a directory:\n  {}\n\n\
                     Please provide a valid directory path.",
                    path.display()
                )
            }

            AppError::PermissionDenied { path } => {
                format!(
                    "Permission denied when accessing:\n  {}\n\n\
                     Please check file permissions or run with appropriate privileges.",
                    path.display()
                )
            }

            AppError::FilesystemError {
                operation,
                path,
                destination,
                source,
            } => {
                let mut msg = format!("Failed to {}:\n  Path:  {}\n", operation, path.display());
                if let Some(destination) = destination {
                    msg.push_str(&format!("  To:    {}\n", destination.display()));
                }
                msg.push_str(&format!("  Error: {}\n\n", source));
                msg.push_str(
                    "The run was stopped here. Changes made before this point \
                     were not rolled back.",
                );
                msg
            }

            AppError::ConfigError { message } => {
                format!(
                    "Invalid configuration: {}\n\n\
                     Check the command-line flags and MEDIATIDY_* environment variables.",
                    message
                )
            }

            AppError::Other(message) => message.clone(),
        }
    }
}

impl From<ScannerError> for AppError {
    fn from(err: ScannerError) -> Self {
        match err {
            ScannerError::PathNotFound(path) => AppError::DirectoryNotFound { path },
            ScannerError::NotADirectory(path) => AppError::NotADirectory { path },
            ScannerError::PermissionDenied(path) => AppError::PermissionDenied { path },
            ScannerError::IoError { path, source } => AppError::FilesystemError {
                operation: "read directory",
                path,
                destination: None,
                source,
            },
        }
    }
}

impl From<SweepError> for AppError {
    fn from(err: SweepError) -> Self {
        match err {
            SweepError::Scan(e) => e.into(),
            SweepError::DeleteFailed { path, source } => AppError::FilesystemError {
                operation: "delete file",
                path,
                destination: None,
                source,
            },
            SweepError::ReportFailed(e) => {
                AppError::Other(format!("Failed to display output: {}", e))
            }
        }
    }
}

impl From<MatchError> for AppError {
    fn from(err: MatchError) -> Self {
        match err {
            MatchError::Scan(e) => e.into(),
            MatchError::MoveFailed { from, to, source } => AppError::FilesystemError {
                operation: "move subtitle",
                path: from,
                destination: Some(to),
                source,
            },
            MatchError::RemoveFolderFailed { path, source } => AppError::FilesystemError {
                operation: "remove subtitle folder",
                path,
                destination: None,
                source,
            },
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::ConfigError {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_exit_codes() {
        let err = AppError::DirectoryNotFound {
            path: PathBuf::from("/test"),
        };
        assert_eq!(err.exit_code(), ExitCode::DirectoryNotFound);

        let err = AppError::PermissionDenied {
            path: PathBuf::from("/test"),
        };
        assert_eq!(err.exit_code(), ExitCode::PermissionError);

        let err = AppError::ConfigError {
            message: "bad".to_string(),
        };
        assert_eq!(err.exit_code(), ExitCode::ConfigError);
    }

    #[test]
    fn test_scanner_error_conversion() {
        let app_err: AppError = ScannerError::PathNotFound(PathBuf::from("/missing")).into();
        assert_eq!(app_err.exit_code(), ExitCode::DirectoryNotFound);

        let app_err: AppError = ScannerError::NotADirectory(PathBuf::from("/file")).into();
        assert_eq!(app_err.exit_code(), ExitCode::DirectoryNotFound);
    }

    #[test]
    fn test_match_error_conversion() {
        let err = MatchError::MoveFailed {
            from: PathBuf::from("/show/subtitles-en/1.srt"),
            to: PathBuf::from("/show/ep1.en.srt"),
            source: io::Error::new(io::ErrorKind::Other, "disk full"),
        };
        let app_err: AppError = err.into();

        assert_eq!(app_err.exit_code(), ExitCode::FilesystemError);
        let msg = app_err.detailed_message();
        assert!(msg.contains("move subtitle"));
        assert!(msg.contains("/show/ep1.en.srt"));
        assert!(msg.contains("disk full"));
        assert!(msg.contains("not rolled back"));
    }

    #[test]
    fn test_nested_scan_error_conversion() {
        let err = SweepError::Scan(ScannerError::PermissionDenied(PathBuf::from("/locked")));
        let app_err: AppError = err.into();
        assert_eq!(app_err.exit_code(), ExitCode::PermissionError);
    }

    #[test]
    fn test_sweep_report_error_conversion() {
        let err = SweepError::ReportFailed(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
        let app_err: AppError = err.into();
        assert_eq!(app_err.exit_code(), ExitCode::GeneralError);
        assert!(app_err.detailed_message().contains("closed"));
    }

    #[test]
    fn test_config_error_conversion() {
        let app_err: AppError = ConfigError::MissingDeleteExtension.into();
        assert_eq!(app_err.exit_code(), ExitCode::ConfigError);
        assert!(app_err.detailed_message().contains("MEDIATIDY_DELETE_EXT"));
    }
}
