use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Error, Debug)]
pub enum ScannerError {
    #[error("Path does not exist: {0}")]
    PathNotFound(PathBuf),

    #[error("Path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("Failed to read directory {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Order in which directory listings are processed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListingOrder {
    /// Sort entries by name so pairing is reproducible across platforms
    #[default]
    Sorted,
    /// Keep whatever order the operating system returns
    Native,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

impl DirectoryEntry {
    pub fn new(name: String, path: PathBuf, is_dir: bool) -> Self {
        Self { name, path, is_dir }
    }

    /// File name without its final extension
    pub fn stem(&self) -> &std::ffi::OsStr {
        self.path
            .file_stem()
            .unwrap_or_else(|| std::ffi::OsStr::new(&self.name))
    }
}

/// Check that a walk root exists and make it absolute
pub fn resolve_root(root: &Path) -> Result<PathBuf, ScannerError> {
    if !root.exists() {
        return Err(ScannerError::PathNotFound(root.to_path_buf()));
    }
    std::path::absolute(root).map_err(|source| ScannerError::IoError {
        path: root.to_path_buf(),
        source,
    })
}

/// List the direct children of `target`, directories and files alike.
///
/// Symlinks are reported with their own type, so a link to a directory is
/// listed as a non-directory entry.
pub fn list_directory(
    target: &Path,
    order: ListingOrder,
) -> Result<Vec<DirectoryEntry>, ScannerError> {
    debug!(path = ?target, "Listing directory");

    if !target.exists() {
        return Err(ScannerError::PathNotFound(target.to_path_buf()));
    }

    if !target.is_dir() {
        return Err(ScannerError::NotADirectory(target.to_path_buf()));
    }

    let io_error = |e: std::io::Error| {
        if e.kind() == std::io::ErrorKind::PermissionDenied {
            ScannerError::PermissionDenied(target.to_path_buf())
        } else {
            ScannerError::IoError {
                path: target.to_path_buf(),
                source: e,
            }
        }
    };

    let mut entries = Vec::new();

    for entry in fs::read_dir(target).map_err(io_error)? {
        let entry = entry.map_err(io_error)?;
        let path = entry.path();
        let is_dir = entry.file_type().map_err(io_error)?.is_dir();
        let name = entry.file_name().to_string_lossy().to_string();

        trace!(name = %name, is_dir, "Examining entry");

        entries.push(DirectoryEntry::new(name, path, is_dir));
    }

    if order == ListingOrder::Sorted {
        entries.sort_by(|a, b| a.name.cmp(&b.name));
    }

    debug!(count = entries.len(), "Listing complete");

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_list_empty_directory() {
        let dir = tempdir().unwrap();
        let result = list_directory(dir.path(), ListingOrder::Sorted).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_lists_files_and_directories() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("subdir")).unwrap();
        fs::write(dir.path().join("file.txt"), "content").unwrap();

        let result = list_directory(dir.path(), ListingOrder::Sorted).unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].name, "file.txt");
        assert!(!result[0].is_dir);
        assert_eq!(result[1].name, "subdir");
        assert!(result[1].is_dir);
        assert_eq!(result[1].path, dir.path().join("subdir"));
    }

    #[test]
    fn test_includes_hidden_entries() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".hidden")).unwrap();
        fs::write(dir.path().join(".hidden.mkv"), "").unwrap();

        let result = list_directory(dir.path(), ListingOrder::Sorted).unwrap();

        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_path_not_found() {
        let result = list_directory(Path::new("/nonexistent/path"), ListingOrder::Sorted);
        assert!(matches!(result, Err(ScannerError::PathNotFound(_))));
    }

    #[test]
    fn test_not_a_directory() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("file.txt");
        fs::write(&file_path, "content").unwrap();

        let result = list_directory(&file_path, ListingOrder::Sorted);
        assert!(matches!(result, Err(ScannerError::NotADirectory(_))));
    }

    #[test]
    fn test_sorted_order() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("zebra")).unwrap();
        fs::write(dir.path().join("alpha.mkv"), "").unwrap();
        fs::create_dir(dir.path().join("beta")).unwrap();

        let result = list_directory(dir.path(), ListingOrder::Sorted).unwrap();

        let names: Vec<&str> = result.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["alpha.mkv", "beta", "zebra"]);
    }

    #[test]
    fn test_native_order_returns_all_entries() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.mkv"), "").unwrap();
        fs::write(dir.path().join("a.mkv"), "").unwrap();

        let mut names: Vec<String> = list_directory(dir.path(), ListingOrder::Native)
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        names.sort();

        assert_eq!(names, vec!["a.mkv", "b.mkv"]);
    }

    #[test]
    fn test_resolve_root() {
        let dir = tempdir().unwrap();
        assert_eq!(resolve_root(dir.path()).unwrap(), dir.path());
        assert!(matches!(
            resolve_root(Path::new("/nonexistent/root")),
            Err(ScannerError::PathNotFound(_))
        ));
    }

    #[test]
    fn test_entry_stem() {
        let entry = DirectoryEntry::new(
            "Show.S01E01.mkv".to_string(),
            PathBuf::from("/media/Show.S01E01.mkv"),
            false,
        );
        assert_eq!(entry.stem(), "Show.S01E01");
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_to_directory_is_not_a_directory() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("real")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("link")).unwrap();

        let entries = list_directory(dir.path(), ListingOrder::Sorted).unwrap();

        assert_eq!(entries[0].name, "link");
        assert!(!entries[0].is_dir);
        assert_eq!(entries[1].name, "real");
        assert!(entries[1].is_dir);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_directory_is_permission_denied() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // privileged users can read the folder anyway; nothing to check then
        let readable = fs::read_dir(&locked).is_ok();
        let result = list_directory(&locked, ListingOrder::Sorted);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        if readable {
            return;
        }

        assert!(matches!(result, Err(ScannerError::PermissionDenied(p)) if p == locked));
    }
}
