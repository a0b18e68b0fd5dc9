mod types;

pub use types::*;

use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info, trace};

use crate::config::{SweepConfig, TraversalMode};
use crate::output::display_swept_file;
use crate::scanner::{list_directory, resolve_root};

/// Recursively find files under `config.root` whose name ends with
/// `config.delete_ext`, deleting them unless this is a dry run.
///
/// Each match is written to `report` as soon as it is handled, so matches
/// found before a failing folder are already reported when the error
/// comes back.
pub fn sweep<W: Write>(config: &SweepConfig, report: &mut W) -> Result<SweepResult, SweepError> {
    let root = resolve_root(&config.root)?;

    info!(
        root = ?root,
        extension = %config.delete_ext,
        dry_run = config.dry_run,
        traversal = ?config.traversal,
        "Starting sweep"
    );

    let mut result = SweepResult::new(root.clone(), config.delete_ext.clone(), config.dry_run);
    sweep_folder(&root, config, report, &mut result)?;

    info!(
        matched = result.len(),
        deleted = result.deleted_count(),
        "Sweep complete"
    );

    Ok(result)
}

fn sweep_folder<W: Write>(
    folder: &Path,
    config: &SweepConfig,
    report: &mut W,
    result: &mut SweepResult,
) -> Result<(), SweepError> {
    let entries = list_directory(folder, config.order)?;

    for entry in entries {
        if entry.is_dir {
            sweep_folder(&entry.path, config, report, result)?;

            if config.traversal == TraversalMode::FirstSubdirectoryOnly {
                trace!(folder = ?folder, after = %entry.name, "Skipping remaining entries");
                return Ok(());
            }
            continue;
        }

        if !entry.name.ends_with(&config.delete_ext) {
            continue;
        }

        debug!(path = ?entry.path, "Matched");

        let deleted = if config.dry_run {
            false
        } else {
            fs::remove_file(&entry.path).map_err(|source| SweepError::DeleteFailed {
                path: entry.path.clone(),
                source,
            })?;
            info!(path = ?entry.path, "Deleted");
            true
        };

        let file = SweptFile {
            path: entry.path,
            deleted,
        };
        display_swept_file(&file, report).map_err(SweepError::ReportFailed)?;
        result.add(file);
    }

    Ok(())
}
