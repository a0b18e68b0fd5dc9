mod types;

pub use types::*;

use std::ffi::OsString;
use std::fs;
use std::path::Path;
use tracing::{debug, info, trace, warn};

use crate::config::MatchConfig;
use crate::progress::Progress;
use crate::scanner::{list_directory, resolve_root, DirectoryEntry};

/// Walk `config.root` and move every subtitle folder's files next to the
/// videos they pair with.
///
/// A folder is only processed when it holds at least one video and at least
/// one subtitle folder. A subtitle folder is paired only when its subtitle
/// count equals the video count; otherwise it is left untouched.
pub fn match_subtitles(
    config: &MatchConfig,
    progress: &mut Progress,
) -> Result<MatchResult, MatchError> {
    let root = resolve_root(&config.root)?;

    info!(
        root = ?root,
        video_ext = %config.video_ext,
        subtitle_ext = %config.subtitle_ext,
        pattern = %config.subtitle_folder_pattern.as_str(),
        dry_run = config.dry_run,
        "Starting subtitle matching"
    );

    let mut result = MatchResult::new(root.clone(), config.dry_run);
    scan_folder(&root, config, progress, &mut result)?;

    info!(
        moves = result.len(),
        folders = result.removed_folders.len(),
        "Subtitle matching complete"
    );

    Ok(result)
}

fn scan_folder(
    folder: &Path,
    config: &MatchConfig,
    progress: &mut Progress,
    result: &mut MatchResult,
) -> Result<(), MatchError> {
    let entries = list_directory(folder, config.order)?;

    let mut subtitle_folders: Vec<DirectoryEntry> = Vec::new();
    let mut video_files: Vec<DirectoryEntry> = Vec::new();

    for entry in entries {
        if entry.is_dir && config.subtitle_folder_pattern.is_match(&entry.name) {
            trace!(name = %entry.name, "Subtitle folder");
            subtitle_folders.push(entry);
        } else if entry.is_dir {
            scan_folder(&entry.path, config, progress, result)?;
        } else if has_extension(&entry.name, &config.video_ext) {
            trace!(name = %entry.name, "Video file");
            video_files.push(entry);
        }
    }

    if subtitle_folders.is_empty() || video_files.is_empty() {
        return Ok(());
    }

    debug!(
        folder = ?folder,
        videos = video_files.len(),
        subtitle_folders = subtitle_folders.len(),
        "Matching subtitle folders"
    );

    for entry in subtitle_folders {
        let subtitle_folder = read_subtitle_folder(entry, config)?;

        if subtitle_folder.files.len() != video_files.len() {
            debug!(
                folder = %subtitle_folder.entry.name,
                subtitles = subtitle_folder.files.len(),
                videos = video_files.len(),
                "Count mismatch, skipping"
            );
            continue;
        }

        let Some(language) = language_suffix(&subtitle_folder.entry.name) else {
            warn!(folder = %subtitle_folder.entry.name, "No language suffix, skipping");
            progress.warn(&format!(
                "No language suffix in folder name: {}",
                subtitle_folder.entry.path.display()
            ));
            continue;
        };

        rename_subtitles(
            folder,
            &video_files,
            &subtitle_folder,
            language,
            config,
            progress,
            result,
        )?;
    }

    Ok(())
}

/// List the subtitle files of a subtitle folder and count the other entries
/// that would keep it from being removed.
fn read_subtitle_folder(
    entry: DirectoryEntry,
    config: &MatchConfig,
) -> Result<SubtitleFolder, MatchError> {
    let listing = list_directory(&entry.path, config.order)?;
    let total = listing.len();

    let files: Vec<DirectoryEntry> = listing
        .into_iter()
        .filter(|e| !e.is_dir && e.name.to_lowercase().ends_with(&config.subtitle_ext))
        .collect();

    let other_entries = total - files.len();

    Ok(SubtitleFolder {
        entry,
        files,
        other_entries,
    })
}

fn rename_subtitles(
    folder: &Path,
    video_files: &[DirectoryEntry],
    subtitle_folder: &SubtitleFolder,
    language: &str,
    config: &MatchConfig,
    progress: &mut Progress,
    result: &mut MatchResult,
) -> Result<(), MatchError> {
    let total = subtitle_folder.files.len();

    for (i, (subtitle, video)) in subtitle_folder.files.iter().zip(video_files).enumerate() {
        let destination = folder.join(subtitle_name(video, language, &config.subtitle_ext));

        progress.subtitle_move(i + 1, total, &subtitle.path, &destination);

        if !config.dry_run {
            fs::rename(&subtitle.path, &destination).map_err(|source| MatchError::MoveFailed {
                from: subtitle.path.clone(),
                to: destination.clone(),
                source,
            })?;
            info!(from = ?subtitle.path, to = ?destination, "Moved subtitle");
        }

        result.add_move(SubtitleMove {
            source: subtitle.path.clone(),
            destination,
            video: video.path.clone(),
            language: language.to_string(),
        });
    }

    let folder_path = subtitle_folder.entry.path.clone();

    if config.dry_run {
        if subtitle_folder.other_entries > 0 {
            progress.warn(&format!(
                "{} would not be empty after the move ({} other entries)",
                folder_path.display(),
                subtitle_folder.other_entries
            ));
            return Ok(());
        }
    } else {
        fs::remove_dir(&folder_path).map_err(|source| MatchError::RemoveFolderFailed {
            path: folder_path.clone(),
            source,
        })?;
        info!(path = ?folder_path, "Removed subtitle folder");
        progress.folder_removed(&folder_path);
    }

    result.add_removed_folder(folder_path);

    Ok(())
}

/// `<video stem>.<language><subtitle ext>`, e.g. `movie.en.srt`
fn subtitle_name(video: &DirectoryEntry, language: &str, subtitle_ext: &str) -> OsString {
    let mut name = video.stem().to_os_string();
    name.push(format!(".{}{}", language, subtitle_ext));
    name
}

fn has_extension(name: &str, ext: &str) -> bool {
    Path::new(name)
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()) == ext)
        .unwrap_or(false)
}
