//! Progress output for user-facing status updates.
//!
//! Live lines are written to stderr while the walk is running, so stdout only
//! carries the report. In verbose mode output is suppressed since tracing
//! handles everything.

use colored::Colorize;
use std::io::{self, IsTerminal, Write};
use std::path::Path;

/// Progress reporter for user-facing output
pub struct Progress {
    writer: Box<dyn Write>,
    /// When true, all output is suppressed (verbose mode uses tracing instead)
    silent: bool,
    /// When true, output is colorized
    colors_enabled: bool,
}

/// Check if we should use colors in output
pub fn should_use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }
    io::stderr().is_terminal()
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress {
    /// Create a new progress reporter writing to stderr
    pub fn new() -> Self {
        Self {
            writer: Box::new(io::stderr()),
            silent: false,
            colors_enabled: should_use_colors(),
        }
    }

    /// Create a progress reporter that respects verbosity.
    /// When verbose=true, output is suppressed (tracing handles it)
    pub fn new_with_ui(verbose: bool, colors_enabled: bool) -> Self {
        if !colors_enabled {
            colored::control::set_override(false);
        }
        Self {
            writer: Box::new(io::stderr()),
            silent: verbose,
            colors_enabled,
        }
    }

    /// Create a progress reporter with a custom writer (for testing)
    #[cfg(test)]
    pub fn with_writer(writer: Box<dyn Write>) -> Self {
        Self {
            writer,
            silent: false,
            colors_enabled: false,
        }
    }

    /// Create a silent progress reporter
    pub fn silent() -> Self {
        Self {
            writer: Box::new(io::sink()),
            silent: true,
            colors_enabled: false,
        }
    }

    /// Report the start of a walk
    pub fn scan_start(&mut self, root: &Path, what: &str) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let _ = writeln!(
                self.writer,
                "{}",
                format!("Scanning {} for {}...", root.display(), what).dimmed()
            );
        } else {
            let _ = writeln!(self.writer, "Scanning {} for {}...", root.display(), what);
        }
    }

    /// Report a single subtitle move within a folder batch
    pub fn subtitle_move(&mut self, current: usize, total: usize, from: &Path, to: &Path) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let counter = format!("[{}/{}]", current, total);
            let _ = writeln!(
                self.writer,
                "{} {} {} {}",
                counter.cyan(),
                from.display().to_string().dimmed(),
                "→".cyan(),
                to.display()
            );
        } else {
            let _ = writeln!(
                self.writer,
                "[{}/{}] {} -> {}",
                current,
                total,
                from.display(),
                to.display()
            );
        }
    }

    /// Report an emptied subtitle folder being removed
    pub fn folder_removed(&mut self, path: &Path) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let _ = writeln!(
                self.writer,
                "{}",
                format!("Removed folder: {}", path.display()).dimmed()
            );
        } else {
            let _ = writeln!(self.writer, "Removed folder: {}", path.display());
        }
    }

    /// Report a non-fatal problem
    pub fn warn(&mut self, message: &str) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let _ = writeln!(self.writer, "{} {}", "!".yellow().bold(), message.yellow());
        } else {
            let _ = writeln!(self.writer, "Warning: {}", message);
        }
    }

    /// Report the end of a walk
    pub fn complete(&mut self, count: usize, noun: &str, dry_run: bool) {
        if self.silent {
            return;
        }
        if dry_run {
            let line = format!("Dry run complete. {} {} found.", count, noun);
            if self.colors_enabled {
                let _ = writeln!(self.writer, "{}", line.dimmed());
            } else {
                let _ = writeln!(self.writer, "{}", line);
            }
        } else if self.colors_enabled {
            let _ = writeln!(
                self.writer,
                "{} {}",
                "✓".green().bold(),
                format!("{} {} processed", count, noun).green()
            );
        } else {
            let _ = writeln!(self.writer, "Done. {} {} processed.", count, noun);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    pub(crate) fn create_test_progress() -> (Progress, Arc<Mutex<Vec<u8>>>) {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let writer = TestWriter(buffer.clone());
        let progress = Progress::with_writer(Box::new(writer));
        (progress, buffer)
    }

    pub(crate) fn captured(buffer: &Arc<Mutex<Vec<u8>>>) -> String {
        String::from_utf8(buffer.lock().unwrap().clone()).unwrap()
    }

    struct TestWriter(Arc<Mutex<Vec<u8>>>);

    impl Write for TestWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_subtitle_move_progress() {
        let (mut progress, buffer) = create_test_progress();

        progress.subtitle_move(
            1,
            2,
            Path::new("/show/subtitles-en/1.srt"),
            Path::new("/show/ep1.en.srt"),
        );
        progress.subtitle_move(
            2,
            2,
            Path::new("/show/subtitles-en/2.srt"),
            Path::new("/show/ep2.en.srt"),
        );

        let output = captured(&buffer);
        assert!(output.contains("[1/2] /show/subtitles-en/1.srt -> /show/ep1.en.srt"));
        assert!(output.contains("[2/2]"));
    }

    #[test]
    fn test_removed_folder_and_warning_output() {
        let (mut progress, buffer) = create_test_progress();

        progress.folder_removed(Path::new("/media/subtitles-en"));
        progress.warn("No language suffix in folder name: /media/subs");

        let output = captured(&buffer);
        assert!(output.contains("Removed folder: /media/subtitles-en"));
        assert!(output.contains("Warning: No language suffix"));
    }

    #[test]
    fn test_complete_output() {
        let (mut progress, buffer) = create_test_progress();

        progress.complete(3, "files", true);
        progress.complete(2, "subtitles", false);

        let output = captured(&buffer);
        assert!(output.contains("Dry run complete. 3 files found."));
        assert!(output.contains("Done. 2 subtitles processed."));
    }

    #[test]
    fn test_silent_progress_writes_nothing() {
        let mut progress = Progress::silent();
        progress.warn("ignored");
        progress.complete(1, "files", false);
    }
}
