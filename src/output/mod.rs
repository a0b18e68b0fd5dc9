use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::{self, Write};

use crate::matcher::MatchResult;
use crate::sweeper::SweptFile;

/// Machine-readable run report written with `--json`
#[derive(Debug, Serialize)]
pub struct JsonReport<'a, T: Serialize> {
    pub tool_version: &'static str,
    pub executed_at: DateTime<Utc>,
    pub command: &'static str,
    #[serde(flatten)]
    pub result: &'a T,
}

impl<'a, T: Serialize> JsonReport<'a, T> {
    pub fn new(command: &'static str, result: &'a T) -> Self {
        Self {
            tool_version: env!("CARGO_PKG_VERSION"),
            executed_at: Utc::now(),
            command,
            result,
        }
    }
}

/// Write a run report as pretty-printed JSON
pub fn display_json<T: Serialize>(
    command: &'static str,
    result: &T,
    writer: &mut impl Write,
) -> io::Result<()> {
    let report = JsonReport::new(command, result);
    serde_json::to_writer_pretty(&mut *writer, &report).map_err(io::Error::from)?;
    writeln!(writer)
}

/// Display one swept file as a single line so the output can be piped
pub fn display_swept_file(file: &SweptFile, writer: &mut impl Write) -> io::Result<()> {
    if file.deleted {
        writeln!(writer, "deleted {}", file.path.display())
    } else {
        writeln!(writer, "{}", file.path.display())
    }
}

/// Display planned subtitle moves for a dry run
pub fn display_match_dry_run(result: &MatchResult, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "========================================")?;
    writeln!(writer, "              DRY RUN")?;
    writeln!(writer, "========================================")?;
    writeln!(writer)?;
    writeln!(writer, "Root:       {}", result.root.display())?;
    writeln!(writer, "Operations: {}", result.moves.len())?;
    writeln!(writer)?;

    if result.moves.is_empty() {
        writeln!(writer, "No subtitles to move.")?;
        return Ok(());
    }

    writeln!(writer, "Planned changes:")?;
    writeln!(writer)?;

    for (i, op) in result.moves.iter().enumerate() {
        writeln!(writer, "  {}. [{}]", i + 1, op.language)?;
        writeln!(writer, "     Old path: {}", op.source.display())?;
        writeln!(writer, "     New path: {}", op.destination.display())?;
        writeln!(writer)?;
    }

    writeln!(writer, "----------------------------------------")?;
    writeln!(writer, "Summary:")?;
    writeln!(writer, "  {} subtitles would be moved", result.moves.len())?;
    writeln!(
        writer,
        "  {} subtitle folders would be removed",
        result.removed_folders.len()
    )?;
    writeln!(writer)?;
    writeln!(writer, "Run without --dry to apply these changes.")?;

    Ok(())
}

/// Display execution results (non-dry-run)
pub fn display_match_result(result: &MatchResult, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer)?;

    if result.moves.is_empty() {
        writeln!(writer, "No subtitles to move.")?;
        return Ok(());
    }

    for op in &result.moves {
        writeln!(writer, "Old path: {}", op.source.display())?;
        writeln!(writer, "New path: {}", op.destination.display())?;
        writeln!(writer)?;
    }

    writeln!(
        writer,
        "Successfully moved {} subtitles and removed {} folders.",
        result.moves.len(),
        result.removed_folders.len()
    )?;

    Ok(())
}
