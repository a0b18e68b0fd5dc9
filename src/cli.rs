use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mediatidy")]
#[command(author, version, about, long_about = None)]
#[command(about = "Tidy a media library: sweep unwanted files and match subtitle folders to videos")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print the final report as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Process entries in the order the filesystem lists them instead of by name
    #[arg(long, global = true)]
    pub native_order: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Find files ending with an extension (reports only unless --delete is given)
    Sweep {
        /// Root folder to walk
        root: PathBuf,

        /// Case-sensitive name suffix of files to sweep, e.g. ".nfo"
        #[arg(short, long, value_name = "EXT", allow_hyphen_values = true)]
        ext: Option<String>,

        /// Delete the matched files
        #[arg(long)]
        delete: bool,

        /// Stop processing a folder after walking its first subdirectory
        #[arg(long)]
        first_subdir_only: bool,
    },

    /// Move subtitles from subtitles-<lang> folders next to their videos
    Subtitles {
        /// Root folder containing movies and shows
        root: PathBuf,

        /// Video file extension [default: .mkv]
        #[arg(long, value_name = "EXT")]
        video_ext: Option<String>,

        /// Subtitle file extension [default: .srt]
        #[arg(long, value_name = "EXT")]
        subtitle_ext: Option<String>,

        /// Regex identifying subtitle folders [default: (?i-u)^subtitles-[0-9A-Za-z_]]
        #[arg(long, value_name = "REGEX")]
        folder_pattern: Option<String>,

        /// Simulate changes without modifying the filesystem
        #[arg(short, long)]
        dry: bool,
    },
}
