use clap::Parser;
use mediatidy::cli::{Args, Command};
use mediatidy::config::{
    defaults_from_env, normalize_extension, ConfigError, EnvDefaults, MatchConfig,
    SubtitleFolderPattern, SweepConfig, TraversalMode, DEFAULT_SUBTITLE_EXT, DEFAULT_VIDEO_EXT,
};
use mediatidy::output::{display_json, display_match_dry_run, display_match_result};
use mediatidy::progress::{should_use_colors, Progress};
use mediatidy::{logging, match_subtitles, sweep, AppError, ListingOrder};
use tracing::{debug, error, info};

fn main() {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    logging::init(args.verbose);

    debug!("Environment loaded");

    if let Err(e) = run(args) {
        error!("{}", e);
        eprintln!("\nError: {}", e.detailed_message());
        std::process::exit(e.exit_code().into());
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let defaults = defaults_from_env();
    let order = if args.native_order {
        ListingOrder::Native
    } else {
        ListingOrder::Sorted
    };

    // JSON output keeps stderr quiet apart from errors and tracing
    let mut progress = if args.json {
        Progress::silent()
    } else {
        Progress::new_with_ui(args.verbose > 0, should_use_colors())
    };

    let mut stdout = std::io::stdout();
    let display_err = |e: std::io::Error| AppError::Other(format!("Failed to display output: {}", e));

    match args.command {
        Command::Sweep {
            root,
            ext,
            delete,
            first_subdir_only,
        } => {
            let mut config = SweepConfig::new(root, resolve_delete_ext(ext, &defaults)?);
            config.dry_run = !delete;
            config.order = order;
            if first_subdir_only {
                config.traversal = TraversalMode::FirstSubdirectoryOnly;
            }

            progress.scan_start(&config.root, &format!("*{}", config.delete_ext));

            // Paths stream to stdout during the walk; JSON waits for the full result
            if args.json {
                let result = sweep(&config, &mut std::io::sink())?;
                info!("Matched {} files", result.len());
                display_json("sweep", &result, &mut stdout).map_err(display_err)?;
            } else {
                let result = sweep(&config, &mut stdout.lock())?;
                info!("Matched {} files", result.len());
                progress.complete(result.len(), "files", config.dry_run);
            }
        }
        Command::Subtitles {
            root,
            video_ext,
            subtitle_ext,
            folder_pattern,
            dry,
        } => {
            let mut config = MatchConfig::new(root);
            config.video_ext =
                resolve_extension(video_ext, defaults.video_ext.clone(), DEFAULT_VIDEO_EXT)?;
            config.subtitle_ext = resolve_extension(
                subtitle_ext,
                defaults.subtitle_ext.clone(),
                DEFAULT_SUBTITLE_EXT,
            )?;
            if let Some(pattern) = folder_pattern.or(defaults.subtitle_pattern) {
                config.subtitle_folder_pattern = SubtitleFolderPattern::new(&pattern)?;
            }
            config.dry_run = dry;
            config.order = order;

            progress.scan_start(&config.root, "subtitle folders");
            let result = match_subtitles(&config, &mut progress)?;
            progress.complete(result.len(), "subtitles", config.dry_run);

            info!(
                "Matched {} subtitles in {} folders",
                result.len(),
                result.removed_folders.len()
            );

            if args.json {
                display_json("subtitles", &result, &mut stdout).map_err(display_err)?;
            } else if dry {
                display_match_dry_run(&result, &mut stdout).map_err(display_err)?;
            } else {
                display_match_result(&result, &mut stdout).map_err(display_err)?;
            }
        }
    }

    Ok(())
}

fn resolve_delete_ext(cli: Option<String>, defaults: &EnvDefaults) -> Result<String, ConfigError> {
    match cli.or_else(|| defaults.delete_ext.clone()) {
        Some(ext) if !ext.is_empty() => Ok(ext),
        Some(_) => Err(ConfigError::EmptyExtension),
        None => Err(ConfigError::MissingDeleteExtension),
    }
}

fn resolve_extension(
    cli: Option<String>,
    env: Option<String>,
    fallback: &str,
) -> Result<String, ConfigError> {
    let raw = cli.or(env).unwrap_or_else(|| fallback.to_string());
    normalize_extension(&raw)
}
