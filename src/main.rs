//! # Fitlist
//!
//! Builds playlists whose total length lands within 15 seconds of a requested
//! duration, preferring the tracks you listen to most.
//!
//! ## Usage
//!
//! ```bash
//! # Load a library description
//! fitlist import library.json
//!
//! # 45 minutes of jazz, saved as a playlist
//! fitlist build --genre jazz --minutes 45
//!
//! # Just print the selection
//! fitlist build -g rock -m 20 --dry-run
//! ```

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use fitlist::config::{self, BuildConfig};
use fitlist::db::{self, LibrarySource};
use fitlist::playlist::PlaylistBuilder;
use fitlist::{cli, completion, publish};
use log::{debug, info};
use std::path::PathBuf;

fn db_path(args: &cli::Args) -> Result<PathBuf> {
    match &args.db {
        Some(path) => Ok(path.clone()),
        None => config::get_db_path(),
    }
}

fn load_config(args: &cli::Args) -> Result<BuildConfig> {
    let path = match &args.config {
        Some(path) => path.clone(),
        None => config::get_config_path()?,
    };
    BuildConfig::load(&path)
}

fn open_library(args: &cli::Args) -> Result<LibrarySource> {
    let path = db_path(args)?;
    if !path.exists() {
        anyhow::bail!(
            "No library database at {}. Run `fitlist import <library.json>` first.",
            path.display()
        );
    }
    LibrarySource::open(&path)
}

/// Main entry point.
///
/// Logging is controlled via `RUST_LOG`:
/// - `RUST_LOG=info fitlist build ...` - Stage transitions and the result
/// - `RUST_LOG=fitlist::algorithm=trace fitlist build ...` - Solver details
fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Args::parse();
    debug!("Arguments: {args:?}");

    match &args.command {
        cli::Command::Import { path, force } => {
            let db_path = db_path(&args)?;
            info!("Importing {} into {}", path.display(), db_path.display());
            let stats = db::init_library(&db_path, path, *force)?;
            println!(
                "Imported {} tracks, {} albums, {} artists, {} top-track entries into {}",
                stats.tracks,
                stats.albums,
                stats.artists,
                stats.top_tracks,
                db_path.display()
            );
        }
        cli::Command::Build {
            genre,
            minutes,
            name,
            dry_run,
            json,
            deadline_secs,
            seed,
        } => {
            let mut config = load_config(&args)?;
            if deadline_secs.is_some() {
                config.deadline_secs = *deadline_secs;
            }
            if seed.is_some() {
                config.seed = *seed;
            }

            let library = open_library(&args)?;
            let selection = PlaylistBuilder::new(&library, genre, *minutes, config)?
                .build()
                .with_context(|| format!("Could not build {minutes} min of {genre}"))?;

            let published = if *dry_run {
                None
            } else {
                let name = name.clone().unwrap_or_else(|| publish::default_name(&selection));
                Some(publish::publish(&library, &selection, &name)?)
            };

            if *json {
                let output = serde_json::json!({
                    "selection": selection,
                    "playlist": published,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!(
                    "{} tracks, {:.1} min (target {} min), from {}",
                    selection.track_ids.len(),
                    selection.total_duration as f64 / 600.0,
                    selection.minutes,
                    selection.resolved_at
                );
                for id in &selection.track_ids {
                    println!("  {id}");
                }
                if let Some(playlist) = published {
                    println!("Saved playlist {} `{}'", playlist.id, playlist.name);
                }
            }
        }
        cli::Command::Genres => {
            let library = open_library(&args)?;
            for (genre, count) in library.genre_counts()? {
                println!("{count:>6}  {genre}");
            }
        }
        cli::Command::Playlists => {
            let library = open_library(&args)?;
            for playlist in library.playlists()? {
                println!(
                    "{:>4}  {} ({} tracks) - {}",
                    playlist.id, playlist.name, playlist.tracks, playlist.description
                );
            }
        }
        cli::Command::Completion { shell } => {
            let mut cmd = cli::Args::command();
            completion::generate_completions(completion::shell_to_completion_shell(shell), &mut cmd);
        }
    }

    Ok(())
}
