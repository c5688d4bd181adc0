//! # Command-Line Interface Module
//!
//! Clap derive definitions for the `fitlist` binary.
//!
//! ## Commands
//!
//! - `import`: Load a JSON library description into the local database
//! - `build`: Build a playlist of a genre that fits a target duration
//! - `genres`: List genres with track counts
//! - `playlists`: List playlists built so far
//! - `completion`: Generate shell completions
//!
//! ## Examples
//!
//! ```bash
//! fitlist import ~/music/library.json
//! fitlist build --genre jazz --minutes 45
//! RUST_LOG=fitlist=debug fitlist build -g rock -m 20 --dry-run --json
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shell types supported for completion generation
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

/// Main application arguments structure.
#[derive(Parser, Debug)]
#[command(name = "fitlist")]
#[command(about = "Fitlist: playlists that fit a target duration, ranked by how much you listen")]
#[command(version)]
pub struct Args {
    /// Library database (defaults to the platform data directory)
    #[arg(long, global = true, env = "FITLIST_DB")]
    pub db: Option<PathBuf>,

    /// Build configuration file (JSON)
    #[arg(long, global = true, env = "FITLIST_CONFIG")]
    pub config: Option<PathBuf>,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Enumeration of all available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Import a library description into the database
    ///
    /// The JSON file lists albums and artists with their genres, tracks with
    /// their durations, and the user's short- and medium-term top tracks.
    Import {
        /// Path to the library JSON file
        #[arg(value_hint = clap::ValueHint::FilePath)]
        path: PathBuf,

        /// Recreate the database if it already exists
        #[arg(long)]
        force: bool,
    },

    /// Build a playlist that fits a target duration
    ///
    /// Starts from your recent top tracks, widens to six months of history,
    /// then fills up with recommendations until a combination of tracks lands
    /// within 15 seconds of the requested length.
    Build {
        /// Genre every track must belong to
        #[arg(short, long)]
        genre: String,

        /// Target length in minutes
        #[arg(short, long)]
        minutes: u32,

        /// Playlist name (defaults to "<genre> (<minutes> min)")
        #[arg(short, long)]
        name: Option<String>,

        /// Print the selection without saving a playlist
        #[arg(long)]
        dry_run: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Abort after this many seconds
        #[arg(long)]
        deadline_secs: Option<u64>,

        /// Fixed seed for recommendation sampling
        #[arg(long)]
        seed: Option<u64>,
    },

    /// List genres in the library with their track counts
    Genres,

    /// List playlists built so far
    Playlists,

    /// Generate shell completions
    ///
    /// Usage: fitlist completion bash > ~/.local/share/bash-completion/completions/fitlist
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_build_arguments() {
        let args = Args::parse_from([
            "fitlist", "--db", "/tmp/lib.db", "build", "-g", "jazz", "-m", "45", "--dry-run",
            "--seed", "9",
        ]);

        assert_eq!(args.db, Some(PathBuf::from("/tmp/lib.db")));
        match args.command {
            Command::Build { genre, minutes, dry_run, seed, json, .. } => {
                assert_eq!(genre, "jazz");
                assert_eq!(minutes, 45);
                assert!(dry_run);
                assert!(!json);
                assert_eq!(seed, Some(9));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_minutes_must_be_numeric() {
        assert!(Args::try_parse_from(["fitlist", "build", "-g", "jazz", "-m", "half"]).is_err());
    }
}
