//! Duration-fitted playlist building.
//!
//! Core modules:
//! - [`algorithm`] - Duration-window knapsack solver
//! - [`catalog`] - Candidate tracks of one request
//! - [`acquisition`] - Escalating candidate fetches from a track source
//! - [`quota`] - Recommendation batch sizing
//! - [`playlist`] - The retry/escalation loop tying it together
//!
//! ### Supporting Modules
//!
//! - [`source`] - Collaborator traits (track source, playlist sink)
//! - [`db`] - SQLite-backed local library implementing both traits
//! - [`publish`] - Pushing a selection to a playlist sink
//! - [`window`] - Target duration window
//! - [`error`] - Build errors
//! - [`config`] - Data directory and build parameters
//! - [`cli`] / [`completion`] - Command-line interface
//!
//! ## Quick Start Example
//!
//! ```no_run
//! use fitlist::config::BuildConfig;
//! use fitlist::db::LibrarySource;
//! use fitlist::playlist::PlaylistBuilder;
//!
//! let library = LibrarySource::open(&fitlist::config::get_db_path()?)?;
//! let selection = PlaylistBuilder::new(&library, "jazz", 45, BuildConfig::default())?
//!     .build()?;
//!
//! println!("{} tracks, {} ds", selection.track_ids.len(), selection.total_duration);
//! let playlist = fitlist::publish::publish(&library, &selection, "Late night")?;
//! println!("Saved as {}", playlist.id);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Units
//!
//! Durations are deciseconds throughout (`duration_ms / 100`). A request for
//! `D` minutes accepts any total in `[D*600 - 150, D*600 + 150]`.
//!
//! ## Error Handling
//!
//! [`playlist::PlaylistBuilder::build`] returns [`error::BuildError`];
//! everything else returns `anyhow::Result` with context attached.

pub mod acquisition;
pub mod algorithm;
pub mod catalog;
pub mod cli;
pub mod completion;
pub mod config;
pub mod db;
pub mod error;
pub mod playlist;
pub mod publish;
pub mod quota;
pub mod source;
pub mod window;
