//! # Configuration Module
//!
//! Data directory layout and tunable build parameters.
//!
//! ## Data Storage
//!
//! Fitlist keeps its library database and optional configuration file in the
//! platform-standard data directory:
//! - Linux: `~/.local/share/fitlist/`
//! - macOS: `~/Library/Application Support/fitlist/`
//! - Windows: `%APPDATA%\fitlist\`
//!
//! ## Configuration File
//!
//! `config.json` is optional. Missing keys fall back to their defaults, so a
//! file containing only `{"max_rounds": 10}` is valid.

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::acquisition::MAX_SEED_TRACKS;
use crate::catalog::{MEDIUM_TERM_TIER, RECOMMENDATION_TIER, SHORT_TERM_TIER};
use crate::quota::QuotaEstimator;
use crate::window::DEFAULT_MARGIN;

/// 32M eight-byte cells, 256 MiB.
pub const DEFAULT_MAX_TABLE_CELLS: usize = 32 * 1024 * 1024;

/// Returns the fitlist data directory, creating it if needed.
///
/// # Errors
///
/// This function will return an error if:
/// - The system data directory cannot be determined
/// - The fitlist subdirectory cannot be created due to permissions
pub fn get_data_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().ok_or_else(|| {
        anyhow::anyhow!(
            "Could not determine system data directory. Please ensure your platform supports standard data directories."
        )
    })?;

    let fitlist_dir = data_dir.join("fitlist");
    fs::create_dir_all(&fitlist_dir).with_context(|| {
        format!(
            "Failed to create fitlist data directory at {}. Please check file permissions.",
            fitlist_dir.display()
        )
    })?;

    Ok(fitlist_dir)
}

/// Default library database location, `<data dir>/library.db`.
///
/// # Errors
///
/// See [`get_data_dir`].
pub fn get_db_path() -> Result<PathBuf> {
    Ok(get_data_dir()?.join("library.db"))
}

/// Default configuration file location, `<data dir>/config.json`.
///
/// # Errors
///
/// See [`get_data_dir`].
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_data_dir()?.join("config.json"))
}

/// Parameters of one playlist build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Tier of short-term history tracks
    pub short_term_tier: u32,
    /// Tier of medium-term history tracks
    pub medium_term_tier: u32,
    /// Tier of recommended tracks
    pub recommendation_tier: u32,
    /// Slack on each side of the expected duration, in deciseconds
    pub window_margin: u32,
    /// Longest playlist accepted, in minutes. Bounds the solver's table width.
    pub max_minutes: u32,
    /// Recommendation batch sizing
    pub quota: QuotaEstimator,
    /// Catalog tracks sampled as recommendation seeds
    pub seed_tracks: usize,
    /// Recommendation rounds before giving up
    pub max_rounds: u32,
    /// Catalog size before giving up
    pub max_catalog_size: usize,
    /// Largest solver table, in cells (`(candidates + 1) * (max + 1)`), before giving up
    pub max_table_cells: usize,
    /// Consecutive rounds without new candidates before the sources count as exhausted
    pub stall_limit: u32,
    /// Wall-clock budget for one build, in seconds
    pub deadline_secs: Option<u64>,
    /// Fixed RNG seed for recommendation sampling
    pub seed: Option<u64>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            short_term_tier: SHORT_TERM_TIER,
            medium_term_tier: MEDIUM_TERM_TIER,
            recommendation_tier: RECOMMENDATION_TIER,
            window_margin: DEFAULT_MARGIN,
            max_minutes: 600,
            quota: QuotaEstimator::default(),
            seed_tracks: MAX_SEED_TRACKS,
            max_rounds: 50,
            max_catalog_size: 2_000,
            max_table_cells: DEFAULT_MAX_TABLE_CELLS,
            stall_limit: 3,
            deadline_secs: None,
            seed: None,
        }
    }
}

impl BuildConfig {
    /// Load configuration from `path`, or the defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        debug!("Loaded config from {}: {config:?}", path.display());
        Ok(config)
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_secs.map(Duration::from_secs)
    }
}
