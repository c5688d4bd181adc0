//! # Playlist Building
//!
//! Drives acquisition and selection until a playlist fits the target window.
//!
//! ## Escalation
//!
//! ```text
//! ShortTermOnly ──no fit──▶ MediumTermAdded ──no fit──▶ RecommendationLoop ──fit──▶ Done
//!       │                         │                       │   ▲
//!       └──────────fit────────────┴───────────▶ Done      └───┘ quota → fetch → solve
//! ```
//!
//! 1. **ShortTermOnly**: the user's recent top tracks, highest tier.
//! 2. **MediumTermAdded**: six months of top tracks, lower tier.
//! 3. **RecommendationLoop**: batches of recommendations sized by the
//!    [`QuotaEstimator`](crate::quota::QuotaEstimator), until the solver finds
//!    a selection.
//!
//! The loop is bounded by a round ceiling, a catalog-size ceiling, a stall
//! detector, an optional deadline and a [`CancelToken`].

use crate::acquisition::Acquisition;
use crate::algorithm;
use crate::catalog::CandidateCatalog;
use crate::config::BuildConfig;
use crate::error::BuildError;
use crate::source::{Term, TrackSource};
use crate::window::TargetWindow;
use log::{debug, info, warn};
use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Escalation stage of a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    ShortTermOnly,
    MediumTermAdded,
    RecommendationLoop,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ShortTermOnly => "short-term history",
            Self::MediumTermAdded => "medium-term history",
            Self::RecommendationLoop => "recommendations",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// Shared flag to abort a build from another thread.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// A playlist that fits its window.
#[derive(Debug, Clone, Serialize)]
pub struct PlaylistSelection {
    pub genre: String,
    pub minutes: u32,
    pub window: TargetWindow,
    /// Chosen track ids, in catalog order
    pub track_ids: Vec<String>,
    /// Deciseconds
    pub total_duration: u64,
    pub total_tier: u64,
    /// Stage whose catalog produced the selection
    pub resolved_at: Stage,
    pub rounds: u32,
    pub candidates: usize,
}

/// Builds one playlist. Owns its catalog; nothing is shared between builders.
pub struct PlaylistBuilder<'a> {
    acquisition: Acquisition<'a>,
    config: BuildConfig,
    window: TargetWindow,
    minutes: u32,
    catalog: CandidateCatalog,
    stage: Stage,
    rounds: u32,
    cancel: CancelToken,
    started: Instant,
}

impl<'a> PlaylistBuilder<'a> {
    /// Prepare a build of `minutes` of `genre` from `source`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::InvalidDuration`] for an out-of-range length.
    pub fn new(
        source: &'a dyn TrackSource,
        genre: &str,
        minutes: u32,
        config: BuildConfig,
    ) -> Result<Self, BuildError> {
        let window = TargetWindow::from_minutes(minutes, config.window_margin, config.max_minutes)?;

        let mut acquisition = Acquisition::new(source, genre)
            .with_seed_tracks(config.seed_tracks)
            .with_recommendation_tier(config.recommendation_tier);
        if let Some(seed) = config.seed {
            acquisition = acquisition.with_seed(seed);
        }

        Ok(Self {
            acquisition,
            config,
            window,
            minutes,
            catalog: CandidateCatalog::new(),
            stage: Stage::ShortTermOnly,
            rounds: 0,
            cancel: CancelToken::new(),
            started: Instant::now(),
        })
    }

    #[must_use]
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    #[must_use]
    pub const fn window(&self) -> TargetWindow {
        self.window
    }

    #[must_use]
    pub const fn stage(&self) -> Stage {
        self.stage
    }

    #[must_use]
    pub const fn catalog(&self) -> &CandidateCatalog {
        &self.catalog
    }

    /// Recommendation rounds run so far.
    #[must_use]
    pub const fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Run the escalation until a selection fits the window.
    ///
    /// # Errors
    ///
    /// - [`BuildError::NoFeasiblePlaylist`] when the round, catalog or solver
    ///   table ceiling is hit
    /// - [`BuildError::SourceExhausted`] when rounds stop adding candidates
    /// - [`BuildError::Cancelled`] / [`BuildError::DeadlineExceeded`]
    /// - [`BuildError::Source`] for collaborator failures
    pub fn build(&mut self) -> Result<PlaylistSelection, BuildError> {
        self.started = Instant::now();
        let interrupt = Interrupt {
            cancel: self.cancel.clone(),
            started: self.started,
            deadline: self.config.deadline(),
        };
        info!(
            "Building {} min of `{}' (window {}..={} ds)",
            self.minutes,
            self.acquisition.genre(),
            self.window.min,
            self.window.max
        );

        for (stage, term, tier) in [
            (Stage::ShortTermOnly, Term::ShortTerm, self.config.short_term_tier),
            (Stage::MediumTermAdded, Term::MediumTerm, self.config.medium_term_tier),
        ] {
            self.stage = stage;
            interrupt.check()?;
            self.acquisition.fetch_user_history(
                &mut self.catalog,
                term,
                tier,
                &|| interrupt.check().is_err(),
            )?;
            interrupt.check()?;
            if let Some(selection) = self.try_select()? {
                return Ok(selection);
            }
        }

        self.stage = Stage::RecommendationLoop;
        let mut stalled = 0;
        loop {
            interrupt.check()?;

            if self.rounds >= self.config.max_rounds
                || self.catalog.len() >= self.config.max_catalog_size
            {
                warn!(
                    "Giving up after {} rounds with {} candidates",
                    self.rounds,
                    self.catalog.len()
                );
                return Err(self.infeasible());
            }

            let quota = self
                .config
                .quota
                .estimate(u64::from(self.window.min), self.catalog.total_duration());
            let added = self
                .acquisition
                .fetch_recommendations(&mut self.catalog, quota)?;
            self.rounds += 1;
            debug!("Round {}: quota {quota}, added {added}", self.rounds);

            if added == 0 {
                stalled += 1;
                if stalled >= self.config.stall_limit {
                    warn!("No new candidates for {stalled} rounds");
                    return Err(BuildError::SourceExhausted {
                        rounds: self.rounds,
                        candidates: self.catalog.len(),
                    });
                }
                continue;
            }
            stalled = 0;

            if let Some(selection) = self.try_select()? {
                return Ok(selection);
            }
        }
    }

    fn infeasible(&self) -> BuildError {
        BuildError::NoFeasiblePlaylist {
            rounds: self.rounds,
            candidates: self.catalog.len(),
        }
    }

    fn try_select(&mut self) -> Result<Option<PlaylistSelection>, BuildError> {
        // The solver returns early without a table when the catalog is too short.
        if self.catalog.total_duration() >= u64::from(self.window.min) {
            let cells = (self.catalog.len() + 1).saturating_mul(self.window.max as usize + 1);
            if cells > self.config.max_table_cells {
                warn!(
                    "Solver table of {cells} cells exceeds the limit of {}",
                    self.config.max_table_cells
                );
                return Err(self.infeasible());
            }
        }

        let items = self.catalog.items();
        let positions = algorithm::solve(&items, self.window.min, self.window.max);
        if positions.is_empty() {
            debug!("No fit after {} ({} candidates)", self.stage, self.catalog.len());
            return Ok(None);
        }

        let resolved_at = self.stage;
        self.stage = Stage::Done;
        let selection = PlaylistSelection {
            genre: self.acquisition.genre().to_string(),
            minutes: self.minutes,
            window: self.window,
            track_ids: self
                .catalog
                .resolve(&positions)
                .into_iter()
                .map(|c| c.id.clone())
                .collect(),
            total_duration: algorithm::selection_duration(&items, &positions),
            total_tier: algorithm::selection_tier(&items, &positions),
            resolved_at,
            rounds: self.rounds,
            candidates: self.catalog.len(),
        };

        info!(
            "Selected {} tracks from {} ({} ds, tier {}) in {:?}",
            selection.track_ids.len(),
            resolved_at,
            selection.total_duration,
            selection.total_tier,
            self.started.elapsed()
        );
        Ok(Some(selection))
    }
}

/// Cancellation and deadline state of one `build` call.
struct Interrupt {
    cancel: CancelToken,
    started: Instant,
    deadline: Option<Duration>,
}

impl Interrupt {
    fn check(&self) -> Result<(), BuildError> {
        if self.cancel.is_cancelled() {
            return Err(BuildError::Cancelled);
        }
        if let Some(deadline) = self.deadline {
            if self.started.elapsed() >= deadline {
                return Err(BuildError::DeadlineExceeded(deadline));
            }
        }
        Ok(())
    }
}
