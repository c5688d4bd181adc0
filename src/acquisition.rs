//! Candidate acquisition from a [`TrackSource`].
//!
//! Acquisition escalates from the user's own history to generic
//! recommendations:
//!
//! 1. [`Acquisition::fetch_user_history`] walks every page of top tracks for a
//!    recency term and keeps the tracks of the target genre.
//! 2. [`Acquisition::fetch_recommendations`] asks the source for more tracks,
//!    seeded by the genre while the catalog is empty and by a random sample of
//!    catalog tracks afterwards.
//!
//! Tracks missing a duration or genre are skipped. Both operations are
//! idempotent with respect to the catalog: ids already present are ignored.

use crate::catalog::{CandidateCatalog, RECOMMENDATION_TIER};
use crate::source::{Seeds, Term, TrackRef, TrackSource};
use anyhow::{Context, Result};
use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Most catalog tracks used to seed one recommendation request.
pub const MAX_SEED_TRACKS: usize = 5;

/// Fetches candidates for one playlist request.
pub struct Acquisition<'a> {
    source: &'a dyn TrackSource,
    genre: String,
    rng: StdRng,
    seed_tracks: usize,
    recommendation_tier: u32,
}

impl<'a> Acquisition<'a> {
    pub fn new(source: &'a dyn TrackSource, genre: &str) -> Self {
        Self {
            source,
            genre: genre.to_string(),
            rng: StdRng::from_entropy(),
            seed_tracks: MAX_SEED_TRACKS,
            recommendation_tier: RECOMMENDATION_TIER,
        }
    }

    /// Use a fixed seed for recommendation sampling.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    #[must_use]
    pub fn with_seed_tracks(mut self, count: usize) -> Self {
        self.seed_tracks = count.max(1);
        self
    }

    #[must_use]
    pub fn with_recommendation_tier(mut self, tier: u32) -> Self {
        self.recommendation_tier = tier;
        self
    }

    #[must_use]
    pub fn genre(&self) -> &str {
        &self.genre
    }

    /// Add the user's top tracks for `term` that match the target genre.
    ///
    /// `interrupted` is polled before every page; once it returns `true` the
    /// walk stops early and the tracks added so far stay in the catalog.
    ///
    /// Returns how many candidates were added.
    ///
    /// # Errors
    ///
    /// Propagates source failures.
    pub fn fetch_user_history(
        &mut self,
        catalog: &mut CandidateCatalog,
        term: Term,
        tier: u32,
        interrupted: &dyn Fn() -> bool,
    ) -> Result<usize> {
        let mut offset = 0;
        let mut added = 0;

        loop {
            if interrupted() {
                debug!("{term} history interrupted at offset {offset}");
                break;
            }

            let page = self
                .source
                .top_tracks(term, offset)
                .with_context(|| format!("Failed to fetch {term} top tracks at offset {offset}"))?;
            trace!("{term} page at {offset}: {} tracks", page.items.len());

            for track in &page.items {
                if self.admit_history_track(catalog, track, tier)? {
                    added += 1;
                }
            }

            if !page.has_next || page.items.is_empty() {
                break;
            }
            offset += page.items.len();
        }

        info!(
            "Added {added} {term} tracks for genre `{}' ({} candidates)",
            self.genre,
            catalog.len()
        );
        Ok(added)
    }

    /// Add up to `limit` recommended tracks at the recommendation tier.
    ///
    /// Returns how many candidates were added; zero means the source only
    /// returned tracks already in the catalog.
    ///
    /// # Errors
    ///
    /// Propagates source failures.
    pub fn fetch_recommendations(
        &mut self,
        catalog: &mut CandidateCatalog,
        limit: usize,
    ) -> Result<usize> {
        let seeds = if catalog.is_empty() {
            Seeds::Genre(self.genre.clone())
        } else {
            Seeds::Tracks(catalog.sample_ids(&mut self.rng, self.seed_tracks))
        };

        let tracks = self
            .source
            .recommendations(&seeds, limit)
            .context("Failed to fetch recommendations")?;

        let mut added = 0;
        for track in &tracks {
            if catalog.contains(&track.id) {
                continue;
            }
            let Some(duration) = self.source.duration(&track.id)? else {
                debug!("Skipping recommendation `{}': no duration", track.id);
                continue;
            };
            if catalog.insert(&track.id, self.recommendation_tier, duration) {
                added += 1;
            }
        }

        debug!(
            "Recommendations: requested {limit}, received {}, added {added}",
            tracks.len()
        );
        Ok(added)
    }

    fn admit_history_track(
        &self,
        catalog: &mut CandidateCatalog,
        track: &TrackRef,
        tier: u32,
    ) -> Result<bool> {
        if catalog.contains(&track.id) {
            return Ok(false);
        }

        let genres = self.source.track_genres(track)?;
        if !genres.iter().any(|g| *g == self.genre) {
            trace!("Skipping `{}': genres {genres:?}", track.id);
            return Ok(false);
        }

        let Some(duration) = self.source.duration(&track.id)? else {
            debug!("Skipping `{}': no duration", track.id);
            return Ok(false);
        };

        Ok(catalog.insert(&track.id, tier, duration))
    }
}
