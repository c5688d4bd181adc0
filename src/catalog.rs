//! Candidate catalog: the working set of tracks for one playlist request.
//!
//! Insertion order matters. The knapsack solver works on positions, so the
//! catalog hands out items and resolves selected positions back to ids in the
//! order candidates were first seen.

use crate::algorithm::Item;
use log::trace;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;

/// Tier given to tracks from the user's short-term (~4 weeks) history.
pub const SHORT_TERM_TIER: u32 = 10;
/// Tier given to tracks from the user's medium-term (~6 months) history.
pub const MEDIUM_TERM_TIER: u32 = 5;
/// Tier given to recommended tracks.
pub const RECOMMENDATION_TIER: u32 = 1;

/// A track that may end up in the playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub id: String,
    /// Importance weight; higher means more strongly tied to the user.
    pub tier: u32,
    /// Length in deciseconds.
    pub duration: u32,
}

/// Insertion-ordered id -> candidate map with first-write-wins semantics.
///
/// Candidates are never removed and `total_duration` only grows.
#[derive(Debug, Default, Clone)]
pub struct CandidateCatalog {
    entries: Vec<Candidate>,
    positions: HashMap<String, usize>,
    total_duration: u64,
}

impl CandidateCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a candidate unless its id is already present.
    ///
    /// Returns `true` when the catalog grew. A repeated id keeps its original
    /// tier and duration even when the new tier is higher.
    pub fn insert(&mut self, id: &str, tier: u32, duration: u32) -> bool {
        if self.positions.contains_key(id) {
            trace!("Ignoring duplicate candidate `{id}'");
            return false;
        }

        self.positions.insert(id.to_string(), self.entries.len());
        self.entries.push(Candidate {
            id: id.to_string(),
            tier,
            duration,
        });
        self.total_duration += u64::from(duration);
        true
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Candidate> {
        self.positions.get(id).map(|&pos| &self.entries[pos])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of every candidate's duration, in deciseconds.
    #[must_use]
    pub const fn total_duration(&self) -> u64 {
        self.total_duration
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.entries.iter()
    }

    /// Knapsack items in insertion order.
    #[must_use]
    pub fn items(&self) -> Vec<Item> {
        self.entries
            .iter()
            .map(|c| Item {
                duration: c.duration,
                tier: c.tier,
            })
            .collect()
    }

    /// Map solver positions back to candidates. Out-of-range positions are dropped.
    #[must_use]
    pub fn resolve(&self, positions: &[usize]) -> Vec<&Candidate> {
        positions
            .iter()
            .filter_map(|&pos| self.entries.get(pos))
            .collect()
    }

    /// Up to `count` distinct ids picked at random, used as recommendation seeds.
    pub fn sample_ids<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Vec<String> {
        self.entries
            .choose_multiple(rng, count)
            .map(|c| c.id.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_insert_tracks_running_total() {
        let mut catalog = CandidateCatalog::new();
        assert!(catalog.is_empty());

        assert!(catalog.insert("a", SHORT_TERM_TIER, 1_800));
        assert!(catalog.insert("b", RECOMMENDATION_TIER, 2_400));

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.total_duration(), 4_200);
    }

    #[test]
    fn test_duplicate_insert_is_ignored() {
        let mut catalog = CandidateCatalog::new();
        catalog.insert("a", MEDIUM_TERM_TIER, 1_800);

        // First write wins, even for a higher tier.
        assert!(!catalog.insert("a", SHORT_TERM_TIER, 9_999));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.total_duration(), 1_800);

        let candidate = catalog.get("a").unwrap();
        assert_eq!(candidate.tier, MEDIUM_TERM_TIER);
        assert_eq!(candidate.duration, 1_800);
    }

    #[test]
    fn test_items_and_resolve_keep_insertion_order() {
        let mut catalog = CandidateCatalog::new();
        for (id, dur) in [("z", 100), ("m", 200), ("a", 300)] {
            catalog.insert(id, 1, dur);
        }

        let durations: Vec<u32> = catalog.items().iter().map(|i| i.duration).collect();
        assert_eq!(durations, vec![100, 200, 300]);

        let ids: Vec<&str> = catalog
            .resolve(&[2, 0, 7])
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "z"]);
    }

    #[test]
    fn test_sample_ids_are_distinct_members() {
        let mut catalog = CandidateCatalog::new();
        for i in 0..20 {
            catalog.insert(&format!("t{i}"), 1, 100);
        }

        let mut rng = StdRng::seed_from_u64(7);
        let sample = catalog.sample_ids(&mut rng, 5);
        assert_eq!(sample.len(), 5);
        assert_eq!(sample.iter().collect::<HashSet<_>>().len(), 5);
        assert!(sample.iter().all(|id| catalog.contains(id)));

        // Fewer candidates than requested returns them all.
        let mut small = CandidateCatalog::new();
        small.insert("only", 1, 100);
        assert_eq!(small.sample_ids(&mut rng, 5), vec!["only".to_string()]);
    }
}
