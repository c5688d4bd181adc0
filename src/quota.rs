//! Recommendation batch sizing.
//!
//! Each recommendation round asks for roughly as many tracks as are still
//! missing to reach the window's minimum, assuming an average track length,
//! plus a small top-up. The top-up also covers catalogs that are long enough
//! in total but have no combination landing inside the window.

use serde::{Deserialize, Serialize};

/// Three minutes, in deciseconds.
pub const AVERAGE_TRACK_DURATION: u32 = 1_800;
/// Smallest batch ever requested.
pub const MIN_BATCH: usize = 5;
/// Page-size ceiling of the recommendation source.
pub const MAX_BATCH: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaEstimator {
    pub average_track_duration: u32,
    pub min_batch: usize,
    pub max_batch: usize,
}

impl Default for QuotaEstimator {
    fn default() -> Self {
        Self {
            average_track_duration: AVERAGE_TRACK_DURATION,
            min_batch: MIN_BATCH,
            max_batch: MAX_BATCH,
        }
    }
}

impl QuotaEstimator {
    /// Number of recommendations to request next.
    ///
    /// `min` is the window's lower bound and `current_total` the catalog's
    /// summed duration, both in deciseconds. The result is always within
    /// `[min_batch, max_batch]`, and exactly `min_batch` once the catalog
    /// reaches `min`.
    #[must_use]
    pub fn estimate(&self, min: u64, current_total: u64) -> usize {
        let ceiling = self.max_batch.max(self.min_batch);

        if current_total >= min {
            return self.min_batch;
        }

        let average = u64::from(self.average_track_duration.max(1));
        let missing = usize::try_from((min - current_total) / average).unwrap_or(usize::MAX);
        missing.saturating_add(self.min_batch).min(ceiling)
    }
}

/// [`QuotaEstimator::estimate`] with the default constants.
#[must_use]
pub fn estimate_batch_size(min: u64, current_total: u64) -> usize {
    QuotaEstimator::default().estimate(min, current_total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_up_when_catalog_reaches_minimum() {
        assert_eq!(estimate_batch_size(17_850, 17_850), 5);
        assert_eq!(estimate_batch_size(17_850, 40_000), 5);
        assert_eq!(estimate_batch_size(0, 0), 5);
    }

    #[test]
    fn test_scales_with_missing_duration() {
        // 17_850 missing -> 9 average tracks, plus the top-up.
        assert_eq!(estimate_batch_size(17_850, 0), 14);
        // Less than one average track missing.
        assert_eq!(estimate_batch_size(17_850, 17_000), 5);
        assert_eq!(estimate_batch_size(3_600, 0), 7);
    }

    #[test]
    fn test_capped_at_source_page_size() {
        // Ten hours with nothing collected yet.
        assert_eq!(estimate_batch_size(360_000, 0), 100);
    }

    #[test]
    fn test_always_within_bounds() {
        for min in (0..400_000u64).step_by(7_919) {
            for total in (0..400_000u64).step_by(13_001) {
                let q = estimate_batch_size(min, total);
                assert!((MIN_BATCH..=MAX_BATCH).contains(&q), "{q} for min={min} total={total}");
            }
        }
    }

    #[test]
    fn test_custom_limits() {
        let estimator = QuotaEstimator {
            average_track_duration: 2_400,
            min_batch: 2,
            max_batch: 20,
        };
        assert_eq!(estimator.estimate(12_000, 0), 7);
        assert_eq!(estimator.estimate(1_000_000, 0), 20);
        assert_eq!(estimator.estimate(10, 20), 2);
    }
}
