//! Target duration window.
//!
//! Durations inside the engine are deciseconds: one minute is 600 units,
//! and a track's length is its millisecond duration divided by 100.

use crate::error::BuildError;
use serde::{Deserialize, Serialize};

/// Deciseconds per minute.
pub const UNITS_PER_MINUTE: u32 = 600;

/// Default slack on each side of the expected duration (15 seconds).
pub const DEFAULT_MARGIN: u32 = 150;

/// Inclusive `[min, max]` range a selection's total duration must land in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetWindow {
    pub expected: u32,
    pub min: u32,
    pub max: u32,
}

impl TargetWindow {
    /// Build the window for a request of `minutes`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::InvalidDuration`] when `minutes` is zero or above
    /// `max_minutes`.
    pub fn from_minutes(minutes: u32, margin: u32, max_minutes: u32) -> Result<Self, BuildError> {
        if minutes == 0 || minutes > max_minutes {
            return Err(BuildError::InvalidDuration { minutes, max_minutes });
        }

        let expected = minutes.saturating_mul(UNITS_PER_MINUTE);
        Ok(Self {
            expected,
            min: expected.saturating_sub(margin),
            max: expected.saturating_add(margin),
        })
    }

    #[must_use]
    pub const fn contains(&self, duration: u64) -> bool {
        duration >= self.min as u64 && duration <= self.max as u64
    }

    /// Requested length in minutes, as echoed back to callers.
    #[must_use]
    pub fn minutes(&self) -> f64 {
        f64::from(self.expected) / f64::from(UNITS_PER_MINUTE)
    }
}
