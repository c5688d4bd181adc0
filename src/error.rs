//! Error types for playlist building
//!
//! Collaborator failures (database, network, I/O) arrive as `anyhow::Error`
//! and are carried through [`BuildError::Source`] untouched. The remaining
//! variants are the ways the selection loop itself can give up.

use thiserror::Error;

/// Why a playlist could not be built.
#[derive(Error, Debug)]
pub enum BuildError {
    /// Requested duration is zero or above the configured ceiling
    #[error("Invalid playlist duration: {minutes} minutes (allowed: 1-{max_minutes})")]
    InvalidDuration { minutes: u32, max_minutes: u32 },

    /// Retry ceiling reached without a selection inside the window
    #[error("No feasible playlist after {rounds} recommendation rounds ({candidates} candidates)")]
    NoFeasiblePlaylist { rounds: u32, candidates: usize },

    /// The sources stopped producing new candidates
    #[error("Track sources exhausted after {rounds} rounds ({candidates} candidates); cannot build playlist")]
    SourceExhausted { rounds: u32, candidates: usize },

    /// The request was cancelled through its token
    #[error("Playlist build cancelled")]
    Cancelled,

    /// The configured deadline passed
    #[error("Playlist build exceeded its deadline of {0:?}")]
    DeadlineExceeded(std::time::Duration),

    /// Track source or playlist sink failure
    #[error(transparent)]
    Source(#[from] anyhow::Error),
}

impl BuildError {
    /// True for the errors caused by the catalog never reaching a feasible window.
    #[must_use]
    pub fn is_infeasible(&self) -> bool {
        matches!(
            self,
            Self::NoFeasiblePlaylist { .. } | Self::SourceExhausted { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_errors_are_transparent() {
        let err = BuildError::from(anyhow::anyhow!("connection reset"));
        assert_eq!(err.to_string(), "connection reset");
        assert!(!err.is_infeasible());
    }

    #[test]
    fn test_infeasible_classification() {
        let exhausted = BuildError::SourceExhausted { rounds: 3, candidates: 12 };
        let ceiling = BuildError::NoFeasiblePlaylist { rounds: 50, candidates: 900 };

        assert!(exhausted.is_infeasible());
        assert!(ceiling.is_infeasible());
        assert!(!BuildError::Cancelled.is_infeasible());
        assert!(ceiling.to_string().contains("50 recommendation rounds"));
    }
}
