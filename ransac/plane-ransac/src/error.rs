//! Error types for RANSAC plane estimation.

use thiserror::Error;

/// Result type for plane estimation operations.
pub type RansacResult<T> = Result<T, RansacError>;

/// Errors that can occur during plane estimation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RansacError {
    /// Not enough points to define a plane.
    #[error("insufficient points: need at least {required}, got {actual}")]
    InsufficientPoints {
        /// Minimum number of points required.
        required: usize,
        /// Actual number of points provided.
        actual: usize,
    },

    /// A trial spent its whole sampling budget on degenerate triples.
    #[error(
        "a model could not be inferred from the data points: trial {trial} found no \
         non-degenerate sample in {attempts} sampling attempts"
    )]
    ModelInferenceFailed {
        /// Zero-based index of the failing trial.
        trial: usize,
        /// Sampling attempts consumed by the trial.
        attempts: usize,
    },

    /// No hypothesis reached the minimum inlier count.
    #[error("no plane reached {min_inliers} inliers after {trials} trials")]
    NoConsensus {
        /// Number of trials performed.
        trials: usize,
        /// Minimum inlier count a hypothesis had to reach.
        min_inliers: usize,
    },

    /// Estimation was cancelled through the caller's flag.
    #[error("estimation cancelled after {trials} trials")]
    Cancelled {
        /// Number of trials completed before cancellation.
        trials: usize,
    },

    /// Configuration values are unusable.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the offending value.
        reason: String,
    },
}

impl RansacError {
    /// Create an `InvalidConfig` error with the given reason.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Whether this error reports bad caller input rather than a failed search.
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::InsufficientPoints { .. } | Self::InvalidConfig { .. }
        )
    }
}
