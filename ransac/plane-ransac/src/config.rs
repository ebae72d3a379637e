//! Configuration for RANSAC plane estimation.

use crate::error::{RansacError, RansacResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for RANSAC plane fitting.
///
/// # The threshold is dual-use
///
/// A single `threshold` value drives two different quantities:
///
/// - the inlier **distance tolerance** ([`RansacConfig::distance_threshold`]),
///   a length in the units of the point cloud, and
/// - the **confidence probability** of the adaptive trial count
///   ([`RansacConfig::confidence`]), conventionally in `(0, 1)`.
///
/// Textbook RANSAC keeps these independent. Existing data files carry only
/// one number, so both accessors currently return it. Values outside
/// `(0, 1)` still work: the adaptive bound then degenerates and the
/// estimator stops after the first accepted hypothesis.
///
/// # Example
///
/// ```
/// use plane_ransac::RansacConfig;
///
/// let config = RansacConfig::new()
///     .with_threshold(0.05)
///     .with_inlier_ratio(0.6)
///     .with_seed(7);
///
/// assert_eq!(config.min_inliers(10), 6);
/// assert!((config.distance_threshold() - 0.05).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RansacConfig {
    /// Inlier distance tolerance and confidence probability.
    pub threshold: f64,
    /// Fraction of the points a hypothesis must explain to be accepted.
    pub inlier_ratio: f64,
    /// Upper bound on the number of trials.
    pub max_iterations: usize,
    /// Sampling attempts per trial; every drawn triple costs 3.
    pub max_sampling_attempts: usize,
    /// Optional seed for reproducible results.
    pub seed: Option<u64>,
}

impl Default for RansacConfig {
    fn default() -> Self {
        Self {
            threshold: 0.01,
            inlier_ratio: 0.5,
            max_iterations: 1000,
            max_sampling_attempts: 100,
            seed: None,
        }
    }
}

impl RansacConfig {
    /// Create a new RANSAC configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the distance/confidence threshold.
    #[must_use]
    pub const fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the inlier ratio used to derive the minimum inlier count.
    #[must_use]
    pub const fn with_inlier_ratio(mut self, ratio: f64) -> Self {
        self.inlier_ratio = ratio;
        self
    }

    /// Set the maximum number of trials.
    #[must_use]
    pub const fn with_max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Set the per-trial sampling attempt budget.
    #[must_use]
    pub const fn with_max_sampling_attempts(mut self, attempts: usize) -> Self {
        self.max_sampling_attempts = attempts;
        self
    }

    /// Set a random seed for reproducibility.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Maximum point-to-plane distance for a point to count as an inlier.
    #[inline]
    #[must_use]
    pub const fn distance_threshold(&self) -> f64 {
        self.threshold
    }

    /// Probability used by the adaptive trial count.
    ///
    /// Shares its value with [`RansacConfig::distance_threshold`].
    #[inline]
    #[must_use]
    pub const fn confidence(&self) -> f64 {
        self.threshold
    }

    /// Minimum inlier count for `point_count` points.
    ///
    /// `inlier_ratio × point_count`, rounded half-to-even and capped at
    /// `point_count`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    // Precision loss: point counts beyond 2^52 are unsupported
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    // Truncation/sign loss: ratio is validated non-negative and the result is capped
    pub fn min_inliers(&self, point_count: usize) -> usize {
        let wanted = (self.inlier_ratio * point_count as f64).round_ties_even();
        (wanted.max(0.0) as usize).min(point_count)
    }

    /// Check that the numeric fields are usable.
    ///
    /// # Errors
    ///
    /// Returns [`RansacError::InvalidConfig`] if the threshold is negative or
    /// not finite, or the inlier ratio is negative or not finite.
    pub fn validate(&self) -> RansacResult<()> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(RansacError::invalid_config(format!(
                "threshold must be finite and non-negative, got {}",
                self.threshold
            )));
        }
        if !self.inlier_ratio.is_finite() || self.inlier_ratio < 0.0 {
            return Err(RansacError::invalid_config(format!(
                "inlier ratio must be finite and non-negative, got {}",
                self.inlier_ratio
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn defaults() {
        let config = RansacConfig::default();
        assert_relative_eq!(config.threshold, 0.01);
        assert_relative_eq!(config.inlier_ratio, 0.5);
        assert_eq!(config.max_iterations, 1000);
        assert_eq!(config.max_sampling_attempts, 100);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn builder() {
        let config = RansacConfig::new()
            .with_threshold(0.2)
            .with_inlier_ratio(0.7)
            .with_max_iterations(50)
            .with_max_sampling_attempts(30)
            .with_seed(9);

        assert_relative_eq!(config.threshold, 0.2);
        assert_relative_eq!(config.inlier_ratio, 0.7);
        assert_eq!(config.max_iterations, 50);
        assert_eq!(config.max_sampling_attempts, 30);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn threshold_is_shared() {
        let config = RansacConfig::new().with_threshold(0.3);
        assert_relative_eq!(config.distance_threshold(), 0.3);
        assert_relative_eq!(config.confidence(), 0.3);
    }

    #[test]
    fn min_inliers_rounding() {
        let config = RansacConfig::new().with_inlier_ratio(0.5);
        assert_eq!(config.min_inliers(10), 5);
        // 1.5 and 2.5 round to the even neighbour
        assert_eq!(config.min_inliers(3), 2);
        assert_eq!(config.min_inliers(5), 2);
        assert_eq!(config.min_inliers(7), 4);
    }

    #[test]
    fn min_inliers_capped() {
        let config = RansacConfig::new().with_inlier_ratio(2.0);
        assert_eq!(config.min_inliers(4), 4);

        let config = RansacConfig::new().with_inlier_ratio(0.0);
        assert_eq!(config.min_inliers(4), 0);
    }

    #[test]
    fn validate() {
        assert!(RansacConfig::default().validate().is_ok());
        assert!(RansacConfig::new().with_threshold(f64::NAN).validate().is_err());
        assert!(RansacConfig::new().with_threshold(-1.0).validate().is_err());
        assert!(
            RansacConfig::new()
                .with_inlier_ratio(f64::INFINITY)
                .validate()
                .is_err()
        );
        assert!(matches!(
            RansacConfig::new().with_inlier_ratio(-0.5).validate(),
            Err(RansacError::InvalidConfig { .. })
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn config_serialization() {
        let config = RansacConfig::new().with_seed(3);
        let json = serde_json::to_string(&config).ok();
        assert!(json.is_some());

        let parsed: Result<RansacConfig, _> = serde_json::from_str(r#"{"threshold": 0.5}"#);
        assert!(parsed.is_ok_and(|c| c.max_iterations == 1000));
    }
}
