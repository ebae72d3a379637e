//! RANSAC estimation loop.
//!
//! Each trial draws a minimal sample, rejects degenerate triples, builds a
//! normalized plane hypothesis and counts the points within the distance
//! threshold. A hypothesis that reaches the minimum inlier count becomes the
//! current best and shrinks the number of trials still needed.

use std::sync::atomic::{AtomicBool, Ordering};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::config::RansacConfig;
use crate::error::{RansacError, RansacResult};
use crate::model::Model;
use crate::plane::Plane;
use crate::sampler::{IndexSampler, SAMPLE_SIZE};
use crate::vector::Vec3;

/// Why the estimation loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Termination {
    /// The adaptive trial count was reached.
    Converged,
    /// The iteration budget ran out first.
    ExhaustedBudget,
}

/// Stateful RANSAC plane estimator.
///
/// The estimator keeps the counters and the best model of its most recent
/// run. Every call to one of the `estimate*` methods resets that state.
///
/// A hypothesis is accepted when its inlier count reaches the minimum, and
/// the most recently accepted hypothesis wins; inlier counts of successive
/// hypotheses are not compared.
///
/// # Example
///
/// ```
/// use plane_ransac::{RansacConfig, RansacEstimator, Termination, Vec3};
///
/// let points = [
///     Vec3::new(20.0, 0.0, 0.0),
///     Vec3::new(10.0, -10.0, 0.0),
///     Vec3::new(10.0, 10.0, 0.0),
/// ];
///
/// let mut estimator = RansacEstimator::new(RansacConfig::new().with_seed(1));
/// let plane = estimator.estimate(&points)?;
///
/// assert!((plane.c().abs() - 1.0).abs() < 1e-6);
/// assert_eq!(estimator.termination(), Some(Termination::Converged));
/// assert_eq!(estimator.best_model().map(|m| m.inlier_count()), Some(3));
/// # Ok::<(), plane_ransac::RansacError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RansacEstimator {
    config: RansacConfig,
    trials_performed: usize,
    trials_needed: usize,
    best_plane: Plane,
    best_model: Option<Model>,
    termination: Option<Termination>,
}

impl RansacEstimator {
    /// Create an estimator with the given configuration.
    #[must_use]
    pub fn new(config: RansacConfig) -> Self {
        let trials_needed = config.max_iterations;
        Self {
            config,
            trials_performed: 0,
            trials_needed,
            best_plane: Plane::unset(),
            best_model: None,
            termination: None,
        }
    }

    /// The configuration used by every run.
    #[must_use]
    pub const fn config(&self) -> &RansacConfig {
        &self.config
    }

    /// Trials performed by the last run.
    #[must_use]
    pub const fn trials_performed(&self) -> usize {
        self.trials_performed
    }

    /// Trials the adaptive bound asked for at the end of the last run.
    #[must_use]
    pub const fn trials_needed(&self) -> usize {
        self.trials_needed
    }

    /// Why the last run stopped, if it completed.
    #[must_use]
    pub const fn termination(&self) -> Option<Termination> {
        self.termination
    }

    /// The best plane of the last run, or [`Plane::unset`] if no hypothesis
    /// was accepted.
    #[must_use]
    pub const fn best_plane(&self) -> Plane {
        self.best_plane
    }

    /// The best model of the last run, if any hypothesis was accepted.
    #[must_use]
    pub const fn best_model(&self) -> Option<&Model> {
        self.best_model.as_ref()
    }

    /// Consume the estimator and return its best model.
    #[must_use]
    pub fn into_best_model(self) -> Option<Model> {
        self.best_model
    }

    /// Fit a plane with a generator seeded from the configuration.
    ///
    /// Uses `StdRng::seed_from_u64` when a seed is configured and OS entropy
    /// otherwise. One generator serves the whole call.
    ///
    /// Returns the best plane, which is [`Plane::unset`] when no hypothesis
    /// reached the minimum inlier count; check [`RansacEstimator::best_model`].
    ///
    /// # Errors
    ///
    /// - [`RansacError::InsufficientPoints`] for fewer than 3 points
    /// - [`RansacError::InvalidConfig`] for an unusable configuration
    /// - [`RansacError::ModelInferenceFailed`] if a trial finds no usable sample
    pub fn estimate(&mut self, points: &[Vec3]) -> RansacResult<Plane> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.run(points, &mut rng, None)
    }

    /// Fit a plane drawing samples from `rng`.
    ///
    /// # Errors
    ///
    /// Same as [`RansacEstimator::estimate`].
    pub fn estimate_with_rng<R: Rng + ?Sized>(
        &mut self,
        points: &[Vec3],
        rng: &mut R,
    ) -> RansacResult<Plane> {
        self.run(points, rng, None)
    }

    /// Fit a plane, checking `cancel` before every trial.
    ///
    /// # Errors
    ///
    /// Same as [`RansacEstimator::estimate`], plus [`RansacError::Cancelled`]
    /// once the flag is observed set.
    pub fn estimate_cancellable<R: Rng + ?Sized>(
        &mut self,
        points: &[Vec3],
        rng: &mut R,
        cancel: &AtomicBool,
    ) -> RansacResult<Plane> {
        self.run(points, rng, Some(cancel))
    }

    fn reset(&mut self) {
        self.trials_performed = 0;
        self.trials_needed = self.config.max_iterations;
        self.best_plane = Plane::unset();
        self.best_model = None;
        self.termination = None;
    }

    fn run<R: Rng + ?Sized>(
        &mut self,
        points: &[Vec3],
        rng: &mut R,
        cancel: Option<&AtomicBool>,
    ) -> RansacResult<Plane> {
        self.reset();
        let result = self.run_trials(points, rng, cancel);
        if result.is_err() {
            self.best_plane = Plane::unset();
            self.best_model = None;
        }
        result
    }

    fn run_trials<R: Rng + ?Sized>(
        &mut self,
        points: &[Vec3],
        rng: &mut R,
        cancel: Option<&AtomicBool>,
    ) -> RansacResult<Plane> {
        let size = points.len();
        if size < SAMPLE_SIZE {
            return Err(RansacError::InsufficientPoints {
                required: SAMPLE_SIZE,
                actual: size,
            });
        }
        self.config.validate()?;

        let mut sampler = IndexSampler::new(size)?;
        let min_inliers = self.config.min_inliers(size);
        let max_iterations = self.config.max_iterations;

        info!(
            points = size,
            min_inliers,
            threshold = self.config.distance_threshold(),
            max_iterations,
            "Starting RANSAC plane estimation"
        );

        while self.trials_performed < self.trials_needed && self.trials_performed < max_iterations
        {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                warn!(trials = self.trials_performed, "RANSAC estimation cancelled");
                return Err(RansacError::Cancelled {
                    trials: self.trials_performed,
                });
            }

            let Some(plane) = draw_hypothesis(
                points,
                &mut sampler,
                rng,
                self.config.max_sampling_attempts,
            ) else {
                let attempts = self.config.max_sampling_attempts.div_ceil(SAMPLE_SIZE) * SAMPLE_SIZE;
                warn!(
                    trial = self.trials_performed,
                    attempts, "No non-degenerate sample found"
                );
                return Err(RansacError::ModelInferenceFailed {
                    trial: self.trials_performed,
                    attempts,
                });
            };

            self.evaluate(points, plane, min_inliers);
            self.trials_performed += 1;
        }

        let termination = if self.trials_performed >= self.trials_needed
            && self.trials_needed < max_iterations
        {
            Termination::Converged
        } else {
            Termination::ExhaustedBudget
        };
        self.termination = Some(termination);

        info!(
            trials = self.trials_performed,
            trials_needed = self.trials_needed,
            ?termination,
            inliers = self.best_model.as_ref().map_or(0, Model::inlier_count),
            "RANSAC plane estimation finished"
        );

        Ok(self.best_plane)
    }

    /// Score `plane` and make it the best model if it reaches `min_inliers`.
    ///
    /// An accepted hypothesis replaces the previous best unconditionally and
    /// recomputes the trial bound. A rejected one changes nothing.
    fn evaluate(&mut self, points: &[Vec3], plane: Plane, min_inliers: usize) -> bool {
        let inliers = collect_inliers(points, &plane, self.config.distance_threshold());
        if inliers.len() < min_inliers {
            return false;
        }

        self.trials_needed = adaptive_trial_count(
            inliers.len(),
            points.len(),
            min_inliers,
            self.config.confidence(),
            self.config.max_iterations,
        );
        debug!(
            trial = self.trials_performed,
            inliers = inliers.len(),
            trials_needed = self.trials_needed,
            plane = %plane,
            "Accepted plane hypothesis"
        );
        self.best_plane = plane;
        self.best_model = Some(Model::new(plane, &inliers, points));
        true
    }
}

/// Fit a plane to `points` and return the winning model.
///
/// # Errors
///
/// Everything [`RansacEstimator::estimate`] reports, plus
/// [`RansacError::NoConsensus`] when no hypothesis reached the minimum
/// inlier count.
///
/// # Example
///
/// ```
/// use plane_ransac::{estimate, RansacConfig, Vec3};
///
/// let mut points = Vec::new();
/// for i in 0..6 {
///     for j in 0..6 {
///         points.push(Vec3::new(i as f32, j as f32, 1.0));
///     }
/// }
/// points.push(Vec3::new(2.0, 2.0, 8.0));
///
/// let model = estimate(&points, &RansacConfig::new().with_threshold(0.05).with_seed(42))?;
/// assert_eq!(model.inlier_count(), 36);
/// assert!(!model.inlier_indices().contains(&36));
/// # Ok::<(), plane_ransac::RansacError>(())
/// ```
pub fn estimate(points: &[Vec3], config: &RansacConfig) -> RansacResult<Model> {
    let mut estimator = RansacEstimator::new(config.clone());
    estimator.estimate(points)?;
    finish(estimator, points.len())
}

/// [`estimate`] with a caller-supplied random generator.
///
/// # Errors
///
/// Same as [`estimate`].
pub fn estimate_with_rng<R: Rng + ?Sized>(
    points: &[Vec3],
    config: &RansacConfig,
    rng: &mut R,
) -> RansacResult<Model> {
    let mut estimator = RansacEstimator::new(config.clone());
    estimator.estimate_with_rng(points, rng)?;
    finish(estimator, points.len())
}

fn finish(estimator: RansacEstimator, point_count: usize) -> RansacResult<Model> {
    let trials = estimator.trials_performed();
    let min_inliers = estimator.config().min_inliers(point_count);
    estimator.into_best_model().ok_or(RansacError::NoConsensus {
        trials,
        min_inliers,
    })
}

/// Number of trials needed to draw an outlier-free sample with probability
/// `confidence`.
///
/// With `p = inlier_count / point_count`, this is
/// `floor(ln(1 - confidence) / ln(1 - p^min_inliers))`, capped at
/// `max_iterations`. When the denominator is exactly zero the result is `0`
/// if the numerator is also zero and `max_iterations` otherwise. A NaN ratio,
/// which a confidence above 1 produces, yields `0`.
///
/// # Example
///
/// ```
/// use plane_ransac::adaptive_trial_count;
///
/// // Every point is an inlier: one trial was enough.
/// assert_eq!(adaptive_trial_count(3, 3, 3, 0.01, 1000), 0);
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
// Precision loss: point counts beyond 2^52 are unsupported
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
// Truncation/sign loss: the ratio is clamped into [0, max_iterations] first
#[allow(clippy::float_cmp)]
// Exact zero is the closed-form special case, not a tolerance check
pub fn adaptive_trial_count(
    inlier_count: usize,
    point_count: usize,
    min_inliers: usize,
    confidence: f64,
    max_iterations: usize,
) -> usize {
    if point_count == 0 {
        return max_iterations;
    }

    let p_inlier = inlier_count as f64 / point_count as f64;
    let p_no_outliers = 1.0 - p_inlier.powf(min_inliers as f64);

    let num = (1.0 - confidence).ln();
    let den = p_no_outliers.ln();
    if den == 0.0 {
        return if num == 0.0 { 0 } else { max_iterations };
    }

    let ratio = num / den;
    if ratio.is_nan() {
        return 0;
    }
    ratio.floor().clamp(0.0, max_iterations as f64) as usize
}

/// Draw triples until one defines a finite plane or the budget is spent.
///
/// Each draw costs [`SAMPLE_SIZE`] attempts. A triple is rejected when it
/// is collinear or its normal cannot be normalized to a finite unit vector.
fn draw_hypothesis<R: Rng + ?Sized>(
    points: &[Vec3],
    sampler: &mut IndexSampler,
    rng: &mut R,
    max_attempts: usize,
) -> Option<Plane> {
    let mut attempts = 0;
    while attempts < max_attempts {
        let [i, j, k] = sampler.sample(rng);
        attempts += SAMPLE_SIZE;

        let (p1, p2, p3) = (points[i], points[j], points[k]);
        if Vec3::is_collinear(p1, p2, p3) {
            continue;
        }
        match Plane::from_points(p1, p2, p3).try_normalize() {
            Some(plane) => return Some(plane),
            None => debug!(sample = ?[i, j, k], "Rejected sample with non-finite normal"),
        }
    }
    None
}

fn collect_inliers(points: &[Vec3], plane: &Plane, threshold: f64) -> Vec<usize> {
    points
        .iter()
        .enumerate()
        .filter(|(_, p)| plane.is_inlier(**p, threshold))
        .map(|(i, _)| i)
        .collect()
}
