//! Robust plane fitting for 3D point clouds.
//!
//! This crate fits an infinite plane `a·x + b·y + c·z + d = 0` to a point
//! cloud that may contain outliers, using RANSAC (Random Sample Consensus):
//!
//! - [`Vec3`] - Immutable single-precision point/vector type
//! - [`Plane`] - Implicit-form plane built from three points
//! - [`IndexSampler`] - Random minimal-sample drawing
//! - [`RansacEstimator`] - The adaptive RANSAC loop
//! - [`Model`] - The winning plane and its inliers
//!
//! # Algorithm
//!
//! Every trial draws three distinct points, rejects collinear triples, and
//! counts how many points lie within the threshold of the plane they define.
//! A hypothesis that explains at least `round(inlier_ratio × n)` points is
//! accepted and the trial budget is shrunk to
//! `ln(1 - p) / ln(1 - w^m)`, where `w` is the observed inlier fraction.
//!
//! The configured threshold is used both as the inlier distance and as the
//! confidence `p`; see [`RansacConfig`].
//!
//! # Layer 0
//!
//! This is a Layer 0 crate with no I/O. Reading point files and writing
//! models lives in `plane-ransac-io`.
//!
//! # Example
//!
//! ```
//! use plane_ransac::{estimate, RansacConfig, Vec3};
//!
//! let points = vec![
//!     Vec3::new(20.0, -10.0, 0.2),
//!     Vec3::new(20.0, 0.0, 0.2),
//!     Vec3::new(15.0, -10.0, 0.15),
//!     Vec3::new(15.0, 10.0, 0.15),
//!     Vec3::new(10.0, -10.0, 0.1),
//!     Vec3::new(10.0, 10.0, 0.1),
//!     Vec3::new(20.0, 18.0, 1.7), // outlier
//! ];
//!
//! let config = RansacConfig::new().with_inlier_ratio(0.8).with_seed(42);
//! let model = estimate(&points, &config)?;
//! assert_eq!(model.inlier_indices(), &[0, 1, 2, 3, 4, 5]);
//! println!("{model}");
//! # Ok::<(), plane_ransac::RansacError>(())
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod config;
mod error;
mod estimator;
mod model;
mod plane;
mod sampler;
mod vector;

pub use config::RansacConfig;
pub use error::{RansacError, RansacResult};
pub use estimator::{
    RansacEstimator, Termination, adaptive_trial_count, estimate, estimate_with_rng,
};
pub use model::Model;
pub use plane::Plane;
pub use sampler::{IndexSampler, SAMPLE_SIZE};
pub use vector::{COLLINEAR_EPSILON, Vec3};
