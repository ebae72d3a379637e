//! The fitted plane together with its consensus set.

use std::fmt;

use crate::plane::Plane;
use crate::vector::Vec3;

/// Result of a successful RANSAC estimation.
///
/// A model owns copies of the inlier indices and of the whole input point
/// sequence, so it never borrows from or aliases the caller's data.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    plane: Plane,
    inliers: Vec<usize>,
    points: Vec<Vec3>,
}

impl Model {
    /// Create a model, copying `inliers` and `points`.
    ///
    /// Inlier indices are stored ascending and deduplicated. Indices outside
    /// `points` are dropped.
    #[must_use]
    pub fn new(plane: Plane, inliers: &[usize], points: &[Vec3]) -> Self {
        let mut inliers: Vec<usize> = inliers
            .iter()
            .copied()
            .filter(|&i| i < points.len())
            .collect();
        inliers.sort_unstable();
        inliers.dedup();
        Self {
            plane,
            inliers,
            points: points.to_vec(),
        }
    }

    /// The fitted plane.
    #[must_use]
    pub const fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Plane coefficient `a`.
    #[must_use]
    pub fn a(&self) -> f32 {
        self.plane.a()
    }

    /// Plane coefficient `b`.
    #[must_use]
    pub fn b(&self) -> f32 {
        self.plane.b()
    }

    /// Plane coefficient `c`.
    #[must_use]
    pub fn c(&self) -> f32 {
        self.plane.c()
    }

    /// Plane offset `d`.
    #[must_use]
    pub const fn d(&self) -> f32 {
        self.plane.offset()
    }

    /// Indices of the inliers into [`Model::points`], ascending.
    #[must_use]
    pub fn inlier_indices(&self) -> &[usize] {
        &self.inliers
    }

    /// Iterate over the inlier coordinates in index order.
    pub fn inliers(&self) -> impl ExactSizeIterator<Item = Vec3> + '_ {
        self.inliers.iter().map(|&i| self.points[i])
    }

    /// The inlier coordinates collected into a vector.
    #[must_use]
    pub fn inlier_points(&self) -> Vec<Vec3> {
        self.inliers().collect()
    }

    /// The model's copy of the input points.
    #[must_use]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Number of inliers.
    #[must_use]
    pub fn inlier_count(&self) -> usize {
        self.inliers.len()
    }

    /// Fraction of the input points that are inliers.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    // Precision loss: point counts beyond 2^52 are unsupported
    pub fn inlier_ratio(&self) -> f64 {
        if self.points.is_empty() {
            return 0.0;
        }
        self.inliers.len() as f64 / self.points.len() as f64
    }

    /// `A\tB\tC\tD`, each with six fractional digits.
    ///
    /// # Example
    ///
    /// ```
    /// use plane_ransac::{Model, Plane};
    ///
    /// let model = Model::new(Plane::from_coefficients(0.0, 0.0, 1.0, -2.5), &[], &[]);
    /// assert_eq!(model.to_canonical_string(), "0.000000\t0.000000\t1.000000\t-2.500000");
    /// ```
    #[must_use]
    pub fn to_canonical_string(&self) -> String {
        format!(
            "{:.6}\t{:.6}\t{:.6}\t{:.6}",
            f64::from(self.a()),
            f64::from(self.b()),
            f64::from(self.c()),
            f64::from(self.d())
        )
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_canonical_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_points() -> Vec<Vec3> {
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 9.0),
        ]
    }

    #[test]
    fn inliers_follow_index_order() {
        let points = sample_points();
        let model = Model::new(Plane::from_coefficients(0.0, 0.0, 1.0, 0.0), &[0, 2], &points);

        assert_eq!(model.inlier_indices(), &[0, 2]);
        assert_eq!(
            model.inlier_points(),
            vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)]
        );
        assert_eq!(model.inliers().len(), 2);
        assert_eq!(model.inlier_count(), 2);
        assert_relative_eq!(model.inlier_ratio(), 0.5);
    }

    #[test]
    fn out_of_range_indices_are_dropped() {
        let points = sample_points();
        let model = Model::new(
            Plane::from_coefficients(0.0, 0.0, 1.0, 0.0),
            &[7, 2, 0, 2, 4],
            &points,
        );

        assert_eq!(model.inlier_indices(), &[0, 2]);
        assert_eq!(
            model.inlier_points(),
            vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)]
        );
        assert_relative_eq!(model.inlier_ratio(), 0.5);
    }

    #[test]
    fn owns_copies_of_inputs() {
        let mut points = sample_points();
        let mut inliers = vec![0, 1, 2];
        let model = Model::new(Plane::from_coefficients(0.0, 0.0, 1.0, 0.0), &inliers, &points);

        points[0] = Vec3::new(7.0, 7.0, 7.0);
        inliers.clear();

        assert_eq!(model.points()[0], Vec3::zeros());
        assert_eq!(model.inlier_count(), 3);
    }

    #[test]
    fn coefficient_accessors() {
        let model = Model::new(Plane::from_coefficients(0.1, 0.2, 0.3, 0.4), &[], &[]);
        assert_relative_eq!(model.a(), 0.1);
        assert_relative_eq!(model.b(), 0.2);
        assert_relative_eq!(model.c(), 0.3);
        assert_relative_eq!(model.d(), 0.4);
        assert_relative_eq!(model.inlier_ratio(), 0.0);
    }

    #[test]
    fn canonical_string_rounds_to_six_digits() {
        let model = Model::new(
            Plane::from_coefficients(0.577_350_3, -0.577_350_3, 0.577_350_3, -1.0),
            &[],
            &[],
        );
        assert_eq!(
            model.to_canonical_string(),
            "0.577350\t-0.577350\t0.577350\t-1.000000"
        );
        assert_eq!(model.to_string(), model.to_canonical_string());
    }
}
