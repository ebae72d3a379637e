//! Implicit-form plane used for RANSAC hypotheses.

use std::fmt;

use crate::vector::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A plane `a·x + b·y + c·z + d = 0` stored as a normal `(a, b, c)` and an
/// offset `d`.
///
/// Planes built with [`Plane::from_points`] are not normalized. Finish them
/// with [`Plane::normalize`] or [`Plane::try_normalize`], which return a new
/// plane whose normal has unit length and whose offset is scaled to match.
///
/// The sign of the normal follows the winding of the three defining points
/// and is not canonicalized, so two planes describing the same surface may
/// differ by a global sign.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Plane {
    normal: Vec3,
    offset: f32,
}

impl Plane {
    /// Create a plane from a normal and an offset. No normalization is applied.
    #[must_use]
    pub const fn new(normal: Vec3, offset: f32) -> Self {
        Self { normal, offset }
    }

    /// Create a plane from its four coefficients.
    #[must_use]
    pub fn from_coefficients(a: f32, b: f32, c: f32, d: f32) -> Self {
        Self::new(Vec3::new(a, b, c), d)
    }

    /// The placeholder `1x +1y +1z +0 = 0` reported before any hypothesis
    /// has been accepted.
    #[must_use]
    pub fn unset() -> Self {
        Self::from_coefficients(1.0, 1.0, 1.0, 0.0)
    }

    /// Create a plane through three points.
    ///
    /// The normal is `(p2 - p1) × (p3 - p1)` and the offset is
    /// `-(normal · p1)`. Collinear points give a zero normal.
    ///
    /// # Example
    ///
    /// ```
    /// use plane_ransac::{Plane, Vec3};
    ///
    /// let plane = Plane::from_points(
    ///     Vec3::new(0.0, 0.0, 2.0),
    ///     Vec3::new(1.0, 0.0, 2.0),
    ///     Vec3::new(0.0, 1.0, 2.0),
    /// )
    /// .normalize();
    ///
    /// assert!((plane.c() - 1.0).abs() < 1e-6);
    /// assert!((plane.offset() + 2.0).abs() < 1e-6);
    /// ```
    #[must_use]
    pub fn from_points(p1: Vec3, p2: Vec3, p3: Vec3) -> Self {
        let normal = (p2 - p1).cross(p3 - p1);
        let offset = -normal.dot(p1);
        Self::new(normal, offset)
    }

    /// Divide normal and offset by the length of the normal.
    ///
    /// A zero normal produces NaN coefficients.
    #[must_use]
    pub fn normalize(self) -> Self {
        let norm = self.normal.length();
        Self::new(self.normal / norm, self.offset / norm)
    }

    /// Like [`Plane::normalize`], but `None` when the result would not be a
    /// finite unit-normal plane.
    #[must_use]
    pub fn try_normalize(self) -> Option<Self> {
        let norm = self.normal.length();
        if !(norm > 0.0 && norm.is_finite()) {
            return None;
        }
        let plane = Self::new(self.normal / norm, self.offset / norm);
        (plane.normal.is_finite() && plane.offset.is_finite()).then_some(plane)
    }

    /// The normal `(a, b, c)`.
    #[inline]
    #[must_use]
    pub const fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Coefficient `a`.
    #[inline]
    #[must_use]
    pub fn a(&self) -> f32 {
        self.normal.x()
    }

    /// Coefficient `b`.
    #[inline]
    #[must_use]
    pub fn b(&self) -> f32 {
        self.normal.y()
    }

    /// Coefficient `c`.
    #[inline]
    #[must_use]
    pub fn c(&self) -> f32 {
        self.normal.z()
    }

    /// The offset `d`.
    #[inline]
    #[must_use]
    pub const fn offset(&self) -> f32 {
        self.offset
    }

    /// Signed distance `(n · p + d) / ‖n‖`, positive on the side the normal
    /// points to.
    #[must_use]
    pub fn signed_distance(&self, point: Vec3) -> f64 {
        let n = self.normal.to_f64();
        (n.dot(&point.to_f64()) + f64::from(self.offset)) / n.norm()
    }

    /// Absolute distance from `point` to the plane.
    ///
    /// Undefined (NaN or infinite) for a zero normal.
    #[must_use]
    pub fn distance_to_point(&self, point: Vec3) -> f64 {
        self.signed_distance(point).abs()
    }

    /// Whether `point` lies within `threshold` of the plane.
    #[inline]
    #[must_use]
    pub fn is_inlier(&self, point: Vec3, threshold: f64) -> bool {
        self.distance_to_point(point) <= threshold
    }

    /// Whether the normal has unit length within `tolerance`.
    #[must_use]
    pub fn is_normalized(&self, tolerance: f32) -> bool {
        (self.normal.length() - 1.0).abs() <= tolerance
    }

    /// Tolerance comparison: every coefficient differs by less than `eps`.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, eps: f32) -> bool {
        (self.offset - other.offset).abs() < eps
            && (self.a() - other.a()).abs() < eps
            && (self.b() - other.b()).abs() < eps
            && (self.c() - other.c()).abs() < eps
    }

    /// The equation as text, e.g. `+0.707106x +0y -0.707106z -1.5 = 0`.
    ///
    /// Each coefficient is truncated (not rounded) to 6 decimal places and
    /// non-negative values carry an explicit `+`.
    #[must_use]
    pub fn to_canonical_string(&self) -> String {
        format!(
            "{}x {}y {}z {} = 0",
            signed_truncated(self.a()),
            signed_truncated(self.b()),
            signed_truncated(self.c()),
            signed_truncated(self.offset)
        )
    }
}

impl Default for Plane {
    fn default() -> Self {
        Self::unset()
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_canonical_string())
    }
}

fn signed_truncated(value: f32) -> String {
    // `+ 0.0` folds negative zero into positive zero
    let truncated = (f64::from(value) * 1e6).trunc() / 1e6 + 0.0;
    if truncated >= 0.0 {
        format!("+{truncated}")
    } else {
        format!("{truncated}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn xy_plane() -> Plane {
        Plane::from_points(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn from_points_is_unnormalized() {
        let plane = Plane::from_points(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 3.0, 0.0),
        );
        assert_eq!(plane.normal(), Vec3::new(0.0, 0.0, 6.0));
        assert_relative_eq!(plane.offset(), 0.0);
        assert!(!plane.is_normalized(1e-6));
    }

    #[test]
    fn from_points_offset() {
        let plane = Plane::from_points(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::new(1.0, 0.0, 5.0),
            Vec3::new(0.0, 1.0, 5.0),
        );
        assert_eq!(plane.normal(), Vec3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(plane.offset(), -5.0);
    }

    #[test]
    fn normalize_scales_offset() {
        let plane = Plane::from_coefficients(0.0, 0.0, 4.0, -8.0).normalize();
        assert_relative_eq!(plane.c(), 1.0);
        assert_relative_eq!(plane.offset(), -2.0);
        assert!(plane.is_normalized(1e-6));
    }

    #[test]
    fn normalize_zero_normal() {
        let degenerate = Plane::from_points(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
        );
        assert!(degenerate.normalize().a().is_nan());
        assert!(degenerate.try_normalize().is_none());
    }

    #[test]
    fn distance_to_point() {
        let plane = xy_plane().normalize();
        assert_relative_eq!(plane.distance_to_point(Vec3::new(3.0, 4.0, 5.0)), 5.0);
        assert_relative_eq!(plane.distance_to_point(Vec3::new(3.0, 4.0, -2.0)), 2.0);
        assert_relative_eq!(plane.signed_distance(Vec3::new(0.0, 0.0, -2.0)), -2.0);
    }

    #[test]
    fn distance_does_not_need_normalization() {
        let raw = Plane::from_coefficients(0.0, 0.0, 10.0, -10.0);
        assert_relative_eq!(raw.distance_to_point(Vec3::new(7.0, 7.0, 4.0)), 3.0);
    }

    #[test]
    fn is_inlier_inclusive() {
        let plane = xy_plane().normalize();
        assert!(plane.is_inlier(Vec3::new(0.0, 0.0, 0.5), 0.5));
        assert!(!plane.is_inlier(Vec3::new(0.0, 0.0, 0.6), 0.5));
    }

    #[test]
    fn exact_and_tolerance_equality() {
        let a = Plane::from_coefficients(0.0, 0.0, 1.0, 0.5);
        let b = Plane::from_coefficients(0.0, 0.0, 1.0, 0.5);
        let c = Plane::from_coefficients(0.0, 0.0, 1.0, 0.500_01);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.approx_eq(&c, 1e-3));
        assert!(!a.approx_eq(&c, 1e-6));
    }

    #[test]
    fn canonical_string_signs() {
        let plane = Plane::from_coefficients(0.5, -0.25, 0.0, -3.0);
        assert_eq!(plane.to_canonical_string(), "+0.5x -0.25y +0z -3 = 0");
        assert_eq!(plane.to_string(), plane.to_canonical_string());
    }

    #[test]
    fn canonical_string_truncates() {
        let plane = Plane::from_coefficients(0.123_456_9, -0.987_654_9, 1.0, -0.000_000_4);
        assert_eq!(
            plane.to_canonical_string(),
            "+0.123456x -0.987654y +1z +0 = 0"
        );
    }

    #[test]
    fn unset_plane() {
        assert_eq!(Plane::default(), Plane::unset());
        assert_eq!(Plane::unset().to_canonical_string(), "+1x +1y +1z +0 = 0");
    }
}
