//! Single-precision 3D vector used for point coordinates and plane normals.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default tolerance for [`Vec3::collinear`].
pub const COLLINEAR_EPSILON: f32 = 1e-6;

/// An immutable 3D vector with `f32` components.
///
/// `Vec3` is a plain value: arithmetic always yields a new vector and there
/// are no in-place operators. Equality is exact, component by component.
///
/// # Example
///
/// ```
/// use plane_ransac::Vec3;
///
/// let a = Vec3::new(1.0, 0.0, 0.0);
/// let b = Vec3::new(0.0, 1.0, 0.0);
///
/// assert_eq!(a.cross(b), Vec3::new(0.0, 0.0, 1.0));
/// assert!((a + b).length() > 1.41);
/// ```
#[derive(Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Vec3(Vector3<f32>);

impl Vec3 {
    /// Create a vector from its components.
    #[inline]
    #[must_use]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self(Vector3::new(x, y, z))
    }

    /// The zero vector.
    #[inline]
    #[must_use]
    pub fn zeros() -> Self {
        Self(Vector3::zeros())
    }

    /// A vector with every component set to `value`.
    #[inline]
    #[must_use]
    pub fn splat(value: f32) -> Self {
        Self::new(value, value, value)
    }

    /// X component.
    #[inline]
    #[must_use]
    pub fn x(&self) -> f32 {
        self.0.x
    }

    /// Y component.
    #[inline]
    #[must_use]
    pub fn y(&self) -> f32 {
        self.0.y
    }

    /// Z component.
    #[inline]
    #[must_use]
    pub fn z(&self) -> f32 {
        self.0.z
    }

    /// Borrow the underlying nalgebra vector.
    #[inline]
    #[must_use]
    pub const fn as_vector(&self) -> &Vector3<f32> {
        &self.0
    }

    /// Components widened to `f64`, for accumulation in double precision.
    #[inline]
    #[must_use]
    pub fn to_f64(self) -> Vector3<f64> {
        self.0.cast::<f64>()
    }

    /// Component-wise product.
    #[inline]
    #[must_use]
    pub fn component_mul(self, other: Self) -> Self {
        Self(self.0.component_mul(&other.0))
    }

    /// Component-wise quotient.
    #[inline]
    #[must_use]
    pub fn component_div(self, other: Self) -> Self {
        Self(self.0.component_div(&other.0))
    }

    /// Dot product.
    #[inline]
    #[must_use]
    pub fn dot(self, other: Self) -> f32 {
        self.0.dot(&other.0)
    }

    /// Cross product `self × other`.
    #[inline]
    #[must_use]
    pub fn cross(self, other: Self) -> Self {
        Self(self.0.cross(&other.0))
    }

    /// Euclidean length.
    #[inline]
    #[must_use]
    pub fn length(self) -> f32 {
        self.0.norm()
    }

    /// Squared Euclidean length.
    #[inline]
    #[must_use]
    pub fn length_squared(self) -> f32 {
        self.0.norm_squared()
    }

    /// Divide by the length.
    ///
    /// The zero vector yields NaN components; use [`Vec3::try_normalize`]
    /// when the input may be degenerate.
    #[inline]
    #[must_use]
    pub fn normalize(self) -> Self {
        self / self.length()
    }

    /// Divide by the length, or `None` if the length is zero or not finite.
    #[must_use]
    pub fn try_normalize(self) -> Option<Self> {
        let len = self.length();
        if len > 0.0 && len.is_finite() {
            Some(self / len)
        } else {
            None
        }
    }

    /// Euclidean distance to another point.
    #[inline]
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        (self - other).length()
    }

    /// Squared Euclidean distance to another point.
    #[inline]
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f32 {
        (self - other).length_squared()
    }

    /// Component-wise minimum.
    #[inline]
    #[must_use]
    pub fn min(self, other: Self) -> Self {
        Self(self.0.inf(&other.0))
    }

    /// Component-wise maximum.
    #[inline]
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        Self(self.0.sup(&other.0))
    }

    /// Component-wise absolute value.
    #[inline]
    #[must_use]
    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Clamp every component into `[min, max]` component-wise.
    #[inline]
    #[must_use]
    pub fn clamp(self, min: Self, max: Self) -> Self {
        self.max(min).min(max)
    }

    /// Linear interpolation: `self` at `t = 0`, `other` at `t = 1`.
    #[inline]
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self(self.0.lerp(&other.0, t))
    }

    /// Whether any component is NaN or infinite.
    #[inline]
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.0.iter().all(|c| c.is_finite())
    }

    /// Collinearity test for three points.
    ///
    /// Computes `(p2 - p1) × (p3 - p1)` and reports the points collinear when
    /// the squared length of that cross product is below `eps`.
    ///
    /// The test is not scale-invariant. The squared cross product grows with
    /// the fourth power of the coordinate scale, so the same triangle can be
    /// "collinear" in metres and non-collinear in millimetres. The raw
    /// threshold is kept for compatibility with existing data sets.
    ///
    /// # Example
    ///
    /// ```
    /// use plane_ransac::{Vec3, COLLINEAR_EPSILON};
    ///
    /// let p1 = Vec3::new(0.0, 0.0, 0.0);
    /// let p2 = Vec3::new(1.0, 1.0, 1.0);
    /// let p3 = Vec3::new(2.0, 2.0, 2.0);
    /// assert!(Vec3::collinear(p1, p2, p3, COLLINEAR_EPSILON));
    /// ```
    #[must_use]
    pub fn collinear(p1: Self, p2: Self, p3: Self, eps: f32) -> bool {
        (p2 - p1).cross(p3 - p1).length_squared() < eps
    }

    /// [`Vec3::collinear`] with [`COLLINEAR_EPSILON`].
    #[inline]
    #[must_use]
    pub fn is_collinear(p1: Self, p2: Self, p3: Self) -> bool {
        Self::collinear(p1, p2, p3, COLLINEAR_EPSILON)
    }
}

impl fmt::Debug for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vec3({}, {}, {})", self.x(), self.y(), self.z())
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x(), self.y(), self.z())
    }
}

impl From<Vector3<f32>> for Vec3 {
    fn from(v: Vector3<f32>) -> Self {
        Self(v)
    }
}

impl From<Vec3> for Vector3<f32> {
    fn from(v: Vec3) -> Self {
        v.0
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Vec3> for [f32; 3] {
    fn from(v: Vec3) -> Self {
        [v.x(), v.y(), v.z()]
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self(self.0 * rhs)
    }
}

impl Mul<Vec3> for f32 {
    type Output = Vec3;

    fn mul(self, rhs: Vec3) -> Vec3 {
        rhs * self
    }
}

impl Div<f32> for Vec3 {
    type Output = Self;

    fn div(self, rhs: f32) -> Self {
        Self(self.0 / rhs)
    }
}

impl Neg for Vec3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}
