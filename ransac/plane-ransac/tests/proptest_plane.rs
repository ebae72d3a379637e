//! Property-based tests for plane construction and estimation.
//!
//! These tests use proptest to generate random point triples and planar
//! clouds and verify the geometric invariants.
//!
//! Run with: cargo test -p plane-ransac -- proptest

#![allow(clippy::unwrap_used)]

use plane_ransac::{Plane, RansacConfig, Vec3, estimate};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

/// Generate a point in a bounded cube.
fn arb_point() -> impl Strategy<Value = Vec3> {
    prop::array::uniform3(-100.0..100.0f32).prop_map(Vec3::from)
}

/// Generate three points that span a well-conditioned triangle.
fn arb_triangle() -> impl Strategy<Value = (Vec3, Vec3, Vec3)> {
    (arb_point(), arb_point(), arb_point()).prop_filter("degenerate triangle", |(p1, p2, p3)| {
        let e1 = *p2 - *p1;
        let e2 = *p3 - *p1;
        // Area relative to edge lengths keeps the normal well defined in f32
        e1.cross(e2).length() > 0.05 * e1.length() * e2.length() && e1.length() > 1.0
    })
}

/// Generate a unit normal, an offset, and random points on that plane.
fn arb_planar_cloud() -> impl Strategy<Value = (Vec3, f32, Vec<Vec3>)> {
    (
        prop::array::uniform3(-1.0..1.0f32),
        -10.0..10.0f32,
        prop::collection::vec((-20.0..20.0f32, -20.0..20.0f32), 8..40),
    )
        .prop_filter_map("normal too short", |(n, offset, uv)| {
            let raw = Vec3::from(n);
            if raw.length() < 0.1 {
                return None;
            }
            let normal = raw.normalize();
            // Two in-plane directions
            let helper = if normal.x().abs() < 0.9 {
                Vec3::new(1.0, 0.0, 0.0)
            } else {
                Vec3::new(0.0, 1.0, 0.0)
            };
            let u = normal.cross(helper).normalize();
            let v = normal.cross(u);
            let origin = normal * -offset;
            let points = uv.into_iter().map(|(s, t)| origin + u * s + v * t).collect();
            Some((normal, offset, points))
        })
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn proptest_plane_through_its_points((p1, p2, p3) in arb_triangle()) {
        let plane = Plane::from_points(p1, p2, p3).normalize();

        prop_assert!(plane.is_normalized(1e-5));
        // f32 rounding in the offset scales with the coordinate magnitude,
        // so the bound is 1e-4 at the origin and grows with |p|.
        for p in [p1, p2, p3] {
            prop_assert!(plane.distance_to_point(p) < 1e-4 * (1.0 + f64::from(p.length())));
        }
    }

    #[test]
    fn proptest_distance_is_non_negative(
        (p1, p2, p3) in arb_triangle(),
        q in arb_point(),
    ) {
        let plane = Plane::from_points(p1, p2, p3).normalize();
        prop_assert!(plane.distance_to_point(q) >= 0.0);
    }

    #[test]
    fn proptest_collinear_points_detected(
        p in arb_point(),
        d in prop::array::uniform3(-1.0..1.0f32),
        t in 0.5..3.0f32,
    ) {
        let dir = Vec3::from(d);
        prop_assert!(Vec3::is_collinear(p, p + dir * 1e-3, p + dir * (2e-3 * t)));
    }

    #[test]
    fn proptest_planar_cloud_reaches_consensus(
        (normal, offset, points) in arb_planar_cloud(),
        seed in any::<u64>(),
    ) {
        let config = RansacConfig::new()
            .with_threshold(0.01)
            .with_inlier_ratio(0.9)
            .with_seed(seed);

        let result = estimate(&points, &config);
        prop_assert!(result.is_ok(), "planar cloud without consensus: {:?}", result);
        let model = result.unwrap();

        prop_assert!(model.inlier_count() >= config.min_inliers(points.len()));
        prop_assert!(model.plane().is_normalized(1e-4));

        let alignment = model.plane().normal().dot(normal);
        prop_assert!(alignment.abs() > 0.99);
        let sign = alignment.signum();
        prop_assert!((sign * model.d() - offset).abs() < 0.05);
    }
}
