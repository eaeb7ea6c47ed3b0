//! Cubic Bézier curve segment.

use crate::handles::{solve_handles, DEGENERATE_EPSILON};
use crate::{Curve, CurveError, Result};
use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A cubic Bézier curve defined by 4 control points.
///
/// The curve passes through `p0` and `p3`, and is tangent to `p0p1` at the
/// start and `p2p3` at the end.
///
/// # Equation
///
/// ```text
/// B(t) = (1-t)³P₀ + 3(1-t)²tP₁ + 3(1-t)t²P₂ + t³P₃
/// ```
///
/// # Example
///
/// ```
/// use tube_curves::{Curve, CubicBezier};
/// use nalgebra::Point3;
///
/// let curve = CubicBezier::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 2.0, 0.0),
///     Point3::new(3.0, 2.0, 0.0),
///     Point3::new(4.0, 0.0, 0.0),
/// );
///
/// let start = curve.point_at(0.0);
/// assert!((start.x - 0.0).abs() < 1e-12);
///
/// let end = curve.point_at(1.0);
/// assert!((end.x - 4.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CubicBezier {
    /// Start point.
    pub p0: Point3<f64>,
    /// First handle (affects start tangent).
    pub p1: Point3<f64>,
    /// Second handle (affects end tangent).
    pub p2: Point3<f64>,
    /// End point.
    pub p3: Point3<f64>,
}

impl CubicBezier {
    /// Create a new cubic Bézier curve from explicit control points.
    #[must_use]
    pub const fn new(p0: Point3<f64>, p1: Point3<f64>, p2: Point3<f64>, p3: Point3<f64>) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Create a curve between `a` and `b` whose handles are solved from a
    /// reference point and two shape sliders.
    ///
    /// See [`solve_handles`] for the handle placement rules. The sliders are
    /// expected in `[0, 1]`; the caller clamps them before use.
    #[must_use]
    pub fn from_reference(
        a: Point3<f64>,
        b: Point3<f64>,
        reference: Point3<f64>,
        handle_length: f64,
        curvature: f64,
    ) -> Self {
        let (p1, p2) = solve_handles(a, b, reference, handle_length, curvature);
        Self::new(a, p1, p2, b)
    }

    /// Like [`Self::from_reference`], but rejects coincident endpoints.
    ///
    /// Hosts that prefer to detect a pathological scene configuration up
    /// front (rather than receive a placeholder mesh later) use this variant.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::Degenerate`] if `|b - a| < 1e-6`.
    pub fn try_from_reference(
        a: Point3<f64>,
        b: Point3<f64>,
        reference: Point3<f64>,
        handle_length: f64,
        curvature: f64,
    ) -> Result<Self> {
        if (b - a).norm() < DEGENERATE_EPSILON {
            return Err(CurveError::degenerate("coincident endpoints"));
        }
        Ok(Self::from_reference(a, b, reference, handle_length, curvature))
    }

    /// Get the control points as an array.
    #[must_use]
    pub fn control_points(&self) -> [Point3<f64>; 4] {
        [self.p0, self.p1, self.p2, self.p3]
    }

    /// Straight-line distance between the endpoints.
    #[must_use]
    pub fn chord_length(&self) -> f64 {
        (self.p3 - self.p0).norm()
    }

    /// Whether the endpoints coincide within tolerance.
    ///
    /// A degenerate segment evaluates to its start point everywhere; mesh
    /// consumers substitute a placeholder instead of sweeping it.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.chord_length() < DEGENERATE_EPSILON
    }

    /// Compute the second derivative at parameter `t`.
    ///
    /// Used as the tangent fallback when the first derivative vanishes.
    #[must_use]
    pub fn second_derivative_at(&self, t: f64) -> Vector3<f64> {
        let t = t.clamp(0.0, 1.0);
        let s = 1.0 - t;

        // B''(t) = 6(1-t)(P₂ - 2P₁ + P₀) + 6t(P₃ - 2P₂ + P₁)
        let a = self.p2.coords - self.p1.coords * 2.0 + self.p0.coords;
        let b = self.p3.coords - self.p2.coords * 2.0 + self.p1.coords;

        a * (6.0 * s) + b * (6.0 * t)
    }
}

impl Curve for CubicBezier {
    fn point_at(&self, t: f64) -> Point3<f64> {
        let t = t.clamp(0.0, 1.0);
        let s = 1.0 - t;
        let s2 = s * s;
        let t2 = t * t;

        Point3::from(
            self.p0.coords * (s2 * s)
                + self.p1.coords * (3.0 * s2 * t)
                + self.p2.coords * (3.0 * s * t2)
                + self.p3.coords * (t2 * t),
        )
    }

    fn tangent_at(&self, t: f64) -> Vector3<f64> {
        let d = self.derivative_at(t);
        if d.norm_squared() > 1e-12 {
            d.normalize()
        } else {
            // Control points coincide locally: fall back to the second
            // derivative direction, then the canonical +X axis.
            let d2 = self.second_derivative_at(t);
            if d2.norm_squared() > 1e-12 {
                d2.normalize()
            } else {
                Vector3::x()
            }
        }
    }

    fn derivative_at(&self, t: f64) -> Vector3<f64> {
        let t = t.clamp(0.0, 1.0);
        let s = 1.0 - t;

        // B'(t) = 3(1-t)²(P₁-P₀) + 6(1-t)t(P₂-P₁) + 3t²(P₃-P₂)
        (self.p1 - self.p0) * (3.0 * s * s)
            + (self.p2 - self.p1) * (6.0 * s * t)
            + (self.p3 - self.p2) * (3.0 * t * t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_curve() -> CubicBezier {
        CubicBezier::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 2.0, 0.0),
            Point3::new(3.0, 2.0, 0.0),
            Point3::new(4.0, 0.0, 0.0),
        )
    }

    #[test]
    fn endpoint_interpolation_is_exact() {
        let curve = sample_curve();
        assert_relative_eq!(curve.point_at(0.0).coords, curve.p0.coords, epsilon = 1e-15);
        assert_relative_eq!(curve.point_at(1.0).coords, curve.p3.coords, epsilon = 1e-15);
    }

    #[test]
    fn tangent_points_toward_handles() {
        let curve = sample_curve();

        let tan_start = curve.tangent_at(0.0);
        let expected = (curve.p1 - curve.p0).normalize();
        assert_relative_eq!(tan_start, expected, epsilon = 1e-12);

        let tan_end = curve.tangent_at(1.0);
        let expected = (curve.p3 - curve.p2).normalize();
        assert_relative_eq!(tan_end, expected, epsilon = 1e-12);
    }

    #[test]
    fn parameter_is_clamped() {
        let curve = sample_curve();
        assert_relative_eq!(
            curve.point_at(-1.0).coords,
            curve.point_at(0.0).coords,
            epsilon = 1e-15
        );
        assert_relative_eq!(
            curve.point_at(2.0).coords,
            curve.point_at(1.0).coords,
            epsilon = 1e-15
        );
    }

    #[test]
    fn zero_curvature_stays_on_chord() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(2.0, 0.0, 0.0);
        let curve = CubicBezier::from_reference(a, b, Point3::new(1.0, 1.0, 0.0), 0.5, 0.0);

        for i in 0..=20 {
            let t = f64::from(i) / 20.0;
            let p = curve.point_at(t);
            // Collinear with the chord A→B
            let offset = (p - a) - (b - a) * ((p - a).dot(&(b - a)) / (b - a).norm_squared());
            assert!(offset.norm() < 1e-10);
        }
    }

    #[test]
    fn midpoint_bows_toward_reference() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(2.0, 0.0, 0.0);
        let reference = Point3::new(1.0, 1.0, 0.0);

        let curve = CubicBezier::from_reference(a, b, reference, 0.5, 0.5);
        assert!(curve.point_at(0.5).y > 0.0);
    }

    #[test]
    fn midpoint_height_monotone_in_curvature() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(2.0, 0.0, 0.0);
        let reference = Point3::new(1.0, 1.0, 0.0);

        let mut prev = -f64::INFINITY;
        for i in 0..=10 {
            let curvature = f64::from(i) / 10.0;
            let curve = CubicBezier::from_reference(a, b, reference, 0.5, curvature);
            let y = curve.point_at(0.5).y;
            assert!(y >= prev);
            prev = y;
        }
    }

    #[test]
    fn degenerate_curve_has_defined_tangent() {
        let p = Point3::new(1.0, 2.0, 3.0);
        let curve = CubicBezier::new(p, p, p, p);

        assert!(curve.is_degenerate());
        let tangent = curve.tangent_at(0.5);
        assert_relative_eq!(tangent.norm(), 1.0, epsilon = 1e-12);
        assert!(tangent.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn try_from_reference_rejects_coincident_endpoints() {
        let p = Point3::new(1.0, 2.0, 3.0);
        let result = CubicBezier::try_from_reference(p, p, Point3::origin(), 0.5, 0.5);
        assert!(matches!(result, Err(crate::CurveError::Degenerate { .. })));
    }

    #[test]
    fn handle_collapse_reduces_to_chord() {
        // handle_length = 0 puts both handles on the endpoints
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(3.0, 0.0, 0.0);
        let curve = CubicBezier::from_reference(a, b, Point3::new(1.0, 5.0, 0.0), 0.0, 0.0);

        assert_relative_eq!(curve.p1.coords, a.coords, epsilon = 1e-12);
        assert_relative_eq!(curve.p2.coords, b.coords, epsilon = 1e-12);
    }
}
