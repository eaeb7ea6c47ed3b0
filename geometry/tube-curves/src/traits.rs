//! Core curve trait.

use nalgebra::{Point3, Vector3};

/// A parametric curve in 3D space.
///
/// Curves are parameterized over `t ∈ [0, 1]`, where `t=0` is the start and
/// `t=1` is the end. Implementations clamp out-of-range parameters rather
/// than panicking, so every query on a constructed curve succeeds.
pub trait Curve {
    /// Evaluate the curve position at parameter `t ∈ [0, 1]`.
    fn point_at(&self, t: f64) -> Point3<f64>;

    /// Compute the unit tangent vector at parameter `t`.
    ///
    /// The tangent points in the direction of increasing `t`. Where the raw
    /// derivative degenerates to zero, implementations return a documented
    /// fallback direction instead of NaN.
    fn tangent_at(&self, t: f64) -> Vector3<f64>;

    /// Compute the first derivative (velocity) at parameter `t`.
    ///
    /// Unlike [`Self::tangent_at`], this returns the non-normalized
    /// derivative, which encodes both direction and speed.
    fn derivative_at(&self, t: f64) -> Vector3<f64>;

    /// Get the start point of the curve (`t=0`).
    fn start(&self) -> Point3<f64> {
        self.point_at(0.0)
    }

    /// Get the end point of the curve (`t=1`).
    fn end(&self) -> Point3<f64> {
        self.point_at(1.0)
    }

    /// Sample positions at `n` uniform parameter values, inclusive of both
    /// ends. `n` is clamped to at least 2.
    fn sample_uniform(&self, n: usize) -> Vec<Point3<f64>> {
        let n = n.max(2);
        (0..n)
            .map(|i| self.point_at(i as f64 / (n - 1) as f64))
            .collect()
    }

    /// Sample unit tangents at `n` uniform parameter values, inclusive of
    /// both ends. `n` is clamped to at least 2.
    fn sample_tangents(&self, n: usize) -> Vec<Vector3<f64>> {
        let n = n.max(2);
        (0..n)
            .map(|i| self.tangent_at(i as f64 / (n - 1) as f64))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    struct LineSegment {
        start: Point3<f64>,
        end: Point3<f64>,
    }

    impl Curve for LineSegment {
        fn point_at(&self, t: f64) -> Point3<f64> {
            self.start + (self.end - self.start) * t.clamp(0.0, 1.0)
        }

        fn tangent_at(&self, _t: f64) -> Vector3<f64> {
            (self.end - self.start).normalize()
        }

        fn derivative_at(&self, _t: f64) -> Vector3<f64> {
            self.end - self.start
        }
    }

    #[test]
    fn endpoints_via_provided_methods() {
        let line = LineSegment {
            start: Point3::new(1.0, 2.0, 3.0),
            end: Point3::new(4.0, 5.0, 6.0),
        };

        assert_relative_eq!(line.start().coords, line.point_at(0.0).coords);
        assert_relative_eq!(line.end().coords, line.point_at(1.0).coords);
    }

    #[test]
    fn uniform_sampling() {
        let line = LineSegment {
            start: Point3::origin(),
            end: Point3::new(10.0, 0.0, 0.0),
        };

        let samples = line.sample_uniform(11);
        assert_eq!(samples.len(), 11);
        assert_relative_eq!(samples[0].x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(samples[5].x, 5.0, epsilon = 1e-12);
        assert_relative_eq!(samples[10].x, 10.0, epsilon = 1e-12);
    }

    #[test]
    fn sample_count_clamps_to_two() {
        let line = LineSegment {
            start: Point3::origin(),
            end: Point3::new(1.0, 0.0, 0.0),
        };

        assert_eq!(line.sample_uniform(0).len(), 2);
        assert_eq!(line.sample_tangents(1).len(), 2);
    }
}
