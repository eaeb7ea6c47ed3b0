//! Fixed-resolution arc-length lookup.

use crate::{Curve, CurveError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Cumulative arc-length table over a curve, sampled at a fixed number of
/// uniform parameter steps.
///
/// The length is a polyline approximation: Euclidean distances between
/// consecutive evaluated positions are summed. Accuracy improves with the
/// sample count; there is no adaptive refinement. This bound is deliberate —
/// the table is rebuilt per frame alongside the mesh and must stay cheap.
///
/// The sample count is independent of any mesh ring count, so UV-length
/// accuracy is decoupled from triangulation density.
///
/// # Example
///
/// ```
/// use tube_curves::{ArcLengthTable, CubicBezier};
/// use nalgebra::Point3;
///
/// let curve = CubicBezier::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(2.0, 0.0, 0.0),
///     Point3::new(3.0, 0.0, 0.0),
/// );
///
/// let table = ArcLengthTable::from_curve(&curve, 64);
/// assert!((table.total_length() - 3.0).abs() < 1e-9);
/// assert!((table.distance_at(0.5) - 1.5).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ArcLengthTable {
    /// Cumulative distance at each uniform parameter step.
    cumulative: Vec<f64>,
}

impl ArcLengthTable {
    /// Build a table from `samples` uniform parameter steps.
    ///
    /// `samples` is clamped to at least 2.
    #[must_use]
    pub fn from_curve<C: Curve + ?Sized>(curve: &C, samples: usize) -> Self {
        let samples = samples.max(2);
        let mut cumulative = Vec::with_capacity(samples);
        let mut total = 0.0;

        let mut prev = curve.point_at(0.0);
        cumulative.push(0.0);
        for i in 1..samples {
            let t = i as f64 / (samples - 1) as f64;
            let p = curve.point_at(t);
            total += (p - prev).norm();
            cumulative.push(total);
            prev = p;
        }

        Self { cumulative }
    }

    /// Build a table, rejecting an under-resolved sample count.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InsufficientSamples`] if `samples < 2`.
    pub fn try_from_curve<C: Curve + ?Sized>(curve: &C, samples: usize) -> Result<Self> {
        if samples < 2 {
            return Err(CurveError::insufficient_samples(2, samples));
        }
        Ok(Self::from_curve(curve, samples))
    }

    /// Number of samples in the table.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.cumulative.len()
    }

    /// Total approximated arc length of the curve.
    #[must_use]
    pub fn total_length(&self) -> f64 {
        *self.cumulative.last().unwrap_or(&0.0)
    }

    /// Cumulative distance from the start of the curve to parameter `t`.
    ///
    /// Partial sums follow the same step size as [`Self::total_length`],
    /// interpolating linearly within the final partial step. Monotone
    /// nondecreasing in `t`; `distance_at(0) == 0` and
    /// `distance_at(1) == total_length()` exactly.
    #[must_use]
    pub fn distance_at(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        let last = self.cumulative.len() - 1;
        let scaled = t * last as f64;
        let index = (scaled.floor() as usize).min(last);

        if index == last {
            return self.total_length();
        }

        let frac = scaled - index as f64;
        let lo = self.cumulative[index];
        let hi = self.cumulative[index + 1];
        lo + (hi - lo) * frac
    }
}
