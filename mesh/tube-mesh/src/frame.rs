//! Rotation-minimizing frame propagation.
//!
//! Naive per-ring orientation (re-deriving normal and binormal from a fixed
//! world up at every sample) twists visibly and degenerates entirely where
//! the tangent aligns with up. Instead, the frame is seeded once and carried
//! forward by the rotation between consecutive tangents, which minimizes
//! accumulated twist along the curve.

use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Near-parallel threshold for the seed's up reference.
const SEED_PARALLEL_LIMIT: f64 = 0.9;

/// A coordinate frame at one ring of the tube.
///
/// The three vectors are mutually orthonormal:
/// - `tangent`: Forward along the curve
/// - `normal`: Perpendicular to tangent (the ring's `cos θ` axis)
/// - `binormal`: `tangent × normal` (the ring's `sin θ` axis)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Frame {
    /// Unit tangent vector (forward direction).
    pub tangent: Vector3<f64>,
    /// Unit normal vector (perpendicular to tangent).
    pub normal: Vector3<f64>,
    /// Unit binormal vector (`tangent × normal`).
    pub binormal: Vector3<f64>,
}

impl Frame {
    /// Create a frame from components assumed orthonormal.
    #[must_use]
    pub const fn new(tangent: Vector3<f64>, normal: Vector3<f64>, binormal: Vector3<f64>) -> Self {
        Self {
            tangent,
            normal,
            binormal,
        }
    }

    /// Seed a frame from a tangent alone.
    ///
    /// The normal is the global up axis (`+Z`) Gram-Schmidt-orthogonalized
    /// against the tangent; where the tangent is near-parallel to up
    /// (`|dot| > 0.9`), the global right axis (`+X`) is used instead.
    #[must_use]
    pub fn seeded(tangent: Vector3<f64>) -> Self {
        let tangent = tangent.try_normalize(f64::EPSILON).unwrap_or(Vector3::x());

        let reference = if tangent.dot(&Vector3::z()).abs() > SEED_PARALLEL_LIMIT {
            Vector3::x()
        } else {
            Vector3::z()
        };

        let normal = (reference - tangent * reference.dot(&tangent)).normalize();
        let binormal = tangent.cross(&normal);

        Self {
            tangent,
            normal,
            binormal,
        }
    }

    /// Check that the frame is orthonormal within tolerance.
    #[must_use]
    pub fn is_orthonormal(&self, tolerance: f64) -> bool {
        (self.tangent.norm() - 1.0).abs() < tolerance
            && (self.normal.norm() - 1.0).abs() < tolerance
            && (self.binormal.norm() - 1.0).abs() < tolerance
            && self.tangent.dot(&self.normal).abs() < tolerance
            && self.tangent.dot(&self.binormal).abs() < tolerance
            && self.normal.dot(&self.binormal).abs() < tolerance
    }
}

/// Propagate rotation-minimizing frames along a tangent sequence.
///
/// The first frame is seeded via [`Frame::seeded`]. Each subsequent frame
/// rotates the previous normal by the angle between consecutive tangents
/// about their cross-product axis; where that axis degenerates (consecutive
/// tangents nearly parallel) the frame is re-orthogonalized against the new
/// tangent without introducing spurious rotation.
///
/// Inherently sequential: frame `i` depends on frame `i-1`.
///
/// # Example
///
/// ```
/// use tube_mesh::propagate_frames;
/// use nalgebra::Vector3;
///
/// let tangents = vec![Vector3::x(), Vector3::x(), Vector3::x()];
/// let frames = propagate_frames(&tangents);
///
/// assert_eq!(frames.len(), 3);
/// for frame in &frames {
///     assert!(frame.is_orthonormal(1e-10));
/// }
/// ```
#[must_use]
pub fn propagate_frames(tangents: &[Vector3<f64>]) -> Vec<Frame> {
    let Some(&first) = tangents.first() else {
        return Vec::new();
    };

    let mut frames = Vec::with_capacity(tangents.len());
    frames.push(Frame::seeded(first));

    for window in tangents.windows(2) {
        let prev_tangent = window[0];
        let tangent = window[1];
        // Propagation only reads the pass's own previous ring
        let prev = frames[frames.len() - 1];

        let axis = prev_tangent.cross(&tangent);
        let frame = if axis.norm_squared() > 1e-12 {
            let angle = axis.norm().atan2(prev_tangent.dot(&tangent).clamp(-1.0, 1.0));
            // atan2(|a × b|, a · b) is stable where acos(a · b) is not
            let normal = rotate_about(prev.normal, axis.normalize(), angle);
            orthonormalized(tangent, normal)
        } else {
            // Rotation axis undefined: hold orientation, re-orthogonalize
            let binormal = tangent
                .cross(&prev.normal)
                .try_normalize(f64::EPSILON)
                .unwrap_or(prev.binormal);
            let normal = binormal.cross(&tangent);
            Frame::new(tangent, normal, binormal)
        };

        frames.push(frame);
    }

    frames
}

/// Rodrigues rotation of `v` by `angle` about the unit `axis`.
fn rotate_about(v: Vector3<f64>, axis: Vector3<f64>, angle: f64) -> Vector3<f64> {
    let cos_a = angle.cos();
    let sin_a = angle.sin();
    v * cos_a + axis.cross(&v) * sin_a + axis * (axis.dot(&v)) * (1.0 - cos_a)
}

/// Rebuild a frame from a tangent and an approximate normal.
///
/// Projects the tangent component out of the normal so floating-point drift
/// in the rotation cannot accumulate across rings.
fn orthonormalized(tangent: Vector3<f64>, normal: Vector3<f64>) -> Frame {
    let normal = (normal - tangent * tangent.dot(&normal)).normalize();
    let binormal = tangent.cross(&normal);
    Frame::new(tangent, normal, binormal)
}
