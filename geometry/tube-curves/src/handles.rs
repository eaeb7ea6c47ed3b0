//! Bézier handle placement from a reference point and shape sliders.

use nalgebra::{Point3, Vector3};

/// Below this chord length a segment is treated as a point.
pub(crate) const DEGENERATE_EPSILON: f64 = 1e-6;

/// Compute the two interior control points for a cubic Bézier between `a`
/// and `b`.
///
/// The handles start on the chord, offset from each endpoint by
/// `0.5 · |ab| · handle_length`, then both are pushed perpendicular to the
/// chord toward the side of `reference` by `|ab| · curvature`.
///
/// # Degeneracies
///
/// - Coincident endpoints (`|ab| < 1e-6`) collapse both handles to `a`;
///   callers treat the resulting segment as a point.
/// - A `reference` collinear with the chord has no defined push side; the
///   push direction falls back to `dir × up` (up = `+Z`), or `dir × right`
///   (right = `+X`) when the chord itself is vertical.
///
/// Pure and deterministic. The sliders are used as given; clamping to
/// `[0, 1]` is the caller's contract.
///
/// # Example
///
/// ```
/// use tube_curves::solve_handles;
/// use nalgebra::Point3;
///
/// let (c1, c2) = solve_handles(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(2.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
///     0.5,
///     0.5,
/// );
///
/// // Handles are pulled toward the reference side
/// assert!((c1.y - 1.0).abs() < 1e-12);
/// assert!((c2.y - 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn solve_handles(
    a: Point3<f64>,
    b: Point3<f64>,
    reference: Point3<f64>,
    handle_length: f64,
    curvature: f64,
) -> (Point3<f64>, Point3<f64>) {
    let ab = b - a;
    let ab_len = ab.norm();

    if ab_len < DEGENERATE_EPSILON {
        return (a, a);
    }

    let dir = ab / ab_len;
    let along = 0.5 * ab_len * handle_length;
    let h1 = a + dir * along;
    let h2 = b - dir * along;

    // Perpendicular component of the reference point relative to the chord
    let to_reference = reference - a;
    let closest = a + dir * to_reference.dot(&dir);
    let push_vec = reference - closest;

    let push_dir = if push_vec.norm() < DEGENERATE_EPSILON {
        perpendicular_fallback(dir)
    } else {
        push_vec.normalize()
    };

    let push = push_dir * ab_len * curvature;

    (h1 + push, h2 + push)
}

/// Perpendicular direction for a chord whose reference point is collinear.
fn perpendicular_fallback(dir: Vector3<f64>) -> Vector3<f64> {
    let against_up = dir.cross(&Vector3::z());
    if against_up.norm() > DEGENERATE_EPSILON {
        return against_up.normalize();
    }
    // Chord is parallel to up; +X is guaranteed non-parallel here
    dir.cross(&Vector3::x()).normalize()
}
