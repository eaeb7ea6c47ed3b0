//! Host-facing rebuild boundary.
//!
//! The host scene owns the control points and decides the rebuild cadence
//! (every frame, on change, or debounced); this module is the pure function
//! from a polled snapshot to a complete mesh. Rebuilding always runs to
//! completion and returns a fully consistent buffer set — the caller swaps
//! it in atomically.

use crate::error::{TubeError, TubeResult};
use crate::frame::propagate_frames;
use crate::mesh::TubeMesh;
use crate::profile::RadiusProfile;
use crate::sweep::{degenerate_placeholder, sweep_rings, RingSample, SweepOptions};
use nalgebra::{Point3, Vector2, Vector3};
use tube_curves::{ArcLengthTable, CubicBezier, Curve};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How `uv.x` maps along the tube length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UvMode {
    /// `uv.x` is the normalized curve parameter `t`.
    #[default]
    Normalized,
    /// `uv.x` is the cumulative arc-length distance, so texture density is
    /// uniform along the curve regardless of parameter speed.
    ArcLength,
}

/// Snapshot of everything a single tube rebuild reads.
///
/// Positions are world-space values polled from the host scene once per
/// rebuild; the two shape sliders are expected pre-clamped to `[0, 1]` by
/// the host. `rings` and `length_samples` are independent on purpose:
/// UV-length accuracy is decoupled from triangulation density.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TubeSpec {
    /// Curve start point.
    pub start: Point3<f64>,
    /// Curve end point.
    pub end: Point3<f64>,
    /// Reference point defining the curvature direction.
    pub reference: Point3<f64>,
    /// Handle offset along the chord, `[0, 1]`.
    pub handle_length: f64,
    /// Perpendicular push toward the reference, `[0, 1]`.
    pub curvature: f64,
    /// Number of cross-section rings. Clamped to at least 2.
    pub rings: usize,
    /// Sample count for the arc-length table (only used by
    /// [`UvMode::ArcLength`]). Clamped to at least 2.
    pub length_samples: usize,
    /// Radius per ring.
    pub profile: RadiusProfile,
    /// Length mapping for `uv.x`.
    pub uv_mode: UvMode,
    /// Triangulation options.
    pub sweep: SweepOptions,
}

impl TubeSpec {
    /// Create a spec with default shape and resolution settings.
    #[must_use]
    pub fn new(start: Point3<f64>, end: Point3<f64>, reference: Point3<f64>) -> Self {
        Self {
            start,
            end,
            reference,
            handle_length: 0.5,
            curvature: 0.5,
            rings: 24,
            length_samples: 64,
            profile: RadiusProfile::default(),
            uv_mode: UvMode::default(),
            sweep: SweepOptions::default(),
        }
    }
}

/// A single Bézier tube: one curve, one mesh.
///
/// Construction solves the handles once from the snapshot; afterwards the
/// curve can be queried independently of mesh generation (for placing other
/// objects along it) and [`Self::rebuild`] can be called any number of
/// times — it is idempotent for identical input.
///
/// # Example
///
/// ```
/// use tube_mesh::{BezierTube, TubeSpec};
/// use nalgebra::Point3;
///
/// let spec = TubeSpec::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(4.0, 0.0, 0.0),
///     Point3::new(2.0, 2.0, 0.0),
/// );
///
/// let tube = BezierTube::new(spec);
/// let mesh = tube.rebuild();
/// assert!(mesh.validate());
/// ```
#[derive(Debug, Clone)]
pub struct BezierTube {
    curve: CubicBezier,
    spec: TubeSpec,
}

impl BezierTube {
    /// Solve the curve from a snapshot.
    #[must_use]
    pub fn new(spec: TubeSpec) -> Self {
        let curve = CubicBezier::from_reference(
            spec.start,
            spec.end,
            spec.reference,
            spec.handle_length,
            spec.curvature,
        );
        Self { curve, spec }
    }

    /// The snapshot this tube was built from.
    #[must_use]
    pub fn spec(&self) -> &TubeSpec {
        &self.spec
    }

    /// The solved curve.
    #[must_use]
    pub fn curve(&self) -> &CubicBezier {
        &self.curve
    }

    /// Curve position at `t`, independent of mesh generation.
    #[must_use]
    pub fn position_at(&self, t: f64) -> Point3<f64> {
        self.curve.point_at(t)
    }

    /// Unit curve tangent at `t`, independent of mesh generation.
    #[must_use]
    pub fn tangent_at(&self, t: f64) -> Vector3<f64> {
        self.curve.tangent_at(t)
    }

    /// Generate the complete tube mesh.
    ///
    /// Never fails and never returns a partial buffer set. Coincident
    /// endpoints produce the minimal placeholder mesh (a single
    /// near-zero-area triangle) rather than a division by zero.
    #[must_use]
    pub fn rebuild(&self) -> TubeMesh {
        if self.curve.is_degenerate() {
            return degenerate_placeholder(self.spec.start);
        }

        let rings = self.spec.rings.max(2);
        let length_table = match self.spec.uv_mode {
            UvMode::Normalized => None,
            UvMode::ArcLength => Some(ArcLengthTable::from_curve(
                &self.curve,
                self.spec.length_samples,
            )),
        };

        let samples: Vec<RingSample> = {
            let positions = self.curve.sample_uniform(rings);
            let tangents = self.curve.sample_tangents(rings);
            let frames = propagate_frames(&tangents);

            positions
                .into_iter()
                .zip(frames)
                .enumerate()
                .map(|(i, (center, frame))| {
                    let t = i as f64 / (rings - 1) as f64;
                    let u = match &length_table {
                        Some(table) => table.distance_at(t),
                        None => t,
                    };
                    RingSample {
                        center,
                        frame,
                        radius: self.spec.profile.radius_at(t),
                        u,
                    }
                })
                .collect()
        };

        sweep_rings(&samples, &self.spec.sweep)
    }
}

/// One spoke of a star tube.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TubeTarget {
    /// Curve end point for this strand.
    pub end: Point3<f64>,
    /// Reference point for this strand's curvature direction.
    pub reference: Point3<f64>,
}

impl TubeTarget {
    /// Create a target.
    #[must_use]
    pub const fn new(end: Point3<f64>, reference: Point3<f64>) -> Self {
        Self { end, reference }
    }
}

/// A star of tubes: one shared source point, many targets, one combined
/// mesh.
///
/// All strands share the shape sliders, resolution, profile and sweep
/// options; each target contributes its own end and reference points. The
/// combined mesh carries `uv1` with `x` = strand fraction (`k / (n-1)`, or
/// 0 for a single strand) and `y` = circumference fraction, so shaders can
/// address strands individually.
///
/// # Example
///
/// ```
/// use tube_mesh::{StarTube, TubeSpec, TubeTarget};
/// use nalgebra::Point3;
///
/// let template = TubeSpec::new(Point3::origin(), Point3::origin(), Point3::origin());
/// let star = StarTube::new(
///     Point3::origin(),
///     vec![
///         TubeTarget::new(Point3::new(3.0, 0.0, 0.0), Point3::new(1.5, 1.0, 0.0)),
///         TubeTarget::new(Point3::new(0.0, 3.0, 0.0), Point3::new(1.0, 1.5, 0.0)),
///     ],
///     template,
/// )
/// .unwrap();
///
/// let mesh = star.rebuild();
/// assert!(mesh.uv1.is_some());
/// assert!(mesh.validate());
/// ```
#[derive(Debug, Clone)]
pub struct StarTube {
    source: Point3<f64>,
    targets: Vec<TubeTarget>,
    template: TubeSpec,
}

impl StarTube {
    /// Create a star from a shared source, targets, and a template spec
    /// whose shape/resolution settings apply to every strand.
    ///
    /// The template's own `start`, `end` and `reference` are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TubeError::NoTargets`] if `targets` is empty.
    pub fn new(
        source: Point3<f64>,
        targets: Vec<TubeTarget>,
        template: TubeSpec,
    ) -> TubeResult<Self> {
        if targets.is_empty() {
            return Err(TubeError::NoTargets);
        }
        Ok(Self {
            source,
            targets,
            template,
        })
    }

    /// Shared source point.
    #[must_use]
    pub fn source(&self) -> Point3<f64> {
        self.source
    }

    /// The strand targets.
    #[must_use]
    pub fn targets(&self) -> &[TubeTarget] {
        &self.targets
    }

    /// Generate the combined mesh for all strands.
    ///
    /// Strands whose endpoints coincide with the source contribute the
    /// placeholder triangle, keeping the buffer invariants intact for the
    /// whole mesh.
    #[must_use]
    pub fn rebuild(&self) -> TubeMesh {
        let strand_div = (self.targets.len() - 1).max(1) as f64;
        let mut combined = TubeMesh::new();

        for (k, target) in self.targets.iter().enumerate() {
            let spec = TubeSpec {
                start: self.source,
                end: target.end,
                reference: target.reference,
                ..self.template.clone()
            };

            let mut strand = BezierTube::new(spec).rebuild();

            let fraction = k as f64 / strand_div;
            strand.uv1 = Some(
                strand
                    .uv0
                    .iter()
                    .map(|uv| Vector2::new(fraction, uv.y))
                    .collect(),
            );

            combined.merge(strand);
        }

        combined
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn basic_spec() -> TubeSpec {
        TubeSpec::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        )
    }

    #[test]
    fn rebuild_is_idempotent() {
        let tube = BezierTube::new(basic_spec());
        let a = tube.rebuild();
        let b = tube.rebuild();

        assert_eq!(a.vertex_count(), b.vertex_count());
        assert_eq!(a.triangles, b.triangles);
        for (pa, pb) in a.positions.iter().zip(&b.positions) {
            assert_relative_eq!(pa.coords, pb.coords);
        }
    }

    #[test]
    fn curve_queries_match_solved_handles() {
        let tube = BezierTube::new(basic_spec());

        // Spec scenario: handles at y = 1, so the midpoint bows upward
        assert_relative_eq!(tube.position_at(0.0).coords, Vector3::new(0.0, 0.0, 0.0));
        assert_relative_eq!(tube.position_at(1.0).coords, Vector3::new(2.0, 0.0, 0.0));
        assert!(tube.position_at(0.5).y > 0.0);
        assert_relative_eq!(tube.tangent_at(0.5).norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn rings_clamp_to_two() {
        let mut spec = basic_spec();
        spec.rings = 0;
        spec.sweep = spec.sweep.uncapped();

        let mesh = BezierTube::new(spec).rebuild();
        assert_eq!(mesh.vertex_count(), 2 * 16);
    }

    #[test]
    fn degenerate_endpoints_yield_placeholder() {
        let p = Point3::new(1.0, 2.0, 3.0);
        let spec = TubeSpec::new(p, p, Point3::new(5.0, 0.0, 0.0));
        let mesh = BezierTube::new(spec).rebuild();

        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert!(mesh.validate());
        assert_relative_eq!(mesh.positions[0].coords, p.coords);
    }

    #[test]
    fn arc_length_uv_is_cumulative() {
        let mut spec = basic_spec();
        spec.uv_mode = UvMode::ArcLength;
        spec.rings = 8;
        spec.sweep = spec.sweep.uncapped();

        let mesh = BezierTube::new(spec).rebuild();
        let ring_verts = 16;

        // uv.x strictly increases ring to ring and ends at the curve length
        let mut prev = -1.0;
        for i in 0..8 {
            let u = mesh.uv0[i * ring_verts].x;
            assert!(u > prev);
            prev = u;
        }
        assert!(prev > 2.0); // longer than the chord
    }

    #[test]
    fn star_requires_targets() {
        let result = StarTube::new(Point3::origin(), Vec::new(), basic_spec());
        assert!(matches!(result, Err(TubeError::NoTargets)));
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn star_combines_strands_with_uv1() {
        let template = basic_spec();
        let star = StarTube::new(
            Point3::origin(),
            vec![
                TubeTarget::new(Point3::new(3.0, 0.0, 0.0), Point3::new(1.5, 1.0, 0.0)),
                TubeTarget::new(Point3::new(0.0, 3.0, 0.0), Point3::new(1.0, 1.5, 0.0)),
                TubeTarget::new(Point3::new(0.0, 0.0, 3.0), Point3::new(1.0, 0.0, 1.5)),
            ],
            template.clone(),
        )
        .unwrap();

        let mesh = star.rebuild();
        assert!(mesh.validate());

        let per_strand = BezierTube::new(template).rebuild().vertex_count();
        assert_eq!(mesh.vertex_count(), 3 * per_strand);

        let uv1 = mesh.uv1.as_deref().unwrap();
        assert_eq!(uv1.len(), mesh.vertex_count());
        assert_relative_eq!(uv1[0].x, 0.0);
        assert_relative_eq!(uv1[per_strand].x, 0.5);
        assert_relative_eq!(uv1[2 * per_strand].x, 1.0);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn star_tolerates_degenerate_strand() {
        let star = StarTube::new(
            Point3::origin(),
            vec![
                TubeTarget::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0)),
                TubeTarget::new(Point3::new(0.0, 3.0, 0.0), Point3::new(1.0, 1.5, 0.0)),
            ],
            basic_spec(),
        )
        .unwrap();

        let mesh = star.rebuild();
        assert!(mesh.validate());
        // Placeholder triangle plus one full strand
        assert_eq!(mesh.triangle_count() % 2, 1);
    }
}
