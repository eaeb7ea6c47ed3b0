//! Ring sweep triangulation.
//!
//! Turns a sequence of ring samples (center, frame, radius, length
//! coordinate) into a closed-around-circumference, open-along-length tube:
//! cylinder topology, not a torus.

use crate::frame::Frame;
use crate::mesh::TubeMesh;
use nalgebra::{Point3, Vector2, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Minimum radial segments for a ring to enclose area.
const MIN_RING_VERTS: usize = 3;

/// Extent of the placeholder triangle emitted for degenerate input.
const PLACEHOLDER_EXTENT: f64 = 1e-6;

/// One cross-section of the tube.
#[derive(Debug, Clone, Copy)]
pub struct RingSample {
    /// Curve position at this ring.
    pub center: Point3<f64>,
    /// Orthonormal frame at this ring.
    pub frame: Frame,
    /// Cross-section radius.
    pub radius: f64,
    /// Length coordinate written to `uv.x` (normalized `t` or cumulative
    /// arc length, the caller decides).
    pub u: f64,
}

/// Configuration for the sweep triangulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SweepOptions {
    /// Number of vertices around the circumference. Clamped to at least 3
    /// at build time.
    pub ring_verts: usize,
    /// Close each end with a triangle-fan cap.
    pub cap_ends: bool,
    /// Smooth shading: radial per-vertex normals. When false, every vertex
    /// of a ring takes the ring's tangent as its normal — the inherited
    /// flat-shading approximation, visibly wrong at shared edges but kept
    /// for output compatibility.
    pub smooth_shading: bool,
    /// Flip winding and normals to face inward.
    pub invert_winding: bool,
}

impl Default for SweepOptions {
    fn default() -> Self {
        Self {
            ring_verts: 16,
            cap_ends: true,
            smooth_shading: true,
            invert_winding: false,
        }
    }
}

impl SweepOptions {
    /// Set the radial segment count.
    #[must_use]
    pub const fn with_ring_verts(mut self, ring_verts: usize) -> Self {
        self.ring_verts = ring_verts;
        self
    }

    /// Leave the tube ends open.
    #[must_use]
    pub const fn uncapped(mut self) -> Self {
        self.cap_ends = false;
        self
    }

    /// Use flat (tangent) normals instead of radial ones.
    #[must_use]
    pub const fn flat_shaded(mut self) -> Self {
        self.smooth_shading = false;
        self
    }

    /// Face the surface inward.
    #[must_use]
    pub const fn inverted(mut self) -> Self {
        self.invert_winding = true;
        self
    }

    /// Radial segment count after clamping.
    #[must_use]
    pub fn effective_ring_verts(&self) -> usize {
        self.ring_verts.max(MIN_RING_VERTS)
    }
}

/// Sweep ring samples into a tube mesh.
///
/// Vertices are laid out ring-major: ring `i`, radial slot `j` is index
/// `i·ring_verts + j`. The circumference wraps (`j` is modular); the length
/// does not. Body quads split into two triangles wound counter-clockwise
/// from outside, so face normals agree with the analytic radial normals;
/// [`SweepOptions::invert_winding`] reverses both.
///
/// `uv.x` is the ring's `u`; `uv.y = j / ring_verts`. Cap centers take
/// `uv = (u_end, 0.5)` and `∓tangent` normals.
///
/// Fewer than 2 rings cannot form a tube; such input yields the degenerate
/// placeholder instead of a panic.
#[must_use]
pub fn sweep_rings(rings: &[RingSample], options: &SweepOptions) -> TubeMesh {
    let Some(first) = rings.first() else {
        return degenerate_placeholder(Point3::origin());
    };
    if rings.len() < 2 {
        return degenerate_placeholder(first.center);
    }

    let n_rings = rings.len();
    let ring_verts = options.effective_ring_verts();
    let flip = options.invert_winding;

    let vertex_count = n_rings * ring_verts + if options.cap_ends { 2 } else { 0 };
    let triangle_count = (n_rings - 1) * ring_verts * 2
        + if options.cap_ends { ring_verts * 2 } else { 0 };
    let mut mesh = TubeMesh::with_capacity(vertex_count, triangle_count);

    for ring in rings {
        for j in 0..ring_verts {
            let angle = std::f64::consts::TAU * j as f64 / ring_verts as f64;
            let radial = ring.frame.normal * angle.cos() + ring.frame.binormal * angle.sin();

            mesh.positions.push(ring.center + radial * ring.radius);

            let normal = if options.smooth_shading {
                radial
            } else {
                ring.frame.tangent
            };
            mesh.normals.push(if flip { -normal } else { normal });

            mesh.uv0
                .push(Vector2::new(ring.u, j as f64 / ring_verts as f64));
        }
    }

    // Body: one quad per adjacent ring pair and radial pair
    for i in 0..n_rings - 1 {
        for j in 0..ring_verts {
            let curr = (i * ring_verts + j) as u32;
            let next_seg = (i * ring_verts + (j + 1) % ring_verts) as u32;
            let next_ring = ((i + 1) * ring_verts + j) as u32;
            let next_both = ((i + 1) * ring_verts + (j + 1) % ring_verts) as u32;

            push_triangle(&mut mesh, [curr, next_seg, next_ring], flip);
            push_triangle(&mut mesh, [next_seg, next_both, next_ring], flip);
        }
    }

    if options.cap_ends {
        let last = n_rings - 1;
        add_cap(&mut mesh, &rings[0], ring_verts, 0, true, flip);
        add_cap(&mut mesh, &rings[last], ring_verts, last * ring_verts, false, flip);
    }

    debug_assert_eq!(mesh.vertex_count(), vertex_count);
    debug_assert_eq!(mesh.triangle_count(), triangle_count);
    mesh
}

/// Close one tube end with a triangle fan.
fn add_cap(
    mesh: &mut TubeMesh,
    ring: &RingSample,
    ring_verts: usize,
    ring_start: usize,
    is_start: bool,
    flip: bool,
) {
    let outward = if is_start {
        -ring.frame.tangent
    } else {
        ring.frame.tangent
    };

    let center_idx = mesh.positions.len() as u32;
    mesh.positions.push(ring.center);
    mesh.normals.push(if flip { -outward } else { outward });
    mesh.uv0.push(Vector2::new(ring.u, 0.5));

    for j in 0..ring_verts {
        let curr = (ring_start + j) as u32;
        let next = (ring_start + (j + 1) % ring_verts) as u32;

        // Start cap faces backward along the curve, so its fan reverses
        let tri = if is_start {
            [center_idx, next, curr]
        } else {
            [center_idx, curr, next]
        };
        push_triangle(mesh, tri, flip);
    }
}

fn push_triangle(mesh: &mut TubeMesh, tri: [u32; 3], flip: bool) {
    mesh.triangles.push(if flip {
        [tri[0], tri[2], tri[1]]
    } else {
        tri
    });
}

/// Minimal placeholder for a curve too degenerate to sweep: a single
/// near-zero-area triangle at the given point, with consistent buffers.
#[must_use]
pub(crate) fn degenerate_placeholder(at: Point3<f64>) -> TubeMesh {
    let mut mesh = TubeMesh::with_capacity(3, 1);

    mesh.positions.push(at);
    mesh.positions.push(at + Vector3::x() * PLACEHOLDER_EXTENT);
    mesh.positions.push(at + Vector3::y() * PLACEHOLDER_EXTENT);
    for _ in 0..3 {
        mesh.normals.push(Vector3::z());
        mesh.uv0.push(Vector2::zeros());
    }
    mesh.triangles.push([0, 1, 2]);

    mesh
}
