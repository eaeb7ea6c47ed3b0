//! Tube mesh buffers.

use nalgebra::{Point3, Vector2, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A triangle mesh as parallel attribute buffers.
///
/// Downstream mesh-upload APIs are strict about array-length consistency
/// between positions, normals, UVs and indices, so the buffers are stored
/// flat and regenerated wholesale on every rebuild — no incremental update,
/// no partial result. A caller swaps the old buffer set for the new one in
/// one step.
///
/// # Invariants
///
/// - `positions`, `normals` and `uv0` always have the same length, and so
///   does `uv1` when present
/// - every triangle index is a valid vertex index
///
/// For a single swept tube with `rings` rings of `ring_verts` vertices:
///
/// - `positions.len() == rings·ring_verts + (cap_ends ? 2 : 0)`
/// - `triangles.len() == (rings-1)·ring_verts·2 + (cap_ends ? ring_verts·2 : 0)`
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TubeMesh {
    /// Vertex positions.
    pub positions: Vec<Point3<f64>>,
    /// Per-vertex unit normals.
    pub normals: Vec<Vector3<f64>>,
    /// Primary texture coordinates: `x` along the length, `y` around the
    /// circumference.
    pub uv0: Vec<Vector2<f64>>,
    /// Secondary coordinates, present only for multi-strand meshes
    /// (`x` = strand fraction, `y` = circumference fraction).
    pub uv1: Option<Vec<Vector2<f64>>>,
    /// Triangle faces as vertex indices, counter-clockwise from outside.
    pub triangles: Vec<[u32; 3]>,
}

impl TubeMesh {
    /// Create an empty mesh.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            positions: Vec::new(),
            normals: Vec::new(),
            uv0: Vec::new(),
            uv1: None,
            triangles: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated buffers.
    #[must_use]
    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count),
            normals: Vec::with_capacity(vertex_count),
            uv0: Vec::with_capacity(vertex_count),
            uv1: None,
            triangles: Vec::with_capacity(triangle_count),
        }
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Whether the mesh has no geometry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Check the buffer-length and index invariants.
    #[must_use]
    pub fn validate(&self) -> bool {
        let n = self.positions.len();
        if self.normals.len() != n || self.uv0.len() != n {
            return false;
        }
        if let Some(uv1) = &self.uv1 {
            if uv1.len() != n {
                return false;
            }
        }
        self.triangles
            .iter()
            .all(|tri| tri.iter().all(|&i| (i as usize) < n))
    }

    /// Append another mesh, offsetting its triangle indices.
    ///
    /// Both meshes must agree on `uv1` presence; the star builder guarantees
    /// this by attaching strand coordinates before merging.
    pub fn merge(&mut self, other: Self) {
        debug_assert!(self.is_empty() || self.uv1.is_some() == other.uv1.is_some());

        let offset = self.positions.len() as u32;
        self.positions.extend(other.positions);
        self.normals.extend(other.normals);
        self.uv0.extend(other.uv0);
        match (&mut self.uv1, other.uv1) {
            (Some(mine), Some(theirs)) => mine.extend(theirs),
            (mine @ None, Some(theirs)) => *mine = Some(theirs),
            _ => {}
        }
        self.triangles.extend(
            other
                .triangles
                .into_iter()
                .map(|[a, b, c]| [a + offset, b + offset, c + offset]),
        );
    }
}
