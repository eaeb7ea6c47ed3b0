//! Tube mesh generation from Bézier curves.
//!
//! This crate turns solved curves from `tube-curves` into renderable
//! triangle meshes:
//!
//! - [`BezierTube`] - One curve swept into one tube mesh
//! - [`StarTube`] - Many strands from a shared source, merged into one mesh
//! - [`propagate_frames`] - Rotation-minimizing frames along a tangent run
//! - [`sweep_rings`] - Ring samples to positions, normals, UVs and triangles
//!
//! # Pipeline
//!
//! A rebuild is a pure function from a [`TubeSpec`] snapshot to a
//! [`TubeMesh`]:
//!
//! 1. Solve the cubic Bézier from endpoints + reference point
//! 2. Sample ring centers and tangents uniformly in `t`
//! 3. Propagate rotation-minimizing frames along the tangents
//! 4. Sweep a circular cross-section through the frames
//! 5. Triangulate the ring lattice, optionally capping the ends
//!
//! Every step runs to completion; the output buffers are always mutually
//! consistent and safe to hand to a strict mesh-upload API.
//!
//! # Robustness
//!
//! Mesh generation never fails. Out-of-range resolution settings are clamped
//! (at least 2 rings, at least 3 vertices per ring) and degenerate curves
//! produce a minimal placeholder mesh instead of NaN geometry.
//!
//! # Example
//!
//! ```
//! use tube_mesh::{BezierTube, TubeSpec};
//! use nalgebra::Point3;
//!
//! let spec = TubeSpec::new(
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(3.0, 0.0, 0.0),
//!     Point3::new(1.5, 1.0, 0.0),
//! );
//!
//! let mesh = BezierTube::new(spec).rebuild();
//! assert!(mesh.validate());
//! assert!(mesh.triangle_count() > 0);
//! ```
//!
//! # Coordinate System
//!
//! Right-handed, Z-up, matching `tube-curves`. Triangles are wound
//! counter-clockwise viewed from outside the tube.
//!
//! # Feature Flags
//!
//! - `serde`: Enable serialization/deserialization for all types

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::many_single_char_names,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::suboptimal_flops
)]

mod builder;
mod error;
mod frame;
mod mesh;
mod profile;
mod sweep;

pub use builder::{BezierTube, StarTube, TubeSpec, TubeTarget, UvMode};
pub use error::{TubeError, TubeResult};
pub use frame::{propagate_frames, Frame};
pub use mesh::TubeMesh;
pub use profile::RadiusProfile;
pub use sweep::{sweep_rings, RingSample, SweepOptions};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector2, Vector3};
