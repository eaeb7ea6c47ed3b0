//! Parametric cubic Bézier curves for tube mesh generation.
//!
//! This crate provides the curve-side half of the tube pipeline:
//!
//! - [`CubicBezier`] - Single cubic Bézier segment with robust tangents
//! - [`solve_handles`] - Derive the two interior control points from a pair
//!   of endpoints, a reference point and two shape sliders
//! - [`ArcLengthTable`] - Fixed-resolution polyline arc-length lookup
//!
//! # Core Trait
//!
//! All curves implement the [`Curve`] trait, parameterized over `t ∈ [0, 1]`:
//!
//! - **Evaluation**: Position and unit tangent at `t`
//! - **Derivatives**: Unnormalized first derivative for speed-aware callers
//! - **Sampling**: Uniform parameter-space sampling of positions and tangents
//!
//! # Robustness
//!
//! Evaluation never fails and never produces NaN: degenerate inputs
//! (coincident control points, zero-length chords, collinear reference
//! points) substitute documented fallback values instead of erroring. The
//! fallible constructors on this crate exist so hosts can detect pathological
//! configurations up front; once a curve is built, every query succeeds.
//!
//! # Example
//!
//! ```
//! use tube_curves::{Curve, CubicBezier};
//! use nalgebra::Point3;
//!
//! // Bow a curve between two endpoints toward a reference point
//! let curve = CubicBezier::from_reference(
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(2.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     0.5,
//!     0.5,
//! );
//!
//! let mid = curve.point_at(0.5);
//! assert!(mid.y > 0.0);
//! ```
//!
//! # Coordinate System
//!
//! Right-handed, Z-up:
//!
//! - X: width (left/right)
//! - Y: depth (front/back)
//! - Z: height (up/down)
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
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::suboptimal_flops
)]

mod arclen;
mod bezier;
mod error;
mod handles;
mod traits;

pub use arclen::ArcLengthTable;
pub use bezier::CubicBezier;
pub use error::CurveError;
pub use handles::solve_handles;
pub use traits::Curve;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

/// Result type for curve operations.
pub type Result<T> = std::result::Result<T, CurveError>;
