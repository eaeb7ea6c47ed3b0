//! Error types for tube mesh configuration.

use thiserror::Error;

/// Result type for tube mesh operations.
pub type TubeResult<T> = Result<T, TubeError>;

/// Errors that can occur while configuring tube generation.
///
/// Only configuration is fallible. `rebuild()` itself never errors:
/// degenerate geometry produces documented placeholder output and
/// under-resolved counts are clamped up to their minimums.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TubeError {
    /// A keyed radius profile needs at least two keys to interpolate.
    #[error("radius profile needs at least {required} keys, got {actual}")]
    InsufficientProfileKeys {
        /// Minimum required keys.
        required: usize,
        /// Actual key count.
        actual: usize,
    },

    /// Radius profile keys must be strictly ascending in `t`.
    #[error("radius profile key {index} is out of order")]
    UnsortedProfileKey {
        /// Index of the offending key.
        index: usize,
    },

    /// A star tube needs at least one target.
    #[error("star tube has no targets")]
    NoTargets,
}
