//! Error types for curve operations.

use thiserror::Error;

/// Errors that can occur while constructing curve-side helpers.
///
/// Evaluation itself never errors; degenerate geometry substitutes fallback
/// values so a render loop is never interrupted mid-frame.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CurveError {
    /// Too few samples requested for a lookup table.
    #[error("insufficient samples: need at least {required}, got {actual}")]
    InsufficientSamples {
        /// Minimum required samples.
        required: usize,
        /// Actual number of samples requested.
        actual: usize,
    },

    /// Degenerate curve (e.g., coincident endpoints).
    #[error("degenerate curve: {reason}")]
    Degenerate {
        /// Description of the degeneracy.
        reason: String,
    },
}

impl CurveError {
    /// Create an insufficient samples error.
    #[must_use]
    pub fn insufficient_samples(required: usize, actual: usize) -> Self {
        Self::InsufficientSamples { required, actual }
    }

    /// Create a degenerate curve error.
    #[must_use]
    pub fn degenerate(reason: impl Into<String>) -> Self {
        Self::Degenerate {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = CurveError::insufficient_samples(2, 0);
        assert!(err.to_string().contains("need at least 2"));
        assert!(err.to_string().contains("got 0"));

        let err = CurveError::degenerate("coincident endpoints");
        assert!(err.to_string().contains("coincident endpoints"));
    }
}
