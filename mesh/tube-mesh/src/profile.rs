//! Radius profiles along the tube.

use crate::error::{TubeError, TubeResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Radius of the tube cross-section as a function of `t ∈ [0, 1]`.
///
/// Either a constant, or a constant scaled by a keyed multiplier curve
/// lerped between `(t, multiplier)` keys. Zero or negative values pass
/// through silently — they produce a degenerate or self-intersecting ring,
/// never an error.
///
/// # Example
///
/// ```
/// use tube_mesh::RadiusProfile;
///
/// // Taper from full radius to half radius
/// let profile = RadiusProfile::keyed(2.0, vec![(0.0, 1.0), (1.0, 0.5)]).unwrap();
/// assert!((profile.radius_at(0.0) - 2.0).abs() < 1e-12);
/// assert!((profile.radius_at(1.0) - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RadiusProfile {
    /// The same radius at every ring.
    Constant(f64),
    /// A base radius scaled by a multiplier curve over `t`.
    Keyed {
        /// Base radius multiplied by the keyed curve.
        base: f64,
        /// `(t, multiplier)` keys, strictly ascending in `t`.
        keys: Vec<(f64, f64)>,
    },
}

impl RadiusProfile {
    /// Create a keyed profile, validating the key sequence.
    ///
    /// # Errors
    ///
    /// - [`TubeError::InsufficientProfileKeys`] with fewer than 2 keys
    /// - [`TubeError::UnsortedProfileKey`] if `t` values are not strictly
    ///   ascending
    pub fn keyed(base: f64, keys: Vec<(f64, f64)>) -> TubeResult<Self> {
        if keys.len() < 2 {
            return Err(TubeError::InsufficientProfileKeys {
                required: 2,
                actual: keys.len(),
            });
        }
        for (index, window) in keys.windows(2).enumerate() {
            if window[1].0 <= window[0].0 {
                return Err(TubeError::UnsortedProfileKey { index: index + 1 });
            }
        }
        Ok(Self::Keyed { base, keys })
    }

    /// Evaluate the radius at parameter `t`.
    ///
    /// Before the first key or after the last, the nearest key's multiplier
    /// holds; between keys the multiplier is lerped.
    #[must_use]
    pub fn radius_at(&self, t: f64) -> f64 {
        match self {
            Self::Constant(radius) => *radius,
            Self::Keyed { base, keys } => {
                let t = t.clamp(0.0, 1.0);
                base * keyed_multiplier(keys, t)
            }
        }
    }
}

impl Default for RadiusProfile {
    fn default() -> Self {
        Self::Constant(1.0)
    }
}

/// Lerp the multiplier curve at `t`. `keys` is non-empty and ascending.
fn keyed_multiplier(keys: &[(f64, f64)], t: f64) -> f64 {
    let first = keys[0];
    if t <= first.0 {
        return first.1;
    }
    for window in keys.windows(2) {
        let (t0, m0) = window[0];
        let (t1, m1) = window[1];
        if t <= t1 {
            let local = (t - t0) / (t1 - t0);
            return m0 + (m1 - m0) * local;
        }
    }
    keys[keys.len() - 1].1
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn constant_profile() {
        let profile = RadiusProfile::Constant(0.5);
        assert_relative_eq!(profile.radius_at(0.0), 0.5);
        assert_relative_eq!(profile.radius_at(0.7), 0.5);
        assert_relative_eq!(profile.radius_at(1.0), 0.5);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn keyed_profile_lerps() {
        let profile = RadiusProfile::keyed(2.0, vec![(0.0, 1.0), (0.5, 2.0), (1.0, 1.0)]).unwrap();

        assert_relative_eq!(profile.radius_at(0.0), 2.0, epsilon = 1e-12);
        assert_relative_eq!(profile.radius_at(0.25), 3.0, epsilon = 1e-12);
        assert_relative_eq!(profile.radius_at(0.5), 4.0, epsilon = 1e-12);
        assert_relative_eq!(profile.radius_at(1.0), 2.0, epsilon = 1e-12);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn keyed_profile_holds_outside_key_range() {
        let profile = RadiusProfile::keyed(1.0, vec![(0.25, 2.0), (0.75, 4.0)]).unwrap();

        assert_relative_eq!(profile.radius_at(0.0), 2.0, epsilon = 1e-12);
        assert_relative_eq!(profile.radius_at(1.0), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn keyed_profile_needs_two_keys() {
        let result = RadiusProfile::keyed(1.0, vec![(0.0, 1.0)]);
        assert!(matches!(
            result,
            Err(TubeError::InsufficientProfileKeys { required: 2, actual: 1 })
        ));
    }

    #[test]
    fn keyed_profile_rejects_unsorted_keys() {
        let result = RadiusProfile::keyed(1.0, vec![(0.0, 1.0), (0.8, 2.0), (0.5, 3.0)]);
        assert!(matches!(
            result,
            Err(TubeError::UnsortedProfileKey { index: 2 })
        ));
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn negative_radius_passes_through() {
        let profile = RadiusProfile::keyed(1.0, vec![(0.0, -1.0), (1.0, 1.0)]).unwrap();
        assert_relative_eq!(profile.radius_at(0.0), -1.0, epsilon = 1e-12);
    }
}
