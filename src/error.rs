//! Error types for skeleton construction and offset queries.

use crate::skeleton::OffsetSide;
use num_traits::Float;
use thiserror::Error;

/// Errors that can occur while building a straight skeleton or querying it.
///
/// Construction errors (`InvalidInput`, `DegenerateConstruction`) abort the
/// whole build. Query errors (`DistanceOutOfRange`, `SideMismatch`) leave the
/// skeleton untouched and queryable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SkeletonError {
    /// The input polygon cannot be skeletonized.
    #[error("invalid input polygon: {reason}")]
    InvalidInput {
        /// Which check rejected the polygon.
        reason: String,
    },

    /// The event simulation reached a configuration it cannot resolve.
    #[error("degenerate construction at t = {time}: {reason}")]
    DegenerateConstruction {
        /// Simulation time (offset distance) at which construction failed.
        time: f64,
        reason: String,
    },

    /// The requested offset lies outside what the skeleton was built for.
    #[error("offset distance {distance} is outside the supported range [0, {max}]")]
    DistanceOutOfRange {
        distance: f64,
        /// Largest supported distance.
        max: f64,
    },

    /// An offset side was requested from a skeleton built for the other side.
    #[error("requested {requested:?} offset from a skeleton built for {built:?} propagation")]
    SideMismatch {
        requested: OffsetSide,
        built: OffsetSide,
    },
}

/// Widens a coordinate or time for error payloads and log fields.
pub(crate) fn as_f64<F: Float>(value: F) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

impl SkeletonError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        SkeletonError::InvalidInput {
            reason: reason.into(),
        }
    }

    pub(crate) fn degenerate(time: f64, reason: impl Into<String>) -> Self {
        SkeletonError::DegenerateConstruction {
            time,
            reason: reason.into(),
        }
    }
}

/// Result alias for skeleton operations.
pub type Result<T> = std::result::Result<T, SkeletonError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = SkeletonError::invalid("fewer than 3 vertices");
        assert_eq!(err.to_string(), "invalid input polygon: fewer than 3 vertices");

        let err = SkeletonError::DistanceOutOfRange {
            distance: 7.5,
            max: 5.0,
        };
        assert_eq!(
            err.to_string(),
            "offset distance 7.5 is outside the supported range [0, 5]"
        );
    }

    #[test]
    fn test_side_mismatch_message() {
        let err = SkeletonError::SideMismatch {
            requested: OffsetSide::Exterior,
            built: OffsetSide::Interior,
        };
        assert!(err.to_string().contains("Exterior"));
    }
}
