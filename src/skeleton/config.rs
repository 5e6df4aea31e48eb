//! Tolerances and limits for skeleton construction.

use crate::polygon::Polygon;
use num_traits::Float;

/// Configuration for skeleton construction.
///
/// Every tolerance used by the builder comes from here; nothing else in the
/// skeleton code invents an epsilon.
///
/// # Example
///
/// ```
/// use strata::skeleton::SkeletonConfig;
///
/// let config: SkeletonConfig<f64> = SkeletonConfig {
///     epsilon: 1e-7,
///     ..SkeletonConfig::default()
/// };
/// assert!((config.scaled_epsilon(10.0) - 1e-6).abs() < 1e-18);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkeletonConfig<F> {
    /// Relative distance tolerance. It is multiplied by the bounding-box
    /// diagonal of the input to obtain the absolute tolerance used for
    /// coincidence tests, node merging and event time comparisons.
    pub epsilon: F,
    /// Angle in radians below which two edges are treated as parallel.
    pub parallel_tolerance: F,
    /// Event budget factor: construction fails after
    /// `max_events_factor * n² + 64` applied events for `n` input vertices.
    pub max_events_factor: usize,
}

impl<F: Float> Default for SkeletonConfig<F> {
    fn default() -> Self {
        // 1e-9 is below f32 resolution, so never go under a few ulps.
        let floor = F::epsilon() * F::from(64.0).unwrap();
        let tol = F::from(1e-9).unwrap().max(floor);
        Self {
            epsilon: tol,
            parallel_tolerance: tol,
            max_events_factor: 64,
        }
    }
}

impl<F: Float> SkeletonConfig<F> {
    /// Returns the absolute tolerance for an input of the given size.
    ///
    /// Inputs smaller than one unit use the relative tolerance as-is.
    pub fn scaled_epsilon(&self, scale: F) -> F {
        self.epsilon * scale.max(F::one())
    }

    /// Returns the number of applied events after which construction gives up.
    pub fn event_budget(&self, vertex_count: usize) -> usize {
        self.max_events_factor
            .saturating_mul(vertex_count)
            .saturating_mul(vertex_count)
            .saturating_add(64)
    }
}

/// Exterior propagation bound used when none is given: the bounding-box
/// diagonal of the polygon, or one for an empty or single-point polygon.
pub fn default_exterior_bound<F: Float>(polygon: &Polygon<F>) -> F {
    let diagonal = polygon.bounding_diagonal();
    if diagonal.is_finite() && diagonal > F::zero() {
        diagonal
    } else {
        F::one()
    }
}
