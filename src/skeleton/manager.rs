//! Lazy, cached access to both skeletons of one polygon.

use super::builder::build_skeleton;
use super::config::{default_exterior_bound, SkeletonConfig};
use super::graph::Skeleton;
use super::offset::offset_polygons;
use super::{OffsetSide, PropagationMode};
use crate::error::Result;
use crate::polygon::Polygon;
use crate::primitives::Point2;
use num_traits::Float;
use std::sync::OnceLock;

/// Structural description of a skeleton: every vertex position and every
/// arc, borders excluded.
#[derive(Debug, Clone, PartialEq)]
pub struct SkeletonInfo<F> {
    pub vertices: Vec<Point2<F>>,
    pub edges: Vec<(Point2<F>, Point2<F>)>,
}

/// Owns a polygon and builds its interior and exterior skeletons on first
/// use.
///
/// Each skeleton is built at most once, even under concurrent access; a
/// failed build is cached too and reported to every caller.
///
/// # Example
///
/// ```
/// use strata::polygon::Polygon;
/// use strata::skeleton::{OffsetSide, SkeletonManager};
///
/// let square: Polygon<f64> = Polygon::from_coords(&[
///     (-1.0, -1.0),
///     (1.0, -1.0),
///     (1.0, 1.0),
///     (-1.0, 1.0),
/// ]);
/// let manager = SkeletonManager::new(square);
///
/// let inner = manager.offset(0.5, OffsetSide::Interior).unwrap();
/// assert!((inner[0].area() - 1.0).abs() < 1e-9);
///
/// let outer = manager.offset(1.0, OffsetSide::Exterior).unwrap();
/// assert!((outer[0].area() - 16.0).abs() < 1e-9);
/// ```
#[derive(Debug)]
pub struct SkeletonManager<F> {
    polygon: Polygon<F>,
    config: SkeletonConfig<F>,
    exterior_bound: F,
    interior: OnceLock<Result<Skeleton<F>>>,
    exterior: OnceLock<Result<Skeleton<F>>>,
}

impl<F: Float> SkeletonManager<F> {
    /// Creates a manager with default tolerances and an exterior bound of
    /// [`default_exterior_bound`].
    pub fn new(polygon: Polygon<F>) -> Self {
        let exterior_bound = default_exterior_bound(&polygon);
        Self::with_config(polygon, SkeletonConfig::default(), exterior_bound)
    }

    pub fn with_config(polygon: Polygon<F>, config: SkeletonConfig<F>, exterior_bound: F) -> Self {
        Self {
            polygon,
            config,
            exterior_bound,
            interior: OnceLock::new(),
            exterior: OnceLock::new(),
        }
    }

    #[inline]
    pub fn polygon(&self) -> &Polygon<F> {
        &self.polygon
    }

    /// Distance the exterior skeleton is propagated to.
    #[inline]
    pub fn exterior_bound(&self) -> F {
        self.exterior_bound
    }

    pub fn interior(&self) -> Result<&Skeleton<F>> {
        self.interior
            .get_or_init(|| build_skeleton(&self.polygon, PropagationMode::Interior, &self.config))
            .as_ref()
            .map_err(Clone::clone)
    }

    pub fn exterior(&self) -> Result<&Skeleton<F>> {
        self.exterior
            .get_or_init(|| {
                build_skeleton(
                    &self.polygon,
                    PropagationMode::Exterior {
                        max_distance: self.exterior_bound,
                    },
                    &self.config,
                )
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Returns the skeleton for `side`, building it if needed.
    pub fn skeleton(&self, side: OffsetSide) -> Result<&Skeleton<F>> {
        match side {
            OffsetSide::Interior => self.interior(),
            OffsetSide::Exterior => self.exterior(),
        }
    }

    /// Offset polygons at `distance` on `side`.
    pub fn offset(&self, distance: F, side: OffsetSide) -> Result<Vec<Polygon<F>>> {
        offset_polygons(self.skeleton(side)?, distance, side)
    }

    /// Vertices and arcs of the skeleton for `side`.
    pub fn skeleton_info(&self, side: OffsetSide) -> Result<SkeletonInfo<F>> {
        let skeleton = self.skeleton(side)?;
        Ok(SkeletonInfo {
            vertices: skeleton.vertices(),
            edges: skeleton.edges(),
        })
    }
}
