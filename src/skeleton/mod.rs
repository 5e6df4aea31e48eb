//! Straight skeletons and skeleton-based offsetting.
//!
//! The straight skeleton is traced by shrinking (or growing) the polygon
//! boundary: every edge moves parallel to itself at unit speed and the
//! vertices slide along angle bisectors. Where the moving boundary changes
//! topology, an edge collapsing to a point or a reflex vertex running into
//! an opposite edge, a skeleton node is recorded. The result is a graph
//! whose arcs are the vertex trajectories, and the boundary at any distance
//! can be read back from it without simulating again.
//!
//! # Example
//!
//! ```
//! use strata::polygon::Polygon;
//! use strata::skeleton::{build_interior_skeleton, VertexKind};
//!
//! let l_shape: Polygon<f64> = Polygon::from_coords(&[
//!     (0.0, 0.0),
//!     (2.0, 0.0),
//!     (2.0, 1.0),
//!     (1.0, 1.0),
//!     (1.0, 2.0),
//!     (0.0, 2.0),
//! ]);
//! let skeleton = build_interior_skeleton(&l_shape).unwrap();
//! let nodes = skeleton
//!     .skeleton_vertices()
//!     .iter()
//!     .filter(|v| v.kind == VertexKind::Node)
//!     .count();
//! assert_eq!(nodes, 3);
//!
//! let inset = skeleton.offset(0.25).unwrap();
//! assert_eq!(inset.len(), 1);
//! ```

mod builder;
mod config;
mod event;
mod graph;
mod manager;
mod offset;
mod wavefront;

pub use builder::{
    build_exterior_skeleton, build_exterior_skeleton_with_config, build_interior_skeleton,
    build_interior_skeleton_with_config, build_skeleton,
};
pub use config::{default_exterior_bound, SkeletonConfig};
pub use event::{Event, EventKind, EventQueue};
pub use graph::{Skeleton, SkeletonHalfEdge, SkeletonVertex, VertexKind};
pub use manager::{SkeletonInfo, SkeletonManager};
pub use offset::offset_polygons;

/// Side of the polygon a skeleton or an offset refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OffsetSide {
    /// Inside the polygon; offsets shrink.
    Interior,
    /// Outside the polygon; offsets grow.
    Exterior,
}

/// How far and in which direction the wavefront is propagated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropagationMode<F> {
    /// Inward, until the polygon has vanished.
    Interior,
    /// Outward, up to `max_distance`.
    Exterior { max_distance: F },
}

impl<F> PropagationMode<F> {
    pub fn side(&self) -> OffsetSide {
        match self {
            PropagationMode::Interior => OffsetSide::Interior,
            PropagationMode::Exterior { .. } => OffsetSide::Exterior,
        }
    }
}
