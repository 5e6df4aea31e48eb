//! strata - Straight skeletons and polygon offsetting
//!
//! Computes the straight skeleton of a simple polygon, inside and outside,
//! and derives mitered offset polygons at any distance from it. Tolerances
//! are explicit: every epsilon is either a parameter or part of a
//! [`SkeletonConfig`].
//!
//! # Example
//!
//! ```
//! use strata::{build_interior_skeleton, Polygon};
//!
//! let square: Polygon<f64> = Polygon::from_coords(&[
//!     (-1.0, -1.0),
//!     (1.0, -1.0),
//!     (1.0, 1.0),
//!     (-1.0, 1.0),
//! ]);
//! let skeleton = build_interior_skeleton(&square).unwrap();
//!
//! let inset = skeleton.offset(0.5).unwrap();
//! assert_eq!(inset.len(), 1);
//! assert!((inset[0].area() - 1.0).abs() < 1e-9);
//! ```

pub mod error;
pub mod polygon;
pub mod primitives;
pub mod skeleton;
pub mod tolerance;

pub use error::{Result, SkeletonError};
pub use polygon::Polygon;
pub use primitives::{Line2, Point2, Ray2, Segment2, Vec2};
pub use skeleton::{
    build_exterior_skeleton, build_interior_skeleton, offset_polygons, OffsetSide, Skeleton,
    SkeletonConfig, SkeletonInfo, SkeletonManager,
};
pub use tolerance::{
    bisector, line_intersection, orient2d, LineIntersection, Orientation, SegmentIntersection,
};
