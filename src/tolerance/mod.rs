//! Epsilon-aware geometric predicates and constructions.
//!
//! All functions in this module take explicit tolerance parameters.
//! No hidden epsilons are used.

mod lines;
mod predicates;

pub use lines::{bisector, is_parallel, line_intersection, LineIntersection};
pub use predicates::{
    orient2d, point_on_segment, segments_intersect, Orientation, SegmentIntersection,
};
