//! Polygon type, measurements and input validation.
//!
//! # Example
//!
//! ```
//! use strata::polygon::Polygon;
//!
//! let square: Polygon<f64> = Polygon::from_coords(&[
//!     (0.0, 0.0),
//!     (2.0, 0.0),
//!     (2.0, 2.0),
//!     (0.0, 2.0),
//! ]);
//! assert_eq!(square.area(), 4.0);
//! ```

mod core;
mod validate;

pub use self::core::{polygon_area, polygon_contains, polygon_signed_area, Polygon};
pub use validate::{
    find_self_intersections, has_self_intersection, validate_simple_polygon, SelfIntersection,
};
