//! 2D infinite line type.

use super::{Point2, Vec2};
use num_traits::Float;

/// A 2D infinite line defined by a point and direction.
///
/// Wavefront edges are represented as lines through a contour edge that are
/// translated along their left normal as time advances.
///
/// # Example
///
/// ```
/// use strata::primitives::{Line2, Point2, Vec2};
///
/// // Horizontal line through y=1, running in +x
/// let line: Line2<f64> = Line2::new(Point2::new(0.0, 1.0), Vec2::new(1.0, 0.0));
/// assert_eq!(line.signed_distance(Point2::new(5.0, 3.0)), 2.0);
/// assert_eq!(line.signed_distance(Point2::new(5.0, -1.0)), -2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line2<F> {
    /// A point on the line
    pub origin: Point2<F>,
    /// Direction vector of the line (not necessarily normalized)
    pub direction: Vec2<F>,
}

impl<F: Float> Line2<F> {
    #[inline]
    pub fn new(origin: Point2<F>, direction: Vec2<F>) -> Self {
        Self { origin, direction }
    }

    /// Creates a line passing through two points, directed from `p1` to `p2`.
    #[inline]
    pub fn from_points(p1: Point2<F>, p2: Point2<F>) -> Self {
        Self {
            origin: p1,
            direction: p2 - p1,
        }
    }

    /// Returns the unit normal pointing to the left of the direction.
    ///
    /// Returns `None` for a degenerate (zero) direction.
    #[inline]
    pub fn unit_normal(&self) -> Option<Vec2<F>> {
        self.direction.perpendicular().normalize()
    }

    /// Returns the point on the line at parameter t.
    #[inline]
    pub fn point_at(&self, t: F) -> Point2<F> {
        self.origin + self.direction * t
    }

    /// Returns the signed distance from a point to the line.
    ///
    /// Positive on the left of the direction, negative on the right.
    pub fn signed_distance(&self, point: Point2<F>) -> F {
        let len = self.direction.magnitude();
        if len < F::epsilon() {
            return point.distance(self.origin);
        }
        self.direction.cross(point - self.origin) / len
    }
}
