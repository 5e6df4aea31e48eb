//! 2D ray type.

use super::{Point2, Vec2};
use num_traits::Float;

/// A 2D ray defined by an origin point and direction.
///
/// The direction is stored as-is (not necessarily normalized). Bisector rays
/// of wavefront vertices use the vertex velocity as direction, so
/// `point_at(t)` is the vertex position `t` time units after its birth.
///
/// # Example
///
/// ```
/// use strata::primitives::{Point2, Ray2, Vec2};
///
/// let ray: Ray2<f64> = Ray2::new(Point2::origin(), Vec2::new(1.0, 1.0));
/// assert_eq!(ray.point_at(2.0), Point2::new(2.0, 2.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray2<F> {
    /// Origin point of the ray
    pub origin: Point2<F>,
    /// Direction vector (not necessarily normalized)
    pub direction: Vec2<F>,
}

impl<F: Float> Ray2<F> {
    #[inline]
    pub fn new(origin: Point2<F>, direction: Vec2<F>) -> Self {
        Self { origin, direction }
    }

    /// Returns the point along the ray at parameter t.
    #[inline]
    pub fn point_at(&self, t: F) -> Point2<F> {
        self.origin + self.direction * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_at() {
        let ray: Ray2<f64> = Ray2::new(Point2::new(1.0, 2.0), Vec2::new(2.0, 0.0));
        assert_eq!(ray.point_at(0.0), Point2::new(1.0, 2.0));
        assert_eq!(ray.point_at(1.5), Point2::new(4.0, 2.0));
    }
}
