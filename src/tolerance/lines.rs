//! Line intersection and wavefront bisectors with an angular parallel policy.
//!
//! Two lines whose directions differ by less than `parallel_tolerance`
//! radians are treated as parallel. Parallel is an ordinary outcome here, not
//! an error: callers decide what it means for them.

use crate::primitives::{Line2, Point2, Ray2, Vec2};
use num_traits::Float;

/// Result of intersecting two infinite lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineIntersection<F> {
    /// The lines cross at a single point.
    Point {
        point: Point2<F>,
        /// Parameter along the first line.
        t1: F,
        /// Parameter along the second line.
        t2: F,
    },
    /// The lines are parallel (or coincident) within tolerance.
    Parallel,
}

/// Returns true if the two directions are within `parallel_tolerance` radians
/// of each other or of each other's opposite.
pub fn is_parallel<F: Float>(a: Vec2<F>, b: Vec2<F>, parallel_tolerance: F) -> bool {
    match (a.normalize(), b.normalize()) {
        (Some(a), Some(b)) => a.cross(b).abs() <= parallel_tolerance.sin(),
        _ => true,
    }
}

/// Intersects two infinite lines.
///
/// # Example
///
/// ```
/// use strata::primitives::{Line2, Point2};
/// use strata::tolerance::{line_intersection, LineIntersection};
///
/// let a = Line2::from_points(Point2::new(0.0, 0.0), Point2::new(2.0, 2.0));
/// let b = Line2::from_points(Point2::new(0.0, 2.0), Point2::new(2.0, 0.0));
/// match line_intersection(&a, &b, 1e-9) {
///     LineIntersection::Point { point, .. } => assert_eq!(point, Point2::new(1.0, 1.0)),
///     LineIntersection::Parallel => unreachable!(),
/// }
/// ```
pub fn line_intersection<F: Float>(
    l1: &Line2<F>,
    l2: &Line2<F>,
    parallel_tolerance: F,
) -> LineIntersection<F> {
    if is_parallel(l1.direction, l2.direction, parallel_tolerance) {
        return LineIntersection::Parallel;
    }

    let cross = l1.direction.cross(l2.direction);
    let delta = l2.origin - l1.origin;
    let t1 = delta.cross(l2.direction) / cross;
    let t2 = delta.cross(l1.direction) / cross;

    LineIntersection::Point {
        point: l1.point_at(t1),
        t1,
        t2,
    }
}

/// Computes the bisector ray of a wavefront vertex at `origin`.
///
/// `incoming` and `outgoing` are the directed supporting lines of the edges
/// entering and leaving the vertex. Both edges advance along their left
/// normal at unit speed; the returned direction `v` is the vertex velocity
/// that keeps the vertex on both moving lines (`v · n_in = v · n_out = 1`).
/// Its length is `1 / cos(θ/2)` for an interior angle change `θ`, so reflex
/// vertices of sharp notches move fast.
///
/// Returns `None` when the edges are antiparallel: the vertex then sits on a
/// spike of zero width and has no well-defined motion. Collinear edges
/// running the same way give the shared unit normal.
pub fn bisector<F: Float>(
    origin: Point2<F>,
    incoming: &Line2<F>,
    outgoing: &Line2<F>,
    parallel_tolerance: F,
) -> Option<Ray2<F>> {
    let n_in = incoming.unit_normal()?;
    let n_out = outgoing.unit_normal()?;

    let det = n_in.cross(n_out);
    if det.abs() <= parallel_tolerance.sin() {
        if n_in.dot(n_out) > F::zero() {
            let shared = (n_in + n_out).normalize()?;
            return Some(Ray2::new(origin, shared));
        }
        return None;
    }

    let velocity = Vec2::new((n_out.y - n_in.y) / det, (n_in.x - n_out.x) / det);
    if !velocity.is_finite() {
        return None;
    }
    Some(Ray2::new(origin, velocity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Line2<f64> {
        Line2::from_points(Point2::new(x1, y1), Point2::new(x2, y2))
    }

    #[test]
    fn test_line_intersection_crossing() {
        let a = line(0.0, 0.0, 4.0, 0.0);
        let b = line(1.0, -1.0, 1.0, 1.0);
        match line_intersection(&a, &b, 1e-9) {
            LineIntersection::Point { point, t1, t2 } => {
                assert_relative_eq!(point.x, 1.0, epsilon = 1e-12);
                assert_relative_eq!(point.y, 0.0, epsilon = 1e-12);
                assert_relative_eq!(t1, 0.25, epsilon = 1e-12);
                assert_relative_eq!(t2, 0.5, epsilon = 1e-12);
            }
            LineIntersection::Parallel => panic!("Expected a crossing"),
        }
    }

    #[test]
    fn test_near_parallel_lines_are_parallel() {
        let a = line(0.0, 0.0, 1.0, 0.0);
        let b = line(0.0, 1.0, 1.0, 1.0 + 1e-12);
        assert_eq!(line_intersection(&a, &b, 1e-9), LineIntersection::Parallel);
        // Outside the angular tolerance it is a crossing again.
        assert!(matches!(
            line_intersection(&a, &b, 1e-14),
            LineIntersection::Point { .. }
        ));
    }

    #[test]
    fn test_bisector_convex_corner() {
        // Bottom-left corner of a CCW square: in along -y, out along +x.
        let incoming = line(0.0, 1.0, 0.0, 0.0);
        let outgoing = line(0.0, 0.0, 1.0, 0.0);
        let ray = bisector(Point2::origin(), &incoming, &outgoing, 1e-9).unwrap();
        assert_relative_eq!(ray.direction.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(ray.direction.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_bisector_reflex_corner() {
        // Reflex corner of an L: in along -x, out along +y.
        let incoming = line(2.0, 1.0, 1.0, 1.0);
        let outgoing = line(1.0, 1.0, 1.0, 2.0);
        let ray = bisector(Point2::new(1.0, 1.0), &incoming, &outgoing, 1e-9).unwrap();
        assert_relative_eq!(ray.direction.x, -1.0, epsilon = 1e-12);
        assert_relative_eq!(ray.direction.y, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_bisector_keeps_unit_edge_speed() {
        let incoming = line(0.0, 0.0, 3.0, 1.0);
        let outgoing = line(3.0, 1.0, 1.0, 4.0);
        let ray = bisector(Point2::new(3.0, 1.0), &incoming, &outgoing, 1e-9).unwrap();
        let moved = ray.point_at(0.7);
        assert_relative_eq!(incoming.signed_distance(moved), 0.7, epsilon = 1e-12);
        assert_relative_eq!(outgoing.signed_distance(moved), 0.7, epsilon = 1e-12);
    }

    #[test]
    fn test_bisector_collinear_and_antiparallel() {
        let a = line(0.0, 0.0, 1.0, 0.0);
        let b = line(1.0, 0.0, 2.0, 0.0);
        let ray = bisector(Point2::new(1.0, 0.0), &a, &b, 1e-9).unwrap();
        assert_relative_eq!(ray.direction.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(ray.direction.y, 1.0, epsilon = 1e-12);

        let back = line(1.0, 0.0, 0.0, 0.0);
        assert!(bisector(Point2::new(1.0, 0.0), &a, &back, 1e-9).is_none());
    }
}
