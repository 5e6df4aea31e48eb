//! Geometric predicates with explicit tolerance.

use crate::primitives::{Point2, Segment2};
use num_traits::Float;

/// Result of an orientation test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Points are counter-clockwise (`c` left of `a -> b`).
    CounterClockwise,
    /// Points are clockwise (`c` right of `a -> b`).
    Clockwise,
    /// Points are collinear (within tolerance).
    Collinear,
}

/// Computes the orientation of three points with tolerance.
///
/// The test is based on twice the signed area of the triangle `a, b, c`. If
/// its absolute value is at most `eps`, the points are collinear.
#[inline]
pub fn orient2d<F: Float>(a: Point2<F>, b: Point2<F>, c: Point2<F>, eps: F) -> Orientation {
    let cross = (b - a).cross(c - a);

    if cross > eps {
        Orientation::CounterClockwise
    } else if cross < -eps {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// Checks if a point lies within distance `eps` of a segment.
#[inline]
pub fn point_on_segment<F: Float>(p: Point2<F>, segment: Segment2<F>, eps: F) -> bool {
    segment.distance_squared_to_point(p) <= eps * eps
}

/// Result of a segment intersection test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentIntersection<F> {
    /// Segments do not intersect.
    None,
    /// Segments meet at a single point.
    Point {
        point: Point2<F>,
        /// Parameter along the first segment (0 = start, 1 = end).
        t1: F,
        /// Parameter along the second segment (0 = start, 1 = end).
        t2: F,
    },
    /// Segments are collinear and share a stretch of positive length.
    Overlapping,
}

/// Tests if two line segments intersect, with tolerance.
///
/// `eps` is used both as the collinearity threshold and as the slack on the
/// segment parameters, so touching endpoints count as an intersection.
pub fn segments_intersect<F: Float>(
    s1: Segment2<F>,
    s2: Segment2<F>,
    eps: F,
) -> SegmentIntersection<F> {
    let d1 = s1.direction();
    let d2 = s2.direction();
    let cross = d1.cross(d2);
    let delta = s2.start - s1.start;

    if cross.abs() <= eps {
        // Parallel: only collinear segments can meet.
        if s1.distance_squared_to_point(s2.start) > eps * eps
            && s1.distance_squared_to_point(s2.end) > eps * eps
            && s2.distance_squared_to_point(s1.start) > eps * eps
        {
            return SegmentIntersection::None;
        }

        let len_sq = d1.magnitude_squared();
        if len_sq <= eps * eps {
            return if point_on_segment(s1.start, s2, eps) {
                SegmentIntersection::Point {
                    point: s1.start,
                    t1: F::zero(),
                    t2: s2.closest_point(s1.start).1,
                }
            } else {
                SegmentIntersection::None
            };
        }

        let a = delta.dot(d1) / len_sq;
        let b = (s2.end - s1.start).dot(d1) / len_sq;
        let lo = a.min(b).max(F::zero());
        let hi = a.max(b).min(F::one());
        let slack = eps / len_sq.sqrt();

        if lo > hi + slack {
            return SegmentIntersection::None;
        }
        if hi - lo <= slack {
            let point = s1.point_at(lo);
            return SegmentIntersection::Point {
                point,
                t1: lo,
                t2: s2.closest_point(point).1,
            };
        }
        return SegmentIntersection::Overlapping;
    }

    // s1.start + t1 * d1 = s2.start + t2 * d2
    let t1 = delta.cross(d2) / cross;
    let t2 = delta.cross(d1) / cross;

    let low = -eps;
    let high = F::one() + eps;
    if t1 >= low && t1 <= high && t2 >= low && t2 <= high {
        let t1 = t1.max(F::zero()).min(F::one());
        SegmentIntersection::Point {
            point: s1.point_at(t1),
            t1,
            t2: t2.max(F::zero()).min(F::one()),
        }
    } else {
        SegmentIntersection::None
    }
}
