//! Validation of polygons handed to the skeleton builder.
//!
//! The wavefront simulation assumes a simple polygon. Everything that can be
//! checked cheaply up front is checked here, so the builder only has to deal
//! with numerical degeneracies that appear during propagation.
//!
//! # Example
//!
//! ```
//! use strata::polygon::{has_self_intersection, Polygon};
//!
//! let figure8: Polygon<f64> = Polygon::from_coords(&[
//!     (0.0, 0.0),
//!     (2.0, 2.0),
//!     (2.0, 0.0),
//!     (0.0, 2.0),
//! ]);
//! assert!(has_self_intersection(&figure8, 1e-9));
//! ```

use super::core::Polygon;
use crate::error::{Result, SkeletonError};
use crate::primitives::{Point2, Segment2};
use crate::tolerance::{segments_intersect, SegmentIntersection};
use num_traits::Float;

/// A crossing or touching between two non-adjacent polygon edges.
#[derive(Debug, Clone, PartialEq)]
pub struct SelfIntersection<F> {
    /// Index of the first edge (edge `i` runs from vertex `i` to `i + 1`).
    pub edge1: usize,
    /// Index of the second edge.
    pub edge2: usize,
    /// A point shared by both edges, if they meet in a single point.
    pub point: Option<Point2<F>>,
}

fn edge<F: Float>(vertices: &[Point2<F>], i: usize) -> Segment2<F> {
    Segment2::new(vertices[i], vertices[(i + 1) % vertices.len()])
}

/// Finds all pairs of non-adjacent edges that touch or cross.
///
/// Quadratic in the vertex count.
pub fn find_self_intersections<F: Float>(polygon: &Polygon<F>, eps: F) -> Vec<SelfIntersection<F>> {
    let vertices = &polygon.vertices;
    let n = vertices.len();
    let mut found = Vec::new();

    if n < 4 {
        return found;
    }

    for i in 0..n {
        for j in (i + 2)..n {
            // Edge n-1 is adjacent to edge 0.
            if i == 0 && j == n - 1 {
                continue;
            }
            match segments_intersect(edge(vertices, i), edge(vertices, j), eps) {
                SegmentIntersection::None => {}
                SegmentIntersection::Point { point, .. } => found.push(SelfIntersection {
                    edge1: i,
                    edge2: j,
                    point: Some(point),
                }),
                SegmentIntersection::Overlapping => found.push(SelfIntersection {
                    edge1: i,
                    edge2: j,
                    point: None,
                }),
            }
        }
    }

    found
}

/// Checks if a polygon has any touching or crossing non-adjacent edges.
pub fn has_self_intersection<F: Float>(polygon: &Polygon<F>, eps: F) -> bool {
    !find_self_intersections(polygon, eps).is_empty()
}

/// Validates a polygon for skeleton construction and returns it in CCW order.
///
/// `eps` is an absolute distance tolerance. `parallel_tolerance` (radians)
/// decides when two consecutive edges fold back onto each other.
///
/// # Errors
///
/// [`SkeletonError::InvalidInput`] when the polygon has fewer than three
/// vertices, non-finite coordinates, repeated consecutive vertices, zero area,
/// a zero-angle spike or a self-intersection.
pub fn validate_simple_polygon<F: Float>(
    polygon: &Polygon<F>,
    eps: F,
    parallel_tolerance: F,
) -> Result<Polygon<F>> {
    let n = polygon.len();
    if n < 3 {
        return Err(SkeletonError::invalid(format!(
            "a polygon needs at least 3 vertices, got {}",
            n
        )));
    }

    if let Some(i) = polygon.vertices.iter().position(|p| !p.is_finite()) {
        return Err(SkeletonError::invalid(format!(
            "vertex {} has a non-finite coordinate",
            i
        )));
    }

    for i in 0..n {
        let j = (i + 1) % n;
        if polygon.vertices[i].distance(polygon.vertices[j]) <= eps {
            return Err(SkeletonError::invalid(format!(
                "vertices {} and {} coincide",
                i, j
            )));
        }
    }

    let diagonal = polygon.bounding_diagonal();
    if polygon.area() <= eps * diagonal {
        return Err(SkeletonError::invalid("polygon has zero area"));
    }

    let sin_tol = parallel_tolerance.sin();
    for i in 0..n {
        let prev = polygon.vertices[(i + n - 1) % n];
        let curr = polygon.vertices[i];
        let next = polygon.vertices[(i + 1) % n];
        if let (Some(d_in), Some(d_out)) = ((curr - prev).normalize(), (next - curr).normalize()) {
            if d_in.cross(d_out).abs() <= sin_tol && d_in.dot(d_out) < F::zero() {
                return Err(SkeletonError::invalid(format!(
                    "vertex {} is a zero-angle spike",
                    i
                )));
            }
        }
    }

    if let Some(hit) = find_self_intersections(polygon, eps).first() {
        return Err(SkeletonError::invalid(format!(
            "edges {} and {} intersect",
            hit.edge1, hit.edge2
        )));
    }

    let mut ccw = polygon.clone();
    ccw.ensure_ccw();
    Ok(ccw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invalid_reason(result: Result<Polygon<f64>>) -> String {
        match result {
            Err(SkeletonError::InvalidInput { reason }) => reason,
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_square_passes() {
        let sq: Polygon<f64> = Polygon::from_coords(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        let out = validate_simple_polygon(&sq, 1e-9, 1e-9).unwrap();
        assert_eq!(out, sq);
    }

    #[test]
    fn test_clockwise_is_reoriented() {
        let cw: Polygon<f64> = Polygon::from_coords(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
        let out = validate_simple_polygon(&cw, 1e-9, 1e-9).unwrap();
        assert!(out.signed_area() > 0.0);
    }

    #[test]
    fn test_too_few_vertices() {
        let two: Polygon<f64> = Polygon::from_coords(&[(0.0, 0.0), (1.0, 0.0)]);
        assert!(invalid_reason(validate_simple_polygon(&two, 1e-9, 1e-9)).contains("at least 3"));
    }

    #[test]
    fn test_non_finite_coordinate() {
        let bad: Polygon<f64> = Polygon::from_coords(&[(0.0, 0.0), (f64::NAN, 0.0), (0.0, 1.0)]);
        assert!(invalid_reason(validate_simple_polygon(&bad, 1e-9, 1e-9)).contains("non-finite"));
    }

    #[test]
    fn test_repeated_vertex() {
        let bad: Polygon<f64> =
            Polygon::from_coords(&[(0.0, 0.0), (1.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
        assert!(invalid_reason(validate_simple_polygon(&bad, 1e-9, 1e-9)).contains("coincide"));
    }

    #[test]
    fn test_collinear_points_have_zero_area() {
        let flat: Polygon<f64> = Polygon::from_coords(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        assert!(invalid_reason(validate_simple_polygon(&flat, 1e-9, 1e-9)).contains("zero area"));
    }

    #[test]
    fn test_spike_rejected() {
        let spike: Polygon<f64> = Polygon::from_coords(&[
            (0.0, 0.0),
            (2.0, 0.0),
            (2.0, 2.0),
            (1.0, 2.0),
            (1.0, 3.0),
            (1.0, 2.0),
            (0.0, 2.0),
        ]);
        let reason = invalid_reason(validate_simple_polygon(&spike, 1e-9, 1e-9));
        assert!(reason.contains("spike") || reason.contains("intersect"));
    }

    #[test]
    fn test_bow_tie_rejected() {
        // Lopsided so that the signed area does not cancel out.
        let bow: Polygon<f64> = Polygon::from_coords(&[(0.0, 0.0), (3.0, 3.0), (3.0, 0.0), (0.0, 2.0)]);
        assert!(invalid_reason(validate_simple_polygon(&bow, 1e-9, 1e-9)).contains("intersect"));
        let found = find_self_intersections(&bow, 1e-9);
        assert_eq!(found.len(), 1);
        assert_eq!((found[0].edge1, found[0].edge2), (0, 2));
    }

    #[test]
    fn test_simple_concave_polygon_has_no_intersections() {
        let l_shape: Polygon<f64> = Polygon::from_coords(&[
            (0.0, 0.0),
            (2.0, 0.0),
            (2.0, 1.0),
            (1.0, 1.0),
            (1.0, 2.0),
            (0.0, 2.0),
        ]);
        assert!(!has_self_intersection(&l_shape, 1e-9));
    }
}
