//! Offset polygons read off a finished skeleton.
//!
//! Every wavefront vertex traces a straight arc through space-time, so the
//! wavefront at distance `d` is recovered by interpolating each arc alive at
//! `d` and chaining the resulting points edge by edge. No simulation is
//! re-run.

use super::graph::{Skeleton, VertexKind};
use super::OffsetSide;
use crate::error::{as_f64, Result, SkeletonError};
use crate::polygon::Polygon;
use crate::primitives::{Point2, Vec2};
use num_traits::Float;
use std::cmp::Ordering;

/// Where a skeleton arc crosses the offset distance.
#[derive(Debug, Clone, Copy)]
struct Crossing<F> {
    point: Point2<F>,
    velocity: Vec2<F>,
    incoming: usize,
    outgoing: usize,
}

/// Computes the offset of the skeleton's polygon at `distance`.
///
/// Interior results shrink to nothing as `distance` approaches the
/// skeleton's [`max_time`](Skeleton::max_time); beyond it the result is empty.
/// Exterior results are available up to the bound the skeleton was built
/// with, the outer ring counter-clockwise and enclosed pockets clockwise.
/// A distance of zero gives an empty result.
///
/// # Errors
///
/// - [`SkeletonError::SideMismatch`] if `side` is not the side the skeleton
///   was built for.
/// - [`SkeletonError::DistanceOutOfRange`] for negative or non-finite
///   distances, and for exterior distances beyond the bound.
/// - [`SkeletonError::DegenerateConstruction`] if the arcs at `distance` do
///   not chain into closed rings.
///
/// # Example
///
/// ```
/// use strata::polygon::Polygon;
/// use strata::skeleton::{build_interior_skeleton, offset_polygons, OffsetSide};
///
/// let square: Polygon<f64> = Polygon::from_coords(&[
///     (0.0, 0.0),
///     (4.0, 0.0),
///     (4.0, 4.0),
///     (0.0, 4.0),
/// ]);
/// let skeleton = build_interior_skeleton(&square).unwrap();
/// let rings = offset_polygons(&skeleton, 1.0, OffsetSide::Interior).unwrap();
/// assert_eq!(rings.len(), 1);
/// assert!((rings[0].area() - 4.0).abs() < 1e-9);
/// ```
pub fn offset_polygons<F: Float>(
    skeleton: &Skeleton<F>,
    distance: F,
    side: OffsetSide,
) -> Result<Vec<Polygon<F>>> {
    if side != skeleton.side() {
        return Err(SkeletonError::SideMismatch {
            requested: side,
            built: skeleton.side(),
        });
    }

    let eps = skeleton.epsilon();
    let limit = skeleton.max_distance().unwrap_or_else(|| skeleton.max_time());
    let beyond_bound = skeleton.max_distance().is_some() && distance > limit + eps;
    if !distance.is_finite() || distance < F::zero() || beyond_bound {
        return Err(SkeletonError::DistanceOutOfRange {
            distance: as_f64(distance),
            max: as_f64(limit),
        });
    }
    if distance == F::zero() {
        return Ok(Vec::new());
    }
    // An interior wavefront is gone once it reaches the last node.
    if skeleton.max_distance().is_none() && distance >= limit - eps {
        return Ok(Vec::new());
    }
    let distance = match skeleton.max_distance() {
        Some(bound) => distance.min(bound),
        None => distance,
    };

    let crossings = crossings_at(skeleton, distance);
    let mut by_incoming = vec![Vec::new(); skeleton.contour_len()];
    for (k, c) in crossings.iter().enumerate() {
        by_incoming[c.incoming].push(k);
    }

    let mut visited = vec![false; crossings.len()];
    let mut rings = Vec::new();
    for start in 0..crossings.len() {
        if visited[start] {
            continue;
        }
        let mut ring = Vec::new();
        let mut k = start;
        loop {
            if visited[k] {
                return Err(unclosed(distance));
            }
            visited[k] = true;
            ring.push(crossings[k].point);
            k = successor(skeleton, &crossings, &by_incoming, k, eps)
                .ok_or_else(|| unclosed(distance))?;
            if k == start {
                break;
            }
        }

        let mut ring = dedup_ring(ring, eps);
        if ring.len() < 3 {
            continue;
        }
        if side == OffsetSide::Exterior {
            ring.reverse();
        }
        rings.push(Polygon::new(ring));
    }

    Ok(rings)
}

fn unclosed<F: Float>(distance: F) -> SkeletonError {
    SkeletonError::degenerate(as_f64(distance), "offset ring does not close")
}

/// Interpolates every arc alive at `distance`. Arcs are half-open in time,
/// except that arcs ending at a frozen vertex include their end.
fn crossings_at<F: Float>(skeleton: &Skeleton<F>, distance: F) -> Vec<Crossing<F>> {
    let vertices = skeleton.skeleton_vertices();
    skeleton
        .arcs()
        .filter_map(|arc| {
            let (start, end) = (&vertices[arc.origin], &vertices[arc.target]);
            let span = end.time - start.time;
            if span <= F::zero() || distance < start.time || distance > end.time {
                return None;
            }
            if distance == end.time && end.kind != VertexKind::Frozen {
                return None;
            }
            let s = (distance - start.time) / span;
            Some(Crossing {
                point: start.point.lerp(end.point, s),
                velocity: (end.point - start.point) / span,
                incoming: arc.left_face?,
                outgoing: arc.right_face?,
            })
        })
        .collect()
}

/// Position along `direction` first, then speed along it.
fn order_along<F: Float>(a: (F, F), b: (F, F), eps: F) -> Ordering {
    if (a.0 - b.0).abs() <= eps {
        a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal)
    } else {
        a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal)
    }
}

/// The next crossing along the wavefront: the nearest crossing ahead of `k`
/// on the fragment of `k`'s outgoing edge.
fn successor<F: Float>(
    skeleton: &Skeleton<F>,
    crossings: &[Crossing<F>],
    by_incoming: &[Vec<usize>],
    k: usize,
    eps: F,
) -> Option<usize> {
    let edge = crossings[k].outgoing;
    let direction = skeleton.contour_edge(edge)?.direction;
    let key = |i: usize| {
        (
            crossings[i].point.to_vec().dot(direction),
            crossings[i].velocity.dot(direction),
        )
    };
    let here = key(k);
    by_incoming
        .get(edge)?
        .iter()
        .copied()
        .filter(|&i| i != k && order_along(key(i), here, eps) == Ordering::Greater)
        .min_by(|&i, &j| order_along(key(i), key(j), eps))
}

/// Drops consecutive points closer than `eps`, the closing pair included.
fn dedup_ring<F: Float>(ring: Vec<Point2<F>>, eps: F) -> Vec<Point2<F>> {
    let mut out: Vec<Point2<F>> = Vec::with_capacity(ring.len());
    for p in ring {
        if out.last().map_or(true, |last| last.distance(p) > eps) {
            out.push(p);
        }
    }
    while out.len() > 1 && out[0].distance(out[out.len() - 1]) <= eps {
        out.pop();
    }
    out
}
