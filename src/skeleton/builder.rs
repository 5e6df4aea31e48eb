//! The event simulation that turns a polygon into its straight skeleton.

use super::config::SkeletonConfig;
use super::event::EventKind;
use super::graph::Skeleton;
use super::wavefront::Wavefront;
use super::{OffsetSide, PropagationMode};
use crate::error::{as_f64, Result, SkeletonError};
use crate::polygon::{validate_simple_polygon, Polygon};
use num_traits::Float;
use tracing::{debug, trace, warn};

fn fail(time: f64, reason: impl Into<String>) -> SkeletonError {
    let reason = reason.into();
    warn!(time, reason = %reason, "straight skeleton construction failed");
    SkeletonError::degenerate(time, reason)
}

/// Builds the interior straight skeleton of a simple polygon.
///
/// The polygon may be given in either winding order.
///
/// # Errors
///
/// [`SkeletonError::InvalidInput`] if the polygon is not simple, and
/// [`SkeletonError::DegenerateConstruction`] if the simulation cannot be
/// completed.
///
/// # Example
///
/// ```
/// use strata::polygon::Polygon;
/// use strata::skeleton::build_interior_skeleton;
///
/// let square: Polygon<f64> = Polygon::from_coords(&[
///     (-1.0, -1.0),
///     (1.0, -1.0),
///     (1.0, 1.0),
///     (-1.0, 1.0),
/// ]);
/// let skeleton = build_interior_skeleton(&square).unwrap();
/// assert_eq!(skeleton.edges().len(), 4);
/// assert_eq!(skeleton.max_time(), 1.0);
/// ```
pub fn build_interior_skeleton<F: Float>(polygon: &Polygon<F>) -> Result<Skeleton<F>> {
    build_skeleton(polygon, PropagationMode::Interior, &SkeletonConfig::default())
}

/// Builds the interior straight skeleton with explicit tolerances.
pub fn build_interior_skeleton_with_config<F: Float>(
    polygon: &Polygon<F>,
    config: &SkeletonConfig<F>,
) -> Result<Skeleton<F>> {
    build_skeleton(polygon, PropagationMode::Interior, config)
}

/// Builds the exterior straight skeleton of a simple polygon, propagated out
/// to `max_distance`.
///
/// Wavefront vertices still alive at `max_distance` end in
/// [`VertexKind::Frozen`](super::VertexKind::Frozen) vertices joined by border
/// edges.
///
/// # Errors
///
/// As [`build_interior_skeleton`], plus [`SkeletonError::InvalidInput`] when
/// `max_distance` is not a positive finite number.
pub fn build_exterior_skeleton<F: Float>(polygon: &Polygon<F>, max_distance: F) -> Result<Skeleton<F>> {
    build_skeleton(
        polygon,
        PropagationMode::Exterior { max_distance },
        &SkeletonConfig::default(),
    )
}

/// Builds the exterior straight skeleton with explicit tolerances.
pub fn build_exterior_skeleton_with_config<F: Float>(
    polygon: &Polygon<F>,
    max_distance: F,
    config: &SkeletonConfig<F>,
) -> Result<Skeleton<F>> {
    build_skeleton(polygon, PropagationMode::Exterior { max_distance }, config)
}

/// Builds a skeleton in the given propagation mode.
pub fn build_skeleton<F: Float>(
    polygon: &Polygon<F>,
    mode: PropagationMode<F>,
    config: &SkeletonConfig<F>,
) -> Result<Skeleton<F>> {
    let eps = config.scaled_epsilon(polygon.bounding_diagonal());
    let ccw = validate_simple_polygon(polygon, eps, config.parallel_tolerance)?;

    let side = mode.side();
    let (simulated, horizon) = match mode {
        PropagationMode::Interior => (ccw, F::infinity()),
        PropagationMode::Exterior { max_distance } => {
            if !max_distance.is_finite() || max_distance <= F::zero() {
                return Err(SkeletonError::invalid(format!(
                    "exterior bound must be positive and finite, got {}",
                    as_f64(max_distance)
                )));
            }
            // Reversed, the outside of the polygon lies on the left of every edge.
            (ccw.reversed(), max_distance)
        }
    };

    let n = simulated.len();
    debug!(vertices = n, side = ?side, horizon = as_f64(horizon), "building straight skeleton");

    let mut wavefront = Wavefront::new(&simulated, horizon, eps, config.parallel_tolerance)?;
    trace!(pending = wavefront.pending_events(), "initial events predicted");
    let budget = config.event_budget(n);
    let mut applied = 0usize;
    let mut stale = 0usize;

    while let Some(event) = wavefront.pop_event() {
        if !wavefront.is_current(&event) {
            stale += 1;
            trace!(time = as_f64(event.time), kind = ?event.kind, "discarding stale event");
            continue;
        }
        if event.time < wavefront.now() - eps {
            return Err(fail(as_f64(event.time), "event time runs backwards"));
        }
        applied += 1;
        if applied > budget {
            return Err(fail(
                as_f64(event.time),
                format!("event budget of {} exhausted", budget),
            ));
        }

        match event.kind {
            EventKind::EdgeCollapse { vertex } => {
                let collapsed = wavefront
                    .apply_edge_collapse(vertex, event.time)
                    .map_err(|e| {
                        warn!(error = %e, "edge collapse failed");
                        e
                    })?;
                if collapsed {
                    debug!(time = as_f64(event.time), vertex, "applied edge collapse");
                } else {
                    trace!(time = as_f64(event.time), vertex, "collapsing fragment already retired");
                }
            }
            EventKind::VertexSplit { vertex, edge } => {
                let split = wavefront
                    .apply_vertex_split(vertex, edge, event.time)
                    .map_err(|e| {
                        warn!(error = %e, "vertex split failed");
                        e
                    })?;
                if split {
                    debug!(time = as_f64(event.time), vertex, edge, "applied vertex split");
                } else {
                    trace!(time = as_f64(event.time), vertex, edge, "split target not on the wavefront");
                }
            }
        }
    }

    let max_distance = match side {
        OffsetSide::Interior => {
            if wavefront.active_count() > 0 {
                return Err(fail(
                    as_f64(wavefront.now()),
                    format!(
                        "{} wavefront vertices left with no pending events",
                        wavefront.active_count()
                    ),
                ));
            }
            None
        }
        OffsetSide::Exterior => {
            wavefront.freeze(horizon);
            Some(horizon)
        }
    };

    let skeleton = wavefront.into_skeleton(side, max_distance);
    debug!(
        nodes = skeleton.skeleton_vertices().len(),
        arcs = skeleton.edges().len(),
        applied,
        stale,
        max_time = as_f64(skeleton.max_time()),
        "straight skeleton built"
    );
    Ok(skeleton)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::Point2;
    use crate::skeleton::VertexKind;
    use approx::assert_relative_eq;

    fn nodes(skeleton: &Skeleton<f64>) -> Vec<Point2<f64>> {
        let mut nodes: Vec<Point2<f64>> = skeleton
            .skeleton_vertices()
            .iter()
            .filter(|v| v.kind == VertexKind::Node)
            .map(|v| v.point)
            .collect();
        nodes.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap().then(a.y.partial_cmp(&b.y).unwrap()));
        nodes
    }

    fn assert_point(p: Point2<f64>, x: f64, y: f64) {
        assert_relative_eq!(p.x, x, epsilon = 1e-9);
        assert_relative_eq!(p.y, y, epsilon = 1e-9);
    }

    #[test]
    fn test_square_has_single_center_node() {
        let square = Polygon::from_coords(&[(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)]);
        let skeleton = build_interior_skeleton(&square).unwrap();
        let nodes = nodes(&skeleton);
        assert_eq!(nodes.len(), 1);
        assert_point(nodes[0], 0.0, 0.0);
        assert_eq!(skeleton.edges().len(), 4);
        assert_relative_eq!(skeleton.max_time(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_triangle_meets_at_incenter() {
        // 3-4-5 right triangle: inradius 1, incenter (1, 1).
        let tri = Polygon::from_coords(&[(0.0, 0.0), (4.0, 0.0), (0.0, 3.0)]);
        let skeleton = build_interior_skeleton(&tri).unwrap();
        let nodes = nodes(&skeleton);
        assert_eq!(nodes.len(), 1);
        assert_point(nodes[0], 1.0, 1.0);
        assert_eq!(skeleton.edges().len(), 3);
        assert_relative_eq!(skeleton.max_time(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_clockwise_input_gives_same_skeleton() {
        let ccw = Polygon::from_coords(&[(0.0, 0.0), (4.0, 0.0), (0.0, 3.0)]);
        let a = build_interior_skeleton(&ccw).unwrap();
        let b = build_interior_skeleton(&ccw.reversed()).unwrap();
        assert_eq!(a.edges().len(), b.edges().len());
        assert_point(nodes(&b)[0], 1.0, 1.0);
    }

    #[test]
    fn test_rectangle_has_two_nodes() {
        let rect = Polygon::from_coords(&[(0.0, 0.0), (4.0, 0.0), (4.0, 2.0), (0.0, 2.0)]);
        let skeleton = build_interior_skeleton(&rect).unwrap();
        let nodes = nodes(&skeleton);
        assert_eq!(nodes.len(), 2);
        assert_point(nodes[0], 1.0, 1.0);
        assert_point(nodes[1], 3.0, 1.0);
        // Four corner arcs and the ridge.
        assert_eq!(skeleton.edges().len(), 5);
    }

    #[test]
    fn test_l_shape_nodes() {
        let l_shape = Polygon::from_coords(&[
            (0.0, 0.0),
            (2.0, 0.0),
            (2.0, 1.0),
            (1.0, 1.0),
            (1.0, 2.0),
            (0.0, 2.0),
        ]);
        let skeleton = build_interior_skeleton(&l_shape).unwrap();
        let nodes = nodes(&skeleton);
        assert_eq!(nodes.len(), 3);
        assert_point(nodes[0], 0.5, 0.5);
        assert_point(nodes[1], 0.5, 1.5);
        assert_point(nodes[2], 1.5, 0.5);
        assert_relative_eq!(skeleton.max_time(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_notch_splits_the_wavefront() {
        let notched = Polygon::from_coords(&[
            (0.0, 0.0),
            (6.0, 0.0),
            (6.0, 2.0),
            (3.5, 2.0),
            (3.0, 1.0),
            (2.5, 2.0),
            (0.0, 2.0),
        ]);
        let skeleton = build_interior_skeleton(&notched).unwrap();
        // The notch tip moves straight down and meets the rising bottom edge.
        let split_time = 1.0 / (1.0 + 5f64.sqrt());
        assert!(skeleton.skeleton_vertices().iter().any(|v| {
            v.kind == VertexKind::Node
                && (v.point.x - 3.0).abs() < 1e-9
                && (v.point.y - split_time).abs() < 1e-9
        }));
    }

    fn assert_endpoints_cover_vertices(skeleton: &Skeleton<f64>) {
        let endpoints: Vec<Point2<f64>> = skeleton
            .edges()
            .into_iter()
            .flat_map(|(a, b)| [a, b])
            .collect();
        for v in skeleton.vertices() {
            assert!(endpoints.contains(&v), "orphan vertex {:?}", v);
        }
        for p in &endpoints {
            assert!(skeleton.vertices().contains(p));
        }
    }

    #[test]
    fn test_edge_endpoints_cover_all_vertices() {
        let l_shape = Polygon::from_coords(&[
            (0.0, 0.0),
            (2.0, 0.0),
            (2.0, 1.0),
            (1.0, 1.0),
            (1.0, 2.0),
            (0.0, 2.0),
        ]);
        assert_endpoints_cover_vertices(&build_interior_skeleton(&l_shape).unwrap());
        assert_endpoints_cover_vertices(&build_exterior_skeleton(&l_shape, 1.5).unwrap());
    }

    #[test]
    fn test_exterior_edge_endpoints_cover_frozen_vertices() {
        // The pocket above the notch closes before the bound.
        let notched = Polygon::from_coords(&[
            (0.0, 0.0),
            (6.0, 0.0),
            (6.0, 2.0),
            (3.5, 2.0),
            (3.0, 1.0),
            (2.5, 2.0),
            (0.0, 2.0),
        ]);
        let skeleton = build_exterior_skeleton(&notched, 2.0).unwrap();
        let frozen = skeleton
            .skeleton_vertices()
            .iter()
            .filter(|v| v.kind == VertexKind::Frozen)
            .count();
        assert!(frozen > 0);
        assert_endpoints_cover_vertices(&skeleton);
    }

    #[test]
    fn test_edges_run_forward_in_time() {
        let rect = Polygon::from_coords(&[(0.0, 0.0), (4.0, 0.0), (4.0, 2.0), (0.0, 2.0)]);
        let skeleton = build_interior_skeleton(&rect).unwrap();
        let vertices = skeleton.skeleton_vertices();
        for arc in skeleton.arcs() {
            assert!(vertices[arc.origin].time <= vertices[arc.target].time);
            assert!(arc.left_face.is_some() && arc.right_face.is_some());
        }
    }

    #[test]
    fn test_exterior_square_freezes_at_bound() {
        let square = Polygon::from_coords(&[(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)]);
        let skeleton = build_exterior_skeleton(&square, 5.0).unwrap();
        assert_eq!(skeleton.side(), OffsetSide::Exterior);
        assert_eq!(skeleton.max_distance(), Some(5.0));
        assert_relative_eq!(skeleton.max_time(), 5.0);

        let frozen: Vec<Point2<f64>> = skeleton
            .skeleton_vertices()
            .iter()
            .filter(|v| v.kind == VertexKind::Frozen)
            .map(|v| v.point)
            .collect();
        assert_eq!(frozen.len(), 4);
        for p in frozen {
            assert_relative_eq!(p.x.abs(), 6.0, epsilon = 1e-9);
            assert_relative_eq!(p.y.abs(), 6.0, epsilon = 1e-9);
        }
        assert_eq!(skeleton.edges().len(), 4);
    }

    #[test]
    fn test_exterior_bound_must_be_positive() {
        let square = Polygon::from_coords(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        for bound in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                build_exterior_skeleton(&square, bound),
                Err(SkeletonError::InvalidInput { .. })
            ));
        }
    }

    #[test]
    fn test_invalid_input_is_rejected() {
        let two = Polygon::from_coords(&[(0.0, 0.0), (1.0, 0.0)]);
        assert!(matches!(
            build_interior_skeleton(&two),
            Err(SkeletonError::InvalidInput { .. })
        ));
        let bow = Polygon::from_coords(&[(0.0, 0.0), (3.0, 3.0), (3.0, 0.0), (0.0, 2.0)]);
        assert!(matches!(
            build_interior_skeleton(&bow),
            Err(SkeletonError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_event_budget_exhaustion_is_degenerate() {
        // Convex parabolic cup: every collapse removes at most a couple of
        // vertices, so it needs well over 64 events.
        let coords: Vec<(f64, f64)> = (0..=200)
            .map(|i| {
                let x = i as f64;
                (x, (x - 100.0) * (x - 100.0) / 100.0)
            })
            .collect();
        let cup = Polygon::from_coords(&coords);

        let starved = SkeletonConfig {
            max_events_factor: 0,
            ..SkeletonConfig::default()
        };
        assert!(matches!(
            build_interior_skeleton_with_config(&cup, &starved),
            Err(SkeletonError::DegenerateConstruction { .. })
        ));

        // The constant part of the budget is enough for a rectangle.
        let rect = Polygon::from_coords(&[(0.0, 0.0), (4.0, 0.0), (4.0, 2.0), (0.0, 2.0)]);
        assert!(build_interior_skeleton_with_config(&rect, &starved).is_ok());
    }

    #[test]
    fn test_deterministic_output() {
        let notched = Polygon::from_coords(&[
            (0.0, 0.0),
            (6.0, 0.0),
            (6.0, 2.0),
            (3.5, 2.0),
            (3.0, 1.0),
            (2.5, 2.0),
            (0.0, 2.0),
        ]);
        let a = build_interior_skeleton(&notched).unwrap();
        let b = build_interior_skeleton(&notched).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_f32_square() {
        let square: Polygon<f32> =
            Polygon::from_coords(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
        let skeleton = build_interior_skeleton(&square).unwrap();
        assert_eq!(skeleton.edges().len(), 4);
        assert!((skeleton.max_time() - 1.0).abs() < 1e-5);
    }
}
