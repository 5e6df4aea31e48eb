//! The finished skeleton: a half-edge graph of nodes and arcs.

use super::OffsetSide;
use crate::error::Result;
use crate::polygon::Polygon;
use crate::primitives::{Line2, Point2};
use num_traits::Float;

/// Where a skeleton vertex came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexKind {
    /// An input polygon vertex, at time zero.
    Contour,
    /// An interior node created by an event.
    Node,
    /// Position of a wavefront vertex still alive at the exterior bound.
    Frozen,
}

/// A vertex of the skeleton graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkeletonVertex<F> {
    pub point: Point2<F>,
    /// Offset distance at which the vertex appears. Zero for contour vertices.
    pub time: F,
    pub kind: VertexKind,
}

/// One direction of a skeleton edge.
///
/// Half-edges are stored in twin pairs: `2k` and `2k + 1` are opposites. For
/// arcs, the even half-edge points from the earlier node to the later one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkeletonHalfEdge {
    /// Index of the start vertex.
    pub origin: usize,
    /// Index of the end vertex.
    pub target: usize,
    /// Index of the twin half-edge.
    pub opposite: usize,
    /// True for contour edges and for the frame closing an exterior skeleton.
    pub is_border: bool,
    /// Contour edge whose face lies to the left, if any.
    pub left_face: Option<usize>,
    /// Contour edge whose face lies to the right, if any.
    pub right_face: Option<usize>,
}

/// Arena the builder appends vertices and half-edge pairs to.
#[derive(Debug, Clone)]
pub(crate) struct SkeletonGraph<F> {
    vertices: Vec<SkeletonVertex<F>>,
    half_edges: Vec<SkeletonHalfEdge>,
    eps: F,
}

impl<F: Float> SkeletonGraph<F> {
    pub fn new(eps: F) -> Self {
        Self {
            vertices: Vec::new(),
            half_edges: Vec::new(),
            eps,
        }
    }

    pub fn add_vertex(&mut self, point: Point2<F>, time: F, kind: VertexKind) -> usize {
        self.vertices.push(SkeletonVertex { point, time, kind });
        self.vertices.len() - 1
    }

    /// Returns an interior node at `point` and `time`, reusing one created by
    /// an earlier event at the same place and time.
    ///
    /// Nodes are appended in non-decreasing time order, so only the tail of
    /// the arena needs to be searched.
    pub fn node_at(&mut self, point: Point2<F>, time: F) -> usize {
        for (i, v) in self.vertices.iter().enumerate().rev() {
            if v.time < time - self.eps {
                break;
            }
            if v.kind == VertexKind::Node
                && (v.time - time).abs() <= self.eps
                && v.point.distance(point) <= self.eps
            {
                return i;
            }
        }
        self.add_vertex(point, time, VertexKind::Node)
    }

    /// Adds a twin pair and returns the index of the half-edge running from
    /// `origin` to `target`. Pairs that would start and end on the same
    /// vertex are not stored.
    pub fn add_pair(
        &mut self,
        origin: usize,
        target: usize,
        is_border: bool,
        left_face: Option<usize>,
        right_face: Option<usize>,
    ) -> Option<usize> {
        if origin == target {
            return None;
        }
        let forward = self.half_edges.len();
        self.half_edges.push(SkeletonHalfEdge {
            origin,
            target,
            opposite: forward + 1,
            is_border,
            left_face,
            right_face,
        });
        self.half_edges.push(SkeletonHalfEdge {
            origin: target,
            target: origin,
            opposite: forward,
            is_border,
            left_face: right_face,
            right_face: left_face,
        });
        Some(forward)
    }

    pub fn finish(
        self,
        side: OffsetSide,
        contour: Vec<Line2<F>>,
        max_distance: Option<F>,
    ) -> Skeleton<F> {
        let max_time = self
            .vertices
            .iter()
            .fold(F::zero(), |acc, v| acc.max(v.time));
        Skeleton {
            side,
            vertices: self.vertices,
            half_edges: self.half_edges,
            contour,
            max_distance,
            max_time,
            eps: self.eps,
        }
    }
}

/// A straight skeleton, interior or exterior.
///
/// Immutable once built; offsets can be taken from it any number of times,
/// from any number of threads.
#[derive(Debug, Clone, PartialEq)]
pub struct Skeleton<F> {
    side: OffsetSide,
    vertices: Vec<SkeletonVertex<F>>,
    half_edges: Vec<SkeletonHalfEdge>,
    contour: Vec<Line2<F>>,
    max_distance: Option<F>,
    max_time: F,
    eps: F,
}

impl<F: Float> Skeleton<F> {
    /// Which side of the polygon this skeleton was propagated into.
    #[inline]
    pub fn side(&self) -> OffsetSide {
        self.side
    }

    /// Returns the positions of all skeleton vertices, contour vertices
    /// included.
    pub fn vertices(&self) -> Vec<Point2<F>> {
        self.vertices.iter().map(|v| v.point).collect()
    }

    #[inline]
    pub fn skeleton_vertices(&self) -> &[SkeletonVertex<F>] {
        &self.vertices
    }

    #[inline]
    pub fn half_edges(&self) -> &[SkeletonHalfEdge] {
        &self.half_edges
    }

    /// Returns every arc once, as `(start, end)` with the start being the
    /// earlier of the two nodes. Contour edges and the exterior frame are not
    /// included.
    pub fn edges(&self) -> Vec<(Point2<F>, Point2<F>)> {
        self.arcs()
            .map(|h| {
                (
                    self.vertices[h.origin].point,
                    self.vertices[h.target].point,
                )
            })
            .collect()
    }

    /// Iterates the forward half-edge of every arc.
    pub fn arcs(&self) -> impl Iterator<Item = &SkeletonHalfEdge> + '_ {
        self.half_edges.iter().step_by(2).filter(|h| !h.is_border)
    }

    /// Largest time of any skeleton vertex.
    ///
    /// For an interior skeleton this is the distance at which the polygon
    /// vanishes; for an exterior skeleton it equals the bound.
    #[inline]
    pub fn max_time(&self) -> F {
        self.max_time
    }

    /// The bound an exterior skeleton was built up to.
    #[inline]
    pub fn max_distance(&self) -> Option<F> {
        self.max_distance
    }

    /// Absolute tolerance the skeleton was built with.
    #[inline]
    pub fn epsilon(&self) -> F {
        self.eps
    }

    /// Supporting line of a contour edge, oriented with the propagation side
    /// on its left.
    #[inline]
    pub fn contour_edge(&self, index: usize) -> Option<&Line2<F>> {
        self.contour.get(index)
    }

    #[inline]
    pub fn contour_len(&self) -> usize {
        self.contour.len()
    }

    /// Offset polygons at `distance` on this skeleton's side.
    ///
    /// See [`offset_polygons`](super::offset_polygons).
    pub fn offset(&self, distance: F) -> Result<Vec<Polygon<F>>> {
        super::offset_polygons(self, distance, self.side)
    }
}
