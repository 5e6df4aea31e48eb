//! Wavefront state for the event simulation.
//!
//! The wavefront is kept as circular lists of active vertices (one list per
//! connected wavefront polygon), threaded through an arena by `prev`/`next`
//! indices. A vertex never changes its motion: whenever the wavefront
//! topology changes, the affected vertices are retired and new ones are
//! spawned at the event point.

use super::event::{Event, EventKind, EventQueue};
use super::graph::{Skeleton, SkeletonGraph, VertexKind};
use super::OffsetSide;
use crate::error::{as_f64, Result, SkeletonError};
use crate::polygon::Polygon;
use crate::primitives::{Line2, Point2, Ray2, Vec2};
use crate::tolerance::bisector;
use num_traits::Float;

/// A vertex of the moving wavefront.
#[derive(Debug, Clone, Copy)]
pub(crate) struct WavefrontVertex<F> {
    /// Position at birth and velocity.
    pub motion: Ray2<F>,
    pub birth: F,
    /// Skeleton vertex the trajectory starts from.
    pub node: usize,
    /// Contour edge of the fragment ending at this vertex.
    pub incoming: usize,
    /// Contour edge of the fragment starting at this vertex.
    pub outgoing: usize,
    pub prev: usize,
    pub next: usize,
    pub active: bool,
    /// Bumped whenever `next` changes or the vertex is retired.
    pub generation: u32,
    pub reflex: bool,
}

impl<F: Float> WavefrontVertex<F> {
    #[inline]
    pub fn position_at(&self, time: F) -> Point2<F> {
        self.motion.point_at(time - self.birth)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Wavefront<F> {
    /// Contour edge lines with unit directions; the propagation side is on
    /// the left.
    contour: Vec<Line2<F>>,
    normals: Vec<Vec2<F>>,
    vertices: Vec<WavefrontVertex<F>>,
    /// Wavefront vertices indexed by their outgoing contour edge.
    by_outgoing: Vec<Vec<usize>>,
    graph: SkeletonGraph<F>,
    queue: EventQueue<F>,
    now: F,
    horizon: F,
    eps: F,
    parallel_tolerance: F,
    active: usize,
}

impl<F: Float> Wavefront<F> {
    /// Sets up the initial wavefront for a validated polygon whose
    /// propagation side is on the left of every edge, and predicts the
    /// first events. No event later than `horizon` is ever queued.
    pub fn new(polygon: &Polygon<F>, horizon: F, eps: F, parallel_tolerance: F) -> Result<Self> {
        let points = &polygon.vertices;
        let n = points.len();

        let mut contour = Vec::with_capacity(n);
        let mut normals = Vec::with_capacity(n);
        for i in 0..n {
            let direction = (points[(i + 1) % n] - points[i])
                .normalize()
                .ok_or_else(|| SkeletonError::invalid(format!("edge {} has zero length", i)))?;
            contour.push(Line2::new(points[i], direction));
            normals.push(direction.perpendicular());
        }

        let mut graph = SkeletonGraph::new(eps);
        for &p in points {
            graph.add_vertex(p, F::zero(), VertexKind::Contour);
        }
        for i in 0..n {
            graph.add_pair(i, (i + 1) % n, true, Some(i), None);
        }

        let mut wavefront = Self {
            contour,
            normals,
            vertices: Vec::with_capacity(2 * n),
            by_outgoing: vec![Vec::new(); n],
            graph,
            queue: EventQueue::new(),
            now: F::zero(),
            horizon,
            eps,
            parallel_tolerance,
            active: 0,
        };

        for i in 0..n {
            let incoming = (i + n - 1) % n;
            let motion = bisector(
                points[i],
                &wavefront.contour[incoming],
                &wavefront.contour[i],
                parallel_tolerance,
            )
            .ok_or_else(|| {
                SkeletonError::invalid(format!("vertex {} is a zero-angle spike", i))
            })?;
            let reflex = wavefront.is_reflex(incoming, i);
            wavefront.vertices.push(WavefrontVertex {
                motion,
                birth: F::zero(),
                node: i,
                incoming,
                outgoing: i,
                prev: incoming,
                next: (i + 1) % n,
                active: true,
                generation: 0,
                reflex,
            });
            wavefront.by_outgoing[i].push(i);
            wavefront.active += 1;
        }

        for i in 0..n {
            wavefront.schedule(i);
        }

        Ok(wavefront)
    }

    #[inline]
    pub fn now(&self) -> F {
        self.now
    }

    #[inline]
    pub fn active_count(&self) -> usize {
        self.active
    }

    #[inline]
    pub fn pop_event(&mut self) -> Option<Event<F>> {
        self.queue.pop_min()
    }

    #[inline]
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    /// True if the event was predicted against the current state of its
    /// vertex.
    pub fn is_current(&self, event: &Event<F>) -> bool {
        let v = &self.vertices[event.vertex()];
        v.active && v.generation == event.stamp
    }

    fn is_reflex(&self, incoming: usize, outgoing: usize) -> bool {
        let turn = self.contour[incoming]
            .direction
            .cross(self.contour[outgoing].direction);
        turn < -self.parallel_tolerance.sin()
    }

    fn schedule(&mut self, v: usize) {
        let stamp = self.vertices[v].generation;
        if let Some(time) = self.collapse_time(v) {
            if time <= self.horizon {
                self.queue
                    .push(time, EventKind::EdgeCollapse { vertex: v }, stamp);
            }
        }
        if !self.vertices[v].reflex {
            return;
        }
        let (incoming, outgoing) = (self.vertices[v].incoming, self.vertices[v].outgoing);
        for edge in 0..self.contour.len() {
            if edge == incoming || edge == outgoing {
                continue;
            }
            if let Some(time) = self.split_time(v, edge) {
                if time <= self.horizon {
                    self.queue
                        .push(time, EventKind::VertexSplit { vertex: v, edge }, stamp);
                }
            }
        }
    }

    /// Time at which the fragment from `u` to its successor shrinks to zero,
    /// if it is shrinking at all.
    pub fn collapse_time(&self, u: usize) -> Option<F> {
        let a = &self.vertices[u];
        let b = &self.vertices[a.next];
        let direction = self.contour[a.outgoing].direction;

        let rate = (b.motion.direction - a.motion.direction).dot(direction);
        let gap = (b.position_at(self.now) - a.position_at(self.now)).dot(direction);
        // Endpoints that already coincide and travel together merge right away.
        if gap <= self.eps && rate <= self.parallel_tolerance.sin() {
            return Some(self.now);
        }
        if rate >= F::zero() {
            return None;
        }
        Some((self.now - gap / rate).max(self.now))
    }

    /// Time at which reflex vertex `v` reaches the moving line of `edge`, if
    /// it is in front of that line and closing in on it.
    pub fn split_time(&self, v: usize, edge: usize) -> Option<F> {
        let vertex = &self.vertices[v];
        let slope = vertex.motion.direction.dot(self.normals[edge]) - F::one();
        if slope >= F::zero() {
            return None;
        }
        let ahead = self.contour[edge].signed_distance(vertex.position_at(self.now)) - self.now;
        if ahead < -self.eps {
            return None;
        }
        Some((self.now - ahead / slope).max(self.now))
    }

    /// Retires `v`, closing its trajectory at skeleton vertex `node`.
    fn retire(&mut self, v: usize, node: usize) {
        let vertex = &mut self.vertices[v];
        vertex.active = false;
        vertex.generation = vertex.generation.wrapping_add(1);
        let (start, incoming, outgoing) = (vertex.node, vertex.incoming, vertex.outgoing);
        self.active -= 1;
        self.graph
            .add_pair(start, node, false, Some(incoming), Some(outgoing));
    }

    fn spawn(
        &mut self,
        motion: Ray2<F>,
        node: usize,
        incoming: usize,
        outgoing: usize,
        prev: usize,
        next: usize,
    ) -> usize {
        let id = self.vertices.len();
        let reflex = self.is_reflex(incoming, outgoing);
        self.vertices.push(WavefrontVertex {
            motion,
            birth: self.now,
            node,
            incoming,
            outgoing,
            prev,
            next,
            active: true,
            generation: 0,
            reflex,
        });
        self.by_outgoing[outgoing].push(id);
        self.active += 1;

        let before = &mut self.vertices[prev];
        before.next = id;
        before.generation = before.generation.wrapping_add(1);
        self.vertices[next].prev = id;

        self.schedule(prev);
        self.schedule(id);
        id
    }

    /// Replaces the retired stretch of wavefront between `p` and `q` by a
    /// single vertex at `point` between contour edges `incoming` and
    /// `outgoing`.
    ///
    /// When the two edges are antiparallel the new vertex would sit on a
    /// zero-width spike. The spike is collapsed instead by consuming the
    /// nearer neighbour (or both, when equidistant) and retrying one step
    /// further along the ring. A ring left with a single vertex is closed.
    fn join(
        &mut self,
        mut p: usize,
        mut q: usize,
        mut incoming: usize,
        mut outgoing: usize,
        mut point: Point2<F>,
        mut node: usize,
    ) {
        let time = self.now;
        loop {
            if p == q {
                let end = self
                    .graph
                    .node_at(self.vertices[p].position_at(time), time);
                self.retire(p, end);
                self.graph
                    .add_pair(node, end, false, Some(incoming), Some(outgoing));
                return;
            }

            if let Some(motion) = bisector(
                point,
                &self.contour[incoming],
                &self.contour[outgoing],
                self.parallel_tolerance,
            ) {
                self.spawn(motion, node, incoming, outgoing, p, q);
                return;
            }

            let at_p = self.vertices[p].position_at(time);
            let at_q = self.vertices[q].position_at(time);
            let (to_p, to_q) = (at_p.distance(point), at_q.distance(point));

            if (to_p - to_q).abs() <= self.eps {
                let tip_point = at_p.midpoint(at_q);
                let tip = self.graph.node_at(tip_point, time);
                self.graph
                    .add_pair(node, tip, false, Some(incoming), Some(outgoing));
                let (before, after) = (self.vertices[p].prev, self.vertices[q].next);
                incoming = self.vertices[p].incoming;
                outgoing = self.vertices[q].outgoing;
                self.retire(p, tip);
                self.retire(q, tip);
                if before == q {
                    return;
                }
                p = before;
                q = after;
                point = tip_point;
                node = tip;
            } else if to_p < to_q {
                let tip = self.graph.node_at(at_p, time);
                self.graph
                    .add_pair(node, tip, false, Some(incoming), Some(outgoing));
                let before = self.vertices[p].prev;
                incoming = self.vertices[p].incoming;
                self.retire(p, tip);
                p = before;
                point = at_p;
                node = tip;
            } else {
                let tip = self.graph.node_at(at_q, time);
                self.graph
                    .add_pair(node, tip, false, Some(incoming), Some(outgoing));
                let after = self.vertices[q].next;
                outgoing = self.vertices[q].outgoing;
                self.retire(q, tip);
                q = after;
                point = at_q;
                node = tip;
            }
        }
    }

    /// Applies the collapse of the fragment starting at `u` at `time`.
    ///
    /// Returns `Ok(false)` without touching the wavefront if the fragment or
    /// one of its neighbours has already been retired.
    pub fn apply_edge_collapse(&mut self, u: usize, time: F) -> Result<bool> {
        let w = self.vertices[u].next;
        let (p, q) = (self.vertices[u].prev, self.vertices[w].next);
        if [u, w, p, q].iter().any(|&x| !self.vertices[x].active) {
            return Ok(false);
        }
        self.now = time;
        let point = self.vertices[u]
            .position_at(time)
            .midpoint(self.vertices[w].position_at(time));
        if !point.is_finite() {
            return Err(SkeletonError::degenerate(
                as_f64(time),
                "edge collapse point is not finite",
            ));
        }

        let node = self.graph.node_at(point, time);
        let incoming = self.vertices[u].incoming;
        let outgoing = self.vertices[w].outgoing;
        self.retire(u, node);
        self.retire(w, node);

        if p == w {
            return Ok(true);
        }
        if p == q {
            // Triangle: the third vertex arrives at the same node.
            let end = self
                .graph
                .node_at(self.vertices[p].position_at(time), time);
            self.retire(p, end);
            self.graph
                .add_pair(node, end, false, Some(incoming), Some(outgoing));
            return Ok(true);
        }

        self.join(p, q, incoming, outgoing, point, node);
        Ok(true)
    }

    /// Finds the active fragment of `edge` that contains `point` at `time`.
    fn find_fragment(&self, v: usize, edge: usize, point: Point2<F>, time: F) -> Option<usize> {
        let direction = self.contour[edge].direction;
        let along = point.to_vec().dot(direction);
        self.by_outgoing[edge].iter().copied().find(|&x| {
            let start = &self.vertices[x];
            if !start.active || x == v || start.next == v {
                return false;
            }
            let a = start.position_at(time).to_vec().dot(direction);
            let b = self.vertices[start.next]
                .position_at(time)
                .to_vec()
                .dot(direction);
            a - self.eps <= along && along <= b + self.eps
        })
    }

    /// Applies the split of the wavefront by reflex vertex `v` hitting the
    /// moving line of `edge` at `time`.
    ///
    /// Returns `Ok(false)` without touching the wavefront if `v` is no longer
    /// active or no fragment of `edge` is there to be hit.
    pub fn apply_vertex_split(&mut self, v: usize, edge: usize, time: F) -> Result<bool> {
        if !self.vertices[v].active {
            return Ok(false);
        }
        let point = self.vertices[v].position_at(time);
        if !point.is_finite() {
            return Err(SkeletonError::degenerate(
                as_f64(time),
                "split point is not finite",
            ));
        }
        let x = match self.find_fragment(v, edge, point, time) {
            Some(x) => x,
            None => return Ok(false),
        };

        self.now = time;
        let y = self.vertices[x].next;
        let vertex = self.vertices[v];
        let node = self.graph.node_at(point, time);
        self.retire(v, node);

        // vertex.prev .. y and x .. vertex.next become separate rings.
        self.join(vertex.prev, y, vertex.incoming, edge, point, node);
        self.join(x, vertex.next, edge, vertex.outgoing, point, node);
        Ok(true)
    }

    /// Stops every remaining vertex at `time`, records it as a frozen
    /// skeleton vertex and closes each ring with border edges.
    pub fn freeze(&mut self, time: F) {
        self.now = time;
        let mut frozen = vec![None; self.vertices.len()];
        for (v, vertex) in self.vertices.iter().enumerate() {
            if vertex.active {
                frozen[v] = Some(self.graph.add_vertex(
                    vertex.position_at(time),
                    time,
                    VertexKind::Frozen,
                ));
            }
        }
        for v in 0..self.vertices.len() {
            if let (Some(a), Some(b)) = (frozen[v], frozen[self.vertices[v].next]) {
                self.graph.add_pair(a, b, true, None, None);
            }
        }
        for (v, node) in frozen.into_iter().enumerate() {
            if let Some(node) = node {
                self.retire(v, node);
            }
        }
    }

    pub fn into_skeleton(self, side: OffsetSide, max_distance: Option<F>) -> Skeleton<F> {
        self.graph.finish(side, self.contour, max_distance)
    }
}
