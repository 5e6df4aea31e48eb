//! Priority queue of wavefront events.
//!
//! Events are predicted eagerly and validated lazily: when a vertex changes,
//! its pending events are not removed from the heap. Each event instead
//! carries the vertex generation it was computed against, and the builder
//! drops it on pop if the vertex has moved on.

use num_traits::Float;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// What happens when an event fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// The wavefront fragment starting at `vertex` shrinks to zero length.
    EdgeCollapse {
        /// Wavefront vertex at the start of the collapsing fragment.
        vertex: usize,
    },
    /// A reflex vertex runs into the moving line of a contour edge.
    VertexSplit {
        /// The reflex wavefront vertex.
        vertex: usize,
        /// Contour edge whose wavefront fragment is hit.
        edge: usize,
    },
}

/// A predicted event.
#[derive(Debug, Clone, Copy)]
pub struct Event<F> {
    /// Simulation time (offset distance) at which the event fires.
    pub time: F,
    pub kind: EventKind,
    /// Generation of the vertex when the event was predicted.
    pub stamp: u32,
    /// Insertion counter, breaks ties between simultaneous events.
    pub sequence: u64,
}

impl<F> Event<F> {
    /// Returns the wavefront vertex the event was predicted for.
    #[inline]
    pub fn vertex(&self) -> usize {
        match self.kind {
            EventKind::EdgeCollapse { vertex } => vertex,
            EventKind::VertexSplit { vertex, .. } => vertex,
        }
    }
}

impl<F: Float> PartialEq for Event<F> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<F: Float> Eq for Event<F> {}

impl<F: Float> PartialOrd for Event<F> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<F: Float> Ord for Event<F> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior. Times are finite (the queue
        // rejects anything else) so partial_cmp never fails here.
        other
            .time
            .partial_cmp(&self.time)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Min-queue of events ordered by time, then by insertion order.
#[derive(Debug, Clone)]
pub struct EventQueue<F> {
    heap: BinaryHeap<Event<F>>,
    next_sequence: u64,
}

impl<F: Float> Default for EventQueue<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> EventQueue<F> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_sequence: 0,
        }
    }

    /// Queues an event. Returns false, and queues nothing, if `time` is not
    /// finite.
    pub fn push(&mut self, time: F, kind: EventKind, stamp: u32) -> bool {
        if !time.is_finite() {
            return false;
        }
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(Event {
            time,
            kind,
            stamp,
            sequence,
        });
        true
    }

    /// Removes and returns the earliest event.
    #[inline]
    pub fn pop_min(&mut self) -> Option<Event<F>> {
        self.heap.pop()
    }

    #[inline]
    pub fn peek_time(&self) -> Option<F> {
        self.heap.peek().map(|e| e.time)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collapse(vertex: usize) -> EventKind {
        EventKind::EdgeCollapse { vertex }
    }

    #[test]
    fn test_pops_in_time_order() {
        let mut queue = EventQueue::new();
        queue.push(3.0, collapse(0), 0);
        queue.push(1.0, collapse(1), 0);
        queue.push(2.0, collapse(2), 0);

        let order: Vec<f64> = std::iter::from_fn(|| queue.pop_min()).map(|e| e.time).collect();
        assert_eq!(order, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_ties_pop_in_insertion_order() {
        let mut queue = EventQueue::new();
        queue.push(1.0, collapse(7), 0);
        queue.push(1.0, EventKind::VertexSplit { vertex: 3, edge: 5 }, 2);
        queue.push(1.0, collapse(4), 1);

        let vertices: Vec<usize> = std::iter::from_fn(|| queue.pop_min())
            .map(|e| e.vertex())
            .collect();
        assert_eq!(vertices, vec![7, 3, 4]);
    }

    #[test]
    fn test_rejects_non_finite_times() {
        let mut queue: EventQueue<f64> = EventQueue::new();
        assert!(!queue.push(f64::NAN, collapse(0), 0));
        assert!(!queue.push(f64::INFINITY, collapse(0), 0));
        assert!(queue.is_empty());
        assert!(queue.push(0.5, collapse(0), 0));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.peek_time(), Some(0.5));
    }

    #[test]
    fn test_event_keeps_stamp() {
        let mut queue = EventQueue::new();
        queue.push(0.25, EventKind::VertexSplit { vertex: 2, edge: 9 }, 11);
        let event = queue.pop_min().unwrap();
        assert_eq!(event.stamp, 11);
        assert_eq!(event.kind, EventKind::VertexSplit { vertex: 2, edge: 9 });
        assert!(queue.pop_min().is_none());
    }
}
