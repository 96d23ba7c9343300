//! Half-edge records and bounded face-ring walks
//!
//! Hull topology is a table of 4-byte half-edges. Each face is named by one
//! of its edges; following `next` from there goes around the face and, in
//! well-formed data, comes back to the start edge.

use bytemuck::{Pod, Zeroable};

use crate::limits::FACE_WALK_STEP_LIMIT;

/// One directed edge of a hull face
///
/// Field order is the on-disk byte order, so tables are cast straight from
/// decoded blob bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct Edge {
    /// Next edge around the same face
    pub next: u8,
    /// Opposite edge on the neighbouring face
    pub twin: u8,
    /// Vertex this edge starts at
    pub origin: u8,
    /// Face this edge borders
    pub face: u8,
}

/// Why a face-ring walk stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingEnd {
    /// `next` led back to the start edge
    Closed,
    /// [`FACE_WALK_STEP_LIMIT`] steps without closing
    Truncated,
    /// An edge index pointed outside the table
    Broken,
}

/// Iterator over the steps of one face ring
///
/// Starting at `edges[start].next`, each step yields `(edge, edges[edge].next)`
/// and moves on to the second element. The walk ends when it reaches the
/// start edge, after [`FACE_WALK_STEP_LIMIT`] steps, or at the first
/// out-of-range index; [`FaceRing::end`] tells which.
#[derive(Debug, Clone)]
pub struct FaceRing<'a> {
    edges: &'a [Edge],
    start: usize,
    current: usize,
    steps: usize,
    end: Option<RingEnd>,
}

impl<'a> FaceRing<'a> {
    /// Begin a walk at `start`; `None` if `start` is not in the table
    pub fn new(edges: &'a [Edge], start: usize) -> Option<Self> {
        let first = edges.get(start)?.next as usize;
        Some(Self {
            edges,
            start,
            current: first,
            steps: 0,
            end: None,
        })
    }

    /// Start edge of the face
    pub fn start(&self) -> usize {
        self.start
    }

    /// Steps taken so far
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// How the walk ended, once it has
    pub fn end(&self) -> Option<RingEnd> {
        self.end
    }

    fn finish(&mut self, end: RingEnd) -> Option<(usize, usize)> {
        self.end = Some(end);
        None
    }
}

impl Iterator for FaceRing<'_> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.end.is_some() {
            return None;
        }
        if self.current == self.start {
            return self.finish(RingEnd::Closed);
        }
        if self.steps >= FACE_WALK_STEP_LIMIT {
            return self.finish(RingEnd::Truncated);
        }

        let Some(edge) = self.edges.get(self.current) else {
            return self.finish(RingEnd::Broken);
        };
        let next = edge.next as usize;
        if next >= self.edges.len() {
            return self.finish(RingEnd::Broken);
        }

        let step = (self.current, next);
        self.current = next;
        self.steps += 1;
        Some(step)
    }
}
