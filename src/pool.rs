// Copyright 2025 the polytess authors
// License: MIT
//
// Arena storage for mesh records.
//
// Edge pairs are recycled through an explicit free-index stack. Vertex
// slots are append-only: a released vertex is nulled in place so its index
// is never handed out again while the pool lives, and a stale index can be
// detected instead of silently aliasing a new vertex.
//
// The pool also owns the bookkeeping vectors the sweep and triangulation
// phases build up (`edges_of_interest`, `face_edges`, `export_vertexes`).
// Releasing an edge pair must scrub both of its halves from those vectors
// unconditionally; an entry left behind would point at a recycled slot.

use crate::mesh::{
    pair_halves, EdgeIdx, EdgePair, Face, FaceIdx, HalfEdge, PairIdx, Vertex, VertIdx, INVALID,
};

pub const VERTEX_PREALLOC: usize = 64;
pub const EDGE_PREALLOC: usize = 64;

pub struct ObjectPool {
    pub verts: Vec<Option<Vertex>>,
    pub edges: Vec<HalfEdge>,
    pub pairs: Vec<EdgePair>,
    free_pairs: Vec<PairIdx>,
    pub faces: Vec<Face>,

    /// Vertices in sweep (export) order; slots may point at released vertices.
    pub export_vertexes: Vec<VertIdx>,
    /// Candidate boundary edges recorded during the sweep (one per Start
    /// vertex plus every diagonal), the seeds for region triangulation.
    pub edges_of_interest: Vec<EdgeIdx>,
    /// One half-edge per emitted triangle boundary.
    pub face_edges: Vec<EdgeIdx>,
}

impl ObjectPool {
    pub fn new() -> Self {
        let mut pool = ObjectPool {
            verts: Vec::new(),
            edges: Vec::new(),
            pairs: Vec::new(),
            free_pairs: Vec::new(),
            faces: Vec::new(),
            export_vertexes: Vec::new(),
            edges_of_interest: Vec::new(),
            face_edges: Vec::new(),
        };
        pool.preallocate_vertexes(VERTEX_PREALLOC);
        pool.preallocate_edges(EDGE_PREALLOC);
        pool
    }

    pub fn preallocate_vertexes(&mut self, n: usize) {
        self.verts.reserve(n);
        self.export_vertexes.reserve(n);
    }

    pub fn preallocate_edges(&mut self, n: usize) {
        self.edges.reserve(n * 2);
        self.pairs.reserve(n);
    }

    /// Allocate a vertex slot. The slot index is the vertex identity.
    pub fn alloc_vertex(&mut self) -> VertIdx {
        let idx = self.verts.len() as VertIdx;
        self.verts.push(Some(Vertex::default()));
        idx
    }

    /// Allocate an edge pair: two opposite half-edges stored contiguously,
    /// each half initially a self-loop around its own origin with the other
    /// half as its left-face successor.
    pub fn alloc_pair(&mut self) -> PairIdx {
        let pair = if let Some(p) = self.free_pairs.pop() {
            let (l, r) = pair_halves(p);
            self.edges[l as usize] = HalfEdge::default();
            self.edges[r as usize] = HalfEdge::default();
            self.pairs[p as usize] = EdgePair::default();
            p
        } else {
            let p = (self.pairs.len()) as PairIdx;
            self.edges.push(HalfEdge::default());
            self.edges.push(HalfEdge::default());
            self.pairs.push(EdgePair::default());
            p
        };

        let (l, r) = pair_halves(pair);
        self.edges[l as usize].origin_next = l;
        self.edges[l as usize].left_next = r;
        self.edges[r as usize].origin_next = r;
        self.edges[r as usize].left_next = l;
        pair
    }

    pub fn alloc_face(&mut self, edge: EdgeIdx) -> FaceIdx {
        let idx = self.faces.len() as FaceIdx;
        self.faces.push(Face { edge, inside: false });
        idx
    }

    /// Return a pair to the free stack. Both halves are scrubbed from the
    /// bookkeeping vectors first; this must not be skipped, the vectors are
    /// walked long after the pair slot has been recycled.
    pub fn release_pair(&mut self, pair: PairIdx) {
        let (l, r) = pair_halves(pair);
        self.scrub_edge(l);
        self.scrub_edge(r);
        self.pairs[pair as usize].node = INVALID;
        self.free_pairs.push(pair);
    }

    /// Mark a vertex slot as dead. The index is not reused.
    pub fn release_vertex(&mut self, v: VertIdx) {
        if (v as usize) < self.verts.len() {
            self.verts[v as usize] = None;
        }
    }

    /// Drop trailing dead vertex slots (cheap cleanup after a rejected
    /// contour, keeps fresh indices dense).
    pub fn trim_vertexes(&mut self) {
        while matches!(self.verts.last(), Some(None)) {
            self.verts.pop();
        }
    }

    pub fn live_vertex_count(&self) -> usize {
        self.verts.iter().filter(|v| v.is_some()).count()
    }

    fn scrub_edge(&mut self, e: EdgeIdx) {
        // Point surviving entries at the edge's face successor so traversal
        // can continue from the same loop, or null them out. The successor
        // may be the partner half of the same dying pair; that is just as
        // dead as the edge itself.
        let next = self.edges[e as usize].left_next;
        let replacement = if next != e && next != (e ^ 1) {
            next
        } else {
            INVALID
        };

        for slot in self
            .edges_of_interest
            .iter_mut()
            .chain(self.face_edges.iter_mut())
        {
            if *slot == e {
                *slot = replacement;
            }
        }
        for face in self.faces.iter_mut() {
            if face.edge == e {
                face.edge = replacement;
            }
        }
    }
}

impl Default for ObjectPool {
    fn default() -> Self {
        Self::new()
    }
}
