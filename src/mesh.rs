// Copyright 2025 the polytess authors
// License: MIT
//
// The half-edge mesh: a doubly-connected edge list over index arenas.
//
// Half-edges are allocated in pairs stored contiguously, so the symmetric
// half is always `e ^ 1` (even index = first half, odd = second). Per-pair
// data (sweep direction key, inversion flag, dictionary node) lives in a
// parallel arena indexed by `e >> 1`.
//
// Invariants: `origin_next` cycles close CCW around every vertex,
// `left_next` cycles close CCW around every face loop, `sym` is an
// involution by construction. Structural operations relink all affected
// cycles in one step; there is no repair pass, a partial relink corrupts
// the subdivision irrecoverably.

use crate::geom::{
    edge_angle_below_tolerance, edge_angle_between, edge_direction, vert_eq, vert_leq, Point, Real,
};
use crate::pool::ObjectPool;

pub const INVALID: u32 = u32::MAX;

/// Index into the vertex arena. Identity; never reused while the pool lives.
pub type VertIdx = u32;
/// Index of one half-edge.
pub type EdgeIdx = u32;
/// Index of an edge pair (`edge >> 1`).
pub type PairIdx = u32;
/// Index into the face registry.
pub type FaceIdx = u32;

/// The symmetric (opposite) half-edge.
#[inline(always)]
pub fn sym(e: EdgeIdx) -> EdgeIdx {
    e ^ 1
}

/// The pair owning a half-edge.
#[inline(always)]
pub fn pair_of(e: EdgeIdx) -> PairIdx {
    e >> 1
}

/// Both halves of a pair, (first, second).
#[inline(always)]
pub fn pair_halves(p: PairIdx) -> (EdgeIdx, EdgeIdx) {
    (p << 1, (p << 1) | 1)
}

#[derive(Clone, Debug)]
pub struct Vertex {
    /// One half-edge with this origin.
    pub edge: EdgeIdx,
    pub origin: Point,
    /// Priority queue handle; meaningful only during the active sweep.
    pub pq_handle: i32,
    /// Position in the export list, assigned in sweep order.
    pub out_idx: u32,
}

impl Default for Vertex {
    fn default() -> Self {
        Vertex {
            edge: INVALID,
            origin: Point::new(0.0, 0.0),
            pq_handle: 0,
            out_idx: INVALID,
        }
    }
}

#[derive(Clone, Debug)]
pub struct HalfEdge {
    /// Next edge CCW around the origin vertex.
    pub origin_next: EdgeIdx,
    /// Next edge CCW around the left face.
    pub left_next: EdgeIdx,
    /// Origin position, duplicated from the vertex for locality.
    pub origin: Point,
    /// Owning vertex of the origin.
    pub vertex: VertIdx,
    /// Accumulated winding of the region this edge borders, filled in
    /// during the sweep.
    pub real_winding: i16,
    /// Winding change when crossing from the right face to the left face.
    pub winding: i8,
    /// Traversal deduplication mark.
    pub mark: u8,
}

impl Default for HalfEdge {
    fn default() -> Self {
        HalfEdge {
            origin_next: INVALID,
            left_next: INVALID,
            origin: Point::new(0.0, 0.0),
            vertex: INVALID,
            real_winding: 0,
            winding: 0,
            mark: 0,
        }
    }
}

/// Pair-level state shared by both halves.
#[derive(Clone, Debug)]
pub struct EdgePair {
    /// Sweep dictionary node currently holding this pair, if any.
    pub node: u32,
    /// Pseudo-angle ordering key, recomputed by `update_info`.
    pub direction: Real,
    /// True when the first half runs right-to-left in sweep order.
    pub inverted: bool,
}

impl Default for EdgePair {
    fn default() -> Self {
        EdgePair {
            node: INVALID,
            direction: Real::NAN,
            inverted: false,
        }
    }
}

/// Boundary-loop record, one per accepted contour.
#[derive(Clone, Debug)]
pub struct Face {
    pub edge: EdgeIdx,
    pub inside: bool,
}

/// The planar subdivision. Owns the arenas and performs all structural
/// mutation.
pub struct Mesh {
    pub pool: ObjectPool,
}

impl Mesh {
    pub fn new() -> Self {
        Mesh {
            pool: ObjectPool::new(),
        }
    }

    // ─────────────── Navigation ───────────────

    #[inline]
    pub fn onext(&self, e: EdgeIdx) -> EdgeIdx {
        self.pool.edges[e as usize].origin_next
    }

    #[inline]
    pub fn lnext(&self, e: EdgeIdx) -> EdgeIdx {
        self.pool.edges[e as usize].left_next
    }

    /// Previous edge around the origin: Sym->Lnext.
    #[inline]
    pub fn oprev(&self, e: EdgeIdx) -> EdgeIdx {
        self.pool.edges[sym(e) as usize].left_next
    }

    /// Previous edge around the left face: Onext->Sym.
    #[inline]
    pub fn lprev(&self, e: EdgeIdx) -> EdgeIdx {
        sym(self.pool.edges[e as usize].origin_next)
    }

    #[inline]
    pub fn org_vec(&self, e: EdgeIdx) -> Point {
        self.pool.edges[e as usize].origin
    }

    #[inline]
    pub fn dst_vec(&self, e: EdgeIdx) -> Point {
        self.pool.edges[sym(e) as usize].origin
    }

    #[inline]
    pub fn direction(&self, e: EdgeIdx) -> Real {
        self.pool.pairs[pair_of(e) as usize].direction
    }

    /// True when this half runs left-to-right in sweep order.
    /// Valid only after `update_info` on the owning pair.
    #[inline]
    pub fn goes_right(&self, e: EdgeIdx) -> bool {
        self.pool.pairs[pair_of(e) as usize].inverted == (e & 1 == 1)
    }

    #[inline]
    pub fn goes_left(&self, e: EdgeIdx) -> bool {
        !self.goes_right(e)
    }

    /// Sweep-leftmost endpoint of a pair.
    #[inline]
    pub fn left_vec(&self, p: PairIdx) -> Point {
        let (l, r) = pair_halves(p);
        if self.pool.pairs[p as usize].inverted {
            self.pool.edges[r as usize].origin
        } else {
            self.pool.edges[l as usize].origin
        }
    }

    /// Sweep-rightmost endpoint of a pair.
    #[inline]
    pub fn right_vec(&self, p: PairIdx) -> Point {
        let (l, r) = pair_halves(p);
        if self.pool.pairs[p as usize].inverted {
            self.pool.edges[l as usize].origin
        } else {
            self.pool.edges[r as usize].origin
        }
    }

    /// Recompute the pair's sweep orientation and direction key.
    pub fn update_info(&mut self, p: PairIdx) {
        let (l, r) = pair_halves(p);
        let org = self.pool.edges[l as usize].origin;
        let dst = self.pool.edges[r as usize].origin;
        let inverted = !vert_leq(org, dst);
        self.pool.pairs[p as usize].inverted = inverted;
        let norm = if inverted { org - dst } else { dst - org };
        self.pool.pairs[p as usize].direction = edge_direction(norm);
    }

    #[inline]
    fn set_origin(&mut self, e: EdgeIdx, v: VertIdx) {
        let origin = self.pool.verts[v as usize]
            .as_ref()
            .map(|vx| vx.origin)
            .unwrap_or(self.pool.edges[e as usize].origin);
        self.pool.edges[e as usize].origin = origin;
        self.pool.edges[e as usize].vertex = v;
    }

    #[inline]
    fn copy_origin(&mut self, e: EdgeIdx, from: EdgeIdx) {
        self.pool.edges[e as usize].origin = self.pool.edges[from as usize].origin;
        self.pool.edges[e as usize].vertex = self.pool.edges[from as usize].vertex;
    }

    /// Number of edges in the left loop of `e`.
    pub fn face_len(&self, e: EdgeIdx) -> usize {
        let mut n = 0;
        let mut cur = e;
        loop {
            n += 1;
            cur = self.lnext(cur);
            if cur == e {
                break;
            }
        }
        n
    }

    // ─────────────── Construction ───────────────

    /// Create a self-loop: one vertex, one pair whose halves close both
    /// face loops on their own.
    pub fn make_edge_loop(&mut self, origin: Point) -> PairIdx {
        let p = self.pool.alloc_pair();
        let (l, r) = pair_halves(p);

        let v = self.pool.alloc_vertex();
        {
            let vert = self.pool.verts[v as usize].as_mut().unwrap();
            vert.origin = origin;
            vert.edge = l;
        }
        self.pool.edges[l as usize].origin = origin;
        self.pool.edges[l as usize].vertex = v;
        self.pool.edges[r as usize].origin = origin;
        self.pool.edges[r as usize].vertex = v;

        self.pool.edges[l as usize].left_next = l;
        self.pool.edges[l as usize].origin_next = r;
        self.pool.edges[r as usize].left_next = r;
        self.pool.edges[r as usize].origin_next = l;

        p
    }

    /// Append a contour point. With `e == INVALID` this opens the contour
    /// as a self-loop; otherwise the contour's first edge is split so that
    /// its destination becomes the new point. Returns the cursor edge
    /// (whose destination is always the most recently pushed point).
    pub fn push_vertex_edge(&mut self, e: EdgeIdx, origin: Point, clockwise: bool) -> EdgeIdx {
        if e == INVALID {
            let p = self.make_edge_loop(origin);
            let (l, r) = pair_halves(p);
            let w: i8 = if clockwise { -1 } else { 1 };
            self.pool.edges[l as usize].winding = w;
            self.pool.edges[r as usize].winding = -w;
            l
        } else {
            let p = self.pool.alloc_pair();
            let (e_new, _) = pair_halves(p);
            let v = self.pool.alloc_vertex();
            {
                let vert = self.pool.verts[v as usize].as_mut().unwrap();
                vert.origin = origin;
                vert.edge = e_new;
            }
            self.split_edge_loops(e, e_new, v);
            e
        }
    }

    // ─────────────── Structural operations ───────────────

    /// Insert vertex `v` in the middle of `e_org`: afterwards `e_org` runs
    /// from its old origin to `v` and `e_new` from `v` to the old
    /// destination. Relinks the origin cycles and both face loops of all
    /// four affected halves in one step.
    pub fn split_edge_loops(&mut self, e_org: EdgeIdx, e_new: EdgeIdx, v: VertIdx) {
        let a = e_org;
        let b = sym(e_org);
        let c = e_new;
        let d = sym(e_new);

        self.copy_origin(d, b);
        self.set_origin(b, v);
        self.set_origin(c, v);

        let e = self.pool.edges[a as usize].left_next;
        let g = self.pool.edges[b as usize].origin_next;
        let h = sym(g);

        // destination vertex cycle
        self.pool.edges[e as usize].origin_next = d;
        self.pool.edges[d as usize].origin_next = g;
        // cycle around the new vertex
        self.pool.edges[c as usize].origin_next = b;
        self.pool.edges[b as usize].origin_next = c;
        // left face loop
        self.pool.edges[a as usize].left_next = c;
        self.pool.edges[c as usize].left_next = e;
        // right face loop
        self.pool.edges[h as usize].left_next = d;
        self.pool.edges[d as usize].left_next = b;

        self.pool.edges[c as usize].winding = self.pool.edges[a as usize].winding;
        self.pool.edges[d as usize].winding = self.pool.edges[b as usize].winding;
    }

    /// Inverse of the split relink: splice `e_org` into the vertex cycle
    /// after `o_prev` (used when re-joining a split edge at a shared
    /// intersection vertex).
    pub fn join_edge_loops(&mut self, e_org: EdgeIdx, o_prev: EdgeIdx) {
        let a = e_org;
        let b = sym(e_org);
        let e = o_prev;
        let g = self.pool.edges[o_prev as usize].origin_next;
        let h = sym(g);

        self.pool.edges[e as usize].origin_next = b;
        self.pool.edges[b as usize].origin_next = g;
        self.pool.edges[a as usize].left_next = e;
        self.pool.edges[h as usize].left_next = b;
    }

    /// Add a diagonal from the destination of `e_org` to the origin of
    /// `e_dst`. The new edge inherits `e_org`'s accumulated winding so the
    /// created boundary stays locally winding-consistent. Returns the new
    /// half-edge on `e_org`'s side, or None for a degenerate request.
    pub fn connect_edges(&mut self, e_org: EdgeIdx, e_dst: EdgeIdx) -> Option<EdgeIdx> {
        if e_org == e_dst || sym(e_org) == e_dst {
            return None;
        }

        let p = self.pool.alloc_pair();
        let (e_new, e_new_sym) = pair_halves(p);

        let e_prev = sym(self.pool.edges[e_dst as usize].origin_next);
        let e_next = self.pool.edges[e_org as usize].left_next;

        let rw = self.pool.edges[e_org as usize].real_winding;
        self.pool.edges[e_new as usize].real_winding = rw;
        self.pool.edges[e_new_sym as usize].real_winding = rw;

        self.copy_origin(e_new, sym(e_org));
        self.copy_origin(e_new_sym, e_dst);

        // external left chain
        self.pool.edges[e_prev as usize].left_next = e_new_sym;
        self.pool.edges[e_new_sym as usize].left_next = e_next;
        // internal left chain
        self.pool.edges[e_new as usize].left_next = e_dst;
        self.pool.edges[e_org as usize].left_next = e_new;
        // origin vertex chain
        self.pool.edges[e_new as usize].origin_next = sym(e_org);
        self.pool.edges[e_next as usize].origin_next = e_new;
        // destination vertex chain
        self.pool.edges[e_new_sym as usize].origin_next = sym(e_prev);
        self.pool.edges[e_dst as usize].origin_next = e_new_sym;

        self.update_info(p);

        Some(e_new)
    }

    /// Remove a zero-length edge, fusing its endpoint cycles into one and
    /// splicing both face loops shut. Returns a surviving edge of the fused
    /// vertex cycle.
    pub fn remove_edge(&mut self, e: EdgeIdx) -> EdgeIdx {
        let e_sym = sym(e);

        let e_left_prev = self.lprev(e);
        let e_sym_left_prev = self.lprev(e_sym);
        let e_origin_prev = self.oprev(e);
        let e_sym_origin_prev = self.oprev(e_sym);

        self.pool.edges[e_left_prev as usize].left_next = self.pool.edges[e as usize].left_next;
        self.pool.edges[e_sym_left_prev as usize].left_next =
            self.pool.edges[e_sym as usize].left_next;

        self.pool.edges[e_origin_prev as usize].origin_next =
            self.pool.edges[e_sym as usize].origin_next;
        self.pool.edges[e_sym_origin_prev as usize].origin_next =
            self.pool.edges[e as usize].origin_next;

        let survivor = self.pool.edges[e_sym_origin_prev as usize].origin_next;
        self.pool.release_pair(pair_of(e));
        survivor
    }

    /// Unify two coincident vertices: re-thread all of `merge`'s incident
    /// edges into `org`'s origin cycle ordered by edge angle around the
    /// shared point, then release `merge`. An edge directly connecting the
    /// two is degenerate and removed instead.
    pub fn merge_vertexes(&mut self, org: VertIdx, merge: VertIdx, tolerance: Real) {
        let e_merge_start = match self.pool.verts[merge as usize].as_ref() {
            Some(v) => v.edge,
            None => return,
        };

        tracing::trace!(org, merge, "merge coincident vertices");

        let mut e_merge = e_merge_start;
        loop {
            let e_merge_next = self.onext(e_merge);
            if self.pool.edges[sym(e_merge) as usize].vertex == org {
                let survivor = self.remove_edge(e_merge);
                if let Some(v) = self.pool.verts[org as usize].as_mut() {
                    v.edge = survivor;
                }
                self.pool.release_vertex(merge);
                return;
            }
            e_merge = e_merge_next;
            if e_merge == e_merge_start {
                break;
            }
        }

        let org_pt = match self.pool.verts[org as usize].as_ref() {
            Some(v) => v.origin,
            None => return,
        };
        let mut e_org = self.pool.verts[org as usize].as_ref().unwrap().edge;
        let mut l_a = edge_angle_between(
            self.dst_vec(e_org) - org_pt,
            self.dst_vec(self.onext(e_org)) - org_pt,
        );

        let mut e_merge = e_merge_start;
        loop {
            let e_merge_next = self.onext(e_merge);

            let mut guard = self.pool.edges.len();
            loop {
                let r_a = edge_angle_between(
                    self.dst_vec(e_org) - org_pt,
                    self.dst_vec(e_merge) - org_pt,
                );
                if edge_angle_below_tolerance(r_a, tolerance) {
                    // coincident directions; the overlap is resolved by the
                    // intersection pass, keep both edges in place
                    break;
                } else if r_a < l_a || guard == 0 {
                    self.insert_into_ring(e_org, e_merge);
                    self.pool.edges[e_merge as usize].origin = org_pt;
                    self.pool.edges[e_merge as usize].vertex = org;
                    l_a = r_a;
                    break;
                } else {
                    e_org = self.onext(e_org);
                    l_a = edge_angle_between(
                        self.dst_vec(e_org) - org_pt,
                        self.dst_vec(self.onext(e_org)) - org_pt,
                    );
                    guard -= 1;
                }
            }

            e_merge = e_merge_next;
            if e_merge == e_merge_start {
                break;
            }
        }

        self.pool.release_vertex(merge);
    }

    /// Splice `r` out of its old origin cycle and insert it after `l`.
    fn insert_into_ring(&mut self, l: EdgeIdx, r: EdgeIdx) {
        let l_next = self.onext(l);

        if self.onext(r) != r {
            let r_origin_prev = self.oprev(r);
            let r_left_prev = self.lprev(r);
            self.pool.edges[r_origin_prev as usize].origin_next =
                self.pool.edges[r as usize].origin_next;
            self.pool.edges[r_left_prev as usize].left_next =
                self.pool.edges[r as usize].left_next;
        }

        self.pool.edges[r as usize].origin_next = l_next;
        self.pool.edges[sym(r) as usize].left_next = l;
        self.pool.edges[sym(l_next) as usize].left_next = r;
        self.pool.edges[l as usize].origin_next = r;
    }

    /// Strip zero-length edges from a contour loop, dropping the whole loop
    /// when fewer than three edges remain. Returns a surviving loop edge or
    /// INVALID, decrementing `count` per removed edge when provided.
    pub fn remove_degenerate_edges(
        &mut self,
        start: EdgeIdx,
        mut count: Option<&mut u32>,
        tolerance: Real,
    ) -> EdgeIdx {
        if start == INVALID {
            return INVALID;
        }

        let mut e_end = start;
        let mut e = start;
        loop {
            let mut e_lnext = self.lnext(e);

            if vert_eq(self.org_vec(e), self.dst_vec(e), tolerance) && self.lnext(e_lnext) != e {
                if e_end == e {
                    e_end = e_lnext;
                }
                // zero-length edge: fuse its endpoints, drop the origin
                let keep = self.pool.edges[sym(e) as usize].vertex;
                let drop = self.pool.edges[e as usize].vertex;
                let survivor = self.remove_edge(e);
                if let Some(v) = self.pool.verts[keep as usize].as_mut() {
                    v.edge = survivor;
                }
                if keep != drop {
                    self.pool.release_vertex(drop);
                }

                e = e_lnext;
                e_lnext = self.lnext(e);
                if let Some(ref mut n) = count {
                    **n = n.saturating_sub(1);
                }
            }

            if self.lnext(e_lnext) == e {
                // degenerate contour of one or two edges
                if e_lnext != e {
                    self.pool
                        .release_vertex(self.pool.edges[e_lnext as usize].vertex);
                    self.pool
                        .release_vertex(self.pool.edges[sym(e_lnext) as usize].vertex);
                    self.pool.release_pair(pair_of(e_lnext));
                    if let Some(ref mut n) = count {
                        **n = n.saturating_sub(1);
                    }
                }
                self.pool.release_vertex(self.pool.edges[e as usize].vertex);
                self.pool
                    .release_vertex(self.pool.edges[sym(e) as usize].vertex);
                self.pool.release_pair(pair_of(e));
                if let Some(ref mut n) = count {
                    **n = n.saturating_sub(1);
                }
                return INVALID;
            }

            e = self.lnext(e);
            if e == e_end {
                break;
            }
        }

        e_end
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_contour(mesh: &mut Mesh, points: &[(f32, f32)]) -> EdgeIdx {
        let mut e = INVALID;
        for &(x, y) in points {
            e = mesh.push_vertex_edge(e, Point::new(x, y), false);
        }
        e
    }

    #[test]
    fn sym_involution() {
        for e in 0u32..16 {
            assert_eq!(sym(sym(e)), e);
        }
    }

    #[test]
    fn self_loop_closes_both_cycles() {
        let mut mesh = Mesh::new();
        let p = mesh.make_edge_loop(Point::new(1.0, 2.0));
        let (l, r) = pair_halves(p);
        assert_eq!(mesh.lnext(l), l);
        assert_eq!(mesh.lnext(r), r);
        assert_eq!(mesh.onext(l), r);
        assert_eq!(mesh.onext(r), l);
        assert_eq!(mesh.org_vec(l), Point::new(1.0, 2.0));
        assert_eq!(mesh.dst_vec(l), Point::new(1.0, 2.0));
    }

    #[test]
    fn contour_loops_stay_closed() {
        let mut mesh = Mesh::new();
        let e = push_contour(
            &mut mesh,
            &[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)],
        );
        // The cursor edge's left loop and its symmetric loop both have four
        // edges after four pushes.
        assert_eq!(mesh.face_len(e), 4);
        assert_eq!(mesh.face_len(sym(e)), 4);

        // origin rings close
        let start = e;
        let mut cur = e;
        let mut steps = 0;
        loop {
            cur = mesh.onext(cur);
            steps += 1;
            assert!(steps <= 8, "origin ring does not close");
            if cur == start {
                break;
            }
        }
    }

    #[test]
    fn split_keeps_destination_at_cursor() {
        let mut mesh = Mesh::new();
        let e = push_contour(&mut mesh, &[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0)]);
        // cursor edge destination is the most recently pushed point
        assert_eq!(mesh.dst_vec(e), Point::new(2.0, 2.0));
        assert_eq!(mesh.org_vec(e), Point::new(0.0, 0.0));
    }

    #[test]
    fn connect_splits_face_loop() {
        let mut mesh = Mesh::new();
        let e = push_contour(
            &mut mesh,
            &[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)],
        );
        // Split the quad along a diagonal; both resulting loops are
        // triangles.
        let e_dst = mesh.lprev(e);
        let diag = mesh.connect_edges(e, e_dst).unwrap();
        assert_eq!(mesh.face_len(diag), 3);
        assert_eq!(mesh.face_len(sym(diag)), 3);
    }

    #[test]
    fn connect_rejects_degenerate_request() {
        let mut mesh = Mesh::new();
        let e = push_contour(&mut mesh, &[(0.0, 0.0), (4.0, 0.0), (2.0, 2.0)]);
        assert!(mesh.connect_edges(e, e).is_none());
        assert!(mesh.connect_edges(e, sym(e)).is_none());
    }

    #[test]
    fn update_info_orients_pairs() {
        let mut mesh = Mesh::new();
        let e = push_contour(&mut mesh, &[(0.0, 0.0), (4.0, 1.0), (2.0, 2.0)]);
        let p = pair_of(e);
        mesh.update_info(p);
        // e runs (0,0) -> (2,2): rightward
        assert!(mesh.goes_right(e));
        assert!(mesh.goes_left(sym(e)));
        assert!(mesh.direction(e) > 0.0);
    }

    #[test]
    fn degenerate_contour_is_dropped() {
        let mut mesh = Mesh::new();
        let e = push_contour(&mut mesh, &[(0.0, 0.0), (1.0, 1.0)]);
        let mut count = 2u32;
        let out = mesh.remove_degenerate_edges(e, Some(&mut count), 1e-6);
        assert_eq!(out, INVALID);
        assert_eq!(mesh.pool.live_vertex_count(), 0);
    }

    #[test]
    fn zero_length_edge_is_fused() {
        let mut mesh = Mesh::new();
        // duplicate interior point produces a zero-length edge when pushed
        // without the cursor-level filter
        let mut e = INVALID;
        for &(x, y) in &[(0.0f32, 0.0), (4.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)] {
            e = mesh.push_vertex_edge(e, Point::new(x, y), false);
        }
        let mut count = 5u32;
        let out = mesh.remove_degenerate_edges(e, Some(&mut count), 1e-6);
        assert_ne!(out, INVALID);
        assert_eq!(count, 4);
        assert_eq!(mesh.face_len(out), 4);
    }

    #[test]
    fn merge_vertexes_joins_rings() {
        let mut mesh = Mesh::new();
        // two triangles sharing the origin point, built as separate contours
        let _a = push_contour(&mut mesh, &[(0.0, 0.0), (2.0, 1.0), (2.0, -1.0)]);
        let b = push_contour(&mut mesh, &[(0.0, 0.0), (-2.0, -1.0), (-2.0, 1.0)]);

        let v_a = 0; // first pushed vertex of contour a
        let v_b = mesh.pool.edges[b as usize].vertex;
        assert_ne!(v_a, v_b);

        mesh.merge_vertexes(v_a, v_b, 1e-6);
        assert!(mesh.pool.verts[v_b as usize].is_none());

        // the fused ring contains all four incident edges
        let start = mesh.pool.verts[v_a as usize].as_ref().unwrap().edge;
        let mut cur = start;
        let mut n = 0;
        loop {
            assert_eq!(mesh.pool.edges[cur as usize].vertex, v_a);
            cur = mesh.onext(cur);
            n += 1;
            assert!(n <= 8, "ring does not close after merge");
            if cur == start {
                break;
            }
        }
        assert_eq!(n, 4);
    }
}
