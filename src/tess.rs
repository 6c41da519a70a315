// Copyright 2025 the polytess authors
// License: MIT
//
// The tessellator: contour construction, the vertex-event sweep, and
// monotone-region triangulation.
//
// Contours are pushed into the half-edge mesh, then `prepare` runs the
// sweep (vertex merging, intersection resolution, event classification,
// winding propagation, diagonal insertion) followed by triangulation of
// every winding-selected monotone region. `write` replays the result into
// a caller-supplied sink; the sink's running counters let several
// tessellations append into one shared buffer.

use tracing::trace;

use crate::dict::{EdgeDict, IntersectionEvent, NodeIdx};
use crate::geom::{is_ccw, vert_eq, vert_leq, Point, Real};
use crate::mesh::{pair_halves, pair_of, sym, EdgeIdx, Mesh, PairIdx, VertIdx, INVALID};
use crate::priorityq::VertexQueue;
use crate::sweep::{Helper, VertexType};

/// Winding rule deciding which regions count as interior.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Winding {
    EvenOdd,
    NonZero,
    Positive,
    Negative,
    AbsGeqTwo,
}

#[inline]
pub fn is_winding_inside(rule: Winding, n: i16) -> bool {
    match rule {
        Winding::EvenOdd => n & 1 != 0,
        Winding::NonZero => n != 0,
        Winding::Positive => n > 0,
        Winding::Negative => n < 0,
        Winding::AbsGeqTwo => n >= 2 || n <= -2,
    }
}

/// Receives the tessellation output.
pub trait TessSink {
    fn push_vertex(&mut self, index: u32, point: Point, value: Real);
    fn push_triangle(&mut self, triangle: [u32; 3]);
}

/// Output accumulator: the sink plus running totals, so several
/// `prepare`/`write` passes can append into one vertex/index buffer.
pub struct TessResult<'a> {
    pub target: &'a mut dyn TessSink,
    pub nvertexes: u32,
    pub nfaces: u32,
}

impl<'a> TessResult<'a> {
    pub fn new(target: &'a mut dyn TessSink) -> Self {
        TessResult {
            target,
            nvertexes: 0,
            nfaces: 0,
        }
    }
}

/// An open contour under construction.
#[derive(Clone, Debug)]
pub struct Cursor {
    edge: EdgeIdx,
    is_clockwise: bool,
    pub count: u32,
    closed: bool,
}

/// The polygon tessellator.
///
/// Collinear overlapping contour edges are outside the supported input
/// envelope: they are detected and logged but not resolved.
pub struct Tessellator {
    mesh: Mesh,
    winding: Winding,
    antialias: Real,
    tolerance: Real,
    bmin: Point,
    bmax: Point,
    nvertexes: u32,
    mark: u8,
    vertex_offset: u32,
}

impl Tessellator {
    pub fn new() -> Self {
        Tessellator {
            mesh: Mesh::new(),
            winding: Winding::NonZero,
            antialias: 0.0,
            tolerance: Real::EPSILON,
            bmin: Point::new(0.0, 0.0),
            bmax: Point::new(0.0, 0.0),
            nvertexes: 0,
            mark: 0,
            vertex_offset: 0,
        }
    }

    /// Reserve arena capacity ahead of contour construction.
    pub fn preallocate(&mut self, n: usize) {
        self.mesh.pool.preallocate_vertexes(n);
        self.mesh.pool.preallocate_edges(n);
    }

    pub fn set_winding_rule(&mut self, rule: Winding) {
        self.winding = rule;
    }

    pub fn winding_rule(&self) -> Winding {
        self.winding
    }

    pub fn set_antialias_value(&mut self, value: Real) {
        self.antialias = value;
    }

    pub fn antialias_value(&self) -> Real {
        self.antialias
    }

    /// Number of accepted contour points so far.
    pub fn vertex_count(&self) -> u32 {
        self.nvertexes
    }

    /// Bounding box of all accepted contour points, (min, max).
    pub fn bounds(&self) -> (Point, Point) {
        (self.bmin, self.bmax)
    }

    // ─────────────── Contour construction ───────────────

    /// Open a contour. `clockwise` sets the sign of the winding
    /// contribution of its edges.
    pub fn begin_contour(&self, clockwise: bool) -> Cursor {
        Cursor {
            edge: INVALID,
            is_clockwise: clockwise,
            count: 0,
            closed: false,
        }
    }

    /// Append a point, skipping it when fuzzy-equal to the previous one.
    pub fn push_vertex(&mut self, cursor: &mut Cursor, point: Point) -> bool {
        if cursor.closed {
            return false;
        }
        if cursor.edge != INVALID
            && vert_eq(self.mesh.dst_vec(cursor.edge), point, self.tolerance)
        {
            return false;
        }

        trace!(?point, "push");
        cursor.edge = self
            .mesh
            .push_vertex_edge(cursor.edge, point, cursor.is_clockwise);
        cursor.count += 1;

        if self.nvertexes == 0 {
            self.bmin = point;
            self.bmax = point;
        } else {
            if point.x < self.bmin.x {
                self.bmin.x = point.x;
            }
            if point.x > self.bmax.x {
                self.bmax.x = point.x;
            }
            if point.y < self.bmin.y {
                self.bmin.y = point.y;
            }
            if point.y > self.bmax.y {
                self.bmax.y = point.y;
            }
        }
        self.nvertexes += 1;
        true
    }

    /// Finalize the loop, stripping degenerate geometry. Returns false and
    /// contributes nothing when fewer than three effective edges remain.
    pub fn close_contour(&mut self, cursor: &mut Cursor) -> bool {
        if cursor.closed {
            return false;
        }
        cursor.closed = true;

        cursor.edge =
            self.mesh
                .remove_degenerate_edges(cursor.edge, Some(&mut cursor.count), self.tolerance);

        if cursor.edge != INVALID {
            self.mesh.pool.alloc_face(cursor.edge);
            trace!(count = cursor.count, "contour closed");
            true
        } else {
            trace!("dropped degenerate contour");
            self.mesh.pool.trim_vertexes();
            false
        }
    }

    // ─────────────── Preparation and output ───────────────

    /// Run the sweep and triangulation, accumulating counts into `res`.
    /// Returns true when the pass produced output vertices.
    pub fn prepare(&mut self, res: &mut TessResult) -> bool {
        self.vertex_offset = res.nvertexes;
        self.compute_interior();
        self.tessellate_interior();

        for i in 0..self.mesh.pool.faces.len() {
            let e = self.mesh.pool.faces[i].edge;
            if e != INVALID {
                let w = self.mesh.pool.edges[e as usize].real_winding;
                self.mesh.pool.faces[i].inside = is_winding_inside(self.winding, w);
            }
        }

        res.nvertexes += self.mesh.pool.export_vertexes.len() as u32;
        res.nfaces += self.mesh.pool.face_edges.len() as u32;

        !self.mesh.pool.export_vertexes.is_empty()
    }

    /// Emit vertices and triangles through the sink. Safe to call more
    /// than once; triangles are deduplicated per call via marks.
    pub fn write(&mut self, res: &mut TessResult) -> bool {
        for i in 0..self.mesh.pool.export_vertexes.len() {
            let v = self.mesh.pool.export_vertexes[i];
            if let Some(vx) = self.mesh.pool.verts[v as usize].as_ref() {
                let index = vx.out_idx + self.vertex_offset;
                res.target.push_vertex(index, vx.origin, 1.0);
            }
        }

        let mark = self.next_mark();
        for i in 0..self.mesh.pool.face_edges.len() {
            let start = self.mesh.pool.face_edges[i];
            if start == INVALID {
                continue;
            }
            if self.mesh.pool.edges[start as usize].mark == mark {
                continue;
            }
            if !is_winding_inside(
                self.winding,
                self.mesh.pool.edges[start as usize].real_winding,
            ) {
                continue;
            }

            let mut triangle = [0u32; 3];
            let mut count = 0usize;
            let mut complete = true;
            let mut e = start;
            loop {
                if count < 3 {
                    let vi = self.mesh.pool.edges[e as usize].vertex;
                    match self.mesh.pool.verts[vi as usize].as_ref() {
                        Some(vx) => triangle[count] = vx.out_idx + self.vertex_offset,
                        None => complete = false,
                    }
                }
                self.mesh.pool.edges[e as usize].mark = mark;
                count += 1;
                e = self.mesh.lnext(e);
                if e == start {
                    break;
                }
            }

            if count == 3 && complete {
                res.target.push_triangle(triangle);
            }
        }
        true
    }

    // ─────────────── Sweep ───────────────

    fn compute_interior(&mut self) {
        let mut dict = EdgeDict::with_capacity(8);
        let mut pq = VertexQueue::with_capacity(self.mesh.pool.verts.len());

        for i in 0..self.mesh.pool.verts.len() {
            let origin = match self.mesh.pool.verts[i].as_ref() {
                Some(vx) => vx.origin,
                None => continue,
            };
            let handle = pq.insert(i as VertIdx, origin);
            self.mesh.pool.verts[i].as_mut().unwrap().pq_handle = handle;
        }
        pq.init();

        loop {
            let v = pq.extract_min();
            if v == INVALID {
                break;
            }

            // coalesce fuzzy-coincident vertices before classifying
            loop {
                let next = pq.get_min();
                if next == INVALID {
                    break;
                }
                let a = match self.mesh.pool.verts[v as usize].as_ref() {
                    Some(vx) => vx.origin,
                    None => break,
                };
                let b = match self.mesh.pool.verts[next as usize].as_ref() {
                    Some(vx) => vx.origin,
                    None => {
                        pq.extract_min();
                        continue;
                    }
                };
                if !vert_eq(a, b, self.tolerance) {
                    break;
                }
                let next = pq.extract_min();
                self.mesh.merge_vertexes(v, next, self.tolerance);
            }

            let origin = match self.mesh.pool.verts[v as usize].as_ref() {
                Some(vx) => vx.origin,
                None => continue,
            };
            dict.update(origin);

            self.sweep_vertex(&mut pq, &mut dict, v);
        }
    }

    fn sweep_vertex(&mut self, pq: &mut VertexQueue, dict: &mut EdgeDict, v: VertIdx) {
        let v_edge = match self.mesh.pool.verts[v as usize].as_ref() {
            Some(vx) if vx.edge != INVALID => vx.edge,
            _ => return,
        };

        trace!(v, origin = ?dict.event, "sweep event");

        // Intersection pre-pass over all outgoing edges. Resolving an
        // intersection can restructure the mesh around the event, so this
        // must finish before winding and type computation.
        let mut e = v_edge;
        loop {
            self.mesh.update_info(pair_of(e));
            if self.mesh.goes_right(e) {
                if let Some((node, point, ev)) =
                    dict.check_for_intersects(&self.mesh, e, self.tolerance)
                {
                    self.process_intersect(pq, dict, v, node, e, point, ev);
                }
            }
            e = self.mesh.onext(e);
            let anchor = match self.mesh.pool.verts[v as usize].as_ref() {
                Some(vx) => vx.edge,
                None => break,
            };
            if e == anchor {
                break;
            }
        }

        // Rotate to the first left non-convex angle so winding propagation
        // runs in a stable order regardless of construction history.
        let e_end = self.get_first_edge(v);
        let mut e = e_end;
        loop {
            // save the successor: new diagonals are inserted between e and
            // its onext and must not be classified at this event
            let e_next = self.mesh.onext(e);
            let full = pair_of(e);

            if self.mesh.goes_right(e) {
                let kind;
                if self.mesh.goes_right(e_next) {
                    if self.mesh.direction(e) > self.mesh.direction(e_next) {
                        // right convex: the interior splits here
                        kind = VertexType::Split;
                        let below = dict.get_edge_below(&self.mesh, pair_of(e_next));
                        if below == INVALID {
                            self.mesh.pool.edges[e as usize].real_winding = 0;
                            self.mesh.pool.edges[e_next as usize].real_winding = 0;
                        } else {
                            let w = dict.node(below).winding_above;
                            self.mesh.pool.edges[e as usize].real_winding = w;
                            self.mesh.pool.edges[sym(e_next) as usize].real_winding = w;
                        }
                    } else {
                        // right non-convex: a new boundary begins
                        kind = VertexType::Start;
                        self.mesh.pool.edges_of_interest.push(e);
                        let w = self.mesh.pool.edges[sym(e) as usize].real_winding
                            + self.mesh.pool.edges[sym(e) as usize].winding as i16;
                        self.mesh.pool.edges[e as usize].real_winding = w;
                        self.mesh.pool.edges[sym(e_next) as usize].real_winding = w;
                    }
                } else {
                    // right-to-left: the boundary continues above
                    kind = VertexType::RegularBottom;
                    let w = self.mesh.pool.edges[sym(e_next) as usize].real_winding;
                    self.mesh.pool.edges[e as usize].real_winding = w;
                }

                let w = self.mesh.pool.edges[e as usize].real_winding;
                trace!(e, ?kind, winding = w, "outgoing edge");
                if is_winding_inside(self.winding, w) {
                    self.on_vertex(dict, kind, full, e, e_next);
                }

                // every outgoing edge enters the dictionary
                if self.mesh.pool.pairs[full as usize].node == INVALID {
                    let w = self.mesh.pool.edges[e as usize].real_winding;
                    let node = dict.push(&self.mesh, full, w);
                    self.mesh.pool.pairs[full as usize].node = node;
                    if node != INVALID && is_winding_inside(self.winding, w) {
                        dict.node_mut(node).helper = Helper {
                            e1: e,
                            e2: e_next,
                            kind,
                        };
                    }
                }
            } else {
                let kind;
                if self.mesh.goes_right(e_next) {
                    // left-to-right: the boundary continues below
                    kind = VertexType::RegularTop;
                    let w = self.mesh.pool.edges[e as usize].real_winding;
                    self.mesh.pool.edges[sym(e_next) as usize].real_winding = w;
                } else if self.mesh.direction(e) > self.mesh.direction(e_next) {
                    // left convex: two boundaries merge
                    kind = VertexType::Merge;
                } else {
                    // left non-convex: a boundary ends
                    kind = VertexType::End;
                }

                let w = self.mesh.pool.edges[e as usize].real_winding;
                trace!(e, ?kind, winding = w, "incoming edge");
                if is_winding_inside(self.winding, w) {
                    self.on_vertex(dict, kind, full, e, e_next);
                }

                // incoming edges leave the dictionary
                let node = self.mesh.pool.pairs[full as usize].node;
                if node != INVALID {
                    dict.pop(node);
                    self.mesh.pool.pairs[full as usize].node = INVALID;
                }
            }

            e = e_next;
            if e == e_end {
                break;
            }
        }

        let out = self.mesh.pool.export_vertexes.len() as u32;
        if let Some(vx) = self.mesh.pool.verts[v as usize].as_mut() {
            vx.out_idx = out;
        }
        self.mesh.pool.export_vertexes.push(v);
    }

    /// Per-classification dictionary and diagonal maintenance, the helper
    /// rule of monotone decomposition.
    fn on_vertex(
        &mut self,
        dict: &mut EdgeDict,
        kind: VertexType,
        full: PairIdx,
        e: EdgeIdx,
        e_next: EdgeIdx,
    ) {
        let e_prev = self.mesh.lprev(e);
        match kind {
            VertexType::Start => {
                if self.mesh.pool.pairs[full as usize].node == INVALID {
                    let w = self.mesh.pool.edges[e as usize].real_winding;
                    let node = dict.push(&self.mesh, full, w);
                    self.mesh.pool.pairs[full as usize].node = node;
                }
                let node = self.mesh.pool.pairs[full as usize].node;
                if node != INVALID {
                    dict.node_mut(node).helper = Helper { e1: e, e2: e_next, kind };
                }
            }
            VertexType::End => {
                let prev_node = self.mesh.pool.pairs[pair_of(e_prev) as usize].node;
                if prev_node != INVALID {
                    let helper = dict.node(prev_node).helper;
                    if helper.kind == VertexType::Merge && helper.e1 != INVALID {
                        self.connect_to_helper(e, helper.e1);
                    }
                }
            }
            VertexType::Split => {
                let below = dict.get_edge_below(&self.mesh, pair_of(self.mesh.onext(e)));
                if below != INVALID {
                    let helper = dict.node(below).helper;
                    if helper.e1 != INVALID {
                        self.connect_to_helper(e, helper.e1);
                        dict.node_mut(below).helper = Helper { e1: e, e2: e_next, kind };
                    }
                }
                if self.mesh.pool.pairs[full as usize].node == INVALID {
                    let w = self.mesh.pool.edges[e as usize].real_winding;
                    let node = dict.push(&self.mesh, full, w);
                    self.mesh.pool.pairs[full as usize].node = node;
                }
                let node = self.mesh.pool.pairs[full as usize].node;
                if node != INVALID {
                    dict.node_mut(node).helper = Helper { e1: e, e2: e_next, kind };
                }
            }
            VertexType::Merge => {
                let prev_node = self.mesh.pool.pairs[pair_of(e_prev) as usize].node;
                if prev_node != INVALID {
                    let helper = dict.node(prev_node).helper;
                    if helper.kind == VertexType::Merge && helper.e1 != INVALID {
                        self.connect_to_helper(e, helper.e1);
                    }
                }
                let below = dict.get_edge_below(&self.mesh, pair_of(self.mesh.onext(e)));
                if below != INVALID {
                    let helper = dict.node(below).helper;
                    if helper.kind == VertexType::Merge && helper.e1 != INVALID {
                        self.connect_to_helper(e, helper.e1);
                    }
                    dict.node_mut(below).helper = Helper { e1: e, e2: e_next, kind };
                }
            }
            VertexType::RegularBottom => {
                let prev_pair = pair_of(e_prev);
                let prev_node = self.mesh.pool.pairs[prev_pair as usize].node;
                if prev_node != INVALID {
                    let helper = dict.node(prev_node).helper;
                    if helper.kind == VertexType::Merge && helper.e1 != INVALID {
                        self.connect_to_helper(e, helper.e1);
                    }
                    dict.pop(prev_node);
                    self.mesh.pool.pairs[prev_pair as usize].node = INVALID;
                }
                if self.mesh.pool.pairs[full as usize].node == INVALID {
                    let w = self.mesh.pool.edges[e as usize].real_winding;
                    let node = dict.push(&self.mesh, full, w);
                    self.mesh.pool.pairs[full as usize].node = node;
                }
                let node = self.mesh.pool.pairs[full as usize].node;
                if node != INVALID {
                    dict.node_mut(node).helper = Helper { e1: e, e2: e_next, kind };
                }
            }
            VertexType::RegularTop => {
                let below = dict.get_edge_below(&self.mesh, pair_of(self.mesh.onext(e)));
                if below != INVALID {
                    let helper = dict.node(below).helper;
                    if helper.kind == VertexType::Merge && helper.e1 != INVALID {
                        self.connect_to_helper(e, helper.e1);
                    }
                    dict.node_mut(below).helper = Helper { e1: e, e2: e_next, kind };
                }
            }
        }
    }

    /// Insert a diagonal from the event to a helper vertex and remember it
    /// as a region seed.
    fn connect_to_helper(&mut self, source: EdgeIdx, target: EdgeIdx) {
        let e_org = self.mesh.lprev(source);
        trace!(source, target, "connect diagonal");
        if let Some(e_new) = self.mesh.connect_edges(e_org, target) {
            self.mesh.pool.edges_of_interest.push(e_new);
        }
    }

    /// Rotate to the canonical first edge: the first left non-convex angle
    /// counterclockwise.
    fn get_first_edge(&self, v: VertIdx) -> EdgeIdx {
        let start = self.mesh.pool.verts[v as usize].as_ref().unwrap().edge;
        let mut e = start;
        loop {
            let e_next = self.mesh.onext(e);
            if self.mesh.goes_right(e) {
                if self.mesh.goes_right(e_next) {
                    if self.mesh.direction(e) > self.mesh.direction(e_next) {
                        // convex right angle is the solution
                        return e;
                    }
                } else {
                    // right-to-left angle, the next edge is the solution
                    return e_next;
                }
            } else if self.mesh.goes_left(e_next)
                && self.mesh.direction(e) > self.mesh.direction(e_next)
            {
                // convex left angle, the next edge is the solution
                return e_next;
            }
            e = e_next;
            if e == start {
                break;
            }
        }
        start
    }

    // ─────────────── Intersections ───────────────

    fn process_intersect(
        &mut self,
        pq: &mut VertexQueue,
        dict: &mut EdgeDict,
        v: VertIdx,
        node: NodeIdx,
        edge: EdgeIdx,
        point: Point,
        ev: IntersectionEvent,
    ) {
        trace!(?point, ?ev, "intersection");

        match ev {
            IntersectionEvent::Regular => {
                // split both edges at the point, re-aim the dictionary
                // record, then re-check the surviving outgoing segment
                let pair1 = dict.node(node).pair;
                let (l, r) = pair_halves(pair1);
                let e1 = if self.mesh.pool.pairs[pair1 as usize].inverted {
                    r
                } else {
                    l
                };
                let vertex = self.split_edge_pair(e1, edge, point);
                self.fix_dict_node(dict, node);

                if let Some((n2, p2, ev2)) =
                    dict.check_for_intersects(&self.mesh, edge, self.tolerance)
                {
                    self.process_intersect(pq, dict, v, n2, edge, p2, ev2);
                }

                let origin = self.mesh.pool.verts[vertex as usize]
                    .as_ref()
                    .unwrap()
                    .origin;
                let handle = pq.insert(vertex, origin);
                if let Some(vx) = self.mesh.pool.verts[vertex as usize].as_mut() {
                    vx.pq_handle = handle;
                }
            }
            IntersectionEvent::EventIsIntersection => {
                // the event vertex sits in the interior of an active edge:
                // split the edge there and fold the split vertex into the
                // event so the loops interconnect
                let pair1 = dict.node(node).pair;
                let (l, r) = pair_halves(pair1);
                let e1 = if self.mesh.pool.pairs[pair1 as usize].inverted {
                    r
                } else {
                    l
                };
                let vertex = self.split_single(e1, point);
                self.fix_dict_node(dict, node);
                self.mesh.merge_vertexes(v, vertex, self.tolerance);
            }
            IntersectionEvent::EdgeOverlap1
            | IntersectionEvent::EdgeOverlap2
            | IntersectionEvent::EdgeConnection1
            | IntersectionEvent::EdgeConnection2 => {
                // collinear overlaps and endpoint touches are outside the
                // supported envelope; the mesh is left unmodified
                tracing::debug!(?ev, "unresolved intersection kind");
            }
        }
    }

    /// Split both conflicting edges at `point`, sharing one new vertex.
    /// Returns the vertex.
    fn split_edge_pair(&mut self, e_org1: EdgeIdx, e_org2: EdgeIdx, point: Point) -> VertIdx {
        let (e_org1, e_org2) = if self.mesh.direction(e_org2) > self.mesh.direction(e_org1) {
            (e_org2, e_org1)
        } else {
            (e_org1, e_org2)
        };

        // primary split
        let p_new = self.mesh.pool.alloc_pair();
        let (e_new, _) = pair_halves(p_new);
        let v = self.mesh.pool.alloc_vertex();
        {
            let vx = self.mesh.pool.verts[v as usize].as_mut().unwrap();
            vx.origin = point;
            vx.edge = e_new;
        }
        let far1 = self.mesh.pool.edges[sym(e_org1) as usize].vertex;
        self.mesh.split_edge_loops(e_org1, e_new, v);
        if let Some(fx) = self.mesh.pool.verts[far1 as usize].as_mut() {
            if fx.edge == sym(e_org1) {
                fx.edge = sym(e_new);
            }
        }
        let o_prev_org = e_new;
        let o_prev_new = sym(e_org1);
        self.mesh.update_info(pair_of(e_new));

        // secondary split, joined at the shared vertex
        let far2 = self.mesh.pool.edges[sym(e_org2) as usize].vertex;
        let p2 = self.mesh.pool.alloc_pair();
        let (e_new2, _) = pair_halves(p2);
        self.mesh.split_edge_loops(e_org2, e_new2, v);
        self.mesh.join_edge_loops(e_org2, o_prev_org);
        self.mesh.join_edge_loops(sym(e_new2), o_prev_new);
        if let Some(fx) = self.mesh.pool.verts[far2 as usize].as_mut() {
            if fx.edge == sym(e_org2) {
                fx.edge = sym(e_new2);
            }
        }
        self.mesh.update_info(pair_of(e_new2));

        v
    }

    /// Split one edge at `point`, returning the new vertex.
    fn split_single(&mut self, e_org: EdgeIdx, point: Point) -> VertIdx {
        let p_new = self.mesh.pool.alloc_pair();
        let (e_new, _) = pair_halves(p_new);
        let v = self.mesh.pool.alloc_vertex();
        {
            let vx = self.mesh.pool.verts[v as usize].as_mut().unwrap();
            vx.origin = point;
            vx.edge = e_new;
        }
        let far = self.mesh.pool.edges[sym(e_org) as usize].vertex;
        self.mesh.split_edge_loops(e_org, e_new, v);
        if let Some(fx) = self.mesh.pool.verts[far as usize].as_mut() {
            if fx.edge == sym(e_org) {
                fx.edge = sym(e_new);
            }
        }
        self.mesh.update_info(pair_of(e_org));
        self.mesh.update_info(pair_of(e_new));
        v
    }

    /// Re-aim a dictionary record at its pair's new far endpoint after a
    /// split shortened the edge.
    fn fix_dict_node(&self, dict: &mut EdgeDict, node: NodeIdx) {
        let pair = dict.node(node).pair;
        let (l, r) = pair_halves(pair);
        let org = self.mesh.pool.edges[l as usize].origin;
        let dst = self.mesh.pool.edges[r as usize].origin;
        let inverted = self.mesh.pool.pairs[pair as usize].inverted;

        let n = dict.node_mut(node);
        if inverted {
            n.norm = org - dst;
            n.dst = org;
        } else {
            n.norm = dst - org;
            n.dst = dst;
        }
    }

    // ─────────────── Triangulation ───────────────

    fn tessellate_interior(&mut self) {
        let mark = self.next_mark();

        for i in 0..self.mesh.pool.edges_of_interest.len() {
            let seed = self.mesh.pool.edges_of_interest[i];
            if seed == INVALID {
                continue;
            }
            let (l, r) = pair_halves(pair_of(seed));

            if self.mesh.pool.edges[l as usize].mark != mark {
                let w = self.mesh.pool.edges[l as usize].real_winding;
                if is_winding_inside(self.winding, w) {
                    self.tessellate_mono_region(l, mark);
                }
            }
            if self.mesh.pool.edges[r as usize].mark != mark {
                let w = self.mesh.pool.edges[r as usize].real_winding;
                if is_winding_inside(self.winding, w) {
                    self.tessellate_mono_region(r, mark);
                }
            }
        }
    }

    /// Triangulate one y-monotone region by the two-chain greedy walk,
    /// then fan out the remainder from the leftmost vertex. Returns false
    /// when a diagonal cannot be placed; the region is left untriangulated
    /// rather than emitting corrupt triangles.
    fn tessellate_mono_region(&mut self, edge: EdgeIdx, mark: u8) -> bool {
        let edge = self.mesh.remove_degenerate_edges(edge, None, self.tolerance);
        if edge == INVALID {
            return false;
        }

        let mut up = edge;
        // All edges are oriented CCW around the region. Locate the edge
        // whose origin is rightmost; the sweep leaves the seed close to it.
        while vert_leq(self.mesh.dst_vec(up), self.mesh.org_vec(up)) {
            up = self.mesh.lprev(up);
        }
        while vert_leq(self.mesh.org_vec(up), self.mesh.dst_vec(up)) {
            up = self.mesh.lnext(up);
        }
        let mut lo = self.mesh.lprev(up);

        self.mesh.pool.edges[up as usize].mark = mark;
        self.mesh.pool.edges[lo as usize].mark = mark;

        while self.mesh.lnext(up) != lo {
            if vert_leq(self.mesh.dst_vec(up), self.mesh.org_vec(lo)) {
                // up's destination is on the left: safe to form triangles
                // from lo's origin. The direction test keeps progress even
                // when some triangles come out CW, as long as the chains
                // are truly monotone.
                while self.mesh.lnext(lo) != up
                    && (self.mesh.goes_left(self.mesh.lnext(lo))
                        || is_ccw(
                            self.mesh.org_vec(lo),
                            self.mesh.dst_vec(lo),
                            self.mesh.dst_vec(self.mesh.lnext(lo)),
                        ))
                {
                    let lnext = self.mesh.lnext(lo);
                    let diag = match self.mesh.connect_edges(lnext, lo) {
                        Some(d) => d,
                        None => return false,
                    };
                    self.mesh.pool.face_edges.push(diag);
                    lo = sym(diag);
                }
                lo = self.mesh.lprev(lo);
                self.mesh.pool.edges[lo as usize].mark = mark;
            } else {
                // lo's origin is on the left: make CCW triangles from up's
                // destination
                while self.mesh.lnext(lo) != up
                    && (self.mesh.goes_right(self.mesh.lprev(up))
                        || !is_ccw(
                            self.mesh.dst_vec(up),
                            self.mesh.org_vec(up),
                            self.mesh.org_vec(self.mesh.lprev(up)),
                        ))
                {
                    let lprev = self.mesh.lprev(up);
                    let diag = match self.mesh.connect_edges(up, lprev) {
                        Some(d) => d,
                        None => return false,
                    };
                    self.mesh.pool.face_edges.push(diag);
                    up = sym(diag);
                }
                up = self.mesh.lnext(up);
                self.mesh.pool.edges[up as usize].mark = mark;
            }
        }

        // lo's origin and up's destination now meet at the leftmost vertex;
        // fan-triangulate whatever remains.
        while self.mesh.lnext(self.mesh.lnext(lo)) != up {
            let lnext = self.mesh.lnext(lo);
            let diag = match self.mesh.connect_edges(lnext, lo) {
                Some(d) => d,
                None => return false,
            };
            self.mesh.pool.face_edges.push(diag);
            lo = sym(diag);
            self.mesh.pool.edges[lo as usize].mark = mark;
        }

        self.mesh.pool.face_edges.push(lo);
        true
    }

    fn next_mark(&mut self) -> u8 {
        self.mark = self.mark.wrapping_add(1);
        if self.mark == 0 {
            self.mark = 1;
        }
        self.mark
    }
}

impl Default for Tessellator {
    fn default() -> Self {
        Self::new()
    }
}
