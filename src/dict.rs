// Copyright 2025 the polytess authors
// License: MIT
//
// The edge dictionary: the set of edges currently crossing the sweep line.
//
// A sentinel-headed doubly-linked list in a node arena, ordered by the
// edge's current intersection with the sweep line (y, then the pair's
// pseudo-angle direction). `update` re-evaluates every crossing as the
// sweep advances; this linear refresh is the dominant per-event cost for
// wide polygons.
//
// Each node carries the winding number immediately above its edge and the
// helper vertex of the classic monotone-decomposition rule.

use crate::geom::{bbox_overlaps, vert_eq, Point, Real};
use crate::mesh::{pair_halves, EdgeIdx, Mesh, PairIdx, INVALID};
use crate::sweep::Helper;

pub type NodeIdx = u32;

/// Head sentinel index.
pub const DICT_HEAD: NodeIdx = 0;

/// How a candidate edge conflicts with an active crossing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IntersectionEvent {
    /// Interior crossing: both edges must be split at the point.
    Regular,
    /// The event point itself lies inside the active edge.
    EventIsIntersection,
    /// Collinear overlap ending on the active edge.
    EdgeOverlap1,
    /// Collinear overlap ending on the candidate edge.
    EdgeOverlap2,
    /// The active edge ends on the candidate edge.
    EdgeConnection1,
    /// The candidate edge ends on the active edge.
    EdgeConnection2,
}

#[derive(Clone, Debug)]
pub struct DictNode {
    /// Endpoint that coincided with the event when the edge was pushed.
    pub org: Point,
    /// Direction from `org` toward the far endpoint.
    pub norm: Point,
    /// Current intersection with the sweep line, refreshed by `update`.
    pub value: Point,
    /// Far endpoint.
    pub dst: Point,
    pub pair: PairIdx,
    /// Winding number of the region immediately above this edge.
    pub winding_above: i16,
    /// The edge has x extent and is parameterized by sweep x.
    pub horizontal: bool,
    pub helper: Helper,
    next: NodeIdx,
    prev: NodeIdx,
}

impl DictNode {
    fn sentinel() -> Self {
        DictNode {
            org: Point::new(0.0, 0.0),
            norm: Point::new(0.0, 0.0),
            value: Point::new(0.0, 0.0),
            dst: Point::new(0.0, 0.0),
            pair: INVALID,
            winding_above: 0,
            horizontal: false,
            helper: Helper::default(),
            next: DICT_HEAD,
            prev: DICT_HEAD,
        }
    }
}

pub struct EdgeDict {
    /// Current sweep position.
    pub event: Point,
    nodes: Vec<DictNode>,
    free: Vec<NodeIdx>,
}

impl EdgeDict {
    pub fn with_capacity(size: usize) -> Self {
        let mut nodes = Vec::with_capacity(size + 1);
        nodes.push(DictNode::sentinel());
        EdgeDict {
            event: Point::new(0.0, 0.0),
            nodes,
            free: Vec::new(),
        }
    }

    #[inline]
    pub fn node(&self, n: NodeIdx) -> &DictNode {
        &self.nodes[n as usize]
    }

    #[inline]
    pub fn node_mut(&mut self, n: NodeIdx) -> &mut DictNode {
        &mut self.nodes[n as usize]
    }

    pub fn is_empty(&self) -> bool {
        self.nodes[DICT_HEAD as usize].next == DICT_HEAD
    }

    pub fn len(&self) -> usize {
        let mut n = 0;
        let mut at = self.nodes[DICT_HEAD as usize].next;
        while at != DICT_HEAD {
            n += 1;
            at = self.nodes[at as usize].next;
        }
        n
    }

    /// First crossing record (lowest on the sweep line), DICT_HEAD if none.
    pub fn first(&self) -> NodeIdx {
        self.nodes[DICT_HEAD as usize].next
    }

    pub fn succ(&self, n: NodeIdx) -> NodeIdx {
        self.nodes[n as usize].next
    }

    #[inline]
    fn node_less(&self, mesh: &Mesh, n: NodeIdx, y: Real, dir: Real) -> bool {
        let node = &self.nodes[n as usize];
        if node.value.y == y {
            mesh.pool.pairs[node.pair as usize].direction < dir
        } else {
            node.value.y < y
        }
    }

    /// Insert a crossing record for `pair`. One of the pair's endpoints
    /// must coincide with the current event; when neither does the event
    /// ordering has been violated upstream and the push is refused.
    pub fn push(&mut self, mesh: &Mesh, pair: PairIdx, winding_above: i16) -> NodeIdx {
        let (l, r) = pair_halves(pair);
        let org = mesh.pool.edges[l as usize].origin;
        let dst = mesh.pool.edges[r as usize].origin;

        let (norm, far) = if org == self.event {
            (dst - self.event, dst)
        } else if dst == self.event {
            (org - self.event, org)
        } else {
            tracing::trace!(?org, ?dst, event = ?self.event, "dict push refused: edge does not touch the event");
            return INVALID;
        };

        let node = DictNode {
            org: self.event,
            norm,
            value: self.event,
            dst: far,
            pair,
            winding_above,
            horizontal: norm.x.abs() > Real::EPSILON,
            helper: Helper::default(),
            next: INVALID,
            prev: INVALID,
        };

        let dir = mesh.pool.pairs[pair as usize].direction;
        let mut at = self.nodes[DICT_HEAD as usize].next;
        while at != DICT_HEAD && self.node_less(mesh, at, self.event.y, dir) {
            at = self.nodes[at as usize].next;
        }

        let idx = if let Some(slot) = self.free.pop() {
            self.nodes[slot as usize] = node;
            slot
        } else {
            let slot = self.nodes.len() as NodeIdx;
            self.nodes.push(node);
            slot
        };

        let prev = self.nodes[at as usize].prev;
        self.nodes[idx as usize].next = at;
        self.nodes[idx as usize].prev = prev;
        self.nodes[prev as usize].next = idx;
        self.nodes[at as usize].prev = idx;

        idx
    }

    /// Remove a crossing record. Direct unlink; pairs store their node
    /// index so no key scan is needed.
    pub fn pop(&mut self, n: NodeIdx) {
        debug_assert!(n != DICT_HEAD);
        let next = self.nodes[n as usize].next;
        let prev = self.nodes[n as usize].prev;
        self.nodes[prev as usize].next = next;
        self.nodes[next as usize].prev = prev;
        self.nodes[n as usize].next = INVALID;
        self.nodes[n as usize].prev = INVALID;
        self.free.push(n);
    }

    /// Advance the sweep to `event` and refresh every crossing point.
    pub fn update(&mut self, event: Point) {
        self.event = event;
        let mut at = self.nodes[DICT_HEAD as usize].next;
        while at != DICT_HEAD {
            let n = &mut self.nodes[at as usize];
            if n.horizontal {
                let t = (event.x - n.org.x) / n.norm.x;
                n.value = Point::new(n.org.x + n.norm.x * t, n.org.y + n.norm.y * t);
            } else {
                let s = (event.y - n.org.y) / n.norm.y;
                n.value = Point::new(n.org.x + n.norm.x * s, n.org.y + n.norm.y * s);
            }
            at = n.next;
        }
    }

    /// Lower-bound lookup: the crossing record directly below `pair` at the
    /// current sweep position, skipping records that pass through the event
    /// point itself. INVALID when nothing lies below.
    pub fn get_edge_below(&self, mesh: &Mesh, pair: PairIdx) -> NodeIdx {
        if self.is_empty() {
            return INVALID;
        }

        let key_y = mesh.left_vec(pair).y;
        let key_dir = mesh.pool.pairs[pair as usize].direction;

        let first = self.nodes[DICT_HEAD as usize].next;
        let mut at = first;
        while at != DICT_HEAD && self.node_less(mesh, at, key_y, key_dir) {
            at = self.nodes[at as usize].next;
        }

        if at == first {
            // everything in the dictionary is at or above the pair
            return INVALID;
        }

        let mut below = self.nodes[at as usize].prev;
        while below != DICT_HEAD && self.nodes[below as usize].value == self.event {
            below = self.nodes[below as usize].prev;
        }
        if below == DICT_HEAD {
            return INVALID;
        }
        below
    }

    /// Scan the active crossings for a geometric conflict with an outgoing
    /// candidate edge, classifying the conflict kind. Collinear overlaps
    /// are detected and reported but yield no conflict record (they are
    /// resolved by vertex merging upstream).
    pub fn check_for_intersects(
        &self,
        mesh: &Mesh,
        edge: EdgeIdx,
        tolerance: Real,
    ) -> Option<(NodeIdx, Point, IntersectionEvent)> {
        if self.is_empty() {
            return None;
        }

        let org = mesh.org_vec(edge);
        let dst = mesh.dst_vec(edge);
        let norm = dst - org;
        let dir = crate::geom::edge_direction(norm);

        let mut at = self.nodes[DICT_HEAD as usize].next;
        while at != DICT_HEAD {
            let n = &self.nodes[at as usize];
            let n_dir = mesh.pool.pairs[n.pair as usize].direction;

            if vert_eq(n.org, org, tolerance) {
                // shared origin: a genuine conflict here is a collinear
                // overlap, everything else is just the fan at the event
                let overlap = if norm.y == 0.0 && n.norm.y == 0.0 {
                    Some(if dst.x < n.dst.x {
                        (dst, IntersectionEvent::EdgeOverlap2)
                    } else {
                        (n.dst, IntersectionEvent::EdgeOverlap1)
                    })
                } else if norm.x == 0.0 && n.norm.x == 0.0 {
                    Some(if dst.y < n.dst.y {
                        (dst, IntersectionEvent::EdgeOverlap2)
                    } else {
                        (n.dst, IntersectionEvent::EdgeOverlap1)
                    })
                } else if (dir - n_dir).abs() < tolerance {
                    Some(if dst.x < n.dst.x {
                        (dst, IntersectionEvent::EdgeOverlap2)
                    } else {
                        (n.dst, IntersectionEvent::EdgeOverlap1)
                    })
                } else {
                    None
                };
                if let Some((point, ev)) = overlap {
                    tracing::trace!(?point, ?ev, "collinear overlap detected, left unresolved");
                }
                at = n.next;
                continue;
            } else if vert_eq(n.value, org, tolerance) {
                if vert_eq(n.value, n.dst, tolerance) {
                    // the crossing ends exactly here, no interior left
                    at = n.next;
                    continue;
                }
                return Some((at, self.event, IntersectionEvent::EventIsIntersection));
            }

            if vert_eq(dst, n.dst, tolerance) {
                at = n.next;
                continue;
            }

            if bbox_overlaps(org, dst, n.value, n.dst) {
                let d1 = norm;
                let d2 = n.dst - n.value;
                let denom = d1.x * d2.y - d2.x * d1.y;
                if denom != 0.0 {
                    let ca = org - n.value;
                    let s = (ca.y * d2.x - ca.x * d2.y) / denom;
                    let t = (ca.y * d1.x - ca.x * d1.y) / denom;

                    if (0.0..=1.0).contains(&s) && (0.0..=1.0).contains(&t) {
                        let point = Point::new(org.x + s * d1.x, org.y + s * d1.y);
                        let ev = if vert_eq(point, dst, tolerance) {
                            IntersectionEvent::EdgeConnection2
                        } else if vert_eq(point, n.dst, tolerance) {
                            IntersectionEvent::EdgeConnection1
                        } else {
                            IntersectionEvent::Regular
                        };
                        return Some((at, point, ev));
                    }
                }
            }

            at = n.next;
        }

        None
    }
}
