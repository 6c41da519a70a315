// Copyright 2025 the polytess authors
// License: MIT
//
// Vertex event classification for the monotone-decomposition sweep.
//
// Each pair of consecutive edges around an event vertex lands in one of
// six classes, from {both outgoing, both incoming, mixed} crossed with
// {convex, non-convex} at the shared angle. The class decides how the
// sweep dictionary and helper vertices are updated and where diagonals
// are inserted.

use crate::mesh::{EdgeIdx, INVALID};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VertexType {
    /// Right non-convex angle: a new boundary begins.
    Start,
    /// Left non-convex angle: a boundary ends.
    End,
    /// Right convex angle: the interior splits.
    Split,
    /// Left convex angle: two boundaries merge.
    Merge,
    /// Boundary continues below the vertex.
    RegularTop,
    /// Boundary continues above the vertex.
    RegularBottom,
}

/// The most recent vertex on a dictionary edge's chain that is eligible to
/// receive a diagonal, with the classification it was recorded under.
#[derive(Copy, Clone, Debug)]
pub struct Helper {
    pub e1: EdgeIdx,
    pub e2: EdgeIdx,
    pub kind: VertexType,
}

impl Default for Helper {
    fn default() -> Self {
        Helper {
            e1: INVALID,
            e2: INVALID,
            kind: VertexType::Start,
        }
    }
}
