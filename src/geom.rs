// Copyright 2025 the polytess authors
// License: MIT
//
// 2D predicates and ordering keys for the sweep.
//
// Vertices are ordered lexicographically (x first, then y); the sweep
// advances left to right with a bottom-to-top tie break. Edge ordering in
// the sweep dictionary uses a synthetic pseudo-angle instead of calling
// into trigonometry.

pub type Real = f32;

/// A 2D point (also used for direction vectors).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    pub x: Real,
    pub y: Real,
}

impl Point {
    pub const fn new(x: Real, y: Real) -> Self {
        Point { x, y }
    }

    /// Component-wise fuzzy equality.
    #[inline]
    pub fn fuzzy_eq(self, other: Point, tolerance: Real) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

impl core::ops::Sub for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Returns true if u is lexicographically <= v (x first, then y).
/// This total order drives the sweep direction.
#[inline]
pub fn vert_leq(u: Point, v: Point) -> bool {
    u.x < v.x || (u.x == v.x && u.y <= v.y)
}

/// Fuzzy vertex equality, used to coalesce coincident vertices.
#[inline]
pub fn vert_eq(u: Point, v: Point, tolerance: Real) -> bool {
    u.fuzzy_eq(v, tolerance)
}

/// Returns true if (u, v, w) are in counter-clockwise order
/// (collinear counts as CCW).
#[inline]
pub fn is_ccw(u: Point, v: Point, w: Point) -> bool {
    (v.x - u.x) * (w.y - u.y) - (v.y - u.y) * (w.x - u.x) >= 0.0
}

/// Fast synthetic tg|ctg function over the range [-2.0, 2.0], monotonically
/// growing with the angle between `norm` and the positive x axis.
/// `norm.x` is assumed non-negative (sweep-ordered edge vectors).
#[inline]
pub fn edge_direction(norm: Point) -> Real {
    if norm.y >= 0.0 {
        if norm.x > norm.y {
            norm.y / norm.x
        } else {
            2.0 - norm.x / norm.y
        }
    } else if norm.x > -norm.y {
        norm.y / norm.x
    } else {
        -2.0 - norm.x / norm.y
    }
}

/// Same construction mapped over the full circle: [0.0, 8.0), monotonic in
/// the angle with the positive x axis.
pub fn edge_angle(norm: Point) -> Real {
    if norm.x >= 0.0 && norm.y >= 0.0 {
        // [0.0, 2.0]
        if norm.x > norm.y {
            norm.y / norm.x
        } else {
            2.0 - norm.x / norm.y
        }
    } else if norm.x < 0.0 && norm.y >= 0.0 {
        // (2.0, 4.0]
        if -norm.x > norm.y {
            4.0 + norm.y / norm.x
        } else {
            2.0 - norm.x / norm.y
        }
    } else if norm.x < 0.0 && norm.y < 0.0 {
        // (4.0, 6.0)
        if norm.x < norm.y {
            4.0 + norm.y / norm.x
        } else {
            6.0 - norm.x / norm.y
        }
    } else {
        // [6.0, 8.0)
        if norm.x > -norm.y {
            8.0 + norm.y / norm.x
        } else {
            6.0 - norm.x / norm.y
        }
    }
}

/// CCW angular distance from direction `from` to direction `to`, in
/// pseudo-angle units [0.0, 8.0). Equal directions map to 8.0 so that a
/// zero result never appears for distinct inputs.
pub fn edge_angle_between(from: Point, to: Point) -> Real {
    if from == to {
        return 8.0;
    }

    let from_a = edge_angle(from);
    let to_a = edge_angle(to);

    if from_a <= to_a {
        to_a - from_a
    } else {
        8.0 - (from_a - to_a)
    }
}

/// True when a pseudo-angle is within `tolerance` of zero (mod 8).
#[inline]
pub fn edge_angle_below_tolerance(angle: Real, tolerance: Real) -> bool {
    angle < tolerance || 8.0 - angle < tolerance
}

/// Axis-aligned bounding box overlap test for the segments (a0, a1) and
/// (b0, b1). Cheap rejection before the exact intersection test.
#[inline]
pub fn bbox_overlaps(a0: Point, a1: Point, b0: Point, b1: Point) -> bool {
    let (ax_min, ax_max) = if a0.x <= a1.x { (a0.x, a1.x) } else { (a1.x, a0.x) };
    let (ay_min, ay_max) = if a0.y <= a1.y { (a0.y, a1.y) } else { (a1.y, a0.y) };
    let (bx_min, bx_max) = if b0.x <= b1.x { (b0.x, b1.x) } else { (b1.x, b0.x) };
    let (by_min, by_max) = if b0.y <= b1.y { (b0.y, b1.y) } else { (b1.y, b0.y) };

    ax_min <= bx_max && bx_min <= ax_max && ay_min <= by_max && by_min <= ay_max
}
