// Copyright 2025 the polytess authors
// License: MIT
//
// The vertex event queue: a two-phase priority queue.
//
// Phase 1 (before init): inserts append to a key array which is sorted
// once, so the bulk of the vertices pay O(n log n) total instead of heap
// churn. Phase 2 (after init): inserts go to a binary min-heap; these are
// the vertices discovered mid-sweep (intersection points).
//
// Handles are polymorphic over origin: negative handles index the sorted
// array, positive handles belong to the heap. `remove` dispatches on the
// sign.

use crate::geom::{vert_leq, Point};
use crate::mesh::{VertIdx, INVALID};

pub const INVALID_HANDLE: i32 = i32::MAX;

#[derive(Copy, Clone, Debug)]
struct QKey {
    pos: Point,
    vert: VertIdx,
}

const EMPTY_KEY: QKey = QKey {
    pos: Point::new(0.0, 0.0),
    vert: INVALID,
};

#[inline]
fn key_leq(a: &QKey, b: &QKey) -> bool {
    vert_leq(a.pos, b.pos)
}

/// Binary min-heap with stable handles (used after initialization).
struct Heap {
    /// nodes[1..=size] hold handle indices; nodes[0] unused.
    nodes: Vec<i32>,
    /// handles[h] = (key, node position); node position doubles as the
    /// free-list link for dead handles.
    handles: Vec<(QKey, i32)>,
    size: usize,
    free_list: i32,
    initialized: bool,
}

impl Heap {
    fn with_capacity(size: usize) -> Self {
        let mut nodes = vec![0i32; size + 2];
        let mut handles = vec![(EMPTY_KEY, 0i32); size + 2];
        // nodes[1] = 1 so that min() is the empty sentinel while unused
        nodes[1] = 1;
        handles[1] = (EMPTY_KEY, 1);
        Heap {
            nodes,
            handles,
            size: 0,
            free_list: 0,
            initialized: false,
        }
    }

    #[inline]
    fn key_of(&self, handle: i32) -> &QKey {
        &self.handles[handle as usize].0
    }

    fn float_down(&mut self, mut curr: usize) {
        let h_curr = self.nodes[curr];
        loop {
            let mut child = curr << 1;
            if child < self.size && key_leq(self.key_of(self.nodes[child + 1]), self.key_of(self.nodes[child])) {
                child += 1;
            }
            let h_child = self.nodes[child.min(self.nodes.len() - 1)];
            if child > self.size || key_leq(self.key_of(h_curr), self.key_of(h_child)) {
                self.nodes[curr] = h_curr;
                self.handles[h_curr as usize].1 = curr as i32;
                break;
            }
            self.nodes[curr] = h_child;
            self.handles[h_child as usize].1 = curr as i32;
            curr = child;
        }
    }

    fn float_up(&mut self, mut curr: usize) {
        let h_curr = self.nodes[curr];
        loop {
            let parent = curr >> 1;
            let h_parent = self.nodes[parent];
            if parent == 0 || key_leq(self.key_of(h_parent), self.key_of(h_curr)) {
                self.nodes[curr] = h_curr;
                self.handles[h_curr as usize].1 = curr as i32;
                break;
            }
            self.nodes[curr] = h_parent;
            self.handles[h_parent as usize].1 = curr as i32;
            curr = parent;
        }
    }

    fn init(&mut self) {
        for i in (1..=self.size).rev() {
            self.float_down(i);
        }
        self.initialized = true;
    }

    fn insert(&mut self, key: QKey) -> i32 {
        self.size += 1;
        let curr = self.size;

        if curr * 2 >= self.nodes.len() {
            let grow = self.nodes.len().max(4) * 2;
            self.nodes.resize(grow, 0);
            self.handles.resize(grow, (EMPTY_KEY, 0));
        }

        let free_handle = if self.free_list == 0 {
            curr as i32
        } else {
            let f = self.free_list;
            self.free_list = self.handles[f as usize].1;
            f
        };

        self.nodes[curr] = free_handle;
        self.handles[free_handle as usize] = (key, curr as i32);

        if self.initialized {
            self.float_up(curr);
        }
        free_handle
    }

    fn extract_min(&mut self) -> VertIdx {
        let h_min = self.nodes[1];
        let min_vert = self.handles[h_min as usize].0.vert;

        if self.size > 0 {
            self.nodes[1] = self.nodes[self.size];
            self.handles[self.nodes[1] as usize].1 = 1;

            self.handles[h_min as usize].0 = EMPTY_KEY;
            self.handles[h_min as usize].1 = self.free_list;
            self.free_list = h_min;

            self.size -= 1;
            if self.size > 0 {
                self.float_down(1);
            }
        }
        min_vert
    }

    fn remove(&mut self, h_curr: i32) {
        debug_assert!(self.handles[h_curr as usize].0.vert != INVALID);
        let curr = self.handles[h_curr as usize].1 as usize;

        self.nodes[curr] = self.nodes[self.size];
        self.handles[self.nodes[curr] as usize].1 = curr as i32;

        self.size -= 1;
        if curr <= self.size {
            if curr <= 1 {
                self.float_down(curr);
            } else {
                let parent = self.key_of(self.nodes[curr >> 1]);
                let here = self.key_of(self.nodes[curr]);
                if key_leq(parent, here) {
                    self.float_down(curr);
                } else {
                    self.float_up(curr);
                }
            }
        }

        self.handles[h_curr as usize].0 = EMPTY_KEY;
        self.handles[h_curr as usize].1 = self.free_list;
        self.free_list = h_curr;
    }

    #[inline]
    fn min_key(&self) -> &QKey {
        self.key_of(self.nodes[1])
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.size == 0
    }
}

/// The combined queue (sorted array + heap).
pub struct VertexQueue {
    heap: Heap,
    keys: Vec<QKey>,
    /// Indirection into `keys`, sorted descending so the minimum pops from
    /// the back.
    order: Vec<u32>,
    size: usize,
    initialized: bool,
}

impl VertexQueue {
    pub fn with_capacity(size: usize) -> Self {
        VertexQueue {
            heap: Heap::with_capacity(size),
            keys: Vec::with_capacity(size),
            order: Vec::new(),
            size: 0,
            initialized: false,
        }
    }

    /// Sort the static phase and prepare the heap. Must run after the bulk
    /// inserts and before any extraction.
    pub fn init(&mut self) {
        self.order = (0..self.size as u32).collect();
        let keys = &self.keys;
        self.order.sort_unstable_by(|&a, &b| {
            // descending so ascending extraction pops from the end
            if key_leq(&keys[a as usize], &keys[b as usize]) {
                std::cmp::Ordering::Greater
            } else {
                std::cmp::Ordering::Less
            }
        });
        self.initialized = true;
        self.heap.init();
    }

    /// Insert a vertex at `pos`. Returns its handle: negative for the
    /// sorted array (pre-init), positive for the heap (post-init).
    pub fn insert(&mut self, vert: VertIdx, pos: Point) -> i32 {
        let key = QKey { pos, vert };
        if self.initialized {
            return self.heap.insert(key);
        }

        let curr = self.size;
        self.size += 1;
        if curr < self.keys.len() {
            self.keys[curr] = key;
        } else {
            self.keys.push(key);
        }

        // negative handles index the sorted array
        -(curr as i32 + 1)
    }

    /// Remove by handle, dispatching on the handle's sign.
    pub fn remove(&mut self, handle: i32) {
        if handle >= 0 {
            self.heap.remove(handle);
            return;
        }
        let curr = (-(handle + 1)) as usize;
        debug_assert!(curr < self.keys.len() && self.keys[curr].vert != INVALID);
        self.keys[curr].vert = INVALID;

        while self.size > 0 && self.keys[self.order[self.size - 1] as usize].vert == INVALID {
            self.size -= 1;
        }
    }

    /// Extract the sweep-least vertex of both phases, INVALID when empty.
    pub fn extract_min(&mut self) -> VertIdx {
        if self.size == 0 {
            return self.heap.extract_min();
        }

        let sort_min = self.keys[self.order[self.size - 1] as usize];
        if !self.heap.is_empty() && key_leq(self.heap.min_key(), &sort_min) {
            return self.heap.extract_min();
        }

        loop {
            self.size -= 1;
            if self.size == 0 || self.keys[self.order[self.size - 1] as usize].vert != INVALID {
                break;
            }
        }
        sort_min.vert
    }

    /// Peek at the minimum without extracting.
    pub fn get_min(&self) -> VertIdx {
        if self.size == 0 {
            return self.heap.min_key().vert;
        }
        let sort_min = self.keys[self.order[self.size - 1] as usize];
        if !self.heap.is_empty() && key_leq(self.heap.min_key(), &sort_min) {
            return self.heap.min_key().vert;
        }
        sort_min.vert
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0 && self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn p(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn sorted_phase_extracts_in_sweep_order() {
        let mut pq = VertexQueue::with_capacity(8);
        pq.insert(0, p(5.0, 0.0));
        pq.insert(1, p(2.0, 0.0));
        pq.insert(2, p(8.0, 0.0));
        pq.insert(3, p(1.0, 0.0));
        pq.init();

        assert_eq!(pq.extract_min(), 3);
        assert_eq!(pq.extract_min(), 1);
        assert_eq!(pq.extract_min(), 0);
        assert_eq!(pq.extract_min(), 2);
        assert!(pq.is_empty());
    }

    #[test]
    fn x_ties_break_on_y() {
        let mut pq = VertexQueue::with_capacity(4);
        pq.insert(0, p(1.0, 3.0));
        pq.insert(1, p(1.0, -2.0));
        pq.insert(2, p(1.0, 0.0));
        pq.init();

        assert_eq!(pq.extract_min(), 1);
        assert_eq!(pq.extract_min(), 2);
        assert_eq!(pq.extract_min(), 0);
    }

    #[test]
    fn post_init_inserts_interleave() {
        let mut pq = VertexQueue::with_capacity(4);
        pq.insert(0, p(3.0, 0.0));
        pq.insert(1, p(7.0, 0.0));
        pq.init();

        // an intersection vertex discovered mid-sweep
        let h = pq.insert(2, p(5.0, 0.0));
        assert!(h >= 0, "heap handles are non-negative");

        assert_eq!(pq.extract_min(), 0);
        assert_eq!(pq.extract_min(), 2);
        assert_eq!(pq.extract_min(), 1);
        assert!(pq.is_empty());
    }

    #[test]
    fn remove_dispatches_on_handle_sign() {
        let mut pq = VertexQueue::with_capacity(4);
        let h0 = pq.insert(0, p(1.0, 0.0));
        pq.insert(1, p(2.0, 0.0));
        assert!(h0 < 0, "sorted handles are negative");
        pq.init();

        let h2 = pq.insert(2, p(0.5, 0.0));
        pq.remove(h0);
        pq.remove(h2);

        assert_eq!(pq.extract_min(), 1);
        assert!(pq.is_empty());
    }

    #[test]
    fn empty_queue_reports_invalid() {
        let mut pq = VertexQueue::with_capacity(2);
        pq.init();
        assert!(pq.is_empty());
        assert_eq!(pq.get_min(), INVALID);
        assert_eq!(pq.extract_min(), INVALID);
    }

    #[test]
    fn heap_grows_past_initial_capacity() {
        let mut pq = VertexQueue::with_capacity(2);
        pq.init();
        for i in 0..64u32 {
            pq.insert(i, p(64.0 - i as f32, 0.0));
        }
        let mut last_x = f32::MIN;
        for _ in 0..64 {
            let v = pq.extract_min();
            let x = 64.0 - v as f32;
            assert!(x >= last_x);
            last_x = x;
        }
        assert!(pq.is_empty());
    }

    proptest! {
        #[test]
        fn extraction_is_globally_sorted(xs in proptest::collection::vec((-1000.0f32..1000.0, -1000.0f32..1000.0), 1..64)) {
            let mut pq = VertexQueue::with_capacity(xs.len());
            for (i, &(x, y)) in xs.iter().enumerate() {
                pq.insert(i as u32, p(x, y));
            }
            pq.init();

            let mut prev: Option<Point> = None;
            while !pq.is_empty() {
                let v = pq.extract_min();
                prop_assert!(v != INVALID);
                let pos = xs[v as usize];
                let pos = p(pos.0, pos.1);
                if let Some(prev) = prev {
                    prop_assert!(crate::geom::vert_leq(prev, pos));
                }
                prev = Some(pos);
            }
        }
    }
}
