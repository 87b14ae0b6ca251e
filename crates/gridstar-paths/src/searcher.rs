use gridstar_core::{Point, Range};

/// Sentinel cost meaning "not reached" in cost maps.
pub const UNREACHABLE: u64 = u64::MAX;

// ---------------------------------------------------------------------------
// Internal node for A*/Dijkstra priority-queue searches
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) g: u64,
    pub(crate) h: u64,
    pub(crate) parent: usize,
    /// Query stamp: the node's fields are only valid when it equals the
    /// searcher's current stamp.
    pub(crate) stamp: u32,
    /// Query stamp marking the node as a goal.
    pub(crate) goal: u32,
    pub(crate) open: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0,
            h: 0,
            parent: usize::MAX,
            stamp: 0,
            goal: 0,
            open: false,
        }
    }
}

/// Reference into the node array, ordered for use in `BinaryHeap`.
///
/// Ties on `f` go to the smaller `h` (the entry closer to a goal), then to
/// the earlier insertion, so results are reproducible for a fixed input.
#[derive(Clone, Copy, Eq, PartialEq)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) f: u64,
    pub(crate) h: u64,
    pub(crate) seq: u64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest first.
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.h.cmp(&self.h))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// Searcher
// ---------------------------------------------------------------------------

/// Per-query working memory for searches over a grid rectangle.
///
/// A `Searcher` owns the node array, the cost-map buffers and the neighbour
/// scratch buffer. Nodes are invalidated lazily by bumping a query stamp, so
/// a searcher kept across queries allocates nothing after warm-up. It holds
/// no grid state: obstacles and costs come from the pather of each query.
pub struct Searcher {
    pub(crate) rng: Range,
    pub(crate) nodes: Vec<Node>,
    pub(crate) stamp: u32,
    // cost-map buffers, sized by the first cost map after a range change
    pub(crate) cost_buf: Vec<u64>,
    pub(crate) cost_results: Vec<crate::PathNode>,
    // shared scratch buffer for successor queries
    pub(crate) nbuf: Vec<(Point, u64)>,
    // number of nodes expanded by the last query
    pub(crate) expanded: usize,
}

impl Searcher {
    /// Create a searcher for the given grid rectangle.
    pub fn new(rng: Range) -> Self {
        let len = rng.len();
        Self {
            rng,
            nodes: vec![Node::default(); len],
            stamp: 0,
            cost_buf: Vec::new(),
            cost_results: Vec::new(),
            nbuf: Vec::with_capacity(8),
            expanded: 0,
        }
    }

    /// Replace the underlying range, reallocating only when the new range
    /// has more cells than the current buffers.
    pub fn set_range(&mut self, rng: Range) {
        let new_len = rng.len();
        self.rng = rng;
        self.cost_buf.clear();
        self.cost_results.clear();

        if new_len <= self.nodes.len() {
            // Stale entries are ignored once the stamp moves on.
            self.next_stamp();
            return;
        }

        self.nodes.clear();
        self.nodes.resize(new_len, Node::default());
        self.stamp = 0;
    }

    /// The grid rectangle being searched.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    /// Nodes expanded (settled) by the last query.
    #[inline]
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Start a new query and return its stamp.
    pub(crate) fn next_stamp(&mut self) -> u32 {
        self.stamp = self.stamp.wrapping_add(1);
        if self.stamp == 0 {
            // Wrapped: old stamps could collide with new ones.
            for n in self.nodes.iter_mut() {
                *n = Node::default();
            }
            self.stamp = 1;
        }
        self.stamp
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Convert a `Point` to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        self.rng.index_of(p)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        let w = self.rng.width() as usize;
        Point::new(
            (idx % w) as i32 + self.rng.min.x,
            (idx / w) as i32 + self.rng.min.y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_range_smaller_preserves_capacity() {
        let mut s = Searcher::new(Range::with_size(20, 20));
        let cap = s.nodes.len();
        let small = Range::with_size(5, 5);
        s.set_range(small);
        assert_eq!(s.range(), small);
        assert_eq!(s.nodes.len(), cap);
        assert!(s.stamp > 0);
    }

    #[test]
    fn set_range_larger_reallocates() {
        let mut s = Searcher::new(Range::with_size(5, 5));
        s.set_range(Range::with_size(20, 20));
        assert_eq!(s.nodes.len(), 400);
    }

    #[test]
    fn cost_buffer_waits_for_a_cost_map() {
        let mut s = Searcher::new(Range::with_size(30, 30));
        assert!(s.cost_buf.is_empty());
        s.cost_buf.resize(900, 3);
        s.set_range(Range::with_size(10, 10));
        assert!(s.cost_buf.is_empty());
    }

    #[test]
    fn stamp_wraparound_resets_nodes() {
        let mut s = Searcher::new(Range::with_size(2, 2));
        s.nodes[3].stamp = 1;
        s.nodes[3].goal = 1;
        s.stamp = u32::MAX;
        assert_eq!(s.next_stamp(), 1);
        assert_eq!(s.nodes[3].stamp, 0);
        assert_eq!(s.nodes[3].goal, 0);
    }

    #[test]
    fn node_ref_order() {
        let a = NodeRef {
            idx: 0,
            f: 5,
            h: 2,
            seq: 9,
        };
        let b = NodeRef {
            idx: 1,
            f: 5,
            h: 3,
            seq: 1,
        };
        let c = NodeRef {
            idx: 2,
            f: 5,
            h: 2,
            seq: 3,
        };
        let mut heap = std::collections::BinaryHeap::from(vec![a, b, c]);
        assert_eq!(heap.pop().map(|n| n.idx), Some(2));
        assert_eq!(heap.pop().map(|n| n.idx), Some(0));
        assert_eq!(heap.pop().map(|n| n.idx), Some(1));
    }
}
