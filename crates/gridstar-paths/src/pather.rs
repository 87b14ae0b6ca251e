//! The engine's cost model expressed as an [`AstarPather`].

use gridstar_core::Point;

use crate::layers::LayerCosts;
use crate::topology::Topology;
use crate::traits::{AstarPather, Pather, WeightedPather};

/// Read-only view of the grid for one query.
///
/// A cell can be entered when its mask does not intersect `blocking`. Start
/// cells can always be entered, and so can end cells when `enter_ends` is
/// set. Entering a cell costs the adjacency step cost plus the layer costs of
/// the cell's mask.
pub struct LayerPather<'a> {
    pub(crate) topology: &'a Topology,
    pub(crate) masks: &'a [u32],
    pub(crate) costs: &'a LayerCosts,
    pub(crate) blocking: u32,
    /// Sorted, deduplicated start indices.
    pub(crate) starts: Vec<usize>,
    /// Sorted, deduplicated end indices; empty unless ends ignore blocking.
    pub(crate) open_ends: Vec<usize>,
}

impl<'a> LayerPather<'a> {
    /// `masks` must hold one mask per topology cell.
    pub fn new(
        topology: &'a Topology,
        masks: &'a [u32],
        costs: &'a LayerCosts,
        blocking: u32,
    ) -> Self {
        debug_assert_eq!(masks.len(), topology.len());
        Self {
            topology,
            masks,
            costs,
            blocking,
            starts: Vec::new(),
            open_ends: Vec::new(),
        }
    }

    /// Cells that are enterable regardless of blocking.
    pub fn with_starts(mut self, starts: &[usize]) -> Self {
        self.starts = sorted(starts);
        self
    }

    /// End cells that are enterable regardless of blocking.
    pub fn with_open_ends(mut self, ends: &[usize]) -> Self {
        self.open_ends = sorted(ends);
        self
    }

    /// Whether the cell at `idx` may be entered in this query.
    #[inline]
    pub fn enterable(&self, idx: usize) -> bool {
        self.masks[idx] & self.blocking == 0
            || self.starts.binary_search(&idx).is_ok()
            || self.open_ends.binary_search(&idx).is_ok()
    }
}

fn sorted(indices: &[usize]) -> Vec<usize> {
    let mut v = indices.to_vec();
    v.sort_unstable();
    v.dedup();
    v
}

impl Pather for LayerPather<'_> {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        let Ok(i) = self.topology.index_of(p) else {
            return;
        };
        for e in self.topology.edges(i) {
            let ni = e.to as usize;
            if !self.enterable(ni) {
                continue;
            }
            if let Some(np) = self.topology.point_at(ni) {
                buf.push(np);
            }
        }
    }
}

impl LayerPather<'_> {
    /// Cost of entering cell `to` over an edge of base cost `step`.
    #[inline]
    fn entry_cost(&self, step: u32, to: usize) -> u64 {
        u64::from(step).saturating_add(self.costs.extra_cost(self.masks[to]))
    }
}

impl WeightedPather for LayerPather<'_> {
    fn cost(&self, from: Point, to: Point) -> u64 {
        let (Ok(fi), Ok(ti)) = (self.topology.index_of(from), self.topology.index_of(to)) else {
            return u64::MAX;
        };
        match self.topology.step_cost(fi, ti) {
            Some(step) => self.entry_cost(step, ti),
            None => u64::MAX,
        }
    }

    fn successors(&self, p: Point, buf: &mut Vec<(Point, u64)>) {
        let Ok(i) = self.topology.index_of(p) else {
            return;
        };
        for e in self.topology.edges(i) {
            let ni = e.to as usize;
            if !self.enterable(ni) {
                continue;
            }
            if let Some(np) = self.topology.point_at(ni) {
                buf.push((np, self.entry_cost(e.cost, ni)));
            }
        }
    }
}

impl AstarPather for LayerPather<'_> {
    fn estimate(&self, from: Point, to: Point) -> u64 {
        self.topology.estimate(from, to)
    }
}
