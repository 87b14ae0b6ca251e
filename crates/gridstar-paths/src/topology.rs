//! Precomputed grid adjacency.
//!
//! Generating neighbours is the same work for every query and never changes
//! for a given grid, so [`Topology`] does it once: a compressed adjacency
//! table lists, for each cell, the in-bounds neighbours and the step cost to
//! each. Obstacles are applied at query time, never baked in.

use gridstar_core::{Point, Range};

use crate::config::{Connectivity, EngineConfig};
use crate::distance;
use crate::error::EngineError;

/// One outgoing edge of the adjacency table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    /// Linear index of the neighbour.
    pub to: u32,
    /// Base cost of the step, before layer costs.
    pub cost: u32,
}

/// Immutable adjacency table for a `width × height` grid.
#[derive(Debug, Clone)]
pub struct Topology {
    rng: Range,
    connectivity: Connectivity,
    cardinal_cost: u32,
    diagonal_cost: u32,
    // edges of cell i are edges[offsets[i]..offsets[i + 1]]
    offsets: Vec<u32>,
    edges: Vec<Edge>,
}

impl Topology {
    /// Build the adjacency table.
    ///
    /// Fails with [`EngineError::InvalidDimension`] for a non-positive side
    /// or a grid too large for 32-bit cell indices.
    pub fn new(width: i32, height: i32, config: &EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let invalid = EngineError::InvalidDimension { width, height };
        if width <= 0 || height <= 0 {
            return Err(invalid);
        }
        let max_edges = u64::from(width.unsigned_abs())
            .checked_mul(u64::from(height.unsigned_abs()))
            .and_then(|cells| cells.checked_mul(config.connectivity.max_neighbors() as u64))
            .filter(|&edges| edges <= u64::from(u32::MAX))
            .ok_or(invalid)?;

        let rng = Range::with_size(width, height);
        let mut offsets = Vec::with_capacity(rng.len() + 1);
        let mut edges = Vec::with_capacity(max_edges as usize);
        offsets.push(0);
        for p in rng {
            for n in p.neighbors_4() {
                if let Some(ni) = rng.index_of(n) {
                    edges.push(Edge {
                        to: ni as u32,
                        cost: config.cardinal_cost,
                    });
                }
            }
            if config.connectivity == Connectivity::Eight {
                for n in p.neighbors_diagonal() {
                    if let Some(ni) = rng.index_of(n) {
                        edges.push(Edge {
                            to: ni as u32,
                            cost: config.diagonal_cost,
                        });
                    }
                }
            }
            offsets.push(edges.len() as u32);
        }

        log::debug!(
            "built {:?}-connected topology {}x{}: {} cells, {} edges",
            config.connectivity,
            width,
            height,
            rng.len(),
            edges.len()
        );

        Ok(Self {
            rng,
            connectivity: config.connectivity,
            cardinal_cost: config.cardinal_cost,
            diagonal_cost: config.diagonal_cost,
            offsets,
            edges,
        })
    }

    /// Whether this table was built for exactly these parameters.
    pub fn matches(&self, width: i32, height: i32, config: &EngineConfig) -> bool {
        self.width() == width
            && self.height() == height
            && self.connectivity == config.connectivity
            && self.cardinal_cost == config.cardinal_cost
            && self.diagonal_cost == config.diagonal_cost
    }

    /// The grid as a range anchored at the origin.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.rng.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.rng.height()
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    /// Bounds-checked linear index of `p`.
    #[inline]
    pub fn index_of(&self, p: Point) -> Result<usize, EngineError> {
        self.rng.index_of(p).ok_or(EngineError::OutOfBounds(p))
    }

    /// Point at a linear index, or `None` past the last cell.
    #[inline]
    pub fn point_at(&self, idx: usize) -> Option<Point> {
        self.rng.point_at(idx)
    }

    /// Outgoing edges of cell `idx` (empty for an out-of-range index).
    #[inline]
    pub fn edges(&self, idx: usize) -> &[Edge] {
        if idx >= self.len() {
            return &[];
        }
        let lo = self.offsets[idx] as usize;
        let hi = self.offsets[idx + 1] as usize;
        &self.edges[lo..hi]
    }

    /// Base cost of stepping from `from` to the adjacent `to`, or `None` if
    /// the two cells are not neighbours.
    #[inline]
    pub fn step_cost(&self, from: usize, to: usize) -> Option<u32> {
        self.edges(from)
            .iter()
            .find(|e| e.to as usize == to)
            .map(|e| e.cost)
    }

    /// Admissible and consistent lower bound on the cost from `from` to `to`.
    pub fn estimate(&self, from: Point, to: Point) -> u64 {
        let c = u64::from(self.cardinal_cost);
        let d = u64::from(self.diagonal_cost);
        match self.connectivity {
            Connectivity::Four => c * distance::manhattan(from, to),
            Connectivity::Eight if d >= c => distance::octile(from, to, c, d),
            // Diagonal zig-zags can undercut cardinal steps.
            Connectivity::Eight => d * distance::chebyshev(from, to),
        }
    }
}
