//! The [`Engine`]: one grid, its obstacle layers and layer costs, and the
//! queries that run over them.

use gridstar_core::{Point, Range};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::layers::LayerCosts;
use crate::obstacles::ObstacleLayers;
use crate::path::{Path, PathNode};
use crate::pather::LayerPather;
use crate::searcher::Searcher;
use crate::topology::Topology;
use crate::wire::{self, Encoding};

/// A pathfinding engine for one `width × height` grid.
///
/// The topology is built once and reused by every query. Obstacles, layer
/// costs and the default blocking mask are long-lived and change only
/// through `&mut self` methods, so they can never change while a query runs.
/// Queries borrow the engine immutably: concurrent read-only queries from
/// several threads are fine.
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    topology: Topology,
    obstacles: ObstacleLayers,
    layers: LayerCosts,
    blocking: u32,
}

impl Engine {
    /// Create an obstacle-free engine with the default configuration.
    pub fn new(width: i32, height: i32) -> Result<Self, EngineError> {
        Self::with_config(width, height, EngineConfig::default())
    }

    /// Create an obstacle-free engine.
    ///
    /// Fails with [`EngineError::InvalidDimension`] or
    /// [`EngineError::InvalidStepCost`]; no engine exists in that case.
    pub fn with_config(width: i32, height: i32, config: EngineConfig) -> Result<Self, EngineError> {
        let topology = Topology::new(width, height, &config)?;
        let obstacles = ObstacleLayers::new(topology.range());
        Ok(Self {
            config,
            topology,
            obstacles,
            layers: LayerCosts::new(),
            blocking: config.default_blocking,
        })
    }

    /// Rebuild the grid for `width × height`.
    ///
    /// Same dimensions: nothing changes, obstacles are kept. New dimensions:
    /// the topology is replaced and the obstacle store reset to an all-clear
    /// array of the new size; layer costs and the blocking mask are kept. On
    /// error the engine is left exactly as it was.
    pub fn initialize(&mut self, width: i32, height: i32) -> Result<(), EngineError> {
        if self.topology.matches(width, height, &self.config) {
            log::debug!("grid already {width}x{height}, keeping topology");
            return Ok(());
        }
        let topology = Topology::new(width, height, &self.config)?;
        self.obstacles = ObstacleLayers::new(topology.range());
        self.topology = topology;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    #[inline]
    pub fn range(&self) -> Range {
        self.topology.range()
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.topology.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.topology.height()
    }

    /// A searcher sized for this grid, for use with
    /// [`find_path_with`](Self::find_path_with).
    pub fn searcher(&self) -> Searcher {
        Searcher::new(self.range())
    }

    // -----------------------------------------------------------------------
    // Obstacle layers
    // -----------------------------------------------------------------------

    /// Clear `layer_mask` from every cell.
    pub fn reset_obstacles(&mut self, layer_mask: u32) {
        self.obstacles.reset(layer_mask);
    }

    pub fn add_obstacle(&mut self, p: Point, layer_mask: u32) -> Result<(), EngineError> {
        self.obstacles.add(p, layer_mask)
    }

    pub fn remove_obstacle(&mut self, p: Point, layer_mask: u32) -> Result<(), EngineError> {
        self.obstacles.remove(p, layer_mask)
    }

    pub fn add_obstacle_at_index(&mut self, idx: usize, layer_mask: u32) -> Result<(), EngineError> {
        self.obstacles.add_at_index(idx, layer_mask)
    }

    pub fn remove_obstacle_at_index(
        &mut self,
        idx: usize,
        layer_mask: u32,
    ) -> Result<(), EngineError> {
        self.obstacles.remove_at_index(idx, layer_mask)
    }

    /// Add `layer_mask` to every point; nothing changes if any point is out
    /// of bounds.
    pub fn add_obstacles<I>(&mut self, points: I, layer_mask: u32) -> Result<(), EngineError>
    where
        I: IntoIterator<Item = Point>,
    {
        self.obstacles.add_many(points, layer_mask)
    }

    /// Replace every mask; `values` must hold `width * height` masks.
    pub fn load_obstacles(&mut self, values: &[u32]) -> Result<(), EngineError> {
        self.obstacles.load(values)
    }

    pub fn obstacle_at(&self, p: Point) -> Result<u32, EngineError> {
        self.obstacles.get(p)
    }

    /// All masks in row-major order.
    #[inline]
    pub fn obstacles(&self) -> &[u32] {
        self.obstacles.as_slice()
    }

    pub fn is_blocked(&self, p: Point, blocking: u32) -> Result<bool, EngineError> {
        self.obstacles.is_blocked(p, blocking)
    }

    // -----------------------------------------------------------------------
    // Layer costs and blocking
    // -----------------------------------------------------------------------

    /// Extra cost for entering a cell that carries `layer` (a bit index).
    pub fn set_layer_distance(&mut self, layer: u32, cost: u32) -> Result<(), EngineError> {
        self.layers.set(layer, cost)
    }

    pub fn reset_layer_distance(&mut self, layer: u32) -> Result<(), EngineError> {
        self.layers.reset(layer)
    }

    pub fn layer_distance(&self, layer: u32) -> Result<u32, EngineError> {
        self.layers.get(layer)
    }

    #[inline]
    pub fn layer_costs(&self) -> &LayerCosts {
        &self.layers
    }

    /// Blocking mask used by [`path`](Self::path).
    pub fn set_blocking(&mut self, blocking: u32) {
        self.blocking = blocking;
    }

    #[inline]
    pub fn blocking(&self) -> u32 {
        self.blocking
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Cheapest path from any of `starts` to any of `ends`.
    ///
    /// Cells whose mask intersects `blocking` are not entered, except
    /// starts (and ends, with
    /// [`enter_blocked_ends`](EngineConfig::enter_blocked_ends)). Every start
    /// and end must lie on the grid. An unreachable goal yields an empty
    /// path.
    pub fn find_path(
        &self,
        starts: &[Point],
        ends: &[Point],
        blocking: u32,
    ) -> Result<Path, EngineError> {
        self.query(None, starts, ends, self.obstacles.as_slice(), blocking)
    }

    /// [`find_path`](Self::find_path) reusing the caller's working memory.
    pub fn find_path_with(
        &self,
        searcher: &mut Searcher,
        starts: &[Point],
        ends: &[Point],
        blocking: u32,
    ) -> Result<Path, EngineError> {
        self.query(Some(searcher), starts, ends, self.obstacles.as_slice(), blocking)
    }

    /// [`find_path`](Self::find_path) over a caller-owned mask array instead
    /// of the engine's own obstacle store.
    pub fn find_path_over(
        &self,
        starts: &[Point],
        ends: &[Point],
        masks: &[u32],
        blocking: u32,
    ) -> Result<Path, EngineError> {
        if masks.len() != self.topology.len() {
            return Err(EngineError::SizeMismatch {
                expected: self.topology.len(),
                actual: masks.len(),
            });
        }
        self.query(None, starts, ends, masks, blocking)
    }

    /// [`find_path`](Self::find_path) with the engine's blocking mask.
    pub fn path(&self, starts: &[Point], ends: &[Point]) -> Result<Path, EngineError> {
        self.find_path(starts, ends, self.blocking)
    }

    /// Flat-buffer form of [`find_path`](Self::find_path).
    ///
    /// `starts` and `ends` are interleaved `[x0, y0, x1, y1, ...]`; the path
    /// comes back in `encoding`.
    pub fn find_path_flat(
        &self,
        starts: &[i32],
        ends: &[i32],
        blocking: u32,
        encoding: Encoding,
    ) -> Result<Vec<i32>, EngineError> {
        let starts = wire::unflatten(starts)?;
        let ends = wire::unflatten(ends)?;
        let path = self.find_path(&starts, &ends, blocking)?;
        Ok(path.encode(encoding))
    }

    /// Cost of reaching every reachable cell from the nearest source, in
    /// settle order.
    ///
    /// Uses the same cost model and blocking rules as
    /// [`find_path`](Self::find_path), with sources always enterable.
    pub fn cost_map(&self, sources: &[Point], blocking: u32) -> Result<Vec<PathNode>, EngineError> {
        let mut searcher = self.searcher();
        Ok(self
            .cost_map_with(&mut searcher, sources, blocking)?
            .to_vec())
    }

    /// [`cost_map`](Self::cost_map) reusing the caller's working memory; the
    /// searcher also answers [`Searcher::cost_at`] afterwards.
    pub fn cost_map_with<'s>(
        &self,
        searcher: &'s mut Searcher,
        sources: &[Point],
        blocking: u32,
    ) -> Result<&'s [PathNode], EngineError> {
        let source_idx = self.indices(sources)?;
        self.fit(searcher);
        let pather = LayerPather::new(
            &self.topology,
            self.obstacles.as_slice(),
            &self.layers,
            blocking,
        )
        .with_starts(&source_idx);
        Ok(searcher.cost_map(&pather, sources))
    }

    /// Validate the endpoints, answer the queries that need no search, and
    /// run A* for the rest. Without a caller searcher one is built only when
    /// a search actually runs.
    fn query(
        &self,
        searcher: Option<&mut Searcher>,
        starts: &[Point],
        ends: &[Point],
        masks: &[u32],
        blocking: u32,
    ) -> Result<Path, EngineError> {
        let start_idx = self.indices(starts)?;
        let end_idx = self.indices(ends)?;
        if let Some(path) = trivial_path(starts, &start_idx, &end_idx) {
            log::trace!("find_path: answered without search, {} cells", path.len());
            return Ok(path);
        }

        let mut pather = LayerPather::new(&self.topology, masks, &self.layers, blocking)
            .with_starts(&start_idx);
        if self.config.enter_blocked_ends {
            pather = pather.with_open_ends(&end_idx);
        }
        let path = match searcher {
            Some(searcher) => {
                self.fit(searcher);
                searcher.astar_multi(&pather, starts, ends)
            }
            None => self.searcher().astar_multi(&pather, starts, ends),
        };
        log::trace!(
            "find_path: {} starts, {} ends, blocking {:#x}: {} cells, cost {}",
            starts.len(),
            ends.len(),
            blocking,
            path.len(),
            path.cost()
        );
        Ok(path)
    }

    fn indices(&self, points: &[Point]) -> Result<Vec<usize>, EngineError> {
        points.iter().map(|&p| self.topology.index_of(p)).collect()
    }

    fn fit(&self, searcher: &mut Searcher) {
        if searcher.range() != self.range() {
            searcher.set_range(self.range());
        }
    }
}

/// The result of a query that needs no search: empty when there are no
/// starts or no ends, the single cell of the first start that is also an
/// end otherwise. `None` when a search has to run.
fn trivial_path(starts: &[Point], start_idx: &[usize], end_idx: &[usize]) -> Option<Path> {
    if start_idx.is_empty() || end_idx.is_empty() {
        return Some(Path::empty());
    }
    let mut ends = end_idx.to_vec();
    ends.sort_unstable();
    start_idx
        .iter()
        .position(|i| ends.binary_search(i).is_ok())
        .map(|k| Path::new(vec![starts[k]], 0))
}
