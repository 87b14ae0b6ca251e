use gridstar_core::Point;

/// Minimal pathfinding interface: neighbor enumeration.
pub trait Pather {
    /// Append the enterable neighbors of `p` into `buf`. The caller clears
    /// `buf` before calling.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}

/// Pather with weighted (positive-cost) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to adjacent `to`. Must be > 0.
    fn cost(&self, from: Point, to: Point) -> u64;

    /// Append the enterable neighbours of `p` with the cost of stepping to
    /// each. The caller clears `buf` before calling.
    ///
    /// The searches call this instead of [`neighbors`](Pather::neighbors)
    /// plus [`cost`](Self::cost). The default does exactly that; pathers
    /// that know the costs while walking the neighbours should override it.
    fn successors(&self, p: Point, buf: &mut Vec<(Point, u64)>) {
        let mut next = Vec::new();
        self.neighbors(p, &mut next);
        buf.extend(next.into_iter().map(|n| (n, self.cost(p, n))));
    }
}

/// Full A* pather with an admissible heuristic.
pub trait AstarPather: WeightedPather {
    /// Heuristic estimate of the cost from `from` to `to`.
    ///
    /// Must never overestimate the true cost (admissible) and must satisfy
    /// `estimate(a, t) <= cost(a, b) + estimate(b, t)` for neighbours `a`, `b`
    /// (consistent): the search never reopens a settled cell.
    fn estimate(&self, from: Point, to: Point) -> u64;
}
