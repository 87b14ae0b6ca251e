use std::collections::BinaryHeap;

use gridstar_core::Point;

use crate::Path;
use crate::searcher::{NodeRef, Searcher};
use crate::traits::AstarPather;

impl Searcher {
    /// Shortest path from any of `starts` to any of `ends` using A*.
    ///
    /// Every start enters the open list at cost 0, and the search stops at
    /// the first end it settles, so the returned path has minimal total cost
    /// over all start/end pairs. The heuristic of a cell is the smallest
    /// [`estimate`](AstarPather::estimate) over all ends.
    ///
    /// If a start is also an end, the single-cell path of the first such
    /// start is returned without searching. Points outside the range are
    /// ignored. Returns an empty path when no end is reachable.
    pub fn astar_multi<P: AstarPather>(
        &mut self,
        pather: &P,
        starts: &[Point],
        ends: &[Point],
    ) -> Path {
        self.expanded = 0;
        let cur = self.next_stamp();

        // Mark goals; `goals` keeps the in-range ends, deduplicated.
        let mut goals = Vec::with_capacity(ends.len());
        for &e in ends {
            let Some(ei) = self.idx(e) else {
                continue;
            };
            if self.nodes[ei].goal != cur {
                self.nodes[ei].goal = cur;
                goals.push(e);
            }
        }
        if goals.is_empty() {
            return Path::empty();
        }

        for &s in starts {
            if let Some(si) = self.idx(s) {
                if self.nodes[si].goal == cur {
                    return Path::new(vec![s], 0);
                }
            }
        }

        let estimate = |p: Point| {
            goals
                .iter()
                .map(|&g| pather.estimate(p, g))
                .min()
                .unwrap_or(0)
        };

        let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
        let mut seq = 0u64;

        for &s in starts {
            let Some(si) = self.idx(s) else {
                continue;
            };
            if self.nodes[si].stamp == cur {
                // duplicate start
                continue;
            }
            let h = estimate(s);
            let node = &mut self.nodes[si];
            node.g = 0;
            node.h = h;
            node.parent = usize::MAX;
            node.stamp = cur;
            node.open = true;
            open.push(NodeRef {
                idx: si,
                f: h,
                h,
                seq,
            });
            seq += 1;
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);

        let found = 'search: loop {
            let Some(current) = open.pop() else {
                break 'search None;
            };

            let ci = current.idx;

            // Skip stale entries and settled nodes.
            if self.nodes[ci].stamp != cur || !self.nodes[ci].open {
                continue;
            }

            if self.nodes[ci].goal == cur {
                break 'search Some(ci);
            }

            self.nodes[ci].open = false;
            self.expanded += 1;
            let current_g = self.nodes[ci].g;
            let current_point = self.point(ci);

            nbuf.clear();
            pather.successors(current_point, &mut nbuf);

            for &(np, step) in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let tentative_g = current_g.saturating_add(step);

                let fresh = self.nodes[ni].stamp != cur;
                if !fresh {
                    let n = &self.nodes[ni];
                    // Settled nodes are never reopened.
                    if !n.open || tentative_g >= n.g {
                        continue;
                    }
                }
                let h = if fresh { estimate(np) } else { self.nodes[ni].h };

                let n = &mut self.nodes[ni];
                n.stamp = cur;
                n.g = tentative_g;
                n.h = h;
                n.parent = ci;
                n.open = true;

                open.push(NodeRef {
                    idx: ni,
                    f: tentative_g.saturating_add(h),
                    h,
                    seq,
                });
                seq += 1;
            }
        };

        self.nbuf = nbuf;

        let Some(goal_idx) = found else {
            log::trace!("astar: no path, {} nodes expanded", self.expanded);
            return Path::empty();
        };

        // Reconstruct path.
        let mut cells = Vec::new();
        let mut ci = goal_idx;
        while ci != usize::MAX {
            cells.push(self.point(ci));
            ci = self.nodes[ci].parent;
        }
        cells.reverse();
        let cost = self.nodes[goal_idx].g;
        log::trace!(
            "astar: {} cells, cost {}, {} nodes expanded",
            cells.len(),
            cost,
            self.expanded
        );
        Path::new(cells, cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{Pather, WeightedPather};
    use crate::{chebyshev, manhattan};
    use gridstar_core::Range;

    /// Open 4-connected grid where walls are listed explicitly.
    struct Walls {
        rng: Range,
        walls: Vec<Point>,
    }

    impl Pather for Walls {
        fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
            for n in p.neighbors_4() {
                if self.rng.contains(n) && !self.walls.contains(&n) {
                    buf.push(n);
                }
            }
        }
    }

    impl WeightedPather for Walls {
        fn cost(&self, _from: Point, _to: Point) -> u64 {
            1
        }
    }

    impl AstarPather for Walls {
        fn estimate(&self, from: Point, to: Point) -> u64 {
            manhattan(from, to)
        }
    }

    /// 8-connected unit-cost grid.
    struct King(Range);

    impl Pather for King {
        fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
            for n in p.neighbors_4().into_iter().chain(p.neighbors_diagonal()) {
                if self.0.contains(n) {
                    buf.push(n);
                }
            }
        }
    }

    impl WeightedPather for King {
        fn cost(&self, _from: Point, _to: Point) -> u64 {
            1
        }
    }

    impl AstarPather for King {
        fn estimate(&self, from: Point, to: Point) -> u64 {
            chebyshev(from, to)
        }
    }

    #[test]
    fn straight_corridor() {
        let rng = Range::with_size(5, 1);
        let pather = Walls { rng, walls: vec![] };
        let mut s = Searcher::new(rng);
        let path = s.astar_multi(&pather, &[Point::new(0, 0)], &[Point::new(4, 0)]);
        assert_eq!(path.steps(), 4);
        assert_eq!(path.cost(), 4);
        assert_eq!(path.first(), Some(Point::new(0, 0)));
        assert_eq!(path.last(), Some(Point::new(4, 0)));
    }

    #[test]
    fn nearest_of_several_ends_wins() {
        let rng = Range::with_size(10, 10);
        let pather = King(rng);
        let mut s = Searcher::new(rng);
        let ends = [Point::new(9, 9), Point::new(2, 3), Point::new(0, 9)];
        let path = s.astar_multi(&pather, &[Point::new(0, 0)], &ends);
        assert_eq!(path.last(), Some(Point::new(2, 3)));
        assert_eq!(path.steps(), 3);
    }

    #[test]
    fn nearest_of_several_starts_wins() {
        let rng = Range::with_size(10, 10);
        let pather = King(rng);
        let mut s = Searcher::new(rng);
        let starts = [Point::new(0, 0), Point::new(9, 9), Point::new(7, 5)];
        let path = s.astar_multi(&pather, &starts, &[Point::new(9, 5)]);
        assert_eq!(path.first(), Some(Point::new(7, 5)));
        assert_eq!(path.steps(), 2);
    }

    #[test]
    fn shared_start_and_end_short_circuits() {
        let rng = Range::with_size(4, 4);
        let pather = King(rng);
        let mut s = Searcher::new(rng);
        let starts = [Point::new(0, 0), Point::new(3, 3), Point::new(1, 1)];
        let ends = [Point::new(1, 1), Point::new(3, 3)];
        let path = s.astar_multi(&pather, &starts, &ends);
        assert_eq!(path.cells(), &[Point::new(3, 3)]);
        assert_eq!(path.cost(), 0);
        assert_eq!(s.expanded(), 0);
    }

    #[test]
    fn walled_off_end_is_unreachable() {
        let rng = Range::with_size(3, 3);
        let walls = vec![Point::new(1, 0), Point::new(1, 1), Point::new(1, 2)];
        let pather = Walls { rng, walls };
        let mut s = Searcher::new(rng);
        let path = s.astar_multi(&pather, &[Point::new(0, 1)], &[Point::new(2, 1)]);
        assert!(path.is_empty());
        assert_eq!(s.expanded(), 3);
    }

    #[test]
    fn out_of_range_points_are_ignored() {
        let rng = Range::with_size(3, 3);
        let pather = King(rng);
        let mut s = Searcher::new(rng);
        assert!(
            s.astar_multi(&pather, &[Point::new(0, 0)], &[Point::new(7, 7)])
                .is_empty()
        );
        let path = s.astar_multi(
            &pather,
            &[Point::new(-1, 0), Point::new(0, 0)],
            &[Point::new(2, 2)],
        );
        assert_eq!(path.steps(), 2);
    }

    #[test]
    fn searcher_reuse_gives_identical_results() {
        let rng = Range::with_size(8, 8);
        let walls = vec![Point::new(3, 0), Point::new(3, 1), Point::new(3, 2), Point::new(3, 3)];
        let pather = Walls { rng, walls };
        let mut s = Searcher::new(rng);
        let first = s.astar_multi(&pather, &[Point::new(0, 0)], &[Point::new(7, 0)]);
        for _ in 0..3 {
            let again = s.astar_multi(&pather, &[Point::new(0, 0)], &[Point::new(7, 0)]);
            assert_eq!(again, first);
        }
        assert_eq!(first.steps(), 15);
    }
}
