use std::collections::BinaryHeap;

use gridstar_core::Point;

use crate::path::PathNode;
use crate::searcher::{NodeRef, Searcher, UNREACHABLE};
use crate::traits::WeightedPather;

impl Searcher {
    /// Compute a multi-source Dijkstra cost map.
    ///
    /// Every source starts at cost 0. Returns all reached cells in the order
    /// they were settled (non-decreasing cost). Sources outside the range are
    /// ignored.
    pub fn cost_map<P: WeightedPather>(&mut self, pather: &P, sources: &[Point]) -> &[PathNode] {
        let len = self.rng.len();
        self.cost_buf.clear();
        self.cost_buf.resize(len, UNREACHABLE);
        self.cost_results.clear();
        self.expanded = 0;

        let cur = self.next_stamp();
        let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
        let mut seq = 0u64;

        for &src in sources {
            let Some(si) = self.idx(src) else {
                continue;
            };
            let n = &mut self.nodes[si];
            if n.stamp == cur {
                continue;
            }
            n.g = 0;
            n.h = 0;
            n.stamp = cur;
            n.open = true;
            self.cost_buf[si] = 0;
            open.push(NodeRef {
                idx: si,
                f: 0,
                h: 0,
                seq,
            });
            seq += 1;
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);

        while let Some(current) = open.pop() {
            let ci = current.idx;
            let cn = &self.nodes[ci];
            if cn.stamp != cur || !cn.open {
                continue;
            }
            let current_g = cn.g;
            self.nodes[ci].open = false;
            self.expanded += 1;

            let cp = self.point(ci);
            self.cost_results.push(PathNode {
                pos: cp,
                cost: current_g,
            });

            nbuf.clear();
            pather.successors(cp, &mut nbuf);

            for &(np, step) in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let tentative = current_g.saturating_add(step);

                let n = &mut self.nodes[ni];
                if n.stamp == cur {
                    if !n.open || tentative >= n.g {
                        continue;
                    }
                } else {
                    n.stamp = cur;
                    n.h = 0;
                }

                n.g = tentative;
                n.open = true;
                self.cost_buf[ni] = tentative;
                open.push(NodeRef {
                    idx: ni,
                    f: tentative,
                    h: 0,
                    seq,
                });
                seq += 1;
            }
        }

        self.nbuf = nbuf;
        &self.cost_results
    }

    /// Cost of `p` in the last [`cost_map`](Self::cost_map).
    ///
    /// Returns [`UNREACHABLE`] if the point is outside the range, was not
    /// reached, or no cost map ran since the last range change.
    pub fn cost_at(&self, p: Point) -> u64 {
        self.idx(p)
            .and_then(|i| self.cost_buf.get(i).copied())
            .unwrap_or(UNREACHABLE)
    }
}
