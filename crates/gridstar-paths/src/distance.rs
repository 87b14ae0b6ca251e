use gridstar_core::Point;

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> u64 {
    u64::from((a.x - b.x).unsigned_abs()) + u64::from((a.y - b.y).unsigned_abs())
}

/// Chebyshev (L∞) distance between two points.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> u64 {
    u64::from((a.x - b.x).unsigned_abs().max((a.y - b.y).unsigned_abs()))
}

/// Cheapest obstacle-free 8-connected cost between two points, with
/// `diagonal >= cardinal`.
///
/// A diagonal step is never charged more than the two cardinal steps it
/// replaces.
#[inline]
pub fn octile(a: Point, b: Point, cardinal: u64, diagonal: u64) -> u64 {
    let dx = u64::from((a.x - b.x).unsigned_abs());
    let dy = u64::from((a.y - b.y).unsigned_abs());
    let (lo, hi) = if dx < dy { (dx, dy) } else { (dy, dx) };
    let diagonal = diagonal.min(cardinal * 2);
    cardinal * (hi - lo) + diagonal * lo
}
