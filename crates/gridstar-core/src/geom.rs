//! Geometry primitives: [`Point`] and [`Range`].
//!
//! A [`Range`] anchored at the origin describes a `width × height` grid. Its
//! cells are numbered row-major (`y * width + x`), and every conversion
//! between a point and that linear index goes through the bounds-checked
//! [`Range::index_of`] / [`Range::point_at`] pair.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A 2D integer grid coordinate. X grows right, Y grows down.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cardinal neighbours, in the order east, west, south, north.
    #[inline]
    pub fn neighbors_4(self) -> [Point; 4] {
        let Point { x, y } = self;
        [
            Point { x: x + 1, y },
            Point { x: x - 1, y },
            Point { x, y: y + 1 },
            Point { x, y: y - 1 },
        ]
    }

    /// Diagonal neighbours, in the order south-east, south-west, north-east,
    /// north-west.
    #[inline]
    pub fn neighbors_diagonal(self) -> [Point; 4] {
        let Point { x, y } = self;
        [
            Point { x: x + 1, y: y + 1 },
            Point { x: x - 1, y: y + 1 },
            Point { x: x + 1, y: y - 1 },
            Point { x: x - 1, y: y - 1 },
        ]
    }
}

// --- trait impls for Point ---

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point {
    /// Row-major order, matching the linear cell index.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Point {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for (i32, i32) {
    #[inline]
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

impl Add for Point {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

// ---------------------------------------------------------------------------
// Range
// ---------------------------------------------------------------------------

/// The cells `min.x <= x < max.x`, `min.y <= y < max.y`.
///
/// A grid is `Range::with_size(width, height)`. Ranges without cells are all
/// equal to each other.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub min: Point,
    pub max: Point,
}

impl PartialEq for Range {
    fn eq(&self, other: &Self) -> bool {
        (self.min == other.min && self.max == other.max) || (self.is_empty() && other.is_empty())
    }
}

impl Eq for Range {}

impl Hash for Range {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if self.is_empty() {
            // All empty ranges hash the same.
            Point::ZERO.hash(state);
            Point::ZERO.hash(state);
        } else {
            self.min.hash(state);
            self.max.hash(state);
        }
    }
}

impl Range {
    /// Range spanning two opposite corners, given in any order.
    #[inline]
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        let (lo_x, hi_x) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let (lo_y, hi_y) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        Self {
            min: Point::new(lo_x, lo_y),
            max: Point::new(hi_x, hi_y),
        }
    }

    /// The `width × height` grid anchored at the origin.
    #[inline]
    pub fn with_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    #[inline]
    pub fn width(self) -> i32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(self) -> i32 {
        self.max.y - self.min.y
    }

    /// Number of cells.
    #[inline]
    pub fn len(self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.width() as usize * self.height() as usize
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    #[inline]
    pub fn contains(self, p: Point) -> bool {
        (self.min.x..self.max.x).contains(&p.x) && (self.min.y..self.max.y).contains(&p.y)
    }

    /// Row-major index of `p` relative to `min`, or `None` outside the range.
    #[inline]
    pub fn index_of(self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        let x = (p.x - self.min.x) as usize;
        let y = (p.y - self.min.y) as usize;
        Some(y * self.width() as usize + x)
    }

    /// Inverse of [`index_of`](Self::index_of).
    #[inline]
    pub fn point_at(self, idx: usize) -> Option<Point> {
        if idx >= self.len() {
            return None;
        }
        let w = self.width() as usize;
        Some(Point::new(
            (idx % w) as i32 + self.min.x,
            (idx / w) as i32 + self.min.y,
        ))
    }

    /// Cells in index order.
    #[inline]
    pub fn iter(self) -> RangeIter {
        RangeIter { rng: self, next: 0 }
    }
}

impl IntoIterator for Range {
    type Item = Point;
    type IntoIter = RangeIter;
    #[inline]
    fn into_iter(self) -> RangeIter {
        self.iter()
    }
}

// ---------------------------------------------------------------------------
// RangeIter
// ---------------------------------------------------------------------------

/// Iterator over the cells of a [`Range`] in [`Range::index_of`] order.
#[derive(Clone, Debug)]
pub struct RangeIter {
    rng: Range,
    next: usize,
}

impl Iterator for RangeIter {
    type Item = Point;

    #[inline]
    fn next(&mut self) -> Option<Point> {
        let p = self.rng.point_at(self.next)?;
        self.next += 1;
        Some(p)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.rng.len().saturating_sub(self.next);
        (left, Some(left))
    }
}

impl ExactSizeIterator for RangeIter {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn grid() -> Range {
        Range::with_size(4, 3)
    }

    #[test]
    fn offsets_and_tuples() {
        let from = Point::new(2, 5);
        let step = Point::new(-1, 1);
        assert_eq!(from + step, Point::new(1, 6));
        assert_eq!(from + step - from, step);
        let t: (i32, i32) = Point::from((-3, 8)).into();
        assert_eq!(t, (-3, 8));
    }

    #[test]
    fn sorting_follows_cell_index() {
        let g = grid();
        let mut cells = vec![Point::new(3, 2), Point::new(1, 0), Point::new(0, 1)];
        cells.sort();
        let idx: Vec<_> = cells.iter().map(|&c| g.index_of(c).unwrap()).collect();
        assert_eq!(idx, vec![1, 4, 11]);
    }

    #[test]
    fn neighbour_sets_are_disjoint_and_adjacent() {
        let c = Point::new(0, 0);
        let cardinal = c.neighbors_4();
        let diagonal = c.neighbors_diagonal();
        for n in cardinal {
            let d = n - c;
            assert_eq!(d.x.abs() + d.y.abs(), 1);
            assert!(!diagonal.contains(&n));
        }
        for n in diagonal {
            let d = n - c;
            assert_eq!((d.x.abs(), d.y.abs()), (1, 1));
        }
    }

    #[test]
    fn grid_membership() {
        let g = grid();
        assert_eq!((g.width(), g.height(), g.len()), (4, 3, 12));
        assert!(g.contains(Point::new(3, 2)));
        assert!(!g.contains(Point::new(4, 2)));
        assert!(!g.contains(Point::new(3, 3)));
        assert!(!g.contains(Point::new(0, -1)));
    }

    #[test]
    fn corners_in_any_order() {
        assert_eq!(Range::new(4, 3, 0, 0), grid());
        assert_eq!(Range::new(4, 0, 0, 3), grid());
    }

    #[test]
    fn index_of_rejects_wrapping_points() {
        let g = grid();
        assert_eq!(g.index_of(Point::new(3, 0)), Some(3));
        assert_eq!(g.index_of(Point::new(0, 1)), Some(4));
        // one past the row end must not alias the next row
        assert_eq!(g.index_of(Point::new(4, 0)), None);
        assert_eq!(g.index_of(Point::new(-1, 1)), None);
    }

    #[test]
    fn offset_range_round_trips_indices() {
        let r = Range::new(-2, 5, 1, 7);
        assert_eq!(r.iter().len(), 6);
        for (i, p) in r.iter().enumerate() {
            assert_eq!(r.index_of(p), Some(i));
            assert_eq!(r.point_at(i), Some(p));
        }
        assert_eq!(r.iter().next(), Some(Point::new(-2, 5)));
        assert_eq!(r.point_at(6), None);
    }

    #[test]
    fn cell_less_ranges_are_interchangeable() {
        let flat = Range::new(1, 1, 9, 1);
        let thin = Range::new(3, 0, 3, 4);
        assert!(flat.is_empty() && thin.is_empty());
        assert_eq!(flat, thin);
        assert_eq!(thin.iter().next(), None);
        let set: HashSet<Range> = [flat, thin, Range::default()].into_iter().collect();
        assert_eq!(set.len(), 1);
    }
}
