use gridstar_core::Point;

use crate::wire::{self, Encoding};

/// A position with its accumulated cost, returned from cost-map queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNode {
    pub pos: Point,
    pub cost: u64,
}

/// Result of a path query: the cells from a start to an end, in order.
///
/// An empty path means no end was reachable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    cells: Vec<Point>,
    cost: u64,
}

impl Path {
    /// The "no path" result.
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn new(cells: Vec<Point>, cost: u64) -> Self {
        Self { cells, cost }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of cells, both endpoints included.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Number of moves.
    #[inline]
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    /// Total cost: step costs plus layer costs of every entered cell.
    #[inline]
    pub fn cost(&self) -> u64 {
        self.cost
    }

    #[inline]
    pub fn cells(&self) -> &[Point] {
        &self.cells
    }

    /// The chosen start.
    pub fn first(&self) -> Option<Point> {
        self.cells.first().copied()
    }

    /// The reached end.
    pub fn last(&self) -> Option<Point> {
        self.cells.last().copied()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.cells.iter()
    }

    pub fn into_cells(self) -> Vec<Point> {
        self.cells
    }

    /// Flat boundary representation, see [`wire`].
    pub fn encode(&self, encoding: Encoding) -> Vec<i32> {
        wire::encode(&self.cells, encoding)
    }
}

impl IntoIterator for Path {
    type Item = Point;
    type IntoIter = std::vec::IntoIter<Point>;
    fn into_iter(self) -> Self::IntoIter {
        self.cells.into_iter()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;
    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

impl From<Path> for Vec<Point> {
    fn from(p: Path) -> Self {
        p.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_path_has_no_steps() {
        let p = Path::empty();
        assert!(p.is_empty());
        assert_eq!(p.steps(), 0);
        assert_eq!(p.first(), None);
        assert_eq!(p.encode(Encoding::LengthPrefixed), vec![0]);
    }

    #[test]
    fn accessors() {
        let p = Path::new(vec![Point::new(0, 0), Point::new(1, 0), Point::new(1, 1)], 7);
        assert_eq!(p.len(), 3);
        assert_eq!(p.steps(), 2);
        assert_eq!(p.cost(), 7);
        assert_eq!(p.first(), Some(Point::new(0, 0)));
        assert_eq!(p.last(), Some(Point::new(1, 1)));
        assert_eq!(p.encode(Encoding::Sentinel), vec![0, 0, 1, 0, 1, 1, -1]);
        let cells: Vec<Point> = p.into();
        assert_eq!(cells.len(), 3);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn pathnode_round_trip() {
        let node = PathNode {
            pos: Point::new(3, 7),
            cost: 42,
        };
        let json = serde_json::to_string(&node).unwrap();
        let back: PathNode = serde_json::from_str(&json).unwrap();
        assert_eq!(node, back);
    }

    #[test]
    fn path_round_trip() {
        let p = Path::new(vec![Point::new(1, 1), Point::new(2, 2)], 1);
        let json = serde_json::to_string(&p).unwrap();
        let back: Path = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
