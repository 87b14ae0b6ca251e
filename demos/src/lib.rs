//! ASCII maps for the gridstar demos.
//!
//! Tiles: `#` wall (impassable), `~` water (passable, costly), `.` floor,
//! `S` start, `E` end. A map may hold several starts and ends; the cheapest
//! pair wins.

use std::fmt;

use gridstar_core::Point;
use gridstar_paths::{Engine, EngineConfig, EngineError, Path};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Layer index of walls.
pub const WALL_LAYER: u32 = 0;
/// Layer index of water.
pub const WATER_LAYER: u32 = 1;
pub const WALL: u32 = 1 << WALL_LAYER;
pub const WATER: u32 = 1 << WATER_LAYER;
/// Extra cost of entering a water cell.
pub const WATER_COST: u32 = 4;

pub const DEMO_MAP: &str = "\
S.....#.................
......#.....~~~~~.......
......#.....~~~~~.......
......#.....~~~~~.......
......#.....~~~~~.......
......#.....~~~~~...E...
......#.....~~~~~.......
......######~~~~~.......
............~~~~~.......
........................
";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum MapError {
    Empty,
    Ragged { row: usize, width: usize, expected: usize },
    UnknownTile { ch: char, at: Point },
    Engine(EngineError),
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty map"),
            Self::Ragged {
                row,
                width,
                expected,
            } => write!(f, "row {row} has width {width}, expected {expected}"),
            Self::UnknownTile { ch, at } => write!(f, "unknown tile {ch:?} at {at}"),
            Self::Engine(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Engine(e) => Some(e),
            _ => None,
        }
    }
}

impl From<EngineError> for MapError {
    fn from(e: EngineError) -> Self {
        Self::Engine(e)
    }
}

// ---------------------------------------------------------------------------
// AsciiMap
// ---------------------------------------------------------------------------

pub struct AsciiMap {
    tiles: Vec<char>,
    width: i32,
    engine: Engine,
    starts: Vec<Point>,
    ends: Vec<Point>,
}

impl AsciiMap {
    /// Parse `text` into an engine with the wall and water layers loaded.
    pub fn parse(text: &str, config: EngineConfig) -> Result<Self, MapError> {
        let rows: Vec<Vec<char>> = text
            .lines()
            .filter(|l| !l.is_empty())
            .map(|l| l.chars().collect())
            .collect();
        let expected = rows.first().map_or(0, Vec::len);
        if expected == 0 {
            return Err(MapError::Empty);
        }
        for (row, r) in rows.iter().enumerate() {
            if r.len() != expected {
                return Err(MapError::Ragged {
                    row,
                    width: r.len(),
                    expected,
                });
            }
        }

        let width = expected as i32;
        let height = rows.len() as i32;
        let mut engine = Engine::with_config(width, height, config)?;
        engine.set_layer_distance(WATER_LAYER, WATER_COST)?;

        let mut masks = Vec::with_capacity(expected * rows.len());
        let mut starts = Vec::new();
        let mut ends = Vec::new();
        for (y, r) in rows.iter().enumerate() {
            for (x, &ch) in r.iter().enumerate() {
                let at = Point::new(x as i32, y as i32);
                let mask = match ch {
                    '#' => WALL,
                    '~' => WATER,
                    '.' => 0,
                    'S' => {
                        starts.push(at);
                        0
                    }
                    'E' => {
                        ends.push(at);
                        0
                    }
                    _ => return Err(MapError::UnknownTile { ch, at }),
                };
                masks.push(mask);
            }
        }
        engine.load_obstacles(&masks)?;

        Ok(Self {
            tiles: rows.into_iter().flatten().collect(),
            width,
            engine,
            starts,
            ends,
        })
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn starts(&self) -> &[Point] {
        &self.starts
    }

    pub fn ends(&self) -> &[Point] {
        &self.ends
    }

    /// Cheapest path from any `S` to any `E`, walls blocking.
    pub fn solve(&self) -> Result<Path, MapError> {
        Ok(self.engine.find_path(&self.starts, &self.ends, WALL)?)
    }

    /// The map with the interior of `path` drawn as `*`.
    pub fn render(&self, path: &Path) -> String {
        let mut tiles = self.tiles.clone();
        for &p in path.cells() {
            let i = (p.y * self.width + p.x) as usize;
            if matches!(tiles[i], '.' | '~') {
                tiles[i] = '*';
            }
        }
        let mut out = String::with_capacity(tiles.len() + tiles.len() / self.width as usize);
        for row in tiles.chunks(self.width as usize) {
            out.extend(row);
            out.push('\n');
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Random maps
// ---------------------------------------------------------------------------

/// Random map text with `S` in the top-left corner and `E` in the
/// bottom-right one. `density` is the wall probability; a third of the
/// remaining cells become water.
pub fn random_map(width: usize, height: usize, density: f64, seed: u64) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = String::with_capacity((width + 1) * height);
    for y in 0..height {
        for x in 0..width {
            let ch = if x == 0 && y == 0 {
                'S'
            } else if x + 1 == width && y + 1 == height {
                'E'
            } else if rng.random_bool(density) {
                '#'
            } else if rng.random_range(0..3) == 0 {
                '~'
            } else {
                '.'
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_map_parses() {
        let map = AsciiMap::parse(DEMO_MAP, EngineConfig::eight_connected()).unwrap();
        assert_eq!(map.engine().width(), 24);
        assert_eq!(map.engine().height(), 10);
        assert_eq!(map.starts(), &[Point::new(0, 0)]);
        assert_eq!(map.ends(), &[Point::new(20, 5)]);
        assert_eq!(map.engine().obstacle_at(Point::new(6, 3)).unwrap(), WALL);
        assert_eq!(map.engine().obstacle_at(Point::new(13, 3)).unwrap(), WATER);
    }

    #[test]
    fn demo_map_solves_around_walls() {
        let map = AsciiMap::parse(DEMO_MAP, EngineConfig::eight_connected()).unwrap();
        let path = map.solve().unwrap();
        assert_eq!(path.first(), Some(Point::new(0, 0)));
        assert_eq!(path.last(), Some(Point::new(20, 5)));
        for &p in path.cells() {
            assert!(!map.engine().is_blocked(p, WALL).unwrap(), "{p} is a wall");
        }
        // the wall forces the path under row 7
        assert!(path.cells().iter().any(|p| p.y >= 8));
    }

    #[test]
    fn water_costs_extra() {
        let dry = AsciiMap::parse("S...E\n", EngineConfig::default()).unwrap();
        let wet = AsciiMap::parse("S.~.E\n", EngineConfig::default()).unwrap();
        assert_eq!(dry.solve().unwrap().cost(), 4);
        assert_eq!(wet.solve().unwrap().cost(), 4 + u64::from(WATER_COST));
    }

    #[test]
    fn water_is_avoided_when_cheaper() {
        let text = "\
.....
S.~.E
.....
";
        let map = AsciiMap::parse(text, EngineConfig::default()).unwrap();
        let path = map.solve().unwrap();
        assert!(!path.cells().contains(&Point::new(2, 1)));
        assert_eq!(path.cost(), 6);
    }

    #[test]
    fn walled_off_end_has_no_path() {
        let map = AsciiMap::parse("S.#.E\n", EngineConfig::default()).unwrap();
        assert!(map.solve().unwrap().is_empty());
    }

    #[test]
    fn render_marks_interior() {
        let map = AsciiMap::parse("S~..E\n", EngineConfig::default()).unwrap();
        let path = map.solve().unwrap();
        assert_eq!(map.render(&path), "S***E\n");
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(
            AsciiMap::parse("", EngineConfig::default()),
            Err(MapError::Empty)
        ));
        assert!(matches!(
            AsciiMap::parse("S..\n..\n", EngineConfig::default()),
            Err(MapError::Ragged {
                row: 1,
                width: 2,
                expected: 3
            })
        ));
        match AsciiMap::parse("S.?\n", EngineConfig::default()) {
            Err(MapError::UnknownTile { ch, at }) => {
                assert_eq!(ch, '?');
                assert_eq!(at, Point::new(2, 0));
            }
            _ => panic!("expected UnknownTile"),
        }
    }

    #[test]
    fn random_map_is_reproducible() {
        let a = random_map(12, 6, 0.3, 7);
        assert_eq!(a, random_map(12, 6, 0.3, 7));
        assert!(a.starts_with('S'));
        assert!(a.trim_end().ends_with('E'));
        assert_eq!(a.lines().count(), 6);
        assert!(AsciiMap::parse(&a, EngineConfig::eight_connected()).is_ok());
    }
}
