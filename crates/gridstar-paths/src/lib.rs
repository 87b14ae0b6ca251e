//! Multi-source/multi-target A* over bitmask obstacle layers.
//!
//! An [`Engine`] owns one grid and everything a host mutates between
//! queries:
//!
//! - the precomputed adjacency table ([`Topology`], 4- or 8-connected),
//! - one 32-bit obstacle mask per cell ([`ObstacleLayers`]), where each bit
//!   is a caller-defined layer,
//! - an extra traversal cost per layer ([`LayerCosts`]).
//!
//! A query names several acceptable starts and ends plus a blocking mask.
//! Cells whose mask intersects the blocking mask are impassable; the other
//! layers of a cell only add their cost. The cheapest path over all
//! start/end pairs comes back as a [`Path`], empty when no end is reachable.
//!
//! ```
//! use gridstar_core::Point;
//! use gridstar_paths::{Engine, EngineConfig};
//!
//! const WALL: u32 = 1;
//!
//! let mut engine = Engine::with_config(5, 5, EngineConfig::eight_connected()).unwrap();
//! for y in 0..4 {
//!     engine.add_obstacle(Point::new(2, y), WALL).unwrap();
//! }
//! let path = engine
//!     .find_path(&[Point::new(0, 2)], &[Point::new(4, 2)], WALL)
//!     .unwrap();
//! assert!(path.cells().contains(&Point::new(2, 4)));
//! ```
//!
//! # Trait hierarchy
//!
//! The search itself runs on a [`Searcher`] and is generic over:
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | neighbour enumeration |
//! | [`WeightedPather`] : [`Pather`] | cost maps |
//! | [`AstarPather`] : [`WeightedPather`] | A* |
//!
//! [`LayerPather`] implements all three for the engine's cost model.

mod astar;
mod config;
mod dijkstra;
mod distance;
mod engine;
mod error;
mod layers;
mod obstacles;
mod path;
mod pather;
mod searcher;
mod topology;
mod traits;
pub mod wire;

pub use config::{Connectivity, EngineConfig};
pub use distance::{chebyshev, manhattan, octile};
pub use engine::Engine;
pub use error::EngineError;
pub use layers::{LAYER_COUNT, LayerCosts};
pub use obstacles::{ObstacleLayers, reset_obstacles};
pub use path::{Path, PathNode};
pub use pather::LayerPather;
pub use searcher::{Searcher, UNREACHABLE};
pub use topology::{Edge, Topology};
pub use traits::{AstarPather, Pather, WeightedPather};
pub use wire::{Encoding, WireError};
