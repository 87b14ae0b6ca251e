//! **gridstar-core**: geometry primitives for the *gridstar* pathfinding
//! engine.
//!
//! A grid cell is addressed by a [`Point`]; a grid is described by the
//! half-open [`Range`] of its cells, which also owns the row-major
//! conversion between points and linear cell indices.

pub mod geom;

pub use geom::{Point, Range, RangeIter};
