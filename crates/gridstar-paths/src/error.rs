//! Engine error type.

use std::fmt;

use gridstar_core::Point;

use crate::wire::WireError;

/// Errors reported synchronously by [`Engine`](crate::Engine) operations.
///
/// An unreachable goal is not an error: queries return an empty
/// [`Path`](crate::Path) instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Grid width or height is non-positive, or the cell count does not fit
    /// the engine's 32-bit cell indices.
    InvalidDimension { width: i32, height: i32 },
    /// A bulk obstacle array does not hold exactly one mask per cell.
    SizeMismatch { expected: usize, actual: usize },
    /// A coordinate outside the grid was passed to a per-cell operation.
    OutOfBounds(Point),
    /// A linear cell index outside the grid.
    IndexOutOfBounds(usize),
    /// A layer index outside `0..32`.
    InvalidLayer(u32),
    /// A zero step cost in the configuration.
    InvalidStepCost { cardinal: u32, diagonal: u32 },
    /// A flat coordinate buffer could not be decoded.
    Wire(WireError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimension { width, height } => {
                write!(f, "invalid grid dimension {width}x{height}")
            }
            Self::SizeMismatch { expected, actual } => {
                write!(f, "obstacle array holds {actual} cells, grid has {expected}")
            }
            Self::OutOfBounds(p) => write!(f, "cell {p} is outside the grid"),
            Self::IndexOutOfBounds(i) => write!(f, "cell index {i} is outside the grid"),
            Self::InvalidLayer(l) => write!(f, "layer {l} is not in 0..32"),
            Self::InvalidStepCost { cardinal, diagonal } => write!(
                f,
                "step costs must be positive (cardinal {cardinal}, diagonal {diagonal})"
            ),
            Self::Wire(e) => write!(f, "wire: {e}"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Wire(e) => Some(e),
            _ => None,
        }
    }
}

impl From<WireError> for EngineError {
    fn from(e: WireError) -> Self {
        Self::Wire(e)
    }
}
