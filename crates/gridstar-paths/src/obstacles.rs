//! Per-cell obstacle layers.
//!
//! Every cell carries a 32-bit mask; each bit is a caller-defined layer
//! (walls, units, water, ...). The store only composes bits, it never
//! interprets them.

use gridstar_core::{Point, Range};

use crate::error::EngineError;

/// Clear `layer_mask` from every mask in `masks`, leaving other bits alone.
///
/// Works on any caller-owned mask array, in place.
pub fn reset_obstacles(masks: &mut [u32], layer_mask: u32) {
    for m in masks.iter_mut() {
        *m &= !layer_mask;
    }
}

/// Row-major array of obstacle masks, one per grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObstacleLayers {
    rng: Range,
    masks: Vec<u32>,
}

impl ObstacleLayers {
    /// An obstacle-free store covering `rng`.
    pub fn new(rng: Range) -> Self {
        Self {
            rng,
            masks: vec![0; rng.len()],
        }
    }

    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    /// The masks in row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[u32] {
        &self.masks
    }

    /// Mask of the cell at `p`.
    pub fn get(&self, p: Point) -> Result<u32, EngineError> {
        Ok(self.masks[self.index(p)?])
    }

    /// Mask of the cell at a linear index.
    pub fn get_at_index(&self, idx: usize) -> Result<u32, EngineError> {
        self.masks
            .get(idx)
            .copied()
            .ok_or(EngineError::IndexOutOfBounds(idx))
    }

    /// Clear `layer_mask` from every cell. `u32::MAX` clears everything.
    pub fn reset(&mut self, layer_mask: u32) {
        reset_obstacles(&mut self.masks, layer_mask);
    }

    /// Set the `layer_mask` bits on the cell at `p`.
    pub fn add(&mut self, p: Point, layer_mask: u32) -> Result<(), EngineError> {
        let i = self.index(p)?;
        self.masks[i] |= layer_mask;
        Ok(())
    }

    /// Clear the `layer_mask` bits on the cell at `p`.
    pub fn remove(&mut self, p: Point, layer_mask: u32) -> Result<(), EngineError> {
        let i = self.index(p)?;
        self.masks[i] &= !layer_mask;
        Ok(())
    }

    pub fn add_at_index(&mut self, idx: usize, layer_mask: u32) -> Result<(), EngineError> {
        let m = self
            .masks
            .get_mut(idx)
            .ok_or(EngineError::IndexOutOfBounds(idx))?;
        *m |= layer_mask;
        Ok(())
    }

    pub fn remove_at_index(&mut self, idx: usize, layer_mask: u32) -> Result<(), EngineError> {
        let m = self
            .masks
            .get_mut(idx)
            .ok_or(EngineError::IndexOutOfBounds(idx))?;
        *m &= !layer_mask;
        Ok(())
    }

    /// Set `layer_mask` on every listed cell.
    ///
    /// All points are checked before any cell changes, so an out-of-bounds
    /// point leaves the store untouched.
    pub fn add_many<I>(&mut self, points: I, layer_mask: u32) -> Result<(), EngineError>
    where
        I: IntoIterator<Item = Point>,
    {
        let indices = points
            .into_iter()
            .map(|p| self.index(p))
            .collect::<Result<Vec<_>, _>>()?;
        for i in indices {
            self.masks[i] |= layer_mask;
        }
        Ok(())
    }

    /// Replace every mask at once.
    ///
    /// `values` must hold exactly one mask per cell; otherwise the store is
    /// left unchanged.
    pub fn load(&mut self, values: &[u32]) -> Result<(), EngineError> {
        if values.len() != self.masks.len() {
            return Err(EngineError::SizeMismatch {
                expected: self.masks.len(),
                actual: values.len(),
            });
        }
        self.masks.copy_from_slice(values);
        log::debug!("loaded {} obstacle masks", values.len());
        Ok(())
    }

    /// Whether the cell at `p` is impassable under `blocking`.
    pub fn is_blocked(&self, p: Point, blocking: u32) -> Result<bool, EngineError> {
        Ok(self.get(p)? & blocking != 0)
    }

    #[inline]
    fn index(&self, p: Point) -> Result<usize, EngineError> {
        self.rng.index_of(p).ok_or(EngineError::OutOfBounds(p))
    }
}
