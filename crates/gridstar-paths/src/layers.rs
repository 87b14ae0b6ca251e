//! Extra traversal cost per obstacle layer.

use crate::error::EngineError;

/// Number of layers in an obstacle mask.
pub const LAYER_COUNT: u32 = u32::BITS;

/// Sparse table of layer costs.
///
/// Entering a cell costs the step cost plus the cost of every layer set in
/// the cell's mask. Unset layers cost nothing. A layer's cost is independent
/// of whether it blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayerCosts {
    costs: [u32; LAYER_COUNT as usize],
    // bit i set iff costs[i] != 0
    active: u32,
}

impl LayerCosts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cost of `layer` (a bit index, not a mask).
    pub fn set(&mut self, layer: u32, cost: u32) -> Result<(), EngineError> {
        let i = Self::check(layer)?;
        self.costs[i] = cost;
        if cost == 0 {
            self.active &= !(1 << layer);
        } else {
            self.active |= 1 << layer;
        }
        Ok(())
    }

    /// Revert `layer` to no extra cost.
    pub fn reset(&mut self, layer: u32) -> Result<(), EngineError> {
        self.set(layer, 0)
    }

    /// Revert every layer.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn get(&self, layer: u32) -> Result<u32, EngineError> {
        Ok(self.costs[Self::check(layer)?])
    }

    /// Layers carrying a non-zero cost, as a mask.
    #[inline]
    pub fn active_mask(&self) -> u32 {
        self.active
    }

    /// Summed cost of the layers present in `mask`.
    #[inline]
    pub fn extra_cost(&self, mask: u32) -> u64 {
        let mut bits = mask & self.active;
        let mut total = 0u64;
        while bits != 0 {
            let layer = bits.trailing_zeros();
            total += u64::from(self.costs[layer as usize]);
            bits &= bits - 1;
        }
        total
    }

    fn check(layer: u32) -> Result<usize, EngineError> {
        if layer >= LAYER_COUNT {
            return Err(EngineError::InvalidLayer(layer));
        }
        Ok(layer as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_layers_cost_nothing() {
        let t = LayerCosts::new();
        assert_eq!(t.extra_cost(u32::MAX), 0);
        assert_eq!(t.get(31).unwrap(), 0);
    }

    #[test]
    fn costs_sum_over_present_layers() {
        let mut t = LayerCosts::new();
        t.set(0, 5).unwrap();
        t.set(3, 7).unwrap();
        t.set(31, 1).unwrap();
        assert_eq!(t.extra_cost(0b1), 5);
        assert_eq!(t.extra_cost(0b1001), 12);
        assert_eq!(t.extra_cost(0b0110), 0);
        assert_eq!(t.extra_cost(u32::MAX), 13);
        assert_eq!(t.active_mask(), 0b1001 | 1 << 31);
    }

    #[test]
    fn set_overwrites_and_reset_reverts() {
        let mut t = LayerCosts::new();
        t.set(2, 4).unwrap();
        t.set(2, 9).unwrap();
        assert_eq!(t.extra_cost(0b100), 9);
        t.reset(2).unwrap();
        assert_eq!(t.extra_cost(0b100), 0);
        assert_eq!(t.active_mask(), 0);
    }

    #[test]
    fn layer_index_is_validated() {
        let mut t = LayerCosts::new();
        assert_eq!(t.set(32, 1), Err(EngineError::InvalidLayer(32)));
        assert_eq!(t.reset(40), Err(EngineError::InvalidLayer(40)));
        assert_eq!(t, LayerCosts::new());
    }

    #[test]
    fn large_costs_do_not_overflow() {
        let mut t = LayerCosts::new();
        for layer in 0..LAYER_COUNT {
            t.set(layer, u32::MAX).unwrap();
        }
        assert_eq!(t.extra_cost(u32::MAX), u64::from(u32::MAX) * 32);
    }
}
