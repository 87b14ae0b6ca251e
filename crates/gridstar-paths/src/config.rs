//! Engine configuration: [`EngineConfig`] and [`Connectivity`].

use crate::error::EngineError;

/// Which neighbours a cell is connected to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Connectivity {
    /// Cardinal moves only.
    #[default]
    Four,
    /// Cardinal and diagonal moves.
    Eight,
}

impl Connectivity {
    /// Upper bound on the neighbour count of a cell.
    #[inline]
    pub fn max_neighbors(self) -> usize {
        match self {
            Self::Four => 4,
            Self::Eight => 8,
        }
    }
}

/// Static configuration of an [`Engine`](crate::Engine).
///
/// Fixed for the lifetime of the engine; obstacles, layer costs and the
/// default blocking mask are mutated through the engine itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    pub connectivity: Connectivity,
    /// Cost of a horizontal or vertical step. Must be > 0.
    pub cardinal_cost: u32,
    /// Cost of a diagonal step (8-connectivity only). Must be > 0.
    pub diagonal_cost: u32,
    /// Blocking mask used by [`Engine::path`](crate::Engine::path) until
    /// changed with [`Engine::set_blocking`](crate::Engine::set_blocking).
    pub default_blocking: u32,
    /// Let end cells be entered even when their mask intersects the
    /// blocking mask (a target standing on an obstacle).
    pub enter_blocked_ends: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            connectivity: Connectivity::Four,
            cardinal_cost: 1,
            diagonal_cost: 1,
            default_blocking: u32::MAX,
            enter_blocked_ends: false,
        }
    }
}

impl EngineConfig {
    /// Default configuration with 8-connectivity and unit steps (Chebyshev
    /// metric).
    pub fn eight_connected() -> Self {
        Self::default().with_connectivity(Connectivity::Eight)
    }

    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }

    pub fn with_step_costs(mut self, cardinal: u32, diagonal: u32) -> Self {
        self.cardinal_cost = cardinal;
        self.diagonal_cost = diagonal;
        self
    }

    pub fn with_default_blocking(mut self, mask: u32) -> Self {
        self.default_blocking = mask;
        self
    }

    pub fn with_enter_blocked_ends(mut self, enter: bool) -> Self {
        self.enter_blocked_ends = enter;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), EngineError> {
        if self.cardinal_cost == 0 || self.diagonal_cost == 0 {
            return Err(EngineError::InvalidStepCost {
                cardinal: self.cardinal_cost,
                diagonal: self.diagonal_cost,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_four_connected_unit_grid() {
        let c = EngineConfig::default();
        assert_eq!(c.connectivity, Connectivity::Four);
        assert_eq!((c.cardinal_cost, c.diagonal_cost), (1, 1));
        assert_eq!(c.default_blocking, u32::MAX);
        assert!(!c.enter_blocked_ends);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn zero_step_cost_is_rejected() {
        let c = EngineConfig::eight_connected().with_step_costs(2, 0);
        assert_eq!(
            c.validate(),
            Err(EngineError::InvalidStepCost {
                cardinal: 2,
                diagonal: 0
            })
        );
    }
}
