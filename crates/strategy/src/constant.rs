use core_sim::SimulationState;

use crate::{Strategy, StrategyError};

/// Trades the same quantity on every step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantAction {
    qty: f64,
}

impl ConstantAction {
    pub fn new(qty: f64) -> Self {
        Self { qty }
    }

    pub fn qty(&self) -> f64 {
        self.qty
    }
}

pub fn buy_every_step() -> ConstantAction {
    ConstantAction::new(1.0)
}

impl Strategy for ConstantAction {
    fn action(&mut self, _state: &SimulationState) -> Result<f64, StrategyError> {
        Ok(self.qty)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Hold;

impl Strategy for Hold {
    fn action(&mut self, _state: &SimulationState) -> Result<f64, StrategyError> {
        Ok(0.0)
    }
}
