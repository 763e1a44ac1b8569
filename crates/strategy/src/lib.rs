//! Strategy callbacks for the backtest run loop.
//!
//! A strategy sees the simulation through a shared reference and answers
//! with one trade quantity per step; it cannot mutate or replace the state.

mod constant;
pub mod divergence;
mod error;
pub mod sizing;

use core_sim::SimulationState;

pub use constant::{buy_every_step, ConstantAction, Hold};
pub use divergence::{divergence, emit_signal, trailing_mean, DivergenceStrategy, Signal};
pub use error::StrategyError;
pub use sizing::{signed_action, SizingConfig};

pub trait Strategy {
    /// Units to buy (positive) or sell (negative) at the current step.
    fn action(&mut self, state: &SimulationState) -> Result<f64, StrategyError>;
}

impl<F> Strategy for F
where
    F: FnMut(&SimulationState) -> f64,
{
    fn action(&mut self, state: &SimulationState) -> Result<f64, StrategyError> {
        Ok(self(state))
    }
}
