use core_sim::SimulationState;

use crate::sizing::{signed_action, SizingConfig};
use crate::{Strategy, StrategyError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

pub fn divergence(reference_price: f64, market_price: f64) -> f64 {
    reference_price - market_price
}

pub fn emit_signal(reference_price: f64, market_price: f64, threshold: f64) -> Signal {
    let divergence = divergence(reference_price, market_price);
    let threshold = threshold.abs();

    if divergence > threshold {
        Signal::Buy
    } else if divergence < -threshold {
        Signal::Sell
    } else {
        Signal::Hold
    }
}

/// Mean of the last `window` executed prices, or `None` until that many
/// steps have been recorded.
pub fn trailing_mean(state: &SimulationState, window: usize) -> Option<f64> {
    let history = state.history();
    if window == 0 || history.len() < window {
        return None;
    }

    let recent = &history[history.len() - window..];
    let total: f64 = recent.iter().map(|record| record.price).sum();
    Some(total / window as f64)
}

/// Buys when the current price trades below its trailing mean by more than
/// `threshold`, sells when it trades above.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DivergenceStrategy {
    window: usize,
    threshold: f64,
    sizing: SizingConfig,
}

impl DivergenceStrategy {
    pub fn new(
        window: usize,
        threshold: f64,
        sizing: SizingConfig,
    ) -> Result<Self, StrategyError> {
        if window == 0 {
            return Err(StrategyError::InvalidWindow);
        }
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(StrategyError::InvalidThreshold);
        }

        Ok(Self {
            window,
            threshold,
            sizing,
        })
    }

    pub fn signal(&self, state: &SimulationState) -> Signal {
        match trailing_mean(state, self.window) {
            Some(reference) => emit_signal(reference, state.current_price(), self.threshold),
            None => Signal::Hold,
        }
    }
}

impl Strategy for DivergenceStrategy {
    fn action(&mut self, state: &SimulationState) -> Result<f64, StrategyError> {
        let signal = self.signal(state);
        tracing::debug!(step = state.step_index(), ?signal, "divergence signal");
        signed_action(signal, self.sizing)
    }
}
