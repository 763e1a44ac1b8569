use crate::error::ConfigError;
use crate::series::PriceSeries;

/// Seeded random walk, floored at zero.
#[derive(Debug, Clone)]
pub struct PriceGenerator {
    state: u64,
    price: f64,
    max_step: f64,
}

impl PriceGenerator {
    pub fn new(seed: u64, start_price: f64, max_step: f64) -> Self {
        assert!(
            start_price.is_finite() && start_price >= 0.0,
            "start_price must be finite and non-negative"
        );
        assert!(
            max_step.is_finite() && max_step >= 0.0,
            "max_step must be finite and non-negative"
        );

        Self {
            state: seed,
            price: start_price,
            max_step,
        }
    }

    pub fn next_price(&mut self) -> f64 {
        let unit = next_unit(&mut self.state);
        let delta = (unit * 2.0 - 1.0) * self.max_step;
        self.price = (self.price + delta).max(0.0);
        self.price
    }

    /// Draws `len` closes. A zero length surfaces as an empty-series error.
    pub fn series(&mut self, len: usize) -> Result<PriceSeries, ConfigError> {
        let closes = (0..len).map(|_| self.next_price()).collect();
        PriceSeries::from_closes(closes)
    }
}

fn next_u64(state: &mut u64) -> u64 {
    *state = state
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407);
    *state
}

fn next_unit(state: &mut u64) -> f64 {
    let value = next_u64(state);
    (value as f64) / (u64::MAX as f64)
}
