use crate::divergence::Signal;
use crate::StrategyError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizingConfig {
    base_order_size: f64,
}

impl SizingConfig {
    pub fn new(base_order_size: f64) -> Result<Self, StrategyError> {
        if !base_order_size.is_finite() || base_order_size <= 0.0 {
            return Err(StrategyError::InvalidBaseOrderSize);
        }

        Ok(Self { base_order_size })
    }

    pub fn base_order_size(&self) -> f64 {
        self.base_order_size
    }
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            base_order_size: 1.0,
        }
    }
}

/// Turns a signal into a signed trade quantity: buys are positive, sells negative.
pub fn signed_action(signal: Signal, config: SizingConfig) -> Result<f64, StrategyError> {
    let size = config.base_order_size;
    if !size.is_finite() || size <= 0.0 {
        return Err(StrategyError::InvalidBaseOrderSize);
    }

    Ok(match signal {
        Signal::Buy => size,
        Signal::Sell => -size,
        Signal::Hold => 0.0,
    })
}

#[cfg(test)]
mod tests {
    use super::{signed_action, SizingConfig};
    use crate::divergence::Signal;
    use crate::StrategyError;

    #[test]
    fn sizes_buys_positive_and_sells_negative() {
        let config = SizingConfig::new(3.5).unwrap();

        assert_eq!(signed_action(Signal::Buy, config), Ok(3.5));
        assert_eq!(signed_action(Signal::Sell, config), Ok(-3.5));
        assert_eq!(signed_action(Signal::Hold, config), Ok(0.0));
    }

    #[test]
    fn rejects_non_positive_or_non_finite_base_size() {
        assert_eq!(SizingConfig::new(0.0), Err(StrategyError::InvalidBaseOrderSize));
        assert_eq!(SizingConfig::new(-1.0), Err(StrategyError::InvalidBaseOrderSize));
        assert_eq!(
            SizingConfig::new(f64::INFINITY),
            Err(StrategyError::InvalidBaseOrderSize)
        );
    }
}
