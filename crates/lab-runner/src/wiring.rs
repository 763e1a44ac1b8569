use core_sim::{ConfigError, PriceGenerator, PriceTable, DEFAULT_CLOSE_COLUMN};
use strategy::{buy_every_step, DivergenceStrategy, Hold, SizingConfig, Strategy, StrategyError};

use crate::config::{Config, PriceSource, StrategyKind};

pub const FIXED_CLOSES: [f64; 5] = [10.0, 11.0, 12.0, 13.0, 14.0];

const SYNTHETIC_START_PRICE: f64 = 100.0;
const SYNTHETIC_MAX_STEP: f64 = 1.0;
const DIVERGENCE_WINDOW: usize = 10;
const DIVERGENCE_THRESHOLD: f64 = 0.5;

pub fn price_table(config: &Config) -> Result<PriceTable, ConfigError> {
    let closes = match config.price_source {
        PriceSource::Fixed => FIXED_CLOSES.to_vec(),
        PriceSource::Synthetic => {
            let series = PriceGenerator::new(config.seed, SYNTHETIC_START_PRICE, SYNTHETIC_MAX_STEP)
                .series(config.steps)?;
            series.as_slice().to_vec()
        }
    };

    PriceTable::new().with_column(DEFAULT_CLOSE_COLUMN, closes)
}

pub fn build_strategy(kind: StrategyKind) -> Result<Box<dyn Strategy>, StrategyError> {
    let strategy: Box<dyn Strategy> = match kind {
        StrategyKind::BuyEveryStep => Box::new(buy_every_step()),
        StrategyKind::Hold => Box::new(Hold),
        StrategyKind::Divergence => Box::new(DivergenceStrategy::new(
            DIVERGENCE_WINDOW,
            DIVERGENCE_THRESHOLD,
            SizingConfig::default(),
        )?),
    };

    Ok(strategy)
}

#[cfg(test)]
mod tests {
    use core_sim::SimConfig;
    use runtime::Backtest;

    use super::{build_strategy, price_table, FIXED_CLOSES};
    use crate::config::{Config, PriceSource, StrategyKind};

    fn config(price_source: PriceSource, strategy: StrategyKind) -> Config {
        Config {
            initial_cash: 100.0,
            strategy,
            price_source,
            steps: 40,
            seed: 42,
            history_output_path: "unused.csv".to_string(),
        }
    }

    #[test]
    fn fixed_source_reproduces_the_buy_every_step_example() {
        let config = config(PriceSource::Fixed, StrategyKind::BuyEveryStep);
        let table = price_table(&config).unwrap();
        let mut backtest =
            Backtest::from_table(&table, &SimConfig::with_initial_cash(config.initial_cash))
                .unwrap();
        let mut strategy = build_strategy(config.strategy).unwrap();

        let history = backtest.run(strategy.as_mut()).unwrap();

        assert_eq!(history.prices(), FIXED_CLOSES.to_vec());
        assert_eq!(backtest.state().position(), 5.0);
        assert_eq!(backtest.portfolio_value(), 110.0);
    }

    #[test]
    fn synthetic_source_is_seeded_and_sized_by_config() {
        let config = config(PriceSource::Synthetic, StrategyKind::Divergence);

        let first = price_table(&config).unwrap();
        let second = price_table(&config).unwrap();

        assert_eq!(first.len(), 40);
        assert_eq!(first, second);
    }

    #[test]
    fn every_strategy_kind_builds() {
        for kind in [
            StrategyKind::BuyEveryStep,
            StrategyKind::Hold,
            StrategyKind::Divergence,
        ] {
            assert!(build_strategy(kind).is_ok(), "{} should build", kind.as_str());
        }
    }
}
