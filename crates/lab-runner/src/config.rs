use std::env;

use thiserror::Error;

const ENV_INITIAL_CASH: &str = "BACKTEST_INITIAL_CASH";
const ENV_STRATEGY: &str = "BACKTEST_STRATEGY";
const ENV_PRICE_SOURCE: &str = "BACKTEST_PRICE_SOURCE";
const ENV_STEPS: &str = "BACKTEST_STEPS";
const ENV_SEED: &str = "BACKTEST_SEED";
const ENV_HISTORY_OUTPUT: &str = "BACKTEST_HISTORY_OUTPUT";

const DEFAULT_INITIAL_CASH: f64 = core_sim::DEFAULT_INITIAL_CASH;
const DEFAULT_STRATEGY: StrategyKind = StrategyKind::BuyEveryStep;
const DEFAULT_PRICE_SOURCE: PriceSource = PriceSource::Fixed;
const DEFAULT_STEPS: usize = 250;
const DEFAULT_SEED: u64 = 42;
const DEFAULT_HISTORY_OUTPUT_PATH: &str = "artifacts/history.csv";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    BuyEveryStep,
    Hold,
    Divergence,
}

impl StrategyKind {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "buy-every-step" => Some(Self::BuyEveryStep),
            "hold" => Some(Self::Hold),
            "divergence" => Some(Self::Divergence),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::BuyEveryStep => "buy-every-step",
            Self::Hold => "hold",
            Self::Divergence => "divergence",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSource {
    Fixed,
    Synthetic,
}

impl PriceSource {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "fixed" => Some(Self::Fixed),
            "synthetic" => Some(Self::Synthetic),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Synthetic => "synthetic",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub initial_cash: f64,
    pub strategy: StrategyKind,
    pub price_source: PriceSource,
    pub steps: usize,
    pub seed: u64,
    pub history_output_path: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("BACKTEST_INITIAL_CASH must be a finite number")]
    InvalidInitialCash,

    #[error("BACKTEST_STRATEGY must be one of: buy-every-step, hold, divergence")]
    InvalidStrategy,

    #[error("BACKTEST_PRICE_SOURCE must be one of: fixed, synthetic")]
    InvalidPriceSource,

    #[error("BACKTEST_STEPS must be a positive integer")]
    InvalidSteps,

    #[error("BACKTEST_SEED must be an unsigned integer")]
    InvalidSeed,

    #[error("BACKTEST_HISTORY_OUTPUT must not be empty or whitespace")]
    InvalidHistoryOutputPath,

    #[error("{key} contains non-unicode data")]
    NonUnicode { key: &'static str },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let initial_cash = match read_env(ENV_INITIAL_CASH)? {
            Some(value) => value
                .parse::<f64>()
                .ok()
                .filter(|cash| cash.is_finite())
                .ok_or(ConfigError::InvalidInitialCash)?,
            None => DEFAULT_INITIAL_CASH,
        };

        let strategy = match read_env(ENV_STRATEGY)? {
            Some(value) => StrategyKind::parse(&value).ok_or(ConfigError::InvalidStrategy)?,
            None => DEFAULT_STRATEGY,
        };

        let price_source = match read_env(ENV_PRICE_SOURCE)? {
            Some(value) => PriceSource::parse(&value).ok_or(ConfigError::InvalidPriceSource)?,
            None => DEFAULT_PRICE_SOURCE,
        };

        let steps = match read_env(ENV_STEPS)? {
            Some(value) => value
                .parse::<usize>()
                .ok()
                .filter(|steps| *steps > 0)
                .ok_or(ConfigError::InvalidSteps)?,
            None => DEFAULT_STEPS,
        };

        let seed = match read_env(ENV_SEED)? {
            Some(value) => value.parse::<u64>().map_err(|_| ConfigError::InvalidSeed)?,
            None => DEFAULT_SEED,
        };

        let history_output_path = match read_env(ENV_HISTORY_OUTPUT)? {
            Some(value) => {
                if value.trim().is_empty() {
                    return Err(ConfigError::InvalidHistoryOutputPath);
                }
                value
            }
            None => DEFAULT_HISTORY_OUTPUT_PATH.to_owned(),
        };

        Ok(Self {
            initial_cash,
            strategy,
            price_source,
            steps,
            seed,
            history_output_path,
        })
    }
}

fn read_env(key: &'static str) -> Result<Option<String>, ConfigError> {
    match env::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::NonUnicode { key }),
    }
}
