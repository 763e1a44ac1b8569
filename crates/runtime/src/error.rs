use core_sim::SimError;
use strategy::StrategyError;
use thiserror::Error;

/// Why a run stopped before the price series was exhausted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RunError {
    #[error("strategy failed at step {step}: {source}")]
    Strategy {
        step: usize,
        #[source]
        source: StrategyError,
    },

    #[error(transparent)]
    Sim(#[from] SimError),
}
