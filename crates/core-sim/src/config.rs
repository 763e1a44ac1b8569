use serde::Deserialize;

use crate::error::ConfigError;
use crate::series::{PriceTable, DEFAULT_CLOSE_COLUMN};
use crate::state::SimulationState;

pub const DEFAULT_INITIAL_CASH: f64 = 100_000.0;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub initial_cash: f64,
    pub close_column: String,
}

impl SimConfig {
    pub fn with_initial_cash(initial_cash: f64) -> Self {
        Self {
            initial_cash,
            ..Self::default()
        }
    }

    pub fn build(&self, table: &PriceTable) -> Result<SimulationState, ConfigError> {
        SimulationState::with_close_column(table, &self.close_column, self.initial_cash)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            initial_cash: DEFAULT_INITIAL_CASH,
            close_column: DEFAULT_CLOSE_COLUMN.to_string(),
        }
    }
}
