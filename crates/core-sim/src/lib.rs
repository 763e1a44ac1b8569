mod config;
mod error;
mod generators;
mod history;
mod series;
mod state;

pub use config::{SimConfig, DEFAULT_INITIAL_CASH};
pub use error::{ConfigError, SimError};
pub use generators::PriceGenerator;
pub use history::{History, StepRecord, HISTORY_COLUMNS};
pub use series::{PriceSeries, PriceTable, DEFAULT_CLOSE_COLUMN};
pub use state::SimulationState;
