pub mod engine;
pub mod error;
pub mod logging;
pub mod replay;
pub mod summary;

pub use engine::{run, run_with_log, Backtest};
pub use error::RunError;
pub use summary::RunSummary;
