use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StrategyError {
    #[error("strategy rejected step: {0}")]
    Rejected(String),

    #[error("divergence threshold must be finite and non-negative")]
    InvalidThreshold,

    #[error("lookback window must be at least one step")]
    InvalidWindow,

    #[error("base order size must be finite and positive")]
    InvalidBaseOrderSize,
}
