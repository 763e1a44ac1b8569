use thiserror::Error;

/// Construction-time failures. Nothing is built when one of these is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("price table has no `{column}` column")]
    MissingCloseColumn { column: String },

    #[error("price series must contain at least one row")]
    EmptySeries,

    #[error("column `{column}` has {actual} rows, expected {expected}")]
    ColumnLengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("close price at row {index} is not finite")]
    NonFinitePrice { index: usize },

    #[error("initial cash must be finite")]
    InvalidInitialCash,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("action {action} at step {step} is not a finite quantity")]
    InvalidAction { step: usize, action: f64 },

    #[error("step {step} is past the end of a {len}-row price series")]
    OutOfRange { step: usize, len: usize },
}
