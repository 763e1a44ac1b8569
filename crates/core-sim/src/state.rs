use crate::error::{ConfigError, SimError};
use crate::history::{History, StepRecord};
use crate::series::{PriceSeries, PriceTable, DEFAULT_CLOSE_COLUMN};

/// Cash, position and step bookkeeping for one single-asset run.
///
/// State only changes through [`SimulationState::step`] and
/// [`SimulationState::reset`], so every recorded row satisfies
/// `value == cash + position * price`.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    prices: PriceSeries,
    initial_cash: f64,
    step_index: usize,
    cash: f64,
    position: f64,
    history: Vec<StepRecord>,
}

impl SimulationState {
    /// Builds a state from the table's `Close` column.
    pub fn new(table: &PriceTable, initial_cash: f64) -> Result<Self, ConfigError> {
        Self::with_close_column(table, DEFAULT_CLOSE_COLUMN, initial_cash)
    }

    pub fn with_close_column(
        table: &PriceTable,
        close_column: &str,
        initial_cash: f64,
    ) -> Result<Self, ConfigError> {
        let prices = PriceSeries::from_table(table, close_column)?;
        Self::from_series(prices, initial_cash)
    }

    pub fn from_series(prices: PriceSeries, initial_cash: f64) -> Result<Self, ConfigError> {
        if !initial_cash.is_finite() {
            return Err(ConfigError::InvalidInitialCash);
        }

        let mut state = Self {
            prices,
            initial_cash,
            step_index: 0,
            cash: initial_cash,
            position: 0.0,
            history: Vec::new(),
        };
        state.reset();
        Ok(state)
    }

    pub fn reset(&mut self) {
        self.step_index = 0;
        self.cash = self.initial_cash;
        self.position = 0.0;
        self.history.clear();
    }

    /// Trades `action` units at the current step's price and advances one step.
    ///
    /// Positive actions buy, negative actions sell. Cash and position are
    /// unbounded in both directions.
    pub fn step(&mut self, action: f64) -> Result<(), SimError> {
        let step = self.step_index;
        let price = self.prices.get(step).ok_or(SimError::OutOfRange {
            step,
            len: self.prices.len(),
        })?;

        if !action.is_finite() {
            return Err(SimError::InvalidAction { step, action });
        }

        if action != 0.0 {
            self.position += action;
            self.cash -= action * price;
        }

        let record = StepRecord::new(step, price, self.cash, self.position);
        tracing::trace!(
            step,
            price,
            action,
            cash = record.cash,
            position = record.position,
            value = record.value,
            "step applied"
        );
        self.history.push(record);
        self.step_index += 1;

        Ok(())
    }

    /// Price at the current step index, clamped to the last row once the
    /// series is exhausted.
    pub fn current_price(&self) -> f64 {
        if self.step_index == 0 {
            return self.prices.first();
        }

        let index = self.step_index.min(self.prices.len() - 1);
        self.prices.as_slice()[index]
    }

    pub fn portfolio_value(&self) -> f64 {
        self.history
            .last()
            .map_or(self.initial_cash, |record| record.value)
    }

    pub fn history_snapshot(&self) -> History {
        History::from(self.history.clone())
    }

    pub fn history(&self) -> &[StepRecord] {
        &self.history
    }

    pub fn prices(&self) -> &PriceSeries {
        &self.prices
    }

    pub fn step_index(&self) -> usize {
        self.step_index
    }

    pub fn cash(&self) -> f64 {
        self.cash
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn initial_cash(&self) -> f64 {
        self.initial_cash
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn remaining_steps(&self) -> usize {
        self.prices.len().saturating_sub(self.step_index)
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining_steps() == 0
    }
}
