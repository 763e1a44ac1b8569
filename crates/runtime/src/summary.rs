use core_sim::SimulationState;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub steps: usize,
    pub initial_cash: f64,
    pub final_cash: f64,
    pub final_position: f64,
    pub final_price: f64,
    pub final_value: f64,
    pub pnl: f64,
    /// `None` when the run started with no cash.
    pub return_pct: Option<f64>,
}

impl RunSummary {
    pub fn from_state(state: &SimulationState) -> Self {
        let initial_cash = state.initial_cash();
        let final_value = state.portfolio_value();
        let pnl = final_value - initial_cash;
        let return_pct = (initial_cash != 0.0).then(|| pnl * 100.0 / initial_cash.abs());
        let final_price = state
            .history()
            .last()
            .map_or(state.current_price(), |record| record.price);

        Self {
            steps: state.step_index(),
            initial_cash,
            final_cash: state.cash(),
            final_position: state.position(),
            final_price,
            final_value,
            pnl,
            return_pct,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
