use core_sim::{ConfigError, History, PriceTable, SimConfig, SimulationState};
use strategy::Strategy;

use crate::error::RunError;
use crate::logging::{RunLogEvent, RunLogEventKind, RunLogWriter, TracingRunLogWriter};
use crate::summary::RunSummary;

/// Resets `state` and feeds it one strategy action per row until the series
/// is exhausted.
pub fn run<S>(state: &mut SimulationState, strategy: &mut S) -> Result<History, RunError>
where
    S: Strategy + ?Sized,
{
    run_with_log(state, strategy, &mut TracingRunLogWriter)
}

/// Same as [`run`], reporting progress to `log`.
///
/// On error the state is left at the last successfully applied step.
pub fn run_with_log<S>(
    state: &mut SimulationState,
    strategy: &mut S,
    log: &mut dyn RunLogWriter,
) -> Result<History, RunError>
where
    S: Strategy + ?Sized,
{
    state.reset();
    log.write(
        RunLogEvent::new(state.step_index(), RunLogEventKind::RunStarted)
            .with_value(state.portfolio_value()),
    );

    if let Err(error) = drive(state, strategy, log) {
        log.write(
            RunLogEvent::new(state.step_index(), RunLogEventKind::RunAborted)
                .with_value(state.portfolio_value()),
        );
        return Err(error);
    }

    log.write(
        RunLogEvent::new(state.step_index(), RunLogEventKind::RunCompleted)
            .with_value(state.portfolio_value()),
    );
    Ok(state.history_snapshot())
}

fn drive<S>(
    state: &mut SimulationState,
    strategy: &mut S,
    log: &mut dyn RunLogWriter,
) -> Result<(), RunError>
where
    S: Strategy + ?Sized,
{
    while state.step_index() < state.len() {
        let step = state.step_index();
        let action = strategy
            .action(state)
            .map_err(|source| RunError::Strategy { step, source })?;
        log.write(RunLogEvent::new(step, RunLogEventKind::ActionDecided).with_action(action));

        state.step(action)?;
        log.write(
            RunLogEvent::new(step, RunLogEventKind::StepApplied)
                .with_action(action)
                .with_value(state.portfolio_value()),
        );
    }

    Ok(())
}

/// A simulation owned by one backtest at a time.
#[derive(Debug, Clone)]
pub struct Backtest {
    state: SimulationState,
}

impl Backtest {
    pub fn new(state: SimulationState) -> Self {
        Self { state }
    }

    pub fn from_table(table: &PriceTable, config: &SimConfig) -> Result<Self, ConfigError> {
        config.build(table).map(Self::new)
    }

    pub fn run<S>(&mut self, strategy: &mut S) -> Result<History, RunError>
    where
        S: Strategy + ?Sized,
    {
        run(&mut self.state, strategy)
    }

    pub fn run_with_log<S>(
        &mut self,
        strategy: &mut S,
        log: &mut dyn RunLogWriter,
    ) -> Result<History, RunError>
    where
        S: Strategy + ?Sized,
    {
        run_with_log(&mut self.state, strategy, log)
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn portfolio_value(&self) -> f64 {
        self.state.portfolio_value()
    }

    pub fn history_snapshot(&self) -> History {
        self.state.history_snapshot()
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary::from_state(&self.state)
    }

    pub fn into_state(self) -> SimulationState {
        self.state
    }
}
