use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunLogEventKind {
    RunStarted,
    ActionDecided,
    StepApplied,
    RunCompleted,
    RunAborted,
    HistoryWritten,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunLogEvent {
    pub step: usize,
    pub kind: RunLogEventKind,
    pub action: Option<f64>,
    pub value: Option<f64>,
}

impl RunLogEvent {
    pub fn new(step: usize, kind: RunLogEventKind) -> Self {
        Self {
            step,
            kind,
            action: None,
            value: None,
        }
    }

    pub fn with_action(mut self, action: f64) -> Self {
        self.action = Some(action);
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }
}

pub trait RunLogWriter {
    fn write(&mut self, event: RunLogEvent);
}

#[derive(Debug, Default)]
pub struct InMemoryRunLogWriter {
    events: Vec<RunLogEvent>,
}

impl InMemoryRunLogWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[RunLogEvent] {
        &self.events
    }

    pub fn kinds(&self) -> Vec<RunLogEventKind> {
        self.events.iter().map(|event| event.kind).collect()
    }
}

impl RunLogWriter for InMemoryRunLogWriter {
    fn write(&mut self, event: RunLogEvent) {
        self.events.push(event);
    }
}

/// Forwards run-log events to `tracing`. Per-step events go out at debug.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingRunLogWriter;

impl RunLogWriter for TracingRunLogWriter {
    fn write(&mut self, event: RunLogEvent) {
        let RunLogEvent {
            step,
            kind,
            action,
            value,
        } = event;

        match kind {
            RunLogEventKind::RunStarted => {
                tracing::info!(step, ?value, "backtest run started");
            }
            RunLogEventKind::ActionDecided => {
                tracing::debug!(step, ?action, "strategy action decided");
            }
            RunLogEventKind::StepApplied => {
                tracing::debug!(step, ?action, ?value, "step applied");
            }
            RunLogEventKind::RunCompleted => {
                tracing::info!(steps = step, ?value, "backtest run completed");
            }
            RunLogEventKind::RunAborted => {
                tracing::warn!(step, ?action, ?value, "backtest run aborted");
            }
            RunLogEventKind::HistoryWritten => {
                tracing::info!(rows = step, "history written");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{InMemoryRunLogWriter, RunLogEvent, RunLogEventKind, RunLogWriter};

    #[test]
    fn in_memory_writer_keeps_events_in_order() {
        let mut writer = InMemoryRunLogWriter::new();

        writer.write(RunLogEvent::new(0, RunLogEventKind::RunStarted));
        writer.write(RunLogEvent::new(0, RunLogEventKind::ActionDecided).with_action(1.0));

        assert_eq!(
            writer.kinds(),
            vec![RunLogEventKind::RunStarted, RunLogEventKind::ActionDecided]
        );
        assert_eq!(writer.events()[1].action, Some(1.0));
    }

    #[test]
    fn run_log_event_serializes_with_snake_case_kind() {
        let event = RunLogEvent::new(4, RunLogEventKind::StepApplied)
            .with_action(-2.0)
            .with_value(98.5);

        assert_eq!(
            serde_json::to_value(event).unwrap(),
            json!({
                "step": 4,
                "kind": "step_applied",
                "action": -2.0,
                "value": 98.5,
            })
        );
    }
}
