use std::io::{self, Write};

use core_sim::{History, StepRecord};

use crate::logging::{RunLogEvent, RunLogEventKind, RunLogWriter};

pub const HISTORY_CSV_HEADER: &str = "step,price,cash,position,value\n";

pub struct HistoryCsvWriter<W: Write> {
    writer: W,
}

impl<W: Write> HistoryCsvWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_header(&mut self) -> io::Result<()> {
        self.writer.write_all(HISTORY_CSV_HEADER.as_bytes())
    }

    pub fn append_rows(&mut self, rows: &[StepRecord]) -> io::Result<()> {
        for row in rows {
            writeln!(
                self.writer,
                "{},{},{},{},{}",
                row.step, row.price, row.cash, row.position, row.value
            )?;
        }
        Ok(())
    }

    pub fn write_history(&mut self, history: &History) -> io::Result<()> {
        self.write_header()?;
        self.append_rows(history.rows())
    }

    /// Writes and flushes the whole history, then reports it to the run log.
    pub fn write_history_and_log(
        &mut self,
        history: &History,
        run_log_writer: &mut dyn RunLogWriter,
    ) -> io::Result<()> {
        self.write_history(history)?;
        self.writer.flush()?;
        run_log_writer.write(RunLogEvent::new(
            history.len(),
            RunLogEventKind::HistoryWritten,
        ));
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, io, rc::Rc};

    use core_sim::{History, PriceSeries, SimulationState};

    use crate::logging::{InMemoryRunLogWriter, RunLogEvent, RunLogEventKind, RunLogWriter};

    use super::{HistoryCsvWriter, HISTORY_CSV_HEADER};

    struct TrackingWriter {
        bytes: Vec<u8>,
        flush_called: Rc<Cell<bool>>,
        flush_fails: bool,
    }

    impl TrackingWriter {
        fn new(flush_called: Rc<Cell<bool>>, flush_fails: bool) -> Self {
            Self {
                bytes: Vec::new(),
                flush_called,
                flush_fails,
            }
        }
    }

    impl io::Write for TrackingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.bytes.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            self.flush_called.set(true);
            if self.flush_fails {
                return Err(io::Error::other("flush failed"));
            }
            Ok(())
        }
    }

    struct FlushAssertingLogWriter {
        flush_called: Rc<Cell<bool>>,
    }

    impl RunLogWriter for FlushAssertingLogWriter {
        fn write(&mut self, _event: RunLogEvent) {
            assert!(
                self.flush_called.get(),
                "expected writer flush before logging"
            );
        }
    }

    fn two_step_history() -> History {
        let prices = PriceSeries::from_closes(vec![10.0, 12.5]).unwrap();
        let mut state = SimulationState::from_series(prices, 100.0).unwrap();
        state.step(2.0).unwrap();
        state.step(-1.0).unwrap();
        state.history_snapshot()
    }

    #[test]
    fn writes_header_and_one_line_per_step() {
        let mut writer = HistoryCsvWriter::new(Vec::new());

        writer.write_history(&two_step_history()).unwrap();

        let csv = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(
            csv,
            format!("{HISTORY_CSV_HEADER}0,10,80,2,100\n1,12.5,92.5,1,105\n")
        );
    }

    #[test]
    fn empty_history_writes_only_the_header() {
        let mut writer = HistoryCsvWriter::new(Vec::new());

        writer.write_history(&History::default()).unwrap();

        assert_eq!(
            String::from_utf8(writer.into_inner()).unwrap(),
            HISTORY_CSV_HEADER
        );
    }

    #[test]
    fn write_history_and_log_flushes_before_emitting_log() {
        let flush_called = Rc::new(Cell::new(false));
        let writer = TrackingWriter::new(Rc::clone(&flush_called), false);
        let mut csv_writer = HistoryCsvWriter::new(writer);
        let mut log_writer = FlushAssertingLogWriter { flush_called };

        csv_writer
            .write_history_and_log(&two_step_history(), &mut log_writer)
            .expect("history write should flush and log");
    }

    #[test]
    fn write_history_and_log_propagates_flush_errors() {
        let flush_called = Rc::new(Cell::new(false));
        let writer = TrackingWriter::new(Rc::clone(&flush_called), true);
        let mut csv_writer = HistoryCsvWriter::new(writer);
        let mut log_writer = InMemoryRunLogWriter::new();

        let err = csv_writer
            .write_history_and_log(&two_step_history(), &mut log_writer)
            .expect_err("flush failure should be returned");

        assert_eq!(err.kind(), io::ErrorKind::Other);
        assert!(log_writer.events().is_empty());
        assert!(!csv_writer.into_inner().bytes.is_empty());
    }

    #[test]
    fn write_history_and_log_reports_row_count() {
        let mut csv_writer = HistoryCsvWriter::new(Vec::new());
        let mut log_writer = InMemoryRunLogWriter::new();

        csv_writer
            .write_history_and_log(&two_step_history(), &mut log_writer)
            .unwrap();

        assert_eq!(log_writer.events().len(), 1);
        assert_eq!(log_writer.events()[0].step, 2);
        assert_eq!(
            log_writer.events()[0].kind,
            RunLogEventKind::HistoryWritten
        );
    }
}
