//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use log::debug;

use vh_core::{SimConfig, Tick};
use vh_sim::{SimObserver, TickReport};

use crate::row::{station_rows, vehicle_rows, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes tick summaries every tick, and station
/// loads plus vehicle distances every `output_interval_ticks`, to any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `model.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    interval:   u64,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`, taking the snapshot interval
    /// from `config`.
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self {
            writer,
            interval:   config.output_interval_ticks,
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `model.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Flush the writer.  Needed after `run_ticks`, which does not end the
    /// run; `run` flushes through `on_sim_end`.
    pub fn finish(&mut self) -> OutputResult<()> {
        self.writer.finish()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn snapshot_due(&self, tick: Tick) -> bool {
        self.interval > 0 && tick.0.is_multiple_of(self.interval)
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, report: &TickReport) {
        let result = self.writer.write_tick_summary(&TickSummaryRow::from(report));
        self.store_err(result);

        if self.snapshot_due(report.tick) {
            let result = self.writer.write_station_loads(&station_rows(report));
            self.store_err(result);
            let rows = vehicle_rows(report);
            if !rows.is_empty() {
                let result = self.writer.write_vehicle_distances(&rows);
                self.store_err(result);
            }
        }
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        debug!("flushing output at {final_tick}");
        let result = self.writer.finish();
        self.store_err(result);
    }
}
