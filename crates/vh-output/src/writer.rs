//! The `OutputWriter` trait implemented by output backends.

use crate::{OutputResult, StationLoadRow, TickSummaryRow, VehicleDistanceRow};

/// Trait implemented by output backends.
///
/// All methods are infallible from the observer's perspective: errors are
/// stored internally and retrieved with
/// [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write one tick's station loads.
    fn write_station_loads(&mut self, rows: &[StationLoadRow]) -> OutputResult<()>;

    /// Write one tick's vehicle-to-station distances.
    fn write_vehicle_distances(&mut self, rows: &[VehicleDistanceRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
