//! The `OutputWriter` trait implemented by telemetry backends.

use crate::{OutputResult, TelemetryRow, TickSummaryRow};

/// A telemetry backend.
///
/// Errors are returned to the observer, which keeps the first one for
/// [`TelemetryObserver::take_error`][crate::TelemetryObserver::take_error].
pub trait OutputWriter {
    /// Write one snapshot's worth of agent rows.
    fn write_telemetry(&mut self, rows: &[TelemetryRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
