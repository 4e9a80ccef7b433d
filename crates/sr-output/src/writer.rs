//! The `OutputWriter` trait implemented by backend writers.

use crate::{OutputResult, TickAlignmentRow, WaypointStopRow};

/// Trait implemented by output backends.
///
/// Errors are stored by the observer and retrieved with
/// [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write a batch of per-tick rows.
    fn write_ticks(&mut self, rows: &[TickAlignmentRow]) -> OutputResult<()>;

    /// Write one waypoint stop row.
    fn write_stop(&mut self, row: &WaypointStopRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
