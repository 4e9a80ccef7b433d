//! Simulation observer trait for progress reporting and data collection.

use sr_core::SimConfig;
use sr_route::WaypointStop;

use crate::TickAlignment;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] as the pipeline
/// progresses.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: stop logger
///
/// ```rust,ignore
/// struct StopLogger;
///
/// impl SimObserver for StopLogger {
///     fn on_waypoint(&mut self, stop: &WaypointStop) {
///         println!("waypoint {} reached at tick {}", stop.waypoint, stop.tick);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called once the speed profile has been accepted, before any work.
    fn on_run_start(&mut self, _config: &SimConfig) {}

    /// Called for every waypoint stop, in the order they happened.
    fn on_waypoint(&mut self, _stop: &WaypointStop) {}

    /// Called with the fully assembled per-tick arrays.
    fn on_alignment(&mut self, _alignment: &TickAlignment) {}

    /// Called last, with the number of ticks processed.
    fn on_run_end(&mut self, _ticks: usize) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
