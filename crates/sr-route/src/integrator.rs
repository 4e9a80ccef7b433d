//! Waypoint-aware integration of a per-tick distance profile along a route.
//!
//! # Model
//!
//! The car advances along the polyline one tick at a time.  Each tick asks
//! for some distance `want`; the integrator walks segment boundaries until
//! the remaining `want` no longer reaches the next coordinate, keeping the
//! leftover as `carried` distance inside the current segment.
//!
//! Waypoint arrival is checked at every boundary crossing, because one tick
//! can cross several short segments.  On arrival the tick's distance is cut
//! down to what was covered before the stop and the following
//! `hold_ticks` ticks are forced to zero.
//!
//! # State
//!
//! ```text
//! path_index   current coordinate (starts 0)
//! carried      distance covered inside segment path_index+1 (starts 0)
//! waypoint     cursor into the immutable waypoint slice
//! ```
//!
//! The pass is strictly sequential: later ticks depend on `carried`,
//! `path_index`, and any hold written ahead of the cursor.

use tracing::{debug, info};

use crate::{Route, RouteError, RouteResult, validate_path};

/// One mandatory stop reached during a pass.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaypointStop {
    /// Path index of the waypoint.
    pub waypoint:    usize,
    /// Tick on which the car arrived.
    pub tick:        usize,
    /// Distance covered on the arrival tick before stopping.
    pub achieved_m:  f64,
    /// First tick after the hold (may equal the profile length).
    pub resume_tick: usize,
}

/// Everything a pass learned besides the corrected distances.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IntegrationReport {
    /// Path index reached by the end of each tick, clamped to `[0, len-1]`.
    pub path_indices: Vec<usize>,
    /// Stops in the order they happened.
    pub stops:        Vec<WaypointStop>,
    /// Tick on which the route ran out, if it did.  That tick and every
    /// later one keep their commanded distance.
    pub exhausted_at: Option<usize>,
}

/// The outcome of [`WaypointPathIntegrator::integrate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Integration {
    /// Achieved distance per tick.
    pub distances: Vec<f64>,
    pub report:    IntegrationReport,
}

/// Converts commanded per-tick distances into achieved distances.
///
/// Holds only borrowed, pre-validated route data; a single integrator can
/// run any number of independent passes.
#[derive(Debug, Clone)]
pub struct WaypointPathIntegrator<'a> {
    segment_lengths_m: &'a [f64],
    waypoints:         &'a [usize],
    tolerance_m:       f64,
    hold_ticks:        usize,
}

impl<'a> WaypointPathIntegrator<'a> {
    /// Integrator over a validated [`Route`].
    pub fn new(route: &'a Route, tolerance_m: f64, hold_ticks: usize) -> RouteResult<Self> {
        Self::from_parts(&route.segment_lengths_m, &route.waypoints, tolerance_m, hold_ticks)
    }

    /// Integrator over raw segment lengths and waypoint indices.
    ///
    /// # Errors
    ///
    /// Any [`validate_path`] failure, or [`RouteError::InvalidTolerance`].
    pub fn from_parts(
        segment_lengths_m: &'a [f64],
        waypoints:         &'a [usize],
        tolerance_m:       f64,
        hold_ticks:        usize,
    ) -> RouteResult<Self> {
        validate_path(segment_lengths_m, waypoints)?;
        if !tolerance_m.is_finite() || tolerance_m < 0.0 {
            return Err(RouteError::InvalidTolerance(tolerance_m));
        }
        Ok(Self { segment_lengths_m, waypoints, tolerance_m, hold_ticks })
    }

    pub fn hold_ticks(&self) -> usize {
        self.hold_ticks
    }

    /// Run one pass over `distances` (commanded metres per tick).
    ///
    /// Takes ownership of the vector for the whole pass, since the hold
    /// writes ahead of the tick cursor, and hands it back corrected.
    pub fn integrate(&self, mut distances: Vec<f64>) -> Integration {
        let n_ticks      = distances.len();
        let last_index   = self.segment_lengths_m.len() - 1;
        let segments     = self.segment_lengths_m;

        let mut path_indices = vec![0usize; n_ticks];
        let mut stops        = Vec::new();
        let mut exhausted_at = None;

        let mut path_index    = 0usize;
        let mut carried       = 0.0f64;
        let mut next_waypoint = 0usize;
        let mut i             = 0usize;

        'ticks: while i < n_ticks {
            let tick = i;
            let mut want = distances[tick];
            let mut achieved = 0.0f64;

            // ── Cross every segment boundary this tick reaches ─────────────
            while want + carried > segments[path_index] - self.tolerance_m {
                let segment = segments[path_index];
                want = want + carried - segment;
                achieved += segment - carried;
                carried = 0.0;
                path_index += 1;

                if path_index > last_index {
                    path_indices[tick..].fill(last_index);
                    exhausted_at = Some(tick);
                    info!(tick, "route exhausted before end of speed profile");
                    break 'ticks;
                }

                // Only the next pending waypoint is compared.
                if self.waypoints.get(next_waypoint) == Some(&path_index) {
                    next_waypoint += 1;

                    let hold_end = (tick + 1).saturating_add(self.hold_ticks).min(n_ticks);
                    distances[tick] = achieved;
                    distances[tick + 1..hold_end].fill(0.0);
                    path_indices[tick..hold_end].fill(path_index);

                    let stop = WaypointStop {
                        waypoint:    path_index,
                        tick,
                        achieved_m:  achieved,
                        resume_tick: hold_end,
                    };
                    debug!(
                        waypoint = stop.waypoint,
                        tick,
                        achieved_m = stop.achieved_m,
                        resume_tick = stop.resume_tick,
                        "reached waypoint"
                    );
                    stops.push(stop);

                    // The last held tick is the next one processed.
                    i = tick.saturating_add(self.hold_ticks.max(1) - 1);
                    want = 0.0;
                    break;
                }
            }

            // ── Remaining distance stays inside the current segment ────────
            if want + carried < segments[path_index] - self.tolerance_m {
                carried += want;
            }

            path_indices[tick] = path_index;
            i += 1;
        }

        Integration {
            distances,
            report: IntegrationReport { path_indices, stops, exhausted_at },
        }
    }
}
