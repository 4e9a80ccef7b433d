//! Simulation time model.
//!
//! # Design
//!
//! Time is represented as a monotonically increasing `Tick` counter.  The
//! mapping to wall-clock time is held in `SimClock`:
//!
//!   wall_time = start_unix_secs + tick * tick_duration_secs
//!
//! Using an integer tick as the canonical time unit keeps the per-tick
//! timestamp array exact (no floating-point drift over a multi-day race).
//!
//! Race simulations normally run at 1 tick = 1 second; coarser resolutions
//! are supported and every tick-denominated constant (such as the waypoint
//! hold) is derived from `tick_duration_secs`.

use crate::{RaceType, SrError, SrResult};

/// Default mandatory stop at a checkpoint: 45 minutes.
pub const DEFAULT_WAYPOINT_HOLD_SECS: u64 = 45 * 60;

/// Default slack (metres) when deciding whether a tick reaches the end of a
/// path segment.  Absorbs accumulated floating-point error.
pub const DEFAULT_SEGMENT_TOLERANCE_M: f64 = 0.05;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts between tick counts and Unix wall-clock seconds.
///
/// Arithmetic saturates at the `i64` limits.  [`SimConfig::validate`]
/// rejects runs whose last tick would get there.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Unix timestamp (seconds since epoch) of tick 0.
    pub start_unix_secs: i64,
    /// How many real seconds one tick represents.
    pub tick_duration_secs: u32,
}

impl SimClock {
    /// Create a clock starting at `start_unix_secs` with the given resolution.
    pub fn new(start_unix_secs: i64, tick_duration_secs: u32) -> Self {
        Self { start_unix_secs, tick_duration_secs }
    }

    /// Elapsed simulated seconds at `tick`.
    #[inline]
    pub fn elapsed_secs_at(&self, tick: Tick) -> i64 {
        i64::try_from(tick.0)
            .unwrap_or(i64::MAX)
            .saturating_mul(self.tick_duration_secs as i64)
    }

    /// Unix timestamp of `tick`.
    #[inline]
    pub fn unix_secs_at(&self, tick: Tick) -> i64 {
        self.start_unix_secs.saturating_add(self.elapsed_secs_at(tick))
    }

    /// Elapsed seconds for ticks `0..n`: `[0, dt, 2·dt, …]`.
    pub fn elapsed_series(&self, n: u64) -> Vec<i64> {
        (0..n).map(|t| self.elapsed_secs_at(Tick(t))).collect()
    }

    /// Unix timestamps for ticks `0..n`.
    pub fn timestamps(&self, n: u64) -> Vec<i64> {
        (0..n).map(|t| self.unix_secs_at(Tick(t))).collect()
    }

    /// How many ticks span `secs` seconds? Rounds up.
    #[inline]
    pub fn ticks_for_secs(&self, secs: u64) -> u64 {
        secs.div_ceil(self.tick_duration_secs as u64)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration.
///
/// Typically loaded from a JSON file by the application crate and passed to
/// the simulation pipeline.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Unix timestamp of tick 0 (race-day start, UTC).
    pub start_unix_secs: i64,

    /// Seconds per tick.  Default: 1.
    pub tick_duration_secs: u32,

    /// Total ticks to simulate.  One race day at 1 tick/s: 9 * 3600.
    pub total_ticks: u64,

    /// Worker thread count passed to Rayon.  `None` uses all logical cores.
    pub num_threads: Option<usize>,

    /// Road route or closed track.
    pub race: RaceType,

    /// Length of the mandatory stop at each waypoint, in seconds.
    pub waypoint_hold_secs: u64,

    /// Segment-boundary slack in metres (see [`DEFAULT_SEGMENT_TOLERANCE_M`]).
    pub segment_tolerance_m: f64,
}

impl SimConfig {
    /// A config with the default hold, tolerance, and race type.
    pub fn new(start_unix_secs: i64, tick_duration_secs: u32, total_ticks: u64) -> Self {
        Self {
            start_unix_secs,
            tick_duration_secs,
            total_ticks,
            ..Self::default()
        }
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.start_unix_secs, self.tick_duration_secs)
    }

    /// Waypoint hold expressed in ticks (2700 at 1 tick/s).
    pub fn hold_ticks(&self) -> u64 {
        self.make_clock().ticks_for_secs(self.waypoint_hold_secs)
    }

    /// Reject configurations the pipeline cannot run.
    pub fn validate(&self) -> SrResult<()> {
        if self.tick_duration_secs == 0 {
            return Err(SrError::Config("tick_duration_secs must be positive".into()));
        }
        if self.total_ticks == 0 {
            return Err(SrError::Config("total_ticks must be positive".into()));
        }
        if !self.segment_tolerance_m.is_finite() || self.segment_tolerance_m < 0.0 {
            return Err(SrError::Config(format!(
                "segment_tolerance_m must be finite and non-negative, got {}",
                self.segment_tolerance_m
            )));
        }
        if self.num_threads == Some(0) {
            return Err(SrError::Config("num_threads must be positive when set".into()));
        }
        if self.last_unix_secs().is_none() {
            return Err(SrError::Config(format!(
                "{} ticks of {} s from {} overflow the Unix timestamp range",
                self.total_ticks, self.tick_duration_secs, self.start_unix_secs
            )));
        }
        Ok(())
    }

    /// Unix timestamp of the final tick, or `None` if it does not fit in
    /// an `i64`.
    pub fn last_unix_secs(&self) -> Option<i64> {
        let last = self.total_ticks.saturating_sub(1);
        let span = last.checked_mul(self.tick_duration_secs as u64)?;
        self.start_unix_secs.checked_add(i64::try_from(span).ok()?)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            start_unix_secs:     0,
            tick_duration_secs:  1,
            total_ticks:         9 * 3_600,
            num_threads:         None,
            race:                RaceType::Asc,
            waypoint_hold_secs:  DEFAULT_WAYPOINT_HOLD_SECS,
            segment_tolerance_m: DEFAULT_SEGMENT_TOLERANCE_M,
        }
    }
}
