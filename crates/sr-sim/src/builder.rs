//! Fluent builder for constructing a [`Sim`].

use sr_align::{AlignError, midpoint_boundaries, project};
use sr_core::{SimConfig, path_distances};
use sr_route::{Route, validate_path};
use tracing::debug;

use crate::{Sim, SimError, SimResult, WeatherSamples};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`]: start time, tick duration, tick count, race type, hold.
/// - [`Route`]: from [`sr_route::RouteBuilder`] or [`Route::from_segments`].
/// - [`WeatherSamples`]: forecast locations and sample times.
///
/// # Optional inputs (have defaults)
///
/// | Method              | Default                                 |
/// |---------------------|-----------------------------------------|
/// | `.hold_secs(s)`     | `config.waypoint_hold_secs` (2700)      |
/// | `.tolerance_m(m)`   | `config.segment_tolerance_m` (0.05)     |
///
/// # Example
///
/// ```rust,ignore
/// let sim = SimBuilder::new(config, route, weather)
///     .hold_secs(30 * 60)
///     .build()?;
/// let alignment = sim.run(&speeds_kmh, &mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config:  SimConfig,
    route:   Route,
    weather: WeatherSamples,
}

impl SimBuilder {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, route: Route, weather: WeatherSamples) -> Self {
        Self { config, route, weather }
    }

    /// Override the mandatory stop length at each waypoint.
    pub fn hold_secs(mut self, secs: u64) -> Self {
        self.config.waypoint_hold_secs = secs;
        self
    }

    /// Override the segment-boundary slack.
    pub fn tolerance_m(mut self, metres: f64) -> Self {
        self.config.segment_tolerance_m = metres;
        self
    }

    /// Validate inputs, precompute the distance boundaries, and return a
    /// ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;
        // Both ends of the run must fall on a calendar date.
        project(self.config.start_unix_secs)?;
        if let Some(last) = self.config.last_unix_secs() {
            project(last)?;
        }

        // ── Route ─────────────────────────────────────────────────────────
        validate_path(&self.route.segment_lengths_m, &self.route.waypoints)?;
        if self.route.utc_offsets_secs.len() != self.route.len() {
            return Err(SimError::LengthMismatch {
                expected: self.route.len(),
                got:      self.route.utc_offsets_secs.len(),
                what:     "route UTC offsets",
            });
        }
        let route_bounds = midpoint_boundaries(&self.route.segment_lengths_m);
        if route_bounds.is_empty() {
            return Err(SimError::Config("route needs at least two coordinates".into()));
        }

        // ── Weather ───────────────────────────────────────────────────────
        if self.weather.timestamps.is_empty() {
            return Err(AlignError::EmptyReference("weather timestamps").into());
        }
        let weather_bounds = if self.config.race.localises_weather() {
            let bounds = midpoint_boundaries(&path_distances(&self.weather.coords));
            if bounds.is_empty() {
                return Err(SimError::Config(format!(
                    "{} weather needs at least two sample locations, got {}",
                    self.config.race,
                    self.weather.coords.len()
                )));
            }
            bounds
        } else {
            Vec::new()
        };

        let hold_ticks = self.config.hold_ticks() as usize;
        debug!(
            coords = self.route.len(),
            waypoints = self.route.waypoints.len(),
            weather_locations = self.weather.coords.len(),
            hold_ticks,
            "simulation built"
        );

        Ok(Sim {
            clock:   self.config.make_clock(),
            config:  self.config,
            route:   self.route,
            weather: self.weather,
            route_bounds,
            weather_bounds,
            hold_ticks,
        })
    }
}
