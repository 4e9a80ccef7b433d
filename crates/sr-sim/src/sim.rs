//! The `Sim` struct and its alignment pipeline.

use sr_align::{AlignResult, ClampOrder, local_timestamps, nearest_indices, project_all, walk_indices};
use sr_core::{SimClock, SimConfig};
use sr_route::{Integration, Route, WaypointPathIntegrator};
use tracing::{debug, info};

use crate::{SimError, SimObserver, SimResult, TickAlignment, WeatherSamples};

/// Kilometres per hour in one metre per second.
const KMH_PER_MPS: f64 = 3.6;

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The alignment pipeline runner.
///
/// A `Sim` holds one route, one weather set and one configuration, and maps
/// any number of candidate speed profiles onto them:
///
/// 1. **Distances**: km/h per tick becomes commanded metres per tick.
/// 2. **Integration**: [`WaypointPathIntegrator`] turns commanded into
///    achieved distances, inserting the waypoint holds.
/// 3. **Walks** (route and weather joined with the `parallel` feature):
///    cumulative distance becomes a route-coordinate and a weather-location
///    index per tick.
/// 4. **Clock**: the route coordinate's UTC offset gives the local
///    timestamp, which is projected onto the calendar and matched to the
///    nearest weather sample time.
///
/// `run` takes `&self`; runs share nothing and may execute concurrently.
///
/// Create via [`SimBuilder`][crate::SimBuilder].  The inputs are validated
/// once there and are read-only afterwards.
pub struct Sim {
    /// Global configuration (start time, tick duration, tick count, …).
    pub(crate) config: SimConfig,

    /// Maps tick counts onto Unix time.
    pub(crate) clock: SimClock,

    pub(crate) route: Route,

    pub(crate) weather: WeatherSamples,

    /// Midpoints between consecutive route coordinates, by distance.
    pub(crate) route_bounds: Vec<f64>,

    /// Midpoints between consecutive weather locations.  Empty when the race
    /// does not localise weather.
    pub(crate) weather_bounds: Vec<f64>,

    pub(crate) hold_ticks: usize,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Align one speed profile (km/h, one entry per tick).
    ///
    /// Calls observer hooks as stages complete.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    ///
    /// # Errors
    ///
    /// - [`SimError::LengthMismatch`] if the profile length differs from
    ///   `config.total_ticks`.
    /// - [`SimError::Config`] for a negative or non-finite speed.
    ///
    /// Both are reported before any computation.
    pub fn run<O: SimObserver>(&self, speed_kmh: &[f64], observer: &mut O) -> SimResult<TickAlignment> {
        let n_ticks = self.config.total_ticks as usize;
        if speed_kmh.len() != n_ticks {
            return Err(SimError::LengthMismatch {
                expected: n_ticks,
                got:      speed_kmh.len(),
                what:     "speed profile",
            });
        }
        if let Some((tick, v)) = speed_kmh.iter().enumerate().find(|(_, v)| !v.is_finite() || **v < 0.0) {
            return Err(SimError::Config(format!("speed at tick {tick} must be finite and non-negative, got {v}")));
        }

        info!(ticks = n_ticks, race = %self.config.race, "alignment run started");
        observer.on_run_start(&self.config);

        let timestamps = self.clock.timestamps(n_ticks as u64);
        let elapsed    = self.clock.elapsed_series(n_ticks as u64);

        // ── Integration ───────────────────────────────────────────────────
        let commanded  = distances_from_speeds(speed_kmh, self.config.tick_duration_secs);
        let integrator = WaypointPathIntegrator::new(
            &self.route,
            self.config.segment_tolerance_m,
            self.hold_ticks,
        )?;
        let Integration { distances, report } = integrator.integrate(commanded);
        debug!(stops = report.stops.len(), exhausted_at = ?report.exhausted_at, "integrated distances");
        for stop in &report.stops {
            observer.on_waypoint(stop);
        }

        let cumulative = cumulative_sum(&distances);

        // ── Distance walks ────────────────────────────────────────────────
        let (route_indices, weather_indices) = self.walk(&cumulative)?;
        debug!("walked route and weather indices");

        // ── Clock ─────────────────────────────────────────────────────────
        let offsets: Vec<i64> = route_indices.iter().map(|&i| self.route.utc_offset_at(i)).collect();
        let local = local_timestamps(&elapsed, self.config.start_unix_secs, &offsets)?;
        let calendar = project_all(&local)?;
        let local_secs: Vec<f64> = local.iter().map(|&t| t as f64).collect();
        let weather_time_indices = nearest_indices(&local_secs, &self.weather.timestamps)?;
        debug!("matched calendar and weather sample times");

        let alignment = TickAlignment {
            timestamps,
            local_timestamps: local,
            day_of_year:      calendar.day_of_year,
            local_time:       calendar.local_time,
            speed_kmh:        speeds_from_distances(&distances, self.config.tick_duration_secs),
            distances_m:      distances,
            cumulative_m:     cumulative,
            path_indices:     report.path_indices,
            route_indices,
            weather_indices,
            weather_time_indices,
            stops:            report.stops,
            exhausted_at:     report.exhausted_at,
        };

        observer.on_alignment(&alignment);
        observer.on_run_end(n_ticks);
        info!(
            ticks = n_ticks,
            distance_m = alignment.cumulative_m.last().copied().unwrap_or(0.0),
            stops = alignment.stops.len(),
            finished_route = alignment.finished_route(),
            "alignment run finished"
        );
        Ok(alignment)
    }

    /// Ticks each waypoint stop lasts.
    pub fn hold_ticks(&self) -> usize {
        self.hold_ticks
    }

    /// The validated run configuration, builder overrides applied.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn weather(&self) -> &WeatherSamples {
        &self.weather
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Route and weather walks over the same cumulative distances.  The two
    /// cursors are independent, so with the `parallel` feature they run as a
    /// `rayon::join` pair.
    fn walk(&self, cumulative: &[f64]) -> SimResult<(Vec<usize>, Vec<usize>)> {
        #[cfg(feature = "parallel")]
        let (route_indices, weather_indices) = self.walk_parallel(cumulative);

        #[cfg(not(feature = "parallel"))]
        let (route_indices, weather_indices) = self.walk_sequential(cumulative);

        Ok((route_indices?, weather_indices?))
    }

    #[cfg_attr(feature = "parallel", allow(dead_code))]
    pub(crate) fn walk_sequential(&self, cumulative: &[f64]) -> (AlignResult<Vec<usize>>, AlignResult<Vec<usize>>) {
        (self.walk_route(cumulative), self.walk_weather(cumulative))
    }

    #[cfg(feature = "parallel")]
    pub(crate) fn walk_parallel(&self, cumulative: &[f64]) -> (AlignResult<Vec<usize>>, AlignResult<Vec<usize>>) {
        rayon::join(|| self.walk_route(cumulative), || self.walk_weather(cumulative))
    }

    fn walk_route(&self, cumulative: &[f64]) -> AlignResult<Vec<usize>> {
        walk_indices(cumulative, &self.route_bounds, ClampOrder::AfterAdvance)
    }

    fn walk_weather(&self, cumulative: &[f64]) -> AlignResult<Vec<usize>> {
        if self.config.race.localises_weather() {
            walk_indices(cumulative, &self.weather_bounds, ClampOrder::BeforeCheck)
        } else {
            Ok(vec![0; cumulative.len()])
        }
    }
}

// ── Unit conversion ───────────────────────────────────────────────────────────

/// Commanded metres per tick from a km/h profile.
///
/// Tick 0 marks the start instant and has no elapsed time, so it always
/// covers zero distance.
pub fn distances_from_speeds(speed_kmh: &[f64], tick_duration_secs: u32) -> Vec<f64> {
    let dt = tick_duration_secs as f64;
    speed_kmh
        .iter()
        .enumerate()
        .map(|(tick, &v)| if tick == 0 { 0.0 } else { v / KMH_PER_MPS * dt })
        .collect()
}

/// Inverse of [`distances_from_speeds`]: km/h from metres per tick.
pub fn speeds_from_distances(distances_m: &[f64], tick_duration_secs: u32) -> Vec<f64> {
    let dt = tick_duration_secs as f64;
    distances_m
        .iter()
        .enumerate()
        .map(|(tick, &d)| if tick == 0 { 0.0 } else { d / dt * KMH_PER_MPS })
        .collect()
}

fn cumulative_sum(values: &[f64]) -> Vec<f64> {
    let mut total = 0.0;
    values
        .iter()
        .map(|&v| {
            total += v;
            total
        })
        .collect()
}
