//! Pipeline inputs and outputs that are plain data.

use sr_core::GeoPoint;
use sr_route::WaypointStop;

/// Discrete weather forecast samples.
///
/// `coords` are the forecast locations in route order; `timestamps` are the
/// (irregular, possibly unsorted) Unix times the forecasts are valid for.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WeatherSamples {
    pub coords:     Vec<GeoPoint>,
    pub timestamps: Vec<f64>,
}

impl WeatherSamples {
    pub fn new(coords: Vec<GeoPoint>, timestamps: Vec<f64>) -> Self {
        Self { coords, timestamps }
    }
}

/// Everything the pipeline learned about each tick.
///
/// Every `Vec` has one entry per tick.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TickAlignment {
    /// Unix time of each tick (UTC).
    pub timestamps:           Vec<i64>,
    /// Unix time shifted into the time zone the car is in.
    pub local_timestamps:     Vec<i64>,
    /// Ordinal day of the local timestamp, `1..=366`.
    pub day_of_year:          Vec<u32>,
    /// Hour of the local day, `[0, 24)`.
    pub local_time:           Vec<f64>,
    /// Achieved distance per tick in metres.
    pub distances_m:          Vec<f64>,
    /// Achieved speed per tick in km/h.
    pub speed_kmh:            Vec<f64>,
    /// Running total of `distances_m`.
    pub cumulative_m:         Vec<f64>,
    /// Path index reached by the integrator.
    pub path_indices:         Vec<usize>,
    /// Nearest route coordinate by cumulative distance.
    pub route_indices:        Vec<usize>,
    /// Nearest weather location by cumulative distance.
    pub weather_indices:      Vec<usize>,
    /// Closest weather sample in time.
    pub weather_time_indices: Vec<usize>,
    pub stops:                Vec<WaypointStop>,
    /// Tick on which the route ran out, if it did.
    pub exhausted_at:         Option<usize>,
}

impl TickAlignment {
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// `true` if the car reached the end of the route within the profile.
    pub fn finished_route(&self) -> bool {
        self.exhausted_at.is_some()
    }
}
