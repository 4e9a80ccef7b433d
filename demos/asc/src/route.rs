//! Synthetic road route and weather grid.
//!
//! A straight westbound line along 39° N from Independence, MO into eastern
//! Colorado, one coordinate every ~100 m.  The Central/Mountain time-zone
//! line is placed at 101.5° W.

use sr_core::GeoPoint;
use sr_route::{Route, RouteBuilder};
use sr_sim::WeatherSamples;

const LAT:             f64 = 39.0;
const START_LON:       f64 = -94.42;
const END_LON:         f64 = -102.6;
const COORD_STEP_DEG:  f64 = 0.00116; // ≈ 100 m of longitude at 39° N
const ZONE_LINE_LON:   f64 = -101.5;
const CDT_OFFSET_SECS: i64 = -5 * 3600;
const MDT_OFFSET_SECS: i64 = -6 * 3600;

/// Checkpoints (Topeka, Salina, Hays) in route order.
const CHECKPOINTS: [(f64, f64); 3] = [
    (39.05, -95.68),
    (38.84, -97.61),
    (38.88, -99.33),
];

/// Weather locations are this many route coordinates apart (~20 km).
const WEATHER_STRIDE: usize = 200;

/// Build the route with checkpoints snapped onto it.
pub fn build_route() -> anyhow::Result<Route> {
    let n = ((START_LON - END_LON) / COORD_STEP_DEG) as usize + 1;
    let mut b = RouteBuilder::with_capacity(n);
    for k in 0..n {
        let lon = START_LON - k as f64 * COORD_STEP_DEG;
        let offset = if lon < ZONE_LINE_LON { MDT_OFFSET_SECS } else { CDT_OFFSET_SECS };
        b.add_coord_in_zone(GeoPoint::new(LAT, lon), offset);
    }
    for (lat, lon) in CHECKPOINTS {
        b.add_waypoint_at(GeoPoint::new(lat, lon));
    }
    Ok(b.build()?)
}

/// Weather locations every `WEATHER_STRIDE` coordinates, with hourly
/// forecasts from one hour before `start` to `hours` after.
pub fn build_weather(route: &Route, start: i64, hours: i64) -> WeatherSamples {
    let coords = route.coords.iter().step_by(WEATHER_STRIDE).copied().collect();
    let timestamps = (-1..=hours).map(|h| (start + h * 3600) as f64).collect();
    WeatherSamples::new(coords, timestamps)
}
