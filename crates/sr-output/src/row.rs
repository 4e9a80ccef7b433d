//! Plain data row types written by output backends.

use sr_route::WaypointStop;
use sr_sim::TickAlignment;

/// One tick of a [`TickAlignment`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickAlignmentRow {
    pub tick:               u64,
    pub unix_time_secs:     i64,
    pub local_time_secs:    i64,
    pub day_of_year:        u32,
    pub hour_of_day:        f64,
    pub distance_m:         f64,
    pub speed_kmh:          f64,
    pub cumulative_m:       f64,
    pub path_index:         usize,
    pub route_index:        usize,
    pub weather_index:      usize,
    pub weather_time_index: usize,
}

impl TickAlignmentRow {
    /// Flatten the column arrays into one row per tick.
    pub fn rows(a: &TickAlignment) -> Vec<Self> {
        (0..a.len())
            .map(|t| Self {
                tick:               t as u64,
                unix_time_secs:     a.timestamps[t],
                local_time_secs:    a.local_timestamps[t],
                day_of_year:        a.day_of_year[t],
                hour_of_day:        a.local_time[t],
                distance_m:         a.distances_m[t],
                speed_kmh:          a.speed_kmh[t],
                cumulative_m:       a.cumulative_m[t],
                path_index:         a.path_indices[t],
                route_index:        a.route_indices[t],
                weather_index:      a.weather_indices[t],
                weather_time_index: a.weather_time_indices[t],
            })
            .collect()
    }
}

/// One mandatory stop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaypointStopRow {
    pub waypoint:    usize,
    pub tick:        u64,
    pub achieved_m:  f64,
    /// First tick after the hold; equals the tick count if the hold ran past
    /// the end of the profile.
    pub resume_tick: u64,
}

impl From<&WaypointStop> for WaypointStopRow {
    fn from(stop: &WaypointStop) -> Self {
        Self {
            waypoint:    stop.waypoint,
            tick:        stop.tick as u64,
            achieved_m:  stop.achieved_m,
            resume_tick: stop.resume_tick as u64,
        }
    }
}
