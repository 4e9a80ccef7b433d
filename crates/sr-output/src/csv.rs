//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `tick_alignment.csv`
//! - `waypoint_stops.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;
use tracing::debug;

use crate::{OutputResult, TickAlignmentRow, WaypointStopRow};
use crate::writer::OutputWriter;

const TICK_HEADER: [&str; 12] = [
    "tick",
    "unix_time_secs",
    "local_time_secs",
    "day_of_year",
    "hour_of_day",
    "distance_m",
    "speed_kmh",
    "cumulative_m",
    "path_index",
    "route_index",
    "weather_index",
    "weather_time_index",
];

const STOP_HEADER: [&str; 4] = ["waypoint", "tick", "achieved_m", "resume_tick"];

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    ticks:    Writer<File>,
    stops:    Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut ticks = Writer::from_path(dir.join("tick_alignment.csv"))?;
        ticks.write_record(TICK_HEADER)?;

        let mut stops = Writer::from_path(dir.join("waypoint_stops.csv"))?;
        stops.write_record(STOP_HEADER)?;

        Ok(Self {
            ticks,
            stops,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_ticks(&mut self, rows: &[TickAlignmentRow]) -> OutputResult<()> {
        for row in rows {
            self.ticks.write_record(&[
                row.tick.to_string(),
                row.unix_time_secs.to_string(),
                row.local_time_secs.to_string(),
                row.day_of_year.to_string(),
                row.hour_of_day.to_string(),
                row.distance_m.to_string(),
                row.speed_kmh.to_string(),
                row.cumulative_m.to_string(),
                row.path_index.to_string(),
                row.route_index.to_string(),
                row.weather_index.to_string(),
                row.weather_time_index.to_string(),
            ])?;
        }
        debug!(rows = rows.len(), "wrote tick rows");
        Ok(())
    }

    fn write_stop(&mut self, row: &WaypointStopRow) -> OutputResult<()> {
        self.stops.write_record(&[
            row.waypoint.to_string(),
            row.tick.to_string(),
            row.achieved_m.to_string(),
            row.resume_tick.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.ticks.flush()?;
        self.stops.flush()?;
        Ok(())
    }
}
