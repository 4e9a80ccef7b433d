//! Integration tests for sr-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::row::{TickAlignmentRow, WaypointStopRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn tick_row(tick: u64) -> TickAlignmentRow {
        TickAlignmentRow {
            tick,
            unix_time_secs:     1_700_000_000 + tick as i64,
            local_time_secs:    1_700_000_000 + tick as i64 - 3600,
            day_of_year:        318,
            hour_of_day:        21.5,
            distance_m:         12.5,
            speed_kmh:          45.0,
            cumulative_m:       12.5 * tick as f64,
            path_index:         tick as usize + 1,
            route_index:        tick as usize,
            weather_index:      0,
            weather_time_index: 2,
        }
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("tick_alignment.csv").exists());
        assert!(dir.path().join("waypoint_stops.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_alignment.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers.len(), 12);
        assert_eq!(headers[0], "tick");
        assert_eq!(headers[11], "weather_time_index");

        let mut rdr2 = csv::Reader::from_path(dir.path().join("waypoint_stops.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers2, ["waypoint", "tick", "achieved_m", "resume_tick"]);
    }

    #[test]
    fn csv_tick_rows_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_ticks(&[tick_row(0), tick_row(1), tick_row(2)]).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_alignment.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[1][0], "1");           // tick
        assert_eq!(&rows[1][2], "1699996401");  // local time
        assert_eq!(&rows[1][4], "21.5");        // hour_of_day
        assert_eq!(&rows[2][8], "3");           // path_index
    }

    #[test]
    fn csv_stop_row_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_stop(&WaypointStopRow { waypoint: 2, tick: 1, achieved_m: 3.0, resume_tick: 2701 })
            .unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("waypoint_stops.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "2");
        assert_eq!(&rows[0][2], "3");
        assert_eq!(&rows[0][3], "2701");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap(); // second call should not panic
    }

    #[test]
    fn csv_missing_dir_errors() {
        let dir = tmp();
        assert!(CsvWriter::new(&dir.path().join("does/not/exist")).is_err());
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use sr_core::SimConfig;
    use sr_route::Route;
    use sr_sim::{SimBuilder, WeatherSamples};
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::observer::SimOutputObserver;
    use crate::row::TickAlignmentRow;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn weather() -> WeatherSamples {
        use sr_core::GeoPoint;
        WeatherSamples::new(
            vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(0.001, 0.0)],
            vec![1_700_000_000.0],
        )
    }

    #[test]
    fn rows_follow_alignment_columns() {
        let route = Route::from_segments(vec![0.0, 10.0, 10.0, 100.0], vec![2]).unwrap();
        let sim = SimBuilder::new(SimConfig::new(1_700_000_000, 1, 4), route, weather())
            .build()
            .unwrap();
        let a = sim.run(&[18.0; 4], &mut sr_sim::NoopObserver).unwrap();

        let rows = TickAlignmentRow::rows(&a);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[3].tick, 3);
        assert_eq!(rows[3].unix_time_secs, 1_700_000_003);
        assert_eq!(rows[3].path_index, a.path_indices[3]);
        assert_eq!(rows[3].cumulative_m, a.cumulative_m[3]);
    }

    #[test]
    fn integration_csv() {
        // 18 km/h = 5 m per tick; the waypoint is reached on tick 2 and the
        // 45-minute hold runs past the end of the 10-tick profile.
        let config = SimConfig::new(1_700_000_000, 1, 10);
        let route = Route::from_segments(vec![0.0, 10.0, 10.0, 100.0], vec![2]).unwrap();
        let sim = SimBuilder::new(config, route, weather()).build().unwrap();

        let dir = tmp();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer);
        let alignment = sim.run(&[18.0; 10], &mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");
        assert_eq!(alignment.stops.len(), 1);

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_alignment.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 10, "one row per tick");

        let mut rdr = csv::Reader::from_path(dir.path().join("waypoint_stops.csv")).unwrap();
        let stops: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(stops.len(), 1);
        assert_eq!(&stops[0][1], "2");   // tick
        assert_eq!(&stops[0][3], "10");  // resume_tick clipped to the profile
    }
}
