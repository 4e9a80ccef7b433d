//! Calendar projection of tick timestamps.
//!
//! The solar-position model downstream needs two features per tick: the
//! ordinal day of the year and the hour of the day as a real number.  Both
//! are read off the timestamp in UTC.  When the caller wants local solar
//! time it shifts the timestamps first with [`local_timestamps`].

use chrono::{DateTime, Datelike, Timelike, Utc};
use tracing::debug;

use crate::{AlignError, AlignResult};

/// Day-of-year and hour-of-day for a batch of ticks.
///
/// Both vectors have one entry per input timestamp.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CalendarProjection {
    /// Ordinal day in `1..=366`.
    pub day_of_year: Vec<u32>,
    /// Hour of the day in `[0, 24)`, fractional minutes and seconds included.
    pub local_time:  Vec<f64>,
}

impl CalendarProjection {
    pub fn len(&self) -> usize {
        self.day_of_year.len()
    }

    pub fn is_empty(&self) -> bool {
        self.day_of_year.is_empty()
    }
}

fn to_datetime(timestamp: i64) -> AlignResult<DateTime<Utc>> {
    DateTime::from_timestamp(timestamp, 0).ok_or(AlignError::TimestampOutOfRange(timestamp))
}

#[inline]
fn day_of_year(dt: &DateTime<Utc>) -> u32 {
    dt.ordinal()
}

#[inline]
fn hour_of_day(dt: &DateTime<Utc>) -> f64 {
    dt.num_seconds_from_midnight() as f64 / 3600.0
}

/// Project a single Unix timestamp to `(day_of_year, hour_of_day)`.
///
/// ```
/// let (day, hour) = sr_align::project(1_612_076_500).unwrap();
/// assert_eq!(day, 31);
/// assert!((hour - 7.0278).abs() < 1e-4);
/// ```
pub fn project(timestamp: i64) -> AlignResult<(u32, f64)> {
    let dt = to_datetime(timestamp)?;
    Ok((day_of_year(&dt), hour_of_day(&dt)))
}

/// Project every timestamp in `timestamps`.
///
/// All timestamps are converted up front, so an out-of-range value fails the
/// whole call before any output is produced.  The two projections share no
/// state; with the `parallel` feature they run as a `rayon::join` pair.
pub fn project_all(timestamps: &[i64]) -> AlignResult<CalendarProjection> {
    let datetimes = to_datetimes(timestamps)?;

    #[cfg(feature = "parallel")]
    let projection = split_parallel(&datetimes);

    #[cfg(not(feature = "parallel"))]
    let projection = split_sequential(&datetimes);

    debug!(ticks = timestamps.len(), "projected calendar features");
    Ok(projection)
}

pub(crate) fn to_datetimes(timestamps: &[i64]) -> AlignResult<Vec<DateTime<Utc>>> {
    timestamps.iter().map(|&t| to_datetime(t)).collect()
}

#[cfg_attr(feature = "parallel", allow(dead_code))]
pub(crate) fn split_sequential(datetimes: &[DateTime<Utc>]) -> CalendarProjection {
    CalendarProjection {
        day_of_year: datetimes.iter().map(day_of_year).collect(),
        local_time:  datetimes.iter().map(hour_of_day).collect(),
    }
}

#[cfg(feature = "parallel")]
pub(crate) fn split_parallel(datetimes: &[DateTime<Utc>]) -> CalendarProjection {
    let (day_of_year, local_time) = rayon::join(
        || datetimes.iter().map(day_of_year).collect(),
        || datetimes.iter().map(hour_of_day).collect(),
    );
    CalendarProjection { day_of_year, local_time }
}

/// Shift elapsed tick times onto the local clock of the route position.
///
/// `elapsed_secs[t]` is the time since the start of the run, and
/// `utc_offsets_secs[t]` the UTC offset of the route coordinate the car
/// occupies at tick `t`.  The result is
///
/// ```text
/// local[t] = start_unix_secs + elapsed_secs[t] - (utc_offsets_secs[0] - utc_offsets_secs[t])
/// ```
///
/// so tick 0 reads `start_unix_secs` and crossing into a zone one hour
/// behind moves the clock back by 3600 s.  A result outside the `i64`
/// range is reported as [`AlignError::TimestampOutOfRange`].
pub fn local_timestamps(
    elapsed_secs:     &[i64],
    start_unix_secs:  i64,
    utc_offsets_secs: &[i64],
) -> AlignResult<Vec<i64>> {
    if elapsed_secs.len() != utc_offsets_secs.len() {
        return Err(AlignError::LengthMismatch {
            expected: elapsed_secs.len(),
            got:      utc_offsets_secs.len(),
            what:     "UTC offsets",
        });
    }
    let Some(&origin_offset) = utc_offsets_secs.first() else {
        return Ok(Vec::new());
    };

    elapsed_secs
        .iter()
        .zip(utc_offsets_secs)
        .map(|(&elapsed, &offset)| {
            origin_offset
                .checked_sub(offset)
                .and_then(|shift| start_unix_secs.checked_add(elapsed)?.checked_sub(shift))
                .ok_or(AlignError::TimestampOutOfRange(start_unix_secs.saturating_add(elapsed)))
        })
        .collect()
}
