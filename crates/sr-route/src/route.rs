//! Discretized race route and its builder.
//!
//! # Data layout
//!
//! A route is a polyline of `n` coordinates.  Every per-coordinate array has
//! length `n` and is indexed by path index:
//!
//! ```text
//! coords[k]             position of coordinate k
//! segment_lengths_m[k]  distance from coordinate k-1 to k  (entry 0 = 0.0)
//! utc_offsets_secs[k]   UTC offset of the time zone containing coordinate k
//! ```
//!
//! `waypoints` is a strictly increasing list of path indices where the car
//! must stop (checkpoints, charging stops).
//!
//! # Spatial index
//!
//! Waypoints are usually known by position rather than path index.  An
//! R-tree (via `rstar`) snaps each waypoint position to the nearest route
//! coordinate at build time.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use sr_core::{GeoPoint, path_distances};

use crate::{RouteError, RouteResult};

// ── R-tree coordinate entry ───────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: a 2-D `[lat, lon]` point with
/// its path index.
#[derive(Clone)]
struct CoordEntry {
    point: [f64; 2], // [lat, lon]
    index: usize,
}

impl RTreeObject for CoordEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for CoordEntry {
    /// Squared Euclidean distance in lat/lon space.  Waypoints sit on or
    /// right next to the route, so the degree-space nearest neighbour is the
    /// geodesic one.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

// ── Route ─────────────────────────────────────────────────────────────────────

/// A validated, immutable race route.
///
/// Construct with [`RouteBuilder`] (from coordinates) or
/// [`Route::from_segments`] (from precomputed segment lengths).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// Coordinate positions.  Empty for routes built from segment lengths.
    pub coords: Vec<GeoPoint>,

    /// Length of each segment in metres; entry 0 is the origin.
    pub segment_lengths_m: Vec<f64>,

    /// Strictly increasing path indices of mandatory stops.
    pub waypoints: Vec<usize>,

    /// UTC offset in seconds at each coordinate.
    pub utc_offsets_secs: Vec<i64>,
}

impl Route {
    /// Build a route directly from segment lengths, all in one time zone.
    ///
    /// # Errors
    ///
    /// See [`validate_path`].
    pub fn from_segments(segment_lengths_m: Vec<f64>, waypoints: Vec<usize>) -> RouteResult<Self> {
        validate_path(&segment_lengths_m, &waypoints)?;
        let utc_offsets_secs = vec![0; segment_lengths_m.len()];
        Ok(Self {
            coords: Vec::new(),
            segment_lengths_m,
            waypoints,
            utc_offsets_secs,
        })
    }

    /// Replace the per-coordinate UTC offsets.
    pub fn with_utc_offsets(mut self, offsets: Vec<i64>) -> RouteResult<Self> {
        if offsets.len() != self.len() {
            return Err(RouteError::LengthMismatch {
                expected: self.len(),
                got:      offsets.len(),
                what:     "UTC offsets",
            });
        }
        self.utc_offsets_secs = offsets;
        Ok(self)
    }

    /// Number of path coordinates (= number of segment entries).
    pub fn len(&self) -> usize {
        self.segment_lengths_m.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segment_lengths_m.is_empty()
    }

    /// Running total of segment lengths: distance from the origin to each
    /// coordinate.
    pub fn cumulative_distances(&self) -> Vec<f64> {
        let mut total = 0.0;
        self.segment_lengths_m
            .iter()
            .map(|&len| {
                total += len;
                total
            })
            .collect()
    }

    /// Total route length in metres.
    pub fn total_length_m(&self) -> f64 {
        self.segment_lengths_m.iter().sum()
    }

    /// UTC offset at `index`, clamped to the last coordinate.
    #[inline]
    pub fn utc_offset_at(&self, index: usize) -> i64 {
        self.utc_offsets_secs[index.min(self.utc_offsets_secs.len() - 1)]
    }
}

/// Check the integration preconditions on a segment array and waypoint list.
///
/// # Errors
///
/// - [`RouteError::EmptyPath`] if there are no segments.
/// - [`RouteError::NegativeSegment`] for a negative or non-finite length.
/// - [`RouteError::WaypointOutOfRange`] for an index `>= len`.
/// - [`RouteError::WaypointsNotIncreasing`] if waypoints repeat or go back.
pub fn validate_path(segment_lengths_m: &[f64], waypoints: &[usize]) -> RouteResult<()> {
    if segment_lengths_m.is_empty() {
        return Err(RouteError::EmptyPath);
    }
    if let Some((index, &length)) = segment_lengths_m
        .iter()
        .enumerate()
        .find(|(_, l)| !l.is_finite() || **l < 0.0)
    {
        return Err(RouteError::NegativeSegment { index, length });
    }
    let len = segment_lengths_m.len();
    if let Some(&waypoint) = waypoints.iter().find(|&&w| w >= len) {
        return Err(RouteError::WaypointOutOfRange { waypoint, len });
    }
    if let Some(i) = waypoints.windows(2).position(|w| w[1] <= w[0]) {
        return Err(RouteError::WaypointsNotIncreasing {
            index:    i + 1,
            waypoint: waypoints[i + 1],
        });
    }
    Ok(())
}

// ── RouteBuilder ──────────────────────────────────────────────────────────────

enum WaypointTarget {
    Index(usize),
    At(GeoPoint),
}

/// Construct a [`Route`] incrementally from coordinates, then call
/// [`build`](Self::build).
///
/// # Example
///
/// ```
/// use sr_core::GeoPoint;
/// use sr_route::RouteBuilder;
///
/// let mut b = RouteBuilder::new();
/// b.add_coord(GeoPoint::new(39.00, -94.60));
/// b.add_coord(GeoPoint::new(39.01, -94.60));
/// b.add_coord(GeoPoint::new(39.02, -94.60));
/// b.add_waypoint_at(GeoPoint::new(39.0102, -94.6001)); // snaps to index 1
/// let route = b.build().unwrap();
/// assert_eq!(route.len(), 3);
/// assert_eq!(route.waypoints, vec![1]);
/// ```
pub struct RouteBuilder {
    coords:    Vec<GeoPoint>,
    offsets:   Vec<i64>,
    waypoints: Vec<WaypointTarget>,
}

impl RouteBuilder {
    pub fn new() -> Self {
        Self { coords: Vec::new(), offsets: Vec::new(), waypoints: Vec::new() }
    }

    /// Pre-allocate for the expected number of coordinates.
    pub fn with_capacity(coords: usize) -> Self {
        Self {
            coords:    Vec::with_capacity(coords),
            offsets:   Vec::with_capacity(coords),
            waypoints: Vec::new(),
        }
    }

    /// Append a coordinate in UTC and return its path index.
    pub fn add_coord(&mut self, pos: GeoPoint) -> usize {
        self.add_coord_in_zone(pos, 0)
    }

    /// Append a coordinate with the UTC offset of its time zone.
    pub fn add_coord_in_zone(&mut self, pos: GeoPoint, utc_offset_secs: i64) -> usize {
        let index = self.coords.len();
        self.coords.push(pos);
        self.offsets.push(utc_offset_secs);
        index
    }

    /// Mark an existing path index as a waypoint.
    pub fn add_waypoint_index(&mut self, index: usize) {
        self.waypoints.push(WaypointTarget::Index(index));
    }

    /// Mark the route coordinate nearest to `pos` as a waypoint.
    pub fn add_waypoint_at(&mut self, pos: GeoPoint) {
        self.waypoints.push(WaypointTarget::At(pos));
    }

    pub fn coord_count(&self) -> usize { self.coords.len() }

    /// Consume the builder and produce a validated [`Route`].
    ///
    /// Segment lengths come from [`sr_core::path_distances`].  Waypoints keep
    /// the order they were added in and must resolve to strictly increasing
    /// path indices.
    pub fn build(self) -> RouteResult<Route> {
        if self.coords.is_empty() {
            return Err(RouteError::EmptyPath);
        }

        let entries: Vec<CoordEntry> = self
            .coords
            .iter()
            .enumerate()
            .map(|(index, pos)| CoordEntry { point: [pos.lat, pos.lon], index })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        let waypoints: Vec<usize> = self
            .waypoints
            .iter()
            .map(|target| match target {
                WaypointTarget::Index(i) => *i,
                WaypointTarget::At(pos) => spatial_idx
                    .nearest_neighbor(&[pos.lat, pos.lon])
                    .map(|e| e.index)
                    .unwrap_or(0),
            })
            .collect();

        let segment_lengths_m = path_distances(&self.coords);
        validate_path(&segment_lengths_m, &waypoints)?;

        Ok(Route {
            coords: self.coords,
            segment_lengths_m,
            waypoints,
            utc_offsets_secs: self.offsets,
        })
    }
}

impl Default for RouteBuilder {
    fn default() -> Self {
        Self::new()
    }
}
