//! Geographic coordinate type and route distance utilities.
//!
//! `GeoPoint` uses `f64` latitude/longitude.  Route lengths are summed over
//! thousands of closely spaced coordinates, so single precision would drift
//! by whole metres over a race day.

/// Mean Earth radius in metres used for all path-length calculations.
pub const EARTH_RADIUS_M: f64 = 6_371_009.0;

/// A WGS-84 geographic coordinate in decimal degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Haversine great-circle distance in metres.
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_M * c
    }

    /// Equirectangular distance in metres.
    ///
    /// Route coordinates are spaced tightly enough that the road between two
    /// neighbours is effectively straight, so the flat-earth approximation
    /// (longitude scaled by the cosine of the mean latitude) is accurate and
    /// much cheaper than [`distance_m`](Self::distance_m).
    #[inline]
    pub fn flat_distance_m(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();
        let mean_lat = (other.lat + self.lat).to_radians() / 2.0;
        let d_lon_adjusted = mean_lat.cos() * d_lon;
        EARTH_RADIUS_M * (d_lat * d_lat + d_lon_adjusted * d_lon_adjusted).sqrt()
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

/// Segment lengths along a polyline, one entry per coordinate.
///
/// Entry `k` is the distance from coordinate `k-1` to coordinate `k`; entry 0
/// is always `0.0` (the origin).  An empty input yields an empty output.
pub fn path_distances(coords: &[GeoPoint]) -> Vec<f64> {
    if coords.is_empty() {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(coords.len());
    out.push(0.0);
    out.extend(coords.windows(2).map(|w| w[0].flat_distance_m(w[1])));
    out
}
