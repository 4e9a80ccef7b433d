//! Route-subsystem error type.

use thiserror::Error;

/// Errors produced by `sr-route`.  All of them are contract violations
/// detected before any integration work starts.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("route has no coordinates")]
    EmptyPath,

    #[error("segment {index} has invalid length {length}")]
    NegativeSegment { index: usize, length: f64 },

    #[error("waypoint {waypoint} is outside a route of {len} coordinates")]
    WaypointOutOfRange { waypoint: usize, len: usize },

    #[error("waypoints must be strictly increasing (entry {index} is {waypoint})")]
    WaypointsNotIncreasing { index: usize, waypoint: usize },

    #[error("{what} length {got} does not match route length {expected}")]
    LengthMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("segment tolerance must be finite and non-negative, got {0}")]
    InvalidTolerance(f64),
}

pub type RouteResult<T> = Result<T, RouteError>;
