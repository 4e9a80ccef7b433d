//! `sr-core` — foundational types for the `sunrace` race simulator.
//!
//! This crate is a dependency of every other `sr-*` crate.  It intentionally
//! has no `sr-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`geo`]     | `GeoPoint`, haversine distance, `path_distances`          |
//! | [`time`]    | `Tick`, `SimClock`, `SimConfig`                           |
//! | [`race`]    | `RaceType` enum (road route vs. closed track)             |
//! | [`error`]   | `SrError`, `SrResult`                                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to config and geo types.    |

pub mod error;
pub mod geo;
pub mod race;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{SrError, SrResult};
pub use geo::{GeoPoint, EARTH_RADIUS_M, path_distances};
pub use race::RaceType;
pub use time::{SimClock, SimConfig, Tick, DEFAULT_SEGMENT_TOLERANCE_M, DEFAULT_WAYPOINT_HOLD_SECS};
