//! `sr-route` — race route model and waypoint-aware path integration.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                     |
//! |----------------|--------------------------------------------------------------|
//! | [`route`]      | `Route`, `RouteBuilder` (R-tree waypoint snapping)           |
//! | [`integrator`] | `WaypointPathIntegrator`, `Integration`, `WaypointStop`      |
//! | [`error`]      | `RouteError`, `RouteResult<T>`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod integrator;
pub mod route;


pub use error::{RouteError, RouteResult};
pub use integrator::{Integration, IntegrationReport, WaypointPathIntegrator, WaypointStop};
pub use route::{Route, RouteBuilder, validate_path};
