//! `sr-sim` — per-tick alignment pipeline for the sunrace race simulator.
//!
//! # Pipeline
//!
//! ```text
//! speed_kmh[t]
//!   ① Distances   : km/h → metres per tick (tick 0 covers nothing)
//!   ② Integration : waypoint-aware achieved distance + path index
//!   ③ Walks       : cumulative distance → route index, weather index
//!                   (joined on Rayon with the `parallel` feature)
//!   ④ Clock       : route index → UTC offset → local timestamp
//!                   → day-of-year, hour-of-day, nearest weather sample
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                   |
//! |------------|----------------------------------------------------------|
//! | `parallel` | Joins the two walks and enables `sr-align/parallel`.     |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use sr_core::SimConfig;
//! use sr_route::Route;
//! use sr_sim::{NoopObserver, SimBuilder, WeatherSamples};
//!
//! let route = Route::from_segments(segments, waypoints)?;
//! let sim = SimBuilder::new(config, route, weather).build()?;
//! let alignment = sim.run(&speed_kmh, &mut NoopObserver)?;
//! ```

pub mod alignment;
pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;


pub use alignment::{TickAlignment, WeatherSamples};
pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{Sim, distances_from_speeds, speeds_from_distances};
