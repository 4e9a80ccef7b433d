//! `sr-align` — per-tick spatio-temporal alignment kernels.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                         |
//! |--------------|------------------------------------------------------------------|
//! | [`calendar`] | `project`, `project_all`, `local_timestamps`: calendar features  |
//! | [`nearest`]  | `nearest_index`, `nearest_indices`: brute-force time matching    |
//! | [`walker`]   | `IndexWalker`, `walk_indices`, `midpoint_boundaries`             |
//! | [`error`]    | `AlignError`, `AlignResult<T>`                                   |
//!
//! # Alignment model
//!
//! Every kernel maps the tick dimension onto some reference dimension:
//!
//! 1. [`calendar`] decomposes each tick's timestamp into day-of-year and
//!    hour-of-day (inputs to the solar-position model).
//! 2. [`nearest`] finds, for each tick, the weather sample closest in time.
//!    The sample times are irregular and unsorted, so the search is linear.
//! 3. [`walker`] maps cumulative distance onto route or weather markers.
//!    Distance never decreases, so a single forward cursor suffices.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                      |
//! |------------|-------------------------------------------------------------|
//! | `parallel` | Rayon fork-join for `project_all`, `par_iter` for matching. |

pub mod calendar;
pub mod error;
pub mod nearest;
pub mod walker;

#[cfg(test)]
mod tests;

pub use calendar::{CalendarProjection, local_timestamps, project, project_all};
pub use error::{AlignError, AlignResult};
pub use nearest::{nearest_index, nearest_indices};
pub use walker::{ClampOrder, IndexWalker, midpoint_boundaries, walk_indices};
