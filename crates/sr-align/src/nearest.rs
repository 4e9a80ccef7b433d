//! Brute-force nearest-sample matching in time.
//!
//! Weather samples arrive at irregular, provider-chosen instants and are not
//! guaranteed to be sorted.  The sample set is small (tens to hundreds)
//! next to the tick count (tens of thousands); every tick scans all of it.

use tracing::debug;

use crate::{AlignError, AlignResult};

/// Index of the reference value closest to `t`.
///
/// Closeness is `|t - reference[i]|` in IEEE-754 arithmetic.  The scan only
/// replaces the best candidate on a strictly smaller difference, so the
/// first of several equidistant references wins.  Comparisons against NaN
/// are false, so a NaN reference is never selected over index 0.
#[inline]
fn argmin_abs_diff(t: f64, reference: &[f64]) -> usize {
    let mut best_index = 0;
    let mut best_diff = (t - reference[0]).abs();
    for (i, &r) in reference.iter().enumerate().skip(1) {
        let diff = (t - r).abs();
        if diff < best_diff {
            best_diff = diff;
            best_index = i;
        }
    }
    best_index
}

/// Index of the element of `reference` closest to `timestamp`.
///
/// # Errors
///
/// [`AlignError::EmptyReference`] if `reference` is empty.
pub fn nearest_index(timestamp: f64, reference: &[f64]) -> AlignResult<usize> {
    if reference.is_empty() {
        return Err(AlignError::EmptyReference("reference timestamps"));
    }
    Ok(argmin_abs_diff(timestamp, reference))
}

/// [`nearest_index`] for every element of `timestamps`.
///
/// O(N·M).  Each tick is independent; with the `parallel` feature the ticks
/// are spread over Rayon's thread pool.
pub fn nearest_indices(timestamps: &[f64], reference: &[f64]) -> AlignResult<Vec<usize>> {
    if reference.is_empty() {
        return Err(AlignError::EmptyReference("reference timestamps"));
    }

    #[cfg(feature = "parallel")]
    let out = match_parallel(timestamps, reference);

    #[cfg(not(feature = "parallel"))]
    let out = match_sequential(timestamps, reference);

    debug!(ticks = timestamps.len(), samples = reference.len(), "matched nearest samples");
    Ok(out)
}

// ── Kernels ───────────────────────────────────────────────────────────────────

/// One scan per tick on the calling thread.  `reference` must be non-empty.
#[cfg_attr(feature = "parallel", allow(dead_code))]
pub(crate) fn match_sequential(timestamps: &[f64], reference: &[f64]) -> Vec<usize> {
    timestamps
        .iter()
        .map(|&t| argmin_abs_diff(t, reference))
        .collect()
}

/// [`match_sequential`] with the ticks spread over Rayon's pool.
#[cfg(feature = "parallel")]
pub(crate) fn match_parallel(timestamps: &[f64], reference: &[f64]) -> Vec<usize> {
    use rayon::prelude::*;

    timestamps
        .par_iter()
        .map(|&t| argmin_abs_diff(t, reference))
        .collect()
}
