//! Monotonic two-pointer walk from cumulative distance to marker index.
//!
//! # Boundaries
//!
//! Markers (route coordinates, weather cells) sit at cumulative distances
//! `c[0] ≤ c[1] ≤ …`.  The nearest marker to a position `x` changes exactly
//! at the midpoints `(c[k] + c[k+1]) / 2`, so the walker compares against
//! the midpoint array produced by [`midpoint_boundaries`] rather than the
//! markers themselves.
//!
//! # Cursor
//!
//! Queries are cumulative distances and never decrease, so the answer never
//! moves backwards.  [`IndexWalker`] keeps one cursor `c` and, per query,
//! advances it by at most one position:
//!
//! ```text
//! if query > bound[c] { c = min(c + 1, K - 1) }
//! ```
//!
//! The comparison is strict: a query sitting exactly on a boundary stays in
//! the lower bucket.  Total cost is O(N + K).
//!
//! At one tick per second even a race car covers far less than one marker
//! spacing per query, so the single-step advance tracks the true nearest
//! marker; a query that overshoots several midpoints catches up over the
//! following ticks.

use crate::{AlignError, AlignResult};

/// Where the cursor is clamped to `[0, K-1]` relative to the comparison.
///
/// The weather and route walks historically ran separate loops with
/// different clamp placement; both are kept so each call site states which
/// one it relies on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ClampOrder {
    /// Clamp the cursor, compare against `bound[c]`, then advance and clamp
    /// again.  Used for weather-location alignment.
    BeforeCheck,
    /// Compare against `bound[c]`, then advance and clamp.  Used for
    /// route-coordinate alignment.
    AfterAdvance,
}

/// Forward-only cursor over a sorted boundary array.
///
/// A fresh walker always starts at index 0, so two walkers fed the same
/// queries emit the same indices.
///
/// # Example
///
/// ```
/// use sr_align::{ClampOrder, IndexWalker};
///
/// let bounds = [5.0, 15.0, 25.0];
/// let mut w = IndexWalker::new(&bounds, ClampOrder::AfterAdvance).unwrap();
/// assert_eq!(w.step(0.0), 0);
/// assert_eq!(w.step(5.0), 0);  // on the boundary: hold
/// assert_eq!(w.step(6.0), 1);
/// assert_eq!(w.step(100.0), 2);
/// assert_eq!(w.step(200.0), 2); // saturated at K-1
/// ```
#[derive(Debug, Clone)]
pub struct IndexWalker<'a> {
    boundaries: &'a [f64],
    cursor:     usize,
    order:      ClampOrder,
}

impl<'a> IndexWalker<'a> {
    /// Create a walker over `boundaries` with the cursor at 0.
    ///
    /// # Errors
    ///
    /// - [`AlignError::EmptyReference`] if `boundaries` is empty.
    /// - [`AlignError::NotMonotonic`] if `boundaries` is not sorted.
    pub fn new(boundaries: &'a [f64], order: ClampOrder) -> AlignResult<Self> {
        if boundaries.is_empty() {
            return Err(AlignError::EmptyReference("boundaries"));
        }
        check_non_decreasing(boundaries, "boundaries")?;
        Ok(Self { boundaries, cursor: 0, order })
    }

    /// Current cursor position.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Feed one query and return the index for it.
    ///
    /// Callers must feed queries in non-decreasing order; the batch entry
    /// point [`walk_indices`] checks this up front.
    #[inline]
    pub fn step(&mut self, query: f64) -> usize {
        let last = self.boundaries.len() - 1;
        match self.order {
            ClampOrder::BeforeCheck => {
                if self.cursor > last {
                    self.cursor = last;
                }
                if query > self.boundaries[self.cursor] {
                    self.cursor += 1;
                    if self.cursor > last {
                        self.cursor = last;
                    }
                }
            }
            ClampOrder::AfterAdvance => {
                if query > self.boundaries[self.cursor] {
                    self.cursor = (self.cursor + 1).min(last);
                }
            }
        }
        self.cursor
    }
}

/// Map every query to its marker index in one pass.
///
/// # Errors
///
/// Fails before producing output if `boundaries` is empty or unsorted, or if
/// `queries` decreases anywhere.
pub fn walk_indices(
    queries:    &[f64],
    boundaries: &[f64],
    order:      ClampOrder,
) -> AlignResult<Vec<usize>> {
    let mut walker = IndexWalker::new(boundaries, order)?;
    check_non_decreasing(queries, "queries")?;
    Ok(queries.iter().map(|&q| walker.step(q)).collect())
}

/// Midpoints between consecutive cumulative marker distances.
///
/// `segment_lengths[k]` is the distance from marker `k-1` to marker `k`
/// (entry 0 is the origin and normally `0.0`).  The cumulative distances are
/// negated on every even index so that a first difference yields the sum of
/// each neighbouring pair; halving and taking the absolute value gives the
/// midpoint.  The output has one entry fewer than the input.
pub fn midpoint_boundaries(segment_lengths: &[f64]) -> Vec<f64> {
    let mut total = 0.0;
    let signed: Vec<f64> = segment_lengths
        .iter()
        .enumerate()
        .map(|(i, &len)| {
            total += len;
            if i % 2 == 0 { -total } else { total }
        })
        .collect();

    signed
        .windows(2)
        .map(|w| ((w[1] - w[0]) / 2.0).abs())
        .collect()
}

fn check_non_decreasing(values: &[f64], what: &'static str) -> AlignResult<()> {
    match values.windows(2).position(|w| w[1] < w[0]) {
        Some(i) => Err(AlignError::NotMonotonic { what, index: i + 1 }),
        None    => Ok(()),
    }
}
