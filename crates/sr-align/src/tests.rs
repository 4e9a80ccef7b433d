//! Unit tests for sr-align.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Sorted `len`-element array with random non-negative gaps.
fn random_sorted(rng: &mut SmallRng, len: usize, max_step: f64) -> Vec<f64> {
    let mut acc = 0.0;
    (0..len)
        .map(|_| {
            acc += rng.gen_range(0.0..max_step);
            acc
        })
        .collect()
}

// ── Calendar ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod calendar {
    use crate::{AlignError, local_timestamps, project, project_all};

    #[test]
    fn known_timestamp() {
        // 1612076500 = 2021-01-31T07:01:40Z
        let (day, hour) = project(1_612_076_500).unwrap();
        assert_eq!(day, 31);
        assert!((hour - (7.0 + 1.0 / 60.0 + 40.0 / 3600.0)).abs() < 1e-12);
        assert!((hour - 7.0278).abs() < 1e-4);
    }

    #[test]
    fn epoch_and_leap_day() {
        assert_eq!(project(0).unwrap(), (1, 0.0));
        // 2020-12-31T23:59:59Z, day 366 of a leap year
        let (day, hour) = project(1_609_459_199).unwrap();
        assert_eq!(day, 366);
        assert!(hour < 24.0 && hour > 23.99);
    }

    #[test]
    fn batch_matches_single() {
        let ts = [0, 86_399, 86_400, 1_612_076_500, 1_700_000_000];
        let batch = project_all(&ts).unwrap();
        assert_eq!(batch.len(), ts.len());
        for (i, &t) in ts.iter().enumerate() {
            let (day, hour) = project(t).unwrap();
            assert_eq!(batch.day_of_year[i], day);
            assert_eq!(batch.local_time[i].to_bits(), hour.to_bits());
        }
    }

    #[test]
    fn empty_batch() {
        let batch = project_all(&[]).unwrap();
        assert!(batch.is_empty());
    }

    #[test]
    fn out_of_range_rejected() {
        let err = project_all(&[0, i64::MAX]).unwrap_err();
        assert!(matches!(err, AlignError::TimestampOutOfRange(i64::MAX)));
    }

    #[test]
    fn local_time_follows_zone_changes() {
        // Crossing from UTC-5 into UTC-6 on the third tick.
        let elapsed = [0, 1, 2, 3];
        let offsets = [-5 * 3600, -5 * 3600, -6 * 3600, -6 * 3600];
        let local = local_timestamps(&elapsed, 1_000_000, &offsets).unwrap();
        assert_eq!(local, vec![1_000_000, 1_000_001, 1_000_002 - 3600, 1_000_003 - 3600]);
    }

    #[test]
    fn local_time_overflow_is_an_error() {
        let err = local_timestamps(&[0, 5], i64::MAX - 3, &[0, 0]).unwrap_err();
        assert!(matches!(err, AlignError::TimestampOutOfRange(i64::MAX)));
        // A zone shift can push an in-range instant past the limit too.
        let err = local_timestamps(&[0, 1], i64::MAX - 3, &[0, 3600]).unwrap_err();
        assert!(matches!(err, AlignError::TimestampOutOfRange(_)));
    }

    #[test]
    fn local_time_length_mismatch() {
        let err = local_timestamps(&[0, 1], 0, &[0]).unwrap_err();
        assert!(matches!(err, AlignError::LengthMismatch { expected: 2, got: 1, .. }));
        assert!(local_timestamps(&[], 0, &[]).unwrap().is_empty());
    }
}

// ── Nearest-sample matching ──────────────────────────────────────────────────

#[cfg(test)]
mod nearest {
    use super::*;
    use crate::{AlignError, nearest_index, nearest_indices};

    #[test]
    fn unsorted_reference() {
        let reference = [50.0, 10.0, 30.0, 20.0];
        assert_eq!(nearest_index(12.0, &reference).unwrap(), 1);
        assert_eq!(nearest_index(26.0, &reference).unwrap(), 2);
        assert_eq!(nearest_index(1_000.0, &reference).unwrap(), 0);
    }

    #[test]
    fn tie_goes_to_first_index() {
        // 15 is 5 away from both 10 (index 1) and 20 (index 3).
        let reference = [50.0, 10.0, 30.0, 20.0];
        assert_eq!(nearest_index(15.0, &reference).unwrap(), 1);
        // Duplicates: the first copy wins.
        let dupes = [7.0, 3.0, 3.0];
        assert_eq!(nearest_index(3.0, &dupes).unwrap(), 1);
    }

    #[test]
    fn empty_reference_rejected() {
        assert!(matches!(nearest_index(1.0, &[]), Err(AlignError::EmptyReference(_))));
        assert!(matches!(nearest_indices(&[1.0], &[]), Err(AlignError::EmptyReference(_))));
    }

    #[test]
    fn batch_is_argmin_with_first_tie() {
        let mut rng = SmallRng::seed_from_u64(7);
        // Integer-valued references make exact ties likely.
        let reference: Vec<f64> = (0..40).map(|_| rng.gen_range(0..200) as f64).collect();
        let ticks: Vec<f64> = (0..500).map(|_| rng.gen_range(-20..220) as f64 * 0.5).collect();

        let out = nearest_indices(&ticks, &reference).unwrap();
        assert_eq!(out.len(), ticks.len());

        for (&t, &i) in ticks.iter().zip(&out) {
            let best = (t - reference[i]).abs();
            for (j, &r) in reference.iter().enumerate() {
                let d = (t - r).abs();
                assert!(best <= d, "tick {t}: index {i} ({best}) beaten by {j} ({d})");
                if j < i {
                    assert!(d > best, "tick {t}: earlier index {j} ties index {i}");
                }
            }
        }
    }
}

// ── Monotonic walker ─────────────────────────────────────────────────────────

#[cfg(test)]
mod walker {
    use super::*;
    use crate::{AlignError, ClampOrder, IndexWalker, midpoint_boundaries, walk_indices};

    const ORDERS: [ClampOrder; 2] = [ClampOrder::BeforeCheck, ClampOrder::AfterAdvance];

    #[test]
    fn midpoints_of_cumulative_markers() {
        // Markers at 0, 10, 30, 60.
        let b = midpoint_boundaries(&[0.0, 10.0, 20.0, 30.0]);
        assert_eq!(b, vec![5.0, 20.0, 45.0]);
    }

    #[test]
    fn midpoints_short_inputs() {
        assert!(midpoint_boundaries(&[]).is_empty());
        assert!(midpoint_boundaries(&[0.0]).is_empty());
        assert_eq!(midpoint_boundaries(&[0.0, 8.0]), vec![4.0]);
    }

    #[test]
    fn equal_to_boundary_does_not_advance() {
        for order in ORDERS {
            let out = walk_indices(&[5.0, 5.0, 5.0], &[5.0, 20.0], order).unwrap();
            assert_eq!(out, vec![0, 0, 0]);
            let out = walk_indices(&[5.0, 5.000001], &[5.0, 20.0], order).unwrap();
            assert_eq!(out, vec![0, 1]);
        }
    }

    #[test]
    fn advances_one_step_per_query() {
        for order in ORDERS {
            // A jump past every boundary only moves the cursor by one.
            let out = walk_indices(&[100.0, 100.0, 100.0, 100.0], &[5.0, 20.0, 45.0], order).unwrap();
            assert_eq!(out, vec![1, 2, 2, 2]);
        }
    }

    #[test]
    fn single_boundary_stays_at_zero() {
        for order in ORDERS {
            let out = walk_indices(&[0.0, 10.0, 1e9], &[1.0], order).unwrap();
            assert_eq!(out, vec![0, 0, 0]);
        }
    }

    #[test]
    fn empty_boundaries_rejected() {
        let err = walk_indices(&[1.0], &[], ClampOrder::AfterAdvance).unwrap_err();
        assert!(matches!(err, AlignError::EmptyReference("boundaries")));
        assert!(IndexWalker::new(&[], ClampOrder::BeforeCheck).is_err());
    }

    #[test]
    fn decreasing_queries_rejected() {
        let err = walk_indices(&[1.0, 3.0, 2.0], &[5.0], ClampOrder::AfterAdvance).unwrap_err();
        assert!(matches!(err, AlignError::NotMonotonic { what: "queries", index: 2 }));
    }

    #[test]
    fn unsorted_boundaries_rejected() {
        let err = IndexWalker::new(&[5.0, 4.0], ClampOrder::BeforeCheck).unwrap_err();
        assert!(matches!(err, AlignError::NotMonotonic { what: "boundaries", index: 1 }));
    }

    #[test]
    fn empty_queries() {
        assert!(walk_indices(&[], &[1.0], ClampOrder::BeforeCheck).unwrap().is_empty());
    }

    #[test]
    fn random_output_monotone_and_bounded() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..50 {
            let k = rng.gen_range(1..40);
            let n = rng.gen_range(0..400);
            let bounds = random_sorted(&mut rng, k, 10.0);
            let queries = random_sorted(&mut rng, n, 2.0);
            for order in ORDERS {
                let out = walk_indices(&queries, &bounds, order).unwrap();
                assert_eq!(out.len(), n);
                assert!(out.iter().all(|&i| i < k));
                assert!(out.windows(2).all(|w| w[0] <= w[1]));
                assert!(out.windows(2).all(|w| w[1] - w[0] <= 1));
            }
        }
    }

    #[test]
    fn incremental_matches_batch() {
        let mut rng = SmallRng::seed_from_u64(3);
        let bounds = random_sorted(&mut rng, 25, 10.0);
        let queries = random_sorted(&mut rng, 300, 1.5);
        for order in ORDERS {
            let batch = walk_indices(&queries, &bounds, order).unwrap();
            let mut walker = IndexWalker::new(&bounds, order).unwrap();
            let stepped: Vec<usize> = queries.iter().map(|&q| walker.step(q)).collect();
            assert_eq!(batch, stepped);
            assert_eq!(walker.cursor(), *batch.last().unwrap());
        }
    }

    #[test]
    fn repeated_runs_identical() {
        let mut rng = SmallRng::seed_from_u64(11);
        let bounds = random_sorted(&mut rng, 30, 4.0);
        let queries = random_sorted(&mut rng, 200, 1.0);
        let a = walk_indices(&queries, &bounds, ClampOrder::AfterAdvance).unwrap();
        let b = walk_indices(&queries, &bounds, ClampOrder::AfterAdvance).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn clamp_orders_agree_from_fresh_cursor() {
        let mut rng = SmallRng::seed_from_u64(99);
        let bounds = random_sorted(&mut rng, 8, 3.0);
        let queries = random_sorted(&mut rng, 100, 1.0);
        let before = walk_indices(&queries, &bounds, ClampOrder::BeforeCheck).unwrap();
        let after = walk_indices(&queries, &bounds, ClampOrder::AfterAdvance).unwrap();
        assert_eq!(before, after);
        assert_eq!(*after.last().unwrap(), bounds.len() - 1);
    }

    #[test]
    fn tracks_nearest_marker_at_fine_resolution() {
        // Markers every 10 m, queries every 1 m: the walk equals the true
        // nearest marker (lower one on exact midpoints).
        let lengths: Vec<f64> = std::iter::once(0.0).chain(std::iter::repeat_n(10.0, 20)).collect();
        let bounds = midpoint_boundaries(&lengths);
        let queries: Vec<f64> = (0..=180).map(f64::from).collect();
        let out = walk_indices(&queries, &bounds, ClampOrder::AfterAdvance).unwrap();
        for (q, &i) in queries.iter().zip(&out) {
            let expected = ((q - 5.0) / 10.0).ceil().max(0.0) as usize;
            assert_eq!(i, expected, "query {q}");
        }
    }
}

// ── Sequential and Rayon kernels ─────────────────────────────────────────────

#[cfg(all(test, feature = "parallel"))]
mod parallel {
    use super::*;
    use crate::calendar::{split_parallel, split_sequential, to_datetimes};
    use crate::nearest::{match_parallel, match_sequential};

    #[test]
    fn nearest_kernels_agree() {
        let mut rng = SmallRng::seed_from_u64(17);
        for _ in 0..20 {
            let m = rng.gen_range(1..60);
            let n = rng.gen_range(0..5_000);
            // Integer-valued samples so first-index ties actually occur.
            let reference: Vec<f64> = (0..m).map(|_| rng.gen_range(0..300) as f64).collect();
            let ticks: Vec<f64> = (0..n).map(|_| rng.gen_range(-50..350) as f64 * 0.5).collect();
            assert_eq!(match_sequential(&ticks, &reference), match_parallel(&ticks, &reference));
        }
    }

    #[test]
    fn calendar_kernels_agree() {
        let mut rng = SmallRng::seed_from_u64(23);
        let ts: Vec<i64> = (0..10_000).map(|_| rng.gen_range(-4_000_000_000..8_000_000_000)).collect();
        let datetimes = to_datetimes(&ts).unwrap();

        let seq = split_sequential(&datetimes);
        let par = split_parallel(&datetimes);
        assert_eq!(seq.day_of_year, par.day_of_year);
        let bits = |v: &[f64]| v.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&seq.local_time), bits(&par.local_time));
    }
}
