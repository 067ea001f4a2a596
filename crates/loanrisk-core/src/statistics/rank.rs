//! Rank computations with mid-rank tie handling.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;

/// 1-based ranks of `values`, with tied values sharing the mean of the ranks
/// they would occupy.
///
/// Ordering follows `f64::total_cmp`; ties are detected with `==`, so `-0.0`
/// and `0.0` share a rank and every NaN ranks last on its own.
pub fn average_ranks(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_unstable_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; n];
    let mut start = 0;
    while start < n {
        let mut end = start + 1;
        while end < n && values[order[end]] == values[order[start]] {
            end += 1;
        }
        // Positions start..end hold ranks start+1..=end
        let mid_rank = (start + end + 1) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = mid_rank;
        }
        start = end;
    }

    ranks
}

/// Sum of `t³ − t` over every group of `t` tied values in `sorted`.
///
/// `sorted` must be in ascending order. Groups of size one contribute zero.
pub fn tie_correction_term(sorted: &[f64]) -> f64 {
    let mut total = 0.0;
    let mut start = 0;
    while start < sorted.len() {
        let mut end = start + 1;
        while end < sorted.len() && sorted[end] == sorted[start] {
            end += 1;
        }
        let t = (end - start) as f64;
        total += t * t * t - t;
        start = end;
    }
    total
}
