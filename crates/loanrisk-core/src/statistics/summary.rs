//! Distribution summaries: quartiles with Tukey fences, and histograms.
//!
//! These are the numbers a box plot or histogram is drawn from. No rendering
//! concerns live here.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::constants::TUKEY_FENCE;
use crate::error::{check_finite, InvalidInput, Operand};

/// Quantile of an ascending slice using linear interpolation between order
/// statistics (the "linear" method: rank = p · (n − 1)).
///
/// `p` is clamped to `[0, 1]`. Returns `None` for an empty slice.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    if n == 1 {
        return Some(sorted[0]);
    }

    let rank = p.clamp(0.0, 1.0) * (n - 1) as f64;
    let lo = rank as usize;
    let hi = (lo + 1).min(n - 1);
    let frac = rank - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Five-number summary with Tukey fences, whiskers, and outliers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxSummary {
    /// Number of observations.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Smallest observation.
    pub min: f64,
    /// 25th percentile.
    pub q1: f64,
    /// 50th percentile.
    pub median: f64,
    /// 75th percentile.
    pub q3: f64,
    /// Largest observation.
    pub max: f64,
    /// `q1 − 1.5 · IQR`.
    pub lower_fence: f64,
    /// `q3 + 1.5 · IQR`.
    pub upper_fence: f64,
    /// Smallest observation at or above the lower fence.
    pub lower_whisker: f64,
    /// Largest observation at or below the upper fence.
    pub upper_whisker: f64,
    /// Observations outside the fences, ascending.
    pub outliers: Vec<f64>,
}

impl BoxSummary {
    /// Summarize a sample.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput`] if `values` is empty or contains a non-finite value.
    pub fn from_values(values: &[f64]) -> Result<Self, InvalidInput> {
        check_finite(values, Operand::Values)?;

        let mut sorted = values.to_vec();
        sorted.sort_unstable_by(f64::total_cmp);
        let n = sorted.len();

        // check_finite guarantees at least one value, so quantiles exist
        let q = |p: f64| quantile_sorted(&sorted, p).unwrap_or(sorted[0]);
        let q1 = q(0.25);
        let median = q(0.5);
        let q3 = q(0.75);
        let iqr = q3 - q1;
        let lower_fence = q1 - TUKEY_FENCE * iqr;
        let upper_fence = q3 + TUKEY_FENCE * iqr;

        let inside_lo = sorted.partition_point(|&v| v < lower_fence);
        let inside_hi = sorted.partition_point(|&v| v <= upper_fence);

        let mut outliers = Vec::new();
        outliers.extend_from_slice(&sorted[..inside_lo]);
        outliers.extend_from_slice(&sorted[inside_hi..]);

        // Some observation always lies in [q1, q3], hence inside the fences
        let (lower_whisker, upper_whisker) = if inside_lo < inside_hi {
            (sorted[inside_lo], sorted[inside_hi - 1])
        } else {
            (median, median)
        };

        let mean = sorted.iter().sum::<f64>() / n as f64;

        Ok(Self {
            count: n,
            mean,
            min: sorted[0],
            q1,
            median,
            q3,
            max: sorted[n - 1],
            lower_fence,
            upper_fence,
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }

    /// Interquartile range, `q3 − q1`.
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Bin counts over contiguous, ascending edges.
///
/// Bin `i` covers `[edges[i], edges[i + 1])`; the last bin also includes its
/// upper edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// Bin boundaries, `counts.len() + 1` of them.
    pub edges: Vec<f64>,
    /// Observations per bin.
    pub counts: Vec<u64>,
}

impl Histogram {
    /// Histogram with `bins` equal-width bins spanning `[min, max]` of `values`.
    ///
    /// A constant sample is spread over `[v − 0.5, v + 0.5]`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput`] if `bins` is zero, or `values` is empty or
    /// contains a non-finite value.
    pub fn equal_width(values: &[f64], bins: usize) -> Result<Self, InvalidInput> {
        if bins == 0 {
            return Err(InvalidInput::ZeroBins);
        }
        check_finite(values, Operand::Values)?;

        let (min, max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        let edges = equal_width_edges(min, max, bins);
        Self::with_edges(values, edges)
    }

    /// Count `values` against pre-computed `edges`.
    ///
    /// Sharing edges lets several groups be overlaid on one axis. Values
    /// outside the edges, and NaN, are not counted.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput::ZeroBins`] if fewer than two edges are given.
    pub fn with_edges(values: &[f64], edges: Vec<f64>) -> Result<Self, InvalidInput> {
        if edges.len() < 2 {
            return Err(InvalidInput::ZeroBins);
        }
        let bins = edges.len() - 1;
        let first = edges[0];
        let last = edges[bins];

        let mut counts = vec![0u64; bins];
        for &v in values {
            if !(first..=last).contains(&v) {
                continue;
            }
            let idx = edges.partition_point(|&e| e <= v).saturating_sub(1).min(bins - 1);
            counts[idx] += 1;
        }

        Ok(Self { edges, counts })
    }

    /// Total number of counted observations.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// `bins + 1` equally spaced edges over `[min, max]`, widened by ±0.5 when
/// the range is degenerate.
///
/// Edges are interpolated between the endpoints rather than stepped by
/// `max - min`, which overflows for finite values of opposite sign near
/// `f64::MAX`.
fn equal_width_edges(min: f64, max: f64, bins: usize) -> Vec<f64> {
    let (lo, hi) = if min < max {
        (min, max)
    } else {
        (min - 0.5, max + 0.5)
    };
    let mut edges: Vec<f64> = (0..bins)
        .map(|i| {
            let t = i as f64 / bins as f64;
            lo * (1.0 - t) + hi * t
        })
        .collect();
    edges.push(hi);
    edges
}
