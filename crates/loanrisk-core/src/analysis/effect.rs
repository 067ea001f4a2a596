//! Cliff's Delta effect size.
//!
//! Cliff's Delta measures stochastic dominance between two independent
//! samples:
//!
//! ```text
//! δ = (#{(i, j) : x_i > y_j} − #{(i, j) : x_i < y_j}) / (n_x · n_y)
//! ```
//!
//! Tied pairs count towards neither term. δ = 1 when every x exceeds every y,
//! δ = −1 when every y exceeds every x.
//!
//! Two counting strategies are provided. Both produce the same integer counts,
//! so their results are bit-identical, ties included.

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{AUTO_PAIRWISE_LIMIT, MEDIUM_DELTA, NEGLIGIBLE_DELTA, SMALL_DELTA};
use crate::error::{check_ordered, InvalidInput, Operand};
use crate::math;

/// Strategy used to count dominance pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Method {
    /// Pairwise for small inputs, sorted otherwise.
    #[default]
    Auto,

    /// Compare every (x, y) pair directly.
    ///
    /// O(n_x · n_y) time, O(1) extra space.
    Pairwise,

    /// Sort a copy of `y`, then binary-search each `x` into it.
    ///
    /// O((n_x + n_y) log n_y) time, O(n_y) extra space.
    Sorted,
}

impl Method {
    /// Resolve `Auto` to a concrete strategy for the given sample sizes.
    pub fn resolve(self, n_x: usize, n_y: usize) -> Method {
        match self {
            Method::Auto => {
                if (n_x as u64).saturating_mul(n_y as u64) <= AUTO_PAIRWISE_LIMIT {
                    Method::Pairwise
                } else {
                    Method::Sorted
                }
            }
            concrete => concrete,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Auto => write!(f, "auto"),
            Method::Pairwise => write!(f, "pairwise"),
            Method::Sorted => write!(f, "sorted"),
        }
    }
}

/// Qualitative size of a Cliff's Delta.
///
/// Thresholds on |δ| follow Romano et al. (2006): 0.147, 0.33, 0.474.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EffectMagnitude {
    /// |δ| < 0.147
    Negligible,
    /// 0.147 ≤ |δ| < 0.33
    Small,
    /// 0.33 ≤ |δ| < 0.474
    Medium,
    /// |δ| ≥ 0.474
    Large,
}

impl EffectMagnitude {
    /// Classify a delta by its absolute value.
    pub fn from_delta(delta: f64) -> Self {
        let d = math::abs(delta);
        if d < NEGLIGIBLE_DELTA {
            EffectMagnitude::Negligible
        } else if d < SMALL_DELTA {
            EffectMagnitude::Small
        } else if d < MEDIUM_DELTA {
            EffectMagnitude::Medium
        } else {
            EffectMagnitude::Large
        }
    }
}

impl fmt::Display for EffectMagnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectMagnitude::Negligible => write!(f, "negligible"),
            EffectMagnitude::Small => write!(f, "small"),
            EffectMagnitude::Medium => write!(f, "medium"),
            EffectMagnitude::Large => write!(f, "large"),
        }
    }
}

/// Pair counts between two samples.
///
/// `greater + less + ties == n_x * n_y` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DominanceCounts {
    /// Size of `x`.
    pub n_x: usize,
    /// Size of `y`.
    pub n_y: usize,
    /// Pairs with `x[i] > y[j]`.
    pub greater: u64,
    /// Pairs with `x[i] < y[j]`.
    pub less: u64,
    /// Pairs with `x[i] == y[j]`.
    pub ties: u64,
}

impl DominanceCounts {
    /// Total number of compared pairs, `n_x · n_y`.
    pub fn pairs(&self) -> u64 {
        self.n_x as u64 * self.n_y as u64
    }

    /// Cliff's Delta: `(greater − less) / (n_x · n_y)`.
    pub fn delta(&self) -> f64 {
        let numerator = self.greater as i128 - self.less as i128;
        numerator as f64 / self.pairs() as f64
    }

    /// Qualitative size of [`delta`](Self::delta).
    pub fn magnitude(&self) -> EffectMagnitude {
        EffectMagnitude::from_delta(self.delta())
    }

    /// Mann–Whitney U statistic of `x`: `greater + ties / 2`.
    pub fn u_statistic(&self) -> f64 {
        self.greater as f64 + self.ties as f64 / 2.0
    }

    /// The same counts with the roles of `x` and `y` swapped.
    pub fn swapped(&self) -> Self {
        Self {
            n_x: self.n_y,
            n_y: self.n_x,
            greater: self.less,
            less: self.greater,
            ties: self.ties,
        }
    }
}

/// Cliff's Delta between `x` and `y`, counted with [`Method::Auto`].
///
/// # Errors
///
/// Returns [`InvalidInput`] if either sample is empty or contains NaN.
///
/// # Example
///
/// ```
/// use loanrisk_core::effect_size;
///
/// assert_eq!(effect_size(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]).unwrap(), -1.0);
/// assert_eq!(effect_size(&[1.0, 2.0, 3.0], &[2.0, 2.0, 2.0]).unwrap(), 0.0);
/// assert!(effect_size(&[], &[1.0, 2.0]).is_err());
/// ```
pub fn effect_size(x: &[f64], y: &[f64]) -> Result<f64, InvalidInput> {
    cliffs_delta(x, y, Method::Auto)
}

/// Cliff's Delta between `x` and `y` using the given counting strategy.
///
/// # Errors
///
/// Returns [`InvalidInput`] if either sample is empty or contains NaN.
pub fn cliffs_delta(x: &[f64], y: &[f64], method: Method) -> Result<f64, InvalidInput> {
    dominance_counts(x, y, method).map(|counts| counts.delta())
}

/// Count greater, less, and tied pairs between `x` and `y`.
///
/// # Errors
///
/// Returns [`InvalidInput`] if either sample is empty or contains NaN.
pub fn dominance_counts(
    x: &[f64],
    y: &[f64],
    method: Method,
) -> Result<DominanceCounts, InvalidInput> {
    check_ordered(x, Operand::X)?;
    check_ordered(y, Operand::Y)?;

    let (greater, less, ties) = match method.resolve(x.len(), y.len()) {
        Method::Sorted => count_sorted(x, y),
        _ => count_pairwise(x, y),
    };

    Ok(DominanceCounts {
        n_x: x.len(),
        n_y: y.len(),
        greater,
        less,
        ties,
    })
}

fn count_pairwise(x: &[f64], y: &[f64]) -> (u64, u64, u64) {
    let mut greater = 0u64;
    let mut less = 0u64;
    let mut ties = 0u64;

    for &xi in x {
        for &yj in y {
            if xi > yj {
                greater += 1;
            } else if xi < yj {
                less += 1;
            } else {
                ties += 1;
            }
        }
    }

    (greater, less, ties)
}

fn count_sorted(x: &[f64], y: &[f64]) -> (u64, u64, u64) {
    let mut sorted_y: Vec<f64> = y.to_vec();
    sorted_y.sort_unstable_by(f64::total_cmp);
    let n_y = sorted_y.len();

    let mut greater = 0u64;
    let mut less = 0u64;
    let mut ties = 0u64;

    // total_cmp puts -0.0 directly before 0.0, so both predicates below stay
    // monotone over the sorted slice even though they use IEEE comparison.
    for &xi in x {
        let below = sorted_y.partition_point(|&v| v < xi);
        let not_above = sorted_y.partition_point(|&v| v <= xi);
        greater += below as u64;
        ties += (not_above - below) as u64;
        less += (n_y - not_above) as u64;
    }

    (greater, less, ties)
}


/// Property-based tests using proptest
#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Samples drawn from a small integer grid so ties are common
    fn tied_sample(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
        prop::collection::vec(0i32..20, 1..=max_len)
            .prop_map(|v| v.into_iter().map(|x| x as f64 / 2.0).collect())
    }

    fn normal_sample(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
        prop::collection::vec(prop::num::f64::NORMAL, 1..=max_len)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_delta_in_unit_interval(x in normal_sample(60), y in normal_sample(60)) {
            let delta = effect_size(&x, &y).unwrap();
            prop_assert!((-1.0..=1.0).contains(&delta));
        }

        #[test]
        fn prop_self_comparison_is_zero(x in tied_sample(80)) {
            prop_assert_eq!(effect_size(&x, &x).unwrap(), 0.0);
        }

        #[test]
        fn prop_antisymmetric(x in tied_sample(50), y in tied_sample(50)) {
            let forward = effect_size(&x, &y).unwrap();
            let backward = effect_size(&y, &x).unwrap();
            prop_assert_eq!(forward, -backward);
        }

        #[test]
        fn prop_methods_bit_identical(x in tied_sample(120), y in tied_sample(120)) {
            let pairwise = dominance_counts(&x, &y, Method::Pairwise).unwrap();
            let sorted = dominance_counts(&x, &y, Method::Sorted).unwrap();
            prop_assert_eq!(pairwise, sorted);
            prop_assert_eq!(pairwise.delta().to_bits(), sorted.delta().to_bits());
            prop_assert_eq!(pairwise.greater + pairwise.less + pairwise.ties, pairwise.pairs());
        }

        #[test]
        fn prop_separated_samples_are_extreme(x in tied_sample(40), y in tied_sample(40)) {
            // Shift y entirely above x
            let offset = 100.0;
            let shifted: Vec<f64> = y.iter().map(|v| v + offset).collect();
            prop_assert_eq!(effect_size(&x, &shifted).unwrap(), -1.0);
            prop_assert_eq!(effect_size(&shifted, &x).unwrap(), 1.0);
        }
    }
}
