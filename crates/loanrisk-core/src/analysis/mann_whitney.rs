//! Mann–Whitney U test (two-sided, normal approximation).
//!
//! The U statistic of `x` is the number of pairs in which `x` wins, with ties
//! counting one half. It is the same pair count Cliff's Delta is built from:
//!
//! ```text
//! δ = 2 · U_x / (n_x · n_y) − 1
//! ```
//!
//! The p-value uses the normal approximation with tie-corrected variance and
//! a 0.5 continuity correction:
//!
//! ```text
//! σ² = n_x n_y / 12 · ((N + 1) − Σ(t³ − t) / (N (N − 1)))
//! z  = (max(U_x, U_y) − n_x n_y / 2 − 0.5) / σ
//! p  = min(1, 2 · (1 − Φ(z)))
//! ```

extern crate alloc;

use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::analysis::effect::{dominance_counts, DominanceCounts, Method};
use crate::constants::CONTINUITY_CORRECTION;
use crate::error::InvalidInput;
use crate::math;
use crate::statistics::rank::tie_correction_term;

/// Result of a two-sided Mann–Whitney U test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MannWhitney {
    /// U statistic of `x`.
    pub u_x: f64,
    /// U statistic of `y`, `n_x · n_y − u_x`.
    pub u_y: f64,
    /// Standardized statistic (continuity-corrected, non-negative unless U sits at its mean).
    pub z: f64,
    /// Two-sided p-value.
    pub p_value: f64,
}

impl MannWhitney {
    /// Whether the null hypothesis of identical distributions is rejected at `alpha`.
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

/// Two-sided Mann–Whitney U test between `x` and `y`.
///
/// # Errors
///
/// Returns [`InvalidInput`] if either sample is empty or contains NaN.
pub fn mann_whitney_u(x: &[f64], y: &[f64]) -> Result<MannWhitney, InvalidInput> {
    let counts = dominance_counts(x, y, Method::Sorted)?;

    let mut merged: Vec<f64> = Vec::with_capacity(x.len() + y.len());
    merged.extend_from_slice(x);
    merged.extend_from_slice(y);
    merged.sort_unstable_by(f64::total_cmp);

    Ok(from_counts(&counts, tie_correction_term(&merged)))
}

/// Build the test result from pair counts and the pooled tie term `Σ(t³ − t)`.
fn from_counts(counts: &DominanceCounts, tie_term: f64) -> MannWhitney {
    let pairs = counts.pairs() as f64;
    let u_x = counts.u_statistic();
    let u_y = pairs - u_x;

    // Both samples are non-empty, so n ≥ 2
    let n = (counts.n_x + counts.n_y) as f64;
    let variance = pairs / 12.0 * ((n + 1.0) - tie_term / (n * (n - 1.0)));

    if variance <= 0.0 {
        // Every observation tied: no evidence either way
        return MannWhitney {
            u_x,
            u_y,
            z: 0.0,
            p_value: 1.0,
        };
    }

    let z = (u_x.max(u_y) - pairs / 2.0 - CONTINUITY_CORRECTION) / math::sqrt(variance);
    let p_value = (2.0 * math::normal_sf(z)).clamp(0.0, 1.0);

    MannWhitney {
        u_x,
        u_y,
        z,
        p_value,
    }
}
