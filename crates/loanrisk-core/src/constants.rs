//! Numeric constants used throughout the crate.

/// Largest number of (x, y) pairs for which [`Method::Auto`](crate::Method::Auto)
/// still compares every pair directly. Above this the sorted counter is used.
pub const AUTO_PAIRWISE_LIMIT: u64 = 4096;

/// Upper bound of |δ| for a negligible effect (Romano et al., 2006).
pub const NEGLIGIBLE_DELTA: f64 = 0.147;

/// Upper bound of |δ| for a small effect (Romano et al., 2006).
pub const SMALL_DELTA: f64 = 0.33;

/// Upper bound of |δ| for a medium effect (Romano et al., 2006).
pub const MEDIUM_DELTA: f64 = 0.474;

/// Tukey fence multiplier applied to the interquartile range.
pub const TUKEY_FENCE: f64 = 1.5;

/// Continuity correction applied to the Mann–Whitney normal approximation.
pub const CONTINUITY_CORRECTION: f64 = 0.5;
