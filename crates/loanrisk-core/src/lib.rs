//! Core nonparametric statistics for loan-default risk analysis.
//!
//! This crate provides the statistical building blocks used by `loanrisk`,
//! designed to work in `no_std` environments with only an allocator. It
//! performs no I/O and holds no state: every function is a pure computation
//! over the samples it is handed.
//!
//! # Features
//!
//! - `std` (default): Enable standard library support (`std::error::Error`
//!   impls, `serde/std`)
//!
//! # Usage
//!
//! ```
//! use loanrisk_core::{effect_size, EffectMagnitude};
//!
//! let charged_off = [24.1, 19.8, 31.0, 27.5];
//! let fully_paid = [12.0, 18.3, 15.9, 22.4, 9.7];
//!
//! let delta = effect_size(&charged_off, &fully_paid).unwrap();
//! assert!(delta > 0.0);
//! assert_eq!(EffectMagnitude::from_delta(delta), EffectMagnitude::Large);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod analysis;
pub mod constants;
pub mod error;
pub mod math;
pub mod statistics;

// Re-export commonly used items at crate root
pub use analysis::{
    cliffs_delta, dominance_counts, effect_size, mann_whitney_u, DominanceCounts,
    EffectMagnitude, MannWhitney, Method,
};
pub use error::{InvalidInput, Operand};
pub use statistics::{BoxSummary, Histogram};
