//! The error kind shared by every computation in this crate.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Which input of a computation an [`InvalidInput`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operand {
    /// The first sample (`x`) of a two-sample statistic.
    X,
    /// The second sample (`y`) of a two-sample statistic.
    Y,
    /// The only sample of a one-sample summary.
    Values,
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::X => write!(f, "x"),
            Operand::Y => write!(f, "y"),
            Operand::Values => write!(f, "values"),
        }
    }
}

/// Input for which a statistic is undefined.
///
/// This is the only failure mode of the crate: the computations perform no
/// I/O, so the caller either validates sample sizes up front or handles this
/// error. Nothing here ever returns NaN in place of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvalidInput {
    /// A sample was empty, so the statistic's denominator is zero.
    EmptySample {
        /// The empty sample.
        sample: Operand,
    },

    /// A sample contained NaN, which has no ordering against other values.
    NotANumber {
        /// The sample containing NaN.
        sample: Operand,
        /// Zero-based position of the first NaN.
        index: usize,
    },

    /// A sample contained ±∞ where a finite value is required.
    Infinite {
        /// The sample containing the infinity.
        sample: Operand,
        /// Zero-based position of the first infinity.
        index: usize,
    },

    /// A histogram was requested with no bins.
    ZeroBins,
}

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidInput::EmptySample { sample } => {
                write!(f, "invalid input: sample '{}' is empty", sample)
            }
            InvalidInput::NotANumber { sample, index } => {
                write!(f, "invalid input: sample '{}' has NaN at index {}", sample, index)
            }
            InvalidInput::Infinite { sample, index } => write!(
                f,
                "invalid input: sample '{}' has an infinite value at index {}",
                sample, index
            ),
            InvalidInput::ZeroBins => write!(f, "invalid input: histogram needs at least one bin"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidInput {}

/// Reject an empty sample or one containing NaN.
pub(crate) fn check_ordered(values: &[f64], sample: Operand) -> Result<(), InvalidInput> {
    if values.is_empty() {
        return Err(InvalidInput::EmptySample { sample });
    }
    if let Some(index) = values.iter().position(|v| v.is_nan()) {
        return Err(InvalidInput::NotANumber { sample, index });
    }
    Ok(())
}

/// Reject an empty sample or one containing any non-finite value.
pub(crate) fn check_finite(values: &[f64], sample: Operand) -> Result<(), InvalidInput> {
    check_ordered(values, sample)?;
    if let Some(index) = values.iter().position(|v| v.is_infinite()) {
        return Err(InvalidInput::Infinite { sample, index });
    }
    Ok(())
}
