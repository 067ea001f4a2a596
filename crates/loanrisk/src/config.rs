//! Configuration types for report generation and text display.

use serde::{Deserialize, Serialize};

use loanrisk_core::Method;

/// Errors from validating a deserialized configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// `alpha` outside (0, 1).
    #[error("alpha must be in (0, 1), got {0}")]
    Alpha(f64),
    /// `histogram_bins` is zero.
    #[error("histogram_bins must be > 0")]
    ZeroBins,
    /// `max_dti` not a positive finite number.
    #[error("max_dti must be positive and finite, got {0}")]
    MaxDti(f64),
}

/// Main configuration for [`analyze`](crate::report::analyze).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Exclusive upper bound on DTI for the per-status DTI comparison.
    ///
    /// Default: 70.0
    ///
    /// Ratios at or above this are treated as data-entry outliers.
    pub max_dti: f64,

    /// Number of equal-width bins in the annual-income histogram.
    ///
    /// Default: 50
    pub histogram_bins: usize,

    /// Significance level for the Mann–Whitney tests.
    ///
    /// Default: 0.05
    pub alpha: f64,

    /// Pair-counting strategy for Cliff's Delta.
    ///
    /// Default: `Method::Auto`
    pub effect_method: Method,

    /// Minimum number of loans required for each status.
    ///
    /// Default: 1
    pub min_samples_per_status: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            max_dti: 70.0,
            histogram_bins: 50,
            alpha: 0.05,
            effect_method: Method::Auto,
            min_samples_per_status: 1,
        }
    }
}

impl ReportConfig {
    /// Create a new config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the DTI cutoff.
    ///
    /// # Panics
    ///
    /// Panics if `max_dti` is not positive and finite.
    pub fn with_max_dti(mut self, max_dti: f64) -> Self {
        assert!(
            max_dti.is_finite() && max_dti > 0.0,
            "max_dti must be positive and finite"
        );
        self.max_dti = max_dti;
        self
    }

    /// Set the histogram bin count.
    ///
    /// # Panics
    ///
    /// Panics if `bins` is zero.
    pub fn with_histogram_bins(mut self, bins: usize) -> Self {
        assert!(bins > 0, "histogram_bins must be > 0");
        self.histogram_bins = bins;
        self
    }

    /// Set the significance level.
    ///
    /// # Panics
    ///
    /// Panics if `alpha` is not in (0, 1).
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        assert!(alpha > 0.0 && alpha < 1.0, "alpha must be in (0, 1)");
        self.alpha = alpha;
        self
    }

    /// Set the pair-counting strategy.
    pub fn with_effect_method(mut self, method: Method) -> Self {
        self.effect_method = method;
        self
    }

    /// Require at least `min` loans per status.
    pub fn with_min_samples_per_status(mut self, min: usize) -> Self {
        self.min_samples_per_status = min;
        self
    }

    /// Check a configuration that bypassed the builder (e.g. deserialized).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(ConfigError::Alpha(self.alpha));
        }
        if self.histogram_bins == 0 {
            return Err(ConfigError::ZeroBins);
        }
        if !(self.max_dti.is_finite() && self.max_dti > 0.0) {
            return Err(ConfigError::MaxDti(self.max_dti));
        }
        Ok(())
    }
}

/// Text display options for the column dictionary.
///
/// Passed explicitly to each render call; nothing here is process-wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayOptions {
    /// Maximum characters shown for a description before truncation with `...`.
    ///
    /// Default: 300
    pub max_colwidth: usize,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self { max_colwidth: 300 }
    }
}

impl DisplayOptions {
    /// Never truncate.
    pub fn unlimited() -> Self {
        Self {
            max_colwidth: usize::MAX,
        }
    }

    /// Set the maximum width.
    pub fn with_max_colwidth(mut self, max_colwidth: usize) -> Self {
        self.max_colwidth = max_colwidth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = ReportConfig::new()
            .with_max_dti(50.0)
            .with_histogram_bins(20)
            .with_alpha(0.01)
            .with_effect_method(Method::Sorted)
            .with_min_samples_per_status(10);

        assert_eq!(config.max_dti, 50.0);
        assert_eq!(config.histogram_bins, 20);
        assert_eq!(config.alpha, 0.01);
        assert_eq!(config.effect_method, Method::Sorted);
        assert_eq!(config.min_samples_per_status, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_deserialized() {
        let config: ReportConfig =
            serde_json::from_str(r#"{"alpha": 1.5, "histogram_bins": 10}"#).unwrap();
        assert_eq!(config.histogram_bins, 10);
        assert_eq!(config.max_dti, 70.0);
        assert_eq!(config.validate(), Err(ConfigError::Alpha(1.5)));

        let config: ReportConfig = serde_json::from_str(r#"{"histogram_bins": 0}"#).unwrap();
        assert_eq!(config.validate(), Err(ConfigError::ZeroBins));
    }

    #[test]
    fn test_display_options() {
        assert_eq!(DisplayOptions::default().max_colwidth, 300);
        assert_eq!(DisplayOptions::unlimited().max_colwidth, usize::MAX);
        assert_eq!(DisplayOptions::default().with_max_colwidth(40).max_colwidth, 40);
    }
}
