//! JSON serialization for risk reports.

use crate::report::RiskReport;

/// Serialize a report to a compact JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for RiskReport).
pub fn to_json(report: &RiskReport) -> Result<String, serde_json::Error> {
    serde_json::to_string(report)
}

/// Serialize a report to a pretty-printed JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for RiskReport).
pub fn to_json_pretty(report: &RiskReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
