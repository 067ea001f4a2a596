//! Terminal output formatting with colors and box drawing.
//!
//! Colors come from the `colored` crate, which respects `NO_COLOR` and
//! `CLICOLOR_FORCE`.

use std::fmt::Write;

use colored::Colorize;
use loanrisk_core::{BoxSummary, EffectMagnitude};

use crate::report::{Direction, EffectComparison, GroupedHistogram, RiskReport};

/// Separator line used in output.
pub const SEPARATOR: &str = "──────────────────────────────────────────────────────────────";

/// Widest bar drawn in the verbose histogram.
const HISTOGRAM_BAR_WIDTH: usize = 40;

/// Format a report for human-readable terminal output.
///
/// With `verbose`, the income histogram is drawn as text bars.
pub fn format_report(report: &RiskReport, verbose: bool) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", "loanrisk".bold());
    let _ = writeln!(out, "{}", SEPARATOR);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "  Loans analysed: {} ({} at or above DTI {} excluded from DTI comparison)",
        report.records, report.dti_excluded, report.config.max_dti
    );
    let _ = writeln!(out);

    // Findings
    let _ = writeln!(out, "  {}", "Findings".bold());
    for finding in &report.findings {
        let marker = match finding.direction {
            Direction::HigherValuesRaiseRisk => "\u{25B2}".red().to_string(),
            Direction::HigherValuesLowerRisk => "\u{25BC}".green().to_string(),
            Direction::NoAssociation => "\u{2022}".dimmed().to_string(),
        };
        let _ = writeln!(out, "    {} {}", marker, finding.summary);
    }
    let _ = writeln!(out);

    // DTI by status
    let _ = writeln!(out, "  {}", "Debt-to-income ratio by loan status".bold());
    write_summary_header(&mut out, "Status");
    for row in &report.dti_by_status {
        write_summary_row(&mut out, row.status.label(), &row.summary);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", format_effect(&report.dti_comparison));

    // Income
    let _ = writeln!(out, "  {}", "Annual income by loan status".bold());
    if verbose {
        write_histogram(&mut out, &report.income_histogram);
    }
    let _ = writeln!(out, "{}", format_effect(&report.income_comparison));

    // DTI by income bracket
    let _ = writeln!(out, "  {}", "DTI by income level and loan status".bold());
    write_summary_header(&mut out, "Level / Status");
    for cell in &report.dti_by_income_level {
        let label = format!("{} / {}", cell.level, cell.status);
        write_summary_row(&mut out, &label, &cell.summary);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "  {}", "Charge-off rate by income level".bold());
    for rate in &report.charge_off_rate_by_level {
        match rate.rate() {
            Some(r) => {
                let _ = writeln!(
                    out,
                    "    {:<10} {:>6.1}%  ({} of {})",
                    rate.level.label(),
                    r * 100.0,
                    rate.charged_off,
                    rate.total
                );
            }
            None => {
                let _ = writeln!(out, "    {:<10} {:>7}", rate.level.label(), "-".dimmed());
            }
        }
    }
    let _ = writeln!(out);
    let _ = write!(out, "{}", SEPARATOR);

    out
}

/// Format one effect comparison as an indented block.
pub fn format_effect(comparison: &EffectComparison) -> String {
    let mut out = String::new();
    let magnitude = comparison.magnitude.to_string();
    let magnitude = match comparison.magnitude {
        EffectMagnitude::Negligible => magnitude.dimmed(),
        EffectMagnitude::Small => magnitude.normal(),
        EffectMagnitude::Medium => magnitude.yellow(),
        EffectMagnitude::Large => magnitude.red().bold(),
    };

    let _ = writeln!(
        out,
        "    Cliff's delta ({} vs {}): {:+.4} ({})",
        comparison.x, comparison.y, comparison.delta, magnitude
    );
    let _ = writeln!(
        out,
        "      pairs: {} greater, {} less, {} tied of {} [{}]",
        comparison.counts.greater,
        comparison.counts.less,
        comparison.counts.ties,
        comparison.counts.pairs(),
        comparison.method
    );

    let verdict = if comparison.significant {
        "significant".bold().to_string()
    } else {
        "not significant".dimmed().to_string()
    };
    let _ = writeln!(
        out,
        "      Mann-Whitney U = {:.1}, z = {:.3}, p = {} ({})",
        comparison.mann_whitney.u_x,
        comparison.mann_whitney.z,
        format_p_value(comparison.mann_whitney.p_value),
        verdict
    );
    out
}

/// Format a dictionary lookup result.
pub fn format_description(column: &str, description: Option<&str>) -> String {
    match description {
        Some(text) => format!("{}\n  {}", column.bold(), text),
        None => format!(
            "{} {}",
            column.bold(),
            "(no description in dictionary)".dimmed()
        ),
    }
}

fn format_p_value(p: f64) -> String {
    if p < 1e-4 {
        format!("{:.2e}", p)
    } else {
        format!("{:.4}", p)
    }
}

fn write_summary_header(out: &mut String, label: &str) {
    let header = format!(
        "    {:<22} {:>7} {:>9} {:>9} {:>9} {:>9} {:>9} {:>8}",
        label, "n", "min", "q1", "median", "q3", "max", "outliers"
    );
    let _ = writeln!(out, "{}", header.dimmed());
}

fn write_summary_row(out: &mut String, label: &str, summary: &BoxSummary) {
    let _ = writeln!(
        out,
        "    {:<22} {:>7} {:>9.2} {:>9.2} {:>9.2} {:>9.2} {:>9.2} {:>8}",
        label,
        summary.count,
        summary.min,
        summary.q1,
        summary.median,
        summary.q3,
        summary.max,
        summary.outliers.len()
    );
}

fn write_histogram(out: &mut String, histogram: &GroupedHistogram) {
    let max = histogram
        .groups
        .iter()
        .flat_map(|g| g.counts.iter().copied())
        .max()
        .unwrap_or(0)
        .max(1);

    for group in &histogram.groups {
        let _ = writeln!(out, "    {}", group.status.label().underline());
        for (i, &count) in group.counts.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let len = ((count as f64 / max as f64) * HISTOGRAM_BAR_WIDTH as f64).ceil() as usize;
            let _ = writeln!(
                out,
                "      [{:>12.0}, {:>12.0}) {:>6} {}",
                histogram.edges[i],
                histogram.edges[i + 1],
                count,
                "\u{2588}".repeat(len).cyan()
            );
        }
    }
}

/// Check if an environment variable is set to a truthy value.
///
/// Returns true if the variable is set to "1", "true", or "yes" (case-insensitive).
fn env_is_truthy(name: &str) -> bool {
    std::env::var(name)
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Check if verbose output is enabled via environment variable.
pub fn is_verbose() -> bool {
    env_is_truthy("LOANRISK_VERBOSE")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportConfig;
    use crate::data::{LoanDataset, LoanRecord, LoanStatus};
    use crate::report::analyze;

    fn make_report() -> RiskReport {
        let mut records = Vec::new();
        for i in 0..8 {
            let i = i as f64;
            records.push(LoanRecord::new(LoanStatus::ChargedOff, 20.0 + i, 30_000.0 + i * 1_000.0));
            records.push(LoanRecord::new(LoanStatus::FullyPaid, 5.0 + i, 80_000.0 + i * 5_000.0));
        }
        analyze(&LoanDataset::new(records), &ReportConfig::default()).unwrap()
    }

    #[test]
    fn test_format_report_sections() {
        let output = format_report(&make_report(), false);
        assert!(output.contains("Loans analysed: 16"));
        assert!(output.contains("Debt-to-income ratio by loan status"));
        assert!(output.contains("Cliff's delta (Charged Off vs Fully Paid): +1.0000"));
        assert!(output.contains("Higher DTI ratio is associated with loan default"));
        assert!(output.contains("Charge-off rate by income level"));
        assert!(!output.contains('\u{2588}'));
    }

    #[test]
    fn test_format_report_verbose_histogram() {
        let output = format_report(&make_report(), true);
        assert!(output.contains('\u{2588}'));
    }

    #[test]
    fn test_format_effect_pairs() {
        let report = make_report();
        let output = format_effect(&report.income_comparison);
        assert!(output.contains("0 greater, 64 less, 0 tied of 64"));
        assert!(output.contains("-1.0000"));
    }

    #[test]
    fn test_format_p_value() {
        assert_eq!(format_p_value(0.0312), "0.0312");
        assert_eq!(format_p_value(0.00001234), "1.23e-5");
    }

    #[test]
    fn test_format_description() {
        let found = format_description("dti", Some("Debt to income"));
        assert!(found.contains("Debt to income"));
        let missing = format_description("grade", None);
        assert!(missing.contains("no description"));
    }
}
