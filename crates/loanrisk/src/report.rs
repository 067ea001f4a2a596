//! Risk report assembly.
//!
//! [`analyze`] turns a [`LoanDataset`] into a [`RiskReport`]: per-status
//! distribution summaries, effect sizes with significance tests, an income
//! histogram on a shared axis, and the findings those numbers support.

use std::fmt;

use serde::{Deserialize, Serialize};

use loanrisk_core::{
    dominance_counts, mann_whitney_u, BoxSummary, DominanceCounts, EffectMagnitude, Histogram,
    InvalidInput, MannWhitney, Method,
};

use crate::config::{ConfigError, ReportConfig};
use crate::data::{Column, DataError, IncomeLevel, LevelRate, LoanDataset, LoanStatus, StatusGroups};

/// Errors that can occur while building a report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// The configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The dataset failed validation.
    #[error(transparent)]
    Data(#[from] DataError),

    /// A statistic was undefined for the data at hand.
    #[error("{context}: {source}")]
    Statistic {
        /// Which part of the report was being computed.
        context: String,
        /// The underlying input error.
        #[source]
        source: InvalidInput,
    },
}

impl ReportError {
    fn statistic(context: impl Into<String>) -> impl FnOnce(InvalidInput) -> Self {
        let context = context.into();
        move |source| ReportError::Statistic { context, source }
    }
}

/// Distribution summary for one loan status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSummary {
    /// The status.
    pub status: LoanStatus,
    /// Summary of its values.
    pub summary: BoxSummary,
}

/// Distribution summary for one (income bracket, status) cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSummary {
    /// The bracket.
    pub level: IncomeLevel,
    /// The status.
    pub status: LoanStatus,
    /// Summary of DTI in this cell.
    pub summary: BoxSummary,
}

/// Histogram counts for one status over shared edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusCounts {
    /// The status.
    pub status: LoanStatus,
    /// Observations per bin.
    pub counts: Vec<u64>,
}

/// Histograms of one column for every status, over the same bins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedHistogram {
    /// The column binned.
    pub column: Column,
    /// Bin boundaries shared by every group.
    pub edges: Vec<f64>,
    /// Counts per status.
    pub groups: Vec<StatusCounts>,
}

impl GroupedHistogram {
    /// Counts for one status, if present.
    pub fn counts(&self, status: LoanStatus) -> Option<&[u64]> {
        self.groups
            .iter()
            .find(|g| g.status == status)
            .map(|g| g.counts.as_slice())
    }
}

/// Charged-off vs fully-paid comparison of one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectComparison {
    /// The column compared.
    pub column: Column,
    /// Status of the `x` sample (charged off).
    pub x: LoanStatus,
    /// Status of the `y` sample (fully paid).
    pub y: LoanStatus,
    /// Pair-counting strategy actually used.
    pub method: Method,
    /// Greater/less/tied pair counts.
    pub counts: DominanceCounts,
    /// Cliff's Delta of `x` against `y`.
    pub delta: f64,
    /// Qualitative size of `delta`.
    pub magnitude: EffectMagnitude,
    /// Mann–Whitney U test on the same samples.
    pub mann_whitney: MannWhitney,
    /// Whether the test rejects equal distributions at the configured alpha.
    pub significant: bool,
}

impl EffectComparison {
    /// Compare charged-off against fully-paid values of `column`.
    pub fn between(
        column: Column,
        groups: &StatusGroups,
        method: Method,
        alpha: f64,
    ) -> Result<Self, InvalidInput> {
        let x = groups.get(LoanStatus::ChargedOff);
        let y = groups.get(LoanStatus::FullyPaid);

        let method = method.resolve(x.len(), y.len());
        tracing::debug!(column = %column, %method, n_x = x.len(), n_y = y.len(), "counting dominance pairs");

        let counts = dominance_counts(x, y, method)?;
        let mann_whitney = mann_whitney_u(x, y)?;
        let delta = counts.delta();

        Ok(Self {
            column,
            x: LoanStatus::ChargedOff,
            y: LoanStatus::FullyPaid,
            method,
            counts,
            delta,
            magnitude: counts.magnitude(),
            mann_whitney,
            significant: mann_whitney.is_significant(alpha),
        })
    }

    /// How the column relates to default risk.
    pub fn direction(&self) -> Direction {
        if !self.significant || self.magnitude == EffectMagnitude::Negligible {
            Direction::NoAssociation
        } else if self.delta > 0.0 {
            Direction::HigherValuesRaiseRisk
        } else {
            Direction::HigherValuesLowerRisk
        }
    }
}

/// Direction of association between a factor and default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Charged-off loans tend to have higher values.
    HigherValuesRaiseRisk,
    /// Charged-off loans tend to have lower values.
    HigherValuesLowerRisk,
    /// No significant, non-negligible difference.
    NoAssociation,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::HigherValuesRaiseRisk => write!(f, "higher values raise risk"),
            Direction::HigherValuesLowerRisk => write!(f, "higher values lower risk"),
            Direction::NoAssociation => write!(f, "no association"),
        }
    }
}

/// One conclusion supported by the report's numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// The risk factor.
    pub factor: Column,
    /// How it relates to default.
    pub direction: Direction,
    /// Effect size backing the finding.
    pub magnitude: EffectMagnitude,
    /// Cliff's Delta backing the finding.
    pub delta: f64,
    /// Human-readable statement.
    pub summary: String,
}

impl Finding {
    fn from_comparison(comparison: &EffectComparison) -> Self {
        let direction = comparison.direction();
        let subject = match comparison.column {
            Column::Dti => "DTI ratio",
            Column::AnnualIncome => "annual income",
        };
        let summary = match direction {
            Direction::HigherValuesRaiseRisk => format!(
                "Higher {} is associated with loan default ({} effect, δ = {:+.3})",
                subject, comparison.magnitude, comparison.delta
            ),
            Direction::HigherValuesLowerRisk => format!(
                "Higher {} is associated with fewer loan defaults ({} effect, δ = {:+.3})",
                subject, comparison.magnitude, comparison.delta
            ),
            Direction::NoAssociation if comparison.magnitude == EffectMagnitude::Negligible => format!(
                "No meaningful difference in {} between charged-off and fully paid loans (δ = {:+.3}, p = {:.3})",
                subject, comparison.delta, comparison.mann_whitney.p_value
            ),
            Direction::NoAssociation => format!(
                "Difference in {} between charged-off and fully paid loans is not statistically significant ({} effect, δ = {:+.3}, p = {:.3})",
                subject, comparison.magnitude, comparison.delta, comparison.mann_whitney.p_value
            ),
        };

        Self {
            factor: comparison.column,
            direction,
            magnitude: comparison.magnitude,
            delta: comparison.delta,
            summary,
        }
    }
}

/// Everything derived from one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    /// Records analysed.
    pub records: usize,
    /// Configuration used.
    pub config: ReportConfig,
    /// Records excluded from DTI-by-status by the `max_dti` cutoff.
    pub dti_excluded: usize,
    /// DTI distribution per status (below the cutoff).
    pub dti_by_status: Vec<StatusSummary>,
    /// Charged-off vs fully-paid DTI (below the cutoff).
    pub dti_comparison: EffectComparison,
    /// Annual income histogram per status.
    pub income_histogram: GroupedHistogram,
    /// Charged-off vs fully-paid annual income.
    pub income_comparison: EffectComparison,
    /// DTI distribution per (income bracket, status) cell with data.
    pub dti_by_income_level: Vec<LevelSummary>,
    /// Charged-off share per income bracket.
    pub charge_off_rate_by_level: Vec<LevelRate>,
    /// Conclusions.
    pub findings: Vec<Finding>,
}

/// Build the full risk report for `dataset`.
///
/// # Errors
///
/// Returns `ReportError` if the configuration is invalid, a status has fewer
/// than `config.min_samples_per_status` loans, or the DTI cutoff leaves a
/// status with no loans.
pub fn analyze(dataset: &LoanDataset, config: &ReportConfig) -> Result<RiskReport, ReportError> {
    config.validate()?;
    dataset.validate(config.min_samples_per_status.max(1))?;

    // DTI by status, below the cutoff
    let dti = dataset.dti_by_status(config.max_dti);
    let dti_excluded = dataset.len() - dti.len();
    if dti_excluded > 0 {
        tracing::info!(
            excluded = dti_excluded,
            max_dti = config.max_dti,
            "excluded loans at or above DTI cutoff"
        );
    }
    let dti_by_status = summarize_statuses(&dti, "DTI by loan status")?;
    let dti_comparison =
        EffectComparison::between(Column::Dti, &dti, config.effect_method, config.alpha)
            .map_err(ReportError::statistic("DTI effect size"))?;

    // Annual income
    let income = dataset.income_by_status();
    let income_histogram = grouped_histogram(Column::AnnualIncome, &income, config.histogram_bins)?;
    let income_comparison = EffectComparison::between(
        Column::AnnualIncome,
        &income,
        config.effect_method,
        config.alpha,
    )
    .map_err(ReportError::statistic("annual income effect size"))?;

    // DTI by income bracket and status
    let mut dti_by_income_level = Vec::new();
    for (level, groups) in dataset.dti_by_level_and_status() {
        for status in LoanStatus::ALL {
            let values = groups.get(status);
            if values.is_empty() {
                continue;
            }
            let summary = BoxSummary::from_values(values)
                .map_err(ReportError::statistic(format!("DTI for {} / {}", level, status)))?;
            dti_by_income_level.push(LevelSummary {
                level,
                status,
                summary,
            });
        }
    }

    let findings = vec![
        Finding::from_comparison(&dti_comparison),
        Finding::from_comparison(&income_comparison),
    ];

    tracing::info!(
        records = dataset.len(),
        dti_delta = dti_comparison.delta,
        income_delta = income_comparison.delta,
        "risk report complete"
    );

    Ok(RiskReport {
        records: dataset.len(),
        config: config.clone(),
        dti_excluded,
        dti_by_status,
        dti_comparison,
        income_histogram,
        income_comparison,
        dti_by_income_level,
        charge_off_rate_by_level: dataset.charge_off_rate_by_level(),
        findings,
    })
}

/// Compare charged-off against fully-paid values of a single column.
///
/// With `apply_dti_cutoff`, only loans below `config.max_dti` take part.
///
/// # Errors
///
/// Returns `ReportError` if the configuration is invalid, a status has fewer
/// than `config.min_samples_per_status` loans, or the cutoff leaves a status
/// with no loans.
pub fn compare(
    dataset: &LoanDataset,
    column: Column,
    config: &ReportConfig,
    apply_dti_cutoff: bool,
) -> Result<EffectComparison, ReportError> {
    config.validate()?;
    dataset.validate(config.min_samples_per_status.max(1))?;

    let groups = if apply_dti_cutoff {
        dataset.values_by_status(column, |r| r.dti < config.max_dti)
    } else {
        dataset.values_by_status(column, |_| true)
    };
    EffectComparison::between(column, &groups, config.effect_method, config.alpha)
        .map_err(ReportError::statistic(format!("{} effect size", column)))
}

fn summarize_statuses(groups: &StatusGroups, context: &str) -> Result<Vec<StatusSummary>, ReportError> {
    LoanStatus::ALL
        .iter()
        .map(|&status| {
            BoxSummary::from_values(groups.get(status))
                .map(|summary| StatusSummary { status, summary })
                .map_err(ReportError::statistic(format!("{} ({})", context, status)))
        })
        .collect()
}

fn grouped_histogram(
    column: Column,
    groups: &StatusGroups,
    bins: usize,
) -> Result<GroupedHistogram, ReportError> {
    let context = format!("{} histogram", column);
    let all: Vec<f64> = LoanStatus::ALL
        .iter()
        .flat_map(|&status| groups.get(status).iter().copied())
        .collect();

    // Edges span both groups so the histograms overlay on one axis
    let pooled = Histogram::equal_width(&all, bins).map_err(ReportError::statistic(context.as_str()))?;
    let edges = pooled.edges;

    let mut out = Vec::with_capacity(LoanStatus::ALL.len());
    for status in LoanStatus::ALL {
        let hist = Histogram::with_edges(groups.get(status), edges.clone())
            .map_err(ReportError::statistic(context.as_str()))?;
        out.push(StatusCounts {
            status,
            counts: hist.counts,
        });
    }

    Ok(GroupedHistogram {
        column,
        edges,
        groups: out,
    })
}
