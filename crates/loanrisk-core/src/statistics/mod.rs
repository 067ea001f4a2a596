//! Statistical primitives.
//!
//! - **Ranks** (`rank`): mid-ranks and tie-group bookkeeping
//! - **Summaries** (`summary`): box-plot summaries, quantiles, and histograms

pub mod rank;
pub mod summary;

pub use rank::{average_ranks, tie_correction_term};
pub use summary::{quantile_sorted, BoxSummary, Histogram};
