//! Two-sample comparisons.
//!
//! - **Effect size** (`effect`): Cliff's Delta and the dominance counts behind it
//! - **Significance** (`mann_whitney`): Mann–Whitney U test with tie correction

pub mod effect;
pub mod mann_whitney;

pub use effect::{cliffs_delta, dominance_counts, effect_size, DominanceCounts, EffectMagnitude, Method};
pub use mann_whitney::{mann_whitney_u, MannWhitney};
