use std::path::PathBuf;

use crate::data::model::EvDataset;
use crate::data::summary::Summary;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct DashboardState {
    /// Where the dataset was read from (shown in the top bar).
    pub source: PathBuf,

    /// Loaded dataset. Never mutated after construction.
    pub dataset: EvDataset,

    /// Derived figures for the cards and charts.
    pub summary: Summary,
}

impl DashboardState {
    /// Take ownership of a freshly loaded dataset and derive its summary.
    pub fn new(source: PathBuf, dataset: EvDataset) -> Self {
        let summary = Summary::compute(&dataset);
        log::debug!(
            "Summary: {} years, {} vehicle types, {} range/price pairs",
            summary.by_year.len(),
            summary.by_type.len(),
            summary.range_vs_price.len()
        );
        Self {
            source,
            dataset,
            summary,
        }
    }
}
