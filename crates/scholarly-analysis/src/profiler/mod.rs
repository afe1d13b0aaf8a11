//! Dataset profiling.
//!
//! Produces the per-variable overview of a dataset (shape, counts, missing
//! values, numeric statistics or distinct counts) that callers show before
//! choosing an analysis.

mod statistics;

use crate::dataset::Dataset;
use crate::types::DatasetSummary;
use tracing::debug;

pub(crate) use statistics::{NumericProfile, variable_stats};

/// Dataset profiler.
pub struct DatasetProfiler;

impl DatasetProfiler {
    /// Summarize every column of a dataset.
    pub fn summarize(dataset: &Dataset) -> DatasetSummary {
        let variables = dataset.columns().iter().map(variable_stats).collect();

        debug!(
            "Profiled dataset with {} rows and {} columns",
            dataset.row_count(),
            dataset.column_count()
        );

        DatasetSummary {
            rows: dataset.row_count(),
            columns: dataset.column_count(),
            variables,
        }
    }
}
