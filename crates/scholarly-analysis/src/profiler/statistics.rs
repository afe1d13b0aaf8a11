//! Per-column statistics shared by the profiler and the descriptive analyzer.

use crate::dataset::{Column, ColumnData};
use crate::types::{DescribeRow, VariableStats};
use crate::utils::{mean, present_values, quantile_sorted, sample_std, sorted};
use std::collections::HashSet;

/// Distribution statistics for one numeric column.
///
/// Every field except `count` is `None` when the column has no values;
/// `std` is also `None` with fewer than two values.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NumericProfile {
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q1: Option<f64>,
    pub median: Option<f64>,
    pub q3: Option<f64>,
    pub max: Option<f64>,
}

impl NumericProfile {
    pub fn from_values(values: &[Option<f64>]) -> Self {
        let present = sorted(present_values(values));

        Self {
            count: present.len(),
            mean: mean(&present),
            std: sample_std(&present),
            min: present.first().copied(),
            q1: quantile_sorted(&present, 0.25),
            median: quantile_sorted(&present, 0.5),
            q3: quantile_sorted(&present, 0.75),
            max: present.last().copied(),
        }
    }

    pub fn describe_row(&self, variable: &str) -> DescribeRow {
        DescribeRow {
            variable: variable.to_string(),
            count: self.count,
            mean: self.mean,
            std: self.std,
            min: self.min,
            q1: self.q1,
            median: self.median,
            q3: self.q3,
            max: self.max,
        }
    }
}

/// Build the [`VariableStats`] overview for any column.
pub(crate) fn variable_stats(column: &Column) -> VariableStats {
    let missing = column.missing_count();
    let count = column.len() - missing;

    let mut stats = VariableStats {
        name: column.name().to_string(),
        kind: column.kind(),
        count,
        missing,
        unique: None,
        mean: None,
        std: None,
        min: None,
        max: None,
        median: None,
    };

    match column.data() {
        ColumnData::Numeric(values) => {
            let profile = NumericProfile::from_values(values);
            stats.mean = profile.mean;
            stats.std = profile.std;
            stats.min = profile.min;
            stats.max = profile.max;
            stats.median = profile.median;
        }
        ColumnData::Categorical(values) => {
            let distinct: HashSet<&str> = values.iter().flatten().map(String::as_str).collect();
            stats.unique = Some(distinct.len());
        }
    }

    stats
}
