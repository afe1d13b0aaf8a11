//! IQR-based outlier detection.

use crate::config::AnalysisConfig;
use crate::dataset::Dataset;
use crate::rigor::{RigorCheck, evaluate};
use crate::types::{AnalysisDetails, AnalysisKind, AnalysisResult, AnomalyDetails, AnomalyRecord};
use crate::utils::{percentage, present_values, quantile_sorted, sorted};
use tracing::debug;

/// Tukey fences around the interquartile range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IqrFences {
    pub q1: f64,
    pub q3: f64,
    pub lower: f64,
    pub upper: f64,
}

impl IqrFences {
    /// Build fences from ascending values, `None` for an empty slice.
    pub fn from_sorted(values: &[f64], multiplier: f64) -> Option<Self> {
        let q1 = quantile_sorted(values, 0.25)?;
        let q3 = quantile_sorted(values, 0.75)?;
        let iqr = q3 - q1;
        Some(Self {
            q1,
            q3,
            lower: q1 - multiplier * iqr,
            upper: q3 + multiplier * iqr,
        })
    }

    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Values exactly on a fence are not outliers.
    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower || value > self.upper
    }
}

/// Flags numeric values outside the IQR fences, column by column.
pub struct AnomalyDetector;

impl AnomalyDetector {
    /// Run outlier detection over every numeric column.
    pub fn analyze(dataset: &Dataset, config: &AnalysisConfig) -> AnalysisResult {
        let mut anomalies = Vec::new();
        let mut variables_checked = 0;

        for (name, values) in dataset.numeric_columns() {
            variables_checked += 1;
            if let Some(record) = Self::detect_column(name, values, config) {
                anomalies.push(record);
            }
        }

        let warnings: Vec<_> = evaluate(
            RigorCheck::VariablesChecked {
                variables: variables_checked,
            },
            &config.rigor,
        )
        .into_iter()
        .collect();

        let summary = if anomalies.is_empty() {
            "No statistical outliers detected. Data appears consistent with normal patterns."
                .to_string()
        } else {
            format!(
                "Found potential outliers in {} of {} numeric variables.",
                anomalies.len(),
                variables_checked
            )
        };

        debug!(
            "Checked {} numeric columns, {} with outliers",
            variables_checked,
            anomalies.len()
        );

        AnalysisResult::new(
            AnalysisKind::Anomaly,
            summary,
            AnalysisDetails::Anomaly(AnomalyDetails {
                anomalies,
                variables_checked,
            }),
            warnings,
        )
    }

    /// Detect outliers in one column.
    ///
    /// Returns `None` when the column has too few values to be eligible or
    /// when no value falls outside the fences.
    pub fn detect_column(
        name: &str,
        values: &[Option<f64>],
        config: &AnalysisConfig,
    ) -> Option<AnomalyRecord> {
        let present = sorted(present_values(values));
        if present.len() < config.min_anomaly_observations {
            debug!(
                "Skipping '{}': {} values (need {})",
                name,
                present.len(),
                config.min_anomaly_observations
            );
            return None;
        }

        let fences = IqrFences::from_sorted(&present, config.iqr_multiplier)?;
        let outlier_count = present.iter().filter(|v| fences.is_outlier(**v)).count();
        if outlier_count == 0 {
            return None;
        }

        Some(AnomalyRecord {
            variable: name.to_string(),
            outlier_count,
            outlier_percentage: percentage(outlier_count, present.len()),
            lower_bound: fences.lower,
            upper_bound: fences.upper,
        })
    }
}
