//! Descriptive statistics over numeric columns.

use crate::config::AnalysisConfig;
use crate::dataset::Dataset;
use crate::profiler::{NumericProfile, variable_stats};
use crate::rigor::{RigorCheck, evaluate};
use crate::types::{AnalysisDetails, AnalysisKind, AnalysisResult, DescriptiveDetails};
use crate::utils::percentage;
use tracing::debug;

/// Computes the describe table for every numeric column.
pub struct DescriptiveAnalyzer;

impl DescriptiveAnalyzer {
    /// Run descriptive analysis.
    ///
    /// A dataset without numeric columns yields a result listing the
    /// columns that are present, with no warnings.
    pub fn analyze(dataset: &Dataset, config: &AnalysisConfig) -> AnalysisResult {
        let numeric: Vec<(&str, &[Option<f64>])> = dataset.numeric_columns().collect();

        if numeric.is_empty() {
            debug!("No numeric columns among {}", dataset.column_count());
            return AnalysisResult::new(
                AnalysisKind::Descriptive,
                "No numeric variables found for descriptive analysis.",
                AnalysisDetails::NoNumericData {
                    categorical_columns: dataset.column_names(),
                },
                Vec::new(),
            );
        }

        let rows = dataset.row_count();
        let statistics = numeric
            .iter()
            .map(|&(name, values)| NumericProfile::from_values(values).describe_row(name))
            .collect();
        let variables = dataset.columns().iter().map(variable_stats).collect();

        let mut warnings = Vec::new();
        warnings.extend(evaluate(
            RigorCheck::SampleSize { observations: rows },
            &config.rigor,
        ));
        for &(name, values) in &numeric {
            let missing = values.iter().filter(|v| v.is_none()).count();
            warnings.extend(evaluate(
                RigorCheck::MissingData {
                    column: name,
                    missing_percentage: percentage(missing, rows),
                },
                &config.rigor,
            ));
        }

        debug!(
            "Described {} numeric columns, {} warnings",
            numeric.len(),
            warnings.len()
        );

        AnalysisResult::new(
            AnalysisKind::Descriptive,
            format!(
                "Analyzed {} numeric variables across {} observations.",
                numeric.len(),
                rows
            ),
            AnalysisDetails::Descriptive(DescriptiveDetails {
                statistics,
                variables,
                sample_size: rows,
            }),
            warnings,
        )
    }
}
