//! Threshold policy and message templates for rigor warnings.

use super::{RigorWarning, Severity, WarningCategory};
use crate::config::RigorThresholds;

/// A condition an analyzer asks the policy about, carrying the quantity
/// that may trigger a warning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RigorCheck<'a> {
    /// Number of observations (rows) in a tabular dataset.
    SampleSize { observations: usize },
    /// Missing percentage (0 - 100) of one numeric column.
    MissingData {
        column: &'a str,
        missing_percentage: f64,
    },
    /// Number of numeric variables screened for outliers.
    VariablesChecked { variables: usize },
    /// Number of distinct correlation pairs tested.
    CorrelationTests { tests: usize },
    /// Number of non-empty text segments.
    TextSegments { segments: usize },
    /// Themes come from pattern matching rather than manual coding. Always fires.
    PatternMatching,
}

impl RigorCheck<'_> {
    pub fn category(&self) -> WarningCategory {
        match self {
            Self::SampleSize { .. } | Self::TextSegments { .. } => WarningCategory::SampleSize,
            Self::MissingData { .. } => WarningCategory::MissingData,
            Self::VariablesChecked { .. } | Self::CorrelationTests { .. } => {
                WarningCategory::MultipleTesting
            }
            Self::PatternMatching => WarningCategory::Methodology,
        }
    }
}

/// Decide whether `check` warrants a warning under `thresholds`.
///
/// Pure: the same inputs always produce the same output.
pub fn evaluate(check: RigorCheck<'_>, thresholds: &RigorThresholds) -> Option<RigorWarning> {
    let category = check.category();
    let (message, severity) = match check {
        RigorCheck::SampleSize { observations } if observations < thresholds.min_sample_size => (
            format!(
                "Small sample size (n={}). Results may not be generalizable.",
                observations
            ),
            Severity::High,
        ),
        RigorCheck::MissingData {
            column,
            missing_percentage,
        } if missing_percentage > thresholds.max_missing_percentage => (
            format!(
                "High missing data in '{}' ({:.1}%). Consider implications for analysis.",
                column, missing_percentage
            ),
            Severity::Medium,
        ),
        RigorCheck::VariablesChecked { variables }
            if variables > thresholds.max_variables_checked =>
        {
            (
                format!(
                    "Checking {} variables increases chance of spurious findings. \
                     Consider theory-driven selection.",
                    variables
                ),
                Severity::Medium,
            )
        }
        RigorCheck::CorrelationTests { tests } if tests > thresholds.max_correlation_tests => (
            format!(
                "Testing {} correlations. Some may be significant by chance alone.",
                tests
            ),
            Severity::High,
        ),
        RigorCheck::TextSegments { segments } if segments < thresholds.min_text_segments => (
            format!(
                "Only {} text segments found. Consider whether this represents \
                 adequate data saturation.",
                segments
            ),
            Severity::Medium,
        ),
        RigorCheck::PatternMatching => (
            "Themes extracted using pattern matching. For rigorous analysis, consider \
             manual coding with inter-rater reliability."
                .to_string(),
            Severity::Medium,
        ),
        _ => return None,
    };

    Some(RigorWarning {
        category,
        message,
        severity,
    })
}

/// Number of distinct unordered pairs among `n` items, `n * (n - 1) / 2`.
pub(crate) fn pair_count(n: usize) -> usize {
    n.saturating_mul(n.saturating_sub(1)) / 2
}
