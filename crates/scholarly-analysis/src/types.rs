use crate::dataset::ColumnKind;
use crate::rigor::RigorWarning;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four analyses the engine can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisKind {
    Descriptive,
    Anomaly,
    Correlation,
    Theme,
}

impl AnalysisKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Descriptive => "descriptive",
            Self::Anomaly => "anomaly",
            Self::Correlation => "correlation",
            Self::Theme => "theme",
        }
    }

    /// Whether the analysis consumes free text instead of a table.
    pub fn is_textual(&self) -> bool {
        matches!(self, Self::Theme)
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of every analyzer.
///
/// Constructed once per invocation and never mutated afterwards. Warnings
/// annotate the result; they never change the numbers in `details`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(rename = "type")]
    pub kind: AnalysisKind,
    pub summary: String,
    pub details: AnalysisDetails,
    pub rigor_warnings: Vec<RigorWarning>,
}

impl AnalysisResult {
    pub fn new(
        kind: AnalysisKind,
        summary: impl Into<String>,
        details: AnalysisDetails,
        rigor_warnings: Vec<RigorWarning>,
    ) -> Self {
        Self {
            kind,
            summary: summary.into(),
            details,
            rigor_warnings,
        }
    }

    pub fn has_warnings(&self) -> bool {
        !self.rigor_warnings.is_empty()
    }
}

/// Type-specific payload of an [`AnalysisResult`].
///
/// Serialized untagged so each variant appears as a plain mapping of named
/// sub-results; the result's `type` field already names the analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisDetails {
    Descriptive(DescriptiveDetails),
    /// Descriptive analysis found no numeric columns.
    NoNumericData { categorical_columns: Vec<String> },
    Anomaly(AnomalyDetails),
    Correlation(CorrelationDetails),
    Theme(ThemeDetails),
    /// Not enough data for the analysis.
    Empty {},
}

// ============================================================================
// Descriptive
// ============================================================================

/// Per-column overview. Numeric fields are present only for numeric columns
/// with at least one value; `unique` only for categorical columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableStats {
    pub name: String,
    pub kind: ColumnKind,
    pub count: usize,
    pub missing: usize,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub unique: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub mean: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub std: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub median: Option<f64>,
}

/// One row of the five-number-summary table for a numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescribeRow {
    pub variable: String,
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    #[serde(rename = "25%")]
    pub q1: Option<f64>,
    #[serde(rename = "50%")]
    pub median: Option<f64>,
    #[serde(rename = "75%")]
    pub q3: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveDetails {
    pub statistics: Vec<DescribeRow>,
    pub variables: Vec<VariableStats>,
    pub sample_size: usize,
}

// ============================================================================
// Anomaly
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyRecord {
    pub variable: String,
    pub outlier_count: usize,
    /// Share of the column's non-missing values, 0 - 100.
    pub outlier_percentage: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyDetails {
    pub anomalies: Vec<AnomalyRecord>,
    pub variables_checked: usize,
}

// ============================================================================
// Correlation
// ============================================================================

/// Square coefficient matrix. Undefined cells are `None` (`null` in JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    /// Coefficient for a pair of labels, `None` if undefined or unknown.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.labels.iter().position(|l| l == a)?;
        let j = self.labels.iter().position(|l| l == b)?;
        self.values.get(i)?.get(j).copied().flatten()
    }

    pub fn size(&self) -> usize {
        self.labels.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationPair {
    pub var1: String,
    pub var2: String,
    pub correlation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationDetails {
    pub correlation_matrix: CorrelationMatrix,
    pub strong_correlations: Vec<CorrelationPair>,
}

// ============================================================================
// Theme
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeRecord {
    pub theme: String,
    pub frequency: usize,
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordFrequency {
    pub word: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeDetails {
    pub themes: Vec<ThemeRecord>,
    pub common_words: Vec<WordFrequency>,
    pub segment_count: usize,
}

// ============================================================================
// Dataset summary
// ============================================================================

/// Overview of a whole dataset: shape plus one [`VariableStats`] per column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub rows: usize,
    pub columns: usize,
    pub variables: Vec<VariableStats>,
}

static_assertions::assert_impl_all!(AnalysisResult: Send, Sync);
static_assertions::assert_impl_all!(DatasetSummary: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rigor::{Severity, WarningCategory};
    use serde_json::json;

    #[test]
    fn test_analysis_kind_display() {
        assert_eq!(AnalysisKind::Correlation.to_string(), "correlation");
        assert!(AnalysisKind::Theme.is_textual());
        assert!(!AnalysisKind::Anomaly.is_textual());
    }

    #[test]
    fn test_matrix_get_ragged_rows() {
        let matrix: CorrelationMatrix = serde_json::from_value(json!({
            "labels": ["a", "b"],
            "values": [[1.0, 0.8], [0.8]]
        }))
        .unwrap();
        assert_eq!(matrix.get("a", "b"), Some(0.8));
        assert_eq!(matrix.get("b", "b"), None);
        assert_eq!(matrix.get("a", "missing"), None);
    }

    #[test]
    fn test_result_serialization_shape() {
        let result = AnalysisResult::new(
            AnalysisKind::Anomaly,
            "Found potential outliers in 1 of 1 numeric variables.",
            AnalysisDetails::Anomaly(AnomalyDetails {
                anomalies: vec![AnomalyRecord {
                    variable: "x".to_string(),
                    outlier_count: 1,
                    outlier_percentage: 10.0,
                    lower_bound: -3.5,
                    upper_bound: 14.5,
                }],
                variables_checked: 1,
            }),
            vec![RigorWarning {
                category: WarningCategory::MultipleTesting,
                message: "Checking 6 variables".to_string(),
                severity: Severity::Medium,
            }],
        );

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["type"], json!("anomaly"));
        assert_eq!(value["details"]["variables_checked"], json!(1));
        assert_eq!(value["details"]["anomalies"][0]["upper_bound"], json!(14.5));
        assert_eq!(value["rigor_warnings"][0]["type"], json!("multiple_testing"));
        assert_eq!(value["rigor_warnings"][0]["severity"], json!("medium"));
    }

    #[test]
    fn test_empty_details_serialize_as_empty_map() {
        let value = serde_json::to_value(AnalysisDetails::Empty {}).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn test_variable_stats_omits_absent_fields() {
        let stats = VariableStats {
            name: "team".to_string(),
            kind: ColumnKind::Categorical,
            count: 3,
            missing: 0,
            unique: Some(2),
            mean: None,
            std: None,
            min: None,
            max: None,
            median: None,
        };
        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["unique"], json!(2));
        assert!(value.get("mean").is_none());
        assert_eq!(value["kind"], json!("categorical"));
    }

    #[test]
    fn test_describe_row_uses_percentile_keys() {
        let row = DescribeRow {
            variable: "x".to_string(),
            count: 2,
            mean: Some(1.5),
            std: None,
            min: Some(1.0),
            q1: Some(1.25),
            median: Some(1.5),
            q3: Some(1.75),
            max: Some(2.0),
        };
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["25%"], json!(1.25));
        assert_eq!(value["50%"], json!(1.5));
        assert_eq!(value["75%"], json!(1.75));
        assert_eq!(value["std"], json!(null));
    }

    #[test]
    fn test_matrix_lookup() {
        let matrix = CorrelationMatrix {
            labels: vec!["a".to_string(), "b".to_string()],
            values: vec![vec![Some(1.0), Some(0.8)], vec![Some(0.8), None]],
        };
        assert_eq!(matrix.get("a", "b"), Some(0.8));
        assert_eq!(matrix.get("b", "b"), None);
        assert_eq!(matrix.get("a", "zzz"), None);
        assert_eq!(matrix.size(), 2);
    }
}
