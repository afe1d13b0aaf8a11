//! Configuration types for the analysis engine.
//!
//! Every threshold that decides whether a rigor warning fires, and every
//! constant the analyzers use (IQR multiplier, strong-correlation cut-off,
//! example caps), lives here so callers can tune them through the builder.

use serde::{Deserialize, Serialize};

/// Thresholds that trigger methodological rigor warnings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigorThresholds {
    /// Datasets with fewer rows than this get a `sample_size` warning.
    /// Default: 30
    pub min_sample_size: usize,

    /// Numeric columns whose missing percentage exceeds this (0 - 100)
    /// get a `missing_data` warning.
    /// Default: 20.0
    pub max_missing_percentage: f64,

    /// Checking more numeric variables than this for outliers triggers a
    /// `multiple_testing` warning.
    /// Default: 5
    pub max_variables_checked: usize,

    /// Testing more correlation pairs than this triggers a
    /// `multiple_testing` warning.
    /// Default: 10
    pub max_correlation_tests: usize,

    /// Texts with fewer segments than this get a `sample_size` warning.
    /// Default: 5
    pub min_text_segments: usize,
}

impl Default for RigorThresholds {
    fn default() -> Self {
        Self {
            min_sample_size: 30,
            max_missing_percentage: 20.0,
            max_variables_checked: 5,
            max_correlation_tests: 10,
            min_text_segments: 5,
        }
    }
}

/// Configuration for the analysis engine.
///
/// Use [`AnalysisConfig::builder()`] to create a validated configuration.
///
/// # Example
///
/// ```rust,ignore
/// use scholarly_analysis::config::AnalysisConfig;
///
/// let config = AnalysisConfig::builder()
///     .min_sample_size(50)
///     .strong_correlation_threshold(0.6)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Rigor warning thresholds.
    pub rigor: RigorThresholds,

    /// Minimum non-missing values a column needs before outlier detection.
    /// Default: 10
    pub min_anomaly_observations: usize,

    /// Multiplier applied to the IQR to build outlier fences.
    /// Default: 1.5
    pub iqr_multiplier: f64,

    /// Absolute coefficient a correlation must exceed to be reported as strong.
    /// Default: 0.5
    pub strong_correlation_threshold: f64,

    /// Maximum distinct example matches kept per theme.
    /// Default: 5
    pub max_theme_examples: usize,

    /// Number of most frequent words reported by the theme extractor.
    /// Default: 20
    pub top_word_count: usize,

    /// Upper bound on rows x columns for tabular input.
    /// Default: 50,000,000
    pub max_cells: usize,

    /// Upper bound on text input length in bytes.
    /// Default: 10 MiB
    pub max_text_bytes: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            rigor: RigorThresholds::default(),
            min_anomaly_observations: 10,
            iqr_multiplier: 1.5,
            strong_correlation_threshold: 0.5,
            max_theme_examples: 5,
            top_word_count: 20,
            max_cells: 50_000_000,
            max_text_bytes: 10 * 1024 * 1024,
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !(0.0..=100.0).contains(&self.rigor.max_missing_percentage) {
            return Err(ConfigValidationError::InvalidPercentage {
                field: "max_missing_percentage".to_string(),
                value: self.rigor.max_missing_percentage,
            });
        }

        if !(0.0..=1.0).contains(&self.strong_correlation_threshold) {
            return Err(ConfigValidationError::InvalidCorrelationThreshold(
                self.strong_correlation_threshold,
            ));
        }

        if !self.iqr_multiplier.is_finite() || self.iqr_multiplier < 0.0 {
            return Err(ConfigValidationError::InvalidIqrMultiplier(
                self.iqr_multiplier,
            ));
        }

        // Quartiles need at least two points to interpolate between.
        if self.min_anomaly_observations < 2 {
            return Err(ConfigValidationError::InvalidMinimum {
                field: "min_anomaly_observations".to_string(),
                value: self.min_anomaly_observations,
                minimum: 2,
            });
        }

        for (field, value) in [
            ("max_cells", self.max_cells),
            ("max_text_bytes", self.max_text_bytes),
        ] {
            if value == 0 {
                return Err(ConfigValidationError::InvalidMinimum {
                    field: field.to_string(),
                    value,
                    minimum: 1,
                });
            }
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid percentage for '{field}': {value} (must be between 0 and 100)")]
    InvalidPercentage { field: String, value: f64 },

    #[error("Invalid strong correlation threshold: {0} (must be between 0.0 and 1.0)")]
    InvalidCorrelationThreshold(f64),

    #[error("Invalid IQR multiplier: {0} (must be a non-negative number)")]
    InvalidIqrMultiplier(f64),

    #[error("Invalid value for '{field}': {value} (must be at least {minimum})")]
    InvalidMinimum {
        field: String,
        value: usize,
        minimum: usize,
    },
}

/// Builder for [`AnalysisConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    rigor: RigorThresholds,
    min_anomaly_observations: Option<usize>,
    iqr_multiplier: Option<f64>,
    strong_correlation_threshold: Option<f64>,
    max_theme_examples: Option<usize>,
    top_word_count: Option<usize>,
    max_cells: Option<usize>,
    max_text_bytes: Option<usize>,
}

impl AnalysisConfigBuilder {
    /// Set the row count below which a `sample_size` warning fires.
    pub fn min_sample_size(mut self, rows: usize) -> Self {
        self.rigor.min_sample_size = rows;
        self
    }

    /// Set the missing percentage (0 - 100) above which a column is flagged.
    pub fn max_missing_percentage(mut self, percentage: f64) -> Self {
        self.rigor.max_missing_percentage = percentage;
        self
    }

    /// Set how many variables may be checked for outliers before warning.
    pub fn max_variables_checked(mut self, count: usize) -> Self {
        self.rigor.max_variables_checked = count;
        self
    }

    /// Set how many correlation pairs may be tested before warning.
    pub fn max_correlation_tests(mut self, count: usize) -> Self {
        self.rigor.max_correlation_tests = count;
        self
    }

    /// Set the segment count below which text is considered thin.
    pub fn min_text_segments(mut self, count: usize) -> Self {
        self.rigor.min_text_segments = count;
        self
    }

    /// Set the minimum usable values for outlier detection.
    pub fn min_anomaly_observations(mut self, count: usize) -> Self {
        self.min_anomaly_observations = Some(count);
        self
    }

    /// Set the IQR fence multiplier.
    pub fn iqr_multiplier(mut self, multiplier: f64) -> Self {
        self.iqr_multiplier = Some(multiplier);
        self
    }

    /// Set the absolute coefficient above which a correlation is strong.
    pub fn strong_correlation_threshold(mut self, threshold: f64) -> Self {
        self.strong_correlation_threshold = Some(threshold);
        self
    }

    /// Set the cap on example matches per theme.
    pub fn max_theme_examples(mut self, count: usize) -> Self {
        self.max_theme_examples = Some(count);
        self
    }

    /// Set the number of frequent words to report.
    pub fn top_word_count(mut self, count: usize) -> Self {
        self.top_word_count = Some(count);
        self
    }

    /// Set the rows x columns bound for tabular input.
    pub fn max_cells(mut self, cells: usize) -> Self {
        self.max_cells = Some(cells);
        self
    }

    /// Set the byte bound for text input.
    pub fn max_text_bytes(mut self, bytes: usize) -> Self {
        self.max_text_bytes = Some(bytes);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `AnalysisConfig` or an error if validation fails.
    pub fn build(self) -> Result<AnalysisConfig, ConfigValidationError> {
        let defaults = AnalysisConfig::default();
        let config = AnalysisConfig {
            rigor: self.rigor,
            min_anomaly_observations: self
                .min_anomaly_observations
                .unwrap_or(defaults.min_anomaly_observations),
            iqr_multiplier: self.iqr_multiplier.unwrap_or(defaults.iqr_multiplier),
            strong_correlation_threshold: self
                .strong_correlation_threshold
                .unwrap_or(defaults.strong_correlation_threshold),
            max_theme_examples: self
                .max_theme_examples
                .unwrap_or(defaults.max_theme_examples),
            top_word_count: self.top_word_count.unwrap_or(defaults.top_word_count),
            max_cells: self.max_cells.unwrap_or(defaults.max_cells),
            max_text_bytes: self.max_text_bytes.unwrap_or(defaults.max_text_bytes),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(config.rigor.min_sample_size, 30);
        assert_eq!(config.rigor.max_missing_percentage, 20.0);
        assert_eq!(config.rigor.max_variables_checked, 5);
        assert_eq!(config.rigor.max_correlation_tests, 10);
        assert_eq!(config.rigor.min_text_segments, 5);
        assert_eq!(config.min_anomaly_observations, 10);
        assert_eq!(config.iqr_multiplier, 1.5);
        assert_eq!(config.strong_correlation_threshold, 0.5);
        assert_eq!(config.max_theme_examples, 5);
        assert_eq!(config.top_word_count, 20);
    }

    #[test]
    fn test_builder_defaults_match_default() {
        let config = AnalysisConfig::builder().build().unwrap();
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn test_builder_custom_values() {
        let config = AnalysisConfig::builder()
            .min_sample_size(50)
            .max_missing_percentage(10.0)
            .max_correlation_tests(3)
            .strong_correlation_threshold(0.7)
            .top_word_count(5)
            .build()
            .unwrap();

        assert_eq!(config.rigor.min_sample_size, 50);
        assert_eq!(config.rigor.max_missing_percentage, 10.0);
        assert_eq!(config.rigor.max_correlation_tests, 3);
        assert_eq!(config.strong_correlation_threshold, 0.7);
        assert_eq!(config.top_word_count, 5);
    }

    #[test]
    fn test_validation_invalid_percentage() {
        let result = AnalysisConfig::builder().max_missing_percentage(120.0).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidPercentage { .. }
        ));
    }

    #[test]
    fn test_validation_invalid_correlation_threshold() {
        let result = AnalysisConfig::builder()
            .strong_correlation_threshold(1.5)
            .build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidCorrelationThreshold(_)
        ));
    }

    #[test]
    fn test_validation_min_anomaly_observations() {
        let result = AnalysisConfig::builder().min_anomaly_observations(1).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidMinimum { minimum: 2, .. }
        ));
    }

    #[test]
    fn test_validation_negative_iqr_multiplier() {
        let result = AnalysisConfig::builder().iqr_multiplier(-1.0).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidIqrMultiplier(_)
        ));
    }

    #[test]
    fn test_config_from_partial_json() {
        // Missing fields fall back to defaults
        let json = r#"{
            "rigor": { "min_sample_size": 100 },
            "strong_correlation_threshold": 0.8
        }"#;

        let config: AnalysisConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.rigor.min_sample_size, 100);
        assert_eq!(config.rigor.max_correlation_tests, 10);
        assert_eq!(config.strong_correlation_threshold, 0.8);
        assert_eq!(config.iqr_multiplier, 1.5);
        assert!(config.validate().is_ok());
    }
}
