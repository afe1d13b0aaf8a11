//! Scholarly Analysis Library
//!
//! Statistical and qualitative analyses for research datasets, each paired
//! with methodological rigor warnings.
//!
//! # Overview
//!
//! This library provides four analyses over already-parsed input:
//!
//! - **Descriptive**: per-column distribution statistics and a variable overview
//! - **Anomaly**: per-column outlier detection with IQR fences
//! - **Correlation**: pairwise-complete Pearson matrix and strong pairs
//! - **Theme**: dictionary-driven theme matching and word frequency over free text
//!
//! Every [`AnalysisResult`] carries a list of [`RigorWarning`]s flagging
//! small samples, missing data, multiple comparisons or automated coding.
//! Warnings never change the numbers.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use scholarly_analysis::{AnalysisEngine, Dataset};
//! use polars::prelude::*;
//!
//! let df = CsvReadOptions::default()
//!     .try_into_reader_with_file_path(Some("survey.csv".into()))?
//!     .finish()?;
//! let dataset = Dataset::from_dataframe(&df)?;
//!
//! let engine = AnalysisEngine::default();
//! let result = engine.describe(&dataset)?;
//!
//! println!("{}", result.summary);
//! for warning in &result.rigor_warnings {
//!     println!("[{:?}] {}", warning.severity, warning.message);
//! }
//! ```
//!
//! # Configuration
//!
//! Use [`AnalysisConfig`] to adjust thresholds:
//!
//! ```rust,ignore
//! use scholarly_analysis::config::AnalysisConfig;
//!
//! let config = AnalysisConfig::builder()
//!     .min_sample_size(50)                 // Warn below 50 observations
//!     .max_missing_percentage(10.0)        // Warn above 10% missing
//!     .strong_correlation_threshold(0.6)   // Report |r| > 0.6
//!     .build()?;
//!
//! let engine = AnalysisEngine::new(config)?;
//! ```
//!
//! # Text
//!
//! Theme extraction takes text or raw bytes; bytes must be valid UTF-8.
//!
//! ```rust,ignore
//! let result = engine.extract_themes_from_bytes(&std::fs::read("interviews.txt")?)?;
//! ```

pub mod analysis;
pub mod config;
pub mod dataset;
pub mod error;
pub mod profiler;
pub mod reporting;
pub mod rigor;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use analysis::{
    AnalysisEngine, AnomalyDetector, CorrelationAnalyzer, DescriptiveAnalyzer, IqrFences,
    ThemeExtractor, pearson,
};
pub use config::{AnalysisConfig, AnalysisConfigBuilder, ConfigValidationError, RigorThresholds};
pub use dataset::{Column, ColumnData, ColumnKind, Dataset};
pub use error::{AnalysisError, Result as ScholarlyResult, ResultExt};
pub use profiler::DatasetProfiler;
pub use reporting::{AnalysisReport, ReportBody, ReportWriter};
pub use rigor::{RigorCheck, RigorWarning, Severity, WarningCategory, evaluate};
pub use types::{
    AnalysisDetails, AnalysisKind, AnalysisResult, AnomalyDetails, AnomalyRecord,
    CorrelationDetails, CorrelationMatrix, CorrelationPair, DatasetSummary, DescribeRow,
    DescriptiveDetails, ThemeDetails, ThemeRecord, VariableStats, WordFrequency,
};
