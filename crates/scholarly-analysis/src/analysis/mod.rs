//! Analysis module.
//!
//! Contains the four analyzers and [`AnalysisEngine`], which bounds the
//! input and dispatches to them.

mod anomaly;
mod correlation;
mod descriptive;
pub mod theme;

pub use anomaly::{AnomalyDetector, IqrFences};
pub use correlation::{CorrelationAnalyzer, pearson};
pub use descriptive::DescriptiveAnalyzer;
pub use theme::ThemeExtractor;

use crate::config::AnalysisConfig;
use crate::dataset::Dataset;
use crate::error::{AnalysisError, Result};
use crate::profiler::DatasetProfiler;
use crate::types::{AnalysisKind, AnalysisResult, DatasetSummary};
use tracing::{debug, info};

/// Entry point for running analyses under one configuration.
///
/// Every call is an independent synchronous computation; the engine holds
/// no state besides its configuration.
#[derive(Debug, Clone, Default)]
pub struct AnalysisEngine {
    config: AnalysisConfig,
}

static_assertions::assert_impl_all!(AnalysisEngine: Send, Sync);
static_assertions::assert_impl_all!(Dataset: Send, Sync);

impl AnalysisEngine {
    /// Create an engine, validating the configuration first.
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| AnalysisError::InvalidConfig(e.to_string()))?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Per-variable overview of the dataset.
    pub fn summarize(&self, dataset: &Dataset) -> Result<DatasetSummary> {
        self.check_dataset(dataset)?;
        Ok(DatasetProfiler::summarize(dataset))
    }

    /// Dispatch a tabular analysis by kind.
    ///
    /// [`AnalysisKind::Theme`] needs text and fails with
    /// [`AnalysisError::UnsupportedInput`].
    pub fn run_tabular(&self, kind: AnalysisKind, dataset: &Dataset) -> Result<AnalysisResult> {
        self.check_dataset(dataset)?;
        info!(
            "Running {} analysis on {} rows x {} columns",
            kind,
            dataset.row_count(),
            dataset.column_count()
        );

        let result = match kind {
            AnalysisKind::Descriptive => DescriptiveAnalyzer::analyze(dataset, &self.config),
            AnalysisKind::Anomaly => AnomalyDetector::analyze(dataset, &self.config),
            AnalysisKind::Correlation => CorrelationAnalyzer::analyze(dataset, &self.config),
            AnalysisKind::Theme => {
                return Err(AnalysisError::UnsupportedInput(kind.as_str().to_string()));
            }
        };

        Self::log_result(&result);
        Ok(result)
    }

    pub fn describe(&self, dataset: &Dataset) -> Result<AnalysisResult> {
        self.run_tabular(AnalysisKind::Descriptive, dataset)
    }

    pub fn detect_anomalies(&self, dataset: &Dataset) -> Result<AnalysisResult> {
        self.run_tabular(AnalysisKind::Anomaly, dataset)
    }

    pub fn correlate(&self, dataset: &Dataset) -> Result<AnalysisResult> {
        self.run_tabular(AnalysisKind::Correlation, dataset)
    }

    /// Theme extraction over decoded text.
    pub fn extract_themes(&self, text: &str) -> Result<AnalysisResult> {
        self.check_text(text.len())?;
        info!("Running theme analysis on {} bytes of text", text.len());
        let result = ThemeExtractor::analyze(text, &self.config);
        Self::log_result(&result);
        Ok(result)
    }

    /// Theme extraction over raw bytes, which must be valid UTF-8.
    pub fn extract_themes_from_bytes(&self, bytes: &[u8]) -> Result<AnalysisResult> {
        self.check_text(bytes.len())?;
        info!("Running theme analysis on {} bytes of input", bytes.len());
        let result = ThemeExtractor::analyze_bytes(bytes, &self.config)?;
        Self::log_result(&result);
        Ok(result)
    }

    fn check_dataset(&self, dataset: &Dataset) -> Result<()> {
        let cells = dataset.cell_count();
        if cells > self.config.max_cells {
            return Err(AnalysisError::InputTooLarge {
                size: cells,
                limit: self.config.max_cells,
                unit: "cells",
            });
        }
        Ok(())
    }

    fn check_text(&self, len: usize) -> Result<()> {
        if len > self.config.max_text_bytes {
            return Err(AnalysisError::InputTooLarge {
                size: len,
                limit: self.config.max_text_bytes,
                unit: "bytes",
            });
        }
        Ok(())
    }

    fn log_result(result: &AnalysisResult) {
        debug!("{}", result.summary);
        if result.has_warnings() {
            info!(
                "{} analysis produced {} rigor warning(s)",
                result.kind,
                result.rigor_warnings.len()
            );
        }
    }
}
