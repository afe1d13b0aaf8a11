use crate::error::{Result, ResultExt};
use crate::types::{AnalysisResult, DatasetSummary};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// What a report carries: one analysis result or a dataset overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReportBody {
    Analysis(AnalysisResult),
    Summary(DatasetSummary),
}

impl ReportBody {
    /// Label used in report file names.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Analysis(result) => result.kind.as_str(),
            Self::Summary(_) => "summary",
        }
    }
}

impl From<AnalysisResult> for ReportBody {
    fn from(result: AnalysisResult) -> Self {
        Self::Analysis(result)
    }
}

impl From<DatasetSummary> for ReportBody {
    fn from(summary: DatasetSummary) -> Self {
        Self::Summary(summary)
    }
}

/// A result wrapped with run metadata, as written by `--json` and
/// `--emit-report`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// RFC 3339 timestamp (local time) of report creation
    pub generated_at: String,
    /// Path of the analyzed input
    pub input_file: String,
    /// Wall-clock time spent in the analysis
    pub duration_ms: u64,
    pub result: ReportBody,
}

impl AnalysisReport {
    pub fn new(input_file: impl Into<String>, duration: Duration, result: impl Into<ReportBody>) -> Self {
        Self {
            generated_at: Local::now().to_rfc3339(),
            input_file: input_file.into(),
            duration_ms: duration.as_millis() as u64,
            result: result.into(),
        }
    }

    /// Rigor warning count, zero for dataset summaries.
    pub fn warning_count(&self) -> usize {
        match &self.result {
            ReportBody::Analysis(result) => result.rigor_warnings.len(),
            ReportBody::Summary(_) => 0,
        }
    }
}

/// Writes reports as pretty-printed JSON files.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Write `report` as `{base_name}_{label}_report.json`, creating the
    /// output directory if needed.
    pub fn write_report_to_file(&self, report: &AnalysisReport, base_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)
            .context(format!("Failed to create {}", self.output_dir.display()))?;

        let report_path = self
            .output_dir
            .join(format!("{}_{}_report.json", base_name, report.result.label()));
        let mut file = File::create(&report_path)
            .context(format!("Failed to create {}", report_path.display()))?;
        file.write_all(serde_json::to_string_pretty(report)?.as_bytes())?;

        info!("Report saved: {}", report_path.display());

        Ok(report_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AnalysisDetails, AnalysisKind};

    fn result() -> AnalysisResult {
        AnalysisResult::new(
            AnalysisKind::Correlation,
            "Need at least 2 numeric variables for correlation analysis.",
            AnalysisDetails::Empty {},
            Vec::new(),
        )
    }

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("scholarly-analysis-{}-{}", name, std::process::id()))
    }

    #[test]
    fn test_report_metadata() {
        let report = AnalysisReport::new("data.csv", Duration::from_millis(42), result());
        assert_eq!(report.input_file, "data.csv");
        assert_eq!(report.duration_ms, 42);
        assert_eq!(report.result.label(), "correlation");
        assert!(chrono::DateTime::parse_from_rfc3339(&report.generated_at).is_ok());
        assert_eq!(report.warning_count(), 0);
    }

    #[test]
    fn test_warning_count_follows_result() {
        let themes = crate::analysis::ThemeExtractor::analyze("", &Default::default());
        let report = AnalysisReport::new("notes.txt", Duration::ZERO, themes);
        assert_eq!(report.result.label(), "theme");
        assert_eq!(report.warning_count(), 2);
    }

    #[test]
    fn test_summary_label() {
        let summary = DatasetSummary {
            rows: 0,
            columns: 0,
            variables: Vec::new(),
        };
        let report = AnalysisReport::new("data.csv", Duration::ZERO, summary);
        assert_eq!(report.result.label(), "summary");
    }

    #[test]
    fn test_write_report_to_file() {
        let dir = scratch_dir("write");
        let writer = ReportWriter::new(&dir);
        let report = AnalysisReport::new("survey.csv", Duration::ZERO, result());

        let path = writer.write_report_to_file(&report, "survey").unwrap();
        assert_eq!(path, dir.join("survey_correlation_report.json"));

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["input_file"], "survey.csv");
        assert_eq!(written["result"]["type"], "correlation");
        assert_eq!(written["result"]["details"], serde_json::json!({}));

        fs::remove_dir_all(&dir).unwrap();
    }
}
