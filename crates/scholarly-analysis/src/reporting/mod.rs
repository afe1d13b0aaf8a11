//! Report generation module.
//!
//! Wraps analysis output with run metadata for the CLI's `--json` and
//! `--emit-report` outputs.
//!
//! # Example
//!
//! ```rust,ignore
//! use scholarly_analysis::reporting::{AnalysisReport, ReportWriter};
//!
//! let report = AnalysisReport::new("survey.csv", elapsed, result);
//!
//! // Print as JSON
//! println!("{}", serde_json::to_string_pretty(&report)?);
//!
//! // Or write to outputs/survey_descriptive_report.json
//! ReportWriter::new("outputs").write_report_to_file(&report, "survey")?;
//! ```

mod report;

pub use report::{AnalysisReport, ReportBody, ReportWriter};
