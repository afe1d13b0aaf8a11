//! Methodological rigor warnings.
//!
//! Every analyzer reports caveats through the same record type and the same
//! policy function, [`evaluate`]. Thresholds come from
//! [`RigorThresholds`](crate::config::RigorThresholds); message templates
//! live in one place in `policy.rs`.

mod policy;

use serde::{Deserialize, Serialize};

pub use policy::{RigorCheck, evaluate};
pub(crate) use policy::pair_count;

/// Closed set of warning categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningCategory {
    SampleSize,
    MissingData,
    MultipleTesting,
    Methodology,
}

/// How strongly a condition should discount the result.
///
/// Ordered `Low < Medium < High`. Used by callers for display only, never
/// for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// An advisory annotation attached to an analysis result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RigorWarning {
    #[serde(rename = "type")]
    pub category: WarningCategory,
    pub message: String,
    pub severity: Severity,
}
