//! Type definitions for the feasibility checker.
//!
//! These types are produced fresh on every evaluation and serialize with
//! the same keys and enum labels the report consumers expect
//! (`ruleId`, `"CRITICAL"`, `"PRODUCTION READY"`, ...).

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// FINDINGS
// =============================================================================

/// How serious a rule finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Blocks production; counted as a failure
    Critical,
    /// Needs attention; counted as a warning
    Risk,
    /// Informational pass
    Safe,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "CRITICAL",
            Severity::Risk => "RISK",
            Severity::Safe => "SAFE",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rule finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleResult {
    /// Stable rule code (e.g., "FB-007")
    pub rule_id: String,
    pub severity: Severity,
    /// Grouping label (e.g., "Durability", "Commercial")
    pub category: String,
    /// Human-readable message with the live values interpolated
    pub message: String,
}

impl RuleResult {
    pub fn new(rule_id: &str, severity: Severity, category: &str, message: String) -> Self {
        Self {
            rule_id: rule_id.to_string(),
            severity,
            category: category.to_string(),
            message,
        }
    }
}

// =============================================================================
// COSTING
// =============================================================================

/// Per-piece cost breakdown and margin against the buyer price.
///
/// Values are unrounded; rounding is left to whoever displays them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Costing {
    pub fabric_cost: f64,
    pub trim_cost: f64,
    pub cm_cost: f64,
    pub washing_cost: f64,
    pub overhead_cost: f64,
    pub total_cost_per_piece: f64,
    pub buyer_price: f64,
    /// Percentage, negative when the piece costs more than the buyer pays
    pub margin_percent: f64,
}

// =============================================================================
// READINESS
// =============================================================================

/// Verdict bands for the readiness score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReadinessStatus {
    #[serde(rename = "PRODUCTION READY")]
    ProductionReady,
    #[serde(rename = "SAMPLE WITH CAUTION")]
    SampleWithCaution,
    #[serde(rename = "REJECTED")]
    Rejected,
}

impl ReadinessStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadinessStatus::ProductionReady => "PRODUCTION READY",
            ReadinessStatus::SampleWithCaution => "SAMPLE WITH CAUTION",
            ReadinessStatus::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for ReadinessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate production-readiness verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessReport {
    /// Starts at 100; not clamped, so it can go negative
    pub score: i32,
    pub status: ReadinessStatus,
    /// Number of CRITICAL findings
    pub fail_count: u32,
    /// Number of RISK findings
    pub warning_count: u32,
}

/// Everything the pipeline produces for one tech pack / fabric pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    /// Structural findings in check order, followed by the margin finding
    pub results: Vec<RuleResult>,
    pub costing: Costing,
    pub readiness: ReadinessReport,
}

impl ValidationOutcome {
    /// Findings of one severity, in check order.
    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &RuleResult> {
        self.results.iter().filter(move |r| r.severity == severity)
    }

    /// Whether a rule fired in this evaluation.
    pub fn has_rule(&self, rule_id: &str) -> bool {
        self.results.iter().any(|r| r.rule_id == rule_id)
    }
}
