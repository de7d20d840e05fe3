//! Readiness scoring.

use super::types::{ReadinessReport, ReadinessStatus, RuleResult, Severity};

pub const STARTING_SCORE: i32 = 100;
pub const CRITICAL_PENALTY: i32 = 25;
pub const RISK_PENALTY: i32 = 10;

/// Lowest score that still counts as production ready.
pub const PRODUCTION_READY_MIN: i32 = 80;
/// Lowest score that still allows sampling.
pub const SAMPLE_MIN: i32 = 50;

impl ReadinessStatus {
    /// Map a score to its band. Each band includes its lower bound.
    pub fn from_score(score: i32) -> Self {
        if score >= PRODUCTION_READY_MIN {
            ReadinessStatus::ProductionReady
        } else if score >= SAMPLE_MIN {
            ReadinessStatus::SampleWithCaution
        } else {
            ReadinessStatus::Rejected
        }
    }
}

/// Aggregate findings into a readiness score and status.
///
/// CRITICAL costs 25 points and counts as a failure, RISK costs 10 and
/// counts as a warning, SAFE is free. The score is not clamped at zero.
pub fn score(results: &[RuleResult]) -> ReadinessReport {
    let mut score = STARTING_SCORE;
    let mut fail_count = 0;
    let mut warning_count = 0;

    for result in results {
        match result.severity {
            Severity::Critical => {
                score -= CRITICAL_PENALTY;
                fail_count += 1;
            }
            Severity::Risk => {
                score -= RISK_PENALTY;
                warning_count += 1;
            }
            Severity::Safe => {}
        }
    }

    ReadinessReport {
        score,
        status: ReadinessStatus::from_score(score),
        fail_count,
        warning_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(severity: Severity) -> RuleResult {
        RuleResult::new("XX-000", severity, "Test", "test finding".to_string())
    }

    #[test]
    fn test_no_findings_is_perfect() {
        let report = score(&[]);
        assert_eq!(report.score, 100);
        assert_eq!(report.status, ReadinessStatus::ProductionReady);
        assert_eq!(report.fail_count, 0);
        assert_eq!(report.warning_count, 0);
    }

    #[test]
    fn test_safe_findings_are_free() {
        let report = score(&[finding(Severity::Safe), finding(Severity::Safe)]);
        assert_eq!(report.score, 100);
        assert_eq!(report.fail_count + report.warning_count, 0);
    }

    #[test]
    fn test_penalties_and_counts() {
        let report = score(&[
            finding(Severity::Critical),
            finding(Severity::Risk),
            finding(Severity::Safe),
            finding(Severity::Risk),
        ]);
        assert_eq!(report.score, 100 - 25 - 10 - 10);
        assert_eq!(report.fail_count, 1);
        assert_eq!(report.warning_count, 2);
        assert_eq!(report.status, ReadinessStatus::SampleWithCaution);
    }

    #[test]
    fn test_band_lower_bounds_are_inclusive() {
        assert_eq!(ReadinessStatus::from_score(80), ReadinessStatus::ProductionReady);
        assert_eq!(ReadinessStatus::from_score(79), ReadinessStatus::SampleWithCaution);
        assert_eq!(ReadinessStatus::from_score(50), ReadinessStatus::SampleWithCaution);
        assert_eq!(ReadinessStatus::from_score(49), ReadinessStatus::Rejected);
    }

    #[test]
    fn test_score_is_not_clamped() {
        let findings: Vec<_> = (0..5).map(|_| finding(Severity::Critical)).collect();
        let report = score(&findings);
        assert_eq!(report.score, -25);
        assert_eq!(report.fail_count, 5);
        assert_eq!(report.status, ReadinessStatus::Rejected);
    }

    #[test]
    fn test_two_risks_land_on_production_boundary() {
        let report = score(&[finding(Severity::Risk), finding(Severity::Risk)]);
        assert_eq!(report.score, 80);
        assert_eq!(report.status, ReadinessStatus::ProductionReady);
    }
}
