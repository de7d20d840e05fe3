//! The two-phase feasibility pipeline.
//!
//! 1. Evaluate the structural rules
//! 2. Estimate costing (independent of step 1)
//! 3. Append the margin finding derived from costing
//! 4. Score the combined findings

use tracing::debug;

use crate::error::ThreadLogicError;
use crate::fabric::Fabric;
use crate::techpack::TechPack;

use super::costing::estimate_with;
use super::engine::RuleEvaluator;
use super::rules::FeasibilityConfig;
use super::scoring::score;
use super::types::ValidationOutcome;

/// Run the full pipeline for a bound tech pack / fabric pair.
pub fn validate(
    tech_pack: &TechPack,
    fabric: &Fabric,
    config: &FeasibilityConfig,
) -> ValidationOutcome {
    let evaluator = RuleEvaluator::new(config.thresholds.clone());

    let mut results = evaluator.evaluate(tech_pack, fabric);
    let costing = estimate_with(fabric, &config.costs, &config.consumption);
    if let Some(margin_finding) = evaluator.margin_rule(&costing) {
        results.push(margin_finding);
    }
    let readiness = score(&results);

    debug!(
        "Validated {} against {}: {} findings, margin {:.2}%, score {} ({})",
        tech_pack.style_code,
        fabric.fabric_id,
        results.len(),
        costing.margin_percent,
        readiness.score,
        readiness.status
    );

    ValidationOutcome {
        results,
        costing,
        readiness,
    }
}

/// Run the pipeline only when both inputs are present.
///
/// # Errors
/// `InputsNotReady` naming whichever input is missing. No partial result is
/// computed in that case.
pub fn validate_pair(
    tech_pack: Option<&TechPack>,
    fabric: Option<&Fabric>,
    config: &FeasibilityConfig,
) -> Result<ValidationOutcome, ThreadLogicError> {
    match (tech_pack, fabric) {
        (Some(tp), Some(f)) => Ok(validate(tp, f, config)),
        (None, None) => Err(ThreadLogicError::InputsNotReady(
            "tech pack and fabric".to_string(),
        )),
        (None, Some(_)) => Err(ThreadLogicError::InputsNotReady("tech pack".to_string())),
        (Some(_), None) => Err(ThreadLogicError::InputsNotReady("fabric".to_string())),
    }
}
