//! Hand-off checks for tech packs coming out of ingestion.
//!
//! The checker assumes a fully populated tech pack. Anything that fails
//! these checks is rejected before it can reach rule evaluation.

use crate::error::ThreadLogicError;

use super::types::TechPack;

/// Collect every hand-off problem in the tech pack.
/// An empty list means the tech pack is safe to evaluate.
pub fn tech_pack_problems(tech_pack: &TechPack) -> Vec<String> {
    let mut problems = Vec::new();

    if tech_pack.tech_pack_id.trim().is_empty() {
        problems.push("tech pack id is empty".to_string());
    }

    if tech_pack.garment_type.trim().is_empty() {
        problems.push("garment type is empty".to_string());
    }

    if tech_pack.construction.spi == 0 {
        problems.push("spi must be greater than 0".to_string());
    }

    for m in &tech_pack.measurements {
        if !m.tolerance_cm.is_finite() || m.tolerance_cm < 0.0 {
            problems.push(format!(
                "tolerance for '{}' must be a finite value >= 0 (got {})",
                m.point, m.tolerance_cm
            ));
        }
    }

    problems
}

/// Validate a tech pack before it is bound to the workflow.
///
/// # Errors
/// `InvalidTechPack` listing every problem found.
pub fn validate_tech_pack(tech_pack: &TechPack) -> Result<(), ThreadLogicError> {
    let problems = tech_pack_problems(tech_pack);
    if problems.is_empty() {
        Ok(())
    } else {
        Err(ThreadLogicError::InvalidTechPack(problems))
    }
}
