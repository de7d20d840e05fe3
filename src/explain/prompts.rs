//! Prompts for finding explanations.

use crate::checker::RuleResult;
use crate::fabric::Fabric;
use crate::techpack::TechPack;

/// System instruction shared by every provider.
pub const SYSTEM_PROMPT: &str = "You are an expert apparel production manager in a garment factory. \
Answer in plain text, no markdown.";

/// Build the explanation prompt for one finding.
///
/// # Arguments
/// * `finding` - The rule finding to explain
/// * `tech_pack` - Garment context (type, gender, construction)
/// * `fabric` - Fabric context (name, GSM, composition)
pub fn build_explanation_prompt(finding: &RuleResult, tech_pack: &TechPack, fabric: &Fabric) -> String {
    format!(
        r#"Context:
- Garment: {garment} ({gender})
- Fabric: {fabric_name} ({gsm} GSM, {composition})
- Construction: {stitch_type}, SPI {spi}

A rule failed validation:
- Rule Message: "{message}"
- Severity: {severity}

Task:
Explain WHY this is a problem in simple factory language and suggest a specific fix.
Keep it under 30 words. Be direct."#,
        garment = tech_pack.garment_type,
        gender = tech_pack.gender,
        fabric_name = fabric.name,
        gsm = fabric.gsm,
        composition = fabric.composition,
        stitch_type = tech_pack.construction.stitch_type,
        spi = tech_pack.construction.spi,
        message = finding.message,
        severity = finding.severity,
    )
}
