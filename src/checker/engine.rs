//! Rule evaluation for tech pack / fabric pairs.
//!
//! The `RuleEvaluator` runs a fixed battery of compatibility and safety
//! rules in a fixed order. Each rule is independent and appends at most one
//! finding. The commercial margin rule (CT-004) depends on costing and is
//! applied separately through `margin_rule` once the margin is known.

use tracing::trace;

use crate::fabric::Fabric;
use crate::techpack::{TechPack, TextileStructure};

use super::rules::RuleThresholds;
use super::types::{Costing, RuleResult, Severity};

/// Garment type substring that marks cargo styles (case-sensitive).
const CARGO_MARKER: &str = "Cargo";
/// Garment type substring that marks activewear (case-sensitive).
const ACTIVE_MARKER: &str = "Active";

/// The structural rule evaluator.
///
/// Pure and total: the same inputs always give the same ordered findings,
/// and a rule whose condition does not hold simply produces nothing.
#[derive(Debug, Clone, Default)]
pub struct RuleEvaluator {
    thresholds: RuleThresholds,
}

impl RuleEvaluator {
    /// Create an evaluator with the given thresholds.
    pub fn new(thresholds: RuleThresholds) -> Self {
        Self { thresholds }
    }

    /// Evaluate the structural rules against a tech pack / fabric pair.
    ///
    /// Rules run in this order: FB-007, FB-008, FB-001/FB-002, TP-004,
    /// ST-003, TP-001. The returned findings keep that order.
    pub fn evaluate(&self, tech_pack: &TechPack, fabric: &Fabric) -> Vec<RuleResult> {
        let t = &self.thresholds;
        let mut results = Vec::new();

        // FB-007: cargo pocket areas need heavier fabric
        if tech_pack.garment_type.contains(CARGO_MARKER) && fabric.gsm < t.cargo_min_gsm {
            results.push(RuleResult::new(
                "FB-007",
                Severity::Risk,
                "Durability",
                format!(
                    "Low GSM ({}) for cargo pocket load areas. Recommended: {}+",
                    fabric.gsm, t.cargo_min_gsm
                ),
            ));
        }

        // FB-008: activewear needs stretch
        if tech_pack.garment_type.contains(ACTIVE_MARKER)
            && fabric.stretch_percent < t.active_min_stretch_percent
        {
            results.push(RuleResult::new(
                "FB-008",
                Severity::Critical,
                "Performance",
                format!(
                    "Selected fabric has {}% stretch. Activewear requires minimum {}% stretch.",
                    fabric.stretch_percent, t.active_min_stretch_percent
                ),
            ));
        }

        // FB-001 / FB-002: construction family mismatch, at most one fires
        if let Some(result) = structure_mismatch(tech_pack.category, fabric.fabric_type) {
            results.push(result);
        }

        // TP-004: shrinkage against the widest tolerance; skipped without measurements
        if let Some(max_tolerance) = tech_pack.max_tolerance_cm() {
            if fabric.shrinkage_percent > t.shrinkage_limit_percent
                && max_tolerance < t.tolerance_safety_cm
            {
                results.push(RuleResult::new(
                    "TP-004",
                    Severity::Risk,
                    "Fit",
                    format!(
                        "Fabric shrinkage ({}%) exceeds tolerance safety margin.",
                        fabric.shrinkage_percent
                    ),
                ));
            }
        }

        // ST-003: dense stitching puckers lightweight fabric
        if tech_pack.construction.spi > t.spi_limit && fabric.gsm < t.lightweight_gsm {
            results.push(RuleResult::new(
                "ST-003",
                Severity::Risk,
                "Stitching",
                format!(
                    "High SPI (>{}) on lightweight fabric may cause puckering.",
                    t.spi_limit
                ),
            ));
        }

        // TP-001: measurement table present
        if !tech_pack.measurements.is_empty() {
            results.push(RuleResult::new(
                "TP-001",
                Severity::Safe,
                "Tech Pack",
                "Measurement table present.".to_string(),
            ));
        }

        trace!(
            "Evaluated {} x {}: {} findings",
            tech_pack.style_code,
            fabric.fabric_id,
            results.len()
        );
        results
    }

    /// CT-004: flag a margin below the factory threshold.
    ///
    /// Runs after costing; the finding belongs at the end of the structural
    /// findings, before scoring.
    pub fn margin_rule(&self, costing: &Costing) -> Option<RuleResult> {
        let min_margin = self.thresholds.min_margin_percent;
        if costing.margin_percent < min_margin {
            Some(RuleResult::new(
                "CT-004",
                Severity::Risk,
                "Commercial",
                format!(
                    "Margin ({:.1}%) is below factory threshold of {}%.",
                    round_half_away(costing.margin_percent),
                    min_margin
                ),
            ))
        } else {
            None
        }
    }
}

/// Round to one decimal with ties away from zero, so 0.25 shows as 0.3.
fn round_half_away(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Woven construction on knit fabric (FB-001) or knit pattern on woven
/// fabric (FB-002).
fn structure_mismatch(category: TextileStructure, fabric_type: TextileStructure) -> Option<RuleResult> {
    match (category, fabric_type) {
        (TextileStructure::Woven, TextileStructure::Knit) => Some(RuleResult::new(
            "FB-001",
            Severity::Critical,
            "Compatibility",
            "Woven stitch construction specified for Knit fabric. High risk of seam failure."
                .to_string(),
        )),
        (TextileStructure::Knit, TextileStructure::Woven) => Some(RuleResult::new(
            "FB-002",
            Severity::Critical,
            "Compatibility",
            "Knit pattern requires stretch. Woven fabric selected will cause fit restriction."
                .to_string(),
        )),
        _ => None,
    }
}

/// Evaluate with the default thresholds.
pub fn evaluate(tech_pack: &TechPack, fabric: &Fabric) -> Vec<RuleResult> {
    RuleEvaluator::default().evaluate(tech_pack, fabric)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fabric::find_fabric;
    use crate::techpack::template_tech_pack;

    fn ids(results: &[RuleResult]) -> Vec<&str> {
        results.iter().map(|r| r.rule_id.as_str()).collect()
    }

    fn costing_with_margin(margin_percent: f64) -> Costing {
        Costing {
            fabric_cost: 0.0,
            trim_cost: 0.0,
            cm_cost: 0.0,
            washing_cost: 0.0,
            overhead_cost: 0.0,
            total_cost_per_piece: 0.0,
            buyer_price: 1.0,
            margin_percent,
        }
    }

    #[test]
    fn test_cargo_on_twill_only_passes() {
        let tp = template_tech_pack("tp-cargo").unwrap();
        let fabric = find_fabric("FAB-COT-TWL-200").unwrap();

        // GSM 180 is not below 180, shrinkage 3 is not above 3
        assert_eq!(ids(&evaluate(&tp, &fabric)), vec!["TP-001"]);
    }

    #[test]
    fn test_cargo_gsm_message_interpolates_value() {
        let tp = template_tech_pack("tp-cargo").unwrap();
        let fabric = find_fabric("FAB-POLY-STR-150").unwrap();
        let results = evaluate(&tp, &fabric);

        assert_eq!(ids(&results), vec!["FB-007", "TP-001"]);
        assert_eq!(results[0].severity, Severity::Risk);
        assert_eq!(results[0].category, "Durability");
        assert_eq!(
            results[0].message,
            "Low GSM (150) for cargo pocket load areas. Recommended: 180+"
        );
    }

    #[test]
    fn test_active_low_stretch_is_critical() {
        let tp = template_tech_pack("tp-active").unwrap();
        let fabric = find_fabric("FAB-POLY-STR-150").unwrap();
        let results = evaluate(&tp, &fabric);

        assert_eq!(ids(&results), vec!["FB-008", "FB-002", "TP-001"]);
        assert_eq!(results[0].severity, Severity::Critical);
        assert_eq!(
            results[0].message,
            "Selected fabric has 5% stretch. Activewear requires minimum 10% stretch."
        );
    }

    #[test]
    fn test_woven_pack_on_knit_fires_fb001_only() {
        let tp = template_tech_pack("tp-cargo").unwrap();
        let fabric = find_fabric("FAB-KNIT-JSY-160").unwrap();
        let results = evaluate(&tp, &fabric);

        assert_eq!(ids(&results), vec!["FB-007", "FB-001", "TP-001"]);
        assert!(!results.iter().any(|r| r.rule_id == "FB-002"));
    }

    #[test]
    fn test_garment_match_is_case_sensitive() {
        let mut tp = template_tech_pack("tp-cargo").unwrap();
        tp.garment_type = "cargo short".to_string();
        let fabric = find_fabric("FAB-POLY-STR-150").unwrap();

        assert!(!ids(&evaluate(&tp, &fabric)).contains(&"FB-007"));
    }

    #[test]
    fn test_shrinkage_against_tight_tolerance() {
        let mut tp = template_tech_pack("tp-active").unwrap();
        for m in &mut tp.measurements {
            m.tolerance_cm = 0.5;
        }
        let fabric = find_fabric("FAB-KNIT-JSY-160").unwrap();
        let results = evaluate(&tp, &fabric);

        assert_eq!(ids(&results), vec!["TP-004", "TP-001"]);
        assert_eq!(
            results[0].message,
            "Fabric shrinkage (5%) exceeds tolerance safety margin."
        );
    }

    #[test]
    fn test_empty_measurements_skip_tolerance_and_presence_rules() {
        let mut tp = template_tech_pack("tp-active").unwrap();
        tp.measurements.clear();
        let fabric = find_fabric("FAB-KNIT-JSY-160").unwrap();

        assert!(evaluate(&tp, &fabric).is_empty());
    }

    #[test]
    fn test_high_spi_on_light_fabric() {
        let tp = template_tech_pack("tp-active").unwrap();
        let mut fabric = find_fabric("FAB-KNIT-JSY-160").unwrap();
        fabric.gsm = 140.0;
        let results = evaluate(&tp, &fabric);

        assert_eq!(ids(&results), vec!["ST-003", "TP-001"]);
        assert_eq!(
            results[0].message,
            "High SPI (>10) on lightweight fabric may cause puckering."
        );
    }

    #[test]
    fn test_spi_at_limit_does_not_fire() {
        let mut tp = template_tech_pack("tp-active").unwrap();
        tp.construction.spi = 10;
        let mut fabric = find_fabric("FAB-KNIT-JSY-160").unwrap();
        fabric.gsm = 120.0;

        assert!(!ids(&evaluate(&tp, &fabric)).contains(&"ST-003"));
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let tp = template_tech_pack("tp-active").unwrap();
        let fabric = find_fabric("FAB-COT-TWL-200").unwrap();
        let first = evaluate(&tp, &fabric);
        for _ in 0..10 {
            assert_eq!(evaluate(&tp, &fabric), first);
        }
    }

    #[test]
    fn test_margin_rule_threshold_is_strict() {
        let evaluator = RuleEvaluator::default();

        assert!(evaluator.margin_rule(&costing_with_margin(5.0)).is_none());
        assert!(evaluator.margin_rule(&costing_with_margin(12.5)).is_none());

        let finding = evaluator
            .margin_rule(&costing_with_margin(4.99))
            .expect("margin below 5% should fire");
        assert_eq!(finding.rule_id, "CT-004");
        assert_eq!(finding.severity, Severity::Risk);
        assert_eq!(finding.category, "Commercial");
        assert_eq!(finding.message, "Margin (5.0%) is below factory threshold of 5%.");
    }

    #[test]
    fn test_margin_rule_negative_margin_message() {
        let finding = RuleEvaluator::default()
            .margin_rule(&costing_with_margin(-15.869565))
            .unwrap();
        assert_eq!(finding.message, "Margin (-15.9%) is below factory threshold of 5%.");
    }

    #[test]
    fn test_margin_message_rounds_ties_away_from_zero() {
        let evaluator = RuleEvaluator::default();

        let finding = evaluator.margin_rule(&costing_with_margin(0.25)).unwrap();
        assert_eq!(finding.message, "Margin (0.3%) is below factory threshold of 5%.");

        let finding = evaluator.margin_rule(&costing_with_margin(-0.25)).unwrap();
        assert_eq!(finding.message, "Margin (-0.3%) is below factory threshold of 5%.");
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = RuleThresholds {
            cargo_min_gsm: 200.0,
            ..RuleThresholds::default()
        };
        let evaluator = RuleEvaluator::new(thresholds);
        let tp = template_tech_pack("tp-cargo").unwrap();
        let fabric = find_fabric("FAB-COT-TWL-200").unwrap();
        let results = evaluator.evaluate(&tp, &fabric);

        assert_eq!(ids(&results), vec!["FB-007", "TP-001"]);
        assert!(results[0].message.ends_with("Recommended: 200+"));
    }
}
