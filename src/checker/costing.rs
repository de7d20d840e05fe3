//! Per-piece costing.
//!
//! Fabric cost comes from a fixed consumption per piece, scaled up for
//! narrow fabric. Everything else is a fixed cost from configuration.

use crate::fabric::Fabric;

use super::rules::{ConsumptionModel, FixedCosts};
use super::types::Costing;

/// Consumption multiplier for a fabric width.
///
/// Widths at or above the wide-width cut-off use 1.0; anything narrower
/// needs more panels per piece.
pub fn width_factor(width_inches: f64, model: &ConsumptionModel) -> f64 {
    if width_inches >= model.wide_width_inches {
        1.0
    } else {
        model.narrow_width_factor
    }
}

/// Estimate the per-piece cost and margin using the default consumption model.
pub fn estimate(fabric: &Fabric, costs: &FixedCosts) -> Costing {
    estimate_with(fabric, costs, &ConsumptionModel::default())
}

/// Estimate the per-piece cost and margin.
///
/// Pure and total. No rounding is applied. `costs.buyer_price` must be
/// non-zero for the margin to be finite; `FeasibilityConfig::check`
/// enforces this for loaded configuration.
pub fn estimate_with(fabric: &Fabric, costs: &FixedCosts, model: &ConsumptionModel) -> Costing {
    let factor = width_factor(fabric.width_inches, model);
    let fabric_cost = (model.meters_per_piece * factor) * fabric.cost_per_meter;

    let total_cost_per_piece =
        fabric_cost + costs.trim_cost + costs.cm_cost + costs.washing_cost + costs.overhead_cost;
    let margin_percent =
        ((costs.buyer_price - total_cost_per_piece) / costs.buyer_price) * 100.0;

    Costing {
        fabric_cost,
        trim_cost: costs.trim_cost,
        cm_cost: costs.cm_cost,
        washing_cost: costs.washing_cost,
        overhead_cost: costs.overhead_cost,
        total_cost_per_piece,
        buyer_price: costs.buyer_price,
        margin_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fabric::find_fabric;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_width_factor_boundary() {
        let model = ConsumptionModel::default();
        assert_eq!(width_factor(57.99, &model), 1.2);
        assert_eq!(width_factor(58.0, &model), 1.0);
        assert_eq!(width_factor(58.01, &model), 1.0);
    }

    #[test]
    fn test_twill_costing() {
        let fabric = find_fabric("FAB-COT-TWL-200").unwrap();
        let costing = estimate(&fabric, &FixedCosts::default());

        assert!((costing.fabric_cost - 5.28).abs() < EPS);
        assert!((costing.total_cost_per_piece - 11.18).abs() < EPS);
        assert!((costing.margin_percent - 2.782608695652).abs() < 1e-6);
        assert_eq!(costing.buyer_price, 11.50);
    }

    #[test]
    fn test_narrow_fabric_uses_higher_consumption() {
        let fabric = find_fabric("FAB-POLY-STR-150").unwrap();
        let costing = estimate(&fabric, &FixedCosts::default());

        // 1.65 * 1.2 * 2.80
        assert!((costing.fabric_cost - 5.544).abs() < EPS);
        assert!((costing.total_cost_per_piece - 11.444).abs() < EPS);
    }

    #[test]
    fn test_margin_can_go_negative() {
        let fabric = find_fabric("FAB-HVY-DNS-300").unwrap();
        let costing = estimate(&fabric, &FixedCosts::default());

        assert!((costing.fabric_cost - 7.425).abs() < EPS);
        assert!(costing.margin_percent < 0.0);
        assert!((costing.margin_percent - (-15.869565217391)).abs() < 1e-6);
    }

    #[test]
    fn test_fixed_costs_pass_through() {
        let fabric = find_fabric("FAB-KNIT-JSY-160").unwrap();
        let costs = FixedCosts {
            trim_cost: 1.0,
            cm_cost: 2.0,
            washing_cost: 0.5,
            overhead_cost: 0.25,
            buyer_price: 20.0,
        };
        let costing = estimate(&fabric, &costs);

        assert_eq!(costing.trim_cost, 1.0);
        assert_eq!(costing.cm_cost, 2.0);
        assert_eq!(costing.washing_cost, 0.5);
        assert_eq!(costing.overhead_cost, 0.25);
        assert_eq!(costing.buyer_price, 20.0);
        // 1.65 * 3.00 + 3.75
        assert!((costing.total_cost_per_piece - 8.7).abs() < EPS);
    }

    #[test]
    fn test_estimate_is_bit_identical() {
        let fabric = find_fabric("FAB-POLY-STR-150").unwrap();
        let costs = FixedCosts::default();
        let a = estimate(&fabric, &costs);
        let b = estimate(&fabric, &costs);

        assert_eq!(a.fabric_cost.to_bits(), b.fabric_cost.to_bits());
        assert_eq!(a.total_cost_per_piece.to_bits(), b.total_cost_per_piece.to_bits());
        assert_eq!(a.margin_percent.to_bits(), b.margin_percent.to_bits());
    }
}
