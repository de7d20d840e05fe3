//! Garment production feasibility checker.
//!
//! Evaluates a tech pack against a chosen fabric in three pure stages:
//!
//! - **Rules**: a fixed battery of compatibility and safety checks
//! - **Costing**: fabric consumption plus fixed costs, margin against buyer price
//! - **Scoring**: severities folded into a readiness score and status
//!
//! The margin rule (CT-004) bridges costing and the findings list, so the
//! pipeline runs as evaluate -> estimate -> margin rule -> score.
//!
//! # Example
//!
//! ```ignore
//! use threadlogic::checker::{default_config, validate};
//! use threadlogic::fabric::find_fabric;
//! use threadlogic::techpack::template_tech_pack;
//!
//! let tech_pack = template_tech_pack("tp-cargo")?;
//! let fabric = find_fabric("FAB-COT-TWL-200")?;
//! let outcome = validate(&tech_pack, &fabric, &default_config());
//!
//! for finding in &outcome.results {
//!     println!("[{}] {}: {}", finding.severity, finding.rule_id, finding.message);
//! }
//! println!("{} -> {}", outcome.readiness.score, outcome.readiness.status);
//! ```

mod costing;
mod engine;
mod pipeline;
mod rules;
mod scoring;
mod types;

pub use costing::{estimate, estimate_with, width_factor};
pub use engine::{evaluate, RuleEvaluator};
pub use pipeline::{validate, validate_pair};
pub use rules::{
    default_config, load_config, ConsumptionModel, FeasibilityConfig, FixedCosts, RuleThresholds,
};
pub use scoring::score;
pub use types::*;
