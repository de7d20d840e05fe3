//! Checker configuration: fixed costs, consumption model and rule thresholds.
//!
//! Provides two loading methods:
//! - `default_config()` - Loads the defaults embedded in the binary
//! - `load_config(path)` - Loads a custom TOML file; missing keys keep their defaults
//!
//! Rule ids, severities, categories and check order are fixed in the
//! evaluator and cannot be changed from config.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ThreadLogicError;

/// Defaults embedded at compile time from `config/feasibility.toml`.
const DEFAULT_CONFIG: &str = include_str!("../../config/feasibility.toml");

/// Fixed per-piece cost components, supplied by the factory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixedCosts {
    pub trim_cost: f64,
    /// Cut-and-make labour
    pub cm_cost: f64,
    pub washing_cost: f64,
    pub overhead_cost: f64,
    /// Target price the buyer pays per piece
    pub buyer_price: f64,
}

impl Default for FixedCosts {
    fn default() -> Self {
        Self {
            trim_cost: 0.90,
            cm_cost: 3.50,
            washing_cost: 0.80,
            overhead_cost: 0.70,
            buyer_price: 11.50,
        }
    }
}

/// Fabric consumption assumptions used for the fabric cost line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsumptionModel {
    pub meters_per_piece: f64,
    /// Widths at or above this use a factor of 1.0
    pub wide_width_inches: f64,
    /// Factor applied below `wide_width_inches`
    pub narrow_width_factor: f64,
}

impl Default for ConsumptionModel {
    fn default() -> Self {
        Self {
            meters_per_piece: 1.65,
            wide_width_inches: 58.0,
            narrow_width_factor: 1.2,
        }
    }
}

/// Numeric thresholds for the rule battery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleThresholds {
    /// FB-007 fires below this GSM for cargo garments
    pub cargo_min_gsm: f64,
    /// FB-008 fires below this stretch for activewear
    pub active_min_stretch_percent: f64,
    /// TP-004 fires above this shrinkage...
    pub shrinkage_limit_percent: f64,
    /// ...when the widest tolerance is below this
    pub tolerance_safety_cm: f64,
    /// ST-003 fires above this SPI...
    pub spi_limit: u32,
    /// ...on fabric lighter than this
    pub lightweight_gsm: f64,
    /// CT-004 fires below this margin
    pub min_margin_percent: f64,
}

impl Default for RuleThresholds {
    fn default() -> Self {
        Self {
            cargo_min_gsm: 180.0,
            active_min_stretch_percent: 10.0,
            shrinkage_limit_percent: 3.0,
            tolerance_safety_cm: 0.6,
            spi_limit: 10,
            lightweight_gsm: 150.0,
            min_margin_percent: 5.0,
        }
    }
}

/// Root configuration for the checker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeasibilityConfig {
    pub costs: FixedCosts,
    pub consumption: ConsumptionModel,
    pub thresholds: RuleThresholds,
}

impl FeasibilityConfig {
    /// Parse a TOML document and check it is usable for costing.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: FeasibilityConfig = toml::from_str(content)?;
        config.check()?;
        Ok(config)
    }

    /// Reject values that would make the margin undefined or the cost model
    /// meaningless.
    pub fn check(&self) -> Result<(), ThreadLogicError> {
        let c = &self.costs;
        if !(c.buyer_price > 0.0) {
            return Err(ThreadLogicError::Config(format!(
                "buyer_price must be > 0 (got {})",
                c.buyer_price
            )));
        }
        for (name, value) in [
            ("trim_cost", c.trim_cost),
            ("cm_cost", c.cm_cost),
            ("washing_cost", c.washing_cost),
            ("overhead_cost", c.overhead_cost),
        ] {
            if !(value >= 0.0) {
                return Err(ThreadLogicError::Config(format!(
                    "{} must be >= 0 (got {})",
                    name, value
                )));
            }
        }

        let m = &self.consumption;
        if !(m.meters_per_piece > 0.0) || !(m.narrow_width_factor > 0.0) {
            return Err(ThreadLogicError::Config(
                "meters_per_piece and narrow_width_factor must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load checker configuration from a TOML file at the given path.
///
/// # Returns
/// * `Ok(FeasibilityConfig)` - Parsed and checked configuration
/// * `Err` - If the file cannot be read, the TOML is invalid, or a value is out of range
pub fn load_config(path: &Path) -> Result<FeasibilityConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read checker config {}", path.display()))?;
    let config = FeasibilityConfig::from_toml(&content)
        .with_context(|| format!("Invalid checker config {}", path.display()))?;
    info!("Loaded checker config from {}", path.display());
    Ok(config)
}

/// Get the default configuration embedded in the binary.
///
/// # Panics
/// Panics if the embedded TOML is invalid (this would be a compile-time bug).
pub fn default_config() -> FeasibilityConfig {
    FeasibilityConfig::from_toml(DEFAULT_CONFIG)
        .expect("embedded feasibility.toml must be valid")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_embedded_defaults_match_builtin_defaults() {
        assert_eq!(default_config(), FeasibilityConfig::default());
    }

    #[test]
    fn test_default_cost_table() {
        let costs = default_config().costs;
        assert_eq!(costs.trim_cost, 0.90);
        assert_eq!(costs.cm_cost, 3.50);
        assert_eq!(costs.washing_cost, 0.80);
        assert_eq!(costs.overhead_cost, 0.70);
        assert_eq!(costs.buyer_price, 11.50);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = FeasibilityConfig::from_toml(
            r#"
            [costs]
            buyer_price = 14.0
            "#,
        )
        .unwrap();

        assert_eq!(config.costs.buyer_price, 14.0);
        assert_eq!(config.costs.cm_cost, 3.50);
        assert_eq!(config.consumption, ConsumptionModel::default());
        assert_eq!(config.thresholds, RuleThresholds::default());
    }

    #[test]
    fn test_zero_buyer_price_rejected() {
        let err = FeasibilityConfig::from_toml("[costs]\nbuyer_price = 0.0\n").unwrap_err();
        assert!(err.to_string().contains("buyer_price"));
    }

    #[test]
    fn test_negative_cost_rejected() {
        let err = FeasibilityConfig::from_toml("[costs]\nwashing_cost = -1.0\n").unwrap_err();
        assert!(err.to_string().contains("washing_cost"));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[thresholds]\nmin_margin_percent = 8.0").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.thresholds.min_margin_percent, 8.0);
        assert_eq!(config.thresholds.cargo_min_gsm, 180.0);
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config(Path::new("/nonexistent/feasibility.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read checker config"));
    }
}
