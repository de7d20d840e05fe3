//! Fabric library: the read-only set of fabrics a tech pack can be
//! checked against.
//!
//! The built-in library covers the four stock fabrics. A mill-specific
//! library can be loaded from a JSON array of fabric records.

use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::info;

use crate::error::ThreadLogicError;
use crate::techpack::TextileStructure;

use super::types::Fabric;

/// The built-in fabric library.
pub fn fabric_library() -> Vec<Fabric> {
    vec![
        Fabric {
            fabric_id: "FAB-COT-TWL-200".to_string(),
            name: "Standard Cotton Twill".to_string(),
            fabric_type: TextileStructure::Woven,
            composition: "100% Cotton Twill".to_string(),
            gsm: 180.0,
            width_inches: 58.0,
            stretch_percent: 0.0,
            shrinkage_percent: 3.0,
            dye_type: "Reactive".to_string(),
            cost_per_meter: 3.20,
            image_url: Some("https://picsum.photos/id/194/200/200".to_string()),
        },
        Fabric {
            fabric_id: "FAB-HVY-DNS-300".to_string(),
            name: "Heavy Duty Canvas".to_string(),
            fabric_type: TextileStructure::Woven,
            composition: "100% Cotton Canvas".to_string(),
            gsm: 280.0,
            width_inches: 60.0,
            stretch_percent: 0.0,
            shrinkage_percent: 1.5,
            dye_type: "Pigment".to_string(),
            cost_per_meter: 4.50,
            image_url: Some("https://picsum.photos/id/204/200/200".to_string()),
        },
        Fabric {
            fabric_id: "FAB-POLY-STR-150".to_string(),
            name: "Poly Stretch Blend".to_string(),
            fabric_type: TextileStructure::Woven,
            composition: "95% Poly 5% Spandex".to_string(),
            gsm: 150.0,
            width_inches: 56.0,
            stretch_percent: 5.0,
            shrinkage_percent: 2.0,
            dye_type: "Disperse".to_string(),
            cost_per_meter: 2.80,
            image_url: Some("https://picsum.photos/id/250/200/200".to_string()),
        },
        Fabric {
            fabric_id: "FAB-KNIT-JSY-160".to_string(),
            name: "Single Jersey".to_string(),
            fabric_type: TextileStructure::Knit,
            composition: "100% Cotton".to_string(),
            gsm: 160.0,
            width_inches: 70.0,
            stretch_percent: 15.0,
            shrinkage_percent: 5.0,
            dye_type: "Reactive".to_string(),
            cost_per_meter: 3.00,
            image_url: Some("https://picsum.photos/id/305/200/200".to_string()),
        },
    ]
}

/// Look up a fabric in the built-in library by id.
pub fn find_fabric(fabric_id: &str) -> Result<Fabric, ThreadLogicError> {
    find_in(&fabric_library(), fabric_id)
}

/// Look up a fabric by id in an arbitrary library.
pub fn find_in(library: &[Fabric], fabric_id: &str) -> Result<Fabric, ThreadLogicError> {
    library
        .iter()
        .find(|f| f.fabric_id == fabric_id)
        .cloned()
        .ok_or_else(|| ThreadLogicError::UnknownFabric(fabric_id.to_string()))
}

/// Load a fabric library from a JSON file containing an array of fabrics.
///
/// Records with non-positive GSM or width are rejected, since costing and
/// the GSM rules assume both are > 0.
pub fn load_library(path: &Path) -> Result<Vec<Fabric>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read fabric library {}", path.display()))?;
    let fabrics: Vec<Fabric> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid fabric library JSON in {}", path.display()))?;

    for f in &fabrics {
        if !(f.gsm > 0.0) || !(f.width_inches > 0.0) {
            bail!(
                "Fabric '{}' must have gsm > 0 and widthInches > 0 (got {} / {})",
                f.fabric_id,
                f.gsm,
                f.width_inches
            );
        }
        if f.cost_per_meter < 0.0 {
            bail!("Fabric '{}' has a negative costPerMeter", f.fabric_id);
        }
    }

    info!("Loaded {} fabrics from {}", fabrics.len(), path.display());
    Ok(fabrics)
}
