//! Predefined tech pack templates.
//!
//! The catalog is static: each template id maps to a fully populated
//! tech pack that can go straight into the checker.

use tracing::info;

use crate::error::ThreadLogicError;

use super::types::{Construction, Measurement, TechPack, Template, TextileStructure};

/// Template id used for the canned document-ingestion result.
pub const CARGO_TEMPLATE_ID: &str = "tp-cargo";
pub const ACTIVE_TEMPLATE_ID: &str = "tp-active";

/// List the template catalog in display order.
pub fn list_templates() -> Vec<Template> {
    vec![
        Template {
            id: CARGO_TEMPLATE_ID.to_string(),
            name: "Men's Utility Cargo".to_string(),
            category: TextileStructure::Woven,
            description: "Complex woven construction with multiple stress points.".to_string(),
        },
        Template {
            id: ACTIVE_TEMPLATE_ID.to_string(),
            name: "Women's Active Hoodie".to_string(),
            category: TextileStructure::Knit,
            description: "High-stretch knit garment with flatlock stitching.".to_string(),
        },
    ]
}

/// Resolve a template id to its tech pack.
///
/// # Errors
/// `UnknownTemplate` if the id is not in the catalog.
pub fn template_tech_pack(template_id: &str) -> Result<TechPack, ThreadLogicError> {
    let tech_pack = match template_id {
        CARGO_TEMPLATE_ID => cargo_pant(),
        ACTIVE_TEMPLATE_ID => active_hoodie(),
        other => return Err(ThreadLogicError::UnknownTemplate(other.to_string())),
    };
    info!(
        "Loaded template '{}' ({} / {})",
        template_id, tech_pack.buyer, tech_pack.style_code
    );
    Ok(tech_pack)
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn measurements(points: &[(&str, f64)]) -> Vec<Measurement> {
    points
        .iter()
        .map(|(point, tolerance_cm)| Measurement {
            point: point.to_string(),
            tolerance_cm: *tolerance_cm,
        })
        .collect()
}

fn cargo_pant() -> TechPack {
    TechPack {
        tech_pack_id: "TP-2026-00127".to_string(),
        buyer: "ZARA".to_string(),
        style_code: "ZR-M-CARGO-241".to_string(),
        garment_type: "Cargo Pant".to_string(),
        gender: "Men".to_string(),
        category: TextileStructure::Woven,
        season: "SS26".to_string(),
        size_range: strings(&["S", "M", "L", "XL", "XXL"]),
        measurements: measurements(&[
            ("Waist", 0.5),
            ("Hip", 0.5),
            ("Outseam", 0.7),
            ("Inseam", 0.7),
        ]),
        construction: Construction {
            stitch_type: "Lock Stitch".to_string(),
            spi: 12,
            seam_type: "Stress".to_string(),
        },
        trims: strings(&["Zipper", "Button", "Pocket Rivet"]),
        washing: "Enzyme Wash".to_string(),
    }
}

fn active_hoodie() -> TechPack {
    TechPack {
        tech_pack_id: "TP-2026-00882".to_string(),
        buyer: "LULULEMON".to_string(),
        style_code: "LL-W-HOOD-09".to_string(),
        garment_type: "Active Hoodie".to_string(),
        gender: "Women".to_string(),
        category: TextileStructure::Knit,
        season: "FW25".to_string(),
        size_range: strings(&["XS", "S", "M", "L"]),
        measurements: measurements(&[("Chest", 1.0), ("Length", 1.0), ("Sleeve", 0.8)]),
        construction: Construction {
            stitch_type: "Flatlock".to_string(),
            spi: 14,
            seam_type: "Stretch".to_string(),
        },
        trims: strings(&["Drawstring", "Eyelet"]),
        washing: "Bio Polish".to_string(),
    }
}
