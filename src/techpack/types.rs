//! Type definitions for garment tech packs.
//!
//! Field names serialize in camelCase so records handed over by the
//! ingestion step (`techPackId`, `garmentType`, `toleranceCm`, ...) load
//! without a mapping layer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Textile construction family. Used both as the tech pack category and as
/// the fabric type, so compatibility checks compare like with like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextileStructure {
    Woven,
    Knit,
}

impl TextileStructure {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextileStructure::Woven => "Woven",
            TextileStructure::Knit => "Knit",
        }
    }
}

impl fmt::Display for TextileStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A point of measure with its allowed tolerance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    /// Point of measure name (e.g., "Waist", "Inseam")
    pub point: String,
    /// Plus/minus tolerance in centimeters
    pub tolerance_cm: f64,
}

/// Stitching and seam construction parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Construction {
    pub stitch_type: String,
    /// Stitches per inch
    pub spi: u32,
    pub seam_type: String,
}

/// A garment specification as produced by template selection or document
/// ingestion. Treated as immutable once handed to the checker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechPack {
    pub tech_pack_id: String,
    pub buyer: String,
    pub style_code: String,
    /// Free-text garment description (e.g., "Cargo Pant")
    pub garment_type: String,
    pub gender: String,
    pub category: TextileStructure,
    pub season: String,
    /// Size labels, smallest first
    pub size_range: Vec<String>,
    pub measurements: Vec<Measurement>,
    pub construction: Construction,
    pub trims: Vec<String>,
    /// Washing treatment name
    pub washing: String,
}

impl TechPack {
    /// Largest tolerance across the measurement table.
    ///
    /// Returns `None` for an empty table; there is no meaningful maximum.
    pub fn max_tolerance_cm(&self) -> Option<f64> {
        self.measurements
            .iter()
            .map(|m| m.tolerance_cm)
            .reduce(f64::max)
    }
}

/// Display metadata for a predefined tech pack template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub category: TextileStructure,
    pub description: String,
}
