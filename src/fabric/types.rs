use serde::{Deserialize, Serialize};

use crate::techpack::TextileStructure;

/// A fabric record from the fabric library.
///
/// Percentages are stored as plain numbers (5.0 means 5%). `gsm` is grams
/// per square meter and `cost_per_meter` is in the buyer's currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fabric {
    pub fabric_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub fabric_type: TextileStructure,
    pub composition: String,
    pub gsm: f64,
    pub width_inches: f64,
    pub stretch_percent: f64,
    pub shrinkage_percent: f64,
    pub dye_type: String,
    pub cost_per_meter: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fabric_deserialize() {
        let json = r#"{
            "fabricId": "FAB-TEST",
            "name": "Test Twill",
            "type": "Woven",
            "composition": "100% Cotton",
            "gsm": 210,
            "widthInches": 57.5,
            "stretchPercent": 0,
            "shrinkagePercent": 2.5,
            "dyeType": "Reactive",
            "costPerMeter": 3.1
        }"#;

        let fabric: Fabric = serde_json::from_str(json).unwrap();
        assert_eq!(fabric.fabric_type, TextileStructure::Woven);
        assert_eq!(fabric.gsm, 210.0);
        assert_eq!(fabric.width_inches, 57.5);
        assert!(fabric.image_url.is_none());
    }

    #[test]
    fn test_fabric_serialize_uses_type_key() {
        let fabric = crate::fabric::find_fabric("FAB-KNIT-JSY-160").unwrap();
        let json = serde_json::to_string(&fabric).unwrap();
        assert!(json.contains("\"type\":\"Knit\""));
        assert!(json.contains("\"fabricId\":\"FAB-KNIT-JSY-160\""));
    }
}
