//! Document ingestion stand-in.
//!
//! Real document parsing is not implemented. An uploaded document is
//! acknowledged after a short simulated parse and the canned cargo tech pack
//! is returned in its place, so the rest of the flow can run end to end.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::error::ThreadLogicError;

use super::templates::{template_tech_pack, CARGO_TEMPLATE_ID};
use super::types::TechPack;
use super::validation::validate_tech_pack;

/// Simulated parse latency.
const PARSE_DELAY: Duration = Duration::from_millis(200);

/// "Parse" an uploaded tech pack document.
///
/// # Errors
/// - `Ingestion` if the document is empty
/// - `InvalidTechPack` if the result fails hand-off validation
pub async fn parse_document(document: &[u8]) -> Result<TechPack, ThreadLogicError> {
    if document.is_empty() {
        warn!("Rejected empty tech pack document");
        return Err(ThreadLogicError::Ingestion(
            "document is empty".to_string(),
        ));
    }

    info!("Parsing tech pack document ({} bytes)", document.len());
    tokio::time::sleep(PARSE_DELAY).await;

    let tech_pack = template_tech_pack(CARGO_TEMPLATE_ID)?;
    validate_tech_pack(&tech_pack)?;

    info!(
        "Parsed tech pack {} ({} measurements)",
        tech_pack.tech_pack_id,
        tech_pack.measurements.len()
    );
    Ok(tech_pack)
}

/// Load an already-structured tech pack from a JSON file.
///
/// The record must pass the same hand-off checks as a parsed document.
pub fn load_tech_pack(path: &Path) -> Result<TechPack> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read tech pack {}", path.display()))?;
    let tech_pack: TechPack = serde_json::from_str(&content)
        .with_context(|| format!("Invalid tech pack JSON in {}", path.display()))?;
    validate_tech_pack(&tech_pack)?;
    info!("Loaded tech pack {} from {}", tech_pack.tech_pack_id, path.display());
    Ok(tech_pack)
}
