//! Explanation service: the `Explainer` seam plus the never-failing wrappers
//! the checker surfaces call.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::checker::{RuleResult, Severity, ValidationOutcome};
use crate::error::ThreadLogicError;
use crate::fabric::Fabric;
use crate::techpack::TechPack;

use super::types::ExplainedFinding;

pub const MISSING_KEY_FALLBACK: &str = "AI Explanation unavailable: Missing API Key.";
pub const UNREACHABLE_FALLBACK: &str = "Unable to connect to AI service for explanation.";
pub const EMPTY_FALLBACK: &str = "Could not generate explanation.";

/// Produces a short natural-language explanation for one finding.
#[async_trait]
pub trait Explainer: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    async fn explain(
        &self,
        finding: &RuleResult,
        tech_pack: &TechPack,
        fabric: &Fabric,
    ) -> Result<String, ThreadLogicError>;
}

/// Explain one finding, substituting a fixed message for every failure.
///
/// Never errors and never blocks longer than `timeout`.
pub async fn explain_or_fallback(
    explainer: &dyn Explainer,
    finding: &RuleResult,
    tech_pack: &TechPack,
    fabric: &Fabric,
    timeout: Duration,
) -> String {
    let attempt =
        tokio::time::timeout(timeout, explainer.explain(finding, tech_pack, fabric)).await;

    match attempt {
        Ok(Ok(text)) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(Ok(_)) => EMPTY_FALLBACK.to_string(),
        Ok(Err(ThreadLogicError::MissingCredential(provider))) => {
            debug!("No API key for {}, using fallback explanation", provider);
            MISSING_KEY_FALLBACK.to_string()
        }
        Ok(Err(e)) => {
            warn!(
                "{} explanation for {} failed: {}",
                explainer.name(),
                finding.rule_id,
                e
            );
            UNREACHABLE_FALLBACK.to_string()
        }
        Err(_) => {
            warn!(
                "{} explanation for {} timed out after {:?}",
                explainer.name(),
                finding.rule_id,
                timeout
            );
            UNREACHABLE_FALLBACK.to_string()
        }
    }
}

/// Annotate every non-SAFE finding of an outcome with an explanation.
///
/// Findings keep their order. Requests run one after another.
pub async fn explain_findings(
    explainer: &dyn Explainer,
    outcome: &ValidationOutcome,
    tech_pack: &TechPack,
    fabric: &Fabric,
    timeout: Duration,
) -> Vec<ExplainedFinding> {
    let mut explained = Vec::with_capacity(outcome.results.len());
    for finding in &outcome.results {
        let ai_explanation = if finding.severity == Severity::Safe {
            None
        } else {
            Some(explain_or_fallback(explainer, finding, tech_pack, fabric, timeout).await)
        };
        explained.push(ExplainedFinding {
            finding: finding.clone(),
            ai_explanation,
        });
    }
    explained
}
