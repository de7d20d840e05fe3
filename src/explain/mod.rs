//! Natural-language explanations for checker findings.
//!
//! Explanations are advisory: they never alter findings, costing, or the
//! score, and every failure degrades to a fixed fallback message.

mod client;
mod credentials;
mod prompts;
mod service;
mod types;

pub use client::{extract_text, ProviderExplainer};
pub use credentials::{delete_api_key, get_api_key, resolve_api_key, set_api_key};
pub use prompts::build_explanation_prompt;
pub use service::{
    explain_findings, explain_or_fallback, Explainer, EMPTY_FALLBACK, MISSING_KEY_FALLBACK,
    UNREACHABLE_FALLBACK,
};
pub use types::{AiProvider, ExplainedFinding};
