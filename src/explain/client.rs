//! HTTP explainer backed by a hosted LLM.
//!
//! Each provider gets one short plain-text completion per finding.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, error};

use crate::checker::RuleResult;
use crate::error::ThreadLogicError;
use crate::fabric::Fabric;
use crate::techpack::TechPack;

use super::credentials::resolve_api_key;
use super::prompts::{build_explanation_prompt, SYSTEM_PROMPT};
use super::service::Explainer;
use super::types::AiProvider;

const MAX_TOKENS: u32 = 256;
const MAX_ERROR_BODY_CHARS: usize = 1024;

/// Explainer that calls Gemini, Claude, or OpenAI over HTTPS.
pub struct ProviderExplainer {
    provider: AiProvider,
    model: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl ProviderExplainer {
    pub fn new(
        provider: AiProvider,
        model: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ThreadLogicError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                ThreadLogicError::Explanation(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            provider,
            model: model.into(),
            api_key,
            client,
        })
    }

    /// Build an explainer whose key comes from the environment or keychain.
    pub fn from_credentials(
        provider: AiProvider,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ThreadLogicError> {
        Self::new(provider, model, resolve_api_key(provider), timeout)
    }

    pub fn provider(&self) -> AiProvider {
        self.provider
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    async fn call_gemini(&self, api_key: &str, prompt: &str) -> Result<String, ThreadLogicError> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
            self.model
        );
        let body = json!({
            "systemInstruction": {"parts": [{"text": SYSTEM_PROMPT}]},
            "contents": [{"role": "user", "parts": [{"text": prompt}]}],
            "generationConfig": {"maxOutputTokens": MAX_TOKENS}
        });

        let request = self
            .client
            .post(url)
            .header("x-goog-api-key", api_key)
            .json(&body);
        self.send(request).await
    }

    async fn call_claude(&self, api_key: &str, prompt: &str) -> Result<String, ThreadLogicError> {
        let body = json!({
            "model": self.model,
            "max_tokens": MAX_TOKENS,
            "system": SYSTEM_PROMPT,
            "messages": [{"role": "user", "content": prompt}]
        });

        let request = self
            .client
            .post("https://api.anthropic.com/v1/messages")
            .header("x-api-key", api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&body);
        self.send(request).await
    }

    async fn call_openai(&self, api_key: &str, prompt: &str) -> Result<String, ThreadLogicError> {
        let body = json!({
            "model": self.model,
            "max_tokens": MAX_TOKENS,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": prompt}
            ]
        });

        let request = self
            .client
            .post("https://api.openai.com/v1/chat/completions")
            .bearer_auth(api_key)
            .json(&body);
        self.send(request).await
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, ThreadLogicError> {
        let provider = self.provider;
        let response = request.send().await.map_err(|e| {
            let msg = if e.is_timeout() {
                format!("LLM API timeout for provider '{}'", provider)
            } else {
                format!("LLM API request failed for {}: {}", provider, e)
            };
            error!("{}", msg);
            ThreadLogicError::Explanation(msg)
        })?;

        let body_text = handle_api_response(response, provider).await?;
        let resp_json: Value = serde_json::from_str(&body_text).map_err(|e| {
            ThreadLogicError::Explanation(format!(
                "Failed to parse {} API response: {}",
                provider, e
            ))
        })?;

        // Blank completions come back as empty text, not an error
        Ok(extract_text(provider, &resp_json).unwrap_or_else(|| {
            debug!("No text content in {} API response", provider);
            String::new()
        }))
    }
}

#[async_trait]
impl Explainer for ProviderExplainer {
    fn name(&self) -> &str {
        self.provider.as_str()
    }

    async fn explain(
        &self,
        finding: &RuleResult,
        tech_pack: &TechPack,
        fabric: &Fabric,
    ) -> Result<String, ThreadLogicError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ThreadLogicError::MissingCredential(self.provider.to_string()))?;

        debug!("Requesting {} explanation for {}", self.provider, finding.rule_id);
        let prompt = build_explanation_prompt(finding, tech_pack, fabric);
        match self.provider {
            AiProvider::Gemini => self.call_gemini(api_key, &prompt).await,
            AiProvider::Claude => self.call_claude(api_key, &prompt).await,
            AiProvider::OpenAi => self.call_openai(api_key, &prompt).await,
        }
    }
}

/// Check status and read the body, with the error body truncated.
async fn handle_api_response(
    response: reqwest::Response,
    provider: AiProvider,
) -> Result<String, ThreadLogicError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<failed to read body>".to_string());
        let msg = format!(
            "LLM API error: {} from {} - {}",
            status,
            provider,
            truncate(&body, MAX_ERROR_BODY_CHARS)
        );
        error!("{}", msg);
        return Err(ThreadLogicError::Explanation(msg));
    }
    response.text().await.map_err(|e| {
        ThreadLogicError::Explanation(format!(
            "Failed to read API response body from {}: {}",
            provider, e
        ))
    })
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

/// Pull the completion text out of a provider's response envelope.
///
/// Blank completions count as missing.
pub fn extract_text(provider: AiProvider, response: &Value) -> Option<String> {
    let text = match provider {
        // { "candidates": [{"content": {"parts": [{"text": "..."}]}}] }
        AiProvider::Gemini => response["candidates"][0]["content"]["parts"]
            .as_array()
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|p| p["text"].as_str())
                    .collect::<String>()
            }),
        // { "content": [{"type": "text", "text": "..."}] }
        AiProvider::Claude => response["content"][0]["text"].as_str().map(str::to_string),
        // { "choices": [{"message": {"content": "..."}}] }
        AiProvider::OpenAi => response["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string),
    }?;

    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
