//! Type definitions for AI explanations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::checker::RuleResult;
use crate::error::ThreadLogicError;

/// Supported AI providers for finding explanations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    Gemini,
    Claude,
    OpenAi,
}

impl AiProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            AiProvider::Gemini => "gemini",
            AiProvider::Claude => "claude",
            AiProvider::OpenAi => "openai",
        }
    }

    /// Model used when the preferences do not name one.
    pub fn default_model(&self) -> &'static str {
        match self {
            AiProvider::Gemini => "gemini-3-flash-preview",
            AiProvider::Claude => "claude-sonnet-4-20250514",
            AiProvider::OpenAi => "gpt-4o",
        }
    }

    /// Provider-specific environment variable holding an API key.
    pub fn env_var(&self) -> &'static str {
        match self {
            AiProvider::Gemini => "GEMINI_API_KEY",
            AiProvider::Claude => "ANTHROPIC_API_KEY",
            AiProvider::OpenAi => "OPENAI_API_KEY",
        }
    }

    /// Keychain service name for this provider's API key.
    pub fn keychain_service(&self) -> String {
        format!("threadlogic-{}-api", self.as_str())
    }
}

impl FromStr for AiProvider {
    type Err = ThreadLogicError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_lowercase().as_str() {
            "gemini" => Ok(AiProvider::Gemini),
            "claude" => Ok(AiProvider::Claude),
            "openai" => Ok(AiProvider::OpenAi),
            other => Err(ThreadLogicError::Config(format!(
                "Unsupported AI provider: '{}'. Supported: gemini, claude, openai",
                other
            ))),
        }
    }
}

impl fmt::Display for AiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A finding paired with its explanation, if one was requested.
///
/// SAFE findings are never sent for explanation and carry `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplainedFinding {
    #[serde(flatten)]
    pub finding: RuleResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_explanation: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::Severity;

    #[test]
    fn test_provider_parse() {
        assert_eq!("gemini".parse::<AiProvider>().unwrap(), AiProvider::Gemini);
        assert_eq!(" Claude ".parse::<AiProvider>().unwrap(), AiProvider::Claude);
        assert_eq!("OPENAI".parse::<AiProvider>().unwrap(), AiProvider::OpenAi);
        assert!("kimi".parse::<AiProvider>().is_err());
    }

    #[test]
    fn test_provider_serde_matches_display() {
        for provider in [AiProvider::Gemini, AiProvider::Claude, AiProvider::OpenAi] {
            let json = serde_json::to_string(&provider).unwrap();
            assert_eq!(json, format!("\"{}\"", provider));
        }
    }

    #[test]
    fn test_keychain_service_name() {
        assert_eq!(AiProvider::Gemini.keychain_service(), "threadlogic-gemini-api");
    }

    #[test]
    fn test_explained_finding_flattens() {
        let explained = ExplainedFinding {
            finding: RuleResult::new(
                "FB-008",
                Severity::Critical,
                "Performance",
                "Selected fabric has 5% stretch.".to_string(),
            ),
            ai_explanation: Some("Use a knit with 10%+ stretch.".to_string()),
        };
        let json = serde_json::to_string(&explained).unwrap();
        assert!(json.contains("\"ruleId\":\"FB-008\""));
        assert!(json.contains("\"aiExplanation\":\"Use a knit with 10%+ stretch.\""));
    }
}
