//! Application preferences.
//!
//! Stored as TOML at `<config dir>/threadlogic/config.toml`. A missing file
//! means defaults; every field is optional.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::checker::{default_config, load_config, FeasibilityConfig};
use crate::explain::AiProvider;

const APP_DIR: &str = "threadlogic";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Explanation provider name: gemini, claude, or openai
    pub ai_provider: String,
    /// Model override; the provider default is used when unset
    pub ai_model: Option<String>,
    pub explain_timeout_secs: u64,
    /// Custom cost/threshold table replacing the built-in one
    pub feasibility_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ai_provider: AiProvider::Gemini.as_str().to_string(),
            ai_model: None,
            explain_timeout_secs: 20,
            feasibility_path: None,
        }
    }
}

impl AppConfig {
    /// Default preferences location, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load preferences from `path`, falling back to defaults if absent.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No preferences at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read preferences {}", path.display()))?;
        let config: AppConfig = toml::from_str(&content)
            .with_context(|| format!("Invalid preferences {}", path.display()))?;
        info!("Loaded preferences from {:?}", path);
        Ok(config)
    }

    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn provider(&self) -> Result<AiProvider> {
        Ok(self.ai_provider.parse::<AiProvider>()?)
    }

    /// Configured model, or the provider's default.
    pub fn model(&self) -> Result<String> {
        match &self.ai_model {
            Some(model) if !model.trim().is_empty() => Ok(model.trim().to_string()),
            _ => Ok(self.provider()?.default_model().to_string()),
        }
    }

    pub fn explain_timeout(&self) -> Duration {
        Duration::from_secs(self.explain_timeout_secs.max(1))
    }

    /// Cost/threshold table: the configured file, or the built-in defaults.
    pub fn feasibility(&self) -> Result<FeasibilityConfig> {
        match &self.feasibility_path {
            Some(path) => load_config(path),
            None => Ok(default_config()),
        }
    }
}
