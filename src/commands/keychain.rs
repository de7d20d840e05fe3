use anyhow::Result;

use crate::config::AppConfig;
use crate::explain::{delete_api_key, resolve_api_key, set_api_key, AiProvider};

/// Explicit provider, or the one named in preferences.
fn pick_provider(provider: Option<&str>, prefs: &AppConfig) -> Result<AiProvider> {
    match provider {
        Some(name) => Ok(name.parse::<AiProvider>()?),
        None => prefs.provider(),
    }
}

pub fn store_key(provider: Option<&str>, key: &str, prefs: &AppConfig) -> Result<()> {
    let provider = pick_provider(provider, prefs)?;
    set_api_key(provider, key)?;
    println!("Stored API key for {}", provider);
    Ok(())
}

pub fn clear_key(provider: Option<&str>, prefs: &AppConfig) -> Result<()> {
    let provider = pick_provider(provider, prefs)?;
    delete_api_key(provider)?;
    println!("Removed API key for {}", provider);
    Ok(())
}

/// Report which providers have a usable key. Keys are never printed.
pub fn key_status(prefs: &AppConfig) -> Result<()> {
    let active = prefs.provider()?;
    for provider in [AiProvider::Gemini, AiProvider::Claude, AiProvider::OpenAi] {
        let state = if resolve_api_key(provider).is_some() {
            "configured"
        } else {
            "missing"
        };
        let marker = if provider == active { "*" } else { " " };
        println!("{} {:<8} {}", marker, provider.as_str(), state);
    }
    Ok(())
}
