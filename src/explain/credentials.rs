//! API key lookup for explanation providers.
//!
//! Keys are resolved from the environment first, then the OS keychain.

use keyring::Entry;
use tracing::{info, warn};

use crate::error::ThreadLogicError;

use super::types::AiProvider;

/// Keychain account name shared by all providers.
pub const KEYCHAIN_USER: &str = "threadlogic";

/// Provider-agnostic override checked before the provider-specific variable.
pub const GENERIC_ENV_VAR: &str = "THREADLOGIC_API_KEY";

/// Resolve an API key for `provider`, or `None` when nothing is configured.
///
/// Keychain failures are logged and treated as "no key" so that a missing
/// secret service degrades to the fallback explanation instead of an error.
pub fn resolve_api_key(provider: AiProvider) -> Option<String> {
    if let Some(key) = env_key(GENERIC_ENV_VAR).or_else(|| env_key(provider.env_var())) {
        return Some(key);
    }
    match get_api_key(provider) {
        Ok(key) => key,
        Err(e) => {
            warn!("Keychain lookup failed for {}: {}", provider, e);
            None
        }
    }
}

fn env_key(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn entry(provider: AiProvider) -> Result<Entry, ThreadLogicError> {
    let service = provider.keychain_service();
    Entry::new(&service, KEYCHAIN_USER).map_err(|e| {
        warn!("Failed to create keyring entry for {}: {}", service, e);
        ThreadLogicError::Keychain(e.to_string())
    })
}

pub fn get_api_key(provider: AiProvider) -> Result<Option<String>, ThreadLogicError> {
    match entry(provider)?.get_password() {
        Ok(password) => Ok(Some(password)),
        Err(keyring::Error::NoEntry) => {
            info!("No API key stored for {}", provider);
            Ok(None)
        }
        Err(e) => Err(ThreadLogicError::Keychain(e.to_string())),
    }
}

pub fn set_api_key(provider: AiProvider, key: &str) -> Result<(), ThreadLogicError> {
    let key = key.trim();
    if key.is_empty() {
        return Err(ThreadLogicError::Config("API key must not be empty".to_string()));
    }
    info!("Storing API key for {}", provider);
    entry(provider)?
        .set_password(key)
        .map_err(|e| ThreadLogicError::Keychain(e.to_string()))
}

pub fn delete_api_key(provider: AiProvider) -> Result<(), ThreadLogicError> {
    info!("Deleting API key for {}", provider);
    match entry(provider)?.delete_credential() {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(ThreadLogicError::Keychain(e.to_string())),
    }
}
