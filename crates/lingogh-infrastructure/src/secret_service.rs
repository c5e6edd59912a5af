//! Secret service implementation.
//!
//! Reads the Gemini API key from the process environment. The key is
//! captured once at construction so mutating the environment mid-session
//! does not change behavior.

use lingogh_core::error::{LingoghError, Result};
use lingogh_core::secret::SecretService;

/// Primary environment variable holding the API key.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
/// Fallback variable, for parity with the hosted configuration.
pub const API_KEY_FALLBACK_VAR: &str = "API_KEY";

/// Env-backed [`SecretService`].
///
/// Absence of the key is not an error here; it surfaces as a config error
/// from [`SecretService::api_key`] at the first service call, which the UI
/// degrades to an inline message.
#[derive(Clone, Default)]
pub struct EnvSecretService {
    key: Option<String>,
}

impl EnvSecretService {
    /// Captures the key from `GEMINI_API_KEY`, falling back to `API_KEY`.
    pub fn from_env() -> Self {
        let key = std::env::var(API_KEY_VAR)
            .or_else(|_| std::env::var(API_KEY_FALLBACK_VAR))
            .ok()
            .filter(|k| !k.trim().is_empty());
        Self { key }
    }

    /// Uses an explicit key (tests, embedding).
    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
        }
    }
}

impl SecretService for EnvSecretService {
    fn api_key(&self) -> Result<String> {
        self.key
            .clone()
            .ok_or_else(|| LingoghError::config(format!("{API_KEY_VAR} environment variable is not set")))
    }
}
