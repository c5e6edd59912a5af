//! Secret management service trait.
//!
//! Defines the interface for accessing the API credential.

use crate::error::Result;

/// Service for accessing the generative-API credential.
///
/// # Security Note
///
/// Implementations should ensure that the key is never logged and never
/// embedded in error messages.
pub trait SecretService: Send + Sync {
    /// Returns the API key.
    ///
    /// # Errors
    ///
    /// Returns a config error when no key is configured; callers degrade
    /// this to an inline message rather than a crash.
    fn api_key(&self) -> Result<String>;
}
