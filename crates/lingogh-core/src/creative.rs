//! Image service trait.

use async_trait::async_trait;

use crate::error::Result;

/// One-shot prompt-to-image service.
#[async_trait]
pub trait ImageService: Send + Sync {
    /// Requests exactly one square PNG for `prompt`.
    ///
    /// Returns `Ok(None)` when the service answered successfully but without
    /// image bytes; the caller treats that the same as a failure.
    async fn generate_png(&self, prompt: &str) -> Result<Option<Vec<u8>>>;
}
