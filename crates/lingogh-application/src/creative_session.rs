//! One-shot creative image session.
//!
//! A transient prompt-to-image cycle with no history: each generation clears
//! the previous outcome, and the displayed state is always either one image
//! or one error string, never both.

use std::sync::Arc;

use lingogh_core::creative::ImageService;
use lingogh_interaction::prompts;
use tracing::warn;

pub struct CreativeImageSession {
    service: Arc<dyn ImageService>,
    image: Option<Vec<u8>>,
    error: Option<String>,
    busy: bool,
}

impl CreativeImageSession {
    pub fn new(service: Arc<dyn ImageService>) -> Self {
        Self {
            service,
            image: None,
            error: None,
            busy: false,
        }
    }

    /// PNG bytes of the latest successful generation.
    pub fn image(&self) -> Option<&[u8]> {
        self.image.as_deref()
    }

    /// Error text of the latest failed generation.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Generates one square image for `prompt`, wrapped in the fixed
    /// stylistic template. Empty prompts and in-flight requests are ignored.
    pub async fn generate(&mut self, prompt: &str) {
        if prompt.trim().is_empty() || self.busy {
            return;
        }

        self.image = None;
        self.error = None;
        self.busy = true;

        let styled = prompts::image_prompt(prompt.trim());
        match self.service.generate_png(&styled).await {
            Ok(Some(bytes)) if !bytes.is_empty() => self.image = Some(bytes),
            Ok(_) => self.error = Some(prompts::IMAGE_FAILURE_TEXT.to_string()),
            Err(err) => {
                warn!(error = %err, "image generation failed");
                self.error = Some(prompts::IMAGE_FAILURE_TEXT.to_string());
            }
        }

        self.busy = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use lingogh_core::error::{LingoghError, Result};
    use std::sync::Mutex;

    struct MockImageService {
        // Outcomes consumed front-to-back, one per call; the last one sticks.
        outcomes: Mutex<Vec<Result<Option<Vec<u8>>>>>,
        last_prompt: Mutex<Option<String>>,
    }

    impl MockImageService {
        fn new(outcome: Result<Option<Vec<u8>>>) -> Self {
            Self::with_outcomes(vec![outcome])
        }

        fn with_outcomes(outcomes: Vec<Result<Option<Vec<u8>>>>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes),
                last_prompt: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl ImageService for MockImageService {
        async fn generate_png(&self, prompt: &str) -> Result<Option<Vec<u8>>> {
            *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
            let mut outcomes = self.outcomes.lock().unwrap();
            if outcomes.len() > 1 {
                outcomes.remove(0)
            } else {
                outcomes[0].clone()
            }
        }
    }

    #[tokio::test]
    async fn test_success_stores_image_and_no_error() {
        let service = Arc::new(MockImageService::new(Ok(Some(vec![1, 2, 3]))));
        let mut session = CreativeImageSession::new(service.clone());
        session.generate("a red hat").await;

        assert_eq!(session.image(), Some([1u8, 2, 3].as_slice()));
        assert!(session.error().is_none());

        let prompt = service.last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("\"a red hat\""));
        assert!(prompt.contains("modern digital painting"));
    }

    #[tokio::test]
    async fn test_empty_result_yields_fixed_error() {
        let mut session = CreativeImageSession::new(Arc::new(MockImageService::new(Ok(None))));
        session.generate("a red hat").await;

        assert!(session.image().is_none());
        assert_eq!(session.error(), Some(prompts::IMAGE_FAILURE_TEXT));
    }

    #[tokio::test]
    async fn test_service_failure_yields_fixed_error() {
        let mut session = CreativeImageSession::new(Arc::new(MockImageService::new(Err(
            LingoghError::api(Some(500), "boom"),
        ))));
        session.generate("a red hat").await;

        assert!(session.image().is_none());
        assert_eq!(session.error(), Some(prompts::IMAGE_FAILURE_TEXT));
    }

    #[tokio::test]
    async fn test_blank_prompt_is_a_no_op() {
        let service = Arc::new(MockImageService::new(Ok(Some(vec![1]))));
        let mut session = CreativeImageSession::new(service.clone());
        session.generate("   ").await;

        assert!(session.image().is_none());
        assert!(session.error().is_none());
        assert!(service.last_prompt.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_new_attempt_clears_previous_outcome() {
        let service = Arc::new(MockImageService::with_outcomes(vec![
            Ok(Some(vec![9])),
            Ok(None),
            Ok(Some(vec![7])),
        ]));
        let mut session = CreativeImageSession::new(service);

        session.generate("first").await;
        assert!(session.image().is_some());

        // A failed attempt replaces the image with the error...
        session.generate("second").await;
        assert!(session.image().is_none());
        assert_eq!(session.error(), Some(prompts::IMAGE_FAILURE_TEXT));

        // ...and a later success replaces the error with the image.
        session.generate("third").await;
        assert_eq!(session.image(), Some([7u8].as_slice()));
        assert!(session.error().is_none());
    }
}
