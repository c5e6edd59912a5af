//! Wires the default production services.

use std::sync::Arc;

use lingogh_core::error::Result;
use lingogh_core::secret::SecretService;
use lingogh_infrastructure::{AppConfig, JsonFileStore, LingoghPaths, SystemClock, UuidIdProvider};
use lingogh_interaction::{
    GeminiClient, GeminiConversationService, GeminiImageService, GeminiPlanGenerator,
};

use crate::shell::{TutorServices, TutorShell};

/// Builds a shell backed by the Gemini services and the file-backed plan
/// store beneath `paths`.
pub fn build_shell(
    paths: &LingoghPaths,
    config: &AppConfig,
    secret: Arc<dyn SecretService>,
) -> Result<TutorShell> {
    let client = GeminiClient::new(secret);
    let services = TutorServices {
        conversations: Arc::new(GeminiConversationService::new(
            client.clone(),
            &config.chat_model,
        )),
        plans: Arc::new(GeminiPlanGenerator::new(client.clone(), &config.chat_model)),
        images: Arc::new(GeminiImageService::new(client, &config.image_model)),
        store: Arc::new(JsonFileStore::new(paths.plans_dir())?),
        ids: Arc::new(UuidIdProvider),
        clock: Arc::new(SystemClock),
    };
    Ok(TutorShell::new(services))
}
