//! Gemini-backed implementations of the Lingogh service seams.

pub mod gemini;
pub mod prompts;

pub use gemini::chat::GeminiConversationService;
pub use gemini::client::GeminiClient;
pub use gemini::image::GeminiImageService;
pub use gemini::plan::GeminiPlanGenerator;
