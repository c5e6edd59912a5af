//! Session domain: navigation state, transcript messages, and the
//! conversation service seam.

pub mod conversation;
pub mod message;
pub mod model;

pub use conversation::{ConversationService, TutorConversation};
pub use message::{ChatReply, Message, Sender, Source};
pub use model::{FeatureTab, SessionState};
