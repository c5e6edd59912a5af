//! Conversation service traits.
//!
//! Defines the seam between the chat transcript manager and the external
//! conversational model. The conversation context is an explicit owned value
//! returned by [`ConversationService::open`] and threaded into every
//! [`TutorConversation::send`] call; there is no hidden shared state.

use async_trait::async_trait;

use super::message::ChatReply;
use crate::error::Result;

/// An owned, in-progress tutoring conversation.
///
/// Implementations carry the full prior history inside the value; `send`
/// submits one user turn together with that history and returns the model's
/// reply plus any grounding sources.
#[async_trait]
pub trait TutorConversation: Send {
    /// Sends one user turn and returns the tutor's reply.
    async fn send(&mut self, message: &str) -> Result<ChatReply>;
}

/// Opens tutoring conversations scoped to one language.
#[async_trait]
pub trait ConversationService: Send + Sync {
    /// Opens a fresh conversation with the tutor persona for `language`.
    ///
    /// # Errors
    ///
    /// Fails when the backing service cannot be reached at all, most notably
    /// when no API credential is configured.
    async fn open(&self, language: &str) -> Result<Box<dyn TutorConversation>>;
}
