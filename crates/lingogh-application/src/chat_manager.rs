//! Chat transcript lifecycle.
//!
//! Owns the ordered message list for one language-tutoring conversation and
//! mediates turns with the conversation service. Failures never escape:
//! they degrade into fixed AI-sender messages so the transcript stays the
//! single source of truth for what the learner saw.

use std::sync::Arc;

use lingogh_core::id::IdProvider;
use lingogh_core::session::{ChatReply, ConversationService, Message, TutorConversation};
use lingogh_interaction::prompts;
use tracing::warn;

pub struct ChatTranscriptManager {
    language: String,
    service: Arc<dyn ConversationService>,
    ids: Arc<dyn IdProvider>,
    conversation: Option<Box<dyn TutorConversation>>,
    transcript: Vec<Message>,
    busy: bool,
}

impl ChatTranscriptManager {
    pub fn new(
        language: impl Into<String>,
        service: Arc<dyn ConversationService>,
        ids: Arc<dyn IdProvider>,
    ) -> Self {
        Self {
            language: language.into(),
            service,
            ids,
            conversation: None,
            transcript: Vec::new(),
            busy: false,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Resets the transcript, opens a fresh conversation, and issues the
    /// opening turn without user-visible input.
    ///
    /// If the conversation cannot be opened (e.g. missing credential), the
    /// transcript becomes a single AI message with the connection-failure
    /// text and later sends no-op against the missing context.
    pub async fn initialize(&mut self) {
        self.transcript.clear();
        self.conversation = None;
        self.busy = true;

        match self.service.open(&self.language).await {
            Ok(mut conversation) => {
                let reply =
                    Self::exchange(conversation.as_mut(), &prompts::opening_message(&self.language))
                        .await;
                self.push_ai(reply);
                self.conversation = Some(conversation);
            }
            Err(err) => {
                warn!(language = %self.language, error = %err, "failed to open tutoring conversation");
                let id = self.ids.next_id();
                self.transcript
                    .push(Message::ai(id, prompts::CONNECT_FAILURE_TEXT, Vec::new()));
            }
        }

        self.busy = false;
    }

    /// Sends one user turn.
    ///
    /// Empty/whitespace input and in-flight turns are ignored. The user
    /// message is appended optimistically; when a context exists the attempt
    /// then appends exactly one AI message: the reply, or the fixed apology
    /// on failure.
    pub async fn send(&mut self, text: &str) {
        if text.trim().is_empty() || self.busy {
            return;
        }

        let user_id = self.ids.next_id();
        self.transcript.push(Message::user(user_id, text));

        let Some(mut conversation) = self.conversation.take() else {
            return;
        };

        self.busy = true;
        let reply = Self::exchange(conversation.as_mut(), text).await;
        self.push_ai(reply);
        self.conversation = Some(conversation);
        self.busy = false;
    }

    async fn exchange(conversation: &mut dyn TutorConversation, text: &str) -> ChatReply {
        match conversation.send(text).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!(error = %err, "tutor turn failed");
                ChatReply {
                    text: prompts::SEND_FAILURE_TEXT.to_string(),
                    sources: Vec::new(),
                }
            }
        }
    }

    fn push_ai(&mut self, reply: ChatReply) {
        let id = self.ids.next_id();
        self.transcript.push(Message::ai(id, reply.text, reply.sources));
    }
}
