//! Transcript message types.

use serde::{Deserialize, Serialize};

/// Who authored a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// Typed by the learner.
    User,
    /// Produced by the tutor model.
    Ai,
}

/// A web reference attached to a grounded AI reply.
///
/// Both fields are non-empty; citations missing either are dropped before a
/// source is ever constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub uri: String,
    pub title: String,
}

/// A single entry in the chat transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique token within the transcript
    pub id: String,
    pub text: String,
    pub sender: Sender,
    /// Grounding sources; only ever present on AI messages
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<Source>,
}

impl Message {
    /// A learner-authored message.
    pub fn user(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            sender: Sender::User,
            sources: Vec::new(),
        }
    }

    /// A tutor-authored message with its grounding sources.
    pub fn ai(id: impl Into<String>, text: impl Into<String>, sources: Vec<Source>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            sender: Sender::Ai,
            sources,
        }
    }
}

/// What one conversational turn produced.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatReply {
    pub text: String,
    pub sources: Vec<Source>,
}
