//! Tutoring conversations over `generateContent` with web-search grounding.

use async_trait::async_trait;
use lingogh_core::error::{LingoghError, Result};
use lingogh_core::session::{ChatReply, ConversationService, Source, TutorConversation};
use serde_json::json;

use super::client::{Candidate, Content, GeminiClient, GenerateContentRequest, GenerateContentResponse};
use crate::prompts;

/// Opens Gemini-backed tutoring conversations.
pub struct GeminiConversationService {
    client: GeminiClient,
    model: String,
}

impl GeminiConversationService {
    pub fn new(client: GeminiClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl ConversationService for GeminiConversationService {
    async fn open(&self, language: &str) -> Result<Box<dyn TutorConversation>> {
        // A missing credential must surface here, before the opening turn.
        self.client.ensure_credential()?;
        Ok(Box::new(GeminiConversation {
            client: self.client.clone(),
            model: self.model.clone(),
            system_instruction: prompts::tutor_system_instruction(language),
            history: Vec::new(),
        }))
    }
}

/// An owned conversation context.
///
/// The turn history lives in the value and is resent in full on every call;
/// a failed turn is rolled back so a retry does not duplicate the user turn.
pub struct GeminiConversation {
    client: GeminiClient,
    model: String,
    system_instruction: String,
    history: Vec<Content>,
}

#[async_trait]
impl TutorConversation for GeminiConversation {
    async fn send(&mut self, message: &str) -> Result<ChatReply> {
        self.history.push(Content::user(message));

        let request = GenerateContentRequest {
            contents: self.history.clone(),
            system_instruction: Some(Content::system(&self.system_instruction)),
            tools: Some(vec![json!({"google_search": {}})]),
            generation_config: None,
        };

        let outcome: Result<ChatReply> = async {
            let response: GenerateContentResponse =
                self.client.post(&self.model, "generateContent", &request).await?;
            let candidate = response.into_first_candidate().ok_or_else(|| {
                LingoghError::api(None, "Gemini API returned no response candidates")
            })?;
            let text = candidate.text().ok_or_else(|| {
                LingoghError::api(None, "Gemini API returned no text in the response candidates")
            })?;
            let sources = extract_sources(&candidate);
            Ok(ChatReply { text, sources })
        }
        .await;

        match outcome {
            Ok(reply) => {
                self.history.push(Content::model(&reply.text));
                Ok(reply)
            }
            Err(err) => {
                self.history.pop();
                Err(err)
            }
        }
    }
}

/// Maps grounding chunks to sources.
///
/// Chunks without a web reference, or with an empty uri or title, are
/// dropped; the order of survivors matches the raw chunk order.
pub(crate) fn extract_sources(candidate: &Candidate) -> Vec<Source> {
    candidate
        .grounding_metadata
        .as_ref()
        .map(|m| m.grounding_chunks.as_slice())
        .unwrap_or(&[])
        .iter()
        .filter_map(|chunk| chunk.web.as_ref())
        .map(|web| Source {
            uri: web.uri.clone(),
            title: web.title.clone(),
        })
        .filter(|source| !source.uri.is_empty() && !source.title.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn candidate_with_chunks(chunks: serde_json::Value) -> Candidate {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"parts": [{"text": "ok"}]},
                "groundingMetadata": {"groundingChunks": chunks}
            }]
        }))
        .unwrap();
        response.into_first_candidate().unwrap()
    }

    #[test]
    fn test_sources_drop_incomplete_citations() {
        let candidate = candidate_with_chunks(json!([
            {"web": {"uri": "https://a.example", "title": "A"}},
            {"web": {"uri": "", "title": "missing uri"}},
            {"web": {"uri": "https://c.example", "title": ""}},
            {"web": {"uri": "https://d.example"}},
            {"retrievedContext": {"uri": "ignored"}},
            {"web": {"uri": "https://e.example", "title": "E"}}
        ]));

        let sources = extract_sources(&candidate);
        assert_eq!(
            sources,
            vec![
                Source {
                    uri: "https://a.example".to_string(),
                    title: "A".to_string()
                },
                Source {
                    uri: "https://e.example".to_string(),
                    title: "E".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_sources_preserve_raw_order() {
        let candidate = candidate_with_chunks(json!([
            {"web": {"uri": "https://b.example", "title": "B"}},
            {"web": {"uri": "https://a.example", "title": "A"}}
        ]));
        let sources = extract_sources(&candidate);
        assert_eq!(sources[0].title, "B");
        assert_eq!(sources[1].title, "A");
    }

    #[test]
    fn test_no_grounding_metadata_means_no_sources() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [{"text": "ok"}]}}]
        }))
        .unwrap();
        let candidate = response.into_first_candidate().unwrap();
        assert!(extract_sources(&candidate).is_empty());
    }
}
