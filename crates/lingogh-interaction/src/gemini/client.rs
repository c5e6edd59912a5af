//! Shared Gemini REST plumbing.
//!
//! One thin client wraps `reqwest` and the credential lookup; the chat,
//! plan, and image services all post through it. The wire structs mirror the
//! `generateContent` request/response shapes.

use std::sync::Arc;

use lingogh_core::error::{LingoghError, Result};
use lingogh_core::secret::SecretService;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Client for the Gemini REST API.
///
/// The credential is resolved per call, so a missing key surfaces as an
/// inline message at the call site instead of failing startup.
#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    secret: Arc<dyn SecretService>,
}

impl GeminiClient {
    pub fn new(secret: Arc<dyn SecretService>) -> Self {
        Self {
            http: Client::new(),
            secret,
        }
    }

    /// Fails fast when no API key is configured.
    pub fn ensure_credential(&self) -> Result<()> {
        self.secret.api_key().map(|_| ())
    }

    /// POSTs `body` to `{model}:{verb}` and deserializes the JSON response.
    pub async fn post<B, R>(&self, model: &str, verb: &str, body: &B) -> Result<R>
    where
        B: Serialize + Sync,
        R: for<'de> Deserialize<'de>,
    {
        let api_key = self.secret.api_key()?;
        let url = format!("{BASE_URL}/{model}:{verb}?key={api_key}");
        tracing::debug!(%model, verb, "calling Gemini API");

        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|err| LingoghError::api(None, format!("Gemini API request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        response
            .json()
            .await
            .map_err(|err| LingoghError::api(None, format!("Failed to parse Gemini response: {err}")))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(text: impl Into<String>) -> Self {
        Self::with_role("user", text)
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self::with_role("model", text)
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::with_role("system", text)
    }

    fn with_role(role: &str, text: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            parts: vec![Part { text: text.into() }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

#[derive(Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: Value,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    pub candidates: Option<Vec<Candidate>>,
}

impl GenerateContentResponse {
    /// The first candidate, which carries the reply text and any grounding.
    pub fn into_first_candidate(self) -> Option<Candidate> {
        self.candidates.and_then(|mut c| {
            if c.is_empty() {
                None
            } else {
                Some(c.swap_remove(0))
            }
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<ContentResponse>,
    #[serde(rename = "groundingMetadata")]
    pub grounding_metadata: Option<GroundingMetadata>,
}

impl Candidate {
    /// Concatenated text of all parts; `None` when the candidate carried no
    /// text at all.
    pub fn text(&self) -> Option<String> {
        let parts = &self.content.as_ref()?.parts;
        let text: String = parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect::<Vec<_>>()
            .join("");
        if text.is_empty() { None } else { Some(text) }
    }
}

#[derive(Debug, Deserialize)]
pub struct ContentResponse {
    #[serde(default)]
    pub parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
pub struct PartResponse {
    pub text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GroundingMetadata {
    #[serde(rename = "groundingChunks", default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
pub struct GroundingChunk {
    pub web: Option<WebSource>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WebSource {
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

fn map_http_error(status: StatusCode, body: String) -> LingoghError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    LingoghError::api(Some(status.as_u16()), message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_omits_absent_fields() {
        let request = GenerateContentRequest {
            contents: vec![Content::user("hola")],
            system_instruction: None,
            tools: None,
            generation_config: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("system_instruction").is_none());
        assert!(value.get("tools").is_none());
        assert!(value.get("generation_config").is_none());
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hola");
    }

    #[test]
    fn test_candidate_text_concatenates_parts() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"parts": [{"text": "Hola"}, {"text": ", amigo"}]}
            }]
        }))
        .unwrap();
        let candidate = response.into_first_candidate().unwrap();
        assert_eq!(candidate.text().unwrap(), "Hola, amigo");
    }

    #[test]
    fn test_empty_candidates_yield_none() {
        let response: GenerateContentResponse =
            serde_json::from_value(json!({"candidates": []})).unwrap();
        assert!(response.into_first_candidate().is_none());

        let response: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.into_first_candidate().is_none());
    }

    #[test]
    fn test_map_http_error_uses_gemini_error_body() {
        let err = map_http_error(
            StatusCode::TOO_MANY_REQUESTS,
            json!({"error": {"code": 429, "message": "quota", "status": "RESOURCE_EXHAUSTED"}})
                .to_string(),
        );
        match err {
            LingoghError::Api { status, message } => {
                assert_eq!(status, Some(429));
                assert_eq!(message, "RESOURCE_EXHAUSTED: quota");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_map_http_error_falls_back_to_raw_body() {
        let err = map_http_error(StatusCode::BAD_GATEWAY, "upstream gone".to_string());
        match err {
            LingoghError::Api { status, message } => {
                assert_eq!(status, Some(502));
                assert_eq!(message, "upstream gone");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
