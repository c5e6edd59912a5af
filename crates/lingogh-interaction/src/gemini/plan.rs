//! Structured daily-plan generation.

use async_trait::async_trait;
use lingogh_core::error::{LingoghError, Result};
use lingogh_core::plan::{GeneratedTask, PlanGenerator};
use serde::Deserialize;
use serde_json::{Value, json};

use super::client::{Content, GeminiClient, GenerateContentRequest, GenerateContentResponse, GenerationConfig};
use crate::prompts;

/// Plan generator constraining the model to a strict JSON schema.
pub struct GeminiPlanGenerator {
    client: GeminiClient,
    model: String,
}

impl GeminiPlanGenerator {
    pub fn new(client: GeminiClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

/// Response schema: `{ tasks: [{ description, type }] }` with the type
/// restricted to the four-way activity enum.
pub(crate) fn plan_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "tasks": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "description": {"type": "STRING"},
                        "type": {
                            "type": "STRING",
                            "enum": ["listening", "speaking", "writing", "other"]
                        }
                    },
                    "required": ["description", "type"]
                }
            }
        },
        "required": ["tasks"]
    })
}

#[derive(Deserialize)]
struct PlanResponse {
    tasks: Vec<GeneratedTask>,
}

#[async_trait]
impl PlanGenerator for GeminiPlanGenerator {
    async fn generate_tasks(&self, language: &str) -> Result<Vec<GeneratedTask>> {
        let request = GenerateContentRequest {
            contents: vec![Content::user(prompts::daily_plan_prompt(language))],
            system_instruction: None,
            tools: None,
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: plan_response_schema(),
            }),
        };

        let response: GenerateContentResponse =
            self.client.post(&self.model, "generateContent", &request).await?;
        let text = response
            .into_first_candidate()
            .and_then(|c| c.text())
            .ok_or_else(|| LingoghError::api(None, "Gemini API returned no plan text"))?;

        let parsed: PlanResponse = serde_json::from_str(text.trim())
            .map_err(|err| LingoghError::schema(format!("plan response did not match schema: {err}")))?;
        Ok(parsed.tasks)
    }
}
