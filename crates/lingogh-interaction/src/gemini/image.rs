//! Image synthesis over the Imagen `:predict` endpoint.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use lingogh_core::creative::ImageService;
use lingogh_core::error::{LingoghError, Result};
use serde::{Deserialize, Serialize};

use super::client::GeminiClient;

/// Image service requesting exactly one square PNG per prompt.
pub struct GeminiImageService {
    client: GeminiClient,
    model: String,
}

impl GeminiImageService {
    pub fn new(client: GeminiClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[derive(Serialize)]
struct PredictRequest {
    instances: Vec<Instance>,
    parameters: Parameters,
}

#[derive(Serialize)]
struct Instance {
    prompt: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Parameters {
    sample_count: u32,
    aspect_ratio: String,
    output_mime_type: String,
}

#[derive(Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: Option<String>,
}

#[async_trait]
impl ImageService for GeminiImageService {
    async fn generate_png(&self, prompt: &str) -> Result<Option<Vec<u8>>> {
        let request = PredictRequest {
            instances: vec![Instance {
                prompt: prompt.to_string(),
            }],
            parameters: Parameters {
                sample_count: 1,
                aspect_ratio: "1:1".to_string(),
                output_mime_type: "image/png".to_string(),
            },
        };

        let response: PredictResponse = self.client.post(&self.model, "predict", &request).await?;
        let Some(encoded) = response
            .predictions
            .into_iter()
            .find_map(|p| p.bytes_base64_encoded)
        else {
            return Ok(None);
        };

        let bytes = BASE64_STANDARD
            .decode(encoded.as_bytes())
            .map_err(|err| LingoghError::api(None, format!("image payload was not valid base64: {err}")))?;
        if bytes.is_empty() {
            return Ok(None);
        }
        Ok(Some(bytes))
    }
}
