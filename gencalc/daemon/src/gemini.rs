//! Gemini Upstream Client
//!
//! Sends the uploaded drawing to the Gemini `generateContent` endpoint as
//! inline base64 image data plus a fixed calculation instruction, and
//! extracts the candidate text from the response. The model's parsing and
//! arithmetic are opaque; this module only speaks the API shape.

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde_json::Value;

/// Instruction sent alongside every image.
const INSTRUCTION: &str = "Calculate the equation given in the image. \
    Use only the symbols +, -, *, / and parenthesis. \
    Detect decimals (e.g. 2.5 + 3.5). \
    Return only the computed numeric solution and short explanation if needed.";

/// Default Gemini model identifier.
pub const DEFAULT_MODEL_ID: &str = "models/gemini-1.5-flash";

/// Errors from the upstream Gemini call.
#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    /// Transport-level failure reaching the API.
    #[error("gemini request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-OK status; the body is kept for the
    /// failure response's `details` field.
    #[error("gemini api returned an error")]
    Api {
        /// Upstream response body.
        details: Value,
    },
}

/// Client for the Gemini `generateContent` API.
#[derive(Clone, Debug)]
pub struct GeminiClient {
    api_key: String,
    model_id: String,
    http_client: reqwest::Client,
}

impl GeminiClient {
    /// Create a client for the given API key and model.
    pub fn new(api_key: impl Into<String>, model_id: impl Into<String>) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;
        Ok(Self {
            api_key: api_key.into(),
            model_id: model_id.into(),
            http_client,
        })
    }

    /// The configured model identifier.
    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    fn generate_url(&self) -> String {
        format!(
            "https://generativelanguage.googleapis.com/v1/{}:generateContent?key={}",
            self.model_id, self.api_key
        )
    }

    /// Build the `generateContent` request body for one image.
    fn build_request(&self, mime_type: &str, image: &[u8]) -> Value {
        serde_json::json!({
            "contents": [
                {
                    "parts": [
                        {
                            "inlineData": {
                                "mimeType": mime_type,
                                "data": BASE64.encode(image),
                            }
                        },
                        {
                            "text": INSTRUCTION,
                        }
                    ]
                }
            ]
        })
    }

    /// Submit an image and return the raw (uncleaned) response text.
    pub async fn solve_image(&self, mime_type: &str, image: &[u8]) -> Result<String, GeminiError> {
        let body = self.build_request(mime_type, image);

        let response = self
            .http_client
            .post(self.generate_url())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let data: Value = response.json().await?;

        if !status.is_success() {
            tracing::error!(%status, "gemini api error");
            return Err(GeminiError::Api { details: data });
        }

        Ok(extract_text(&data))
    }
}

/// Pull the text parts out of the first candidate, joined with newlines.
/// Missing or oddly-shaped responses yield an empty string, which the
/// handler reports as an extraction failure.
fn extract_text(data: &Value) -> String {
    let parts = data
        .pointer("/candidates/0/content/parts")
        .and_then(Value::as_array);

    match parts {
        Some(parts) => parts
            .iter()
            .filter_map(|p| p.get("text").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join("\n"),
        None => String::new(),
    }
}
