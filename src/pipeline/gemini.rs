//! Extraction client for the generative extraction service.
//!
//! One outbound call per invocation, no retries here — failure handling
//! lives in the batch runner. The request pins temperature to zero:
//! outputs for the same document must be reproducible across calls. That
//! is a design invariant, not a convenience default.

use async_trait::async_trait;
use serde_json::json;

use super::error::ExtractError;
use super::types::Record;
use crate::config::GeminiConfig;
use crate::document::DocumentPayload;
use crate::schema::Schema;

/// Determinism invariant: same document, same schema, same output.
const TEMPERATURE: f64 = 0.0;

/// Request for one extraction call. Constructed per document, discarded
/// after the call completes.
#[derive(Debug)]
pub struct ExtractionRequest<'a> {
    pub payload: &'a DocumentPayload,
    /// Schema-derived structured-output contract (array of objects).
    pub contract: serde_json::Value,
    pub instructions: &'a str,
}

/// Transport seam in front of the extraction service. Implementations
/// return the raw response text; parsing stays in [`ExtractionClient`].
#[async_trait]
pub trait ExtractionBackend: Send + Sync {
    async fn generate(&self, request: &ExtractionRequest<'_>) -> Result<String, ExtractError>;
}

// ═══════════════════════════════════════════
// Gemini backend
// ═══════════════════════════════════════════

/// HTTP backend for the Gemini `generateContent` endpoint.
pub struct GeminiBackend {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    timeout_secs: u64,
}

impl GeminiBackend {
    pub fn new(config: &GeminiConfig) -> Result<Self, ExtractError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ExtractError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            timeout_secs: config.timeout_secs,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `generateContent` request body: instructions part, inline base64
    /// document part, and the generation config that pins temperature to
    /// zero and hands over the schema contract.
    fn request_body(&self, request: &ExtractionRequest<'_>) -> serde_json::Value {
        json!({
            "contents": [{
                "parts": [
                    { "text": request.instructions },
                    {
                        "inlineData": {
                            "mimeType": request.payload.media_type,
                            "data": request.payload.data,
                        }
                    },
                ],
            }],
            "generationConfig": {
                "temperature": TEMPERATURE,
                "responseMimeType": "application/json",
                "responseSchema": request.contract,
            },
        })
    }
}

#[async_trait]
impl ExtractionBackend for GeminiBackend {
    async fn generate(&self, request: &ExtractionRequest<'_>) -> Result<String, ExtractError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let body = self.request_body(request);

        tracing::debug!(url = %url, model = %self.model, "Extraction request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ExtractError::Transport(format!(
                        "Request timed out after {}s",
                        self.timeout_secs
                    ))
                } else {
                    ExtractError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExtractError::Transport(format!(
                "Extraction service returned {status}: {body}"
            )));
        }

        let parsed: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ExtractError::MalformedResponse(e.to_string()))?;

        // Candidate text parts concatenated; the service splits long JSON
        // across parts.
        let parts = parsed["candidates"][0]["content"]["parts"]
            .as_array()
            .ok_or_else(|| {
                ExtractError::MalformedResponse("Response has no candidate parts".to_string())
            })?;
        let text: String = parts
            .iter()
            .filter_map(|p| p["text"].as_str())
            .collect();
        if text.is_empty() {
            return Err(ExtractError::MalformedResponse(
                "Candidate parts carry no text".to_string(),
            ));
        }
        Ok(text)
    }
}

// ═══════════════════════════════════════════
// Extraction client
// ═══════════════════════════════════════════

/// Applies a schema to one prepared document via the backend and parses
/// the structured result.
pub struct ExtractionClient<'a> {
    backend: &'a dyn ExtractionBackend,
}

impl<'a> ExtractionClient<'a> {
    pub fn new(backend: &'a dyn ExtractionBackend) -> Self {
        Self { backend }
    }

    /// One extraction call: schema contract + payload + instructions in,
    /// zero or more records out. The elements come back verbatim — the
    /// upstream contract enforces field shapes, the client only confirms
    /// the array-of-object structure.
    pub async fn extract(
        &self,
        schema: &Schema,
        payload: &DocumentPayload,
        instructions: &str,
    ) -> Result<Vec<Record>, ExtractError> {
        let request = ExtractionRequest {
            payload,
            contract: schema.response_contract(),
            instructions,
        };
        let text = self.backend.generate(&request).await?;
        parse_records(&text)
    }
}

/// Parse the response text as a JSON array of objects.
pub(crate) fn parse_records(text: &str) -> Result<Vec<Record>, ExtractError> {
    let value: serde_json::Value = serde_json::from_str(text.trim())
        .map_err(|e| ExtractError::MalformedResponse(e.to_string()))?;
    let elements = match value {
        serde_json::Value::Array(elements) => elements,
        _ => {
            return Err(ExtractError::MalformedResponse(
                "AI response is not an array".to_string(),
            ))
        }
    };
    elements
        .into_iter()
        .map(|element| {
            Record::from_value(element).ok_or_else(|| {
                ExtractError::MalformedResponse(
                    "AI response array holds a non-object element".to_string(),
                )
            })
        })
        .collect()
}
