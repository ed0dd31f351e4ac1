//! Model interaction: send the resume image and instructions to Gemini.
//!
//! The request is a single `user` turn whose parts are, in order:
//!
//! 1. the job description text (may be empty),
//! 2. the first resume page as an inline base64 JPEG,
//! 3. the instruction text for the selected mode.
//!
//! Each call is fire-once: no retry, no backoff, no cache. A bad credential
//! and an unreachable service are reported as different errors so the
//! presentation layer can tell the user which one to fix.

use crate::config::ScreenerConfig;
use crate::error::ScreenerError;
use crate::pipeline::encode::{EncodedImagePayload, ImagePart};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::future::Future;
use tracing::{debug, info, warn};

/// Sends one multi-part request and returns the generated text verbatim.
pub trait CompletionRequester {
    fn request_completion(
        &self,
        context_text: &str,
        image_payload: &EncodedImagePayload,
        instruction_text: &str,
    ) -> impl Future<Output = Result<String, ScreenerError>> + Send;
}

// ── Wire types ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest<'a> {
    pub contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
pub struct Content<'a> {
    pub role: &'a str,
    pub parts: Vec<Part<'a>>,
}

/// Request part: text or inline media.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Part<'a> {
    Text {
        text: &'a str,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData<'a>,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData<'a> {
    pub mime_type: &'a str,
    pub data: &'a str,
}

impl<'a> From<&'a ImagePart> for InlineData<'a> {
    fn from(part: &'a ImagePart) -> Self {
        Self {
            mime_type: &part.mime_type,
            data: &part.data,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u64,
    #[serde(default)]
    pub candidates_token_count: u64,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if it has any.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let texts: Vec<&str> = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }
}

/// Build the ordered request body: `[context, image, instruction]`.
pub fn build_request<'a>(
    context_text: &'a str,
    image_payload: &'a EncodedImagePayload,
    instruction_text: &'a str,
) -> GenerateContentRequest<'a> {
    GenerateContentRequest {
        contents: vec![Content {
            role: "user",
            parts: vec![
                Part::Text { text: context_text },
                Part::InlineData {
                    inline_data: image_payload.first().into(),
                },
                Part::Text {
                    text: instruction_text,
                },
            ],
        }],
    }
}

/// Map a non-success HTTP response to the error taxonomy.
///
/// Gemini answers an invalid key with `400 INVALID_ARGUMENT` rather than
/// 401, so the body is inspected as well as the status.
pub fn classify_failure(status: StatusCode, body: &str) -> ScreenerError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .ok()
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| body.trim().to_string());

    let key_rejected = body.contains("API_KEY_INVALID") || body.contains("API key not valid");
    if status == StatusCode::UNAUTHORIZED
        || status == StatusCode::FORBIDDEN
        || (status == StatusCode::BAD_REQUEST && key_rejected)
    {
        ScreenerError::Authentication { detail: message }
    } else {
        ScreenerError::ServiceUnavailable {
            status: Some(status.as_u16()),
            detail: message,
        }
    }
}

/// [`CompletionRequester`] for the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiRequester {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
    model: String,
}

impl std::fmt::Debug for GeminiRequester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiRequester")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl GeminiRequester {
    pub fn new(config: &ScreenerConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            endpoint: format!(
                "{}/v1beta/models/{}:generateContent",
                config.api_base_url, config.model
            ),
            model: config.model.clone(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl CompletionRequester for GeminiRequester {
    async fn request_completion(
        &self,
        context_text: &str,
        image_payload: &EncodedImagePayload,
        instruction_text: &str,
    ) -> Result<String, ScreenerError> {
        let api_key = match self.api_key.as_deref() {
            Some(key) if !key.is_empty() => key,
            _ => {
                return Err(ScreenerError::Authentication {
                    detail: "no API key configured".into(),
                })
            }
        };

        let body = build_request(context_text, image_payload, instruction_text);
        info!("Requesting completion from {}", self.model);

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ScreenerError::ServiceUnavailable {
                status: e.status().map(|s| s.as_u16()),
                detail: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!("Model service returned {}", status);
            return Err(classify_failure(status, &text));
        }

        let parsed: GenerateContentResponse =
            response
                .json()
                .await
                .map_err(|e| ScreenerError::ServiceUnavailable {
                    status: Some(status.as_u16()),
                    detail: format!("malformed response: {e}"),
                })?;

        if let Some(ref usage) = parsed.usage_metadata {
            debug!(
                "{} input tokens, {} output tokens",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        parsed.text().ok_or(ScreenerError::EmptyCompletion)
    }
}
