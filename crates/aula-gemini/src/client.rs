//! Streaming structured generation against the Gemini REST API.
//!
//! A single `streamGenerateContent?alt=sse` call carries the system
//! instruction, the task prompt and the response schema. The returned
//! stream yields text fragments in arrival order; concatenated, they form
//! one JSON Plan Document. The stream is single-pass and cannot be
//! cancelled or restarted.

use std::pin::Pin;

use async_stream::try_stream;
use aula_core::models::reference::ReferenceData;
use aula_core::models::request::LessonPlanRequest;
use aula_core::schema::build_response_schema;
use futures::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::classify::{RemoteFailure, classify, classify_message};
use crate::error::GeminiError;
use crate::prompt::{REFERENCE_CHAR_BUDGET, build_system_instruction, build_task_prompt};
use crate::sse::SseDecoder;

pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 8192;

/// Lazily produced text fragments of one generation call.
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<String, GeminiError>> + Send>>;

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    /// Resolved once at startup. `None` or blank means "not configured".
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    /// Per-dataset character budget for embedded reference data.
    pub reference_char_budget: usize,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_API_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            reference_char_budget: REFERENCE_CHAR_BUDGET,
        }
    }
}

// ── Wire types ───────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StreamChunk {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u64,
    #[serde(default)]
    candidates_token_count: u64,
}

fn text_content(role: Option<&str>, text: String) -> Content {
    Content {
        role: role.map(str::to_string),
        parts: vec![Part { text: Some(text) }],
    }
}

// ── Client ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    settings: GeminiSettings,
}

impl GeminiClient {
    pub fn new(settings: GeminiSettings) -> Self {
        Self::with_http(reqwest::Client::new(), settings)
    }

    pub fn with_http(http: reqwest::Client, settings: GeminiSettings) -> Self {
        Self { http, settings }
    }

    pub fn settings(&self) -> &GeminiSettings {
        &self.settings
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// The configured credential, or a configuration error if absent.
    pub fn api_key(&self) -> Result<&str, GeminiError> {
        self.settings
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| GeminiError::Config("no Gemini API key configured".to_string()))
    }

    fn stream_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:streamGenerateContent?alt=sse",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.model
        )
    }

    fn build_request(
        &self,
        request: &LessonPlanRequest,
        reference: &ReferenceData,
    ) -> GenerateRequest {
        let instruction = build_system_instruction(reference, self.settings.reference_char_budget);
        let prompt = build_task_prompt(request);

        GenerateRequest {
            system_instruction: text_content(None, instruction),
            contents: vec![text_content(Some("user"), prompt)],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: build_response_schema(),
                temperature: self.settings.temperature,
                max_output_tokens: self.settings.max_output_tokens,
            },
        }
    }

    /// Issue the generation call and return its fragment stream.
    ///
    /// Fails before any network I/O when the credential is missing or the
    /// request is incomplete. HTTP-level failures are classified into a
    /// [`RemoteFailure`].
    pub async fn generate_stream(
        &self,
        request: &LessonPlanRequest,
        reference: &ReferenceData,
    ) -> Result<FragmentStream, GeminiError> {
        let api_key = self.api_key()?;
        request.validate()?;

        let body = self.build_request(request, reference);

        info!(model = %self.settings.model, "sending streaming generation request");

        let response = self
            .http
            .post(self.stream_url())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let (failure, detail) = classify(status.as_u16(), &text);
            warn!(status = status.as_u16(), ?failure, %detail, "generation request failed");
            return Err(GeminiError::Remote { failure, detail });
        }

        Ok(Box::pin(fragments(response.bytes_stream())))
    }
}

fn transport_error(e: reqwest::Error) -> GeminiError {
    let detail = e.to_string();
    GeminiError::Remote {
        failure: classify_message(&detail),
        detail,
    }
}

/// Turn an SSE byte stream into text fragments.
fn fragments<S, B>(bytes: S) -> impl Stream<Item = Result<String, GeminiError>> + Send
where
    S: Stream<Item = Result<B, reqwest::Error>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
{
    try_stream! {
        let mut bytes = Box::pin(bytes);
        let mut decoder = SseDecoder::new();
        let mut count = 0usize;

        while let Some(chunk) = bytes.next().await {
            let chunk = chunk.map_err(transport_error)?;
            for event in decoder.push(chunk.as_ref()) {
                for fragment in parse_event(&event)? {
                    count += 1;
                    yield fragment;
                }
            }
        }

        if let Some(event) = decoder.finish() {
            for fragment in parse_event(&event)? {
                count += 1;
                yield fragment;
            }
        }

        debug!(fragments = count, "generation stream complete");
    }
}

/// Extract the text parts of one SSE event payload.
pub(crate) fn parse_event(event: &str) -> Result<Vec<String>, GeminiError> {
    let value: Value = serde_json::from_str(event)
        .map_err(|e| GeminiError::ResponseParse(format!("invalid stream event: {e}")))?;

    if let Some(error) = value.get("error") {
        let code = error
            .get("code")
            .and_then(Value::as_u64)
            .and_then(|c| u16::try_from(c).ok())
            .unwrap_or(500);
        let (failure, detail) = classify(code, event);
        return Err(GeminiError::Remote { failure, detail });
    }

    let chunk: StreamChunk = serde_json::from_value(value)
        .map_err(|e| GeminiError::ResponseParse(format!("unexpected stream event: {e}")))?;

    if let Some(reason) = chunk.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(GeminiError::Remote {
            failure: RemoteFailure::ContentRejected,
            detail: format!("prompt blocked: {reason}"),
        });
    }

    if let Some(usage) = chunk.usage_metadata {
        debug!(
            input_tokens = usage.prompt_token_count,
            output_tokens = usage.candidates_token_count,
            "token usage"
        );
    }

    let mut texts = Vec::new();
    if let Some(candidate) = chunk.candidates.into_iter().next() {
        match candidate.finish_reason.as_deref() {
            Some(reason @ ("SAFETY" | "PROHIBITED_CONTENT" | "BLOCKLIST" | "SPII")) => {
                return Err(GeminiError::Remote {
                    failure: RemoteFailure::ContentRejected,
                    detail: format!("response blocked: finishReason={reason}"),
                });
            }
            Some("MAX_TOKENS") => {
                warn!("generation hit the output token limit; the document may be truncated");
            }
            _ => {}
        }

        if let Some(content) = candidate.content {
            texts.extend(
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .filter(|t| !t.is_empty()),
            );
        }
    }

    Ok(texts)
}
