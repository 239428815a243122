//! Gemini adapter: structured completions over the `generateContent` REST API.
//!
//! One blocking HTTPS request per call with a bounded timeout. The reply's
//! text parts are returned untouched; validating them is the application's
//! job.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{ApiKey, ModelConfig};
use crate::ports::{GenerationRequest, GenerativeModel, ModelReply, TransportError};
use crate::HeartsenseError;

const API_KEY_HEADER: &str = "x-goog-api-key";
const JSON_MIME_TYPE: &str = "application/json";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a Value,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl<'a> GenerateContentRequest<'a> {
    fn from_request(request: &'a GenerationRequest) -> Self {
        Self {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: &request.system_instruction,
                }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part {
                    text: &request.prompt,
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: JSON_MIME_TYPE,
                response_schema: &request.response_schema,
            },
        }
    }
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    fn into_text(self) -> Option<String> {
        let text: String = self
            .candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .filter_map(|p| p.text)
            .collect();

        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

fn classify(err: &reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Network(err.to_string())
    }
}

/// Gemini-backed generative model.
pub struct GeminiModel {
    client: Client,
    endpoint: String,
    api_key: ApiKey,
}

impl GeminiModel {
    /// Build a client for the configured model.
    ///
    /// # Errors
    /// Returns `HeartsenseError::HttpClient` if the HTTP client cannot be
    /// constructed (e.g. TLS backend initialization failure).
    pub fn new(config: &ModelConfig) -> Result<Self, HeartsenseError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("heartsense/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HeartsenseError::HttpClient(e.to_string()))?;

        let endpoint = format!(
            "{}/v1beta/models/{}:generateContent",
            config.api_base.trim_end_matches('/'),
            config.model
        );

        tracing::info!("Gemini model configured: {}", config.model);

        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key.clone(),
        })
    }

    /// Full URL of the `generateContent` call.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl GenerativeModel for GeminiModel {
    fn generate(&self, request: &GenerationRequest) -> Result<ModelReply, TransportError> {
        let body = GenerateContentRequest::from_request(request);

        let response = self
            .client
            .post(&self.endpoint)
            .header(API_KEY_HEADER, self.api_key.expose())
            .json(&body)
            .send()
            .map_err(|e| classify(&e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("Gemini returned HTTP {}", status.as_u16());
            return Err(TransportError::Status {
                status: status.as_u16(),
            });
        }

        let raw = response.text().map_err(|e| classify(&e))?;
        let envelope: GenerateContentResponse = serde_json::from_str(&raw)
            .map_err(|e| TransportError::InvalidEnvelope(e.to_string()))?;

        Ok(ModelReply {
            text: envelope.into_text(),
        })
    }
}
