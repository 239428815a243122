//! Generative model port: Trait for the outbound completion call.
//!
//! This trait abstracts the hosted model (Gemini) from the application logic,
//! so tests can substitute a scripted transport.

/// Everything the model needs for one structured completion.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Fixed framing instruction.
    pub system_instruction: String,

    /// User prompt rendered from the biometric input.
    pub prompt: String,

    /// JSON schema the reply must conform to.
    pub response_schema: serde_json::Value,
}

/// Payload of a successful call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModelReply {
    /// Generated text, `None` when the model produced no textual part.
    pub text: Option<String>,
}

impl ModelReply {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self { text: None }
    }
}

/// Transport-level failures. None of these carry model output.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("endpoint returned HTTP {status}")]
    Status { status: u16 },

    #[error("network error: {0}")]
    Network(String),

    #[error("unreadable response envelope: {0}")]
    InvalidEnvelope(String),
}

/// Trait for generative model calls.
///
/// Implementations perform exactly one outbound request per call and do not
/// retry.
pub trait GenerativeModel: Send + Sync {
    /// Run a structured completion.
    ///
    /// # Errors
    /// Returns a `TransportError` on timeout, non-2xx status, network failure
    /// or an envelope that cannot be decoded.
    fn generate(&self, request: &GenerationRequest) -> Result<ModelReply, TransportError>;
}
