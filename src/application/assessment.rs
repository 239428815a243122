//! Assessment service: runs one risk assessment against the generative model.
//!
//! This service coordinates:
//! - Request construction (prompt + response schema)
//! - The single outbound model call
//! - Response validation
//! - Error classification for logs and normalization for users

use std::sync::Arc;

use crate::application::{prompt, response};
use crate::domain::{BiometricInput, RiskAssessmentResult};
use crate::ports::{GenerativeModel, TransportError};

/// Message shown to users for every per-request failure.
pub const ASSESSMENT_FAILED_MESSAGE: &str =
    "Failed to generate prediction. Please check your connection and try again.";

/// Per-request failure kinds.
///
/// The specific kind is kept for diagnostics; users only ever see
/// [`AssessmentError::user_message`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssessmentError {
    #[error("model returned no content")]
    EmptyModelResponse,

    #[error("model returned a malformed assessment: {0}")]
    MalformedModelResponse(String),

    #[error("assessment service unavailable: {0}")]
    AssessmentUnavailable(String),
}

impl AssessmentError {
    /// Stable identifier for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyModelResponse => "EmptyModelResponse",
            Self::MalformedModelResponse(_) => "MalformedModelResponse",
            Self::AssessmentUnavailable(_) => "AssessmentUnavailable",
        }
    }

    /// Returns the message suitable for display in the UI.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        ASSESSMENT_FAILED_MESSAGE
    }
}

impl From<TransportError> for AssessmentError {
    fn from(err: TransportError) -> Self {
        Self::AssessmentUnavailable(err.to_string())
    }
}

/// Service for running risk assessments.
///
/// Holds no mutable state, so one instance can be shared between the UI and
/// its background workers.
pub struct AssessmentService<M>
where
    M: GenerativeModel,
{
    model: Arc<M>,
}

impl<M> AssessmentService<M>
where
    M: GenerativeModel,
{
    /// Create a new assessment service.
    pub fn new(model: Arc<M>) -> Self {
        Self { model }
    }

    /// Assess the given input.
    ///
    /// Performs exactly one model call. No retries: a failed submission is
    /// retried only by the user submitting again.
    ///
    /// # Errors
    /// Returns `EmptyModelResponse`, `MalformedModelResponse` or
    /// `AssessmentUnavailable`; the kind is logged here.
    pub fn assess(&self, input: &BiometricInput) -> Result<RiskAssessmentResult, AssessmentError> {
        tracing::info!("Starting risk assessment...");

        tracing::debug!("Building request...");
        let request = prompt::build_request(input);

        tracing::debug!("Calling generative model...");
        let outcome = self
            .model
            .generate(&request)
            .map_err(AssessmentError::from)
            .and_then(|reply| response::parse_assessment(reply.text.as_deref()));

        match &outcome {
            Ok(result) => tracing::info!(
                "Assessment complete: risk={}, recommendations={}",
                result.risk_level(),
                result.recommendations().len()
            ),
            Err(e) => tracing::warn!(kind = e.kind(), "Assessment failed: {}", e),
        }

        outcome
    }
}
