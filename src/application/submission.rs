//! Submission state machine.
//!
//! `Idle -> Pending -> Succeeded | Failed -> Idle`. At most one request is
//! pending at a time, and a resolution is only accepted for the request that
//! is currently pending.

use crate::application::AssessmentError;
use crate::domain::RiskAssessmentResult;

/// Identity of one submission within a session. Strictly increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    #[must_use]
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Client-visible lifecycle of an assessment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    /// No result, not loading
    #[default]
    Idle,
    /// Waiting for the model
    Pending { request: RequestId },
    /// Holding a complete result
    Succeeded(RiskAssessmentResult),
    /// Holding a display-safe error message
    Failed { message: String },
}

/// State machine driving one session's submissions.
#[derive(Debug, Default)]
pub struct Submission {
    state: SubmissionState,
    last_issued: u64,
}

impl Submission {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self.state, SubmissionState::Pending { .. })
    }

    /// Result held in `Succeeded`, if any.
    #[must_use]
    pub fn result(&self) -> Option<&RiskAssessmentResult> {
        match &self.state {
            SubmissionState::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    /// Message held in `Failed`, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            SubmissionState::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// Start a submission.
    ///
    /// Clears any previous result or error right away. Returns `None` (and
    /// changes nothing) while another submission is pending.
    pub fn submit(&mut self) -> Option<RequestId> {
        if self.is_pending() {
            tracing::debug!("Submission ignored: request already pending");
            return None;
        }

        self.last_issued += 1;
        let request = RequestId(self.last_issued);
        self.state = SubmissionState::Pending { request };
        Some(request)
    }

    /// Apply the outcome of `request`.
    ///
    /// Returns `false` if the machine is no longer waiting for that request;
    /// the outcome is then discarded.
    pub fn resolve(
        &mut self,
        request: RequestId,
        outcome: Result<RiskAssessmentResult, AssessmentError>,
    ) -> bool {
        match self.state {
            SubmissionState::Pending { request: current } if current == request => {}
            _ => {
                tracing::debug!("Discarding stale resolution for request {}", request);
                return false;
            }
        }

        self.state = match outcome {
            Ok(result) => SubmissionState::Succeeded(result),
            Err(e) => SubmissionState::Failed {
                message: e.user_message().to_string(),
            },
        };
        true
    }

    /// Close the report or error. No effect while idle or pending.
    pub fn dismiss(&mut self) -> bool {
        match self.state {
            SubmissionState::Succeeded(_) | SubmissionState::Failed { .. } => {
                self.state = SubmissionState::Idle;
                true
            }
            SubmissionState::Idle | SubmissionState::Pending { .. } => false,
        }
    }
}
