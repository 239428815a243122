//! One user session: the form's input model plus its submission lifecycle.

use crate::application::{AssessmentError, RequestId, Submission, SubmissionState};
use crate::domain::{BiometricField, BiometricInput, FieldError, FieldUpdate, RiskAssessmentResult};

/// Session state owned by the UI. Nothing here is persisted.
#[derive(Debug, Default)]
pub struct Session {
    input: BiometricInput,
    submission: Submission,
}

impl Session {
    /// Start a session with the default input.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session with a specific input.
    #[must_use]
    pub fn with_input(input: BiometricInput) -> Self {
        Self {
            input,
            submission: Submission::new(),
        }
    }

    #[must_use]
    pub fn input(&self) -> &BiometricInput {
        &self.input
    }

    #[must_use]
    pub fn state(&self) -> &SubmissionState {
        self.submission.state()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.submission.is_pending()
    }

    #[must_use]
    pub fn result(&self) -> Option<&RiskAssessmentResult> {
        self.submission.result()
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.submission.error_message()
    }

    /// Apply a typed field edit.
    ///
    /// # Errors
    /// Returns `FieldError::InvalidFieldValue` for out-of-range values.
    pub fn apply(&mut self, update: FieldUpdate) -> Result<(), FieldError> {
        self.input.apply(update)
    }

    /// Apply a raw field edit.
    ///
    /// # Errors
    /// Returns `FieldError::InvalidFieldValue` if the value cannot be coerced
    /// or is out of range.
    pub fn update(&mut self, field: BiometricField, raw: &str) -> Result<(), FieldError> {
        self.input.update(field, raw)
    }

    /// Start a submission, returning its id and the input snapshot to send.
    /// `None` while another submission is pending.
    pub fn submit(&mut self) -> Option<(RequestId, BiometricInput)> {
        let request = self.submission.submit()?;
        tracing::info!("Submission {} started", request);
        Some((request, self.input.snapshot()))
    }

    /// Deliver the outcome of a submission. Stale outcomes are dropped.
    pub fn resolve(
        &mut self,
        request: RequestId,
        outcome: Result<RiskAssessmentResult, AssessmentError>,
    ) -> bool {
        self.submission.resolve(request, outcome)
    }

    /// Close the report overlay or error message.
    pub fn dismiss(&mut self) -> bool {
        self.submission.dismiss()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_snapshots_current_input() {
        let mut session = Session::new();
        session.apply(FieldUpdate::Age(60)).expect("In range");

        let (_, snapshot) = session.submit().expect("Should start");
        assert_eq!(snapshot.age(), 60);

        // Edits after submission do not alter what was sent
        session.apply(FieldUpdate::Age(61)).expect("In range");
        assert_eq!(snapshot.age(), 60);
        assert!(session.submit().is_none());
    }

    #[test]
    fn test_failure_leaves_input_untouched() {
        let mut session = Session::new();
        session
            .update(BiometricField::Cholesterol, "310")
            .expect("In range");
        let before = *session.input();

        let (request, _) = session.submit().expect("Should start");
        session.resolve(
            request,
            Err(AssessmentError::AssessmentUnavailable("timeout".to_string())),
        );

        assert!(session.error_message().is_some());
        assert_eq!(session.input(), &before);
    }

    #[test]
    fn test_invalid_update_rejected() {
        let mut session = Session::new();
        assert!(session.update(BiometricField::RestingBp, "250").is_err());
        assert_eq!(session.input(), &BiometricInput::default());
    }
}
