//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement the
//! request/response contract with the generative model and the client-side
//! submission lifecycle.

mod assessment;
pub mod prompt;
mod report;
pub mod response;
mod session;
mod submission;

pub use assessment::{AssessmentError, AssessmentService, ASSESSMENT_FAILED_MESSAGE};
pub use report::PrintableReport;
pub use session::Session;
pub use submission::{RequestId, Submission, SubmissionState};
