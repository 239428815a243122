//! Domain layer: Core business types and logic.
//!
//! This module contains pure Rust types with no I/O. Values are validated on
//! construction so that downstream layers never see out-of-domain data.

mod assessment;
mod biometric;

pub use assessment::{ResultError, RiskAssessmentResult, RiskLevel};
pub use biometric::{
    BiometricField, BiometricInput, Categorical, ChestPainType, FieldError, FieldUpdate,
    RestingEcg, Sex, AGE_RANGE, CHOLESTEROL_RANGE, MAX_HEART_RATE_RANGE, RESTING_BP_RANGE,
};
