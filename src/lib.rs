//! # HeartSense
//!
//! Heart-disease risk assessment backed by a generative AI model.
//!
//! This crate provides:
//! - A validated biometric input model with typed field edits
//! - Structured prompt construction and strict parsing of the model's reply
//! - A submission lifecycle that keeps at most one request in flight
//! - Terminal UI for entering data and reading/printing the report
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core business types (BiometricInput, RiskAssessmentResult)
//! - `ports`: Trait definitions for external operations
//! - `adapters`: Concrete implementations (Gemini REST, host printer, log sanitizer)
//! - `application`: Use cases orchestrating domain and ports
//! - `config`: Environment-driven configuration
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{BiometricInput, FieldUpdate, RiskAssessmentResult, RiskLevel};

/// Result type for HeartSense operations
pub type Result<T> = std::result::Result<T, HeartsenseError>;

/// Main error type for HeartSense
#[derive(Debug, thiserror::Error)]
pub enum HeartsenseError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid field value: {0}")]
    InvalidFieldValue(#[from] domain::FieldError),

    #[error("Assessment failed: {0}")]
    Assessment(#[from] application::AssessmentError),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Print failed: {0}")]
    Print(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
