//! Adapters layer: Concrete implementations of ports.
//!
//! These modules contain the actual integration with external systems:
//! - `gemini`: Gemini `generateContent` REST API over reqwest
//! - `print`: host print command
//! - `sanitize`: credential and PII filtering for logs

pub mod gemini;
pub mod print;
pub mod sanitize;
