//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides the HeartSense screens:
//! - Biometric data entry form
//! - Risk report overlay with print action

mod app;
mod styles;
mod ui;
mod worker;

pub use app::App;
pub use styles::MedicalTheme;
pub use worker::{AssessmentProgress, AssessmentWorker, AssessmentWorkerHandle};
