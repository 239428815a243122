//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the application and external systems (the generative model
//! endpoint and the host print facility).

mod model;
mod printer;

pub use model::{GenerationRequest, GenerativeModel, ModelReply, TransportError};
pub use printer::ReportPrinter;
