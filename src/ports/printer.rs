//! Printer port: hands a rendered report to the host print facility.

use crate::HeartsenseError;

/// Trait for printing/exporting a rendered report.
pub trait ReportPrinter: Send + Sync {
    /// Print the given report text. Only the report is sent, never the form.
    ///
    /// # Errors
    /// Returns `HeartsenseError::Print` if the host facility fails.
    fn print(&self, report: &str) -> Result<(), HeartsenseError>;
}
