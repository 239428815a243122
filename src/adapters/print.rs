//! Print adapter: hands the rendered report to the host print command.
//!
//! The command (default `lp`) receives the report text on stdin. Nothing is
//! written to disk by this process.

use std::io::Write;
use std::process::{Command, Stdio};

use crate::ports::ReportPrinter;
use crate::HeartsenseError;

/// Printer backed by an external command line.
#[derive(Debug, Clone)]
pub struct SystemPrinter {
    program: String,
    args: Vec<String>,
}

impl SystemPrinter {
    /// Build a printer from a whitespace-separated command line.
    ///
    /// # Errors
    /// Returns `HeartsenseError::Print` for an empty command line.
    pub fn new(command_line: &str) -> Result<Self, HeartsenseError> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| HeartsenseError::Print("empty print command".to_string()))?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl ReportPrinter for SystemPrinter {
    fn print(&self, report: &str) -> Result<(), HeartsenseError> {
        tracing::info!("Sending report to {}", self.program);
        let fail = |e: std::io::Error| HeartsenseError::Print(format!("{}: {}", self.program, e));

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(fail)?;

        if let Some(mut stdin) = child.stdin.take() {
            // A command that exits early closes the pipe; its exit status tells the story.
            if let Err(e) = stdin.write_all(report.as_bytes()) {
                tracing::debug!("Print command stdin closed: {}", e);
            }
        }

        let status = child.wait().map_err(fail)?;
        if !status.success() {
            return Err(HeartsenseError::Print(format!(
                "{} exited with {}",
                self.program, status
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_command_line() {
        let printer = SystemPrinter::new("lp -d office").expect("Command");
        assert_eq!(printer.program(), "lp");
        assert_eq!(printer.args, vec!["-d".to_string(), "office".to_string()]);
        assert!(SystemPrinter::new("   ").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_print_through_command() {
        let ok = SystemPrinter::new("cat").expect("Command");
        ok.print("HEARTSENSE\n").expect("cat should accept the report");

        let failing = SystemPrinter::new("false").expect("Command");
        assert!(matches!(
            failing.print("HEARTSENSE\n"),
            Err(HeartsenseError::Print(_))
        ));
    }

    #[test]
    fn test_missing_program() {
        let printer = SystemPrinter::new("heartsense-no-such-printer").expect("Command");
        assert!(matches!(
            printer.print("report"),
            Err(HeartsenseError::Print(_))
        ));
    }
}
