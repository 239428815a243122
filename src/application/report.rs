//! Printable report for a completed assessment.
//!
//! The display ID and date are cosmetic: they are generated per report and are
//! not part of the assessment itself.

use std::fmt::Write as _;

use chrono::NaiveDate;

use crate::domain::RiskAssessmentResult;

const DISPLAY_ID_LEN: usize = 9;
const BASE36: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const RULE_WIDTH: usize = 64;

/// A result paired with its report header.
#[derive(Debug, Clone)]
pub struct PrintableReport {
    result: RiskAssessmentResult,
    display_id: String,
    date: NaiveDate,
}

impl PrintableReport {
    /// Wrap a result with a fresh display ID and today's local date.
    #[must_use]
    pub fn new(result: &RiskAssessmentResult) -> Self {
        Self::with_header(result, display_id(), chrono::Local::now().date_naive())
    }

    /// Wrap a result with an explicit header.
    #[must_use]
    pub fn with_header(
        result: &RiskAssessmentResult,
        display_id: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            result: result.clone(),
            display_id: display_id.into(),
            date,
        }
    }

    #[must_use]
    pub fn result(&self) -> &RiskAssessmentResult {
        &self.result
    }

    #[must_use]
    pub fn display_id(&self) -> &str {
        &self.display_id
    }

    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Date as shown in the report header.
    #[must_use]
    pub fn date_label(&self) -> String {
        self.date.format("%d %b %Y").to_string()
    }

    /// Plain-text rendering used for printing.
    #[must_use]
    pub fn render_text(&self) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        let thin = "-".repeat(RULE_WIDTH);
        let mut out = String::new();

        let _ = writeln!(out, "HEARTSENSE");
        let _ = writeln!(out, "AI-Powered Cardiology Report");
        let _ = writeln!(out, "Date: {}", self.date_label());
        let _ = writeln!(out, "ID: {}", self.display_id);
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, "RISK ASSESSMENT: {}", self.result.risk_level());
        let _ = writeln!(out);
        let _ = writeln!(out, "SUMMARY");
        let _ = writeln!(out, "{}", self.result.summary());
        let _ = writeln!(out);
        let _ = writeln!(out, "ACTIONABLE SUGGESTIONS");
        let _ = writeln!(out, "{thin}");
        for (i, rec) in self.result.recommendations().iter().enumerate() {
            let _ = writeln!(out, "{:>2}. {}", i + 1, rec);
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, "Disclaimer: {}", self.result.disclaimer());
        out
    }
}

/// Random 9-character base-36 identifier.
fn display_id() -> String {
    use rand::Rng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    let mut rng = ChaCha20Rng::from_entropy();
    (0..DISPLAY_ID_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RiskLevel;

    fn sample_result() -> RiskAssessmentResult {
        RiskAssessmentResult::new(
            RiskLevel::High,
            "Multiple elevated markers.",
            vec![
                "See a cardiologist".to_string(),
                "Reduce sodium".to_string(),
            ],
            "AI generated, not a diagnosis.",
        )
        .expect("Valid result")
    }

    #[test]
    fn test_render_text_layout() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).expect("Valid date");
        let report = PrintableReport::with_header(&sample_result(), "K3J9QX2ZA", date);
        let text = report.render_text();

        assert!(text.starts_with("HEARTSENSE\n"));
        assert!(text.contains("Date: 14 Mar 2026\n"));
        assert!(text.contains("ID: K3J9QX2ZA\n"));
        assert!(text.contains("RISK ASSESSMENT: HIGH\n"));
        assert!(text.contains(" 1. See a cardiologist\n 2. Reduce sodium\n"));
        assert!(text.ends_with("Disclaimer: AI generated, not a diagnosis.\n"));
    }

    #[test]
    fn test_display_id_format() {
        let report = PrintableReport::new(&sample_result());
        assert_eq!(report.display_id().len(), DISPLAY_ID_LEN);
        assert!(report
            .display_id()
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
        assert_eq!(report.result(), &sample_result());
    }
}
