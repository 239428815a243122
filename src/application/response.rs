//! Response validation for the risk assessment call.
//!
//! The payload must decode into exactly the four result fields. Nothing is
//! coerced or filled in: anything short of a complete result is rejected.

use serde::Deserialize;

use crate::application::AssessmentError;
use crate::domain::{RiskAssessmentResult, RiskLevel};

/// Wire shape of the model's JSON payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct AssessmentPayload {
    risk_level: RiskLevel,
    summary: String,
    recommendations: Vec<String>,
    disclaimer: String,
}

/// Parse the textual payload of a model reply.
///
/// # Errors
/// - `EmptyModelResponse` when there is no text or only whitespace.
/// - `MalformedModelResponse` when the text is not the expected JSON object
///   or any field is missing, mistyped, out of its enum, or blank.
pub fn parse_assessment(text: Option<&str>) -> Result<RiskAssessmentResult, AssessmentError> {
    let payload = match text.map(str::trim) {
        Some(t) if !t.is_empty() => t,
        _ => return Err(AssessmentError::EmptyModelResponse),
    };

    let decoded: AssessmentPayload = serde_json::from_str(payload)
        .map_err(|e| AssessmentError::MalformedModelResponse(e.to_string()))?;

    RiskAssessmentResult::new(
        decoded.risk_level,
        decoded.summary,
        decoded.recommendations,
        decoded.disclaimer,
    )
    .map_err(|e| AssessmentError::MalformedModelResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{"riskLevel":"High","summary":"Elevated markers.","recommendations":["a","b","c","d","e"],"disclaimer":"AI generated."}"#;

    #[test]
    fn test_parses_valid_payload() {
        let result = parse_assessment(Some(VALID)).expect("Valid payload");
        assert_eq!(result.risk_level(), RiskLevel::High);
        assert_eq!(result.summary(), "Elevated markers.");
        assert_eq!(result.recommendations(), ["a", "b", "c", "d", "e"]);
        assert_eq!(result.disclaimer(), "AI generated.");
    }

    #[test]
    fn test_surrounding_whitespace_is_tolerated() {
        let padded = format!("\n  {VALID}  \n");
        assert!(parse_assessment(Some(&padded)).is_ok());
    }

    #[test]
    fn test_empty_payloads() {
        assert_eq!(
            parse_assessment(None),
            Err(AssessmentError::EmptyModelResponse)
        );
        assert_eq!(
            parse_assessment(Some("   ")),
            Err(AssessmentError::EmptyModelResponse)
        );
    }

    #[test]
    fn test_out_of_enum_risk_level() {
        let payload = VALID.replace("\"High\"", "\"Severe\"");
        assert!(matches!(
            parse_assessment(Some(&payload)),
            Err(AssessmentError::MalformedModelResponse(_))
        ));
    }

    #[test]
    fn test_malformed_payloads() {
        let cases = [
            "not json at all",
            r#"{"riskLevel":"Low","summary":"s","disclaimer":"d"}"#,
            r#"{"riskLevel":"Low","summary":"s","recommendations":"eat well","disclaimer":"d"}"#,
            r#"{"riskLevel":"Low","summary":42,"recommendations":["a"],"disclaimer":"d"}"#,
            r#"{"riskLevel":"Low","summary":"s","recommendations":[1,2],"disclaimer":"d"}"#,
            r#"{"riskLevel":"Low","summary":"s","recommendations":[],"disclaimer":"d"}"#,
            r#"{"riskLevel":"Low","summary":"","recommendations":["a"],"disclaimer":"d"}"#,
            r#"{"riskLevel":"Low","summary":"s","recommendations":["a"],"disclaimer":"d","score":0.9}"#,
            r#"["Low","s",["a"],"d"]"#,
        ];

        for case in cases {
            assert!(
                matches!(
                    parse_assessment(Some(case)),
                    Err(AssessmentError::MalformedModelResponse(_))
                ),
                "expected malformed for {case}"
            );
        }
    }
}
