//! Request construction for the risk assessment call.
//!
//! The reply shape is enforced through a response schema handed to the model
//! as a generation constraint, not just described in the prompt.

use std::fmt::Write as _;

use serde_json::{json, Value};

use crate::domain::{BiometricInput, Categorical, RiskLevel};
use crate::ports::GenerationRequest;

/// Framing instruction sent with every request.
pub const SYSTEM_INSTRUCTION: &str = "You are an expert cardiologist AI assistant. \
You analyze patient vitals and provide preliminary heart health risk assessments. \
Your tone is professional, calm, and medical but accessible.";

/// Render the patient description for the model.
#[must_use]
pub fn render_prompt(input: &BiometricInput) -> String {
    let mut prompt = String::from("Analyze the following patient data for heart disease risk assessment:\n");

    // Writing to a String cannot fail.
    let _ = writeln!(prompt, "- Age: {}", input.age());
    let _ = writeln!(prompt, "- Sex: {}", input.sex().as_str());
    let _ = writeln!(prompt, "- Chest Pain Type: {}", input.chest_pain_type().as_str());
    let _ = writeln!(prompt, "- Resting Blood Pressure: {} mm Hg", input.resting_bp());
    let _ = writeln!(prompt, "- Cholesterol: {} mg/dl", input.cholesterol());
    let _ = writeln!(
        prompt,
        "- Fasting Blood Sugar > 120 mg/dl: {}",
        if input.fasting_bs() { "Yes" } else { "No" }
    );
    let _ = writeln!(prompt, "- Resting ECG Results: {}", input.resting_ecg().as_str());
    let _ = writeln!(prompt, "- Max Heart Rate Achieved: {}", input.max_heart_rate());

    prompt.push_str(
        "\nProvide a professional assessment including risk level, a summary, and actionable next steps.",
    );
    prompt
}

/// Structured output constraint: exactly the four result fields.
#[must_use]
pub fn response_schema() -> Value {
    let levels: Vec<&str> = RiskLevel::ALL.iter().map(RiskLevel::as_str).collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "riskLevel": {
                "type": "STRING",
                "enum": levels,
                "description": "The assessed risk level of heart disease based on the input metrics."
            },
            "summary": {
                "type": "STRING",
                "description": "A short, professional medical summary of the analysis (approx 50 words)."
            },
            "recommendations": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "A list of 5 specific, actionable recommendations for the user to improve their heart health."
            },
            "disclaimer": {
                "type": "STRING",
                "description": "A standard medical disclaimer stating this is AI generated and not a doctor's diagnosis."
            }
        },
        "required": ["riskLevel", "summary", "recommendations", "disclaimer"]
    })
}

/// Bundle instruction, prompt and schema for one call.
#[must_use]
pub fn build_request(input: &BiometricInput) -> GenerationRequest {
    GenerationRequest {
        system_instruction: SYSTEM_INSTRUCTION.to_string(),
        prompt: render_prompt(input),
        response_schema: response_schema(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChestPainType, RestingEcg, Sex};

    fn sample_input() -> BiometricInput {
        BiometricInput::new(
            52,
            Sex::Male,
            ChestPainType::Asymptomatic,
            140,
            260,
            true,
            RestingEcg::LeftVentricularHypertrophy,
            130,
        )
        .expect("Valid input")
    }

    #[test]
    fn test_prompt_lists_every_field() {
        let prompt = render_prompt(&sample_input());
        assert!(prompt.contains("- Age: 52\n"));
        assert!(prompt.contains("- Sex: male\n"));
        assert!(prompt.contains("- Chest Pain Type: asymptomatic\n"));
        assert!(prompt.contains("- Resting Blood Pressure: 140 mm Hg\n"));
        assert!(prompt.contains("- Cholesterol: 260 mg/dl\n"));
        assert!(prompt.contains("- Fasting Blood Sugar > 120 mg/dl: Yes\n"));
        assert!(prompt.contains("- Resting ECG Results: left-ventricular-hypertrophy\n"));
        assert!(prompt.contains("- Max Heart Rate Achieved: 130\n"));
        assert!(prompt.ends_with("actionable next steps."));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let input = BiometricInput::default();
        assert_eq!(render_prompt(&input), render_prompt(&input));
        assert!(render_prompt(&input).contains("Fasting Blood Sugar > 120 mg/dl: No"));
    }

    #[test]
    fn test_schema_constrains_all_fields() {
        let schema = response_schema();
        assert_eq!(schema["type"], "OBJECT");
        assert_eq!(
            schema["properties"]["riskLevel"]["enum"],
            json!(["Low", "Moderate", "High"])
        );
        assert_eq!(schema["properties"]["recommendations"]["type"], "ARRAY");
        assert_eq!(
            schema["properties"]["recommendations"]["items"]["type"],
            "STRING"
        );
        assert_eq!(
            schema["required"],
            json!(["riskLevel", "summary", "recommendations", "disclaimer"])
        );
        assert_eq!(
            schema["properties"].as_object().map(|p| p.len()),
            Some(4)
        );
    }

    #[test]
    fn test_build_request() {
        let request = build_request(&sample_input());
        assert_eq!(request.system_instruction, SYSTEM_INSTRUCTION);
        assert!(request.system_instruction.contains("cardiologist"));
        assert_eq!(request.response_schema, response_schema());
    }
}
