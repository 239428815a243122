//! Risk assessment result types.
//!
//! Represents the structured outcome returned by the generative model.

use serde::{Deserialize, Serialize};

/// Risk level classification for heart disease.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Low risk of heart disease
    Low,
    /// Moderate risk, monitoring recommended
    Moderate,
    /// High risk, intervention recommended
    High,
}

impl RiskLevel {
    /// Wire values accepted in model replies.
    pub const ALL: [Self; 3] = [Self::Low, Self::Moderate, Self::High];

    /// Value used in the response schema enum.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }

    /// Get a human-readable description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Low => "Low risk - No significant indicators",
            Self::Moderate => "Moderate risk - Follow-up recommended",
            Self::High => "High risk - Consultation with a cardiologist advised",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Moderate => write!(f, "MODERATE"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

/// Reasons a candidate result is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResultError {
    #[error("summary is blank")]
    BlankSummary,

    #[error("recommendations are empty")]
    NoRecommendations,

    #[error("recommendation {0} is blank")]
    BlankRecommendation(usize),

    #[error("disclaimer is blank")]
    BlankDisclaimer,
}

/// A complete, validated risk assessment.
///
/// There is no partially populated form of this type: construction goes
/// through [`RiskAssessmentResult::new`], which rejects blank text and an
/// empty recommendation list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessmentResult {
    risk_level: RiskLevel,
    summary: String,
    recommendations: Vec<String>,
    disclaimer: String,
}

impl RiskAssessmentResult {
    /// Create a validated result.
    ///
    /// # Errors
    /// Returns a `ResultError` naming the first empty field.
    pub fn new(
        risk_level: RiskLevel,
        summary: impl Into<String>,
        recommendations: Vec<String>,
        disclaimer: impl Into<String>,
    ) -> Result<Self, ResultError> {
        let summary = summary.into();
        let disclaimer = disclaimer.into();

        if summary.trim().is_empty() {
            return Err(ResultError::BlankSummary);
        }
        if recommendations.is_empty() {
            return Err(ResultError::NoRecommendations);
        }
        if let Some(idx) = recommendations.iter().position(|r| r.trim().is_empty()) {
            return Err(ResultError::BlankRecommendation(idx));
        }
        if disclaimer.trim().is_empty() {
            return Err(ResultError::BlankDisclaimer);
        }

        Ok(Self {
            risk_level,
            summary,
            recommendations,
            disclaimer,
        })
    }

    #[must_use]
    pub fn risk_level(&self) -> RiskLevel {
        self.risk_level
    }

    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Recommendations in the order the model returned them.
    #[must_use]
    pub fn recommendations(&self) -> &[String] {
        &self.recommendations
    }

    #[must_use]
    pub fn disclaimer(&self) -> &str {
        &self.disclaimer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recs(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("Step {i}")).collect()
    }

    #[test]
    fn test_valid_result() {
        let result = RiskAssessmentResult::new(RiskLevel::Moderate, "Summary", recs(5), "Not advice")
            .expect("Valid result");
        assert_eq!(result.risk_level(), RiskLevel::Moderate);
        assert_eq!(result.recommendations().len(), 5);
        assert_eq!(result.recommendations()[0], "Step 1");
    }

    #[test]
    fn test_rejects_incomplete_results() {
        assert_eq!(
            RiskAssessmentResult::new(RiskLevel::Low, "  ", recs(5), "d"),
            Err(ResultError::BlankSummary)
        );
        assert_eq!(
            RiskAssessmentResult::new(RiskLevel::Low, "s", Vec::new(), "d"),
            Err(ResultError::NoRecommendations)
        );
        assert_eq!(
            RiskAssessmentResult::new(RiskLevel::Low, "s", vec!["a".into(), "".into()], "d"),
            Err(ResultError::BlankRecommendation(1))
        );
        assert_eq!(
            RiskAssessmentResult::new(RiskLevel::Low, "s", recs(1), ""),
            Err(ResultError::BlankDisclaimer)
        );
    }

    #[test]
    fn test_recommendation_count_not_enforced() {
        assert!(RiskAssessmentResult::new(RiskLevel::High, "s", recs(3), "d").is_ok());
        assert!(RiskAssessmentResult::new(RiskLevel::High, "s", recs(7), "d").is_ok());
    }

    #[test]
    fn test_risk_level_wire_values() {
        let json = serde_json::to_string(&RiskLevel::Moderate).expect("Serialize");
        assert_eq!(json, "\"Moderate\"");
        assert!(serde_json::from_str::<RiskLevel>("\"Severe\"").is_err());
        assert!(serde_json::from_str::<RiskLevel>("\"high\"").is_err());
        assert_eq!(RiskLevel::High.to_string(), "HIGH");
    }
}
