//! Biometric input types for cardiac risk assessment.
//!
//! The eight metrics mirror the classic heart-disease screening set (age, sex,
//! chest pain type, resting blood pressure, serum cholesterol, fasting blood
//! sugar, resting ECG and maximum heart rate achieved).

use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Accepted age range in years.
pub const AGE_RANGE: RangeInclusive<u16> = 20..=90;

/// Accepted resting blood pressure range in mm Hg.
pub const RESTING_BP_RANGE: RangeInclusive<u16> = 80..=200;

/// Accepted serum cholesterol range in mg/dl.
pub const CHOLESTEROL_RANGE: RangeInclusive<u16> = 100..=600;

/// Accepted maximum heart rate range in bpm.
pub const MAX_HEART_RATE_RANGE: RangeInclusive<u16> = 60..=220;

/// Errors raised at the input model boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("Unknown biometric field: {0}")]
    UnknownField(String),

    #[error("Invalid value {value:?} for field {field}")]
    InvalidFieldValue { field: BiometricField, value: String },
}

impl FieldError {
    fn invalid(field: BiometricField, value: impl ToString) -> Self {
        Self::InvalidFieldValue {
            field,
            value: value.to_string(),
        }
    }
}

/// Biological sex as collected by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Sex {
    Male,
    Female,
}

/// Chest pain classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChestPainType {
    TypicalAngina,
    AtypicalAngina,
    NonAnginal,
    Asymptomatic,
}

/// Resting electrocardiogram result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RestingEcg {
    Normal,
    StTWaveAbnormality,
    LeftVentricularHypertrophy,
}

/// Shared behaviour of the categorical fields, used by select-style controls.
pub trait Categorical: Copy + PartialEq + 'static {
    /// Every variant, in display order.
    const ALL: &'static [Self];

    /// Wire value (kebab-case).
    fn as_str(&self) -> &'static str;

    /// Human-readable label.
    fn label(&self) -> &'static str;

    /// Next variant, wrapping around.
    #[must_use]
    fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|v| v == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous variant, wrapping around.
    #[must_use]
    fn prev(&self) -> Self {
        let idx = Self::ALL.iter().position(|v| v == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Parse a wire value.
    fn from_wire(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == raw)
    }
}

impl Categorical for Sex {
    const ALL: &'static [Self] = &[Self::Male, Self::Female];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

impl Categorical for ChestPainType {
    const ALL: &'static [Self] = &[
        Self::TypicalAngina,
        Self::AtypicalAngina,
        Self::NonAnginal,
        Self::Asymptomatic,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::TypicalAngina => "typical-angina",
            Self::AtypicalAngina => "atypical-angina",
            Self::NonAnginal => "non-anginal",
            Self::Asymptomatic => "asymptomatic",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::TypicalAngina => "Typical Angina",
            Self::AtypicalAngina => "Atypical Angina",
            Self::NonAnginal => "Non-Anginal Pain",
            Self::Asymptomatic => "Asymptomatic",
        }
    }
}

impl Categorical for RestingEcg {
    const ALL: &'static [Self] = &[
        Self::Normal,
        Self::StTWaveAbnormality,
        Self::LeftVentricularHypertrophy,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::StTWaveAbnormality => "st-t-wave-abnormality",
            Self::LeftVentricularHypertrophy => "left-ventricular-hypertrophy",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::StTWaveAbnormality => "ST-T Wave Abnormality",
            Self::LeftVentricularHypertrophy => "Left Ventricular Hypertrophy",
        }
    }
}

/// Names of the editable fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BiometricField {
    Age,
    Sex,
    ChestPainType,
    RestingBp,
    Cholesterol,
    FastingBs,
    RestingEcg,
    MaxHeartRate,
}

impl BiometricField {
    /// All fields in form order.
    pub const ALL: [Self; 8] = [
        Self::Age,
        Self::Sex,
        Self::FastingBs,
        Self::ChestPainType,
        Self::RestingEcg,
        Self::RestingBp,
        Self::Cholesterol,
        Self::MaxHeartRate,
    ];

    /// Wire name of the field.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::Sex => "sex",
            Self::ChestPainType => "chestPainType",
            Self::RestingBp => "restingBP",
            Self::Cholesterol => "cholesterol",
            Self::FastingBs => "fastingBS",
            Self::RestingEcg => "restingECG",
            Self::MaxHeartRate => "maxHeartRate",
        }
    }

    /// Form label of the field.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Age => "Age",
            Self::Sex => "Sex",
            Self::ChestPainType => "Chest Pain Type",
            Self::RestingBp => "Resting BP (mm Hg)",
            Self::Cholesterol => "Cholesterol (mg/dl)",
            Self::FastingBs => "Fasting BS > 120 mg/dl",
            Self::RestingEcg => "Resting ECG",
            Self::MaxHeartRate => "Max HR",
        }
    }

    /// Inclusive bounds for numeric fields, `None` for the others.
    #[must_use]
    pub fn range(&self) -> Option<RangeInclusive<u16>> {
        match self {
            Self::Age => Some(AGE_RANGE),
            Self::RestingBp => Some(RESTING_BP_RANGE),
            Self::Cholesterol => Some(CHOLESTEROL_RANGE),
            Self::MaxHeartRate => Some(MAX_HEART_RATE_RANGE),
            Self::Sex | Self::ChestPainType | Self::FastingBs | Self::RestingEcg => None,
        }
    }
}

impl std::fmt::Display for BiometricField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BiometricField {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| FieldError::UnknownField(s.to_string()))
    }
}

/// A single typed field edit. One variant per field, so a bad field name
/// cannot be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldUpdate {
    Age(u16),
    Sex(Sex),
    ChestPainType(ChestPainType),
    RestingBp(u16),
    Cholesterol(u16),
    FastingBs(bool),
    RestingEcg(RestingEcg),
    MaxHeartRate(u16),
}

impl FieldUpdate {
    /// Coerce a raw control value into a typed update for `field`.
    ///
    /// # Errors
    /// Returns `FieldError::InvalidFieldValue` if the raw value does not parse
    /// as the field's type. Range checks happen in [`BiometricInput::apply`].
    pub fn parse(field: BiometricField, raw: &str) -> Result<Self, FieldError> {
        let value = raw.trim();
        let number = || {
            value
                .parse::<u16>()
                .map_err(|_| FieldError::invalid(field, raw))
        };

        let update = match field {
            BiometricField::Age => Self::Age(number()?),
            BiometricField::RestingBp => Self::RestingBp(number()?),
            BiometricField::Cholesterol => Self::Cholesterol(number()?),
            BiometricField::MaxHeartRate => Self::MaxHeartRate(number()?),
            BiometricField::FastingBs => {
                Self::FastingBs(parse_flag(value).ok_or_else(|| FieldError::invalid(field, raw))?)
            }
            BiometricField::Sex => {
                Self::Sex(Sex::from_wire(value).ok_or_else(|| FieldError::invalid(field, raw))?)
            }
            BiometricField::ChestPainType => Self::ChestPainType(
                ChestPainType::from_wire(value).ok_or_else(|| FieldError::invalid(field, raw))?,
            ),
            BiometricField::RestingEcg => Self::RestingEcg(
                RestingEcg::from_wire(value).ok_or_else(|| FieldError::invalid(field, raw))?,
            ),
        };
        Ok(update)
    }

    /// Field targeted by this update.
    #[must_use]
    pub fn field(&self) -> BiometricField {
        match self {
            Self::Age(_) => BiometricField::Age,
            Self::Sex(_) => BiometricField::Sex,
            Self::ChestPainType(_) => BiometricField::ChestPainType,
            Self::RestingBp(_) => BiometricField::RestingBp,
            Self::Cholesterol(_) => BiometricField::Cholesterol,
            Self::FastingBs(_) => BiometricField::FastingBs,
            Self::RestingEcg(_) => BiometricField::RestingEcg,
            Self::MaxHeartRate(_) => BiometricField::MaxHeartRate,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Patient metrics edited by the form. Every field is always in range.
///
/// Only serializable: the sole way in is through [`BiometricInput::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BiometricInput {
    age: u16,
    sex: Sex,
    chest_pain_type: ChestPainType,
    #[serde(rename = "restingBP")]
    resting_bp: u16,
    cholesterol: u16,
    #[serde(rename = "fastingBS")]
    fasting_bs: bool,
    #[serde(rename = "restingECG")]
    resting_ecg: RestingEcg,
    max_heart_rate: u16,
}

impl Default for BiometricInput {
    fn default() -> Self {
        Self {
            age: 45,
            sex: Sex::Male,
            chest_pain_type: ChestPainType::TypicalAngina,
            resting_bp: 120,
            cholesterol: 200,
            fasting_bs: false,
            resting_ecg: RestingEcg::Normal,
            max_heart_rate: 150,
        }
    }
}

impl BiometricInput {
    /// Build an input from explicit values.
    ///
    /// # Errors
    /// Returns the first `InvalidFieldValue` found among the numeric fields.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        age: u16,
        sex: Sex,
        chest_pain_type: ChestPainType,
        resting_bp: u16,
        cholesterol: u16,
        fasting_bs: bool,
        resting_ecg: RestingEcg,
        max_heart_rate: u16,
    ) -> Result<Self, FieldError> {
        let mut input = Self::default();
        for update in [
            FieldUpdate::Age(age),
            FieldUpdate::Sex(sex),
            FieldUpdate::ChestPainType(chest_pain_type),
            FieldUpdate::RestingBp(resting_bp),
            FieldUpdate::Cholesterol(cholesterol),
            FieldUpdate::FastingBs(fasting_bs),
            FieldUpdate::RestingEcg(resting_ecg),
            FieldUpdate::MaxHeartRate(max_heart_rate),
        ] {
            input.apply(update)?;
        }
        Ok(input)
    }

    /// Current values as an owned copy.
    #[must_use]
    pub fn snapshot(&self) -> Self {
        *self
    }

    #[must_use]
    pub fn age(&self) -> u16 {
        self.age
    }

    #[must_use]
    pub fn sex(&self) -> Sex {
        self.sex
    }

    #[must_use]
    pub fn chest_pain_type(&self) -> ChestPainType {
        self.chest_pain_type
    }

    #[must_use]
    pub fn resting_bp(&self) -> u16 {
        self.resting_bp
    }

    #[must_use]
    pub fn cholesterol(&self) -> u16 {
        self.cholesterol
    }

    #[must_use]
    pub fn fasting_bs(&self) -> bool {
        self.fasting_bs
    }

    #[must_use]
    pub fn resting_ecg(&self) -> RestingEcg {
        self.resting_ecg
    }

    #[must_use]
    pub fn max_heart_rate(&self) -> u16 {
        self.max_heart_rate
    }

    /// Numeric value of a bounded field, `None` for the others.
    #[must_use]
    pub fn numeric(&self, field: BiometricField) -> Option<u16> {
        match field {
            BiometricField::Age => Some(self.age),
            BiometricField::RestingBp => Some(self.resting_bp),
            BiometricField::Cholesterol => Some(self.cholesterol),
            BiometricField::MaxHeartRate => Some(self.max_heart_rate),
            _ => None,
        }
    }

    /// Replace one field.
    ///
    /// # Errors
    /// Returns `FieldError::InvalidFieldValue` when a numeric value falls
    /// outside its declared range; the input is left unchanged.
    pub fn apply(&mut self, update: FieldUpdate) -> Result<(), FieldError> {
        let field = update.field();
        let checked = |value: u16| -> Result<u16, FieldError> {
            match field.range() {
                Some(range) if !range.contains(&value) => Err(FieldError::invalid(field, value)),
                _ => Ok(value),
            }
        };

        match update {
            FieldUpdate::Age(v) => self.age = checked(v)?,
            FieldUpdate::RestingBp(v) => self.resting_bp = checked(v)?,
            FieldUpdate::Cholesterol(v) => self.cholesterol = checked(v)?,
            FieldUpdate::MaxHeartRate(v) => self.max_heart_rate = checked(v)?,
            FieldUpdate::Sex(v) => self.sex = v,
            FieldUpdate::ChestPainType(v) => self.chest_pain_type = v,
            FieldUpdate::FastingBs(v) => self.fasting_bs = v,
            FieldUpdate::RestingEcg(v) => self.resting_ecg = v,
        }
        Ok(())
    }

    /// Parse a raw value for `field` and apply it.
    ///
    /// # Errors
    /// Returns `FieldError::InvalidFieldValue` if the value cannot be coerced
    /// or is out of range.
    pub fn update(&mut self, field: BiometricField, raw: &str) -> Result<(), FieldError> {
        self.apply(FieldUpdate::parse(field, raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_session_start() {
        let input = BiometricInput::default();
        assert_eq!(input.age(), 45);
        assert_eq!(input.sex(), Sex::Male);
        assert_eq!(input.chest_pain_type(), ChestPainType::TypicalAngina);
        assert_eq!(input.resting_bp(), 120);
        assert_eq!(input.cholesterol(), 200);
        assert!(!input.fasting_bs());
        assert_eq!(input.resting_ecg(), RestingEcg::Normal);
        assert_eq!(input.max_heart_rate(), 150);
    }

    #[test]
    fn test_apply_replaces_only_target_field() {
        let mut input = BiometricInput::default();
        input
            .apply(FieldUpdate::Cholesterol(260))
            .expect("In range");

        let mut expected = BiometricInput::default();
        expected.cholesterol = 260;
        assert_eq!(input, expected);
    }

    #[test]
    fn test_apply_rejects_out_of_range() {
        let mut input = BiometricInput::default();
        let err = input.apply(FieldUpdate::Age(19)).unwrap_err();
        assert_eq!(
            err,
            FieldError::InvalidFieldValue {
                field: BiometricField::Age,
                value: "19".to_string()
            }
        );
        assert!(input.apply(FieldUpdate::MaxHeartRate(221)).is_err());
        assert!(input.apply(FieldUpdate::RestingBp(79)).is_err());
        assert_eq!(input, BiometricInput::default());

        // Bounds themselves are inclusive
        input.apply(FieldUpdate::Age(90)).expect("Upper bound");
        input.apply(FieldUpdate::Cholesterol(100)).expect("Lower bound");
    }

    #[test]
    fn test_update_from_raw_values() {
        let mut input = BiometricInput::default();
        input.update(BiometricField::Age, "52").expect("Age");
        input.update(BiometricField::Sex, "female").expect("Sex");
        input
            .update(BiometricField::ChestPainType, "asymptomatic")
            .expect("Chest pain");
        input.update(BiometricField::FastingBs, "on").expect("Flag");
        input
            .update(BiometricField::RestingEcg, "left-ventricular-hypertrophy")
            .expect("ECG");

        assert_eq!(input.age(), 52);
        assert_eq!(input.sex(), Sex::Female);
        assert_eq!(input.chest_pain_type(), ChestPainType::Asymptomatic);
        assert!(input.fasting_bs());
        assert_eq!(input.resting_ecg(), RestingEcg::LeftVentricularHypertrophy);
    }

    #[test]
    fn test_update_rejects_bad_raw_values() {
        let mut input = BiometricInput::default();
        assert!(input.update(BiometricField::Age, "forty").is_err());
        assert!(input.update(BiometricField::Sex, "other").is_err());
        assert!(input.update(BiometricField::RestingEcg, "Normal").is_err());
        assert!(input.update(BiometricField::FastingBs, "maybe").is_err());
        assert_eq!(input, BiometricInput::default());
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in BiometricField::ALL {
            let parsed: BiometricField = field.as_str().parse().expect("Known field");
            assert_eq!(parsed, field);
        }
        assert_eq!(
            "bloodType".parse::<BiometricField>(),
            Err(FieldError::UnknownField("bloodType".to_string()))
        );
    }

    #[test]
    fn test_categorical_cycling_wraps() {
        assert_eq!(Sex::Female.next(), Sex::Male);
        assert_eq!(ChestPainType::TypicalAngina.prev(), ChestPainType::Asymptomatic);
        assert_eq!(RestingEcg::Normal.next(), RestingEcg::StTWaveAbnormality);
    }

    #[test]
    fn test_serializes_with_wire_names() {
        let json = serde_json::to_value(BiometricInput::default()).expect("Serialize");
        assert_eq!(json["chestPainType"], "typical-angina");
        assert_eq!(json["restingBP"], 120);
        assert_eq!(json["fastingBS"], false);
        assert_eq!(json["restingECG"], "normal");
        assert_eq!(json["maxHeartRate"], 150);
    }

    #[test]
    fn test_new_validates_every_field() {
        let input = BiometricInput::new(
            52,
            Sex::Male,
            ChestPainType::Asymptomatic,
            140,
            260,
            true,
            RestingEcg::LeftVentricularHypertrophy,
            130,
        )
        .expect("Valid input");
        assert_eq!(input.cholesterol(), 260);

        assert!(BiometricInput::new(
            52,
            Sex::Male,
            ChestPainType::Asymptomatic,
            140,
            700,
            true,
            RestingEcg::Normal,
            130,
        )
        .is_err());
    }
}
