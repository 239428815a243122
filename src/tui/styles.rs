//! Cardiology color palette and styles.
//!
//! Risk colors follow the usual traffic-light reading; everything else stays
//! low-contrast so the report text carries the attention.

use ratatui::style::{Color, Modifier, Style};

use crate::domain::RiskLevel;

/// Medical theme color palette.
pub struct MedicalTheme;

impl MedicalTheme {
    // === Primary Colors ===

    /// Crimson - Primary color (cardiology)
    pub const PRIMARY: Color = Color::Rgb(225, 29, 72); // #E11D48

    /// Lighter rose for highlights
    pub const PRIMARY_LIGHT: Color = Color::Rgb(251, 113, 133); // #FB7185

    /// Light slate for borders
    pub const SECONDARY_LIGHT: Color = Color::Rgb(148, 163, 184); // #94A3B8

    // === Semantic Colors ===

    /// Emerald - low risk, success
    pub const SUCCESS: Color = Color::Rgb(16, 185, 129); // #10B981

    /// Amber - moderate risk
    pub const WARNING: Color = Color::Rgb(251, 191, 36); // #FBBF24

    /// Red - high risk, errors
    pub const DANGER: Color = Color::Rgb(239, 68, 68); // #EF4444

    /// Near-black with blue tint
    pub const BG_DARK: Color = Color::Rgb(15, 23, 42); // #0F172A

    // === Text Colors ===

    pub const TEXT_PRIMARY: Color = Color::Rgb(248, 250, 252); // #F8FAFC
    pub const TEXT_SECONDARY: Color = Color::Rgb(148, 163, 184); // #94A3B8
    pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139); // #64748B

    // === Preset Styles ===

    /// Style for titles
    #[must_use]
    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for section titles
    #[must_use]
    pub fn subtitle() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    #[must_use]
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    #[must_use]
    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    #[must_use]
    pub fn warning() -> Style {
        Style::default().fg(Self::WARNING)
    }

    #[must_use]
    pub fn danger() -> Style {
        Style::default().fg(Self::DANGER)
    }

    /// Style for the highlighted submit button
    #[must_use]
    pub fn selected() -> Style {
        Style::default()
            .fg(Self::BG_DARK)
            .bg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for focused elements
    #[must_use]
    pub fn focused() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::SECONDARY_LIGHT)
    }

    #[must_use]
    pub fn border_focused() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    /// Style for key hints
    #[must_use]
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for key descriptions
    #[must_use]
    pub fn key_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Get risk level style
    #[must_use]
    pub fn risk_level(level: RiskLevel) -> Style {
        match level {
            RiskLevel::Low => Self::success(),
            RiskLevel::Moderate => Self::warning(),
            RiskLevel::High => Self::danger(),
        }
    }
}
