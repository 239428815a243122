//! Biometric data entry form.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::application::Session;
use crate::domain::{BiometricField, BiometricInput, Categorical, FieldUpdate};
use crate::tui::styles::MedicalTheme;

const SLIDER_WIDTH: usize = 24;

/// Form cursor. Rows are the fields in form order followed by the submit button.
#[derive(Debug, Default)]
pub struct FormState {
    pub selected: usize,
}

impl FormState {
    const ROWS: usize = BiometricField::ALL.len() + 1;

    /// Move to the next row
    pub fn next_field(&mut self) {
        self.selected = (self.selected + 1) % Self::ROWS;
    }

    /// Move to the previous row
    pub fn prev_field(&mut self) {
        if self.selected == 0 {
            self.selected = Self::ROWS - 1;
        } else {
            self.selected -= 1;
        }
    }

    /// Field under the cursor, `None` on the submit button.
    #[must_use]
    pub fn selected_field(&self) -> Option<BiometricField> {
        BiometricField::ALL.get(self.selected).copied()
    }

    #[must_use]
    pub fn on_submit(&self) -> bool {
        self.selected == BiometricField::ALL.len()
    }
}

/// Edit produced by moving a control `delta` steps.
///
/// Numeric fields are clamped to their range, toggles flip, selects cycle.
#[must_use]
pub fn adjust(input: &BiometricInput, field: BiometricField, delta: i32) -> FieldUpdate {
    let forward = delta > 0;
    match field {
        BiometricField::Sex => FieldUpdate::Sex(input.sex().next()),
        BiometricField::FastingBs => FieldUpdate::FastingBs(!input.fasting_bs()),
        BiometricField::ChestPainType => FieldUpdate::ChestPainType(if forward {
            input.chest_pain_type().next()
        } else {
            input.chest_pain_type().prev()
        }),
        BiometricField::RestingEcg => FieldUpdate::RestingEcg(if forward {
            input.resting_ecg().next()
        } else {
            input.resting_ecg().prev()
        }),
        BiometricField::Age
        | BiometricField::RestingBp
        | BiometricField::Cholesterol
        | BiometricField::MaxHeartRate => {
            let current = i32::from(input.numeric(field).unwrap_or_default());
            let value = match field.range() {
                Some(range) => (current + delta)
                    .clamp(i32::from(*range.start()), i32::from(*range.end())),
                None => current,
            };
            let value = u16::try_from(value).unwrap_or_default();
            match field {
                BiometricField::Age => FieldUpdate::Age(value),
                BiometricField::RestingBp => FieldUpdate::RestingBp(value),
                BiometricField::Cholesterol => FieldUpdate::Cholesterol(value),
                _ => FieldUpdate::MaxHeartRate(value),
            }
        }
    }
}

fn unit(field: BiometricField) -> &'static str {
    match field {
        BiometricField::Age => "years",
        BiometricField::RestingBp => "mm Hg",
        BiometricField::Cholesterol => "mg/dl",
        BiometricField::MaxHeartRate => "bpm",
        _ => "",
    }
}

fn slider(value: u16, start: u16, end: u16) -> String {
    let span = f64::from(end.saturating_sub(start).max(1));
    let ratio = f64::from(value.saturating_sub(start)) / span;
    let filled = ((ratio * SLIDER_WIDTH as f64).round() as usize).min(SLIDER_WIDTH);
    let mut bar = "━".repeat(filled);
    bar.push('●');
    bar.push_str(&"─".repeat(SLIDER_WIDTH - filled));
    bar
}

fn field_value(input: &BiometricInput, field: BiometricField) -> String {
    match field {
        BiometricField::Sex => input.sex().label().to_string(),
        BiometricField::ChestPainType => format!("‹ {} ›", input.chest_pain_type().label()),
        BiometricField::RestingEcg => format!("‹ {} ›", input.resting_ecg().label()),
        BiometricField::FastingBs => {
            if input.fasting_bs() {
                "[x] > 120 mg/dl".to_string()
            } else {
                "[ ] > 120 mg/dl".to_string()
            }
        }
        _ => {
            let value = input.numeric(field).unwrap_or_default();
            match field.range() {
                Some(range) => format!(
                    "{} {:>3} {}",
                    slider(value, *range.start(), *range.end()),
                    value,
                    unit(field)
                ),
                None => value.to_string(),
            }
        }
    }
}

/// Render the biometric form
pub fn render_form(f: &mut Frame, area: Rect, state: &FormState, session: &Session) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Fields
            Constraint::Length(3), // Submit
            Constraint::Length(3), // Error
            Constraint::Length(2), // Footer
        ])
        .split(area);

    render_form_header(f, chunks[0]);
    render_form_fields(f, chunks[1], state, session.input());
    render_submit(f, chunks[2], state, session.is_pending());
    render_error(f, chunks[3], session.error_message());
    render_form_footer(f, chunks[4]);
}

fn render_form_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("HeartSense", MedicalTheme::title()),
        Span::styled(
            " │ AI-Powered Heart Disease Risk Assessment",
            MedicalTheme::text_secondary(),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_form_fields(f: &mut Frame, area: Rect, state: &FormState, input: &BiometricInput) {
    let lines: Vec<Line> = BiometricField::ALL
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let is_selected = i == state.selected;
            let (marker, label_style) = if is_selected {
                ("▌", MedicalTheme::focused())
            } else {
                (" ", MedicalTheme::text_secondary())
            };
            let value_style = if is_selected {
                MedicalTheme::text()
            } else {
                MedicalTheme::text_secondary()
            };

            Line::from(vec![
                Span::styled(marker, MedicalTheme::focused()),
                Span::styled(format!(" {:<28}", field.label()), label_style),
                Span::styled(field_value(input, *field), value_style),
            ])
        })
        .collect();

    let block = Block::default()
        .title(Span::styled(" Patient Metrics ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_submit(f: &mut Frame, area: Rect, state: &FormState, pending: bool) {
    let (label, style) = if pending {
        ("  Processing...  ", MedicalTheme::text_muted())
    } else if state.on_submit() {
        ("  Analyze Risk  ", MedicalTheme::selected())
    } else {
        ("  Analyze Risk  ", MedicalTheme::focused())
    };

    let button = Paragraph::new(Line::from(Span::styled(label, style)))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(if pending {
                    MedicalTheme::border()
                } else {
                    MedicalTheme::border_focused()
                }),
        );

    f.render_widget(button, area);
}

fn render_error(f: &mut Frame, area: Rect, message: Option<&str>) {
    let Some(message) = message else {
        return;
    };

    let content = Paragraph::new(Line::from(vec![
        Span::styled("! ", MedicalTheme::danger()),
        Span::styled(message, MedicalTheme::danger()),
    ]))
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(MedicalTheme::danger()),
    );

    f.render_widget(content, area);
}

fn render_form_footer(f: &mut Frame, area: Rect) {
    let content = Line::from(vec![
        Span::styled("[↑↓] ", MedicalTheme::key_hint()),
        Span::styled("Navigate ", MedicalTheme::key_desc()),
        Span::styled("[←→] ", MedicalTheme::key_hint()),
        Span::styled("Adjust ", MedicalTheme::key_desc()),
        Span::styled("[PgUp/PgDn] ", MedicalTheme::key_hint()),
        Span::styled("±10 ", MedicalTheme::key_desc()),
        Span::styled("[Enter] ", MedicalTheme::key_hint()),
        Span::styled("Analyze ", MedicalTheme::key_desc()),
        Span::styled("[Esc] ", MedicalTheme::key_hint()),
        Span::styled("Clear Error ", MedicalTheme::key_desc()),
        Span::styled("[Q] ", MedicalTheme::key_hint()),
        Span::styled("Quit", MedicalTheme::key_desc()),
    ]);

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChestPainType, RestingEcg, Sex};

    #[test]
    fn test_numeric_adjust_clamps_to_range() {
        let input = BiometricInput::default();
        assert_eq!(
            adjust(&input, BiometricField::Age, 1),
            FieldUpdate::Age(46)
        );
        assert_eq!(
            adjust(&input, BiometricField::Age, 100),
            FieldUpdate::Age(90)
        );
        assert_eq!(
            adjust(&input, BiometricField::RestingBp, -1000),
            FieldUpdate::RestingBp(80)
        );
    }

    #[test]
    fn test_categorical_adjust_cycles() {
        let input = BiometricInput::default();
        assert_eq!(
            adjust(&input, BiometricField::Sex, 1),
            FieldUpdate::Sex(Sex::Female)
        );
        assert_eq!(
            adjust(&input, BiometricField::FastingBs, -1),
            FieldUpdate::FastingBs(true)
        );
        assert_eq!(
            adjust(&input, BiometricField::ChestPainType, -1),
            FieldUpdate::ChestPainType(ChestPainType::Asymptomatic)
        );
        assert_eq!(
            adjust(&input, BiometricField::RestingEcg, 1),
            FieldUpdate::RestingEcg(RestingEcg::StTWaveAbnormality)
        );
    }

    #[test]
    fn test_cursor_wraps_through_submit_row() {
        let mut state = FormState::default();
        state.prev_field();
        assert!(state.on_submit());
        assert_eq!(state.selected_field(), None);

        state.next_field();
        assert_eq!(state.selected_field(), Some(BiometricField::Age));
    }

    #[test]
    fn test_slider_bounds() {
        assert!(slider(20, 20, 90).starts_with('●'));
        assert!(slider(90, 20, 90).ends_with('●'));
    }
}
