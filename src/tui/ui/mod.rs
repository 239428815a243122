//! UI module: View components for the TUI.

pub mod form;
pub mod report;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::MedicalTheme;

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(vec![Span::styled(
            "DISCLAIMER: Assessments are generated by an AI model and are not a medical diagnosis.",
            MedicalTheme::text_muted(),
        )]),
        Line::from(vec![Span::styled(
            "Consult a qualified healthcare provider before acting on any result.",
            MedicalTheme::text_muted(),
        )]),
    ];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(MedicalTheme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}
