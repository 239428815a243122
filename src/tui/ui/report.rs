//! Report overlay shown after a successful assessment.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::application::PrintableReport;
use crate::tui::styles::MedicalTheme;

/// Outcome of the last print attempt for the open report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrintStatus {
    Sent,
    Failed(String),
}

/// Rectangle of `percent_x` by `percent_y` centered in `area`.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Render the report overlay on top of `area`
pub fn render_report(
    f: &mut Frame,
    area: Rect,
    report: &PrintableReport,
    print_status: Option<&PrintStatus>,
) {
    let popup = centered_rect(80, 85, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .title(Span::styled(
            " AI-Powered Cardiology Report ",
            MedicalTheme::subtitle(),
        ))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border_focused());
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Length(3), // Risk level
            Constraint::Min(0),    // Body
            Constraint::Length(2), // Footer
        ])
        .margin(1)
        .split(inner);

    render_report_header(f, chunks[0], report);
    render_risk(f, chunks[1], report);
    render_body(f, chunks[2], report);
    render_report_footer(f, chunks[3], print_status);
}

fn render_report_header(f: &mut Frame, area: Rect, report: &PrintableReport) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled("HEARTSENSE", MedicalTheme::title()),
        Span::styled("   Date: ", MedicalTheme::text_secondary()),
        Span::styled(report.date_label(), MedicalTheme::text()),
        Span::styled("   ID: ", MedicalTheme::text_secondary()),
        Span::styled(report.display_id(), MedicalTheme::text()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_risk(f: &mut Frame, area: Rect, report: &PrintableReport) {
    let level = report.result().risk_level();
    let risk = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("RISK ASSESSMENT: {level}"),
            MedicalTheme::risk_level(level).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            level.description(),
            MedicalTheme::text_secondary(),
        )),
    ])
    .alignment(Alignment::Center);

    f.render_widget(risk, area);
}

fn render_body(f: &mut Frame, area: Rect, report: &PrintableReport) {
    let result = report.result();
    let mut lines = vec![
        Line::from(Span::styled("Summary", MedicalTheme::subtitle())),
        Line::from(Span::styled(result.summary(), MedicalTheme::text())),
        Line::from(""),
        Line::from(Span::styled(
            "Actionable Suggestions",
            MedicalTheme::subtitle(),
        )),
    ];

    lines.extend(result.recommendations().iter().enumerate().map(|(i, rec)| {
        Line::from(vec![
            Span::styled(format!("{:>2}. ", i + 1), MedicalTheme::focused()),
            Span::styled(rec.as_str(), MedicalTheme::text()),
        ])
    }));

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Disclaimer: ", MedicalTheme::warning()),
        Span::styled(result.disclaimer(), MedicalTheme::text_muted()),
    ]));

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

fn render_report_footer(f: &mut Frame, area: Rect, print_status: Option<&PrintStatus>) {
    let mut spans = vec![
        Span::styled("[P] ", MedicalTheme::key_hint()),
        Span::styled("Print ", MedicalTheme::key_desc()),
        Span::styled("[Esc] ", MedicalTheme::key_hint()),
        Span::styled("Close", MedicalTheme::key_desc()),
    ];

    match print_status {
        Some(PrintStatus::Sent) => {
            spans.push(Span::styled("   Sent to printer", MedicalTheme::success()));
        }
        Some(PrintStatus::Failed(message)) => {
            spans.push(Span::styled(
                format!("   Print failed: {message}"),
                MedicalTheme::danger(),
            ));
        }
        None => {}
    }

    let footer = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(80, 50, area);
        assert_eq!(popup.width, 80);
        assert_eq!(popup.x, 10);
        assert!(popup.y >= 10 && popup.bottom() <= 30);
    }
}
