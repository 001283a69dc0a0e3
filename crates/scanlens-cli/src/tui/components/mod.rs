//! TUI widgets
//!
//! Layout, top to bottom: header, viewfinder or result panel, status
//! line, footer with key hints.

mod result_panel;
mod status_bar;

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use scanlens_core::SessionState;

use crate::tui::app::App;

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(5),    // viewfinder / result
            Constraint::Length(1), // status
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);

    if app.show_result {
        result_panel::render(frame, chunks[1], app);
    } else {
        render_viewfinder(frame, chunks[1], app);
    }

    status_bar::render(frame, chunks[2], app);
    render_footer(frame, chunks[3], app);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " scanlens ",
            Style::default()
                .fg(app.theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("QR code scanner", Style::default().fg(app.theme.dim)),
    ]));
    frame.render_widget(header, area);
}

/// Placeholder for the camera viewport. Frames are sampled for
/// decoding, not rendered.
fn render_viewfinder(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border))
        .title(" scanner ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let message = match app.session.state() {
        SessionState::Starting => "Opening camera...",
        SessionState::Scanning => "Camera active. Point it at a QR code.",
        SessionState::Idle | SessionState::Stopped => "Camera off.",
    };

    let centered = center_vertically(inner);
    let body = Paragraph::new(Line::from(Span::styled(
        message,
        Style::default().fg(app.theme.text),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(body, centered);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let mut hints: Vec<(&str, &str)> = Vec::new();
    if app.start_visible() {
        hints.push(("s", "start"));
    }
    if app.stop_visible() {
        hints.push(("x", "stop"));
    }
    if app.show_result {
        hints.push(("c", "copy"));
        if app.result.as_ref().is_some_and(|r| r.is_url) {
            hints.push(("o", "open link"));
        }
        hints.push(("n", "new scan"));
    }
    hints.push(("q", "quit"));

    let mut spans = Vec::new();
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", Style::default()));
        }
        spans.push(Span::styled(
            *key,
            Style::default()
                .fg(app.theme.accent)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(": {action}"),
            Style::default().fg(app.theme.text),
        ));
    }

    let footer = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(footer, area);
}

/// Single line vertically centered inside an area.
fn center_vertically(area: Rect) -> Rect {
    let offset = area.height / 2;
    Rect {
        y: area.y + offset,
        height: 1.min(area.height),
        ..area
    }
}
