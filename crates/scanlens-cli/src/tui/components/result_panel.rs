//! Scan result panel
//!
//! Shows the decoded text with its copy, open-link, and new-scan
//! affordances. The open-link action only appears when the payload is
//! a well-formed URL.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::tui::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(result) = &app.result else {
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.success))
        .title(" scan result ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // decoded text
            Constraint::Length(1), // actions
        ])
        .split(inner);

    let text = Paragraph::new(result.text.as_str())
        .style(Style::default().fg(app.theme.text))
        .wrap(Wrap { trim: false });
    frame.render_widget(text, chunks[0]);

    let mut spans: Vec<Span> = Vec::new();
    push_action(
        &mut spans,
        app,
        "c",
        if app.copied_flash_active() {
            "Copied!"
        } else {
            "Copy"
        },
    );
    if result.is_url {
        spans.push(Span::raw("  "));
        push_action(&mut spans, app, "o", "Open Link");
    }
    spans.push(Span::raw("  "));
    push_action(&mut spans, app, "n", "New Scan");

    frame.render_widget(Paragraph::new(Line::from(spans)), chunks[1]);
}

/// Append `[key] label` as a pair of styled spans.
fn push_action<'a>(spans: &mut Vec<Span<'a>>, app: &App, key: &str, label: &'a str) {
    spans.push(Span::styled(
        format!("[{key}] "),
        Style::default()
            .fg(app.theme.accent)
            .add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::styled(label, Style::default().fg(app.theme.text)));
}
