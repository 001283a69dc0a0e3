//! Status line

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::app::{App, StatusKind};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let color = match app.status.kind {
        StatusKind::Info => app.theme.text,
        StatusKind::Success => app.theme.success,
        StatusKind::Error => app.theme.error,
    };
    let status = Paragraph::new(Line::from(Span::styled(
        format!(" {}", app.status.text),
        Style::default().fg(color),
    )));
    frame.render_widget(status, area);
}
