//! Text input bar. Disabled while a reply is being typed.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{App, WidgetView};

pub fn draw(frame: &mut Frame, app: &App, view: &WidgetView, area: Rect) {
    let enabled = app.input_enabled();
    let border_color = if enabled { Color::Cyan } else { Color::DarkGray };

    let block = Block::default()
        .title(" Message (Enter to send) ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let profile = view.widget.profile();
    let buffer = view.widget.session().input();
    let input = if view.widget.is_typing() {
        Paragraph::new(format!("{} is typing...", profile.title))
            .style(Style::default().fg(Color::DarkGray))
    } else if buffer.is_empty() {
        Paragraph::new(profile.placeholder.as_str()).style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(buffer).style(Style::default().fg(Color::White))
    };
    frame.render_widget(input, inner);

    // Show cursor
    if enabled {
        frame.set_cursor_position(Position::new(
            inner.x + buffer.chars().count() as u16,
            inner.y,
        ));
    }
}
