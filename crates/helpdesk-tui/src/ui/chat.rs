//! Scrollable chat feed — message bubbles plus the typing indicator.

use chrono::Local;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use helpdesk_core::types::Sender;

use crate::app::WidgetView;

pub fn draw(frame: &mut Frame, view: &WidgetView, area: Rect) {
    let profile = view.widget.profile();
    let block = Block::default()
        .title(format!(" {} ", profile.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let messages = view.widget.messages();

    // Bottom-up with scroll offset
    let visible_height = inner.height as usize;
    let total = messages.len();
    let end = total.saturating_sub(view.scroll_offset);
    let start = end.saturating_sub(visible_height);

    let mut lines: Vec<Line> = Vec::new();
    for msg in &messages[start..end] {
        let stamp = msg.timestamp.with_timezone(&Local).format("%H:%M");
        let (fg, who, alignment) = match msg.sender {
            Sender::User => (Color::Yellow, "You", Alignment::Right),
            Sender::Bot => (Color::Green, profile.title.as_str(), Alignment::Left),
        };

        lines.push(
            Line::styled(format!("{} · {}", who, stamp), Style::default().fg(Color::DarkGray))
                .alignment(alignment),
        );
        for line in msg.text.lines() {
            lines.push(Line::styled(line.to_string(), Style::default().fg(fg)).alignment(alignment));
        }
        lines.push(Line::raw(""));
    }

    if view.widget.is_typing() && view.scroll_offset == 0 {
        lines.push(Line::styled(
            format!("{} is typing...", profile.title),
            Style::default().fg(Color::DarkGray).italic(),
        ));
    }

    // Keep the newest lines in view
    let overflow = lines.len().saturating_sub(visible_height);
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((overflow.min(u16::MAX as usize) as u16, 0));
    frame.render_widget(paragraph, inner);
}
