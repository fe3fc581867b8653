//! Status bar — shows typing state, message count, unread replies.

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use helpdesk_core::types::TypingState;

use crate::app::WidgetView;

pub fn draw(frame: &mut Frame, view: &WidgetView, area: Rect) {
    let session = view.widget.session();
    let state = session.typing();

    let state_color = match state {
        TypingState::Idle => Color::DarkGray,
        TypingState::Typing => Color::Green,
    };

    let mut spans = vec![
        Span::styled(
            format!(" {} ", state),
            Style::default().fg(Color::Black).bg(state_color),
        ),
        Span::raw(format!(" messages: {} ", session.messages().len())),
    ];

    if view.unread > 0 {
        spans.push(Span::styled(
            format!(" unread: {} ", view.unread),
            Style::default().fg(Color::Yellow),
        ));
    }

    spans.push(Span::styled(
        " Ctrl+O open/close  Ctrl+N minimize  Alt+←/→ switch  Ctrl+C quit",
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
