//! Quick-action bar — F1..F4 shortcuts.

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::WidgetView;

pub fn draw(frame: &mut Frame, view: &WidgetView, area: Rect) {
    let fg = if view.widget.is_typing() {
        Color::DarkGray
    } else {
        Color::Cyan
    };

    let mut spans = Vec::new();
    for (i, action) in view.widget.profile().quick_actions.iter().enumerate() {
        spans.push(Span::styled(
            format!(" F{} ", i + 1),
            Style::default().fg(Color::Black).bg(fg),
        ));
        spans.push(Span::raw(format!(" {}  ", action.label)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
