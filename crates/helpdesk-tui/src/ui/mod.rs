//! TUI layout compositing — assembles all UI panels.

mod chat;
mod input;
mod quick_actions;
mod status;
mod switcher;

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{App, WidgetView};

/// Render the full TUI layout.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // ┌──────────────────────────────────┐
    // │ Tabs (switcher)                  │
    // ├──────────────────────────────────┤
    // │ Chat feed                        │
    // │                                  │
    // ├──────────────────────────────────┤
    // │ Quick actions                    │
    // ├──────────────────────────────────┤
    // │ Status bar                       │
    // ├──────────────────────────────────┤
    // │ Input                            │
    // └──────────────────────────────────┘

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // tabs
            Constraint::Min(5),    // content
            Constraint::Length(1), // status
        ])
        .split(area);

    switcher::draw(frame, app, main_layout[0]);

    let Some(view) = app.active_view() else {
        let empty = Block::default().title(" No chat widgets configured ");
        frame.render_widget(empty, main_layout[1]);
        return;
    };

    let session = view.widget.session();
    if !session.is_open() {
        draw_launcher(frame, view, main_layout[1]);
    } else if session.is_minimized() {
        draw_minimized(frame, view, main_layout[1]);
    } else {
        let content_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // chat
                Constraint::Length(1), // quick actions
                Constraint::Length(3), // input
            ])
            .split(main_layout[1]);

        chat::draw(frame, view, content_layout[0]);
        quick_actions::draw(frame, view, content_layout[1]);
        input::draw(frame, app, view, content_layout[2]);
    }

    status::draw(frame, view, main_layout[2]);
}

/// Closed widget: a single launcher line.
fn draw_launcher(frame: &mut Frame, view: &WidgetView, area: Rect) {
    let mut text = format!(" Chat with {} (Ctrl+O to open)", view.widget.profile().title);
    if view.unread > 0 {
        text.push_str(&format!("  [{} new]", view.unread));
    }
    let launcher = Paragraph::new(text).style(Style::default().fg(Color::Cyan));
    frame.render_widget(launcher, area);
}

/// Minimized widget: header only.
fn draw_minimized(frame: &mut Frame, view: &WidgetView, area: Rect) {
    let title = if view.unread > 0 {
        format!(" {} ({} new) ", view.widget.profile().title, view.unread)
    } else {
        format!(" {} ", view.widget.profile().title)
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::TOP)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let hint = Paragraph::new("Minimized (Ctrl+N to restore)")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(hint, inner);
}
