//! Skin tab switcher.

use ratatui::prelude::*;
use ratatui::widgets::Tabs;

use crate::app::App;

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<String> = app
        .views
        .iter()
        .map(|v| {
            let indicator = if v.widget.is_typing() { "*" } else { " " };
            format!(" {}{} ", v.widget.profile().title, indicator)
        })
        .collect();

    if titles.is_empty() {
        return;
    }

    let tabs = Tabs::new(titles)
        .select(app.active_tab)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Cyan).bold())
        .divider("|");

    frame.render_widget(tabs, area);
}
