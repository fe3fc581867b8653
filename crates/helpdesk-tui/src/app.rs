//! App state, input handling, event loop.

use anyhow::Result;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, info};

use helpdesk_core::config::Config;
use helpdesk_core::events::ChatEvent;
use helpdesk_core::types::Sender;
use helpdesk_core::widget::ChatWidget;

/// Per-skin state for the TUI.
pub struct WidgetView {
    pub widget: ChatWidget,
    pub events: broadcast::Receiver<ChatEvent>,
    pub scroll_offset: usize,
    pub unread: usize,
}

impl WidgetView {
    fn new(widget: ChatWidget) -> Self {
        let events = widget.subscribe();
        Self {
            widget,
            events,
            scroll_offset: 0,
            unread: 0,
        }
    }

    /// Open and not minimized.
    pub fn is_visible(&self) -> bool {
        let session = self.widget.session();
        session.is_open() && !session.is_minimized()
    }

    fn handle_event(&mut self, event: ChatEvent) {
        debug!(event = %event.to_json(), "chat event");
        match event {
            ChatEvent::Message(msg) => {
                if msg.sender == Sender::Bot && !self.is_visible() {
                    self.unread += 1;
                }
                // Auto-scroll to bottom
                self.scroll_offset = 0;
            }
            ChatEvent::Visibility { open, minimized } => {
                if open && !minimized {
                    self.unread = 0;
                }
            }
            ChatEvent::Typing(_) => {}
        }
    }

    fn drain_events(&mut self) {
        loop {
            match self.events.try_recv() {
                Ok(event) => self.handle_event(event),
                Err(TryRecvError::Lagged(_)) => continue,
                Err(_) => break,
            }
        }
    }
}

/// The main application state.
pub struct App {
    pub views: Vec<WidgetView>,
    pub active_tab: usize,
    pub should_quit: bool,
}

impl App {
    /// Build one widget per configured skin.
    pub fn new(config: &Config) -> Result<Self> {
        let mut views = Vec::new();
        for skin in config.skins() {
            let resolver = config.resolver(skin)?;
            let widget = ChatWidget::with_resolver(resolver, config.typing_delay());
            views.push(WidgetView::new(widget));
        }
        info!("Created {} chat widget(s)", views.len());

        Ok(App {
            views,
            active_tab: 0,
            should_quit: false,
        })
    }

    pub fn active_view(&self) -> Option<&WidgetView> {
        self.views.get(self.active_tab)
    }

    pub fn active_view_mut(&mut self) -> Option<&mut WidgetView> {
        self.views.get_mut(self.active_tab)
    }

    /// Deliver due replies and process widget events for every skin.
    pub fn tick(&mut self) {
        for view in &mut self.views {
            view.widget.pump();
            view.drain_events();
        }
    }

    /// Whether keystrokes should go to the active input bar.
    pub fn input_enabled(&self) -> bool {
        self.active_view()
            .is_some_and(|v| v.is_visible() && !v.widget.is_typing())
    }

    pub fn type_char(&mut self, c: char) {
        if self.input_enabled() {
            if let Some(view) = self.active_view_mut() {
                view.widget.push_input(c);
            }
        }
    }

    pub fn backspace(&mut self) {
        if self.input_enabled() {
            if let Some(view) = self.active_view_mut() {
                view.widget.pop_input();
            }
        }
    }

    /// Send the active input buffer.
    pub fn send_message(&mut self) {
        if !self.input_enabled() {
            return;
        }
        if let Some(view) = self.active_view_mut() {
            view.widget.submit_input();
        }
    }

    pub fn quick_action(&mut self, index: usize) {
        if !self.input_enabled() {
            return;
        }
        if let Some(view) = self.active_view_mut() {
            view.widget.quick_action(index);
        }
    }

    pub fn toggle_open(&mut self) {
        if let Some(view) = self.active_view_mut() {
            view.widget.toggle_open();
        }
    }

    pub fn toggle_minimize(&mut self) {
        if let Some(view) = self.active_view_mut() {
            view.widget.toggle_minimize();
        }
    }

    pub fn next_tab(&mut self) {
        if !self.views.is_empty() {
            self.active_tab = (self.active_tab + 1) % self.views.len();
        }
    }

    pub fn prev_tab(&mut self) {
        if !self.views.is_empty() {
            if self.active_tab == 0 {
                self.active_tab = self.views.len() - 1;
            } else {
                self.active_tab -= 1;
            }
        }
    }

    pub fn scroll_up(&mut self) {
        if let Some(view) = self.active_view_mut() {
            view.scroll_offset = view.scroll_offset.saturating_add(3);
        }
    }

    pub fn scroll_down(&mut self) {
        if let Some(view) = self.active_view_mut() {
            view.scroll_offset = view.scroll_offset.saturating_sub(3);
        }
    }
}
