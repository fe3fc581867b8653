//! helpdesk-tui — Terminal front end for the scripted support chat.
//! Uses Ratatui + Crossterm for rendering.

mod app;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use tracing::info;

use helpdesk_core::config::Config;

use app::App;

#[tokio::main]
async fn main() -> Result<()> {
    let project_root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = Config::load_from_dir(&project_root)?;

    // Log to a file, since we own the terminal
    let log_path = config.log_file.clone();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_ansi(false)
        .with_writer(move || -> Box<dyn io::Write> {
            match std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_path)
            {
                Ok(file) => Box::new(file),
                Err(_) => Box::new(io::sink()),
            }
        })
        .try_init();

    let mut app = App::new(&config)?;
    info!("Starting TUI with {} skin(s)", app.views.len());

    // Setup terminal
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    // Cleanup
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;

    info!("TUI stopped.");
    result
}

fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        // Draw
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Deliver due bot replies (non-blocking)
        app.tick();

        // Handle terminal events
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match (key.code, key.modifiers) {
                    // Quit
                    (KeyCode::Char('c'), KeyModifiers::CONTROL)
                    | (KeyCode::Char('q'), KeyModifiers::CONTROL) => {
                        app.should_quit = true;
                    }
                    // Widget chrome
                    (KeyCode::Char('o'), KeyModifiers::CONTROL) => app.toggle_open(),
                    (KeyCode::Char('n'), KeyModifiers::CONTROL) => app.toggle_minimize(),
                    // Tab switching
                    (KeyCode::Right, KeyModifiers::ALT) => app.next_tab(),
                    (KeyCode::Left, KeyModifiers::ALT) => app.prev_tab(),
                    // Quick actions
                    (KeyCode::F(n @ 1..=4), _) => app.quick_action(usize::from(n - 1)),
                    // Input handling
                    (KeyCode::Enter, _) => app.send_message(),
                    (KeyCode::Backspace, _) => app.backspace(),
                    (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                        app.type_char(c)
                    }
                    // Scroll
                    (KeyCode::Up, _) | (KeyCode::PageUp, _) => app.scroll_up(),
                    (KeyCode::Down, _) | (KeyCode::PageDown, _) => app.scroll_down(),
                    _ => {}
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
