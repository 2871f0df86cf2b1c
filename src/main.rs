//! A pinned-section card deck for the terminal.
//!
//! Run the binary to present the built-in demo deck, or pass a deck file
//! (panels separated by `---` lines).  Scroll with the wheel or `j`/`k`;
//! once the deck section is pinned, scrolling swipes cards instead.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stderr, IsTerminal};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, widgets::Paragraph, Terminal};

use crate::app::{
    content::DeckContent,
    event::{spawn_event_reader, AppEvent},
    handler,
    state::{ActiveView, AppState},
};
use crate::core::AnimationDriver;
use crate::ui::{
    deck_widget::DeckWidget,
    layout::AppLayout,
    page::{self, PageWidget},
    popup::SettingsPopup,
    theme::Theme,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Pinned-deck panel swiper for the terminal")]
struct Cli {
    /// Deck file to present (defaults to the built-in demo deck).
    path: Option<PathBuf>,

    /// Override the swipe cooldown in milliseconds (not persisted).
    #[arg(long)]
    cooldown_ms: Option<u64>,

    /// Override the gesture noise tolerance, in rows (not persisted).
    #[arg(long)]
    tolerance: Option<f64>,

    /// Override the transition duration in milliseconds (not persisted).
    #[arg(long)]
    transition_ms: Option<u64>,
}

// ───────────────────────────────────────── main ──────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();

    // A pinned deck is meaningless without an interactive terminal;
    // fail fast before touching terminal modes.
    if !stderr().is_terminal() {
        anyhow::bail!("swipe-deck needs an interactive terminal on stderr");
    }

    // ── load content and config ───────────────────────────────
    let content = match &cli.path {
        Some(path) => DeckContent::load(path)?,
        None => DeckContent::demo(),
    };

    let mut user_config = config::AppConfig::load();
    if let Some(v) = cli.cooldown_ms {
        user_config.set_cooldown_ms(v);
    }
    if let Some(v) = cli.tolerance {
        user_config.set_wheel_tolerance(v);
    }
    if let Some(v) = cli.transition_ms {
        user_config.set_transition_ms(v);
    }

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let mut state = AppState::new(content, user_config, size.height.saturating_sub(1))?;

    // ── event loop ────────────────────────────────────────────
    let mut events = spawn_event_reader(Duration::from_millis(33));

    loop {
        // ── draw first ─────────────────────────────────────────
        // Render before handling the next event so input latency never
        // exceeds one frame, even mid-transition.
        terminal.draw(|frame| {
            let layout = AppLayout::from_area(frame.area());

            frame.render_widget(
                PageWidget::new(&state.content, &state.page),
                layout.page_area,
            );

            let deck = DeckWidget::new(&state.content)
                .origin_row(page::deck_origin_row(&state.page))
                .active(state.machine.active());
            frame.render_stateful_widget(deck, layout.page_area, &mut state.cards);

            let hint = state.status_hint();
            let status_text = state.status_message.as_deref().unwrap_or(&hint);
            let status_style = if state.machine.pinned() {
                Theme::status_pinned_style()
            } else {
                Theme::status_bar_style()
            };
            frame.render_widget(
                Paragraph::new(status_text).style(status_style),
                layout.status_area,
            );

            if state.active_view == ActiveView::Settings {
                frame.render_widget(
                    SettingsPopup {
                        state: &state,
                        selected: state.settings_selected,
                    },
                    frame.area(),
                );
            }
        })?;

        if let Some(event) = events.recv().await {
            match event {
                AppEvent::Key(k) => handler::handle_key(&mut state, k, Instant::now()),
                AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m, Instant::now()),
                AppEvent::Resize(_, h) => state.resize(h.saturating_sub(1)),
                AppEvent::Tick => {
                    state.on_tick(Instant::now());
                }
            }
        } else {
            break;
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    state.animator.teardown();
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
