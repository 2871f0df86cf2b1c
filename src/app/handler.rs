//! Input handling — maps key/mouse events to state mutations.
//!
//! Every scroll-like input funnels into `AppState::apply_gesture`, which runs
//! the browser-ordered pipeline (native scroll, freeze guard, intent
//! classification).  Nothing here touches the active index directly.

use std::time::Instant;

use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::settings::SETTINGS_ITEMS;
use crate::app::state::{ActiveView, AppState};
use crate::config::AppConfig;
use crate::core::ScrollSurface;

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent, now: Instant) {
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.active_view {
        ActiveView::Page => handle_page_key(state, key, now),
        ActiveView::Settings => handle_settings_key(state, key),
    }
}

// ── Page view ───────────────────────────────────────────────────

fn handle_page_key(state: &mut AppState, key: KeyEvent, now: Instant) {
    let step = state.config.wheel_step;
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            state.should_quit = true;
        }
        KeyCode::Char('?') => {
            state.active_view = ActiveView::Settings;
            state.settings_selected = 0;
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.apply_gesture(step, now);
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.apply_gesture(-step, now);
        }
        KeyCode::PageDown | KeyCode::Char(' ') => {
            state.apply_gesture(step, now);
        }
        KeyCode::PageUp => {
            state.apply_gesture(-step, now);
        }
        KeyCode::Char('g') | KeyCode::Home => {
            state.jump_to(0.0, now);
        }
        KeyCode::Char('G') | KeyCode::End => {
            let bottom = state.page.max_offset();
            state.jump_to(bottom, now);
        }
        _ => {}
    }
}

// ── Settings view (hardcoded keys) ──────────────────────────────

fn handle_settings_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            state.active_view = ActiveView::Page;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.settings_selected = state.settings_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.settings_selected < SETTINGS_ITEMS.len() - 1 {
                state.settings_selected += 1;
            }
        }
        KeyCode::Left | KeyCode::Char('h') => {
            adjust_selected(state, -1);
        }
        KeyCode::Right | KeyCode::Char('l') => {
            adjust_selected(state, 1);
        }
        KeyCode::Char('r') => {
            state.config = AppConfig::default();
            state.apply_tuning();
            let _ = state.config.save();
            state.status_message = Some("Tuning reset to defaults".to_string());
        }
        _ => {}
    }
}

fn adjust_selected(state: &mut AppState, direction: i64) {
    if let Some(item) = SETTINGS_ITEMS.get(state.settings_selected) {
        (item.adjust)(state, direction);
    }
}

// ── Mouse ───────────────────────────────────────────────────────

/// Process a mouse event.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent, now: Instant) {
    if state.active_view != ActiveView::Page {
        return;
    }

    let step = state.config.wheel_step;
    match mouse.kind {
        MouseEventKind::ScrollDown => {
            state.apply_gesture(step, now);
        }
        MouseEventKind::ScrollUp => {
            state.apply_gesture(-step, now);
        }
        MouseEventKind::Down(MouseButton::Left) => {
            // Clicking a waiting/receded card swipes one step toward it —
            // through the normal intent pipeline, so cooldown and bounds
            // rules still apply.
            if !state.machine.pinned() {
                return;
            }
            if let Some(index) = state.card_at(mouse.column, mouse.row) {
                let active = state.machine.active();
                if index > active {
                    state.apply_gesture(step, now);
                } else if index < active {
                    state.apply_gesture(-step, now);
                }
            }
        }
        _ => {}
    }
}
