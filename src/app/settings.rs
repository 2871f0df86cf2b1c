//! Settings menu model (data only).
//!
//! Keeping these definitions outside the input handler lets both the handler
//! and UI renderers consume the same source of truth without cross-importing.
//! Every item is a numeric knob: `adjust` steps it by ±1 increment, clamps
//! through the config setters, and pushes the result into the live machine.

use crate::app::state::AppState;

/// A single steppable item in the settings menu.
pub struct SettingsItem {
    pub label: &'static str,
    /// Current value, formatted for display.
    pub value: fn(&AppState) -> String,
    /// Step the value by `direction` (-1 or +1) increments.
    pub adjust: fn(&mut AppState, i64),
}

/// All items shown in the settings popup, in display order.
pub static SETTINGS_ITEMS: &[SettingsItem] = &[
    SettingsItem {
        label: "Cooldown",
        value: |s| format!("{}ms", s.config.cooldown_ms),
        adjust: |s, d| {
            let next = s.config.cooldown_ms.saturating_add_signed(d * 100);
            s.config.set_cooldown_ms(next);
            commit(s, format!("Cooldown: {}ms", s.config.cooldown_ms));
        },
    },
    SettingsItem {
        label: "Wheel Tolerance",
        value: |s| format!("{:.2} rows", s.config.wheel_tolerance),
        adjust: |s, d| {
            let next = s.config.wheel_tolerance + d as f64 * 0.25;
            s.config.set_wheel_tolerance(next);
            commit(s, format!("Tolerance: {:.2} rows", s.config.wheel_tolerance));
        },
    },
    SettingsItem {
        label: "Transition",
        value: |s| format!("{}ms", s.config.transition_ms),
        adjust: |s, d| {
            let next = s.config.transition_ms.saturating_add_signed(d * 50);
            s.config.set_transition_ms(next);
            commit(s, format!("Transition: {}ms", s.config.transition_ms));
        },
    },
    SettingsItem {
        label: "Ease Curve",
        value: |s| s.config.transition_ease.label().to_string(),
        adjust: |s, d| {
            let all = crate::ui::animator::Ease::ALL;
            let idx = all
                .iter()
                .position(|e| *e == s.config.transition_ease)
                .unwrap_or(0) as i64;
            let next = (idx + d).rem_euclid(all.len() as i64) as usize;
            s.config.transition_ease = all[next];
            commit(s, format!("Ease: {}", s.config.transition_ease.label()));
        },
    },
    SettingsItem {
        label: "Wheel Step",
        value: |s| format!("{:.1} rows", s.config.wheel_step),
        adjust: |s, d| {
            let next = s.config.wheel_step + d as f64 * 0.5;
            s.config.set_wheel_step(next);
            commit(s, format!("Wheel step: {:.1} rows", s.config.wheel_step));
        },
    },
    SettingsItem {
        label: "Smoothing",
        value: |s| format!("{:.2}", s.config.smooth_speed),
        adjust: |s, d| {
            let next = s.config.smooth_speed + d as f64 * 0.05;
            s.config.set_smooth_speed(next);
            commit(s, format!("Smoothing: {:.2}", s.config.smooth_speed));
        },
    },
];

fn commit(state: &mut AppState, message: String) {
    state.apply_tuning();
    let _ = state.config.save();
    state.status_message = Some(message);
}
