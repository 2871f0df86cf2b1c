//! User configuration — swipe tuning and persistence.
//!
//! Tunables are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/swipe-deck/config.toml` (default
//! `~/.config/swipe-deck/config.toml`).  The cooldown and tolerance defaults
//! mirror the feel of stacked-card sites (one accepted swipe per second, a
//! small dead zone for trackpad residue) but none of them is a contract —
//! they are all adjustable live from the settings overlay.

use std::path::PathBuf;
use std::time::Duration;

use crate::ui::animator::Ease;

/// Application configuration — all the knobs of the swipe machine.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Minimum spacing between accepted swipes, in milliseconds.
    pub cooldown_ms: u64,
    /// Gesture deltas at or below this many rows are ignored as noise.
    pub wheel_tolerance: f64,
    /// Duration of a panel transition, in milliseconds.
    pub transition_ms: u64,
    /// Easing curve for panel transitions.
    pub transition_ease: Ease,
    /// Rows scrolled per wheel notch (and per `j`/`k` press).
    pub wheel_step: f64,
    /// Page smoothing damping per tick, 0.05–0.95 (higher settles faster).
    pub smooth_speed: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: 1000,
            wheel_tolerance: 0.5,
            transition_ms: 600,
            transition_ease: Ease::OutCubic,
            wheel_step: 3.0,
            smooth_speed: 0.35,
        }
    }
}

impl AppConfig {
    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }

    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    // Keep every knob bounded for predictable UX, whatever the file says.
    pub fn set_cooldown_ms(&mut self, v: u64) {
        self.cooldown_ms = v.clamp(100, 5000);
    }

    pub fn set_wheel_tolerance(&mut self, v: f64) {
        self.wheel_tolerance = v.clamp(0.0, 10.0);
    }

    pub fn set_transition_ms(&mut self, v: u64) {
        self.transition_ms = v.clamp(50, 5000);
    }

    pub fn set_wheel_step(&mut self, v: f64) {
        self.wheel_step = v.clamp(1.0, 10.0);
    }

    pub fn set_smooth_speed(&mut self, v: f64) {
        self.smooth_speed = v.clamp(0.05, 0.95);
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        if path.exists() {
            if let Ok(contents) = std::fs::read_to_string(&path) {
                return Self::parse_config(&contents);
            }
        }
        Self::default()
    }

    /// Persist current config to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        Ok(())
    }

    fn parse_config(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            match key {
                "cooldown_ms" => {
                    if let Ok(v) = value.parse() {
                        config.set_cooldown_ms(v);
                    }
                }
                "wheel_tolerance" => {
                    if let Ok(v) = value.parse() {
                        config.set_wheel_tolerance(v);
                    }
                }
                "transition_ms" => {
                    if let Ok(v) = value.parse() {
                        config.set_transition_ms(v);
                    }
                }
                "wheel_step" => {
                    if let Ok(v) = value.parse() {
                        config.set_wheel_step(v);
                    }
                }
                "transition_ease" => {
                    if let Some(ease) = Ease::from_config_key(value) {
                        config.transition_ease = ease;
                    }
                }
                "smooth_speed" => {
                    if let Ok(v) = value.parse() {
                        config.set_smooth_speed(v);
                    }
                }
                _ => {}
            }
        }

        config
    }

    fn serialise(&self) -> String {
        [
            "# swipe-deck configuration".to_string(),
            String::new(),
            "# Swipe tuning".to_string(),
            format!("cooldown_ms = {}", self.cooldown_ms),
            format!("wheel_tolerance = {}", self.wheel_tolerance),
            format!("transition_ms = {}", self.transition_ms),
            format!("transition_ease = {}", self.transition_ease.config_key()),
            format!("wheel_step = {}", self.wheel_step),
            format!("smooth_speed = {}", self.smooth_speed),
            String::new(),
        ]
        .join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/swipe-deck/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("swipe-deck").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialise_parse_round_trip() {
        let mut config = AppConfig::default();
        config.set_cooldown_ms(750);
        config.set_wheel_tolerance(1.25);
        config.set_transition_ms(450);
        config.transition_ease = Ease::Linear;
        let parsed = AppConfig::parse_config(&config.serialise());
        assert_eq!(parsed, config);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let parsed = AppConfig::parse_config(
            "cooldown_ms = 99999\nwheel_tolerance = -3\nsmooth_speed = 2.0\n",
        );
        assert_eq!(parsed.cooldown_ms, 5000);
        assert_eq!(parsed.wheel_tolerance, 0.0);
        assert_eq!(parsed.smooth_speed, 0.95);
    }

    #[test]
    fn junk_lines_fall_back_to_defaults() {
        let parsed = AppConfig::parse_config("# comment\n[section]\nnot a pair\nunknown = 5\n");
        assert_eq!(parsed, AppConfig::default());
    }
}
