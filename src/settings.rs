//! Run settings
//!
//! Loaded from JSON. Every field is optional in the file; bad values fall back
//! to defaults instead of failing the run.

use serde::{Deserialize, Deserializer, Serialize};

use crate::consts::INITIAL_TICK_RATE;
use crate::sim::Mode;

/// Run settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Mode used by the next run; unknown names mean classic
    #[serde(deserialize_with = "lenient_mode")]
    pub mode: Mode,
    /// Ticks per second at the start of a run
    pub initial_tick_rate: f32,
    /// Fixed seed for reproducible runs; `None` draws a fresh one
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: Mode::Classic,
            initial_tick_rate: INITIAL_TICK_RATE,
            seed: None,
        }
    }
}

fn lenient_mode<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Mode, D::Error> {
    let name = String::deserialize(deserializer)?;
    Ok(Mode::from_name_or_default(&name))
}

impl Settings {
    /// Settings for a given mode, everything else default
    pub fn for_mode(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Tick rate to start runs with; non-positive or non-finite values fall
    /// back to the default
    pub fn effective_tick_rate(&self) -> f32 {
        if self.initial_tick_rate.is_finite() && self.initial_tick_rate > 0.0 {
            self.initial_tick_rate
        } else {
            INITIAL_TICK_RATE
        }
    }

    /// Parse settings JSON, falling back to defaults when unreadable
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("Invalid settings ({err}), using defaults");
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> String {
        // Plain data with string keys; encoding cannot fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Load settings from a JSON file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                log::info!("Loaded settings from {}", path.display());
                Self::from_json(&json)
            }
            Err(err) => {
                log::info!("Using default settings ({}: {err})", path.display());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.mode, Mode::Classic);
        assert_eq!(settings.effective_tick_rate(), INITIAL_TICK_RATE);
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn test_partial_json() {
        let settings = Settings::from_json(r#"{"mode": "walls", "seed": 7}"#);
        assert_eq!(settings.mode, Mode::Walls);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.initial_tick_rate, INITIAL_TICK_RATE);
    }

    #[test]
    fn test_unknown_mode_falls_back_to_classic() {
        let settings = Settings::from_json(r#"{"mode": "hyperspeed"}"#);
        assert_eq!(settings.mode, Mode::Classic);
    }

    #[test]
    fn test_garbage_json_gives_defaults() {
        assert_eq!(Settings::from_json("not json"), Settings::default());
    }

    #[test]
    fn test_bad_tick_rate_is_replaced() {
        let mut settings = Settings::for_mode(Mode::Speed);
        settings.initial_tick_rate = 0.0;
        assert_eq!(settings.effective_tick_rate(), INITIAL_TICK_RATE);
        settings.initial_tick_rate = f32::NAN;
        assert_eq!(settings.effective_tick_rate(), INITIAL_TICK_RATE);
        settings.initial_tick_rate = 15.0;
        assert_eq!(settings.effective_tick_rate(), 15.0);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            mode: Mode::NoDie,
            initial_tick_rate: 12.5,
            seed: Some(3),
        };
        assert_eq!(Settings::from_json(&settings.to_json()), settings);
    }
}
