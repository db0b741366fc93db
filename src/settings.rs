//! Presentation preferences
//!
//! Gameplay constants are fixed; these only affect layout choice and the
//! platform loop. Persisted as JSON in LocalStorage on the web.

use serde::{Deserialize, Serialize};

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed terrain layout for practice runs; `None` picks one from the clock
    pub layout_seed: Option<u64>,
    /// Show a frames-per-second readout under the fuel gauge
    pub show_fps: bool,
    /// Longest frame the loop will bank, in seconds
    pub max_frame_time: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            layout_seed: None,
            show_fps: false,
            max_frame_time: 0.25,
        }
    }
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "lunar_lander_settings";

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Seed for a new session, preferring the pinned layout
    pub fn seed_or(&self, fallback: u64) -> u64 {
        self.layout_seed.unwrap_or(fallback)
    }

    /// Clamp one frame's elapsed time before it reaches the accumulator
    ///
    /// A stored limit that is not a positive finite number falls back to the
    /// default.
    pub fn clamp_frame_time(&self, elapsed: f32) -> f32 {
        let limit = if self.max_frame_time.is_finite() && self.max_frame_time > 0.0 {
            self.max_frame_time
        } else {
            Self::default().max_frame_time
        };
        elapsed.min(limit)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            layout_seed: Some(42),
            show_fps: true,
            max_frame_time: 0.1,
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings = Settings::from_json(r#"{ "show_fps": true }"#).unwrap();
        assert!(settings.show_fps);
        assert_eq!(settings.layout_seed, None);
        assert_eq!(settings.max_frame_time, 0.25);
    }

    #[test]
    fn test_seed_and_clamp() {
        let settings = Settings::default();
        assert_eq!(settings.seed_or(9), 9);
        assert_eq!(settings.clamp_frame_time(3.0), 0.25);
        assert_eq!(settings.clamp_frame_time(0.01), 0.01);

        let pinned = Settings {
            layout_seed: Some(1),
            ..Settings::default()
        };
        assert_eq!(pinned.seed_or(9), 1);
    }

    #[test]
    fn test_bad_stored_limit_falls_back() {
        for limit in [0.0, -1.0, f32::INFINITY, f32::NAN] {
            let settings = Settings {
                max_frame_time: limit,
                ..Settings::default()
            };
            assert_eq!(settings.clamp_frame_time(3.0), 0.25);
        }
    }
}
