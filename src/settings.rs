//! Game settings and preferences
//!
//! Read from LocalStorage on the web (never written back), defaults natively.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// What to do when the camera fails to deliver a frame mid-level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CameraFailurePolicy {
    /// Skip the whole iteration (no tracking, physics or redraw) and try again next frame
    #[default]
    SkipFrame,
    /// Abandon the run and go back to the menu
    AbortToMenu,
}

impl CameraFailurePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CameraFailurePolicy::SkipFrame => "SkipFrame",
            CameraFailurePolicy::AbortToMenu => "AbortToMenu",
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Display ===
    /// Draw tracked hand landmarks over the camera preview
    pub show_landmarks: bool,
    /// Frame-rate cap
    pub target_fps: u32,

    // === Simulation ===
    /// Scale physics by elapsed time instead of one step per frame
    pub variable_timestep: bool,
    /// Camera hiccup handling
    pub camera_failure: CameraFailurePolicy,

    // === Balance ===
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_landmarks: true,
            target_fps: 60,
            variable_timestep: false,
            camera_failure: CameraFailurePolicy::SkipFrame,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Effective target frame rate (never zero)
    pub fn fps(&self) -> u32 {
        self.target_fps.max(1)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "finger_breaker_settings";

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

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
