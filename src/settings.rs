//! Game settings and preferences
//!
//! Persisted separately from high scores in LocalStorage. Everything here is
//! presentation- or driver-side; the sim never reads settings.

use serde::{Deserialize, Serialize};

/// Player preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,
    /// Show the spawned/passed/retired counters
    pub show_stats: bool,

    // === Driver behavior ===
    /// Auto-pause when the tab or window loses focus
    pub pause_on_blur: bool,
    /// Run the attract-mode demo after a stretch of input silence
    pub idle_demo: bool,
    /// Input silence before the demo starts (ms)
    pub idle_delay_ms: f64,

    // === Accessibility ===
    /// Screen flash on collision
    pub screen_flash: bool,
    /// Reduced motion (minimize flashes and shake)
    pub reduced_motion: bool,
    /// High contrast mode
    pub high_contrast: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_fps: true,
            show_stats: false,

            pause_on_blur: true,
            idle_demo: true,
            idle_delay_ms: 10_000.0,

            screen_flash: true,
            reduced_motion: false,
            high_contrast: false,
        }
    }
}

impl Settings {
    /// Effective collision flash (respects reduced_motion)
    pub fn effective_screen_flash(&self) -> bool {
        self.screen_flash && !self.reduced_motion
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "chrono_dash_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
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
            if let Ok(json) = serde_json::to_string(self) {
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
