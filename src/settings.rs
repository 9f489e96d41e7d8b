//! Game settings and preferences
//!
//! Key bindings plus HUD options. Persisted in LocalStorage on the web.

use serde::{Deserialize, Serialize};

use crate::sim::Side;

/// Something a key can do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    PaddleUp(Side),
    PaddleDown(Side),
    TogglePause,
    Reset,
    ToggleFps,
}

/// Key names (as reported by `KeyboardEvent.key`) for each action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub left_up: Vec<String>,
    pub left_down: Vec<String>,
    pub right_up: Vec<String>,
    pub right_down: Vec<String>,
    pub toggle_pause: Vec<String>,
    pub reset: Vec<String>,
    pub toggle_fps: Vec<String>,
}

fn keys(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left_up: keys(&["w", "W"]),
            left_down: keys(&["s", "S"]),
            right_up: keys(&["ArrowUp"]),
            right_down: keys(&["ArrowDown"]),
            toggle_pause: keys(&[" "]),
            reset: keys(&["Escape"]),
            toggle_fps: keys(&["f", "F"]),
        }
    }
}

impl KeyBindings {
    /// Action bound to `key`, if any. Earlier entries win on conflicts.
    pub fn action_for_key(&self, key: &str) -> Option<Action> {
        let table = [
            (&self.left_up, Action::PaddleUp(Side::Left)),
            (&self.left_down, Action::PaddleDown(Side::Left)),
            (&self.right_up, Action::PaddleUp(Side::Right)),
            (&self.right_down, Action::PaddleDown(Side::Right)),
            (&self.toggle_pause, Action::TogglePause),
            (&self.reset, Action::Reset),
            (&self.toggle_fps, Action::ToggleFps),
        ];
        table
            .into_iter()
            .find(|(names, _)| names.iter().any(|n| n == key))
            .map(|(_, action)| action)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub key_bindings: KeyBindings,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            key_bindings: KeyBindings::default(),
            show_fps: false,
        }
    }
}

impl Settings {
    /// Action bound to `key`, if any
    pub fn action_for_key(&self, key: &str) -> Option<Action> {
        self.key_bindings.action_for_key(key)
    }

    /// Parse settings JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse settings JSON, falling back to defaults on bad input
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring unreadable settings: {}", e);
                Self::default()
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "classic_pong_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json_or_default(&json);
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
        log::info!("Using default settings");
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        log::debug!("Settings not persisted natively: {:?}", self.to_json());
    }
}
