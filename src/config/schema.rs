use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/beatdeck/config.toml` or `~/.config/beatdeck/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `BEATDECK__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub catalog: CatalogSettings,
    pub playback: PlaybackSettings,
    pub controls: ControlsSettings,
    pub ui: UiSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog: CatalogSettings::default(),
            playback: PlaybackSettings::default(),
            controls: ControlsSettings::default(),
            ui: UiSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Endpoint returning the JSON track array.
    pub url: String,
    /// Request timeout in seconds for the single fetch attempt.
    pub timeout_secs: u64,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            url: "http://localhost:8000/beats.json".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Volume applied at startup, as a fraction in `[0, 1]`.
    pub default_volume: f32,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            default_volume: 0.7,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Slider percentage points moved per seek keypress.
    pub seek_step: u16,
    /// Slider percentage points moved per volume keypress.
    pub volume_step: u16,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            seek_step: 5,
            volume_step: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Whether to show each card's price tag.
    pub show_prices: bool,
    /// Whether to show the cover image URL in the now-playing pane.
    pub show_image_url: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ beatdeck ~ beats for sale ~ ".to_string(),
            show_prices: true,
            show_image_url: true,
        }
    }
}
