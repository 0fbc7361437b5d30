//! View bindings: the displayed strings and slider positions the UI reads.
//!
//! The player writes these on every state change, so rendering never
//! reaches into playback internals and tests can assert on the exact
//! text a user would see.

/// Sentinel shown while a duration is unknown.
pub const UNKNOWN_CLOCK: &str = "--:--";

/// Displayed now-playing fields and transport slider positions.
#[derive(Debug, Clone, PartialEq)]
pub struct NowPlaying {
    pub title: String,
    pub artist: String,
    pub image: String,
    pub elapsed_text: String,
    pub total_text: String,
    /// Progress slider position in `[0, 100]`; also drives the fill gauge.
    pub progress: f64,
    /// Volume slider position in `[0, 100]`.
    pub volume: u16,
    /// Transport icon state: `true` renders the pause glyph.
    pub playing_icon: bool,
}

impl Default for NowPlaying {
    fn default() -> Self {
        Self {
            title: String::new(),
            artist: String::new(),
            image: String::new(),
            elapsed_text: format_clock(0.0),
            total_text: UNKNOWN_CLOCK.to_string(),
            progress: 0.0,
            volume: 100,
            playing_icon: false,
        }
    }
}

/// Format seconds as `M:SS` ("0:00", "1:01", "60:00").
///
/// Non-finite or negative input (duration not yet known, malformed
/// metadata) renders the `--:--` sentinel instead of propagating `NaN`
/// into the UI.
pub fn format_clock(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return UNKNOWN_CLOCK.to_string();
    }
    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}
