use serde::Deserialize;

/// A single playable item with display metadata and a playback resource.
///
/// Identity is the track's position in the catalog ordering; records are
/// immutable once loaded. Every field is defaulted at ingestion so an
/// incomplete record degrades to blank display text instead of aborting
/// the whole catalog.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Track {
    pub title: String,
    pub artist: String,
    /// Cover image URL (shown as text in the terminal).
    pub image: String,
    /// Audio resource URL handed to the media backend.
    pub src: String,
    /// Declared length in seconds. Treated as an estimate until the
    /// backend reports the authoritative duration.
    pub duration: f64,
    pub bpm: u32,
    pub genre: String,
    pub price: f64,
}

impl Default for Track {
    fn default() -> Self {
        Self {
            title: String::new(),
            artist: String::new(),
            image: String::new(),
            src: String::new(),
            duration: 0.0,
            bpm: 0,
            genre: String::new(),
            price: 0.0,
        }
    }
}
