//! Player model: catalog, transport state machine and view sync.

use std::time::Duration;

use crate::catalog::Track;
use crate::media::{MediaBackend, MediaCmd, MediaEvent};

use super::view::{NowPlaying, UNKNOWN_CLOCK, format_clock};

/// The last transport command issued, regardless of whether the backend
/// has honored it yet.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlayIntent {
    Paused,
    Playing,
}

impl Default for PlayIntent {
    fn default() -> Self {
        Self::Paused
    }
}

/// The playlist player.
///
/// States: Idle (no catalog), Loaded+Paused, Loaded+Playing. All
/// transitions happen on the UI thread in response to key input or
/// backend notifications; there is exactly one writer.
pub struct Player<B: MediaBackend> {
    pub tracks: Vec<Track>,
    /// Index of the loaded track; `None` until a catalog arrives.
    pub current: Option<usize>,
    /// Selection cursor over the card list.
    pub selected: usize,
    /// Command intent: what the last play/pause asked for.
    pub intent: PlayIntent,
    /// Observed playback state, reconciled from backend notifications.
    /// Can lag behind (or contradict) `intent` when a play command fails.
    pub observed_playing: bool,
    /// Volume fraction in `[0, 1]`.
    pub volume: f32,
    /// Authoritative duration once the backend reports metadata.
    known_duration: Option<Duration>,
    pub view: NowPlaying,
    backend: B,
}

impl<B: MediaBackend> Player<B> {
    pub fn new(backend: B, default_volume: f32) -> Self {
        let volume = default_volume.clamp(0.0, 1.0);
        let mut player = Self {
            tracks: Vec::new(),
            current: None,
            selected: 0,
            intent: PlayIntent::Paused,
            observed_playing: false,
            volume,
            known_duration: None,
            view: NowPlaying::default(),
            backend,
        };
        player.view.volume = (volume * 100.0).round() as u16;
        player.backend.command(MediaCmd::SetVolume(volume));
        player
    }

    /// Install a freshly fetched catalog and load its first track.
    /// Loading sets up the display; it does not start playback.
    pub fn set_catalog(&mut self, tracks: Vec<Track>) {
        self.tracks = tracks;
        self.selected = 0;
        if self.tracks.is_empty() {
            self.current = None;
        } else {
            self.load_track(0);
        }
    }

    pub fn has_tracks(&self) -> bool {
        !self.tracks.is_empty()
    }

    /// Load the track at `index`: update the now-playing fields, reset
    /// progress and hand the source to the backend. No playback side
    /// effect.
    pub fn load_track(&mut self, index: usize) {
        let Some(track) = self.tracks.get(index) else {
            return;
        };
        let src = track.src.clone();
        self.view.title = track.title.clone();
        self.view.artist = track.artist.clone();
        self.view.image = track.image.clone();
        self.current = Some(index);
        self.known_duration = None;
        // Declared duration is a pre-fetch estimate; MetadataReady
        // overwrites it with the authoritative value. A record that
        // declares nothing usable shows the unknown sentinel.
        self.view.total_text = match self.duration() {
            Some(d) => format_clock(d.as_secs_f64()),
            None => UNKNOWN_CLOCK.to_string(),
        };
        self.view.elapsed_text = format_clock(0.0);
        self.view.progress = 0.0;
        self.backend.command(MediaCmd::SetSource(src));
    }

    /// Play the track at `index`, loading it first only when it is not
    /// the current one.
    pub fn play_track(&mut self, index: usize) {
        if self.current != Some(index) {
            self.load_track(index);
        }
        if self.current.is_some() {
            self.play();
        }
    }

    fn play(&mut self) {
        self.intent = PlayIntent::Playing;
        self.view.playing_icon = true;
        self.backend.command(MediaCmd::Play);
    }

    fn pause(&mut self) {
        self.intent = PlayIntent::Paused;
        self.view.playing_icon = false;
        self.backend.command(MediaCmd::Pause);
    }

    /// Toggle between the two transport intents. The icon flips on
    /// command issuance; confirmation arrives later as `StateChanged`.
    pub fn toggle_play_pause(&mut self) {
        if self.current.is_none() {
            return;
        }
        match self.intent {
            PlayIntent::Playing => self.pause(),
            PlayIntent::Paused => self.play(),
        }
    }

    /// Jump to the previous track, wrapping from the first to the last.
    /// Always resumes playback.
    pub fn previous_track(&mut self) {
        let len = self.tracks.len();
        if len == 0 {
            return;
        }
        let cur = self.current.unwrap_or(0);
        let prev = if cur > 0 { cur - 1 } else { len - 1 };
        self.play_track(prev);
    }

    /// Jump to the next track, wrapping from the last back to the first.
    /// Always resumes playback.
    pub fn next_track(&mut self) {
        let len = self.tracks.len();
        if len == 0 {
            return;
        }
        let cur = self.current.unwrap_or(0);
        let next = if cur + 1 < len { cur + 1 } else { 0 };
        self.play_track(next);
    }

    /// Seek to a 0-100 slider position. A no-op until a duration is
    /// known; there is nothing meaningful to map the slider onto.
    pub fn seek_to(&mut self, slider: u16) {
        let Some(duration) = self.duration() else {
            return;
        };
        if duration.is_zero() {
            return;
        }
        let slider = slider.min(100);
        let target = duration.mul_f64(f64::from(slider) / 100.0);
        self.view.progress = f64::from(slider);
        self.backend.command(MediaCmd::SeekTo(target));
    }

    /// Set volume from a 0-100 slider position, applied immediately.
    pub fn set_volume(&mut self, slider: u16) {
        let slider = slider.min(100);
        self.volume = f32::from(slider) / 100.0;
        self.view.volume = slider;
        self.backend.command(MediaCmd::SetVolume(self.volume));
    }

    /// Best known duration of the current track: backend metadata wins
    /// over the catalog's declared estimate.
    pub fn duration(&self) -> Option<Duration> {
        if let Some(d) = self.known_duration {
            return Some(d);
        }
        let track = self.current.and_then(|i| self.tracks.get(i))?;
        if track.duration.is_finite() && track.duration > 0.0 {
            Some(Duration::from_secs_f64(track.duration))
        } else {
            None
        }
    }

    /// Apply a backend notification to the player state.
    pub fn handle_media_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::TimeAdvanced { position } => self.update_progress(position),
            MediaEvent::MetadataReady { duration } => self.update_duration(duration),
            MediaEvent::StateChanged { playing } => self.observed_playing = playing,
            MediaEvent::Ended => self.next_track(),
            MediaEvent::Failed { message } => {
                tracing::warn!(%message, "media backend failure");
                self.observed_playing = false;
            }
        }
    }

    /// Recompute the progress slider/fill and the elapsed-time text.
    fn update_progress(&mut self, position: Duration) {
        self.view.elapsed_text = format_clock(position.as_secs_f64());
        if let Some(duration) = self.duration() {
            if !duration.is_zero() {
                let percent = position.as_secs_f64() / duration.as_secs_f64() * 100.0;
                self.view.progress = percent.clamp(0.0, 100.0);
            }
        }
    }

    /// Replace the estimated total-time text with the authoritative value.
    fn update_duration(&mut self, duration: Duration) {
        self.known_duration = Some(duration);
        self.view.total_text = format_clock(duration.as_secs_f64());
    }

    /// Move the selection cursor to the next card, wrapping around.
    pub fn select_next(&mut self) {
        if self.has_tracks() {
            self.selected = (self.selected + 1) % self.tracks.len();
        }
    }

    /// Move the selection cursor to the previous card, wrapping around.
    pub fn select_prev(&mut self) {
        if self.has_tracks() {
            let len = self.tracks.len();
            self.selected = (self.selected + len - 1) % len;
        }
    }

    /// Activate the selected card, like clicking it in a store grid.
    pub fn activate_selected(&mut self) {
        if self.has_tracks() {
            self.play_track(self.selected);
        }
    }

    /// Tear the player apart, handing the backend back to the caller so
    /// it can be shut down properly.
    pub fn into_backend(self) -> B {
        self.backend
    }
}
