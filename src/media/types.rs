//! The command/notification contract between the player and a backend.

use std::time::Duration;

/// Commands the player issues to the media primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaCmd {
    /// Replace the current source with the resource at the given URL.
    /// Does not start playback.
    SetSource(String),
    /// Start or resume playback of the current source.
    Play,
    /// Pause playback, keeping the position.
    Pause,
    /// Jump to an absolute position in the current source.
    SeekTo(Duration),
    /// Set playback volume as a fraction in `[0, 1]`.
    SetVolume(f32),
    /// Shut the backend down.
    Quit,
}

/// Notifications a backend emits back to the player.
///
/// These carry the *observed* state; the player keeps its command intent
/// separately and reconciles from these.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Playback position moved.
    TimeAdvanced { position: Duration },
    /// The true source duration became known.
    MetadataReady { duration: Duration },
    /// Observed playback state changed (started, paused, could not start).
    StateChanged { playing: bool },
    /// The current source played to its end.
    Ended,
    /// A command could not be honored (bad source, device trouble).
    Failed { message: String },
}

/// The seam between the player and whatever actually makes sound.
pub trait MediaBackend {
    /// Issue a command. Fire-and-forget: results come back as events.
    fn command(&mut self, cmd: MediaCmd);
}
