//! Media primitive: the playback backend behind the player.
//!
//! The player talks to an injected [`MediaBackend`] through the command
//! set in `types`; backends answer with notifications on an mpsc channel.
//! Production code wires in the rodio worker from `thread`.

mod sink;
mod thread;
mod types;

pub use thread::RodioBackend;
pub use types::{MediaBackend, MediaCmd, MediaEvent};
