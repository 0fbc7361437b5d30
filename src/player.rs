//! The playlist player: all widget state and transport behavior.
//!
//! `Player` owns the catalog, the current index and play intent, the view
//! bindings the UI reads, and an injected media backend.

mod model;
mod view;

pub use model::{PlayIntent, Player};
pub use view::{NowPlaying, UNKNOWN_CLOCK, format_clock};

#[cfg(test)]
mod tests;
