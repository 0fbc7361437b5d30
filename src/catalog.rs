//! Track catalog: the ordered list of playable beats and its loader.
//!
//! The catalog is fetched once at startup from a configured HTTP endpoint
//! returning a JSON array of track records.

mod display;
mod fetch;
mod model;

pub use display::{card_subtitle, price_tag};
pub use fetch::{CatalogError, fetch, parse, spawn_fetch};
pub use model::Track;

#[cfg(test)]
mod tests;
