use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

use super::model::Track;

/// Errors produced while loading the catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("catalog body is not a JSON track array: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Fetch the catalog from `url` in a single attempt. No retries.
pub fn fetch(url: &str, timeout: Duration) -> Result<Vec<Track>, CatalogError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()?;
    let body = client.get(url).send()?.error_for_status()?.text()?;
    Ok(parse(&body)?)
}

/// Parse a catalog body: a JSON array of track records.
pub fn parse(body: &str) -> Result<Vec<Track>, serde_json::Error> {
    serde_json::from_str(body)
}

/// Fetch the catalog on a background thread.
///
/// The result arrives on the returned channel once. Dropping the receiver
/// cancels delivery: a late response lands in a dead channel instead of
/// mutating a torn-down UI.
pub fn spawn_fetch(url: String, timeout: Duration) -> Receiver<Result<Vec<Track>, CatalogError>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(fetch(&url, timeout));
    });
    rx
}
