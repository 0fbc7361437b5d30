//! Utilities for creating `rodio` sinks from in-memory audio bytes.
//!
//! The helper here encapsulates decoding and preparing a paused `Sink`
//! at the requested start position.

use std::io::Cursor;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

/// Create a paused `Sink` playing `data` from `start_at`, along with the
/// total duration when the container declares one.
pub(super) fn create_sink_at(
    handle: &OutputStream,
    data: Vec<u8>,
    start_at: Duration,
) -> Result<(Sink, Option<Duration>), rodio::decoder::DecoderError> {
    let source = Decoder::new(Cursor::new(data))?;
    let total = source.total_duration();

    // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
    let source = source.skip_duration(start_at);

    let sink = Sink::connect_new(handle.mixer());
    sink.append(source);
    sink.pause();
    Ok((sink, total))
}
