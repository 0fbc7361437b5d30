//! The rodio playback worker.
//!
//! Commands arrive over an mpsc channel, notifications go back the same
//! way. Elapsed time is tracked with started-at/accumulated bookkeeping
//! and published on a periodic tick while playing.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use rodio::{OutputStreamBuilder, Sink};

use super::sink::create_sink_at;
use super::types::{MediaBackend, MediaCmd, MediaEvent};

const TICK: Duration = Duration::from_millis(200);

/// Media backend that decodes and plays sources through `rodio` on a
/// dedicated thread.
pub struct RodioBackend {
    tx: Sender<MediaCmd>,
    join: Option<JoinHandle<()>>,
}

impl RodioBackend {
    /// Spawn the worker thread. Notifications are delivered on `events`;
    /// source downloads give up after `source_timeout`.
    pub fn spawn(events: Sender<MediaEvent>, source_timeout: Duration) -> Self {
        let (tx, rx) = mpsc::channel::<MediaCmd>();
        let join = thread::spawn(move || worker(rx, events, source_timeout));
        Self {
            tx,
            join: Some(join),
        }
    }

    /// Ask the worker to stop and wait for it to wind down.
    pub fn shutdown(mut self) {
        let _ = self.tx.send(MediaCmd::Quit);
        if let Some(h) = self.join.take() {
            let _ = h.join();
        }
    }
}

impl MediaBackend for RodioBackend {
    fn command(&mut self, cmd: MediaCmd) {
        // The worker only goes away on Quit; a send failure after that
        // is harmless.
        let _ = self.tx.send(cmd);
    }
}

/// What a `Play` command should do given the worker's sink state.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum PlayAction {
    /// Resume the existing sink.
    Resume,
    /// The source is exhausted: rebuild the sink from the start.
    Restart,
    /// Nothing playable is loaded; the intent cannot be honored.
    Reject,
}

/// Decide the `Play` behavior from whether a sink exists (and is empty)
/// and whether the source bytes are still buffered.
pub(super) fn play_action(sink_empty: Option<bool>, has_data: bool) -> PlayAction {
    match sink_empty {
        Some(false) => PlayAction::Resume,
        Some(true) if has_data => PlayAction::Restart,
        _ => PlayAction::Reject,
    }
}

fn worker(rx: Receiver<MediaCmd>, events: Sender<MediaEvent>, source_timeout: Duration) {
    let mut stream = match OutputStreamBuilder::open_default_stream() {
        Ok(s) => s,
        Err(e) => {
            let _ = events.send(MediaEvent::Failed {
                message: format!("no audio output device: {e}"),
            });
            // Keep draining so command sends stay harmless until Quit.
            while let Ok(cmd) = rx.recv() {
                if matches!(cmd, MediaCmd::Quit) {
                    break;
                }
            }
            return;
        }
    };
    // rodio logs to stderr when OutputStream is dropped. That's useful in
    // debugging, but noisy for a TUI app.
    stream.log_on_drop(false);

    let mut sink: Option<Sink> = None;
    // Raw bytes of the current source, kept around so seeking can rebuild
    // the sink at an arbitrary position.
    let mut data: Option<Vec<u8>> = None;
    let mut volume: f32 = 1.0;
    let mut playing = false;
    let mut started_at: Option<Instant> = None;
    let mut accumulated = Duration::ZERO;
    let mut ended_sent = false;

    loop {
        match rx.recv_timeout(TICK) {
            Ok(MediaCmd::SetSource(url)) => {
                if let Some(s) = sink.take() {
                    s.stop();
                }
                playing = false;
                started_at = None;
                accumulated = Duration::ZERO;
                ended_sent = false;

                match load_source(&url, source_timeout) {
                    Ok(bytes) => match create_sink_at(&stream, bytes.clone(), Duration::ZERO) {
                        Ok((new_sink, total)) => {
                            new_sink.set_volume(volume);
                            sink = Some(new_sink);
                            data = Some(bytes);
                            if let Some(duration) = total {
                                let _ = events.send(MediaEvent::MetadataReady { duration });
                            }
                        }
                        Err(e) => {
                            data = None;
                            let _ = events.send(MediaEvent::Failed {
                                message: format!("cannot decode {url}: {e}"),
                            });
                            let _ = events.send(MediaEvent::StateChanged { playing: false });
                        }
                    },
                    Err(e) => {
                        data = None;
                        let _ = events.send(MediaEvent::Failed {
                            message: format!("cannot load {url}: {e}"),
                        });
                        let _ = events.send(MediaEvent::StateChanged { playing: false });
                    }
                }
            }

            Ok(MediaCmd::Play) => {
                match play_action(sink.as_ref().map(Sink::empty), data.is_some()) {
                    PlayAction::Resume => {
                        if let Some(ref s) = sink {
                            s.play();
                        }
                        if !playing {
                            playing = true;
                            started_at = Some(Instant::now());
                            let _ = events.send(MediaEvent::StateChanged { playing: true });
                        }
                    }
                    PlayAction::Restart => {
                        // The sink drained itself dry; play means "from
                        // the top" now. The buffered bytes rebuild it.
                        if let (Some(bytes), Some(old)) = (data.clone(), sink.take()) {
                            old.stop();
                            match create_sink_at(&stream, bytes, Duration::ZERO) {
                                Ok((new_sink, _)) => {
                                    new_sink.set_volume(volume);
                                    new_sink.play();
                                    sink = Some(new_sink);
                                    accumulated = Duration::ZERO;
                                    started_at = Some(Instant::now());
                                    ended_sent = false;
                                    playing = true;
                                    let _ =
                                        events.send(MediaEvent::StateChanged { playing: true });
                                    let _ = events.send(MediaEvent::TimeAdvanced {
                                        position: Duration::ZERO,
                                    });
                                }
                                Err(e) => {
                                    playing = false;
                                    started_at = None;
                                    let _ = events.send(MediaEvent::Failed {
                                        message: format!("cannot restart source: {e}"),
                                    });
                                    let _ =
                                        events.send(MediaEvent::StateChanged { playing: false });
                                }
                            }
                        }
                    }
                    PlayAction::Reject => {
                        // Nothing loaded; the play intent cannot be honored.
                        let _ = events.send(MediaEvent::StateChanged { playing: false });
                    }
                }
            }

            Ok(MediaCmd::Pause) => {
                if let Some(ref s) = sink {
                    s.pause();
                }
                if playing {
                    if let Some(st) = started_at.take() {
                        accumulated += st.elapsed();
                    }
                    playing = false;
                    let _ = events.send(MediaEvent::StateChanged { playing: false });
                }
            }

            Ok(MediaCmd::SeekTo(pos)) => {
                if let (Some(bytes), Some(old)) = (data.clone(), sink.take()) {
                    old.stop();
                    match create_sink_at(&stream, bytes, pos) {
                        Ok((new_sink, _)) => {
                            new_sink.set_volume(volume);
                            if playing {
                                new_sink.play();
                                started_at = Some(Instant::now());
                            } else {
                                started_at = None;
                            }
                            accumulated = pos;
                            ended_sent = false;
                            sink = Some(new_sink);
                            let _ = events.send(MediaEvent::TimeAdvanced { position: pos });
                        }
                        Err(e) => {
                            playing = false;
                            started_at = None;
                            let _ = events.send(MediaEvent::Failed {
                                message: format!("seek failed: {e}"),
                            });
                            let _ = events.send(MediaEvent::StateChanged { playing: false });
                        }
                    }
                }
            }

            Ok(MediaCmd::SetVolume(v)) => {
                volume = v.clamp(0.0, 1.0);
                if let Some(ref s) = sink {
                    s.set_volume(volume);
                }
            }

            Ok(MediaCmd::Quit) => {
                if let Some(ref s) = sink {
                    s.stop();
                }
                break;
            }

            Err(RecvTimeoutError::Timeout) => {
                if let Some(ref s) = sink {
                    if playing && s.empty() {
                        // Source ran out: go idle and report the end once.
                        if let Some(st) = started_at.take() {
                            accumulated += st.elapsed();
                        }
                        playing = false;
                        let _ = events.send(MediaEvent::StateChanged { playing: false });
                        if !ended_sent {
                            ended_sent = true;
                            let _ = events.send(MediaEvent::Ended);
                        }
                    } else if playing {
                        let _ = events.send(MediaEvent::TimeAdvanced {
                            position: elapsed(started_at, accumulated),
                        });
                    }
                }
            }

            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}

/// Download the full source body. Catalog tracks are short beat previews,
/// so buffering in memory keeps seeking trivial. The timeout covers the
/// whole request; a stalled host must not wedge the worker.
pub(super) fn load_source(url: &str, timeout: Duration) -> Result<Vec<u8>, reqwest::Error> {
    let client = reqwest::blocking::Client::builder().timeout(timeout).build()?;
    let body = client.get(url).send()?.error_for_status()?.bytes()?;
    Ok(body.to_vec())
}

/// Current playback position from the started-at/accumulated pair.
pub(super) fn elapsed(started_at: Option<Instant>, accumulated: Duration) -> Duration {
    match started_at {
        Some(st) => accumulated + st.elapsed(),
        None => accumulated,
    }
}
