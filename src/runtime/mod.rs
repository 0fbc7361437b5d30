//! Process wiring: settings, logging, terminal lifecycle and the event loop.

use std::sync::mpsc;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::catalog;
use crate::media::{MediaEvent, RodioBackend};
use crate::player::Player;

mod event_loop;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Stderr keeps log lines out of the alternate screen; filter with
    // RUST_LOG as usual.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let settings = settings::load_settings();
    // One timeout governs every HTTP request: the catalog document and
    // the audio sources it points at.
    let http_timeout = Duration::from_secs(settings.catalog.timeout_secs);

    let (event_tx, event_rx) = mpsc::channel::<MediaEvent>();
    let backend = RodioBackend::spawn(event_tx, http_timeout);
    let mut player = Player::new(backend, settings.playback.default_volume);

    // Single-attempt catalog fetch. The event loop polls the receiver;
    // if we tear down first the late result lands in a dead channel.
    let fetch_rx = catalog::spawn_fetch(settings.catalog.url.clone(), http_timeout);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut player, &event_rx, fetch_rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    player.into_backend().shutdown();

    run_result
}
