//! Main terminal event loop: catalog arrival, media notifications, key
//! input and drawing.

use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend, widgets::ListState};

use crate::catalog::{CatalogError, Track};
use crate::config;
use crate::media::{MediaBackend, MediaEvent};
use crate::player::Player;
use crate::ui;

type FetchReceiver = Receiver<Result<Vec<Track>, CatalogError>>;

/// Run the loop until the user quits. Handles, in order per iteration:
/// the pending catalog fetch, backend notifications, drawing, key input.
pub fn run<B: MediaBackend>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    player: &mut Player<B>,
    media_rx: &Receiver<MediaEvent>,
    fetch_rx: FetchReceiver,
) -> Result<(), Box<dyn std::error::Error>> {
    // Consumed once the single fetch attempt resolves.
    let mut fetch_rx = Some(fetch_rx);
    // Lives across frames so the card list keeps its scroll offset.
    let mut card_state = ListState::default();

    loop {
        if let Some(rx) = &fetch_rx {
            match rx.try_recv() {
                Ok(Ok(tracks)) => {
                    tracing::info!(count = tracks.len(), "catalog loaded");
                    player.set_catalog(tracks);
                    fetch_rx = None;
                }
                Ok(Err(e)) => {
                    // Silent empty state: log and render no cards.
                    tracing::error!(error = %e, url = %settings.catalog.url, "catalog fetch failed");
                    fetch_rx = None;
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => {
                    fetch_rx = None;
                }
            }
        }

        // Reconcile player state from backend notifications.
        while let Ok(ev) = media_rx.try_recv() {
            player.handle_media_event(ev);
        }

        terminal.draw(|f| ui::draw(f, player, &settings.ui, &settings.controls, &mut card_state))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') => break,

                    KeyCode::Char('j') | KeyCode::Down => player.select_next(),
                    KeyCode::Char('k') | KeyCode::Up => player.select_prev(),
                    KeyCode::Enter => player.activate_selected(),

                    KeyCode::Char(' ') | KeyCode::Char('p') => player.toggle_play_pause(),
                    KeyCode::Char('h') => player.previous_track(),
                    KeyCode::Char('l') => player.next_track(),

                    KeyCode::Left => {
                        let target = player
                            .view
                            .progress
                            .round()
                            .clamp(0.0, 100.0) as u16;
                        player.seek_to(target.saturating_sub(settings.controls.seek_step));
                    }
                    KeyCode::Right => {
                        let target = player
                            .view
                            .progress
                            .round()
                            .clamp(0.0, 100.0) as u16;
                        player.seek_to((target + settings.controls.seek_step).min(100));
                    }

                    KeyCode::Char('-') => {
                        let v = player.view.volume;
                        player.set_volume(v.saturating_sub(settings.controls.volume_step));
                    }
                    KeyCode::Char('+') | KeyCode::Char('=') => {
                        let v = player.view.volume;
                        player.set_volume((v + settings.controls.volume_step).min(100));
                    }

                    _ => {}
                }
            }
        }
    }

    Ok(())
}
