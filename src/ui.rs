//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`:
//! a header, the card grid (one card per catalog track), the now-playing
//! pane with progress and volume, and a controls footer.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::catalog::{card_subtitle, price_tag};
use crate::config::{ControlsSettings, UiSettings};
use crate::media::MediaBackend;
use crate::player::Player;

/// Render the controls help text.
fn controls_text(controls: &ControlsSettings) -> String {
    [
        "[j/k] cards".to_string(),
        "[enter] play card".to_string(),
        "[space/p] play/pause".to_string(),
        "[h/l] prev/next".to_string(),
        format!("[left/right] seek -/+{}%", controls.seek_step),
        format!("[-/+] volume -/+{}%", controls.volume_step),
        "[q] quit".to_string(),
    ]
    .join(" | ")
}

/// Build one card's lines: title, subtitle and an optional price tag.
fn card_lines<'a, B: MediaBackend>(
    player: &'a Player<B>,
    index: usize,
    ui_settings: &UiSettings,
) -> Vec<Line<'a>> {
    let track = &player.tracks[index];
    let playing_marker = if player.current == Some(index) {
        if player.view.playing_icon { "▶ " } else { "▮ " }
    } else {
        "  "
    };

    let mut first = vec![
        Span::raw(playing_marker),
        Span::styled(
            track.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ];
    if ui_settings.show_prices {
        first.push(Span::raw("  "));
        first.push(Span::styled(price_tag(track), Style::default().italic()));
    }

    vec![
        Line::from(first),
        Line::from(Span::raw(format!("  {}", card_subtitle(track)))).dim(),
    ]
}

/// Render the entire UI into the provided `frame` from the player state.
/// `card_state` is owned by the caller so the list's scroll offset
/// survives between frames.
pub fn draw<B: MediaBackend>(
    frame: &mut Frame,
    player: &Player<B>,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
    card_state: &mut ListState,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(6),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" beatdeck ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Card grid
    {
        let items: Vec<ListItem> = (0..player.tracks.len())
            .map(|i| ListItem::new(card_lines(player, i, ui_settings)))
            .collect();

        let title = if player.has_tracks() {
            format!(" beats ({}) ", player.tracks.len())
        } else {
            " beats (none loaded) ".to_string()
        };

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        card_state.select(player.has_tracks().then_some(player.selected));
        frame.render_stateful_widget(list, chunks[1], card_state);
    }

    // Now-playing pane
    {
        frame.render_widget(
            Block::default().borders(Borders::ALL).title(" now playing "),
            chunks[2],
        );

        let pane = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(chunks[2].inner(ratatui::layout::Margin {
                horizontal: 2,
                vertical: 1,
            }));

        let icon = if player.view.playing_icon { "⏸" } else { "▶" };
        let mut head = vec![Span::raw(format!("{icon}  "))];
        if player.view.title.is_empty() {
            head.push(Span::raw("nothing loaded").dim());
        } else {
            head.push(Span::styled(
                player.view.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ));
            if !player.view.artist.is_empty() {
                head.push(Span::raw(" — "));
                head.push(Span::raw(player.view.artist.clone()));
            }
        }
        frame.render_widget(Paragraph::new(Line::from(head)), pane[0]);

        let gauge = Gauge::default()
            .ratio((player.view.progress / 100.0).clamp(0.0, 1.0))
            .label(format!(
                "{} / {}",
                player.view.elapsed_text, player.view.total_text
            ));
        frame.render_widget(gauge, pane[1]);

        let volume = Paragraph::new(format!("volume: {:>3}%", player.view.volume));
        frame.render_widget(volume, pane[2]);

        if ui_settings.show_image_url && !player.view.image.is_empty() {
            let image = Paragraph::new(format!("cover: {}", player.view.image))
                .dim()
                .wrap(Wrap { trim: true });
            frame.render_widget(image, pane[3]);
        }
    }

    // Footer
    let footer = Paragraph::new(controls_text(controls_settings))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);
}
