use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use super::*;
use crate::catalog::Track;
use crate::media::{MediaBackend, MediaCmd, MediaEvent};

/// Backend that records every command instead of making sound.
#[derive(Default, Clone)]
struct Recorder(Rc<RefCell<Vec<MediaCmd>>>);

impl Recorder {
    fn commands(&self) -> Vec<MediaCmd> {
        self.0.borrow().clone()
    }

    fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

impl MediaBackend for Recorder {
    fn command(&mut self, cmd: MediaCmd) {
        self.0.borrow_mut().push(cmd);
    }
}

fn t(title: &str, duration: f64) -> Track {
    Track {
        title: title.into(),
        artist: format!("{title} artist"),
        src: format!("https://cdn.example/{title}.mp3"),
        duration,
        ..Track::default()
    }
}

fn player_with(tracks: Vec<Track>) -> (Player<Recorder>, Recorder) {
    let recorder = Recorder::default();
    let mut player = Player::new(recorder.clone(), 0.7);
    player.set_catalog(tracks);
    recorder.clear();
    (player, recorder)
}

#[test]
fn navigation_wraps_around_both_ways() {
    let (mut player, _) = player_with(vec![t("A", 60.0), t("B", 60.0), t("C", 60.0)]);
    assert_eq!(player.current, Some(0));

    player.previous_track();
    assert_eq!(player.current, Some(2));
    player.next_track();
    assert_eq!(player.current, Some(0));

    // Degenerate single-track catalog wraps onto itself.
    let (mut solo, _) = player_with(vec![t("Solo", 30.0)]);
    solo.previous_track();
    assert_eq!(solo.current, Some(0));
    solo.next_track();
    assert_eq!(solo.current, Some(0));
    assert_eq!(solo.intent, PlayIntent::Playing);
}

#[test]
fn format_clock_renders_minutes_and_padded_seconds() {
    let cases = [
        (0.0, "0:00"),
        (59.0, "0:59"),
        (60.0, "1:00"),
        (61.0, "1:01"),
        (3599.0, "59:59"),
        (3600.0, "60:00"),
    ];
    for (secs, expected) in cases {
        assert_eq!(format_clock(secs), expected, "for {secs}");
    }
}

#[test]
fn format_clock_guards_non_finite_input() {
    assert_eq!(format_clock(f64::NAN), UNKNOWN_CLOCK);
    assert_eq!(format_clock(f64::INFINITY), UNKNOWN_CLOCK);
    assert_eq!(format_clock(-1.0), UNKNOWN_CLOCK);
}

#[test]
fn toggle_play_pause_is_idempotent_over_two_calls() {
    let (mut player, _) = player_with(vec![t("A", 60.0)]);
    let icon_before = player.view.playing_icon;
    let intent_before = player.intent;

    player.toggle_play_pause();
    assert_eq!(player.intent, PlayIntent::Playing);
    assert!(player.view.playing_icon);

    player.toggle_play_pause();
    assert_eq!(player.intent, intent_before);
    assert_eq!(player.view.playing_icon, icon_before);
}

#[test]
fn play_current_track_does_not_reload() {
    let (mut player, recorder) = player_with(vec![t("A", 60.0), t("B", 60.0)]);

    // Same index: only a play command, no new source.
    player.play_track(0);
    assert_eq!(recorder.commands(), vec![MediaCmd::Play]);

    // Different index: load (set source) first, then play, in that order.
    recorder.clear();
    player.play_track(1);
    let cmds = recorder.commands();
    assert_eq!(cmds.len(), 2);
    assert!(matches!(cmds[0], MediaCmd::SetSource(ref url) if url.contains("B.mp3")));
    assert_eq!(cmds[1], MediaCmd::Play);
}

#[test]
fn progress_updates_slider_and_elapsed_text() {
    let (mut player, _) = player_with(vec![t("A", 60.0)]);
    player.handle_media_event(MediaEvent::MetadataReady {
        duration: Duration::from_secs(120),
    });
    player.handle_media_event(MediaEvent::TimeAdvanced {
        position: Duration::from_secs(30),
    });

    assert_eq!(player.view.progress, 25.0);
    assert_eq!(player.view.elapsed_text, "0:30");
}

#[test]
fn ended_notification_auto_advances_and_keeps_playing() {
    let (mut player, _) = player_with(vec![t("A", 60.0), t("B", 90.0)]);
    assert_eq!(player.current, Some(0));
    assert_eq!(player.view.total_text, "1:00");

    player.handle_media_event(MediaEvent::Ended);
    assert_eq!(player.current, Some(1));
    assert_eq!(player.view.title, "B");
    assert_eq!(player.view.total_text, "1:30");
    assert_eq!(player.intent, PlayIntent::Playing);
}

#[test]
fn empty_catalog_stays_idle_without_panicking() {
    let recorder = Recorder::default();
    let mut player = Player::new(recorder.clone(), 0.7);
    recorder.clear();

    // Fetch rejection path: the catalog is simply never installed.
    assert_eq!(player.current, None);
    assert!(!player.has_tracks());

    player.toggle_play_pause();
    player.next_track();
    player.previous_track();
    player.seek_to(50);
    player.activate_selected();

    assert_eq!(player.current, None);
    assert_eq!(player.intent, PlayIntent::Paused);
    assert!(recorder.commands().is_empty());
}

#[test]
fn seek_is_a_no_op_until_duration_is_known() {
    // Declared duration of zero: nothing to map the slider onto.
    let (mut player, recorder) = player_with(vec![t("A", 0.0)]);
    player.seek_to(50);
    assert!(recorder.commands().is_empty());

    // Once metadata arrives the same seek maps onto the real duration.
    player.handle_media_event(MediaEvent::MetadataReady {
        duration: Duration::from_secs(200),
    });
    player.seek_to(50);
    assert_eq!(
        recorder.commands(),
        vec![MediaCmd::SeekTo(Duration::from_secs(100))]
    );
    assert_eq!(player.view.progress, 50.0);
}

#[test]
fn volume_slider_maps_to_fraction() {
    let (mut player, recorder) = player_with(vec![t("A", 60.0)]);
    player.set_volume(35);
    assert_eq!(player.view.volume, 35);
    assert_eq!(recorder.commands(), vec![MediaCmd::SetVolume(0.35)]);

    // Out-of-range slider positions clamp.
    player.set_volume(250);
    assert_eq!(player.view.volume, 100);
}

#[test]
fn default_volume_is_applied_at_construction() {
    let recorder = Recorder::default();
    let player = Player::new(recorder.clone(), 0.7);
    assert_eq!(player.view.volume, 70);
    assert_eq!(recorder.commands(), vec![MediaCmd::SetVolume(0.7)]);
}

#[test]
fn failed_play_reconciles_observed_state() {
    let (mut player, _) = player_with(vec![t("A", 60.0)]);
    player.toggle_play_pause();
    assert_eq!(player.intent, PlayIntent::Playing);

    // The backend could not start; intent stays, observed state does not lie.
    player.handle_media_event(MediaEvent::Failed {
        message: "cannot decode".into(),
    });
    assert_eq!(player.intent, PlayIntent::Playing);
    assert!(!player.observed_playing);
}

#[test]
fn single_track_catalog_loops_onto_itself_at_the_end() {
    let (mut player, recorder) = player_with(vec![t("Solo", 30.0)]);
    player.play_track(0);
    recorder.clear();

    // Natural end: the backend goes idle, then reports the end of the
    // source. Auto-advance wraps onto the same track and asks for play
    // again without reloading it.
    player.handle_media_event(MediaEvent::StateChanged { playing: false });
    player.handle_media_event(MediaEvent::Ended);

    assert_eq!(player.current, Some(0));
    assert_eq!(player.intent, PlayIntent::Playing);
    assert_eq!(recorder.commands(), vec![MediaCmd::Play]);
}

#[test]
fn unknown_declared_duration_shows_the_clock_sentinel() {
    let (mut player, _) = player_with(vec![t("A", 0.0), t("B", 95.0)]);
    assert_eq!(player.view.total_text, UNKNOWN_CLOCK);

    player.load_track(1);
    assert_eq!(player.view.total_text, "1:35");

    player.load_track(0);
    assert_eq!(player.view.total_text, UNKNOWN_CLOCK);
}

#[test]
fn load_track_resets_progress_and_estimates_total() {
    let (mut player, recorder) = player_with(vec![t("A", 60.0), t("B", 95.0)]);
    player.handle_media_event(MediaEvent::TimeAdvanced {
        position: Duration::from_secs(30),
    });
    assert_eq!(player.view.progress, 50.0);

    player.load_track(1);
    assert_eq!(player.view.progress, 0.0);
    assert_eq!(player.view.elapsed_text, "0:00");
    assert_eq!(player.view.total_text, "1:35");
    assert_eq!(player.view.artist, "B artist");
    // Loading alone never issues a play command.
    assert!(!recorder.commands().contains(&MediaCmd::Play));
}
