use std::time::Duration;

use super::display::{card_subtitle, price_tag};
use super::fetch::{CatalogError, parse, spawn_fetch};
use super::model::Track;

#[test]
fn parse_reads_a_full_record() {
    let body = r#"[{
        "title": "Night Drive",
        "artist": "Prod. Kato",
        "image": "https://cdn.example/covers/night-drive.jpg",
        "src": "https://cdn.example/audio/night-drive.mp3",
        "duration": 152.0,
        "bpm": 140,
        "genre": "Trap",
        "price": 29.99
    }]"#;

    let tracks = parse(body).unwrap();
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].title, "Night Drive");
    assert_eq!(tracks[0].artist, "Prod. Kato");
    assert_eq!(tracks[0].bpm, 140);
    assert_eq!(tracks[0].duration, 152.0);
}

#[test]
fn parse_defaults_missing_fields() {
    let body = r#"[{"title": "Only A Title"}]"#;

    let tracks = parse(body).unwrap();
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].title, "Only A Title");
    assert_eq!(tracks[0].artist, "");
    assert_eq!(tracks[0].src, "");
    assert_eq!(tracks[0].duration, 0.0);
    assert_eq!(tracks[0].bpm, 0);
    assert_eq!(tracks[0].price, 0.0);
}

#[test]
fn parse_rejects_non_array_bodies() {
    assert!(parse(r#"{"title": "not an array"}"#).is_err());
    assert!(parse("<!doctype html>").is_err());
}

#[test]
fn card_text_matches_store_layout() {
    let track = Track {
        bpm: 140,
        genre: "Trap".to_string(),
        price: 29.99,
        ..Track::default()
    };
    assert_eq!(card_subtitle(&track), "140 BPM • Trap");
    assert_eq!(price_tag(&track), "$29.99");

    let whole = Track {
        price: 30.0,
        ..Track::default()
    };
    assert_eq!(price_tag(&whole), "$30");
}

#[test]
fn spawn_fetch_reports_connection_errors() {
    // Port 1 is never listening; the single attempt must fail, not hang.
    let rx = spawn_fetch(
        "http://127.0.0.1:1/beats.json".to_string(),
        Duration::from_secs(2),
    );
    let result = rx
        .recv_timeout(Duration::from_secs(10))
        .expect("fetch thread should deliver a result");
    assert!(matches!(result, Err(CatalogError::Http(_))));
}
