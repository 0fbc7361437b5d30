use super::model::Track;

/// Build the card subtitle line, e.g. `"140 BPM • Trap"`.
pub fn card_subtitle(track: &Track) -> String {
    format!("{} BPM • {}", track.bpm, track.genre)
}

/// Build the card price tag, e.g. `"$29.99"`.
///
/// Prices are rendered the way the record declared them: `29.99` becomes
/// `$29.99`, a whole `30` becomes `$30`.
pub fn price_tag(track: &Track) -> String {
    format!("${}", track.price)
}
