//! Player-row scanning.
//!
//! Player lines have no dedicated section anchor; whatever player-shaped
//! rows the document contains are picked up by one named-capture pattern
//! scanned over the whole normalized text. Side assignment happens later,
//! against the team names, in the assembler.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Jersey number, name, optional position/minutes, then the stat tail:
/// `7 A. Carter (Flanker) 80min 11 carries 38m 14/2 tackles`
static PLAYER_ROW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^\s*(?P<number>\d{1,2})\.?\s+(?P<name>[A-Z][A-Za-z'.-]*(?:\s+[A-Z][A-Za-z'.-]+)+)(?:\s+\((?P<position>[^)]+)\))?(?:\s+(?P<minutes>\d{1,3})\s*min)?\s+(?P<carries>\d+)\s+carries\s+(?P<metres>\d+)\s*m\b[^\n]*?(?P<tackles_made>\d+)\s*/\s*(?P<tackles_missed>\d+)\s+tackles",
    )
    .unwrap()
});

/// One raw player line, before side assignment and validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRow {
    pub number: u32,
    pub name: String,
    pub position: Option<String>,
    pub minutes: Option<u32>,
    pub carries: u32,
    pub metres: u32,
    pub tackles_made: u32,
    pub tackles_missed: u32,
    /// Byte offset of the row in the normalized text, for side proximity.
    pub offset: usize,
}

/// Scan the whole normalized text for player rows.
pub fn scan_player_rows(text: &str) -> Vec<PlayerRow> {
    let rows: Vec<PlayerRow> = PLAYER_ROW
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some(PlayerRow {
                number: caps.name("number")?.as_str().parse().ok()?,
                name: caps.name("name")?.as_str().trim().to_string(),
                position: caps.name("position").map(|m| m.as_str().trim().to_string()),
                minutes: caps.name("minutes").and_then(|m| m.as_str().parse().ok()),
                carries: caps.name("carries")?.as_str().parse().ok()?,
                metres: caps.name("metres")?.as_str().parse().ok()?,
                tackles_made: caps.name("tackles_made")?.as_str().parse().ok()?,
                tackles_missed: caps.name("tackles_missed")?.as_str().parse().ok()?,
                offset: whole.start(),
            })
        })
        .collect();
    debug!("Scanned {} player rows", rows.len());
    rows
}
