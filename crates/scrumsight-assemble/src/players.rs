//! Player record assembly and side assignment.
//!
//! Sides are assigned by proximity to the nearest preceding team-name
//! mention in the document. When no mention precedes any row the purely
//! positional rule applies (first half of the list is the home side), and
//! the caller is told so a warning can be recorded.

use tracing::debug;

use scrumsight_extract::PlayerRow;
use scrumsight_model::{PlayerAttack, PlayerDefence, PlayerStats, Side};

fn last_mention_before(text_lower: &str, name_lower: &str, offset: usize) -> Option<usize> {
    if name_lower.trim().is_empty() {
        return None;
    }
    // Row offsets come from the original text; lowercasing can shift byte
    // positions, and a mid-char offset yields None here.
    let bounded = offset.min(text_lower.len());
    text_lower.get(..bounded)?.rfind(name_lower)
}

fn side_by_proximity(
    text_lower: &str,
    home_lower: &str,
    away_lower: &str,
    offset: usize,
) -> Option<Side> {
    let home_at = last_mention_before(text_lower, home_lower, offset);
    let away_at = last_mention_before(text_lower, away_lower, offset);
    match (home_at, away_at) {
        (Some(h), Some(a)) => Some(if h > a { Side::Home } else { Side::Away }),
        (Some(_), None) => Some(Side::Home),
        (None, Some(_)) => Some(Side::Away),
        (None, None) => None,
    }
}

/// Turn scanned rows into `PlayerStats`, assigning each a side.
///
/// Returns the records plus whether the positional fallback was used for
/// the whole list.
pub fn assemble_players(
    match_id: &str,
    rows: &[PlayerRow],
    text: &str,
    home_team: Option<&str>,
    away_team: Option<&str>,
) -> (Vec<PlayerStats>, bool) {
    let text_lower = text.to_lowercase();
    let home_lower = home_team.unwrap_or("").to_lowercase();
    let away_lower = away_team.unwrap_or("").to_lowercase();

    let by_proximity: Vec<Option<Side>> = rows
        .iter()
        .map(|row| side_by_proximity(&text_lower, &home_lower, &away_lower, row.offset))
        .collect();

    let used_positional = by_proximity.iter().all(Option::is_none) && !rows.is_empty();
    if used_positional {
        debug!("No team-name mentions near player rows; using positional side split");
    }

    let midpoint = rows.len().div_ceil(2);
    let mut last_side = Side::Home;
    let players = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let side = match by_proximity[i] {
                Some(side) => side,
                // Rows with no preceding mention inherit the previous row's
                // side; under full fallback the first half is home.
                None if used_positional => {
                    if i < midpoint {
                        Side::Home
                    } else {
                        Side::Away
                    }
                }
                None => last_side,
            };
            last_side = side;

            PlayerStats {
                player_id: format!("{match_id}-{}-{}", side.as_str(), row.number),
                player_name: row.name.clone(),
                position: row.position.clone(),
                side,
                minutes_played: row.minutes,
                attack: PlayerAttack {
                    carries: row.carries,
                    metres_carried: row.metres,
                },
                defence: PlayerDefence::from_counts(row.tackles_made, row.tackles_missed),
                // The known row format carries no per-player set-piece or
                // breakdown figures.
                set_piece: None,
                breakdown: None,
            }
        })
        .collect();

    (players, used_positional)
}
