//! Section segmentation.
//!
//! Scans normalized text for the fixed set of section anchors. A missing
//! anchor marks the section `found = false`; that is an expected state, not
//! an error. No section depends on another being found first.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::normalize::NormalizedText;

/// The fixed set of recognized report sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionName {
    MatchOverview,
    /// One combined anchor pair yielding both an attack and a defence span.
    AttackDefence,
    BreakdownKicking,
    SetPiece,
    Possessions,
    PlayStyles,
}

impl SectionName {
    pub const ALL: [SectionName; 6] = [
        SectionName::MatchOverview,
        SectionName::AttackDefence,
        SectionName::BreakdownKicking,
        SectionName::SetPiece,
        SectionName::Possessions,
        SectionName::PlayStyles,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionName::MatchOverview => "match_overview",
            SectionName::AttackDefence => "attack_defence",
            SectionName::BreakdownKicking => "breakdown_kicking",
            SectionName::SetPiece => "set_piece",
            SectionName::Possessions => "possessions",
            SectionName::PlayStyles => "play_styles",
        }
    }

    fn anchor(&self) -> &'static Regex {
        match self {
            SectionName::MatchOverview => &MATCH_OVERVIEW_ANCHOR,
            SectionName::AttackDefence => &ATTACK_DEFENCE_ANCHOR,
            SectionName::BreakdownKicking => &BREAKDOWN_KICKING_ANCHOR,
            SectionName::SetPiece => &SET_PIECE_ANCHOR,
            SectionName::Possessions => &POSSESSIONS_ANCHOR,
            SectionName::PlayStyles => &PLAY_STYLES_ANCHOR,
        }
    }
}

static MATCH_OVERVIEW_ANCHOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)^\s*match\s+overview\b").unwrap());
static ATTACK_DEFENCE_ANCHOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)^\s*attack\s*(?:&|and|/)\s*defence\b").unwrap());
static BREAKDOWN_KICKING_ANCHOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)^\s*breakdown\s*(?:&|and|/)\s*kicking\b").unwrap());
static SET_PIECE_ANCHOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)^\s*set\s*pieces?\b").unwrap());
static POSSESSIONS_ANCHOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)^\s*possessions?\s*$").unwrap());
static PLAY_STYLES_ANCHOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)^\s*play\s*styles?\b").unwrap());

static DEFENCE_DIVIDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)^\s*defence\s*:?\s*$").unwrap());

/// One located (or not) section of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: SectionName,
    pub found: bool,
    /// Byte range of the section body within the normalized text.
    pub span: Option<Range<usize>>,
}

/// Locate every known section in the normalized text.
///
/// A section's body runs from the end of its start anchor to the start of
/// the next located anchor (any section), or to the end of the text. Always
/// returns all six sections in `SectionName::ALL` order.
pub fn segment(text: &NormalizedText) -> Vec<Section> {
    let raw = text.as_str();

    let anchors: Vec<(SectionName, Range<usize>)> = SectionName::ALL
        .iter()
        .filter_map(|name| name.anchor().find(raw).map(|m| (*name, m.range())))
        .collect();

    let sections = SectionName::ALL
        .iter()
        .map(|name| {
            let Some((_, anchor)) = anchors.iter().find(|(n, _)| n == name) else {
                return Section {
                    name: *name,
                    found: false,
                    span: None,
                };
            };
            let body_start = anchor.end;
            let body_end = anchors
                .iter()
                .map(|(_, r)| r.start)
                .filter(|s| *s >= body_start)
                .min()
                .unwrap_or(raw.len());
            Section {
                name: *name,
                found: true,
                span: Some(body_start..body_end),
            }
        })
        .collect::<Vec<_>>();

    let found = sections.iter().filter(|s| s.found).count();
    debug!("Located {found} of {} sections", SectionName::ALL.len());
    sections
}

/// Split the combined attack/defence body into its two sub-spans.
///
/// The divider is a standalone `DEFENCE` line. When it is absent the whole
/// body serves as both sub-spans; the two rule tables do not overlap, so
/// each still only picks up its own fields.
pub fn split_attack_defence(body: &str) -> (&str, &str) {
    match DEFENCE_DIVIDER.find(body) {
        Some(m) => (&body[..m.start()], &body[m.end()..]),
        None => (body, body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;

    const DOC: &str = "MATCH OVERVIEW\n\
        Harbour RFC vs Valley RFC\n\
        Score: 24 - 17\n\
        \n\
        ATTACK & DEFENCE\n\
        Carries: 120\n\
        DEFENCE\n\
        Tackles Made: 62\n\
        \n\
        SET PIECE\n\
        Scrums Won: 6\n";

    #[test]
    fn test_segment_finds_present_sections() {
        let text = normalize(DOC.as_bytes()).unwrap();
        let sections = segment(&text);
        assert_eq!(sections.len(), 6);

        let overview = &sections[0];
        assert!(overview.found);
        let body = &text.as_str()[overview.span.clone().unwrap()];
        assert!(body.contains("Harbour RFC vs Valley RFC"));
        assert!(!body.contains("Carries"));

        let set_piece = sections
            .iter()
            .find(|s| s.name == SectionName::SetPiece)
            .unwrap();
        let body = &text.as_str()[set_piece.span.clone().unwrap()];
        assert!(body.contains("Scrums Won"));
    }

    #[test]
    fn test_segment_marks_absent_sections() {
        let text = normalize(DOC.as_bytes()).unwrap();
        let sections = segment(&text);
        let possessions = sections
            .iter()
            .find(|s| s.name == SectionName::Possessions)
            .unwrap();
        assert!(!possessions.found);
        assert!(possessions.span.is_none());
    }

    #[test]
    fn test_segment_nothing_found() {
        let text = normalize(b"weekly grocery list\napples\nflour\n").unwrap();
        let sections = segment(&text);
        assert!(sections.iter().all(|s| !s.found));
    }

    #[test]
    fn test_split_attack_defence() {
        let text = normalize(DOC.as_bytes()).unwrap();
        let sections = segment(&text);
        let ad = sections
            .iter()
            .find(|s| s.name == SectionName::AttackDefence)
            .unwrap();
        let body = &text.as_str()[ad.span.clone().unwrap()];
        let (attack, defence) = split_attack_defence(body);
        assert!(attack.contains("Carries: 120"));
        assert!(!attack.contains("Tackles Made"));
        assert!(defence.contains("Tackles Made: 62"));
    }

    #[test]
    fn test_split_without_divider_uses_whole_body() {
        let (attack, defence) = split_attack_defence("Carries: 10\nTackles Made: 5\n");
        assert_eq!(attack, defence);
    }
}
