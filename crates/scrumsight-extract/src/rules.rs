//! Declarative field-recovery rules.
//!
//! Each section owns a table of `FieldRule`s: pattern → typed value, with an
//! explicit fallback. Adding a field or section is a table change, not new
//! control flow; the engine in `fields` is the only consumer.

use once_cell::sync::Lazy;
use regex::Regex;

/// Declared type of a recovered field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Int,
    Float,
    Text,
}

/// A recovered (or fallback) field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    pub fn as_u32(&self) -> u32 {
        match self {
            FieldValue::Int(i) => u32::try_from(*i).unwrap_or(0),
            FieldValue::Float(f) if *f >= 0.0 => *f as u32,
            _ => 0,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match self {
            FieldValue::Int(i) => *i as f64,
            FieldValue::Float(f) => *f,
            FieldValue::Text(_) => 0.0,
        }
    }

    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            _ => "",
        }
    }
}

/// One named recovery rule: pattern, capture group, type, fallback.
#[derive(Debug)]
pub struct FieldRule {
    pub name: &'static str,
    pub re: Regex,
    /// Capture group carrying the value. Groups > 1 let several rules share
    /// one pattern (the four-value percentage group).
    pub group: usize,
    pub kind: FieldKind,
    pub fallback: FieldValue,
}

impl FieldRule {
    fn int(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            re: Regex::new(pattern).unwrap(),
            group: 1,
            kind: FieldKind::Int,
            fallback: FieldValue::Int(0),
        }
    }

    fn float(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            re: Regex::new(pattern).unwrap(),
            group: 1,
            kind: FieldKind::Float,
            fallback: FieldValue::Float(0.0),
        }
    }

    fn text(name: &'static str, pattern: &str, fallback: &str) -> Self {
        Self {
            name,
            re: Regex::new(pattern).unwrap(),
            group: 1,
            kind: FieldKind::Text,
            fallback: FieldValue::Text(fallback.to_string()),
        }
    }

    fn group(mut self, group: usize) -> Self {
        self.group = group;
        self
    }
}

/// Four consecutive percentage values; the repeated per-side gainline group.
const PERCENT_GROUP: &str = r"(\d{1,3}(?:\.\d+)?)%\s+(\d{1,3}(?:\.\d+)?)%\s+(\d{1,3}(?:\.\d+)?)%\s+(\d{1,3}(?:\.\d+)?)%";

pub static MATCH_OVERVIEW_RULES: Lazy<Vec<FieldRule>> = Lazy::new(|| {
    vec![
        FieldRule::text(
            "home_team",
            r"(?im)^\s*([A-Z][A-Za-z0-9 .'&-]+?)\s+vs?\.?\s+[A-Z]",
            "Unknown",
        ),
        FieldRule::text(
            "away_team",
            r"(?im)\bvs?\.?\s+([A-Z][A-Za-z0-9 .'&-]+?)\s*$",
            "Unknown",
        ),
        FieldRule::int("home_score", r"(?im)^\s*(?:final\s+)?score\s*[:\s]\s*(\d+)\s*[-:]\s*\d+"),
        FieldRule::int("away_score", r"(?im)^\s*(?:final\s+)?score\s*[:\s]\s*\d+\s*[-:]\s*(\d+)"),
        FieldRule::text("match_date", r"(?im)^\s*date\s*:\s*(.+?)\s*$", "Unknown"),
        FieldRule::text("venue", r"(?im)^\s*venue\s*:\s*(.+?)\s*$", "Unknown"),
    ]
});

pub static ATTACK_RULES: Lazy<Vec<FieldRule>> = Lazy::new(|| {
    vec![
        FieldRule::int("carries", r"(?im)^\s*carries\s*:\s*(\d+)"),
        FieldRule::int("metres_carried", r"(?im)\bmetres(?:\s+carried)?\s*:\s*(\d+)"),
        FieldRule::int("defenders_beaten", r"(?im)\bdefenders\s+beaten\s*:\s*(\d+)"),
        FieldRule::int("offloads", r"(?im)\boffloads\s*:\s*(\d+)"),
        FieldRule::int("line_breaks", r"(?im)\bline\s*breaks\s*:\s*(\d+)"),
        FieldRule::float("carries_over_gainline_percent", PERCENT_GROUP),
        FieldRule::float("carries_on_gainline_percent", PERCENT_GROUP).group(2),
        FieldRule::float("carries_behind_gainline_percent", PERCENT_GROUP).group(3),
        FieldRule::float("gainline_success_percent", PERCENT_GROUP).group(4),
    ]
});

pub static DEFENCE_RULES: Lazy<Vec<FieldRule>> = Lazy::new(|| {
    vec![
        FieldRule::int("tackles_made", r"(?im)\btackles\s+made\s*[:\s]\s*(\d+)"),
        FieldRule::int("tackles_missed", r"(?im)\btackles\s+missed\s*[:\s]\s*(\d+)"),
        FieldRule::int("dominant_tackles", r"(?im)\bdominant\s+tackles\s*[:\s]\s*(\d+)"),
        FieldRule::int("turnovers_won", r"(?im)\bturnovers\s+won\s*[:\s]\s*(\d+)"),
    ]
});

pub static BREAKDOWN_RULES: Lazy<Vec<FieldRule>> = Lazy::new(|| {
    vec![
        FieldRule::int("rucks_won", r"(?im)\brucks\s+won\s*[:\s]\s*(\d+)"),
        FieldRule::int("rucks_lost", r"(?im)\brucks\s+lost\s*[:\s]\s*(\d+)"),
        FieldRule::int("breakdown_steals", r"(?im)\b(?:breakdown\s+)?steals\s*[:\s]\s*(\d+)"),
        FieldRule::int("kicks_in_play", r"(?im)\bkicks\s+in\s+play\s*[:\s]\s*(\d+)"),
        FieldRule::int("kicking_metres", r"(?im)\bkicking\s+metres\s*[:\s]\s*(\d+)"),
    ]
});

pub static SET_PIECE_RULES: Lazy<Vec<FieldRule>> = Lazy::new(|| {
    vec![
        FieldRule::int("scrums_won", r"(?im)\bscrums\s+won\s*[:\s]\s*(\d+)"),
        FieldRule::int("scrums_lost", r"(?im)\bscrums\s+lost\s*[:\s]\s*(\d+)"),
        FieldRule::int("lineouts_won", r"(?im)\blineouts\s+won\s*[:\s]\s*(\d+)"),
        FieldRule::int("lineouts_lost", r"(?im)\blineouts\s+lost\s*[:\s]\s*(\d+)"),
    ]
});

pub static POSSESSIONS_RULES: Lazy<Vec<FieldRule>> = Lazy::new(|| {
    vec![
        FieldRule::float("possession_percent", r"(?im)\bpossession\s*:\s*(\d{1,3}(?:\.\d+)?)\s*%"),
        FieldRule::float("territory_percent", r"(?im)\bterritory\s*:\s*(\d{1,3}(?:\.\d+)?)\s*%"),
    ]
});

pub static PLAY_STYLES_RULES: Lazy<Vec<FieldRule>> = Lazy::new(|| {
    vec![
        FieldRule::float(
            "phases_per_possession",
            r"(?im)\bphases\s+per\s+possession\s*:\s*(\d+(?:\.\d+)?)",
        ),
        FieldRule::float(
            "kick_to_pass_ratio",
            r"(?im)\bkick[\s/-]to[\s/-]pass(?:\s+ratio)?\s*:\s*(\d+(?:\.\d+)?)",
        ),
    ]
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_compile_and_have_unique_names() {
        for table in [
            &*MATCH_OVERVIEW_RULES,
            &*ATTACK_RULES,
            &*DEFENCE_RULES,
            &*BREAKDOWN_RULES,
            &*SET_PIECE_RULES,
            &*POSSESSIONS_RULES,
            &*PLAY_STYLES_RULES,
        ] {
            let mut names: Vec<_> = table.iter().map(|r| r.name).collect();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), table.len());
        }
    }

    #[test]
    fn test_percent_group_matches_scenario_shape() {
        let re = Regex::new(PERCENT_GROUP).unwrap();
        let caps = re.captures("64% 16% 21% 98%").unwrap();
        assert_eq!(&caps[1], "64");
        assert_eq!(&caps[4], "98");
    }

    #[test]
    fn test_field_value_coercions() {
        assert_eq!(FieldValue::Int(62).as_u32(), 62);
        assert_eq!(FieldValue::Int(-3).as_u32(), 0);
        assert_eq!(FieldValue::Float(56.5).as_f64(), 56.5);
        assert_eq!(FieldValue::Text("Harbour RFC".into()).as_text(), "Harbour RFC");
        assert_eq!(FieldValue::Text("x".into()).as_u32(), 0);
    }
}
