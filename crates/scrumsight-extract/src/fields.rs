//! Generic rule engine: apply a section's rule table to its sub-text.
//!
//! A pattern miss or an unparseable capture both produce the rule's fallback
//! with `used_fallback = true`; neither is fatal. Per-side sections run the
//! sided variant, which prefers team-name block splitting and only falls
//! back to positional (first occurrence = home) assignment.

use tracing::debug;

use crate::rules::{FieldKind, FieldRule, FieldValue};

/// One recovered field.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedField {
    pub name: &'static str,
    pub value: FieldValue,
    pub used_fallback: bool,
}

/// All fields recovered from one section sub-text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionExtraction {
    pub fields: Vec<ExtractedField>,
}

impl SectionExtraction {
    pub fn get(&self, name: &str) -> Option<&ExtractedField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn u32_value(&self, name: &str) -> u32 {
        self.get(name).map(|f| f.value.as_u32()).unwrap_or(0)
    }

    pub fn f64_value(&self, name: &str) -> f64 {
        self.get(name).map(|f| f.value.as_f64()).unwrap_or(0.0)
    }

    pub fn text_value(&self, name: &str) -> &str {
        self.get(name).map(|f| f.value.as_text()).unwrap_or("")
    }

    /// Names of fields that fell back to their defaults.
    pub fn fallback_names(&self) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter(|f| f.used_fallback)
            .map(|f| f.name)
            .collect()
    }

    /// (recovered, total) field counts for confidence weighting.
    pub fn counts(&self) -> (usize, usize) {
        let ok = self.fields.iter().filter(|f| !f.used_fallback).count();
        (ok, self.fields.len())
    }
}

/// Home/away split of one per-side section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SidedExtraction {
    pub home: SectionExtraction,
    pub away: SectionExtraction,
    /// True when assignment relied on occurrence order instead of team-name
    /// proximity.
    pub used_positional: bool,
}

fn parse_capture(raw: &str, kind: FieldKind) -> Option<FieldValue> {
    let raw = raw.trim();
    match kind {
        FieldKind::Int => raw.parse::<i64>().ok().map(FieldValue::Int),
        FieldKind::Float => raw.parse::<f64>().ok().map(FieldValue::Float),
        FieldKind::Text => (!raw.is_empty()).then(|| FieldValue::Text(raw.to_string())),
    }
}

fn apply_rule(text: &str, rule: &FieldRule, occurrence: usize) -> ExtractedField {
    let value = rule
        .re
        .captures_iter(text)
        .nth(occurrence)
        .and_then(|caps| caps.get(rule.group))
        .and_then(|m| parse_capture(m.as_str(), rule.kind));

    match value {
        Some(value) => ExtractedField {
            name: rule.name,
            value,
            used_fallback: false,
        },
        None => {
            debug!("Field {} fell back to default", rule.name);
            ExtractedField {
                name: rule.name,
                value: rule.fallback.clone(),
                used_fallback: true,
            }
        }
    }
}

/// Apply a rule table to a section sub-text (first match per rule).
pub fn extract_fields(text: &str, rules: &[FieldRule]) -> SectionExtraction {
    SectionExtraction {
        fields: rules.iter().map(|rule| apply_rule(text, rule, 0)).collect(),
    }
}

/// Case-insensitive offset of `needle` within `haystack`.
fn find_ci(haystack: &str, needle: &str) -> Option<usize> {
    if needle.trim().is_empty() {
        return None;
    }
    haystack.to_lowercase().find(&needle.to_lowercase())
}

/// Apply a rule table to a per-side section.
///
/// When both team names are known and appear in the body, the body is split
/// at their mentions and each named block is extracted on its own. Otherwise
/// the first occurrence of each pattern is taken as home and the second as
/// away, and `used_positional` is set so the caller can record the caveat.
pub fn extract_sided(
    text: &str,
    rules: &[FieldRule],
    home_team: Option<&str>,
    away_team: Option<&str>,
) -> SidedExtraction {
    if let (Some(home), Some(away)) = (home_team, away_team) {
        if let (Some(home_at), Some(away_at)) = (find_ci(text, home), find_ci(text, away)) {
            // Offsets come from the lowercased body; slicing is only safe
            // when they land on char boundaries of the original.
            if home_at != away_at
                && text.is_char_boundary(home_at)
                && text.is_char_boundary(away_at)
            {
                let (first, second, first_is_home) = if home_at < away_at {
                    (home_at, away_at, true)
                } else {
                    (away_at, home_at, false)
                };
                let first_block = &text[first..second];
                let second_block = &text[second..];
                let (home_block, away_block) = if first_is_home {
                    (first_block, second_block)
                } else {
                    (second_block, first_block)
                };
                return SidedExtraction {
                    home: extract_fields(home_block, rules),
                    away: extract_fields(away_block, rules),
                    used_positional: false,
                };
            }
        }
    }

    SidedExtraction {
        home: SectionExtraction {
            fields: rules.iter().map(|r| apply_rule(text, r, 0)).collect(),
        },
        away: SectionExtraction {
            fields: rules.iter().map(|r| apply_rule(text, r, 1)).collect(),
        },
        used_positional: true,
    }
}
