//! Confidence scoring.
//!
//! One scalar in [0, 1] summarizing how much of the expected section/field
//! surface was recovered. Never a constant: all sections found with no
//! fallbacks scores exactly 1.0, and every missing section strictly lowers
//! the score.

use scrumsight_extract::SectionName;

/// Recovery outcome of one expected section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionStat {
    pub name: SectionName,
    pub found: bool,
    /// Fields recovered without fallback within the section.
    pub fields_ok: usize,
    pub fields_total: usize,
}

impl SectionStat {
    pub fn missing(name: SectionName) -> Self {
        Self {
            name,
            found: false,
            fields_ok: 0,
            fields_total: 0,
        }
    }

    pub fn found(name: SectionName, fields_ok: usize, fields_total: usize) -> Self {
        Self {
            name,
            found: true,
            fields_ok,
            fields_total,
        }
    }

    fn score(&self, weighted: bool) -> f64 {
        if !self.found {
            return 0.0;
        }
        if !weighted || self.fields_total == 0 {
            return 1.0;
        }
        // A found section is worth at least half even if every field fell
        // back; the other half tracks the recovered-field ratio.
        0.5 + 0.5 * (self.fields_ok as f64 / self.fields_total as f64)
    }
}

/// Aggregate the per-section outcomes into the report confidence.
pub fn confidence_score(stats: &[SectionStat], weighted: bool) -> f64 {
    if stats.is_empty() {
        return 0.0;
    }
    let total: f64 = stats.iter().map(|s| s.score(weighted)).sum();
    (total / stats.len() as f64).clamp(0.0, 1.0)
}
