//! Match-report record types.
//!
//! Every externally-visible struct serializes with camelCase field names;
//! those names are the stable contract consumed by the persistence and
//! dashboard collaborators.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which team a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Home => "home",
            Side::Away => "away",
        }
    }
}

/// Severity of an extraction issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Recoverable: missing section, field fallback, dropped player row.
    Warning,
    /// Fatal: text extraction or team-level schema failure. The pipeline
    /// raises these as `Error` results instead of issues on a report, so it
    /// only emits `Warning`; this variant keeps the persisted issue schema
    /// able to represent fatal outcomes recorded by collaborators.
    Error,
}

/// One recorded problem from a pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionIssue {
    pub section: String,
    pub message: String,
    pub severity: Severity,
}

impl ExtractionIssue {
    pub fn warning(section: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            message: message.into(),
            severity: Severity::Warning,
        }
    }
}

/// Team attacking output for one side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackStats {
    pub carries: u32,
    pub metres_carried: u32,
    pub defenders_beaten: u32,
    pub offloads: u32,
    pub line_breaks: u32,
    /// Percentage of carries ending beyond the gainline.
    pub carries_over_gainline_percent: f64,
    pub carries_on_gainline_percent: f64,
    pub carries_behind_gainline_percent: f64,
    pub gainline_success_percent: f64,
}

/// Team defensive output for one side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefenceStats {
    pub total_tackles_made: u32,
    pub total_tackles_missed: u32,
    /// Derived: made + missed.
    pub total_tackles_attempted: u32,
    /// Derived: round(made / attempted * 100), 0 when no attempts.
    pub made_tackle_percent: f64,
    pub dominant_tackles: u32,
    pub turnovers_won: u32,
}

/// Breakdown and kicking numbers. Absent when the section was not found.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownStats {
    pub rucks_won: u32,
    pub rucks_lost: u32,
    pub breakdown_steals: u32,
    pub kicks_in_play: u32,
    pub kicking_metres: u32,
}

/// Set-piece numbers. Absent when the section was not found.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetPieceStats {
    pub scrums_won: u32,
    pub scrums_lost: u32,
    pub lineouts_won: u32,
    pub lineouts_lost: u32,
}

/// Possession and territory shares. Absent when the section was not found.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PossessionStats {
    pub possession_percent: f64,
    pub territory_percent: f64,
}

/// Play-style indicators. Absent when the section was not found.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayStyleStats {
    pub phases_per_possession: f64,
    pub kick_to_pass_ratio: f64,
}

/// Full statistical record for one side of one match.
///
/// Exactly one per side per `match_id` per report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStats {
    pub match_id: String,
    pub side: Side,
    pub home_team: String,
    pub away_team: String,
    pub home_score: u32,
    pub away_score: u32,
    pub match_date: String,
    pub venue: String,
    pub attack: AttackStats,
    pub defence: DefenceStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<BreakdownStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_piece: Option<SetPieceStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub possession: Option<PossessionStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub play_style: Option<PlayStyleStats>,
    pub extracted_at: DateTime<Utc>,
    pub extracted_by: String,
    pub source_filename: String,
    pub schema_version: String,
}

/// Per-player attacking numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerAttack {
    pub carries: u32,
    pub metres_carried: u32,
}

/// Per-player defensive numbers with the derived tackle identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDefence {
    pub tackles_made: u32,
    pub tackles_missed: u32,
    /// Derived: made + missed.
    pub tackles_attempted: u32,
    /// Derived: round(made / attempted * 100), 0 when no attempts.
    pub made_tackle_percent: f64,
}

impl PlayerDefence {
    /// Build a defence record from raw counts, computing the derived fields.
    ///
    /// `tackles_attempted = made + missed`; `made_tackle_percent` is the
    /// rounded made fraction, or 0 when there were no attempts.
    pub fn from_counts(tackles_made: u32, tackles_missed: u32) -> Self {
        let attempted = tackles_made.saturating_add(tackles_missed);
        let percent = made_tackle_percent(tackles_made, attempted);
        Self {
            tackles_made,
            tackles_missed,
            tackles_attempted: attempted,
            made_tackle_percent: percent,
        }
    }
}

/// Rounded made-tackle percentage; 0 when there were no attempts.
pub fn made_tackle_percent(made: u32, attempted: u32) -> f64 {
    if attempted == 0 {
        0.0
    } else {
        (made as f64 / attempted as f64 * 100.0).round()
    }
}

/// Statistical record for one player in one match.
///
/// Set-piece and breakdown groups are part of the record shape but stay
/// `None` unless the source rows report them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub player_id: String,
    pub player_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    pub side: Side,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutes_played: Option<u32>,
    pub attack: PlayerAttack,
    pub defence: PlayerDefence,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_piece: Option<SetPieceStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<BreakdownStats>,
}

/// Outcome summary for one extraction run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingInfo {
    /// Names of the sections whose anchors were located, in scan order.
    pub extracted_sections: Vec<String>,
    pub extraction_errors: Vec<ExtractionIssue>,
    pub extraction_time_ms: u64,
    /// How much of the expected section/field surface was recovered, in [0, 1].
    pub confidence: f64,
}

/// Aggregate root produced by one successful pipeline run.
///
/// Never mutated after creation; a re-upload yields a new report with a new
/// `report_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchReport {
    pub report_id: String,
    pub match_id: String,
    pub home_team_stats: TeamStats,
    pub away_team_stats: TeamStats,
    pub player_stats: Vec<PlayerStats>,
    pub processing_info: ProcessingInfo,
    pub source_filename: String,
    pub file_size: u64,
    pub uploaded_by: String,
    pub uploaded_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}
