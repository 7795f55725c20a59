//! Scrumsight Model — match-report records and schema validation.

pub mod records;
pub mod validate;

pub use records::{
    made_tackle_percent, AttackStats, BreakdownStats, DefenceStats, ExtractionIssue, MatchReport,
    PlayStyleStats, PlayerAttack, PlayerDefence, PlayerStats, PossessionStats, ProcessingInfo,
    SetPieceStats, Severity, Side, TeamStats,
};
pub use validate::{validate_player_stats, validate_report, validate_team_stats};
