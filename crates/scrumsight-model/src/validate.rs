//! Schema validation as pure functions.
//!
//! Each function takes an assembled record and returns the full list of
//! violations, so callers can report every problem at once. No shared schema
//! state; invocations are independent.

use crate::records::{made_tackle_percent, MatchReport, PlayerStats, Side, TeamStats};

// Tackle counts top out in the low hundreds per team and low tens per
// player; anything near these bounds is a parse artefact.
const MAX_TEAM_TACKLES: u32 = 10_000;
const MAX_PLAYER_TACKLES: u32 = 500;

fn check_percent(violations: &mut Vec<String>, field: &str, value: f64) {
    if !(0.0..=100.0).contains(&value) || value.is_nan() {
        violations.push(format!("{field} out of range [0, 100]: {value}"));
    }
}

fn check_non_empty(violations: &mut Vec<String>, field: &str, value: &str) {
    if value.trim().is_empty() {
        violations.push(format!("{field} is required but empty"));
    }
}

/// Validate one team-level record.
pub fn validate_team_stats(stats: &TeamStats) -> Result<(), Vec<String>> {
    let mut violations = Vec::new();

    check_non_empty(&mut violations, "matchId", &stats.match_id);
    check_non_empty(&mut violations, "homeTeam", &stats.home_team);
    check_non_empty(&mut violations, "awayTeam", &stats.away_team);
    check_non_empty(&mut violations, "sourceFilename", &stats.source_filename);
    check_non_empty(&mut violations, "schemaVersion", &stats.schema_version);

    let a = &stats.attack;
    check_percent(&mut violations, "carriesOverGainlinePercent", a.carries_over_gainline_percent);
    check_percent(&mut violations, "carriesOnGainlinePercent", a.carries_on_gainline_percent);
    check_percent(&mut violations, "carriesBehindGainlinePercent", a.carries_behind_gainline_percent);
    check_percent(&mut violations, "gainlineSuccessPercent", a.gainline_success_percent);

    let d = &stats.defence;
    check_percent(&mut violations, "madeTacklePercent", d.made_tackle_percent);
    if d.total_tackles_attempted != d.total_tackles_made.saturating_add(d.total_tackles_missed) {
        violations.push(format!(
            "totalTacklesAttempted ({}) != made ({}) + missed ({})",
            d.total_tackles_attempted, d.total_tackles_made, d.total_tackles_missed
        ));
    }
    if d.total_tackles_attempted > MAX_TEAM_TACKLES {
        violations.push(format!(
            "totalTacklesAttempted implausible: {}",
            d.total_tackles_attempted
        ));
    }

    if let Some(p) = &stats.possession {
        check_percent(&mut violations, "possessionPercent", p.possession_percent);
        check_percent(&mut violations, "territoryPercent", p.territory_percent);
    }
    if let Some(ps) = &stats.play_style {
        if ps.phases_per_possession < 0.0 || ps.phases_per_possession.is_nan() {
            violations.push(format!(
                "phasesPerPossession negative: {}",
                ps.phases_per_possession
            ));
        }
        if ps.kick_to_pass_ratio < 0.0 || ps.kick_to_pass_ratio.is_nan() {
            violations.push(format!("kickToPassRatio negative: {}", ps.kick_to_pass_ratio));
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// Validate one player record.
pub fn validate_player_stats(stats: &PlayerStats) -> Result<(), Vec<String>> {
    let mut violations = Vec::new();

    check_non_empty(&mut violations, "playerId", &stats.player_id);
    check_non_empty(&mut violations, "playerName", &stats.player_name);

    let d = &stats.defence;
    if d.tackles_attempted != d.tackles_made.saturating_add(d.tackles_missed) {
        violations.push(format!(
            "tacklesAttempted ({}) != made ({}) + missed ({})",
            d.tackles_attempted, d.tackles_made, d.tackles_missed
        ));
    }
    if d.tackles_attempted > MAX_PLAYER_TACKLES {
        violations.push(format!("tacklesAttempted implausible: {}", d.tackles_attempted));
    }
    let expected = made_tackle_percent(d.tackles_made, d.tackles_attempted);
    if (d.made_tackle_percent - expected).abs() > f64::EPSILON {
        violations.push(format!(
            "madeTacklePercent ({}) inconsistent with counts (expected {})",
            d.made_tackle_percent, expected
        ));
    }
    check_percent(&mut violations, "madeTacklePercent", d.made_tackle_percent);

    // 80 minutes plus stoppage; anything past 120 is a parse artefact.
    if let Some(minutes) = stats.minutes_played {
        if minutes > 120 {
            violations.push(format!("minutesPlayed implausible: {minutes}"));
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// Validate a whole assembled report. Player entries are validated
/// individually before assembly (bad ones are dropped with a warning); this
/// check covers the report-level structure.
pub fn validate_report(report: &MatchReport) -> Result<(), Vec<String>> {
    let mut violations = Vec::new();

    check_non_empty(&mut violations, "reportId", &report.report_id);
    check_non_empty(&mut violations, "matchId", &report.match_id);

    if report.home_team_stats.side != Side::Home {
        violations.push("homeTeamStats.side must be home".to_string());
    }
    if report.away_team_stats.side != Side::Away {
        violations.push("awayTeamStats.side must be away".to_string());
    }
    if report.home_team_stats.match_id != report.match_id
        || report.away_team_stats.match_id != report.match_id
    {
        violations.push("team stats matchId does not match report matchId".to_string());
    }

    let confidence = report.processing_info.confidence;
    if !(0.0..=1.0).contains(&confidence) || confidence.is_nan() {
        violations.push(format!("confidence out of range [0, 1]: {confidence}"));
    }

    if let Err(mut v) = validate_team_stats(&report.home_team_stats) {
        violations.append(&mut v);
    }
    if let Err(mut v) = validate_team_stats(&report.away_team_stats) {
        violations.append(&mut v);
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::*;
    use chrono::Utc;

    fn team(side: Side) -> TeamStats {
        TeamStats {
            match_id: "m1".into(),
            side,
            home_team: "Harbour RFC".into(),
            away_team: "Valley RFC".into(),
            home_score: 24,
            away_score: 17,
            match_date: "2026-03-14".into(),
            venue: "Harbour Park".into(),
            attack: AttackStats {
                carries: 120,
                metres_carried: 540,
                defenders_beaten: 18,
                offloads: 9,
                line_breaks: 6,
                carries_over_gainline_percent: 64.0,
                carries_on_gainline_percent: 16.0,
                carries_behind_gainline_percent: 21.0,
                gainline_success_percent: 98.0,
            },
            defence: DefenceStats {
                total_tackles_made: 62,
                total_tackles_missed: 10,
                total_tackles_attempted: 72,
                made_tackle_percent: 86.0,
                dominant_tackles: 5,
                turnovers_won: 4,
            },
            breakdown: None,
            set_piece: None,
            possession: None,
            play_style: None,
            extracted_at: Utc::now(),
            extracted_by: "coach@club".into(),
            source_filename: "round3.pdf".into(),
            schema_version: "1.0".into(),
        }
    }

    #[test]
    fn test_valid_team_passes() {
        assert!(validate_team_stats(&team(Side::Home)).is_ok());
    }

    #[test]
    fn test_percent_out_of_range_rejected() {
        let mut t = team(Side::Home);
        t.attack.carries_over_gainline_percent = 164.0;
        let violations = validate_team_stats(&t).unwrap_err();
        assert!(violations[0].contains("carriesOverGainlinePercent"));
    }

    #[test]
    fn test_tackle_identity_enforced() {
        let mut t = team(Side::Away);
        t.defence.total_tackles_attempted = 99;
        assert!(validate_team_stats(&t).is_err());
    }

    #[test]
    fn test_extreme_team_tackle_count_rejected() {
        let mut t = team(Side::Home);
        t.defence.total_tackles_made = u32::MAX;
        t.defence.total_tackles_attempted = u32::MAX;
        t.defence.made_tackle_percent = 100.0;
        let violations = validate_team_stats(&t).unwrap_err();
        assert!(violations.iter().any(|v| v.contains("implausible")));
    }

    #[test]
    fn test_extreme_player_counts_rejected() {
        let p = PlayerStats {
            player_id: "m1-home-9".into(),
            player_name: "E. Voss".into(),
            position: Some("Lock".into()),
            side: Side::Home,
            minutes_played: Some(80),
            attack: PlayerAttack::default(),
            defence: PlayerDefence::from_counts(u32::MAX, u32::MAX),
            set_piece: None,
            breakdown: None,
        };
        let violations = validate_player_stats(&p).unwrap_err();
        assert!(violations.iter().any(|v| v.contains("implausible")));
    }

    #[test]
    fn test_player_identity_and_percent() {
        let mut p = PlayerStats {
            player_id: "m1-home-7".into(),
            player_name: "A. Carter".into(),
            position: Some("Flanker".into()),
            side: Side::Home,
            minutes_played: Some(80),
            attack: PlayerAttack { carries: 11, metres_carried: 38 },
            defence: PlayerDefence::from_counts(14, 2),
            set_piece: None,
            breakdown: None,
        };
        assert!(validate_player_stats(&p).is_ok());

        p.defence.made_tackle_percent = 50.0;
        assert!(validate_player_stats(&p).is_err());
    }

    #[test]
    fn test_player_empty_name_rejected() {
        let p = PlayerStats {
            player_id: "m1-home-0".into(),
            player_name: "  ".into(),
            position: None,
            side: Side::Home,
            minutes_played: None,
            attack: PlayerAttack::default(),
            defence: PlayerDefence::default(),
            set_piece: None,
            breakdown: None,
        };
        assert!(validate_player_stats(&p).is_err());
    }

    #[test]
    fn test_report_side_mismatch_rejected() {
        let now = Utc::now();
        let report = MatchReport {
            report_id: "r1".into(),
            match_id: "m1".into(),
            home_team_stats: team(Side::Away),
            away_team_stats: team(Side::Away),
            player_stats: vec![],
            processing_info: ProcessingInfo {
                confidence: 1.0,
                ..Default::default()
            },
            source_filename: "round3.pdf".into(),
            file_size: 1024,
            uploaded_by: "coach@club".into(),
            uploaded_at: now,
            created_at: now,
            last_updated: now,
        };
        let violations = validate_report(&report).unwrap_err();
        assert!(violations.iter().any(|v| v.contains("side must be home")));
    }
}
