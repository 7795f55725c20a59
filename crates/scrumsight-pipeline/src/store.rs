//! Persistence boundary.
//!
//! The pipeline hands a finished `MatchReport` to a `ReportStore` and never
//! reads back what it wrote. The store owns atomic commit of the whole
//! report; concurrent uploads for one match resolve last-writer-wins. The
//! in-memory implementation backs the tests; real persistence lives outside
//! this workspace.

use scrumsight_core::Result;
use scrumsight_model::{MatchReport, PlayerStats, Side, TeamStats};

use crate::types::ReportSummary;

pub trait ReportStore {
    /// Commit one finished report atomically.
    fn save(&mut self, report: &MatchReport) -> Result<()>;

    /// Team record for one side of a match, from the latest report.
    fn team_stats(&self, match_id: &str, side: Side) -> Result<Option<TeamStats>>;

    /// All player records for a match, from the latest report.
    fn player_stats(&self, match_id: &str) -> Result<Vec<PlayerStats>>;

    /// Report metadata, newest first, without player arrays.
    fn list_reports(&self) -> Result<Vec<ReportSummary>>;
}

/// In-memory store. Keeps every saved report; queries answer from the most
/// recently saved report per match.
#[derive(Debug, Default)]
pub struct MemoryReportStore {
    reports: Vec<MatchReport>,
}

impl MemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn latest(&self, match_id: &str) -> Option<&MatchReport> {
        self.reports.iter().rev().find(|r| r.match_id == match_id)
    }
}

impl ReportStore for MemoryReportStore {
    fn save(&mut self, report: &MatchReport) -> Result<()> {
        self.reports.push(report.clone());
        Ok(())
    }

    fn team_stats(&self, match_id: &str, side: Side) -> Result<Option<TeamStats>> {
        Ok(self.latest(match_id).map(|r| match side {
            Side::Home => r.home_team_stats.clone(),
            Side::Away => r.away_team_stats.clone(),
        }))
    }

    fn player_stats(&self, match_id: &str) -> Result<Vec<PlayerStats>> {
        Ok(self
            .latest(match_id)
            .map(|r| r.player_stats.clone())
            .unwrap_or_default())
    }

    fn list_reports(&self) -> Result<Vec<ReportSummary>> {
        Ok(self.reports.iter().rev().map(ReportSummary::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use scrumsight_model::{
        AttackStats, DefenceStats, ProcessingInfo,
    };

    fn report(match_id: &str, report_id: &str) -> MatchReport {
        let now = Utc::now();
        let team = |side| TeamStats {
            match_id: match_id.into(),
            side,
            home_team: "Harbour RFC".into(),
            away_team: "Valley RFC".into(),
            home_score: 24,
            away_score: 17,
            match_date: "2026-03-14".into(),
            venue: "Harbour Park".into(),
            attack: AttackStats::default(),
            defence: DefenceStats::default(),
            breakdown: None,
            set_piece: None,
            possession: None,
            play_style: None,
            extracted_at: now,
            extracted_by: "coach@club".into(),
            source_filename: "round3.pdf".into(),
            schema_version: "1.0".into(),
        };
        MatchReport {
            report_id: report_id.into(),
            match_id: match_id.into(),
            home_team_stats: team(Side::Home),
            away_team_stats: team(Side::Away),
            player_stats: vec![],
            processing_info: ProcessingInfo::default(),
            source_filename: "round3.pdf".into(),
            file_size: 1024,
            uploaded_by: "coach@club".into(),
            uploaded_at: now,
            created_at: now,
            last_updated: now,
        }
    }

    #[test]
    fn test_save_and_query_by_side() {
        let mut store = MemoryReportStore::new();
        store.save(&report("m1", "r1")).unwrap();

        let home = store.team_stats("m1", Side::Home).unwrap().unwrap();
        assert_eq!(home.side, Side::Home);
        assert!(store.team_stats("m2", Side::Home).unwrap().is_none());
    }

    #[test]
    fn test_reupload_is_last_writer_wins() {
        let mut store = MemoryReportStore::new();
        store.save(&report("m1", "r1")).unwrap();
        store.save(&report("m1", "r2")).unwrap();

        let listed = store.list_reports().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].report_id, "r2");

        // Queries answer from the newest report.
        let players = store.player_stats("m1").unwrap();
        assert!(players.is_empty());
    }
}
