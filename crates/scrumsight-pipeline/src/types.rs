//! Boundary contracts with the excluded collaborators (upload handler,
//! persistence, report listing).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use scrumsight_model::{MatchReport, ProcessingInfo, TeamStats};

/// What the upload entry point hands the pipeline.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    pub file_bytes: Vec<u8>,
    pub filename: String,
    pub match_id: String,
    pub uploaded_by: String,
}

/// What the upload entry point gets back on success.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSummary {
    pub report_id: String,
    pub match_id: String,
    pub processing_info: ProcessingInfo,
    pub home_team_stats: TeamStats,
    pub away_team_stats: TeamStats,
    pub player_count: usize,
}

impl From<&MatchReport> for UploadSummary {
    fn from(report: &MatchReport) -> Self {
        Self {
            report_id: report.report_id.clone(),
            match_id: report.match_id.clone(),
            processing_info: report.processing_info.clone(),
            home_team_stats: report.home_team_stats.clone(),
            away_team_stats: report.away_team_stats.clone(),
            player_count: report.player_stats.len(),
        }
    }
}

/// Report metadata without the player array, for history views.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub report_id: String,
    pub match_id: String,
    pub source_filename: String,
    pub uploaded_by: String,
    pub uploaded_at: DateTime<Utc>,
    pub processing_info: ProcessingInfo,
}

impl From<&MatchReport> for ReportSummary {
    fn from(report: &MatchReport) -> Self {
        Self {
            report_id: report.report_id.clone(),
            match_id: report.match_id.clone(),
            source_filename: report.source_filename.clone(),
            uploaded_by: report.uploaded_by.clone(),
            uploaded_at: report.uploaded_at,
            processing_info: report.processing_info.clone(),
        }
    }
}
