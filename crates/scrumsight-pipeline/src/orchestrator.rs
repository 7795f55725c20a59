//! Pipeline orchestrator.
//!
//! One synchronous run per uploaded document: normalize, segment, extract,
//! assemble, validate, report. Only three conditions are fatal (text that
//! cannot be extracted, a document with no recognizable anchors, and a
//! team-level schema violation); everything else degrades confidence and
//! lands in `processing_info.extraction_errors`.

use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use scrumsight_assemble::{
    assemble_players, assemble_team, confidence_score, SectionData, SectionStat, TeamContext,
};
use scrumsight_core::{Error, Result, ScrumsightConfig};
use scrumsight_extract::rules::{
    ATTACK_RULES, BREAKDOWN_RULES, DEFENCE_RULES, MATCH_OVERVIEW_RULES, PLAY_STYLES_RULES,
    POSSESSIONS_RULES, SET_PIECE_RULES,
};
use scrumsight_extract::{
    extract_fields, extract_sided, normalize, scan_player_rows, segment, split_attack_defence,
    FieldRule, SectionName, SidedExtraction,
};
use scrumsight_model::{
    validate_player_stats, validate_report, validate_team_stats, ExtractionIssue, MatchReport,
    ProcessingInfo, Side,
};

use crate::types::{UploadRequest, UploadSummary};

/// Orchestrator states. `Failed` is reachable from `Extracting` (text
/// normalization, no anchors) and `Assembling` (team-level schema failure).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Extracting,
    Assembling,
    Done,
    Failed,
}

/// The match-report extraction pipeline. Stateless between runs; every
/// invocation owns its own text, sections, and records.
pub struct Pipeline {
    config: ScrumsightConfig,
}

impl Pipeline {
    pub fn new(config: ScrumsightConfig) -> Self {
        Self { config }
    }

    /// Run the full pipeline and return the finished report.
    pub fn process(&self, request: &UploadRequest) -> Result<MatchReport> {
        let started = Instant::now();
        let mut state = PipelineState::Extracting;
        debug!(match_id = %request.match_id, "Pipeline state: {state:?}");

        if request.file_bytes.len() > self.config.max_file_bytes {
            state = PipelineState::Failed;
            warn!("Pipeline state: {state:?} (oversized upload)");
            return Err(Error::ExtractionFailed(format!(
                "file exceeds {} bytes",
                self.config.max_file_bytes
            )));
        }

        let text = match normalize(&request.file_bytes) {
            Ok(text) => text,
            Err(err) => {
                state = PipelineState::Failed;
                warn!("Pipeline state: {state:?} ({err})");
                return Err(err);
            }
        };
        let raw = text.as_str();

        let sections = segment(&text);
        if sections.iter().all(|s| !s.found) {
            state = PipelineState::Failed;
            warn!("Pipeline state: {state:?} (no sections located)");
            return Err(Error::NoSectionsLocated(request.filename.clone()));
        }

        let body = |name: SectionName| -> Option<&str> {
            sections
                .iter()
                .find(|s| s.name == name)
                .and_then(|s| s.span.clone())
                .map(|range| &raw[range])
        };

        // The overview goes first: its team names drive side assignment
        // everywhere else.
        let overview_ex = body(SectionName::MatchOverview)
            .map(|b| extract_fields(b, &MATCH_OVERVIEW_RULES));
        let team_name = |field: &str| -> Option<String> {
            overview_ex
                .as_ref()
                .and_then(|o| o.get(field))
                .filter(|f| !f.used_fallback)
                .map(|f| f.value.as_text().to_string())
        };
        let home_name = team_name("home_team");
        let away_name = team_name("away_team");

        let sided = |text: &str, rules: &[FieldRule]| {
            extract_sided(text, rules, home_name.as_deref(), away_name.as_deref())
        };

        let (attack_ex, defence_ex) = match body(SectionName::AttackDefence) {
            Some(b) => {
                let (attack, defence) = split_attack_defence(b);
                (
                    Some(sided(attack, &ATTACK_RULES)),
                    Some(sided(defence, &DEFENCE_RULES)),
                )
            }
            None => (None, None),
        };
        let breakdown_ex = body(SectionName::BreakdownKicking).map(|b| sided(b, &BREAKDOWN_RULES));
        let set_piece_ex = body(SectionName::SetPiece).map(|b| sided(b, &SET_PIECE_RULES));
        let possessions_ex = body(SectionName::Possessions).map(|b| sided(b, &POSSESSIONS_RULES));
        let play_styles_ex = body(SectionName::PlayStyles).map(|b| sided(b, &PLAY_STYLES_RULES));

        let mut issues: Vec<ExtractionIssue> = Vec::new();
        let mut stats: Vec<SectionStat> = Vec::new();

        for section in &sections {
            let name = section.name;
            if !section.found {
                issues.push(ExtractionIssue::warning(
                    name.as_str(),
                    "section anchor not found",
                ));
                stats.push(SectionStat::missing(name));
                continue;
            }
            match name {
                SectionName::MatchOverview => {
                    if let Some(ex) = &overview_ex {
                        let (ok, total) = ex.counts();
                        stats.push(SectionStat::found(name, ok, total));
                        for field in ex.fallback_names() {
                            issues.push(ExtractionIssue::warning(
                                name.as_str(),
                                format!("{field} used fallback default"),
                            ));
                        }
                    }
                }
                SectionName::AttackDefence => {
                    if let (Some(attack), Some(defence)) = (&attack_ex, &defence_ex) {
                        let (attack_ok, attack_total) = sided_counts(attack);
                        let (defence_ok, defence_total) = sided_counts(defence);
                        stats.push(SectionStat::found(
                            name,
                            attack_ok + defence_ok,
                            attack_total + defence_total,
                        ));
                        push_sided_issues(name, attack, &mut issues);
                        push_sided_issues(name, defence, &mut issues);
                        if attack.used_positional || defence.used_positional {
                            issues.push(positional_warning(name));
                        }
                    }
                }
                SectionName::BreakdownKicking => {
                    record_sided(name, breakdown_ex.as_ref(), &mut issues, &mut stats)
                }
                SectionName::SetPiece => {
                    record_sided(name, set_piece_ex.as_ref(), &mut issues, &mut stats)
                }
                SectionName::Possessions => {
                    record_sided(name, possessions_ex.as_ref(), &mut issues, &mut stats)
                }
                SectionName::PlayStyles => {
                    record_sided(name, play_styles_ex.as_ref(), &mut issues, &mut stats)
                }
            }
        }

        let rows = scan_player_rows(raw);
        let (candidates, players_positional) = assemble_players(
            &request.match_id,
            &rows,
            raw,
            home_name.as_deref(),
            away_name.as_deref(),
        );
        if players_positional {
            issues.push(ExtractionIssue::warning(
                "players",
                "player side assignment used positional order (first half = home)",
            ));
        }

        let mut players = Vec::with_capacity(candidates.len());
        for player in candidates {
            match validate_player_stats(&player) {
                Ok(()) => players.push(player),
                Err(violations) => {
                    warn!("Dropping player record {}: {}", player.player_name, violations.join("; "));
                    issues.push(ExtractionIssue::warning(
                        "players",
                        format!(
                            "dropped player record {}: {}",
                            player.player_name,
                            violations.join("; ")
                        ),
                    ));
                }
            }
        }

        state = PipelineState::Assembling;
        debug!(match_id = %request.match_id, "Pipeline state: {state:?}");

        let now = Utc::now();
        let ctx = TeamContext {
            match_id: &request.match_id,
            extracted_by: &request.uploaded_by,
            source_filename: &request.filename,
            schema_version: &self.config.schema_version,
            extracted_at: now,
        };
        let data = SectionData {
            overview: overview_ex.as_ref(),
            attack: attack_ex.as_ref(),
            defence: defence_ex.as_ref(),
            breakdown: breakdown_ex.as_ref(),
            set_piece: set_piece_ex.as_ref(),
            possessions: possessions_ex.as_ref(),
            play_styles: play_styles_ex.as_ref(),
        };
        let home_team_stats = assemble_team(&ctx, &data, Side::Home);
        let away_team_stats = assemble_team(&ctx, &data, Side::Away);

        for (label, team) in [("home", &home_team_stats), ("away", &away_team_stats)] {
            if let Err(violations) = validate_team_stats(team) {
                state = PipelineState::Failed;
                warn!("Pipeline state: {state:?} ({label} team stats invalid)");
                return Err(Error::SchemaViolation(format!(
                    "{label} team stats invalid: {}",
                    violations.join("; ")
                )));
            }
        }

        let confidence = confidence_score(&stats, self.config.weighted_confidence);
        let processing_info = ProcessingInfo {
            extracted_sections: sections
                .iter()
                .filter(|s| s.found)
                .map(|s| s.name.as_str().to_string())
                .collect(),
            extraction_errors: issues,
            extraction_time_ms: started.elapsed().as_millis() as u64,
            confidence,
        };

        let report = MatchReport {
            report_id: Uuid::new_v4().to_string(),
            match_id: request.match_id.clone(),
            home_team_stats,
            away_team_stats,
            player_stats: players,
            processing_info,
            source_filename: request.filename.clone(),
            file_size: request.file_bytes.len() as u64,
            uploaded_by: request.uploaded_by.clone(),
            uploaded_at: now,
            created_at: now,
            last_updated: now,
        };

        if let Err(violations) = validate_report(&report) {
            state = PipelineState::Failed;
            warn!("Pipeline state: {state:?} (report invalid)");
            return Err(Error::SchemaViolation(violations.join("; ")));
        }

        state = PipelineState::Done;
        info!(
            report_id = %report.report_id,
            confidence = report.processing_info.confidence,
            "Pipeline state: {state:?}, {} sections, {} players",
            report.processing_info.extracted_sections.len(),
            report.player_stats.len()
        );
        Ok(report)
    }

    /// Run the pipeline and shape the result for the upload entry point.
    pub fn process_upload(&self, request: &UploadRequest) -> Result<UploadSummary> {
        self.process(request).map(|report| UploadSummary::from(&report))
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(ScrumsightConfig::default())
    }
}

fn sided_counts(ex: &SidedExtraction) -> (usize, usize) {
    let (home_ok, home_total) = ex.home.counts();
    let (away_ok, away_total) = ex.away.counts();
    (home_ok + away_ok, home_total + away_total)
}

fn positional_warning(name: SectionName) -> ExtractionIssue {
    ExtractionIssue::warning(
        name.as_str(),
        "side assignment used positional order (first occurrence = home)",
    )
}

fn push_sided_issues(name: SectionName, ex: &SidedExtraction, issues: &mut Vec<ExtractionIssue>) {
    for (side, extraction) in [(Side::Home, &ex.home), (Side::Away, &ex.away)] {
        for field in extraction.fallback_names() {
            issues.push(ExtractionIssue::warning(
                name.as_str(),
                format!("{} {field} used fallback default", side.as_str()),
            ));
        }
    }
}

fn record_sided(
    name: SectionName,
    ex: Option<&SidedExtraction>,
    issues: &mut Vec<ExtractionIssue>,
    stats: &mut Vec<SectionStat>,
) {
    let Some(ex) = ex else { return };
    let (ok, total) = sided_counts(ex);
    stats.push(SectionStat::found(name, ok, total));
    push_sided_issues(name, ex, issues);
    if ex.used_positional {
        issues.push(positional_warning(name));
    }
}
