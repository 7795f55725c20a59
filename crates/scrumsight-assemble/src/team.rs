//! Team record assembly.
//!
//! Builds one `TeamStats` per side from whatever sections were found.
//! Absent optional sections stay `None` so consumers can tell "not
//! reported" from "reported as zero".

use chrono::{DateTime, Utc};

use scrumsight_extract::{SectionExtraction, SidedExtraction};
use scrumsight_model::{
    made_tackle_percent, AttackStats, BreakdownStats, DefenceStats, PlayStyleStats,
    PossessionStats, SetPieceStats, Side, TeamStats,
};

/// Invocation-scoped provenance stamped onto every record.
#[derive(Debug, Clone)]
pub struct TeamContext<'a> {
    pub match_id: &'a str,
    pub extracted_by: &'a str,
    pub source_filename: &'a str,
    pub schema_version: &'a str,
    pub extracted_at: DateTime<Utc>,
}

/// Per-section extraction results feeding the assembler. `None` means the
/// section anchor was never found.
#[derive(Debug, Clone, Copy, Default)]
pub struct SectionData<'a> {
    pub overview: Option<&'a SectionExtraction>,
    pub attack: Option<&'a SidedExtraction>,
    pub defence: Option<&'a SidedExtraction>,
    pub breakdown: Option<&'a SidedExtraction>,
    pub set_piece: Option<&'a SidedExtraction>,
    pub possessions: Option<&'a SidedExtraction>,
    pub play_styles: Option<&'a SidedExtraction>,
}

fn for_side<'a>(sided: &'a SidedExtraction, side: Side) -> &'a SectionExtraction {
    match side {
        Side::Home => &sided.home,
        Side::Away => &sided.away,
    }
}

fn text_or<'a>(overview: Option<&'a SectionExtraction>, name: &str, default: &'a str) -> String {
    let value = overview.map(|o| o.text_value(name)).unwrap_or("");
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

/// Build the `TeamStats` record for one side.
pub fn assemble_team(ctx: &TeamContext<'_>, data: &SectionData<'_>, side: Side) -> TeamStats {
    let attack = data
        .attack
        .map(|sided| {
            let e = for_side(sided, side);
            AttackStats {
                carries: e.u32_value("carries"),
                metres_carried: e.u32_value("metres_carried"),
                defenders_beaten: e.u32_value("defenders_beaten"),
                offloads: e.u32_value("offloads"),
                line_breaks: e.u32_value("line_breaks"),
                carries_over_gainline_percent: e.f64_value("carries_over_gainline_percent"),
                carries_on_gainline_percent: e.f64_value("carries_on_gainline_percent"),
                carries_behind_gainline_percent: e.f64_value("carries_behind_gainline_percent"),
                gainline_success_percent: e.f64_value("gainline_success_percent"),
            }
        })
        .unwrap_or_default();

    let defence = data
        .defence
        .map(|sided| {
            let e = for_side(sided, side);
            let made = e.u32_value("tackles_made");
            let missed = e.u32_value("tackles_missed");
            let attempted = made.saturating_add(missed);
            DefenceStats {
                total_tackles_made: made,
                total_tackles_missed: missed,
                total_tackles_attempted: attempted,
                made_tackle_percent: made_tackle_percent(made, attempted),
                dominant_tackles: e.u32_value("dominant_tackles"),
                turnovers_won: e.u32_value("turnovers_won"),
            }
        })
        .unwrap_or_default();

    let breakdown = data.breakdown.map(|sided| {
        let e = for_side(sided, side);
        BreakdownStats {
            rucks_won: e.u32_value("rucks_won"),
            rucks_lost: e.u32_value("rucks_lost"),
            breakdown_steals: e.u32_value("breakdown_steals"),
            kicks_in_play: e.u32_value("kicks_in_play"),
            kicking_metres: e.u32_value("kicking_metres"),
        }
    });

    let set_piece = data.set_piece.map(|sided| {
        let e = for_side(sided, side);
        SetPieceStats {
            scrums_won: e.u32_value("scrums_won"),
            scrums_lost: e.u32_value("scrums_lost"),
            lineouts_won: e.u32_value("lineouts_won"),
            lineouts_lost: e.u32_value("lineouts_lost"),
        }
    });

    let possession = data.possessions.map(|sided| {
        let e = for_side(sided, side);
        PossessionStats {
            possession_percent: e.f64_value("possession_percent"),
            territory_percent: e.f64_value("territory_percent"),
        }
    });

    let play_style = data.play_styles.map(|sided| {
        let e = for_side(sided, side);
        PlayStyleStats {
            phases_per_possession: e.f64_value("phases_per_possession"),
            kick_to_pass_ratio: e.f64_value("kick_to_pass_ratio"),
        }
    });

    TeamStats {
        match_id: ctx.match_id.to_string(),
        side,
        home_team: text_or(data.overview, "home_team", "Unknown"),
        away_team: text_or(data.overview, "away_team", "Unknown"),
        home_score: data.overview.map(|o| o.u32_value("home_score")).unwrap_or(0),
        away_score: data.overview.map(|o| o.u32_value("away_score")).unwrap_or(0),
        match_date: text_or(data.overview, "match_date", "Unknown"),
        venue: text_or(data.overview, "venue", "Unknown"),
        attack,
        defence,
        breakdown,
        set_piece,
        possession,
        play_style,
        extracted_at: ctx.extracted_at,
        extracted_by: ctx.extracted_by.to_string(),
        source_filename: ctx.source_filename.to_string(),
        schema_version: ctx.schema_version.to_string(),
    }
}
