use crate::infra::{load_roster, InMemoryCreatorRepository};
use chrono::{DateTime, Local};
use clap::Args;
use creator_match::config::AppConfig;
use creator_match::error::AppError;
use creator_match::matching::{BriefSubmission, MatchService, ScoredCreator};
use serde_json::json;
use std::fmt::Write as _;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct MatchArgs {
    /// Brief JSON file (same shape as the POST /api/v1/match body)
    #[arg(long)]
    pub(crate) brief: PathBuf,
    /// Roster JSON file; falls back to MATCH_ROSTER_PATH, then the built-in demo roster
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
    /// Number of ranked creators to print
    #[arg(long, default_value_t = 10)]
    pub(crate) limit: usize,
    /// Emit JSON instead of the text report
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_match(args: MatchArgs) -> Result<(), AppError> {
    let MatchArgs {
        brief,
        roster,
        limit,
        json,
    } = args;

    let config = AppConfig::load()?;
    let roster_path = roster.or(config.roster.path);
    let creators = load_roster(roster_path.as_deref())?;

    let submission: BriefSubmission = serde_json::from_reader(File::open(&brief)?)?;
    let category = submission.category.clone().unwrap_or_default();

    let service = MatchService::new(
        Arc::new(InMemoryCreatorRepository::new(creators)),
        config.matching,
    );
    let ranked = service.match_brief(submission)?;
    let shown = &ranked[..limit.min(ranked.len())];

    if json {
        let payload = json!({ "creators": shown });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        print!(
            "{}",
            render_ranking(&category, shown, ranked.len(), Local::now())
        );
    }

    Ok(())
}

pub(crate) fn render_ranking(
    category: &str,
    shown: &[ScoredCreator],
    total: usize,
    generated_at: DateTime<Local>,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Creator ranking for {category} ({} of {total}, generated {})",
        shown.len(),
        generated_at.format("%Y-%m-%d %H:%M")
    );

    if shown.is_empty() {
        let _ = writeln!(out, "  no creators in roster");
        return out;
    }

    for (rank, creator) in shown.iter().enumerate() {
        let price = creator
            .base_price_inr
            .map(|price| format!("INR {price:.0}"))
            .unwrap_or_else(|| "price n/a".to_string());
        let _ = writeln!(
            out,
            "{:>3}. {:<24} score {:>3}  [{}]  {}",
            rank + 1,
            creator.handle,
            creator.score,
            creator.verticals.join(", "),
            price
        );
        if !creator.reasons.is_empty() {
            let _ = writeln!(out, "     {}", creator.reasons.join(" | "));
        }
    }

    out
}
