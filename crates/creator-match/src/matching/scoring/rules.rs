use std::collections::{BTreeMap, HashSet};

use super::config::MatchConfig;
use crate::matching::domain::{AgeRange, BrandBrief, CreatorProfile, ScoreBreakdown};

/// Audience age buckets the roster reports against.
const AGE_BUCKETS: [(&str, f64, f64); 5] = [
    ("13-17", 13.0, 17.0),
    ("18-24", 18.0, 24.0),
    ("25-34", 25.0, 34.0),
    ("35-44", 35.0, 44.0),
    ("45-54", 45.0, 54.0),
];

/// Raw 0..=1 signals for one creator, before weighting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct MatchSignals {
    pub category_match: bool,
    pub platform_match: f64,
    pub tone_match: f64,
    pub geo: f64,
    pub age: f64,
    pub engagement: f64,
    pub views: f64,
    pub price_fit: f64,
    pub adult_blocked: bool,
}

pub(crate) fn collect_signals(
    brief: &BrandBrief,
    creator: &CreatorProfile,
    config: &MatchConfig,
) -> MatchSignals {
    let category = brief.category.to_lowercase();
    let category_match = creator
        .verticals
        .iter()
        .any(|vertical| vertical.to_lowercase() == category);

    let age_range = brief.target_ages.unwrap_or(config.default_age_range);

    let price_fit = match creator.base_price_inr.map(non_negative) {
        Some(base) if base > 0.0 && non_negative(brief.budget_inr) > 0.0 => {
            (brief.budget_inr / base).min(1.0)
        }
        _ => 0.0,
    };

    MatchSignals {
        category_match,
        platform_match: fractional_overlap(&brief.platforms, &creator.platforms),
        tone_match: fractional_overlap(&brief.tone, &creator.content_tone),
        geo: geo_share(&brief.target_locations, &creator.audience_geo),
        age: age_share(age_range, &creator.audience_age),
        engagement: (non_negative(creator.engagement_rate) / config.engagement_cap).min(1.0),
        views: (non_negative(creator.avg_views) / config.views_cap).min(1.0),
        price_fit,
        adult_blocked: brief.excludes_adult_content() && creator.safety_flags.adult,
    }
}

pub(crate) fn breakdown(signals: &MatchSignals, config: &MatchConfig) -> ScoreBreakdown {
    let relevance = &config.relevance_mix;
    let audience = &config.audience_mix;
    let perf = &config.perf_price_mix;

    let category = if signals.category_match { 1.0 } else { 0.0 };

    ScoreBreakdown {
        relevance: (relevance.category * category
            + relevance.platform * signals.platform_match
            + relevance.tone * signals.tone_match)
            * 100.0,
        audience: (audience.geo * signals.geo + audience.age * signals.age) * 100.0,
        perf_price: (perf.engagement * signals.engagement
            + perf.views * signals.views
            + perf.price * signals.price_fit)
            * 100.0,
        constraints: if signals.adult_blocked { 0.0 } else { 100.0 },
    }
}

/// Weighted sum rounded half away from zero, which is half-up on this non-negative domain.
pub(crate) fn final_score(breakdown: &ScoreBreakdown, config: &MatchConfig) -> u8 {
    let weights = &config.weights;
    let raw = weights.relevance * breakdown.relevance
        + weights.audience * breakdown.audience
        + weights.perf_price * breakdown.perf_price
        + weights.constraints * breakdown.constraints;

    if !raw.is_finite() {
        return 0;
    }
    raw.round().clamp(0.0, 100.0) as u8
}

pub(crate) fn reasons(signals: &MatchSignals, creator: &CreatorProfile) -> Vec<String> {
    let mut reasons = Vec::new();

    if signals.category_match {
        reasons.push("Vertical match".to_string());
    }
    if signals.platform_match > 0.0 {
        reasons.push(format!("Platform match {}%", percent(signals.platform_match)));
    }
    if signals.geo > 0.0 {
        reasons.push(format!("Geo match {}%", percent(signals.geo)));
    }
    if signals.age > 0.0 {
        reasons.push(format!("Age match {}%", percent(signals.age)));
    }
    if signals.engagement > 0.0 {
        reasons.push(format!("ER {}%", two_decimals(creator.engagement_rate * 100.0)));
    }
    if signals.price_fit >= 1.0 {
        reasons.push("Within budget".to_string());
    }

    reasons
}

/// Share of `wanted` entries present in `offered`, ignoring case.
fn fractional_overlap(wanted: &[String], offered: &[String]) -> f64 {
    if wanted.is_empty() || offered.is_empty() {
        return 0.0;
    }

    let offered: HashSet<String> = offered.iter().map(|entry| entry.to_lowercase()).collect();
    let hits = wanted
        .iter()
        .filter(|entry| offered.contains(&entry.to_lowercase()))
        .count();

    hits as f64 / wanted.len() as f64
}

fn geo_share(target_locations: &[String], audience_geo: &BTreeMap<String, f64>) -> f64 {
    let total: f64 = target_locations
        .iter()
        .filter_map(|location| audience_geo.get(location))
        .map(|fraction| non_negative(*fraction))
        .sum();
    total.min(1.0)
}

fn age_share(range: AgeRange, audience_age: &BTreeMap<String, f64>) -> f64 {
    let total: f64 = audience_age
        .iter()
        .filter_map(|(label, fraction)| {
            let (_, low, high) = AGE_BUCKETS
                .iter()
                .find(|(bucket, _, _)| *bucket == label.trim())?;
            range.overlaps(*low, *high).then(|| non_negative(*fraction))
        })
        .sum();
    total.min(1.0)
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn percent(fraction: f64) -> u32 {
    (fraction * 100.0).round() as u32
}

/// Two-decimal rendering where exact halves round up (`1.125` reads `1.13`).
fn two_decimals(value: f64) -> String {
    format!("{:.2}", (value * 100.0).round() / 100.0)
}
