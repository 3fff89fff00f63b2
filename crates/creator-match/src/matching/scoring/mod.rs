mod config;
mod ranking;
mod rules;

pub use config::{AudienceMix, MatchConfig, MatchWeights, PerfPriceMix, RelevanceMix};

use super::domain::{BrandBrief, CreatorProfile, ScoredCreator};

/// Stateless scorer that ranks a roster against a brief.
#[derive(Debug, Clone, Default)]
pub struct MatchScorer {
    config: MatchConfig,
}

impl MatchScorer {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Scores every creator, sorts best-first and diversifies the head of the list.
    ///
    /// The output always has one entry per input creator. Incomplete creator documents
    /// only lower their own score; the call fails only when the brief itself is malformed.
    pub fn score(
        &self,
        brief: &BrandBrief,
        creators: &[CreatorProfile],
    ) -> Result<Vec<ScoredCreator>, MatchError> {
        check_brief(brief)?;

        let scored = creators
            .iter()
            .map(|creator| self.evaluate(brief, creator))
            .collect();

        Ok(ranking::rank(scored, self.config.diversified_slots))
    }

    /// Scores a single creator without ranking.
    pub fn evaluate(&self, brief: &BrandBrief, creator: &CreatorProfile) -> ScoredCreator {
        let signals = rules::collect_signals(brief, creator, &self.config);
        let breakdown = rules::breakdown(&signals, &self.config);

        ScoredCreator {
            id: creator.id.clone(),
            handle: creator.handle.clone(),
            verticals: creator.verticals.clone(),
            platforms: creator.platforms.clone(),
            base_price_inr: creator.base_price_inr,
            score: rules::final_score(&breakdown, &self.config),
            reasons: rules::reasons(&signals, creator),
            breakdown,
        }
    }
}

fn check_brief(brief: &BrandBrief) -> Result<(), MatchError> {
    if brief.category.trim().is_empty() {
        return Err(MatchError::InvalidArgument {
            field: "category",
            reason: "must not be blank".to_string(),
        });
    }

    if !brief.budget_inr.is_finite() || brief.budget_inr < 0.0 {
        return Err(MatchError::InvalidArgument {
            field: "budgetINR",
            reason: format!("must be a non-negative number (found {})", brief.budget_inr),
        });
    }

    if let Some(range) = brief.target_ages {
        if !range.is_ordered() {
            return Err(MatchError::InvalidArgument {
                field: "targetAges",
                reason: format!("min {} must not exceed max {}", range.min, range.max),
            });
        }
    }

    Ok(())
}

/// Error raised by the scorer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MatchError {
    #[error("invalid brief field `{field}`: {reason}")]
    InvalidArgument { field: &'static str, reason: String },
}
