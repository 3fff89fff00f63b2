use std::sync::Arc;

use tracing::{debug, info, warn};

use super::domain::{BrandBrief, BriefSubmission, CreatorProfile, ScoredCreator};
use super::repository::{CreatorRepository, RepositoryError};
use super::scoring::{MatchConfig, MatchError, MatchScorer};
use super::validation::{BriefRejection, BriefValidator};

/// Service composing brief validation, the roster store, and the scorer.
pub struct MatchService<R> {
    validator: BriefValidator,
    repository: Arc<R>,
    scorer: Arc<MatchScorer>,
}

impl<R> MatchService<R>
where
    R: CreatorRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: MatchConfig) -> Self {
        Self {
            validator: BriefValidator,
            repository,
            scorer: Arc::new(MatchScorer::new(config)),
        }
    }

    /// Validate a raw brief and rank the full roster against it.
    pub fn match_brief(
        &self,
        submission: BriefSubmission,
    ) -> Result<Vec<ScoredCreator>, MatchServiceError> {
        let brief = self.validator.validate(submission).map_err(|rejection| {
            debug!(violations = rejection.violations.len(), "brief rejected");
            rejection
        })?;
        self.score_brief(&brief)
    }

    /// Rank the full roster against an already validated brief.
    pub fn score_brief(&self, brief: &BrandBrief) -> Result<Vec<ScoredCreator>, MatchServiceError> {
        let roster = self.repository.all().map_err(|err| {
            warn!(error = %err, "creator roster unavailable");
            err
        })?;

        let ranked = self.scorer.score(brief, &roster)?;

        info!(
            category = %brief.category,
            creators = ranked.len(),
            top = ranked.first().map(|creator| creator.handle.as_str()).unwrap_or("-"),
            "ranked roster against brief"
        );

        Ok(ranked)
    }

    /// Raw roster listing for the console view.
    pub fn creators(&self) -> Result<Vec<CreatorProfile>, MatchServiceError> {
        Ok(self.repository.all()?)
    }

    pub fn scorer(&self) -> &MatchScorer {
        &self.scorer
    }
}

/// Error raised by the match service.
#[derive(Debug, thiserror::Error)]
pub enum MatchServiceError {
    #[error(transparent)]
    Rejected(#[from] BriefRejection),
    #[error(transparent)]
    Scoring(#[from] MatchError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
