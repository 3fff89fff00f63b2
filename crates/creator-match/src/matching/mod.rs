//! Brief intake, creator scoring, and ranked match results.

pub mod domain;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    AgeRange, BrandBrief, BriefConstraints, BriefSubmission, CreatorId, CreatorProfile,
    SafetyFlags, ScoreBreakdown, ScoredCreator,
};
pub use repository::{CreatorRepository, CreatorRoster, RepositoryError, RosterError};
pub use router::match_router;
pub use scoring::{MatchConfig, MatchError, MatchScorer, MatchWeights};
pub use service::{MatchService, MatchServiceError};
pub use validation::{BriefRejection, BriefValidator, BriefViolation};
