use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::matching::domain::{
    AgeRange, BrandBrief, BriefConstraints, BriefSubmission, CreatorId, CreatorProfile,
    SafetyFlags,
};
use crate::matching::repository::{CreatorRepository, RepositoryError};
use crate::matching::scoring::{MatchConfig, MatchScorer};
use crate::matching::{match_router, MatchService};

pub(super) fn brief() -> BrandBrief {
    BrandBrief {
        category: "Fashion & Beauty".to_string(),
        platforms: vec!["Instagram".to_string()],
        budget_inr: 20_000.0,
        target_locations: vec!["Mumbai".to_string()],
        target_ages: Some(AgeRange::new(18.0, 34.0)),
        tone: vec!["Casual".to_string()],
        constraints: None,
    }
}

pub(super) fn adult_free_brief() -> BrandBrief {
    BrandBrief {
        constraints: Some(BriefConstraints {
            no_adult_content: true,
            timeline_days: Some(30),
        }),
        ..brief()
    }
}

pub(super) fn submission() -> BriefSubmission {
    BriefSubmission {
        category: Some("Fashion & Beauty".to_string()),
        platforms: Some(vec!["Instagram".to_string()]),
        budget_inr: Some(20_000.0),
        target_locations: Some(vec!["Mumbai".to_string()]),
        target_ages: Some(vec![18.0, 34.0]),
        tone: Some(vec!["Casual".to_string()]),
        constraints: None,
    }
}

/// Creator from the reference walkthrough: scores 84 against `brief()`.
pub(super) fn fashion_creator() -> CreatorProfile {
    let mut audience_geo = BTreeMap::new();
    audience_geo.insert("Mumbai".to_string(), 0.5);

    let mut audience_age = BTreeMap::new();
    audience_age.insert("18-24".to_string(), 0.6);
    audience_age.insert("25-34".to_string(), 0.3);

    CreatorProfile {
        id: CreatorId("c-fashion".to_string()),
        handle: "@style.with.riya".to_string(),
        verticals: vec!["Fashion & Beauty".to_string()],
        platforms: vec!["Instagram".to_string()],
        audience_geo,
        audience_age,
        avg_views: 100_000.0,
        engagement_rate: 0.05,
        past_brand_categories: Vec::new(),
        content_tone: vec!["Casual".to_string()],
        safety_flags: SafetyFlags::default(),
        base_price_inr: Some(15_000.0),
    }
}

/// Creator that maxes out every sub-score against `brief()`.
pub(super) fn perfect_creator(id: &str) -> CreatorProfile {
    let mut creator = fashion_creator();
    creator.id = CreatorId(id.to_string());
    creator.handle = format!("@{id}");
    creator.audience_geo.insert("Mumbai".to_string(), 1.0);
    creator.audience_age.insert("18-24".to_string(), 1.0);
    creator.avg_views = 150_000.0;
    creator.engagement_rate = 0.06;
    creator.base_price_inr = Some(10_000.0);
    creator
}

pub(super) fn bare_creator(id: &str) -> CreatorProfile {
    CreatorProfile {
        id: CreatorId(id.to_string()),
        handle: format!("@{id}"),
        verticals: Vec::new(),
        platforms: Vec::new(),
        audience_geo: BTreeMap::new(),
        audience_age: BTreeMap::new(),
        avg_views: 0.0,
        engagement_rate: 0.0,
        past_brand_categories: Vec::new(),
        content_tone: Vec::new(),
        safety_flags: SafetyFlags::default(),
        base_price_inr: None,
    }
}

pub(super) fn creator(id: &str, vertical: &str, engagement_rate: f64) -> CreatorProfile {
    let mut creator = fashion_creator();
    creator.id = CreatorId(id.to_string());
    creator.handle = format!("@{id}");
    creator.verticals = vec![vertical.to_string()];
    creator.engagement_rate = engagement_rate;
    creator
}

/// Mixed roster: three fashion creators outscore everyone else.
pub(super) fn roster() -> Vec<CreatorProfile> {
    vec![
        creator("fashion-a", "Fashion & Beauty", 0.060),
        creator("fashion-b", "fashion & beauty", 0.055),
        creator("fashion-c", "Fashion & Beauty", 0.050),
        creator("tech-a", "Tech", 0.040),
        creator("food-a", "Food", 0.030),
        bare_creator("empty"),
    ]
}

pub(super) fn scorer() -> MatchScorer {
    MatchScorer::new(MatchConfig::default())
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) creators: Arc<Mutex<Vec<CreatorProfile>>>,
}

impl MemoryRepository {
    pub(super) fn with(creators: Vec<CreatorProfile>) -> Self {
        Self {
            creators: Arc::new(Mutex::new(creators)),
        }
    }
}

impl CreatorRepository for MemoryRepository {
    fn all(&self) -> Result<Vec<CreatorProfile>, RepositoryError> {
        Ok(self
            .creators
            .lock()
            .expect("repository mutex poisoned")
            .clone())
    }
}

pub(super) struct UnavailableRepository;

impl CreatorRepository for UnavailableRepository {
    fn all(&self) -> Result<Vec<CreatorProfile>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service() -> (MatchService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::with(roster()));
    let service = MatchService::new(repository.clone(), MatchConfig::default());
    (service, repository)
}

pub(super) fn match_router_with_service(service: MatchService<MemoryRepository>) -> axum::Router {
    match_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
