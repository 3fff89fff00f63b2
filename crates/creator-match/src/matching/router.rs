use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::BriefSubmission;
use super::repository::CreatorRepository;
use super::service::{MatchService, MatchServiceError};

/// Router builder exposing the brief matching endpoints.
pub fn match_router<R>(service: Arc<MatchService<R>>) -> Router
where
    R: CreatorRepository + 'static,
{
    Router::new()
        .route("/api/v1/match", post(match_handler::<R>))
        .route("/api/v1/match/creators", get(creators_handler::<R>))
        .with_state(service)
}

pub(crate) async fn match_handler<R>(
    State(service): State<Arc<MatchService<R>>>,
    axum::Json(submission): axum::Json<BriefSubmission>,
) -> Response
where
    R: CreatorRepository + 'static,
{
    match service.match_brief(submission) {
        Ok(creators) => {
            (StatusCode::OK, axum::Json(json!({ "creators": creators }))).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn creators_handler<R>(State(service): State<Arc<MatchService<R>>>) -> Response
where
    R: CreatorRepository + 'static,
{
    match service.creators() {
        Ok(creators) => {
            (StatusCode::OK, axum::Json(json!({ "creators": creators }))).into_response()
        }
        Err(err) => error_response(err),
    }
}

fn error_response(err: MatchServiceError) -> Response {
    match err {
        MatchServiceError::Rejected(rejection) => {
            let violations: Vec<_> = rejection
                .violations
                .iter()
                .map(|violation| {
                    json!({
                        "field": violation.field(),
                        "message": violation.to_string(),
                    })
                })
                .collect();
            let payload = json!({
                "error": rejection.to_string(),
                "violations": violations,
            });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
        MatchServiceError::Scoring(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
        MatchServiceError::Repository(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response()
        }
    }
}
