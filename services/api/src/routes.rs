use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use creator_match::billing::{billing_router, BillingRepository, BillingService};
use creator_match::matching::{match_router, CreatorRepository, MatchService};
use serde_json::json;
use std::sync::Arc;

/// Matching and billing APIs plus the operational endpoints.
pub(crate) fn with_marketplace_routes<C, B>(
    matching: Arc<MatchService<C>>,
    billing: Arc<BillingService<B>>,
) -> axum::Router
where
    C: CreatorRepository + 'static,
    B: BillingRepository + 'static,
{
    match_router(matching)
        .merge(billing_router(billing))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
