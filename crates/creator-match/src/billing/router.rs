use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::{BillingId, BrandBillingRequest, CreatorPayoutRequest};
use super::repository::{BillingRepository, BillingRepositoryError};
use super::service::{BillingError, BillingService};

/// Router builder exposing the billing ledger endpoints.
pub fn billing_router<R>(service: Arc<BillingService<R>>) -> Router
where
    R: BillingRepository + 'static,
{
    Router::new()
        .route("/api/v1/billing/brand", post(brand_handler::<R>))
        .route("/api/v1/billing/creator", post(creator_handler::<R>))
        .route("/api/v1/billing/summary/:billing_id", get(summary_handler::<R>))
        .route("/api/v1/billing/billings", get(list_handler::<R>))
        .with_state(service)
}

pub(crate) async fn brand_handler<R>(
    State(service): State<Arc<BillingService<R>>>,
    axum::Json(request): axum::Json<BrandBillingRequest>,
) -> Response
where
    R: BillingRepository + 'static,
{
    match service.create_brand_billing(request) {
        Ok(record) => {
            let payload = json!({
                "billingId": record.id,
                "brandBilling": record.brand_billing,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn creator_handler<R>(
    State(service): State<Arc<BillingService<R>>>,
    axum::Json(request): axum::Json<CreatorPayoutRequest>,
) -> Response
where
    R: BillingRepository + 'static,
{
    match service.add_creator_payout(request) {
        Ok(record) => {
            let payload = json!({
                "billingId": record.id,
                "billing": record,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn summary_handler<R>(
    State(service): State<Arc<BillingService<R>>>,
    Path(billing_id): Path<String>,
) -> Response
where
    R: BillingRepository + 'static,
{
    match service.summary(&BillingId(billing_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(json!({ "billing": record }))).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_handler<R>(State(service): State<Arc<BillingService<R>>>) -> Response
where
    R: BillingRepository + 'static,
{
    match service.billings() {
        Ok(billings) => {
            (StatusCode::OK, axum::Json(json!({ "billings": billings }))).into_response()
        }
        Err(err) => error_response(err),
    }
}

fn error_response(err: BillingError) -> Response {
    let status = match &err {
        BillingError::MissingField(_) | BillingError::InvalidField { .. } => {
            StatusCode::BAD_REQUEST
        }
        BillingError::NotFound(_)
        | BillingError::Repository(BillingRepositoryError::NotFound(_)) => StatusCode::NOT_FOUND,
        BillingError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}
