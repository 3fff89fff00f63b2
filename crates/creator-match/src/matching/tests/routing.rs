use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::json;
use tower::ServiceExt;

use super::common::*;
use crate::matching::scoring::MatchConfig;
use crate::matching::{match_router, MatchService};

fn post_json(uri: &str, payload: serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request")
}

#[tokio::test]
async fn match_endpoint_returns_ranked_creators() {
    let (service, _) = build_service();
    let app = match_router_with_service(service);

    let response = app
        .oneshot(post_json(
            "/api/v1/match",
            json!({
                "category": "Fashion & Beauty",
                "platforms": ["Instagram"],
                "budgetINR": 20000,
                "targetLocations": ["Mumbai"],
                "targetAges": [18, 34],
                "tone": ["Casual"],
                "constraints": { "noAdultContent": true }
            }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let creators = payload["creators"].as_array().expect("creators array");
    assert_eq!(creators.len(), roster().len());
    assert_eq!(creators[0]["id"], "fashion-a");
    assert_eq!(creators[0]["score"], 86);
    assert!(creators[0]["breakdown"]["perfPrice"].is_number());
    assert!(creators[0]["reasons"].is_array());
}

#[tokio::test]
async fn match_endpoint_lists_violations() {
    let (service, _) = build_service();
    let app = match_router_with_service(service);

    let response = app
        .oneshot(post_json(
            "/api/v1/match",
            json!({ "category": "Tech", "budgetINR": -5 }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    let fields: Vec<&str> = payload["violations"]
        .as_array()
        .expect("violations array")
        .iter()
        .filter_map(|violation| violation["field"].as_str())
        .collect();
    assert_eq!(
        fields,
        vec!["platforms", "budgetINR", "targetLocations", "targetAges"]
    );
}

#[tokio::test]
async fn match_endpoint_accepts_fractional_ages_and_reports_range_problems() {
    let brief = |ages: serde_json::Value| {
        json!({
            "category": "Fashion & Beauty",
            "platforms": ["Instagram"],
            "budgetINR": 20000,
            "targetLocations": ["Mumbai"],
            "targetAges": ages
        })
    };

    let (service, _) = build_service();
    let response = match_router_with_service(service)
        .oneshot(post_json("/api/v1/match", brief(json!([18.5, 34]))))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let (service, _) = build_service();
    let response = match_router_with_service(service)
        .oneshot(post_json("/api/v1/match", brief(json!([18.5, 130.5]))))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert_eq!(payload["violations"][0]["field"], "targetAges");
}

#[tokio::test]
async fn creators_endpoint_lists_roster() {
    let (service, _) = build_service();
    let app = match_router_with_service(service);

    let response = app
        .oneshot(
            Request::get("/api/v1/match/creators")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload["creators"].as_array().map(Vec::len),
        Some(roster().len())
    );
}

#[tokio::test]
async fn unavailable_store_maps_to_503() {
    let service = MatchService::new(Arc::new(UnavailableRepository), MatchConfig::default());
    let app = match_router(Arc::new(service));

    let response = app
        .oneshot(post_json(
            "/api/v1/match",
            serde_json::to_value(submission()).expect("submission serializes"),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .is_some_and(|message| message.contains("unavailable")));
}
