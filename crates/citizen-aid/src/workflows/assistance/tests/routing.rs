use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::workflows::assistance::router::assistance_router;

fn router() -> Router {
    assistance_router(Arc::new(deterministic_orchestrator()))
}

fn post_json(uri: &str, payload: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request builds")
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("request builds")
}

#[tokio::test]
async fn solve_route_returns_pipeline_response() {
    let response = router()
        .oneshot(post_json(
            "/api/v1/assistance/solve",
            json!({
                "issue": "I lost my job and need financial help",
                "user_info": { "monthly_income": 15000, "family_size": 4, "age": 29 }
            }),
        ))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["issue_analysis"]["issue_type"], "employment");
    assert_eq!(
        body["eligibility_results"][0]["scheme"],
        "Ehsaas Emergency Cash"
    );
    assert_eq!(
        body["eligibility_results"][0]["eligibility"]["verdict"],
        "eligible"
    );
    assert!(body["explanation"].as_str().is_some_and(|text| !text.is_empty()));
}

#[tokio::test]
async fn blank_issue_is_rejected() {
    let response = router()
        .oneshot(post_json(
            "/api/v1/assistance/solve",
            json!({ "issue": "   ", "user_info": {} }),
        ))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn eligibility_route_reports_verdict() {
    let response = router()
        .oneshot(post_json(
            "/api/v1/assistance/eligibility",
            json!({
                "scheme_name": EDUCATION_GRANT,
                "user_info": { "monthly_income": 35000, "number_of_children": 3 }
            }),
        ))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["verdict"], "ineligible");
}

#[tokio::test]
async fn eligibility_route_requires_scheme_name() {
    let response = router()
        .oneshot(post_json(
            "/api/v1/assistance/eligibility",
            json!({ "user_info": {} }),
        ))
        .await
        .expect("route responds");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn documents_route_reports_unknown_scheme_inline() {
    let response = router()
        .oneshot(post_json(
            "/api/v1/assistance/documents",
            json!({ "scheme_name": "Imaginary Relief Fund" }),
        ))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Scheme not found");
}

#[tokio::test]
async fn helplines_route_orders_contacts() {
    let response = router()
        .oneshot(post_json(
            "/api/v1/assistance/helplines",
            json!({ "scheme_name": "Sehat Card Plus", "issue_type": "healthcare" }),
        ))
        .await
        .expect("route responds");

    let body = json_body(response).await;
    let kinds: Vec<&str> = body["helplines"]
        .as_array()
        .expect("helplines array")
        .iter()
        .filter_map(|entry| entry["type"].as_str())
        .collect();
    assert_eq!(kinds, vec!["scheme_specific", "general", "general"]);
}

#[tokio::test]
async fn forward_route_assigns_department() {
    let response = router()
        .oneshot(post_json(
            "/api/v1/assistance/forward",
            json!({ "issue": "Our house was damaged in the flood", "user_info": {} }),
        ))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["department"], "housing");
    assert_eq!(body["department_name"], "Housing Department");
    assert!(body["reference_id"]
        .as_str()
        .is_some_and(|reference| reference.starts_with("QR")));
}

#[tokio::test]
async fn apply_route_returns_guidance() {
    let response = router()
        .oneshot(post_json(
            "/api/v1/assistance/apply",
            json!({
                "scheme_name": "Kamyab Jawan Program",
                "user_info": { "age": 24 }
            }),
        ))
        .await
        .expect("route responds");

    let body = json_body(response).await;
    assert_eq!(body["status"], "ready");
    assert_eq!(body["scheme_name"], "Kamyab Jawan Program");
}

#[tokio::test]
async fn scheme_listing_groups_by_category() {
    let response = router()
        .oneshot(get("/api/v1/schemes"))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["total"], 9);
    assert_eq!(
        body["categories"]["housing"]
            .as_array()
            .map(|schemes| schemes.len()),
        Some(2)
    );
}

#[tokio::test]
async fn scheme_detail_route_handles_missing_names() {
    let found = router()
        .oneshot(get("/api/v1/schemes/Sehat%20Card%20Plus"))
        .await
        .expect("route responds");
    assert_eq!(found.status(), StatusCode::OK);
    let body = json_body(found).await;
    assert_eq!(body["category"], "Healthcare");

    let missing = router()
        .oneshot(get("/api/v1/schemes/Nothing%20Here"))
        .await
        .expect("route responds");
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}
