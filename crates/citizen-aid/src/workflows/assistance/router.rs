use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::attributes::UserAttributes;
use super::classification::IssueType;
use super::helpline::Department;
use super::orchestrator::AssistanceOrchestrator;

#[derive(Debug, Deserialize)]
pub(crate) struct SolveRequest {
    #[serde(default, alias = "issue_text")]
    issue: String,
    #[serde(default, alias = "user_attributes")]
    user_info: UserAttributes,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SchemeRequest {
    #[serde(default)]
    scheme_name: String,
    #[serde(default, alias = "user_attributes")]
    user_info: UserAttributes,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HelplineRequest {
    #[serde(default)]
    scheme_name: Option<String>,
    #[serde(default)]
    issue_type: Option<IssueType>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ForwardRequest {
    #[serde(default, alias = "issue_text")]
    issue: String,
    #[serde(default, alias = "user_attributes")]
    user_info: UserAttributes,
    #[serde(default)]
    department: Option<Department>,
}

/// Router builder exposing the assistance pipeline and the scheme catalog over HTTP.
pub fn assistance_router(orchestrator: Arc<AssistanceOrchestrator>) -> Router {
    Router::new()
        .route("/api/v1/assistance/solve", post(solve_handler))
        .route("/api/v1/assistance/eligibility", post(eligibility_handler))
        .route("/api/v1/assistance/documents", post(documents_handler))
        .route("/api/v1/assistance/helplines", post(helplines_handler))
        .route("/api/v1/assistance/forward", post(forward_handler))
        .route("/api/v1/assistance/apply", post(apply_handler))
        .route("/api/v1/schemes", get(schemes_handler))
        .route("/api/v1/schemes/:name", get(scheme_detail_handler))
        .with_state(orchestrator)
}

fn error_response(status: StatusCode, message: &str) -> Response {
    let payload = json!({
        "status": "error",
        "message": message,
    });
    (status, Json(payload)).into_response()
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub(crate) async fn solve_handler(
    State(orchestrator): State<Arc<AssistanceOrchestrator>>,
    Json(request): Json<SolveRequest>,
) -> Response {
    if blank(&request.issue) {
        return error_response(StatusCode::BAD_REQUEST, "Please describe your issue");
    }

    let response = orchestrator
        .solve(request.issue.trim(), &request.user_info)
        .await;
    (StatusCode::OK, Json(response)).into_response()
}

pub(crate) async fn eligibility_handler(
    State(orchestrator): State<Arc<AssistanceOrchestrator>>,
    Json(request): Json<SchemeRequest>,
) -> Response {
    if blank(&request.scheme_name) {
        return error_response(StatusCode::BAD_REQUEST, "Scheme name is required");
    }

    let verdict = orchestrator
        .check_eligibility(request.scheme_name.trim(), &request.user_info)
        .await;
    (StatusCode::OK, Json(verdict)).into_response()
}

pub(crate) async fn documents_handler(
    State(orchestrator): State<Arc<AssistanceOrchestrator>>,
    Json(request): Json<SchemeRequest>,
) -> Response {
    if blank(&request.scheme_name) {
        return error_response(StatusCode::BAD_REQUEST, "Scheme name is required");
    }

    let collection = orchestrator.collect_documents(request.scheme_name.trim(), &request.user_info);
    (StatusCode::OK, Json(collection)).into_response()
}

pub(crate) async fn helplines_handler(
    State(orchestrator): State<Arc<AssistanceOrchestrator>>,
    Json(request): Json<HelplineRequest>,
) -> Response {
    let scheme_name = request
        .scheme_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty());
    let info = orchestrator.helplines(scheme_name, request.issue_type);
    (StatusCode::OK, Json(info)).into_response()
}

pub(crate) async fn forward_handler(
    State(orchestrator): State<Arc<AssistanceOrchestrator>>,
    Json(request): Json<ForwardRequest>,
) -> Response {
    if blank(&request.issue) {
        return error_response(StatusCode::BAD_REQUEST, "Please describe your issue");
    }

    let forwarded = orchestrator.forward(request.issue.trim(), &request.user_info, request.department);
    (StatusCode::OK, Json(forwarded)).into_response()
}

pub(crate) async fn apply_handler(
    State(orchestrator): State<Arc<AssistanceOrchestrator>>,
    Json(request): Json<SchemeRequest>,
) -> Response {
    if blank(&request.scheme_name) {
        return error_response(StatusCode::BAD_REQUEST, "Scheme name is required");
    }

    let guidance = orchestrator
        .assist_application(request.scheme_name.trim(), &request.user_info)
        .await;
    (StatusCode::OK, Json(guidance)).into_response()
}

pub(crate) async fn schemes_handler(
    State(orchestrator): State<Arc<AssistanceOrchestrator>>,
) -> Response {
    let catalog = orchestrator.catalog();
    let payload = json!({
        "total": catalog.schemes().len(),
        "categories": catalog.grouped(),
    });
    (StatusCode::OK, Json(payload)).into_response()
}

pub(crate) async fn scheme_detail_handler(
    State(orchestrator): State<Arc<AssistanceOrchestrator>>,
    Path(name): Path<String>,
) -> Response {
    match orchestrator.catalog().scheme_details(&name) {
        Some(details) => (StatusCode::OK, Json(details)).into_response(),
        None => error_response(StatusCode::NOT_FOUND, "Scheme not found"),
    }
}
