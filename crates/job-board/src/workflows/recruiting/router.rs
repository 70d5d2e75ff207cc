use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{Datelike, Utc};
use serde_json::json;
use tracing::{info, warn};

use super::backend::{
    ApiErrorPayload, BackendError, JobBoardBackend, NewApplication, RejectionRequest,
};
use super::jobs::JobDraft;
use super::profile::EmployerProfile;
use super::validation::ValidationErrors;

/// REST surface of the job board over any backend implementation.
pub fn job_board_router<B>(backend: Arc<B>) -> Router
where
    B: JobBoardBackend + 'static,
{
    Router::new()
        .route("/api/jobs", get(list_jobs::<B>).post(create_job::<B>))
        .route("/api/candidates", get(list_candidates::<B>))
        .route(
            "/api/applications",
            get(list_applications::<B>)
                .post(create_application::<B>)
                .patch(reject_application::<B>),
        )
        .route(
            "/api/rejected-applications",
            get(list_rejected_applications::<B>),
        )
        .route("/api/employer-profile/check", post(check_employer_profile))
        .with_state(backend)
}

fn error_response(err: BackendError) -> Response {
    let (status, error) = match &err {
        BackendError::Rejected(_) => (StatusCode::BAD_REQUEST, "Bad Request"),
        BackendError::Conflict(_) => (StatusCode::CONFLICT, "Conflict"),
        BackendError::NotFound(_) => (StatusCode::NOT_FOUND, "Not Found"),
        BackendError::Unavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "Service Unavailable"),
    };
    let payload = ApiErrorPayload {
        error: error.to_string(),
        message: Some(err.to_string()),
    };
    (status, Json(payload)).into_response()
}

fn validation_failed(errors: ValidationErrors) -> Response {
    let payload = json!({
        "error": "Validation failed",
        "message": errors.to_string(),
        "fields": errors,
    });
    (StatusCode::BAD_REQUEST, Json(payload)).into_response()
}

fn malformed_body(rejection: JsonRejection) -> Response {
    warn!(error = %rejection.body_text(), "rejected malformed request body");
    let payload = ApiErrorPayload {
        error: "Bad Request".to_string(),
        message: Some(rejection.body_text()),
    };
    (StatusCode::BAD_REQUEST, Json(payload)).into_response()
}

pub(crate) async fn list_jobs<B>(State(backend): State<Arc<B>>) -> Response
where
    B: JobBoardBackend + 'static,
{
    match backend.jobs().await {
        Ok(jobs) => Json(jobs).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_candidates<B>(State(backend): State<Arc<B>>) -> Response
where
    B: JobBoardBackend + 'static,
{
    match backend.candidates().await {
        Ok(candidates) => Json(candidates).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_applications<B>(State(backend): State<Arc<B>>) -> Response
where
    B: JobBoardBackend + 'static,
{
    match backend.applications().await {
        Ok(applications) => Json(applications).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_rejected_applications<B>(State(backend): State<Arc<B>>) -> Response
where
    B: JobBoardBackend + 'static,
{
    match backend.rejected_applications().await {
        Ok(rejected) => Json(rejected).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn create_job<B>(
    State(backend): State<Arc<B>>,
    body: Result<Json<JobDraft>, JsonRejection>,
) -> Response
where
    B: JobBoardBackend + 'static,
{
    let Json(draft) = match body {
        Ok(body) => body,
        Err(rejection) => return malformed_body(rejection),
    };
    if let Err(errors) = draft.validate() {
        return validation_failed(errors);
    }

    match backend.create_job(draft).await {
        Ok(created) => {
            info!(job = %created.insert_id, "job posted");
            (StatusCode::CREATED, Json(created)).into_response()
        }
        Err(err) => {
            warn!(error = %err, "posting job failed");
            error_response(err)
        }
    }
}

pub(crate) async fn create_application<B>(
    State(backend): State<Arc<B>>,
    body: Result<Json<NewApplication>, JsonRejection>,
) -> Response
where
    B: JobBoardBackend + 'static,
{
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => return malformed_body(rejection),
    };
    match backend.create_application(request).await {
        Ok(application) => (StatusCode::CREATED, Json(application)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn reject_application<B>(
    State(backend): State<Arc<B>>,
    body: Result<Json<RejectionRequest>, JsonRejection>,
) -> Response
where
    B: JobBoardBackend + 'static,
{
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => return malformed_body(rejection),
    };
    match backend.reject_application(request).await {
        Ok(application) => (StatusCode::OK, Json(application)).into_response(),
        Err(err) => error_response(err),
    }
}

/// Validate an employer profile and report how complete it is.
pub(crate) async fn check_employer_profile(
    body: Result<Json<EmployerProfile>, JsonRejection>,
) -> Response {
    let Json(profile) = match body {
        Ok(body) => body,
        Err(rejection) => return malformed_body(rejection),
    };

    match profile.validate(Utc::now().year()) {
        Ok(()) => {
            let completion = profile.completion_percent();
            Json(json!({ "completionPercent": completion })).into_response()
        }
        Err(errors) => validation_failed(errors),
    }
}
