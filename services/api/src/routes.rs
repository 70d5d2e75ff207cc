use crate::infra::AppState;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Extension;
use axum::Json;
use job_board::error::AppError;
use job_board::workflows::recruiting::{
    job_board_router, ApplicationStats, BackendError, BadgeColor, JobBoardBackend, JobId,
    MatchBand, ReadModel, StatusBadge, StatusFilter, WorkflowError,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApplicantReportQuery {
    #[serde(default)]
    pub(crate) status: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApplicantEntry {
    pub(crate) application_id: u64,
    pub(crate) candidate_id: u64,
    pub(crate) name: String,
    pub(crate) status: String,
    pub(crate) badge: StatusBadge<'static>,
    pub(crate) match_score: u32,
    pub(crate) match_band: MatchBand,
    pub(crate) match_color: BadgeColor,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApplicantReport {
    pub(crate) job_id: JobId,
    pub(crate) title: String,
    pub(crate) job_status: StatusBadge<'static>,
    pub(crate) stats: ApplicationStats,
    pub(crate) applicants: Vec<ApplicantEntry>,
    pub(crate) available_candidates: usize,
}

pub(crate) fn with_job_board_routes<B>(backend: Arc<B>) -> axum::Router
where
    B: JobBoardBackend + 'static,
{
    let reports = axum::Router::new()
        .route("/api/jobs/:id/applicants", get(applicant_report::<B>))
        .with_state(backend.clone());

    job_board_router(backend)
        .merge(reports)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
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

pub(crate) async fn load_read_model<B>(backend: &B) -> Result<ReadModel, BackendError>
where
    B: JobBoardBackend + ?Sized,
{
    Ok(ReadModel {
        jobs: Some(backend.jobs().await?),
        candidates: Some(backend.candidates().await?),
        applications: Some(backend.applications().await?),
        rejected_applications: Some(backend.rejected_applications().await?),
    })
}

pub(crate) fn build_applicant_report(
    model: &ReadModel,
    job_id: JobId,
    filter: &StatusFilter,
) -> Result<ApplicantReport, AppError> {
    let view = model.reconcile(job_id)?;
    let job = model
        .job(job_id)
        .ok_or(WorkflowError::JobNotFound(job_id))?;

    let applicants = view
        .rows(filter)
        .into_iter()
        .map(|row| {
            let score = row.candidate.match_score();
            let band = MatchBand::for_score(score);
            ApplicantEntry {
                application_id: row.application.id.0,
                candidate_id: row.candidate.id.0,
                name: row.candidate.name.clone(),
                status: row.application.status.code().to_string(),
                badge: row.application.status.badge().into_owned(),
                match_score: score,
                match_band: band,
                match_color: band.color(),
            }
        })
        .collect();

    Ok(ApplicantReport {
        job_id,
        title: job.title.clone(),
        job_status: job.status.badge(),
        stats: view.stats(),
        applicants,
        available_candidates: view.non_applicants().len(),
    })
}

pub(crate) async fn applicant_report<B>(
    State(backend): State<Arc<B>>,
    Path(id): Path<u64>,
    Query(query): Query<ApplicantReportQuery>,
) -> Result<Json<ApplicantReport>, AppError>
where
    B: JobBoardBackend + 'static,
{
    let model = load_read_model(backend.as_ref()).await?;
    let filter = StatusFilter::parse(query.status.as_deref().unwrap_or("all"));
    let report = build_applicant_report(&model, JobId(id), &filter)?;
    Ok(Json(report))
}
