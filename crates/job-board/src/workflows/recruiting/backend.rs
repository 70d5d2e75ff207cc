use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::domain::{
    Application, Candidate, CandidateId, Job, JobId, RejectedApplication, RejectionReason,
};
use super::jobs::JobDraft;

/// Body of `POST /api/applications`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApplication {
    pub job_id: JobId,
    pub candidate_id: CandidateId,
}

/// Body of `PATCH /api/applications`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectionRequest {
    pub job_id: JobId,
    pub candidate_id: CandidateId,
    pub reason: RejectionReason,
    #[serde(default, rename = "comentario")]
    pub comment: String,
}

/// Success payload of `POST /api/jobs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobCreated {
    pub insert_id: JobId,
}

/// Error payload returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorPayload {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiErrorPayload {
    pub fn summary(&self) -> String {
        match &self.message {
            Some(message) if !message.is_empty() => format!("{}: {}", self.error, message),
            _ => self.error.clone(),
        }
    }
}

/// Failure talking to the data-access layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("{0}")]
    Rejected(String),
    #[error("record already exists: {0}")]
    Conflict(String),
    #[error("record not found: {0}")]
    NotFound(String),
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

impl From<ApiErrorPayload> for BackendError {
    fn from(payload: ApiErrorPayload) -> Self {
        Self::Rejected(payload.summary())
    }
}

/// Read models and write operations of the job board API.
#[async_trait]
pub trait JobBoardBackend: Send + Sync {
    async fn jobs(&self) -> Result<Vec<Job>, BackendError>;

    async fn candidates(&self) -> Result<Vec<Candidate>, BackendError>;

    async fn applications(&self) -> Result<Vec<Application>, BackendError>;

    async fn rejected_applications(&self) -> Result<Vec<RejectedApplication>, BackendError>;

    async fn create_job(&self, draft: JobDraft) -> Result<JobCreated, BackendError>;

    async fn create_application(&self, request: NewApplication)
        -> Result<Application, BackendError>;

    async fn reject_application(
        &self,
        request: RejectionRequest,
    ) -> Result<Application, BackendError>;
}
