use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::recruiting::{BackendError, ReconciliationError, WorkflowError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Workflow(WorkflowError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Workflow(err) => write!(f, "workflow error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Workflow(err) => Some(err),
        }
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Workflow(WorkflowError::Validation(_) | WorkflowError::NothingSelected) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Workflow(
                WorkflowError::JobNotFound(_)
                | WorkflowError::CandidateNotFound(_)
                | WorkflowError::ApplicationNotFound { .. }
                | WorkflowError::NotReady(ReconciliationError::JobNotFound(_))
                | WorkflowError::Backend(BackendError::NotFound(_)),
            ) => StatusCode::NOT_FOUND,
            AppError::Workflow(WorkflowError::NotReady(ReconciliationError::NotReady(_))) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::Workflow(WorkflowError::Backend(BackendError::Conflict(_))) => {
                StatusCode::CONFLICT
            }
            AppError::Workflow(WorkflowError::Backend(_)) => StatusCode::BAD_GATEWAY,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<WorkflowError> for AppError {
    fn from(value: WorkflowError) -> Self {
        Self::Workflow(value)
    }
}

impl From<BackendError> for AppError {
    fn from(value: BackendError) -> Self {
        Self::Workflow(WorkflowError::Backend(value))
    }
}

impl From<ReconciliationError> for AppError {
    fn from(value: ReconciliationError) -> Self {
        Self::Workflow(WorkflowError::NotReady(value))
    }
}
