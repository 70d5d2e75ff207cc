use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::response::Response;
use chrono::{TimeZone, Utc};
use serde_json::Value;

use crate::config::DashboardConfig;
use crate::workflows::recruiting::backend::{
    BackendError, JobBoardBackend, JobCreated, NewApplication, RejectionRequest,
};
use crate::workflows::recruiting::domain::{
    AiAnalysis, Application, ApplicationId, ApplicationStatus, Candidate, CandidateId, Education,
    Job, JobCounters, JobId, JobStatus, JobType, RejectedApplication, SalaryRange,
};
use crate::workflows::recruiting::jobs::JobDraft;
use crate::workflows::recruiting::store::InMemoryJobBoard;
use crate::workflows::recruiting::workflow::RecruiterWorkflow;

pub(super) const JOB: JobId = JobId(42);

pub(super) fn job(id: u64, title: &str) -> Job {
    Job {
        id: JobId(id),
        title: title.to_string(),
        company: "Acme Talent".to_string(),
        department: "Engineering".to_string(),
        location: "Santiago".to_string(),
        salary: SalaryRange {
            min: 60_000,
            max: 90_000,
        },
        job_type: JobType::FullTime,
        status: JobStatus::Active,
        experience: "3+ years".to_string(),
        description: "Own the applications pipeline.".to_string(),
        counters: JobCounters::default(),
        created_at: Utc.with_ymd_and_hms(2025, 2, 1, 9, 0, 0).unwrap(),
    }
}

pub(super) fn candidate(id: u64, name: &str, score: Option<u32>) -> Candidate {
    Candidate {
        id: CandidateId(id),
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        phone: Some("+56 9 5555 0000".to_string()),
        location: Some("Santiago".to_string()),
        professional_title: Some("Software Engineer".to_string()),
        experience: Some("5 years".to_string()),
        skills: vec!["Rust".to_string(), "SQL".to_string()],
        education: vec![Education {
            degree: "BSc Computer Science".to_string(),
            school: "Universidad de Chile".to_string(),
            year: Some(2018),
            gpa: None,
        }],
        avatar: None,
        ai_analysis: score.map(|score| AiAnalysis {
            match_score: Some(score),
            strengths: vec!["Backend depth".to_string()],
            ..AiAnalysis::default()
        }),
    }
}

pub(super) fn application(id: u64, job: JobId, candidate: u64, status: &str) -> Application {
    Application {
        id: ApplicationId(id),
        job_id: job,
        candidate_id: CandidateId(candidate),
        status: ApplicationStatus::from_code(status),
        applied_at: Utc.with_ymd_and_hms(2025, 2, 3, 10, 30, 0).unwrap(),
    }
}

pub(super) fn candidates() -> Vec<Candidate> {
    vec![
        candidate(1, "Ana Gomez", Some(70)),
        candidate(2, "Bruno Diaz", Some(91)),
        candidate(3, "Carla Anaya", Some(64)),
        candidate(4, "Diego Santana", None),
    ]
}

pub(super) fn applications() -> Vec<Application> {
    vec![
        application(1, JOB, 1, "pending"),
        application(2, JOB, 2, "rejected"),
        application(3, JobId(7), 3, "shortlisted"),
    ]
}

pub(super) fn seeded_board() -> Arc<InMemoryJobBoard> {
    Arc::new(InMemoryJobBoard::new(
        vec![job(42, "Backend Engineer"), job(7, "Data Analyst")],
        candidates(),
        applications(),
    ))
}

pub(super) fn dashboard_config() -> DashboardConfig {
    DashboardConfig::default()
}

pub(super) async fn loaded_workflow<B>(backend: Arc<B>) -> RecruiterWorkflow<B>
where
    B: JobBoardBackend + 'static,
{
    let mut workflow = RecruiterWorkflow::new(backend, JOB, &dashboard_config());
    workflow.refresh().await.expect("read models load");
    workflow
}

pub(super) fn job_draft() -> JobDraft {
    JobDraft {
        title: "Platform Engineer".to_string(),
        company: "Acme Talent".to_string(),
        department: "Infrastructure".to_string(),
        location: "Remote".to_string(),
        salary_min: Some(70_000),
        salary_max: Some(95_000),
        job_type: JobType::FullTime,
        status: JobStatus::Active,
        experience: "4+ years".to_string(),
        description: "Run the hiring platform.".to_string(),
    }
}

/// Serves reads from a seeded board but fails every write.
pub(super) struct OfflineWrites {
    reads: InMemoryJobBoard,
    refreshes: AtomicUsize,
}

impl OfflineWrites {
    pub(super) fn new() -> Self {
        Self {
            reads: InMemoryJobBoard::new(
                vec![job(42, "Backend Engineer")],
                candidates(),
                applications(),
            ),
            refreshes: AtomicUsize::new(0),
        }
    }

    pub(super) fn refresh_count(&self) -> usize {
        self.refreshes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl JobBoardBackend for OfflineWrites {
    async fn jobs(&self) -> Result<Vec<Job>, BackendError> {
        self.refreshes.fetch_add(1, Ordering::SeqCst);
        self.reads.jobs().await
    }

    async fn candidates(&self) -> Result<Vec<Candidate>, BackendError> {
        self.reads.candidates().await
    }

    async fn applications(&self) -> Result<Vec<Application>, BackendError> {
        self.reads.applications().await
    }

    async fn rejected_applications(&self) -> Result<Vec<RejectedApplication>, BackendError> {
        self.reads.rejected_applications().await
    }

    async fn create_job(&self, _draft: JobDraft) -> Result<JobCreated, BackendError> {
        Err(BackendError::Unavailable("connection reset".to_string()))
    }

    async fn create_application(
        &self,
        _request: NewApplication,
    ) -> Result<Application, BackendError> {
        Err(BackendError::Unavailable("connection reset".to_string()))
    }

    async fn reject_application(
        &self,
        _request: RejectionRequest,
    ) -> Result<Application, BackendError> {
        Err(BackendError::Unavailable("connection reset".to_string()))
    }
}

/// Backend whose applications endpoint is down.
pub(super) struct ApplicationsDown {
    reads: InMemoryJobBoard,
}

impl ApplicationsDown {
    pub(super) fn new() -> Self {
        Self {
            reads: InMemoryJobBoard::new(
                vec![job(42, "Backend Engineer")],
                candidates(),
                Vec::new(),
            ),
        }
    }
}

#[async_trait]
impl JobBoardBackend for ApplicationsDown {
    async fn jobs(&self) -> Result<Vec<Job>, BackendError> {
        self.reads.jobs().await
    }

    async fn candidates(&self) -> Result<Vec<Candidate>, BackendError> {
        self.reads.candidates().await
    }

    async fn applications(&self) -> Result<Vec<Application>, BackendError> {
        Err(BackendError::Unavailable("applications service offline".to_string()))
    }

    async fn rejected_applications(&self) -> Result<Vec<RejectedApplication>, BackendError> {
        self.reads.rejected_applications().await
    }

    async fn create_job(&self, draft: JobDraft) -> Result<JobCreated, BackendError> {
        self.reads.create_job(draft).await
    }

    async fn create_application(
        &self,
        request: NewApplication,
    ) -> Result<Application, BackendError> {
        self.reads.create_application(request).await
    }

    async fn reject_application(
        &self,
        request: RejectionRequest,
    ) -> Result<Application, BackendError> {
        self.reads.reject_application(request).await
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
