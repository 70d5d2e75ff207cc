use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::backend::{BackendError, JobBoardBackend, JobCreated, NewApplication, RejectionRequest};
use super::domain::{
    Application, ApplicationId, ApplicationStatus, Candidate, Job, JobId, RejectedApplication,
};
use super::jobs::JobDraft;
use super::workflow::MAX_COMMENT_CHARS;

#[derive(Debug)]
struct BoardState {
    jobs: Vec<Job>,
    candidates: Vec<Candidate>,
    applications: Vec<Application>,
    rejected: Vec<RejectedApplication>,
    next_job_id: u64,
    next_application_id: u64,
}

/// Process-local stand-in for the job board API, used by the demo service
/// and tests. Rejects a second application for the same job and candidate.
#[derive(Debug)]
pub struct InMemoryJobBoard {
    state: Mutex<BoardState>,
}

impl Default for InMemoryJobBoard {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new(), Vec::new())
    }
}

impl InMemoryJobBoard {
    pub fn new(jobs: Vec<Job>, candidates: Vec<Candidate>, applications: Vec<Application>) -> Self {
        let next_job_id = jobs.iter().map(|job| job.id.0).max().unwrap_or(0) + 1;
        let next_application_id = applications
            .iter()
            .map(|application| application.id.0)
            .max()
            .unwrap_or(0)
            + 1;

        Self {
            state: Mutex::new(BoardState {
                jobs,
                candidates,
                applications,
                rejected: Vec::new(),
                next_job_id,
                next_application_id,
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, BoardState>, BackendError> {
        self.state
            .lock()
            .map_err(|_| BackendError::Unavailable("job board state poisoned".to_string()))
    }

    fn now() -> DateTime<Utc> {
        Utc::now()
    }
}

#[async_trait]
impl JobBoardBackend for InMemoryJobBoard {
    async fn jobs(&self) -> Result<Vec<Job>, BackendError> {
        Ok(self.lock()?.jobs.clone())
    }

    async fn candidates(&self) -> Result<Vec<Candidate>, BackendError> {
        Ok(self.lock()?.candidates.clone())
    }

    async fn applications(&self) -> Result<Vec<Application>, BackendError> {
        Ok(self.lock()?.applications.clone())
    }

    async fn rejected_applications(&self) -> Result<Vec<RejectedApplication>, BackendError> {
        Ok(self.lock()?.rejected.clone())
    }

    async fn create_job(&self, draft: JobDraft) -> Result<JobCreated, BackendError> {
        draft
            .validate()
            .map_err(|errors| BackendError::Rejected(errors.to_string()))?;

        let mut state = self.lock()?;
        let id = JobId(state.next_job_id);
        state.next_job_id += 1;
        state.jobs.push(draft.into_job(id, Self::now()));
        Ok(JobCreated { insert_id: id })
    }

    async fn create_application(
        &self,
        request: NewApplication,
    ) -> Result<Application, BackendError> {
        let mut state = self.lock()?;

        if !state.jobs.iter().any(|job| job.id == request.job_id) {
            return Err(BackendError::NotFound(format!("job {}", request.job_id)));
        }
        if !state
            .candidates
            .iter()
            .any(|candidate| candidate.id == request.candidate_id)
        {
            return Err(BackendError::NotFound(request.candidate_id.to_string()));
        }
        if state.applications.iter().any(|application| {
            application.job_id == request.job_id && application.candidate_id == request.candidate_id
        }) {
            return Err(BackendError::Conflict(format!(
                "{} already applied to job {}",
                request.candidate_id, request.job_id
            )));
        }

        let application = Application {
            id: ApplicationId(state.next_application_id),
            job_id: request.job_id,
            candidate_id: request.candidate_id,
            status: ApplicationStatus::Pending,
            applied_at: Self::now(),
        };
        state.next_application_id += 1;
        state.applications.push(application.clone());

        if let Some(job) = state.jobs.iter_mut().find(|job| job.id == request.job_id) {
            job.counters.applicants += 1;
        }

        Ok(application)
    }

    async fn reject_application(
        &self,
        request: RejectionRequest,
    ) -> Result<Application, BackendError> {
        if request.comment.chars().count() > MAX_COMMENT_CHARS {
            return Err(BackendError::Rejected(format!(
                "comentario exceeds {MAX_COMMENT_CHARS} characters"
            )));
        }

        let mut state = self.lock()?;
        let application = state
            .applications
            .iter_mut()
            .find(|application| {
                application.job_id == request.job_id
                    && application.candidate_id == request.candidate_id
            })
            .ok_or_else(|| {
                BackendError::NotFound(format!(
                    "application for {} on job {}",
                    request.candidate_id, request.job_id
                ))
            })?;

        application.status = ApplicationStatus::Rejected;
        let updated = application.clone();

        state
            .rejected
            .retain(|entry| entry.rejected_application_id != updated.id);
        state.rejected.push(RejectedApplication {
            rejected_application_id: updated.id,
            reason: request.reason.code().to_string(),
            comment: request.comment,
        });

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::recruiting::domain::{CandidateId, JobStatus, JobType, RejectionReason};

    fn draft(title: &str) -> JobDraft {
        JobDraft {
            title: title.to_string(),
            company: "Acme Talent".to_string(),
            department: "Engineering".to_string(),
            location: "Remote".to_string(),
            salary_min: Some(50_000),
            salary_max: Some(70_000),
            job_type: JobType::Contract,
            status: JobStatus::Active,
            experience: "2 years".to_string(),
            description: "Build things.".to_string(),
        }
    }

    fn candidate(id: u64) -> Candidate {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": format!("Candidate {id}"),
            "email": format!("{id}@example.com")
        }))
        .expect("candidate fixture")
    }

    #[tokio::test]
    async fn create_job_assigns_sequential_ids_and_validates() {
        let board = InMemoryJobBoard::default();
        let first = board.create_job(draft("Engineer")).await.expect("created");
        let second = board.create_job(draft("Analyst")).await.expect("created");
        assert_eq!(first.insert_id, JobId(1));
        assert_eq!(second.insert_id, JobId(2));

        let err = board.create_job(draft("")).await.expect_err("title required");
        assert!(matches!(err, BackendError::Rejected(_)));
    }

    #[tokio::test]
    async fn duplicate_applications_conflict() {
        let board = InMemoryJobBoard::new(Vec::new(), vec![candidate(1)], Vec::new());
        let job = board.create_job(draft("Engineer")).await.expect("created");
        let request = NewApplication {
            job_id: job.insert_id,
            candidate_id: CandidateId(1),
        };

        let application = board.create_application(request).await.expect("assigned");
        assert_eq!(application.status, ApplicationStatus::Pending);
        assert!(matches!(
            board.create_application(request).await,
            Err(BackendError::Conflict(_))
        ));
        let jobs = board.jobs().await.expect("jobs");
        assert_eq!(jobs[0].counters.applicants, 1);
    }

    #[tokio::test]
    async fn reject_updates_status_and_records_reason() {
        let board = InMemoryJobBoard::new(Vec::new(), vec![candidate(1)], Vec::new());
        let job = board.create_job(draft("Engineer")).await.expect("created");
        let application = board
            .create_application(NewApplication {
                job_id: job.insert_id,
                candidate_id: CandidateId(1),
            })
            .await
            .expect("assigned");

        let rejected = board
            .reject_application(RejectionRequest {
                job_id: job.insert_id,
                candidate_id: CandidateId(1),
                reason: RejectionReason::CultureFit,
                comment: "Prefers a larger team".to_string(),
            })
            .await
            .expect("rejected");

        assert_eq!(rejected.status, ApplicationStatus::Rejected);
        let audit = board.rejected_applications().await.expect("audit");
        assert_eq!(audit.len(), 1);
        assert_eq!(audit[0].rejected_application_id, application.id);
        assert_eq!(audit[0].reason(), Some(RejectionReason::CultureFit));
    }

    #[tokio::test]
    async fn reject_unknown_application_is_not_found() {
        let board = InMemoryJobBoard::default();
        let err = board
            .reject_application(RejectionRequest {
                job_id: JobId(9),
                candidate_id: CandidateId(9),
                reason: RejectionReason::PositionFilled,
                comment: String::new(),
            })
            .await
            .expect_err("nothing to reject");
        assert!(matches!(err, BackendError::NotFound(_)));
    }
}
