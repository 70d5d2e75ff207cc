use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use super::backend::{BackendError, JobBoardBackend, NewApplication, RejectionRequest};
use super::domain::{Application, CandidateId, JobId, RejectionReason};
use super::reconciliation::{JobReconciliation, ReadModel, ReadModelKind, ReconciliationError};
use super::search::{search_candidates, SearchDebouncer, SearchResults};
use super::validation::ValidationErrors;
use crate::config::DashboardConfig;

pub const MAX_COMMENT_CHARS: usize = 500;

/// Which modal is open on the applications screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogState {
    #[default]
    Closed,
    AssigningCandidate {
        selected: Option<CandidateId>,
    },
    Rejecting(CandidateId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    OpenAssign,
    OpenReject(CandidateId),
    SelectCandidate(CandidateId),
    Close,
}

impl DialogState {
    /// Transition table; actions that make no sense in the current state are ignored.
    pub fn apply(self, action: DialogAction) -> Self {
        match (self, action) {
            (_, DialogAction::Close) => Self::Closed,
            (Self::Closed, DialogAction::OpenAssign) => Self::AssigningCandidate { selected: None },
            (Self::Closed, DialogAction::OpenReject(candidate)) => Self::Rejecting(candidate),
            (Self::AssigningCandidate { .. }, DialogAction::SelectCandidate(candidate)) => {
                Self::AssigningCandidate {
                    selected: Some(candidate),
                }
            }
            (state, _) => state,
        }
    }

    pub fn is_open(self) -> bool {
        self != Self::Closed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("comment is limited to {MAX_COMMENT_CHARS} characters (got {length})")]
pub struct CommentTooLong {
    pub length: usize,
}

/// Transient form state of the reject dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RejectionDraft {
    reason: Option<RejectionReason>,
    comment: String,
}

impl RejectionDraft {
    pub fn reason(&self) -> Option<RejectionReason> {
        self.reason
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn remaining_chars(&self) -> usize {
        MAX_COMMENT_CHARS.saturating_sub(self.comment.chars().count())
    }

    pub fn set_reason(&mut self, reason: Option<RejectionReason>) {
        self.reason = reason;
    }

    /// Accepts only catalog codes; an empty code clears the selection.
    pub fn set_reason_code(&mut self, code: &str) -> Result<(), ValidationErrors> {
        if code.trim().is_empty() {
            self.reason = None;
            return Ok(());
        }
        match RejectionReason::from_code(code) {
            Some(reason) => {
                self.reason = Some(reason);
                Ok(())
            }
            None => Err(ValidationErrors::single(
                "reason",
                format!("'{code}' is not a recognized rejection reason"),
            )),
        }
    }

    /// Replace the comment; an over-long edit is refused and the previous text kept.
    pub fn set_comment(&mut self, comment: impl Into<String>) -> Result<(), CommentTooLong> {
        let comment = comment.into();
        let length = comment.chars().count();
        if length > MAX_COMMENT_CHARS {
            return Err(CommentTooLong { length });
        }
        self.comment = comment;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.reason = None;
        self.comment.clear();
    }

    pub fn to_request(
        &self,
        job_id: JobId,
        candidate_id: CandidateId,
    ) -> Result<RejectionRequest, ValidationErrors> {
        validate_rejection(self.reason, &self.comment)?;
        let reason = self
            .reason
            .ok_or_else(|| ValidationErrors::single("reason", "Select a rejection reason"))?;
        Ok(RejectionRequest {
            job_id,
            candidate_id,
            reason,
            comment: self.comment.clone(),
        })
    }
}

fn validate_rejection(
    reason: Option<RejectionReason>,
    comment: &str,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if reason.is_none() {
        errors.add("reason", "Select a rejection reason");
    }
    let length = comment.chars().count();
    if length > MAX_COMMENT_CHARS {
        errors.add("comment", CommentTooLong { length }.to_string());
    }
    errors.into_result()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Toast-style message for the recruiter; never blocks the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    NotReady(#[from] ReconciliationError),
    #[error("job {0} was not found")]
    JobNotFound(JobId),
    #[error("candidate {0} was not found")]
    CandidateNotFound(CandidateId),
    #[error("no application links {candidate_id} to job {job_id}")]
    ApplicationNotFound {
        job_id: JobId,
        candidate_id: CandidateId,
    },
    #[error("no candidate selected")]
    NothingSelected,
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Controller behind the applications screen of one job: owns the read-model
/// snapshot, dialog state, rejection draft and typeahead scheduling.
///
/// Mutating operations take `&mut self`, so a controller never has more than
/// one write in flight.
pub struct RecruiterWorkflow<B> {
    backend: Arc<B>,
    job_id: JobId,
    read_model: ReadModel,
    dialog: DialogState,
    rejection: RejectionDraft,
    rejection_target: Option<CandidateId>,
    search: SearchDebouncer,
    notifications: Vec<Notification>,
}

impl<B> RecruiterWorkflow<B>
where
    B: JobBoardBackend + 'static,
{
    pub fn new(backend: Arc<B>, job_id: JobId, config: &DashboardConfig) -> Self {
        Self {
            backend,
            job_id,
            read_model: ReadModel::default(),
            dialog: DialogState::Closed,
            rejection: RejectionDraft::default(),
            rejection_target: None,
            search: SearchDebouncer::new(config.search_debounce),
            notifications: Vec::new(),
        }
    }

    pub fn job_id(&self) -> JobId {
        self.job_id
    }

    pub fn read_model(&self) -> &ReadModel {
        &self.read_model
    }

    pub fn dialog(&self) -> DialogState {
        self.dialog
    }

    pub fn rejection_draft(&self) -> &RejectionDraft {
        &self.rejection
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub fn dispatch(&mut self, action: DialogAction) -> DialogState {
        if let DialogAction::OpenReject(candidate) = action {
            if self.dialog == DialogState::Closed && self.rejection_target != Some(candidate) {
                self.rejection.clear();
                self.rejection_target = Some(candidate);
            }
        }
        if matches!(action, DialogAction::OpenAssign | DialogAction::Close) {
            self.search.reset();
        }
        self.dialog = self.dialog.apply(action);
        self.dialog
    }

    pub fn set_rejection_reason(&mut self, code: &str) -> Result<(), ValidationErrors> {
        self.rejection.set_reason_code(code)
    }

    pub fn edit_rejection_comment(
        &mut self,
        comment: impl Into<String>,
    ) -> Result<(), CommentTooLong> {
        self.rejection.set_comment(comment)
    }

    /// Re-fetch every read model. Collections that fail to load keep their
    /// previous value; the first failure is returned.
    pub async fn refresh(&mut self) -> Result<(), BackendError> {
        let jobs = self.backend.jobs().await;
        let candidates = self.backend.candidates().await;
        let applications = self.backend.applications().await;
        let rejected = self.backend.rejected_applications().await;

        let mut first_error = None;
        let mut keep = |kind: ReadModelKind, err: BackendError| {
            warn!(read_model = %kind, error = %err, "failed to refresh read model");
            if first_error.is_none() {
                first_error = Some(err);
            }
        };

        let previous = &self.read_model;
        let next = ReadModel {
            jobs: jobs.map(Some).unwrap_or_else(|err| {
                keep(ReadModelKind::Jobs, err);
                previous.jobs.clone()
            }),
            candidates: candidates.map(Some).unwrap_or_else(|err| {
                keep(ReadModelKind::Candidates, err);
                previous.candidates.clone()
            }),
            applications: applications.map(Some).unwrap_or_else(|err| {
                keep(ReadModelKind::Applications, err);
                previous.applications.clone()
            }),
            rejected_applications: rejected.map(Some).unwrap_or_else(|err| {
                keep(ReadModelKind::RejectedApplications, err);
                previous.rejected_applications.clone()
            }),
        };
        self.read_model = next;

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    pub fn view(&self) -> Result<JobReconciliation<'_>, ReconciliationError> {
        self.read_model.reconcile(self.job_id)
    }

    /// Queue a typeahead query; it applies after the quiet period.
    pub fn search(&mut self, query: impl Into<String>, now: Instant) {
        self.search.schedule(query, now);
    }

    pub fn is_searching(&self) -> bool {
        self.search.is_searching()
    }

    pub fn poll_search(&mut self, now: Instant) -> bool {
        self.search.poll(now).is_some()
    }

    pub async fn settle_search(&mut self) -> bool {
        self.search.settle().await.is_some()
    }

    /// Non-applicants matching the applied typeahead query.
    pub fn suggestions(&self) -> Result<SearchResults<'_>, ReconciliationError> {
        let view = self.view()?;
        Ok(search_candidates(
            self.search.applied_query(),
            view.non_applicants(),
        ))
    }

    /// Assign the candidate selected in the assign dialog.
    pub async fn assign_selected(&mut self) -> Result<Application, WorkflowError> {
        match self.dialog {
            DialogState::AssigningCandidate {
                selected: Some(candidate_id),
            } => self.assign(self.job_id, candidate_id).await,
            _ => Err(WorkflowError::NothingSelected),
        }
    }

    pub async fn assign(
        &mut self,
        job_id: JobId,
        candidate_id: CandidateId,
    ) -> Result<Application, WorkflowError> {
        self.ensure_job(job_id)?;
        self.ensure_candidate(candidate_id)?;

        let result = self
            .backend
            .create_application(NewApplication {
                job_id,
                candidate_id,
            })
            .await;

        self.dialog = self.dialog.apply(DialogAction::Close);
        self.search.reset();
        self.refresh_after_write().await;

        match result {
            Ok(application) => {
                info!(
                    job = %job_id,
                    candidate = %candidate_id,
                    application = %application.id,
                    "candidate assigned"
                );
                self.notify(NotificationKind::Success, "Candidate assigned to the job");
                Ok(application)
            }
            Err(err) => {
                warn!(
                    job = %job_id,
                    candidate = %candidate_id,
                    error = %err,
                    "assigning candidate failed"
                );
                self.notify(
                    NotificationKind::Error,
                    format!("Could not assign the candidate: {err}"),
                );
                Err(err.into())
            }
        }
    }

    /// Reject using the dialog's draft for the candidate the dialog was opened for.
    pub async fn submit_rejection(&mut self) -> Result<Application, WorkflowError> {
        let DialogState::Rejecting(candidate_id) = self.dialog else {
            return Err(WorkflowError::NothingSelected);
        };
        let reason = self.rejection.reason();
        let comment = self.rejection.comment().to_string();
        self.reject(self.job_id, candidate_id, reason, &comment).await
    }

    pub async fn reject(
        &mut self,
        job_id: JobId,
        candidate_id: CandidateId,
        reason: Option<RejectionReason>,
        comment: &str,
    ) -> Result<Application, WorkflowError> {
        validate_rejection(reason, comment)?;
        self.ensure_job(job_id)?;
        self.ensure_candidate(candidate_id)?;
        if self.read_model.applications.is_some()
            && self.read_model.application(job_id, candidate_id).is_none()
        {
            return Err(WorkflowError::ApplicationNotFound {
                job_id,
                candidate_id,
            });
        }

        let reason =
            reason.ok_or_else(|| ValidationErrors::single("reason", "Select a rejection reason"))?;
        let request = RejectionRequest {
            job_id,
            candidate_id,
            reason,
            comment: comment.to_string(),
        };

        let result = self.backend.reject_application(request).await;

        self.dialog = self.dialog.apply(DialogAction::Close);
        self.refresh_after_write().await;

        match result {
            Ok(application) => {
                info!(
                    job = %job_id,
                    candidate = %candidate_id,
                    application = %application.id,
                    "candidate rejected"
                );
                self.rejection.clear();
                self.rejection_target = None;
                self.notify(NotificationKind::Success, "Candidate rejected");
                Ok(application)
            }
            Err(err) => {
                warn!(
                    job = %job_id,
                    candidate = %candidate_id,
                    error = %err,
                    "rejecting candidate failed"
                );
                self.notify(
                    NotificationKind::Error,
                    format!("Could not reject the candidate: {err}"),
                );
                Err(err.into())
            }
        }
    }

    async fn refresh_after_write(&mut self) {
        if let Err(err) = self.refresh().await {
            warn!(error = %err, "read model refresh after write failed");
        }
    }

    fn ensure_job(&self, job_id: JobId) -> Result<(), WorkflowError> {
        let jobs = self
            .read_model
            .jobs
            .as_deref()
            .ok_or(ReconciliationError::NotReady(ReadModelKind::Jobs))?;
        if jobs.iter().any(|job| job.id == job_id) {
            Ok(())
        } else {
            Err(WorkflowError::JobNotFound(job_id))
        }
    }

    fn ensure_candidate(&self, candidate_id: CandidateId) -> Result<(), WorkflowError> {
        if self.read_model.candidates.is_none() {
            return Err(ReconciliationError::NotReady(ReadModelKind::Candidates).into());
        }
        self.read_model
            .candidate(candidate_id)
            .map(|_| ())
            .ok_or(WorkflowError::CandidateNotFound(candidate_id))
    }

    fn notify(&mut self, kind: NotificationKind, message: impl Into<String>) {
        self.notifications.push(Notification {
            kind,
            message: message.into(),
        });
    }
}
