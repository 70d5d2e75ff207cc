//! Applications review for recruiters: joining applications to candidates,
//! typeahead search, the assign/reject workflow, and the job board forms.

pub mod backend;
pub mod domain;
pub mod jobs;
pub mod profile;
pub mod reconciliation;
pub mod router;
pub mod search;
pub mod status;
pub mod store;
pub(crate) mod validation;
pub mod workflow;

#[cfg(test)]
mod tests;

pub use backend::{
    ApiErrorPayload, BackendError, JobBoardBackend, JobCreated, NewApplication, RejectionRequest,
};
pub use domain::{
    AiAnalysis, Application, ApplicationId, ApplicationStatus, Candidate, CandidateId, Education,
    Job, JobCounters, JobId, JobStatus, JobType, RejectedApplication, RejectionReason, Resume,
    SalaryRange,
};
pub use jobs::{list_jobs, overview, JobBoardOverview, JobDraft, JobQuery, JobSort, JobSummary};
pub use profile::{CompanySize, EmployerProfile};
pub use reconciliation::{
    ApplicantRow, ApplicationStats, JobReconciliation, ReadModel, ReadModelKind,
    ReconciliationError, StatusFilter,
};
pub use router::job_board_router;
pub use search::{match_spans, search_candidates, SearchDebouncer, SearchHit, SearchResults};
pub use status::{status_badge, BadgeColor, MatchBand, StatusBadge};
pub use store::InMemoryJobBoard;
pub use validation::ValidationErrors;
pub use workflow::{
    CommentTooLong, DialogAction, DialogState, Notification, NotificationKind, RecruiterWorkflow,
    RejectionDraft, WorkflowError, MAX_COMMENT_CHARS,
};
