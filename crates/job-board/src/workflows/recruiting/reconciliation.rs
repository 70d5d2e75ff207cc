use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::Serialize;

use super::domain::{
    Application, ApplicationId, ApplicationStatus, Candidate, CandidateId, Job, JobId,
    RejectedApplication,
};

/// Snapshot of everything the dashboard has fetched so far. `None` means the
/// collection has not been loaded yet, which is different from loaded-but-empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadModel {
    pub jobs: Option<Vec<Job>>,
    pub candidates: Option<Vec<Candidate>>,
    pub applications: Option<Vec<Application>>,
    pub rejected_applications: Option<Vec<RejectedApplication>>,
}

impl ReadModel {
    pub fn job(&self, id: JobId) -> Option<&Job> {
        self.jobs.as_deref()?.iter().find(|job| job.id == id)
    }

    pub fn candidate(&self, id: CandidateId) -> Option<&Candidate> {
        self.candidates
            .as_deref()?
            .iter()
            .find(|candidate| candidate.id == id)
    }

    pub fn application(&self, job_id: JobId, candidate_id: CandidateId) -> Option<&Application> {
        self.applications.as_deref()?.iter().find(|application| {
            application.job_id == job_id && application.candidate_id == candidate_id
        })
    }

    pub fn rejection_for(&self, application_id: ApplicationId) -> Option<&RejectedApplication> {
        self.rejected_applications
            .as_deref()?
            .iter()
            .find(|entry| entry.rejected_application_id == application_id)
    }

    /// Join applications to candidates for one job. A loaded job list that
    /// does not contain the job is reported as not found.
    pub fn reconcile(&self, job_id: JobId) -> Result<JobReconciliation<'_>, ReconciliationError> {
        if let Some(jobs) = self.jobs.as_deref() {
            if !jobs.iter().any(|job| job.id == job_id) {
                return Err(ReconciliationError::JobNotFound(job_id));
            }
        }

        JobReconciliation::new(
            self.candidates.as_deref(),
            self.applications.as_deref(),
            job_id,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadModelKind {
    Jobs,
    Candidates,
    Applications,
    RejectedApplications,
}

impl fmt::Display for ReadModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Jobs => "jobs",
            Self::Candidates => "candidates",
            Self::Applications => "applications",
            Self::RejectedApplications => "rejected applications",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReconciliationError {
    #[error("{0} read model has not been loaded yet")]
    NotReady(ReadModelKind),
    #[error("job {0} was not found")]
    JobNotFound(JobId),
}

impl ReconciliationError {
    pub fn is_not_ready(&self) -> bool {
        matches!(self, Self::NotReady(_))
    }
}

/// Status selector for the applications list; `All` disables filtering.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ApplicationStatus),
}

impl StatusFilter {
    pub fn parse(code: &str) -> Self {
        match code.trim() {
            "" | "all" => Self::All,
            other => Self::Only(ApplicationStatus::from_code(other)),
        }
    }

    pub fn matches(&self, status: &ApplicationStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }
}

/// Application paired with the candidate it resolves to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApplicantRow<'a> {
    pub application: &'a Application,
    pub candidate: &'a Candidate,
}

/// Aggregate header for the applications screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplicationStats {
    pub total: usize,
    pub pending: usize,
    pub under_review: usize,
    pub shortlisted: usize,
    pub interview_scheduled: usize,
    pub rejected: usize,
    pub other: usize,
    pub average_match_score: u32,
}

/// Derived view of one job's applications over a read-model snapshot.
#[derive(Debug, Clone)]
pub struct JobReconciliation<'a> {
    job_id: JobId,
    applications: Vec<&'a Application>,
    applicants: Vec<&'a Candidate>,
    non_applicants: Vec<&'a Candidate>,
    by_id: HashMap<CandidateId, &'a Candidate>,
}

impl<'a> JobReconciliation<'a> {
    pub fn new(
        candidates: Option<&'a [Candidate]>,
        applications: Option<&'a [Application]>,
        job_id: JobId,
    ) -> Result<Self, ReconciliationError> {
        let candidates =
            candidates.ok_or(ReconciliationError::NotReady(ReadModelKind::Candidates))?;
        let applications =
            applications.ok_or(ReconciliationError::NotReady(ReadModelKind::Applications))?;

        let for_job: Vec<&Application> = applications
            .iter()
            .filter(|application| application.job_id == job_id)
            .collect();
        let applied: HashSet<CandidateId> = for_job
            .iter()
            .map(|application| application.candidate_id)
            .collect();

        let (applicants, non_applicants): (Vec<&Candidate>, Vec<&Candidate>) = candidates
            .iter()
            .partition(|candidate| applied.contains(&candidate.id));

        let by_id = candidates
            .iter()
            .map(|candidate| (candidate.id, candidate))
            .collect();

        Ok(Self {
            job_id,
            applications: for_job,
            applicants,
            non_applicants,
            by_id,
        })
    }

    pub fn job_id(&self) -> JobId {
        self.job_id
    }

    pub fn applications_for_job(&self) -> &[&'a Application] {
        &self.applications
    }

    pub fn applicants(&self) -> &[&'a Candidate] {
        &self.applicants
    }

    pub fn non_applicants(&self) -> &[&'a Candidate] {
        &self.non_applicants
    }

    pub fn filtered(&self, filter: &StatusFilter) -> Vec<&'a Application> {
        self.applications
            .iter()
            .copied()
            .filter(|application| filter.matches(&application.status))
            .collect()
    }

    /// Filtered applications joined to candidates; unresolved candidates are skipped.
    pub fn rows(&self, filter: &StatusFilter) -> Vec<ApplicantRow<'a>> {
        self.filtered(filter)
            .into_iter()
            .filter_map(|application| {
                self.by_id
                    .get(&application.candidate_id)
                    .map(|&candidate| ApplicantRow {
                        application,
                        candidate,
                    })
            })
            .collect()
    }

    /// Mean applicant match score, rounded half-up; zero without applicants.
    pub fn average_match_score(&self) -> u32 {
        let count = self.applicants.len() as u64;
        if count == 0 {
            return 0;
        }

        let sum: u64 = self
            .applicants
            .iter()
            .map(|candidate| u64::from(candidate.match_score()))
            .sum();

        ((2 * sum + count) / (2 * count)) as u32
    }

    pub fn stats(&self) -> ApplicationStats {
        let mut stats = ApplicationStats {
            total: self.applications.len(),
            average_match_score: self.average_match_score(),
            ..ApplicationStats::default()
        };

        for application in &self.applications {
            let slot = match application.status {
                ApplicationStatus::Pending => &mut stats.pending,
                ApplicationStatus::UnderReview => &mut stats.under_review,
                ApplicationStatus::Shortlisted => &mut stats.shortlisted,
                ApplicationStatus::InterviewScheduled => &mut stats.interview_scheduled,
                ApplicationStatus::Rejected => &mut stats.rejected,
                ApplicationStatus::Other(_) => &mut stats.other,
            };
            *slot += 1;
        }

        stats
    }
}
