use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for posted jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub u64);

/// Identifier wrapper for candidates in the talent pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(pub u64);

/// Identifier wrapper for applications linking a candidate to a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub u64);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "candidate-{}", self.0)
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "application-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Internship,
    Temporary,
}

impl JobType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::FullTime => "Full-time",
            Self::PartTime => "Part-time",
            Self::Contract => "Contract",
            Self::Internship => "Internship",
            Self::Temporary => "Temporary",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Active,
    Paused,
    Closed,
}

impl JobStatus {
    pub const fn code(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Closed => "closed",
        }
    }
}

/// Counters maintained by the backend on the job record itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobCounters {
    #[serde(default)]
    pub applicants: u32,
    #[serde(default)]
    pub views: u32,
    #[serde(default)]
    pub shortlisted: u32,
    #[serde(default)]
    pub interviewed: u32,
}

/// Posted job as returned by `GET /api/jobs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub company: String,
    pub department: String,
    pub location: String,
    pub salary: SalaryRange,
    pub job_type: JobType,
    pub status: JobStatus,
    pub experience: String,
    pub description: String,
    #[serde(default)]
    pub counters: JobCounters,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub school: String,
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(default)]
    pub gpa: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    pub cv_link: String,
}

/// Externally computed screening summary; consumed as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
    #[serde(default)]
    pub match_score: Option<u32>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub concerns: Vec<String>,
    #[serde(default)]
    pub recommendation: Option<String>,
    #[serde(default)]
    pub resume: Option<Resume>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub professional_title: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub ai_analysis: Option<AiAnalysis>,
}

impl Candidate {
    /// Match score with missing analysis counted as zero.
    pub fn match_score(&self) -> u32 {
        self.ai_analysis
            .as_ref()
            .and_then(|analysis| analysis.match_score)
            .unwrap_or(0)
    }

    /// Education entries with structural duplicates removed, first occurrence kept.
    pub fn unique_education(&self) -> Vec<&Education> {
        let mut unique: Vec<&Education> = Vec::with_capacity(self.education.len());
        for entry in &self.education {
            if !unique.contains(&entry) {
                unique.push(entry);
            }
        }
        unique
    }

    pub fn cv_link(&self) -> Option<&str> {
        self.ai_analysis
            .as_ref()
            .and_then(|analysis| analysis.resume.as_ref())
            .map(|resume| resume.cv_link.as_str())
    }
}

/// Review status of an application. Codes the dashboard does not know are
/// carried verbatim so they can still be displayed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ApplicationStatus {
    Pending,
    UnderReview,
    Shortlisted,
    InterviewScheduled,
    Rejected,
    Other(String),
}

impl ApplicationStatus {
    pub const KNOWN: [Self; 5] = [
        Self::Pending,
        Self::UnderReview,
        Self::Shortlisted,
        Self::InterviewScheduled,
        Self::Rejected,
    ];

    pub fn from_code(code: &str) -> Self {
        match code {
            "pending" => Self::Pending,
            "under_review" => Self::UnderReview,
            "shortlisted" => Self::Shortlisted,
            "interview_scheduled" => Self::InterviewScheduled,
            "rejected" => Self::Rejected,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::UnderReview => "under_review",
            Self::Shortlisted => "shortlisted",
            Self::InterviewScheduled => "interview_scheduled",
            Self::Rejected => "rejected",
            Self::Other(code) => code,
        }
    }
}

impl From<String> for ApplicationStatus {
    fn from(value: String) -> Self {
        Self::from_code(&value)
    }
}

impl From<ApplicationStatus> for String {
    fn from(value: ApplicationStatus) -> Self {
        match value {
            ApplicationStatus::Other(code) => code,
            known => known.code().to_string(),
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub candidate_id: CandidateId,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
}

/// Fixed catalog of rejection reasons offered to recruiters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    InsufficientExperience,
    SkillsMismatch,
    SalaryExpectations,
    LocationMismatch,
    PositionFilled,
    FailedAssessment,
    CultureFit,
}

impl RejectionReason {
    pub const CATALOG: [Self; 7] = [
        Self::InsufficientExperience,
        Self::SkillsMismatch,
        Self::SalaryExpectations,
        Self::LocationMismatch,
        Self::PositionFilled,
        Self::FailedAssessment,
        Self::CultureFit,
    ];

    pub const fn code(self) -> &'static str {
        match self {
            Self::InsufficientExperience => "insufficient_experience",
            Self::SkillsMismatch => "skills_mismatch",
            Self::SalaryExpectations => "salary_expectations",
            Self::LocationMismatch => "location_mismatch",
            Self::PositionFilled => "position_filled",
            Self::FailedAssessment => "failed_assessment",
            Self::CultureFit => "culture_fit",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::InsufficientExperience => "Insufficient experience",
            Self::SkillsMismatch => "Skills do not match the role",
            Self::SalaryExpectations => "Salary expectations out of range",
            Self::LocationMismatch => "Location or relocation mismatch",
            Self::PositionFilled => "Position already filled",
            Self::FailedAssessment => "Did not pass the assessment",
            Self::CultureFit => "Not aligned with team culture",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::CATALOG
            .into_iter()
            .find(|reason| reason.code() == code.trim())
    }
}

/// Audit entry written by the backend when an application is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedApplication {
    pub rejected_application_id: ApplicationId,
    #[serde(default)]
    pub reason: String,
    #[serde(default, rename = "comentario")]
    pub comment: String,
}

impl RejectedApplication {
    pub fn reason(&self) -> Option<RejectionReason> {
        RejectionReason::from_code(&self.reason)
    }
}
