use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{Application, Job, JobCounters, JobId, JobStatus, JobType, SalaryRange};
use super::validation::ValidationErrors;

fn default_job_status() -> JobStatus {
    JobStatus::Active
}

/// Fields captured by the "post a job" form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDraft {
    pub title: String,
    pub company: String,
    pub department: String,
    pub location: String,
    #[serde(default)]
    pub salary_min: Option<u32>,
    #[serde(default)]
    pub salary_max: Option<u32>,
    pub job_type: JobType,
    #[serde(default = "default_job_status")]
    pub status: JobStatus,
    pub experience: String,
    pub description: String,
}

impl JobDraft {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("title", &self.title, "Job title");
        errors.require_text("company", &self.company, "Company");
        errors.require_text("department", &self.department, "Department");
        errors.require_text("location", &self.location, "Location");
        errors.require_text("experience", &self.experience, "Experience");
        errors.require_text("description", &self.description, "Description");

        match (self.salary_min, self.salary_max) {
            (Some(min), Some(max)) => {
                if min == 0 {
                    errors.add("salaryMin", "Minimum salary must be greater than zero");
                }
                if max == 0 {
                    errors.add("salaryMax", "Maximum salary must be greater than zero");
                }
                if min > max {
                    errors.add("salaryMax", "Maximum salary must be at least the minimum");
                }
            }
            (min, max) => {
                if min.is_none() {
                    errors.add("salaryMin", "Minimum salary is required");
                }
                if max.is_none() {
                    errors.add("salaryMax", "Maximum salary is required");
                }
            }
        }

        errors.into_result()
    }

    /// Materialize a validated draft as a stored job.
    pub fn into_job(self, id: JobId, created_at: DateTime<Utc>) -> Job {
        Job {
            id,
            title: self.title.trim().to_string(),
            company: self.company.trim().to_string(),
            department: self.department.trim().to_string(),
            location: self.location.trim().to_string(),
            salary: SalaryRange {
                min: self.salary_min.unwrap_or_default(),
                max: self.salary_max.unwrap_or_default(),
            },
            job_type: self.job_type,
            status: self.status,
            experience: self.experience,
            description: self.description,
            counters: JobCounters::default(),
            created_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobSort {
    #[default]
    Newest,
    Oldest,
    MostApplicants,
}

/// Filters of the job management list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobQuery {
    #[serde(default)]
    pub status: Option<JobStatus>,
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub sort: JobSort,
}

/// Job row with its applicant count taken from the applications read model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JobSummary<'a> {
    pub job: &'a Job,
    pub applicants: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct JobBoardOverview {
    pub total_jobs: usize,
    pub active_jobs: usize,
    pub total_applicants: usize,
}

fn applicant_counts(applications: &[Application]) -> HashMap<JobId, usize> {
    let mut counts = HashMap::new();
    for application in applications {
        *counts.entry(application.job_id).or_insert(0) += 1;
    }
    counts
}

fn matches_search(job: &Job, needle: &str) -> bool {
    [&job.title, &job.department, &job.location]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

pub fn list_jobs<'a>(
    jobs: &'a [Job],
    applications: &[Application],
    query: &JobQuery,
) -> Vec<JobSummary<'a>> {
    let counts = applicant_counts(applications);
    let needle = query.search.trim().to_lowercase();

    let mut rows: Vec<JobSummary<'a>> = jobs
        .iter()
        .filter(|job| query.status.map_or(true, |status| job.status == status))
        .filter(|job| needle.is_empty() || matches_search(job, &needle))
        .map(|job| JobSummary {
            job,
            applicants: counts.get(&job.id).copied().unwrap_or(0),
        })
        .collect();

    match query.sort {
        JobSort::Newest => rows.sort_by(|a, b| b.job.created_at.cmp(&a.job.created_at)),
        JobSort::Oldest => rows.sort_by(|a, b| a.job.created_at.cmp(&b.job.created_at)),
        JobSort::MostApplicants => rows.sort_by(|a, b| {
            b.applicants
                .cmp(&a.applicants)
                .then_with(|| b.job.created_at.cmp(&a.job.created_at))
        }),
    }

    rows
}

pub fn overview(jobs: &[Job], applications: &[Application]) -> JobBoardOverview {
    let counts = applicant_counts(applications);
    JobBoardOverview {
        total_jobs: jobs.len(),
        active_jobs: jobs
            .iter()
            .filter(|job| job.status == JobStatus::Active)
            .count(),
        total_applicants: jobs
            .iter()
            .map(|job| counts.get(&job.id).copied().unwrap_or(0))
            .sum(),
    }
}
