use chrono::{DateTime, TimeZone, Utc};
use job_board::workflows::recruiting::{
    AiAnalysis, Application, ApplicationId, ApplicationStatus, Candidate, CandidateId, Education,
    InMemoryJobBoard, Job, JobCounters, JobId, JobStatus, JobType, Resume, SalaryRange,
    StatusFilter,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) const DEMO_JOB: JobId = JobId(42);

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 2, day, hour, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

fn job(
    id: u64,
    title: &str,
    department: &str,
    salary: (u32, u32),
    job_type: JobType,
    status: JobStatus,
    created_day: u32,
) -> Job {
    Job {
        id: JobId(id),
        title: title.to_string(),
        company: "Andes Talent Partners".to_string(),
        department: department.to_string(),
        location: "Santiago, CL".to_string(),
        salary: SalaryRange {
            min: salary.0,
            max: salary.1,
        },
        job_type,
        status,
        experience: "3+ years".to_string(),
        description: format!("{title} for the {department} team."),
        counters: JobCounters::default(),
        created_at: at(created_day, 9),
    }
}

fn candidate(id: u64, name: &str, title: &str, score: Option<u32>, skills: &[&str]) -> Candidate {
    let handle = name.to_lowercase().replace(' ', ".");
    Candidate {
        id: CandidateId(id),
        name: name.to_string(),
        email: format!("{handle}@example.com"),
        phone: Some(format!("+56 9 5550 {id:04}")),
        location: Some("Santiago, CL".to_string()),
        professional_title: Some(title.to_string()),
        experience: Some(format!("{} years", 2 + id % 6)),
        skills: skills.iter().map(|skill| skill.to_string()).collect(),
        education: vec![Education {
            degree: "Ingenieria Civil Informatica".to_string(),
            school: "Universidad de Santiago".to_string(),
            year: Some(2014 + (id % 8) as u16),
            gpa: None,
        }],
        avatar: None,
        ai_analysis: score.map(|score| AiAnalysis {
            match_score: Some(score),
            strengths: vec![format!("Hands-on {}", skills.first().copied().unwrap_or("delivery"))],
            concerns: Vec::new(),
            recommendation: Some((if score >= 80 { "Interview" } else { "Hold" }).to_string()),
            resume: Some(Resume {
                cv_link: format!("https://cv.example.com/{handle}.pdf"),
            }),
        }),
    }
}

fn application(
    id: u64,
    job: u64,
    candidate: u64,
    status: ApplicationStatus,
    day: u32,
) -> Application {
    Application {
        id: ApplicationId(id),
        job_id: JobId(job),
        candidate_id: CandidateId(candidate),
        status,
        applied_at: at(day, 15),
    }
}

/// Board pre-filled with a handful of jobs, candidates and applications.
pub(crate) fn seeded_board() -> InMemoryJobBoard {
    let jobs = vec![
        job(
            42,
            "Senior Backend Engineer",
            "Engineering",
            (3_200_000, 4_500_000),
            JobType::FullTime,
            JobStatus::Active,
            3,
        ),
        job(
            7,
            "Data Analyst",
            "Business Intelligence",
            (1_800_000, 2_400_000),
            JobType::FullTime,
            JobStatus::Active,
            1,
        ),
        job(
            13,
            "Product Designer",
            "Design",
            (2_000_000, 2_900_000),
            JobType::Contract,
            JobStatus::Paused,
            5,
        ),
    ];

    let candidates = vec![
        candidate(1, "Ana Gomez", "Backend Developer", Some(70), &["Rust", "PostgreSQL"]),
        candidate(2, "Bruno Diaz", "Platform Engineer", Some(91), &["Rust", "Kubernetes"]),
        candidate(3, "Carla Anaya", "Data Engineer", Some(64), &["SQL", "Airflow"]),
        candidate(4, "Diego Santana", "Fullstack Developer", None, &["TypeScript"]),
        candidate(5, "Elena Fuentes", "UX Designer", Some(83), &["Figma", "Research"]),
        candidate(
            6,
            "Francisco Rojas",
            "Site Reliability Engineer",
            Some(77),
            &["Go", "Terraform"],
        ),
    ];

    let applications = vec![
        application(1, 42, 1, ApplicationStatus::Pending, 6),
        application(2, 42, 2, ApplicationStatus::InterviewScheduled, 6),
        application(3, 42, 6, ApplicationStatus::UnderReview, 7),
        application(4, 7, 3, ApplicationStatus::Shortlisted, 4),
        application(5, 13, 5, ApplicationStatus::Other("on_hold".to_string()), 8),
    ];

    InMemoryJobBoard::new(jobs, candidates, applications)
}

pub(crate) fn parse_status_filter(raw: &str) -> Result<StatusFilter, String> {
    let filter = StatusFilter::parse(raw);
    match &filter {
        StatusFilter::Only(ApplicationStatus::Other(code)) => Err(format!(
            "'{code}' is not a known application status (use all, pending, under_review, shortlisted, interview_scheduled or rejected)"
        )),
        _ => Ok(filter),
    }
}
