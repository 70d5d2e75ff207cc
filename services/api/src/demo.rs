use crate::infra::{parse_status_filter, seeded_board, DEMO_JOB};
use crate::routes::{build_applicant_report, load_read_model, ApplicantReport};
use clap::Args;
use job_board::config::DashboardConfig;
use job_board::error::AppError;
use job_board::workflows::recruiting::{
    list_jobs, overview, CandidateId, DialogAction, JobId, JobQuery, JobSort, MatchBand,
    Notification, NotificationKind, RecruiterWorkflow, RejectionReason, SearchResults,
    StatusFilter,
};
use std::ops::Range;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Args, Debug)]
pub(crate) struct ApplicantsArgs {
    /// Job to report on
    #[arg(long, default_value_t = DEMO_JOB.0)]
    pub(crate) job: u64,
    /// Only list applications in this status (all, pending, under_review, ...)
    #[arg(long, default_value = "all", value_parser = parse_status_filter)]
    pub(crate) status: StatusFilter,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Job whose applications are reviewed
    #[arg(long, default_value_t = DEMO_JOB.0)]
    pub(crate) job: u64,
    /// Typeahead query used to find a candidate to assign
    #[arg(long, default_value = "an")]
    pub(crate) query: String,
    /// Quiet period for the typeahead, in milliseconds
    #[arg(long, default_value_t = 300)]
    pub(crate) debounce_ms: u64,
    /// Stop after the read-only part of the walkthrough
    #[arg(long)]
    pub(crate) skip_writes: bool,
}

impl Default for DemoArgs {
    fn default() -> Self {
        Self {
            job: DEMO_JOB.0,
            query: "an".to_string(),
            debounce_ms: 300,
            skip_writes: false,
        }
    }
}

pub(crate) async fn run_applicants_report(args: ApplicantsArgs) -> Result<(), AppError> {
    let board = seeded_board();
    let model = load_read_model(&board).await?;
    let report = build_applicant_report(&model, JobId(args.job), &args.status)?;
    render_applicant_report(&report);
    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        job,
        query,
        debounce_ms,
        skip_writes,
    } = args;
    let job_id = JobId(job);
    let board = Arc::new(seeded_board());
    let config = DashboardConfig {
        search_debounce: Duration::from_millis(debounce_ms),
    };

    println!("Job board demo");
    let model = load_read_model(board.as_ref()).await?;
    if let (Some(jobs), Some(applications)) = (model.jobs.as_deref(), model.applications.as_deref())
    {
        let totals = overview(jobs, applications);
        println!(
            "- {} jobs ({} active) | {} applicants overall",
            totals.total_jobs, totals.active_jobs, totals.total_applicants
        );
        let query = JobQuery {
            sort: JobSort::MostApplicants,
            ..JobQuery::default()
        };
        for row in list_jobs(jobs, applications, &query) {
            println!(
                "  - {} {} [{}] {} applicants",
                row.job.id,
                row.job.title,
                row.job.status.badge().label,
                row.applicants
            );
        }
    }

    let mut workflow = RecruiterWorkflow::new(board, job_id, &config);
    workflow.refresh().await?;

    let report = build_applicant_report(workflow.read_model(), job_id, &StatusFilter::All)?;
    println!();
    render_applicant_report(&report);

    workflow.dispatch(DialogAction::OpenAssign);
    workflow.search(query.as_str(), Instant::now());
    workflow.settle_search().await;
    let pick = {
        let results = workflow.suggestions()?;
        println!("\nTypeahead '{query}' over candidates not yet applied:");
        render_suggestions(&results);
        let first = results.candidates().next().map(|candidate| candidate.id);
        first
    };

    if skip_writes {
        workflow.dispatch(DialogAction::Close);
        return Ok(());
    }

    let Some(candidate_id) = pick else {
        println!("No candidate matched '{query}'; nothing to assign.");
        workflow.dispatch(DialogAction::Close);
        return Ok(());
    };

    workflow.dispatch(DialogAction::SelectCandidate(candidate_id));
    if workflow.assign_selected().await.is_ok() {
        reject_demo_candidate(&mut workflow, candidate_id).await;
    }
    render_notifications(&workflow.take_notifications());

    let report = build_applicant_report(workflow.read_model(), job_id, &StatusFilter::All)?;
    println!();
    render_applicant_report(&report);
    Ok(())
}

async fn reject_demo_candidate<B>(workflow: &mut RecruiterWorkflow<B>, candidate_id: CandidateId)
where
    B: job_board::workflows::recruiting::JobBoardBackend + 'static,
{
    workflow.dispatch(DialogAction::OpenReject(candidate_id));
    if let Err(err) = workflow.set_rejection_reason(RejectionReason::PositionFilled.code()) {
        println!("Could not prepare the rejection: {err}");
        workflow.dispatch(DialogAction::Close);
        return;
    }
    if let Err(err) = workflow.edit_rejection_comment("Role filled by an internal transfer.") {
        println!("Could not prepare the rejection: {err}");
        workflow.dispatch(DialogAction::Close);
        return;
    }
    // Failures are already reported through the workflow notifications.
    let _ = workflow.submit_rejection().await;
}

pub(crate) fn render_applicant_report(report: &ApplicantReport) {
    println!(
        "{} {} [{}]",
        report.job_id, report.title, report.job_status.label
    );
    let stats = &report.stats;
    println!(
        "- {} applications | {} pending | {} under review | {} shortlisted | {} interviews | {} rejected",
        stats.total,
        stats.pending,
        stats.under_review,
        stats.shortlisted,
        stats.interview_scheduled,
        stats.rejected
    );
    println!(
        "- average match score {} ({})",
        stats.average_match_score,
        band_label(MatchBand::for_score(stats.average_match_score))
    );
    println!("- {} candidates available to assign", report.available_candidates);

    if report.applicants.is_empty() {
        println!("  (no applications match the filter)");
    }
    for entry in &report.applicants {
        println!(
            "  - {:<20} {:<20} ({}) match {:>3} {}",
            entry.name,
            entry.badge.label,
            entry.badge.color.as_str(),
            entry.match_score,
            band_label(entry.match_band)
        );
    }
}

fn render_suggestions(results: &SearchResults<'_>) {
    if results.is_empty() {
        println!("  (no matches)");
    }
    for hit in &results.hits {
        println!(
            "  - {} <{}> match {}",
            highlight(&hit.candidate.name, &hit.spans),
            hit.candidate.email,
            hit.candidate.match_score()
        );
    }
}

fn render_notifications(notifications: &[Notification]) {
    println!("\nNotifications:");
    for notification in notifications {
        let marker = match notification.kind {
            NotificationKind::Success => "ok",
            NotificationKind::Error => "error",
        };
        println!("  [{marker}] {}", notification.message);
    }
}

fn band_label(band: MatchBand) -> &'static str {
    match band {
        MatchBand::Excellent => "excellent",
        MatchBand::Strong => "strong",
        MatchBand::Fair => "fair",
        MatchBand::Weak => "weak",
    }
}

/// Wrap highlighted byte ranges of `text` in brackets.
pub(crate) fn highlight(text: &str, spans: &[Range<usize>]) -> String {
    let mut out = String::with_capacity(text.len() + spans.len() * 2);
    let mut cursor = 0;
    for span in spans {
        let (Some(before), Some(matched)) = (text.get(cursor..span.start), text.get(span.clone()))
        else {
            continue;
        };
        out.push_str(before);
        out.push('[');
        out.push_str(matched);
        out.push(']');
        cursor = span.end;
    }
    out.push_str(text.get(cursor..).unwrap_or_default());
    out
}
