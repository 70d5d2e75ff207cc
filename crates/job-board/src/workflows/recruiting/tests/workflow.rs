use super::common::*;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::workflows::recruiting::backend::{BackendError, JobBoardBackend};
use crate::workflows::recruiting::domain::{
    ApplicationStatus, CandidateId, JobId, RejectionReason,
};
use crate::workflows::recruiting::reconciliation::{ReadModelKind, ReconciliationError};
use crate::workflows::recruiting::workflow::{
    DialogAction, DialogState, NotificationKind, RecruiterWorkflow, WorkflowError,
    MAX_COMMENT_CHARS,
};

#[tokio::test]
async fn operations_before_refresh_report_not_ready() {
    let mut workflow = RecruiterWorkflow::new(seeded_board(), JOB, &dashboard_config());

    assert!(matches!(
        workflow.view(),
        Err(ReconciliationError::NotReady(_))
    ));
    match workflow.assign(JOB, CandidateId(3)).await {
        Err(WorkflowError::NotReady(ReconciliationError::NotReady(ReadModelKind::Jobs))) => {}
        other => panic!("expected not ready, got {other:?}"),
    }
}

#[tokio::test]
async fn assign_creates_application_and_refreshes() {
    let board = seeded_board();
    let mut workflow = loaded_workflow(board.clone()).await;

    workflow.dispatch(DialogAction::OpenAssign);
    workflow.dispatch(DialogAction::SelectCandidate(CandidateId(3)));

    let application = workflow.assign_selected().await.expect("assigned");
    assert_eq!(application.job_id, JOB);
    assert_eq!(application.candidate_id, CandidateId(3));

    assert_eq!(workflow.dialog(), DialogState::Closed);
    let view = workflow.view().expect("ready");
    assert!(view
        .applicants()
        .iter()
        .any(|candidate| candidate.id == CandidateId(3)));
    assert_eq!(view.applications_for_job().len(), 3);

    let notifications = workflow.take_notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::Success);
}

#[tokio::test]
async fn assign_rejects_unknown_candidate_without_writing() {
    let board = seeded_board();
    let mut workflow = loaded_workflow(board.clone()).await;

    match workflow.assign(JOB, CandidateId(99)).await {
        Err(WorkflowError::CandidateNotFound(CandidateId(99))) => {}
        other => panic!("expected candidate not found, got {other:?}"),
    }
    match workflow.assign(JobId(500), CandidateId(3)).await {
        Err(WorkflowError::JobNotFound(JobId(500))) => {}
        other => panic!("expected job not found, got {other:?}"),
    }

    assert_eq!(board.applications().await.expect("reads").len(), 3);
    assert!(workflow.notifications().is_empty());
}

#[tokio::test]
async fn failed_assign_notifies_refreshes_and_closes_dialog() {
    let backend = Arc::new(OfflineWrites::new());
    let mut workflow = loaded_workflow(backend.clone()).await;
    let before = workflow.read_model().clone();
    let refreshes = backend.refresh_count();

    workflow.dispatch(DialogAction::OpenAssign);
    workflow.dispatch(DialogAction::SelectCandidate(CandidateId(3)));
    let err = workflow.assign_selected().await.expect_err("write fails");

    assert!(matches!(
        err,
        WorkflowError::Backend(BackendError::Unavailable(_))
    ));
    assert_eq!(workflow.dialog(), DialogState::Closed);
    assert_eq!(backend.refresh_count(), refreshes + 1);
    assert_eq!(workflow.read_model(), &before);

    let notifications = workflow.take_notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::Error);
    assert!(notifications[0].message.contains("connection reset"));

    // the same action can be retried
    workflow.dispatch(DialogAction::OpenAssign);
    workflow.dispatch(DialogAction::SelectCandidate(CandidateId(3)));
    assert!(workflow.assign_selected().await.is_err());
}

#[tokio::test]
async fn duplicate_assignment_surfaces_conflict() {
    let mut workflow = loaded_workflow(seeded_board()).await;

    let err = workflow
        .assign(JOB, CandidateId(1))
        .await
        .expect_err("candidate 1 already applied");
    assert!(matches!(err, WorkflowError::Backend(BackendError::Conflict(_))));
    assert_eq!(
        workflow.notifications()[0].kind,
        NotificationKind::Error
    );
}

#[tokio::test]
async fn assign_without_selection_is_refused() {
    let mut workflow = loaded_workflow(seeded_board()).await;
    workflow.dispatch(DialogAction::OpenAssign);

    assert!(matches!(
        workflow.assign_selected().await,
        Err(WorkflowError::NothingSelected)
    ));
}

#[tokio::test]
async fn reject_updates_status_and_clears_the_draft() {
    let board = seeded_board();
    let mut workflow = loaded_workflow(board.clone()).await;

    workflow.dispatch(DialogAction::OpenReject(CandidateId(1)));
    workflow
        .set_rejection_reason("insufficient_experience")
        .expect("catalog reason");
    workflow
        .edit_rejection_comment("Looking for more distributed systems work")
        .expect("comment fits");

    let application = workflow.submit_rejection().await.expect("rejected");
    assert_eq!(application.status, ApplicationStatus::Rejected);
    assert_eq!(workflow.dialog(), DialogState::Closed);
    assert_eq!(workflow.rejection_draft().comment(), "");
    assert_eq!(workflow.rejection_draft().reason(), None);

    let model = workflow.read_model();
    let stored = model.application(JOB, CandidateId(1)).expect("present");
    assert_eq!(stored.status, ApplicationStatus::Rejected);
    let audit = model.rejection_for(stored.id).expect("audit entry");
    assert_eq!(audit.reason(), Some(RejectionReason::InsufficientExperience));
    assert_eq!(audit.comment, "Looking for more distributed systems work");
}

#[tokio::test]
async fn reject_without_reason_keeps_dialog_open() {
    let board = seeded_board();
    let mut workflow = loaded_workflow(board.clone()).await;

    workflow.dispatch(DialogAction::OpenReject(CandidateId(1)));
    let err = workflow.submit_rejection().await.expect_err("reason missing");

    match err {
        WorkflowError::Validation(errors) => assert!(errors.contains("reason")),
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(workflow.dialog(), DialogState::Rejecting(CandidateId(1)));
    assert!(board.rejected_applications().await.expect("reads").is_empty());
}

#[tokio::test]
async fn reject_comment_limit_is_enforced_at_the_boundary() {
    let mut workflow = loaded_workflow(seeded_board()).await;

    workflow.dispatch(DialogAction::OpenReject(CandidateId(1)));
    workflow
        .edit_rejection_comment("x".repeat(MAX_COMMENT_CHARS))
        .expect("500 characters accepted");
    assert!(workflow
        .edit_rejection_comment("x".repeat(MAX_COMMENT_CHARS + 1))
        .is_err());
    assert_eq!(
        workflow.rejection_draft().comment().chars().count(),
        MAX_COMMENT_CHARS
    );

    let err = workflow
        .reject(
            JOB,
            CandidateId(1),
            Some(RejectionReason::SkillsMismatch),
            &"x".repeat(MAX_COMMENT_CHARS + 1),
        )
        .await
        .expect_err("oversize comment");
    assert!(matches!(err, WorkflowError::Validation(_)));
}

#[tokio::test]
async fn reject_requires_an_existing_application() {
    let mut workflow = loaded_workflow(seeded_board()).await;

    match workflow
        .reject(JOB, CandidateId(4), Some(RejectionReason::PositionFilled), "")
        .await
    {
        Err(WorkflowError::ApplicationNotFound { job_id, candidate_id }) => {
            assert_eq!(job_id, JOB);
            assert_eq!(candidate_id, CandidateId(4));
        }
        other => panic!("expected application not found, got {other:?}"),
    }
}

#[tokio::test]
async fn failed_reject_keeps_the_draft_for_a_retry() {
    let backend = Arc::new(OfflineWrites::new());
    let mut workflow = loaded_workflow(backend).await;

    workflow.dispatch(DialogAction::OpenReject(CandidateId(1)));
    workflow
        .set_rejection_reason("salary_expectations")
        .expect("catalog reason");
    workflow
        .edit_rejection_comment("Asked for 40% above band")
        .expect("fits");

    assert!(workflow.submit_rejection().await.is_err());
    assert_eq!(workflow.dialog(), DialogState::Closed);
    assert_eq!(
        workflow.notifications()[0].kind,
        NotificationKind::Error
    );

    workflow.dispatch(DialogAction::OpenReject(CandidateId(1)));
    assert_eq!(
        workflow.rejection_draft().comment(),
        "Asked for 40% above band"
    );

    workflow.dispatch(DialogAction::Close);
    workflow.dispatch(DialogAction::OpenReject(CandidateId(2)));
    assert_eq!(workflow.rejection_draft().comment(), "");
}

#[tokio::test]
async fn partial_refresh_keeps_previous_collections() {
    let mut workflow = RecruiterWorkflow::new(
        Arc::new(ApplicationsDown::new()),
        JOB,
        &dashboard_config(),
    );

    let err = workflow.refresh().await.expect_err("applications offline");
    assert!(matches!(err, BackendError::Unavailable(_)));
    assert!(workflow.read_model().candidates.is_some());
    assert!(workflow.read_model().applications.is_none());
    assert!(workflow.view().expect_err("not ready").is_not_ready());
}

#[tokio::test]
async fn suggestions_follow_the_debounced_query() {
    let mut workflow = loaded_workflow(seeded_board()).await;
    workflow.dispatch(DialogAction::OpenAssign);

    let everyone = workflow.suggestions().expect("ready");
    assert!(!everyone.active);
    assert_eq!(everyone.hits.len(), 2);

    let start = Instant::now();
    workflow.search("an", start);
    workflow.search("ANA", start + Duration::from_millis(100));
    assert!(workflow.is_searching());
    assert!(!workflow.poll_search(start + Duration::from_millis(350)));
    assert!(workflow.poll_search(start + Duration::from_millis(400)));
    assert!(!workflow.is_searching());

    let results = workflow.suggestions().expect("ready");
    assert!(results.active);
    let names: Vec<&str> = results
        .candidates()
        .map(|candidate| candidate.name.as_str())
        .collect();
    assert_eq!(names, vec!["Carla Anaya", "Diego Santana"]);
    assert_eq!(results.hits[0].spans, vec![6..9]);
}
