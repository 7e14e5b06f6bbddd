mod common;

use common::{FakeGateway, application, job};
use jobboard_client::{AccessToken, Gateway};
use jobboard_core::screens::EmployerApplicationsScreen;
use jobboard_core::{Principal, Session, SessionAction, SkipReason, StatusTransitions, TransitionOutcome};
use jobboard_types::{ApplicationId, ApplicationStatus, ErrorCode, JobId, PrincipalKind, StatusAction, Tone};

fn employer_session() -> Session {
    Session::Anonymous.reduce(SessionAction::LoggedIn {
        token: AccessToken::new("employer-token"),
        principal: Principal::unloaded(PrincipalKind::Employer),
    })
}

fn authed(gateway: &FakeGateway) -> FakeGateway {
    gateway.with_token(Some(AccessToken::new("employer-token")))
}

#[tokio::test]
async fn action_on_current_status_sends_nothing() {
    let gateway = FakeGateway::new();
    gateway.push_application(application(1, 9, ApplicationStatus::Interviewing));
    let transitions = StatusTransitions::new(authed(&gateway));

    let outcome = transitions
        .transition(ApplicationId(1), ApplicationStatus::Interviewing, StatusAction::MoveToInterviewing)
        .await
        .unwrap();
    assert_eq!(outcome, TransitionOutcome::Skipped(SkipReason::AlreadyInState));
    assert_eq!(gateway.calls("update_application_status"), 0);
}

#[tokio::test]
async fn second_transition_is_skipped_while_the_first_runs() {
    let gateway = FakeGateway::new();
    gateway.push_application(application(1, 9, ApplicationStatus::Applied));
    let gate = gateway.gate_status_updates();
    let transitions = StatusTransitions::new(authed(&gateway));
    let id = ApplicationId(1);

    let (first, second) = tokio::join!(
        transitions.transition(id, ApplicationStatus::Applied, StatusAction::MoveToInterviewing),
        async {
            let outcome = transitions.transition(id, ApplicationStatus::Applied, StatusAction::Reject).await;
            assert!(transitions.in_flight().contains(id));
            assert!(transitions.action_states(id, ApplicationStatus::Applied).iter().all(|s| !s.enabled));
            gate.notify_one();
            outcome
        },
    );

    assert_eq!(
        first.unwrap(),
        TransitionOutcome::Committed { status: ApplicationStatus::Interviewing, notified: true }
    );
    assert_eq!(second.unwrap(), TransitionOutcome::Skipped(SkipReason::InFlight));
    assert_eq!(gateway.calls("update_application_status"), 1);
    assert!(!transitions.in_flight().contains(id));
    assert_eq!(gateway.application_status(1), Some(ApplicationStatus::Interviewing));
}

#[tokio::test]
async fn failed_update_releases_the_application() {
    let gateway = FakeGateway::new();
    gateway.push_application(application(1, 9, ApplicationStatus::Applied));
    gateway.fail("update_application_status", ErrorCode::Internal);
    let transitions = StatusTransitions::new(authed(&gateway));
    let id = ApplicationId(1);

    let err = transitions
        .transition(id, ApplicationStatus::Applied, StatusAction::MakeOffer)
        .await
        .unwrap_err();
    assert!(err.is(ErrorCode::Internal));
    assert!(!transitions.in_flight().contains(id));
    assert_eq!(gateway.calls("notify_status_change"), 0);
}

#[tokio::test]
async fn reject_sticks_even_when_notification_fails() {
    let gateway = FakeGateway::new().with_jobs(vec![job(9, "Rust developer")]);
    gateway.push_application(application(1, 9, ApplicationStatus::Seen));
    gateway.push_application(application(2, 9, ApplicationStatus::Applied));
    gateway.fail("notify_status_change", ErrorCode::Internal);

    let mut screen = EmployerApplicationsScreen::open(&employer_session(), &gateway, JobId(9)).unwrap();
    screen.mount().await;
    assert_eq!(screen.job().map(|j| j.title.as_str()), Some("Rust developer"));
    let fetches = gateway.calls("job_applications");

    let outcome = screen.apply_action(ApplicationId(1), StatusAction::Reject).await;
    assert_eq!(
        outcome,
        Some(TransitionOutcome::Committed { status: ApplicationStatus::Rejected, notified: false })
    );
    assert_eq!(gateway.calls("notify_status_change"), 1);
    assert_eq!(gateway.calls("job_applications"), fetches + 1);

    let rows = screen.rows();
    let rejected = rows.iter().find(|r| r.application.id == ApplicationId(1)).unwrap();
    assert_eq!(rejected.application.status, ApplicationStatus::Rejected);
    assert_eq!(rejected.badge.label, "rejected");
    assert_eq!(rejected.badge.tone, Tone::Error);
    assert_eq!(rejected.resume_url, "http://files.test/assets/cvs/cv_1.pdf");
    let reject = rejected.actions.iter().find(|a| a.action == StatusAction::Reject).unwrap();
    assert!(!reject.enabled);
    assert_eq!(screen.notice(), None);
}

#[tokio::test]
async fn committed_change_notifies_the_applicant() {
    let gateway = FakeGateway::new().with_jobs(vec![job(9, "Rust developer")]);
    gateway.push_application(application(1, 9, ApplicationStatus::Interviewing));
    let mut screen = EmployerApplicationsScreen::open(&employer_session(), &gateway, JobId(9)).unwrap();
    screen.mount().await;

    screen.apply_action(ApplicationId(1), StatusAction::MakeOffer).await;
    let sent = gateway.notifications();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].application_id, ApplicationId(1));
    assert_eq!(sent[0].status, ApplicationStatus::Offered);
}
