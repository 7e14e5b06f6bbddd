use jobboard_client::{AccessToken, ClientConfig, ClientError, Gateway, HttpGateway, ResumeUpload};
use jobboard_types::api::{
    CreateJobRequest, EmployerApplicationsQuery, JobSearchQuery, LoginRequest, PageQuery, RegisterEmployerRequest,
    RegisterJobseekerRequest,
};
use jobboard_types::{ApplicationStatus, ErrorCode, PrincipalKind};

/// Serve the dev API on an ephemeral port and return a gateway pointed at it.
async fn spawn_server() -> HttpGateway {
    let app = jobboard_api::router(jobboard_api::AppStateInner::new("gateway-test-secret"));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = ClientConfig::default()
        .with_api_base(format!("http://{addr}/api/v1"))
        .with_asset_base(format!("http://{addr}"));
    HttpGateway::new(config).unwrap()
}

fn employer() -> RegisterEmployerRequest {
    RegisterEmployerRequest {
        email: "hr@acme.test".into(),
        password: "hunter22".into(),
        full_name: "Ann Hiring".into(),
        company_name: "Acme".into(),
        company_industry: "IT".into(),
        company_location: "Berlin".into(),
    }
}

fn jobseeker() -> RegisterJobseekerRequest {
    RegisterJobseekerRequest {
        email: "sam@mail.test".into(),
        password: "hunter22".into(),
        full_name: "Sam Seeker".into(),
        location: "Berlin".into(),
        desired_industry: "IT".into(),
        desired_job_title: "Engineer".into(),
        desired_salary_min: 100,
        desired_salary_max: 300,
        telegram_id: "@sam".into(),
        ..Default::default()
    }
}

fn job(title: &str) -> CreateJobRequest {
    CreateJobRequest {
        title: title.into(),
        description: "Build services".into(),
        requirements: "Rust".into(),
        industry: "IT".into(),
        location: "Berlin".into(),
        salary_min: 100,
        salary_max: 200,
        required_skills: vec!["tokio".into()],
    }
}

async fn login(gateway: &HttpGateway, kind: PrincipalKind, email: &str) -> HttpGateway {
    let request = LoginRequest { email: email.into(), password: "hunter22".into() };
    let response = gateway.login(kind, &request).await.unwrap();
    gateway.with_token(Some(AccessToken::new(response.access_token)))
}

#[tokio::test]
async fn login_returns_the_principal() {
    let gateway = spawn_server().await;
    gateway.register_employer(&employer()).await.unwrap();

    let request = LoginRequest { email: "hr@acme.test".into(), password: "hunter22".into() };
    let response = gateway.login(PrincipalKind::Employer, &request).await.unwrap();
    assert!(!response.access_token.is_empty());
    assert_eq!(response.employer.map(|e| e.company_name), Some("Acme".to_string()));
    assert!(response.user.is_none());

    let bad = LoginRequest { password: "wrong-one".into(), ..request };
    let err = gateway.login(PrincipalKind::Employer, &bad).await.unwrap_err();
    assert!(err.is(ErrorCode::InvalidCredentials), "{err}");
}

#[tokio::test]
async fn protected_calls_need_a_token() {
    let gateway = spawn_server().await;
    let err = gateway.my_jobs(PageQuery::default()).await.unwrap_err();
    assert!(matches!(err, ClientError::NotAuthenticated));

    let forged = gateway.with_token(Some(AccessToken::new("not-a-jwt")));
    let err = forged.my_jobs(PageQuery::default()).await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 401, code: ErrorCode::Unauthorized, .. }));
}

#[tokio::test]
async fn search_pages_through_postings() {
    let gateway = spawn_server().await;
    gateway.register_employer(&employer()).await.unwrap();
    let hr = login(&gateway, PrincipalKind::Employer, "hr@acme.test").await;
    for n in 0..12 {
        hr.create_job(&job(&format!("Rust engineer {n}"))).await.unwrap();
    }

    let mut query = JobSearchQuery { page: 1, page_size: 10, title: Some("rust".into()), ..Default::default() };
    let first = gateway.search_jobs(&query).await.unwrap();
    assert_eq!(first.len(), 10);
    query.page = 2;
    let second = gateway.search_jobs(&query).await.unwrap();
    assert_eq!(second.len(), 2);
    assert!(first.iter().all(|a| second.iter().all(|b| a.id != b.id)));

    let mine = hr.my_jobs(PageQuery::new(2, 10)).await.unwrap();
    assert_eq!(mine.len(), 2);
}

#[tokio::test]
async fn apply_status_and_job_guard_round_trip() {
    let gateway = spawn_server().await;
    gateway.register_employer(&employer()).await.unwrap();
    gateway.register_jobseeker(&jobseeker()).await.unwrap();
    let hr = login(&gateway, PrincipalKind::Employer, "hr@acme.test").await;
    let sam = login(&gateway, PrincipalKind::Jobseeker, "sam@mail.test").await;

    let posting = hr.create_job(&job("Backend")).await.unwrap();
    let resume = ResumeUpload::pdf("cv.pdf", b"%PDF-1.4 test".to_vec());
    let application = sam.apply(posting.id, "Hello", resume.clone()).await.unwrap();
    assert_eq!(application.status, ApplicationStatus::Applied);

    let err = sam.apply(posting.id, "Again", resume).await.unwrap_err();
    assert!(err.is(ErrorCode::AlreadyApplied), "{err}");

    let err = hr.delete_job(posting.id).await.unwrap_err();
    assert!(err.is(ErrorCode::JobHasApplications), "{err}");

    let received = hr
        .job_applications(EmployerApplicationsQuery { job_id: posting.id, page: 1, page_size: 10 })
        .await
        .unwrap();
    assert_eq!(received.len(), 1);

    hr.update_application_status(application.id, ApplicationStatus::Interviewing)
        .await
        .unwrap();
    let seen = sam.get_application(application.id).await.unwrap();
    assert_eq!(seen.status, ApplicationStatus::Interviewing);

    assert!(hr.resume_url(application.id).ends_with(&format!("/assets/cvs/cv_{}.pdf", application.id)));
}
