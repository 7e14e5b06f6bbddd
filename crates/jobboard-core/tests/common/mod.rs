#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use tokio::sync::Notify;

use jobboard_client::{AccessToken, ClientError, Gateway, ResumeUpload, Result};
use jobboard_types::api::{
    AuthResponse, CreateJobRequest, EmployerApplicationsQuery, JobSearchQuery, LoginRequest,
    NotificationPreference, PageQuery, RegisterEmployerRequest, RegisterJobseekerRequest,
    StatusNotification, UpdateEmployerRequest, UpdateJobRequest, UpdateJobseekerRequest,
};
use jobboard_types::{
    Application, ApplicationId, ApplicationStatus, CompanyId, EmployerId, EmployerProfile,
    ErrorCode, JobId, JobPosting, JobseekerProfile, PrincipalKind, UserId,
};

pub fn api_error(code: ErrorCode) -> ClientError {
    ClientError::Api { status: code.http_status(), code, message: code.to_string() }
}

pub fn job(id: i64, title: &str) -> JobPosting {
    JobPosting {
        id: JobId(id),
        title: title.into(),
        description: "Ship features".into(),
        requirements: "Rust".into(),
        industry: "IT".into(),
        location: "Berlin".into(),
        salary_min: 1000,
        salary_max: 2000,
        company_id: CompanyId(1),
        company_name: "Acme".into(),
        required_skills: Vec::new(),
        created_at: Utc::now(),
    }
}

pub fn jobs(ids: std::ops::RangeInclusive<i64>) -> Vec<JobPosting> {
    ids.map(|id| job(id, &format!("Job {id}"))).collect()
}

pub fn application(id: i64, job_id: i64, status: ApplicationStatus) -> Application {
    Application {
        id: ApplicationId(id),
        job_id: JobId(job_id),
        job_title: Some(format!("Job {job_id}")),
        company_name: Some("Acme".into()),
        applicant_id: UserId(7),
        applicant_name: Some("Ann".into()),
        applicant_email: Some("ann@example.com".into()),
        status,
        submitted_at: Utc::now(),
        cover_message: None,
        resume_file: Some(format!("cv_{id}.pdf")),
        notifications_enabled: false,
    }
}

pub fn jobseeker_profile() -> JobseekerProfile {
    JobseekerProfile {
        id: UserId(7),
        email: "ann@example.com".into(),
        full_name: "Ann".into(),
        location: "Berlin".into(),
        desired_industry: "IT".into(),
        desired_job_title: "Engineer".into(),
        desired_salary_min: 1000,
        desired_salary_max: 2000,
        experience: String::new(),
        skills: Vec::new(),
        skills_description: String::new(),
        telegram_id: "@ann".into(),
        created_at: Utc::now(),
    }
}

pub fn employer_profile() -> EmployerProfile {
    EmployerProfile {
        id: EmployerId(3),
        email: "boss@example.com".into(),
        full_name: "Boss".into(),
        company_id: CompanyId(1),
        company_name: "Acme".into(),
        company_industry: "IT".into(),
        company_location: "Berlin".into(),
        created_at: Utc::now(),
    }
}

#[derive(Default)]
struct FakeState {
    jobs: Vec<JobPosting>,
    applications: Vec<Application>,
    scripted_pages: HashMap<u32, Vec<JobPosting>>,
    logins: Vec<(PrincipalKind, String, String)>,
    failures: HashMap<&'static str, ErrorCode>,
    calls: HashMap<&'static str, usize>,
    tokens_seen: HashSet<String>,
    search_queries: Vec<JobSearchQuery>,
    notifications: Vec<StatusNotification>,
    preferences: Vec<NotificationPreference>,
    status_gate: Option<Arc<Notify>>,
    jobseeker: Option<JobseekerProfile>,
    employer: Option<EmployerProfile>,
}

/// In-memory [`Gateway`] with scripted data, injectable failures and call
/// counters.
#[derive(Clone, Default)]
pub struct FakeGateway {
    state: Arc<Mutex<FakeState>>,
    token: Option<AccessToken>,
}

fn page_of<T: Clone>(items: &[T], page: PageQuery) -> Vec<T> {
    items.iter().skip(page.offset()).take(page.limit()).cloned().collect()
}

impl FakeGateway {
    pub fn new() -> Self {
        let fake = Self::default();
        {
            let mut state = fake.state();
            state.jobseeker = Some(jobseeker_profile());
            state.employer = Some(employer_profile());
        }
        fake
    }

    fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    /// Count the call and return the injected failure, if any.
    fn enter(&self, op: &'static str) -> Result<()> {
        let mut state = self.state();
        *state.calls.entry(op).or_default() += 1;
        if let Some(token) = &self.token {
            state.tokens_seen.insert(token.as_str().to_string());
        }
        match state.failures.get(op) {
            Some(code) => Err(api_error(*code)),
            None => Ok(()),
        }
    }

    fn authed(&self, op: &'static str) -> Result<()> {
        self.enter(op)?;
        if self.token.is_none() {
            return Err(ClientError::NotAuthenticated);
        }
        Ok(())
    }

    pub fn with_jobs(self, jobs: Vec<JobPosting>) -> Self {
        self.state().jobs = jobs;
        self
    }

    pub fn push_application(&self, application: Application) {
        self.state().applications.push(application);
    }

    /// Serve exactly `items` for `page` of the job search.
    pub fn script_page(&self, page: u32, items: Vec<JobPosting>) {
        self.state().scripted_pages.insert(page, items);
    }

    pub fn accept_login(&self, kind: PrincipalKind, email: &str, password: &str) {
        self.state().logins.push((kind, email.into(), password.into()));
    }

    pub fn fail(&self, op: &'static str, code: ErrorCode) {
        self.state().failures.insert(op, code);
    }

    pub fn recover(&self, op: &'static str) {
        self.state().failures.remove(op);
    }

    pub fn calls(&self, op: &str) -> usize {
        self.state().calls.get(op).copied().unwrap_or(0)
    }

    pub fn saw_token(&self, token: &str) -> bool {
        self.state().tokens_seen.contains(token)
    }

    pub fn last_search(&self) -> Option<JobSearchQuery> {
        self.state().search_queries.last().cloned()
    }

    pub fn notifications(&self) -> Vec<StatusNotification> {
        self.state().notifications.clone()
    }

    pub fn preferences(&self) -> Vec<NotificationPreference> {
        self.state().preferences.clone()
    }

    pub fn application_status(&self, id: i64) -> Option<ApplicationStatus> {
        self.state()
            .applications
            .iter()
            .find(|a| a.id == ApplicationId(id))
            .map(|a| a.status)
    }

    /// Status updates wait for a permit on the returned gate before landing.
    pub fn gate_status_updates(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.state().status_gate = Some(gate.clone());
        gate
    }
}

impl Gateway for FakeGateway {
    fn with_token(&self, token: Option<AccessToken>) -> Self {
        Self { state: self.state.clone(), token }
    }

    fn resume_url(&self, application_id: ApplicationId) -> String {
        format!("http://files.test/assets/cvs/cv_{application_id}.pdf")
    }

    async fn login(&self, kind: PrincipalKind, request: &LoginRequest) -> Result<AuthResponse> {
        self.enter("login")?;
        let state = self.state();
        let known = state
            .logins
            .iter()
            .any(|(k, e, p)| *k == kind && *e == request.email && *p == request.password);
        if !known {
            return Err(api_error(ErrorCode::InvalidCredentials));
        }
        Ok(AuthResponse {
            access_token: format!("{kind}-token"),
            user: (kind == PrincipalKind::Jobseeker).then(|| state.jobseeker.clone()).flatten(),
            employer: (kind == PrincipalKind::Employer).then(|| state.employer.clone()).flatten(),
        })
    }

    async fn register_jobseeker(&self, request: &RegisterJobseekerRequest) -> Result<AuthResponse> {
        self.enter("register_jobseeker")?;
        self.accept_login(PrincipalKind::Jobseeker, &request.email, &request.password);
        Ok(AuthResponse { access_token: "new".into(), user: None, employer: None })
    }

    async fn register_employer(&self, request: &RegisterEmployerRequest) -> Result<AuthResponse> {
        self.enter("register_employer")?;
        self.accept_login(PrincipalKind::Employer, &request.email, &request.password);
        Ok(AuthResponse { access_token: "new".into(), user: None, employer: None })
    }

    async fn search_jobs(&self, query: &JobSearchQuery) -> Result<Vec<JobPosting>> {
        self.enter("search_jobs")?;
        let mut state = self.state();
        state.search_queries.push(query.clone());
        if let Some(items) = state.scripted_pages.get(&query.page) {
            return Ok(items.clone());
        }
        Ok(page_of(&state.jobs, query.page()))
    }

    async fn get_job(&self, id: JobId) -> Result<JobPosting> {
        self.enter("get_job")?;
        self.state()
            .jobs
            .iter()
            .find(|j| j.id == id)
            .cloned()
            .ok_or_else(|| api_error(ErrorCode::NotFound))
    }

    async fn create_job(&self, request: &CreateJobRequest) -> Result<JobPosting> {
        self.authed("create_job")?;
        let mut state = self.state();
        let id = state.jobs.iter().map(|j| j.id.0).max().unwrap_or(0) + 1;
        let mut created = job(id, &request.title);
        created.salary_min = request.salary_min;
        created.salary_max = request.salary_max;
        state.jobs.push(created.clone());
        Ok(created)
    }

    async fn update_job(&self, id: JobId, request: &UpdateJobRequest) -> Result<JobPosting> {
        self.authed("update_job")?;
        let mut state = self.state();
        if state.applications.iter().any(|a| a.job_id == id) {
            return Err(api_error(ErrorCode::JobHasApplications));
        }
        let job = state
            .jobs
            .iter_mut()
            .find(|j| j.id == id)
            .ok_or_else(|| api_error(ErrorCode::NotFound))?;
        if let Some(title) = &request.title {
            job.title = title.clone();
        }
        if let Some(location) = &request.location {
            job.location = location.clone();
        }
        if let Some(min) = request.salary_min {
            job.salary_min = min;
        }
        if let Some(max) = request.salary_max {
            job.salary_max = max;
        }
        Ok(job.clone())
    }

    async fn delete_job(&self, id: JobId) -> Result<()> {
        self.authed("delete_job")?;
        let mut state = self.state();
        if state.applications.iter().any(|a| a.job_id == id) {
            return Err(api_error(ErrorCode::JobHasApplications));
        }
        state.jobs.retain(|j| j.id != id);
        Ok(())
    }

    async fn my_jobs(&self, page: PageQuery) -> Result<Vec<JobPosting>> {
        self.authed("my_jobs")?;
        Ok(page_of(&self.state().jobs, page))
    }

    async fn apply(&self, job_id: JobId, message: &str, _resume: ResumeUpload) -> Result<Application> {
        self.authed("apply")?;
        let mut state = self.state();
        let id = state.applications.iter().map(|a| a.id.0).max().unwrap_or(0) + 1;
        let mut created = application(id, job_id.0, ApplicationStatus::Applied);
        created.cover_message = Some(message.to_string());
        state.applications.push(created.clone());
        Ok(created)
    }

    async fn my_applications(&self, page: PageQuery) -> Result<Vec<Application>> {
        self.authed("my_applications")?;
        Ok(page_of(&self.state().applications, page))
    }

    async fn get_application(&self, id: ApplicationId) -> Result<Application> {
        self.authed("get_application")?;
        self.state()
            .applications
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| api_error(ErrorCode::NotFound))
    }

    async fn delete_application(&self, id: ApplicationId) -> Result<()> {
        self.authed("delete_application")?;
        self.state().applications.retain(|a| a.id != id);
        Ok(())
    }

    async fn job_applications(&self, query: EmployerApplicationsQuery) -> Result<Vec<Application>> {
        self.authed("job_applications")?;
        let state = self.state();
        let matching: Vec<Application> = state
            .applications
            .iter()
            .filter(|a| a.job_id == query.job_id)
            .cloned()
            .collect();
        Ok(page_of(&matching, query.page()))
    }

    async fn update_application_status(&self, id: ApplicationId, status: ApplicationStatus) -> Result<()> {
        self.authed("update_application_status")?;
        let gate = self.state().status_gate.clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        let mut state = self.state();
        let application = state
            .applications
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| api_error(ErrorCode::NotFound))?;
        application.status = status;
        Ok(())
    }

    async fn notify_status_change(&self, notification: StatusNotification) -> Result<()> {
        self.authed("notify_status_change")?;
        self.state().notifications.push(notification);
        Ok(())
    }

    async fn set_notification_preference(&self, preference: NotificationPreference) -> Result<()> {
        self.authed("set_notification_preference")?;
        let mut state = self.state();
        if let Some(a) = state.applications.iter_mut().find(|a| a.id == preference.application_id) {
            a.notifications_enabled = preference.enabled;
        }
        state.preferences.push(preference);
        Ok(())
    }

    async fn jobseeker_profile(&self) -> Result<JobseekerProfile> {
        self.authed("jobseeker_profile")?;
        self.state().jobseeker.clone().ok_or_else(|| api_error(ErrorCode::NotFound))
    }

    async fn update_jobseeker_profile(&self, request: &UpdateJobseekerRequest) -> Result<JobseekerProfile> {
        self.authed("update_jobseeker_profile")?;
        let mut state = self.state();
        let profile = state.jobseeker.as_mut().ok_or_else(|| api_error(ErrorCode::NotFound))?;
        if let Some(name) = &request.full_name {
            profile.full_name = name.clone();
        }
        if let Some(location) = &request.location {
            profile.location = location.clone();
        }
        Ok(profile.clone())
    }

    async fn employer_profile(&self) -> Result<EmployerProfile> {
        self.authed("employer_profile")?;
        self.state().employer.clone().ok_or_else(|| api_error(ErrorCode::NotFound))
    }

    async fn update_employer_profile(&self, request: &UpdateEmployerRequest) -> Result<EmployerProfile> {
        self.authed("update_employer_profile")?;
        let mut state = self.state();
        let profile = state.employer.as_mut().ok_or_else(|| api_error(ErrorCode::NotFound))?;
        if let Some(name) = &request.company_name {
            profile.company_name = name.clone();
        }
        Ok(profile.clone())
    }
}
