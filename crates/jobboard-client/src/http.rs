use std::sync::Arc;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, header};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use jobboard_types::api::{
    APPLY_FIELD_JOB_ID, APPLY_FIELD_MESSAGE, APPLY_FIELD_RESUME, AuthResponse, CreateJobRequest,
    EmployerApplicationsQuery, JobSearchQuery, LoginRequest, NotificationPreference, PageQuery,
    RegisterEmployerRequest, RegisterJobseekerRequest, StatusNotification, UpdateEmployerRequest,
    UpdateJobRequest, UpdateJobseekerRequest, UpdateStatusRequest,
};
use jobboard_types::{
    Application, ApplicationId, ApplicationStatus, EmployerProfile, JobId, JobPosting,
    JobseekerProfile, PrincipalKind,
};

use crate::auth::AccessToken;
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::gateway::{Gateway, ResumeUpload};

/// [`Gateway`] over HTTP. Clones share the connection pool.
#[derive(Clone)]
pub struct HttpGateway {
    http: Client,
    config: Arc<ClientConfig>,
    token: Option<AccessToken>,
}

impl HttpGateway {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            config: Arc::new(config),
            token: None,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.config.api_base_url, path);
        debug!(%method, %url, "api request");
        self.http.request(method, url)
    }

    fn authorized(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let token = self.token.as_ref().ok_or(ClientError::NotAuthenticated)?;
        Ok(self
            .request(method, path)
            .header(header::AUTHORIZATION, token.header_value()))
    }

    async fn send_raw(&self, builder: RequestBuilder) -> Result<bytes::Bytes> {
        let resp = builder.send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;
        if !status.is_success() {
            let err = ClientError::from_response(status.as_u16(), &body);
            warn!(status = status.as_u16(), error = %err, "api request failed");
            return Err(err);
        }
        Ok(body)
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let body = self.send_raw(builder).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn send_empty(&self, builder: RequestBuilder) -> Result<()> {
        self.send_raw(builder).await.map(|_| ())
    }
}

impl Gateway for HttpGateway {
    fn with_token(&self, token: Option<AccessToken>) -> Self {
        Self {
            http: self.http.clone(),
            config: self.config.clone(),
            token,
        }
    }

    fn resume_url(&self, application_id: ApplicationId) -> String {
        self.config.resume_url(application_id)
    }

    async fn login(&self, kind: PrincipalKind, request: &LoginRequest) -> Result<AuthResponse> {
        let path = match kind {
            PrincipalKind::Jobseeker => "/users/login",
            PrincipalKind::Employer => "/employers/login",
        };
        self.send_json(self.request(Method::POST, path).json(request)).await
    }

    async fn register_jobseeker(&self, request: &RegisterJobseekerRequest) -> Result<AuthResponse> {
        self.send_json(self.request(Method::POST, "/users").json(request)).await
    }

    async fn register_employer(&self, request: &RegisterEmployerRequest) -> Result<AuthResponse> {
        self.send_json(self.request(Method::POST, "/employers").json(request)).await
    }

    async fn search_jobs(&self, query: &JobSearchQuery) -> Result<Vec<JobPosting>> {
        // Job search is public, but a signed-in session still sends its token.
        let builder = match self.token {
            Some(_) => self.authorized(Method::GET, "/jobs")?,
            None => self.request(Method::GET, "/jobs"),
        };
        self.send_json(builder.query(query)).await
    }

    async fn get_job(&self, id: JobId) -> Result<JobPosting> {
        self.send_json(self.request(Method::GET, &format!("/jobs/{id}"))).await
    }

    async fn create_job(&self, request: &CreateJobRequest) -> Result<JobPosting> {
        self.send_json(self.authorized(Method::POST, "/jobs")?.json(request)).await
    }

    async fn update_job(&self, id: JobId, request: &UpdateJobRequest) -> Result<JobPosting> {
        let builder = self.authorized(Method::PATCH, &format!("/jobs/{id}"))?;
        self.send_json(builder.json(request)).await
    }

    async fn delete_job(&self, id: JobId) -> Result<()> {
        self.send_empty(self.authorized(Method::DELETE, &format!("/jobs/{id}"))?).await
    }

    async fn my_jobs(&self, page: PageQuery) -> Result<Vec<JobPosting>> {
        self.send_json(self.authorized(Method::GET, "/jobs/employer")?.query(&page)).await
    }

    async fn apply(&self, job_id: JobId, message: &str, resume: ResumeUpload) -> Result<Application> {
        let part = Part::bytes(resume.data.to_vec())
            .file_name(resume.file_name)
            .mime_str(&resume.content_type)?;
        let form = Form::new()
            .text(APPLY_FIELD_JOB_ID, job_id.to_string())
            .text(APPLY_FIELD_MESSAGE, message.to_string())
            .part(APPLY_FIELD_RESUME, part);
        let builder = self.authorized(Method::POST, "/job-applications")?;
        self.send_json(builder.multipart(form)).await
    }

    async fn my_applications(&self, page: PageQuery) -> Result<Vec<Application>> {
        let builder = self.authorized(Method::GET, "/job-applications/user")?;
        self.send_json(builder.query(&page)).await
    }

    async fn get_application(&self, id: ApplicationId) -> Result<Application> {
        let builder = self.authorized(Method::GET, &format!("/job-applications/user/{id}"))?;
        self.send_json(builder).await
    }

    async fn delete_application(&self, id: ApplicationId) -> Result<()> {
        let builder = self.authorized(Method::DELETE, &format!("/job-applications/user/{id}"))?;
        self.send_empty(builder).await
    }

    async fn job_applications(&self, query: EmployerApplicationsQuery) -> Result<Vec<Application>> {
        let builder = self.authorized(Method::GET, "/job-applications/employer")?;
        self.send_json(builder.query(&query)).await
    }

    async fn update_application_status(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
    ) -> Result<()> {
        let path = format!("/job-applications/employer/{id}/status");
        let body = UpdateStatusRequest { new_status: status };
        self.send_empty(self.authorized(Method::PATCH, &path)?.json(&body)).await
    }

    async fn notify_status_change(&self, notification: StatusNotification) -> Result<()> {
        let builder = self.authorized(Method::POST, "/job-applications/notification")?;
        self.send_empty(builder.json(&notification)).await
    }

    async fn set_notification_preference(&self, preference: NotificationPreference) -> Result<()> {
        let builder = self.authorized(Method::POST, "/job-applications/user/notifications")?;
        self.send_empty(builder.json(&preference)).await
    }

    async fn jobseeker_profile(&self) -> Result<JobseekerProfile> {
        self.send_json(self.authorized(Method::GET, "/users")?).await
    }

    async fn update_jobseeker_profile(&self, request: &UpdateJobseekerRequest) -> Result<JobseekerProfile> {
        self.send_json(self.authorized(Method::PATCH, "/users")?.json(request)).await
    }

    async fn employer_profile(&self) -> Result<EmployerProfile> {
        self.send_json(self.authorized(Method::GET, "/employers")?).await
    }

    async fn update_employer_profile(&self, request: &UpdateEmployerRequest) -> Result<EmployerProfile> {
        self.send_json(self.authorized(Method::PATCH, "/employers")?.json(request)).await
    }
}
