use std::future::Future;

use bytes::Bytes;
use jobboard_types::api::{
    AuthResponse, CreateJobRequest, EmployerApplicationsQuery, JobSearchQuery, LoginRequest,
    NotificationPreference, PageQuery, RegisterEmployerRequest, RegisterJobseekerRequest,
    StatusNotification, UpdateEmployerRequest, UpdateJobRequest, UpdateJobseekerRequest,
};
use jobboard_types::{
    Application, ApplicationId, ApplicationStatus, EmployerProfile, JobId, JobPosting,
    JobseekerProfile, PrincipalKind,
};

use crate::auth::AccessToken;
use crate::error::Result;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// A resume file picked for upload.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl ResumeUpload {
    pub fn pdf(file_name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: PDF_CONTENT_TYPE.into(),
            data: data.into(),
        }
    }

    pub fn is_pdf(&self) -> bool {
        self.content_type.eq_ignore_ascii_case(PDF_CONTENT_TYPE)
    }
}

/// Every call the client makes against the REST collaborator.
///
/// Implementations are cheap to clone and carry the bearer token of the
/// session they were built for (see [`Gateway::with_token`]).
pub trait Gateway: Clone + Send + Sync + 'static {
    /// A copy of this gateway that authenticates as `token` (or anonymously).
    fn with_token(&self, token: Option<AccessToken>) -> Self;

    /// Where the resume uploaded with `application_id` can be downloaded.
    fn resume_url(&self, application_id: ApplicationId) -> String;

    // -- Auth --

    fn login(
        &self,
        kind: PrincipalKind,
        request: &LoginRequest,
    ) -> impl Future<Output = Result<AuthResponse>> + Send;

    fn register_jobseeker(
        &self,
        request: &RegisterJobseekerRequest,
    ) -> impl Future<Output = Result<AuthResponse>> + Send;

    fn register_employer(
        &self,
        request: &RegisterEmployerRequest,
    ) -> impl Future<Output = Result<AuthResponse>> + Send;

    // -- Jobs --

    fn search_jobs(&self, query: &JobSearchQuery) -> impl Future<Output = Result<Vec<JobPosting>>> + Send;

    fn get_job(&self, id: JobId) -> impl Future<Output = Result<JobPosting>> + Send;

    fn create_job(&self, request: &CreateJobRequest) -> impl Future<Output = Result<JobPosting>> + Send;

    fn update_job(
        &self,
        id: JobId,
        request: &UpdateJobRequest,
    ) -> impl Future<Output = Result<JobPosting>> + Send;

    fn delete_job(&self, id: JobId) -> impl Future<Output = Result<()>> + Send;

    fn my_jobs(&self, page: PageQuery) -> impl Future<Output = Result<Vec<JobPosting>>> + Send;

    // -- Applications --

    fn apply(
        &self,
        job_id: JobId,
        message: &str,
        resume: ResumeUpload,
    ) -> impl Future<Output = Result<Application>> + Send;

    fn my_applications(&self, page: PageQuery) -> impl Future<Output = Result<Vec<Application>>> + Send;

    fn get_application(&self, id: ApplicationId) -> impl Future<Output = Result<Application>> + Send;

    fn delete_application(&self, id: ApplicationId) -> impl Future<Output = Result<()>> + Send;

    fn job_applications(
        &self,
        query: EmployerApplicationsQuery,
    ) -> impl Future<Output = Result<Vec<Application>>> + Send;

    fn update_application_status(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
    ) -> impl Future<Output = Result<()>> + Send;

    fn notify_status_change(
        &self,
        notification: StatusNotification,
    ) -> impl Future<Output = Result<()>> + Send;

    fn set_notification_preference(
        &self,
        preference: NotificationPreference,
    ) -> impl Future<Output = Result<()>> + Send;

    // -- Profiles --

    fn jobseeker_profile(&self) -> impl Future<Output = Result<JobseekerProfile>> + Send;

    fn update_jobseeker_profile(
        &self,
        request: &UpdateJobseekerRequest,
    ) -> impl Future<Output = Result<JobseekerProfile>> + Send;

    fn employer_profile(&self) -> impl Future<Output = Result<EmployerProfile>> + Send;

    fn update_employer_profile(
        &self,
        request: &UpdateEmployerRequest,
    ) -> impl Future<Output = Result<EmployerProfile>> + Send;
}
