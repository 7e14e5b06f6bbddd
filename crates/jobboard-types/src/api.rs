use serde::{Deserialize, Serialize};

use crate::models::{ApplicationId, EmployerProfile, JobId, JobseekerProfile};
use crate::status::ApplicationStatus;

/// Versioned prefix every REST route lives under.
pub const API_PREFIX: &str = "/api/v1";

/// Default and maximum page sizes accepted by list endpoints.
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

// -- Auth --

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Returned by both login endpoints and by employer registration. Exactly one
/// of `user` / `employer` is set, matching the endpoint that was called.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<JobseekerProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employer: Option<EmployerProfile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SkillInput {
    pub name: String,
    pub years_of_experience: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterJobseekerRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub location: String,
    pub desired_industry: String,
    pub desired_job_title: String,
    pub desired_salary_min: i64,
    pub desired_salary_max: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(default)]
    pub skills: Vec<SkillInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills_description: Option<String>,
    pub telegram_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterEmployerRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub company_name: String,
    pub company_industry: String,
    pub company_location: String,
}

// -- Paging --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl PageQuery {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self { page, page_size }
    }

    /// Offset of the first item of this page. Page numbers start at 1; 0 is
    /// treated as 1.
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize).saturating_mul(self.limit())
    }

    pub fn limit(&self) -> usize {
        self.page_size.clamp(1, MAX_PAGE_SIZE) as usize
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self::new(first_page(), default_page_size())
    }
}

fn first_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

// -- Jobs --

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobSearchQuery {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_min: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_max: Option<i64>,
}

impl JobSearchQuery {
    pub fn page(&self) -> PageQuery {
        PageQuery::new(self.page, self.page_size)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateJobRequest {
    pub title: String,
    pub description: String,
    pub requirements: String,
    pub industry: String,
    pub location: String,
    pub salary_min: i64,
    pub salary_max: i64,
    #[serde(default)]
    pub required_skills: Vec<String>,
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateJobRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_min: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_max: Option<i64>,
}

impl UpdateJobRequest {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// -- Applications --

/// Multipart field names of the apply form.
pub const APPLY_FIELD_JOB_ID: &str = "job_id";
pub const APPLY_FIELD_MESSAGE: &str = "message";
pub const APPLY_FIELD_RESUME: &str = "cv";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerApplicationsQuery {
    pub job_id: JobId,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl EmployerApplicationsQuery {
    pub fn page(&self) -> PageQuery {
        PageQuery::new(self.page, self.page_size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateStatusRequest {
    pub new_status: ApplicationStatus,
}

/// Asks the collaborator to notify the applicant about a committed status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatusNotification {
    pub application_id: ApplicationId,
    pub status: ApplicationStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotificationPreference {
    pub application_id: ApplicationId,
    pub enabled: bool,
}

// -- Profiles --

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateJobseekerRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired_job_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired_industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired_salary_min: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired_salary_max: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills_description: Option<String>,
}

impl UpdateJobseekerRequest {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateEmployerRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_location: Option<String>,
}

impl UpdateEmployerRequest {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_offsets_are_one_based() {
        assert_eq!(PageQuery::new(1, 10).offset(), 0);
        assert_eq!(PageQuery::new(3, 10).offset(), 20);
        assert_eq!(PageQuery::new(0, 10).offset(), 0);
        assert_eq!(PageQuery::new(1, 5000).limit(), MAX_PAGE_SIZE as usize);
    }

    #[test]
    fn search_query_skips_unset_filters() {
        let query = JobSearchQuery {
            page: 2,
            page_size: 10,
            industry: Some("IT".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["industry"], "IT");
        assert!(json.get("title").is_none());
        assert!(json.get("salary_min").is_none());
    }

    #[test]
    fn empty_update_detected() {
        assert!(UpdateJobRequest::default().is_empty());
        let update = UpdateJobRequest { salary_max: Some(10), ..Default::default() };
        assert!(!update.is_empty());
    }
}
