use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::status::ApplicationStatus;

macro_rules! id_type {
    ($($name:ident),* $(,)?) => {
        $(
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
            #[serde(transparent)]
            pub struct $name(pub i64);

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    self.0.fmt(f)
                }
            }

            impl From<i64> for $name {
                fn from(raw: i64) -> Self {
                    Self(raw)
                }
            }
        )*
    };
}

id_type!(JobId, ApplicationId, UserId, EmployerId, CompanyId, SkillId);

/// The two mutually exclusive kinds of account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrincipalKind {
    Jobseeker,
    Employer,
}

impl fmt::Display for PrincipalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jobseeker => f.write_str("jobseeker"),
            Self::Employer => f.write_str("employer"),
        }
    }
}

/// A skill either held by an applicant (with years of experience) or
/// required by a job posting (without).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years_of_experience: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: JobId,
    pub title: String,
    pub description: String,
    pub requirements: String,
    pub industry: String,
    pub location: String,
    pub salary_min: i64,
    pub salary_max: i64,
    pub company_id: CompanyId,
    pub company_name: String,
    #[serde(default)]
    pub required_skills: Vec<Skill>,
    pub created_at: DateTime<Utc>,
}

/// A jobseeker's submission against a job posting.
///
/// The same record backs both listings: the jobseeker view fills the job
/// fields, the employer view fills the applicant fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub job_id: JobId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    pub applicant_id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applicant_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applicant_email: Option<String>,
    pub status: ApplicationStatus,
    pub submitted_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_file: Option<String>,
    #[serde(default)]
    pub notifications_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobseekerProfile {
    pub id: UserId,
    pub email: String,
    pub full_name: String,
    pub location: String,
    pub desired_industry: String,
    pub desired_job_title: String,
    pub desired_salary_min: i64,
    pub desired_salary_max: i64,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub skills_description: String,
    #[serde(default)]
    pub telegram_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployerProfile {
    pub id: EmployerId,
    pub email: String,
    pub full_name: String,
    pub company_id: CompanyId,
    pub company_name: String,
    pub company_industry: String,
    pub company_location: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_serialize_as_bare_numbers() {
        let json = serde_json::to_string(&JobId(42)).unwrap();
        assert_eq!(json, "42");
        let id: ApplicationId = serde_json::from_str("7").unwrap();
        assert_eq!(id, ApplicationId(7));
    }

    #[test]
    fn application_tolerates_missing_optional_fields() {
        let json = r#"{
            "id": 3,
            "job_id": 9,
            "applicant_id": 11,
            "status": "Seen",
            "submitted_at": "2024-05-01T10:00:00Z"
        }"#;
        let app: Application = serde_json::from_str(json).unwrap();
        assert_eq!(app.status, ApplicationStatus::Seen);
        assert!(app.job_title.is_none());
        assert!(!app.notifications_enabled);
    }

    #[test]
    fn requirement_skill_omits_experience() {
        let skill = Skill { id: SkillId(1), name: "Rust".into(), years_of_experience: None };
        let json = serde_json::to_value(&skill).unwrap();
        assert!(json.get("years_of_experience").is_none());
    }
}
