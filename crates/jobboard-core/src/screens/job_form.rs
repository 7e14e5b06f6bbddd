use tracing::{info, warn};

use jobboard_client::Gateway;
use jobboard_types::api::{CreateJobRequest, UpdateJobRequest};
use jobboard_types::{JobPosting, PrincipalKind};

use super::{authorize, changed_amount, changed_required};
use crate::Redirect;
use crate::notice::Notice;
use crate::session::Session;
use crate::validation::{self, ValidationError};

/// Inputs of the create-job form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobDraft {
    pub title: String,
    pub description: String,
    pub requirements: String,
    pub industry: String,
    pub location: String,
    pub salary_min: String,
    pub salary_max: String,
    skills: Vec<String>,
}

impl JobDraft {
    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    /// Adds a trimmed skill. Blank and already listed names are ignored.
    pub fn add_skill(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.skills.iter().any(|s| s == name) {
            return false;
        }
        self.skills.push(name.to_string());
        true
    }

    pub fn remove_skill(&mut self, name: &str) {
        self.skills.retain(|s| s != name);
    }

    pub fn validate(&self) -> Result<CreateJobRequest, ValidationError> {
        let salary_min = validation::required_amount("salary_min", &self.salary_min)?;
        let salary_max = validation::required_amount("salary_max", &self.salary_max)?;
        validation::salary_range(Some(salary_min), Some(salary_max))?;
        Ok(CreateJobRequest {
            title: validation::required("title", &self.title)?,
            description: validation::required("description", &self.description)?,
            requirements: validation::required("requirements", &self.requirements)?,
            industry: validation::required("industry", &self.industry)?,
            location: validation::required("location", &self.location)?,
            salary_min,
            salary_max,
            required_skills: self.skills.clone(),
        })
    }
}

pub struct CreateJobScreen<G> {
    gateway: G,
    pub draft: JobDraft,
    notice: Option<Notice>,
}

impl<G: Gateway> CreateJobScreen<G> {
    pub fn open(session: &Session, base: &G) -> Result<Self, Redirect> {
        authorize(session, Some(PrincipalKind::Employer))?;
        Ok(Self {
            gateway: session.gateway(base),
            draft: JobDraft::default(),
            notice: None,
        })
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Post the draft. On success the form is reset and the created job is
    /// returned; the shell moves on to the job list.
    pub async fn submit(&mut self) -> Option<JobPosting> {
        self.notice = None;
        let request = match self.draft.validate() {
            Ok(request) => request,
            Err(e) => {
                self.notice = Some(e.into());
                return None;
            }
        };
        match self.gateway.create_job(&request).await {
            Ok(job) => {
                info!(job_id = %job.id, "job created");
                self.draft = JobDraft::default();
                self.notice = Some(Notice::JobCreated);
                Some(job)
            }
            Err(e) => {
                warn!(error = %e, "create job failed");
                self.notice = Some(Notice::from_error(&e, Notice::CreateJobFailed));
                None
            }
        }
    }
}

/// Inputs of the edit-job dialog, prefilled from the stored posting.
#[derive(Debug, Clone, PartialEq)]
pub struct JobEdit {
    pub title: String,
    pub description: String,
    pub requirements: String,
    pub industry: String,
    pub location: String,
    pub salary_min: String,
    pub salary_max: String,
}

impl From<&JobPosting> for JobEdit {
    fn from(job: &JobPosting) -> Self {
        Self {
            title: job.title.clone(),
            description: job.description.clone(),
            requirements: job.requirements.clone(),
            industry: job.industry.clone(),
            location: job.location.clone(),
            salary_min: job.salary_min.to_string(),
            salary_max: job.salary_max.to_string(),
        }
    }
}

impl JobEdit {
    /// The fields that differ from `job`. Errors when nothing changed.
    pub fn changes(&self, job: &JobPosting) -> Result<UpdateJobRequest, ValidationError> {
        let changes = UpdateJobRequest {
            title: changed_required("title", &self.title, &job.title)?,
            description: changed_required("description", &self.description, &job.description)?,
            requirements: changed_required("requirements", &self.requirements, &job.requirements)?,
            industry: changed_required("industry", &self.industry, &job.industry)?,
            location: changed_required("location", &self.location, &job.location)?,
            salary_min: changed_amount("salary_min", &self.salary_min, job.salary_min)?,
            salary_max: changed_amount("salary_max", &self.salary_max, job.salary_max)?,
        };
        validation::salary_range(
            Some(changes.salary_min.unwrap_or(job.salary_min)),
            Some(changes.salary_max.unwrap_or(job.salary_max)),
        )?;
        if changes.is_empty() {
            return Err(ValidationError::NothingChanged);
        }
        Ok(changes)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use jobboard_types::{CompanyId, JobId};

    use super::*;

    fn posting() -> JobPosting {
        JobPosting {
            id: JobId(1),
            title: "Rust developer".into(),
            description: "Build things".into(),
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

    #[test]
    fn skills_are_trimmed_and_unique() {
        let mut draft = JobDraft::default();
        assert!(draft.add_skill("  Rust "));
        assert!(!draft.add_skill("Rust"));
        assert!(!draft.add_skill("   "));
        assert!(draft.add_skill("SQL"));
        draft.remove_skill("Rust");
        assert_eq!(draft.skills(), ["SQL"]);
    }

    #[test]
    fn draft_requires_numeric_ordered_salaries() {
        let mut draft = JobDraft {
            title: "Dev".into(),
            description: "d".into(),
            requirements: "r".into(),
            industry: "IT".into(),
            location: "Remote".into(),
            salary_min: "abc".into(),
            salary_max: "10".into(),
            ..Default::default()
        };
        assert_eq!(draft.validate().unwrap_err(), ValidationError::NotANumber("salary_min"));
        draft.salary_min = "20".into();
        assert_eq!(draft.validate().unwrap_err(), ValidationError::SalaryRange);
        draft.salary_min = "5".into();
        assert_eq!(draft.validate().unwrap().salary_min, 5);
    }

    #[test]
    fn edit_sends_only_changed_fields() {
        let job = posting();
        let mut edit = JobEdit::from(&job);
        assert_eq!(edit.changes(&job).unwrap_err(), ValidationError::NothingChanged);

        edit.location = "Remote".into();
        edit.salary_max = "2500".into();
        let changes = edit.changes(&job).unwrap();
        assert_eq!(changes.location.as_deref(), Some("Remote"));
        assert_eq!(changes.salary_max, Some(2500));
        assert!(changes.title.is_none());
    }

    #[test]
    fn edit_checks_range_against_stored_values() {
        let job = posting();
        let mut edit = JobEdit::from(&job);
        edit.salary_min = "3000".into();
        assert_eq!(edit.changes(&job).unwrap_err(), ValidationError::SalaryRange);
    }
}
