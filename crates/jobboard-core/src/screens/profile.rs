use tracing::{info, warn};

use jobboard_client::Gateway;
use jobboard_types::api::{UpdateEmployerRequest, UpdateJobseekerRequest};
use jobboard_types::{EmployerProfile, JobseekerProfile, PrincipalKind};

use super::{authorize, changed_amount, changed_optional, changed_required};
use crate::Redirect;
use crate::notice::Notice;
use crate::session::{Session, SessionAction, SessionStorage, SessionStore};
use crate::validation::{self, ValidationError};

#[derive(Debug, Clone, PartialEq)]
pub struct JobseekerDraft {
    pub full_name: String,
    pub location: String,
    pub desired_job_title: String,
    pub desired_industry: String,
    pub desired_salary_min: String,
    pub desired_salary_max: String,
    pub experience: String,
    pub skills_description: String,
}

impl From<&JobseekerProfile> for JobseekerDraft {
    fn from(p: &JobseekerProfile) -> Self {
        Self {
            full_name: p.full_name.clone(),
            location: p.location.clone(),
            desired_job_title: p.desired_job_title.clone(),
            desired_industry: p.desired_industry.clone(),
            desired_salary_min: p.desired_salary_min.to_string(),
            desired_salary_max: p.desired_salary_max.to_string(),
            experience: p.experience.clone(),
            skills_description: p.skills_description.clone(),
        }
    }
}

impl JobseekerDraft {
    pub fn changes(&self, p: &JobseekerProfile) -> Result<UpdateJobseekerRequest, ValidationError> {
        let changes = UpdateJobseekerRequest {
            full_name: changed_required("full_name", &self.full_name, &p.full_name)?,
            location: changed_required("location", &self.location, &p.location)?,
            desired_job_title: changed_required("desired_job_title", &self.desired_job_title, &p.desired_job_title)?,
            desired_industry: changed_required("desired_industry", &self.desired_industry, &p.desired_industry)?,
            desired_salary_min: changed_amount("desired_salary_min", &self.desired_salary_min, p.desired_salary_min)?,
            desired_salary_max: changed_amount("desired_salary_max", &self.desired_salary_max, p.desired_salary_max)?,
            experience: changed_optional(&self.experience, &p.experience),
            skills_description: changed_optional(&self.skills_description, &p.skills_description),
        };
        validation::salary_range(
            Some(changes.desired_salary_min.unwrap_or(p.desired_salary_min)),
            Some(changes.desired_salary_max.unwrap_or(p.desired_salary_max)),
        )?;
        if changes.is_empty() {
            return Err(ValidationError::NothingChanged);
        }
        Ok(changes)
    }
}

pub struct JobseekerProfileScreen<G> {
    gateway: G,
    profile: Option<JobseekerProfile>,
    draft: Option<JobseekerDraft>,
    notice: Option<Notice>,
}

impl<G: Gateway> JobseekerProfileScreen<G> {
    pub fn open(session: &Session, base: &G) -> Result<Self, Redirect> {
        authorize(session, Some(PrincipalKind::Jobseeker))?;
        Ok(Self {
            gateway: session.gateway(base),
            profile: session.jobseeker().cloned(),
            draft: None,
            notice: None,
        })
    }

    pub fn profile(&self) -> Option<&JobseekerProfile> {
        self.profile.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub async fn load<S: SessionStorage>(&mut self, store: &mut SessionStore<S>) {
        match self.gateway.jobseeker_profile().await {
            Ok(profile) => {
                store.dispatch(SessionAction::JobseekerLoaded(profile.clone()));
                self.profile = Some(profile);
            }
            Err(e) => {
                warn!(error = %e, "failed to load jobseeker profile");
                self.notice = Some(Notice::from_error(&e, Notice::ProfileLoadFailed));
            }
        }
    }

    /// Open the edit form prefilled from the loaded profile.
    pub fn begin_edit(&mut self) -> Option<&mut JobseekerDraft> {
        let profile = self.profile.as_ref()?;
        Some(self.draft.insert(JobseekerDraft::from(profile)))
    }

    pub fn draft_mut(&mut self) -> Option<&mut JobseekerDraft> {
        self.draft.as_mut()
    }

    pub fn cancel_edit(&mut self) {
        self.draft = None;
    }

    pub async fn save<S: SessionStorage>(&mut self, store: &mut SessionStore<S>) -> bool {
        let (Some(profile), Some(draft)) = (self.profile.as_ref(), self.draft.as_ref()) else {
            return false;
        };
        let changes = match draft.changes(profile) {
            Ok(changes) => changes,
            Err(e) => {
                self.notice = Some(e.into());
                return false;
            }
        };
        match self.gateway.update_jobseeker_profile(&changes).await {
            Ok(updated) => {
                info!("jobseeker profile updated");
                store.dispatch(SessionAction::JobseekerLoaded(updated.clone()));
                self.profile = Some(updated);
                self.draft = None;
                self.notice = Some(Notice::ProfileSaved);
                true
            }
            Err(e) => {
                warn!(error = %e, "failed to update jobseeker profile");
                self.notice = Some(Notice::from_error(&e, Notice::ProfileSaveFailed));
                false
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmployerDraft {
    pub full_name: String,
    pub company_name: String,
    pub company_industry: String,
    pub company_location: String,
}

impl From<&EmployerProfile> for EmployerDraft {
    fn from(p: &EmployerProfile) -> Self {
        Self {
            full_name: p.full_name.clone(),
            company_name: p.company_name.clone(),
            company_industry: p.company_industry.clone(),
            company_location: p.company_location.clone(),
        }
    }
}

impl EmployerDraft {
    pub fn changes(&self, p: &EmployerProfile) -> Result<UpdateEmployerRequest, ValidationError> {
        let changes = UpdateEmployerRequest {
            full_name: changed_required("full_name", &self.full_name, &p.full_name)?,
            company_name: changed_required("company_name", &self.company_name, &p.company_name)?,
            company_industry: changed_required("company_industry", &self.company_industry, &p.company_industry)?,
            company_location: changed_required("company_location", &self.company_location, &p.company_location)?,
        };
        if changes.is_empty() {
            return Err(ValidationError::NothingChanged);
        }
        Ok(changes)
    }
}

pub struct EmployerProfileScreen<G> {
    gateway: G,
    profile: Option<EmployerProfile>,
    draft: Option<EmployerDraft>,
    notice: Option<Notice>,
}

impl<G: Gateway> EmployerProfileScreen<G> {
    pub fn open(session: &Session, base: &G) -> Result<Self, Redirect> {
        authorize(session, Some(PrincipalKind::Employer))?;
        Ok(Self {
            gateway: session.gateway(base),
            profile: session.employer().cloned(),
            draft: None,
            notice: None,
        })
    }

    pub fn profile(&self) -> Option<&EmployerProfile> {
        self.profile.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub async fn load<S: SessionStorage>(&mut self, store: &mut SessionStore<S>) {
        match self.gateway.employer_profile().await {
            Ok(profile) => {
                store.dispatch(SessionAction::EmployerLoaded(profile.clone()));
                self.profile = Some(profile);
            }
            Err(e) => {
                warn!(error = %e, "failed to load employer profile");
                self.notice = Some(Notice::from_error(&e, Notice::ProfileLoadFailed));
            }
        }
    }

    pub fn begin_edit(&mut self) -> Option<&mut EmployerDraft> {
        let profile = self.profile.as_ref()?;
        Some(self.draft.insert(EmployerDraft::from(profile)))
    }

    pub fn draft_mut(&mut self) -> Option<&mut EmployerDraft> {
        self.draft.as_mut()
    }

    pub fn cancel_edit(&mut self) {
        self.draft = None;
    }

    pub async fn save<S: SessionStorage>(&mut self, store: &mut SessionStore<S>) -> bool {
        let (Some(profile), Some(draft)) = (self.profile.as_ref(), self.draft.as_ref()) else {
            return false;
        };
        let changes = match draft.changes(profile) {
            Ok(changes) => changes,
            Err(e) => {
                self.notice = Some(e.into());
                return false;
            }
        };
        match self.gateway.update_employer_profile(&changes).await {
            Ok(updated) => {
                info!("employer profile updated");
                store.dispatch(SessionAction::EmployerLoaded(updated.clone()));
                self.profile = Some(updated);
                self.draft = None;
                self.notice = Some(Notice::ProfileSaved);
                true
            }
            Err(e) => {
                warn!(error = %e, "failed to update employer profile");
                self.notice = Some(Notice::from_error(&e, Notice::ProfileSaveFailed));
                false
            }
        }
    }
}
