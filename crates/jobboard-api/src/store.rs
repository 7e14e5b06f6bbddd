use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use bytes::Bytes;
use chrono::Utc;
use tracing::{debug, info};

use jobboard_types::api::{
    CreateJobRequest, JobSearchQuery, NotificationPreference, PageQuery, RegisterEmployerRequest,
    RegisterJobseekerRequest, StatusNotification, UpdateEmployerRequest, UpdateJobRequest,
    UpdateJobseekerRequest,
};
use jobboard_types::{
    Application, ApplicationId, ApplicationStatus, CompanyId, EmployerId, EmployerProfile,
    ErrorCode, JobId, JobPosting, JobseekerProfile, Skill, SkillId, UserId,
};

use crate::error::{ApiError, ApiResult};

struct JobseekerRecord {
    profile: JobseekerProfile,
    password_hash: String,
}

struct EmployerRecord {
    profile: EmployerProfile,
    password_hash: String,
}

#[derive(Default)]
struct Counters {
    user: i64,
    employer: i64,
    company: i64,
    job: i64,
    application: i64,
    skill: i64,
}

#[derive(Default)]
struct Inner {
    jobseekers: HashMap<UserId, JobseekerRecord>,
    employers: HashMap<EmployerId, EmployerRecord>,
    jobs: HashMap<JobId, (EmployerId, JobPosting)>,
    applications: HashMap<ApplicationId, Application>,
    resumes: HashMap<ApplicationId, Bytes>,
    notifications: Vec<StatusNotification>,
    ids: Counters,
}

/// In-memory backing store of the development API.
#[derive(Default)]
pub struct Store {
    inner: Mutex<Inner>,
}

fn next(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

fn paginate<T>(items: Vec<T>, page: PageQuery) -> Vec<T> {
    items.into_iter().skip(page.offset()).take(page.limit()).collect()
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> ApiResult<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|e| ApiError::internal(format!("store lock poisoned: {}", e)))
    }

    // -- Accounts --

    pub fn insert_jobseeker(
        &self,
        req: RegisterJobseekerRequest,
        password_hash: String,
    ) -> ApiResult<JobseekerProfile> {
        let mut inner = self.lock()?;
        if inner.jobseekers.values().any(|r| r.profile.email.eq_ignore_ascii_case(&req.email)) {
            return Err(ApiError::new(ErrorCode::Conflict, "email already registered"));
        }
        let id = UserId(next(&mut inner.ids.user));
        let skills = req
            .skills
            .into_iter()
            .map(|s| Skill {
                id: SkillId(next(&mut inner.ids.skill)),
                name: s.name,
                years_of_experience: Some(s.years_of_experience),
            })
            .collect();
        let profile = JobseekerProfile {
            id,
            email: req.email,
            full_name: req.full_name,
            location: req.location,
            desired_industry: req.desired_industry,
            desired_job_title: req.desired_job_title,
            desired_salary_min: req.desired_salary_min,
            desired_salary_max: req.desired_salary_max,
            experience: req.experience.unwrap_or_default(),
            skills,
            skills_description: req.skills_description.unwrap_or_default(),
            telegram_id: req.telegram_id,
            created_at: Utc::now(),
        };
        inner.jobseekers.insert(id, JobseekerRecord { profile: profile.clone(), password_hash });
        info!(user_id = %id, "jobseeker registered");
        Ok(profile)
    }

    pub fn insert_employer(
        &self,
        req: RegisterEmployerRequest,
        password_hash: String,
    ) -> ApiResult<EmployerProfile> {
        let mut inner = self.lock()?;
        if inner.employers.values().any(|r| r.profile.email.eq_ignore_ascii_case(&req.email)) {
            return Err(ApiError::new(ErrorCode::Conflict, "email already registered"));
        }
        let id = EmployerId(next(&mut inner.ids.employer));
        let company_id = CompanyId(next(&mut inner.ids.company));
        let profile = EmployerProfile {
            id,
            email: req.email,
            full_name: req.full_name,
            company_id,
            company_name: req.company_name,
            company_industry: req.company_industry,
            company_location: req.company_location,
            created_at: Utc::now(),
        };
        inner.employers.insert(id, EmployerRecord { profile: profile.clone(), password_hash });
        info!(employer_id = %id, "employer registered");
        Ok(profile)
    }

    /// Profile and password hash for a login attempt.
    pub fn jobseeker_credentials(&self, email: &str) -> ApiResult<Option<(JobseekerProfile, String)>> {
        let inner = self.lock()?;
        Ok(inner
            .jobseekers
            .values()
            .find(|r| r.profile.email.eq_ignore_ascii_case(email))
            .map(|r| (r.profile.clone(), r.password_hash.clone())))
    }

    pub fn employer_credentials(&self, email: &str) -> ApiResult<Option<(EmployerProfile, String)>> {
        let inner = self.lock()?;
        Ok(inner
            .employers
            .values()
            .find(|r| r.profile.email.eq_ignore_ascii_case(email))
            .map(|r| (r.profile.clone(), r.password_hash.clone())))
    }

    pub fn jobseeker(&self, id: UserId) -> ApiResult<JobseekerProfile> {
        let inner = self.lock()?;
        inner
            .jobseekers
            .get(&id)
            .map(|r| r.profile.clone())
            .ok_or_else(|| ApiError::not_found(format!("user {id}")))
    }

    pub fn employer(&self, id: EmployerId) -> ApiResult<EmployerProfile> {
        let inner = self.lock()?;
        inner
            .employers
            .get(&id)
            .map(|r| r.profile.clone())
            .ok_or_else(|| ApiError::not_found(format!("employer {id}")))
    }

    pub fn update_jobseeker(&self, id: UserId, req: UpdateJobseekerRequest) -> ApiResult<JobseekerProfile> {
        let mut inner = self.lock()?;
        let record = inner
            .jobseekers
            .get_mut(&id)
            .ok_or_else(|| ApiError::not_found(format!("user {id}")))?;
        let p = &mut record.profile;
        if let Some(v) = req.full_name {
            p.full_name = v;
        }
        if let Some(v) = req.location {
            p.location = v;
        }
        if let Some(v) = req.desired_job_title {
            p.desired_job_title = v;
        }
        if let Some(v) = req.desired_industry {
            p.desired_industry = v;
        }
        if let Some(v) = req.desired_salary_min {
            p.desired_salary_min = v;
        }
        if let Some(v) = req.desired_salary_max {
            p.desired_salary_max = v;
        }
        if let Some(v) = req.experience {
            p.experience = v;
        }
        if let Some(v) = req.skills_description {
            p.skills_description = v;
        }
        Ok(p.clone())
    }

    pub fn update_employer(&self, id: EmployerId, req: UpdateEmployerRequest) -> ApiResult<EmployerProfile> {
        let mut inner = self.lock()?;
        let record = inner
            .employers
            .get_mut(&id)
            .ok_or_else(|| ApiError::not_found(format!("employer {id}")))?;
        let p = &mut record.profile;
        if let Some(v) = req.full_name {
            p.full_name = v;
        }
        if let Some(v) = req.company_name {
            p.company_name = v;
        }
        if let Some(v) = req.company_industry {
            p.company_industry = v;
        }
        if let Some(v) = req.company_location {
            p.company_location = v;
        }
        let profile = p.clone();

        // Postings show the company name they were listed under.
        for (owner, job) in inner.jobs.values_mut() {
            if *owner == id {
                job.company_name = profile.company_name.clone();
            }
        }
        Ok(profile)
    }

    // -- Jobs --

    pub fn search_jobs(&self, query: &JobSearchQuery) -> ApiResult<Vec<JobPosting>> {
        let inner = self.lock()?;
        let title = query.title.as_deref().map(str::to_lowercase);
        let mut jobs: Vec<JobPosting> = inner
            .jobs
            .values()
            .map(|(_, job)| job)
            .filter(|job| title.as_deref().is_none_or(|t| job.title.to_lowercase().contains(t)))
            .filter(|job| query.industry.as_deref().is_none_or(|i| job.industry.eq_ignore_ascii_case(i)))
            .filter(|job| query.job_location.as_deref().is_none_or(|l| job.location.eq_ignore_ascii_case(l)))
            .filter(|job| query.salary_min.is_none_or(|min| job.salary_max >= min))
            .filter(|job| query.salary_max.is_none_or(|max| job.salary_min <= max))
            .cloned()
            .collect();
        jobs.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(paginate(jobs, query.page()))
    }

    pub fn job(&self, id: JobId) -> ApiResult<JobPosting> {
        let inner = self.lock()?;
        inner
            .jobs
            .get(&id)
            .map(|(_, job)| job.clone())
            .ok_or_else(|| ApiError::not_found(format!("job {id}")))
    }

    pub fn create_job(&self, owner: EmployerId, req: CreateJobRequest) -> ApiResult<JobPosting> {
        let mut inner = self.lock()?;
        let employer = inner
            .employers
            .get(&owner)
            .map(|r| r.profile.clone())
            .ok_or_else(|| ApiError::not_found(format!("employer {owner}")))?;
        let id = JobId(next(&mut inner.ids.job));
        let required_skills = req
            .required_skills
            .into_iter()
            .map(|name| Skill {
                id: SkillId(next(&mut inner.ids.skill)),
                name,
                years_of_experience: None,
            })
            .collect();
        let job = JobPosting {
            id,
            title: req.title,
            description: req.description,
            requirements: req.requirements,
            industry: req.industry,
            location: req.location,
            salary_min: req.salary_min,
            salary_max: req.salary_max,
            company_id: employer.company_id,
            company_name: employer.company_name,
            required_skills,
            created_at: Utc::now(),
        };
        inner.jobs.insert(id, (owner, job.clone()));
        debug!(job_id = %id, employer_id = %owner, "job created");
        Ok(job)
    }

    fn owned_job<'a>(inner: &'a mut Inner, owner: EmployerId, id: JobId) -> ApiResult<&'a mut JobPosting> {
        match inner.jobs.get_mut(&id) {
            Some((o, job)) if *o == owner => Ok(job),
            Some(_) => Err(ApiError::forbidden(format!("job {id} belongs to another employer"))),
            None => Err(ApiError::not_found(format!("job {id}"))),
        }
    }

    fn has_applications(inner: &Inner, id: JobId) -> bool {
        inner.applications.values().any(|a| a.job_id == id)
    }

    pub fn update_job(&self, owner: EmployerId, id: JobId, req: UpdateJobRequest) -> ApiResult<JobPosting> {
        let mut inner = self.lock()?;
        Self::owned_job(&mut inner, owner, id)?;
        if Self::has_applications(&inner, id) {
            return Err(ApiError::new(
                ErrorCode::JobHasApplications,
                format!("job {id} already has applications"),
            ));
        }
        let job = Self::owned_job(&mut inner, owner, id)?;
        if req.salary_min.unwrap_or(job.salary_min) > req.salary_max.unwrap_or(job.salary_max) {
            return Err(ApiError::validation("salary_min exceeds salary_max"));
        }
        if let Some(v) = req.title {
            job.title = v;
        }
        if let Some(v) = req.description {
            job.description = v;
        }
        if let Some(v) = req.requirements {
            job.requirements = v;
        }
        if let Some(v) = req.industry {
            job.industry = v;
        }
        if let Some(v) = req.location {
            job.location = v;
        }
        if let Some(v) = req.salary_min {
            job.salary_min = v;
        }
        if let Some(v) = req.salary_max {
            job.salary_max = v;
        }
        Ok(job.clone())
    }

    pub fn delete_job(&self, owner: EmployerId, id: JobId) -> ApiResult<()> {
        let mut inner = self.lock()?;
        Self::owned_job(&mut inner, owner, id)?;
        if Self::has_applications(&inner, id) {
            return Err(ApiError::new(
                ErrorCode::JobHasApplications,
                format!("job {id} already has applications"),
            ));
        }
        inner.jobs.remove(&id);
        debug!(job_id = %id, "job deleted");
        Ok(())
    }

    pub fn employer_jobs(&self, owner: EmployerId, page: PageQuery) -> ApiResult<Vec<JobPosting>> {
        let inner = self.lock()?;
        let mut jobs: Vec<JobPosting> = inner
            .jobs
            .values()
            .filter(|(o, _)| *o == owner)
            .map(|(_, job)| job.clone())
            .collect();
        jobs.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(paginate(jobs, page))
    }

    // -- Applications --

    pub fn create_application(
        &self,
        applicant: UserId,
        job_id: JobId,
        message: Option<String>,
        resume: Bytes,
    ) -> ApiResult<Application> {
        let mut inner = self.lock()?;
        let job = inner
            .jobs
            .get(&job_id)
            .map(|(_, job)| job.clone())
            .ok_or_else(|| ApiError::not_found(format!("job {job_id}")))?;
        let user = inner
            .jobseekers
            .get(&applicant)
            .map(|r| r.profile.clone())
            .ok_or_else(|| ApiError::not_found(format!("user {applicant}")))?;
        if inner
            .applications
            .values()
            .any(|a| a.job_id == job_id && a.applicant_id == applicant)
        {
            return Err(ApiError::new(
                ErrorCode::AlreadyApplied,
                format!("user {applicant} already applied to job {job_id}"),
            ));
        }
        let id = ApplicationId(next(&mut inner.ids.application));
        let application = Application {
            id,
            job_id,
            job_title: Some(job.title),
            company_name: Some(job.company_name),
            applicant_id: applicant,
            applicant_name: Some(user.full_name),
            applicant_email: Some(user.email),
            status: ApplicationStatus::Applied,
            submitted_at: Utc::now(),
            cover_message: message.filter(|m| !m.trim().is_empty()),
            resume_file: Some(format!("cv_{id}.pdf")),
            notifications_enabled: false,
        };
        inner.applications.insert(id, application.clone());
        inner.resumes.insert(id, resume);
        debug!(application_id = %id, job_id = %job_id, "application submitted");
        Ok(application)
    }

    pub fn user_applications(&self, applicant: UserId, page: PageQuery) -> ApiResult<Vec<Application>> {
        let inner = self.lock()?;
        let mut apps: Vec<Application> = inner
            .applications
            .values()
            .filter(|a| a.applicant_id == applicant)
            .cloned()
            .collect();
        apps.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(paginate(apps, page))
    }

    pub fn user_application(&self, applicant: UserId, id: ApplicationId) -> ApiResult<Application> {
        let inner = self.lock()?;
        inner
            .applications
            .get(&id)
            .filter(|a| a.applicant_id == applicant)
            .cloned()
            .ok_or_else(|| ApiError::not_found(format!("application {id}")))
    }

    pub fn delete_user_application(&self, applicant: UserId, id: ApplicationId) -> ApiResult<()> {
        let mut inner = self.lock()?;
        match inner.applications.get(&id) {
            Some(a) if a.applicant_id == applicant => {}
            _ => return Err(ApiError::not_found(format!("application {id}"))),
        }
        inner.applications.remove(&id);
        inner.resumes.remove(&id);
        Ok(())
    }

    pub fn job_applications(
        &self,
        owner: EmployerId,
        job_id: JobId,
        page: PageQuery,
    ) -> ApiResult<Vec<Application>> {
        let mut inner = self.lock()?;
        Self::owned_job(&mut inner, owner, job_id)?;
        let mut apps: Vec<Application> = inner
            .applications
            .values()
            .filter(|a| a.job_id == job_id)
            .cloned()
            .collect();
        apps.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(paginate(apps, page))
    }

    fn owned_application<'a>(
        inner: &'a mut Inner,
        owner: EmployerId,
        id: ApplicationId,
    ) -> ApiResult<&'a mut Application> {
        let job_id = inner
            .applications
            .get(&id)
            .map(|a| a.job_id)
            .ok_or_else(|| ApiError::not_found(format!("application {id}")))?;
        Self::owned_job(inner, owner, job_id)?;
        inner
            .applications
            .get_mut(&id)
            .ok_or_else(|| ApiError::not_found(format!("application {id}")))
    }

    pub fn set_status(&self, owner: EmployerId, id: ApplicationId, status: ApplicationStatus) -> ApiResult<()> {
        if status == ApplicationStatus::Unknown {
            return Err(ApiError::validation("unknown status"));
        }
        let mut inner = self.lock()?;
        let app = Self::owned_application(&mut inner, owner, id)?;
        debug!(application_id = %id, from = %app.status, to = %status, "status changed");
        app.status = status;
        Ok(())
    }

    pub fn record_notification(&self, owner: EmployerId, notification: StatusNotification) -> ApiResult<()> {
        let mut inner = self.lock()?;
        let app = Self::owned_application(&mut inner, owner, notification.application_id)?;
        if !app.notifications_enabled {
            debug!(application_id = %app.id, "applicant not subscribed, notification dropped");
            return Ok(());
        }
        inner.notifications.push(notification);
        Ok(())
    }

    pub fn set_notification_preference(&self, applicant: UserId, pref: NotificationPreference) -> ApiResult<()> {
        let mut inner = self.lock()?;
        match inner.applications.get_mut(&pref.application_id) {
            Some(app) if app.applicant_id == applicant => {
                app.notifications_enabled = pref.enabled;
                Ok(())
            }
            _ => Err(ApiError::not_found(format!("application {}", pref.application_id))),
        }
    }

    pub fn notifications(&self) -> ApiResult<Vec<StatusNotification>> {
        Ok(self.lock()?.notifications.clone())
    }

    pub fn resume(&self, id: ApplicationId) -> ApiResult<Bytes> {
        let inner = self.lock()?;
        inner
            .resumes
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::not_found(format!("resume for application {id}")))
    }
}
