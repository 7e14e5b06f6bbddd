use tracing::{info, warn};

use jobboard_client::{Gateway, ResumeUpload};
use jobboard_types::api::JobSearchQuery;
use jobboard_types::{Application, JobId, JobPosting, PrincipalKind};

use super::{authorize, list_notice};
use crate::Redirect;
use crate::job_guard;
use crate::notice::Notice;
use crate::pagination::{PageEffect, Paginator};
use crate::session::Session;
use crate::validation::{self, ValidationError};

/// Search inputs as typed. Blank inputs are not sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobFilters {
    pub query: String,
    pub industry: String,
    pub location: String,
    pub salary_min: String,
    pub salary_max: String,
}

impl JobFilters {
    pub fn to_query(&self) -> Result<JobSearchQuery, ValidationError> {
        let salary_min = validation::optional_amount("salary_min", &self.salary_min)?;
        let salary_max = validation::optional_amount("salary_max", &self.salary_max)?;
        validation::salary_range(salary_min, salary_max)?;
        Ok(JobSearchQuery {
            page: 1,
            page_size: crate::PAGE_SIZE,
            title: validation::optional(&self.query),
            industry: validation::optional(&self.industry),
            job_location: validation::optional(&self.location),
            salary_min,
            salary_max,
        })
    }
}

/// Public job search. Page changes keep the filters of the last search.
pub struct JobSearchScreen<G> {
    gateway: G,
    pub filters: JobFilters,
    applied: JobSearchQuery,
    pages: Paginator<JobPosting>,
    notice: Option<Notice>,
}

impl<G: Gateway> JobSearchScreen<G> {
    pub fn new(session: &Session, base: &G) -> Self {
        Self {
            gateway: session.gateway(base),
            filters: JobFilters::default(),
            applied: JobSearchQuery { page: 1, page_size: crate::PAGE_SIZE, ..Default::default() },
            pages: Paginator::default(),
            notice: None,
        }
    }

    pub fn pages(&self) -> &Paginator<JobPosting> {
        &self.pages
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub async fn mount(&mut self) {
        self.fetch(1).await;
    }

    /// Apply the current filters and go back to the first page.
    pub async fn search(&mut self) {
        match self.filters.to_query() {
            Ok(query) => {
                self.applied = query;
                self.notice = None;
                self.fetch(1).await;
            }
            Err(e) => self.notice = Some(e.into()),
        }
    }

    pub async fn change_page(&mut self, page: u32) -> PageEffect {
        self.fetch(page).await;
        PageEffect::ScrollToTop
    }

    pub async fn reload(&mut self) {
        self.fetch(self.pages.current_page()).await;
    }

    async fn fetch(&mut self, page: u32) {
        let gateway = self.gateway.clone();
        let mut query = self.applied.clone();
        self.pages
            .load(page, move |p| async move {
                query.page = p.page;
                query.page_size = p.page_size;
                gateway.search_jobs(&query).await
            })
            .await;
        self.notice = list_notice(&self.pages, self.notice.take());
    }
}

/// The signed-in employer's own postings.
pub struct EmployerJobsScreen<G> {
    gateway: G,
    pages: Paginator<JobPosting>,
    pending_delete: Option<JobId>,
    notice: Option<Notice>,
}

impl<G: Gateway> EmployerJobsScreen<G> {
    pub fn open(session: &Session, base: &G) -> Result<Self, Redirect> {
        authorize(session, Some(PrincipalKind::Employer))?;
        Ok(Self {
            gateway: session.gateway(base),
            pages: Paginator::default(),
            pending_delete: None,
            notice: None,
        })
    }

    pub fn pages(&self) -> &Paginator<JobPosting> {
        &self.pages
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn pending_delete(&self) -> Option<JobId> {
        self.pending_delete
    }

    pub async fn mount(&mut self) {
        self.fetch(1).await;
    }

    pub async fn change_page(&mut self, page: u32) -> PageEffect {
        self.fetch(page).await;
        PageEffect::None
    }

    pub async fn reload(&mut self) {
        self.fetch(self.pages.current_page()).await;
    }

    async fn fetch(&mut self, page: u32) {
        let gateway = self.gateway.clone();
        self.pages.load(page, move |p| async move { gateway.my_jobs(p).await }).await;
        self.notice = list_notice(&self.pages, self.notice.take());
    }

    pub fn request_delete(&mut self, id: JobId) {
        self.pending_delete = Some(id);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Delete the job awaiting confirmation. Jobs with applications stay.
    pub async fn confirm_delete(&mut self) -> bool {
        let Some(id) = self.pending_delete.take() else {
            return false;
        };
        match job_guard::guarded_delete(&self.gateway, id).await {
            Ok(()) => {
                self.pages.remove(&id);
                self.notice = None;
                true
            }
            Err(notice) => {
                self.notice = Some(notice);
                false
            }
        }
    }
}

/// A single posting. Employers may edit or delete it, jobseekers apply.
pub struct JobDetailsScreen<G> {
    gateway: G,
    viewer: Option<PrincipalKind>,
    job_id: JobId,
    job: Option<JobPosting>,
    notice: Option<Notice>,
}

impl<G: Gateway> JobDetailsScreen<G> {
    pub fn new(session: &Session, base: &G, job_id: JobId) -> Self {
        Self {
            gateway: session.gateway(base),
            viewer: session.kind(),
            job_id,
            job: None,
            notice: None,
        }
    }

    pub fn job(&self) -> Option<&JobPosting> {
        self.job.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn can_manage(&self) -> bool {
        self.viewer == Some(PrincipalKind::Employer)
    }

    pub async fn load(&mut self) {
        match self.gateway.get_job(self.job_id).await {
            Ok(job) => self.job = Some(job),
            Err(e) => {
                warn!(job_id = %self.job_id, error = %e, "failed to load job");
                self.notice = Some(Notice::from_error(&e, Notice::LoadFailed));
            }
        }
    }

    /// Save an edit and re-read the posting. Blocked once anyone applied.
    pub async fn save_edit(&mut self, edit: &super::JobEdit) -> bool {
        let Some(job) = self.job.as_ref() else {
            return false;
        };
        let changes = match edit.changes(job) {
            Ok(changes) => changes,
            Err(e) => {
                self.notice = Some(e.into());
                return false;
            }
        };
        if let Err(notice) = job_guard::guarded_update(&self.gateway, self.job_id, &changes).await {
            self.notice = Some(notice);
            return false;
        }
        info!(job_id = %self.job_id, "job updated");
        self.notice = Some(Notice::JobUpdated);
        self.load().await;
        true
    }

    pub async fn delete(&mut self) -> Option<Redirect> {
        match job_guard::guarded_delete(&self.gateway, self.job_id).await {
            Ok(()) => Some(Redirect::JobList),
            Err(notice) => {
                self.notice = Some(notice);
                None
            }
        }
    }

    /// Submit an application. Anonymous visitors are sent to sign in; the
    /// resume is checked before anything is sent.
    pub async fn apply(&mut self, message: &str, resume: Option<ResumeUpload>) -> Result<Option<Application>, Redirect> {
        match self.viewer {
            None => return Err(Redirect::Login),
            Some(PrincipalKind::Employer) => {
                self.notice = Some(Notice::ApplyOnlyForJobseekers);
                return Ok(None);
            }
            Some(PrincipalKind::Jobseeker) => {}
        }
        let resume = match resume {
            None => {
                self.notice = Some(Notice::ResumeRequired);
                return Ok(None);
            }
            Some(resume) if !resume.is_pdf() => {
                self.notice = Some(Notice::ResumeMustBePdf);
                return Ok(None);
            }
            Some(resume) => resume,
        };

        match self.gateway.apply(self.job_id, message.trim(), resume).await {
            Ok(application) => {
                info!(job_id = %self.job_id, application_id = %application.id, "applied");
                self.notice = Some(Notice::Applied);
                Ok(Some(application))
            }
            Err(e) => {
                warn!(job_id = %self.job_id, error = %e, "apply failed");
                self.notice = Some(Notice::from_error(&e, Notice::ApplyFailed));
                Ok(None)
            }
        }
    }
}
