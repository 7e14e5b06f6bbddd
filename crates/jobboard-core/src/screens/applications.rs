use tracing::warn;

use jobboard_client::Gateway;
use jobboard_types::api::EmployerApplicationsQuery;
use jobboard_types::{Application, ApplicationId, JobId, JobPosting, PrincipalKind, StatusAction, StatusBadge};

use super::{authorize, list_notice};
use crate::Redirect;
use crate::notice::Notice;
use crate::pagination::{PageEffect, Paginator};
use crate::session::Session;
use crate::status::{ActionState, StatusTransitions, TransitionOutcome};
use crate::subscription::NotificationToggle;

/// Everything the employer sees for one application.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationRow<'a> {
    pub application: &'a Application,
    pub badge: StatusBadge,
    pub actions: [ActionState; 3],
    pub resume_url: String,
}

/// Applications received for one of the employer's jobs.
pub struct EmployerApplicationsScreen<G> {
    gateway: G,
    job_id: JobId,
    job: Option<JobPosting>,
    pages: Paginator<Application>,
    transitions: StatusTransitions<G>,
    notice: Option<Notice>,
}

impl<G: Gateway> EmployerApplicationsScreen<G> {
    pub fn open(session: &Session, base: &G, job_id: JobId) -> Result<Self, Redirect> {
        authorize(session, Some(PrincipalKind::Employer))?;
        let gateway = session.gateway(base);
        Ok(Self {
            transitions: StatusTransitions::new(gateway.clone()),
            gateway,
            job_id,
            job: None,
            pages: Paginator::default(),
            notice: None,
        })
    }

    pub fn job(&self) -> Option<&JobPosting> {
        self.job.as_ref()
    }

    pub fn pages(&self) -> &Paginator<Application> {
        &self.pages
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn transitions(&self) -> &StatusTransitions<G> {
        &self.transitions
    }

    pub fn rows(&self) -> Vec<ApplicationRow<'_>> {
        self.pages
            .items()
            .iter()
            .map(|application| ApplicationRow {
                application,
                badge: application.status.badge(),
                actions: self.transitions.action_states(application.id, application.status),
                resume_url: self.gateway.resume_url(application.id),
            })
            .collect()
    }

    /// Load the job header and the first page together.
    pub async fn mount(&mut self) {
        let gateway = self.gateway.clone();
        let job_id = self.job_id;
        let (job, ()) = tokio::join!(gateway.get_job(job_id), self.fetch(1));
        match job {
            Ok(job) => self.job = Some(job),
            Err(e) => {
                warn!(%job_id, error = %e, "failed to load job");
                self.notice = Some(Notice::from_error(&e, Notice::LoadFailed));
            }
        }
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
        let job_id = self.job_id;
        self.pages
            .load(page, move |p| async move {
                gateway
                    .job_applications(EmployerApplicationsQuery { job_id, page: p.page, page_size: p.page_size })
                    .await
            })
            .await;
        self.notice = list_notice(&self.pages, self.notice.take());
    }

    /// Run a status action. A committed change re-reads the current page
    /// instead of patching the row.
    pub async fn apply_action(&mut self, id: ApplicationId, action: StatusAction) -> Option<TransitionOutcome> {
        let current = self.pages.find(&id)?.status;
        match self.transitions.transition(id, current, action).await {
            Ok(outcome) => {
                if let TransitionOutcome::Committed { .. } = outcome {
                    self.notice = None;
                    self.reload().await;
                }
                Some(outcome)
            }
            Err(e) => {
                self.notice = Some(Notice::from_error(&e, Notice::StatusUpdateFailed));
                None
            }
        }
    }
}

/// The signed-in jobseeker's applications.
pub struct MyApplicationsScreen<G> {
    gateway: G,
    pages: Paginator<Application>,
    toggle: NotificationToggle,
    pending_delete: Option<ApplicationId>,
    notice: Option<Notice>,
}

impl<G: Gateway> MyApplicationsScreen<G> {
    pub fn open(session: &Session, base: &G) -> Result<Self, Redirect> {
        authorize(session, Some(PrincipalKind::Jobseeker))?;
        Ok(Self {
            gateway: session.gateway(base),
            pages: Paginator::default(),
            toggle: NotificationToggle::default(),
            pending_delete: None,
            notice: None,
        })
    }

    pub fn pages(&self) -> &Paginator<Application> {
        &self.pages
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn pending_delete(&self) -> Option<ApplicationId> {
        self.pending_delete
    }

    pub fn pending_subscribe(&self) -> Option<ApplicationId> {
        self.toggle.pending()
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
        self.pages.load(page, move |p| async move { gateway.my_applications(p).await }).await;
        self.notice = list_notice(&self.pages, self.notice.take());
    }

    pub fn request_delete(&mut self, id: ApplicationId) {
        self.pending_delete = Some(id);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub async fn confirm_delete(&mut self) -> bool {
        let Some(id) = self.pending_delete.take() else {
            return false;
        };
        match self.gateway.delete_application(id).await {
            Ok(()) => {
                self.pages.remove(&id);
                self.notice = None;
                true
            }
            Err(e) => {
                warn!(application_id = %id, error = %e, "withdraw failed");
                self.notice = Some(Notice::from_error(&e, Notice::DeleteApplicationFailed));
                false
            }
        }
    }

    pub fn request_subscribe(&mut self, id: ApplicationId) {
        self.toggle.request_subscribe(id);
    }

    pub fn cancel_subscribe(&mut self) {
        self.toggle.cancel();
    }

    pub async fn confirm_subscribe(&mut self) -> bool {
        match self.toggle.confirm_subscribe(&self.gateway).await {
            Ok(Some(id)) => {
                self.pages.update(&id, |a| a.notifications_enabled = true);
                true
            }
            Ok(None) => false,
            Err(notice) => {
                self.notice = Some(notice);
                false
            }
        }
    }

    pub async fn unsubscribe(&mut self, id: ApplicationId) -> bool {
        match self.toggle.unsubscribe(&self.gateway, id).await {
            Ok(()) => {
                self.pages.update(&id, |a| a.notifications_enabled = false);
                true
            }
            Err(notice) => {
                self.notice = Some(notice);
                false
            }
        }
    }
}
