//! One controller per client screen.
//!
//! Screens are headless: they hold the view state a renderer needs, run the
//! gateway calls behind each user action and report feedback as a
//! [`Notice`](crate::Notice). Protected screens are built with `open`, which
//! checks the session first and hands back a [`Redirect`] when access is
//! denied.

mod applications;
mod auth;
mod job_form;
mod jobs;
mod profile;

pub use applications::{ApplicationRow, EmployerApplicationsScreen, MyApplicationsScreen};
pub use auth::{EmployerRegistration, JobseekerRegistration, LoginScreen, RegisterScreen};
pub use job_form::{CreateJobScreen, JobDraft, JobEdit};
pub use jobs::{EmployerJobsScreen, JobDetailsScreen, JobFilters, JobSearchScreen};
pub use profile::{EmployerDraft, EmployerProfileScreen, JobseekerDraft, JobseekerProfileScreen};

use jobboard_types::PrincipalKind;

use crate::notice::Notice;
use crate::pagination::{Keyed, Paginator};
use crate::session::{Access, Session};
use crate::validation::{self, ValidationError};
use crate::Redirect;

fn authorize(session: &Session, required: Option<PrincipalKind>) -> Result<(), Redirect> {
    match session.authorize(required) {
        Access::Granted => Ok(()),
        Access::RedirectLogin => Err(Redirect::Login),
        Access::RedirectHome => Err(Redirect::JobList),
    }
}

/// Notice to show after a list fetch settles.
fn list_notice<T: Keyed>(pages: &Paginator<T>, current: Option<Notice>) -> Option<Notice> {
    if pages.load_failed() {
        Some(Notice::LoadFailed)
    } else {
        current.filter(|n| *n != Notice::LoadFailed)
    }
}

/// `Some(new)` when a mandatory text input differs from `old`.
fn changed_required(field: &'static str, input: &str, old: &str) -> Result<Option<String>, ValidationError> {
    let value = validation::required(field, input)?;
    Ok((value != old).then_some(value))
}

/// Like [`changed_required`] but a blank input is a valid (empty) value.
fn changed_optional(input: &str, old: &str) -> Option<String> {
    let value = input.trim();
    (value != old).then(|| value.to_string())
}

fn changed_amount(field: &'static str, input: &str, old: i64) -> Result<Option<i64>, ValidationError> {
    let value = validation::required_amount(field, input)?;
    Ok((value != old).then_some(value))
}
