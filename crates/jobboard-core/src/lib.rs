//! View controllers of the job-board client.
//!
//! Each screen owns its view state and talks to the API through a
//! [`Gateway`](jobboard_client::Gateway). Session changes go through
//! [`SessionStore::dispatch`]; lists share the [`Paginator`].

pub mod job_guard;
pub mod notice;
pub mod pagination;
pub mod screens;
pub mod session;
pub mod status;
pub mod subscription;
pub mod validation;

pub use notice::{Notice, Severity};
pub use pagination::{Keyed, PAGE_SIZE, PageEffect, PageTicket, Paginator};
pub use session::{
    Access, FileSessionStorage, MemorySessionStorage, Principal, Session, SessionAction,
    SessionError, SessionStorage, SessionStore, StoredSession,
};
pub use status::{
    ActionState, InFlightGuard, InFlightSet, SkipReason, StatusTransitions, TransitionOutcome,
};
pub use subscription::NotificationToggle;
pub use validation::ValidationError;

/// Where a screen asks the shell to navigate next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    Login,
    JobList,
}
