//! Employer-driven application status changes.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info, warn};

use jobboard_client::{ClientError, Gateway};
use jobboard_types::api::StatusNotification;
use jobboard_types::{ApplicationId, ApplicationStatus, StatusAction};

/// Application ids with a status change currently in flight.
#[derive(Debug, Clone, Default)]
pub struct InFlightSet {
    ids: Arc<Mutex<HashSet<ApplicationId>>>,
}

impl InFlightSet {
    /// Claim `id`. Returns `None` while another change for it is running.
    pub fn try_begin(&self, id: ApplicationId) -> Option<InFlightGuard> {
        let mut ids = self.ids.lock().unwrap_or_else(PoisonError::into_inner);
        if !ids.insert(id) {
            return None;
        }
        Some(InFlightGuard { ids: self.ids.clone(), id })
    }

    pub fn contains(&self, id: ApplicationId) -> bool {
        self.ids.lock().unwrap_or_else(PoisonError::into_inner).contains(&id)
    }
}

/// Releases its id when dropped, whether the change succeeded or not.
#[derive(Debug)]
pub struct InFlightGuard {
    ids: Arc<Mutex<HashSet<ApplicationId>>>,
    id: ApplicationId,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.ids.lock().unwrap_or_else(PoisonError::into_inner).remove(&self.id);
    }
}

/// One action button as the view should render it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionState {
    pub action: StatusAction,
    pub enabled: bool,
}

pub fn action_states(current: ApplicationStatus, busy: bool) -> [ActionState; 3] {
    StatusAction::ALL.map(|action| ActionState {
        action,
        enabled: !busy && action.applies_to(current),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    AlreadyInState,
    InFlight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// No request was sent.
    Skipped(SkipReason),
    /// The new status is stored. `notified` is false when the follow-up
    /// notification failed; the status change stands regardless.
    Committed { status: ApplicationStatus, notified: bool },
}

pub struct StatusTransitions<G> {
    gateway: G,
    in_flight: InFlightSet,
}

impl<G: Gateway> StatusTransitions<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway, in_flight: InFlightSet::default() }
    }

    pub fn in_flight(&self) -> &InFlightSet {
        &self.in_flight
    }

    pub fn action_states(&self, id: ApplicationId, current: ApplicationStatus) -> [ActionState; 3] {
        action_states(current, self.in_flight.contains(id))
    }

    pub async fn transition(
        &self,
        id: ApplicationId,
        current: ApplicationStatus,
        action: StatusAction,
    ) -> Result<TransitionOutcome, ClientError> {
        let status = action.target();
        if !action.applies_to(current) {
            debug!(%id, %status, "application already has target status");
            return Ok(TransitionOutcome::Skipped(SkipReason::AlreadyInState));
        }
        let Some(_guard) = self.in_flight.try_begin(id) else {
            debug!(%id, "status change already in flight");
            return Ok(TransitionOutcome::Skipped(SkipReason::InFlight));
        };

        self.gateway.update_application_status(id, status).await?;
        info!(%id, from = %current, to = %status, "application status changed");

        let notified = match self
            .gateway
            .notify_status_change(StatusNotification { application_id: id, status })
            .await
        {
            Ok(()) => true,
            Err(e) => {
                warn!(%id, error = %e, "status notification failed, status change kept");
                false
            }
        };

        Ok(TransitionOutcome::Committed { status, notified })
    }
}
