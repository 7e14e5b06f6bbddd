//! Per-application notification opt-in.
//!
//! The preference is a plain boolean written with one idempotent request;
//! the last write wins and nothing is read back afterwards. Subscribing asks
//! for confirmation first, unsubscribing does not.

use tracing::{debug, warn};

use jobboard_client::{ClientError, Gateway};
use jobboard_types::ApplicationId;
use jobboard_types::api::NotificationPreference;

use crate::notice::Notice;

pub async fn set_notifications<G: Gateway>(
    gateway: &G,
    application_id: ApplicationId,
    enabled: bool,
) -> Result<(), ClientError> {
    debug!(%application_id, enabled, "setting notification preference");
    gateway
        .set_notification_preference(NotificationPreference { application_id, enabled })
        .await
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationToggle {
    pending: Option<ApplicationId>,
}

impl NotificationToggle {
    /// Application awaiting the subscribe confirmation, if any.
    pub fn pending(&self) -> Option<ApplicationId> {
        self.pending
    }

    pub fn request_subscribe(&mut self, application_id: ApplicationId) {
        self.pending = Some(application_id);
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Send the pending subscription. `Ok(None)` when nothing was pending.
    pub async fn confirm_subscribe<G: Gateway>(
        &mut self,
        gateway: &G,
    ) -> Result<Option<ApplicationId>, Notice> {
        let Some(id) = self.pending.take() else {
            return Ok(None);
        };
        match set_notifications(gateway, id, true).await {
            Ok(()) => Ok(Some(id)),
            Err(e) => {
                warn!(application_id = %id, error = %e, "subscribe failed");
                Err(Notice::from_error(&e, Notice::SubscribeFailed))
            }
        }
    }

    pub async fn unsubscribe<G: Gateway>(&mut self, gateway: &G, id: ApplicationId) -> Result<(), Notice> {
        if self.pending == Some(id) {
            self.pending = None;
        }
        set_notifications(gateway, id, false).await.map_err(|e| {
            warn!(application_id = %id, error = %e, "unsubscribe failed");
            Notice::from_error(&e, Notice::UnsubscribeFailed)
        })
    }
}
