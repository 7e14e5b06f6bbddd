//! Employer-side guard against changing jobs that already have applicants.
//!
//! The read is only a courtesy check. The API enforces the rule itself and
//! answers with [`ErrorCode::JobHasApplications`], which maps to the same
//! notice.

use tracing::{info, warn};

use jobboard_client::{ClientError, Gateway};
use jobboard_types::api::{EmployerApplicationsQuery, UpdateJobRequest};
use jobboard_types::{ErrorCode, JobId, JobPosting};

use crate::notice::Notice;

/// Whether at least one application references `job_id`.
pub async fn has_applications<G: Gateway>(gateway: &G, job_id: JobId) -> Result<bool, ClientError> {
    let first = gateway
        .job_applications(EmployerApplicationsQuery { job_id, page: 1, page_size: 1 })
        .await?;
    Ok(!first.is_empty())
}

async fn ensure_unreferenced<G: Gateway>(gateway: &G, job_id: JobId, blocked: Notice, failed: Notice) -> Result<(), Notice> {
    match has_applications(gateway, job_id).await {
        Ok(false) => Ok(()),
        Ok(true) => {
            info!(%job_id, "job has applications, change blocked");
            Err(blocked)
        }
        Err(e) => {
            warn!(%job_id, error = %e, "application check failed");
            Err(Notice::from_error(&e, failed))
        }
    }
}

fn rejection(err: &ClientError, blocked: Notice, failed: Notice) -> Notice {
    if err.is(ErrorCode::JobHasApplications) {
        blocked
    } else {
        Notice::from_error(err, failed)
    }
}

pub async fn guarded_delete<G: Gateway>(gateway: &G, job_id: JobId) -> Result<(), Notice> {
    ensure_unreferenced(gateway, job_id, Notice::JobHasApplications, Notice::DeleteJobFailed).await?;
    gateway.delete_job(job_id).await.map_err(|e| {
        warn!(%job_id, error = %e, "delete job failed");
        rejection(&e, Notice::JobHasApplications, Notice::DeleteJobFailed)
    })?;
    info!(%job_id, "job deleted");
    Ok(())
}

pub async fn guarded_update<G: Gateway>(
    gateway: &G,
    job_id: JobId,
    changes: &UpdateJobRequest,
) -> Result<JobPosting, Notice> {
    ensure_unreferenced(gateway, job_id, Notice::JobEditBlocked, Notice::UpdateJobFailed).await?;
    gateway.update_job(job_id, changes).await.map_err(|e| {
        warn!(%job_id, error = %e, "update job failed");
        rejection(&e, Notice::JobEditBlocked, Notice::UpdateJobFailed)
    })
}
