use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use bytes::Bytes;
use tracing::debug;

use jobboard_types::api::{
    APPLY_FIELD_JOB_ID, APPLY_FIELD_MESSAGE, APPLY_FIELD_RESUME, EmployerApplicationsQuery,
    NotificationPreference, PageQuery, StatusNotification, UpdateStatusRequest,
};
use jobboard_types::{Application, ApplicationId, JobId};

use crate::auth::AppState;
use crate::error::{ApiError, ApiResult};
use crate::middleware::Claims;

const PDF_MAGIC: &[u8] = b"%PDF";

#[derive(Default)]
struct ApplyForm {
    job_id: Option<JobId>,
    message: Option<String>,
    resume: Option<(Option<String>, Bytes)>,
}

async fn read_apply_form(mut multipart: Multipart) -> ApiResult<ApplyForm> {
    let mut form = ApplyForm::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation(format!("malformed multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(APPLY_FIELD_JOB_ID) => {
                let raw = field.text().await.map_err(|e| ApiError::validation(e.to_string()))?;
                let id: i64 = raw
                    .trim()
                    .parse()
                    .map_err(|_| ApiError::validation(format!("invalid job_id {raw:?}")))?;
                form.job_id = Some(JobId(id));
            }
            Some(APPLY_FIELD_MESSAGE) => {
                form.message = Some(field.text().await.map_err(|e| ApiError::validation(e.to_string()))?);
            }
            Some(APPLY_FIELD_RESUME) => {
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await.map_err(|e| ApiError::validation(e.to_string()))?;
                form.resume = Some((content_type, data));
            }
            other => debug!(field = ?other, "ignoring unknown multipart field"),
        }
    }
    Ok(form)
}

pub async fn apply(
    State(state): State<AppState>,
    claims: Claims,
    multipart: Multipart,
) -> ApiResult<impl IntoResponse> {
    let applicant = claims.jobseeker()?;
    let form = read_apply_form(multipart).await?;

    let job_id = form.job_id.ok_or_else(|| ApiError::validation("job_id is required"))?;
    let (content_type, resume) = form.resume.ok_or_else(|| ApiError::validation("cv is required"))?;
    let is_pdf = content_type.as_deref() == Some("application/pdf") || resume.starts_with(PDF_MAGIC);
    if !is_pdf {
        return Err(ApiError::validation("cv must be a PDF document"));
    }

    let application = state.store.create_application(applicant, job_id, form.message, resume)?;
    Ok((StatusCode::CREATED, Json(application)))
}

pub async fn user_applications(
    State(state): State<AppState>,
    claims: Claims,
    Query(page): Query<PageQuery>,
) -> ApiResult<Json<Vec<Application>>> {
    let applicant = claims.jobseeker()?;
    Ok(Json(state.store.user_applications(applicant, page)?))
}

pub async fn user_application(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<ApplicationId>,
) -> ApiResult<Json<Application>> {
    let applicant = claims.jobseeker()?;
    Ok(Json(state.store.user_application(applicant, id)?))
}

pub async fn delete_user_application(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<ApplicationId>,
) -> ApiResult<StatusCode> {
    let applicant = claims.jobseeker()?;
    state.store.delete_user_application(applicant, id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn job_applications(
    State(state): State<AppState>,
    claims: Claims,
    Query(query): Query<EmployerApplicationsQuery>,
) -> ApiResult<Json<Vec<Application>>> {
    let owner = claims.employer()?;
    Ok(Json(state.store.job_applications(owner, query.job_id, query.page())?))
}

pub async fn update_status(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<ApplicationId>,
    Json(req): Json<UpdateStatusRequest>,
) -> ApiResult<StatusCode> {
    let owner = claims.employer()?;
    state.store.set_status(owner, id, req.new_status)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn notify_status_change(
    State(state): State<AppState>,
    claims: Claims,
    Json(req): Json<StatusNotification>,
) -> ApiResult<StatusCode> {
    let owner = claims.employer()?;
    state.store.record_notification(owner, req)?;
    Ok(StatusCode::ACCEPTED)
}

pub async fn set_notification_preference(
    State(state): State<AppState>,
    claims: Claims,
    Json(req): Json<NotificationPreference>,
) -> ApiResult<StatusCode> {
    let applicant = claims.jobseeker()?;
    state.store.set_notification_preference(applicant, req)?;
    Ok(StatusCode::NO_CONTENT)
}
