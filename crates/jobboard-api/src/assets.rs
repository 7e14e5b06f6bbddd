use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};

use jobboard_types::ApplicationId;

use crate::auth::AppState;
use crate::error::{ApiError, ApiResult};

/// `cv_{application_id}.pdf` -> application id.
fn parse_resume_name(file: &str) -> Option<ApplicationId> {
    file.strip_prefix("cv_")?
        .strip_suffix(".pdf")?
        .parse()
        .ok()
        .map(ApplicationId)
}

pub async fn resume(
    State(state): State<AppState>,
    Path(file): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_resume_name(&file).ok_or_else(|| ApiError::not_found(file.clone()))?;
    let data = state.store.resume(id)?;
    Ok(([(header::CONTENT_TYPE, "application/pdf")], data))
}
