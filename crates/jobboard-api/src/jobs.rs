use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use jobboard_types::api::{CreateJobRequest, JobSearchQuery, PageQuery, UpdateJobRequest};
use jobboard_types::{JobId, JobPosting};

use crate::auth::AppState;
use crate::error::{ApiError, ApiResult};
use crate::middleware::Claims;

pub async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobSearchQuery>,
) -> ApiResult<Json<Vec<JobPosting>>> {
    let query = JobSearchQuery {
        title: query.title.filter(|t| !t.trim().is_empty()),
        industry: query.industry.filter(|i| !i.trim().is_empty()),
        job_location: query.job_location.filter(|l| !l.trim().is_empty()),
        ..query
    };
    Ok(Json(state.store.search_jobs(&query)?))
}

pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<JobId>,
) -> ApiResult<Json<JobPosting>> {
    Ok(Json(state.store.job(id)?))
}

pub async fn create_job(
    State(state): State<AppState>,
    claims: Claims,
    Json(req): Json<CreateJobRequest>,
) -> ApiResult<impl IntoResponse> {
    let owner = claims.employer()?;
    if req.title.trim().is_empty() {
        return Err(ApiError::validation("title is required"));
    }
    if req.salary_min > req.salary_max {
        return Err(ApiError::validation("salary_min exceeds salary_max"));
    }
    let job = state.store.create_job(owner, req)?;
    Ok((StatusCode::CREATED, Json(job)))
}

pub async fn update_job(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<JobId>,
    Json(req): Json<UpdateJobRequest>,
) -> ApiResult<Json<JobPosting>> {
    let owner = claims.employer()?;
    if req.is_empty() {
        return Err(ApiError::validation("nothing to update"));
    }
    Ok(Json(state.store.update_job(owner, id, req)?))
}

pub async fn delete_job(
    State(state): State<AppState>,
    claims: Claims,
    Path(id): Path<JobId>,
) -> ApiResult<StatusCode> {
    let owner = claims.employer()?;
    state.store.delete_job(owner, id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn employer_jobs(
    State(state): State<AppState>,
    claims: Claims,
    Query(page): Query<PageQuery>,
) -> ApiResult<Json<Vec<JobPosting>>> {
    let owner = claims.employer()?;
    Ok(Json(state.store.employer_jobs(owner, page)?))
}
