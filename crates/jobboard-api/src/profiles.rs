use axum::{Json, extract::State};

use jobboard_types::api::{UpdateEmployerRequest, UpdateJobseekerRequest};
use jobboard_types::{EmployerProfile, JobseekerProfile};

use crate::auth::AppState;
use crate::error::{ApiError, ApiResult};
use crate::middleware::Claims;

pub async fn get_jobseeker(
    State(state): State<AppState>,
    claims: Claims,
) -> ApiResult<Json<JobseekerProfile>> {
    Ok(Json(state.store.jobseeker(claims.jobseeker()?)?))
}

pub async fn update_jobseeker(
    State(state): State<AppState>,
    claims: Claims,
    Json(req): Json<UpdateJobseekerRequest>,
) -> ApiResult<Json<JobseekerProfile>> {
    let id = claims.jobseeker()?;
    if req.is_empty() {
        return Err(ApiError::validation("nothing to update"));
    }
    Ok(Json(state.store.update_jobseeker(id, req)?))
}

pub async fn get_employer(
    State(state): State<AppState>,
    claims: Claims,
) -> ApiResult<Json<EmployerProfile>> {
    Ok(Json(state.store.employer(claims.employer()?)?))
}

pub async fn update_employer(
    State(state): State<AppState>,
    claims: Claims,
    Json(req): Json<UpdateEmployerRequest>,
) -> ApiResult<Json<EmployerProfile>> {
    let id = claims.employer()?;
    if req.is_empty() {
        return Err(ApiError::validation("nothing to update"));
    }
    Ok(Json(state.store.update_employer(id, req)?))
}
