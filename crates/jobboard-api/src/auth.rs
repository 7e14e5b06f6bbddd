use std::sync::Arc;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::{SaltString, rand_core::OsRng}};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use jsonwebtoken::{EncodingKey, Header, encode};
use tracing::info;

use jobboard_types::api::{AuthResponse, LoginRequest, RegisterEmployerRequest, RegisterJobseekerRequest};
use jobboard_types::{ErrorCode, PrincipalKind};

use crate::error::{ApiError, ApiResult};
use crate::middleware::Claims;
use crate::store::Store;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub store: Store,
    pub jwt_secret: String,
}

impl AppStateInner {
    pub fn new(jwt_secret: impl Into<String>) -> AppState {
        Arc::new(Self { store: Store::new(), jwt_secret: jwt_secret.into() })
    }
}

const TOKEN_LIFETIME_DAYS: i64 = 30;
const MIN_PASSWORD_LEN: usize = 6;

pub async fn register_jobseeker(
    State(state): State<AppState>,
    Json(req): Json<RegisterJobseekerRequest>,
) -> ApiResult<impl IntoResponse> {
    validate_credentials(&req.email, &req.password)?;
    if req.full_name.trim().is_empty() {
        return Err(ApiError::validation("full_name is required"));
    }
    if req.desired_salary_min > req.desired_salary_max {
        return Err(ApiError::validation("desired_salary_min exceeds desired_salary_max"));
    }

    let password_hash = hash_password(&req.password)?;
    let profile = state.store.insert_jobseeker(req, password_hash)?;
    let token = create_token(&state.jwt_secret, profile.id.0, PrincipalKind::Jobseeker)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse { access_token: token, user: Some(profile), employer: None }),
    ))
}

pub async fn register_employer(
    State(state): State<AppState>,
    Json(req): Json<RegisterEmployerRequest>,
) -> ApiResult<impl IntoResponse> {
    validate_credentials(&req.email, &req.password)?;
    if req.company_name.trim().is_empty() {
        return Err(ApiError::validation("company_name is required"));
    }

    let password_hash = hash_password(&req.password)?;
    let profile = state.store.insert_employer(req, password_hash)?;
    let token = create_token(&state.jwt_secret, profile.id.0, PrincipalKind::Employer)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse { access_token: token, user: None, employer: Some(profile) }),
    ))
}

pub async fn login_jobseeker(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let (profile, hash) = state
        .store
        .jobseeker_credentials(&req.email)?
        .ok_or_else(invalid_credentials)?;
    verify_password(&req.password, &hash)?;

    let token = create_token(&state.jwt_secret, profile.id.0, PrincipalKind::Jobseeker)?;
    info!(user_id = %profile.id, "jobseeker logged in");
    Ok(Json(AuthResponse { access_token: token, user: Some(profile), employer: None }))
}

pub async fn login_employer(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let (profile, hash) = state
        .store
        .employer_credentials(&req.email)?
        .ok_or_else(invalid_credentials)?;
    verify_password(&req.password, &hash)?;

    let token = create_token(&state.jwt_secret, profile.id.0, PrincipalKind::Employer)?;
    info!(employer_id = %profile.id, "employer logged in");
    Ok(Json(AuthResponse { access_token: token, user: None, employer: Some(profile) }))
}

fn invalid_credentials() -> ApiError {
    ApiError::new(ErrorCode::InvalidCredentials, "invalid email or password")
}

fn validate_credentials(email: &str, password: &str) -> ApiResult<()> {
    if !email.contains('@') {
        return Err(ApiError::validation("email is invalid"));
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

fn hash_password(password: &str) -> ApiResult<String> {
    // Hash password with Argon2id
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(ApiError::internal)
}

fn verify_password(password: &str, hash: &str) -> ApiResult<()> {
    let parsed_hash = PasswordHash::new(hash).map_err(ApiError::internal)?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| invalid_credentials())
}

pub fn create_token(secret: &str, subject: i64, kind: PrincipalKind) -> ApiResult<String> {
    let claims = Claims {
        sub: subject,
        kind,
        exp: (chrono::Utc::now() + chrono::Duration::days(TOKEN_LIFETIME_DAYS)).timestamp() as usize,
    };

    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
        .map_err(ApiError::internal)
}
