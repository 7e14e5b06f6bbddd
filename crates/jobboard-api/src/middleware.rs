use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use jobboard_types::{EmployerId, ErrorCode, PrincipalKind, UserId};

use crate::auth::AppState;
use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub kind: PrincipalKind,
    pub exp: usize,
}

impl Claims {
    pub fn jobseeker(&self) -> Result<UserId, ApiError> {
        match self.kind {
            PrincipalKind::Jobseeker => Ok(UserId(self.sub)),
            PrincipalKind::Employer => Err(ApiError::new(ErrorCode::Forbidden, "jobseeker account required")),
        }
    }

    pub fn employer(&self) -> Result<EmployerId, ApiError> {
        match self.kind {
            PrincipalKind::Employer => Ok(EmployerId(self.sub)),
            PrincipalKind::Jobseeker => Err(ApiError::new(ErrorCode::Forbidden, "employer account required")),
        }
    }
}

/// Extract and validate JWT from Authorization header.
impl FromRequestParts<AppState> for Claims {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(ApiError::unauthorized)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(ApiError::unauthorized)?;

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(state.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| ApiError::unauthorized())?;

        Ok(token_data.claims)
    }
}
