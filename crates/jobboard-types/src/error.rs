use std::fmt;

use serde::{Deserialize, Serialize};

/// Machine-readable reason attached to every non-2xx API response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidCredentials,
    Validation,
    Unauthorized,
    Forbidden,
    NotFound,
    AlreadyApplied,
    JobHasApplications,
    Conflict,
    Internal,
}

impl ErrorCode {
    /// Best guess for responses whose body could not be decoded.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 | 422 => Self::Validation,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            409 => Self::Conflict,
            _ => Self::Internal,
        }
    }

    pub fn http_status(self) -> u16 {
        match self {
            Self::InvalidCredentials | Self::Unauthorized => 401,
            Self::Validation => 400,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::AlreadyApplied | Self::JobHasApplications | Self::Conflict => 409,
            Self::Internal => 500,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::InvalidCredentials => "invalid_credentials",
            Self::Validation => "validation",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::AlreadyApplied => "already_applied",
            Self::JobHasApplications => "job_has_applications",
            Self::Conflict => "conflict",
            Self::Internal => "internal",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
}

impl ErrorBody {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_uses_snake_case_codes() {
        let body = ErrorBody::new(ErrorCode::JobHasApplications, "job 4 has applications");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["code"], "job_has_applications");
    }

    #[test]
    fn status_fallback() {
        assert_eq!(ErrorCode::from_status(404), ErrorCode::NotFound);
        assert_eq!(ErrorCode::from_status(502), ErrorCode::Internal);
        assert_eq!(ErrorCode::AlreadyApplied.http_status(), 409);
    }
}
