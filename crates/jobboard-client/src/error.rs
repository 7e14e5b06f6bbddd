use jobboard_types::{ErrorBody, ErrorCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("api error {status} ({code}): {message}")]
    Api {
        status: u16,
        code: ErrorCode,
        message: String,
    },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("request requires a signed-in session")]
    NotAuthenticated,

    #[error("invalid value {value:?} for {key}")]
    Config { key: &'static str, value: String },
}

pub type Result<T, E = ClientError> = std::result::Result<T, E>;

impl ClientError {
    /// Build an API error from a non-2xx status and its raw body. Bodies that do
    /// not follow the `{code, message}` contract fall back to a status-derived code.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        match serde_json::from_slice::<ErrorBody>(body) {
            Ok(ErrorBody { code, message }) => Self::Api { status, code, message },
            Err(_) => Self::Api {
                status,
                code: ErrorCode::from_status(status),
                message: String::from_utf8_lossy(body).into_owned(),
            },
        }
    }

    /// Structured code for API errors; `None` for transport-level failures.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Api { code, .. } => Some(*code),
            Self::NotAuthenticated => Some(ErrorCode::Unauthorized),
            _ => None,
        }
    }

    pub fn is(&self, code: ErrorCode) -> bool {
        self.code() == Some(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_body_is_decoded() {
        let body = br#"{"code":"already_applied","message":"duplicate"}"#;
        let err = ClientError::from_response(409, body);
        assert!(err.is(ErrorCode::AlreadyApplied));
    }

    #[test]
    fn free_text_body_falls_back_to_status() {
        let err = ClientError::from_response(404, b"nothing here");
        assert_eq!(err.code(), Some(ErrorCode::NotFound));
        match err {
            ClientError::Api { message, .. } => assert_eq!(message, "nothing here"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
