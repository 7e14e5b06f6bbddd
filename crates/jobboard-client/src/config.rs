use std::path::PathBuf;
use std::time::Duration;

use jobboard_types::ApplicationId;

use crate::error::{ClientError, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api/v1";
pub const DEFAULT_ASSET_URL: &str = "http://localhost:8080";
pub const DEFAULT_SESSION_PATH: &str = "jobboard-session.json";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Versioned REST root, e.g. `http://host:8080/api/v1`.
    pub api_base_url: String,
    /// Origin static assets (uploaded resumes) are served from.
    pub asset_base_url: String,
    /// Where the session record is persisted between runs.
    pub session_path: PathBuf,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.into(),
            asset_base_url: DEFAULT_ASSET_URL.into(),
            session_path: DEFAULT_SESSION_PATH.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Load `.env` if present, then read the environment.
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(url) = lookup("JOBBOARD_API_URL") {
            config.api_base_url = normalize_base(&url, "JOBBOARD_API_URL")?;
        }
        if let Some(url) = lookup("JOBBOARD_ASSET_URL") {
            config.asset_base_url = normalize_base(&url, "JOBBOARD_ASSET_URL")?;
        }
        if let Some(path) = lookup("JOBBOARD_SESSION_PATH") {
            config.session_path = path.into();
        }
        if let Some(secs) = lookup("JOBBOARD_HTTP_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| ClientError::Config {
                key: "JOBBOARD_HTTP_TIMEOUT_SECS",
                value: secs.clone(),
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    pub fn with_api_base(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_asset_base(mut self, url: impl Into<String>) -> Self {
        self.asset_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Resumes are stored under a name derived from the application id.
    pub fn resume_url(&self, application_id: ApplicationId) -> String {
        format!("{}/assets/cvs/cv_{}.pdf", self.asset_base_url, application_id)
    }
}

fn normalize_base(url: &str, key: &'static str) -> Result<String> {
    let trimmed = url.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ClientError::Config { key, value: url.to_string() });
    }
    Ok(trimmed.to_string())
}
