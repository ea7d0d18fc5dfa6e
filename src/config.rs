use std::time::Duration;

use crate::errors::AppError;

pub const DEFAULT_API_URL: &str = "https://test.v5.pryaniky.com/ru/data/v3/testmethods/docs";
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Minimum length of `SESSION_KEY` accepted as cookie signing key.
pub const MIN_SESSION_KEY_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_url: String,
    pub bind: String,
    pub request_timeout: Duration,
    pub session_key: Option<String>,
}

impl AppConfig {
    /// Read settings from the process environment (after `.env` is loaded).
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let api_url = lookup("DOCDESK_API_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let bind = lookup("DOCDESK_BIND")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BIND.to_string());

        let timeout_secs = match lookup("DOCDESK_REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                AppError::Config(format!("DOCDESK_REQUEST_TIMEOUT_SECS must be a whole number, got {raw:?}"))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(AppError::Config("DOCDESK_REQUEST_TIMEOUT_SECS must be positive".to_string()));
        }

        let session_key = match lookup("SESSION_KEY") {
            Some(val) if val.len() >= MIN_SESSION_KEY_LEN => Some(val),
            Some(val) => {
                log::warn!(
                    "SESSION_KEY too short ({} bytes, need {MIN_SESSION_KEY_LEN}+), ignoring it",
                    val.len()
                );
                None
            }
            None => None,
        };

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            bind,
            request_timeout: Duration::from_secs(timeout_secs),
            session_key,
        })
    }
}
