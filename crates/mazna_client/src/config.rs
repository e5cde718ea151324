use crate::MaznaError;
use secrecy::SecretString;

/// Backend address used when `MAZNA_BASE_URL` is not set (local Flask dev server).
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

#[derive(Clone, Debug)]
pub struct Config {
    pub base_url: String,
    pub account_id: Option<i64>,
    pub auth_token: Option<SecretString>,
}

impl Config {
    pub fn from_env() -> Result<Self, MaznaError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads configuration values using the provided
    /// function instead of the process environment.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, MaznaError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let base_url = get("MAZNA_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(MaznaError::Config(format!(
                "MAZNA_BASE_URL must be an http(s) URL, got {base_url}"
            )));
        }

        let account_id = match get("MAZNA_ACCOUNT_ID").filter(|v| !v.trim().is_empty()) {
            Some(raw) => Some(raw.trim().parse::<i64>().map_err(|_| {
                MaznaError::Config(format!("MAZNA_ACCOUNT_ID must be an integer, got {raw}"))
            })?),
            None => None,
        };

        let auth_token = get("MAZNA_AUTH_TOKEN")
            .filter(|v| !v.is_empty())
            .map(|v| SecretString::new(v.into()));

        Ok(Self {
            base_url,
            account_id,
            auth_token,
        })
    }
}
