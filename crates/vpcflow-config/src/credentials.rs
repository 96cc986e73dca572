//! API credentials resolution

use crate::error::{ConfigError, Result};
use vpcflow_selectel::DEFAULT_BASE_URL;

pub const TOKEN_ENV: &str = "SEL_TOKEN";
pub const URL_ENV: &str = "SEL_URL";

/// Token and endpoint used to reach the Selectel API
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
    pub base_url: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Credentials {
    /// Resolve credentials
    ///
    /// Explicit values win, then `SEL_TOKEN` / `SEL_URL`, then the default
    /// base URL. Empty strings count as unset.
    pub fn resolve(token: Option<String>, base_url: Option<String>) -> Result<Self> {
        let token = non_empty(token)
            .or_else(|| non_empty(std::env::var(TOKEN_ENV).ok()))
            .ok_or(ConfigError::MissingToken)?;

        let base_url = non_empty(base_url)
            .or_else(|| non_empty(std::env::var(URL_ENV).ok()))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        tracing::debug!("Using Selectel API at {}", base_url);
        Ok(Self { token, base_url })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
