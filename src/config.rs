//! Core tuning knobs loaded from environment variables.
//!
//! DESIGN
//! ======
//! Every knob has a compiled-in default so the crate works with zero
//! configuration; env vars exist for deployments that need to move the
//! API origin or tune indicator timing.

use std::time::Duration;

const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";
const DEFAULT_MIN_VISIBLE_MS: u64 = 1000;
const DEFAULT_CREDENTIAL_TTL_SECS: u64 = 7 * 24 * 60 * 60;

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

/// Process-wide configuration for the coordination core.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Origin of the REST backend, no trailing slash.
    pub api_base_url: String,
    /// Minimum time the busy indicator stays visible once shown.
    pub min_visible: Duration,
    /// How long a persisted auth token remains valid in the credential store.
    pub credential_ttl: Duration,
}

impl CoreConfig {
    /// Load from `PLAZA_API_BASE_URL`, `LOADING_MIN_VISIBLE_MS`,
    /// `AUTH_TOKEN_TTL_SECS`; missing or unparseable values fall back to
    /// defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = std::env::var("PLAZA_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.into());
        Self {
            api_base_url: base_url.trim_end_matches('/').to_owned(),
            min_visible: Duration::from_millis(env_parse("LOADING_MIN_VISIBLE_MS", DEFAULT_MIN_VISIBLE_MS)),
            credential_ttl: Duration::from_secs(env_parse("AUTH_TOKEN_TTL_SECS", DEFAULT_CREDENTIAL_TTL_SECS)),
        }
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.trim_end_matches('/').to_owned(),
            min_visible: Duration::from_millis(DEFAULT_MIN_VISIBLE_MS),
            credential_ttl: Duration::from_secs(DEFAULT_CREDENTIAL_TTL_SECS),
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
