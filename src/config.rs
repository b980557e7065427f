//! Application-level configuration loading: remote source, poll cadence and animation windows.

use std::{env, fs, io::ErrorKind, path::PathBuf, time::Duration};

use serde::Deserialize;
use tracing::{info, warn};

use crate::state::animation::AnimationTimings;

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "SCOREBOARD_CONFIG_PATH";
/// Environment variable that overrides the configured source URL.
const SOURCE_URL_ENV: &str = "SCOREBOARD_SOURCE_URL";
/// Environment variable that overrides the configured auth token.
const AUTH_TOKEN_ENV: &str = "SCOREBOARD_AUTH_TOKEN";

const DEFAULT_SOURCE_URL: &str = "http://localhost:5000/api/game-state";
const DEFAULT_POLL_INTERVAL_MS: u64 = 1_000;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_FLASH_MS: u64 = 400;
const DEFAULT_TOUCHDOWN_MS: u64 = 4_000;
const DEFAULT_FIELD_GOAL_MS: u64 = 3_500;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    /// Endpoint returning the authoritative game state.
    pub source_url: String,
    /// Optional bearer token sent with every poll.
    pub auth_token: Option<String>,
    poll_interval_ms: u64,
    request_timeout_ms: u64,
    flash_ms: u64,
    touchdown_ms: u64,
    field_goal_ms: u64,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to built-in defaults, then
    /// apply environment overrides.
    pub fn load() -> Self {
        let path = resolve_config_path();
        let config = match fs::read_to_string(&path) {
            Ok(contents) => match Self::from_json(&contents) {
                Ok(config) => {
                    info!(
                        path = %path.display(),
                        source_url = %config.source_url,
                        "loaded scoreboard config"
                    );
                    config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        };

        config.with_overrides(env_non_empty(SOURCE_URL_ENV), env_non_empty(AUTH_TOKEN_ENV))
    }

    /// Parse a JSON config document; absent fields keep their defaults.
    pub fn from_json(contents: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<RawConfig>(contents).map(Into::into)
    }

    /// How often the remote source is polled.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Upper bound for a single poll request.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Visibility windows of the animations.
    pub fn timings(&self) -> AnimationTimings {
        AnimationTimings {
            flash: Duration::from_millis(self.flash_ms),
            touchdown: Duration::from_millis(self.touchdown_ms),
            field_goal: Duration::from_millis(self.field_goal_ms),
        }
    }

    fn with_overrides(mut self, source_url: Option<String>, auth_token: Option<String>) -> Self {
        if let Some(url) = source_url {
            info!(source_url = %url, "source URL overridden from environment");
            self.source_url = url;
        }
        if auth_token.is_some() {
            self.auth_token = auth_token;
        }
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        RawConfig::default().into()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    source_url: Option<String>,
    auth_token: Option<String>,
    poll_interval_ms: Option<u64>,
    request_timeout_ms: Option<u64>,
    flash_ms: Option<u64>,
    touchdown_ms: Option<u64>,
    field_goal_ms: Option<u64>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        Self {
            source_url: value
                .source_url
                .unwrap_or_else(|| DEFAULT_SOURCE_URL.to_string()),
            auth_token: value.auth_token.filter(|token| !token.is_empty()),
            // A zero interval would make tokio's interval panic.
            poll_interval_ms: value
                .poll_interval_ms
                .unwrap_or(DEFAULT_POLL_INTERVAL_MS)
                .max(1),
            request_timeout_ms: value
                .request_timeout_ms
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS),
            flash_ms: value.flash_ms.unwrap_or(DEFAULT_FLASH_MS),
            touchdown_ms: value.touchdown_ms.unwrap_or(DEFAULT_TOUCHDOWN_MS),
            field_goal_ms: value.field_goal_ms.unwrap_or(DEFAULT_FIELD_GOAL_MS),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

fn env_non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_scoreboard_timings() {
        let config = AppConfig::default();
        assert_eq!(config.source_url, DEFAULT_SOURCE_URL);
        assert_eq!(config.poll_interval(), Duration::from_secs(1));
        assert_eq!(config.timings(), AnimationTimings::default());
        assert!(config.auth_token.is_none());
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let config = AppConfig::from_json(
            r#"{ "sourceUrl": "http://scores.local/api/game-state", "touchdownMs": 5000 }"#,
        )
        .unwrap();

        assert_eq!(config.source_url, "http://scores.local/api/game-state");
        assert_eq!(config.timings().touchdown, Duration::from_secs(5));
        assert_eq!(config.timings().flash, Duration::from_millis(400));
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn zero_poll_interval_is_clamped() {
        let config = AppConfig::from_json(r#"{ "pollIntervalMs": 0 }"#).unwrap();
        assert_eq!(config.poll_interval(), Duration::from_millis(1));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(AppConfig::from_json(r#"{ "pollInterval": 1000 }"#).is_err());
    }

    #[test]
    fn environment_overrides_win() {
        let config = AppConfig::default().with_overrides(
            Some("http://override/api/game-state".into()),
            Some("secret".into()),
        );
        assert_eq!(config.source_url, "http://override/api/game-state");
        assert_eq!(config.auth_token.as_deref(), Some("secret"));
    }
}
