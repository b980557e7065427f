use serde::Serialize;

/// Health response returned by the `/healthcheck` route.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Poll status ("loading", "ok" or "stale").
    pub status: String,
    /// RFC3339 timestamp of the last successful poll.
    pub last_poll_at: Option<String>,
}

impl HealthResponse {
    /// No poll has succeeded yet.
    pub fn loading() -> Self {
        Self {
            status: "loading".to_string(),
            last_poll_at: None,
        }
    }

    /// Latest poll succeeded.
    pub fn ok(last_poll_at: String) -> Self {
        Self {
            status: "ok".to_string(),
            last_poll_at: Some(last_poll_at),
        }
    }

    /// Latest poll failed; the last known state is still being displayed.
    pub fn stale(last_poll_at: String) -> Self {
        Self {
            status: "stale".to_string(),
            last_poll_at: Some(last_poll_at),
        }
    }
}
