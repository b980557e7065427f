use tracing::debug;

use crate::{
    dto::{format_system_time, health::HealthResponse},
    state::{PollHealth, SharedState},
};

/// Report whether the scoreboard is loading, live, or showing a stale snapshot.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    let health = state.poll_health().await;
    let response = health_response(health);
    if health.last_attempt_failed {
        debug!(status = %response.status, "latest game state poll failed");
    }
    response
}

fn health_response(health: PollHealth) -> HealthResponse {
    match health.last_success {
        None => HealthResponse::loading(),
        Some(at) if health.last_attempt_failed => HealthResponse::stale(format_system_time(at)),
        Some(at) => HealthResponse::ok(format_system_time(at)),
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime};

    use super::*;

    #[test]
    fn failure_before_first_success_is_still_loading() {
        let response = health_response(PollHealth {
            last_success: None,
            last_attempt_failed: true,
        });
        assert_eq!(response.status, "loading");
        assert!(response.last_poll_at.is_none());
    }

    #[test]
    fn failure_after_success_is_stale() {
        let at = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let response = health_response(PollHealth {
            last_success: Some(at),
            last_attempt_failed: true,
        });
        assert_eq!(response.status, "stale");
        assert_eq!(
            response.last_poll_at.as_deref(),
            Some("2023-11-14T22:13:20Z")
        );
    }

    #[test]
    fn healthy_poller_is_ok() {
        let response = health_response(PollHealth {
            last_success: Some(SystemTime::now()),
            last_attempt_failed: false,
        });
        assert_eq!(response.status, "ok");
    }
}
