//! Shared application state and the scoreboard engine building blocks.

pub mod animation;
pub mod clock;
pub mod engine;
pub mod expiring;
pub mod scoring;
mod sse;
pub mod view;

use std::{sync::Arc, time::SystemTime};

use tokio::sync::{RwLock, watch};

use crate::dto::scoreboard::ScoreboardView;

pub use self::sse::SseHub;

/// Shared handle to [`AppState`] passed to routes and background tasks.
pub type SharedState = Arc<AppState>;

/// Outcome of the most recent polls, as seen by the poller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollHealth {
    /// Arrival time of the last successful poll.
    pub last_success: Option<SystemTime>,
    /// Whether the most recent attempt failed.
    pub last_attempt_failed: bool,
}

/// Shared state read by the HTTP surface and written by the scoreboard tasks.
///
/// The engine itself is not in here: it is owned by the driver task, which publishes the
/// reconciled view through a watch channel.
pub struct AppState {
    view: watch::Sender<Option<ScoreboardView>>,
    sse: SseHub,
    poll_health: RwLock<PollHealth>,
    shutdown: watch::Sender<bool>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// The scoreboard starts in the loading state until the first poll is applied.
    pub fn new() -> SharedState {
        let (view_tx, _rx) = watch::channel(None);
        Arc::new(Self {
            view: view_tx,
            sse: SseHub::new(32),
            poll_health: RwLock::new(PollHealth::default()),
            shutdown: watch::Sender::new(false),
        })
    }

    /// Latest published view, `None` while loading.
    pub fn current_view(&self) -> Option<ScoreboardView> {
        self.view.borrow().clone()
    }

    /// Subscribe to view updates.
    pub fn view_watcher(&self) -> watch::Receiver<Option<ScoreboardView>> {
        self.view.subscribe()
    }

    /// Replace the published view. Returns `false` when it was already identical.
    pub fn publish_view(&self, view: Option<ScoreboardView>) -> bool {
        self.view.send_if_modified(|current| {
            if *current == view {
                return false;
            }
            *current = view;
            true
        })
    }

    /// Broadcast hub used for the scoreboard SSE stream.
    pub fn scoreboard_sse(&self) -> &SseHub {
        &self.sse
    }

    /// Snapshot of the poller's health record.
    pub async fn poll_health(&self) -> PollHealth {
        *self.poll_health.read().await
    }

    /// Record a successful poll received at `at`.
    pub async fn record_poll_success(&self, at: SystemTime) {
        let mut guard = self.poll_health.write().await;
        guard.last_success = Some(at);
        guard.last_attempt_failed = false;
    }

    /// Record a failed poll attempt.
    pub async fn record_poll_failure(&self) {
        let mut guard = self.poll_health.write().await;
        guard.last_attempt_failed = true;
    }

    /// Ask long-lived streams to end so the server can drain its connections.
    pub fn begin_shutdown(&self) {
        self.shutdown.send_replace(true);
    }

    /// Whether [`AppState::begin_shutdown`] has been called.
    pub fn is_shutting_down(&self) -> bool {
        *self.shutdown.borrow()
    }

    /// Subscribe to the shutdown flag.
    pub fn shutdown_watcher(&self) -> watch::Receiver<bool> {
        self.shutdown.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::{
        game_state::GameState,
        scoreboard::{AnimationState, FlashState},
    };

    fn sample_view(time_remaining: i64) -> ScoreboardView {
        ScoreboardView {
            game: GameState::new(0, 0, time_remaining, true),
            score_animating: FlashState::default(),
            touchdown_animation: AnimationState::idle(),
            field_goal_animation: AnimationState::idle(),
        }
    }

    #[test]
    fn publish_view_skips_identical_updates() {
        let state = AppState::new();
        let mut watcher = state.view_watcher();

        assert!(state.publish_view(Some(sample_view(60))));
        assert!(watcher.has_changed().unwrap());
        watcher.borrow_and_update();

        assert!(!state.publish_view(Some(sample_view(60))));
        assert!(!watcher.has_changed().unwrap());

        assert!(state.publish_view(None));
        assert!(state.current_view().is_none());
    }

    #[tokio::test]
    async fn poll_health_tracks_last_attempt() {
        let state = AppState::new();
        assert_eq!(state.poll_health().await, PollHealth::default());

        let at = SystemTime::now();
        state.record_poll_success(at).await;
        state.record_poll_failure().await;

        let health = state.poll_health().await;
        assert_eq!(health.last_success, Some(at));
        assert!(health.last_attempt_failed);
    }

    #[tokio::test]
    async fn shutdown_flag_reaches_existing_watchers() {
        let state = AppState::new();
        let mut watcher = state.shutdown_watcher();
        assert!(!state.is_shutting_down());

        state.begin_shutdown();
        assert!(state.is_shutting_down());
        assert!(*watcher.wait_for(|stopping| *stopping).await.unwrap());
    }
}
