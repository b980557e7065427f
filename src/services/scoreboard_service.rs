//! Owns the scoreboard engine and keeps the published view in step with polls and timers.

use std::{future, sync::Arc, time::Duration};

use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{Instant, sleep_until},
};
use tracing::{info, warn};

use crate::{
    config::AppConfig,
    dto::{game_state::GameState, scoreboard::ScoreboardView},
    error::ServiceError,
    services::{poller, sse_events},
    source::{GameStateSource, HttpGameStateSource, error::SourceResult},
    state::{
        SharedState,
        animation::AnimationTimings,
        engine::ScoreboardEngine,
    },
};

const POLL_CHANNEL_CAPACITY: usize = 4;

/// Handles of the background tasks started by [`spawn`].
pub struct ScoreboardTasks {
    poller: JoinHandle<()>,
    driver: JoinHandle<()>,
}

impl ScoreboardTasks {
    /// Stop polling and wait for the driver to tear the engine down.
    pub async fn shutdown(self) {
        self.poller.abort();
        let _ = self.poller.await;
        if let Err(err) = self.driver.await {
            warn!(error = %err, "scoreboard driver ended abnormally");
        }
    }
}

/// Build the HTTP game state source described by `config`.
pub fn http_source(config: &AppConfig) -> SourceResult<Arc<dyn GameStateSource>> {
    let source = HttpGameStateSource::new(
        config.source_url.clone(),
        config.request_timeout(),
        config.auth_token.clone(),
    )?;
    info!(
        url = source.url(),
        authenticated = config.auth_token.is_some(),
        "polling game state over HTTP"
    );
    Ok(Arc::new(source))
}

/// Start the poller and the engine driver.
pub fn spawn(
    state: SharedState,
    source: Arc<dyn GameStateSource>,
    poll_interval: Duration,
    timings: AnimationTimings,
) -> ScoreboardTasks {
    let (tx, rx) = mpsc::channel(POLL_CHANNEL_CAPACITY);
    let driver = tokio::spawn(run_driver(
        state.clone(),
        ScoreboardEngine::new(timings),
        rx,
    ));
    let poller = tokio::spawn(poller::run(state, source, poll_interval, tx));
    info!(?poll_interval, "scoreboard tasks started");

    ScoreboardTasks { poller, driver }
}

/// Drive `engine` from incoming polls and its own deadlines until the poll channel closes.
///
/// This task is the only writer of the engine. Each poll is applied in one synchronous step, so
/// no expiry can interleave with it. Pending timers are plain futures dropped on every loop
/// turn, which also cancels the clock tick as soon as it is no longer needed.
pub async fn run_driver(
    state: SharedState,
    mut engine: ScoreboardEngine,
    mut polls: mpsc::Receiver<GameState>,
) {
    loop {
        let deadline = engine.next_deadline(Instant::now());

        tokio::select! {
            received = polls.recv() => {
                let Some(game) = received else { break };
                let now = Instant::now();
                engine.expire(now);
                let events = engine.apply_poll(game, now);
                for event in &events {
                    sse_events::broadcast_scoring_event(&state, event);
                }
                publish(&state, &engine, now);
            }
            _ = sleep_until_deadline(deadline) => {
                let now = Instant::now();
                engine.expire(now);
                publish(&state, &engine, now);
            }
        }
    }

    engine.reset();
    state.publish_view(None);
    info!("scoreboard driver stopped");
}

/// Return the current reconciled view, failing while no poll has succeeded yet.
pub fn current_view(state: &SharedState) -> Result<ScoreboardView, ServiceError> {
    state.current_view().ok_or(ServiceError::Loading)
}

fn publish(state: &SharedState, engine: &ScoreboardEngine, now: Instant) {
    let view = engine.view(now);
    if state.publish_view(view.clone()) {
        if let Some(view) = &view {
            sse_events::broadcast_view(state, view);
        }
    }
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => future::pending().await,
    }
}
