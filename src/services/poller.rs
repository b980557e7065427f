use std::{
    sync::Arc,
    time::{Duration, SystemTime},
};

use tokio::{
    sync::mpsc,
    time::{MissedTickBehavior, interval},
};
use tracing::{debug, info, warn};

use crate::{dto::game_state::GameState, source::GameStateSource, state::SharedState};

/// Fetch the game state every `every` and forward each success to the driver.
///
/// Failures are logged and otherwise ignored: before the first success the scoreboard simply
/// keeps loading, afterwards the last known state stays on screen. Returns once the driver
/// side of `tx` is gone.
pub async fn run(
    state: SharedState,
    source: Arc<dyn GameStateSource>,
    every: Duration,
    tx: mpsc::Sender<GameState>,
) {
    let mut ticker = interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        match source.fetch().await {
            Ok(game) => {
                let recovered = state.poll_health().await.last_attempt_failed;
                state.record_poll_success(SystemTime::now()).await;
                if recovered {
                    info!("game state poll succeeded again");
                }
                debug!(
                    home = game.home_team.score,
                    away = game.away_team.score,
                    time_remaining = game.time_remaining,
                    running = game.is_clock_running,
                    "polled game state"
                );

                if tx.send(game).await.is_err() {
                    info!("scoreboard driver stopped; ending poller");
                    break;
                }
            }
            Err(err) => {
                let health = state.poll_health().await;
                if health.last_success.is_some() {
                    warn!(error = %err, "game state poll failed; keeping last known state");
                } else {
                    warn!(error = %err, "game state poll failed; scoreboard still loading");
                }
                state.record_poll_failure().await;
            }
        }
    }
}
