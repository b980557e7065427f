use std::{convert::Infallible, time::Duration};

use axum::response::sse::{Event, KeepAlive, Sse};
use futures::Stream;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::{mpsc, watch};
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, info, warn};

use crate::{dto::sse::ServerEvent, services::sse_events, state::SharedState};

/// Subscribe to the scoreboard stream.
///
/// Returns the receiver along with an event carrying the current view, if any. The receiver is
/// created first so no update published in between is lost.
pub fn subscribe_scoreboard(
    state: &SharedState,
) -> (broadcast::Receiver<ServerEvent>, Option<ServerEvent>) {
    let receiver = state.scoreboard_sse().subscribe();
    let initial = state
        .current_view()
        .and_then(|view| match sse_events::view_event(&view) {
            Ok(event) => Some(event),
            Err(err) => {
                warn!(error = %err, "failed to serialize initial scoreboard view");
                None
            }
        });
    (receiver, initial)
}

/// Convert a broadcast receiver into an SSE response, forwarding events and
/// cleaning up once the client disconnects.
///
/// The stream also ends when `shutdown` turns true, so open overlays never hold up a graceful
/// server shutdown.
pub fn to_sse_stream(
    mut receiver: broadcast::Receiver<ServerEvent>,
    initial: Option<ServerEvent>,
    mut shutdown: watch::Receiver<bool>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    // small bounded channel between forwarder and response
    let (tx, rx) = mpsc::channel::<Result<Event, Infallible>>(8);

    tokio::spawn(async move {
        if let Some(payload) = initial {
            if tx.send(Ok(to_event(payload))).await.is_err() {
                return;
            }
        }

        loop {
            tokio::select! {
                _ = tx.closed() => break,
                _ = shutdown_requested(&mut shutdown) => {
                    debug!("server shutting down; closing scoreboard SSE stream");
                    break;
                }
                recv_result = receiver.recv() => {
                    match recv_result {
                        Ok(payload) => {
                            if tx.send(Ok(to_event(payload))).await.is_err() {
                                break;
                            }
                        }
                        Err(RecvError::Closed) => break,
                        Err(RecvError::Lagged(skipped)) => {
                            // Views are full snapshots; the next one catches the client up.
                            debug!(skipped, "scoreboard SSE subscriber lagged");
                            continue;
                        }
                    }
                }
            }
        }

        info!("Scoreboard SSE stream disconnected");
    });

    let stream = ReceiverStream::new(rx);
    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

async fn shutdown_requested(shutdown: &mut watch::Receiver<bool>) {
    // A dropped sender means the state is gone, which also ends the stream.
    let _ = shutdown.wait_for(|stopping| *stopping).await;
}

fn to_event(payload: ServerEvent) -> Event {
    let mut event = Event::default().data(payload.data);
    if let Some(name) = payload.event {
        event = event.event(name);
    }
    event
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dto::{
            game_state::GameState,
            scoreboard::{AnimationState, FlashState, ScoreboardView},
        },
        state::AppState,
    };

    #[test]
    fn no_initial_event_while_loading() {
        let state = AppState::new();
        let (_receiver, initial) = subscribe_scoreboard(&state);
        assert!(initial.is_none());
    }

    #[test]
    fn initial_event_carries_current_view() {
        let state = AppState::new();
        state.publish_view(Some(ScoreboardView {
            game: GameState::new(3, 0, 120, false),
            score_animating: FlashState::default(),
            touchdown_animation: AnimationState::idle(),
            field_goal_animation: AnimationState::idle(),
        }));

        let (_receiver, initial) = subscribe_scoreboard(&state);
        let initial = initial.unwrap();
        assert_eq!(initial.event.as_deref(), Some("scoreboard"));
        let body: serde_json::Value = serde_json::from_str(&initial.data).unwrap();
        assert_eq!(body["timeRemaining"], 120);
        assert_eq!(body["homeTeam"]["score"], 3);
    }
}
