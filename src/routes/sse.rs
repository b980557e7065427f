use std::convert::Infallible;

use axum::{Router, extract::State, response::sse::Sse, routing::get};
use futures::Stream;
use tracing::info;

use crate::{services::sse_service, state::SharedState};

/// Stream the reconciled scoreboard and scoring events to overlays.
pub async fn scoreboard_stream(
    State(state): State<SharedState>,
) -> Sse<impl Stream<Item = Result<axum::response::sse::Event, Infallible>>> {
    let (receiver, initial) = sse_service::subscribe_scoreboard(&state);
    info!(
        subscribers = state.scoreboard_sse().subscriber_count(),
        loading = initial.is_none(),
        "New scoreboard SSE connection"
    );
    sse_service::to_sse_stream(receiver, initial, state.shutdown_watcher())
}

/// Configure the SSE endpoints.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new().route("/sse/scoreboard", get(scoreboard_stream))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::{TcpListener, TcpStream},
        sync::oneshot,
        time::timeout,
    };

    use crate::{
        dto::{
            game_state::GameState,
            scoreboard::{AnimationState, FlashState, ScoreboardView},
        },
        routes,
        state::AppState,
    };

    #[tokio::test]
    async fn open_stream_does_not_block_graceful_shutdown() {
        let state = AppState::new();
        state.publish_view(Some(ScoreboardView {
            game: GameState::new(0, 0, 900, true),
            score_animating: FlashState::default(),
            touchdown_animation: AnimationState::idle(),
            field_goal_animation: AnimationState::idle(),
        }));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (trigger, fired) = oneshot::channel::<()>();
        let stopping = state.clone();
        let server = tokio::spawn(async move {
            axum::serve(listener, routes::router(state).into_make_service())
                .with_graceful_shutdown(async move {
                    let _ = fired.await;
                    stopping.begin_shutdown();
                })
                .await
        });

        let mut client = TcpStream::connect(addr).await.unwrap();
        client
            .write_all(b"GET /sse/scoreboard HTTP/1.1\r\nHost: localhost\r\n\r\n")
            .await
            .unwrap();
        let mut buf = [0u8; 512];
        let n = client.read(&mut buf).await.unwrap();
        assert!(String::from_utf8_lossy(&buf[..n]).starts_with("HTTP/1.1 200 OK"));

        trigger.send(()).unwrap();
        let served = timeout(Duration::from_secs(3), server)
            .await
            .expect("server drains open SSE connections after shutdown");
        served.unwrap().unwrap();

        // The client sees the stream end rather than hanging.
        let mut rest = Vec::new();
        let closed = timeout(Duration::from_secs(1), client.read_to_end(&mut rest)).await;
        assert!(closed.is_ok());
    }
}
