use axum::Router;

use crate::state::SharedState;

pub mod health;
pub mod scoreboard;
pub mod sse;

/// Compose all route trees and wire in the shared state.
pub fn router(state: SharedState) -> Router<()> {
    health::router()
        .merge(scoreboard::router())
        .merge(sse::router())
        .with_state(state)
}
