use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::scoreboard::ScoreboardView, error::AppError, services::scoreboard_service,
    state::SharedState,
};

/// Return the current reconciled scoreboard, or 503 until the first poll succeeds.
pub async fn get_scoreboard(
    State(state): State<SharedState>,
) -> Result<Json<ScoreboardView>, AppError> {
    let view = scoreboard_service::current_view(&state)?;
    Ok(Json(view))
}

/// Configure the scoreboard REST routes.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new().route("/api/scoreboard", get(get_scoreboard))
}
