use serde::Serialize;
use tracing::warn;

use crate::{
    dto::{
        scoreboard::{ScoreboardView, ScoringEventPayload},
        sse::ServerEvent,
    },
    state::{
        SharedState,
        scoring::{ScoringEvent, ScoringKind},
    },
};

const EVENT_SCOREBOARD: &str = "scoreboard";
const EVENT_SCORE_FLASH: &str = "score.flash";
const EVENT_SCORE_TOUCHDOWN: &str = "score.touchdown";
const EVENT_SCORE_FIELD_GOAL: &str = "score.field_goal";

/// Broadcast a new reconciled view.
pub fn broadcast_view(state: &SharedState, view: &ScoreboardView) {
    send_event(state, EVENT_SCOREBOARD, view);
}

/// Broadcast one classified scoring event.
pub fn broadcast_scoring_event(state: &SharedState, event: &ScoringEvent) {
    let payload = ScoringEventPayload {
        team: event.team,
        delta: event.delta,
    };
    send_event(state, scoring_event_name(event.kind), &payload);
}

/// Serialize `view` as a `scoreboard` event, used to prime new subscribers.
pub fn view_event(view: &ScoreboardView) -> serde_json::Result<ServerEvent> {
    ServerEvent::json(Some(EVENT_SCOREBOARD.to_string()), view)
}

fn scoring_event_name(kind: ScoringKind) -> &'static str {
    match kind {
        ScoringKind::Flash => EVENT_SCORE_FLASH,
        ScoringKind::Touchdown => EVENT_SCORE_TOUCHDOWN,
        ScoringKind::FieldGoal => EVENT_SCORE_FIELD_GOAL,
    }
}

fn send_event(state: &SharedState, event: &str, payload: &impl Serialize) {
    match ServerEvent::json(Some(event.to_string()), payload) {
        Ok(event) => state.scoreboard_sse().broadcast(event),
        Err(err) => warn!(event, error = %err, "failed to serialize scoreboard SSE payload"),
    }
}
