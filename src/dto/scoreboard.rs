use serde::Serialize;

use crate::dto::game_state::{GameState, TeamSide};

/// Per-team score pulse flags exposed to the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FlashState {
    /// Home score is pulsing.
    pub home: bool,
    /// Away score is pulsing.
    pub away: bool,
}

impl FlashState {
    /// Flag for the given side.
    pub fn get(&self, side: TeamSide) -> bool {
        match side {
            TeamSide::Home => self.home,
            TeamSide::Away => self.away,
        }
    }
}

/// State of one shared animation slot (touchdown or field goal).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AnimationState {
    /// Whether the animation is playing.
    pub active: bool,
    /// Team the animation is attributed to, `null` when idle.
    pub team: Option<TeamSide>,
}

impl AnimationState {
    /// Nothing playing.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Animation playing for `team`.
    pub fn active(team: TeamSide) -> Self {
        Self {
            active: true,
            team: Some(team),
        }
    }
}

impl From<Option<TeamSide>> for AnimationState {
    fn from(value: Option<TeamSide>) -> Self {
        value.map(Self::active).unwrap_or_default()
    }
}

/// Display-ready snapshot handed to the renderer.
///
/// Serializes as the remote game state (with `timeRemaining` replaced by the locally ticked
/// clock) plus the three animation objects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreboardView {
    /// Remote state with the reconciled clock.
    #[serde(flatten)]
    pub game: GameState,
    /// Score pulse flags.
    pub score_animating: FlashState,
    /// Shared touchdown slot.
    pub touchdown_animation: AnimationState,
    /// Shared field goal slot.
    pub field_goal_animation: AnimationState,
}

/// Payload of the scoring SSE events.
#[derive(Debug, Clone, Serialize)]
pub struct ScoringEventPayload {
    /// Team that scored.
    pub team: TeamSide,
    /// Points gained since the previous poll.
    pub delta: i64,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn view_serializes_flat_with_animation_objects() {
        let view = ScoreboardView {
            game: GameState::new(7, 0, 893, true),
            score_animating: FlashState {
                home: true,
                away: false,
            },
            touchdown_animation: AnimationState::active(TeamSide::Home),
            field_goal_animation: AnimationState::idle(),
        };

        assert_eq!(
            serde_json::to_value(&view).unwrap(),
            json!({
                "homeTeam": { "score": 7 },
                "awayTeam": { "score": 0 },
                "timeRemaining": 893,
                "isClockRunning": true,
                "scoreAnimating": { "home": true, "away": false },
                "touchdownAnimation": { "active": true, "team": "home" },
                "fieldGoalAnimation": { "active": false, "team": null }
            })
        );
    }

    #[test]
    fn animation_state_from_option() {
        assert_eq!(AnimationState::from(None), AnimationState::idle());
        assert_eq!(
            AnimationState::from(Some(TeamSide::Away)),
            AnimationState::active(TeamSide::Away)
        );
    }
}
