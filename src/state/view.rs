//! Display-ready view assembly.

use crate::dto::{
    game_state::GameState,
    scoreboard::{AnimationState, FlashState, ScoreboardView},
};

/// Merge the latest remote state with the local clock and the animation flags.
///
/// `timeRemaining` is replaced by `local_time` when one is known; every other remote field is
/// copied as-is.
pub fn build_view(
    game: &GameState,
    local_time: Option<i64>,
    flash: FlashState,
    touchdown: AnimationState,
    field_goal: AnimationState,
) -> ScoreboardView {
    let mut game = game.clone();
    if let Some(local_time) = local_time {
        game.time_remaining = local_time;
    }

    ScoreboardView {
        game,
        score_animating: flash,
        touchdown_animation: touchdown,
        field_goal_animation: field_goal,
    }
}
