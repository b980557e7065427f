use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Which side of the scoreboard a team plays on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamSide {
    /// Home team.
    Home,
    /// Away team.
    Away,
}

impl TeamSide {
    /// Both sides in evaluation order (home first).
    pub const ALL: [TeamSide; 2] = [TeamSide::Home, TeamSide::Away];
}

impl fmt::Display for TeamSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeamSide::Home => f.write_str("home"),
            TeamSide::Away => f.write_str("away"),
        }
    }
}

/// Authoritative game state as returned by the remote endpoint on every poll.
///
/// Only the score, clock and running flag are interpreted. Every other field of the remote
/// payload is kept in `extra` and handed to the renderer untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Home team block.
    pub home_team: TeamState,
    /// Away team block.
    pub away_team: TeamState,
    /// Seconds left on the game clock as computed by the remote side.
    pub time_remaining: i64,
    /// Whether the game clock is currently running.
    pub is_clock_running: bool,
    /// Remaining remote fields (quarter, down, possession...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Per-team block of a [`GameState`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamState {
    /// Current score. Not validated; negative values are passed through.
    pub score: i64,
    /// Remaining team fields (name, colors...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TeamState {
    /// Team block carrying only a score.
    pub fn with_score(score: i64) -> Self {
        Self {
            score,
            extra: Map::new(),
        }
    }
}

impl GameState {
    /// Minimal state carrying only the interpreted fields.
    pub fn new(home: i64, away: i64, time_remaining: i64, is_clock_running: bool) -> Self {
        Self {
            home_team: TeamState::with_score(home),
            away_team: TeamState::with_score(away),
            time_remaining,
            is_clock_running,
            extra: Map::new(),
        }
    }

    /// Score of the given side.
    pub fn score(&self, side: TeamSide) -> i64 {
        match side {
            TeamSide::Home => self.home_team.score,
            TeamSide::Away => self.away_team.score,
        }
    }
}
