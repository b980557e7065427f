//! Timed score animations driven by scoring events.

use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use crate::{
    dto::{
        game_state::TeamSide,
        scoreboard::{AnimationState, FlashState},
    },
    state::{
        expiring::ExpiringSlot,
        scoring::{ScoringEvent, ScoringKind},
    },
};

/// How long each animation stays visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationTimings {
    /// Per-team score pulse.
    pub flash: Duration,
    /// Shared touchdown slot.
    pub touchdown: Duration,
    /// Shared field goal slot.
    pub field_goal: Duration,
}

impl Default for AnimationTimings {
    fn default() -> Self {
        Self {
            flash: Duration::from_millis(400),
            touchdown: Duration::from_millis(4_000),
            field_goal: Duration::from_millis(3_500),
        }
    }
}

/// Owns the timed animation flags driven by scoring events.
///
/// Flash is tracked per team. Touchdown and field goal each have a single slot shared by both
/// teams: a later activation of the same type pre-empts the running one (last write wins).
#[derive(Debug, Clone, Default)]
pub struct AnimationLifecycle {
    timings: AnimationTimings,
    flash_home: ExpiringSlot<()>,
    flash_away: ExpiringSlot<()>,
    touchdown: ExpiringSlot<TeamSide>,
    field_goal: ExpiringSlot<TeamSide>,
}

impl AnimationLifecycle {
    /// Idle animations using `timings`.
    pub fn new(timings: AnimationTimings) -> Self {
        Self {
            timings,
            ..Self::default()
        }
    }

    /// Start the animation matching `event`.
    pub fn handle(&mut self, event: &ScoringEvent, now: Instant) {
        match event.kind {
            ScoringKind::Flash => {
                let window = self.timings.flash;
                self.flash_slot_mut(event.team).activate((), now, window);
            }
            ScoringKind::Touchdown => {
                let (token, pre_empted) =
                    self.touchdown.activate(event.team, now, self.timings.touchdown);
                if let Some(previous) = pre_empted {
                    debug!(%token, %previous, team = %event.team, "touchdown animation pre-empted");
                }
            }
            ScoringKind::FieldGoal => {
                let (token, pre_empted) =
                    self.field_goal.activate(event.team, now, self.timings.field_goal);
                if let Some(previous) = pre_empted {
                    debug!(%token, %previous, team = %event.team, "field goal animation pre-empted");
                }
            }
        }
    }

    /// Clear every slot whose window has elapsed. Returns whether anything changed.
    pub fn expire_due(&mut self, now: Instant) -> bool {
        let mut changed = false;
        changed |= self.flash_home.expire_due(now).is_some();
        changed |= self.flash_away.expire_due(now).is_some();
        if let Some(cleared) = self.touchdown.expire_due(now) {
            debug!(token = %cleared.token, team = %cleared.value, "touchdown animation finished");
            changed = true;
        }
        if let Some(cleared) = self.field_goal.expire_due(now) {
            debug!(token = %cleared.token, team = %cleared.value, "field goal animation finished");
            changed = true;
        }
        changed
    }

    /// Earliest pending expiry.
    pub fn next_deadline(&self) -> Option<Instant> {
        [
            self.flash_home.deadline(),
            self.flash_away.deadline(),
            self.touchdown.deadline(),
            self.field_goal.deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Current score pulse flags.
    pub fn flash(&self) -> FlashState {
        FlashState {
            home: self.flash_home.is_active(),
            away: self.flash_away.is_active(),
        }
    }

    /// Current touchdown slot.
    pub fn touchdown(&self) -> AnimationState {
        self.touchdown.value().copied().into()
    }

    /// Current field goal slot.
    pub fn field_goal(&self) -> AnimationState {
        self.field_goal.value().copied().into()
    }

    /// Drop every running animation.
    pub fn reset(&mut self) {
        self.flash_home.clear();
        self.flash_away.clear();
        self.touchdown.clear();
        self.field_goal.clear();
    }

    fn flash_slot_mut(&mut self, team: TeamSide) -> &mut ExpiringSlot<()> {
        match team {
            TeamSide::Home => &mut self.flash_home,
            TeamSide::Away => &mut self.flash_away,
        }
    }
}
