//! Reconciliation engine combining polls, clock and animations.

use tokio::time::Instant;
use tracing::debug;

use crate::{
    dto::{game_state::GameState, scoreboard::ScoreboardView},
    state::{
        animation::{AnimationLifecycle, AnimationTimings},
        clock::LocalClock,
        scoring::{ScoreDeltaDetector, ScoringEvent},
        view::build_view,
    },
};

/// Reconciliation engine for one scoreboard.
///
/// Holds the latest remote state, the score baseline, the local clock and the animation slots.
/// All mutations take an explicit `now` so callers decide which clock drives it.
#[derive(Debug, Clone)]
pub struct ScoreboardEngine {
    latest: Option<GameState>,
    detector: ScoreDeltaDetector,
    animations: AnimationLifecycle,
    clock: LocalClock,
}

impl ScoreboardEngine {
    /// Engine with nothing received yet.
    pub fn new(timings: AnimationTimings) -> Self {
        Self {
            latest: None,
            detector: ScoreDeltaDetector::new(),
            animations: AnimationLifecycle::new(timings),
            clock: LocalClock::new(),
        }
    }

    /// Apply a freshly polled state in one pass: store it, re-seed the clock, diff the scores and
    /// start the matching animations.
    pub fn apply_poll(&mut self, state: GameState, now: Instant) -> Vec<ScoringEvent> {
        self.clock
            .resync(state.time_remaining, state.is_clock_running, now);

        let events = self.detector.observe(&state);
        for event in &events {
            debug!(team = %event.team, kind = ?event.kind, delta = event.delta, "scoring event");
            self.animations.handle(event, now);
        }

        self.latest = Some(state);
        events
    }

    /// Clear animations whose window has elapsed. Returns whether any flag changed.
    pub fn expire(&mut self, now: Instant) -> bool {
        self.animations.expire_due(now)
    }

    /// Next instant at which the view changes on its own (animation expiry or clock tick).
    pub fn next_deadline(&self, now: Instant) -> Option<Instant> {
        [self.animations.next_deadline(), self.clock.next_tick(now)]
            .into_iter()
            .flatten()
            .min()
    }

    /// Locally perceived time remaining.
    pub fn local_time(&self, now: Instant) -> Option<i64> {
        self.clock.local_time(now)
    }

    /// Reconciled view at `now`, `None` while still loading.
    pub fn view(&self, now: Instant) -> Option<ScoreboardView> {
        let game = self.latest.as_ref()?;
        Some(build_view(
            game,
            self.clock.local_time(now),
            self.animations.flash(),
            self.animations.touchdown(),
            self.animations.field_goal(),
        ))
    }

    /// Whether at least one poll has been applied.
    pub fn has_data(&self) -> bool {
        self.latest.is_some()
    }

    /// Drop all state, as on teardown.
    pub fn reset(&mut self) {
        self.latest = None;
        self.detector.reset();
        self.animations.reset();
        self.clock.reset();
    }
}

impl Default for ScoreboardEngine {
    fn default() -> Self {
        Self::new(AnimationTimings::default())
    }
}
