//! Score delta detection and classification into scoring events.

use crate::dto::game_state::{GameState, TeamSide};

/// Kind of scoring event derived from a positive score delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringKind {
    /// Any positive delta.
    Flash,
    /// Delta of exactly 3.
    FieldGoal,
    /// Delta of 6 or 7.
    Touchdown,
}

/// One classified event for one team.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringEvent {
    /// Team whose score changed.
    pub team: TeamSide,
    /// Classification of the change.
    pub kind: ScoringKind,
    /// Points gained since the previous poll.
    pub delta: i64,
}

/// Scores seen on the previous poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreSnapshot {
    /// Home score.
    pub home: i64,
    /// Away score.
    pub away: i64,
}

impl ScoreSnapshot {
    fn of(state: &GameState) -> Self {
        Self {
            home: state.home_team.score,
            away: state.away_team.score,
        }
    }

    fn get(&self, side: TeamSide) -> i64 {
        match side {
            TeamSide::Home => self.home,
            TeamSide::Away => self.away,
        }
    }
}

/// Classify a single team's delta. Non-positive deltas yield nothing.
pub fn classify(team: TeamSide, delta: i64) -> Vec<ScoringEvent> {
    if delta <= 0 {
        return Vec::new();
    }

    let event = |kind| ScoringEvent { team, kind, delta };
    let mut events = vec![event(ScoringKind::Flash)];
    match delta {
        3 => events.push(event(ScoringKind::FieldGoal)),
        6 | 7 => events.push(event(ScoringKind::Touchdown)),
        _ => {}
    }
    events
}

/// Diffs each poll against the one before it.
#[derive(Debug, Clone, Default)]
pub struct ScoreDeltaDetector {
    previous: Option<ScoreSnapshot>,
}

impl ScoreDeltaDetector {
    /// Detector with no baseline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Baseline used for the next comparison.
    pub fn previous(&self) -> Option<ScoreSnapshot> {
        self.previous
    }

    /// Compare `state` with the previous poll and advance the baseline.
    ///
    /// The first observation only seeds the baseline. Events are ordered home then away.
    pub fn observe(&mut self, state: &GameState) -> Vec<ScoringEvent> {
        let current = ScoreSnapshot::of(state);
        let events = match self.previous {
            Some(previous) => TeamSide::ALL
                .into_iter()
                .flat_map(|side| classify(side, current.get(side).saturating_sub(previous.get(side))))
                .collect(),
            None => Vec::new(),
        };

        self.previous = Some(current);
        events
    }

    /// Forget the baseline.
    pub fn reset(&mut self) {
        self.previous = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(events: &[ScoringEvent]) -> Vec<(TeamSide, ScoringKind)> {
        events.iter().map(|e| (e.team, e.kind)).collect()
    }

    #[test]
    fn first_poll_seeds_baseline_without_events() {
        let mut detector = ScoreDeltaDetector::new();
        assert!(detector.observe(&GameState::new(21, 14, 600, true)).is_empty());
        assert_eq!(
            detector.previous(),
            Some(ScoreSnapshot { home: 21, away: 14 })
        );
    }

    #[test]
    fn field_goal_and_touchdown_classes_are_disjoint() {
        assert_eq!(
            kinds(&classify(TeamSide::Home, 3)),
            vec![
                (TeamSide::Home, ScoringKind::Flash),
                (TeamSide::Home, ScoringKind::FieldGoal)
            ]
        );
        for delta in [6, 7] {
            assert_eq!(
                kinds(&classify(TeamSide::Away, delta)),
                vec![
                    (TeamSide::Away, ScoringKind::Flash),
                    (TeamSide::Away, ScoringKind::Touchdown)
                ]
            );
        }
    }

    #[test]
    fn other_positive_deltas_only_flash() {
        for delta in [1, 2, 4, 5, 8, 9, 14] {
            assert_eq!(
                kinds(&classify(TeamSide::Home, delta)),
                vec![(TeamSide::Home, ScoringKind::Flash)],
                "delta {delta}"
            );
        }
    }

    #[test]
    fn non_positive_delta_is_silent_but_baseline_advances() {
        let mut detector = ScoreDeltaDetector::new();
        detector.observe(&GameState::new(10, 10, 600, true));

        assert!(detector.observe(&GameState::new(10, 10, 590, true)).is_empty());
        assert!(detector.observe(&GameState::new(7, 10, 580, true)).is_empty());
        assert_eq!(
            detector.previous(),
            Some(ScoreSnapshot { home: 7, away: 10 })
        );

        // Compared against the corrected value, not the original 10.
        let events = detector.observe(&GameState::new(10, 10, 570, true));
        assert_eq!(
            kinds(&events),
            vec![
                (TeamSide::Home, ScoringKind::Flash),
                (TeamSide::Home, ScoringKind::FieldGoal)
            ]
        );
    }

    #[test]
    fn both_teams_evaluated_home_first() {
        let mut detector = ScoreDeltaDetector::new();
        detector.observe(&GameState::new(0, 0, 900, true));

        let events = detector.observe(&GameState::new(6, 7, 890, true));
        assert_eq!(
            kinds(&events),
            vec![
                (TeamSide::Home, ScoringKind::Flash),
                (TeamSide::Home, ScoringKind::Touchdown),
                (TeamSide::Away, ScoringKind::Flash),
                (TeamSide::Away, ScoringKind::Touchdown)
            ]
        );
        assert_eq!(events[3].delta, 7);
    }

    #[test]
    fn extreme_scores_do_not_panic() {
        let mut detector = ScoreDeltaDetector::new();
        detector.observe(&GameState::new(i64::MIN, 0, 0, false));
        let events = detector.observe(&GameState::new(i64::MAX, 0, 0, false));
        assert_eq!(kinds(&events), vec![(TeamSide::Home, ScoringKind::Flash)]);

        detector.reset();
        assert!(detector.previous().is_none());
    }
}
