//! Game clock ticked locally between polls.

use std::time::Duration;

use tokio::time::Instant;

const TICK: Duration = Duration::from_secs(1);

/// Remote clock reading and the instant it was received.
#[derive(Debug, Clone, Copy)]
struct ClockAnchor {
    remote_seconds: i64,
    running: bool,
    received_at: Instant,
}

/// Countdown clock ticked locally between polls.
///
/// Every poll re-anchors the clock on the remote value. In between, the displayed time is the
/// remote value minus the whole seconds elapsed since that poll arrived, floored at zero.
#[derive(Debug, Clone, Default)]
pub struct LocalClock {
    anchor: Option<ClockAnchor>,
}

impl LocalClock {
    /// Clock with no remote reading yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-seed from a freshly received remote reading.
    pub fn resync(&mut self, remote_seconds: i64, running: bool, now: Instant) {
        self.anchor = Some(ClockAnchor {
            remote_seconds,
            running,
            received_at: now,
        });
    }

    /// Locally perceived time remaining, `None` before the first poll.
    pub fn local_time(&self, now: Instant) -> Option<i64> {
        let anchor = self.anchor?;
        if !anchor.ticks() {
            return Some(anchor.remote_seconds);
        }

        let elapsed = now.saturating_duration_since(anchor.received_at).as_secs();
        let elapsed = i64::try_from(elapsed).unwrap_or(i64::MAX);
        Some(anchor.remote_seconds.saturating_sub(elapsed).max(0))
    }

    /// Instant of the next one-second tick, `None` once ticking has stopped.
    pub fn next_tick(&self, now: Instant) -> Option<Instant> {
        let anchor = self.anchor?;
        if !anchor.ticks() || self.local_time(now)? <= 0 {
            return None;
        }

        let elapsed = now.saturating_duration_since(anchor.received_at).as_secs();
        let next = u32::try_from(elapsed + 1).ok()?;
        Some(anchor.received_at + TICK * next)
    }

    /// Forget the remote reading.
    pub fn reset(&mut self) {
        self.anchor = None;
    }
}

impl ClockAnchor {
    fn ticks(&self) -> bool {
        self.running && self.remote_seconds > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn no_time_before_first_poll() {
        let clock = LocalClock::new();
        let now = Instant::now();
        assert_eq!(clock.local_time(now), None);
        assert_eq!(clock.next_tick(now), None);
    }

    #[test]
    fn running_clock_counts_down_and_holds_at_zero() {
        let start = Instant::now();
        let mut clock = LocalClock::new();
        clock.resync(10, true, start);

        assert_eq!(clock.local_time(start), Some(10));
        assert_eq!(clock.local_time(start + Duration::from_millis(999)), Some(10));
        assert_eq!(clock.local_time(start + secs(1)), Some(9));
        assert_eq!(clock.local_time(start + secs(10)), Some(0));
        assert_eq!(clock.local_time(start + secs(25)), Some(0));
        assert_eq!(clock.next_tick(start + secs(10)), None);
    }

    #[test]
    fn stopped_clock_never_decrements() {
        let start = Instant::now();
        let mut clock = LocalClock::new();
        clock.resync(10, false, start);

        assert_eq!(clock.local_time(start + secs(60)), Some(10));
        assert_eq!(clock.next_tick(start), None);
    }

    #[test]
    fn next_tick_lands_on_whole_seconds_after_receipt() {
        let start = Instant::now();
        let mut clock = LocalClock::new();
        clock.resync(5, true, start);

        assert_eq!(clock.next_tick(start), Some(start + secs(1)));
        assert_eq!(
            clock.next_tick(start + Duration::from_millis(2500)),
            Some(start + secs(3))
        );
        assert_eq!(clock.next_tick(start + secs(4)), Some(start + secs(5)));
    }

    #[test]
    fn resync_replaces_local_progress() {
        let start = Instant::now();
        let mut clock = LocalClock::new();
        clock.resync(900, true, start);
        assert_eq!(clock.local_time(start + secs(3)), Some(897));

        clock.resync(899, true, start + secs(3));
        assert_eq!(clock.local_time(start + secs(3)), Some(899));
        assert_eq!(clock.local_time(start + secs(4)), Some(898));
    }

    #[test]
    fn non_positive_remote_time_is_reported_as_is() {
        let start = Instant::now();
        let mut clock = LocalClock::new();
        clock.resync(-2, true, start);
        assert_eq!(clock.local_time(start + secs(5)), Some(-2));
        assert_eq!(clock.next_tick(start), None);
    }
}
