//! Clock abstraction and the single periodic tick source.
//!
//! The player never reads time directly. Wall-clock timestamps come from a
//! [`Clock`], and countdown ticks come from a [`Ticker`] that is polled by
//! whoever owns the session (the UI frame loop, or a test).

use std::sync::Mutex;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

/// Interval between countdown ticks.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Source of wall-clock and monotonic time.
pub trait Clock: Send + Sync {
    /// Current wall-clock time.
    fn now(&self) -> DateTime<Utc>;

    /// Current monotonic instant.
    fn instant(&self) -> Instant;
}

/// Clock backed by the operating system.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn instant(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock for deterministic tests and replays.
#[derive(Debug)]
pub struct ManualClock {
    wall_start: DateTime<Utc>,
    instant_start: Instant,
    elapsed: Mutex<Duration>,
}

impl ManualClock {
    /// Create a clock frozen at the given wall-clock time.
    pub fn new(wall_start: DateTime<Utc>) -> Self {
        Self {
            wall_start,
            instant_start: Instant::now(),
            elapsed: Mutex::new(Duration::ZERO),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        let mut elapsed = self.elapsed.lock().unwrap_or_else(|e| e.into_inner());
        *elapsed += by;
    }

    /// Move the clock forward by whole seconds.
    pub fn advance_secs(&self, secs: u64) {
        self.advance(Duration::from_secs(secs));
    }

    fn elapsed(&self) -> Duration {
        *self.elapsed.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let elapsed = chrono::Duration::from_std(self.elapsed()).unwrap_or(chrono::Duration::zero());
        self.wall_start + elapsed
    }

    fn instant(&self) -> Instant {
        self.instant_start + self.elapsed()
    }
}

/// A scheduled tick: which countdown it belongs to and when it is due.
#[derive(Debug, Clone, Copy)]
struct ScheduledTick {
    generation: u64,
    due: Instant,
}

/// Single periodic tick source.
///
/// At most one schedule exists at a time; arming a new generation replaces
/// the old one. A poll yields at most one tick, and after a stall the
/// schedule restarts from the poll time instead of replaying missed ticks.
#[derive(Debug, Default)]
pub struct Ticker {
    scheduled: Option<ScheduledTick>,
}

impl Ticker {
    /// Create an idle ticker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule ticks for `generation`, replacing any previous schedule.
    pub fn arm(&mut self, generation: u64, now: Instant) {
        self.scheduled = Some(ScheduledTick {
            generation,
            due: now + TICK_INTERVAL,
        });
        tracing::trace!("Tick source armed for generation {}", generation);
    }

    /// Cancel the current schedule.
    pub fn cancel(&mut self) {
        if self.scheduled.take().is_some() {
            tracing::trace!("Tick source cancelled");
        }
    }

    /// Generation of the active schedule.
    pub fn generation(&self) -> Option<u64> {
        self.scheduled.map(|s| s.generation)
    }

    /// Whether a schedule is active.
    pub fn is_armed(&self) -> bool {
        self.scheduled.is_some()
    }

    /// Return the armed generation if a tick is due at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<u64> {
        let scheduled = self.scheduled.as_mut()?;
        if now < scheduled.due {
            return None;
        }

        scheduled.due += TICK_INTERVAL;
        if scheduled.due <= now {
            // Stalled for more than one interval: drop the backlog.
            scheduled.due = now + TICK_INTERVAL;
        }

        Some(scheduled.generation)
    }

    /// Time until the next tick is due, if armed.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.scheduled
            .map(|s| s.due.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advances_both_timelines() {
        let start = Utc::now();
        let clock = ManualClock::new(start);
        let before = clock.instant();

        clock.advance_secs(90);

        assert_eq!((clock.now() - start).num_seconds(), 90);
        assert_eq!(clock.instant() - before, Duration::from_secs(90));
    }

    #[test]
    fn test_ticker_fires_once_per_interval() {
        let start = Instant::now();
        let mut ticker = Ticker::new();
        ticker.arm(1, start);

        assert_eq!(ticker.poll(start + Duration::from_millis(999)), None);
        assert_eq!(ticker.poll(start + Duration::from_secs(1)), Some(1));
        assert_eq!(ticker.poll(start + Duration::from_millis(1500)), None);
        assert_eq!(ticker.poll(start + Duration::from_secs(2)), Some(1));
    }

    #[test]
    fn test_ticker_does_not_catch_up_after_stall() {
        let start = Instant::now();
        let mut ticker = Ticker::new();
        ticker.arm(7, start);

        let resumed = start + Duration::from_secs(10);
        assert_eq!(ticker.poll(resumed), Some(7));
        // The backlog of nine missed ticks is not replayed.
        assert_eq!(ticker.poll(resumed), None);
        assert_eq!(ticker.poll(resumed + Duration::from_millis(500)), None);
        assert_eq!(ticker.poll(resumed + Duration::from_secs(1)), Some(7));
    }

    #[test]
    fn test_rearm_replaces_schedule() {
        let start = Instant::now();
        let mut ticker = Ticker::new();
        ticker.arm(1, start);
        ticker.arm(2, start + Duration::from_millis(600));

        assert_eq!(ticker.generation(), Some(2));
        assert_eq!(ticker.poll(start + Duration::from_secs(1)), None);
        assert_eq!(ticker.poll(start + Duration::from_millis(1600)), Some(2));

        ticker.cancel();
        assert!(!ticker.is_armed());
        assert_eq!(ticker.poll(start + Duration::from_secs(5)), None);
    }
}
