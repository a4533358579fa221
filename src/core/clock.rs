//=========================================================================
// Clock
//=========================================================================
//
// Monotonic time source consumed by the fixed-step loop.
//
// Readings are opaque offsets (`Duration`) from the clock's own origin,
// never wall-clock or calendar time. Only differences between readings
// carry meaning.
//
// Implementations:
//   SystemClock    → std::time::Instant (production)
//   ManualClock    → shared, externally advanced reading
//   ScriptedClock  → advances by a scripted delta on every read
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

//=== Clock Trait =========================================================

/// Monotonic timestamp source.
///
/// `now()` must be non-decreasing across successive calls within the
/// lifetime of the process, with at least millisecond resolution.
pub trait Clock {
    /// Returns the current reading as an offset from the clock origin.
    fn now(&mut self) -> Duration;

    /// Whether this source guarantees non-decreasing readings.
    ///
    /// Checked once when a loop is constructed. A clock answering `false`
    /// is rejected before the loop can enter `Running`.
    fn is_monotonic(&self) -> bool {
        true
    }
}

/// Time passed from reading `earlier` to reading `later`.
///
/// Saturates at zero if the readings are out of order.
pub fn elapsed(earlier: Duration, later: Duration) -> Duration {
    later.saturating_sub(earlier)
}

//=== SystemClock =========================================================

/// Clock backed by [`std::time::Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&mut self) -> Duration {
        self.origin.elapsed()
    }
}

//=== ManualClock =========================================================

/// Clock whose reading only moves when told to.
///
/// Clones share the same reading, so a test can keep one handle and hand
/// the other to a loop.
///
/// ```rust
/// # use cadence_engine::core::clock::{Clock, ManualClock};
/// # use std::time::Duration;
/// let driver = ManualClock::new();
/// let mut clock = driver.clone();
///
/// driver.advance(Duration::from_millis(3));
/// assert_eq!(clock.now(), Duration::from_millis(3));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    nanos: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the shared reading forward.
    pub fn advance(&self, by: Duration) {
        let by = u64::try_from(by.as_nanos()).unwrap_or(u64::MAX);
        let _ = self
            .nanos
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
                Some(current.saturating_add(by))
            });
    }

    /// Current reading without going through the `Clock` trait.
    pub fn reading(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::SeqCst))
    }
}

impl Clock for ManualClock {
    fn now(&mut self) -> Duration {
        self.reading()
    }
}

//=== ScriptedClock =======================================================

/// Clock that advances by a scripted delta each time it is read.
///
/// The first read returns the starting reading (zero). Every later read
/// advances by the next scripted delta; once the script is exhausted the
/// clock keeps advancing by `fallback` (zero unless configured).
///
/// This reproduces a fixed sequence of frame durations, independent of
/// how long the host machine actually takes.
#[derive(Debug, Clone, Default)]
pub struct ScriptedClock {
    script: VecDeque<Duration>,
    fallback: Duration,
    current: Duration,
    started: bool,
}

impl ScriptedClock {
    /// Clock that plays the given deltas, then stops moving.
    pub fn from_deltas<I>(deltas: I) -> Self
    where
        I: IntoIterator<Item = Duration>,
    {
        Self {
            script: deltas.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Clock that advances by `delta` on every read after the first.
    pub fn repeating(delta: Duration) -> Self {
        Self {
            fallback: delta,
            ..Self::default()
        }
    }

    /// Sets the delta used once the script runs out.
    pub fn with_fallback(mut self, delta: Duration) -> Self {
        self.fallback = delta;
        self
    }

    /// Number of scripted deltas not yet consumed.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Clock for ScriptedClock {
    fn now(&mut self) -> Duration {
        if !self.started {
            self.started = true;
            return self.current;
        }

        let delta = self.script.pop_front().unwrap_or(self.fallback);
        self.current = self.current.saturating_add(delta);
        self.current
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //=====================================================================
    // elapsed()
    //=====================================================================

    #[test]
    fn elapsed_is_difference_of_readings() {
        let a = Duration::from_millis(10);
        let b = Duration::from_millis(25);
        assert_eq!(elapsed(a, b), Duration::from_millis(15));
    }

    #[test]
    fn elapsed_saturates_when_out_of_order() {
        let a = Duration::from_millis(25);
        let b = Duration::from_millis(10);
        assert_eq!(elapsed(a, b), Duration::ZERO);
    }

    //=====================================================================
    // SystemClock
    //=====================================================================

    #[test]
    fn system_clock_is_non_decreasing() {
        let mut clock = SystemClock::new();
        let mut last = clock.now();
        for _ in 0..1_000 {
            let next = clock.now();
            assert!(next >= last, "reading went backwards: {:?} < {:?}", next, last);
            last = next;
        }
        assert!(clock.is_monotonic());
    }

    //=====================================================================
    // ManualClock
    //=====================================================================

    #[test]
    fn manual_clock_starts_at_zero() {
        let mut clock = ManualClock::new();
        assert_eq!(clock.now(), Duration::ZERO);
    }

    #[test]
    fn manual_clock_clones_share_reading() {
        let driver = ManualClock::new();
        let mut clock = driver.clone();

        driver.advance(Duration::from_micros(200));
        driver.advance(Duration::from_micros(300));

        assert_eq!(clock.now(), Duration::from_micros(500));
        assert_eq!(clock.now(), Duration::from_micros(500), "reads must not advance");
    }

    //=====================================================================
    // ScriptedClock
    //=====================================================================

    #[test]
    fn scripted_clock_first_read_is_origin() {
        let mut clock = ScriptedClock::from_deltas([Duration::from_millis(5)]);
        assert_eq!(clock.now(), Duration::ZERO);
        assert_eq!(clock.remaining(), 1);
    }

    #[test]
    fn scripted_clock_plays_deltas_in_order() {
        let mut clock = ScriptedClock::from_deltas([
            Duration::from_millis(1),
            Duration::from_millis(2),
            Duration::from_millis(3),
        ]);

        clock.now();
        assert_eq!(clock.now(), Duration::from_millis(1));
        assert_eq!(clock.now(), Duration::from_millis(3));
        assert_eq!(clock.now(), Duration::from_millis(6));
    }

    #[test]
    fn scripted_clock_stops_when_exhausted() {
        let mut clock = ScriptedClock::from_deltas([Duration::from_millis(4)]);
        clock.now();
        clock.now();
        assert_eq!(clock.now(), Duration::from_millis(4));
        assert_eq!(clock.now(), Duration::from_millis(4));
    }

    #[test]
    fn scripted_clock_uses_fallback_after_script() {
        let mut clock = ScriptedClock::from_deltas([Duration::from_millis(10)])
            .with_fallback(Duration::from_millis(1));
        clock.now();
        assert_eq!(clock.now(), Duration::from_millis(10));
        assert_eq!(clock.now(), Duration::from_millis(11));
        assert_eq!(clock.now(), Duration::from_millis(12));
    }

    #[test]
    fn repeating_clock_advances_every_read() {
        let mut clock = ScriptedClock::repeating(Duration::from_micros(200));
        assert_eq!(clock.now(), Duration::ZERO);
        assert_eq!(clock.now(), Duration::from_micros(200));
        assert_eq!(clock.now(), Duration::from_micros(400));
    }
}
