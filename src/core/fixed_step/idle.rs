//=========================================================================
// Idle Strategies
//=========================================================================
//
// What the loop does with an outer iteration in which no logical step
// became due. Yielding bounds CPU usage. It never changes which steps
// run or when, so tests swap in `NoIdle` to run without real time.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::thread;
use std::time::Duration;

use thiserror::Error;

//=== Interrupted =========================================================

/// An idle wait that ended early.
///
/// Never fatal: the loop logs it and keeps going.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("idle wait interrupted")]
pub struct Interrupted;

//=== IdleStrategy Trait ==================================================

/// Yield strategy for iterations with no due logical step.
///
/// Closures of the form `FnMut() -> Result<(), Interrupted>` implement
/// this trait directly.
pub trait IdleStrategy {
    fn idle(&mut self) -> Result<(), Interrupted>;
}

impl<F> IdleStrategy for F
where
    F: FnMut() -> Result<(), Interrupted>,
{
    fn idle(&mut self) -> Result<(), Interrupted> {
        self()
    }
}

//=== SleepIdle ===========================================================

/// Sleeps the thread for a short, fixed duration.
#[derive(Debug, Clone, Copy)]
pub struct SleepIdle {
    duration: Duration,
}

impl SleepIdle {
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(1);

    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl Default for SleepIdle {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DURATION)
    }
}

impl IdleStrategy for SleepIdle {
    fn idle(&mut self) -> Result<(), Interrupted> {
        thread::sleep(self.duration);
        Ok(())
    }
}

//=== SpinIdle ============================================================

/// Busy-waits with a spin hint. Lowest latency, highest CPU.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpinIdle;

impl IdleStrategy for SpinIdle {
    fn idle(&mut self) -> Result<(), Interrupted> {
        std::hint::spin_loop();
        Ok(())
    }
}

//=== NoIdle ==============================================================

/// Returns immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIdle;

impl IdleStrategy for NoIdle {
    fn idle(&mut self) -> Result<(), Interrupted> {
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn sleep_idle_defaults_to_one_millisecond() {
        assert_eq!(SleepIdle::default().duration(), Duration::from_millis(1));
    }

    #[test]
    fn sleep_idle_actually_sleeps() {
        let mut idle = SleepIdle::new(Duration::from_millis(2));
        let before = Instant::now();
        assert_eq!(idle.idle(), Ok(()));
        assert!(before.elapsed() >= Duration::from_millis(2));
    }

    #[test]
    fn no_idle_and_spin_idle_return_ok() {
        assert_eq!(NoIdle.idle(), Ok(()));
        assert_eq!(SpinIdle.idle(), Ok(()));
    }

    #[test]
    fn closures_are_idle_strategies() {
        let mut calls = 0;
        let mut idle = || {
            calls += 1;
            if calls % 2 == 0 { Err(Interrupted) } else { Ok(()) }
        };

        assert_eq!(IdleStrategy::idle(&mut idle), Ok(()));
        assert_eq!(IdleStrategy::idle(&mut idle), Err(Interrupted));
    }
}
