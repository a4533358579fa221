//=========================================================================
// FPS Counter
//=========================================================================
//
// Presented-frame accounting over one-second windows. Observability
// only: nothing here feeds back into scheduling.
//
//   accumulate(passed) → window grows by raw elapsed time
//   frame_presented()  → frames += 1
//   poll_report()      → Some(frames) and reset, once window >= 1s
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== FpsCounter ==========================================================

/// Counts presented frames in the current accounting window.
#[derive(Debug, Clone, Default)]
pub struct FpsCounter {
    frames: u32,
    window: Duration,
    last_report: Option<u32>,
}

impl FpsCounter {
    /// Length of one accounting window.
    pub const WINDOW: Duration = Duration::from_secs(1);

    pub fn new() -> Self {
        Self::default()
    }

    /// Adds raw elapsed time to the current window.
    pub fn accumulate(&mut self, passed: Duration) {
        self.window = self.window.saturating_add(passed);
    }

    /// Records one presented frame.
    pub fn frame_presented(&mut self) {
        self.frames = self.frames.saturating_add(1);
    }

    /// Returns the window's frame count and resets both counters, if the
    /// window has reached [`Self::WINDOW`].
    pub fn poll_report(&mut self) -> Option<u32> {
        if self.window < Self::WINDOW {
            return None;
        }

        let frames = self.frames;
        self.frames = 0;
        self.window = Duration::ZERO;
        self.last_report = Some(frames);
        Some(frames)
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Most recently reported count, if a window has completed.
    pub fn last_report(&self) -> Option<u32> {
        self.last_report
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
