//=========================================================================
// Loop State
//=========================================================================
//
// Lifecycle, external stop signal, and per-loop counters.
//
//   Idle ──start()──> Running ──stop()/close──> Stopping ──cleanup──> Stopped
//
// Stopped is terminal. A loop instance never restarts.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

//=== LoopState ===========================================================

/// Lifecycle state of a [`super::FixedStepLoop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    #[default]
    Idle,
    Running,
    Stopping,
    Stopped,
}

//=== LoopHandle ==========================================================

/// Cloneable stop signal for a running loop.
///
/// The loop checks the signal once per logical step and treats it exactly
/// like a close request from the surface.
#[derive(Debug, Clone, Default)]
pub struct LoopHandle {
    stop_requested: Arc<AtomicBool>,
}

impl LoopHandle {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Asks the loop to stop after its in-flight logical step.
    pub fn request_stop(&self) {
        self.stop_requested.store(true, Ordering::SeqCst);
    }

    pub fn is_stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::SeqCst)
    }
}

//=== Iteration ===========================================================

/// What one outer iteration did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Iteration {
    /// Clock time since the previous iteration.
    pub passed: Duration,

    /// Logical steps run by the catch-up loop.
    pub steps: u32,

    /// Whether the scene was rendered and presented.
    pub rendered: bool,

    /// Whether the idle strategy ran instead.
    pub idled: bool,
}

//=== LoopStats ===========================================================

/// Lifetime counters for one loop instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoopStats {
    pub iterations: u64,
    pub logical_steps: u64,
    pub frames_presented: u64,
    pub idle_waits: u64,
    pub interrupted_waits: u64,
}

//=========================================================================
// Unit Tests
//=========================================================================
