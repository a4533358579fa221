//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use cadence_engine::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine facade
pub use crate::engine::{Engine, EngineBuilder};

// Fixed-step loop
pub use crate::core::fixed_step::{
    FixedStepLoop, FrameBudget, IdleStrategy, Interrupted, Iteration, LoopError, LoopHandle,
    LoopState, LoopStats, NoIdle, SleepIdle, SpinIdle, Stage, StepBoundary,
};

// Collaborators
pub use crate::core::clock::{Clock, SystemClock};
pub use crate::core::scene::Scene;
pub use crate::core::surface::PresentationSurface;

// Input
pub use crate::core::input::{InputEvent, InputState, KeyCode, Modifiers, MouseButton};
