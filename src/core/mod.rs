//=========================================================================
// Core
//=========================================================================
//
// The fixed-step loop and the contracts it drives.
//
// Architecture:
// ```text
//   FixedStepLoop
//     ├─ Clock                (now)
//     ├─ Scene                (handle_input, advance, render)
//     ├─ PresentationSurface  (should_close, present, dispose)
//     └─ IdleStrategy         (idle)
// ```
//
// Notes:
// Everything here is single-threaded and platform independent. Window
// and OS integration live in the `platform` module, behind the
// `PresentationSurface` contract.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod clock;
pub mod fixed_step;
pub mod input;
pub mod scene;
pub mod surface;

//=== Public API ==========================================================

pub use clock::{Clock, ManualClock, ScriptedClock, SystemClock};
pub use fixed_step::{
    FixedStepLoop, FrameBudget, IdleStrategy, Iteration, LoopError, LoopHandle, LoopState,
    LoopStats, StepBoundary,
};
pub use scene::Scene;
pub use surface::PresentationSurface;
