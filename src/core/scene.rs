//=========================================================================
// Scene Contract
//=========================================================================
//
// Simulate-able, renderable state driven by the fixed-step loop.
//
// Per logical step:   handle_input() → advance(step)
// Per presented frame: render()
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== Scene Trait =========================================================

/// Capability interface the fixed-step loop drives.
///
/// Errors are not handled by the loop: any `Err` stops it and is
/// returned from [`crate::core::FixedStepLoop::start`].
///
/// # Minimal Implementation
///
/// ```rust
/// # use cadence_engine::prelude::*;
/// # use std::time::Duration;
/// struct Counter {
///     simulated: Duration,
/// }
///
/// impl Scene for Counter {
///     fn advance(&mut self, dt: Duration) -> anyhow::Result<()> {
///         self.simulated += dt;
///         Ok(())
///     }
///
///     fn render(&mut self) -> anyhow::Result<()> {
///         Ok(())
///     }
/// }
/// ```
pub trait Scene {
    /// Polls input for this logical tick.
    ///
    /// Default implementation does nothing.
    fn handle_input(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    /// Advances the simulation by exactly `dt`, the loop's fixed step.
    fn advance(&mut self, dt: Duration) -> anyhow::Result<()>;

    /// Draws the current state. Called at most once per outer iteration,
    /// and only after at least one logical step.
    fn render(&mut self) -> anyhow::Result<()>;
}

impl<T: Scene + ?Sized> Scene for Box<T> {
    fn handle_input(&mut self) -> anyhow::Result<()> {
        (**self).handle_input()
    }

    fn advance(&mut self, dt: Duration) -> anyhow::Result<()> {
        (**self).advance(dt)
    }

    fn render(&mut self) -> anyhow::Result<()> {
        (**self).render()
    }
}
