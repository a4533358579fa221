//=========================================================================
// Cadence Engine
//
// Main entry point and coordinator for the engine.
//
// Architecture:
// ```text
//     EngineBuilder  ──build(scene, surface)──>  Engine  ──run()──>  [Loop]
//         │                                        │
//         ├─ with_frame_cap()                      └─ drives FixedStepLoop
//         ├─ with_idle_sleep()                        on the calling thread
//         └─ with_step_boundary()                     until the surface closes
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::config::{EngineConfig, DEFAULT_FRAME_CAP, DEFAULT_IDLE_SLEEP};
use crate::core::clock::SystemClock;
use crate::core::fixed_step::{
    FixedStepLoop, FrameBudget, LoopError, LoopHandle, LoopState, LoopStats, SleepIdle,
    StepBoundary,
};
use crate::core::scene::Scene;
use crate::core::surface::PresentationSurface;

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **Frame cap**: 5000.0 (logical updates per second)
/// - **Idle sleep**: 1 ms
/// - **Step boundary**: [`StepBoundary::Inclusive`]
///
/// # Examples
///
/// ```no_run
/// # use cadence_engine::prelude::*;
/// # use std::time::Duration;
/// # struct Game;
/// # impl Scene for Game {
/// #     fn advance(&mut self, _dt: Duration) -> anyhow::Result<()> { Ok(()) }
/// #     fn render(&mut self) -> anyhow::Result<()> { Ok(()) }
/// # }
/// # struct Screen;
/// # impl PresentationSurface for Screen {
/// #     fn should_close(&mut self) -> bool { false }
/// #     fn present(&mut self) -> anyhow::Result<()> { Ok(()) }
/// #     fn dispose(&mut self) -> anyhow::Result<()> { Ok(()) }
/// # }
/// EngineBuilder::new()
///     .with_frame_cap(120.0)
///     .build(Game, Screen)?
///     .run()?;
/// # Ok::<(), LoopError>(())
/// ```
#[derive(Debug, Clone)]
pub struct EngineBuilder {
    frame_cap: f64,
    idle_sleep: Duration,
    boundary: StepBoundary,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            frame_cap: DEFAULT_FRAME_CAP,
            idle_sleep: DEFAULT_IDLE_SLEEP,
            boundary: StepBoundary::default(),
        }
    }

    /// Takes frame cap and idle sleep from `config`.
    pub fn with_config(self, config: &EngineConfig) -> Self {
        self.with_frame_cap(config.frame_cap)
            .with_idle_sleep(config.idle_sleep)
    }

    /// Sets the target logical updates per second.
    ///
    /// Default: 5000.0
    ///
    /// # Panics
    ///
    /// Panics if `frame_cap` is not greater than zero.
    pub fn with_frame_cap(mut self, frame_cap: f64) -> Self {
        assert!(frame_cap > 0.0, "Frame cap must be positive, got {}", frame_cap);
        self.frame_cap = frame_cap;
        self
    }

    /// Sets how long the loop sleeps when no logical step is due.
    ///
    /// Default: 1 ms
    pub fn with_idle_sleep(mut self, idle_sleep: Duration) -> Self {
        self.idle_sleep = idle_sleep;
        self
    }

    pub fn with_step_boundary(mut self, boundary: StepBoundary) -> Self {
        self.boundary = boundary;
        self
    }

    /// Builds the engine around `scene` and `surface`.
    ///
    /// # Errors
    ///
    /// [`LoopError::InvalidFrameRate`] if the frame cap yields no usable
    /// step (e.g. infinite).
    pub fn build<S, P>(self, scene: S, surface: P) -> Result<Engine<S, P>, LoopError>
    where
        S: Scene,
        P: PresentationSurface,
    {
        info!(
            "Building engine (frame cap: {}, idle sleep: {:?}, boundary: {:?})",
            self.frame_cap, self.idle_sleep, self.boundary
        );

        let budget = FrameBudget::from_rate(self.frame_cap)?;
        let game_loop = FixedStepLoop::new(SystemClock::new(), scene, surface, budget)?
            .with_idle(SleepIdle::new(self.idle_sleep))
            .with_step_boundary(self.boundary);

        Ok(Engine { game_loop })
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Cadence engine runtime.
///
/// Owns a [`FixedStepLoop`] running on the wall clock. Create via
/// [`EngineBuilder`].
pub struct Engine<S: Scene, P: PresentationSurface> {
    game_loop: FixedStepLoop<SystemClock, S, P, SleepIdle>,
}

impl<S: Scene, P: PresentationSurface> Engine<S, P> {
    //--- Execution --------------------------------------------------------

    /// Runs the loop on the calling thread until the surface asks to close
    /// or a [`LoopHandle`] requests a stop.
    ///
    /// # Lifecycle
    ///
    /// 1. Loop enters `Running` and takes its baseline clock reading
    /// 2. Steps, renders and presents until stopped
    /// 3. Surface is disposed, loop ends `Stopped`
    ///
    /// # Errors
    ///
    /// The first collaborator failure, after cleanup has run.
    pub fn run(&mut self) -> Result<(), LoopError> {
        info!("Starting engine runtime (frame cap: {})", self.game_loop.budget().rate());

        let result = self.game_loop.start();

        let stats = self.game_loop.stats();
        match &result {
            Ok(()) => info!(
                "Engine shutdown complete ({} steps, {} frames)",
                stats.logical_steps, stats.frames_presented
            ),
            Err(e) => error!("Engine stopped on error: {}", e),
        }

        result
    }

    //--- Accessors --------------------------------------------------------

    /// Handle for stopping the engine from inside a collaborator.
    pub fn handle(&self) -> LoopHandle {
        self.game_loop.handle()
    }

    pub fn state(&self) -> LoopState {
        self.game_loop.state()
    }

    pub fn stats(&self) -> LoopStats {
        self.game_loop.stats()
    }

    pub fn scene(&self) -> &S {
        self.game_loop.scene()
    }

    pub fn into_parts(self) -> (S, P) {
        self.game_loop.into_parts()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingScene {
        steps: u64,
    }

    impl Scene for CountingScene {
        fn advance(&mut self, _dt: Duration) -> anyhow::Result<()> {
            self.steps += 1;
            Ok(())
        }

        fn render(&mut self) -> anyhow::Result<()> {
            Ok(())
        }
    }

    struct ClosingSurface {
        presents: u32,
        close_after: u32,
        disposed: bool,
    }

    impl ClosingSurface {
        fn new(close_after: u32) -> Self {
            Self { presents: 0, close_after, disposed: false }
        }
    }

    impl PresentationSurface for ClosingSurface {
        fn should_close(&mut self) -> bool {
            self.presents >= self.close_after
        }

        fn present(&mut self) -> anyhow::Result<()> {
            self.presents += 1;
            Ok(())
        }

        fn dispose(&mut self) -> anyhow::Result<()> {
            self.disposed = true;
            Ok(())
        }
    }

    //=====================================================================
    // EngineBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = EngineBuilder::new();
        assert_eq!(builder.frame_cap, 5000.0);
        assert_eq!(builder.idle_sleep, Duration::from_millis(1));
        assert_eq!(builder.boundary, StepBoundary::Inclusive);
    }

    #[test]
    fn builder_with_frame_cap() {
        let builder = EngineBuilder::new().with_frame_cap(120.0);
        assert_eq!(builder.frame_cap, 120.0);
    }

    #[test]
    #[should_panic(expected = "Frame cap must be positive")]
    fn builder_with_frame_cap_panics_on_zero() {
        EngineBuilder::new().with_frame_cap(0.0);
    }

    #[test]
    #[should_panic(expected = "Frame cap must be positive")]
    fn builder_with_frame_cap_panics_on_nan() {
        EngineBuilder::new().with_frame_cap(f64::NAN);
    }

    #[test]
    fn builder_with_config() {
        let config = EngineConfig {
            frame_cap: 250.0,
            idle_sleep: Duration::from_micros(200),
            ..EngineConfig::default()
        };

        let builder = EngineBuilder::new().with_config(&config);

        assert_eq!(builder.frame_cap, 250.0);
        assert_eq!(builder.idle_sleep, Duration::from_micros(200));
    }

    #[test]
    fn build_rejects_infinite_frame_cap() {
        let result = EngineBuilder::new()
            .with_frame_cap(f64::INFINITY)
            .build(CountingScene { steps: 0 }, ClosingSurface::new(1));

        assert!(matches!(result, Err(LoopError::InvalidFrameRate(_))));
    }

    //=====================================================================
    // Engine Tests
    //=====================================================================

    #[test]
    fn engine_runs_until_surface_closes() {
        let mut engine = EngineBuilder::new()
            .with_frame_cap(1000.0)
            .build(CountingScene { steps: 0 }, ClosingSurface::new(3))
            .unwrap();
        assert_eq!(engine.state(), LoopState::Idle);

        engine.run().unwrap();

        assert_eq!(engine.state(), LoopState::Stopped);
        assert!(engine.stats().frames_presented >= 3);
        let (scene, surface) = engine.into_parts();
        assert!(scene.steps >= 3);
        assert!(surface.disposed);
    }

    #[test]
    fn stop_requested_before_run_ends_after_first_step() {
        let mut engine = EngineBuilder::new()
            .with_frame_cap(1000.0)
            .build(CountingScene { steps: 0 }, ClosingSurface::new(u32::MAX))
            .unwrap();

        engine.handle().request_stop();
        engine.run().unwrap();

        assert_eq!(engine.state(), LoopState::Stopped);
        assert!(engine.scene().steps <= 1);
    }
}
