//=========================================================================
// Fixed-Step Loop
//=========================================================================
//
// Runs a scene at a fixed logical rate while presenting frames at an
// independent rate, using a time accumulator.
//
// Outer iteration:
// ```text
//   now ──> passed = now - last ──> accumulator += passed
//                                   fps.window  += passed
//
//   while accumulator is due (>= or > frame_time):
//       accumulator -= frame_time          (never clamped)
//       surface.should_close()? ──> stop() (step still completes)
//       scene.handle_input()
//       scene.advance(step)                (fixed step, never `passed`)
//       fps.poll_report()
//
//   steps > 0 ? scene.render() + surface.present() + frames += 1
//             : idle.idle()                (interruptions swallowed)
// ```
//
// Everything runs on the calling thread. Stopping is cooperative and is
// observed once per logical step. A stalled collaborator stalls the loop.
//
//=========================================================================

//=== Module Declarations =================================================

mod budget;
mod error;
pub mod fps;
pub mod idle;
mod state;

//=== Public API ==========================================================

pub use budget::{FrameBudget, StepBoundary};
pub use error::{LoopError, Stage};
pub use fps::FpsCounter;
pub use idle::{IdleStrategy, Interrupted, NoIdle, SleepIdle, SpinIdle};
pub use state::{Iteration, LoopHandle, LoopState, LoopStats};

//=== External Dependencies ===============================================

use std::time::Duration;

use log::{debug, error, info, trace, warn};

//=== Internal Dependencies ===============================================

use crate::core::clock::{self, Clock};
use crate::core::scene::Scene;
use crate::core::surface::PresentationSurface;

//=== FixedStepLoop =======================================================

/// Fixed-timestep loop owning its clock, scene and presentation surface.
///
/// # Examples
///
/// ```rust
/// # use cadence_engine::prelude::*;
/// # use cadence_engine::core::clock::ScriptedClock;
/// # use std::time::Duration;
/// # struct Spin;
/// # impl Scene for Spin {
/// #     fn advance(&mut self, _dt: Duration) -> anyhow::Result<()> { Ok(()) }
/// #     fn render(&mut self) -> anyhow::Result<()> { Ok(()) }
/// # }
/// # struct Headless { frames: u32 }
/// # impl PresentationSurface for Headless {
/// #     fn should_close(&mut self) -> bool { self.frames >= 10 }
/// #     fn present(&mut self) -> anyhow::Result<()> { self.frames += 1; Ok(()) }
/// #     fn dispose(&mut self) -> anyhow::Result<()> { Ok(()) }
/// # }
/// let clock = ScriptedClock::repeating(Duration::from_millis(1));
/// let budget = FrameBudget::from_rate(1000.0)?;
///
/// let mut game = FixedStepLoop::new(clock, Spin, Headless { frames: 0 }, budget)?
///     .with_idle(NoIdle);
///
/// game.start()?;
/// assert_eq!(game.state(), LoopState::Stopped);
/// # Ok::<(), LoopError>(())
/// ```
pub struct FixedStepLoop<C, S, P, I = SleepIdle>
where
    C: Clock,
    S: Scene,
    P: PresentationSurface,
    I: IdleStrategy,
{
    clock: C,
    scene: S,
    surface: P,
    idle: I,
    budget: FrameBudget,
    boundary: StepBoundary,
    state: LoopState,
    handle: LoopHandle,
    last_time: Duration,
    accumulator: f64,
    fps: FpsCounter,
    stats: LoopStats,
}

impl<C, S, P> FixedStepLoop<C, S, P, SleepIdle>
where
    C: Clock,
    S: Scene,
    P: PresentationSurface,
{
    //--- Construction -----------------------------------------------------

    /// Creates an idle loop that sleeps for 1 ms when no step is due.
    ///
    /// # Errors
    ///
    /// [`LoopError::NonMonotonicClock`] if `clock` cannot guarantee
    /// non-decreasing readings.
    pub fn new(clock: C, scene: S, surface: P, budget: FrameBudget) -> Result<Self, LoopError> {
        if !clock.is_monotonic() {
            error!(target: "loop", "Rejecting non-monotonic clock");
            return Err(LoopError::NonMonotonicClock);
        }

        Ok(Self {
            clock,
            scene,
            surface,
            idle: SleepIdle::default(),
            budget,
            boundary: StepBoundary::default(),
            state: LoopState::Idle,
            handle: LoopHandle::new(),
            last_time: Duration::ZERO,
            accumulator: 0.0,
            fps: FpsCounter::new(),
            stats: LoopStats::default(),
        })
    }
}

impl<C, S, P, I> FixedStepLoop<C, S, P, I>
where
    C: Clock,
    S: Scene,
    P: PresentationSurface,
    I: IdleStrategy,
{
    //--- Configuration ----------------------------------------------------

    /// Replaces the idle strategy.
    pub fn with_idle<J: IdleStrategy>(self, idle: J) -> FixedStepLoop<C, S, P, J> {
        FixedStepLoop {
            clock: self.clock,
            scene: self.scene,
            surface: self.surface,
            idle,
            budget: self.budget,
            boundary: self.boundary,
            state: self.state,
            handle: self.handle,
            last_time: self.last_time,
            accumulator: self.accumulator,
            fps: self.fps,
            stats: self.stats,
        }
    }

    /// Sets how an exactly-full accumulator is treated.
    pub fn with_step_boundary(mut self, boundary: StepBoundary) -> Self {
        self.boundary = boundary;
        self
    }

    //--- Lifecycle --------------------------------------------------------

    /// Runs the loop until it stops, then cleans up.
    ///
    /// Blocks the calling thread. A no-op unless the loop is `Idle`, so a
    /// second call never spawns a second loop.
    ///
    /// # Errors
    ///
    /// Any collaborator failure, wrapped in [`LoopError::Collaborator`].
    /// The surface is still disposed and the loop ends in `Stopped`.
    pub fn start(&mut self) -> Result<(), LoopError> {
        if self.state != LoopState::Idle {
            debug!(target: "loop", "start() ignored in state {:?}", self.state);
            return Ok(());
        }

        self.begin();

        while self.state == LoopState::Running {
            self.run_iteration()?;
        }

        self.finish()
    }

    /// Requests a graceful stop. A no-op unless the loop is `Running`.
    pub fn stop(&mut self) {
        if self.state != LoopState::Running {
            debug!(target: "loop", "stop() ignored in state {:?}", self.state);
            return;
        }

        info!(target: "loop", "Stopping loop");
        self.state = LoopState::Stopping;
    }

    /// Enters `Running` and takes the baseline clock reading.
    ///
    /// A no-op unless the loop is `Idle`. Use with [`Self::run_iteration`]
    /// and [`Self::finish`] to drive the loop one iteration at a time.
    pub fn begin(&mut self) {
        if self.state != LoopState::Idle {
            debug!(target: "loop", "begin() ignored in state {:?}", self.state);
            return;
        }

        self.last_time = self.clock.now();
        self.state = LoopState::Running;

        info!(
            target: "loop",
            "Loop running ({} updates/s, step {:?}, boundary {:?})",
            self.budget.rate(),
            self.budget.step(),
            self.boundary
        );
    }

    /// Runs cleanup (disposes the surface) and enters `Stopped`.
    ///
    /// A running loop is stopped first. A no-op for `Idle` and `Stopped`.
    ///
    /// # Errors
    ///
    /// A failing `dispose()`, as [`Stage::Dispose`]. The loop is
    /// `Stopped` either way.
    pub fn finish(&mut self) -> Result<(), LoopError> {
        match self.state {
            LoopState::Idle | LoopState::Stopped => return Ok(()),
            LoopState::Running => self.stop(),
            LoopState::Stopping => {}
        }

        let result = self.surface.dispose();
        self.state = LoopState::Stopped;

        info!(
            target: "loop",
            "Loop stopped after {} logical steps, {} frames",
            self.stats.logical_steps,
            self.stats.frames_presented
        );

        result.map_err(|e| LoopError::collaborator(Stage::Dispose, e))
    }

    //--- Iteration --------------------------------------------------------

    /// Runs one outer iteration. A no-op unless the loop is `Running`.
    ///
    /// # Errors
    ///
    /// Any collaborator failure. Cleanup has already run when this
    /// returns an error.
    pub fn run_iteration(&mut self) -> Result<Iteration, LoopError> {
        if self.state != LoopState::Running {
            return Ok(Iteration::default());
        }

        //--- 1. Measure time since the previous iteration -----------------
        let start_time = self.clock.now();
        if start_time < self.last_time {
            warn!(
                target: "loop",
                "Clock went backwards ({:?} -> {:?}); counting as zero elapsed",
                self.last_time,
                start_time
            );
        }
        let passed = clock::elapsed(self.last_time, start_time);
        self.last_time = self.last_time.max(start_time);

        self.accumulator += passed.as_secs_f64();
        self.fps.accumulate(passed);
        self.stats.iterations += 1;

        let mut iteration = Iteration {
            passed,
            ..Iteration::default()
        };

        //--- 2. Catch up on due logical steps -----------------------------
        let frame_time = self.budget.frame_time();
        while self.boundary.is_due(self.accumulator, frame_time) {
            iteration.steps += 1;
            self.accumulator -= frame_time;

            if self.surface.should_close() {
                info!(target: "loop", "Surface requested close");
                self.stop();
            }
            if self.handle.is_stop_requested() {
                self.stop();
            }

            if let Err(e) = self.scene.handle_input() {
                return Err(self.abort(Stage::HandleInput, e));
            }
            if let Err(e) = self.scene.advance(self.budget.step()) {
                return Err(self.abort(Stage::Advance, e));
            }
            self.stats.logical_steps += 1;

            if let Some(frames) = self.fps.poll_report() {
                info!(target: "loop::fps", "fps: {}", frames);
            }
        }

        //--- 3. Present, or yield until the next step is due --------------
        if iteration.steps > 0 {
            if let Err(e) = self.scene.render() {
                return Err(self.abort(Stage::Render, e));
            }
            if let Err(e) = self.surface.present() {
                return Err(self.abort(Stage::Present, e));
            }
            self.fps.frame_presented();
            self.stats.frames_presented += 1;
            iteration.rendered = true;

            trace!(
                target: "loop",
                "{} step(s), accumulator {:.6}s",
                iteration.steps,
                self.accumulator
            );
        } else {
            iteration.idled = true;
            self.stats.idle_waits += 1;
            if let Err(Interrupted) = self.idle.idle() {
                self.stats.interrupted_waits += 1;
                debug!(target: "loop", "Idle wait interrupted; continuing");
            }
        }

        Ok(iteration)
    }

    /// Stops and cleans up after a collaborator failure.
    fn abort(&mut self, stage: Stage, cause: anyhow::Error) -> LoopError {
        error!(target: "loop", "{} failed: {:#}", stage, cause);

        self.stop();
        if let Err(e) = self.finish() {
            warn!(target: "loop", "Cleanup after failure also failed: {}", e);
        }

        LoopError::collaborator(stage, cause)
    }

    //--- Accessors --------------------------------------------------------

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Simulated time owed but not yet consumed, in seconds.
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    pub fn budget(&self) -> FrameBudget {
        self.budget
    }

    pub fn step_boundary(&self) -> StepBoundary {
        self.boundary
    }

    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    pub fn fps(&self) -> &FpsCounter {
        &self.fps
    }

    /// Stop signal usable from outside the loop.
    pub fn handle(&self) -> LoopHandle {
        self.handle.clone()
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    pub fn surface(&self) -> &P {
        &self.surface
    }

    /// Consumes the loop and returns its scene and surface.
    pub fn into_parts(self) -> (S, P) {
        (self.scene, self.surface)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
