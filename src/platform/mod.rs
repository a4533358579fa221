//=========================================================================
// Platform Subsystem
//
// Winit-backed presentation surface for the fixed-step loop.
//
// Architecture:
// ```text
//  FixedStepLoop (main thread)
//    │
//    ├─ should_close() ──> pump_app_events(0) ──> SurfaceApp::window_event
//    │                                              ├─ translate (winit → engine)
//    │                                              └─ InputBuffer
//    │
//    ├─ present()  ──> flush InputBuffer ──> channel ──> Scene::handle_input
//    │                 request_redraw()
//    │
//    └─ dispose()  ──> drop window
// ```
//
// Key Design Decisions:
// - **Pull, not push**: the loop owns control flow, so the winit event
//   loop is pumped with a zero timeout instead of `run_app()`
// - **Present = frame boundary**: buffered input is sent as one batch per
//   presented frame, like RedrawRequested in a push-style runtime
// - **Never block on the channel**: the scene drains it on the same
//   thread, so a full channel drops the batch with a warning
// - **Main thread**: winit requires the event loop on the main thread on
//   macOS/iOS; create the surface from `main`
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod translate;

//=== External Crates =====================================================

use std::time::Duration;

use crossbeam_channel::{Sender, TrySendError};
use log::*;
use thiserror::Error;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{ModifiersState, PhysicalKey},
    platform::pump_events::{EventLoopExtPumpEvents, PumpStatus},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::config::WindowConfig;
use crate::core::input::{InputEvent, KeyCode, Modifiers};
use crate::core::surface::PresentationSurface;
use input_buffer::InputBuffer;

//=== PlatformEvent =======================================================

/// Messages from the surface to the scene.
#[derive(Debug, Clone)]
pub enum PlatformEvent {
    /// Input gathered since the previous presented frame.
    ///
    /// Empty batches are not sent.
    Inputs {
        discrete: Vec<InputEvent>,
        continuous: Vec<InputEvent>,
    },

    /// Drawable area changed size (physical pixels).
    Resized { width: u32, height: u32 },
}

//=== PlatformError =======================================================

/// Fatal surface creation errors.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("event loop creation failed: {0}")]
    EventLoopCreation(#[from] winit::error::EventLoopError),

    #[error("window creation failed: {0}")]
    WindowCreation(#[from] winit::error::OsError),

    #[error("event loop exited during startup (code {0})")]
    ExitedDuringStartup(i32),

    #[error("no window was created after {0} event pumps")]
    NoWindow(usize),
}

//=== WindowSurface =======================================================

/// OS window acting as the loop's presentation surface.
pub struct WindowSurface {
    event_loop: EventLoop<()>,
    app: SurfaceApp,
}

impl WindowSurface {
    const STARTUP_PUMPS: usize = 20;
    const STARTUP_PUMP_TIMEOUT: Duration = Duration::from_millis(10);

    /// Opens a window and starts forwarding its input to `event_sender`.
    ///
    /// # Errors
    ///
    /// Any [`PlatformError`]: no display, window creation refused, or the
    /// OS closing the event loop before a window exists.
    pub fn create(
        config: &WindowConfig,
        event_sender: Sender<PlatformEvent>,
    ) -> Result<Self, PlatformError> {
        let mut event_loop = EventLoop::new()?;
        let mut app = SurfaceApp::new(config.clone(), event_sender);

        // The window is created in `resumed`, delivered by an early pump.
        for _ in 0..Self::STARTUP_PUMPS {
            if let PumpStatus::Exit(code) =
                event_loop.pump_app_events(Some(Self::STARTUP_PUMP_TIMEOUT), &mut app)
            {
                return Err(PlatformError::ExitedDuringStartup(code));
            }
            if let Some(e) = app.creation_error.take() {
                return Err(PlatformError::WindowCreation(e));
            }
            if app.window.is_some() {
                return Ok(Self { event_loop, app });
            }
        }

        Err(PlatformError::NoWindow(Self::STARTUP_PUMPS))
    }
}

impl PresentationSurface for WindowSurface {
    fn should_close(&mut self) -> bool {
        if self.app.close_requested {
            return true;
        }

        if let PumpStatus::Exit(code) = self.event_loop.pump_app_events(Some(Duration::ZERO), &mut self.app) {
            info!(target: "platform", "Event loop exited (code {})", code);
            self.app.close_requested = true;
        }

        self.app.close_requested
    }

    fn present(&mut self) -> anyhow::Result<()> {
        self.app.flush_input_buffer();

        let Some(window) = &self.app.window else {
            anyhow::bail!("present() called without a window");
        };
        window.pre_present_notify();
        window.request_redraw();
        Ok(())
    }

    fn dispose(&mut self) -> anyhow::Result<()> {
        if self.app.window.take().is_some() {
            info!(target: "platform", "Window disposed");
        }
        Ok(())
    }
}

//=== SurfaceApp ==========================================================

/// Winit handler state behind [`WindowSurface`].
struct SurfaceApp {
    config: WindowConfig,
    window: Option<Window>,
    creation_error: Option<winit::error::OsError>,
    close_requested: bool,
    buffer: InputBuffer,
    event_sender: Sender<PlatformEvent>,
    /// Last `ModifiersChanged` state, stamped onto key and button events.
    modifiers: Modifiers,
}

impl SurfaceApp {
    fn new(config: WindowConfig, event_sender: Sender<PlatformEvent>) -> Self {
        Self {
            config,
            window: None,
            creation_error: None,
            close_requested: false,
            buffer: InputBuffer::new(),
            event_sender,
            modifiers: Modifiers::NONE,
        }
    }

    /// Sends buffered input as one batch. Never blocks.
    fn flush_input_buffer(&mut self) {
        let Some((discrete, continuous)) = self.buffer.drain() else {
            return;
        };

        let total = discrete.len() + continuous.len();
        trace!(
            target: "platform::input",
            "Flushing {} discrete + {} continuous events",
            discrete.len(),
            continuous.len()
        );

        self.send(PlatformEvent::Inputs { discrete, continuous }, total);
    }

    fn send(&self, event: PlatformEvent, event_count: usize) {
        match self.event_sender.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                warn!(target: "platform::input", "Input channel full, dropping {} events", event_count);
            }
            Err(TrySendError::Disconnected(_)) => {
                warn!(target: "platform::input", "Input channel disconnected, dropping {} events", event_count);
            }
        }
    }

    fn set_modifiers(&mut self, state: ModifiersState) {
        self.modifiers = translate::modifiers(state);
    }

    /// Buffers a key transition. OS repeats and unmapped keys are
    /// dropped; Escape requests close instead of reaching the scene.
    fn handle_key(&mut self, physical_key: PhysicalKey, state: ElementState, repeat: bool) {
        if repeat {
            return;
        }

        let Some(key) = translate::key_code(physical_key) else {
            trace!(target: "platform::input", "Unmapped key {:?} ignored", physical_key);
            return;
        };

        let modifiers = self.modifiers;
        match state {
            ElementState::Pressed if key == KeyCode::Escape => {
                info!(target: "platform", "Escape pressed, requesting close");
                self.close_requested = true;
            }
            ElementState::Pressed => self.buffer.push(InputEvent::KeyDown { key, modifiers }),
            ElementState::Released => self.buffer.push(InputEvent::KeyUp { key, modifiers }),
        }
    }

    fn handle_mouse_button(&mut self, button: winit::event::MouseButton, state: ElementState) {
        let button = translate::mouse_button(button);
        let modifiers = self.modifiers;
        self.buffer.push(match state {
            ElementState::Pressed => InputEvent::MouseButtonDown { button, modifiers },
            ElementState::Released => InputEvent::MouseButtonUp { button, modifiers },
        });
    }

    /// Applies one window event to surface state.
    fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                info!(target: "platform", "Window close requested");
                self.close_requested = true;
            }

            WindowEvent::Resized(size) => {
                debug!(target: "platform", "Resized to {}x{}", size.width, size.height);
                self.send(
                    PlatformEvent::Resized {
                        width: size.width,
                        height: size.height,
                    },
                    1,
                );
            }

            WindowEvent::ModifiersChanged(state) => self.set_modifiers(state.state()),

            WindowEvent::CursorMoved { position, .. } => {
                self.buffer.push(InputEvent::MouseMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                });
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                self.handle_key(key_event.physical_key, key_event.state, key_event.repeat);
            }

            WindowEvent::MouseInput { state, button, .. } => self.handle_mouse_button(*button, *state),

            _ => {}
        }
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for SurfaceApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (resume)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.creation_error = Some(e);
            }
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        self.handle_window_event(&event);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
