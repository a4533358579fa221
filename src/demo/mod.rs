//=========================================================================
// Orbit Demo Scene
//=========================================================================
//
// A small scene for the binary: a tetrahedron swinging side to side
// while it yaws, watched by a camera the player moves with W/A/S/D or
// the arrow keys. Dragging with the right mouse button looks around,
// Shift sprints and Space recenters the camera.
//
// Per logical step:
//   t          += step
//   translation = (sin t, 0, 5)
//   yaw         = sin t · 180°
//   camera     += heading(direction) · speed · step
//
// Rendering produces a `FrameSnapshot`; GPU drawing is out of scope.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use crossbeam_channel::Receiver;
use log::{debug, trace};

//=== Internal Dependencies ===============================================

use crate::config::WindowConfig;
use crate::core::input::{InputState, KeyCode, MouseButton};
use crate::core::scene::Scene;
use crate::platform::PlatformEvent;

//=== Constants ===========================================================

/// Camera travel in world units per simulated second.
pub const CAMERA_SPEED: f32 = 10.0;

/// Speed multiplier while Shift is held.
pub const SPRINT_FACTOR: f32 = 2.0;

/// Look rotation in degrees per pixel of mouse drag.
pub const MOUSE_SENSITIVITY: f32 = 0.5;

const MAX_PITCH_DEG: f32 = 89.0;

const FIELD_OF_VIEW_DEG: f32 = 70.0;
const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 1000.0;

/// Tetrahedron positions (x, y, z) and texture coordinates (u, v).
pub const TETRAHEDRON_VERTICES: [([f32; 3], [f32; 2]); 4] = [
    ([-1.0, -1.0, 0.5773], [0.0, 0.0]),
    ([0.0, -1.0, -1.15475], [0.5, 0.0]),
    ([1.0, -1.0, 0.5773], [1.0, 0.0]),
    ([0.0, 1.0, 0.0], [0.5, 1.0]),
];

pub const TETRAHEDRON_INDICES: [u32; 12] = [0, 3, 1, 1, 3, 2, 2, 3, 0, 1, 2, 0];

//=== Projection ==========================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub fov_deg: f32,
    pub aspect: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Projection {
    fn perspective(aspect: f32) -> Self {
        Self {
            fov_deg: FIELD_OF_VIEW_DEG,
            aspect,
            z_near: Z_NEAR,
            z_far: Z_FAR,
        }
    }
}

//=== FrameSnapshot =======================================================

/// What one `render()` would submit to the GPU.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSnapshot {
    pub translation: [f32; 3],
    pub rotation_deg: [f32; 3],
    pub camera: [f32; 3],
    /// Camera pitch and yaw, in degrees.
    pub look_deg: [f32; 2],
    pub clear_color: [f32; 3],
    pub projection: Projection,
}

//=== OrbitScene ==========================================================

pub struct OrbitScene {
    inputs: Receiver<PlatformEvent>,
    input: InputState,
    simulated: f64,
    translation: [f32; 3],
    rotation_deg: [f32; 3],
    camera: [f32; 3],
    look_deg: [f32; 2],
    last_mouse: (f32, f32),
    projection: Projection,
    last_frame: Option<FrameSnapshot>,
    frames_rendered: u64,
}

impl OrbitScene {
    pub fn new(window: &WindowConfig, inputs: Receiver<PlatformEvent>) -> Self {
        Self {
            inputs,
            input: InputState::new(),
            simulated: 0.0,
            translation: [0.0, 0.0, 5.0],
            rotation_deg: [0.0; 3],
            camera: [0.0; 3],
            look_deg: [0.0; 2],
            last_mouse: (0.0, 0.0),
            projection: Projection::perspective(window.aspect_ratio()),
            last_frame: None,
            frames_rendered: 0,
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Total simulated time, in seconds.
    pub fn simulated_seconds(&self) -> f64 {
        self.simulated
    }

    pub fn translation(&self) -> [f32; 3] {
        self.translation
    }

    pub fn rotation_deg(&self) -> [f32; 3] {
        self.rotation_deg
    }

    pub fn camera(&self) -> [f32; 3] {
        self.camera
    }

    /// Camera pitch and yaw, in degrees.
    pub fn look_deg(&self) -> [f32; 2] {
        self.look_deg
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    pub fn last_frame(&self) -> Option<&FrameSnapshot> {
        self.last_frame.as_ref()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    //--- Helpers ----------------------------------------------------------

    /// Mouse look while the right button is held. Pitch is clamped.
    fn look(&mut self) {
        let (x, y) = self.input.mouse_position();
        let (dx, dy) = (x - self.last_mouse.0, y - self.last_mouse.1);
        self.last_mouse = (x, y);

        if !self.input.is_button_down(MouseButton::Right) {
            return;
        }

        let [pitch, yaw] = &mut self.look_deg;
        *yaw = (*yaw + dx * MOUSE_SENSITIVITY).rem_euclid(360.0);
        *pitch = (*pitch - dy * MOUSE_SENSITIVITY).clamp(-MAX_PITCH_DEG, MAX_PITCH_DEG);
    }

    /// Movement direction from held keys, turned to the camera's yaw.
    fn movement(&self) -> [f32; 3] {
        let held = |a: KeyCode, b: KeyCode| self.input.is_key_down(a) || self.input.is_key_down(b);
        let axis = |pos: bool, neg: bool| (pos as i8 - neg as i8) as f32;

        let x = axis(
            held(KeyCode::KeyD, KeyCode::ArrowRight),
            held(KeyCode::KeyA, KeyCode::ArrowLeft),
        );
        let z = axis(
            held(KeyCode::KeyW, KeyCode::ArrowUp),
            held(KeyCode::KeyS, KeyCode::ArrowDown),
        );
        let (sin, cos) = self.look_deg[1].to_radians().sin_cos();
        [x * cos + z * sin, 0.0, z * cos - x * sin]
    }
}

impl Scene for OrbitScene {
    fn handle_input(&mut self) -> anyhow::Result<()> {
        self.input.begin_tick();

        for event in self.inputs.try_iter() {
            match event {
                PlatformEvent::Inputs { discrete, continuous } => {
                    self.input.apply(&discrete);
                    self.input.apply(&continuous);
                }
                PlatformEvent::Resized { width, height } if height > 0 => {
                    self.projection.aspect = width as f32 / height as f32;
                    debug!(target: "scene", "Aspect ratio now {:.3}", self.projection.aspect);
                }
                PlatformEvent::Resized { .. } => {}
            }
        }

        if self.input.is_key_pressed(KeyCode::Space) {
            debug!(target: "scene", "Camera recentered");
            self.camera = [0.0; 3];
            self.look_deg = [0.0; 2];
        }
        self.look();

        Ok(())
    }

    fn advance(&mut self, dt: Duration) -> anyhow::Result<()> {
        let dt = dt.as_secs_f64();
        self.simulated += dt;

        let swing = self.simulated.sin() as f32;
        self.translation = [swing, 0.0, 5.0];
        self.rotation_deg = [0.0, swing * 180.0, 0.0];

        let sprint = if self.input.modifiers().shift { SPRINT_FACTOR } else { 1.0 };
        let step = CAMERA_SPEED * sprint * dt as f32;
        let direction = self.movement();
        for (position, d) in self.camera.iter_mut().zip(direction) {
            *position += d * step;
        }

        Ok(())
    }

    fn render(&mut self) -> anyhow::Result<()> {
        let clear_color = self.camera.map(|c| (c / 1024.0).abs());

        let frame = FrameSnapshot {
            translation: self.translation,
            rotation_deg: self.rotation_deg,
            camera: self.camera,
            look_deg: self.look_deg,
            clear_color,
            projection: self.projection,
        };
        trace!(target: "scene", "Frame {}: {:?}", self.frames_rendered, frame);

        self.last_frame = Some(frame);
        self.frames_rendered += 1;
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
