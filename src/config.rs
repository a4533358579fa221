//=========================================================================
// Configuration
//=========================================================================
//
// Startup constants and the structs that carry them. There are no config
// files: defaults live here and the binary can override them from the
// command line.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== Defaults ============================================================

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 800;
pub const DEFAULT_TITLE: &str = "3D Engine";

/// Target logical updates per second.
pub const DEFAULT_FRAME_CAP: f64 = 5000.0;

pub const DEFAULT_IDLE_SLEEP: Duration = Duration::from_millis(1);

/// Capacity of the platform → scene input channel.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 128;

//=== WindowConfig ========================================================

/// Presentation surface settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl WindowConfig {
    /// Width over height, for projection setup.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

//=== EngineConfig ========================================================

/// Everything the engine needs at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub window: WindowConfig,
    pub frame_cap: f64,
    pub idle_sleep: Duration,
    pub channel_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            frame_cap: DEFAULT_FRAME_CAP,
            idle_sleep: DEFAULT_IDLE_SLEEP,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
