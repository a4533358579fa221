//=========================================================================
// Cadence Engine: Library Root
//
// A fixed-timestep game loop: logical updates at a constant rate,
// frames presented whenever at least one update ran, and the thread
// handed back to the OS when nothing is due.
//
// Responsibilities:
// - Expose the engine facade (`Engine`, `EngineBuilder`)
// - Expose the loop and its collaborator traits under `core`
// - Provide the winit window surface and the demo scene used by the
//   `cadence` binary
//
// Typical usage:
// ```no_run
// use cadence_engine::prelude::*;
//
// fn main() -> anyhow::Result<()> {
//     let mut engine = EngineBuilder::new().build(my_scene, my_surface)?;
//     engine.run()?;
//     Ok(())
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the loop, clocks, input model and the `Scene` /
// `PresentationSurface` traits. It has no windowing dependency.
//
pub mod core;

// `platform` is the winit-backed presentation surface.
pub mod platform;

pub mod config;
pub mod demo;
pub mod logging;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------

mod engine;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};
