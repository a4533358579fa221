//=========================================================================
// Input
//=========================================================================
//
// Portable input events and the per-tick snapshot scenes query.
//
// Flow:
//   platform (winit) → InputEvent batches → channel → Scene::handle_input
//                                                     → InputState::apply
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event;
mod input_state;

//=== Public API ==========================================================

pub use event::{InputEvent, KeyCode, Modifiers, MouseButton};
pub use input_state::InputState;
