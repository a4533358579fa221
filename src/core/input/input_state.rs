//=========================================================================
// Input State
//
// Snapshot of held keys, held buttons, and cursor position, updated from
// batches of `InputEvent`s once per logical tick.
//
// Per-tick transitions (`pressed`) are cleared by `begin_tick()`, so a
// scene that polls every tick sees each key press exactly once.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::HashSet;
use std::fmt;

//=== Internal Modules ====================================================

use super::event::{InputEvent, KeyCode, Modifiers, MouseButton};

//=== Held ================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Held {
    Key(KeyCode),
    Button(MouseButton),
}

//=== InputState ==========================================================

/// Engine-level input snapshot.
pub struct InputState {
    held: HashSet<Held>,
    pressed: HashSet<Held>,
    mouse: (f32, f32),
    modifiers: Modifiers,
}

impl InputState {
    pub fn new() -> Self {
        const HELD_BASE: usize = 32;
        Self {
            held: HashSet::with_capacity(HELD_BASE),
            pressed: HashSet::with_capacity(HELD_BASE),
            mouse: (0.0, 0.0),
            modifiers: Modifiers::NONE,
        }
    }

    //--- Updates ----------------------------------------------------------

    /// Forgets last tick's press transitions. Held state is kept.
    pub fn begin_tick(&mut self) {
        self.pressed.clear();
    }

    /// Applies a batch of events. Returns `true` if anything changed.
    pub fn apply(&mut self, events: &[InputEvent]) -> bool {
        let mut changed = false;

        for event in events {
            match *event {
                InputEvent::KeyDown { key, modifiers } => {
                    self.modifiers = modifiers;
                    changed |= self.press(Held::Key(key));
                }
                InputEvent::KeyUp { key, modifiers } => {
                    self.modifiers = modifiers;
                    changed |= self.held.remove(&Held::Key(key));
                }
                InputEvent::MouseButtonDown { button, modifiers } => {
                    self.modifiers = modifiers;
                    changed |= self.press(Held::Button(button));
                }
                InputEvent::MouseButtonUp { button, modifiers } => {
                    self.modifiers = modifiers;
                    changed |= self.held.remove(&Held::Button(button));
                }
                InputEvent::MouseMoved { x, y } => {
                    if self.mouse != (x, y) {
                        self.mouse = (x, y);
                        changed = true;
                    }
                }
            }
        }

        changed
    }

    fn press(&mut self, input: Held) -> bool {
        let newly_held = self.held.insert(input);
        if newly_held {
            self.pressed.insert(input);
        }
        newly_held
    }

    //--- Queries ----------------------------------------------------------

    /// Key is currently held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.held.contains(&Held::Key(key))
    }

    /// Key went down since the last `begin_tick()`.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&Held::Key(key))
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.held.contains(&Held::Button(button))
    }

    pub fn mouse_position(&self) -> (f32, f32) {
        self.mouse
    }

    /// Modifiers reported with the most recent key or button event.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InputState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let held: Vec<_> = self.held.iter().map(|h| format!("{:?}", h)).collect();

        f.debug_struct("InputState")
            .field("mouse", &self.mouse)
            .field("modifiers", &self.modifiers)
            .field("held", &held)
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
