//=========================================================================
// Input Event Types
//
// Platform-independent keyboard and mouse events, as produced by the
// platform layer and consumed by scenes during `handle_input()`.
//
// Equality and hashing:
// - Key/button events compare by type + payload + modifiers
// - `MouseMoved` events are all equal (coordinates ignored), so a
//   `HashSet` keeps only the latest cursor position
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::hash::{Hash, Hasher};

//=== MouseButton =========================================================

/// Physical mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,

    /// Side, thumb and macro buttons.
    Other,
}

//=== KeyCode =============================================================

/// Physical key location (layout independent).
///
/// Only keys scenes react to are mapped; the platform layer drops the
/// rest before they reach the input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Movement ---------------------------------------------------------
    KeyW,
    KeyA,
    KeyS,
    KeyD,
    ArrowUp,
    ArrowLeft,
    ArrowDown,
    ArrowRight,

    //--- Commands ---------------------------------------------------------
    Space,
    Escape,
}

//=== Modifiers ===========================================================

/// Modifier keys held when an event fired. Left/right are not
/// distinguished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ctrl: false,
        alt: false,
    };

    pub const CTRL: Self = Self {
        shift: false,
        ctrl: true,
        alt: false,
    };

    pub const ALT: Self = Self {
        shift: false,
        ctrl: false,
        alt: true,
    };
}

//=== InputEvent ==========================================================

/// Low-level input event from the platform layer.
#[derive(Debug, Clone)]
pub enum InputEvent {
    KeyDown {
        key: KeyCode,
        modifiers: Modifiers,
    },

    KeyUp {
        key: KeyCode,
        modifiers: Modifiers,
    },

    MouseButtonDown {
        button: MouseButton,
        modifiers: Modifiers,
    },

    MouseButtonUp {
        button: MouseButton,
        modifiers: Modifiers,
    },

    /// Cursor position in physical pixels, top-left origin.
    MouseMoved { x: f32, y: f32 },
}

impl InputEvent {
    /// Whether this event is a one-shot transition (key or button).
    pub fn is_discrete(&self) -> bool {
        !matches!(self, Self::MouseMoved { .. })
    }
}

//--- Trait Implementations -----------------------------------------------

impl PartialEq for InputEvent {
    fn eq(&self, other: &Self) -> bool {
        use InputEvent::*;
        match (self, other) {
            (KeyDown { key: a, modifiers: ma }, KeyDown { key: b, modifiers: mb })
            | (KeyUp { key: a, modifiers: ma }, KeyUp { key: b, modifiers: mb }) => {
                a == b && ma == mb
            }
            (
                MouseButtonDown { button: a, modifiers: ma },
                MouseButtonDown { button: b, modifiers: mb },
            )
            | (
                MouseButtonUp { button: a, modifiers: ma },
                MouseButtonUp { button: b, modifiers: mb },
            ) => a == b && ma == mb,
            (MouseMoved { .. }, MouseMoved { .. }) => true,
            _ => false,
        }
    }
}

impl Eq for InputEvent {}

impl Hash for InputEvent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);

        match self {
            Self::KeyDown { key, modifiers } | Self::KeyUp { key, modifiers } => {
                key.hash(state);
                modifiers.hash(state);
            }
            Self::MouseButtonDown { button, modifiers }
            | Self::MouseButtonUp { button, modifiers } => {
                button.hash(state);
                modifiers.hash(state);
            }
            Self::MouseMoved { .. } => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn key_events_compare_modifiers() {
        let plain = InputEvent::KeyDown { key: KeyCode::KeyS, modifiers: Modifiers::NONE };
        let ctrl = InputEvent::KeyDown { key: KeyCode::KeyS, modifiers: Modifiers::CTRL };

        assert_ne!(plain, ctrl);
        assert_eq!(plain, plain.clone());
    }

    #[test]
    fn key_down_and_up_differ() {
        let down = InputEvent::KeyDown { key: KeyCode::KeyA, modifiers: Modifiers::NONE };
        let up = InputEvent::KeyUp { key: KeyCode::KeyA, modifiers: Modifiers::NONE };

        assert_ne!(down, up);
        assert_ne!(hash_of(&down), hash_of(&up));
    }

    #[test]
    fn mouse_moves_coalesce_in_hash_set() {
        let mut set = HashSet::new();
        set.insert(InputEvent::MouseMoved { x: 1.0, y: 2.0 });
        set.replace(InputEvent::MouseMoved { x: 30.0, y: 40.0 });

        assert_eq!(set.len(), 1);
        match set.iter().next() {
            Some(InputEvent::MouseMoved { x, y }) => assert_eq!((*x, *y), (30.0, 40.0)),
            other => panic!("expected MouseMoved, got {:?}", other),
        }
    }

    #[test]
    fn discrete_classification() {
        assert!(InputEvent::KeyUp { key: KeyCode::Space, modifiers: Modifiers::NONE }.is_discrete());
        assert!(!InputEvent::MouseMoved { x: 0.0, y: 0.0 }.is_discrete());
    }
}
