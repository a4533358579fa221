//=========================================================================
// Winit Translation
//=========================================================================
//
// Maps winit key codes, buttons and modifier state onto the engine's
// input types. Keys outside the engine's `KeyCode` set map to `None`.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::event::MouseButton as WinitMouseButton;
use winit::keyboard::{KeyCode as WinitKeyCode, ModifiersState, PhysicalKey};

//=== Internal Dependencies ===============================================

use crate::core::input::{KeyCode, Modifiers, MouseButton};

//=== Conversions =========================================================

/// Engine key for a physical key, if the engine maps it.
pub(crate) fn key_code(physical_key: PhysicalKey) -> Option<KeyCode> {
    let PhysicalKey::Code(code) = physical_key else {
        return None;
    };

    Some(match code {
        WinitKeyCode::KeyW => KeyCode::KeyW,
        WinitKeyCode::KeyA => KeyCode::KeyA,
        WinitKeyCode::KeyS => KeyCode::KeyS,
        WinitKeyCode::KeyD => KeyCode::KeyD,
        WinitKeyCode::ArrowUp => KeyCode::ArrowUp,
        WinitKeyCode::ArrowLeft => KeyCode::ArrowLeft,
        WinitKeyCode::ArrowDown => KeyCode::ArrowDown,
        WinitKeyCode::ArrowRight => KeyCode::ArrowRight,
        WinitKeyCode::Space => KeyCode::Space,
        WinitKeyCode::Escape => KeyCode::Escape,
        _ => return None,
    })
}

pub(crate) fn mouse_button(button: WinitMouseButton) -> MouseButton {
    match button {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        _ => MouseButton::Other,
    }
}

/// Cmd and Option on macOS arrive as Ctrl and Alt.
pub(crate) fn modifiers(state: ModifiersState) -> Modifiers {
    Modifiers {
        shift: state.shift_key(),
        ctrl: state.control_key() || state.super_key(),
        alt: state.alt_key(),
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::NativeKeyCode;

    #[test]
    fn movement_keys_map_by_position() {
        let wasd = [WinitKeyCode::KeyW, WinitKeyCode::KeyA, WinitKeyCode::KeyS, WinitKeyCode::KeyD]
            .map(|code| key_code(PhysicalKey::Code(code)));

        assert_eq!(
            wasd,
            [Some(KeyCode::KeyW), Some(KeyCode::KeyA), Some(KeyCode::KeyS), Some(KeyCode::KeyD)]
        );
    }

    #[test]
    fn keys_outside_the_engine_set_are_none() {
        assert_eq!(key_code(PhysicalKey::Code(WinitKeyCode::KeyQ)), None);
        assert_eq!(key_code(PhysicalKey::Code(WinitKeyCode::F5)), None);
        assert_eq!(key_code(PhysicalKey::Unidentified(NativeKeyCode::Unidentified)), None);
    }

    #[test]
    fn extra_mouse_buttons_collapse_to_other() {
        assert_eq!(mouse_button(WinitMouseButton::Right), MouseButton::Right);
        assert_eq!(mouse_button(WinitMouseButton::Back), MouseButton::Other);
        assert_eq!(mouse_button(WinitMouseButton::Other(9)), MouseButton::Other);
    }

    #[test]
    fn super_counts_as_ctrl() {
        let mods = modifiers(ModifiersState::SUPER | ModifiersState::SHIFT);
        assert_eq!(mods, Modifiers { shift: true, ctrl: true, alt: false });
    }
}
