//! # Input State
//!
//! Types describing the state of input devices after a frame of events
//! has been collected. The input manager produces these snapshots; the
//! engine consumes them when translating input into player actions.

use std::collections::HashMap;
use winit::{event::MouseButton, keyboard::KeyCode};

/// Represents the state of a key or button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawInputState {
    /// Key/button is not pressed
    NotPressed,
    /// Key/button was just pressed this frame
    Pressed,
    /// Key/button has been held down for multiple frames
    Held,
    /// Key/button was just released this frame
    Released,
}

impl Default for RawInputState {
    fn default() -> Self {
        Self::NotPressed
    }
}

impl RawInputState {
    /// Determines if the input is actively down (either pressed or held)
    pub fn is_active(&self) -> bool {
        matches!(self, RawInputState::Pressed | RawInputState::Held)
    }

    /// Determines if the input was just pressed this frame
    pub fn is_just_pressed(&self) -> bool {
        matches!(self, RawInputState::Pressed)
    }

    /// Determines if the input was just released this frame
    pub fn is_just_released(&self) -> bool {
        matches!(self, RawInputState::Released)
    }

    /// Derives the transition state from last frame's and this frame's
    /// raw pressed flags.
    pub fn from_raw_states(previous: bool, current: bool) -> Self {
        match (previous, current) {
            (false, true) => RawInputState::Pressed,
            (true, true) => RawInputState::Held,
            (true, false) => RawInputState::Released,
            (false, false) => RawInputState::NotPressed,
        }
    }
}

/// A snapshot of the processed input states with state transitions.
///
/// Key and button states are translated into [`RawInputState`] values so
/// consumers can distinguish a fresh press from a continued hold.
pub struct ProcessedInputState {
    /// Current state of all tracked keyboard keys
    pub keyboard_states: HashMap<KeyCode, RawInputState>,

    /// Current state of mouse buttons
    pub mouse_button_states: HashMap<MouseButton, RawInputState>,

    /// Mouse movement delta since the last frame (x, y)
    pub mouse_delta: Option<(f64, f64)>,
}

impl ProcessedInputState {
    /// Gets the state of a keyboard key
    pub fn get_key_state(&self, key: KeyCode) -> RawInputState {
        self.keyboard_states.get(&key).copied().unwrap_or_default()
    }

    /// Gets the state of a mouse button
    pub fn get_mouse_button_state(&self, button: MouseButton) -> RawInputState {
        self.mouse_button_states.get(&button).copied().unwrap_or_default()
    }

    /// Gets the mouse movement delta since the last frame
    pub fn get_mouse_delta(&self) -> Option<(f64, f64)> {
        self.mouse_delta
    }
}

/// Tracks the state of mouse buttons and movement between frames.
pub struct MouseInput {
    /// Previous state of each mouse button (pressed/released)
    pub mouse_button_inputs_old: HashMap<MouseButton, bool>,
    /// Current state of each mouse button (pressed/released)
    pub mouse_button_inputs_new: HashMap<MouseButton, bool>,

    /// Mouse movement delta since the last frame (x, y)
    pub mouse_delta: Option<(f64, f64)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_table_covers_all_raw_combinations() {
        assert_eq!(
            RawInputState::from_raw_states(false, true),
            RawInputState::Pressed
        );
        assert_eq!(
            RawInputState::from_raw_states(true, true),
            RawInputState::Held
        );
        assert_eq!(
            RawInputState::from_raw_states(true, false),
            RawInputState::Released
        );
        assert_eq!(
            RawInputState::from_raw_states(false, false),
            RawInputState::NotPressed
        );
    }

    #[test]
    fn active_and_just_pressed_predicates() {
        assert!(RawInputState::Pressed.is_active());
        assert!(RawInputState::Held.is_active());
        assert!(!RawInputState::Released.is_active());
        assert!(!RawInputState::NotPressed.is_active());

        assert!(RawInputState::Pressed.is_just_pressed());
        assert!(!RawInputState::Held.is_just_pressed());
        assert!(RawInputState::Released.is_just_released());
    }

    #[test]
    fn untracked_keys_read_as_not_pressed() {
        let state = ProcessedInputState {
            keyboard_states: HashMap::new(),
            mouse_button_states: HashMap::new(),
            mouse_delta: None,
        };
        assert_eq!(
            state.get_key_state(KeyCode::KeyW),
            RawInputState::NotPressed
        );
        assert_eq!(
            state.get_mouse_button_state(MouseButton::Left),
            RawInputState::NotPressed
        );
    }
}
