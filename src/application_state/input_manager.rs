//! # Input Manager
//!
//! Collects raw keyboard and mouse events from the windowing system and
//! turns them into per-frame [`ProcessedInputState`] snapshots. Only the
//! keys the game actually binds are tracked: movement, fly up/down, the
//! terrain hotkeys, and the mouse buttons.

use std::collections::HashMap;

use winit::{
    event::{ElementState, KeyEvent, MouseButton, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use super::input_state::{MouseInput, ProcessedInputState, RawInputState};

const KEY_CODES: [KeyCode; 8] = [
    KeyCode::KeyW,
    KeyCode::KeyS,
    KeyCode::KeyA,
    KeyCode::KeyD,
    KeyCode::KeyR,
    KeyCode::KeyB,
    KeyCode::Space,
    KeyCode::ShiftLeft,
];

const MOUSE_BUTTONS: [MouseButton; 3] = [
    MouseButton::Left,
    MouseButton::Right,
    MouseButton::Middle,
];

/// Manages the state of all input devices and processes input events.
///
/// Maintains the previous and current pressed state of every tracked key
/// and button so that press/hold/release transitions can be derived.
pub struct InputManager {
    /// Previous state of all tracked keyboard keys
    pub keyboard_inputs_old: HashMap<KeyCode, bool>,
    /// Current state of all tracked keyboard keys
    pub keyboard_inputs_new: HashMap<KeyCode, bool>,

    /// Current state of mouse inputs
    pub mouse_inputs: MouseInput,
}

impl InputManager {
    /// Creates a new InputManager with every tracked key and button in
    /// the released state.
    pub fn new() -> Self {
        let mut keyboard_inputs_old = HashMap::new();
        let mut keyboard_inputs_new = HashMap::new();
        for key_code in KEY_CODES {
            keyboard_inputs_old.insert(key_code, false);
            keyboard_inputs_new.insert(key_code, false);
        }

        let mut mouse_button_inputs_old = HashMap::new();
        let mut mouse_button_inputs_new = HashMap::new();
        for button in MOUSE_BUTTONS {
            mouse_button_inputs_old.insert(button, false);
            mouse_button_inputs_new.insert(button, false);
        }

        let mouse_inputs = MouseInput {
            mouse_button_inputs_old,
            mouse_button_inputs_new,
            mouse_delta: None,
        };

        Self {
            keyboard_inputs_old,
            keyboard_inputs_new,
            mouse_inputs,
        }
    }

    /// Updates the old state with the current state to prepare for the next frame.
    ///
    /// This should be called at the end of each frame so that the "old" state
    /// is correct for the next frame's transition comparisons.
    pub fn move_old_states(&mut self) {
        for (key, new_state) in self.keyboard_inputs_new.iter() {
            if let Some(old_state) = self.keyboard_inputs_old.get_mut(key) {
                *old_state = *new_state;
            }
        }

        for (button, new_state) in self.mouse_inputs.mouse_button_inputs_new.iter() {
            if let Some(old_state) = self.mouse_inputs.mouse_button_inputs_old.get_mut(button) {
                *old_state = *new_state;
            }
        }
    }

    /// Processes a window event and updates internal input state.
    ///
    /// Keyboard and mouse button events for untracked keys are ignored.
    ///
    /// # Arguments
    /// * `event` - The window event to process
    pub fn intake_input(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state,
                        physical_key: PhysicalKey::Code(key),
                        ..
                    },
                ..
            } => {
                if let Some(key_state) = self.keyboard_inputs_new.get_mut(key) {
                    *key_state = *state == ElementState::Pressed;
                }
            }
            WindowEvent::MouseInput { button, state, .. } => {
                if let Some(button_state) =
                    self.mouse_inputs.mouse_button_inputs_new.get_mut(button)
                {
                    *button_state = *state == ElementState::Pressed;
                }
            }
            _ => {}
        }
    }

    /// Updates the mouse movement delta.
    ///
    /// # Arguments
    /// * `delta` - The (x, y) delta of mouse movement since the last update
    pub fn intake_mouse_motion(&mut self, delta: (f64, f64)) {
        self.mouse_inputs.mouse_delta = Some(delta);
    }

    /// Creates a processed input state from the current raw boolean states.
    ///
    /// Raw pressed flags are paired with last frame's flags and translated
    /// into [`RawInputState`] transitions.
    ///
    /// # Returns
    /// A new `ProcessedInputState` with processed input states.
    pub fn create_processed_input_state(&mut self) -> ProcessedInputState {
        let mut keyboard_states = HashMap::new();
        let mut mouse_button_states = HashMap::new();

        for (key, &new_state) in self.keyboard_inputs_new.iter() {
            let old_state = self.keyboard_inputs_old.get(key).copied().unwrap_or(false);
            keyboard_states.insert(*key, RawInputState::from_raw_states(old_state, new_state));
        }

        for (button, &new_state) in self.mouse_inputs.mouse_button_inputs_new.iter() {
            let old_state = self
                .mouse_inputs
                .mouse_button_inputs_old
                .get(button)
                .copied()
                .unwrap_or(false);
            mouse_button_states.insert(*button, RawInputState::from_raw_states(old_state, new_state));
        }

        let mouse_delta = self.mouse_inputs.mouse_delta;

        ProcessedInputState {
            keyboard_states,
            mouse_button_states,
            mouse_delta,
        }
    }

    /// Returns the processed input state and resets internal state.
    ///
    /// Called once per frame from the event loop's wait handler.
    ///
    /// # Returns
    /// The processed input state, if available.
    pub fn get_and_reset_processed_input(&mut self) -> Option<ProcessedInputState> {
        let processed_input = Some(self.create_processed_input_state());
        self.reset_inputs();
        processed_input
    }

    /// Resets per-frame input state.
    ///
    /// This is also called when the window loses focus to prevent
    /// stuck keys or buttons.
    pub fn reset_inputs(&mut self) {
        self.move_old_states();
        self.mouse_inputs.mouse_delta = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_then_hold_then_release_sequence() {
        let mut manager = InputManager::new();

        *manager.keyboard_inputs_new.get_mut(&KeyCode::KeyW).unwrap() = true;
        let frame1 = manager.get_and_reset_processed_input().unwrap();
        assert_eq!(frame1.get_key_state(KeyCode::KeyW), RawInputState::Pressed);

        let frame2 = manager.get_and_reset_processed_input().unwrap();
        assert_eq!(frame2.get_key_state(KeyCode::KeyW), RawInputState::Held);

        *manager.keyboard_inputs_new.get_mut(&KeyCode::KeyW).unwrap() = false;
        let frame3 = manager.get_and_reset_processed_input().unwrap();
        assert_eq!(frame3.get_key_state(KeyCode::KeyW), RawInputState::Released);

        let frame4 = manager.get_and_reset_processed_input().unwrap();
        assert_eq!(
            frame4.get_key_state(KeyCode::KeyW),
            RawInputState::NotPressed
        );
    }

    #[test]
    fn mouse_delta_is_consumed_each_frame() {
        let mut manager = InputManager::new();
        manager.intake_mouse_motion((3.0, -2.0));

        let frame1 = manager.get_and_reset_processed_input().unwrap();
        assert_eq!(frame1.get_mouse_delta(), Some((3.0, -2.0)));

        let frame2 = manager.get_and_reset_processed_input().unwrap();
        assert_eq!(frame2.get_mouse_delta(), None);
    }

    #[test]
    fn only_bound_keys_are_tracked() {
        let manager = InputManager::new();
        assert!(manager.keyboard_inputs_new.contains_key(&KeyCode::KeyR));
        assert!(manager.keyboard_inputs_new.contains_key(&KeyCode::KeyB));
        assert!(!manager.keyboard_inputs_new.contains_key(&KeyCode::KeyQ));
    }
}
