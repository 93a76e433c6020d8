//! Input state management

use std::collections::{HashMap, HashSet};
use winit::keyboard::KeyCode;

/// Tracks keyboard, mouse, and wheel state per frame.
///
/// The action map binds the playground's modifier latches and commands to
/// keys; the selection controller reads actions, never raw key codes.
pub struct InputState {
    keys_down: HashSet<KeyCode>,
    keys_just_pressed: HashSet<KeyCode>,
    keys_just_released: HashSet<KeyCode>,

    /// Current pointer position in window pixels
    pub mouse_position: (f64, f64),
    mouse_buttons_down: HashSet<u32>,
    mouse_buttons_just_pressed: HashSet<u32>,
    /// Accumulated wheel notches this frame (positive = scroll up)
    wheel_delta: f64,

    /// Action name -> key bindings
    action_map: HashMap<String, Vec<KeyCode>>,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            keys_just_pressed: HashSet::new(),
            keys_just_released: HashSet::new(),
            mouse_position: (0.0, 0.0),
            mouse_buttons_down: HashSet::new(),
            mouse_buttons_just_pressed: HashSet::new(),
            wheel_delta: 0.0,
            action_map: Self::default_action_map(),
        }
    }

    fn default_action_map() -> HashMap<String, Vec<KeyCode>> {
        let mut map = HashMap::new();
        // Modifier latches
        map.insert("marquee".into(), vec![KeyCode::ShiftLeft, KeyCode::ShiftRight]);
        map.insert("acid".into(), vec![KeyCode::KeyV]);
        map.insert("split".into(), vec![KeyCode::KeyX]);
        // Commands
        map.insert("lock".into(), vec![KeyCode::KeyL]);
        map.insert("recolor".into(), vec![KeyCode::KeyC]);
        map.insert("delete".into(), vec![KeyCode::Backspace]);
        map.insert("deselect".into(), vec![KeyCode::Escape]);
        map.insert("help".into(), vec![KeyCode::Slash]);
        map
    }

    /// Bind an action to one or more keys
    pub fn bind_action(&mut self, action: impl Into<String>, keys: Vec<KeyCode>) {
        self.action_map.insert(action.into(), keys);
    }

    /// Process a key press event
    pub fn process_key_down(&mut self, key: KeyCode) {
        if !self.keys_down.contains(&key) {
            self.keys_just_pressed.insert(key);
        }
        self.keys_down.insert(key);
    }

    /// Process a key release event
    pub fn process_key_up(&mut self, key: KeyCode) {
        self.keys_down.remove(&key);
        self.keys_just_released.insert(key);
    }

    pub fn process_mouse_button_down(&mut self, button: u32) {
        if !self.mouse_buttons_down.contains(&button) {
            self.mouse_buttons_just_pressed.insert(button);
        }
        self.mouse_buttons_down.insert(button);
    }

    pub fn process_mouse_button_up(&mut self, button: u32) {
        self.mouse_buttons_down.remove(&button);
    }

    pub fn process_mouse_move(&mut self, x: f64, y: f64) {
        self.mouse_position = (x, y);
    }

    /// Accumulate wheel movement (notches)
    pub fn process_wheel(&mut self, delta: f64) {
        self.wheel_delta += delta;
    }

    /// Call at end of frame to clear per-frame state
    pub fn end_frame(&mut self) {
        self.keys_just_pressed.clear();
        self.keys_just_released.clear();
        self.mouse_buttons_just_pressed.clear();
        self.wheel_delta = 0.0;
    }

    // --- Query methods ---

    /// Is an action currently held?
    pub fn is_action_pressed(&self, action: &str) -> bool {
        self.action_map
            .get(action)
            .map(|keys| keys.iter().any(|k| self.keys_down.contains(k)))
            .unwrap_or(false)
    }

    /// Was an action just pressed this frame?
    pub fn is_action_just_pressed(&self, action: &str) -> bool {
        self.action_map
            .get(action)
            .map(|keys| keys.iter().any(|k| self.keys_just_pressed.contains(k)))
            .unwrap_or(false)
    }

    /// Was an action just released this frame?
    pub fn is_action_just_released(&self, action: &str) -> bool {
        self.action_map
            .get(action)
            .map(|keys| keys.iter().any(|k| self.keys_just_released.contains(k)))
            .unwrap_or(false)
    }

    pub fn is_mouse_button_down(&self, button: u32) -> bool {
        self.mouse_buttons_down.contains(&button)
    }

    pub fn is_mouse_button_just_pressed(&self, button: u32) -> bool {
        self.mouse_buttons_just_pressed.contains(&button)
    }

    /// Wheel movement accumulated this frame
    pub fn wheel_delta(&self) -> f64 {
        self.wheel_delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latch_transitions() {
        let mut input = InputState::new();

        input.process_key_down(KeyCode::KeyV);
        assert!(input.is_action_pressed("acid"));
        assert!(input.is_action_just_pressed("acid"));

        input.end_frame();
        assert!(input.is_action_pressed("acid"));
        assert!(!input.is_action_just_pressed("acid"));

        input.process_key_up(KeyCode::KeyV);
        assert!(!input.is_action_pressed("acid"));
        assert!(input.is_action_just_released("acid"));

        input.end_frame();
        assert!(!input.is_action_just_released("acid"));
    }

    #[test]
    fn test_marquee_bound_to_either_shift() {
        let mut input = InputState::new();
        input.process_key_down(KeyCode::ShiftRight);
        assert!(input.is_action_pressed("marquee"));
    }

    #[test]
    fn test_wheel_accumulates_and_clears() {
        let mut input = InputState::new();
        input.process_wheel(1.0);
        input.process_wheel(2.0);
        assert_eq!(input.wheel_delta(), 3.0);

        input.end_frame();
        assert_eq!(input.wheel_delta(), 0.0);
    }

    #[test]
    fn test_custom_binding() {
        let mut input = InputState::new();
        input.bind_action("acid", vec![KeyCode::KeyA]);

        input.process_key_down(KeyCode::KeyA);
        assert!(input.is_action_pressed("acid"));
    }

    #[test]
    fn test_mouse_buttons() {
        let mut input = InputState::new();
        input.process_mouse_button_down(0);
        assert!(input.is_mouse_button_down(0));
        assert!(input.is_mouse_button_just_pressed(0));

        input.end_frame();
        input.process_mouse_button_up(0);
        assert!(!input.is_mouse_button_down(0));
    }
}
