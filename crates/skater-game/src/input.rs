//! Input system with action-based mapping
//!
//! Turns raw keyboard events into skating actions and a 2D movement axis.

use std::collections::{HashMap, HashSet};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use winit::event::ElementState;
use winit::keyboard::{KeyCode, PhysicalKey};

/// Skating actions that can be triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    /// Carve left (A by default)
    SteerLeft,
    /// Carve right (D by default)
    SteerRight,
    /// Push forward (W by default)
    Push,
    /// Drag the foot to brake (S by default)
    Brake,
    /// Ollie (Space by default)
    Jump,
}

/// Current state of all inputs for a frame
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Actions currently held down
    pub held: HashSet<InputAction>,
    /// Actions that were just pressed this frame
    pub just_pressed: HashSet<InputAction>,
    /// Actions that were just released this frame
    pub just_released: HashSet<InputAction>,
}

impl InputState {
    /// Create a new empty input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an action is currently held
    pub fn is_held(&self, action: InputAction) -> bool {
        self.held.contains(&action)
    }

    /// Check if an action was just pressed this frame
    pub fn is_just_pressed(&self, action: InputAction) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Check if an action was just released this frame
    pub fn is_just_released(&self, action: InputAction) -> bool {
        self.just_released.contains(&action)
    }

    /// Movement axis: x = steer (+right), y = throttle (+push, -brake)
    pub fn move_axis(&self) -> Vec2 {
        let axis = |positive: InputAction, negative: InputAction| {
            let mut value = 0.0;
            if self.is_held(positive) {
                value += 1.0;
            }
            if self.is_held(negative) {
                value -= 1.0;
            }
            value
        };

        Vec2::new(
            axis(InputAction::SteerRight, InputAction::SteerLeft),
            axis(InputAction::Push, InputAction::Brake),
        )
    }

    /// Whether any movement action was released this frame
    pub fn movement_released(&self) -> bool {
        [
            InputAction::SteerLeft,
            InputAction::SteerRight,
            InputAction::Push,
            InputAction::Brake,
        ]
        .into_iter()
        .any(|action| self.is_just_released(action))
    }

    /// Clear frame-specific data (call at end of frame)
    pub fn clear_frame(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }

    /// Clear all input state
    pub fn clear_all(&mut self) {
        self.held.clear();
        self.clear_frame();
    }
}

/// Maps keys to skating actions
#[derive(Debug, Clone)]
pub struct InputBindings {
    /// Key to action mappings
    bindings: HashMap<KeyCode, InputAction>,
}

impl Default for InputBindings {
    fn default() -> Self {
        let mut bindings = Self {
            bindings: HashMap::new(),
        };

        bindings.bind(KeyCode::KeyA, InputAction::SteerLeft);
        bindings.bind(KeyCode::KeyD, InputAction::SteerRight);
        bindings.bind(KeyCode::KeyW, InputAction::Push);
        bindings.bind(KeyCode::KeyS, InputAction::Brake);

        // Arrow keys as alternative
        bindings.bind(KeyCode::ArrowLeft, InputAction::SteerLeft);
        bindings.bind(KeyCode::ArrowRight, InputAction::SteerRight);
        bindings.bind(KeyCode::ArrowUp, InputAction::Push);
        bindings.bind(KeyCode::ArrowDown, InputAction::Brake);

        bindings.bind(KeyCode::Space, InputAction::Jump);

        bindings
    }
}

impl InputBindings {
    /// Create new input bindings with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a key to an action
    pub fn bind(&mut self, key: KeyCode, action: InputAction) {
        self.bindings.insert(key, action);
    }

    /// Unbind a key
    pub fn unbind(&mut self, key: KeyCode) {
        self.bindings.remove(&key);
    }

    /// Get the action for a key, if any
    pub fn get_key_action(&self, key: KeyCode) -> Option<InputAction> {
        self.bindings.get(&key).copied()
    }
}

/// Input handler that processes raw events and updates state
#[derive(Debug, Default)]
pub struct InputHandler {
    /// Current input state
    pub state: InputState,
    /// Input bindings
    pub bindings: InputBindings,
}

impl InputHandler {
    /// Create a new input handler with default bindings
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a keyboard event
    pub fn handle_keyboard(&mut self, physical_key: PhysicalKey, element_state: ElementState) {
        let PhysicalKey::Code(key_code) = physical_key else {
            return;
        };
        let Some(action) = self.bindings.get_key_action(key_code) else {
            return;
        };

        match element_state {
            ElementState::Pressed => {
                if !self.state.held.contains(&action) {
                    self.state.just_pressed.insert(action);
                }
                self.state.held.insert(action);
            }
            ElementState::Released => {
                self.state.held.remove(&action);
                self.state.just_released.insert(action);
            }
        }
    }

    /// Clear frame-specific input data
    pub fn end_frame(&mut self) {
        self.state.clear_frame();
    }
}
