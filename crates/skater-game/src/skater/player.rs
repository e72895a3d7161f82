//! Keyboard-driven skater input

use glam::Vec2;
use skater_core::MovementIntegrator;

use crate::input::{InputAction, InputState};

use super::LocomotionController;

const MOVEMENT_ACTIONS: [InputAction; 4] = [
    InputAction::SteerLeft,
    InputAction::SteerRight,
    InputAction::Push,
    InputAction::Brake,
];

/// Forwards the keyboard movement axis to a locomotion controller.
///
/// While any movement key is held the axis is reported every frame; once the
/// last one is released the input is cleared. Nothing else is touched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerInput;

impl PlayerInput {
    /// Report this frame's input to `controller`
    pub fn apply<M: MovementIntegrator>(
        &self,
        state: &InputState,
        controller: &mut LocomotionController<M>,
    ) {
        let moving = MOVEMENT_ACTIONS
            .into_iter()
            .any(|action| state.is_held(action));

        if moving {
            controller.set_input(state.move_axis());
        } else if state.movement_released() && controller.input() != Vec2::ZERO {
            controller.clear_input();
        }
    }

    /// Whether a jump was requested this frame
    pub fn wants_jump(&self, state: &InputState) -> bool {
        state.is_just_pressed(InputAction::Jump)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputHandler;
    use crate::skater::{SkaterConfig, Skater};
    use skater_core::ActorId;
    use winit::event::ElementState;
    use winit::keyboard::{KeyCode, PhysicalKey};

    fn key(handler: &mut InputHandler, key: KeyCode, state: ElementState) {
        handler.handle_keyboard(PhysicalKey::Code(key), state);
    }

    #[test]
    fn test_held_keys_set_input() {
        let mut handler = InputHandler::new();
        let mut controller = Skater::new(ActorId::new(), SkaterConfig::default());

        key(&mut handler, KeyCode::KeyW, ElementState::Pressed);
        key(&mut handler, KeyCode::KeyA, ElementState::Pressed);
        PlayerInput.apply(&handler.state, &mut controller);

        assert_eq!(controller.input(), Vec2::new(-1.0, 1.0));
    }

    #[test]
    fn test_opposing_keys_report_zero_axis() {
        let mut handler = InputHandler::new();
        let mut controller = Skater::new(ActorId::new(), SkaterConfig::default());
        controller.set_input(Vec2::new(0.5, 0.5));

        key(&mut handler, KeyCode::KeyA, ElementState::Pressed);
        key(&mut handler, KeyCode::KeyD, ElementState::Pressed);
        PlayerInput.apply(&handler.state, &mut controller);

        assert_eq!(controller.input(), Vec2::ZERO);
    }

    #[test]
    fn test_release_clears_input() {
        let mut handler = InputHandler::new();
        let mut controller = Skater::new(ActorId::new(), SkaterConfig::default());

        key(&mut handler, KeyCode::KeyW, ElementState::Pressed);
        PlayerInput.apply(&handler.state, &mut controller);
        handler.end_frame();

        key(&mut handler, KeyCode::KeyW, ElementState::Released);
        PlayerInput.apply(&handler.state, &mut controller);

        assert_eq!(controller.input(), Vec2::ZERO);
    }

    #[test]
    fn test_idle_frames_leave_external_input_alone() {
        let handler = InputHandler::new();
        let mut controller = Skater::new(ActorId::new(), SkaterConfig::default());
        controller.set_input(Vec2::new(0.3, 0.9));

        PlayerInput.apply(&handler.state, &mut controller);

        assert_eq!(controller.input(), Vec2::new(0.3, 0.9));
    }

    #[test]
    fn test_wants_jump() {
        let mut handler = InputHandler::new();
        key(&mut handler, KeyCode::Space, ElementState::Pressed);
        assert!(PlayerInput.wants_jump(&handler.state));

        handler.end_frame();
        assert!(!PlayerInput.wants_jump(&handler.state));
    }
}
