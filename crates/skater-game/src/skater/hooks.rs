//! Per-frame extension points around the locomotion update

/// Behavior injected around [`LocomotionController::update`].
///
/// Variants such as an AI-driven skater plug obstacle avoidance or trick logic
/// in here instead of changing the core algorithm. Both hooks run every tick,
/// including ticks where the movement integrator is unavailable.
///
/// [`LocomotionController::update`]: super::LocomotionController::update
pub trait LocomotionHooks {
    /// Called before the locomotion update
    fn before_update(&mut self, _dt: f32) {}

    /// Called after the locomotion update
    fn after_update(&mut self, _dt: f32) {}
}

/// Hooks that do nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl LocomotionHooks for NoHooks {}
