//! Skater locomotion controller: steering, carving, and movement modes

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use glam::Vec2;
use skater_core::{exp_interp, ActorId, Heading, MovementIntegrator};
use tracing::{debug, info, trace, warn};

use super::config::{SkaterConfig, INPUT_DEADZONE, TURN_DEADZONE};
use super::hooks::{LocomotionHooks, NoHooks};
use super::state::{DecelerationProfile, MovementMode};

/// Per-actor locomotion controller.
///
/// Turns a 2D input (x = steer, y = throttle) into yaw rotation, carved ground
/// velocity and a movement mode whose braking deceleration is pushed into the
/// movement integrator. The integrator is held through a weak handle; every
/// use upgrades it first and an unavailable integrator makes the update a
/// no-op.
pub struct LocomotionController<M: MovementIntegrator> {
    /// Actor this controller drives, attached to every log record
    actor: ActorId,
    /// Design-time configuration
    config: SkaterConfig,
    /// Cached per-mode deceleration
    profile: DecelerationProfile,
    /// Non-owning handle to the movement integrator
    movement: Weak<RefCell<M>>,
    /// Behavior bracketing each update
    hooks: Box<dyn LocomotionHooks>,
    /// Latest reported input
    input: Vec2,
    /// Smoothed steering value
    current_turn: f32,
    /// Actor yaw
    heading: Heading,
    /// Current movement mode
    mode: MovementMode,
    /// Whether the bound integrator has received the initial configuration
    configured: bool,
}

impl<M: MovementIntegrator> LocomotionController<M> {
    /// Create an unbound controller
    pub fn new(actor: ActorId, config: SkaterConfig) -> Self {
        let profile = config.deceleration_profile();
        Self {
            actor,
            config,
            profile,
            movement: Weak::new(),
            hooks: Box::new(NoHooks),
            input: Vec2::ZERO,
            current_turn: 0.0,
            heading: Heading::default(),
            mode: MovementMode::Coasting,
            configured: false,
        }
    }

    /// Replace the update hooks
    pub fn with_hooks(mut self, hooks: impl LocomotionHooks + 'static) -> Self {
        self.hooks = Box::new(hooks);
        self
    }

    /// Attach the movement integrator and apply the initial configuration.
    ///
    /// Writes max speed, ground friction and the current mode's deceleration
    /// once. Only a weak handle is kept. If the integrator is borrowed right
    /// now the write happens on the first update that can reach it instead;
    /// the return value says whether it was applied immediately.
    pub fn bind_movement(&mut self, movement: &Rc<RefCell<M>>) -> bool {
        self.movement = Rc::downgrade(movement);
        self.configured = false;

        let Ok(mut integrator) = movement.try_borrow_mut() else {
            warn!(actor = %self.actor, "movement integrator is borrowed, initial configuration deferred");
            return false;
        };

        self.configure(&mut *integrator);
        true
    }

    /// Whether the movement integrator is currently reachable
    pub fn has_movement(&self) -> bool {
        self.movement.strong_count() > 0
    }

    /// Run one fixed tick
    pub fn update(&mut self, dt: f32) {
        let dt = dt.max(0.0);

        self.hooks.before_update(dt);
        self.update_locomotion(dt);
        self.hooks.after_update(dt);
    }

    /// Overwrite the movement input (x = steer, y = throttle)
    ///
    /// Values are not clamped; out-of-range input scales rotation and thrust.
    pub fn set_input(&mut self, input: Vec2) {
        self.input = input;
    }

    /// Zero the movement input
    pub fn clear_input(&mut self) {
        self.input = Vec2::ZERO;
    }

    /// Latest movement input
    pub fn input(&self) -> Vec2 {
        self.input
    }

    /// Current movement mode
    pub fn movement_mode(&self) -> MovementMode {
        self.mode
    }

    /// Speed as a fraction of `max_speed`, clamped to `[0, 1]`
    pub fn speed_percent(&self) -> f32 {
        if self.config.max_speed <= 0.0 {
            return 0.0;
        }

        self.with_movement(|movement| {
            (movement.velocity().length() / self.config.max_speed).clamp(0.0, 1.0)
        })
        .unwrap_or(0.0)
    }

    /// Speed in world units per second
    pub fn current_speed(&self) -> f32 {
        self.with_movement(|movement| movement.velocity().length())
            .unwrap_or(0.0)
    }

    /// Smoothed steering value
    pub fn current_turn(&self) -> f32 {
        self.current_turn
    }

    /// Actor yaw
    pub fn heading(&self) -> Heading {
        self.heading
    }

    /// Design-time configuration
    pub fn config(&self) -> &SkaterConfig {
        &self.config
    }

    /// Actor this controller drives
    pub fn actor(&self) -> ActorId {
        self.actor
    }

    /// Return to the spawn state, keeping the heading
    pub fn reset(&mut self) {
        self.input = Vec2::ZERO;
        self.current_turn = 0.0;
        self.mode = MovementMode::Coasting;

        let deceleration = self.profile.for_mode(self.mode);
        if let Some(movement) = self.movement.upgrade() {
            if let Ok(mut integrator) = movement.try_borrow_mut() {
                integrator.set_braking_deceleration(deceleration);
            }
        }
        debug!(actor = %self.actor, "locomotion reset");
    }

    /// Return to the spawn state facing `heading`
    pub fn reset_heading(&mut self, heading: Heading) {
        self.heading = heading;
        self.reset();
    }

    fn update_locomotion(&mut self, dt: f32) {
        let Some(movement) = self.movement.upgrade() else {
            trace!(actor = %self.actor, "movement integrator unavailable, skipping update");
            return;
        };
        let Ok(mut integrator) = movement.try_borrow_mut() else {
            trace!(actor = %self.actor, "movement integrator busy, skipping update");
            return;
        };

        if !self.configured {
            self.configure(&mut *integrator);
        }

        self.process_steering(&mut *integrator, dt);
        self.process_throttle(&mut *integrator);
    }

    fn configure(&mut self, movement: &mut M) {
        movement.set_max_speed(self.config.max_speed);
        movement.set_ground_friction(self.config.base_friction);
        movement.set_braking_deceleration(self.profile.for_mode(self.mode));
        self.configured = true;

        info!(
            actor = %self.actor,
            max_speed = self.config.max_speed,
            friction = self.config.base_friction,
            mode = self.mode.name(),
            "bound movement integrator"
        );
    }

    fn process_steering(&mut self, movement: &mut M, dt: f32) {
        self.current_turn = exp_interp(
            self.current_turn,
            self.input.x,
            dt,
            self.config.steering_interp_speed,
        );

        if self.current_turn.abs() <= TURN_DEADZONE {
            return;
        }

        let rotation_delta = self.current_turn * self.config.turn_rate * dt;
        self.heading.rotate(rotation_delta);

        // Carve: keep ground velocity aligned with the board. Mid-air velocity is left alone.
        if movement.is_moving_on_ground() {
            let carved = Heading::rotate_vector(rotation_delta, movement.velocity());
            movement.set_velocity(carved);
        }
    }

    fn process_throttle(&mut self, movement: &mut M) {
        let throttle = self.input.y;
        let mode = MovementMode::classify(throttle, INPUT_DEADZONE);

        self.set_movement_mode(movement, mode);

        if mode == MovementMode::Accelerating {
            movement.add_movement_input(self.heading.forward(), throttle);
        }
    }

    fn set_movement_mode(&mut self, movement: &mut M, mode: MovementMode) {
        if self.mode == mode {
            return;
        }

        let previous = std::mem::replace(&mut self.mode, mode);
        let deceleration = self.profile.for_mode(mode);
        movement.set_braking_deceleration(deceleration);

        debug!(
            actor = %self.actor,
            from = previous.name(),
            to = mode.name(),
            deceleration,
            "movement mode changed"
        );
    }

    fn with_movement<R>(&self, f: impl FnOnce(&M) -> R) -> Option<R> {
        let movement = self.movement.upgrade()?;
        let integrator = movement.try_borrow().ok()?;
        Some(f(&integrator))
    }
}
