//! Skater - headless locomotion simulation
//!
//! Drives one skater through a scripted scenario on a fixed timestep and logs
//! its telemetry.

mod settings;

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use anyhow::Result;
use glam::Vec3;
use tracing::info;
use tracing_subscriber::EnvFilter;

use skater_core::{ActorId, GameTime};
use skater_game::{ScriptedInput, Skater};
use skater_physics::{PhysicsWorld, SkateMovement};

use settings::{SimulationSettings, SkaterSettings};

/// Application state
struct SkaterApp {
    physics: PhysicsWorld,
    movement: Rc<RefCell<SkateMovement>>,
    skater: Skater,
    script: ScriptedInput,
    game_time: GameTime,
    simulation: SimulationSettings,
    run_time: f64,
    elapsed: f64,
    next_log: f64,
}

impl SkaterApp {
    fn new(settings: SkaterSettings) -> Self {
        let mut physics = PhysicsWorld::new();
        physics.create_ground(0.0);
        // A gentle kicker in the push lane.
        physics.create_static_box(
            Vec3::new(300.0, 40.0, 400.0),
            Vec3::new(0.0, -20.0, -2600.0),
            8.0,
        );
        physics.update_query_pipeline();

        let movement = Rc::new(RefCell::new(SkateMovement::with_config(settings.movement)));
        movement.borrow_mut().spawn(
            &mut physics,
            Vec3::new(0.0, settings.simulation.spawn_height, 0.0),
        );

        let mut skater = Skater::new(ActorId::new(), settings.skater);
        skater.bind_movement(&movement);

        let run_time = (settings.scenario.total_duration() + settings.simulation.settle_time) as f64;

        Self {
            physics,
            movement,
            skater,
            script: ScriptedInput::new(settings.scenario),
            game_time: GameTime::new(settings.time),
            simulation: settings.simulation,
            run_time,
            elapsed: 0.0,
            next_log: 0.0,
        }
    }

    fn run(&mut self) {
        info!(
            actor = %self.skater.actor(),
            duration = self.run_time,
            "Running scenario"
        );

        while self.game_time.simulated_time() < self.run_time {
            self.game_time.update(self.simulation.frame_delta);
            let dt = self.game_time.config.fixed_timestep;
            for _ in 0..self.game_time.fixed_steps() {
                self.fixed_update(dt);
            }
        }

        self.log_telemetry();
        info!(
            frames = self.game_time.frame_count,
            ticks = self.game_time.tick_count,
            "Scenario finished"
        );
    }

    fn fixed_update(&mut self, dt: f32) {
        if self.script.tick(dt, &mut self.skater) && self.movement.borrow_mut().jump() {
            info!(actor = %self.skater.actor(), "Ollie");
        }

        self.skater.update(dt);
        self.movement.borrow_mut().update(&mut self.physics, dt);
        self.physics.update_query_pipeline();
        self.elapsed += dt as f64;

        if self.elapsed >= self.next_log {
            self.log_telemetry();
            self.next_log += self.simulation.log_interval as f64;
        }
    }

    fn log_telemetry(&self) {
        let movement = self.movement.borrow();
        let position = movement.position;
        info!(
            t = format!("{:.2}", self.elapsed),
            x = format!("{:.0}", position.x),
            y = format!("{:.0}", position.y),
            z = format!("{:.0}", position.z),
            yaw = format!("{:.1}", self.skater.heading().yaw_degrees()),
            speed = format!("{}%", (self.skater.speed_percent() * 100.0).round() as i32),
            mode = self.skater.movement_mode().name(),
            grounded = movement.is_grounded(),
            "Skater"
        );
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    info!("Starting skater simulation...");

    let settings = match std::env::args().nth(1) {
        Some(path) => SkaterSettings::load_from(Path::new(&path))?,
        None => SkaterSettings::load(),
    };
    settings.validate()?;

    let mut app = SkaterApp::new(settings);
    app.run();

    Ok(())
}
