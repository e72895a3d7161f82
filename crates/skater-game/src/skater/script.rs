//! Scripted input for headless runs and simple bots

use glam::Vec2;
use serde::{Deserialize, Serialize};
use skater_core::MovementIntegrator;

use super::LocomotionController;

/// One timed piece of a script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSegment {
    /// How long the segment lasts in seconds
    pub duration: f32,
    /// Steering input (-1 left, +1 right)
    #[serde(default)]
    pub steer: f32,
    /// Throttle input (+1 push, -1 brake)
    #[serde(default)]
    pub throttle: f32,
    /// Jump when the segment starts
    #[serde(default)]
    pub jump: bool,
}

impl InputSegment {
    /// Input vector for this segment
    pub fn input(&self) -> Vec2 {
        Vec2::new(self.steer, self.throttle)
    }
}

/// A sequence of timed input segments
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputScript {
    pub segments: Vec<InputSegment>,
}

impl InputScript {
    /// A short carve: push, carve right, coast, carve left, ollie, brake
    pub fn carve_demo() -> Self {
        let segment = |duration, steer, throttle, jump| InputSegment {
            duration,
            steer,
            throttle,
            jump,
        };

        Self {
            segments: vec![
                segment(2.0, 0.0, 1.0, false),
                segment(2.0, 0.8, 0.6, false),
                segment(1.5, 0.0, 0.0, false),
                segment(2.0, -1.0, 0.4, false),
                segment(1.0, 0.0, 0.0, true),
                segment(2.0, 0.0, -1.0, false),
            ],
        }
    }

    /// Total scripted time
    pub fn total_duration(&self) -> f32 {
        self.segments.iter().map(|s| s.duration.max(0.0)).sum()
    }

    /// Index of the segment active at `elapsed`, `None` once the script ends
    pub fn segment_index_at(&self, elapsed: f32) -> Option<usize> {
        let mut end = 0.0;
        for (index, segment) in self.segments.iter().enumerate() {
            end += segment.duration.max(0.0);
            if elapsed < end {
                return Some(index);
            }
        }
        None
    }

    /// Input active at `elapsed`, `None` once the script ends
    pub fn sample(&self, elapsed: f32) -> Option<Vec2> {
        self.segment_index_at(elapsed)
            .map(|index| self.segments[index].input())
    }
}

/// Plays an [`InputScript`] into a locomotion controller
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    script: InputScript,
    elapsed: f32,
    current: Option<usize>,
}

impl ScriptedInput {
    pub fn new(script: InputScript) -> Self {
        Self {
            script,
            elapsed: 0.0,
            current: None,
        }
    }

    /// Report the input for the current time, then advance by `dt`.
    ///
    /// Returns `true` on the tick a segment flagged with `jump` starts.
    pub fn tick<M: MovementIntegrator>(
        &mut self,
        dt: f32,
        controller: &mut LocomotionController<M>,
    ) -> bool {
        let index = self.script.segment_index_at(self.elapsed);
        let entered = index.is_some() && index != self.current;
        self.current = index;
        self.elapsed += dt.max(0.0);

        match index {
            Some(index) => {
                let segment = &self.script.segments[index];
                controller.set_input(segment.input());
                entered && segment.jump
            }
            None => {
                controller.clear_input();
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skater::{Skater, SkaterConfig};
    use skater_core::ActorId;

    fn script() -> InputScript {
        InputScript {
            segments: vec![
                InputSegment {
                    duration: 1.0,
                    steer: 0.0,
                    throttle: 1.0,
                    jump: false,
                },
                InputSegment {
                    duration: 0.5,
                    steer: -1.0,
                    throttle: 0.0,
                    jump: true,
                },
            ],
        }
    }

    #[test]
    fn test_sample_by_time() {
        let script = script();
        assert_eq!(script.total_duration(), 1.5);
        assert_eq!(script.sample(0.0), Some(Vec2::new(0.0, 1.0)));
        assert_eq!(script.sample(0.99), Some(Vec2::new(0.0, 1.0)));
        assert_eq!(script.sample(1.0), Some(Vec2::new(-1.0, 0.0)));
        assert_eq!(script.sample(1.5), None);
    }

    #[test]
    fn test_empty_script() {
        let script = InputScript::default();
        assert_eq!(script.total_duration(), 0.0);
        assert_eq!(script.sample(0.0), None);
    }

    #[test]
    fn test_playback_sets_and_clears_input() {
        let mut player = ScriptedInput::new(script());
        let mut controller = Skater::new(ActorId::new(), SkaterConfig::default());

        let mut jumps = 0;
        for _ in 0..20 {
            if player.tick(0.1, &mut controller) {
                jumps += 1;
            }
        }

        assert_eq!(jumps, 1);
        assert_eq!(controller.input(), Vec2::ZERO);
    }

    #[test]
    fn test_jump_fires_on_segment_entry() {
        let mut player = ScriptedInput::new(script());
        let mut controller = Skater::new(ActorId::new(), SkaterConfig::default());

        for _ in 0..4 {
            assert!(!player.tick(0.25, &mut controller));
        }
        assert!(player.tick(0.25, &mut controller));
        assert_eq!(controller.input(), Vec2::new(-1.0, 0.0));
        assert!(!player.tick(0.25, &mut controller));
    }

    #[test]
    fn test_script_from_toml() {
        let script: InputScript = toml::from_str(
            r#"
            [[segments]]
            duration = 2.0
            throttle = 1.0

            [[segments]]
            duration = 1.0
            steer = 0.5
            jump = true
            "#,
        )
        .unwrap();

        assert_eq!(script.segments.len(), 2);
        assert_eq!(script.segments[0].steer, 0.0);
        assert!(script.segments[1].jump);
    }
}
