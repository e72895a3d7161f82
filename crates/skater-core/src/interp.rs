//! Frame-rate independent interpolation

/// Move `current` toward `target` with exponential decay.
///
/// The remaining distance shrinks by `e^(-speed * dt)`, so two steps of
/// `dt / 2` land exactly where one step of `dt` does. A non-positive `speed`
/// snaps straight to the target.
pub fn exp_interp(current: f32, target: f32, dt: f32, speed: f32) -> f32 {
    if speed <= 0.0 {
        return target;
    }
    if dt <= 0.0 {
        return current;
    }

    target + (current - target) * (-speed * dt).exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_step_value() {
        let value = exp_interp(0.0, 1.0, 0.1, 5.0);
        let expected = 1.0 - (-0.5_f32).exp();
        assert!((value - expected).abs() < 1e-6);
        assert!((value - 0.393).abs() < 1e-3);
    }

    #[test]
    fn test_frame_rate_independent() {
        let one_step = exp_interp(0.2, -0.8, 1.0, 3.0);

        let mut many_steps = 0.2;
        for _ in 0..240 {
            many_steps = exp_interp(many_steps, -0.8, 1.0 / 240.0, 3.0);
        }

        assert!((one_step - many_steps).abs() < 1e-4);
    }

    #[test]
    fn test_zero_dt_holds_value() {
        assert_eq!(exp_interp(0.25, 1.0, 0.0, 5.0), 0.25);
    }

    #[test]
    fn test_non_positive_speed_snaps() {
        assert_eq!(exp_interp(0.25, 1.0, 0.016, 0.0), 1.0);
        assert_eq!(exp_interp(0.25, -1.0, 0.016, -2.0), -1.0);
    }

    #[test]
    fn test_never_overshoots() {
        let value = exp_interp(0.0, 1.0, 10.0, 50.0);
        assert!(value <= 1.0);
        assert!(value > 0.999);
    }
}
