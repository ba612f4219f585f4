//! Utility functions for the pursuit core

/// Move a value toward a target by a maximum delta
pub fn move_toward(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}

/// Horizontal direction from `from` to `to`: -1, 1, or 0 inside the deadband
pub fn direction_toward(from: f32, to: f32, deadband: f32) -> f32 {
    let dx = to - from;
    if dx.abs() <= deadband { 0.0 } else { dx.signum() }
}

/// Chance that an event with `per_frame` probability fires at least once over
/// `frames` reference frames
pub fn chance_over_frames(per_frame: f32, frames: f32) -> f32 {
    let p = per_frame.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powf(frames.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_toward() {
        assert_eq!(move_toward(0.0, 10.0, 3.0), 3.0);
        assert_eq!(move_toward(9.0, 10.0, 3.0), 10.0);
        assert_eq!(move_toward(0.0, -10.0, 4.0), -4.0);
    }

    #[test]
    fn test_direction_toward_deadband() {
        assert_eq!(direction_toward(0.0, 100.0, 5.0), 1.0);
        assert_eq!(direction_toward(0.0, -100.0, 5.0), -1.0);
        assert_eq!(direction_toward(0.0, 4.0, 5.0), 0.0);
    }

    #[test]
    fn test_chance_over_frames() {
        assert!((chance_over_frames(0.05, 1.0) - 0.05).abs() < 1e-6);
        assert_eq!(chance_over_frames(0.0, 10.0), 0.0);
        assert!(chance_over_frames(0.05, 2.0) > 0.05);
        assert_eq!(chance_over_frames(1.0, 0.5), 1.0);
    }
}
