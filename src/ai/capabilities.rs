//! Pursuer capabilities - per-variant movement profile and derived jump values.
//!
//! One state machine drives every pursuer; what differs between variants
//! (speeds, jump profile, senses, flight) lives here.

use crate::tuning::KinematicsTuning;

/// How a pursuer gets around
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Locomotion {
    /// Walks, falls and jumps between platforms
    Ground,
    /// Ignores gravity; hovers up to `hover_height` above spawn while patrolling
    Flying { hover_height: f32 },
}

/// Capability set for one kind of pursuer
#[derive(Clone, Debug, PartialEq)]
pub struct PursuerProfile {
    /// Profile name for logs and lookups
    pub name: String,
    pub locomotion: Locomotion,
    /// Horizontal speed while chasing (units per frame)
    pub chase_speed: f32,
    /// Horizontal speed while patrolling (units per frame)
    pub patrol_speed: f32,
    /// Detection box half-width; zero disables detection
    pub detection_range: f32,
    /// Upward launch speed (units per frame)
    pub jump_strength: f32,
    /// Horizontal speed multiplier while airborne
    pub jump_speed_boost: f32,
    /// Seconds between jumps
    pub jump_cooldown: f32,
    /// Seconds spent idling
    pub idle_time: f32,
    /// Seconds spent recovering after a landing
    pub recovery_time: f32,
    /// Seconds the last seen target position stays valid
    pub memory_duration: f32,
    /// Chance per reference frame of idling once patrol has run its minimum time
    pub idle_probability: f32,
    /// Fixed patrol span from spawn; `None` walks until an edge or wall
    pub patrol_distance: Option<f32>,
}

impl Default for PursuerProfile {
    fn default() -> Self {
        Self {
            name: "Walker".to_string(),
            locomotion: Locomotion::Ground,
            chase_speed: 3.0,
            patrol_speed: 1.5,
            detection_range: 300.0,
            jump_strength: 12.0,
            jump_speed_boost: 2.0,
            jump_cooldown: 0.5,
            idle_time: 1.0,
            recovery_time: 0.5,
            memory_duration: 2.0,
            idle_probability: 0.05,
            patrol_distance: None,
        }
    }
}

impl PursuerProfile {
    pub fn is_flying(&self) -> bool {
        matches!(self.locomotion, Locomotion::Flying { .. })
    }

    /// Highest rise a full jump reaches (v²/2g with jump-rise gravity)
    pub fn max_jump_height(&self, kin: &KinematicsTuning) -> f32 {
        self.jump_strength * self.jump_strength / (2.0 * kin.gravity_jump_rise)
    }

    /// Frames from launch to apex (v/g)
    pub fn frames_to_peak(&self, kin: &KinematicsTuning) -> f32 {
        self.jump_strength / kin.gravity_jump_rise
    }

    /// Horizontal distance covered by a full jump at boosted chase speed
    pub fn max_jump_reach(&self, kin: &KinematicsTuning) -> f32 {
        let fall_frames = (2.0 * self.max_jump_height(kin) / kin.gravity_jump_fall).sqrt();
        self.chase_speed * self.jump_speed_boost * (self.frames_to_peak(kin) + fall_frames)
    }

    /// Can a jump from `from_y` reach `to_y`?
    pub fn can_reach_height(&self, from_y: f32, to_y: f32, kin: &KinematicsTuning) -> bool {
        to_y - from_y <= self.max_jump_height(kin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_jump_height() {
        let profile = PursuerProfile::default();
        // 12² / (2 * 0.45) = 160
        assert!((profile.max_jump_height(&KinematicsTuning::default()) - 160.0).abs() < 0.01);
    }

    #[test]
    fn test_jump_height_follows_tuned_gravity() {
        let profile = PursuerProfile::default();
        let floaty = KinematicsTuning {
            gravity_jump_rise: 0.3,
            ..KinematicsTuning::default()
        };
        // 12² / (2 * 0.3) = 240
        assert!((profile.max_jump_height(&floaty) - 240.0).abs() < 0.01);
        assert!(profile.can_reach_height(0.0, 200.0, &floaty));
        assert!(!profile.can_reach_height(0.0, 200.0, &KinematicsTuning::default()));
    }

    #[test]
    fn test_can_reach_height() {
        let profile = PursuerProfile::default();
        let kin = KinematicsTuning::default();
        assert!(profile.can_reach_height(0.0, 100.0, &kin));
        assert!(!profile.can_reach_height(0.0, 200.0, &kin));
    }

    #[test]
    fn test_reach_grows_with_boost() {
        let slow = PursuerProfile::default();
        let fast = PursuerProfile {
            jump_speed_boost: 3.0,
            ..PursuerProfile::default()
        };
        let kin = KinematicsTuning::default();
        assert!(fast.max_jump_reach(&kin) > slow.max_jump_reach(&kin));
    }

    #[test]
    fn test_flying_flag() {
        let bat = PursuerProfile {
            locomotion: Locomotion::Flying { hover_height: 40.0 },
            ..PursuerProfile::default()
        };
        assert!(bat.is_flying());
        assert!(!PursuerProfile::default().is_flying());
    }
}
