//! Pursuer components

use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::ai::capabilities::PursuerProfile;
use crate::ai::timers::{TimerKind, TimerTable};
use crate::constants::*;
use crate::geometry::Body;

/// Behaviour state. Exactly one is active at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PursuitState {
    #[default]
    Patrol,
    Chase,
    Jump,
    Recovery,
    Idle,
}

/// Why a jump was started
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JumpKind {
    /// Clearing a measured gap ahead
    Gap,
    /// Straight at the target's platform
    Direct,
    /// Up toward a waypoint, the target, or where it was last seen
    Vertical,
}

/// A queued or in-flight jump
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JumpPlan {
    pub kind: JumpKind,
    /// Upward launch speed (units per frame)
    pub strength: f32,
    /// Horizontal speed held through the jump (units per frame)
    pub speed: f32,
    /// Set once the pursuer has left the ground
    pub launched: bool,
}

/// An autonomous pursuer. Position is the body center, y up.
#[derive(Component, Clone)]
pub struct Pursuer {
    pub position: Vec2,
    /// Units per reference frame
    pub velocity: Vec2,
    pub size: Vec2,
    pub state: PursuitState,
    pub timers: TimerTable,
    /// -1.0 = left, 1.0 = right
    pub facing: f32,
    pub last_known_target: Option<Vec2>,
    pub path: Vec<Vec2>,
    /// `None` when no path is being followed, otherwise a valid index into `path`
    pub path_cursor: Option<usize>,
    pub spawn: Vec2,
    pub profile: PursuerProfile,
    pub jump: Option<JumpPlan>,
    /// Vertical sprite offset while idling
    pub breathing_offset: f32,
    /// Grounded status after the last collision pass
    pub grounded: bool,
    /// Times this pursuer fell past the kill line and was sent back to spawn
    pub respawns: u32,
    pub(crate) rng: StdRng,
}

impl Pursuer {
    /// New pursuer at `spawn`, patrol timer armed with the default tuning.
    /// Spawners with their own tuning follow up with `reset`.
    pub fn new(spawn: Vec2, profile: PursuerProfile, seed: u64) -> Self {
        let mut pursuer = Self {
            position: spawn,
            velocity: Vec2::ZERO,
            size: PURSUER_SIZE,
            state: PursuitState::Patrol,
            timers: TimerTable::default(),
            facing: 1.0,
            last_known_target: None,
            path: Vec::new(),
            path_cursor: None,
            spawn,
            profile,
            jump: None,
            breathing_offset: 0.0,
            grounded: false,
            respawns: 0,
            rng: StdRng::seed_from_u64(seed),
        };
        pursuer.reset(spawn, PATROL_MIN_TIME);
        pursuer
    }

    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    /// Back to `spawn`, at rest, patrolling with every timer cleared and the
    /// patrol timer armed with `patrol_min_time`
    pub fn reset(&mut self, spawn: Vec2, patrol_min_time: f32) {
        self.spawn = spawn;
        self.position = spawn;
        self.velocity = Vec2::ZERO;
        self.state = PursuitState::Patrol;
        self.timers.reset();
        self.timers.set(TimerKind::State, patrol_min_time);
        self.facing = 1.0;
        self.last_known_target = None;
        self.clear_path();
        self.jump = None;
        self.breathing_offset = 0.0;
        self.grounded = false;
    }

    pub fn body(&self) -> Body {
        Body::new(self.position, self.size)
    }

    /// Going up in a jump (for squash/stretch rendering)
    pub fn is_rising(&self) -> bool {
        self.state == PursuitState::Jump && self.velocity.y > 0.0
    }

    pub fn set_path(&mut self, path: Vec<Vec2>) {
        self.path_cursor = if path.is_empty() { None } else { Some(0) };
        self.path = path;
    }

    pub fn clear_path(&mut self) {
        self.path.clear();
        self.path_cursor = None;
    }

    pub fn current_waypoint(&self) -> Option<Vec2> {
        self.path_cursor.and_then(|i| self.path.get(i).copied())
    }

    /// Move to the next waypoint; clears the path after the last one
    pub fn advance_waypoint(&mut self) {
        match self.path_cursor {
            Some(i) if i + 1 < self.path.len() => self.path_cursor = Some(i + 1),
            _ => self.clear_path(),
        }
    }

    /// Is the remembered target position still usable?
    pub fn has_memory(&self) -> bool {
        self.last_known_target.is_some() && self.timers.is_running(TimerKind::Memory)
    }
}

/// Marker for the entity pursuers chase
#[derive(Component, Default)]
pub struct PursuitTarget;

/// Bounding size of an entity whose `Transform` is its center
#[derive(Component, Clone, Copy, Debug)]
pub struct BodySize(pub Vec2);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_restores_patrol() {
        let mut pursuer = Pursuer::new(Vec2::new(10.0, 50.0), PursuerProfile::default(), 1);
        pursuer.position = Vec2::new(500.0, -20.0);
        pursuer.velocity = Vec2::new(3.0, -8.0);
        pursuer.state = PursuitState::Jump;
        pursuer.set_path(vec![Vec2::ZERO]);
        pursuer.timers.set(TimerKind::JumpCooldown, 0.5);

        pursuer.reset(Vec2::new(20.0, 60.0), 2.5);

        assert_eq!(pursuer.position, Vec2::new(20.0, 60.0));
        assert_eq!(pursuer.velocity, Vec2::ZERO);
        assert_eq!(pursuer.state, PursuitState::Patrol);
        assert_eq!(pursuer.path_cursor, None);
        assert!(pursuer.timers.is_done(TimerKind::JumpCooldown));
        assert_eq!(pursuer.timers.get(TimerKind::State), 2.5);
    }

    #[test]
    fn test_path_cursor_stays_valid() {
        let mut pursuer = Pursuer::new(Vec2::ZERO, PursuerProfile::default(), 1);
        pursuer.set_path(Vec::new());
        assert_eq!(pursuer.path_cursor, None);

        pursuer.set_path(vec![Vec2::new(1.0, 0.0), Vec2::new(2.0, 0.0)]);
        assert_eq!(pursuer.current_waypoint(), Some(Vec2::new(1.0, 0.0)));
        pursuer.advance_waypoint();
        assert_eq!(pursuer.current_waypoint(), Some(Vec2::new(2.0, 0.0)));
        pursuer.advance_waypoint();
        assert_eq!(pursuer.path_cursor, None);
        assert!(pursuer.path.is_empty());
    }
}
