//! Tunable constants for the pursuit core
//!
//! One consistent constant set. Speeds, gravity and jump strengths are in
//! world units per reference frame (1/60 s); times are in seconds.
//! Runtime overrides live in `tuning.rs`.

use bevy::prelude::*;

// =============================================================================
// TIME
// =============================================================================

pub const REFERENCE_FPS: f32 = 60.0; // Frame rate the per-frame constants were tuned at
pub const MAX_SUBSTEP_FRAMES: f32 = 1.0; // Longest physics sub-step, in reference frames
pub const SUBSTEP_SLACK: f32 = 0.01; // Float noise around whole frame counts does not add a sub-step

// =============================================================================
// SIZE CONSTANTS
// =============================================================================

pub const PURSUER_SIZE: Vec2 = Vec2::new(32.0, 32.0);
pub const TARGET_SIZE: Vec2 = Vec2::new(32.0, 48.0);

// =============================================================================
// KINEMATICS (units per frame, units per frame²)
// =============================================================================

pub const GRAVITY: f32 = 0.55; // Walking, patrolling, falling off ledges
pub const GRAVITY_JUMP_RISE: f32 = 0.45; // Floaty ascent while in Jump
pub const GRAVITY_JUMP_FALL: f32 = 0.6; // Snappier descent while in Jump
pub const GAP_JUMP_GRAVITY_SCALE: f32 = 0.85; // Extra airtime while clearing a measured gap
pub const MAX_FALL_SPEED: f32 = 12.0;
pub const CEILING_REBOUND: f32 = 0.5; // Downward speed after a head bump
pub const LANDING_TOLERANCE: f32 = 5.0; // How far below a top surface a landing still snaps
pub const COLLISION_INSET: f32 = 5.0; // Horizontal overlap needed before landing/ceiling counts
pub const GAP_JUMP_WINDOW: f32 = 0.6; // Seconds of side/ceiling suppression after a gap jump
pub const PRE_JUMP_TIME: f32 = 0.1; // Run-up before leaving the ground
pub const PRE_JUMP_ACCEL: f32 = 0.8; // Horizontal acceleration during the run-up

// =============================================================================
// PROBES
// =============================================================================

pub const GROUND_PROBE_SIZE: Vec2 = Vec2::new(10.0, 5.0); // Beneath a point
pub const FOOT_PROBE_INSET: f32 = 2.0; // Body ground probe is narrower than the body
pub const FOOT_PROBE_DEPTH: f32 = 3.0;
pub const EDGE_PROBE_DISTANCE: f32 = 10.0; // Look-ahead past the leading edge
pub const GAP_PROBE_OFFSET: f32 = 20.0; // Where NeedToJumpGap looks for the far side
pub const WALL_THRESHOLD: f32 = 15.0; // Platforms taller than this block sight

// =============================================================================
// REACHABILITY
// =============================================================================

pub const GAP_SCAN_STEP: f32 = 5.0;
pub const GAP_SCAN_MAX: f32 = 300.0;
pub const GAP_PROBE_DEPTH: f32 = 30.0;
pub const GAP_JUMP_FACTOR: f32 = 14.0; // K in width < speed * boost * K
pub const CHASE_GAP_BONUS: f32 = 1.2; // Chasing pursuers commit to wider gaps
pub const MAX_JUMP_DISTANCE: f32 = 200.0;
pub const MAX_JUMP_RISE: f32 = 30.0; // Jumping up is harder...
pub const MAX_JUMP_DROP: f32 = 100.0; // ...than dropping down
pub const UNSAFE_EDGE_DISTANCE: f32 = 15.0;
pub const DETECTION_HEIGHT_RATIO: f32 = 0.75;
pub const CHASE_RANGE_BONUS: f32 = 1.3;
pub const SIGHT_GAP_GRACE: f32 = 150.0; // Gaps closer than this never hide the target
pub const SIGHT_HORIZONTAL_SLOPE: f32 = 0.3;
pub const SIGHT_MIN_GAP_SPAN: f32 = 30.0;
pub const SIGHT_MIN_SAMPLES: usize = 8;
pub const SIGHT_MAX_SAMPLES: usize = 30;
pub const SIGHT_SAMPLE_SPACING: f32 = 20.0;
pub const SIGHT_PROBE_SIZE: f32 = 6.0;
pub const TRAJECTORY_SAMPLES: usize = 12;

// =============================================================================
// NAVIGATION GRAPH
// =============================================================================

pub const NAV_NODE_INSET: f32 = 10.0;
pub const NAV_NODE_LIFT: f32 = 2.0;
pub const NAV_MAX_HOP_DISTANCE: f32 = 150.0;
pub const NAV_LEVEL_TOLERANCE: f32 = 20.0;
pub const NAV_MAX_JUMP_HEIGHT: f32 = 150.0;
pub const NAV_MAX_JUMP_REACH: f32 = 150.0;
pub const NAV_MAX_DROP_REACH: f32 = 100.0;
pub const NAV_MAX_DROP_HEIGHT: f32 = 50.0;
pub const NAV_HOP_COST: f32 = 1.2; // Horizontal hops are riskier than walking
pub const NAV_DROP_COST: f32 = 1.5; // Drops are the least preferred connection

// =============================================================================
// BEHAVIOUR
// =============================================================================

pub const PATH_REFRESH_INTERVAL: f32 = 0.5;
pub const WAYPOINT_TOLERANCE: f32 = 15.0;
pub const STEER_DEADBAND: f32 = 5.0;
pub const WAYPOINT_JUMP_RISE: f32 = 20.0; // Waypoint this far above the feet needs a jump
pub const WAYPOINT_JUMP_REACH: f32 = 150.0;
pub const REACH_JUMP_MIN_RISE: f32 = 20.0;
pub const REACH_JUMP_MIN_DX: f32 = 30.0;
pub const REACH_JUMP_MAX_DX: f32 = 120.0;
pub const DIRECT_JUMP_MAX_DX: f32 = 100.0;
pub const DIRECT_JUMP_MAX_RISE: f32 = 60.0;
pub const DIRECT_JUMP_MAX_DROP: f32 = 20.0;
pub const EDGE_ALIGN_TOLERANCE: f32 = 10.0;
pub const MAX_JUMP_SCALE: f32 = 1.3; // Cap on strength/boost scaling
pub const PATROL_MIN_TIME: f32 = 1.0; // Patrol at least this long before idling
pub const BREATHING_RATE: f32 = 5.0;
pub const BREATHING_AMPLITUDE: f32 = 2.0;

// =============================================================================
// WORLD BOUNDS
// =============================================================================

pub const WORLD_MIN_X: f32 = 0.0;
pub const WORLD_MAX_X: f32 = 3000.0;
pub const WORLD_KILL_Y: f32 = -1000.0; // Pursuers below this are sent back to spawn

// =============================================================================
// FILES
// =============================================================================

pub const PURSUIT_TUNING_FILE: &str = "config/pursuit_tuning.json";
pub const PURSUER_PROFILES_FILE: &str = "assets/pursuer_profiles.txt";
