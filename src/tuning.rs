//! Pursuit tuning settings (decoupled from code constants)
//!
//! Every threshold the pursuit core uses lives here so a level designer can
//! retune without recompiling. Missing fields fall back to `constants.rs`.

use bevy::log::{info, warn};
use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::constants::*;

/// Gravity, fall clamp and collision response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KinematicsTuning {
    pub gravity: f32,
    pub gravity_jump_rise: f32,
    pub gravity_jump_fall: f32,
    pub gap_jump_gravity_scale: f32,
    pub max_fall_speed: f32,
    pub ceiling_rebound: f32,
    pub landing_tolerance: f32,
    pub collision_inset: f32,
    pub gap_jump_window: f32,
    pub pre_jump_time: f32,
    pub pre_jump_accel: f32,
}

impl Default for KinematicsTuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            gravity_jump_rise: GRAVITY_JUMP_RISE,
            gravity_jump_fall: GRAVITY_JUMP_FALL,
            gap_jump_gravity_scale: GAP_JUMP_GRAVITY_SCALE,
            max_fall_speed: MAX_FALL_SPEED,
            ceiling_rebound: CEILING_REBOUND,
            landing_tolerance: LANDING_TOLERANCE,
            collision_inset: COLLISION_INSET,
            gap_jump_window: GAP_JUMP_WINDOW,
            pre_jump_time: PRE_JUMP_TIME,
            pre_jump_accel: PRE_JUMP_ACCEL,
        }
    }
}

/// Thresholds for gap, jump and sight predicates
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReachTuning {
    pub wall_threshold: f32,
    pub gap_scan_step: f32,
    pub gap_scan_max: f32,
    pub gap_probe_depth: f32,
    pub gap_jump_factor: f32,
    pub chase_gap_bonus: f32,
    pub max_jump_distance: f32,
    pub max_jump_rise: f32,
    pub max_jump_drop: f32,
    pub unsafe_edge_distance: f32,
    pub detection_height_ratio: f32,
    pub chase_range_bonus: f32,
    pub sight_gap_grace: f32,
    pub trajectory_samples: usize,
}

impl Default for ReachTuning {
    fn default() -> Self {
        Self {
            wall_threshold: WALL_THRESHOLD,
            gap_scan_step: GAP_SCAN_STEP,
            gap_scan_max: GAP_SCAN_MAX,
            gap_probe_depth: GAP_PROBE_DEPTH,
            gap_jump_factor: GAP_JUMP_FACTOR,
            chase_gap_bonus: CHASE_GAP_BONUS,
            max_jump_distance: MAX_JUMP_DISTANCE,
            max_jump_rise: MAX_JUMP_RISE,
            max_jump_drop: MAX_JUMP_DROP,
            unsafe_edge_distance: UNSAFE_EDGE_DISTANCE,
            detection_height_ratio: DETECTION_HEIGHT_RATIO,
            chase_range_bonus: CHASE_RANGE_BONUS,
            sight_gap_grace: SIGHT_GAP_GRACE,
            trajectory_samples: TRAJECTORY_SAMPLES,
        }
    }
}

impl ReachTuning {
    /// Widest gap a pursuer moving at `speed` with `boost` can clear.
    pub fn max_gap_width(&self, speed: f32, boost: f32) -> f32 {
        speed * boost * self.gap_jump_factor
    }

    /// Can a gap of `width` be cleared at `speed` with `boost`?
    /// Monotonic in `width` for fixed speed and boost.
    pub fn can_jump_gap(&self, width: f32, speed: f32, boost: f32) -> bool {
        width < self.max_gap_width(speed, boost)
    }
}

/// Waypoint graph construction thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavTuning {
    pub node_inset: f32,
    pub node_lift: f32,
    pub max_hop_distance: f32,
    pub level_tolerance: f32,
    pub max_jump_height: f32,
    pub max_jump_reach: f32,
    pub max_drop_reach: f32,
    pub max_drop_height: f32,
    pub hop_cost: f32,
    pub drop_cost: f32,
}

impl Default for NavTuning {
    fn default() -> Self {
        Self {
            node_inset: NAV_NODE_INSET,
            node_lift: NAV_NODE_LIFT,
            max_hop_distance: NAV_MAX_HOP_DISTANCE,
            level_tolerance: NAV_LEVEL_TOLERANCE,
            max_jump_height: NAV_MAX_JUMP_HEIGHT,
            max_jump_reach: NAV_MAX_JUMP_REACH,
            max_drop_reach: NAV_MAX_DROP_REACH,
            max_drop_height: NAV_MAX_DROP_HEIGHT,
            hop_cost: NAV_HOP_COST,
            drop_cost: NAV_DROP_COST,
        }
    }
}

/// State machine timing and steering
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorTuning {
    pub path_refresh_interval: f32,
    pub waypoint_tolerance: f32,
    pub steer_deadband: f32,
    pub waypoint_jump_rise: f32,
    pub waypoint_jump_reach: f32,
    pub reach_jump_min_rise: f32,
    pub reach_jump_min_dx: f32,
    pub reach_jump_max_dx: f32,
    pub direct_jump_max_dx: f32,
    pub direct_jump_max_rise: f32,
    pub direct_jump_max_drop: f32,
    pub edge_align_tolerance: f32,
    pub max_jump_scale: f32,
    pub patrol_min_time: f32,
}

impl Default for BehaviorTuning {
    fn default() -> Self {
        Self {
            path_refresh_interval: PATH_REFRESH_INTERVAL,
            waypoint_tolerance: WAYPOINT_TOLERANCE,
            steer_deadband: STEER_DEADBAND,
            waypoint_jump_rise: WAYPOINT_JUMP_RISE,
            waypoint_jump_reach: WAYPOINT_JUMP_REACH,
            reach_jump_min_rise: REACH_JUMP_MIN_RISE,
            reach_jump_min_dx: REACH_JUMP_MIN_DX,
            reach_jump_max_dx: REACH_JUMP_MAX_DX,
            direct_jump_max_dx: DIRECT_JUMP_MAX_DX,
            direct_jump_max_rise: DIRECT_JUMP_MAX_RISE,
            direct_jump_max_drop: DIRECT_JUMP_MAX_DROP,
            edge_align_tolerance: EDGE_ALIGN_TOLERANCE,
            max_jump_scale: MAX_JUMP_SCALE,
            patrol_min_time: PATROL_MIN_TIME,
        }
    }
}

/// Horizontal play area and the kill line below it
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub kill_y: f32,
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self {
            min_x: WORLD_MIN_X,
            max_x: WORLD_MAX_X,
            kill_y: WORLD_KILL_Y,
        }
    }
}

/// Complete tuning set shared by every pursuer
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PursuitTuning {
    pub kinematics: KinematicsTuning,
    pub reach: ReachTuning,
    pub nav: NavTuning,
    pub behavior: BehaviorTuning,
    pub world: WorldBounds,
}

impl PursuitTuning {
    /// Load tuning from the default config file.
    pub fn load() -> Self {
        Self::load_from_file(PURSUIT_TUNING_FILE)
    }

    /// Load tuning from `path`, falling back to defaults when missing or invalid.
    pub fn load_from_file(path: &str) -> Self {
        let path = Path::new(path);
        if !path.exists() {
            info!("No {} found, using default pursuit tuning", path.display());
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(tuning) => {
                    info!("Loaded pursuit tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save tuning to `path`
    pub fn save_to_file(&self, path: &str) -> Result<(), std::io::Error> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        if let Some(parent) = Path::new(path).parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, json)?;
        info!("Saved pursuit tuning to {}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{ "reach": { "gap_jump_factor": 12.0 }, "world": { "kill_y": -500.0 } }"#;
        let tuning: PursuitTuning = serde_json::from_str(json).unwrap();
        assert_eq!(tuning.reach.gap_jump_factor, 12.0);
        assert_eq!(tuning.reach.wall_threshold, WALL_THRESHOLD);
        assert_eq!(tuning.world.kill_y, -500.0);
        assert_eq!(tuning.world.max_x, WORLD_MAX_X);
        assert_eq!(tuning.kinematics.gravity, GRAVITY);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let tuning = PursuitTuning::load_from_file("config/does_not_exist.json");
        assert_eq!(tuning.behavior.path_refresh_interval, PATH_REFRESH_INTERVAL);
    }

    #[test]
    fn test_can_jump_gap_threshold() {
        let reach = ReachTuning::default();
        // 3 * 2 * 14 = 84
        assert!(reach.can_jump_gap(40.0, 3.0, 2.0));
        assert!(reach.can_jump_gap(83.9, 3.0, 2.0));
        assert!(!reach.can_jump_gap(84.0, 3.0, 2.0));
        assert!(!reach.can_jump_gap(f32::INFINITY, 3.0, 2.0));
    }

    #[test]
    fn test_can_jump_gap_is_monotonic() {
        let reach = ReachTuning::default();
        let mut seen_false = false;
        for step in 0..400 {
            let width = step as f32 * 0.5;
            let ok = reach.can_jump_gap(width, 3.0, 2.0);
            if seen_false {
                assert!(!ok, "width {} flipped back to jumpable", width);
            }
            if !ok {
                seen_false = true;
            }
        }
        assert!(seen_false);
    }
}
