//! Pursuer physics - gravity, integration and platform collision
//!
//! Velocities are in units per reference frame, so every step takes `frames`
//! (elapsed seconds times `REFERENCE_FPS`) rather than raw seconds.

use bevy::prelude::*;

use crate::ai::timers::TimerKind;
use crate::constants::{MAX_SUBSTEP_FRAMES, SUBSTEP_SLACK};
use crate::geometry::{intersects, is_grounded};
use crate::pursuer::components::{Pursuer, PursuitState};
use crate::tuning::{KinematicsTuning, PursuitTuning};
use crate::world::PlatformSnapshot;

/// One full physics step: gravity, integrate, collide, clamp to the world.
/// Long ticks are split into sub-steps of at most one reference frame so a
/// falling body never moves further than the landing window in one go.
pub fn step(pursuer: &mut Pursuer, platforms: &PlatformSnapshot, tuning: &PursuitTuning, frames: f32) {
    let substeps = (frames / MAX_SUBSTEP_FRAMES - SUBSTEP_SLACK).ceil().max(1.0) as u32;
    let sub_frames = frames / substeps as f32;

    for _ in 0..substeps {
        let previous = pursuer.position;

        apply_gravity(pursuer, &tuning.kinematics, sub_frames);
        integrate(pursuer, sub_frames);

        if pursuer.profile.is_flying() {
            resolve_flying_collisions(pursuer, platforms);
        } else {
            resolve_collisions(pursuer, previous, platforms, &tuning.kinematics);
        }

        if apply_world_bounds(pursuer, tuning) {
            pursuer.respawns += 1;
            break;
        }
    }

    pursuer.grounded = !pursuer.profile.is_flying() && is_grounded(&pursuer.body(), platforms);
}

/// Gravity for the current phase, clamped to the terminal fall speed
pub fn apply_gravity(pursuer: &mut Pursuer, kin: &KinematicsTuning, frames: f32) {
    if pursuer.profile.is_flying() {
        return;
    }

    let in_flight = pursuer.state == PursuitState::Jump && pursuer.jump.is_some_and(|j| j.launched);
    let mut gravity = if !in_flight {
        kin.gravity
    } else if pursuer.velocity.y > 0.0 {
        kin.gravity_jump_rise
    } else {
        kin.gravity_jump_fall
    };
    if pursuer.timers.is_running(TimerKind::GapJump) {
        gravity *= kin.gap_jump_gravity_scale;
    }

    pursuer.velocity.y = (pursuer.velocity.y - gravity * frames).max(-kin.max_fall_speed);
}

pub fn integrate(pursuer: &mut Pursuer, frames: f32) {
    pursuer.position += pursuer.velocity * frames;
}

/// Resolve overlaps with solid platforms, in priority order: ceiling, landing, side.
/// While the gap-jump window is open only landings are resolved.
pub fn resolve_collisions(
    pursuer: &mut Pursuer,
    previous: Vec2,
    platforms: &PlatformSnapshot,
    kin: &KinematicsTuning,
) {
    let half = pursuer.size / 2.0;
    let gap_window = pursuer.timers.is_running(TimerKind::GapJump);
    let prev_bottom = previous.y - half.y;
    let prev_top = previous.y + half.y;

    for (_, platform) in platforms.solid() {
        let p = platform.bounds;
        let body = pursuer.body().rect();
        if !intersects(body, p) {
            continue;
        }

        // Need a real horizontal overlap, not a corner graze
        let overlaps_x = body.max.x > p.min.x + kin.collision_inset
            && body.min.x < p.max.x - kin.collision_inset;

        // Ceiling: rising into the underside
        if !gap_window
            && pursuer.velocity.y > 0.0
            && overlaps_x
            && body.max.y > p.min.y
            && prev_top <= p.min.y + kin.landing_tolerance
        {
            pursuer.position.y = p.min.y - half.y;
            pursuer.velocity.y = -kin.ceiling_rebound;
            continue;
        }

        // Landing: coming down onto the top surface
        if pursuer.velocity.y <= 0.0
            && overlaps_x
            && body.min.y <= p.max.y
            && prev_bottom >= p.max.y - kin.landing_tolerance
        {
            pursuer.position.y = p.max.y + half.y;
            pursuer.velocity.y = 0.0;
            continue;
        }

        if gap_window || pursuer.velocity.y > 0.0 {
            continue;
        }

        // Side: only a wall if it rises well above the feet
        let is_wall = body.min.y < p.max.y - kin.landing_tolerance
            && body.max.y > p.min.y + kin.landing_tolerance;
        if !is_wall {
            continue;
        }
        if pursuer.velocity.x > 0.0 && body.min.x < p.min.x && body.max.x > p.min.x {
            pursuer.position.x = p.min.x - half.x;
            pursuer.velocity.x = -pursuer.velocity.x;
            pursuer.facing = -1.0;
        } else if pursuer.velocity.x < 0.0 && body.max.x > p.max.x && body.min.x < p.max.x {
            pursuer.position.x = p.max.x + half.x;
            pursuer.velocity.x = -pursuer.velocity.x;
            pursuer.facing = 1.0;
        }
    }
}

/// Flyers bounce off whatever they touch along the smallest overlap axis
pub fn resolve_flying_collisions(pursuer: &mut Pursuer, platforms: &PlatformSnapshot) {
    let half = pursuer.size / 2.0;

    for (_, platform) in platforms.solid() {
        let platform_pos = platform.bounds.center();
        let platform_half = platform.bounds.half_size();

        let diff = pursuer.position - platform_pos;
        let overlap_x = half.x + platform_half.x - diff.x.abs();
        let overlap_y = half.y + platform_half.y - diff.y.abs();

        if overlap_x <= 0.0 || overlap_y <= 0.0 {
            continue;
        }

        if overlap_y < overlap_x {
            let side = if diff.y > 0.0 { 1.0 } else { -1.0 };
            pursuer.position.y = platform_pos.y + side * (platform_half.y + half.y);
            pursuer.velocity.y = side * pursuer.velocity.y.abs();
        } else {
            let side = if diff.x > 0.0 { 1.0 } else { -1.0 };
            pursuer.position.x = platform_pos.x + side * (platform_half.x + half.x);
            pursuer.velocity.x = side * pursuer.velocity.x.abs();
            pursuer.facing = side;
        }
    }
}

/// Keep the body inside the horizontal play area; send it home below the kill line.
/// Returns true when the pursuer was reset.
pub fn apply_world_bounds(pursuer: &mut Pursuer, tuning: &PursuitTuning) -> bool {
    let bounds = &tuning.world;
    if pursuer.position.y < bounds.kill_y {
        info!(
            "{} fell out of the world at ({:.0}, {:.0}), resetting to spawn",
            pursuer.profile.name, pursuer.position.x, pursuer.position.y
        );
        let spawn = pursuer.spawn;
        pursuer.reset(spawn, tuning.behavior.patrol_min_time);
        return true;
    }

    let half_w = pursuer.size.x / 2.0;
    let min_x = bounds.min_x + half_w;
    let max_x = (bounds.max_x - half_w).max(min_x);
    if pursuer.position.x < min_x {
        pursuer.position.x = min_x;
        pursuer.velocity.x = pursuer.velocity.x.abs();
        pursuer.facing = 1.0;
    } else if pursuer.position.x > max_x {
        pursuer.position.x = max_x;
        pursuer.velocity.x = -pursuer.velocity.x.abs();
        pursuer.facing = -1.0;
    }
    false
}
