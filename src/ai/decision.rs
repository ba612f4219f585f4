//! Pursuit decision system - one parameterized state machine for every pursuer
//!
//! `update` advances a single pursuer by one tick: timers, state logic,
//! physics, then the idle breathing offset. Everything the pursuer reads
//! comes in through `PursuitContext` and the optional target body.

use bevy::prelude::*;
use rand::Rng;

use crate::ai::capabilities::Locomotion;
use crate::ai::navigation::NavGraph;
use crate::ai::pathfinding::plan_route;
use crate::ai::reachability::{GapScan, Reachability};
use crate::ai::timers::TimerKind;
use crate::constants::*;
use crate::geometry::{Body, platform_below_point, platform_under};
use crate::helpers::{chance_over_frames, direction_toward, move_toward};
use crate::pursuer::physics;
use crate::pursuer::{JumpKind, JumpPlan, Pursuer, PursuitState};
use crate::tuning::{BehaviorTuning, PursuitTuning};
use crate::world::PlatformSnapshot;

/// Everything a pursuer may read during its tick
#[derive(Clone, Copy)]
pub struct PursuitContext<'a> {
    pub platforms: &'a PlatformSnapshot,
    pub nav: &'a NavGraph,
    pub tuning: &'a PursuitTuning,
}

impl<'a> PursuitContext<'a> {
    pub fn new(platforms: &'a PlatformSnapshot, nav: &'a NavGraph, tuning: &'a PursuitTuning) -> Self {
        Self {
            platforms,
            nav,
            tuning,
        }
    }

    pub fn reach(&self) -> Reachability<'a> {
        Reachability::new(self.platforms, self.tuning)
    }
}

/// Advance one pursuer by `dt` seconds
pub fn update(pursuer: &mut Pursuer, target: Option<&Body>, ctx: &PursuitContext, dt: f32) {
    let dt = dt.max(0.0);
    let frames = dt * REFERENCE_FPS;

    pursuer.timers.tick(dt);

    if pursuer.profile.is_flying() {
        update_flying(pursuer, target, ctx, frames);
    } else {
        match pursuer.state {
            PursuitState::Patrol => patrol(pursuer, target, ctx, frames),
            PursuitState::Chase => chase(pursuer, target, ctx),
            PursuitState::Jump => jump(pursuer, ctx, frames),
            PursuitState::Recovery | PursuitState::Idle => rest(pursuer, target, ctx),
        }
    }

    physics::step(pursuer, ctx.platforms, ctx.tuning, frames);

    pursuer.breathing_offset = if pursuer.state == PursuitState::Idle {
        let elapsed = pursuer.profile.idle_time - pursuer.timers.get(TimerKind::State);
        (elapsed * BREATHING_RATE).sin() * BREATHING_AMPLITUDE
    } else {
        0.0
    };
}

// =============================================================================
// TRANSITIONS
// =============================================================================

fn enter(pursuer: &mut Pursuer, state: PursuitState, behavior: &BehaviorTuning) {
    if pursuer.state != state {
        debug!("{}: {:?} -> {:?}", pursuer.profile.name, pursuer.state, state);
    }
    pursuer.state = state;

    match state {
        PursuitState::Patrol => {
            pursuer.timers.set(TimerKind::State, behavior.patrol_min_time);
            pursuer.clear_path();
            pursuer.jump = None;
        }
        PursuitState::Chase => {
            // Search right away on the next chase tick
            pursuer.timers.clear(TimerKind::PathRefresh);
            pursuer.jump = None;
        }
        PursuitState::Idle => {
            pursuer.timers.set(TimerKind::State, pursuer.profile.idle_time);
            pursuer.velocity.x = 0.0;
        }
        PursuitState::Recovery => {
            pursuer.timers.set(TimerKind::State, pursuer.profile.recovery_time);
            pursuer.velocity.x = 0.0;
            pursuer.jump = None;
        }
        PursuitState::Jump => {}
    }
}

/// Look for the target; remembers where it was when seen
fn sense(pursuer: &mut Pursuer, target: Option<&Body>, reach: &Reachability, range_scale: f32) -> Option<Body> {
    let target = target?;
    let range = pursuer.profile.detection_range * range_scale;
    let gap_aware = !pursuer.profile.is_flying();
    if !reach.detect_target(&pursuer.body(), target, range, gap_aware) {
        return None;
    }
    pursuer.last_known_target = Some(target.feet());
    pursuer.timers.set(TimerKind::Memory, pursuer.profile.memory_duration);
    Some(*target)
}

fn forget_target(pursuer: &mut Pursuer) {
    pursuer.last_known_target = None;
    pursuer.timers.clear(TimerKind::Memory);
}

fn turn_around(pursuer: &mut Pursuer, speed: f32) {
    pursuer.facing = -pursuer.facing;
    pursuer.velocity.x = pursuer.facing * speed;
}

/// Fixed-range patrols bounce between spawn and spawn + distance
fn patrol_bounds_reached(pursuer: &Pursuer) -> bool {
    let Some(distance) = pursuer.profile.patrol_distance else {
        return false;
    };
    (pursuer.facing > 0.0 && pursuer.position.x >= pursuer.spawn.x + distance)
        || (pursuer.facing < 0.0 && pursuer.position.x <= pursuer.spawn.x)
}

fn roll_idle(pursuer: &mut Pursuer, frames: f32) -> bool {
    if pursuer.timers.is_running(TimerKind::State) {
        return false;
    }
    let chance = chance_over_frames(pursuer.profile.idle_probability, frames);
    chance > 0.0 && pursuer.rng.gen_range(0.0..1.0) < chance
}

// =============================================================================
// GROUND STATES
// =============================================================================

fn patrol(pursuer: &mut Pursuer, target: Option<&Body>, ctx: &PursuitContext, frames: f32) {
    let reach = ctx.reach();
    let behavior = &ctx.tuning.behavior;

    if sense(pursuer, target, &reach, 1.0).is_some() || pursuer.has_memory() {
        enter(pursuer, PursuitState::Chase, behavior);
        return;
    }

    let speed = pursuer.profile.patrol_speed;
    if pursuer.grounded {
        let body = pursuer.body();
        let dir = pursuer.facing;

        if reach.is_at_platform_edge(&body, dir) {
            let scan = reach.measure_gap_ahead(&body, dir);
            let jumpable = match scan {
                GapScan::Gap(gap) => reach.can_jump_gap(
                    gap.width,
                    pursuer.profile.chase_speed,
                    pursuer.profile.jump_speed_boost,
                ),
                GapScan::Solid | GapScan::Unbounded { .. } => false,
            };
            if jumpable && pursuer.timers.is_done(TimerKind::JumpCooldown) {
                debug!("{}: patrol gap jump, width {:.0}", pursuer.profile.name, scan.width());
                start_gap_jump(pursuer, scan.width(), ctx.tuning);
                return;
            }
            turn_around(pursuer, speed);
            return;
        }

        if patrol_bounds_reached(pursuer) {
            turn_around(pursuer, speed);
            return;
        }
    }

    if pursuer.grounded && roll_idle(pursuer, frames) {
        enter(pursuer, PursuitState::Idle, behavior);
        return;
    }

    pursuer.velocity.x = pursuer.facing * speed;
}

fn chase(pursuer: &mut Pursuer, target: Option<&Body>, ctx: &PursuitContext) {
    let reach = ctx.reach();
    let tuning = ctx.tuning;
    let behavior = &tuning.behavior;

    let seen = sense(pursuer, target, &reach, tuning.reach.chase_range_bonus);
    let goal = match (seen, pursuer.last_known_target) {
        (Some(body), _) => body.feet(),
        (None, Some(memory)) if pursuer.has_memory() => memory,
        _ => {
            forget_target(pursuer);
            enter(pursuer, PursuitState::Patrol, behavior);
            return;
        }
    };

    let body = pursuer.body();
    let grounded = pursuer.grounded;
    let jump_ready = grounded && pursuer.timers.is_done(TimerKind::JumpCooldown);

    if jump_ready && seen.is_some() && try_direct_jump(pursuer, &reach, goal, tuning) {
        return;
    }

    if grounded && pursuer.timers.is_done(TimerKind::PathRefresh) {
        pursuer
            .timers
            .set(TimerKind::PathRefresh, behavior.path_refresh_interval);
        let route = plan_route(&reach, ctx.nav, &body, goal);
        debug!("{}: route {:?}", pursuer.profile.name, route);
        pursuer.set_path(route.into_waypoints());
    }

    if let Some(waypoint) = pursuer.current_waypoint() {
        if waypoint.distance(body.feet()) < behavior.waypoint_tolerance {
            pursuer.advance_waypoint();
        }
    }
    let waypoint = pursuer.current_waypoint();
    let steer_to = waypoint.unwrap_or(goal);
    let dir = direction_toward(body.center.x, steer_to.x, behavior.steer_deadband);

    // Level ground ahead falls away
    let level_leg = waypoint.is_none_or(|w| (w.y - body.bottom()).abs() <= behavior.waypoint_jump_rise);
    if grounded
        && dir != 0.0
        && level_leg
        && reach.is_at_platform_edge(&body, dir)
        && reach.need_to_jump_gap(&body, dir)
    {
        pursuer.facing = dir;
        let scan = reach.measure_gap_ahead(&body, dir);
        match scan {
            GapScan::Solid => {}
            GapScan::Gap(gap)
                if reach.can_jump_gap(
                    gap.width,
                    pursuer.profile.chase_speed * tuning.reach.chase_gap_bonus,
                    pursuer.profile.jump_speed_boost,
                ) =>
            {
                if jump_ready {
                    debug!("{}: chase gap jump, width {:.0}", pursuer.profile.name, gap.width);
                    start_gap_jump(pursuer, gap.width, tuning);
                } else {
                    // Wait at the edge for the cooldown
                    pursuer.velocity.x = 0.0;
                }
                return;
            }
            GapScan::Gap(_) | GapScan::Unbounded { .. } => {
                debug!("{}: gap too wide, replanning", pursuer.profile.name);
                turn_around(pursuer, pursuer.profile.chase_speed);
                pursuer.clear_path();
                pursuer.timers.clear(TimerKind::PathRefresh);
                return;
            }
        }
    }

    if jump_ready {
        match waypoint {
            Some(w) => {
                let rise = w.y - body.bottom();
                let dx = w.x - body.center.x;
                if rise > behavior.waypoint_jump_rise
                    && dx.abs() < behavior.waypoint_jump_reach
                    && pursuer.profile.can_reach_height(body.bottom(), w.y, &tuning.kinematics)
                {
                    if dx != 0.0 {
                        pursuer.facing = dx.signum();
                    }
                    debug!("{}: jumping to waypoint ({:.0}, {:.0})", pursuer.profile.name, w.x, w.y);
                    start_jump(pursuer, JumpKind::Vertical, 1.0, 1.0, tuning);
                    return;
                }
            }
            None => {
                if reach.should_jump_to_reach(&body, goal, pursuer.profile.max_jump_height(&tuning.kinematics)) {
                    pursuer.facing = (goal.x - body.center.x).signum();
                    debug!("{}: jumping up toward target", pursuer.profile.name);
                    start_jump(pursuer, JumpKind::Vertical, 1.0, 1.0, tuning);
                    return;
                }
            }
        }
    }

    if dir != 0.0 {
        pursuer.facing = dir;
        pursuer.velocity.x = dir * pursuer.profile.chase_speed;
    } else {
        pursuer.velocity.x = 0.0;
        // Reached the remembered spot and still nothing in sight
        if seen.is_none() && waypoint.is_none() {
            debug!("{}: lost the target", pursuer.profile.name);
            forget_target(pursuer);
            enter(pursuer, PursuitState::Patrol, behavior);
        }
    }
}

/// Jump straight onto the target's platform when lined up at an edge
fn try_direct_jump(pursuer: &mut Pursuer, reach: &Reachability, goal: Vec2, tuning: &PursuitTuning) -> bool {
    let behavior = &tuning.behavior;
    let body = pursuer.body();
    let dx = goal.x - body.center.x;
    let dy = goal.y - body.bottom();

    if dx == 0.0 || dx.abs() > behavior.direct_jump_max_dx {
        return false;
    }
    if dy < -behavior.direct_jump_max_drop || dy > behavior.direct_jump_max_rise {
        return false;
    }

    let platforms = reach.platforms();
    let Some(target_platform) = platform_below_point(goal, 5.0, platforms) else {
        return false;
    };
    if platform_under(&body, platforms) == Some(target_platform) {
        return false;
    }

    let dir = dx.signum();
    if !reach.is_at_correct_edge(&body, dir) || !reach.can_jump_directly_to(&body, goal) {
        return false;
    }

    pursuer.facing = dir;
    let (strength, boost) = direct_jump_scale(goal.distance(body.feet()), dy);
    debug!(
        "{}: direct jump to ({:.0}, {:.0}), scale {:.2}/{:.2}",
        pursuer.profile.name, goal.x, goal.y, strength, boost
    );
    start_jump(pursuer, JumpKind::Direct, strength, boost, tuning);
    true
}

fn jump(pursuer: &mut Pursuer, ctx: &PursuitContext, frames: f32) {
    let kin = &ctx.tuning.kinematics;
    let Some(mut plan) = pursuer.jump else {
        enter(pursuer, PursuitState::Recovery, &ctx.tuning.behavior);
        return;
    };

    let run_speed = pursuer.facing * plan.speed;

    if !plan.launched {
        pursuer.velocity.x = move_toward(pursuer.velocity.x, run_speed, kin.pre_jump_accel * frames);
        if pursuer.timers.is_done(TimerKind::PreJump) || !pursuer.grounded {
            pursuer.velocity.y = plan.strength;
            plan.launched = true;
            pursuer
                .timers
                .set(TimerKind::JumpCooldown, pursuer.profile.jump_cooldown);
            if plan.kind == JumpKind::Gap {
                pursuer.timers.set(TimerKind::GapJump, kin.gap_jump_window);
            }
            debug!(
                "{}: {:?} jump launched at ({:.0}, {:.0})",
                pursuer.profile.name, plan.kind, pursuer.position.x, pursuer.position.y
            );
        }
        pursuer.jump = Some(plan);
        return;
    }

    if pursuer.grounded && pursuer.velocity.y <= 0.0 {
        enter(pursuer, PursuitState::Recovery, &ctx.tuning.behavior);
        return;
    }

    pursuer.velocity.x = run_speed;
}

/// Recovery and Idle: stand still until the state timer runs out
fn rest(pursuer: &mut Pursuer, target: Option<&Body>, ctx: &PursuitContext) {
    pursuer.velocity.x = 0.0;
    if pursuer.profile.is_flying() {
        pursuer.velocity.y = 0.0;
    }
    if pursuer.timers.is_running(TimerKind::State) {
        return;
    }

    let reach = ctx.reach();
    let next = if sense(pursuer, target, &reach, 1.0).is_some() {
        PursuitState::Chase
    } else {
        PursuitState::Patrol
    };
    enter(pursuer, next, &ctx.tuning.behavior);
}

// =============================================================================
// JUMP SCALING
// =============================================================================

/// Strength and boost multipliers for clearing a gap of `width`
pub fn gap_jump_scale(width: f32) -> (f32, f32) {
    if width > 150.0 {
        (1.2, 1.3)
    } else if width > 100.0 {
        (1.1, 1.2)
    } else if width > 50.0 {
        (1.05, 1.1)
    } else {
        (1.0, 1.0)
    }
}

/// Strength and boost multipliers for a direct jump covering `distance`
/// with vertical offset `dy`. Short hops are softened, climbs are boosted.
pub fn direct_jump_scale(distance: f32, dy: f32) -> (f32, f32) {
    let (mut strength, boost) = if distance < 60.0 {
        (0.85, 0.9)
    } else if distance < 80.0 {
        (0.9, 0.95)
    } else {
        (1.0, 1.0)
    };
    if dy > 20.0 {
        strength *= (1.05 + dy / 200.0).min(1.2);
    }
    (strength, boost)
}

fn start_gap_jump(pursuer: &mut Pursuer, width: f32, tuning: &PursuitTuning) {
    let (strength, boost) = gap_jump_scale(width);
    start_jump(pursuer, JumpKind::Gap, strength, boost, tuning);
}

/// Queue a jump and enter Jump. The run-up happens in the Jump state.
fn start_jump(pursuer: &mut Pursuer, kind: JumpKind, strength_scale: f32, boost_scale: f32, tuning: &PursuitTuning) {
    let max_scale = tuning.behavior.max_jump_scale;
    let profile = &pursuer.profile;
    pursuer.jump = Some(JumpPlan {
        kind,
        strength: profile.jump_strength * strength_scale.min(max_scale),
        speed: profile.chase_speed * profile.jump_speed_boost * boost_scale.min(max_scale),
        launched: false,
    });
    pursuer
        .timers
        .set(TimerKind::PreJump, tuning.kinematics.pre_jump_time);
    enter(pursuer, PursuitState::Jump, &tuning.behavior);
}

// =============================================================================
// FLYING
// =============================================================================

fn update_flying(pursuer: &mut Pursuer, target: Option<&Body>, ctx: &PursuitContext, frames: f32) {
    let reach = ctx.reach();
    let behavior = &ctx.tuning.behavior;

    match pursuer.state {
        PursuitState::Patrol => {
            if sense(pursuer, target, &reach, 1.0).is_some() || pursuer.has_memory() {
                enter(pursuer, PursuitState::Chase, behavior);
                return;
            }
            if roll_idle(pursuer, frames) {
                enter(pursuer, PursuitState::Idle, behavior);
                return;
            }
            if patrol_bounds_reached(pursuer) {
                pursuer.facing = -pursuer.facing;
            }
            hover(pursuer);
            pursuer.velocity.x = pursuer.facing * pursuer.profile.patrol_speed;
        }
        PursuitState::Chase => {
            let seen = sense(pursuer, target, &reach, ctx.tuning.reach.chase_range_bonus);
            let goal = match (seen, pursuer.last_known_target) {
                (Some(body), _) => body.center,
                (None, Some(memory)) if pursuer.has_memory() => memory + Vec2::Y * pursuer.size.y / 2.0,
                _ => {
                    forget_target(pursuer);
                    enter(pursuer, PursuitState::Patrol, behavior);
                    return;
                }
            };
            let offset = goal - pursuer.position;
            if seen.is_none() && offset.length() <= behavior.steer_deadband {
                forget_target(pursuer);
                enter(pursuer, PursuitState::Patrol, behavior);
                return;
            }
            pursuer.velocity = offset.normalize_or_zero() * pursuer.profile.chase_speed;
            if offset.x != 0.0 {
                pursuer.facing = offset.x.signum();
            }
        }
        PursuitState::Jump => enter(pursuer, PursuitState::Chase, behavior),
        PursuitState::Recovery | PursuitState::Idle => rest(pursuer, target, ctx),
    }
}

/// Bob between spawn height and spawn + hover height
fn hover(pursuer: &mut Pursuer) {
    let Locomotion::Flying { hover_height } = pursuer.profile.locomotion else {
        return;
    };
    let bob_speed = pursuer.profile.patrol_speed * 0.5;
    if pursuer.position.y >= pursuer.spawn.y + hover_height {
        pursuer.velocity.y = -bob_speed;
    } else if pursuer.position.y <= pursuer.spawn.y || pursuer.velocity.y == 0.0 {
        pursuer.velocity.y = bob_speed;
    }
}
