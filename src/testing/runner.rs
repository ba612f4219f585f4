//! Scenario execution engine
//!
//! Drives a headless App with `PursuitPlugin`, stepping time by hand one
//! reference frame at a time and running `FixedUpdate` directly.

use bevy::prelude::*;
use std::collections::HashMap;
use std::time::Duration;

use crate::ai::{PursuerProfile, PursuerProfileDatabase};
use crate::constants::REFERENCE_FPS;
use crate::plugin::PursuitPlugin;
use crate::pursuer::{BodySize, Pursuer, PursuitState, PursuitTarget};
use crate::tuning::PursuitTuning;
use crate::world::Collider;

use super::assertions::{AssertionError, CapturedEvent, PursuerState, WorldState, check_sequence, check_state};
use super::parser::{PursuerDef, TestDefinition};

/// Frames simulated when a scenario names no frame count
const DEFAULT_FRAMES: u64 = 60;

/// Result of running a test
#[derive(Debug)]
pub enum TestResult {
    Pass { frames: u64 },
    Fail { error: AssertionError },
    Error { message: String },
}

/// Scenario id attached to every spawned pursuer
#[derive(Component, Clone, Debug)]
pub struct ScenarioId(pub String);

/// Last observed state per pursuer, for transition capture
struct Observed {
    state: PursuitState,
    respawns: u32,
}

/// Run a single scenario and return the result
pub fn run_test(test: &TestDefinition) -> TestResult {
    let mut app = App::new();
    app.add_plugins(PursuitPlugin);
    app.init_resource::<Time>();

    let seed = test.setup.seed.unwrap_or(0);
    for (index, def) in test.setup.platforms.iter().enumerate() {
        if def.width <= 0.0 || def.height <= 0.0 {
            return TestResult::Error {
                message: format!("Platform #{} has a non-positive size", index + 1),
            };
        }
        let center = Vec2::new(def.x + def.width / 2.0, def.y + def.height / 2.0);
        app.world_mut().spawn((
            Transform::from_translation(center.extend(0.0)),
            Collider {
                kind: def.kind.into(),
                size: Vec2::new(def.width, def.height),
            },
        ));
    }

    for (index, def) in test.setup.pursuers.iter().enumerate() {
        let profile = match resolve_profile(app.world().resource::<PursuerProfileDatabase>(), def) {
            Ok(profile) => profile,
            Err(message) => return TestResult::Error { message },
        };
        let spawn = Vec2::new(def.x, def.y);
        let patrol_min_time = app.world().resource::<PursuitTuning>().behavior.patrol_min_time;
        let mut pursuer = Pursuer::new(spawn, profile, seed.wrapping_add(index as u64));
        pursuer.reset(spawn, patrol_min_time);
        pursuer.facing = if def.facing < 0.0 { -1.0 } else { 1.0 };
        app.world_mut().spawn((
            pursuer,
            Transform::from_translation(spawn.extend(0.0)),
            ScenarioId(def.id.clone()),
        ));
    }

    let mut target = test.setup.target.as_ref().map(|def| {
        app.world_mut()
            .spawn((
                PursuitTarget,
                BodySize(Vec2::new(def.width, def.height)),
                Transform::from_xyz(def.x, def.y, 0.0),
            ))
            .id()
    });

    let last_frame = test
        .expect
        .state
        .iter()
        .map(|s| s.after_frame)
        .chain(test.expect.frames)
        .max()
        .unwrap_or(DEFAULT_FRAMES);

    let mut observed: HashMap<String, Observed> = HashMap::new();
    let mut events = Vec::new();
    capture_events(app.world_mut(), 0, &mut observed, &mut events);

    let step = Duration::from_secs_f32(1.0 / REFERENCE_FPS);
    for frame in 1..=last_frame {
        for target_move in test.target_moves.iter().filter(|m| m.frame == frame) {
            let Some(entity) = target else {
                return TestResult::Error {
                    message: format!("Target move at frame {} but no target in setup", frame),
                };
            };
            if target_move.hidden {
                app.world_mut().despawn(entity);
                target = None;
                continue;
            }
            if let Some(mut transform) = app.world_mut().get_mut::<Transform>(entity) {
                if let Some(x) = target_move.x {
                    transform.translation.x = x;
                }
                if let Some(y) = target_move.y {
                    transform.translation.y = y;
                }
            }
        }

        app.world_mut().resource_mut::<Time>().advance_by(step);
        app.world_mut().run_schedule(FixedUpdate);
        capture_events(app.world_mut(), frame, &mut observed, &mut events);

        let due: Vec<_> = test.expect.state.iter().filter(|a| a.after_frame == frame).collect();
        if due.is_empty() {
            continue;
        }
        let world_state = extract_world_state(app.world_mut());
        for assertion in due {
            if let Err(error) = check_state(assertion, &world_state) {
                return TestResult::Fail { error };
            }
        }
    }

    if let Err(error) = check_sequence(&test.expect.sequence, &events) {
        return TestResult::Fail { error };
    }

    TestResult::Pass { frames: last_frame }
}

fn resolve_profile(database: &PursuerProfileDatabase, def: &PursuerDef) -> Result<PursuerProfile, String> {
    match &def.profile {
        None => Ok(PursuerProfile::default()),
        Some(name) => database
            .by_name(name)
            .cloned()
            .ok_or_else(|| format!("Unknown profile '{}' for pursuer '{}'", name, def.id)),
    }
}

/// Record state entries and respawns since the last observation
fn capture_events(
    world: &mut World,
    frame: u64,
    observed: &mut HashMap<String, Observed>,
    events: &mut Vec<CapturedEvent>,
) {
    let mut query = world.query::<(&Pursuer, &ScenarioId)>();
    for (pursuer, id) in query.iter(world) {
        match observed.get_mut(&id.0) {
            None => {
                events.push(CapturedEvent::state_entered(frame, &id.0, pursuer.state));
                observed.insert(
                    id.0.clone(),
                    Observed {
                        state: pursuer.state,
                        respawns: pursuer.respawns,
                    },
                );
            }
            Some(last) => {
                for _ in last.respawns..pursuer.respawns {
                    events.push(CapturedEvent {
                        frame,
                        event_type: "Reset".to_string(),
                        pursuer: id.0.clone(),
                    });
                }
                if last.state != pursuer.state {
                    events.push(CapturedEvent::state_entered(frame, &id.0, pursuer.state));
                }
                last.state = pursuer.state;
                last.respawns = pursuer.respawns;
            }
        }
    }
}

/// Extract world state for assertions
fn extract_world_state(world: &mut World) -> WorldState {
    let mut query = world.query::<(&Pursuer, &ScenarioId)>();
    let pursuers = query
        .iter(world)
        .map(|(pursuer, id)| (id.0.clone(), PursuerState::from(pursuer)))
        .collect();
    WorldState { pursuers }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(toml: &str) -> TestResult {
        let def: TestDefinition = toml::from_str(toml).unwrap();
        run_test(&def)
    }

    const FLOOR: &str = r#"
[[setup.platforms]]
x = 0.0
y = -20.0
width = 800.0
height = 20.0
"#;

    #[test]
    fn test_walker_settles_and_chases() {
        let toml = format!(
            r#"
name = "chase"
[setup]
seed = 1
{FLOOR}
[[setup.pursuers]]
id = "walker"
x = 100.0
y = 16.0

[setup.target]
x = 300.0
y = 24.0

[[expect.sequence]]
event = "Patrol"
pursuer = "walker"

[[expect.sequence]]
event = "Chase"
pursuer = "walker"
frame_max = 2

[[expect.state]]
after_frame = 30
checks = ["walker.state = Chase", "walker.x > 150", "walker.grounded = true", "walker.velocity_x > 0"]
"#
        );
        let result = run(&toml);
        assert!(matches!(result, TestResult::Pass { frames: 30 }), "{:?}", result);
    }

    #[test]
    fn test_failing_check_reports_fail() {
        let toml = format!(
            r#"
name = "fail"
[setup]
{FLOOR}
[[setup.pursuers]]
id = "walker"
x = 100.0
y = 16.0

[[expect.state]]
after_frame = 5
checks = ["walker.state = Jump"]
"#
        );
        assert!(matches!(run(&toml), TestResult::Fail { .. }));
    }

    #[test]
    fn test_unknown_profile_is_error() {
        let toml = r#"
name = "bad profile"
[setup]
[[setup.pursuers]]
id = "ghost"
x = 0.0
y = 0.0
profile = "Nobody"

[expect]
"#;
        assert!(matches!(run(toml), TestResult::Error { .. }));
    }

    #[test]
    fn test_fall_past_kill_line_resets() {
        let toml = r#"
name = "kill line"
[setup]
[[setup.pursuers]]
id = "faller"
x = 100.0
y = -900.0

[expect]
frames = 60

[[expect.sequence]]
event = "Reset"
pursuer = "faller"
"#;
        let result = run(toml);
        assert!(matches!(result, TestResult::Pass { .. }), "{:?}", result);
    }
}
