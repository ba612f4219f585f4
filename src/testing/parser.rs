//! TOML scenario file parsing

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::world::ColliderKind;

/// Complete scenario definition from TOML file
#[derive(Debug, Deserialize)]
pub struct TestDefinition {
    pub name: String,
    pub description: Option<String>,
    pub setup: TestSetup,
    /// Scripted target positions, applied from their frame on
    #[serde(default)]
    pub target_moves: Vec<TargetMove>,
    pub expect: TestExpectations,
}

/// Scenario setup: level geometry, pursuers and an optional target
#[derive(Debug, Deserialize)]
pub struct TestSetup {
    pub seed: Option<u64>,
    #[serde(default)]
    pub platforms: Vec<PlatformDef>,
    #[serde(default)]
    pub pursuers: Vec<PursuerDef>,
    pub target: Option<TargetDef>,
}

/// Rectangle from its left/bottom corner and size
#[derive(Debug, Clone, Deserialize)]
pub struct PlatformDef {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub kind: PlatformKindDef,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformKindDef {
    #[default]
    Platform,
    MovingPlatform,
    Door,
    Collectible,
}

impl From<PlatformKindDef> for ColliderKind {
    fn from(kind: PlatformKindDef) -> Self {
        match kind {
            PlatformKindDef::Platform => ColliderKind::Platform,
            PlatformKindDef::MovingPlatform => ColliderKind::MovingPlatform,
            PlatformKindDef::Door => ColliderKind::Door,
            PlatformKindDef::Collectible => ColliderKind::Collectible,
        }
    }
}

/// Pursuer spawn, center position
#[derive(Debug, Clone, Deserialize)]
pub struct PursuerDef {
    pub id: String,
    pub x: f32,
    pub y: f32,
    /// Profile name from the profile database; default profile if absent
    pub profile: Option<String>,
    #[serde(default = "default_facing")]
    pub facing: f32,
}

fn default_facing() -> f32 {
    1.0
}

/// Target body, center position
#[derive(Debug, Clone, Deserialize)]
pub struct TargetDef {
    pub x: f32,
    pub y: f32,
    #[serde(default = "default_target_width")]
    pub width: f32,
    #[serde(default = "default_target_height")]
    pub height: f32,
}

fn default_target_width() -> f32 {
    crate::constants::TARGET_SIZE.x
}

fn default_target_height() -> f32 {
    crate::constants::TARGET_SIZE.y
}

/// Teleport the target at a frame (`hidden` removes it from the world)
#[derive(Debug, Clone, Deserialize)]
pub struct TargetMove {
    pub frame: u64,
    #[serde(default)]
    pub x: Option<f32>,
    #[serde(default)]
    pub y: Option<f32>,
    #[serde(default)]
    pub hidden: bool,
}

/// Expected scenario outcomes
#[derive(Debug, Default, Deserialize)]
pub struct TestExpectations {
    /// Frames to simulate when no state assertion sets a later one
    pub frames: Option<u64>,
    #[serde(default)]
    pub sequence: Vec<ExpectedEvent>,
    /// Multiple state assertions at different frames (uses [[expect.state]] TOML syntax)
    #[serde(default)]
    pub state: Vec<StateAssertion>,
}

/// Expected state entry in sequence
#[derive(Debug, Deserialize)]
pub struct ExpectedEvent {
    pub event: String,
    pub pursuer: Option<String>,
    pub frame_min: Option<u64>,
    pub frame_max: Option<u64>,
}

/// State assertion after simulation
#[derive(Debug, Clone, Deserialize)]
pub struct StateAssertion {
    pub after_frame: u64,
    #[serde(default)]
    pub checks: Vec<String>,
}

/// Parse a scenario file from path
pub fn parse_test_file(path: &Path) -> Result<TestDefinition, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    toml::from_str(&content).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let toml = r#"
name = "Test"
[setup]
seed = 3

[[setup.platforms]]
x = 0.0
y = -20.0
width = 100.0
height = 20.0

[[setup.platforms]]
x = 20.0
y = 0.0
width = 30.0
height = 60.0
kind = "door"

[[setup.pursuers]]
id = "walker"
x = 50.0
y = 16.0

[setup.target]
x = 300.0
y = 24.0

[[target_moves]]
frame = 30
hidden = true

[expect]
frames = 90

[[expect.sequence]]
event = "Chase"
pursuer = "walker"
frame_max = 5

[[expect.state]]
after_frame = 10
checks = ["walker.state = Chase"]
"#;
        let def: TestDefinition = toml::from_str(toml).unwrap();
        assert_eq!(def.name, "Test");
        assert_eq!(def.setup.platforms.len(), 2);
        assert!(matches!(def.setup.platforms[1].kind, PlatformKindDef::Door));
        assert_eq!(def.setup.pursuers[0].facing, 1.0);
        assert_eq!(def.setup.target.as_ref().map(|t| t.height), Some(48.0));
        assert!(def.target_moves[0].hidden);
        assert_eq!(def.expect.frames, Some(90));
        assert_eq!(def.expect.sequence[0].frame_max, Some(5));
    }

    #[test]
    fn test_missing_file_is_error() {
        let err = parse_test_file(Path::new("tests/scenarios/nope.toml")).unwrap_err();
        assert!(err.contains("nope.toml"));
    }
}
