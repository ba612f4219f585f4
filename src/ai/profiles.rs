//! Pursuer profiles - named capability sets
//!
//! Loaded from assets/pursuer_profiles.txt. Each `profile:` line starts a new
//! profile; following `key: value` lines override the defaults.

use bevy::prelude::*;
use std::fs;

use crate::ai::capabilities::{Locomotion, PursuerProfile};
use crate::constants::PURSUER_PROFILES_FILE;

/// Database of pursuer profiles loaded from file
#[derive(Resource)]
pub struct PursuerProfileDatabase {
    profiles: Vec<PursuerProfile>,
}

impl Default for PursuerProfileDatabase {
    fn default() -> Self {
        Self::load_from_file(PURSUER_PROFILES_FILE)
    }
}

impl PursuerProfileDatabase {
    /// Load profiles from file, or a single default profile if missing or empty
    pub fn load_from_file(path: &str) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                warn!("Could not read pursuer profiles file: {}, using defaults", e);
                return Self::fallback();
            }
        };

        let profiles = parse_profiles(&content);
        if profiles.is_empty() {
            warn!("No profiles parsed from {}, using defaults", path);
            return Self::fallback();
        }

        info!("Loaded {} pursuer profiles from {}", profiles.len(), path);
        Self { profiles }
    }

    pub fn from_profiles(profiles: Vec<PursuerProfile>) -> Self {
        if profiles.is_empty() {
            return Self::fallback();
        }
        Self { profiles }
    }

    fn fallback() -> Self {
        Self {
            profiles: vec![PursuerProfile::default()],
        }
    }

    /// Get profile by index, wrapping around if out of bounds
    pub fn get(&self, index: usize) -> &PursuerProfile {
        &self.profiles[index % self.profiles.len()]
    }

    /// Look a profile up by name (case-insensitive)
    pub fn by_name(&self, name: &str) -> Option<&PursuerProfile> {
        self.profiles
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

/// Parse profiles from file content
pub fn parse_profiles(content: &str) -> Vec<PursuerProfile> {
    let mut profiles = Vec::new();
    let mut current: Option<PursuerProfile> = None;

    for line in content.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(name) = line.strip_prefix("profile:") {
            if let Some(p) = current.take() {
                profiles.push(p);
            }
            current = Some(PursuerProfile {
                name: name.trim().to_string(),
                ..default()
            });
            continue;
        }

        let Some(profile) = current.as_mut() else {
            continue;
        };

        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim();

        if key == "locomotion" {
            match value {
                "ground" => profile.locomotion = Locomotion::Ground,
                "flying" => {
                    if !profile.is_flying() {
                        profile.locomotion = Locomotion::Flying { hover_height: 0.0 };
                    }
                }
                other => warn!("Unknown locomotion '{}' in profile {}", other, profile.name),
            }
            continue;
        }

        let Ok(v) = value.parse::<f32>() else {
            warn!("Bad value for {} in profile {}: {}", key, profile.name, value);
            continue;
        };

        match key {
            "chase_speed" => profile.chase_speed = v,
            "patrol_speed" => profile.patrol_speed = v,
            "detection_range" => profile.detection_range = v,
            "jump_strength" => profile.jump_strength = v,
            "jump_speed_boost" => profile.jump_speed_boost = v,
            "jump_cooldown" => profile.jump_cooldown = v,
            "idle_time" => profile.idle_time = v,
            "recovery_time" => profile.recovery_time = v,
            "memory_duration" => profile.memory_duration = v,
            "idle_probability" => profile.idle_probability = v,
            "patrol_distance" => profile.patrol_distance = (v > 0.0).then_some(v),
            "hover_height" => profile.locomotion = Locomotion::Flying { hover_height: v },
            _ => {}
        }
    }

    if let Some(p) = current {
        profiles.push(p);
    }

    profiles
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "
# comment
profile: Walker

profile: Patroller
detection_range: 0
patrol_distance: 200

profile: Bat
locomotion: flying
hover_height: 40
chase_speed: 2.5
";

    #[test]
    fn test_parse_profiles() {
        let profiles = parse_profiles(SAMPLE);
        assert_eq!(profiles.len(), 3);
        assert_eq!(profiles[0], PursuerProfile::default());
        assert_eq!(profiles[1].detection_range, 0.0);
        assert_eq!(profiles[1].patrol_distance, Some(200.0));
        assert_eq!(
            profiles[2].locomotion,
            Locomotion::Flying { hover_height: 40.0 }
        );
        assert_eq!(profiles[2].chase_speed, 2.5);
    }

    #[test]
    fn test_bad_values_keep_defaults() {
        let profiles = parse_profiles("profile: Odd\nchase_speed: fast\nlocomotion: swim\n");
        assert_eq!(profiles[0].chase_speed, 3.0);
        assert_eq!(profiles[0].locomotion, Locomotion::Ground);
    }

    #[test]
    fn test_lookup_and_wrap() {
        let db = PursuerProfileDatabase::from_profiles(parse_profiles(SAMPLE));
        assert_eq!(db.get(4).name, "Patroller");
        assert!(db.by_name("bat").is_some());
        assert!(db.by_name("Ghost").is_none());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let db = PursuerProfileDatabase::load_from_file("assets/nope.txt");
        assert_eq!(db.len(), 1);
        assert_eq!(db.get(0).name, "Walker");
    }
}
