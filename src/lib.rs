//! Pursuit - platformer pursuer AI built on Bevy
//!
//! Pursuers patrol, spot a target, chase it across platforms (walking,
//! jumping gaps, following waypoints) and fall back to patrol when it is
//! lost. The decision core is plain functions over a platform snapshot;
//! `PursuitPlugin` wires it into an App.

// Core modules
pub mod constants;
pub mod geometry;
pub mod helpers;
pub mod testing;
pub mod tuning;

// Pursuit modules
pub mod ai;
pub mod plugin;
pub mod pursuer;
pub mod world;

// Re-export commonly used types for convenience
pub use ai::{
    EdgeType, GapScan, Locomotion, NavEdge, NavGraph, NavNode, PursuerProfile,
    PursuerProfileDatabase, PursuitContext, Reachability, Route, TimerKind, TimerTable, find_path,
    plan_route, update,
};
pub use constants::*;
pub use geometry::Body;
pub use helpers::*;
pub use plugin::PursuitPlugin;
pub use pursuer::{BodySize, JumpKind, JumpPlan, Pursuer, PursuitState, PursuitTarget};
pub use tuning::{BehaviorTuning, KinematicsTuning, NavTuning, PursuitTuning, ReachTuning, WorldBounds};
pub use world::{Collider, ColliderKind, PlatformRect, PlatformSnapshot};
