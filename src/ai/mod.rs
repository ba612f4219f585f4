//! AI module - pursuit decisions, reachability and waypoint navigation

pub mod capabilities;
mod decision;
pub mod navigation;
pub mod pathfinding;
mod profiles;
pub mod reachability;
pub mod timers;

pub use capabilities::{Locomotion, PursuerProfile};
pub use decision::*;
pub use navigation::{EdgeSide, EdgeType, NavEdge, NavGraph, NavNode};
pub use pathfinding::{Route, find_path, find_path_nodes, plan_route};
pub use profiles::*;
pub use reachability::{Gap, GapScan, Reachability};
pub use timers::{TimerKind, TimerTable};
