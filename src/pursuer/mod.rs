//! Pursuer entity state and movement physics

mod components;
pub mod physics;

pub use components::*;
