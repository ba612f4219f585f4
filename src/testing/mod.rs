//! Scenario testing for deterministic pursuit behaviour
//!
//! Scenarios describe a level, some pursuers and an optional target in TOML,
//! then assert on state transitions and on pursuer state at given frames.

pub mod assertions;
pub mod parser;
pub mod runner;

pub use assertions::{AssertionError, CapturedEvent, check_sequence, check_state};
pub use parser::{
    ExpectedEvent, PlatformDef, PursuerDef, StateAssertion, TargetDef, TargetMove, TestDefinition,
    TestExpectations, TestSetup,
};
pub use runner::{ScenarioId, TestResult, run_test};

/// Default path for test scenarios
pub const SCENARIOS_DIR: &str = "tests/scenarios";
