//! Assertion checking for scenario expectations

use std::collections::HashMap;

use super::parser::{ExpectedEvent, StateAssertion};
use crate::pursuer::{Pursuer, PursuitState};

/// Error when an assertion fails
#[derive(Debug, Clone)]
pub struct AssertionError {
    pub message: String,
    pub expected: String,
    pub actual: String,
}

impl std::fmt::Display for AssertionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n    Expected: {}\n    Actual: {}", self.message, self.expected, self.actual)
    }
}

/// Captured event with timing info. Events are state entries ("Chase", "Jump", ...)
/// plus "Reset" when a pursuer falls past the kill line.
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub frame: u64,
    pub event_type: String,
    pub pursuer: String,
}

impl CapturedEvent {
    pub fn state_entered(frame: u64, pursuer: &str, state: PursuitState) -> Self {
        Self {
            frame,
            event_type: format!("{:?}", state),
            pursuer: pursuer.to_string(),
        }
    }
}

/// Check if captured events match expected sequence
pub fn check_sequence(expected: &[ExpectedEvent], captured: &[CapturedEvent]) -> Result<(), AssertionError> {
    let mut captured_idx = 0;

    for (i, exp) in expected.iter().enumerate() {
        let found = captured[captured_idx..].iter().enumerate().find(|(_, cap)| {
            cap.event_type == exp.event && exp.pursuer.as_ref().is_none_or(|p| *p == cap.pursuer)
        });

        match found {
            Some((offset, cap)) => {
                if let Some(min) = exp.frame_min
                    && cap.frame < min
                {
                    return Err(AssertionError {
                        message: format!("Event #{} '{}' occurred too early", i + 1, exp.event),
                        expected: format!("frame >= {}", min),
                        actual: format!("frame {}", cap.frame),
                    });
                }
                if let Some(max) = exp.frame_max
                    && cap.frame > max
                {
                    return Err(AssertionError {
                        message: format!("Event #{} '{}' occurred too late", i + 1, exp.event),
                        expected: format!("frame <= {}", max),
                        actual: format!("frame {}", cap.frame),
                    });
                }
                captured_idx += offset + 1;
            }
            None => {
                let pursuer_str = exp
                    .pursuer
                    .as_ref()
                    .map(|p| format!(" (pursuer: {})", p))
                    .unwrap_or_default();
                return Err(AssertionError {
                    message: format!("Event #{} '{}'{} not found", i + 1, exp.event, pursuer_str),
                    expected: format!("'{}' event in sequence", exp.event),
                    actual: format!(
                        "events after position {}: {:?}",
                        captured_idx,
                        captured[captured_idx..]
                            .iter()
                            .map(|e| format!("{}@{}:{}", e.pursuer, e.frame, e.event_type))
                            .collect::<Vec<_>>()
                    ),
                });
            }
        }
    }

    Ok(())
}

/// World state for assertions
#[derive(Default)]
pub struct WorldState {
    pub pursuers: HashMap<String, PursuerState>,
}

pub struct PursuerState {
    pub x: f32,
    pub y: f32,
    pub velocity_x: f32,
    pub velocity_y: f32,
    pub state: PursuitState,
    pub grounded: bool,
    pub facing: f32,
}

impl From<&Pursuer> for PursuerState {
    fn from(pursuer: &Pursuer) -> Self {
        Self {
            x: pursuer.position.x,
            y: pursuer.position.y,
            velocity_x: pursuer.velocity.x,
            velocity_y: pursuer.velocity.y,
            state: pursuer.state,
            grounded: pursuer.grounded,
            facing: pursuer.facing,
        }
    }
}

/// Parse a check string into (path, operator, value)
fn parse_check(check: &str) -> Option<(&str, &str, &str)> {
    // >= before >, etc.
    for op in &[">=", "<=", "!=", "=", ">", "<"] {
        if let Some(idx) = check.find(op) {
            let path = check[..idx].trim();
            let value = check[idx + op.len()..].trim();
            return Some((path, op, value));
        }
    }
    None
}

/// Check state assertions against world state
pub fn check_state(assertion: &StateAssertion, state: &WorldState) -> Result<(), AssertionError> {
    for check in &assertion.checks {
        let (path, operator, expected_value) = parse_check(check).ok_or_else(|| AssertionError {
            message: format!("Invalid check syntax: {}", check),
            expected: "format: 'pursuer.property = value' or 'pursuer.property > value'".to_string(),
            actual: check.clone(),
        })?;

        let Some((pursuer_id, property)) = path.split_once('.') else {
            return Err(AssertionError {
                message: format!("Invalid check path: {}", path),
                expected: "pursuer.property".to_string(),
                actual: path.to_string(),
            });
        };

        let pursuer = state.pursuers.get(pursuer_id).ok_or_else(|| AssertionError {
            message: format!("Pursuer '{}' not found", pursuer_id),
            expected: format!("pursuer '{}'", pursuer_id),
            actual: format!("available: {:?}", state.pursuers.keys().collect::<Vec<_>>()),
        })?;

        match property {
            "x" => check_float_comparison(path, pursuer.x, operator, expected_value)?,
            "y" => check_float_comparison(path, pursuer.y, operator, expected_value)?,
            "velocity_x" => check_float_comparison(path, pursuer.velocity_x, operator, expected_value)?,
            "velocity_y" => check_float_comparison(path, pursuer.velocity_y, operator, expected_value)?,
            "facing" => check_float_comparison(path, pursuer.facing, operator, expected_value)?,
            "state" => {
                let expected = expected_value.trim_matches('"');
                let actual = format!("{:?}", pursuer.state);
                let pass = match operator {
                    "!=" => actual != expected,
                    _ => actual == expected,
                };
                if !pass {
                    return Err(AssertionError {
                        message: format!("Check failed: {}", check),
                        expected: format!("{} {}", operator, expected),
                        actual,
                    });
                }
            }
            "grounded" => {
                let expected = expected_value == "true";
                if pursuer.grounded != expected {
                    return Err(AssertionError {
                        message: format!("Check failed: {}", check),
                        expected: expected_value.to_string(),
                        actual: pursuer.grounded.to_string(),
                    });
                }
            }
            other => {
                return Err(AssertionError {
                    message: format!("Unknown property '{}'", other),
                    expected: "x, y, velocity_x, velocity_y, facing, state or grounded".to_string(),
                    actual: other.to_string(),
                });
            }
        }
    }

    Ok(())
}

/// Check float comparison with operator
fn check_float_comparison(path: &str, actual: f32, operator: &str, expected_str: &str) -> Result<(), AssertionError> {
    let value: f32 = expected_str.trim().parse().map_err(|_| AssertionError {
        message: format!("Invalid value for {}", path),
        expected: "number".to_string(),
        actual: expected_str.to_string(),
    })?;

    let pass = match operator {
        ">=" => actual >= value,
        "<=" => actual <= value,
        ">" => actual > value,
        "<" => actual < value,
        "!=" => (actual - value).abs() >= 0.1,
        _ => (actual - value).abs() < 0.1,
    };

    if !pass {
        return Err(AssertionError {
            message: format!("Check failed: {} {} {} (actual: {:.1})", path, operator, expected_str, actual),
            expected: format!("{} {} {}", path, operator, value),
            actual: format!("{:.1}", actual),
        });
    }

    Ok(())
}
