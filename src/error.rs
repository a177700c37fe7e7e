//! Simulation error types.
//!
//! The tick itself never fails: gameplay no-ops are silent guards. Errors only
//! come from malformed configuration, caught before the first level starts so
//! bad values never reach the physics math.

use std::fmt;

/// Errors raised while building a simulation
#[derive(Debug)]
pub enum SimError {
    /// A numeric setting is outside its usable range.
    InvalidSetting {
        /// Config field name (dotted path for nested tables).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the accepted range.
        expected: &'static str,
    },

    /// A collection the simulation draws from is empty.
    EmptyCollection {
        /// Config field name.
        name: &'static str,
    },

    /// Config text could not be parsed.
    Parse(serde_json::Error),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidSetting {
                name,
                value,
                expected,
            } => write!(
                f,
                "invalid setting '{}': got {}, expected {}",
                name, value, expected
            ),
            SimError::EmptyCollection { name } => {
                write!(f, "'{}' must contain at least one entry", name)
            }
            SimError::Parse(err) => write!(f, "failed to parse config: {}", err),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SimError {
    fn from(err: serde_json::Error) -> Self {
        SimError::Parse(err)
    }
}
