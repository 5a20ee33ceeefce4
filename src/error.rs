// error.rs - Error taxonomy for the simulation core

use std::error::Error;
use std::fmt;

/// Everything that can go wrong while building or steering a simulation.
///
/// Only `LatticeSize` and `InvalidConfig` are fatal; the parameter variants are
/// returned by the controller after it has left the state untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
    /// Side length below the supported minimum of 2.
    LatticeSize(usize),
    Parse {
        name: &'static str,
        input: String,
    },
    InvalidConfig(String),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidParameter { name, value, reason } => {
                write!(f, "invalid {name} ({value}): {reason}")
            }
            SimError::LatticeSize(l) => write!(
                f,
                "lattice side length must be at least 2, got {l}"
            ),
            SimError::Parse { name, input } => {
                write!(f, "cannot parse {name} from {input:?}")
            }
            SimError::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl Error for SimError {}
