//! Error types for the disruption orchestrator.

use thiserror::Error;

use dmde::DmdeError;
use nbody::IntegrationError;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("distribution error: {0}")]
    Distribution(#[from] DmdeError),

    #[error("integration error: {0}")]
    Integration(#[from] IntegrationError),

    /// The particle index map and the integrator disagree
    #[error("particle bookkeeping is inconsistent: {0}")]
    InvariantViolation(String),

    #[error("escape reported at t = {time:.6e} but no fragment lies beyond {limit:.3e} AU")]
    EscapeWithoutCandidate { time: f64, limit: f64 },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("cannot parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimulationError>;
