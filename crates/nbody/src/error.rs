//! Error types for the integrator service.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum IntegrationError {
    /// A particle moved beyond the configured exit distance.
    ///
    /// Recoverable: the caller removes the offending particle and resumes.
    #[error("particle escaped to {distance:.3e} AU at t = {time:.6e}")]
    Escape { time: f64, distance: f64 },

    #[error("step size underflow at t = {time:.6e} (dt = {dt:.3e})")]
    StepSizeUnderflow { time: f64, dt: f64 },

    #[error("particle index {index} out of range for {count} particles")]
    IndexOutOfRange { index: usize, count: usize },
}

pub type Result<T> = std::result::Result<T, IntegrationError>;
