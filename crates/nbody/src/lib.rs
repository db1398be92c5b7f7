//! Test-particle integration around a central mass.
//!
//! Provides the particle state, the `ForceModel` seam with the galactic
//! background potential, an adaptive Runge–Kutta integrator and a
//! [`Simulation`] driver that advances to exact output times and reports
//! particles leaving the domain.
//!
//! Units are G = 1, AU, M☉ and yr/2π throughout.

pub mod error;
pub mod forces;
pub mod integrator;
pub mod particle;
pub mod simulation;
pub mod state;

#[cfg(test)]
mod state_test;

pub use error::{IntegrationError, Result};
pub use integrator::{DormandPrince, Integrator, StepOutcome};
pub use particle::Particle;
pub use simulation::Simulation;
pub use state::SystemState;
