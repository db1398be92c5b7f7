//! Force models for test-particle integration
//!
//! This module provides the `ForceModel` trait, the gravity of the active
//! particles and the galactic background potential.

use crate::state::SystemState;

pub mod galactic;
pub mod gravity;

#[cfg(test)]
mod galactic_test;

pub use galactic::{ExtensionTerm, GalacticConstants, GalacticPotential, NuclearCluster};
pub use gravity::ActiveGravity;

/// Gravitational constant in AU³ M☉⁻¹ (yr/2π)⁻²
pub const G: f64 = 1.0;

/// A source of acceleration on particles
///
/// Force models add their contribution into each particle's acceleration
/// accumulator; they never overwrite it. Multiple models can be combined with
/// `CompositeForce`.
///
/// # Examples
///
/// ```
/// use nalgebra::{Point3, Vector3};
/// use nbody::forces::{ActiveGravity, ForceModel};
/// use nbody::{Particle, SystemState};
///
/// let mut system = SystemState::new();
/// system.add_particle(Particle::at_rest(1.0));
/// system.n_active = 1;
/// system.add_particle(Particle::test_particle(Point3::new(1.0, 0.0, 0.0), Vector3::zeros()));
///
/// ActiveGravity::new().accumulate(&mut system);
/// assert!(system.particles[1].acceleration.x < 0.0);
/// ```
pub trait ForceModel: Send + Sync {
    /// Add this model's acceleration into every affected particle
    fn accumulate(&self, state: &mut SystemState);
}

/// Combine multiple force models into a single composite force
///
/// Models accumulate in insertion order.
///
/// # Examples
///
/// ```
/// use nbody::forces::{ActiveGravity, CompositeForce, GalacticConstants, GalacticPotential};
///
/// let composite = CompositeForce::new()
///     .with_force(ActiveGravity::new())
///     .with_force(GalacticPotential::new(GalacticConstants::default()));
/// assert_eq!(composite.len(), 2);
/// ```
pub struct CompositeForce {
    models: Vec<Box<dyn ForceModel>>,
}

impl CompositeForce {
    /// Creates an empty composite force
    pub fn new() -> Self {
        Self { models: Vec::new() }
    }

    /// Adds a force model to the composite
    pub fn with_force<F: ForceModel + 'static>(mut self, force: F) -> Self {
        self.models.push(Box::new(force));
        self
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl Default for CompositeForce {
    fn default() -> Self {
        Self::new()
    }
}

impl ForceModel for CompositeForce {
    fn accumulate(&self, state: &mut SystemState) {
        self.models.iter().for_each(|f| f.accumulate(state));
    }
}
