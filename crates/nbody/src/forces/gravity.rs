//! Direct gravity of the active particles

use crate::forces::{ForceModel, G};
use crate::state::SystemState;
use nalgebra::Vector3;

/// Direct gravitational force of the first `n_active` particles on all others
///
/// Passive particles (index ≥ `n_active`) do not attract anything, so with a
/// single active central body this reduces to a Kepler field. Cost is
/// O(n_active · N).
///
/// # Examples
///
/// ```
/// use nalgebra::{Point3, Vector3};
/// use nbody::forces::{ActiveGravity, ForceModel};
/// use nbody::{Particle, SystemState};
///
/// let mut system = SystemState::new();
/// system.add_particle(Particle::at_rest(4.0e6));
/// system.n_active = 1;
/// system.add_particle(Particle::test_particle(Point3::new(0.0, 2.0, 0.0), Vector3::zeros()));
///
/// ActiveGravity::new().accumulate(&mut system);
///
/// // Pulled toward the hole along -y with GM/r²
/// let a = system.particles[1].acceleration;
/// assert!((a.y + 1.0e6).abs() < 1e-6);
/// ```
pub struct ActiveGravity;

impl ActiveGravity {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ActiveGravity {
    fn default() -> Self {
        Self::new()
    }
}

impl ForceModel for ActiveGravity {
    fn accumulate(&self, state: &mut SystemState) {
        let n_active = state.n_active.min(state.particles.len());

        let accelerations: Vec<Vector3<f64>> = state
            .particles
            .iter()
            .enumerate()
            .map(|(j, body)| {
                state.particles[..n_active]
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != j)
                    .map(|(_, source)| {
                        let dr = source.position - body.position;
                        let r2 = dr.magnitude_squared();
                        let r = r2.sqrt();
                        dr * (G * source.mass / (r2 * r))
                    })
                    .fold(Vector3::zeros(), |acc, a| acc + a)
            })
            .collect();

        state
            .particles
            .iter_mut()
            .zip(accelerations)
            .for_each(|(p, a)| p.acceleration += a);
    }
}
