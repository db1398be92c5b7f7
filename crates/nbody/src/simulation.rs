//! Integration driver with exact-finish and escape detection

use crate::error::{IntegrationError, Result};
use crate::forces::{ActiveGravity, CompositeForce, ForceModel};
use crate::integrator::Integrator;
use crate::particle::Particle;
use crate::state::SystemState;

/// Owns a system, its integrator and the forces acting on it
///
/// Gravity of the active particles is always applied; an optional additional
/// force model accumulates after it on every force evaluation.
///
/// # Examples
///
/// ```
/// use nalgebra::{Point3, Vector3};
/// use nbody::integrator::DormandPrince;
/// use nbody::{Particle, Simulation};
///
/// let mut sim = Simulation::new(DormandPrince::new(1e-10), 1e-3);
/// sim.add_active(Particle::at_rest(1.0));
/// sim.add(Particle::test_particle(Point3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0)));
///
/// sim.integrate(std::f64::consts::PI).unwrap();
/// assert_eq!(sim.time(), std::f64::consts::PI);
///
/// // Half a circular orbit later the particle sits at (-1, 0, 0)
/// let p = sim.state().particles[1].position;
/// assert!((p.x + 1.0).abs() < 1e-6);
/// ```
pub struct Simulation<I: Integrator> {
    state: SystemState,
    integrator: I,
    forces: CompositeForce,
    dt: f64,
    exit_max_distance: Option<f64>,
    steps: usize,
}

impl<I: Integrator> Simulation<I> {
    /// Creates an empty simulation with an initial timestep guess `dt`
    pub fn new(integrator: I, dt: f64) -> Self {
        Self {
            state: SystemState::new(),
            integrator,
            forces: CompositeForce::new().with_force(ActiveGravity::new()),
            dt,
            exit_max_distance: None,
            steps: 0,
        }
    }

    /// Adds a force model evaluated after the active gravity
    pub fn with_additional_force<F: ForceModel + 'static>(mut self, force: F) -> Self {
        self.forces = self.forces.with_force(force);
        self
    }

    /// Distance from the origin beyond which [`IntegrationError::Escape`] is raised
    pub fn with_exit_max_distance(mut self, distance: f64) -> Self {
        self.exit_max_distance = Some(distance);
        self
    }

    pub fn exit_max_distance(&self) -> Option<f64> {
        self.exit_max_distance
    }

    /// Adds a particle whose gravity acts on all others
    ///
    /// Active particles must all be added before any passive one.
    pub fn add_active(&mut self, particle: Particle) -> usize {
        let index = self.state.add_particle(particle);
        self.state.n_active = self.state.particle_count();
        index
    }

    /// Adds a passive particle and returns its index
    pub fn add(&mut self, particle: Particle) -> usize {
        self.state.add_particle(particle)
    }

    /// Removes the particle at `index`; later indices shift down by one
    pub fn remove(&mut self, index: usize) -> Result<Particle> {
        self.state.remove(index)
    }

    pub fn state(&self) -> &SystemState {
        &self.state
    }

    pub fn particle_mut(&mut self, index: usize) -> Option<&mut Particle> {
        self.state.get_mut(index)
    }

    pub fn time(&self) -> f64 {
        self.state.time
    }

    pub fn particle_count(&self) -> usize {
        self.state.particle_count()
    }

    /// Current timestep guess
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Number of accepted steps so far
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Advances until the simulation time equals `target`
    ///
    /// The last step is clipped so the run lands exactly on `target`; a
    /// target at or before the current time does nothing.
    ///
    /// # Errors
    ///
    /// [`IntegrationError::Escape`] once any particle ends an accepted step
    /// beyond the exit distance. The state stays at that step, so the caller
    /// can remove the particle and call `integrate` again with the same
    /// target.
    pub fn integrate(&mut self, target: f64) -> Result<()> {
        while self.state.time < target {
            let remaining = target - self.state.time;
            let clipped = self.dt >= remaining;
            let request = if clipped { remaining } else { self.dt };

            let outcome = self.integrator.step(&mut self.state, request, &self.forces)?;
            self.steps += 1;

            let landed = clipped && outcome.dt_taken == request;
            if landed {
                self.state.time = target;
                // A clipped step says nothing about how large steps may grow
                self.dt = self.dt.max(outcome.dt_next);
            } else {
                self.dt = outcome.dt_next;
            }

            if let Some(limit) = self.exit_max_distance {
                if self.state.first_beyond(limit).is_some() {
                    let distance = self.state.max_distance();
                    log::debug!(
                        "particle beyond {:.3e} AU at t = {:.6e} (r = {:.3e} AU)",
                        limit,
                        self.state.time,
                        distance
                    );
                    return Err(IntegrationError::Escape {
                        time: self.state.time,
                        distance,
                    });
                }
            }
        }
        Ok(())
    }
}
