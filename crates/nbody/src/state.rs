use crate::error::{IntegrationError, Result};
use crate::particle::Particle;
use nalgebra::Vector3;

/// Complete state of a test-particle system at a given time
///
/// Particles are addressed by position in `particles`. The first `n_active`
/// particles source gravity; the rest only feel it. Removing a particle
/// shifts every later index down by one.
#[derive(Debug, Clone, Default)]
pub struct SystemState {
    /// Current simulation time in yr/2π
    pub time: f64,
    pub particles: Vec<Particle>,
    /// Number of leading particles whose gravity acts on the others
    pub n_active: usize,
}

impl SystemState {
    /// Creates an empty system at t = 0
    ///
    /// # Examples
    ///
    /// ```
    /// use nbody::state::SystemState;
    ///
    /// let system = SystemState::new();
    /// assert_eq!(system.particle_count(), 0);
    /// assert_eq!(system.time, 0.0);
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a particle and returns its index
    ///
    /// # Examples
    ///
    /// ```
    /// use nalgebra::{Point3, Vector3};
    /// use nbody::{Particle, SystemState};
    ///
    /// let mut system = SystemState::new();
    /// let hole = system.add_particle(Particle::at_rest(4.0e6));
    /// let fragment = system.add_particle(Particle::test_particle(
    ///     Point3::new(1.0, 0.0, 0.0),
    ///     Vector3::new(0.0, 2000.0, 0.0),
    /// ));
    ///
    /// assert_eq!((hole, fragment), (0, 1));
    /// assert_eq!(system.particle_count(), 2);
    /// ```
    pub fn add_particle(&mut self, particle: Particle) -> usize {
        self.particles.push(particle);
        self.particles.len() - 1
    }

    /// Removes the particle at `index`, compacting later indices down by one
    ///
    /// Removing an active particle also shrinks `n_active`.
    ///
    /// # Errors
    ///
    /// [`IntegrationError::IndexOutOfRange`] if `index` does not exist.
    pub fn remove(&mut self, index: usize) -> Result<Particle> {
        if index >= self.particles.len() {
            return Err(IntegrationError::IndexOutOfRange {
                index,
                count: self.particles.len(),
            });
        }
        if index < self.n_active {
            self.n_active -= 1;
        }
        Ok(self.particles.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Particle> {
        self.particles.get_mut(index)
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Index of the first particle farther than `distance` from the origin
    pub fn first_beyond(&self, distance: f64) -> Option<usize> {
        let limit2 = distance * distance;
        self.particles
            .iter()
            .position(|p| p.distance_squared() > limit2)
    }

    /// Largest distance from the origin over all particles
    pub fn max_distance(&self) -> f64 {
        self.particles
            .iter()
            .map(|p| p.distance())
            .fold(0.0, f64::max)
    }

    /// Clears every acceleration accumulator
    pub fn zero_accelerations(&mut self) {
        self.particles
            .iter_mut()
            .for_each(|p| p.acceleration = Vector3::zeros());
    }
}
