use nalgebra::{Point3, Vector3};

/// A point mass in simulation units (AU, M☉, AU per yr/2π)
///
/// Fragments are test particles with zero mass; only the central body
/// carries mass. `acceleration` is an accumulator that force models add
/// into during every force evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub mass: f64,
    pub position: Point3<f64>,
    pub velocity: Vector3<f64>,
    pub acceleration: Vector3<f64>,
}

impl Particle {
    pub fn new(mass: f64, position: Point3<f64>, velocity: Vector3<f64>) -> Self {
        Self {
            mass,
            position,
            velocity,
            acceleration: Vector3::zeros(),
        }
    }

    /// A particle resting at the origin, used for the central body
    pub fn at_rest(mass: f64) -> Self {
        Self::new(mass, Point3::origin(), Vector3::zeros())
    }

    /// A massless test particle
    ///
    /// # Examples
    ///
    /// ```
    /// use nalgebra::{Point3, Vector3};
    /// use nbody::Particle;
    ///
    /// let p = Particle::test_particle(Point3::new(3.0, 4.0, 0.0), Vector3::new(0.0, 2.0, 0.0));
    /// assert_eq!(p.mass, 0.0);
    /// assert_eq!(p.distance(), 5.0);
    /// assert_eq!(p.speed_squared(), 4.0);
    /// ```
    pub fn test_particle(position: Point3<f64>, velocity: Vector3<f64>) -> Self {
        Self::new(0.0, position, velocity)
    }

    /// Distance from the origin in AU
    pub fn distance(&self) -> f64 {
        self.position.coords.magnitude()
    }

    pub fn distance_squared(&self) -> f64 {
        self.position.coords.magnitude_squared()
    }

    pub fn speed_squared(&self) -> f64 {
        self.velocity.magnitude_squared()
    }
}
