//! Background potential of the Milky Way acting on the debris
//!
//! Bulge (Hernquist), disk (Miyamoto–Nagai) and halo (NFW) terms following
//! Kenyon et al. (2014, ApJ 793, 122), with `a_d` = 2.75 kpc rather than the
//! 2750 kpc misprinted there. All lengths are AU and masses M☉.
//!
//! Each term is a pure function of the radial distance `r` and one Cartesian
//! coordinate, returning that axis' acceleration.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use units::length::PARSEC_TO_AU;

use crate::forces::ForceModel;
use crate::state::SystemState;

/// Masses and scale lengths of the galactic model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalacticConstants {
    /// Central black hole mass
    pub m_hole: f64,
    pub m_bulge: f64,
    pub m_disk: f64,
    pub m_halo: f64,
    /// NFW halo scale radius
    pub r_halo: f64,
    /// Bulge scale length
    pub a_b: f64,
    /// Disk radial scale length
    pub a_d: f64,
    /// Disk vertical scale length
    pub b_d: f64,
    /// Nuclear cluster radius; the halo is switched off inside `10 r_c`
    pub r_c: f64,
    /// Center of the smoothing step
    pub sf1: f64,
    /// Width of the smoothing step
    pub sf2: f64,
}

impl Default for GalacticConstants {
    fn default() -> Self {
        Self {
            m_hole: 4.0e6,
            m_bulge: 3.76e9,
            m_disk: 6.0e10,
            m_halo: 1.0e12,
            r_halo: 4.125e9,
            a_b: 2.0e7,
            a_d: 5.7e8,
            b_d: 6.2e7,
            r_c: PARSEC_TO_AU,
            sf1: 1.0e8,
            sf2: 1.0e4,
        }
    }
}

impl GalacticConstants {
    /// Hernquist bulge: `−M_b·coord / (r²·(a_b + r))`
    pub fn bulge_force(&self, r: f64, coord: f64) -> f64 {
        -self.m_bulge * coord / (r * r * (self.a_b + r))
    }

    /// Miyamoto–Nagai disk
    ///
    /// `rho2` is x² + y² and `z_bd` is √(z² + b_d²).
    pub fn disk_force(&self, _r: f64, coord: f64, rho2: f64, z_bd: f64) -> f64 {
        let s = self.a_d + z_bd;
        -self.m_disk * coord / (rho2 + s * s).powf(1.5)
    }

    /// NFW halo, zero inside ten nuclear-cluster radii
    pub fn halo_force(&self, r: f64, coord: f64) -> f64 {
        if r < 10.0 * self.r_c {
            return 0.0;
        }
        let log_term = (1.0 + r / self.r_halo).ln();
        let r_term = (r + self.r_halo) * r * r;
        -self.m_halo * coord * (log_term / (r * r * r) - 1.0 / r_term)
    }

    /// Nuclear cluster term; currently contributes nothing
    pub fn cluster_force(&self, _r: f64, _coord: f64) -> f64 {
        0.0
    }

    /// Smooth step from 0 to 1 centered on `sf1` with width `sf2`
    ///
    /// Not part of the force sum.
    ///
    /// # Examples
    ///
    /// ```
    /// use nbody::forces::GalacticConstants;
    ///
    /// let c = GalacticConstants::default();
    /// assert!((c.smoothing_func(c.sf1) - 0.5).abs() < 1e-12);
    /// assert!(c.smoothing_func(0.0) < 1e-3);
    /// ```
    pub fn smoothing_func(&self, r: f64) -> f64 {
        ((r - self.sf1) / self.sf2).atan() / PI + 0.5
    }
}

/// An extra per-axis acceleration term added to the galactic sum
///
/// The default implementation is the nuclear cluster term.
pub trait ExtensionTerm: Send + Sync {
    fn force(&self, constants: &GalacticConstants, r: f64, coord: f64) -> f64 {
        constants.cluster_force(r, coord)
    }
}

/// The nuclear star cluster, using the default extension term
#[derive(Debug, Clone, Copy, Default)]
pub struct NuclearCluster;

impl ExtensionTerm for NuclearCluster {}

/// Galactic background acting on every particle except the central body
///
/// # Examples
///
/// ```
/// use nalgebra::{Point3, Vector3};
/// use nbody::forces::{ForceModel, GalacticConstants, GalacticPotential};
/// use nbody::{Particle, SystemState};
///
/// let mut system = SystemState::new();
/// system.add_particle(Particle::at_rest(4.0e6));
/// system.add_particle(Particle::test_particle(Point3::new(1.0e8, 0.0, 0.0), Vector3::zeros()));
///
/// GalacticPotential::new(GalacticConstants::default()).accumulate(&mut system);
///
/// assert_eq!(system.particles[0].acceleration, Vector3::zeros());
/// assert!(system.particles[1].acceleration.x < 0.0);
/// ```
pub struct GalacticPotential {
    constants: GalacticConstants,
    extension: Box<dyn ExtensionTerm>,
}

impl GalacticPotential {
    pub fn new(constants: GalacticConstants) -> Self {
        Self {
            constants,
            extension: Box::new(NuclearCluster),
        }
    }

    /// Replaces the extension term
    pub fn with_extension<E: ExtensionTerm + 'static>(mut self, extension: E) -> Self {
        self.extension = Box::new(extension);
        self
    }

    pub fn constants(&self) -> &GalacticConstants {
        &self.constants
    }

    fn axis(&self, r: f64, coord: f64, rho2: f64, z_bd: f64) -> f64 {
        let c = &self.constants;
        self.extension.force(c, r, coord)
            + c.bulge_force(r, coord)
            + c.disk_force(r, coord, rho2, z_bd)
            + c.halo_force(r, coord)
    }
}

impl ForceModel for GalacticPotential {
    fn accumulate(&self, state: &mut SystemState) {
        let b_d = self.constants.b_d;

        state.particles.iter_mut().skip(1).for_each(|p| {
            let (x, y, z) = (p.position.x, p.position.y, p.position.z);
            let rho2 = x * x + y * y;
            let r = (rho2 + z * z).sqrt();
            let z_bd = (z * z + b_d * b_d).sqrt();

            p.acceleration.x += self.axis(r, x, rho2, z_bd);
            p.acceleration.y += self.axis(r, y, rho2, z_bd);
            p.acceleration.z += self.axis(r, z, rho2, z_bd);
        });
    }
}
