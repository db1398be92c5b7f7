//! A disrupted star and the initial conditions of its debris.

use std::f64::consts::TAU;

use dmde::DmdeDistribution;
use nalgebra::{Point3, Vector3};
use nbody::Particle;
use rand::Rng;
use rand_chacha::ChaChaRng;
use serde::{Deserialize, Serialize};
use stellar::sampling::{sample_mass_kroupa, sample_penetration_factor, sample_sphere_direction};
use stellar::{MainSequenceStar, SupermassiveBlackHole};
use units::{Length, Mass, SpecificEnergy};

use crate::config::SimulationConfig;
use crate::error::Result;

/// Attributes of one disruption, fixed once the star is disrupted
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisruptedStar {
    pub mass: Mass,
    pub radius: Length,
    pub tidal_radius: Length,
    /// Squared escape speed at the tidal radius, 2 M_h / r_t
    pub orbital_term: f64,
    pub beta: f64,
    /// Simulation time of the disruption
    pub time: f64,
}

/// A disrupted star together with its fragments, innermost first
#[derive(Debug, Clone)]
pub struct Disruption {
    pub star: DisruptedStar,
    pub fragments: Vec<Particle>,
}

/// Scale from the tabulated energies of a 1 M☉, 1 R☉ star around a 10⁶ M☉
/// hole to this star and hole
///
/// ε ∝ (R★/R☉)⁻¹ (M★/M☉)^(2/3) (M_h/10⁶ M☉)^(1/3)
pub fn energy_scale(star: &MainSequenceStar, m_hole: f64) -> f64 {
    star.radius.to_solar_radii().recip()
        * star.mass.to_solar_masses().powf(2.0 / 3.0)
        * (m_hole / 1.0e6).powf(1.0 / 3.0)
}

/// Unit vector orthogonal to `star_vec`, rotated about it by `phi`
///
/// Builds a unit vector tilted away from the star vector, crosses the star
/// vector with it and normalizes the result. Every `phi` gives a different
/// direction in the plane perpendicular to `star_vec`.
pub fn velocity_direction(star_vec: &Vector3<f64>, phi: f64) -> Vector3<f64> {
    let (x, y, z) = (star_vec.x, star_vec.y, star_vec.z);
    let r = star_vec.magnitude();
    let (sin_phi, cos_phi) = phi.sin_cos();
    let denom = r * r * (2.0 - 2.0 * z / r).sqrt();

    let tilted = Vector3::new(
        (x * (r - z + z * cos_phi) - r * y * sin_phi) / denom,
        (y * (r - z + z * cos_phi) + r * x * sin_phi) / denom,
        ((r - z) * z - (x * x + y * y) * cos_phi) / denom,
    );

    let direction = star_vec.cross(&tilted);
    let norm = direction.magnitude();
    if norm > 0.0 && norm.is_finite() {
        return direction / norm;
    }

    // Star vector along +z makes the construction singular
    let fallback = star_vec.cross(&Vector3::x());
    let rotated = fallback * cos_phi + star_vec.normalize().cross(&fallback) * sin_phi;
    rotated.normalize()
}

/// Draws a star and builds the particles of its debris
///
/// The spectrum holds one energy fewer than there are fragments. The
/// innermost fragment takes the zero-energy point of the distribution and
/// leaves with the local escape speed; the others take the spectrum in
/// order. Physically meaningless draws are not guarded: the configured
/// mass and β ranges must be sensible.
pub fn disrupt(
    rng: &mut ChaChaRng,
    dmde: &DmdeDistribution,
    config: &SimulationConfig,
    time: f64,
) -> Result<Disruption> {
    let m_hole = config.constants.m_hole;
    let hole = SupermassiveBlackHole::new(Mass::from_solar_masses(m_hole));

    let mass = sample_mass_kroupa(rng, config.star_mass_min, config.star_mass_max);
    let star = MainSequenceStar::from_mass(Mass::from_solar_masses(mass));
    let tidal_radius = hole.tidal_radius(&star);
    let orbital_term = hole.escape_speed_squared(tidal_radius);

    let direction = Vector3::from(sample_sphere_direction(rng));
    let r_t = tidal_radius.to_au();
    let star_vec = direction * r_t;

    let beta = sample_penetration_factor(rng, config.beta_min, config.beta_max);
    let n = config.n_fragments;
    let spread = dmde.energy_spread(beta, n)?;

    let scale = energy_scale(&star, m_hole);
    let energies = std::iter::once(0.0).chain(
        spread
            .iter()
            .map(|e| SpecificEnergy::from_cm2_per_s2(scale * e).to_natural()),
    );

    let phi = rng.random_range(0.0..TAU);
    let vel_direction = velocity_direction(&star_vec, phi);
    let r_star = star.radius.to_au();

    let fragments = energies
        .take(n)
        .enumerate()
        .map(|(f, energy)| {
            let speed = (2.0 * energy + orbital_term).sqrt();
            let offset = r_star * (f + 1) as f64 / (n + 1) as f64;
            Particle::test_particle(
                Point3::from(direction * (r_t + offset)),
                vel_direction * speed,
            )
        })
        .collect();

    Ok(Disruption {
        star: DisruptedStar {
            mass: star.mass,
            radius: star.radius,
            tidal_radius,
            orbital_term,
            beta,
            time,
        },
        fragments,
    })
}
