//! Stellar bodies taking part in a disruption event.
//!
//! A main-sequence star is described by its mass and radius only; the
//! supermassive black hole by its mass. Derived quantities (tidal radius,
//! escape speed) are in simulation units where G = 1.

use serde::{Deserialize, Serialize};
use units::{Length, Mass};

/// Main-sequence star drawn for a disruption
///
/// # Physical Ranges
/// * mass: 0.08-150 solar masses
/// * radius: from the main-sequence mass-radius relation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MainSequenceStar {
    pub mass: Mass,
    pub radius: Length,
}

impl MainSequenceStar {
    /// Creates a star whose radius follows [`main_sequence_radius`]
    ///
    /// # Examples
    ///
    /// ```
    /// use stellar::MainSequenceStar;
    /// use units::Mass;
    ///
    /// let sun = MainSequenceStar::from_mass(Mass::from_solar_masses(1.0));
    /// assert!((sun.radius.to_solar_radii() - 1.0).abs() < 1e-12);
    /// ```
    pub fn from_mass(mass: Mass) -> Self {
        Self {
            mass,
            radius: main_sequence_radius(mass),
        }
    }
}

/// Main-sequence mass-radius relation
///
/// R/R☉ = (M/M☉)^0.8 below one solar mass and (M/M☉)^0.57 above it.
/// Non-positive masses are not guarded; the caller is responsible for
/// drawing physical masses.
pub fn main_sequence_radius(mass: Mass) -> Length {
    let m = mass.to_solar_masses();
    let exponent = if m < 1.0 { 0.8 } else { 0.57 };
    Length::from_solar_radii(m.powf(exponent))
}

/// Supermassive black hole at the centre of the galaxy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupermassiveBlackHole {
    pub mass: Mass,
}

impl SupermassiveBlackHole {
    pub fn new(mass: Mass) -> Self {
        Self { mass }
    }

    /// Tidal radius r_t = R★ (M_h / M★)^(1/3)
    ///
    /// # Examples
    ///
    /// ```
    /// use stellar::{MainSequenceStar, SupermassiveBlackHole};
    /// use units::Mass;
    ///
    /// let hole = SupermassiveBlackHole::new(Mass::from_solar_masses(1.0e6));
    /// let sun = MainSequenceStar::from_mass(Mass::from_solar_masses(1.0));
    ///
    /// // 100 solar radii for a Sun-like star and a 10^6 M☉ hole
    /// let r_t = hole.tidal_radius(&sun);
    /// assert!((r_t.to_solar_radii() - 100.0).abs() < 1e-9);
    /// ```
    pub fn tidal_radius(&self, star: &MainSequenceStar) -> Length {
        star.radius * (self.mass / star.mass).powf(1.0 / 3.0)
    }

    /// Square of the escape speed at distance `r`, 2 M_h / r, in simulation units
    pub fn escape_speed_squared(&self, r: Length) -> f64 {
        2.0 * self.mass.to_solar_masses() / r.to_au()
    }
}
