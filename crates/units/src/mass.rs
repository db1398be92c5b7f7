use serde::{Deserialize, Serialize};
use std::ops::Div;

/// Mass of the Sun in grams (1.98847 × 10³³ g)
pub const SOLAR_MASS_G: f64 = 1.98847e33;

/// A physical mass quantity using f64 precision.
///
/// The `Mass` struct represents mass values with solar masses as the base unit,
/// which is also the simulation mass unit (G = 1 with AU and yr/2π).
///
/// # Examples
///
/// ```rust
/// use units::Mass;
///
/// let hole = Mass::from_solar_masses(4.0e6);
/// let star = Mass::from_grams(1.98847e33);
///
/// assert_eq!(hole.to_solar_masses(), 4.0e6);
/// assert!((star.to_solar_masses() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Mass(f64); // Base unit: Solar Masses

impl Mass {
    /// Creates a new `Mass` from a value in solar masses.
    pub fn from_solar_masses(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `Mass` from a value in grams.
    pub fn from_grams(value: f64) -> Self {
        Self(value / SOLAR_MASS_G)
    }

    /// Returns the mass in solar masses.
    pub fn to_solar_masses(&self) -> f64 {
        self.0
    }

    /// Converts the mass to grams.
    pub fn to_grams(&self) -> f64 {
        self.0 * SOLAR_MASS_G
    }

    /// Power function (dimensionless result)
    pub fn powf(&self, n: f64) -> f64 {
        self.0.powf(n)
    }
}

/// Mass ratio
impl Div for Mass {
    type Output = f64;

    fn div(self, rhs: Mass) -> f64 {
        self.0 / rhs.0
    }
}

