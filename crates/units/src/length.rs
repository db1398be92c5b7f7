use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::ops::Mul;

/// AU in centimeters
pub const AU_TO_CM: f64 = 1.495978707e13;
pub const AU_TO_KM: f64 = 1.495978707e8;

/// Parsec in AU (648000/π by the IAU 2015 definition)
pub const PARSEC_TO_AU: f64 = 648_000.0 / PI;
/// Kiloparsec in AU
pub const KILOPARSEC_TO_AU: f64 = 1.0e3 * PARSEC_TO_AU;

/// Solar radius in AU: 1 R☉ = 0.00465047 AU
pub const SOLAR_RADIUS_AU: f64 = 1.0 / 215.032;
/// AU to solar radii
pub const AU_TO_SOLAR_RADIUS: f64 = 1.0 / SOLAR_RADIUS_AU;

/// A physical length quantity using f64 precision.
///
/// The `Length` struct represents length values with astronomical units (AU) as the base unit.
/// AU is also the simulation length unit, so `to_au` is the value handed to the integrator.
///
/// # Examples
///
/// ```rust
/// use units::Length;
///
/// let tidal_radius = Length::from_au(0.5);
/// let star_radius = Length::from_solar_radii(1.0);
/// let escape = Length::from_kiloparsecs(15.0);
///
/// assert!(escape.to_parsecs() > 14_999.0);
/// assert!(star_radius.to_au() < tidal_radius.to_au());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Length(f64); // Base unit: AU

impl Length {
    /// Creates a new `Length` from a value in astronomical units.
    pub fn from_au(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `Length` from a value in solar radii.
    pub fn from_solar_radii(value: f64) -> Self {
        Self(value * SOLAR_RADIUS_AU)
    }

    /// Creates a new `Length` from a value in kilometers.
    pub fn from_km(value: f64) -> Self {
        Self(value / AU_TO_KM)
    }

    /// Creates a new `Length` from a value in parsecs.
    pub fn from_parsecs(value: f64) -> Self {
        Self(value * PARSEC_TO_AU)
    }

    /// Creates a new `Length` from a value in kiloparsecs.
    pub fn from_kiloparsecs(value: f64) -> Self {
        Self(value * KILOPARSEC_TO_AU)
    }

    /// Returns the length in astronomical units.
    pub fn to_au(&self) -> f64 {
        self.0
    }

    /// Converts the length to solar radii.
    pub fn to_solar_radii(&self) -> f64 {
        self.0 * AU_TO_SOLAR_RADIUS
    }

    /// Converts the length to kilometers.
    pub fn to_km(&self) -> f64 {
        self.0 * AU_TO_KM
    }

    /// Converts the length to parsecs.
    pub fn to_parsecs(&self) -> f64 {
        self.0 / PARSEC_TO_AU
    }

    /// Converts the length to kiloparsecs.
    pub fn to_kiloparsecs(&self) -> f64 {
        self.0 / KILOPARSEC_TO_AU
    }
}

impl Mul<f64> for Length {
    type Output = Length;

    fn mul(self, rhs: f64) -> Length {
        Length(self.0 * rhs)
    }
}

