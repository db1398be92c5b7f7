use crate::length::{AU_TO_CM, AU_TO_KM};
use crate::time::{NATURAL_UNITS_PER_YEAR, SECONDS_PER_YEAR};
use serde::{Deserialize, Serialize};

// Convert between AU/year and cm/sec
pub const AU_YEAR_TO_CM_SEC: f64 = AU_TO_CM / SECONDS_PER_YEAR;
// Convert between AU/year and km/sec
pub const AU_YEAR_TO_KM_SEC: f64 = AU_TO_KM / SECONDS_PER_YEAR;

/// One simulation velocity unit, AU/(yr/2π), expressed in cm/s (≈ 29.78 km/s)
pub const NATURAL_VELOCITY_CM_SEC: f64 = AU_YEAR_TO_CM_SEC * NATURAL_UNITS_PER_YEAR;

/// A velocity quantity with AU/year as the base unit.
///
/// Simulation velocities are AU per natural time unit (yr/2π); use
/// [`Velocity::to_natural`] when handing values to the integrator.
///
/// # Examples
///
/// ```rust
/// use units::Velocity;
///
/// // Earth's orbital speed is about one natural velocity unit
/// let earth = Velocity::from_km_per_sec(29.78);
/// assert!((earth.to_natural() - 1.0).abs() < 1e-3);
///
/// // The bound-debris threshold
/// let bound = Velocity::from_km_per_sec(500.0);
/// assert!(bound.to_natural() > 16.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Velocity(f64); // Base unit: AU/year

impl Velocity {
    pub fn from_au_per_year(value: f64) -> Self {
        Self(value)
    }

    pub fn from_cm_per_sec(value: f64) -> Self {
        Self(value / AU_YEAR_TO_CM_SEC)
    }

    pub fn from_km_per_sec(value: f64) -> Self {
        Self(value / AU_YEAR_TO_KM_SEC)
    }

    /// Creates a velocity from simulation units, AU/(yr/2π)
    pub fn from_natural(value: f64) -> Self {
        Self(value * NATURAL_UNITS_PER_YEAR)
    }

    pub fn to_au_per_year(&self) -> f64 {
        self.0
    }

    pub fn to_cm_per_sec(&self) -> f64 {
        self.0 * AU_YEAR_TO_CM_SEC
    }

    pub fn to_km_per_sec(&self) -> f64 {
        self.0 * AU_YEAR_TO_KM_SEC
    }

    /// Converts to simulation units, AU/(yr/2π)
    pub fn to_natural(&self) -> f64 {
        self.0 / NATURAL_UNITS_PER_YEAR
    }
}
