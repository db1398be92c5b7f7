use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

pub const SECONDS_PER_YEAR: f64 = 31_557_600.0; // 365.25 days per year

/// Simulation time units per year.
///
/// With G = 1, lengths in AU and masses in M☉, the natural time unit is
/// yr/2π, so one year spans 2π simulation time units.
pub const NATURAL_UNITS_PER_YEAR: f64 = TAU;

/// A physical time quantity using f64 precision.
///
/// The `Time` struct represents time with years as the base unit.
/// Use [`Time::to_natural`] for the value the integrator works with.
///
/// # Examples
///
/// ```rust
/// use units::Time;
///
/// // The default horizon: one million years
/// let horizon = Time::from_years(1.0e6);
/// assert!((horizon.to_natural() - 1.0e6 * std::f64::consts::TAU).abs() < 1e-6);
///
/// let interval = Time::from_natural(1.0e4 * std::f64::consts::TAU);
/// assert!((interval.to_years() - 1.0e4).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Time(f64); // Base unit: Years

impl Time {
    /// Creates a new `Time` from a value in years.
    pub fn from_years(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `Time` from a value in seconds.
    pub fn from_seconds(value: f64) -> Self {
        Self(value / SECONDS_PER_YEAR)
    }

    /// Creates a new `Time` from simulation time units (yr/2π).
    pub fn from_natural(value: f64) -> Self {
        Self(value / NATURAL_UNITS_PER_YEAR)
    }

    /// Returns the time in years.
    pub fn to_years(&self) -> f64 {
        self.0
    }

    /// Converts the time to seconds.
    pub fn to_seconds(&self) -> f64 {
        self.0 * SECONDS_PER_YEAR
    }

    /// Converts the time to simulation time units (yr/2π).
    pub fn to_natural(&self) -> f64 {
        self.0 * NATURAL_UNITS_PER_YEAR
    }
}

