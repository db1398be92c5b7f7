use crate::velocity::NATURAL_VELOCITY_CM_SEC;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul};

/// Specific energy (energy per unit mass) with the simulation unit,
/// (AU/(yr/2π))², as the base.
///
/// Tabulated debris energies come in (cm/s)²; this type carries them into the
/// units the integrator uses for `v² = 2e + 2GM/r`.
///
/// # Examples
///
/// ```rust
/// use units::SpecificEnergy;
///
/// // (1 km/s)² in simulation units
/// let e = SpecificEnergy::from_km2_per_s2(1.0);
/// assert!((e.to_km2_per_s2() - 1.0).abs() < 1e-12);
/// assert!(e.to_natural() < 1.2e-3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpecificEnergy(f64); // Base unit: (AU/(yr/2π))²

impl SpecificEnergy {
    pub fn zero() -> Self {
        Self(0.0)
    }

    pub fn from_natural(value: f64) -> Self {
        Self(value)
    }

    pub fn from_cm2_per_s2(value: f64) -> Self {
        Self(value / (NATURAL_VELOCITY_CM_SEC * NATURAL_VELOCITY_CM_SEC))
    }

    pub fn from_km2_per_s2(value: f64) -> Self {
        Self::from_cm2_per_s2(value * 1.0e10)
    }

    pub fn to_natural(&self) -> f64 {
        self.0
    }

    pub fn to_cm2_per_s2(&self) -> f64 {
        self.0 * NATURAL_VELOCITY_CM_SEC * NATURAL_VELOCITY_CM_SEC
    }

    pub fn to_km2_per_s2(&self) -> f64 {
        self.to_cm2_per_s2() / 1.0e10
    }
}

impl Add for SpecificEnergy {
    type Output = SpecificEnergy;

    fn add(self, rhs: SpecificEnergy) -> SpecificEnergy {
        SpecificEnergy(self.0 + rhs.0)
    }
}

impl Mul<f64> for SpecificEnergy {
    type Output = SpecificEnergy;

    fn mul(self, rhs: f64) -> SpecificEnergy {
        SpecificEnergy(self.0 * rhs)
    }
}
