//! Run configuration.
//!
//! Times are in simulation units (yr/2π), masses in M☉. Every field has a
//! default, so a JSON document only needs the values it changes.

use std::f64::consts::TAU;

use nbody::forces::GalacticConstants;
use serde::{Deserialize, Serialize};
use units::{Length, Time, Velocity};

use crate::error::{Result, SimulationError};

/// Parameters of one disruption run
///
/// # Examples
///
/// ```
/// use disruption::SimulationConfig;
///
/// let config = SimulationConfig::from_json_str(r#"{ "n_stars": 3, "n_fragments": 20 }"#).unwrap();
/// assert_eq!(config.n_stars, 3);
/// assert_eq!(config.n_outputs, 10_000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Stars disrupted over the whole run
    pub n_stars: usize,
    /// Fragments injected per disruption
    pub n_fragments: usize,
    /// Scheduled output times, including t = 0
    pub n_outputs: usize,
    /// Last output time
    pub max_time: f64,
    /// First non-zero output time; outputs are log-spaced from here
    pub first_output_time: f64,
    /// Time between disruptions
    pub disruption_interval: f64,
    /// Window after each interval multiple, as a fraction of the interval
    pub disruption_epsilon_fraction: f64,
    /// Fragments slower than this at infinity count as bound
    pub bound_velocity_km_s: f64,
    pub escape_distance_kpc: f64,
    pub initial_timestep: f64,
    /// Relative error per integrator step
    pub tolerance: f64,
    pub seed: u64,
    pub star_mass_min: f64,
    pub star_mass_max: f64,
    pub beta_min: f64,
    pub beta_max: f64,
    pub constants: GalacticConstants,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            n_stars: 1,
            n_fragments: 10,
            n_outputs: 10_000,
            max_time: 1.0e6 * TAU,
            first_output_time: 1.0e-17,
            disruption_interval: 1.0e4 * TAU,
            disruption_epsilon_fraction: 0.1,
            bound_velocity_km_s: 500.0,
            escape_distance_kpc: 15.0,
            initial_timestep: 1.0e-15,
            tolerance: 1.0e-9,
            seed: 0,
            star_mass_min: 0.1,
            star_mass_max: 1.0,
            beta_min: 0.6,
            beta_max: 4.0,
            constants: GalacticConstants::default(),
        }
    }
}

impl SimulationConfig {
    /// Parses a JSON document and validates it
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects configurations the run cannot execute
    pub fn validate(&self) -> Result<()> {
        let fail = |msg: &str| Err(SimulationError::Config(msg.to_string()));

        if self.n_stars == 0 {
            return fail("n_stars must be at least 1");
        }
        if self.n_fragments == 0 {
            return fail("n_fragments must be at least 1");
        }
        if self.n_outputs < 2 {
            return fail("n_outputs must be at least 2");
        }
        if !(self.first_output_time > 0.0 && self.max_time > self.first_output_time) {
            return fail("output times must satisfy 0 < first_output_time < max_time");
        }
        if !(self.disruption_interval > 0.0) {
            return fail("disruption_interval must be positive");
        }
        if !(0.0..1.0).contains(&self.disruption_epsilon_fraction) {
            return fail("disruption_epsilon_fraction must lie in [0, 1)");
        }
        if !(self.escape_distance_kpc > 0.0 && self.bound_velocity_km_s >= 0.0) {
            return fail("escape distance must be positive and bound velocity non-negative");
        }
        if !(self.initial_timestep > 0.0 && self.tolerance > 0.0) {
            return fail("initial_timestep and tolerance must be positive");
        }
        if !(self.star_mass_min > 0.0 && self.star_mass_max >= self.star_mass_min) {
            return fail("star mass range must be positive and ordered");
        }
        if !(self.beta_min > 0.0 && self.beta_max >= self.beta_min) {
            return fail("beta range must be positive and ordered");
        }
        if !(self.constants.m_hole > 0.0) {
            return fail("central mass must be positive");
        }
        Ok(())
    }

    /// Escape radius in AU
    pub fn escape_distance(&self) -> f64 {
        Length::from_kiloparsecs(self.escape_distance_kpc).to_au()
    }

    /// Bound-velocity threshold in simulation units
    pub fn bound_velocity(&self) -> f64 {
        Velocity::from_km_per_sec(self.bound_velocity_km_s).to_natural()
    }

    pub fn disruption_epsilon(&self) -> f64 {
        self.disruption_epsilon_fraction * self.disruption_interval
    }

    pub fn max_time_years(&self) -> f64 {
        Time::from_natural(self.max_time).to_years()
    }
}
