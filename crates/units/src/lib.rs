//! Physical units used by the tidal-disruption debris simulator.
//!
//! Simulation units are G = 1, lengths in AU, masses in M☉ and time in yr/2π.
//! Each newtype keeps a fixed base unit and converts on the way in and out.

pub mod length;
pub mod mass;
pub mod specific_energy;
pub mod time;
pub mod velocity;


pub use length::Length;
pub use mass::{Mass, SOLAR_MASS_G};
pub use specific_energy::SpecificEnergy;
pub use time::Time;
pub use velocity::Velocity;
