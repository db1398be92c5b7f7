//! Stellar draws for tidal disruption events.
//!
//! Provides the random draws the disruption orchestrator needs for every new
//! star (mass, penetration factor) and the deterministic relations that follow
//! from them (radius, tidal radius).

pub mod sampling;
pub mod stellar_objects;

#[cfg(test)]
mod stellar_objects_test;

pub use stellar_objects::{main_sequence_radius, MainSequenceStar, SupermassiveBlackHole};
