//! Tidal disruption debris in the galactic center.
//!
//! Stars are disrupted one after another by the central black hole. Each
//! disruption injects a fan of massless fragments whose energies follow the
//! dM/dE spectrum for the star's penetration factor; the fragments are then
//! followed through the black hole and galactic potential and their
//! positions recorded at log-spaced output times.
//!
//! ```no_run
//! use disruption::{SimulationConfig, TidalSimulation};
//! use dmde::DmdeDistribution;
//!
//! let tables = DmdeDistribution::from_dir("data/dmde").unwrap();
//! let config = SimulationConfig { n_stars: 10, n_fragments: 20, ..Default::default() };
//!
//! let mut sim = TidalSimulation::new(config, &tables).unwrap();
//! let summary = sim.run().unwrap();
//! println!("{} stars, {} escapes", summary.stars_disrupted, summary.escapes);
//!
//! let paths = sim.trajectories().export();
//! ```

pub mod config;
pub mod error;
pub mod fragment_index;
pub mod simulation;
pub mod star;
pub mod trajectory;

#[cfg(test)]
mod config_test;
#[cfg(test)]
mod trajectory_test;

pub use config::SimulationConfig;
pub use error::{Result, SimulationError};
pub use fragment_index::{FragmentId, FragmentIndex, Location};
pub use simulation::{RunPhase, RunSummary, TidalSimulation};
pub use star::{DisruptedStar, Disruption};
pub use trajectory::{FragmentTrack, TrajectoryExport, TrajectoryRecord};
