//! Differential mass–energy (dM/dE) distributions of tidal debris.
//!
//! Each hydrodynamic disruption run is tabulated for one penetration factor β.
//! [`DmdeTable`] turns one table into an inverse cumulative distribution;
//! [`DmdeDistribution`] blends the two tables nearest to a requested β and
//! samples it into a per-event energy spectrum for the fragments.
//!
//! ```
//! use dmde::{DmdeDistribution, DmdeTable};
//!
//! let energies: Vec<f64> = (0..100).map(|i| 1.0e17 * (1.0 - i as f64 / 100.0)).collect();
//! let densities = vec![1.0; 100];
//!
//! let tables = vec![
//!     DmdeTable::from_samples(0.5, 1.0, &energies, &densities).unwrap(),
//!     DmdeTable::from_samples(1.5, 1.0, &energies, &densities).unwrap(),
//! ];
//! let dist = DmdeDistribution::from_tables(tables).unwrap();
//!
//! let spread = dist.energy_spread(0.9, 8).unwrap();
//! assert_eq!(spread.len(), 7);
//! ```

pub mod distribution;
pub mod error;
pub mod interpolate;
pub mod table;

#[cfg(test)]
mod interpolate_test;

pub use distribution::{BetaBlend, DmdeDistribution};
pub use error::{DmdeError, Result};
pub use interpolate::LinearInterpolant;
pub use table::{DmdeTable, COARSEN_STEP};
