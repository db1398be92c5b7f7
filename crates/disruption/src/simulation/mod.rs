//! Disruption and integration driver.
//!
//! A run moves through `Init → Stepping → Done`. The first star is disrupted
//! at t = 0, then the integrator is advanced to each scheduled output time in
//! turn. After reaching a time the driver, in this order:
//! 1. disrupts another star if the time falls just after a multiple of the
//!    disruption interval and stars remain,
//! 2. removes at most one fragment that is still bound to the hole,
//! 3. records the position of every remaining fragment.
//!
//! Fragments crossing the escape radius interrupt the integration; the first
//! one found beyond the radius is removed and integration resumes towards the
//! same target.

mod driver;
mod schedule;

#[cfg(test)]
mod driver_test;

pub use driver::{RunPhase, RunSummary, TidalSimulation};
pub use schedule::{is_disruption_time, output_times};
