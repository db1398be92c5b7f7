//! Main simulation driver.

use dmde::DmdeDistribution;
use nbody::forces::GalacticPotential;
use nbody::{DormandPrince, IntegrationError, Particle, Simulation, SystemState};
use rand::SeedableRng;
use rand_chacha::ChaChaRng;
use serde::{Deserialize, Serialize};
use units::length::KILOPARSEC_TO_AU;

use super::schedule::{is_disruption_time, output_times};
use crate::config::SimulationConfig;
use crate::error::{Result, SimulationError};
use crate::fragment_index::{FragmentId, FragmentIndex};
use crate::star::{disrupt, DisruptedStar};
use crate::trajectory::TrajectoryRecord;

/// Where a run currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Built, nothing disrupted yet
    Init,
    /// Working towards output `step`
    Stepping { step: usize },
    Done,
}

/// Totals reported at the end of a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub stars_disrupted: usize,
    pub bound_removals: usize,
    pub escapes: usize,
    pub outputs: usize,
    /// Particles left in the integrator, central body included
    pub final_particle_count: usize,
    pub final_time: f64,
    pub integrator_steps: usize,
}

/// Repeated tidal disruptions around the central black hole
///
/// Owns the integrator, the particle index map, the trajectory record and
/// the per-star attributes; the dM/dE tables are borrowed.
///
/// # Examples
///
/// ```
/// use disruption::{SimulationConfig, TidalSimulation};
/// use dmde::{DmdeDistribution, DmdeTable};
///
/// let energies: Vec<f64> = (0..100).map(|i| 1.0e17 * (1.0 - i as f64 / 100.0)).collect();
/// let densities = vec![1.0; 100];
/// let dist = DmdeDistribution::from_tables(vec![
///     DmdeTable::from_samples(0.5, 1.0, &energies, &densities).unwrap(),
///     DmdeTable::from_samples(1.5, 1.0, &energies, &densities).unwrap(),
/// ])
/// .unwrap();
///
/// let config = SimulationConfig {
///     n_fragments: 5,
///     n_outputs: 8,
///     max_time: 1.0e-2,
///     ..SimulationConfig::default()
/// };
/// let mut sim = TidalSimulation::new(config, &dist).unwrap();
/// let summary = sim.run().unwrap();
///
/// assert_eq!(summary.stars_disrupted, 1);
/// assert_eq!(summary.final_time, 1.0e-2);
/// ```
pub struct TidalSimulation<'a> {
    config: SimulationConfig,
    dmde: &'a DmdeDistribution,
    rng: ChaChaRng,
    sim: Simulation<DormandPrince>,
    index: FragmentIndex,
    trajectories: TrajectoryRecord,
    stars: Vec<DisruptedStar>,
    phase: RunPhase,
    bound_removals: usize,
    escapes: usize,
    outputs: usize,
}

impl<'a> TidalSimulation<'a> {
    /// Sets up the integrator with the central mass at rest
    pub fn new(config: SimulationConfig, dmde: &'a DmdeDistribution) -> Result<Self> {
        config.validate()?;

        let mut sim = Simulation::new(
            DormandPrince::new(config.tolerance),
            config.initial_timestep,
        )
        .with_additional_force(GalacticPotential::new(config.constants))
        .with_exit_max_distance(config.escape_distance());
        sim.add_active(Particle::at_rest(config.constants.m_hole));

        Ok(Self {
            rng: ChaChaRng::seed_from_u64(config.seed),
            config,
            dmde,
            sim,
            index: FragmentIndex::new(),
            trajectories: TrajectoryRecord::new(),
            stars: Vec::new(),
            phase: RunPhase::Init,
            bound_removals: 0,
            escapes: 0,
            outputs: 0,
        })
    }

    pub fn set_n_stars(&mut self, n_stars: usize) {
        self.config.n_stars = n_stars;
    }

    pub fn set_n_fragments(&mut self, n_fragments: usize) {
        self.config.n_fragments = n_fragments;
    }

    pub fn set_n_outputs(&mut self, n_outputs: usize) {
        self.config.n_outputs = n_outputs;
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn time(&self) -> f64 {
        self.sim.time()
    }

    pub fn state(&self) -> &SystemState {
        self.sim.state()
    }

    /// Mutable access to one integrator particle
    ///
    /// Moving particles is allowed; adding or removing them must go through
    /// [`TidalSimulation::star_disrupt`] and [`TidalSimulation::remove_particle`].
    pub fn particle_mut(&mut self, index: usize) -> Option<&mut Particle> {
        self.sim.particle_mut(index)
    }

    pub fn fragment_index(&self) -> &FragmentIndex {
        &self.index
    }

    /// The boundary sequence of the particle index map
    pub fn sfindices(&self) -> &[usize] {
        self.index.boundaries()
    }

    pub fn trajectories(&self) -> &TrajectoryRecord {
        &self.trajectories
    }

    pub fn stars(&self) -> &[DisruptedStar] {
        &self.stars
    }

    pub fn star_masses(&self) -> Vec<f64> {
        self.stars.iter().map(|s| s.mass.to_solar_masses()).collect()
    }

    /// Stellar radii in AU
    pub fn star_radii(&self) -> Vec<f64> {
        self.stars.iter().map(|s| s.radius.to_au()).collect()
    }

    /// Tidal radii in AU
    pub fn tidal_radii(&self) -> Vec<f64> {
        self.stars.iter().map(|s| s.tidal_radius.to_au()).collect()
    }

    /// The 2 M_h / r_t term of every star
    pub fn orbital_velocities(&self) -> Vec<f64> {
        self.stars.iter().map(|s| s.orbital_term).collect()
    }

    /// Disrupts a new star at the current time and injects its fragments
    ///
    /// Returns the star's disruption number.
    pub fn star_disrupt(&mut self) -> Result<usize> {
        let time = self.sim.time();
        let disruption = disrupt(&mut self.rng, self.dmde, &self.config, time)?;
        let n_fragments = disruption.fragments.len();

        for fragment in disruption.fragments {
            self.sim.add(fragment);
        }
        let star = self.trajectories.add_star(n_fragments);
        self.index.push_star(star, n_fragments)?;
        self.stars.push(disruption.star);

        if self.index.last_particle() + 1 != self.sim.particle_count() {
            return Err(SimulationError::InvariantViolation(format!(
                "index map ends at particle {} but the integrator holds {} particles",
                self.index.last_particle(),
                self.sim.particle_count()
            )));
        }

        log::info!(
            "star {} disrupted at t = {:.6e}: m = {:.3} M☉, β = {:.3}, {} particles",
            star,
            time,
            disruption.star.mass.to_solar_masses(),
            disruption.star.beta,
            self.sim.particle_count()
        );
        log::debug!("sfindices = {:?}", self.index.boundaries());
        Ok(star)
    }

    /// Removes a fragment from the index map, the integrator and the record
    ///
    /// The index map is checked first, so a failed lookup leaves everything
    /// untouched.
    pub fn remove_particle(&mut self, particle: usize) -> Result<FragmentId> {
        let count = self.sim.particle_count();
        if particle >= count {
            return Err(SimulationError::InvariantViolation(format!(
                "particle {particle} does not exist ({count} particles)"
            )));
        }
        self.index.locate(particle)?;

        let id = self.index.remove(particle)?;
        self.sim.remove(particle)?;
        self.trajectories.retire(id, self.sim.time())?;
        Ok(id)
    }

    /// Removes the first fragment beyond the escape radius
    fn remove_escaped(&mut self) -> Result<FragmentId> {
        let limit = self.config.escape_distance();
        let limit2 = limit * limit;
        let candidate = self
            .index
            .iter()
            .map(|(p, _)| p)
            .find(|p| self.sim.state().particles[*p].distance_squared() > limit2);

        let Some(particle) = candidate else {
            return Err(SimulationError::EscapeWithoutCandidate {
                time: self.sim.time(),
                limit,
            });
        };

        let id = self.remove_particle(particle)?;
        self.escapes += 1;
        log::warn!(
            "fragment {:?} escaped at t = {:.6e}, {} particles left",
            id,
            self.sim.time(),
            self.sim.particle_count()
        );
        Ok(id)
    }

    /// Advances exactly to `target`, removing escaped fragments on the way
    pub fn advance_to(&mut self, target: f64) -> Result<()> {
        loop {
            match self.sim.integrate(target) {
                Ok(()) => return Ok(()),
                Err(IntegrationError::Escape { .. }) => {
                    self.remove_escaped()?;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Removes the first fragment whose speed at infinity is below the bound
    /// threshold
    ///
    /// At most one fragment is removed per call.
    pub fn remove_first_bound(&mut self) -> Result<Option<FragmentId>> {
        let bound = self.config.bound_velocity();
        let mut candidate = None;
        for (p, id) in self.index.iter() {
            let star = self.stars.get(id.star).ok_or_else(|| {
                SimulationError::InvariantViolation(format!("no attributes for star {}", id.star))
            })?;
            let v2 = self.sim.state().particles[p].speed_squared();
            let v_inf = (v2 - star.orbital_term).abs().sqrt();
            if v_inf < bound {
                candidate = Some(p);
                break;
            }
        }

        let Some(particle) = candidate else {
            return Ok(None);
        };
        let id = self.remove_particle(particle)?;
        self.bound_removals += 1;
        log::debug!("bound fragment {:?} removed at t = {:.6e}", id, self.sim.time());
        Ok(Some(id))
    }

    /// Appends the position of every fragment, in kpc, to its track
    pub fn record_fragment_positions(&mut self) -> Result<()> {
        let particles = &self.sim.state().particles;
        for (p, id) in self.index.iter() {
            let position = particles[p].position / KILOPARSEC_TO_AU;
            self.trajectories
                .record(id, [position.x, position.y, position.z])?;
        }
        self.outputs += 1;
        Ok(())
    }

    /// One scheduled output: advance, maybe disrupt, prune, record
    pub fn step_to(&mut self, target: f64) -> Result<()> {
        self.advance_to(target)?;

        let time = self.sim.time();
        if is_disruption_time(
            time,
            self.config.disruption_interval,
            self.config.disruption_epsilon(),
        ) && self.stars.len() < self.config.n_stars
        {
            self.star_disrupt()?;
        }

        self.remove_first_bound()?;
        self.record_fragment_positions()
    }

    /// Runs the whole schedule
    ///
    /// # Errors
    ///
    /// A run can only be started once; data, integration and bookkeeping
    /// failures abort it.
    pub fn run(&mut self) -> Result<RunSummary> {
        if self.phase != RunPhase::Init {
            return Err(SimulationError::Config("run already started".to_string()));
        }
        self.config.validate()?;

        self.star_disrupt()?;

        let times = output_times(
            self.config.first_output_time,
            self.config.max_time,
            self.config.n_outputs,
        );
        log::debug!(
            "{} outputs up to t = {:.3e} ({:.3e} yr)",
            times.len(),
            self.config.max_time,
            self.config.max_time_years()
        );

        for (step, target) in times.into_iter().enumerate() {
            self.phase = RunPhase::Stepping { step };
            self.step_to(target)?;
        }
        self.phase = RunPhase::Done;

        let summary = self.summary();
        log::info!(
            "run finished at t = {:.6e}: {} stars, {} bound removals, {} escapes",
            summary.final_time,
            summary.stars_disrupted,
            summary.bound_removals,
            summary.escapes
        );
        Ok(summary)
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            stars_disrupted: self.stars.len(),
            bound_removals: self.bound_removals,
            escapes: self.escapes,
            outputs: self.outputs,
            final_particle_count: self.sim.particle_count(),
            final_time: self.sim.time(),
            integrator_steps: self.sim.steps(),
        }
    }
}
