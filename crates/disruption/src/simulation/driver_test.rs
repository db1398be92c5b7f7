use approx::assert_relative_eq;
use dmde::{DmdeDistribution, DmdeTable};

use crate::config::SimulationConfig;
use crate::error::SimulationError;
use crate::fragment_index::FragmentId;
use crate::simulation::{RunPhase, TidalSimulation};

fn distribution() -> DmdeDistribution {
    let energies: Vec<f64> = (0..100).map(|i| 1.0e17 * (1.0 - i as f64 / 100.0)).collect();
    let densities = vec![1.0; 100];
    DmdeDistribution::from_tables(vec![
        DmdeTable::from_samples(0.5, 1.0, &energies, &densities).unwrap(),
        DmdeTable::from_samples(1.5, 1.0, &energies, &densities).unwrap(),
    ])
    .unwrap()
}

fn config(n_fragments: usize) -> SimulationConfig {
    SimulationConfig {
        n_fragments,
        n_outputs: 6,
        max_time: 1.0e-4,
        seed: 17,
        ..SimulationConfig::default()
    }
}

#[test]
fn new_simulation_holds_only_the_central_mass() {
    let dmde = distribution();
    let sim = TidalSimulation::new(config(5), &dmde).unwrap();

    assert_eq!(sim.phase(), RunPhase::Init);
    assert_eq!(sim.sfindices(), &[0]);
    assert_eq!(sim.state().particle_count(), 1);
    assert_eq!(sim.state().n_active, 1);
    assert_eq!(sim.state().particles[0].mass, 4.0e6);
    assert_eq!(sim.time(), 0.0);
}

#[test]
fn invalid_config_is_rejected() {
    let dmde = distribution();
    let result = TidalSimulation::new(SimulationConfig { n_outputs: 0, ..config(5) }, &dmde);
    assert!(matches!(result, Err(SimulationError::Config(_))));
}

#[test]
fn star_disrupt_registers_fragments_and_attributes() {
    let dmde = distribution();
    let mut sim = TidalSimulation::new(config(5), &dmde).unwrap();

    assert_eq!(sim.star_disrupt().unwrap(), 0);

    assert_eq!(sim.sfindices(), &[0, 5]);
    assert_eq!(sim.state().particle_count(), 6);
    assert_eq!(sim.stars().len(), 1);
    assert_eq!(sim.trajectories().star_count(), 1);
    assert_eq!(sim.trajectories().active_fragments(0), 5);

    let star = sim.stars()[0];
    assert_eq!(sim.star_masses(), vec![star.mass.to_solar_masses()]);
    assert_eq!(sim.star_radii(), vec![star.radius.to_au()]);
    assert_eq!(sim.tidal_radii(), vec![star.tidal_radius.to_au()]);
    assert_relative_eq!(
        sim.orbital_velocities()[0],
        2.0 * 4.0e6 / star.tidal_radius.to_au(),
        max_relative = 1e-12
    );
}

#[test]
fn fragment_count_can_change_between_disruptions() {
    let dmde = distribution();
    let mut sim = TidalSimulation::new(config(5), &dmde).unwrap();

    sim.star_disrupt().unwrap();
    sim.set_n_fragments(3);
    assert_eq!(sim.star_disrupt().unwrap(), 1);

    assert_eq!(sim.sfindices(), &[0, 5, 8]);
    assert_eq!(sim.state().particle_count(), 9);
    assert_eq!(sim.config().n_fragments, 3);
}

#[test]
fn remove_particle_updates_every_structure() {
    let dmde = distribution();
    let mut sim = TidalSimulation::new(config(5), &dmde).unwrap();
    sim.star_disrupt().unwrap();
    let moved = sim.state().particles[4].position;

    let id = sim.remove_particle(3).unwrap();

    assert_eq!(id, FragmentId { star: 0, fragment: 2 });
    assert_eq!(sim.sfindices(), &[0, 4]);
    assert_eq!(sim.state().particle_count(), 5);
    assert_eq!(sim.state().particles[3].position, moved);
    assert_eq!(sim.trajectories().active_fragments(0), 4);
    assert_eq!(sim.trajectories().track(id).unwrap().retired_at, Some(0.0));
}

#[test]
fn failed_removal_leaves_state_unchanged() {
    let dmde = distribution();
    let mut sim = TidalSimulation::new(config(4), &dmde).unwrap();
    sim.star_disrupt().unwrap();

    for particle in [0, 5, 40] {
        let result = sim.remove_particle(particle);
        assert!(matches!(result, Err(SimulationError::InvariantViolation(_))));
        assert_eq!(sim.sfindices(), &[0, 4]);
        assert_eq!(sim.state().particle_count(), 5);
        assert_eq!(sim.trajectories().active_fragments(0), 4);
    }
}

#[test]
fn innermost_fragment_is_bound_at_launch() {
    let dmde = distribution();
    let mut sim = TidalSimulation::new(config(5), &dmde).unwrap();
    sim.star_disrupt().unwrap();

    let removed = sim.remove_first_bound().unwrap();

    assert_eq!(removed, Some(FragmentId { star: 0, fragment: 0 }));
    assert_eq!(sim.sfindices(), &[0, 4]);
    // The others leave with positive energy
    assert_eq!(sim.remove_first_bound().unwrap(), None);
}

#[test]
fn step_to_current_time_prunes_and_records() {
    let dmde = distribution();
    let mut sim = TidalSimulation::new(config(5), &dmde).unwrap();
    sim.star_disrupt().unwrap();

    sim.step_to(0.0).unwrap();

    assert_eq!(sim.time(), 0.0);
    assert_eq!(sim.sfindices(), &[0, 4]);
    assert_eq!(sim.summary().outputs, 1);
    assert_eq!(sim.summary().bound_removals, 1);

    let recorded = sim.trajectories().tracks(0);
    assert!(recorded[0].is_empty() && !recorded[0].is_active());
    assert!(recorded[1..].iter().all(|t| t.len() == 1));
}

#[test]
fn step_removes_one_bound_fragment_even_when_several_qualify() {
    let dmde = distribution();
    let mut sim = TidalSimulation::new(config(5), &dmde).unwrap();
    sim.star_disrupt().unwrap();

    // Particles 3 and 4 join the innermost fragment at zero energy
    let escape_speed = sim.stars()[0].orbital_term.sqrt();
    for p in [3, 4] {
        let particle = sim.particle_mut(p).unwrap();
        particle.velocity = particle.velocity.normalize() * escape_speed;
    }
    let slow = [
        sim.fragment_index().id_of(3).unwrap(),
        sim.fragment_index().id_of(4).unwrap(),
    ];

    sim.step_to(sim.time()).unwrap();

    assert_eq!(sim.summary().bound_removals, 1);
    assert_eq!(sim.sfindices(), &[0, 4]);
    let removed = FragmentId { star: 0, fragment: 0 };
    assert_eq!(sim.fragment_index().particle_of(removed), None);
    for id in slow {
        assert!(sim.fragment_index().particle_of(id).is_some());
        let track = sim.trajectories().track(id).unwrap();
        assert!(track.is_active());
        assert_eq!(track.len(), 1);
    }

    // The next check picks up the earliest of the remaining ones
    assert_eq!(sim.remove_first_bound().unwrap(), Some(slow[0]));
}

#[test]
fn recorded_positions_are_in_kiloparsecs() {
    let dmde = distribution();
    let mut sim = TidalSimulation::new(config(3), &dmde).unwrap();
    sim.star_disrupt().unwrap();
    let au = sim.state().particles[2].position;

    sim.record_fragment_positions().unwrap();

    let track = sim
        .trajectories()
        .track(FragmentId { star: 0, fragment: 1 })
        .unwrap();
    assert_relative_eq!(track.x[0], units::Length::from_au(au.x).to_kiloparsecs(), max_relative = 1e-12);
    assert_relative_eq!(track.z[0], units::Length::from_au(au.z).to_kiloparsecs(), max_relative = 1e-12);
}

#[test]
fn run_walks_all_phases_once() {
    let dmde = distribution();
    let mut sim = TidalSimulation::new(config(4), &dmde).unwrap();

    let summary = sim.run().unwrap();

    assert_eq!(sim.phase(), RunPhase::Done);
    assert_eq!(summary.stars_disrupted, 1);
    assert_eq!(summary.outputs, 6);
    assert_eq!(summary.final_time, 1.0e-4);
    assert_eq!(summary.final_particle_count, sim.state().particle_count());
    assert!(summary.integrator_steps > 0);
    assert!(summary.bound_removals >= 1);

    assert!(matches!(sim.run(), Err(SimulationError::Config(_))));
}
