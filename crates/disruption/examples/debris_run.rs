//! Short disruption run
//!
//! Loads dM/dE tables from the directory given as the first argument, or
//! falls back to two flat synthetic tables, disrupts three stars and prints
//! where their surviving debris ended up.
//!
//! Run with: cargo run --package disruption --example debris_run [dmde_dir]

use disruption::{SimulationConfig, TidalSimulation};
use dmde::{DmdeDistribution, DmdeTable};
use units::Time;

fn synthetic_tables() -> DmdeDistribution {
    let energies: Vec<f64> = (0..200).map(|i| 2.0e17 * (1.0 - i as f64 / 200.0)).collect();
    let densities: Vec<f64> = (0..200).map(|i| 1.0 + (i as f64 / 40.0).sin().abs()).collect();
    let tables = [0.6, 1.0, 2.0, 4.0]
        .iter()
        .map(|beta| DmdeTable::from_samples(*beta, 1.0, &energies, &densities))
        .collect::<Result<Vec<_>, _>>()
        .expect("synthetic tables are well formed");
    DmdeDistribution::from_tables(tables).expect("at least one table")
}

fn main() {
    println!("Tidal disruption debris\n");
    println!("{}", "=".repeat(60));

    let dmde = match std::env::args().nth(1) {
        Some(dir) => DmdeDistribution::from_dir(&dir).expect("readable dM/dE directory"),
        None => synthetic_tables(),
    };
    println!("dM/dE tables:      β = {:?}", dmde.betas());

    let config = SimulationConfig {
        n_stars: 3,
        n_fragments: 8,
        n_outputs: 60,
        max_time: Time::from_years(10.0).to_natural(),
        disruption_interval: Time::from_years(1.0).to_natural(),
        disruption_epsilon_fraction: 0.5,
        seed: 42,
        ..SimulationConfig::default()
    };
    println!("Horizon:           {:.1} yr", config.max_time_years());

    let mut sim = TidalSimulation::new(config, &dmde).expect("valid configuration");
    let summary = sim.run().expect("run completes");

    println!("Stars disrupted:   {}", summary.stars_disrupted);
    println!("Bound removals:    {}", summary.bound_removals);
    println!("Escapes:           {}", summary.escapes);
    println!("Integrator steps:  {}", summary.integrator_steps);
    println!("sfindices:         {:?}", sim.sfindices());
    println!("{}", "-".repeat(60));

    for (star, attrs) in sim.stars().iter().enumerate() {
        println!(
            "star {star}: m = {:.3} M☉, β = {:.2}, r_t = {:.3} AU, {} fragments left",
            attrs.mass.to_solar_masses(),
            attrs.beta,
            attrs.tidal_radius.to_au(),
            sim.trajectories().active_fragments(star)
        );
    }

    let export = sim.trajectories().export();
    for (star, xs) in export.x.iter().enumerate() {
        for (f, track) in xs.iter().enumerate() {
            let Some(last) = track.len().checked_sub(1) else {
                continue;
            };
            let (x, y, z) = (track[last], export.y[star][f][last], export.z[star][f][last]);
            let r = (x * x + y * y + z * z).sqrt();
            println!("  group {star} fragment {f}: r = {:.3e} kpc after {} outputs", r, track.len());
        }
    }
}
