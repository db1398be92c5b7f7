//! Single fragment escaping the galactic center
//!
//! Launches one unbound test particle from the tidal radius of a Sun-like
//! star and follows it through the black hole and galactic potential until it
//! leaves a 15 kpc sphere.
//!
//! Run with: cargo run --package nbody --example fragment_escape

use nalgebra::{Point3, Vector3};
use nbody::forces::{GalacticConstants, GalacticPotential};
use nbody::integrator::DormandPrince;
use nbody::{IntegrationError, Particle, Simulation};
use units::{Length, Time, Velocity};

fn main() {
    println!("Fragment escape from the galactic center\n");
    println!("{}", "=".repeat(60));

    let constants = GalacticConstants::default();
    let r_t = Length::from_au(0.47);
    let escape = Length::from_kiloparsecs(15.0);

    // 2000 km/s at infinity on top of the local escape speed
    let v_inf = Velocity::from_km_per_sec(2000.0).to_natural();
    let v_esc2 = 2.0 * constants.m_hole / r_t.to_au();
    let speed = (v_inf * v_inf + v_esc2).sqrt();

    println!("Tidal radius:      {:.3} AU", r_t.to_au());
    println!("Launch speed:      {:.1} AU/(yr/2π)", speed);
    println!("Escape distance:   {:.3e} AU", escape.to_au());

    let mut sim = Simulation::new(DormandPrince::new(1e-10), 1e-15)
        .with_additional_force(GalacticPotential::new(constants))
        .with_exit_max_distance(escape.to_au());
    sim.add_active(Particle::at_rest(constants.m_hole));
    sim.add(Particle::test_particle(
        Point3::new(r_t.to_au(), 0.0, 0.0),
        Vector3::new(speed, 0.0, 0.0),
    ));

    let horizon = Time::from_years(1.0e8).to_natural();
    let n_outputs = 40;
    println!("\n{:>14} {:>14} {:>12}", "t (yr)", "r (kpc)", "v (km/s)");

    for i in 1..=n_outputs {
        let target = horizon * 10f64.powf(-6.0 * (1.0 - i as f64 / n_outputs as f64));
        match sim.integrate(target) {
            Ok(()) => {
                let p = sim.state().particles[1];
                println!(
                    "{:>14.4e} {:>14.4e} {:>12.1}",
                    Time::from_natural(sim.time()).to_years(),
                    Length::from_au(p.distance()).to_kiloparsecs(),
                    Velocity::from_natural(p.speed_squared().sqrt()).to_km_per_sec()
                );
            }
            Err(IntegrationError::Escape { time, distance }) => {
                println!(
                    "\nEscaped after {:.3e} yr at {:.2} kpc ({} steps)",
                    Time::from_natural(time).to_years(),
                    Length::from_au(distance).to_kiloparsecs(),
                    sim.steps()
                );
                return;
            }
            Err(e) => {
                eprintln!("integration failed: {e}");
                return;
            }
        }
    }

    println!("\nStill bound to the galaxy after {:.1e} yr", Time::from_natural(sim.time()).to_years());
}
