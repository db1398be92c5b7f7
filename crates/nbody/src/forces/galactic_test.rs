use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};
use units::length::{KILOPARSEC_TO_AU, PARSEC_TO_AU};

use crate::forces::galactic::{ExtensionTerm, GalacticConstants, GalacticPotential};
use crate::forces::ForceModel;
use crate::particle::Particle;
use crate::state::SystemState;

fn system_at(position: Point3<f64>) -> SystemState {
    let mut system = SystemState::new();
    system.add_particle(Particle::at_rest(4.0e6));
    system.n_active = 1;
    system.add_particle(Particle::test_particle(position, Vector3::zeros()));
    system
}

#[test]
fn test_default_constants() {
    let c = GalacticConstants::default();

    assert_eq!(c.m_hole, 4.0e6);
    assert_eq!(c.m_bulge, 3.76e9);
    assert_eq!(c.m_disk, 6.0e10);
    assert_eq!(c.m_halo, 1.0e12);
    assert_eq!(c.r_halo, 4.125e9);
    assert_eq!(c.a_b, 2.0e7);
    assert_eq!(c.a_d, 5.7e8);
    assert_eq!(c.b_d, 6.2e7);
    assert_relative_eq!(c.r_c, 206_264.806, epsilon = 1e-3);
    assert_eq!(c.sf1, 1.0e8);
    assert_eq!(c.sf2, 1.0e4);
}

#[test]
fn test_halo_off_inside_ten_cluster_radii() {
    let c = GalacticConstants::default();

    let r = 9.9 * c.r_c;
    assert_eq!(c.halo_force(r, r), 0.0);
    assert_eq!(c.halo_force(r, -r), 0.0);

    let r = 10.0 * c.r_c;
    assert!(c.halo_force(r, r) < 0.0);
}

#[test]
fn test_forces_oppose_positive_coordinate() {
    let c = GalacticConstants::default();

    for r in [1.0e3, 10.0 * PARSEC_TO_AU, KILOPARSEC_TO_AU, 15.0 * KILOPARSEC_TO_AU] {
        let coord = r / 3.0_f64.sqrt();
        let rho2 = 2.0 * coord * coord;
        let z_bd = (coord * coord + c.b_d * c.b_d).sqrt();

        let bulge = c.bulge_force(r, coord);
        let disk = c.disk_force(r, coord, rho2, z_bd);
        assert!(bulge.is_finite() && bulge < 0.0, "bulge at r = {r}");
        assert!(disk.is_finite() && disk < 0.0, "disk at r = {r}");
        assert!(c.halo_force(r, coord) <= 0.0);
    }
}

#[test]
fn test_bulge_matches_hernquist_profile() {
    let c = GalacticConstants::default();
    let r = 1.0e8;

    // Along an axis the acceleration is M / (r (r + a))
    let radial = -c.bulge_force(r, r);
    assert_relative_eq!(radial, c.m_bulge / (r * (c.a_b + r)), max_relative = 1e-12);
}

#[test]
fn test_cluster_force_is_noop() {
    let c = GalacticConstants::default();

    assert_eq!(c.cluster_force(1.0, 1.0), 0.0);
    assert_eq!(c.cluster_force(1.0e9, -3.0e8), 0.0);
}

#[test]
fn test_smoothing_func_is_a_step() {
    let c = GalacticConstants::default();

    assert_relative_eq!(c.smoothing_func(c.sf1), 0.5);
    assert!(c.smoothing_func(c.sf1 - 100.0 * c.sf2) < 0.01);
    assert!(c.smoothing_func(c.sf1 + 100.0 * c.sf2) > 0.99);
    assert!(c.smoothing_func(2.0e8) > c.smoothing_func(5.0e7));
}

#[test]
fn test_potential_skips_central_body() {
    let mut system = system_at(Point3::new(1.0e8, 2.0e7, -3.0e7));

    GalacticPotential::new(GalacticConstants::default()).accumulate(&mut system);

    assert_eq!(system.particles[0].acceleration, Vector3::zeros());
    let a = system.particles[1].acceleration;
    assert!(a.x < 0.0);
    assert!(a.y < 0.0);
    assert!(a.z > 0.0);
}

#[test]
fn test_potential_sums_terms_per_axis() {
    let c = GalacticConstants::default();
    let (x, y, z) = (3.0e8, -1.0e8, 5.0e7);
    let mut system = system_at(Point3::new(x, y, z));

    GalacticPotential::new(c).accumulate(&mut system);

    let rho2 = x * x + y * y;
    let r = (rho2 + z * z).sqrt();
    let z_bd = (z * z + c.b_d * c.b_d).sqrt();
    let expected_x = c.bulge_force(r, x) + c.disk_force(r, x, rho2, z_bd) + c.halo_force(r, x);

    assert_relative_eq!(
        system.particles[1].acceleration.x,
        expected_x,
        max_relative = 1e-12
    );
}

#[test]
fn test_potential_accumulates() {
    let mut fresh = system_at(Point3::new(1.0e8, 0.0, 0.0));
    let mut preloaded = fresh.clone();
    preloaded.particles[1].acceleration = Vector3::new(1.0, 1.0, 1.0);

    let potential = GalacticPotential::new(GalacticConstants::default());
    potential.accumulate(&mut fresh);
    potential.accumulate(&mut preloaded);

    let diff = preloaded.particles[1].acceleration - fresh.particles[1].acceleration;
    assert_relative_eq!(diff.x, 1.0, max_relative = 1e-6);
    assert_relative_eq!(diff.y, 1.0);
    assert_relative_eq!(diff.z, 1.0);
}

struct ConstantPush(f64);

impl ExtensionTerm for ConstantPush {
    fn force(&self, _constants: &GalacticConstants, _r: f64, _coord: f64) -> f64 {
        self.0
    }
}

#[test]
fn test_extension_term_is_added() {
    let mut plain = system_at(Point3::new(0.0, 2.0e8, 0.0));
    let mut extended = plain.clone();

    GalacticPotential::new(GalacticConstants::default()).accumulate(&mut plain);
    GalacticPotential::new(GalacticConstants::default())
        .with_extension(ConstantPush(2.0))
        .accumulate(&mut extended);

    let diff = extended.particles[1].acceleration - plain.particles[1].acceleration;
    assert_relative_eq!(diff.x, 2.0);
    assert_relative_eq!(diff.z, 2.0);
}

#[test]
fn test_constants_deserialize_with_defaults() {
    let c: GalacticConstants = serde_json::from_str(r#"{ "m_hole": 1.0e6 }"#).unwrap();

    assert_eq!(c.m_hole, 1.0e6);
    assert_eq!(c.m_disk, GalacticConstants::default().m_disk);
}
