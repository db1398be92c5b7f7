use nalgebra::{Point3, Vector3};

use crate::error::IntegrationError;
use crate::particle::Particle;
use crate::state::SystemState;

fn fragment(x: f64) -> Particle {
    Particle::test_particle(Point3::new(x, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0))
}

fn make_test_system() -> SystemState {
    let mut system = SystemState::new();
    system.add_particle(Particle::at_rest(4.0e6));
    system.n_active = 1;
    for x in [1.0, 2.0, 3.0] {
        system.add_particle(fragment(x));
    }
    system
}

#[test]
fn test_new_system() {
    let system = SystemState::new();

    assert_eq!(system.time, 0.0);
    assert_eq!(system.n_active, 0);
    assert_eq!(system.particle_count(), 0);
}

#[test]
fn test_add_particle_returns_index() {
    let mut system = SystemState::new();

    assert_eq!(system.add_particle(Particle::at_rest(1.0)), 0);
    assert_eq!(system.add_particle(fragment(1.0)), 1);
    assert_eq!(system.add_particle(fragment(2.0)), 2);
    assert_eq!(system.particle_count(), 3);
}

#[test]
fn test_remove_compacts_later_indices() {
    let mut system = make_test_system();

    let removed = system.remove(2).unwrap();
    assert_eq!(removed.position.x, 2.0);
    assert_eq!(system.particle_count(), 3);

    // The particle at x = 3 moved from index 3 to index 2
    assert_eq!(system.get(2).unwrap().position.x, 3.0);
    assert_eq!(system.n_active, 1);
}

#[test]
fn test_remove_out_of_range() {
    let mut system = make_test_system();

    let result = system.remove(7);
    assert_eq!(
        result,
        Err(IntegrationError::IndexOutOfRange { index: 7, count: 4 })
    );
    assert_eq!(system.particle_count(), 4);
}

#[test]
fn test_remove_active_particle_shrinks_active_count() {
    let mut system = make_test_system();

    system.remove(0).unwrap();
    assert_eq!(system.n_active, 0);
}

#[test]
fn test_get_mut() {
    let mut system = make_test_system();

    if let Some(p) = system.get_mut(1) {
        p.position.x = 10.0;
    }

    assert_eq!(system.get(1).unwrap().position.x, 10.0);
    assert!(system.get(9).is_none());
}

#[test]
fn test_first_beyond() {
    let system = make_test_system();

    assert_eq!(system.first_beyond(1.5), Some(2));
    assert_eq!(system.first_beyond(0.5), Some(1));
    assert_eq!(system.first_beyond(3.0), None);
    assert_eq!(system.max_distance(), 3.0);
}

#[test]
fn test_zero_accelerations() {
    let mut system = make_test_system();
    system.particles[1].acceleration = Vector3::new(1.0, 2.0, 3.0);

    system.zero_accelerations();

    assert!(system
        .particles
        .iter()
        .all(|p| p.acceleration == Vector3::zeros()));
}

#[test]
fn test_system_clone() {
    let mut system1 = make_test_system();
    system1.time = 12.5;

    let system2 = system1.clone();

    assert_eq!(system1.particle_count(), system2.particle_count());
    assert_eq!(system1.time, system2.time);
    assert_eq!(system1.n_active, system2.n_active);
}
