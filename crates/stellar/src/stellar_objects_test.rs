use approx::assert_relative_eq;
use units::{Length, Mass};

use crate::stellar_objects::{main_sequence_radius, MainSequenceStar, SupermassiveBlackHole};

#[test]
fn main_sequence_radius_low_mass_branch() {
    let r = main_sequence_radius(Mass::from_solar_masses(0.5));
    assert_relative_eq!(r.to_solar_radii(), 0.5_f64.powf(0.8), epsilon = 1e-12);
}

#[test]
fn main_sequence_radius_high_mass_branch() {
    let r = main_sequence_radius(Mass::from_solar_masses(4.0));
    assert_relative_eq!(r.to_solar_radii(), 4.0_f64.powf(0.57), epsilon = 1e-12);
}

#[test]
fn main_sequence_radius_increases_with_mass() {
    let masses = [0.1, 0.3, 0.8, 1.0, 2.0, 10.0];
    let radii: Vec<f64> = masses
        .iter()
        .map(|m| main_sequence_radius(Mass::from_solar_masses(*m)).to_au())
        .collect();

    for pair in radii.windows(2) {
        assert!(pair[1] > pair[0], "Radius should grow with mass: {:?}", radii);
    }
}

#[test]
fn tidal_radius_scales_with_cube_root_of_mass_ratio() {
    let hole = SupermassiveBlackHole::new(Mass::from_solar_masses(4.0e6));
    let star = MainSequenceStar::from_mass(Mass::from_solar_masses(0.5));

    let expected = star.radius.to_au() * (4.0e6_f64 / 0.5).powf(1.0 / 3.0);
    assert_relative_eq!(hole.tidal_radius(&star).to_au(), expected, epsilon = 1e-12);

    // Tidal radius lies far outside the star
    assert!(hole.tidal_radius(&star).to_au() > 100.0 * star.radius.to_au());
}

#[test]
fn escape_speed_squared_in_simulation_units() {
    let hole = SupermassiveBlackHole::new(Mass::from_solar_masses(4.0e6));
    assert_relative_eq!(hole.escape_speed_squared(Length::from_au(2.0)), 4.0e6);
}
