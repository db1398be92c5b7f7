use std::f64::consts::TAU;

use approx::assert_relative_eq;

use crate::config::SimulationConfig;
use crate::error::SimulationError;

#[test]
fn defaults_match_reference_run() {
    let config = SimulationConfig::default();

    assert_eq!(config.n_outputs, 10_000);
    assert_relative_eq!(config.max_time, 1.0e6 * TAU);
    assert_relative_eq!(config.disruption_interval, 1.0e4 * TAU);
    assert_relative_eq!(config.disruption_epsilon(), 0.1 * 1.0e4 * TAU);
    assert_eq!(config.first_output_time, 1.0e-17);
    assert_eq!(config.initial_timestep, 1.0e-15);
    assert_relative_eq!(config.max_time_years(), 1.0e6, max_relative = 1e-12);
    assert!(config.validate().is_ok());
}

#[test]
fn escape_distance_is_fifteen_kiloparsecs() {
    let config = SimulationConfig::default();

    // 15 kpc ≈ 3.094e9 AU
    assert_relative_eq!(config.escape_distance(), 3.0939721e9, max_relative = 1e-6);
}

#[test]
fn bound_velocity_in_simulation_units() {
    let config = SimulationConfig::default();

    // 500 km/s over 29.78 km/s per simulation velocity unit
    assert_relative_eq!(config.bound_velocity(), 16.787, max_relative = 1e-3);
}

#[test]
fn json_overrides_only_named_fields() {
    let config = SimulationConfig::from_json_str(
        r#"{
            "n_stars": 4,
            "n_fragments": 12,
            "seed": 99,
            "constants": { "m_hole": 1.0e6 }
        }"#,
    )
    .unwrap();

    assert_eq!(config.n_stars, 4);
    assert_eq!(config.n_fragments, 12);
    assert_eq!(config.seed, 99);
    assert_eq!(config.constants.m_hole, 1.0e6);
    assert_eq!(config.constants.m_disk, 6.0e10);
    assert_eq!(config.n_outputs, 10_000);
}

#[test]
fn json_round_trip() {
    let config = SimulationConfig {
        n_stars: 7,
        tolerance: 1e-11,
        ..SimulationConfig::default()
    };

    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(SimulationConfig::from_json_str(&json).unwrap(), config);
}

#[test]
fn malformed_json_is_a_parse_error() {
    let result = SimulationConfig::from_json_str("{ n_stars: }");
    assert!(matches!(result, Err(SimulationError::ConfigParse(_))));
}

#[test]
fn invalid_values_are_rejected() {
    let cases = [
        SimulationConfig { n_stars: 0, ..Default::default() },
        SimulationConfig { n_fragments: 0, ..Default::default() },
        SimulationConfig { n_outputs: 1, ..Default::default() },
        SimulationConfig { max_time: 1.0e-20, ..Default::default() },
        SimulationConfig { disruption_interval: 0.0, ..Default::default() },
        SimulationConfig { disruption_epsilon_fraction: 1.5, ..Default::default() },
        SimulationConfig { escape_distance_kpc: -1.0, ..Default::default() },
        SimulationConfig { tolerance: 0.0, ..Default::default() },
        SimulationConfig { star_mass_min: 2.0, star_mass_max: 1.0, ..Default::default() },
        SimulationConfig { beta_min: f64::NAN, ..Default::default() },
    ];

    for config in cases {
        assert!(
            matches!(config.validate(), Err(SimulationError::Config(_))),
            "accepted {config:?}"
        );
    }
}
