#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use std::fs;

use circuit_evo::SimulationConfig;
use circuit_evo::simulation::error::SimulationError;

#[test]
fn test_default_config_is_valid() {
    let config = SimulationConfig::default();

    assert!(config.validate().is_ok());
    assert!(config.lifespan > config.target_time);
    assert_eq!(config.fitness.time_exponent, 0.25);
    assert_eq!(config.fitness.reach_bonus, 4.0);
    assert_eq!(config.selection.pool_scale, 100.0);
}

#[test]
fn test_invalid_configs_are_rejected() {
    let base = SimulationConfig::default();
    let invalid = [
        SimulationConfig {
            population_size: 0,
            ..base.clone()
        },
        SimulationConfig {
            population_size: 20_000,
            ..base.clone()
        },
        SimulationConfig {
            mutation_percent: 100.5,
            ..base.clone()
        },
        SimulationConfig {
            lifespan: 0,
            ..base.clone()
        },
        SimulationConfig {
            target_time: 1,
            ..base.clone()
        },
        SimulationConfig {
            target_time: 400,
            lifespan: 400,
            ..base.clone()
        },
    ];

    for config in invalid {
        assert!(
            matches!(config.validate(), Err(SimulationError::InvalidConfiguration(_))),
            "{config:?} should be rejected"
        );
    }
}

#[test]
fn test_mutation_rate_is_a_fraction() {
    let config = SimulationConfig {
        mutation_percent: 20.0,
        ..SimulationConfig::default()
    };

    assert!((config.mutation_rate() - 0.2).abs() < 1e-6);
}

#[test]
fn test_clamped_lifespan_exceeds_target_time() {
    let config = SimulationConfig {
        target_time: 300,
        lifespan: 120,
        ..SimulationConfig::default()
    }
    .with_clamped_lifespan();

    assert_eq!(config.lifespan, 301);
    assert!(config.validate().is_ok());

    let untouched = SimulationConfig::default().with_clamped_lifespan();
    assert_eq!(untouched, SimulationConfig::default());
}

#[test]
fn test_load_partial_config_from_file() {
    let path = std::env::temp_dir().join(format!("circuit_evo_config_{}.json", std::process::id()));
    fs::write(
        &path,
        r#"{ "population_size": 64, "mutation_percent": 2.5, "fitness": { "reach_bonus": 3.0 } }"#,
    )
    .expect("temp dir is writable");

    let config = SimulationConfig::load_from_file(&path).expect("valid config file");

    assert_eq!(config.population_size, 64);
    assert_eq!(config.mutation_percent, 2.5);
    assert_eq!(config.fitness.reach_bonus, 3.0);
    assert_eq!(config.fitness.time_exponent, 0.25);
    assert_eq!(config.lifespan, SimulationConfig::default().lifespan);

    fs::remove_file(&path).ok();
}

#[test]
fn test_load_reports_malformed_files() {
    let path = std::env::temp_dir().join(format!("circuit_evo_bad_{}.json", std::process::id()));
    fs::write(&path, "{ not json").expect("temp dir is writable");

    assert!(matches!(
        SimulationConfig::load_from_file(&path),
        Err(SimulationError::ConfigFormat(_))
    ));
    fs::remove_file(&path).ok();

    assert!(matches!(
        SimulationConfig::load_from_file(&path),
        Err(SimulationError::ConfigIo(_))
    ));
}
