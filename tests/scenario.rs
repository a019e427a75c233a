use orbital_decay::config::{ConfigError, load_scenarios, select_scenario};
use orbital_decay::config::SimulationConfig;
use orbital_decay::decay::{DEFAULT_MAX_STEPS, TerminalState};
use orbital_decay::scenario::{export_run, request_from_config, run_scenario};

#[test]
fn yaml_catalog_contains_reference_scenarios() {
    let scenarios = load_scenarios("configs/scenarios.yaml").expect("scenarios yaml");
    assert!(scenarios.len() >= 3);
    let circular = scenarios.iter().find(|s| s.name == "circular-150").unwrap();
    assert_eq!(circular.orbit.apogee_km, 150.0);
    assert_eq!(circular.spacecraft.mass_kg, 1_000.0);
    // Omitted simulation blocks fall back to defaults.
    let elliptical = scenarios
        .iter()
        .find(|s| s.name == "elliptical-1000x150")
        .unwrap();
    assert_eq!(elliptical.simulation.time_step_s, 60.0);
    assert_eq!(elliptical.simulation.max_steps, Some(DEFAULT_MAX_STEPS));
}

#[test]
fn toml_directory_is_loaded_in_file_order() {
    let scenarios = load_scenarios("configs/scenarios").expect("scenario directory");
    let names: Vec<_> = scenarios.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["iss-like", "low-cubesat"]);
    assert_eq!(scenarios[0].simulation.max_steps, Some(20_000));
    assert_eq!(scenarios[1].orbit.inclination_deg, 0.0);
}

#[test]
fn default_simulation_settings_bound_the_run() {
    let defaults = SimulationConfig::default();
    assert_eq!(defaults.time_step_s, 60.0);
    assert_eq!(defaults.max_steps, Some(DEFAULT_MAX_STEPS));
}

#[test]
fn scenario_selection_is_case_insensitive() {
    let scenario = select_scenario("configs/scenarios.yaml", Some("CUBESAT-300X200")).unwrap();
    assert_eq!(scenario.spacecraft.name, "3U CubeSat");
    let first = select_scenario("configs/scenarios.yaml", None).unwrap();
    assert_eq!(first.name, "circular-150");
    assert!(matches!(
        select_scenario("configs/scenarios.yaml", Some("missing")),
        Err(ConfigError::NotFound(_))
    ));
}

#[test]
fn scenario_config_maps_onto_the_request() {
    let scenario = select_scenario("configs/scenarios", Some("iss-like")).unwrap();
    let request = request_from_config(&scenario);
    assert_eq!(request.apogee_km, 420.0);
    assert_eq!(request.perigee_km, 410.0);
    assert_eq!(request.spacecraft.area_m2, 1_600.0);
    assert_eq!(request.time_step_s, 600.0);
    assert_eq!(request.max_steps, Some(20_000));
}

#[test]
fn scenario_run_exports_csv_and_summary() {
    let scenario = select_scenario("configs/scenarios.yaml", Some("circular-150")).unwrap();
    let outcome = run_scenario(&scenario).expect("scenario run");
    assert_eq!(outcome.terminal, TerminalState::DegenerateOrbit);

    let dir = tempfile::tempdir().expect("tempdir");
    let csv_path = dir.path().join("runs").join("circular.csv");
    let summary_path = export_run(&scenario, &outcome, &csv_path)
        .expect("export")
        .expect("summary path");

    let mut reader = csv::Reader::from_path(&csv_path).expect("csv reader");
    let headers = reader.headers().expect("headers").clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        [
            "time_s",
            "drag_acceleration_km_s2",
            "speed_km_s",
            "apogee_km",
            "perigee_km"
        ]
    );
    let rows = reader.records().count() as u64;
    assert_eq!(rows, outcome.steps);

    let summary = std::fs::read_to_string(&summary_path).expect("summary json");
    assert!(summary.contains("\"scenario\": \"circular-150\""));
    assert!(summary.contains("\"telemetry_available\": true"));
    assert!(summary_path.ends_with("circular_summary.json"));
}
