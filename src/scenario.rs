//! Scenario glue: configuration in, decay outcome and artifacts out.

use std::io;
use std::path::{Path, PathBuf};

use decay_config::{ConfigError, ScenarioConfig};
use decay_export::summary::{self, Summary};
use decay_export::telemetry::{self, Record};
use decay_integrator::{DecayError, DecayOutcome, DecayRequest, SpacecraftParams, simulate};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("simulation failed: {0}")]
    Decay(#[from] DecayError),
    #[error("export failed: {0}")]
    Io(#[from] io::Error),
}

/// Translate a scenario configuration into an integrator request.
pub fn request_from_config(config: &ScenarioConfig) -> DecayRequest {
    let spacecraft = SpacecraftParams {
        mass_kg: config.spacecraft.mass_kg,
        drag_coefficient: config.spacecraft.drag_coefficient,
        area_m2: config.spacecraft.area_m2,
    };
    let mut request = DecayRequest::new(
        config.orbit.apogee_km,
        config.orbit.perigee_km,
        config.orbit.inclination_deg,
        spacecraft,
        config.simulation.time_step_s,
    );
    request.max_telemetry_samples = config.simulation.max_telemetry_samples;
    request.max_steps = config.simulation.max_steps;
    request
}

/// Run the scenario against the 1976 standard atmosphere.
pub fn run_scenario(config: &ScenarioConfig) -> Result<DecayOutcome, ScenarioError> {
    let outcome = simulate(&request_from_config(config))?;
    info!(
        scenario = %config.name,
        elapsed_days = outcome.elapsed_days(),
        terminal = outcome.terminal.describe(),
        "scenario complete"
    );
    Ok(outcome)
}

/// Telemetry rows in export form; empty when telemetry was dropped.
pub fn telemetry_records(outcome: &DecayOutcome) -> Vec<Record> {
    outcome
        .telemetry
        .iter()
        .flatten()
        .map(|sample| Record {
            time_s: sample.time_s,
            drag_acceleration_km_s2: sample.drag_acceleration_km_s2,
            speed_km_s: sample.speed_km_s,
            apogee_km: sample.apogee_km,
            perigee_km: sample.perigee_km,
        })
        .collect()
}

/// Write the telemetry CSV to `output` (or stdout for `-`) and, for file
/// outputs, a JSON summary beside it. Returns the summary path if written.
pub fn export_run(
    config: &ScenarioConfig,
    outcome: &DecayOutcome,
    output: &Path,
) -> Result<Option<PathBuf>, ScenarioError> {
    let records = telemetry_records(outcome);
    let mut writer = telemetry::writer_for_path(output)?;
    telemetry::write_all(writer.as_mut(), &records)?;

    if output == Path::new("-") {
        return Ok(None);
    }

    let samples: Vec<summary::Sample> = outcome
        .telemetry
        .iter()
        .flatten()
        .map(|sample| summary::Sample {
            time_s: sample.time_s,
            apogee_km: sample.apogee_km,
            perigee_km: sample.perigee_km,
            speed_km_s: sample.speed_km_s,
        })
        .collect();
    let run_summary = Summary {
        scenario: &config.name,
        spacecraft: &config.spacecraft.name,
        terminal_state: outcome.terminal.describe(),
        initial_apogee_km: config.orbit.apogee_km,
        initial_perigee_km: config.orbit.perigee_km,
        inclination_deg: outcome.inclination_deg,
        mass_kg: config.spacecraft.mass_kg,
        drag_coefficient: config.spacecraft.drag_coefficient,
        area_m2: config.spacecraft.area_m2,
        time_step_s: config.simulation.time_step_s,
        initial_period_s: outcome.initial_state.geometry.period_s(),
        elapsed_s: outcome.elapsed_s,
        elapsed_days: outcome.elapsed_days(),
        steps: outcome.steps,
        entry_interface_s: outcome.entry_interface_s,
        telemetry_available: !outcome.telemetry_unavailable(),
    };
    let path = summary::write_sidecar(output, &run_summary, &samples)?;
    Ok(Some(path))
}
