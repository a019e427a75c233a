//! Configuration models and loaders for decay scenarios.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Initial orbit given as apsis altitudes above the reference radius.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct OrbitConfig {
    pub apogee_km: f64,
    pub perigee_km: f64,
    #[serde(default)]
    pub inclination_deg: f64,
}

/// Spacecraft mass and drag properties.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SpacecraftConfig {
    pub name: String,
    pub mass_kg: f64,
    pub drag_coefficient: f64,
    pub area_m2: f64,
}

/// Integration settings; every field has a default.
///
/// `max_steps` defaults to a ceiling of 10 million iterations.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub time_step_s: f64,
    pub max_telemetry_samples: usize,
    pub max_steps: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            time_step_s: 60.0,
            max_telemetry_samples: 500_000,
            max_steps: Some(10_000_000),
        }
    }
}

/// A named decay scenario.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ScenarioConfig {
    pub name: String,
    pub orbit: OrbitConfig,
    pub spacecraft: SpacecraftConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("scenario '{0}' not found")]
    NotFound(String),
    #[error("no scenarios found in {0}")]
    Empty(PathBuf),
}

/// Load scenarios from a YAML list, a single TOML file, or a directory of TOML files.
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<ScenarioConfig>, ConfigError> {
    load_records(path)
}

/// Pick a scenario by case-insensitive name, or the first one when no name is given.
pub fn select_scenario<P: AsRef<Path>>(
    path: P,
    requested: Option<&str>,
) -> Result<ScenarioConfig, ConfigError> {
    let path = path.as_ref();
    let scenarios = load_scenarios(path)?;
    match requested {
        Some(name) => {
            let upper = name.to_uppercase();
            scenarios
                .into_iter()
                .find(|s| s.name.to_uppercase() == upper)
                .ok_or_else(|| ConfigError::NotFound(name.to_string()))
        }
        None => scenarios
            .into_iter()
            .next()
            .ok_or_else(|| ConfigError::Empty(path.to_path_buf())),
    }
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}
