use std::path::PathBuf;

use clap::Parser;
use orbital_decay::config::{
    OrbitConfig, ScenarioConfig, SimulationConfig, SpacecraftConfig, select_scenario,
};
use orbital_decay::core::time::{seconds_to_days, split_duration};
use orbital_decay::scenario::{export_run, run_scenario};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Predict how long an object stays in orbit before drag brings it down"
)]
struct Cli {
    /// Scenario catalog (YAML list, TOML file, or directory of TOML files)
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Scenario name within the catalog (defaults to the first entry)
    #[arg(long)]
    name: Option<String>,

    /// Apogee altitude in km
    #[arg(long)]
    apogee: Option<f64>,

    /// Perigee altitude in km
    #[arg(long)]
    perigee: Option<f64>,

    /// Inclination in degrees (reported only)
    #[arg(long)]
    inclination: Option<f64>,

    /// Spacecraft mass in kg
    #[arg(long)]
    mass: Option<f64>,

    /// Dimensionless drag coefficient
    #[arg(long)]
    drag_coefficient: Option<f64>,

    /// Reference area in m²
    #[arg(long)]
    area: Option<f64>,

    /// Integration step in seconds
    #[arg(long)]
    time_step: Option<f64>,

    /// Stop after this many integration steps
    #[arg(long)]
    max_steps: Option<u64>,

    /// Drop telemetry when a run produces more samples than this
    #[arg(long)]
    max_samples: Option<usize>,

    /// Telemetry CSV destination (`-` for stdout); a JSON summary is written beside files
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    orbital_decay::logging::init();
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    let outcome = run_scenario(&config)?;
    let (d, h, m) = split_duration(outcome.elapsed_s);

    println!("=== Decay Prediction: {} ===", config.name);
    println!(
        "Initial orbit   : {:.1} x {:.1} km, i = {:.1}°, period = {:.2} min",
        config.orbit.apogee_km,
        config.orbit.perigee_km,
        config.orbit.inclination_deg,
        outcome.initial_state.geometry.period_s() / 60.0
    );
    println!(
        "Spacecraft      : {} ({:.2} kg, Cd = {:.2}, A = {:.3} m²)",
        config.spacecraft.name,
        config.spacecraft.mass_kg,
        config.spacecraft.drag_coefficient,
        config.spacecraft.area_m2
    );
    println!(
        "Time aloft      : {:.3} days ({}d {}h {}m) over {} steps",
        outcome.elapsed_days(),
        d,
        h,
        m,
        outcome.steps
    );
    println!("Termination     : {}", outcome.terminal.describe());
    if let Some(entry_s) = outcome.entry_interface_s {
        println!(
            "Entry interface : perigee below 120 km after {:.3} days",
            seconds_to_days(entry_s)
        );
    }
    if outcome.telemetry_unavailable() {
        println!("Telemetry       : too many points, telemetry unavailable for this run");
    }

    if let Some(output) = &cli.output {
        if let Some(summary_path) = export_run(&config, &outcome, output)? {
            tracing::info!(path = %summary_path.display(), "wrote run summary");
        }
    }

    Ok(())
}

fn resolve_config(cli: &Cli) -> anyhow::Result<ScenarioConfig> {
    let mut config = match &cli.scenario {
        Some(path) => select_scenario(path, cli.name.as_deref())?,
        None => ScenarioConfig {
            name: "command-line".to_string(),
            orbit: OrbitConfig {
                apogee_km: required(cli.apogee, "--apogee")?,
                perigee_km: required(cli.perigee, "--perigee")?,
                inclination_deg: 0.0,
            },
            spacecraft: SpacecraftConfig {
                name: "unnamed".to_string(),
                mass_kg: required(cli.mass, "--mass")?,
                drag_coefficient: required(cli.drag_coefficient, "--drag-coefficient")?,
                area_m2: required(cli.area, "--area")?,
            },
            simulation: SimulationConfig::default(),
        },
    };

    if let Some(v) = cli.apogee {
        config.orbit.apogee_km = v;
    }
    if let Some(v) = cli.perigee {
        config.orbit.perigee_km = v;
    }
    if let Some(v) = cli.inclination {
        config.orbit.inclination_deg = v;
    }
    if let Some(v) = cli.mass {
        config.spacecraft.mass_kg = v;
    }
    if let Some(v) = cli.drag_coefficient {
        config.spacecraft.drag_coefficient = v;
    }
    if let Some(v) = cli.area {
        config.spacecraft.area_m2 = v;
    }
    if let Some(v) = cli.time_step {
        config.simulation.time_step_s = v;
    }
    if let Some(v) = cli.max_steps {
        config.simulation.max_steps = Some(v);
    }
    if let Some(v) = cli.max_samples {
        config.simulation.max_telemetry_samples = v;
    }
    Ok(config)
}

fn required(value: Option<f64>, flag: &str) -> anyhow::Result<f64> {
    value.ok_or_else(|| anyhow::anyhow!("{flag} is required when no --scenario is given"))
}
