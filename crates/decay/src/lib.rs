//! Orbital decay under atmospheric drag.
//!
//! The integrator applies drag to a two-body orbit in fixed time steps,
//! re-deriving the semi-major axis from the slowed speed each step while the
//! eccentricity stays at its initial value. A run ends when the orbit leaves
//! the modelled altitude range, degenerates, hits the step ceiling, or is
//! cancelled.

mod state;

pub use state::{OrbitalState, StepOutcome, TelemetrySample, TerminalState, step};

use std::sync::atomic::{AtomicBool, Ordering};

use decay_atmosphere::{AtmosphereError, DensityModel, StandardAtmosphere};
use decay_core::constants::ENTRY_INTERFACE_KM;
use decay_core::time::seconds_to_days;
use decay_core::units::m2_to_km2;
use decay_orbits::OrbitError;
use thiserror::Error;
use tracing::{debug, trace, warn};

/// Telemetry is dropped entirely once a run would exceed this many samples.
pub const DEFAULT_MAX_TELEMETRY_SAMPLES: usize = 500_000;

/// Iteration ceiling applied unless a request overrides it.
pub const DEFAULT_MAX_STEPS: u64 = 20 * DEFAULT_MAX_TELEMETRY_SAMPLES as u64;

/// Mass and aerodynamic properties of the decaying object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpacecraftParams {
    pub mass_kg: f64,
    pub drag_coefficient: f64,
    pub area_m2: f64,
}

impl SpacecraftParams {
    /// Cd·A/m in km²/kg.
    pub fn drag_factor_km2_kg(&self) -> f64 {
        self.drag_coefficient * m2_to_km2(self.area_m2) / self.mass_kg
    }
}

/// Inputs for one decay simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct DecayRequest {
    pub apogee_km: f64,
    pub perigee_km: f64,
    /// Carried through for ground-track consumers; the integrator ignores it.
    pub inclination_deg: f64,
    pub spacecraft: SpacecraftParams,
    pub time_step_s: f64,
    pub max_telemetry_samples: usize,
    /// `None` removes the ceiling; the run then ends only on reentry,
    /// degeneracy, or cancellation.
    pub max_steps: Option<u64>,
}

impl DecayRequest {
    pub fn new(
        apogee_km: f64,
        perigee_km: f64,
        inclination_deg: f64,
        spacecraft: SpacecraftParams,
        time_step_s: f64,
    ) -> Self {
        Self {
            apogee_km,
            perigee_km,
            inclination_deg,
            spacecraft,
            time_step_s,
            max_telemetry_samples: DEFAULT_MAX_TELEMETRY_SAMPLES,
            max_steps: Some(DEFAULT_MAX_STEPS),
        }
    }
}

/// Result of a decay run.
#[derive(Debug, Clone)]
pub struct DecayOutcome {
    pub elapsed_s: f64,
    pub terminal: TerminalState,
    pub steps: u64,
    pub inclination_deg: f64,
    pub initial_state: OrbitalState,
    /// Last accepted state, with `status` set to the terminal state.
    pub final_state: OrbitalState,
    /// Elapsed time of the first sample with perigee below the entry interface.
    pub entry_interface_s: Option<f64>,
    /// `None` when the run produced more samples than the configured cap.
    pub telemetry: Option<Vec<TelemetrySample>>,
}

impl DecayOutcome {
    pub fn elapsed_days(&self) -> f64 {
        seconds_to_days(self.elapsed_s)
    }

    pub fn telemetry_unavailable(&self) -> bool {
        self.telemetry.is_none()
    }
}

#[derive(Debug, Error)]
pub enum DecayError {
    #[error(transparent)]
    InvalidOrbit(#[from] OrbitError),
    #[error("spacecraft mass must be positive (got {0} kg)")]
    InvalidMass(f64),
    #[error("time step must be positive and finite (got {0} s)")]
    InvalidTimeStep(f64),
    #[error("drag coefficient must be non-negative (got {0})")]
    InvalidDragCoefficient(f64),
    #[error("reference area must be non-negative (got {0} m²)")]
    InvalidArea(f64),
    #[error("atmosphere lookup failed: {0}")]
    Atmosphere(#[from] AtmosphereError),
}

/// Simulate decay with the 1976 standard atmosphere.
pub fn simulate(request: &DecayRequest) -> Result<DecayOutcome, DecayError> {
    simulate_with_model(&StandardAtmosphere::default(), request, None)
}

/// Simulate decay, stopping early once `cancel` is set.
///
/// The flag is polled once per step, so it may be raised from another thread.
pub fn simulate_with_cancel(
    request: &DecayRequest,
    cancel: &AtomicBool,
) -> Result<DecayOutcome, DecayError> {
    simulate_with_model(&StandardAtmosphere::default(), request, Some(cancel))
}

/// Simulate decay against an arbitrary density provider.
pub fn simulate_with_model<M: DensityModel + ?Sized>(
    model: &M,
    request: &DecayRequest,
    cancel: Option<&AtomicBool>,
) -> Result<DecayOutcome, DecayError> {
    let initial_state = OrbitalState::initial(request.apogee_km, request.perigee_km)?;
    validate(request)?;
    model.density_kg_km3(request.perigee_km)?;
    model.density_kg_km3(request.apogee_km)?;

    let drag_factor = request.spacecraft.drag_factor_km2_kg();
    let time_step_s = request.time_step_s;
    debug!(
        model = model.name(),
        apogee_km = request.apogee_km,
        perigee_km = request.perigee_km,
        time_step_s,
        "starting decay simulation"
    );

    let mut state = initial_state;
    let mut telemetry: Option<Vec<TelemetrySample>> = Some(Vec::new());
    let mut steps: u64 = 0;
    let mut entry_interface_s = None;

    let terminal = loop {
        if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            break TerminalState::Cancelled;
        }
        if request.max_steps.is_some_and(|max| steps >= max) {
            break TerminalState::StepLimitReached;
        }

        match step(&state, model, drag_factor, time_step_s)? {
            StepOutcome::Terminated(terminal) => break terminal,
            StepOutcome::Advanced { next, sample } => {
                trace!(
                    time_s = sample.time_s,
                    apogee_km = sample.apogee_km,
                    perigee_km = sample.perigee_km,
                    "step accepted"
                );
                let over_cap = telemetry
                    .as_ref()
                    .is_some_and(|samples| samples.len() >= request.max_telemetry_samples);
                if over_cap {
                    warn!(
                        cap = request.max_telemetry_samples,
                        "too many telemetry points; telemetry unavailable for this run"
                    );
                    telemetry = None;
                } else if let Some(samples) = telemetry.as_mut() {
                    samples.push(sample);
                }
                if entry_interface_s.is_none() && sample.perigee_km < ENTRY_INTERFACE_KM {
                    entry_interface_s = Some(sample.time_s);
                }
                state = next;
                steps += 1;
            }
        }
    };

    debug!(
        elapsed_s = state.elapsed_s,
        steps,
        terminal = terminal.describe(),
        "decay simulation finished"
    );

    Ok(DecayOutcome {
        elapsed_s: state.elapsed_s,
        terminal,
        steps,
        inclination_deg: request.inclination_deg,
        initial_state,
        final_state: state.terminated(terminal),
        entry_interface_s,
        telemetry,
    })
}

fn validate(request: &DecayRequest) -> Result<(), DecayError> {
    let spacecraft = &request.spacecraft;
    if !(spacecraft.mass_kg > 0.0 && spacecraft.mass_kg.is_finite()) {
        return Err(DecayError::InvalidMass(spacecraft.mass_kg));
    }
    if !(request.time_step_s > 0.0 && request.time_step_s.is_finite()) {
        return Err(DecayError::InvalidTimeStep(request.time_step_s));
    }
    if !(spacecraft.drag_coefficient >= 0.0 && spacecraft.drag_coefficient.is_finite()) {
        return Err(DecayError::InvalidDragCoefficient(
            spacecraft.drag_coefficient,
        ));
    }
    if !(spacecraft.area_m2 >= 0.0 && spacecraft.area_m2.is_finite()) {
        return Err(DecayError::InvalidArea(spacecraft.area_m2));
    }
    Ok(())
}
