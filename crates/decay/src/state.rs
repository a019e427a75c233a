//! Orbital state and the single explicit-Euler drag step.

use decay_atmosphere::{AtmosphereError, DensityModel, MAX_ALTITUDE_KM};
use decay_core::constants::EARTH_RADIUS_KM;
use decay_orbits::{OrbitError, OrbitGeometry, semi_major_axis_from_state};

/// Where a decay run is, or why it stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalState {
    /// Every live state; a run's outcome never reports it.
    Running,
    /// Altitude reached the ground or rose above the modelled atmosphere.
    ReenteredOrDepartedRange,
    /// Apsides became non-positive or inverted after a drag update.
    DegenerateOrbit,
    StepLimitReached,
    Cancelled,
}

impl TerminalState {
    pub fn describe(&self) -> &'static str {
        match self {
            TerminalState::Running => "simulation still running",
            TerminalState::ReenteredOrDepartedRange => "reentry achieved",
            TerminalState::DegenerateOrbit => "orbit decayed below model validity",
            TerminalState::StepLimitReached => "step limit reached before reentry",
            TerminalState::Cancelled => "simulation cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, TerminalState::Running)
    }
}

/// One accepted integration step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetrySample {
    pub time_s: f64,
    pub drag_acceleration_km_s2: f64,
    pub speed_km_s: f64,
    pub apogee_km: f64,
    pub perigee_km: f64,
}

/// Snapshot of the decaying orbit. Each step produces a fresh value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalState {
    /// Semi-major axis and the eccentricity fixed at the start of the run.
    pub geometry: OrbitGeometry,
    pub true_anomaly_deg: f64,
    pub speed_km_s: f64,
    pub apogee_km: f64,
    pub perigee_km: f64,
    pub elapsed_s: f64,
    pub status: TerminalState,
}

impl OrbitalState {
    /// State at perigee (θ = 0) for the given apsides.
    pub fn initial(apogee_km: f64, perigee_km: f64) -> Result<Self, OrbitError> {
        let geometry = OrbitGeometry::from_apsides(apogee_km, perigee_km)?;
        let radius_km = geometry.focal_distance_km(0.0);
        Ok(Self {
            geometry,
            true_anomaly_deg: 0.0,
            speed_km_s: geometry.speed_km_s(radius_km),
            apogee_km,
            perigee_km,
            elapsed_s: 0.0,
            status: TerminalState::Running,
        })
    }

    pub fn radius_km(&self) -> f64 {
        self.geometry.focal_distance_km(self.true_anomaly_deg)
    }

    pub fn altitude_km(&self) -> f64 {
        self.radius_km() - EARTH_RADIUS_KM
    }

    /// The same state marked with the reason the run stopped.
    pub fn terminated(self, status: TerminalState) -> Self {
        Self { status, ..self }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    Advanced {
        next: OrbitalState,
        sample: TelemetrySample,
    },
    Terminated(TerminalState),
}

/// Advance `state` by `time_step_s` seconds of drag.
///
/// `drag_factor_km2_kg` is Cd·A/m with the area already in km². The
/// altitude check precedes the density query; the apsides check follows the
/// update and rejects the step without producing a sample.
pub fn step<M: DensityModel + ?Sized>(
    state: &OrbitalState,
    model: &M,
    drag_factor_km2_kg: f64,
    time_step_s: f64,
) -> Result<StepOutcome, AtmosphereError> {
    let radius_km = state.radius_km();
    let speed_km_s = state.geometry.speed_km_s(radius_km);
    if !radius_km.is_finite() || !speed_km_s.is_finite() {
        return Ok(StepOutcome::Terminated(TerminalState::DegenerateOrbit));
    }

    let altitude_km = radius_km - EARTH_RADIUS_KM;
    if altitude_km <= 0.0 || altitude_km > MAX_ALTITUDE_KM {
        return Ok(StepOutcome::Terminated(
            TerminalState::ReenteredOrDepartedRange,
        ));
    }

    let density_kg_km3 = model.density_kg_km3(altitude_km)?;
    let drag_acceleration_km_s2 =
        0.5 * density_kg_km3 * speed_km_s * speed_km_s * drag_factor_km2_kg;

    let speed_km_s = speed_km_s - time_step_s * drag_acceleration_km_s2;
    let true_anomaly_deg =
        state.true_anomaly_deg + (time_step_s * speed_km_s / radius_km).to_degrees();

    let semi_major_axis_km = semi_major_axis_from_state(radius_km, speed_km_s);
    let geometry = state.geometry.with_semi_major_axis(semi_major_axis_km);
    let apogee_km = geometry.apogee_altitude_km();
    let perigee_km = geometry.perigee_altitude_km();

    if !semi_major_axis_km.is_finite()
        || apogee_km <= 0.0
        || perigee_km <= 0.0
        || apogee_km < perigee_km
    {
        return Ok(StepOutcome::Terminated(TerminalState::DegenerateOrbit));
    }

    let sample = TelemetrySample {
        time_s: state.elapsed_s,
        drag_acceleration_km_s2,
        speed_km_s,
        apogee_km,
        perigee_km,
    };
    let next = OrbitalState {
        geometry,
        true_anomaly_deg,
        speed_km_s,
        apogee_km,
        perigee_km,
        elapsed_s: state.elapsed_s + time_step_s,
        status: TerminalState::Running,
    };
    Ok(StepOutcome::Advanced { next, sample })
}
