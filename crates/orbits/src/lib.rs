//! Two-body orbit geometry helpers (apsides, vis-viva, period).
//!
//! Apogee and perigee are altitudes above [`EARTH_RADIUS_KM`]; the radius is
//! added before any geometric use. Angles are degrees at the API boundary.

use std::f64::consts::PI;

use decay_core::constants::{EARTH_RADIUS_KM, MU_EARTH_KM3_S2};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum OrbitError {
    #[error("apogee {apogee_km} km lies below perigee {perigee_km} km")]
    InvalidOrbit { apogee_km: f64, perigee_km: f64 },
}

fn check_apsides(apogee_km: f64, perigee_km: f64) -> Result<(), OrbitError> {
    if apogee_km < perigee_km {
        return Err(OrbitError::InvalidOrbit {
            apogee_km,
            perigee_km,
        });
    }
    Ok(())
}

/// Semi-major axis (km) from apogee and perigee altitudes (km).
pub fn semi_major_axis(apogee_km: f64, perigee_km: f64) -> Result<f64, OrbitError> {
    check_apsides(apogee_km, perigee_km)?;
    Ok(((apogee_km + EARTH_RADIUS_KM) + (perigee_km + EARTH_RADIUS_KM)) / 2.0)
}

/// Eccentricity from apogee and perigee altitudes (km).
pub fn eccentricity(apogee_km: f64, perigee_km: f64) -> Result<f64, OrbitError> {
    let a = semi_major_axis(apogee_km, perigee_km)?;
    Ok(((apogee_km + EARTH_RADIUS_KM) - (perigee_km + EARTH_RADIUS_KM)) / (2.0 * a))
}

/// Distance (km) from the occupied focus at true anomaly `theta_deg` (Kepler's first law).
pub fn focal_distance(semi_major_axis_km: f64, eccentricity: f64, theta_deg: f64) -> f64 {
    semi_major_axis_km * (1.0 - eccentricity * eccentricity)
        / (1.0 + eccentricity * theta_deg.to_radians().cos())
}

/// Orbital speed (km/s) at radius `radius_km` via vis-viva.
pub fn vis_viva_speed(semi_major_axis_km: f64, radius_km: f64) -> f64 {
    (MU_EARTH_KM3_S2 * (2.0 / radius_km - 1.0 / semi_major_axis_km)).sqrt()
}

/// Semi-major axis (km) implied by a radius/speed pair (inverse vis-viva).
pub fn semi_major_axis_from_state(radius_km: f64, speed_km_s: f64) -> f64 {
    -(MU_EARTH_KM3_S2 * radius_km) / (speed_km_s * speed_km_s * radius_km - 2.0 * MU_EARTH_KM3_S2)
}

/// Orbital period (s) for a semi-major axis (km).
pub fn orbital_period(semi_major_axis_km: f64) -> f64 {
    2.0 * PI * (semi_major_axis_km.powi(3) / MU_EARTH_KM3_S2).sqrt()
}

/// Shape of an Earth orbit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitGeometry {
    pub semi_major_axis_km: f64,
    pub eccentricity: f64,
}

impl OrbitGeometry {
    pub fn from_apsides(apogee_km: f64, perigee_km: f64) -> Result<Self, OrbitError> {
        Ok(Self {
            semi_major_axis_km: semi_major_axis(apogee_km, perigee_km)?,
            eccentricity: eccentricity(apogee_km, perigee_km)?,
        })
    }

    /// Same eccentricity, different size.
    pub fn with_semi_major_axis(self, semi_major_axis_km: f64) -> Self {
        Self {
            semi_major_axis_km,
            ..self
        }
    }

    pub fn focal_distance_km(&self, theta_deg: f64) -> f64 {
        focal_distance(self.semi_major_axis_km, self.eccentricity, theta_deg)
    }

    pub fn speed_km_s(&self, radius_km: f64) -> f64 {
        vis_viva_speed(self.semi_major_axis_km, radius_km)
    }

    pub fn period_s(&self) -> f64 {
        orbital_period(self.semi_major_axis_km)
    }

    pub fn apogee_altitude_km(&self) -> f64 {
        self.semi_major_axis_km * (1.0 + self.eccentricity) - EARTH_RADIUS_KM
    }

    pub fn perigee_altitude_km(&self) -> f64 {
        self.semi_major_axis_km * (1.0 - self.eccentricity) - EARTH_RADIUS_KM
    }
}
