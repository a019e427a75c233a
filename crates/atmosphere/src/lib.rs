//! Atmospheric mass density from sea level to 1000 km.
//!
//! Below 86 km the piecewise 1976 U.S. Standard Atmosphere is evaluated on
//! geopotential height. Above 86 km the natural logarithm of density is a
//! quartic in geometric altitude, fitted per band. Densities are returned in
//! kg/km³ so they combine directly with km-based orbital quantities.

mod lower;
mod upper;

pub use lower::{AltitudeBand, LOWER_BANDS, LayerProperties, TOP_GEOPOTENTIAL_KM};
pub use upper::{DensityPolynomial, UPPER_BANDS};

use decay_core::constants::GEOPOTENTIAL_EARTH_RADIUS_KM;
use thiserror::Error;

/// Lowest altitude covered by the model (km).
pub const MIN_ALTITUDE_KM: f64 = 0.0;
/// Geometric altitude separating the layered and polynomial regimes (km).
pub const LOWER_CEILING_KM: f64 = 86.0;
/// Highest altitude covered by the model (km).
pub const MAX_ALTITUDE_KM: f64 = 1_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum AtmosphereError {
    #[error("altitude {altitude_km} km lies outside the model domain [{min_km}, {max_km}] km")]
    OutOfRange {
        altitude_km: f64,
        min_km: f64,
        max_km: f64,
    },
}

impl AtmosphereError {
    fn out_of_range(altitude_km: f64, min_km: f64, max_km: f64) -> Self {
        AtmosphereError::OutOfRange {
            altitude_km,
            min_km,
            max_km,
        }
    }
}

/// Source of atmospheric mass density for the decay integrator.
///
/// Implementations must be shareable across threads; the integrator only
/// ever reads through `&self`.
pub trait DensityModel: Send + Sync {
    /// Total mass density (kg/km³) at a geometric altitude (km).
    fn density_kg_km3(&self, altitude_km: f64) -> Result<f64, AtmosphereError>;

    /// Short model name for logs and reports.
    fn name(&self) -> &'static str;
}

/// Convert geometric altitude (km) to geopotential height (km).
pub fn geopotential_height(altitude_km: f64) -> Result<f64, AtmosphereError> {
    if !(MIN_ALTITUDE_KM..=MAX_ALTITUDE_KM).contains(&altitude_km) {
        return Err(AtmosphereError::out_of_range(
            altitude_km,
            MIN_ALTITUDE_KM,
            MAX_ALTITUDE_KM,
        ));
    }
    Ok(GEOPOTENTIAL_EARTH_RADIUS_KM * altitude_km / (GEOPOTENTIAL_EARTH_RADIUS_KM + altitude_km))
}

/// The 1976 standard atmosphere extended to 1000 km.
///
/// The band tables are handed in at construction so alternative tabulations
/// can be evaluated with the same dispatch logic.
#[derive(Debug, Clone, Copy)]
pub struct StandardAtmosphere {
    lower: &'static [AltitudeBand],
    upper: &'static [DensityPolynomial],
}

impl Default for StandardAtmosphere {
    fn default() -> Self {
        Self::new(&LOWER_BANDS, &UPPER_BANDS)
    }
}

impl StandardAtmosphere {
    pub fn new(lower: &'static [AltitudeBand], upper: &'static [DensityPolynomial]) -> Self {
        Self { lower, upper }
    }

    pub fn lower_bands(&self) -> &'static [AltitudeBand] {
        self.lower
    }

    pub fn upper_bands(&self) -> &'static [DensityPolynomial] {
        self.upper
    }

    /// Total mass density (kg/km³) at geometric altitude `altitude_km`.
    pub fn density(&self, altitude_km: f64) -> Result<f64, AtmosphereError> {
        if !(MIN_ALTITUDE_KM..=MAX_ALTITUDE_KM).contains(&altitude_km) {
            return Err(AtmosphereError::out_of_range(
                altitude_km,
                MIN_ALTITUDE_KM,
                MAX_ALTITUDE_KM,
            ));
        }
        if altitude_km <= LOWER_CEILING_KM {
            self.lower_density(altitude_km)
        } else {
            self.upper_density(altitude_km)
        }
    }

    /// Layered-model density (kg/km³); valid on [0, 86] km.
    pub fn lower_density(&self, altitude_km: f64) -> Result<f64, AtmosphereError> {
        Ok(self.lower_properties(altitude_km)?.density_kg_km3)
    }

    /// Temperature, pressure and density of the layered model on [0, 86] km.
    pub fn lower_properties(&self, altitude_km: f64) -> Result<LayerProperties, AtmosphereError> {
        if !(MIN_ALTITUDE_KM..=LOWER_CEILING_KM).contains(&altitude_km) {
            return Err(AtmosphereError::out_of_range(
                altitude_km,
                MIN_ALTITUDE_KM,
                LOWER_CEILING_KM,
            ));
        }
        let h = geopotential_height(altitude_km)?;
        let band = lower::find_band(self.lower, h).ok_or(AtmosphereError::out_of_range(
            altitude_km,
            MIN_ALTITUDE_KM,
            LOWER_CEILING_KM,
        ))?;
        Ok(band.properties(h))
    }

    /// Polynomial-fit density (kg/km³); valid on (86, 1000] km.
    pub fn upper_density(&self, altitude_km: f64) -> Result<f64, AtmosphereError> {
        let out_of_range =
            || AtmosphereError::out_of_range(altitude_km, LOWER_CEILING_KM, MAX_ALTITUDE_KM);
        if !(altitude_km > LOWER_CEILING_KM && altitude_km <= MAX_ALTITUDE_KM) {
            return Err(out_of_range());
        }
        let band = upper::find_polynomial(self.upper, altitude_km).ok_or_else(out_of_range)?;
        Ok(band.density_kg_km3(altitude_km))
    }
}

impl DensityModel for StandardAtmosphere {
    fn density_kg_km3(&self, altitude_km: f64) -> Result<f64, AtmosphereError> {
        self.density(altitude_km)
    }

    fn name(&self) -> &'static str {
        "US Standard Atmosphere 1976"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geopotential_of_86_km_lands_on_topmost_seam() {
        let h = geopotential_height(86.0).unwrap();
        assert!((h - TOP_GEOPOTENTIAL_KM).abs() < 1e-3, "h = {h}");
    }

    #[test]
    fn seam_altitudes_resolve_to_a_single_path() {
        let atmosphere = StandardAtmosphere::default();
        assert!(atmosphere.lower_density(86.0).is_ok());
        assert!(atmosphere.upper_density(86.0).is_err());
        assert!(atmosphere.lower_density(86.000_1).is_err());
        assert!(atmosphere.upper_density(86.000_1).is_ok());
    }
}
