//! Constants, unit conversions, and time helpers shared by the orbital decay workspace.
//!
//! Distances are kilometres and densities kg/km³ everywhere inside the
//! workspace; conversions from user-facing SI inputs go through [`units`].

/// Physical constants. Units are stated per item.
pub mod constants {
    /// Earth's standard gravitational parameter (km³/s²).
    pub const MU_EARTH_KM3_S2: f64 = 3.986_01e5;
    /// Reference Earth radius used for apogee/perigee altitudes (km).
    pub const EARTH_RADIUS_KM: f64 = 6_378.14;
    /// Effective Earth radius for geopotential height conversion (km).
    pub const GEOPOTENTIAL_EARTH_RADIUS_KM: f64 = 6_356.766;
    /// Standard gravity at Earth's surface (m/s²).
    pub const G0: f64 = 9.806_65;
    /// Mean molar mass of sea-level air (kg/mol).
    pub const AIR_MOLAR_MASS_KG_MOL: f64 = 0.028_964_4;
    /// Universal gas constant as tabulated by the 1976 standard (J/(mol·K)).
    pub const GAS_CONSTANT_J_MOL_K: f64 = 8.314_32;
    /// Conventional entry-interface altitude (km).
    pub const ENTRY_INTERFACE_KM: f64 = 120.0;
    /// Seconds per day.
    pub const SECONDS_PER_DAY: f64 = 86_400.0;
    /// Seconds per hour.
    pub const SECONDS_PER_HOUR: f64 = 3_600.0;
}

/// Unit conversion helpers.
pub mod units {
    /// Convert square metres to square kilometres.
    #[inline]
    pub fn m2_to_km2(v: f64) -> f64 {
        v * 1.0e-6
    }

    /// Convert kg/m³ to kg/km³.
    #[inline]
    pub fn kg_m3_to_kg_km3(v: f64) -> f64 {
        v * 1.0e9
    }

    /// Convert kg/km³ to kg/m³.
    #[inline]
    pub fn kg_km3_to_kg_m3(v: f64) -> f64 {
        v * 1.0e-9
    }
}

/// Elapsed-time helpers.
pub mod time {
    use super::constants::{SECONDS_PER_DAY, SECONDS_PER_HOUR};

    /// Convert seconds to days.
    #[inline]
    pub fn seconds_to_days(seconds: f64) -> f64 {
        seconds / SECONDS_PER_DAY
    }

    /// Split a non-negative duration into whole days, hours, and minutes.
    pub fn split_duration(seconds: f64) -> (i64, i64, i64) {
        let total_seconds = seconds.max(0.0);
        let days = (total_seconds / SECONDS_PER_DAY).floor() as i64;
        let remaining = total_seconds - days as f64 * SECONDS_PER_DAY;
        let hours = (remaining / SECONDS_PER_HOUR).floor() as i64;
        let minutes = ((remaining - hours as f64 * SECONDS_PER_HOUR) / 60.0).floor() as i64;
        (days, hours, minutes)
    }
}
