//! Layered 1976 standard atmosphere below 86 km geometric altitude.

use decay_core::constants::{AIR_MOLAR_MASS_KG_MOL, G0, GAS_CONSTANT_J_MOL_K};
use decay_core::units::kg_m3_to_kg_km3;

/// Geopotential height of the top of the layered model (km).
pub const TOP_GEOPOTENTIAL_KM: f64 = 84.852;

// Tolerance applied only when matching the top seam.
const SEAM_RELATIVE_TOLERANCE: f64 = 1.0e-6;

/// g0·M0/R* expressed in K per geopotential km.
const HYDROSTATIC_CONSTANT_K_KM: f64 = G0 * AIR_MOLAR_MASS_KG_MOL / GAS_CONSTANT_J_MOL_K * 1_000.0;

/// One layer of the 1976 standard atmosphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AltitudeBand {
    /// Lower geopotential bound of the layer (km).
    pub base_km: f64,
    /// Molecular-scale temperature gradient (K per geopotential km).
    pub lapse_rate_k_km: f64,
    /// Molecular-scale temperature at the layer base (K).
    pub base_temperature_k: f64,
    /// Pressure at the layer base (Pa).
    pub base_pressure_pa: f64,
}

/// The seven standard layers, ordered by increasing geopotential height.
pub const LOWER_BANDS: [AltitudeBand; 7] = [
    AltitudeBand {
        base_km: 0.0,
        lapse_rate_k_km: -6.5,
        base_temperature_k: 288.15,
        base_pressure_pa: 101_325.0,
    },
    AltitudeBand {
        base_km: 11.0,
        lapse_rate_k_km: 0.0,
        base_temperature_k: 216.65,
        base_pressure_pa: 22_632.06,
    },
    AltitudeBand {
        base_km: 20.0,
        lapse_rate_k_km: 1.0,
        base_temperature_k: 216.65,
        base_pressure_pa: 5_474.889,
    },
    AltitudeBand {
        base_km: 32.0,
        lapse_rate_k_km: 2.8,
        base_temperature_k: 228.65,
        base_pressure_pa: 868.018_7,
    },
    AltitudeBand {
        base_km: 47.0,
        lapse_rate_k_km: 0.0,
        base_temperature_k: 270.65,
        base_pressure_pa: 110.906_3,
    },
    AltitudeBand {
        base_km: 51.0,
        lapse_rate_k_km: -2.8,
        base_temperature_k: 270.65,
        base_pressure_pa: 66.938_87,
    },
    AltitudeBand {
        base_km: 71.0,
        lapse_rate_k_km: -2.0,
        base_temperature_k: 214.65,
        base_pressure_pa: 3.956_420,
    },
];

/// State of the layered atmosphere at one height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerProperties {
    pub geopotential_height_km: f64,
    pub temperature_k: f64,
    pub pressure_pa: f64,
    pub density_kg_km3: f64,
}

impl AltitudeBand {
    /// Molecular-scale temperature (K) at geopotential height `h_km`.
    pub fn temperature_k(&self, h_km: f64) -> f64 {
        self.base_temperature_k + self.lapse_rate_k_km * (h_km - self.base_km)
    }

    /// Static pressure (Pa) at geopotential height `h_km`.
    pub fn pressure_pa(&self, h_km: f64) -> f64 {
        let dh = h_km - self.base_km;
        if self.lapse_rate_k_km == 0.0 {
            self.base_pressure_pa
                * (-HYDROSTATIC_CONSTANT_K_KM * dh / self.base_temperature_k).exp()
        } else {
            let ratio = self.base_temperature_k / self.temperature_k(h_km);
            self.base_pressure_pa * ratio.powf(HYDROSTATIC_CONSTANT_K_KM / self.lapse_rate_k_km)
        }
    }

    pub fn properties(&self, h_km: f64) -> LayerProperties {
        let temperature_k = self.temperature_k(h_km);
        let pressure_pa = self.pressure_pa(h_km);
        // Ideal gas in kg/m³, rescaled to the km-based working unit.
        let density_kg_m3 =
            pressure_pa * AIR_MOLAR_MASS_KG_MOL / (GAS_CONSTANT_J_MOL_K * temperature_k);
        LayerProperties {
            geopotential_height_km: h_km,
            temperature_k,
            pressure_pa,
            density_kg_km3: kg_m3_to_kg_km3(density_kg_m3),
        }
    }
}

/// Select the layer containing geopotential height `h_km`.
///
/// Layers are closed on their base and open on top, except the last layer
/// which also accepts heights within a relative tolerance of the top seam.
pub(crate) fn find_band(bands: &[AltitudeBand], h_km: f64) -> Option<&AltitudeBand> {
    let first = bands.first()?;
    if h_km < first.base_km {
        return None;
    }
    if h_km > TOP_GEOPOTENTIAL_KM {
        let within_seam =
            (h_km - TOP_GEOPOTENTIAL_KM).abs() <= SEAM_RELATIVE_TOLERANCE * TOP_GEOPOTENTIAL_KM;
        return if within_seam { bands.last() } else { None };
    }
    let index = bands.partition_point(|band| band.base_km <= h_km);
    bands.get(index.checked_sub(1)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_bases_are_strictly_increasing() {
        for pair in LOWER_BANDS.windows(2) {
            assert!(pair[0].base_km < pair[1].base_km);
        }
        assert!(LOWER_BANDS[6].base_km < TOP_GEOPOTENTIAL_KM);
    }

    #[test]
    fn band_lookup_is_closed_on_the_base() {
        assert_eq!(find_band(&LOWER_BANDS, 0.0).unwrap().base_km, 0.0);
        assert_eq!(find_band(&LOWER_BANDS, 10.999).unwrap().base_km, 0.0);
        assert_eq!(find_band(&LOWER_BANDS, 11.0).unwrap().base_km, 11.0);
        assert_eq!(find_band(&LOWER_BANDS, 71.0).unwrap().base_km, 71.0);
        assert_eq!(find_band(&LOWER_BANDS, TOP_GEOPOTENTIAL_KM).unwrap().base_km, 71.0);
    }

    #[test]
    fn band_lookup_rejects_heights_outside_the_table() {
        assert!(find_band(&LOWER_BANDS, -0.001).is_none());
        assert!(find_band(&LOWER_BANDS, 84.86).is_none());
        assert!(find_band(&LOWER_BANDS, 84.852_05).is_some());
    }

    #[test]
    fn tabulated_base_pressures_are_continuous() {
        for pair in LOWER_BANDS.windows(2) {
            let below = pair[0].pressure_pa(pair[1].base_km);
            let relative = (below - pair[1].base_pressure_pa).abs() / pair[1].base_pressure_pa;
            assert!(relative < 1e-4, "seam at {} km: {relative}", pair[1].base_km);
        }
    }
}
