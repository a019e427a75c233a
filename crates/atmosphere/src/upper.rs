//! Empirical log-density fits between 86 and 1000 km geometric altitude.

use decay_core::units::kg_m3_to_kg_km3;

/// Quartic fit of ln(ρ[kg/m³]) over the altitude band (floor, ceiling] km.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensityPolynomial {
    pub floor_km: f64,
    pub ceiling_km: f64,
    /// Coefficients of z⁴, z³, z², z and the constant term, z in km.
    pub coefficients: [f64; 5],
}

impl DensityPolynomial {
    const fn new(floor_km: f64, ceiling_km: f64, coefficients: [f64; 5]) -> Self {
        Self {
            floor_km,
            ceiling_km,
            coefficients,
        }
    }

    pub fn contains(&self, altitude_km: f64) -> bool {
        altitude_km > self.floor_km && altitude_km <= self.ceiling_km
    }

    /// ln(ρ) with ρ in kg/m³.
    pub fn log_density(&self, altitude_km: f64) -> f64 {
        let [a, b, c, d, e] = self.coefficients;
        (((a * altitude_km + b) * altitude_km + c) * altitude_km + d) * altitude_km + e
    }

    pub fn density_kg_km3(&self, altitude_km: f64) -> f64 {
        kg_m3_to_kg_km3(self.log_density(altitude_km).exp())
    }
}

/// Ten contiguous bands covering (86, 1000] km.
pub const UPPER_BANDS: [DensityPolynomial; 10] = [
    DensityPolynomial::new(
        86.0,
        91.0,
        [0.0, -3.322622e-06, 9.111460e-04, -0.2609971, 5.944694],
    ),
    DensityPolynomial::new(
        91.0,
        100.0,
        [0.0, 2.873405e-05, -0.008492037, 0.6541179, -23.62010],
    ),
    DensityPolynomial::new(
        100.0,
        110.0,
        [-1.240774e-05, 0.005162063, -0.8048342, 55.55996, -1443.338],
    ),
    DensityPolynomial::new(
        110.0,
        120.0,
        [0.0, -8.854164e-05, 0.03373254, -4.390837, 176.5294],
    ),
    DensityPolynomial::new(
        120.0,
        150.0,
        [3.661771e-07, -2.154344e-04, 0.04809214, -4.884744, 172.3597],
    ),
    DensityPolynomial::new(
        150.0,
        200.0,
        [1.906032e-08, -1.527799e-05, 0.004724294, -0.6992340, 20.50921],
    ),
    DensityPolynomial::new(
        200.0,
        300.0,
        [1.199282e-09, -1.451051e-06, 6.910474e-04, -0.1736220, -5.321644],
    ),
    DensityPolynomial::new(
        300.0,
        500.0,
        [1.140564e-10, -2.130756e-07, 1.570762e-04, -0.07029296, -12.89844],
    ),
    DensityPolynomial::new(
        500.0,
        750.0,
        [8.105631e-12, -2.358417e-09, -2.635110e-06, -0.01562608, -20.02246],
    ),
    DensityPolynomial::new(
        750.0,
        1_000.0,
        [-3.701195e-12, -8.608611e-09, 5.118829e-05, -0.06600998, -6.137674],
    ),
];

/// Select the band whose (floor, ceiling] range holds `altitude_km`.
pub(crate) fn find_polynomial(
    bands: &[DensityPolynomial],
    altitude_km: f64,
) -> Option<&DensityPolynomial> {
    let index = bands.partition_point(|band| band.ceiling_km < altitude_km);
    bands.get(index).filter(|band| band.contains(altitude_km))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_partition_the_upper_range() {
        assert_eq!(UPPER_BANDS[0].floor_km, 86.0);
        assert_eq!(UPPER_BANDS[9].ceiling_km, 1_000.0);
        for pair in UPPER_BANDS.windows(2) {
            assert_eq!(pair[0].ceiling_km, pair[1].floor_km);
        }
    }

    #[test]
    fn band_ceiling_is_inclusive() {
        assert_eq!(find_polynomial(&UPPER_BANDS, 91.0).unwrap().floor_km, 86.0);
        assert_eq!(find_polynomial(&UPPER_BANDS, 91.000_1).unwrap().floor_km, 91.0);
        assert_eq!(find_polynomial(&UPPER_BANDS, 1_000.0).unwrap().floor_km, 750.0);
        assert!(find_polynomial(&UPPER_BANDS, 86.0).is_none());
        assert!(find_polynomial(&UPPER_BANDS, 1_000.1).is_none());
    }
}
