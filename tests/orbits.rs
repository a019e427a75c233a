use orbital_decay::core::constants::EARTH_RADIUS_KM;
use orbital_decay::orbits::{
    OrbitError, OrbitGeometry, eccentricity, focal_distance, orbital_period, semi_major_axis,
    semi_major_axis_from_state, vis_viva_speed,
};

#[test]
fn focal_distance_reproduces_apsis_radii() {
    for (apogee, perigee) in [(1_000.0, 150.0), (400.0, 400.0), (35_786.0, 200.0)] {
        let a = semi_major_axis(apogee, perigee).unwrap();
        let e = eccentricity(apogee, perigee).unwrap();
        let r_perigee = focal_distance(a, e, 0.0);
        let r_apogee = focal_distance(a, e, 180.0);
        assert!((r_perigee - (EARTH_RADIUS_KM + perigee)).abs() < 1e-6);
        assert!((r_apogee - (EARTH_RADIUS_KM + apogee)).abs() < 1e-6);
    }
}

#[test]
fn inverted_apsides_are_invalid() {
    assert!(OrbitGeometry::from_apsides(1_000.0, 150.0).is_ok());
    let err = OrbitGeometry::from_apsides(100.0, 150.0).unwrap_err();
    assert_eq!(
        err,
        OrbitError::InvalidOrbit {
            apogee_km: 100.0,
            perigee_km: 150.0
        }
    );
    assert!(semi_major_axis(100.0, 150.0).is_err());
    assert!(eccentricity(100.0, 150.0).is_err());
}

#[test]
fn circular_orbit_has_zero_eccentricity() {
    let geometry = OrbitGeometry::from_apsides(400.0, 400.0).unwrap();
    assert_eq!(geometry.eccentricity, 0.0);
    assert!((geometry.apogee_altitude_km() - 400.0).abs() < 1e-9);
    assert!((geometry.perigee_altitude_km() - 400.0).abs() < 1e-9);
}

#[test]
fn inverse_vis_viva_recovers_semi_major_axis() {
    let geometry = OrbitGeometry::from_apsides(1_000.0, 150.0).unwrap();
    for theta in [0.0, 45.0, 90.0, 180.0, 270.0] {
        let r = geometry.focal_distance_km(theta);
        let v = vis_viva_speed(geometry.semi_major_axis_km, r);
        let a = semi_major_axis_from_state(r, v);
        assert!((a - geometry.semi_major_axis_km).abs() < 1e-6, "theta = {theta}");
    }
}

#[test]
fn low_orbit_speed_and_period_are_reasonable() {
    let geometry = OrbitGeometry::from_apsides(400.0, 400.0).unwrap();
    let speed = geometry.speed_km_s(geometry.focal_distance_km(0.0));
    assert!((speed - 7.67).abs() < 0.02, "speed = {speed}");
    let minutes = geometry.period_s() / 60.0;
    assert!((minutes - 92.6).abs() < 0.5, "period = {minutes} min");
    assert_eq!(geometry.period_s(), orbital_period(geometry.semi_major_axis_km));
}
