use rstest::*;

use crate::prelude::{
    AntennaPattern, Carrier, ClockEntry, ClockSample, Config, Epoch, EphemerisEntry,
    EphemerisSample, Error, NavigationData, PositionMode, SatelliteStateResolver, SunSource, Unit,
    Vector3, SPEED_OF_LIGHT_M_S, SV,
};

use crate::tests::{
    clock_bias, ecef_position, ecef_velocity, init_logger, navigation_data, orbit_samples, t0,
    FixedSun, G01, G02, G05,
};

fn com_config() -> Config {
    Config::default().with_position_mode(PositionMode::CenterOfMass)
}

#[rstest]
#[case(G01, 1800.0)]
#[case(G01, 2345.6)]
#[case(G02, 4000.0)]
#[case(G02, 5012.25)]
fn center_of_mass_state(#[case] sv: SV, #[case] dt_s: f64) {
    init_logger();

    let nav = navigation_data();
    let resolver = SatelliteStateResolver::new(&nav, &com_config());

    let state = resolver.resolve(t0() + dt_s * Unit::Second, sv).unwrap();

    let err = (state.position_m - ecef_position(sv, dt_s)).norm();
    assert!(err < 1.0E-2, "position error: {} m", err);

    let err = (state.velocity_m_s - ecef_velocity(sv, dt_s)).norm();
    assert!(err < 1.0E-2, "velocity error: {} m/s", err);

    // circular orbit: negligible relativistic correction
    assert!((state.clock_bias_s - clock_bias(sv, dt_s)).abs() < 1.0E-12);
    assert!((state.clock_drift_s_s - 1.0E-9).abs() < 1.0E-12);

    // orbit + precise clock variances
    let orbit_std = Vector3::<f64>::new(0.01, 0.01, 0.02).norm();
    assert!(state.variance_m2 > orbit_std.powi(2));
    assert!(state.variance_m2 < orbit_std.powi(2) + 1.0);
}

#[test]
fn clock_fallback() {
    init_logger();

    let svs = [G01, G02];
    let nav = NavigationData::new(orbit_samples(&svs, 25), vec![]).unwrap();
    let resolver = SatelliteStateResolver::new(&nav, &com_config());

    let dt_s = 3456.0;
    let state = resolver.resolve(t0() + dt_s * Unit::Second, G02).unwrap();

    assert!((state.clock_bias_s - clock_bias(G02, dt_s)).abs() < 1.0E-12);
    assert!((state.clock_drift_s_s - 1.0E-9).abs() < 1.0E-12);
}

#[test]
fn clock_outage() {
    init_logger();

    let clocks = vec![
        ClockSample::new(t0()).with_entry(G01, ClockEntry::new(1.0E-4, 0.0)),
        ClockSample::new(t0() + 30.0 * Unit::Second),
    ];

    let nav = NavigationData::new(orbit_samples(&[G01], 25), clocks).unwrap();
    let resolver = SatelliteStateResolver::new(&nav, &com_config());

    let t = t0() + 15.0 * Unit::Second;
    assert_eq!(resolver.resolve(t, G01), Err(Error::ClockOutage(t, G01)));
}

#[test]
fn unknown_satellite() {
    let nav = navigation_data();
    let resolver = SatelliteStateResolver::new(&nav, &com_config());

    let t = t0() + 600.0 * Unit::Second;
    assert_eq!(resolver.resolve(t, G05), Err(Error::NoEphemerisData(t, G05)));

    let t = t0() + 9000.0 * Unit::Second;
    assert_eq!(resolver.resolve(t, G01), Err(Error::NoEphemerisData(t, G01)));

    // unreasonable interpolation order
    let cfg = com_config().with_interp_order(usize::MAX);
    let resolver = SatelliteStateResolver::new(&nav, &cfg);
    let t = t0() + 600.0 * Unit::Second;
    assert_eq!(resolver.resolve(t, G01), Err(Error::NoEphemerisData(t, G01)));
}

#[test]
fn outage_at_second_instant() {
    init_logger();

    let mut samples = orbit_samples(&[G01], 25);
    samples[24]
        .entries
        .insert(G01, EphemerisEntry::from_position_m(0.0, 0.0, 0.0));

    let nav = NavigationData::new(samples, vec![]).unwrap();

    // t lies on a node, t + 1ms selects the next window
    let t = t0() + 6900.0 * Unit::Second;
    let resolver = SatelliteStateResolver::new(&nav, &com_config().with_interp_order(2));

    assert!(nav.orbit_interpolation(t, G01, 2).is_ok());
    assert!(matches!(
        resolver.resolve(t, G01),
        Err(Error::EphemerisOutage(_, G01))
    ));
}

#[test]
fn relativistic_correction() {
    init_logger();

    // radial motion along Z, which is not affected by the Earth rotation
    let bias_s = 1.0E-5;
    let samples = (0..11)
        .map(|k| {
            let dt_s = k as f64 * 300.0;
            EphemerisSample::new(t0() + dt_s * Unit::Second).with_entry(
                G05,
                EphemerisEntry::from_position_m(0.0, 0.0, 2.6E7 + 1000.0 * dt_s)
                    .with_clock_bias(bias_s),
            )
        })
        .collect::<Vec<_>>();

    let nav = NavigationData::new(samples, vec![]).unwrap();
    let resolver = SatelliteStateResolver::new(&nav, &com_config());

    let dt_s = 1500.0;
    let state = resolver.resolve(t0() + dt_s * Unit::Second, G05).unwrap();

    assert!((state.position_m[2] - (2.6E7 + 1000.0 * dt_s)).abs() < 1.0E-4);
    assert!((state.velocity_m_s - Vector3::new(0.0, 0.0, 1000.0)).norm() < 1.0E-2);

    let correction = 2.0 * state.position_m[2] * 1000.0 / SPEED_OF_LIGHT_M_S.powi(2);
    assert!(correction > 6.0E-7);
    assert!((state.clock_bias_s - (bias_s - correction)).abs() < 1.0E-12);
    assert!(state.clock_drift_s_s.abs() < 1.0E-12);
}

#[test]
fn null_clock_bias() {
    let samples = orbit_samples(&[G01], 25)
        .into_iter()
        .map(|mut sample| {
            for entry in sample.entries.values_mut() {
                entry.clock_bias_s = None;
            }
            sample
        })
        .collect::<Vec<_>>();

    let nav = NavigationData::new(samples, vec![]).unwrap();
    let resolver = SatelliteStateResolver::new(&nav, &com_config());

    let state = resolver.resolve(t0() + 1000.0 * Unit::Second, G01).unwrap();
    assert_eq!(state.clock_bias_s, 0.0);
    assert_eq!(state.clock_drift_s_s, 0.0);
}

#[test]
fn antenna_phase_center() {
    init_logger();

    let sun = FixedSun::default();
    let pattern = AntennaPattern::new(Carrier::L1, (0.0, 0.0, 1.0))
        .with_offset(Carrier::L2, (0.0, 0.0, 2.0));

    let nav = navigation_data().with_antenna(G01, pattern);

    let t = t0() + 2000.0 * Unit::Second;

    let resolver = SatelliteStateResolver::new(&nav, &Config::default()).with_sun_source(&sun);

    let com = resolver
        .resolve_with_mode(t, G01, PositionMode::CenterOfMass)
        .unwrap();
    let apc = resolver.resolve(t, G01).unwrap();

    // Z body axis points to the Earth center
    let nadir = -com.position_m.normalize();
    assert!((apc.position_m - com.position_m - nadir).norm() < 1.0E-3);
    assert_eq!(apc.velocity_m_s, com.velocity_m_s);

    // desired frequency
    let cfg = Config::default().with_apc_carrier(Carrier::L2);

    let resolver = SatelliteStateResolver::new(&nav, &cfg).with_sun_source(&sun);
    let apc = resolver.resolve(t, G01).unwrap();
    assert!((apc.position_m - com.position_m - 2.0 * nadir).norm() < 1.0E-3);
}

#[test]
fn antenna_phase_center_not_available() {
    init_logger();

    let sun = FixedSun::default();
    let nav = navigation_data();
    let t = t0() + 2000.0 * Unit::Second;

    // no antenna pattern
    let resolver = SatelliteStateResolver::new(&nav, &Config::default()).with_sun_source(&sun);
    let com = resolver
        .resolve_with_mode(t, G02, PositionMode::CenterOfMass)
        .unwrap();
    assert_eq!(resolver.resolve(t, G02).unwrap(), com);

    // no sun source
    let nav = nav.with_antenna(G02, AntennaPattern::new(Carrier::L1, (0.0, 0.0, 1.0)));
    let resolver = SatelliteStateResolver::new(&nav, &Config::default());
    assert_eq!(resolver.resolve(t, G02).unwrap(), com);
}

/// [SunSource] that always fails
struct FailingSun;

impl SunSource for FailingSun {
    fn sun_position_ecef_m(&self, _: Epoch) -> Result<Vector3<f64>, Error> {
        Err(Error::NoNavigationData)
    }
}

#[test]
fn antenna_phase_center_degenerate_geometry() {
    init_logger();

    // sun at the Earth center: sun direction equals nadir direction
    let sun = FixedSun(Vector3::zeros());
    let nav = navigation_data()
        .with_antenna(G01, AntennaPattern::new(Carrier::L1, (0.1, 0.2, 1.0)));
    let t = t0() + 2000.0 * Unit::Second;

    let resolver = SatelliteStateResolver::new(&nav, &Config::default()).with_sun_source(&sun);

    let com = resolver
        .resolve_with_mode(t, G01, PositionMode::CenterOfMass)
        .unwrap();

    assert_eq!(resolver.resolve(t, G01).unwrap(), com);
}

#[test]
fn antenna_phase_center_sun_failure() {
    init_logger();

    let sun = FailingSun;
    let nav = navigation_data()
        .with_antenna(G01, AntennaPattern::new(Carrier::L1, (0.0, 0.0, 1.0)));
    let t = t0() + 2000.0 * Unit::Second;

    let resolver = SatelliteStateResolver::new(&nav, &Config::default()).with_sun_source(&sun);

    assert_eq!(resolver.resolve(t, G01), Err(Error::NoNavigationData));

    // center of mass does not require the sun
    assert!(resolver
        .resolve_with_mode(t, G01, PositionMode::CenterOfMass)
        .is_ok());
}

#[test]
fn antenna_phase_center_attitude_at_first_instant() {
    init_logger();

    let sun = FixedSun::default();
    let pattern = AntennaPattern::new(Carrier::L1, (1.0, 1.0, 1.0));
    let nav = navigation_data().with_antenna(G01, pattern);
    let t = t0() + 2000.0 * Unit::Second;

    let resolver = SatelliteStateResolver::new(&nav, &Config::default()).with_sun_source(&sun);

    let com = resolver
        .resolve_with_mode(t, G01, PositionMode::CenterOfMass)
        .unwrap();
    let apc = resolver.resolve(t, G01).unwrap();

    // attitude formed from the position at t
    let ez = -com.position_m.normalize();
    let es = (sun.0 - com.position_m).normalize();
    let ey = ez.cross(&es).normalize();
    let ex = ey.cross(&ez);

    // attitude 1 ms later would move the correction by ~1e-7 m
    let expected = ex + ey + ez;
    assert!((apc.position_m - com.position_m - expected).norm() < 2.0E-8);
}
