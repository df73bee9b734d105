//! Satellite state resolution, from precise products
use log::{debug, trace, warn};

use crate::{
    antenna::phase_center_offset,
    constants::SPEED_OF_LIGHT_M_S,
    prelude::{
        Carrier, ClockEstimate, Config, Epoch, Error, NavigationData, OrbitInterpolation,
        PositionMode, SunSource, Unit, Vector3, SV,
    },
};

/// Finite difference step (in seconds) used to derive velocity and clock drift
const DIFF_STEP_S: f64 = 1.0E-3;

/// [SatelliteState] at a specific [Epoch]
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct SatelliteState {
    /// Position in meters ECEF, either center of mass or
    /// antenna phase center, depending on the [PositionMode]
    pub position_m: Vector3<f64>,
    /// Velocity in m.s⁻¹ ECEF
    pub velocity_m_s: Vector3<f64>,
    /// Clock bias (in seconds), corrected for relativistic effects
    pub clock_bias_s: f64,
    /// Clock drift (s.s⁻¹)
    pub clock_drift_s_s: f64,
    /// Orbit + clock error variance (in m²)
    pub variance_m2: f64,
}

/// [SatelliteStateResolver] answers satellite position, velocity and clock
/// queries for the positioning estimator. It only reads the [NavigationData],
/// so it may be shared between several queries.
pub struct SatelliteStateResolver<'a> {
    nav: &'a NavigationData,
    sun: Option<&'a dyn SunSource>,
    order: usize,
    mode: PositionMode,
    apc_carrier: Option<Carrier>,
}

impl<'a> SatelliteStateResolver<'a> {
    /// Builds a new [SatelliteStateResolver] that uses the interpolation order
    /// and [PositionMode] defined in [Config].
    pub fn new(nav: &'a NavigationData, cfg: &Config) -> Self {
        Self {
            nav,
            sun: None,
            order: cfg.interp_order,
            mode: cfg.position_mode,
            apc_carrier: cfg.apc_carrier,
        }
    }

    /// Defines the [SunSource], required by [PositionMode::AntennaPhaseCenter]
    pub fn with_sun_source(mut self, sun: &'a dyn SunSource) -> Self {
        self.sun = Some(sun);
        self
    }

    /// [NavigationData] this resolver works with
    pub fn navigation(&self) -> &NavigationData {
        self.nav
    }

    /// Resolves [SatelliteState] at desired [Epoch], using the default [PositionMode]
    pub fn resolve(&self, t: Epoch, sv: SV) -> Result<SatelliteState, Error> {
        self.resolve_with_mode(t, sv, self.mode)
    }

    /// Resolves [SatelliteState] at desired [Epoch], in this [PositionMode].
    /// Any failure is local to this [SV] and this [Epoch].
    pub fn resolve_with_mode(
        &self,
        t: Epoch,
        sv: SV,
        mode: PositionMode,
    ) -> Result<SatelliteState, Error> {
        if !self.nav.has_orbit(sv) {
            trace!("{}({}) - unknown satellite", t, sv);
            return Err(Error::NoEphemerisData(t, sv));
        }

        let orbit = self.nav.orbit_interpolation(t, sv, self.order)?;
        let clock = self.clock(t, sv, &orbit)?;

        let t_1 = t + DIFF_STEP_S * Unit::Second;
        let orbit_1 = self.nav.orbit_interpolation(t_1, sv, self.order)?;
        let clock_1 = self.clock(t_1, sv, &orbit_1)?;

        let offset = match mode {
            PositionMode::CenterOfMass => Vector3::zeros(),
            PositionMode::AntennaPhaseCenter => self.antenna_offset(t_1, sv, &orbit.position_m)?,
        };

        let position_m = orbit.position_m + offset;
        let velocity_m_s = (orbit_1.position_m - orbit.position_m) / DIFF_STEP_S;

        let (clock_bias_s, clock_drift_s_s) = if clock.bias_s != 0.0 {
            (
                clock.bias_s - 2.0 * position_m.dot(&velocity_m_s) / SPEED_OF_LIGHT_M_S.powi(2),
                (clock_1.bias_s - clock.bias_s) / DIFF_STEP_S,
            )
        } else {
            (0.0, 0.0)
        };

        Ok(SatelliteState {
            position_m,
            velocity_m_s,
            clock_bias_s,
            clock_drift_s_s,
            variance_m2: orbit.variance_m2 + clock.variance_m2,
        })
    }

    /// Precise clock, with fallback to the clock embedded in the orbit product
    fn clock(
        &self,
        t: Epoch,
        sv: SV,
        orbit: &OrbitInterpolation,
    ) -> Result<ClockEstimate, Error> {
        match self.nav.clock_interpolation(t, sv) {
            Ok(clock) => Ok(clock),
            Err(Error::NoClockData(..)) => Ok(orbit.clock.unwrap_or_default()),
            Err(e) => Err(e),
        }
    }

    /// Antenna phase center offset, in meters ECEF.
    /// Null when it cannot be determined.
    fn antenna_offset(
        &self,
        t: Epoch,
        sv: SV,
        r_sv: &Vector3<f64>,
    ) -> Result<Vector3<f64>, Error> {
        let offset = match self.nav.antenna(sv).and_then(|p| p.offset(self.apc_carrier)) {
            Some(offset) => offset,
            None => {
                warn!("{}({}) - undefined antenna phase center", t, sv);
                return Ok(Vector3::zeros());
            },
        };

        let sun = match self.sun {
            Some(sun) => sun,
            None => {
                warn!("{}({}) - no sun source: phase center not corrected", t, sv);
                return Ok(Vector3::zeros());
            },
        };

        let r_sun = sun.sun_position_ecef_m(t)?;

        match phase_center_offset(r_sv, &r_sun, &offset) {
            Ok(offset) => Ok(offset),
            Err(Error::DegenerateGeometry) => {
                debug!("{}({}) - phase center correction skipped", t, sv);
                Ok(Vector3::zeros())
            },
            Err(e) => Err(e),
        }
    }
}
