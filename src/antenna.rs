//! Satellite antenna phase center
use log::debug;

use anise::{constants::frames::SUN_J2000, prelude::Almanac};

use crate::prelude::{Carrier, Epoch, Error, Frame, Vector3};

/// Satellite [AntennaPattern]: phase center offsets (PCO),
/// expressed in the satellite body frame, per carrier frequency.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AntennaPattern {
    offsets: Vec<(Carrier, Vector3<f64>)>,
}

impl AntennaPattern {
    /// Builds new [AntennaPattern] from the phase center offset
    /// of one [Carrier] (x, y, z in meters, satellite body frame).
    pub fn new(carrier: Carrier, offset_m: (f64, f64, f64)) -> Self {
        Self {
            offsets: vec![(carrier, Vector3::new(offset_m.0, offset_m.1, offset_m.2))],
        }
    }

    /// Copies and returns [AntennaPattern] with one more [Carrier] offset
    pub fn with_offset(&self, carrier: Carrier, offset_m: (f64, f64, f64)) -> Self {
        let mut s = self.clone();
        s.offsets
            .push((carrier, Vector3::new(offset_m.0, offset_m.1, offset_m.2)));
        s
    }

    /// Phase center offset for this [Carrier] frequency. When None, the first
    /// offset that was defined is used.
    pub fn offset(&self, carrier: Option<Carrier>) -> Option<Vector3<f64>> {
        match carrier {
            Some(carrier) => self
                .offsets
                .iter()
                .find(|(c, _)| c.frequency_hz() == carrier.frequency_hz())
                .map(|(_, offset)| *offset),
            None => self.offsets.first().map(|(_, offset)| *offset),
        }
    }
}

/// Any [SunSource] provides the Sun coordinates, used to
/// determine the satellite attitude.
pub trait SunSource {
    /// Sun position, in meters ECEF, at desired [Epoch].
    fn sun_position_ecef_m(&self, t: Epoch) -> Result<Vector3<f64>, Error>;
}

/// [SunSource] that relies on ANISE [Almanac].
pub struct AlmanacSun {
    almanac: Almanac,
    earth_cef: Frame,
}

impl AlmanacSun {
    /// Builds new [AlmanacSun] that expresses Sun coordinates
    /// in this Earth centered Earth fixed [Frame].
    pub fn new(almanac: Almanac, earth_cef: Frame) -> Self {
        Self { almanac, earth_cef }
    }
}

impl SunSource for AlmanacSun {
    fn sun_position_ecef_m(&self, t: Epoch) -> Result<Vector3<f64>, Error> {
        let state = self
            .almanac
            .transform(SUN_J2000, self.earth_cef, t, None)
            .map_err(Error::Almanac)?;

        Ok(Vector3::new(
            state.radius_km.x * 1.0E3,
            state.radius_km.y * 1.0E3,
            state.radius_km.z * 1.0E3,
        ))
    }
}

/// Converts a body frame phase center offset to ECEF coordinates.
/// - r_sv: satellite center of mass, in meters ECEF
/// - r_sun: sun position, in meters ECEF
/// - offset: phase center offset, in meters (body frame)
///
/// The body frame is Z pointing to the Earth center, Y orthogonal
/// to the satellite/sun direction and X completing the right handed frame.
pub(crate) fn phase_center_offset(
    r_sv: &Vector3<f64>,
    r_sun: &Vector3<f64>,
    offset: &Vector3<f64>,
) -> Result<Vector3<f64>, Error> {
    let ez = (-r_sv).try_normalize(0.0).ok_or(Error::DegenerateGeometry)?;
    let es = (r_sun - r_sv)
        .try_normalize(0.0)
        .ok_or(Error::DegenerateGeometry)?;

    let ey = ez.cross(&es).try_normalize(0.0).ok_or_else(|| {
        debug!("satellite, earth and sun are aligned");
        Error::DegenerateGeometry
    })?;

    let ex = ey.cross(&ez);

    Ok(offset[0] * ex + offset[1] * ey + offset[2] * ez)
}
