use log::trace;
use nalgebra::Matrix3;

use crate::{
    constants::{EARTH_ANGULAR_VEL_RAD, MAX_PRODUCT_GAP_S, ORBIT_EXTRAPOLATION_ERR_M_S2},
    interp::neville,
    prelude::{ClockEstimate, Epoch, Error, NavigationData, Vector3, SV},
    products::{bracket_index, clock::linear_clock, out_of_span},
};

/// Interpolated precise orbit
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct OrbitInterpolation {
    /// Center of mass position, in meters ECEF
    pub position_m: Vector3<f64>,
    /// Orbital error variance (in m²)
    pub variance_m2: f64,
    /// Clock state embedded in the orbit product, if any
    pub clock: Option<ClockEstimate>,
}

/// Rotation of the ECEF frame, during `dt_s` seconds
fn earth_rotation(dt_s: f64) -> Matrix3<f64> {
    let we = EARTH_ANGULAR_VEL_RAD * dt_s;
    let (we_sin, we_cos) = we.sin_cos();
    Matrix3::new(we_cos, -we_sin, 0.0, we_sin, we_cos, 0.0, 0.0, 0.0, 1.0)
}

impl NavigationData {
    /// Interpolates the precise orbit product, for this [SV] at desired [Epoch],
    /// using a polynomial of the desired order (`order + 1` samples window).
    ///
    /// Each sample is corrected for the Earth rotation that happened
    /// between its sampling instant and `t`.
    pub fn orbit_interpolation(
        &self,
        t: Epoch,
        sv: SV,
        order: usize,
    ) -> Result<OrbitInterpolation, Error> {
        let size = self.orbits.len();

        let window_size = match order.checked_add(1) {
            Some(window_size) => window_size,
            None => {
                trace!("{}({}) - invalid interpolation order {}", t, sv, order);
                return Err(Error::NoEphemerisData(t, sv));
            },
        };

        if size < window_size
            || out_of_span(
                t,
                self.orbits[0].epoch,
                self.orbits[size - 1].epoch,
                MAX_PRODUCT_GAP_S,
            )
        {
            trace!("{}({}) - no precise ephemeris", t, sv);
            return Err(Error::NoEphemerisData(t, sv));
        }

        let index = bracket_index(self.orbits.partition_point(|s| s.epoch < t), size);

        let start = index.saturating_sub(window_size / 2).min(size - window_size);
        let window = &self.orbits[start..start + window_size];

        let mut dt = Vec::with_capacity(window_size);
        let mut entries = Vec::with_capacity(window_size);

        for sample in window {
            match sample.entries.get(&sv) {
                Some(entry) if !entry.is_outage() => {
                    dt.push((sample.epoch - t).to_seconds());
                    entries.push(entry);
                },
                _ => {
                    trace!("{}({}) - precise ephemeris outage", t, sv);
                    return Err(Error::EphemerisOutage(t, sv));
                },
            }
        }

        let (mut x, mut y, mut z) = (
            Vec::with_capacity(window_size),
            Vec::with_capacity(window_size),
            Vec::with_capacity(window_size),
        );

        for (dt_j, entry) in dt.iter().zip(entries.iter()) {
            let rotated = earth_rotation(*dt_j) * entry.position_m;
            x.push(rotated[0]);
            y.push(rotated[1]);
            z.push(rotated[2]);
        }

        let position_m = match (neville(&dt, &x), neville(&dt, &y), neville(&dt, &z)) {
            (Some(x), Some(y), Some(z)) => Vector3::new(x, y, z),
            _ => return Err(Error::NoEphemerisData(t, sv)),
        };

        // orbital error is driven by the bracketing sample
        let bracket = entries[index - start];
        let mut std_m = bracket.position_std_m.norm();

        let (dt_first, dt_last) = (dt[0], dt[order]);
        if dt_first > 0.0 {
            std_m += ORBIT_EXTRAPOLATION_ERR_M_S2 * dt_first.powi(2) / 2.0;
        } else if dt_last < 0.0 {
            std_m += ORBIT_EXTRAPOLATION_ERR_M_S2 * dt_last.powi(2) / 2.0;
        }

        // embedded clock
        let clock = self.orbits.get(index + 1).and_then(|next| {
            let next = next.entries.get(&sv)?;
            let prev = self.orbits[index].entries.get(&sv)?;
            linear_clock(
                (
                    (t - self.orbits[index].epoch).to_seconds(),
                    (t - self.orbits[index + 1].epoch).to_seconds(),
                ),
                (prev.clock_bias(), next.clock_bias()),
                (prev.clock_std_s, next.clock_std_s),
            )
        });

        Ok(OrbitInterpolation {
            position_m,
            variance_m2: std_m.powi(2),
            clock,
        })
    }
}

#[cfg(test)]
mod test {
    use super::earth_rotation;
    use crate::prelude::Vector3;

    #[test]
    fn null_rotation() {
        let r = Vector3::new(1.0E7, -2.0E7, 5.0E6);
        assert_eq!(earth_rotation(0.0) * r, r);
    }

    #[test]
    fn rotation_preserves_norm_and_z() {
        let r = Vector3::new(1.0E7, -2.0E7, 5.0E6);
        for dt in [-900.0, -0.075, 0.075, 300.0] {
            let rotated = earth_rotation(dt) * r;
            assert!((rotated.norm() - r.norm()).abs() < 1.0E-6);
            assert_eq!(rotated[2], r[2]);
        }
    }

    #[test]
    fn rotation_direction() {
        // samples posterior to t are rotated counter clockwise
        let r = Vector3::new(2.6E7, 0.0, 0.0);
        let rotated = earth_rotation(100.0) * r;
        assert!(rotated[1] > 0.0);
        let rotated = earth_rotation(-100.0) * r;
        assert!(rotated[1] < 0.0);
    }
}
