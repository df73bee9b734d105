use log::trace;

use crate::{
    constants::{CLOCK_EXTRAPOLATION_ERR_M_S, MAX_PRODUCT_GAP_S, SPEED_OF_LIGHT_M_S},
    prelude::{Epoch, Error, NavigationData, SV},
    products::{bracket_index, out_of_span},
};

/// Interpolated satellite clock state
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ClockEstimate {
    /// Clock bias (in seconds)
    pub bias_s: f64,
    /// Clock bias error variance (in m²)
    pub variance_m2: f64,
}

/// Piecewise linear clock interpolation, between two bracketing samples.
/// - dt_s: (t - t_0, t - t_1) in seconds
/// - bias_s: (bias_0, bias_1) in seconds, null meaning missing data
/// - std_s: (std_0, std_1) in seconds
///
/// Prior (or after) the bracket, the closest value is held
/// and the error grows linearly. Returns None on data gap.
pub(crate) fn linear_clock(
    dt_s: (f64, f64),
    bias_s: (f64, f64),
    std_s: (f64, f64),
) -> Option<ClockEstimate> {
    let (dt0, dt1) = dt_s;
    let (c0, c1) = bias_s;

    let (bias_s, std_m) = if dt0 <= 0.0 {
        if c0 == 0.0 {
            return None;
        }
        (c0, std_s.0 * SPEED_OF_LIGHT_M_S - CLOCK_EXTRAPOLATION_ERR_M_S * dt0)
    } else if dt1 >= 0.0 {
        if c1 == 0.0 {
            return None;
        }
        (c1, std_s.1 * SPEED_OF_LIGHT_M_S + CLOCK_EXTRAPOLATION_ERR_M_S * dt1)
    } else if c0 != 0.0 && c1 != 0.0 {
        let bias_s = (c1 * dt0 - c0 * dt1) / (dt0 - dt1);
        // error is driven by the closest sample, whose stored
        // deviation is not scaled to meters in this branch
        let (std_s, dt) = if dt0 < -dt1 {
            (std_s.0, dt0)
        } else {
            (std_s.1, dt1)
        };
        (bias_s, std_s + CLOCK_EXTRAPOLATION_ERR_M_S * dt.abs())
    } else {
        return None;
    };

    Some(ClockEstimate {
        bias_s,
        variance_m2: std_m.powi(2),
    })
}

impl NavigationData {
    /// Interpolates the precise clock product, for this [SV] at desired [Epoch].
    ///
    /// Returns [Error::NoClockData] when no clock product covers this [Epoch]:
    /// the caller should then fall back to the clock embedded in the orbit product.
    /// Returns [Error::ClockOutage] when the product exists but does not hold
    /// a valid bias for this [SV] around this [Epoch].
    pub fn clock_interpolation(&self, t: Epoch, sv: SV) -> Result<ClockEstimate, Error> {
        let size = self.clocks.len();

        if size < 2
            || out_of_span(
                t,
                self.clocks[0].epoch,
                self.clocks[size - 1].epoch,
                MAX_PRODUCT_GAP_S,
            )
        {
            trace!("{}({}) - no precise clock", t, sv);
            return Err(Error::NoClockData(t, sv));
        }

        let index = bracket_index(self.clocks.partition_point(|s| s.epoch < t), size);
        let (s0, s1) = (&self.clocks[index], &self.clocks[index + 1]);

        let (e0, e1) = (
            s0.entries.get(&sv).copied().unwrap_or_default(),
            s1.entries.get(&sv).copied().unwrap_or_default(),
        );

        linear_clock(
            ((t - s0.epoch).to_seconds(), (t - s1.epoch).to_seconds()),
            (e0.bias_s, e1.bias_s),
            (e0.std_s, e1.std_s),
        )
        .ok_or_else(|| {
            trace!("{}({}) - precise clock outage", t, sv);
            Error::ClockOutage(t, sv)
        })
    }
}
