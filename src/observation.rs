//! Receiver observations
use crate::prelude::{Carrier, Epoch, SV};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Receiver that produced an [Observation]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Receiver {
    /// Rover (receiver #1)
    #[default]
    Rover,
    /// Reference station (receiver #2)
    Reference,
}

impl std::fmt::Display for Receiver {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Rover => write!(f, "rover"),
            Self::Reference => write!(f, "reference"),
        }
    }
}

/// Signal measurement, on a specific [Carrier]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Signal {
    /// [Carrier] frequency.
    pub carrier: Carrier,
    /// Pseudo range observation, expressed in meters.
    pub pseudo_range_m: Option<f64>,
    /// Phase range observation, expressed in meters.
    pub phase_range_m: Option<f64>,
    /// Possible doppler observation (in Hz/Hz).
    pub doppler: Option<f64>,
    /// Possible SNR indication (in dB/Hz).
    pub snr_dbhz: Option<f64>,
}

impl Signal {
    /// Creates new pseudo range [Signal] (in meters), with possible
    /// SNR in dB/Hz.
    pub fn pseudo_range(carrier: Carrier, range_m: f64, snr_dbhz: Option<f64>) -> Self {
        Self {
            snr_dbhz,
            carrier,
            doppler: None,
            phase_range_m: None,
            pseudo_range_m: Some(range_m),
        }
    }

    /// Creates new phase range [Signal] (in meters), with possible
    /// SNR in dB/Hz.
    pub fn phase_range(carrier: Carrier, range_m: f64, snr_dbhz: Option<f64>) -> Self {
        Self {
            snr_dbhz,
            carrier,
            doppler: None,
            pseudo_range_m: None,
            phase_range_m: Some(range_m),
        }
    }

    /// Copies and returns [Signal] with doppler measurement
    pub fn with_doppler(&self, doppler: f64) -> Self {
        let mut s = self.clone();
        s.doppler = Some(doppler);
        s
    }
}

/// [Observation] of one [SV] by one [Receiver]
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Sampling [Epoch]
    pub epoch: Epoch,
    /// [Receiver] that produced this [Observation]
    pub receiver: Receiver,
    /// Observed [SV]
    pub sv: SV,
    /// Signal measurements
    pub signals: Vec<Signal>,
}

impl Observation {
    /// Builds new [Observation] without any measurement
    pub fn new(epoch: Epoch, receiver: Receiver, sv: SV) -> Self {
        Self {
            epoch,
            receiver,
            sv,
            signals: Vec::with_capacity(4),
        }
    }

    /// Copies and returns [Observation] with one more [Signal]
    pub fn with_signal(mut self, signal: Signal) -> Self {
        self.signals.push(signal);
        self
    }

    /// Returns the [Signal] observed on this [Carrier], if any
    pub fn signal(&self, carrier: Carrier) -> Option<&Signal> {
        self.signals.iter().find(|s| s.carrier == carrier)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn observation_signals() {
        let t = Epoch::from_str("2020-06-25T00:00:00 GPST").unwrap();
        let g01 = SV::from_str("G01").unwrap();

        let obs = Observation::new(t, Receiver::Rover, g01)
            .with_signal(Signal::pseudo_range(Carrier::L1, 2.0E7, Some(45.0)))
            .with_signal(Signal::phase_range(Carrier::L2, 2.0E7, None).with_doppler(-1200.0));

        assert_eq!(obs.signals.len(), 2);

        let l1 = obs.signal(Carrier::L1).unwrap();
        assert_eq!(l1.pseudo_range_m, Some(2.0E7));
        assert_eq!(l1.snr_dbhz, Some(45.0));

        let l2 = obs.signal(Carrier::L2).unwrap();
        assert_eq!(l2.phase_range_m, Some(2.0E7));
        assert_eq!(l2.doppler, Some(-1200.0));

        assert!(obs.signal(Carrier::L5).is_none());
        assert_eq!(Receiver::Reference.to_string(), "reference");
    }
}
