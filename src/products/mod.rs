//! Precise products (orbits, clocks and antenna patterns)
use std::collections::HashMap;

use itertools::Itertools;
use log::debug;

use crate::prelude::{AntennaPattern, Epoch, Error, Vector3, SV};

mod clock;
mod orbit;

pub use clock::ClockEstimate;
pub use orbit::OrbitInterpolation;

/// Precise orbit record of one [SV], within one [EphemerisSample]
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct EphemerisEntry {
    /// Center of mass position, in meters ECEF.
    /// A null vector is considered as missing data.
    pub position_m: Vector3<f64>,
    /// Possible clock bias (in seconds).
    /// A null value is considered as missing data.
    pub clock_bias_s: Option<f64>,
    /// Position standard deviation, per axis, in meters.
    pub position_std_m: Vector3<f64>,
    /// Clock bias standard deviation, in seconds.
    pub clock_std_s: f64,
}

impl EphemerisEntry {
    /// Builds new [EphemerisEntry] from position in meters ECEF
    pub fn from_position_m(x_m: f64, y_m: f64, z_m: f64) -> Self {
        Self {
            position_m: Vector3::new(x_m, y_m, z_m),
            ..Default::default()
        }
    }

    /// Copies and returns [EphemerisEntry] with clock bias (in seconds)
    pub fn with_clock_bias(&self, bias_s: f64) -> Self {
        let mut s = *self;
        s.clock_bias_s = Some(bias_s);
        s
    }

    /// Copies and returns [EphemerisEntry] with position standard deviation (in meters)
    pub fn with_position_std(&self, std_x_m: f64, std_y_m: f64, std_z_m: f64) -> Self {
        let mut s = *self;
        s.position_std_m = Vector3::new(std_x_m, std_y_m, std_z_m);
        s
    }

    /// Copies and returns [EphemerisEntry] with clock standard deviation (in seconds)
    pub fn with_clock_std(&self, std_s: f64) -> Self {
        let mut s = *self;
        s.clock_std_s = std_s;
        s
    }

    pub(crate) fn is_outage(&self) -> bool {
        self.position_m.norm() <= 0.0
    }

    pub(crate) fn clock_bias(&self) -> f64 {
        self.clock_bias_s.unwrap_or_default()
    }
}

/// Precise orbit sample: all [SV] positions at a specific [Epoch]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EphemerisSample {
    /// Sampling [Epoch]
    pub epoch: Epoch,
    /// Records, per [SV]
    pub entries: HashMap<SV, EphemerisEntry>,
}

impl EphemerisSample {
    /// Builds a new empty [EphemerisSample]
    pub fn new(epoch: Epoch) -> Self {
        Self {
            epoch,
            entries: HashMap::with_capacity(32),
        }
    }

    /// Adds one [SV] record to this [EphemerisSample]
    pub fn with_entry(mut self, sv: SV, entry: EphemerisEntry) -> Self {
        self.entries.insert(sv, entry);
        self
    }
}

/// Precise clock record of one [SV], within one [ClockSample]
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ClockEntry {
    /// Clock bias, in seconds. A null bias is considered as missing data.
    pub bias_s: f64,
    /// Clock bias standard deviation, in seconds.
    pub std_s: f64,
}

impl ClockEntry {
    pub fn new(bias_s: f64, std_s: f64) -> Self {
        Self { bias_s, std_s }
    }
}

/// Precise clock sample: all [SV] clock states at a specific [Epoch]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClockSample {
    /// Sampling [Epoch]
    pub epoch: Epoch,
    /// Records, per [SV]
    pub entries: HashMap<SV, ClockEntry>,
}

impl ClockSample {
    /// Builds a new empty [ClockSample]
    pub fn new(epoch: Epoch) -> Self {
        Self {
            epoch,
            entries: HashMap::with_capacity(32),
        }
    }

    /// Adds one [SV] record to this [ClockSample]
    pub fn with_entry(mut self, sv: SV, entry: ClockEntry) -> Self {
        self.entries.insert(sv, entry);
        self
    }
}

/// [NavigationData] gathers all precise products, loaded once
/// and then only read during the whole run.
#[derive(Debug, Clone, Default)]
pub struct NavigationData {
    /// Precise orbits, in chronological order
    pub(crate) orbits: Vec<EphemerisSample>,
    /// Precise clocks, in chronological order
    pub(crate) clocks: Vec<ClockSample>,
    /// Satellite antenna patterns
    pub(crate) antennas: HashMap<SV, AntennaPattern>,
    /// Identifiers of the products that were loaded
    pub(crate) products: Vec<String>,
}

/// Verifies strict chronological order
fn chronological<T, F: Fn(&T) -> Epoch>(samples: &[T], epoch: F) -> Result<(), Error> {
    match samples
        .iter()
        .tuple_windows()
        .find(|(prev, next)| epoch(*next) <= epoch(*prev))
    {
        Some((_, next)) => Err(Error::UnsortedProducts(epoch(next))),
        None => Ok(()),
    }
}

impl NavigationData {
    /// Builds new [NavigationData] from precise orbit and clock samples.
    /// Both sets must be strictly sorted in chronological order.
    /// The clock set may be empty, in which case the clock terms embedded in
    /// the orbit samples are used.
    pub fn new(orbits: Vec<EphemerisSample>, clocks: Vec<ClockSample>) -> Result<Self, Error> {
        chronological(&orbits, |s| s.epoch)?;
        chronological(&clocks, |s| s.epoch)?;

        debug!(
            "navigation data: {} orbit samples, {} clock samples",
            orbits.len(),
            clocks.len()
        );

        Ok(Self {
            orbits,
            clocks,
            antennas: HashMap::new(),
            products: Vec::new(),
        })
    }

    /// Copies and returns [NavigationData] with [AntennaPattern] for this [SV]
    pub fn with_antenna(mut self, sv: SV, pattern: AntennaPattern) -> Self {
        self.antennas.insert(sv, pattern);
        self
    }

    /// Copies and returns [NavigationData] with one more product identifier
    /// (typically a file name), reported in the solution header.
    pub fn with_product(mut self, identifier: &str) -> Self {
        self.products.push(identifier.to_string());
        self
    }

    /// Precise orbit samples
    pub fn orbit_samples(&self) -> &[EphemerisSample] {
        &self.orbits
    }

    /// Precise clock samples
    pub fn clock_samples(&self) -> &[ClockSample] {
        &self.clocks
    }

    /// [AntennaPattern] for this [SV], if known
    pub fn antenna(&self, sv: SV) -> Option<&AntennaPattern> {
        self.antennas.get(&sv)
    }

    /// Product identifiers
    pub fn products(&self) -> &[String] {
        &self.products
    }

    /// True when no precise orbit has been loaded: satellite states
    /// cannot be resolved, whatever the clock product.
    pub fn is_empty(&self) -> bool {
        self.orbits.is_empty()
    }

    /// True if this [SV] appears at least once in the precise orbit product
    pub(crate) fn has_orbit(&self, sv: SV) -> bool {
        self.orbits.iter().any(|s| s.entries.contains_key(&sv))
    }
}

/// Returns the index of the sample preceding `t`,
/// `first` being the index of the first sample not earlier than `t`
/// within a set of `size` samples (size > 0).
pub(crate) fn bracket_index(first: usize, size: usize) -> usize {
    first.min(size - 1).saturating_sub(1)
}

/// True when `t` is too far away from the [first, last] product span
pub(crate) fn out_of_span(t: Epoch, first: Epoch, last: Epoch, max_gap_s: f64) -> bool {
    (t - first).to_seconds() < -max_gap_s || (t - last).to_seconds() > max_gap_s
}
