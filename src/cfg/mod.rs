#[cfg(feature = "serde")]
use serde::Deserialize;

use crate::prelude::{Carrier, Constellation, SV};

mod modes;
pub use modes::{
    Alignment, AlignmentBoundary, Direction, OutputPolicy, OverflowPolicy, PositionMode, Profile,
};

fn default_interp_order() -> usize {
    10
}

fn default_epoch_tolerance() -> f64 {
    0.025
}

fn default_max_batch_size() -> usize {
    64
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct Config {
    /// Receiver [Profile]
    #[cfg_attr(feature = "serde", serde(default))]
    pub profile: Profile,
    /// Precise orbit interpolation order.
    /// The interpolation window is `order + 1` samples wide.
    /// Higher orders improve accuracy, at the expense of more calculations
    /// and more sensitivity to data gaps. 10 is the standard value for
    /// 15' sampled products.
    #[cfg_attr(feature = "serde", serde(default = "default_interp_order"))]
    pub interp_order: usize,
    /// Satellite [PositionMode]
    #[cfg_attr(feature = "serde", serde(default))]
    pub position_mode: PositionMode,
    /// Antenna phase center offset frequency.
    /// When None, the first offset defined in the pattern is used.
    #[cfg_attr(feature = "serde", serde(default))]
    pub apc_carrier: Option<Carrier>,
    /// Observations traversal [Direction]
    #[cfg_attr(feature = "serde", serde(default))]
    pub direction: Direction,
    /// Reference [Alignment] policy
    #[cfg_attr(feature = "serde", serde(default))]
    pub alignment: Alignment,
    /// [AlignmentBoundary] comparison
    #[cfg_attr(feature = "serde", serde(default))]
    pub alignment_boundary: AlignmentBoundary,
    /// Maximal time difference (in seconds) between observations
    /// of a single receiver, for them to be considered synchronous.
    #[cfg_attr(feature = "serde", serde(default = "default_epoch_tolerance"))]
    pub epoch_tolerance_s: f64,
    /// Maximal number of observations per synchronized epoch
    #[cfg_attr(feature = "serde", serde(default = "default_max_batch_size"))]
    pub max_batch_size: usize,
    /// [OverflowPolicy] when the batch capacity is exceeded
    #[cfg_attr(feature = "serde", serde(default))]
    pub overflow: OverflowPolicy,
    /// Constellations to process. When None, all constellations are processed.
    #[cfg_attr(feature = "serde", serde(default))]
    pub constellations: Option<Vec<Constellation>>,
    /// Satellites excluded from processing
    #[cfg_attr(feature = "serde", serde(default))]
    pub excluded: Vec<SV>,
    /// Solutions [OutputPolicy]
    #[cfg_attr(feature = "serde", serde(default))]
    pub output: OutputPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile: Profile::default(),
            interp_order: default_interp_order(),
            position_mode: PositionMode::default(),
            apc_carrier: None,
            direction: Direction::default(),
            alignment: Alignment::default(),
            alignment_boundary: AlignmentBoundary::default(),
            epoch_tolerance_s: default_epoch_tolerance(),
            max_batch_size: default_max_batch_size(),
            overflow: OverflowPolicy::default(),
            constellations: None,
            excluded: Vec::new(),
            output: OutputPolicy::default(),
        }
    }
}

impl Config {
    /// Copies and returns [Config] with desired interpolation order
    pub fn with_interp_order(&self, order: usize) -> Self {
        let mut s = self.clone();
        s.interp_order = order;
        s
    }

    /// Copies and returns [Config] with desired [PositionMode]
    pub fn with_position_mode(&self, mode: PositionMode) -> Self {
        let mut s = self.clone();
        s.position_mode = mode;
        s
    }

    /// Copies and returns [Config] with desired antenna phase center frequency
    pub fn with_apc_carrier(&self, carrier: Carrier) -> Self {
        let mut s = self.clone();
        s.apc_carrier = Some(carrier);
        s
    }

    /// Copies and returns [Config] with desired traversal [Direction]
    pub fn with_direction(&self, direction: Direction) -> Self {
        let mut s = self.clone();
        s.direction = direction;
        s
    }

    /// Copies and returns [Config] with desired reference [Alignment]
    pub fn with_alignment(&self, alignment: Alignment) -> Self {
        let mut s = self.clone();
        s.alignment = alignment;
        s
    }

    /// Copies and returns [Config] with desired batch capacity and [OverflowPolicy]
    pub fn with_max_batch_size(&self, size: usize, overflow: OverflowPolicy) -> Self {
        let mut s = self.clone();
        s.max_batch_size = size;
        s.overflow = overflow;
        s
    }

    /// Copies and returns [Config] restricted to these constellations
    pub fn with_constellations(&self, constellations: &[Constellation]) -> Self {
        let mut s = self.clone();
        s.constellations = Some(constellations.to_vec());
        s
    }

    /// Copies and returns [Config] excluding this [SV]
    pub fn with_excluded_sv(&self, sv: SV) -> Self {
        let mut s = self.clone();
        s.excluded.push(sv);
        s
    }

    /// Copies and returns [Config] with desired [Profile] and [OutputPolicy]
    pub fn with_output(&self, profile: Profile, output: OutputPolicy) -> Self {
        let mut s = self.clone();
        s.profile = profile;
        s.output = output;
        s
    }

    /// True if this [SV] should be processed
    pub(crate) fn sv_selected(&self, sv: SV) -> bool {
        let constellation = match &self.constellations {
            Some(constellations) => constellations.contains(&sv.constellation),
            None => true,
        };
        constellation && !self.excluded.contains(&sv)
    }

    /// True when solutions should be aggregated into a single static solution
    pub(crate) fn static_aggregation(&self) -> bool {
        self.output == OutputPolicy::Static && self.profile == Profile::Static
    }
}
