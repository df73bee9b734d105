#[cfg(feature = "serde")]
use serde::Deserialize;

/// Reference station alignment policy: how the reference epoch
/// is selected for each rover epoch.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub enum Alignment {
    /// Select the first reference epoch that is not earlier than the rover
    /// epoch (minus tolerance). Typically used when reference observations
    /// are to be interpolated.
    /// Reference epochs are skipped while `t_ref - t_rover <= -tolerance`
    /// (with [AlignmentBoundary::Exclusive]).
    Preferred,
    /// Select the latest reference epoch that does not lie in the future
    /// of the rover epoch (plus tolerance). A reference epoch may then
    /// be reused for several rover epochs, when the reference site samples
    /// at a lower rate. Probing stops on the first reference epoch for which
    /// `t_ref - t_rover > tolerance` (with [AlignmentBoundary::Exclusive]).
    #[default]
    NearestPreceding,
}

impl std::fmt::Display for Alignment {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Preferred => write!(f, "preferred"),
            Self::NearestPreceding => write!(f, "nearest-preceding"),
        }
    }
}

/// Comparison used at the exact [Alignment] tolerance boundary.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub enum AlignmentBoundary {
    /// A reference epoch exactly at the tolerance boundary is not
    /// considered beyond it (strict comparison).
    #[default]
    Exclusive,
    /// A reference epoch exactly at the tolerance boundary is considered
    /// beyond it.
    Inclusive,
}

impl AlignmentBoundary {
    /// True if `dt_s` lies beyond `threshold_s`
    pub(crate) fn beyond(&self, dt_s: f64, threshold_s: f64) -> bool {
        match self {
            Self::Exclusive => dt_s > threshold_s,
            Self::Inclusive => dt_s >= threshold_s,
        }
    }
}

/// Observations traversal direction
#[derive(Default, Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub enum Direction {
    /// Chronological processing
    #[default]
    Forward,
    /// Reversed processing, from the latest observation
    Backward,
}

/// Reference point of the resolved satellite position
#[derive(Default, Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub enum PositionMode {
    /// Satellite center of mass, as described by the precise products
    CenterOfMass,
    /// Satellite antenna phase center (requires antenna patterns)
    #[default]
    AntennaPhaseCenter,
}

/// Receiver profile
#[derive(Default, Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub enum Profile {
    /// Receiver held in static
    #[default]
    Static,
    /// Moving receiver
    Kinematic,
}

/// Solutions output policy
#[derive(Default, Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub enum OutputPolicy {
    /// Each solution is forwarded as soon as it is resolved
    #[default]
    Streaming,
    /// Only the best solution of the run is forwarded, at the end of the run.
    /// Only applies to [Profile::Static].
    Static,
}

/// Behavior when a synchronized epoch exceeds the batch capacity
#[derive(Default, Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub enum OverflowPolicy {
    /// Rover observations are kept first, then reference observations,
    /// until the capacity is reached. The excess is dropped with a warning.
    #[default]
    Truncate,
    /// The whole epoch is rejected
    Reject,
}
