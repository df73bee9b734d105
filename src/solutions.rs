//! Positioning solutions
use crate::prelude::{Epoch, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// [Solution] quality, from the best to the worst
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SolutionStatus {
    /// Ambiguities fixed
    Fix,
    /// Float ambiguities
    Float,
    /// SBAS augmented solution
    Sbas,
    /// Differential pseudo range solution
    Dgps,
    /// Single point positioning
    #[default]
    Single,
    /// Precise point positioning
    Ppp,
    /// Time only (no position) solution
    TimeOnly,
}

impl std::fmt::Display for SolutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Fix => write!(f, "fix"),
            Self::Float => write!(f, "float"),
            Self::Sbas => write!(f, "sbas"),
            Self::Dgps => write!(f, "dgps"),
            Self::Single => write!(f, "single"),
            Self::Ppp => write!(f, "ppp"),
            Self::TimeOnly => write!(f, "time-only"),
        }
    }
}

impl SolutionStatus {
    /// Ranking used when selecting the static solution,
    /// the lowest being preferred. PPP ranks along with fixed solutions.
    pub fn priority(&self) -> u8 {
        match self {
            Self::Fix | Self::Ppp => 1,
            Self::Float => 2,
            Self::Sbas => 3,
            Self::Dgps => 4,
            Self::Single => 5,
            Self::TimeOnly => 6,
        }
    }
}

/// Positioning [Solution], as produced by the estimator
#[derive(Debug, Copy, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Solution {
    /// [Epoch] of resolution
    pub epoch: Epoch,
    /// Receiver position, in meters ECEF
    pub position_m: Vector3<f64>,
    /// [SolutionStatus]
    pub status: SolutionStatus,
}

impl Solution {
    /// Builds new [Solution]
    pub fn new(epoch: Epoch, position_m: Vector3<f64>, status: SolutionStatus) -> Self {
        Self {
            epoch,
            position_m,
            status,
        }
    }
}

/// Retains the best [Solution] of a static run.
/// A candidate replaces the retained solution when it ranks
/// at least as well. The reported [Epoch] is the earliest
/// epoch of all retained candidates.
#[derive(Debug, Default)]
pub(crate) struct StaticAggregator {
    best: Option<(Solution, Vector3<f64>)>,
    epoch: Option<Epoch>,
}

impl StaticAggregator {
    /// Proposes a new candidate, with its reference position
    pub fn push(&mut self, solution: Solution, reference_m: Vector3<f64>) {
        let retain = match &self.best {
            Some((best, _)) => solution.status.priority() <= best.status.priority(),
            None => true,
        };

        if retain {
            self.best = Some((solution, reference_m));

            match self.epoch {
                Some(epoch) if epoch <= solution.epoch => {},
                _ => self.epoch = Some(solution.epoch),
            }
        }
    }

    /// Returns the retained [Solution] and its reference position, if any
    pub fn finalize(self) -> Option<(Solution, Vector3<f64>)> {
        let (mut solution, reference_m) = self.best?;
        if let Some(epoch) = self.epoch {
            solution.epoch = epoch;
        }
        Some((solution, reference_m))
    }
}
