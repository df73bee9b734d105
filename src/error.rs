use thiserror::Error;

use anise::errors::AlmanacError;

use crate::prelude::{Epoch, SV};

#[cfg(doc)]
use crate::prelude::OverflowPolicy;

#[derive(Debug, PartialEq, Error)]
pub enum Error {
    /// Not enough precise orbit samples, or the requested [Epoch]
    /// lies too far away from the precise orbit product.
    /// This is local to the [SV] being resolved.
    #[error("{0}({1}) - no precise ephemeris")]
    NoEphemerisData(Epoch, SV),

    /// At least one precise orbit sample of the interpolation window
    /// is missing for this [SV].
    #[error("{0}({1}) - precise ephemeris outage")]
    EphemerisOutage(Epoch, SV),

    /// No dedicated precise clock product covers this [Epoch].
    /// The satellite state resolver falls back to the clock term
    /// embedded in the precise orbit product: this is not reported to the user.
    #[error("{0}({1}) - no precise clock")]
    NoClockData(Epoch, SV),

    /// The precise clock product is defined but does not hold
    /// a usable value for this [SV] at this [Epoch].
    #[error("{0}({1}) - precise clock outage")]
    ClockOutage(Epoch, SV),

    /// The satellite attitude frame cannot be formed (nadir or sun geometry
    /// is degenerated). The antenna phase center correction is skipped.
    #[error("degenerate satellite attitude geometry")]
    DegenerateGeometry,

    /// All observations of this epoch got filtered out.
    #[error("{0} - empty epoch")]
    EmptyBatch(Epoch),

    /// The positioning estimator did not produce any solution for this epoch.
    #[error("{0} - no solution")]
    NoSolution(Epoch),

    /// Synchronized epoch exceeds the batch capacity, and
    /// the [OverflowPolicy::Reject] has been selected.
    #[error("{epoch} - {size} observations exceed batch capacity ({capacity})")]
    BatchOverflow {
        epoch: Epoch,
        size: usize,
        capacity: usize,
    },

    /// Run cannot proceed without any observations
    #[error("no observation data")]
    NoObservationData,

    /// Run cannot proceed without any precise products
    #[error("no navigation data")]
    NoNavigationData,

    /// Precise products must be strictly sorted in chronological order
    #[error("products not in chronological order at {0}")]
    UnsortedProducts(Epoch),

    /// Sun position determination failed
    #[error("issue with Almanac: {0}")]
    Almanac(AlmanacError),
}
