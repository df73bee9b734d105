#![doc = include_str!("../README.md")]
#![cfg_attr(docrs, feature(doc_cfg))]

extern crate gnss_rs as gnss;

// private modules
mod antenna;
mod carrier;
mod cfg;
mod constants;
mod error;
mod interp;
mod observation;
mod processing;
mod products;
mod resolver;
mod solutions;
mod sync;

#[cfg(test)]
mod tests;

// prelude
pub mod prelude {
    pub use crate::antenna::{AlmanacSun, AntennaPattern, SunSource};
    pub use crate::carrier::Carrier;
    pub use crate::cfg::{
        Alignment, AlignmentBoundary, Config, Direction, OutputPolicy, OverflowPolicy,
        PositionMode, Profile,
    };
    pub use crate::constants::{EARTH_ANGULAR_VEL_RAD, SPEED_OF_LIGHT_M_S};
    pub use crate::error::Error;
    pub use crate::interp::neville;
    pub use crate::observation::{Observation, Receiver, Signal};
    pub use crate::processing::{
        Estimator, OutputSink, Progress, ProgressSink, RunContext, RunStatus, RunSummary,
    };
    pub use crate::products::{
        ClockEntry, ClockEstimate, ClockSample, EphemerisEntry, EphemerisSample,
        NavigationData, OrbitInterpolation,
    };
    pub use crate::resolver::{SatelliteState, SatelliteStateResolver};
    pub use crate::solutions::{Solution, SolutionStatus};
    pub use crate::sync::{EpochBatch, Synchronizer};
    // re-export
    pub use anise::prelude::{Almanac, Frame};
    pub use gnss::prelude::{Constellation, SV};
    pub use hifitime::{Duration, Epoch, TimeScale, Unit};
    pub use nalgebra::Vector3;
}

// pub export
pub use error::Error;
