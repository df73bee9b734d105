//! Post processing run
use log::{debug, error, info};

use crate::{
    prelude::{
        Config, EpochBatch, Error, NavigationData, Observation, SatelliteStateResolver, Solution,
        SolutionStatus, SunSource, Synchronizer, Vector3,
    },
    solutions::StaticAggregator,
};

#[cfg(doc)]
use crate::prelude::Receiver;

/// Answer of the [ProgressSink]
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub enum Progress {
    /// Proceed with the next epoch
    #[default]
    Continue,
    /// Stop the run
    Abort,
}

/// [ProgressSink] is notified once per epoch and may interrupt the run.
pub trait ProgressSink {
    /// Receives a status line, returns whether the run should proceed.
    fn message(&mut self, message: &str) -> Progress;
}

/// [OutputSink] receives the [Solution]s
pub trait OutputSink {
    /// Called once before processing, with the identifiers of the products in use.
    fn header(&mut self, products: &[String]);
    /// New [Solution], with the reference position (in meters ECEF).
    fn solution(&mut self, solution: &Solution, reference_m: &Vector3<f64>);
}

/// [Estimator] is the positioning algorithm. It is fed one [EpochBatch]
/// at a time, in traversal order, and may carry its state from one epoch to another.
/// Satellite states are obtained through the [SatelliteStateResolver].
pub trait Estimator {
    /// Resets the internal state, prior a new run.
    fn reset(&mut self);
    /// Processes this [EpochBatch]. Returns None when no solution
    /// could be obtained for this epoch.
    fn process(
        &mut self,
        batch: &EpochBatch,
        resolver: &SatelliteStateResolver,
    ) -> Option<Solution>;
    /// Reference station position (in meters ECEF), reported along each [Solution].
    fn reference_position(&self) -> Vector3<f64>;
}

/// How a run terminated
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub enum RunStatus {
    /// All epochs were processed
    #[default]
    Completed,
    /// The [ProgressSink] requested to stop
    Aborted,
}

/// [RunSummary] of one processing run
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// [RunStatus]
    pub status: RunStatus,
    /// Number of synchronized epochs
    pub epochs: usize,
    /// Number of epochs that did not produce any solution
    pub skipped: usize,
    /// Number of solutions produced by the [Estimator]
    pub solutions: usize,
}

/// Sorts observations in chronological order. Observations that lie within
/// `tolerance_s` of the first observation of their group are then grouped
/// per [Receiver] (rover first), so that timestamp jitter between both
/// receivers does not split one receiver's epoch.
fn sort_observations(observations: &mut [Observation], tolerance_s: f64) {
    observations.sort_by(|a, b| a.epoch.cmp(&b.epoch));

    let n = observations.len();
    let mut start = 0;

    while start < n {
        let t0 = observations[start].epoch;
        let mut end = start + 1;

        while end < n && (observations[end].epoch - t0).to_seconds() <= tolerance_s {
            end += 1;
        }

        observations[start..end].sort_by_key(|obs| obs.receiver);
        start = end;
    }
}

/// [RunContext] gathers everything a processing run needs.
/// Products are only read, while the observations are owned and
/// traversed by the [Synchronizer].
pub struct RunContext<'a> {
    cfg: Config,
    nav: &'a NavigationData,
    observations: Vec<Observation>,
    sync: Synchronizer,
    sun: Option<&'a dyn SunSource>,
}

impl<'a> RunContext<'a> {
    /// Prepares a new run.
    /// Observations do not have to be sorted: they are sorted in chronological
    /// order here, each receiver's epoch kept contiguous.
    pub fn new(
        cfg: Config,
        nav: &'a NavigationData,
        mut observations: Vec<Observation>,
    ) -> Result<Self, Error> {
        if observations.is_empty() {
            error!("no observation data");
            return Err(Error::NoObservationData);
        }

        if nav.is_empty() {
            error!("no navigation data");
            return Err(Error::NoNavigationData);
        }

        sort_observations(&mut observations, cfg.epoch_tolerance_s);

        let sync = Synchronizer::from_config(&cfg);

        Ok(Self {
            cfg,
            nav,
            observations,
            sync,
            sun: None,
        })
    }

    /// Defines the [SunSource], used by the antenna phase center correction
    pub fn with_sun_source(mut self, sun: &'a dyn SunSource) -> Self {
        self.sun = Some(sun);
        self
    }

    /// Observations, in chronological order
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Processes all epochs, from the first one in the traversal direction.
    /// Solutions are either streamed to the [OutputSink] or only the best
    /// static solution is, once all epochs were processed.
    pub fn run<E: Estimator, O: OutputSink, P: ProgressSink>(
        &mut self,
        estimator: &mut E,
        output: &mut O,
        progress: &mut P,
    ) -> Result<RunSummary, Error> {
        self.sync.reset();
        estimator.reset();

        output.header(self.nav.products());

        let mut resolver = SatelliteStateResolver::new(self.nav, &self.cfg);
        if let Some(sun) = self.sun {
            resolver = resolver.with_sun_source(sun);
        }

        let static_aggregation = self.cfg.static_aggregation();

        let mut summary = RunSummary::default();
        let mut aggregator = StaticAggregator::default();
        let mut status = Option::<SolutionStatus>::None;

        loop {
            if let Some(epoch) = self.sync.peek_epoch(&self.observations) {
                let quality = match status {
                    Some(status) => status.to_string(),
                    None => "none".to_string(),
                };

                if progress.message(&format!("processing : {} Q={}", epoch, quality))
                    == Progress::Abort
                {
                    info!("{} - aborted", epoch);
                    summary.status = RunStatus::Aborted;
                    break;
                }
            }

            let mut batch = match self.sync.next(&self.observations) {
                Ok(Some(batch)) => batch,
                Ok(None) => break,
                Err(e) => {
                    error!("{}", e);
                    summary.epochs += 1;
                    summary.skipped += 1;
                    continue;
                },
            };

            summary.epochs += 1;

            batch.retain(|obs| self.cfg.sv_selected(obs.sv));

            if batch.is_empty() {
                debug!("{}", Error::EmptyBatch(batch.epoch()));
                summary.skipped += 1;
                continue;
            }

            let solution = match estimator.process(&batch, &resolver) {
                Some(solution) => solution,
                None => {
                    debug!("{}", Error::NoSolution(batch.epoch()));
                    summary.skipped += 1;
                    continue;
                },
            };

            status = Some(solution.status);
            summary.solutions += 1;

            let reference_m = estimator.reference_position();

            if static_aggregation {
                aggregator.push(solution, reference_m);
            } else {
                output.solution(&solution, &reference_m);
            }
        }

        if static_aggregation {
            if let Some((solution, reference_m)) = aggregator.finalize() {
                info!("{} - static solution ({})", solution.epoch, solution.status);
                output.solution(&solution, &reference_m);
            }
        }

        info!(
            "run {:?}: {} epochs, {} skipped, {} solutions",
            summary.status, summary.epochs, summary.skipped, summary.solutions
        );

        Ok(summary)
    }
}
