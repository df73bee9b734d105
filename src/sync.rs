//! Rover / reference observations synchronization
use log::{debug, trace, warn};

use crate::prelude::{
    Alignment, AlignmentBoundary, Config, Direction, Epoch, Error, Observation, OverflowPolicy,
    Receiver,
};

/// [EpochBatch] gathers all [Observation]s of one synchronized epoch:
/// the rover run first, then the reference run, each in chronological order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EpochBatch {
    epoch: Epoch,
    observations: Vec<Observation>,
    truncated: bool,
}

impl EpochBatch {
    fn new(epoch: Epoch, capacity: usize) -> Self {
        Self {
            epoch,
            truncated: false,
            observations: Vec::with_capacity(capacity),
        }
    }

    /// Rover [Epoch] of this batch
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Total number of [Observation]s
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// True if this batch does not contain any [Observation]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// All [Observation]s, rover first
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Rover [Observation]s
    pub fn rover(&self) -> impl Iterator<Item = &Observation> {
        self.observations
            .iter()
            .filter(|obs| obs.receiver == Receiver::Rover)
    }

    /// Reference [Observation]s
    pub fn reference(&self) -> impl Iterator<Item = &Observation> {
        self.observations
            .iter()
            .filter(|obs| obs.receiver == Receiver::Reference)
    }

    /// True if some observations had to be dropped, because
    /// this epoch exceeded the batch capacity.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub(crate) fn retain<F: FnMut(&Observation) -> bool>(&mut self, f: F) {
        self.observations.retain(f);
    }
}

/// [Synchronizer] forms [EpochBatch]es out of a single time sorted
/// observation set, that mixes rover and reference observations.
///
/// It holds two cursors (one per receiver) that only progress in the
/// traversal [Direction]. The same reference run may be used
/// for several rover epochs, when the reference site is sampled at a lower rate.
/// Cursors are expressed in traversal coordinates: index 0 is the
/// latest observation when traversing backwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Synchronizer {
    direction: Direction,
    alignment: Alignment,
    boundary: AlignmentBoundary,
    tolerance_s: f64,
    capacity: usize,
    overflow: OverflowPolicy,
    rover: usize,
    reference: usize,
}

impl Synchronizer {
    /// Builds a new [Synchronizer] from user [Config]
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            direction: cfg.direction,
            alignment: cfg.alignment,
            boundary: cfg.alignment_boundary,
            tolerance_s: cfg.epoch_tolerance_s,
            capacity: cfg.max_batch_size,
            overflow: cfg.overflow,
            rover: 0,
            reference: 0,
        }
    }

    /// Rewinds both cursors, to start a new run.
    pub fn reset(&mut self) {
        self.rover = 0;
        self.reference = 0;
    }

    /// Current (rover, reference) cursors, in traversal coordinates.
    pub fn cursors(&self) -> (usize, usize) {
        (self.rover, self.reference)
    }

    /// [Epoch] of the next rover [Observation], if any.
    pub fn peek_epoch(&self, observations: &[Observation]) -> Option<Epoch> {
        let n = observations.len();
        (self.rover..n)
            .map(|k| &observations[self.index(n, k)])
            .find(|obs| obs.receiver == Receiver::Rover)
            .map(|obs| obs.epoch)
    }

    /// Converts traversal coordinate to array index
    fn index(&self, n: usize, k: usize) -> usize {
        match self.direction {
            Direction::Forward => k,
            Direction::Backward => n - 1 - k,
        }
    }

    /// Time difference `t1 - t0` (in seconds) expressed in the traversal direction
    fn dt(&self, t1: Epoch, t0: Epoch) -> f64 {
        let dt = (t1 - t0).to_seconds();
        match self.direction {
            Direction::Forward => dt,
            Direction::Backward => -dt,
        }
    }

    /// Locates the next run of this [Receiver], from traversal coordinate `cursor`.
    /// A run is a sequence of consecutive observations of this receiver,
    /// within tolerance of the first one.
    /// Returns (start, length), length being null when no run remains.
    fn scan(&self, observations: &[Observation], cursor: usize, receiver: Receiver) -> (usize, usize) {
        let n = observations.len();

        let mut start = cursor;
        while start < n && observations[self.index(n, start)].receiver != receiver {
            start += 1;
        }

        if start >= n {
            return (n, 0);
        }

        let t0 = observations[self.index(n, start)].epoch;
        let mut len = 0;

        while start + len < n {
            let obs = &observations[self.index(n, start + len)];
            if obs.receiver != receiver || self.dt(obs.epoch, t0) > self.tolerance_s {
                break;
            }
            len += 1;
        }

        (start, len)
    }

    /// Converts a traversal run to a chronological array range
    fn range(&self, n: usize, start: usize, len: usize) -> std::ops::Range<usize> {
        match self.direction {
            Direction::Forward => start..start + len,
            Direction::Backward => n - start - len..n - start,
        }
    }

    /// Positions the reference cursor, according to the [Alignment] policy.
    fn align(&mut self, observations: &[Observation], t_rover: Epoch) {
        let n = observations.len();

        match self.alignment {
            Alignment::Preferred => loop {
                let (start, len) = self.scan(observations, self.reference, Receiver::Reference);
                self.reference = start;

                if len == 0 {
                    break;
                }

                let dt = self.dt(observations[self.index(n, start)].epoch, t_rover);
                if self.boundary.beyond(dt, -self.tolerance_s) {
                    break;
                }

                self.reference += len;
            },
            Alignment::NearestPreceding => {
                let mut probe = self.reference;
                loop {
                    let (start, len) = self.scan(observations, probe, Receiver::Reference);
                    if len == 0 {
                        break;
                    }

                    let dt = self.dt(observations[self.index(n, start)].epoch, t_rover);
                    if self.boundary.beyond(dt, self.tolerance_s) {
                        break;
                    }

                    self.reference = start;
                    probe = start + len;
                }
            },
        }
    }

    /// Forms the next [EpochBatch].
    /// Returns None once all rover observations have been consumed.
    /// With [OverflowPolicy::Reject], an epoch that exceeds the batch capacity
    /// returns [Error::BatchOverflow]: cursors still progress,
    /// so the next call proceeds with the next epoch.
    pub fn next(&mut self, observations: &[Observation]) -> Result<Option<EpochBatch>, Error> {
        let n = observations.len();

        let (rover_start, rover_len) = self.scan(observations, self.rover, Receiver::Rover);
        if rover_len == 0 {
            trace!("end of rover observations");
            self.rover = rover_start;
            return Ok(None);
        }

        let t_rover = observations[self.index(n, rover_start)].epoch;

        self.align(observations, t_rover);

        let (ref_start, ref_len) = self.scan(observations, self.reference, Receiver::Reference);
        self.reference = ref_start;
        self.rover = rover_start + rover_len;

        let size = rover_len + ref_len;

        if size > self.capacity {
            match self.overflow {
                OverflowPolicy::Reject => {
                    return Err(Error::BatchOverflow {
                        epoch: t_rover,
                        size,
                        capacity: self.capacity,
                    });
                },
                OverflowPolicy::Truncate => {
                    warn!(
                        "{} - {} observations exceed batch capacity ({}): truncated",
                        t_rover, size, self.capacity
                    );
                },
            }
        }

        let mut batch = EpochBatch::new(t_rover, size.min(self.capacity));
        batch.truncated = size > self.capacity;

        for i in self
            .range(n, rover_start, rover_len)
            .chain(self.range(n, ref_start, ref_len))
            .take(self.capacity)
        {
            batch.observations.push(observations[i].clone());
        }

        debug!(
            "{} - synchronized epoch: {} rover, {} reference observations",
            t_rover, rover_len, ref_len
        );

        Ok(Some(batch))
    }
}
