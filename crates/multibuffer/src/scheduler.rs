//! The lane scheduler.
//!
//! [`JobManager`] keeps up to N jobs resident in lanes, N being the width of
//! the injected [`BlockTransform`]. Every [`advance`](JobManager::advance)
//! moves all unfinished lanes forward by the shortest remaining length among
//! them, so the provider always receives the same number of whole blocks per
//! lane and no lane runs past the end of its job. Finished jobs are handed
//! back one at a time by [`reap`](JobManager::reap).

use std::fmt;

use kernels::{Algorithm, BlockTransform, LaneInput};
use logging::debug_log;

use crate::job::Job;

/// Counters describing scheduler activity, for tests and tuning.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SchedulerStats {
    /// Provider invocations.
    pub advances: u64,
    /// Blocks absorbed, summed over lanes.
    pub blocks: u64,
    /// Jobs admitted into lanes.
    pub admitted: u64,
    /// Finished jobs handed back.
    pub completed: u64,
}

/// Fixed-capacity stack of free lane indices.
#[derive(Debug)]
struct FreeLanes {
    slots: Vec<usize>,
    width: usize,
}

impl FreeLanes {
    fn new(width: usize) -> Self {
        // Lane 0 ends up on top so admissions fill lanes in ascending order.
        Self {
            slots: (0..width).rev().collect(),
            width,
        }
    }

    fn pop(&mut self) -> Option<usize> {
        self.slots.pop()
    }

    fn push(&mut self, lane: usize) {
        debug_assert!(!self.slots.contains(&lane));
        debug_assert!(lane < self.width && self.slots.len() < self.width);
        self.slots.push(lane);
    }

    fn len(&self) -> usize {
        self.slots.len()
    }
}

/// Batches independent jobs across the lanes of a block transform provider.
pub struct JobManager<'a, A: Algorithm, U = (), T = Box<dyn BlockTransform<A> + Send + Sync>> {
    transform: T,
    lanes: Vec<Option<Job<'a, A, U>>>,
    free: FreeLanes,
    stats: SchedulerStats,
}

impl<'a, A: Algorithm, U, T: BlockTransform<A>> JobManager<'a, A, U, T> {
    /// Creates an empty scheduler with one lane per provider lane.
    pub fn new(transform: T) -> Self {
        let width = transform.lanes().max(1);
        Self {
            transform,
            lanes: (0..width).map(|_| None).collect(),
            free: FreeLanes::new(width),
            stats: SchedulerStats::default(),
        }
    }

    /// Lane count N.
    pub fn lanes(&self) -> usize {
        self.lanes.len()
    }

    /// Number of occupied lanes, finished or not.
    pub fn lanes_in_use(&self) -> usize {
        self.lanes.len() - self.free.len()
    }

    /// Whether no lane is occupied.
    pub fn is_empty(&self) -> bool {
        self.lanes_in_use() == 0
    }

    /// Activity counters since creation.
    pub const fn stats(&self) -> SchedulerStats {
        self.stats
    }

    /// The injected provider.
    pub const fn transform(&self) -> &T {
        &self.transform
    }

    /// Places `job` in a free lane.
    ///
    /// When this fills the last free lane the scheduler advances at once.
    /// Either way, one finished job is handed back if any lane holds one.
    /// A lane is always free again when this returns.
    ///
    /// # Panics
    ///
    /// Panics if no lane is free on entry. Callers cannot reach that state
    /// through `admit` alone: a call that fills the last lane advances, and
    /// the shortest job then finishes and is reaped before returning.
    pub fn admit(&mut self, job: Job<'a, A, U>) -> Option<Job<'a, A, U>> {
        let Some(lane) = self.free.pop() else {
            unreachable!("admit always leaves a free lane behind");
        };

        debug_log!(
            Sched,
            2,
            "admit {} bytes into lane {lane}",
            job.remaining()
        );
        self.lanes[lane] = Some(job);
        self.stats.admitted += 1;

        if self.free.len() == 0 {
            self.advance();
        }
        self.reap()
    }

    /// Advances every unfinished lane by the shortest remaining length among
    /// them. Returns the number of blocks each lane absorbed, zero when no
    /// lane is active.
    pub fn advance(&mut self) -> usize {
        let len = self
            .lanes
            .iter()
            .flatten()
            .map(Job::remaining)
            .filter(|&remaining| remaining > 0)
            .min();
        let Some(len) = len else {
            return 0;
        };
        let blocks = len / A::BLOCK_LEN;

        let mut inputs: Vec<LaneInput<'_, A>> = self
            .lanes
            .iter_mut()
            .flatten()
            .filter(|job| !job.is_finished())
            .map(|job| job.lane_input(len))
            .collect();
        let active = inputs.len();
        self.transform.transform(&mut inputs, blocks);
        drop(inputs);

        for job in self.lanes.iter_mut().flatten() {
            if !job.is_finished() {
                job.consume(len);
            }
        }

        self.stats.advances += 1;
        self.stats.blocks += (active * blocks) as u64;
        debug_log!(Sched, 1, "advance {active} lanes by {blocks} blocks");
        #[cfg(feature = "tracing")]
        logging::trace_sched!(active, blocks, "advance");

        blocks
    }

    /// Detaches the first finished job, freeing its lane.
    pub fn reap(&mut self) -> Option<Job<'a, A, U>> {
        let lane = self
            .lanes
            .iter()
            .position(|slot| slot.as_ref().is_some_and(Job::is_finished))?;
        let job = self.lanes[lane].take()?;
        self.free.push(lane);
        self.stats.completed += 1;

        debug_log!(Sched, 2, "reap lane {lane}");
        #[cfg(feature = "tracing")]
        logging::trace_sched!(lane, "reap");
        Some(job)
    }

    /// Hands back a finished job, advancing first if none is finished yet.
    ///
    /// Repeated calls drain every lane; `None` means the scheduler is empty.
    pub fn flush(&mut self) -> Option<Job<'a, A, U>> {
        if let Some(job) = self.reap() {
            return Some(job);
        }
        self.advance();
        self.reap()
    }
}

impl<A: Algorithm, U, T: BlockTransform<A>> fmt::Debug for JobManager<'_, A, U, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JobManager")
            .field("algorithm", &A::NAME)
            .field("lanes", &self.lanes())
            .field("lanes_in_use", &self.lanes_in_use())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
