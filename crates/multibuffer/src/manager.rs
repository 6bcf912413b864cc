//! The context manager: incremental submit/flush over the lane scheduler.
//!
//! A submission is split into at most three jobs for its context, run one
//! after the other: the residue topped up to a whole block, the caller's
//! remaining whole blocks, and on LAST the padded final blocks. Only one of
//! them sits in a lane at a time; whenever a context's job finishes, the
//! manager builds the next one straight away, so a single `submit` or
//! `flush` may move several contexts along before it returns.

use kernels::{Algorithm, BlockTransform, Dispatcher};
use logging::debug_log;
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::context::{CtxStatus, HashCtx};
use crate::error::{CtxError, Rejected};
use crate::flags::HashFlag;
use crate::job::Job;
use crate::padding::pad;
use crate::scheduler::{JobManager, SchedulerStats};

/// Result of a submission: the context that became ready, if any.
pub type Submitted<'a, A, U> = Result<Option<&'a mut HashCtx<A, U>>, Rejected<'a, A, U>>;

/// Public submit/flush front end of the engine.
///
/// Contexts and the bytes submitted with them are borrowed for `'a`, the
/// lifetime of the manager's in-flight work. A context handed to
/// [`submit`](Self::submit) comes back from a later `submit` or
/// [`flush`](Self::flush), either `Processing` and ready for more input or
/// `Complete` with its digest. Completion order across contexts follows
/// job lengths, not submission order; use the context's user data to tell
/// them apart.
///
/// ```
/// use kernels::{PortableTransform, Sha256};
/// use multibuffer::{CtxManager, CtxStatus, HashCtx, HashFlag};
///
/// let mut a = HashCtx::<Sha256, &str>::with_user_data("a");
/// let mut b = HashCtx::<Sha256, &str>::with_user_data("b");
/// let mut manager = CtxManager::new(PortableTransform::new(4));
///
/// manager.submit(&mut a, b"hello", HashFlag::Entire).unwrap();
/// manager.submit(&mut b, &[0x61; 200], HashFlag::Entire).unwrap();
///
/// let mut done = Vec::new();
/// while let Some(ctx) = manager.flush() {
///     assert_eq!(ctx.status(), CtxStatus::Complete);
///     done.push(*ctx.user_data());
/// }
/// done.sort_unstable();
/// assert_eq!(done, ["a", "b"]);
/// ```
pub struct CtxManager<'a, A: Algorithm, U = (), T = Box<dyn BlockTransform<A> + Send + Sync>> {
    jobs: JobManager<'a, A, U, T>,
}

impl<'a, A: Algorithm, U> CtxManager<'a, A, U> {
    /// Creates a manager using the provider chosen by `dispatcher`.
    pub fn with_dispatcher(dispatcher: &Dispatcher) -> Self {
        Self::new(dispatcher.transform::<A>())
    }

    /// Creates a manager sized for the running CPU.
    pub fn detect() -> Self {
        Self::with_dispatcher(kernels::global())
    }
}

impl<A: Algorithm, U> Default for CtxManager<'_, A, U> {
    fn default() -> Self {
        Self::detect()
    }
}

impl<'a, A: Algorithm, U, T: BlockTransform<A>> CtxManager<'a, A, U, T> {
    /// Creates an empty manager over `transform`.
    pub fn new(transform: T) -> Self {
        Self {
            jobs: JobManager::new(transform),
        }
    }

    /// Lane count of the underlying scheduler.
    pub fn lanes(&self) -> usize {
        self.jobs.lanes()
    }

    /// Lanes currently holding a job.
    pub fn lanes_in_use(&self) -> usize {
        self.jobs.lanes_in_use()
    }

    /// Whether nothing is in flight.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Scheduler activity counters.
    pub const fn stats(&self) -> SchedulerStats {
        self.jobs.stats()
    }

    /// Submits `data` to `ctx` under `flag`.
    ///
    /// Returns the one context, this one or another, that became ready
    /// during the call, or `None` if every touched context is still in
    /// flight.
    ///
    /// # Errors
    ///
    /// Refuses the call, recording the reason in `ctx.error()` and changing
    /// nothing else, when `flag` is not legal for the context's status:
    /// [`CtxError::AlreadyProcessing`] for FIRST or ENTIRE on an open stream,
    /// [`CtxError::AlreadyCompleted`] for UPDATE or LAST without one.
    #[cfg_attr(
        feature = "tracing",
        instrument(skip_all, fields(algorithm = A::NAME, len = data.len(), flag = ?flag), name = "submit")
    )]
    pub fn submit(
        &mut self,
        ctx: &'a mut HashCtx<A, U>,
        data: &'a [u8],
        flag: HashFlag,
    ) -> Submitted<'a, A, U> {
        if let Err(error) = ctx.validate(flag) {
            return Err(Self::reject(ctx, error));
        }

        ctx.error = None;
        if flag.starts() {
            ctx.begin();
        }
        if flag.finishes() {
            ctx.status = CtxStatus::LastSeen;
        }
        ctx.total_length += data.len() as u64;

        let mut pending = data;
        if ctx.residue_len > 0 || pending.len() < A::BLOCK_LEN {
            let taken = ctx.buffer(pending, A::BLOCK_LEN - ctx.residue_len);
            pending = &pending[taken..];
            if ctx.residue_len == A::BLOCK_LEN {
                ctx.residue_len = 0;
                debug_log!(Ctx, 2, "residue filled a block");
                let job = Job::from_residue(ctx, 1).with_pending(pending);
                let returned = self.jobs.admit(job);
                return Ok(self.settle(returned));
            }
        }

        match Self::next_job(ctx, pending) {
            Ok(job) => {
                let returned = self.jobs.admit(job);
                Ok(self.settle(returned))
            }
            Err(ctx) => Ok(Some(ctx)),
        }
    }

    /// Like [`submit`](Self::submit), for a flag value that has not been
    /// checked yet.
    ///
    /// # Errors
    ///
    /// Everything `submit` refuses, plus [`CtxError::InvalidFlags`] for
    /// values other than 0 to 3.
    pub fn submit_raw(
        &mut self,
        ctx: &'a mut HashCtx<A, U>,
        data: &'a [u8],
        flags: u32,
    ) -> Submitted<'a, A, U> {
        match HashFlag::try_from(flags) {
            Ok(flag) => self.submit(ctx, data, flag),
            Err(error) => Err(Self::reject(ctx, error)),
        }
    }

    /// Runs in-flight work until one context becomes ready, and returns it.
    ///
    /// Works with any number of occupied lanes. Calling it until it returns
    /// `None` drains the manager.
    #[cfg_attr(feature = "tracing", instrument(skip_all, name = "flush"))]
    pub fn flush(&mut self) -> Option<&'a mut HashCtx<A, U>> {
        loop {
            let job = self.jobs.flush()?;
            if let Some(ctx) = self.settle(Some(job)) {
                return Some(ctx);
            }
        }
    }

    fn reject(ctx: &'a mut HashCtx<A, U>, error: CtxError) -> Rejected<'a, A, U> {
        ctx.error = Some(error);
        Rejected::new(error, ctx)
    }

    /// Follows finished jobs until a context is ready for the caller or the
    /// scheduler has nothing finished to hand back.
    fn settle(&mut self, mut returned: Option<Job<'a, A, U>>) -> Option<&'a mut HashCtx<A, U>> {
        while let Some(job) = returned {
            let last = job.is_final();
            let (ctx, pending) = job.into_parts();

            if last {
                ctx.complete();
                debug_log!(Ctx, 1, "completed {} byte message", ctx.total_length);
                return Some(ctx);
            }

            match Self::next_job(ctx, pending) {
                Ok(job) => returned = self.jobs.admit(job),
                Err(ctx) => return Some(ctx),
            }
        }
        None
    }

    /// Builds the next job for a context with nothing in flight, or hands the
    /// context back when it needs more input.
    fn next_job(
        ctx: &'a mut HashCtx<A, U>,
        pending: &'a [u8],
    ) -> Result<Job<'a, A, U>, &'a mut HashCtx<A, U>> {
        if ctx.residue_len == 0 && !pending.is_empty() {
            let tail = pending.len() % A::BLOCK_LEN;
            let (whole, rest) = pending.split_at(pending.len() - tail);
            ctx.buffer(rest, tail);
            if !whole.is_empty() {
                debug_log!(Ctx, 2, "job of {} whole blocks", whole.len() / A::BLOCK_LEN);
                return Ok(Job::new(ctx, whole));
            }
        }

        if ctx.status == CtxStatus::LastSeen {
            let residue_len = ctx.residue_len;
            let blocks = pad::<A>(&mut ctx.residue, residue_len, ctx.total_length);
            ctx.residue_len = 0;
            debug_log!(Ctx, 1, "padded {residue_len} residue bytes into {blocks} final blocks");
            #[cfg(feature = "tracing")]
            logging::trace_ctx!(residue_len, blocks, "padded final blocks");
            return Ok(Job::final_segment(ctx, blocks));
        }

        Err(ctx)
    }
}

impl<A: Algorithm, U, T: BlockTransform<A>> std::fmt::Debug for CtxManager<'_, A, U, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CtxManager").field("jobs", &self.jobs).finish()
    }
}
