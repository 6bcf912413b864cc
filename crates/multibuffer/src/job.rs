//! Scheduler-visible units of work.

use kernels::{Algorithm, LaneInput};

use crate::context::HashCtx;

/// Where a job's blocks live.
#[derive(Clone, Copy, Debug)]
enum Source<'a> {
    /// Whole blocks borrowed from the caller's submission.
    Caller(&'a [u8]),
    /// The owning context's residue buffer (a filled block or the padded tail).
    Residue,
}

/// A whole-block byte range together with the context whose digest it
/// advances.
///
/// The job holds the context mutably for as long as it sits in a lane, and
/// any caller bytes it reads are borrowed for the same lifetime, so neither
/// can change under the scheduler.
pub struct Job<'a, A: Algorithm, U = ()> {
    ctx: &'a mut HashCtx<A, U>,
    source: Source<'a>,
    offset: usize,
    remaining: usize,
    last: bool,
    /// Caller bytes not yet turned into jobs, carried while this job is in flight.
    pending: &'a [u8],
}

impl<'a, A: Algorithm, U> Job<'a, A, U> {
    /// Creates a job over `data` for `ctx`.
    ///
    /// Only whole blocks are scheduled; a trailing partial block in `data`
    /// is ignored.
    pub fn new(ctx: &'a mut HashCtx<A, U>, data: &'a [u8]) -> Self {
        let whole = data.len() - data.len() % A::BLOCK_LEN;
        Self {
            ctx,
            source: Source::Caller(&data[..whole]),
            offset: 0,
            remaining: whole,
            last: false,
            pending: &[],
        }
    }

    /// Creates a job over the first `blocks` blocks of the context's residue.
    pub(crate) fn from_residue(ctx: &'a mut HashCtx<A, U>, blocks: usize) -> Self {
        debug_assert!(blocks <= 2);
        Self {
            ctx,
            source: Source::Residue,
            offset: 0,
            remaining: blocks * A::BLOCK_LEN,
            last: false,
            pending: &[],
        }
    }

    /// Creates the job for a context's padded final blocks.
    pub(crate) fn final_segment(ctx: &'a mut HashCtx<A, U>, blocks: usize) -> Self {
        Self {
            last: true,
            ..Self::from_residue(ctx, blocks)
        }
    }

    /// Attaches caller bytes to resume with once this job completes.
    pub(crate) fn with_pending(mut self, pending: &'a [u8]) -> Self {
        self.pending = pending;
        self
    }

    /// Bytes still to be absorbed.
    pub const fn remaining(&self) -> usize {
        self.remaining
    }

    /// Whether every block has been absorbed.
    pub const fn is_finished(&self) -> bool {
        self.remaining == 0
    }

    /// Whether completing this job completes the stream.
    pub const fn is_final(&self) -> bool {
        self.last
    }

    /// The owning context.
    pub fn ctx(&self) -> &HashCtx<A, U> {
        self.ctx
    }

    /// Releases the owning context.
    pub fn into_ctx(self) -> &'a mut HashCtx<A, U> {
        self.ctx
    }

    pub(crate) fn into_parts(self) -> (&'a mut HashCtx<A, U>, &'a [u8]) {
        (self.ctx, self.pending)
    }

    /// Provider view of the next `len` bytes.
    pub(crate) fn lane_input(&mut self, len: usize) -> LaneInput<'_, A> {
        debug_assert!(len <= self.remaining);
        let range = self.offset..self.offset + len;
        let ctx = &mut *self.ctx;
        let data = match self.source {
            Source::Caller(bytes) => &bytes[range],
            Source::Residue => &ctx.residue[range],
        };
        LaneInput::new(&mut ctx.state, data)
    }

    /// Records that `len` bytes were absorbed.
    pub(crate) fn consume(&mut self, len: usize) {
        self.offset += len;
        self.remaining -= len;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernels::{BlockTransform, PortableTransform, Sha1};

    #[test]
    fn caller_job_ignores_partial_tail() {
        let mut ctx = HashCtx::<Sha1>::new();
        let data = [0_u8; 150];
        let job = Job::new(&mut ctx, &data);
        assert_eq!(job.remaining(), 128);
        assert!(!job.is_finished());
    }

    #[test]
    fn residue_job_reads_context_buffer() {
        let mut ctx = HashCtx::<Sha1>::new();
        ctx.residue[..64].fill(0x5a);
        let mut job = Job::from_residue(&mut ctx, 1);

        let provider = PortableTransform::<Sha1>::new(1);
        provider.transform(&mut [job.lane_input(64)], 1);
        job.consume(64);
        assert!(job.is_finished());

        let mut expected = Sha1::INITIAL_STATE;
        Sha1::compress(&mut expected, &[0x5a; 64]);
        assert_eq!(*job.into_ctx().state(), expected);
    }

    #[test]
    fn lane_input_follows_offset() {
        let mut ctx = HashCtx::<Sha1>::new();
        let data: Vec<u8> = (0..=255).collect();
        let mut job = Job::new(&mut ctx, &data);
        job.consume(64);

        let input = job.lane_input(128);
        assert_eq!(input.data(), &data[64..192]);
    }
}
