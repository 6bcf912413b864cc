//! Submission errors reported by the context manager.

use std::fmt;

use kernels::Algorithm;
use thiserror::Error;

use crate::context::HashCtx;

/// Reasons a submission is refused before any state is touched.
///
/// Null manager, context or source pointers cannot be expressed with
/// references and slices, so only the flag and state-machine violations have
/// a runtime representation.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Error)]
pub enum CtxError {
    /// The flag value is not one of UPDATE, FIRST, LAST or ENTIRE.
    #[error("invalid hash flags {flags:#x}")]
    InvalidFlags {
        /// The raw value that was submitted.
        flags: u32,
    },
    /// A new stream was started over one that is still open.
    #[error("context is already processing a stream")]
    AlreadyProcessing,
    /// A finished (or never started) stream was continued without FIRST.
    #[error("context has already completed; submit FIRST to start a new stream")]
    AlreadyCompleted,
}

/// A refused submission, handing the untouched context back to the caller.
#[derive(Error)]
#[error("submission rejected: {error}")]
pub struct Rejected<'a, A: Algorithm, U = ()> {
    error: CtxError,
    ctx: &'a mut HashCtx<A, U>,
}

impl<'a, A: Algorithm, U> Rejected<'a, A, U> {
    pub(crate) fn new(error: CtxError, ctx: &'a mut HashCtx<A, U>) -> Self {
        Self { error, ctx }
    }

    /// Why the submission was refused.
    pub const fn error(&self) -> CtxError {
        self.error
    }

    /// The rejected context. Its `error()` mirrors [`Self::error`].
    pub fn ctx(&self) -> &HashCtx<A, U> {
        self.ctx
    }

    /// Gives the context back for reuse.
    pub fn into_ctx(self) -> &'a mut HashCtx<A, U> {
        self.ctx
    }
}

impl<A: Algorithm, U> fmt::Debug for Rejected<'_, A, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rejected")
            .field("error", &self.error)
            .field("status", &self.ctx.status())
            .finish_non_exhaustive()
    }
}
