//! Per-stream hash context and its submission state machine.

use std::fmt;

use kernels::Algorithm;

use crate::error::CtxError;
use crate::flags::HashFlag;

/// Where a context stands in its stream lifecycle.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum CtxStatus {
    /// Reset and ready for FIRST or ENTIRE.
    Idle,
    /// A stream is open: FIRST was accepted and LAST has not been seen yet.
    Processing,
    /// LAST was accepted and the padded final blocks are in flight.
    LastSeen,
    /// The digest is final. Also the state of a freshly created context.
    Complete,
}

/// One logical, possibly incremental, hash computation.
///
/// A context is created in the [`Complete`](CtxStatus::Complete) sentinel
/// state and driven exclusively through
/// [`CtxManager`](crate::CtxManager) submissions. While the manager holds it
/// in a lane the borrow checker keeps the caller out, so every state the
/// caller observes is one between calls.
pub struct HashCtx<A: Algorithm, U = ()> {
    pub(crate) status: CtxStatus,
    pub(crate) error: Option<CtxError>,
    pub(crate) state: A::State,
    pub(crate) residue: Vec<u8>,
    pub(crate) residue_len: usize,
    pub(crate) total_length: u64,
    output: Option<A::Output>,
    user_data: U,
}

impl<A: Algorithm> HashCtx<A> {
    /// Creates a context without user data.
    pub fn new() -> Self {
        Self::with_user_data(())
    }
}

impl<A: Algorithm> Default for HashCtx<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Algorithm, U> HashCtx<A, U> {
    /// Creates a context carrying `user_data` for correlating completions.
    pub fn with_user_data(user_data: U) -> Self {
        Self {
            status: CtxStatus::Complete,
            error: None,
            state: A::INITIAL_STATE,
            residue: vec![0; 2 * A::BLOCK_LEN],
            residue_len: 0,
            total_length: 0,
            output: None,
            user_data,
        }
    }

    /// Current lifecycle status.
    pub const fn status(&self) -> CtxStatus {
        self.status
    }

    /// Error recorded by the most recent submission, if it was rejected.
    pub const fn error(&self) -> Option<CtxError> {
        self.error
    }

    /// Bytes submitted to the current stream so far.
    pub const fn total_length(&self) -> u64 {
        self.total_length
    }

    /// Bytes buffered that do not yet fill a whole block.
    pub const fn residue_len(&self) -> usize {
        self.residue_len
    }

    /// The running digest words.
    pub const fn state(&self) -> &A::State {
        &self.state
    }

    /// The finished digest in canonical byte order, once the stream is
    /// [`Complete`](CtxStatus::Complete).
    pub fn digest(&self) -> Option<A::Output> {
        match self.status {
            CtxStatus::Complete => self.output,
            _ => None,
        }
    }

    /// Caller bookkeeping attached to this context.
    pub const fn user_data(&self) -> &U {
        &self.user_data
    }

    /// Mutable access to the attached bookkeeping.
    pub fn user_data_mut(&mut self) -> &mut U {
        &mut self.user_data
    }

    /// Replaces the attached bookkeeping, returning the previous value.
    pub fn set_user_data(&mut self, user_data: U) -> U {
        std::mem::replace(&mut self.user_data, user_data)
    }

    /// Returns the context to [`Idle`](CtxStatus::Idle), discarding any open
    /// stream and finished digest. User data is kept.
    pub fn reset(&mut self) {
        self.status = CtxStatus::Idle;
        self.error = None;
        self.state = A::INITIAL_STATE;
        self.residue_len = 0;
        self.total_length = 0;
        self.output = None;
    }

    /// Checks a submission against the current status without changing
    /// anything.
    pub(crate) const fn validate(&self, flag: HashFlag) -> Result<(), CtxError> {
        match (self.status, flag.starts()) {
            (CtxStatus::Processing | CtxStatus::LastSeen, true) | (CtxStatus::LastSeen, false) => {
                Err(CtxError::AlreadyProcessing)
            }
            (CtxStatus::Complete | CtxStatus::Idle, false) => Err(CtxError::AlreadyCompleted),
            (CtxStatus::Complete | CtxStatus::Idle, true) | (CtxStatus::Processing, false) => {
                Ok(())
            }
        }
    }

    /// Starts a new stream.
    pub(crate) fn begin(&mut self) {
        self.state = A::INITIAL_STATE;
        self.residue_len = 0;
        self.total_length = 0;
        self.output = None;
        self.status = CtxStatus::Processing;
    }

    /// Records the final digest.
    pub(crate) fn complete(&mut self) {
        self.output = Some(A::output(&self.state));
        self.status = CtxStatus::Complete;
    }

    /// Appends up to `wanted` bytes of `data` to the residue and returns how
    /// many were taken.
    pub(crate) fn buffer(&mut self, data: &[u8], wanted: usize) -> usize {
        let take = wanted.min(data.len());
        self.residue[self.residue_len..self.residue_len + take].copy_from_slice(&data[..take]);
        self.residue_len += take;
        take
    }
}

impl<A: Algorithm, U: fmt::Debug> fmt::Debug for HashCtx<A, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashCtx")
            .field("algorithm", &A::NAME)
            .field("status", &self.status)
            .field("error", &self.error)
            .field("total_length", &self.total_length)
            .field("residue_len", &self.residue_len)
            .field("state", &self.state)
            .field("user_data", &self.user_data)
            .finish()
    }
}
