//! Multi-buffer hash scheduling.
//!
//! This crate batches many independent hash computations so that a block
//! transform provider advancing N lanes at once can work on unrelated
//! message streams in lock-step, while each caller still sees an ordinary
//! incremental API: FIRST, any number of UPDATEs, then LAST (or ENTIRE for
//! a whole message).
//!
//! - [`HashCtx`] holds one stream's running digest, residue and status.
//! - [`CtxManager`] validates submissions, buffers residue, pads the final
//!   blocks and hands ready contexts back, one per call.
//! - [`JobManager`] is the lane scheduler underneath it.
//! - [`digest_batch`] (and, with the `parallel` feature,
//!   `digest_batch_parallel`) hashes a slice of messages in one call.
//!
//! Providers come from the [`kernels`] crate; any [`BlockTransform`]
//! implementation can be injected.
//!
//! # Example
//!
//! ```
//! use kernels::{PortableTransform, Sha1};
//! use multibuffer::{CtxManager, HashCtx, HashFlag};
//!
//! let mut ctx = HashCtx::<Sha1>::new();
//! let mut manager = CtxManager::new(PortableTransform::new(4));
//!
//! let ctx = manager.submit(&mut ctx, b"a", HashFlag::First).unwrap().unwrap();
//! manager.submit(ctx, b"bc", HashFlag::Last).unwrap();
//! let done = manager.flush().unwrap();
//!
//! let hex: String = done.digest().unwrap().iter().map(|b| format!("{b:02x}")).collect();
//! assert_eq!(hex, "a9993e364706816aba3e25717850c26c9cd0d89d");
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![deny(missing_docs)]

mod batch;
mod context;
mod error;
mod flags;
mod job;
mod manager;
pub mod padding;
mod scheduler;

#[cfg(feature = "parallel")]
#[cfg_attr(docsrs, doc(cfg(feature = "parallel")))]
mod parallel;

pub use batch::{digest_batch, digest_batch_with};
pub use context::{CtxStatus, HashCtx};
pub use error::{CtxError, Rejected};
pub use flags::HashFlag;
pub use job::Job;
pub use manager::{CtxManager, Submitted};
pub use scheduler::{JobManager, SchedulerStats};

#[cfg(feature = "parallel")]
#[cfg_attr(docsrs, doc(cfg(feature = "parallel")))]
pub use parallel::{ParallelMultiDigest, digest_batch_parallel};

pub use kernels::{self, Algorithm, BlockTransform, Md5, Sha1, Sha256, Sha512, Sm3};

/// SHA-1 hash context.
pub type Sha1Ctx<U = ()> = HashCtx<Sha1, U>;
/// SHA-256 hash context.
pub type Sha256Ctx<U = ()> = HashCtx<Sha256, U>;
/// SHA-512 hash context.
pub type Sha512Ctx<U = ()> = HashCtx<Sha512, U>;
/// MD5 hash context.
pub type Md5Ctx<U = ()> = HashCtx<Md5, U>;
/// SM3 hash context.
pub type Sm3Ctx<U = ()> = HashCtx<Sm3, U>;

/// SHA-1 context manager over the detected provider.
pub type Sha1CtxManager<'a, U = ()> = CtxManager<'a, Sha1, U>;
/// SHA-256 context manager over the detected provider.
pub type Sha256CtxManager<'a, U = ()> = CtxManager<'a, Sha256, U>;
/// SHA-512 context manager over the detected provider.
pub type Sha512CtxManager<'a, U = ()> = CtxManager<'a, Sha512, U>;
/// MD5 context manager over the detected provider.
pub type Md5CtxManager<'a, U = ()> = CtxManager<'a, Md5, U>;
/// SM3 context manager over the detected provider.
pub type Sm3CtxManager<'a, U = ()> = CtxManager<'a, Sm3, U>;
