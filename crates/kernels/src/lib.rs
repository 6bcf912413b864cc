//! Block transform providers for multi-buffer hashing.
//!
//! This crate supplies the compute side of the multi-buffer engine: the
//! per-algorithm parameter sets (block size, state words, padding length
//! field) together with the strategies that advance several independent
//! digest states by whole blocks in lock-step.
//!
//! A provider never sees partial blocks, never pads, and never interacts
//! across lanes. Scheduling, residue buffering and padding live in the
//! `multibuffer` crate.
//!
//! # Example
//!
//! ```
//! use kernels::{Algorithm, BlockTransform, LaneInput, PortableTransform, Sha256};
//!
//! let provider = PortableTransform::<Sha256>::new(4);
//! let mut first = Sha256::INITIAL_STATE;
//! let mut second = Sha256::INITIAL_STATE;
//! let a = [0x11_u8; 128];
//! let b = [0x22_u8; 128];
//!
//! let mut lanes = [
//!     LaneInput::new(&mut first, &a),
//!     LaneInput::new(&mut second, &b),
//! ];
//! provider.transform(&mut lanes, 2);
//! assert_ne!(first, second);
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![deny(missing_docs)]

mod algorithm;
mod dispatcher;
mod md5;
mod sha1;
mod sha256;
mod sha512;
mod sm3;
mod transform;

pub use algorithm::{Algorithm, ByteOrder};
pub use dispatcher::{Backend, Dispatcher, global};
pub use md5::Md5;
pub use sha1::Sha1;
pub use sha256::Sha256;
pub use sha512::Sha512;
pub use sm3::Sm3;
pub use transform::{BlockTransform, LaneInput, PortableTransform};

/// Largest lane count any backend reports.
pub const MAX_LANES: usize = 16;
