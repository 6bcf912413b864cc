//! Algorithm parameter sets shared by providers and the scheduling engine.

use core::fmt;

/// Byte order used when encoding the message bit length during padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Most significant byte first (SHA-1, SHA-2, SM3).
    Big,
    /// Least significant byte first (MD5).
    Little,
}

/// A Merkle-Damgard hash described by its block geometry and compression function.
///
/// Implementors are zero-sized marker types. The engine is generic over this
/// trait, so a single scheduler serves every algorithm instead of one copy per
/// digest family.
pub trait Algorithm: Copy + Send + Sync + fmt::Debug + 'static {
    /// Human readable algorithm name.
    const NAME: &'static str;
    /// Size of one compression block in bytes.
    const BLOCK_LEN: usize;
    /// Size of the finished digest in bytes.
    const DIGEST_LEN: usize;
    /// Width of the trailing bit-length field written by padding.
    const LENGTH_FIELD_LEN: usize;
    /// Byte order of the trailing bit-length field.
    const LENGTH_ORDER: ByteOrder;

    /// Running digest words.
    type State: Copy + Eq + fmt::Debug + Send + Sync + 'static;
    /// Canonical digest bytes.
    type Output: Copy + Eq + AsRef<[u8]> + fmt::Debug + Send + Sync + 'static;

    /// Fixed initial value loaded by a `FIRST` submission.
    const INITIAL_STATE: Self::State;

    /// Advances `state` by exactly one block.
    ///
    /// `block` must be [`BLOCK_LEN`](Self::BLOCK_LEN) bytes long.
    fn compress(state: &mut Self::State, block: &[u8]);

    /// Serialises the running state in the algorithm's canonical byte order.
    fn output(state: &Self::State) -> Self::Output;
}

#[inline(always)]
pub(crate) fn load_be_u32(block: &[u8], index: usize) -> u32 {
    let at = index * 4;
    u32::from_be_bytes([block[at], block[at + 1], block[at + 2], block[at + 3]])
}

#[inline(always)]
pub(crate) fn load_le_u32(block: &[u8], index: usize) -> u32 {
    let at = index * 4;
    u32::from_le_bytes([block[at], block[at + 1], block[at + 2], block[at + 3]])
}

#[inline(always)]
pub(crate) fn load_be_u64(block: &[u8], index: usize) -> u64 {
    let at = index * 8;
    let mut bytes = [0_u8; 8];
    bytes.copy_from_slice(&block[at..at + 8]);
    u64::from_be_bytes(bytes)
}
