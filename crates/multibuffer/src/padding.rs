//! Merkle–Damgård final-block padding.

use kernels::{Algorithm, ByteOrder};

/// Number of final blocks needed to pad a residue of `residue_len` bytes.
pub const fn final_blocks<A: Algorithm>(residue_len: usize) -> usize {
    if residue_len + 1 + A::LENGTH_FIELD_LEN <= A::BLOCK_LEN {
        1
    } else {
        2
    }
}

/// Pads the residue held in `buffer[..residue_len]` in place.
///
/// Appends `0x80`, zero fill, and the message length in bits (`total_len`
/// bytes) in the algorithm's length-field width and byte order. Returns the
/// number of whole blocks, 1 or 2, that now make up the final segment.
///
/// `buffer` must hold at least two blocks and `residue_len` must be shorter
/// than one block.
pub fn pad<A: Algorithm>(buffer: &mut [u8], residue_len: usize, total_len: u64) -> usize {
    debug_assert!(residue_len < A::BLOCK_LEN);
    debug_assert!(buffer.len() >= 2 * A::BLOCK_LEN);

    let blocks = final_blocks::<A>(residue_len);
    let end = blocks * A::BLOCK_LEN;
    let field_start = end - A::LENGTH_FIELD_LEN;

    buffer[residue_len] = 0x80;
    buffer[residue_len + 1..field_start].fill(0);

    // Lengths wrap modulo the field width, as the standards require.
    let bits = u128::from(total_len) << 3;
    let field = &mut buffer[field_start..end];
    match A::LENGTH_ORDER {
        ByteOrder::Big => {
            let bytes = bits.to_be_bytes();
            field.copy_from_slice(&bytes[bytes.len() - A::LENGTH_FIELD_LEN..]);
        }
        ByteOrder::Little => {
            let bytes = bits.to_le_bytes();
            field.copy_from_slice(&bytes[..A::LENGTH_FIELD_LEN]);
        }
    }

    blocks
}
