//! SHA-1 parameters and portable compression (FIPS 180-4).

use crate::algorithm::{Algorithm, ByteOrder, load_be_u32};

/// SHA-1 marker type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sha1;

const H0: [u32; 5] = [0x6745_2301, 0xefcd_ab89, 0x98ba_dcfe, 0x1032_5476, 0xc3d2_e1f0];

impl Algorithm for Sha1 {
    const NAME: &'static str = "sha1";
    const BLOCK_LEN: usize = 64;
    const DIGEST_LEN: usize = 20;
    const LENGTH_FIELD_LEN: usize = 8;
    const LENGTH_ORDER: ByteOrder = ByteOrder::Big;

    type State = [u32; 5];
    type Output = [u8; 20];

    const INITIAL_STATE: Self::State = H0;

    fn compress(state: &mut Self::State, block: &[u8]) {
        debug_assert_eq!(block.len(), Self::BLOCK_LEN);

        let mut w = [0_u32; 80];
        for (i, word) in w.iter_mut().take(16).enumerate() {
            *word = load_be_u32(block, i);
        }
        for i in 16..80 {
            w[i] = (w[i - 3] ^ w[i - 8] ^ w[i - 14] ^ w[i - 16]).rotate_left(1);
        }

        let [mut a, mut b, mut c, mut d, mut e] = *state;

        for (i, &wi) in w.iter().enumerate() {
            let (f, k) = match i {
                0..=19 => ((b & c) | (!b & d), 0x5a82_7999),
                20..=39 => (b ^ c ^ d, 0x6ed9_eba1),
                40..=59 => ((b & c) | (b & d) | (c & d), 0x8f1b_bcdc),
                _ => (b ^ c ^ d, 0xca62_c1d6),
            };
            let temp = a
                .rotate_left(5)
                .wrapping_add(f)
                .wrapping_add(e)
                .wrapping_add(k)
                .wrapping_add(wi);
            e = d;
            d = c;
            c = b.rotate_left(30);
            b = a;
            a = temp;
        }

        for (slot, value) in state.iter_mut().zip([a, b, c, d, e]) {
            *slot = slot.wrapping_add(value);
        }
    }

    fn output(state: &Self::State) -> Self::Output {
        let mut out = [0_u8; 20];
        for (chunk, word) in out.chunks_exact_mut(4).zip(state) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        out
    }
}
