//! SM3 parameters and portable compression (GB/T 32905-2016).

use crate::algorithm::{Algorithm, ByteOrder, load_be_u32};

/// SM3 marker type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sm3;

const IV: [u32; 8] = [
    0x7380_166f,
    0x4914_b2b9,
    0x1724_42d7,
    0xda8a_0600,
    0xa96f_30bc,
    0x1631_38aa,
    0xe38d_ee4d,
    0xb0fb_0e4e,
];

const T_LOW: u32 = 0x79cc_4519;
const T_HIGH: u32 = 0x7a87_9d8a;

#[inline(always)]
fn p0(x: u32) -> u32 {
    x ^ x.rotate_left(9) ^ x.rotate_left(17)
}

#[inline(always)]
fn p1(x: u32) -> u32 {
    x ^ x.rotate_left(15) ^ x.rotate_left(23)
}

impl Algorithm for Sm3 {
    const NAME: &'static str = "sm3";
    const BLOCK_LEN: usize = 64;
    const DIGEST_LEN: usize = 32;
    const LENGTH_FIELD_LEN: usize = 8;
    const LENGTH_ORDER: ByteOrder = ByteOrder::Big;

    type State = [u32; 8];
    type Output = [u8; 32];

    const INITIAL_STATE: Self::State = IV;

    fn compress(state: &mut Self::State, block: &[u8]) {
        debug_assert_eq!(block.len(), Self::BLOCK_LEN);

        let mut w = [0_u32; 68];
        for (i, word) in w.iter_mut().take(16).enumerate() {
            *word = load_be_u32(block, i);
        }
        for j in 16..68 {
            w[j] = p1(w[j - 16] ^ w[j - 9] ^ w[j - 3].rotate_left(15))
                ^ w[j - 13].rotate_left(7)
                ^ w[j - 6];
        }

        let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;

        for j in 0..64 {
            let (t, ff, gg) = if j < 16 {
                (T_LOW, a ^ b ^ c, e ^ f ^ g)
            } else {
                (T_HIGH, (a & b) | (a & c) | (b & c), (e & f) | (!e & g))
            };
            // rotate_left reduces the amount modulo 32, matching T_j <<< (j mod 32).
            let ss1 = a
                .rotate_left(12)
                .wrapping_add(e)
                .wrapping_add(t.rotate_left(j as u32))
                .rotate_left(7);
            let ss2 = ss1 ^ a.rotate_left(12);
            let tt1 = ff
                .wrapping_add(d)
                .wrapping_add(ss2)
                .wrapping_add(w[j] ^ w[j + 4]);
            let tt2 = gg.wrapping_add(h).wrapping_add(ss1).wrapping_add(w[j]);
            d = c;
            c = b.rotate_left(9);
            b = a;
            a = tt1;
            h = g;
            g = f.rotate_left(19);
            f = e;
            e = p0(tt2);
        }

        for (slot, value) in state.iter_mut().zip([a, b, c, d, e, f, g, h]) {
            *slot ^= value;
        }
    }

    fn output(state: &Self::State) -> Self::Output {
        let mut out = [0_u8; 32];
        for (chunk, word) in out.chunks_exact_mut(4).zip(state) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        out
    }
}
