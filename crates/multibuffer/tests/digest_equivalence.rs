//! Digests produced through the engine must match straightforward reference
//! implementations for every message and every way of chunking it.

use kernels::{Algorithm, PortableTransform};
use multibuffer::{CtxManager, HashCtx, HashFlag};
use proptest::prelude::*;
use sha2::Digest;

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn reference<D: Digest>(message: &[u8]) -> String {
    to_hex(&D::digest(message))
}

/// Feeds `chunks` to one context as FIRST, UPDATE..., LAST (or ENTIRE for a
/// single chunk), flushing whenever the context is in flight.
fn hash_in_chunks<A: Algorithm>(chunks: &[&[u8]], lanes: usize) -> String {
    let mut ctx = HashCtx::<A>::new();
    let mut manager = CtxManager::new(PortableTransform::<A>::new(lanes));

    let last = chunks.len() - 1;
    let mut held = Some(&mut ctx);
    for (i, chunk) in chunks.iter().enumerate() {
        let flag = match (i == 0, i == last) {
            (true, true) => HashFlag::Entire,
            (true, false) => HashFlag::First,
            (false, true) => HashFlag::Last,
            (false, false) => HashFlag::Update,
        };
        let ctx = match held.take() {
            Some(ctx) => ctx,
            None => manager.flush().expect("in-flight context comes back"),
        };
        held = manager.submit(ctx, chunk, flag).expect("legal submission");
    }

    let done = match held {
        Some(ctx) => ctx,
        None => manager.flush().expect("final context comes back"),
    };
    assert!(manager.flush().is_none());
    to_hex(done.digest().expect("stream is complete").as_ref())
}

fn split_at_cuts<'m>(message: &'m [u8], cuts: &[usize]) -> Vec<&'m [u8]> {
    let mut cuts: Vec<usize> = cuts.iter().map(|&c| c.min(message.len())).collect();
    cuts.sort_unstable();

    let mut chunks = Vec::with_capacity(cuts.len() + 1);
    let mut start = 0;
    for cut in cuts {
        chunks.push(&message[start..cut]);
        start = cut;
    }
    chunks.push(&message[start..]);
    chunks
}

fn message(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 + 7) as u8).collect()
}

/// Lengths around the block and padding boundaries.
fn boundary_lengths(block: usize) -> Vec<usize> {
    vec![0, 1, block - 9, block - 8, block - 7, block - 1, block, block + 1, 2 * block, 5 * block + 3]
}

// ============================================================================
// Fixed boundary lengths
// ============================================================================

mod boundaries {
    use super::*;

    fn check<A: Algorithm, D: Digest>() {
        for len in boundary_lengths(A::BLOCK_LEN) {
            let msg = message(len);
            let expected = reference::<D>(&msg);

            assert_eq!(hash_in_chunks::<A>(&[msg.as_slice()], 4), expected, "{} ENTIRE len={len}", A::NAME);

            let half = len / 2;
            assert_eq!(
                hash_in_chunks::<A>(&[&msg[..half], &msg[half..]], 4),
                expected,
                "{} FIRST+LAST len={len}",
                A::NAME
            );

            let bytewise: Vec<&[u8]> = msg.chunks(1).collect();
            if !bytewise.is_empty() && len <= A::BLOCK_LEN + 1 {
                assert_eq!(
                    hash_in_chunks::<A>(&bytewise, 1),
                    expected,
                    "{} byte-by-byte len={len}",
                    A::NAME
                );
            }
        }
    }

    #[test]
    fn sha1() {
        check::<kernels::Sha1, sha1::Sha1>();
    }

    #[test]
    fn sha256() {
        check::<kernels::Sha256, sha2::Sha256>();
    }

    #[test]
    fn sha512() {
        check::<kernels::Sha512, sha2::Sha512>();
    }

    #[test]
    fn md5() {
        check::<kernels::Md5, md5::Md5>();
    }

    #[test]
    fn sm3() {
        check::<kernels::Sm3, sm3::Sm3>();
    }
}

// ============================================================================
// Arbitrary messages and chunkings
// ============================================================================

mod chunking {
    use super::*;

    fn lanes() -> impl Strategy<Value = usize> {
        prop_oneof![Just(1_usize), Just(4), Just(8), Just(16)]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn sha1_any_chunking(
            msg in prop::collection::vec(any::<u8>(), 0..600),
            cuts in prop::collection::vec(0_usize..600, 0..6),
            lanes in lanes(),
        ) {
            let chunks = split_at_cuts(&msg, &cuts);
            prop_assert_eq!(hash_in_chunks::<kernels::Sha1>(&chunks, lanes), reference::<sha1::Sha1>(&msg));
        }

        #[test]
        fn sha256_any_chunking(
            msg in prop::collection::vec(any::<u8>(), 0..600),
            cuts in prop::collection::vec(0_usize..600, 0..6),
            lanes in lanes(),
        ) {
            let chunks = split_at_cuts(&msg, &cuts);
            prop_assert_eq!(hash_in_chunks::<kernels::Sha256>(&chunks, lanes), reference::<sha2::Sha256>(&msg));
        }

        #[test]
        fn sha512_any_chunking(
            msg in prop::collection::vec(any::<u8>(), 0..900),
            cuts in prop::collection::vec(0_usize..900, 0..6),
            lanes in lanes(),
        ) {
            let chunks = split_at_cuts(&msg, &cuts);
            prop_assert_eq!(hash_in_chunks::<kernels::Sha512>(&chunks, lanes), reference::<sha2::Sha512>(&msg));
        }

        #[test]
        fn md5_any_chunking(
            msg in prop::collection::vec(any::<u8>(), 0..600),
            cuts in prop::collection::vec(0_usize..600, 0..6),
            lanes in lanes(),
        ) {
            let chunks = split_at_cuts(&msg, &cuts);
            prop_assert_eq!(hash_in_chunks::<kernels::Md5>(&chunks, lanes), reference::<md5::Md5>(&msg));
        }

        #[test]
        fn sm3_any_chunking(
            msg in prop::collection::vec(any::<u8>(), 0..600),
            cuts in prop::collection::vec(0_usize..600, 0..6),
            lanes in lanes(),
        ) {
            let chunks = split_at_cuts(&msg, &cuts);
            prop_assert_eq!(hash_in_chunks::<kernels::Sm3>(&chunks, lanes), reference::<sm3::Sm3>(&msg));
        }
    }
}

// ============================================================================
// Many concurrent streams
// ============================================================================

mod interleaved {
    use super::*;

    /// Hashes every message in two halves, keeping all streams open at once.
    fn hash_all<A: Algorithm>(messages: &[Vec<u8>], lanes: usize) -> Vec<String> {
        let mut contexts: Vec<HashCtx<A, usize>> =
            (0..messages.len()).map(HashCtx::with_user_data).collect();
        let mut manager = CtxManager::new(PortableTransform::<A>::new(lanes));
        let mut open = Vec::new();

        for (ctx, msg) in contexts.iter_mut().zip(messages) {
            let half = &msg[..msg.len() / 2];
            if let Some(ready) = manager.submit(ctx, half, HashFlag::First).expect("legal") {
                open.push(ready);
            }
        }
        // Every stream must come back open before it can be finished.
        while open.len() < messages.len() {
            let ready = manager.flush().expect("open streams come back");
            open.push(ready);
        }

        let mut digests = vec![String::new(); messages.len()];
        for ctx in open {
            let id = *ctx.user_data();
            let rest = &messages[id][messages[id].len() / 2..];
            if let Some(done) = manager.submit(ctx, rest, HashFlag::Last).expect("legal") {
                digests[*done.user_data()] = to_hex(done.digest().expect("complete").as_ref());
            }
        }
        while let Some(done) = manager.flush() {
            digests[*done.user_data()] = to_hex(done.digest().expect("complete").as_ref());
        }
        assert!(manager.is_empty());
        digests
    }

    #[test]
    fn sha256_streams_match_reference() {
        let messages: Vec<Vec<u8>> = (0..23).map(|i| message(i * 41)).collect();
        for lanes in [1, 3, 8, 16] {
            let digests = hash_all::<kernels::Sha256>(&messages, lanes);
            for (msg, digest) in messages.iter().zip(&digests) {
                assert_eq!(*digest, reference::<sha2::Sha256>(msg), "lanes={lanes}");
            }
        }
    }

    #[test]
    fn md5_streams_match_reference() {
        let messages: Vec<Vec<u8>> = (0..17).map(|i| message(i * i * 5)).collect();
        let digests = hash_all::<kernels::Md5>(&messages, 8);
        for (msg, digest) in messages.iter().zip(&digests) {
            assert_eq!(*digest, reference::<md5::Md5>(msg));
        }
    }
}
