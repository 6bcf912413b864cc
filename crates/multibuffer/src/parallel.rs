//! Rayon integration: one manager per worker.
//!
//! Managers are single-threaded, so parallel hashing shards the inputs and
//! gives every shard its own manager.

use kernels::Algorithm;
use rayon::prelude::*;

use crate::batch::digest_batch;

/// Inputs per shard, in multiples of the lane count, so every manager can
/// keep its lanes full.
const LANE_MULTIPLE: usize = 4;

/// Digests every input across the rayon pool, returning results in input
/// order.
pub fn digest_batch_parallel<A, I>(inputs: &[I]) -> Vec<A::Output>
where
    A: Algorithm,
    I: AsRef<[u8]> + Sync,
{
    let shard = kernels::global().lanes() * LANE_MULTIPLE;
    inputs
        .par_chunks(shard.max(1))
        .map(digest_batch::<A, I>)
        .collect::<Vec<_>>()
        .concat()
}

/// Extension trait for hashing the items of a parallel iterator.
///
/// # Example
///
/// ```
/// use kernels::Sha256;
/// use multibuffer::ParallelMultiDigest;
/// use rayon::prelude::*;
///
/// let data: Vec<Vec<u8>> = vec![b"hello".to_vec(), b"world".to_vec()];
/// let digests = data.par_iter().multi_digest::<Sha256>();
/// assert_eq!(digests.len(), 2);
/// ```
pub trait ParallelMultiDigest<T> {
    /// Computes the digest of every item, in iteration order.
    fn multi_digest<A: Algorithm>(self) -> Vec<A::Output>;
}

impl<P, T> ParallelMultiDigest<T> for P
where
    P: ParallelIterator<Item = T>,
    T: AsRef<[u8]> + Send + Sync,
{
    fn multi_digest<A: Algorithm>(self) -> Vec<A::Output> {
        let items: Vec<T> = self.collect();
        digest_batch_parallel::<A, T>(&items)
    }
}
