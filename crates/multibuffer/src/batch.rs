//! One-shot hashing of many independent messages.

use kernels::{Algorithm, BlockTransform};

use crate::context::HashCtx;
use crate::flags::HashFlag;
use crate::manager::CtxManager;

/// Digests every input through one manager sized for the running CPU.
///
/// Results come back in input order even though contexts complete in
/// whatever order their lengths dictate.
///
/// ```
/// use kernels::Sha1;
/// use multibuffer::digest_batch;
///
/// let digests = digest_batch::<Sha1, _>(&["abc", ""]);
/// assert_eq!(digests[0][..4], [0xa9, 0x99, 0x3e, 0x36]);
/// assert_eq!(digests[1][..4], [0xda, 0x39, 0xa3, 0xee]);
/// ```
pub fn digest_batch<A: Algorithm, I: AsRef<[u8]>>(inputs: &[I]) -> Vec<A::Output> {
    digest_batch_with(kernels::global().transform::<A>(), inputs)
}

/// Digests every input through one manager over `transform`.
pub fn digest_batch_with<A, I, T>(transform: T, inputs: &[I]) -> Vec<A::Output>
where
    A: Algorithm,
    I: AsRef<[u8]>,
    T: BlockTransform<A>,
{
    let mut contexts: Vec<HashCtx<A, usize>> =
        (0..inputs.len()).map(HashCtx::with_user_data).collect();
    let mut digests: Vec<Option<A::Output>> = vec![None; inputs.len()];

    let mut manager = CtxManager::new(transform);
    for (ctx, input) in contexts.iter_mut().zip(inputs) {
        // Fresh contexts always accept ENTIRE.
        if let Ok(Some(done)) = manager.submit(ctx, input.as_ref(), HashFlag::Entire) {
            digests[*done.user_data()] = done.digest();
        }
    }
    while let Some(done) = manager.flush() {
        digests[*done.user_data()] = done.digest();
    }

    debug_assert!(digests.iter().all(Option::is_some));
    digests.into_iter().flatten().collect()
}
