//! The block transform strategy consumed by the lane scheduler.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::MAX_LANES;
use crate::algorithm::Algorithm;

/// One lane's view handed to a provider: the running digest and the whole
/// blocks it must absorb.
#[derive(Debug)]
pub struct LaneInput<'l, A: Algorithm> {
    state: &'l mut A::State,
    data: &'l [u8],
}

impl<'l, A: Algorithm> LaneInput<'l, A> {
    /// Pairs a running state with the block-aligned bytes to absorb.
    pub fn new(state: &'l mut A::State, data: &'l [u8]) -> Self {
        debug_assert_eq!(data.len() % A::BLOCK_LEN, 0);
        Self { state, data }
    }

    /// Current running state of this lane.
    pub fn state(&self) -> &A::State {
        &*self.state
    }

    /// Block-aligned input for this lane.
    pub fn data(&self) -> &[u8] {
        self.data
    }

    /// Splits the view into its mutable state and input bytes.
    pub fn parts(&mut self) -> (&mut A::State, &[u8]) {
        (&mut *self.state, self.data)
    }
}

/// Advances several independent digest states by the same number of blocks.
///
/// The scheduler always calls [`transform`](Self::transform) with a
/// rectangular input: every lane carries exactly `blocks` whole blocks and
/// there are never more lanes than [`lanes`](Self::lanes) reports. Lanes do
/// not interact; a provider must produce the same result as compressing each
/// lane on its own.
pub trait BlockTransform<A: Algorithm> {
    /// Number of lanes this provider advances per call (N).
    fn lanes(&self) -> usize;

    /// Absorbs `blocks` blocks into every lane.
    fn transform(&self, lanes: &mut [LaneInput<'_, A>], blocks: usize);
}

impl<A: Algorithm, T: BlockTransform<A> + ?Sized> BlockTransform<A> for &T {
    fn lanes(&self) -> usize {
        (**self).lanes()
    }

    fn transform(&self, lanes: &mut [LaneInput<'_, A>], blocks: usize) {
        (**self).transform(lanes, blocks);
    }
}

impl<A: Algorithm, T: BlockTransform<A> + ?Sized> BlockTransform<A> for Box<T> {
    fn lanes(&self) -> usize {
        (**self).lanes()
    }

    fn transform(&self, lanes: &mut [LaneInput<'_, A>], blocks: usize) {
        (**self).transform(lanes, blocks);
    }
}

impl<A: Algorithm, T: BlockTransform<A> + ?Sized> BlockTransform<A> for Arc<T> {
    fn lanes(&self) -> usize {
        (**self).lanes()
    }

    fn transform(&self, lanes: &mut [LaneInput<'_, A>], blocks: usize) {
        (**self).transform(lanes, blocks);
    }
}

/// Portable provider that compresses each lane with the scalar round function.
///
/// It accepts any lane count up to [`MAX_LANES`], so the scheduler can be
/// exercised at the widths real SIMD providers use without requiring the
/// matching hardware.
pub struct PortableTransform<A> {
    lanes: usize,
    _algorithm: PhantomData<fn() -> A>,
}

impl<A: Algorithm> PortableTransform<A> {
    /// Creates a provider advertising `lanes` lanes, clamped to `1..=MAX_LANES`.
    #[must_use]
    pub fn new(lanes: usize) -> Self {
        Self {
            lanes: lanes.clamp(1, MAX_LANES),
            _algorithm: PhantomData,
        }
    }
}

impl<A> std::fmt::Debug for PortableTransform<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortableTransform")
            .field("lanes", &self.lanes)
            .finish()
    }
}

impl<A> Clone for PortableTransform<A> {
    fn clone(&self) -> Self {
        Self {
            lanes: self.lanes,
            _algorithm: PhantomData,
        }
    }
}

impl<A: Algorithm> BlockTransform<A> for PortableTransform<A> {
    fn lanes(&self) -> usize {
        self.lanes
    }

    fn transform(&self, lanes: &mut [LaneInput<'_, A>], blocks: usize) {
        debug_assert!(lanes.len() <= self.lanes);

        for lane in lanes.iter_mut() {
            let (state, data) = lane.parts();
            debug_assert_eq!(data.len(), blocks * A::BLOCK_LEN);
            for block in data.chunks_exact(A::BLOCK_LEN).take(blocks) {
                A::compress(state, block);
            }
        }
    }
}
