//! Runtime lane-width detection and provider selection.

use std::sync::OnceLock;

use logging::debug_log;

use crate::algorithm::Algorithm;
use crate::transform::{BlockTransform, PortableTransform};

/// Available lane-width backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// AVX-512 width, 16 parallel lanes.
    Avx512,
    /// AVX2 width, 8 parallel lanes.
    Avx2,
    /// ARM NEON width, 4 parallel lanes.
    Neon,
    /// No wide registers detected, 4 lanes of portable compression.
    Portable,
}

impl Backend {
    /// Lane width N a provider for this backend advertises.
    pub const fn lanes(self) -> usize {
        match self {
            Backend::Avx512 => 16,
            Backend::Avx2 => 8,
            Backend::Neon | Backend::Portable => 4,
        }
    }

    /// Short lowercase name for diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Backend::Avx512 => "avx512",
            Backend::Avx2 => "avx2",
            Backend::Neon => "neon",
            Backend::Portable => "portable",
        }
    }
}

/// Dispatcher that sizes block transform providers for the running CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatcher {
    backend: Backend,
}

impl Dispatcher {
    /// Detect CPU features and select the widest available backend.
    pub fn detect() -> Self {
        let backend = Self::detect_backend();
        debug_log!(Dispatch, 1, "selected {} backend ({} lanes)", backend.name(), backend.lanes());
        #[cfg(feature = "tracing")]
        logging::trace_dispatch!(backend = backend.name(), lanes = backend.lanes(), "selected backend");
        Self { backend }
    }

    /// Pins the dispatcher to a specific backend.
    pub const fn with_backend(backend: Backend) -> Self {
        Self { backend }
    }

    fn detect_backend() -> Backend {
        #[cfg(target_arch = "x86_64")]
        {
            if is_x86_feature_detected!("avx512f") && is_x86_feature_detected!("avx512bw") {
                return Backend::Avx512;
            }
            if is_x86_feature_detected!("avx2") {
                return Backend::Avx2;
            }
        }

        #[cfg(target_arch = "aarch64")]
        {
            // NEON is mandatory on aarch64
            return Backend::Neon;
        }

        Backend::Portable
    }

    /// The backend chosen at construction.
    pub const fn backend(&self) -> Backend {
        self.backend
    }

    /// Lane count of the selected backend.
    pub const fn lanes(&self) -> usize {
        self.backend.lanes()
    }

    /// Builds a provider for `A` sized to the selected backend.
    pub fn transform<A: Algorithm>(&self) -> Box<dyn BlockTransform<A> + Send + Sync> {
        Box::new(PortableTransform::<A>::new(self.lanes()))
    }
}

/// Process-wide dispatcher, detected once on first use.
pub fn global() -> &'static Dispatcher {
    static DISPATCHER: OnceLock<Dispatcher> = OnceLock::new();
    DISPATCHER.get_or_init(Dispatcher::detect)
}
