//! crates/logging/src/tracing_macros.rs
//! Convenience macros that emit tracing events on the engine's targets.

/// Emit a lane scheduling trace.
///
/// # Example
/// ```ignore
/// trace_sched!("advanced {} lanes by {} blocks", lanes, blocks);
/// ```
#[macro_export]
macro_rules! trace_sched {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "multibuffer::sched", $($arg)*);
    };
}

/// Emit a hash context trace.
///
/// # Example
/// ```ignore
/// trace_ctx!("context rejected: {}", err);
/// ```
#[macro_export]
macro_rules! trace_ctx {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "multibuffer::ctx", $($arg)*);
    };
}

/// Emit a backend dispatch trace.
///
/// # Example
/// ```ignore
/// trace_dispatch!("selected {} backend", name);
/// ```
#[macro_export]
macro_rules! trace_dispatch {
    ($($arg:tt)*) => {
        ::tracing::info!(target: "multibuffer::dispatch", $($arg)*);
    };
}
