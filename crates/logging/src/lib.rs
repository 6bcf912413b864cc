#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` provides the leveled debug diagnostics used across the
//! multi-buffer hashing workspace. Each diagnostic belongs to a
//! [`DebugFlag`] category (lane scheduling, context transitions, backend
//! dispatch) and carries a level; a message is only rendered when the
//! thread's [`VerbosityConfig`] enables that category at that level.
//!
//! # Design
//!
//! Verbosity and collected events live in thread-local storage. Producers use
//! [`debug_log!`], which checks [`debug_gte`] before formatting anything, so
//! disabled diagnostics cost a thread-local read. Consumers call
//! [`drain_events`] to take the collected [`DiagnosticEvent`]s. Tests rely on
//! this to observe scheduler behavior that is otherwise invisible.
//!
//! With the `tracing` feature, `MbLayer` routes `tracing` events on the
//! `multibuffer::*` targets into the same buffer, and the `trace_*` macros
//! emit on those targets.
//!
//! # Examples
//!
//! ```
//! use logging::{apply_debug_flag, debug_log, drain_events, init, DebugFlag, VerbosityConfig};
//!
//! init(VerbosityConfig::default());
//! apply_debug_flag("ctx2").unwrap();
//!
//! debug_log!(Ctx, 2, "context {} completed", 7);
//! debug_log!(Sched, 1, "scheduling is disabled");
//!
//! let events = drain_events();
//! assert_eq!(events.len(), 1);
//! assert_eq!(events[0].flag, DebugFlag::Ctx);
//! ```

mod config;
mod levels;
mod macros;
mod thread_local;

#[cfg(feature = "tracing")]
mod tracing_bridge;
#[cfg(feature = "tracing")]
mod tracing_macros;

pub use config::VerbosityConfig;
pub use levels::{DebugFlag, DebugLevels};
pub use thread_local::{
    DiagnosticEvent, apply_debug_flag, current, debug_gte, drain_events, emit_debug, init,
};

#[cfg(feature = "tracing")]
pub use tracing_bridge::{MbLayer, init_tracing, init_tracing_with_filter};
