//! crates/logging/src/tracing_bridge.rs
//! Bridge between the tracing crate and the debug flag system.
//!
//! [`MbLayer`] is a tracing-subscriber layer that maps events on the
//! `multibuffer::sched`, `multibuffer::ctx` and `multibuffer::dispatch`
//! targets onto the matching [`DebugFlag`] and records them as
//! [`DiagnosticEvent`](crate::DiagnosticEvent)s when the thread's
//! verbosity allows it.
//!
//! ```rust,ignore
//! use logging::{VerbosityConfig, init_tracing};
//!
//! init_tracing(VerbosityConfig::from_verbose_level(2));
//! tracing::info!(target: "multibuffer::sched", "admitted job");
//! ```

use super::config::VerbosityConfig;
use super::levels::DebugFlag;
use super::thread_local::{debug_gte, emit_debug};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

/// A tracing layer that feeds events into the thread-local diagnostic buffer.
#[derive(Debug, Clone, Copy, Default)]
pub struct MbLayer;

impl MbLayer {
    /// Create a new layer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Map a tracing target to a debug flag.
    fn target_to_debug_flag(target: &str) -> Option<DebugFlag> {
        // Match on the last path segment so "unscheduled" never hits "sched"
        let leaf = target.rsplit("::").next().unwrap_or(target);
        match leaf {
            "sched" | "scheduler" => Some(DebugFlag::Sched),
            "ctx" | "context" | "manager" => Some(DebugFlag::Ctx),
            "dispatch" | "dispatcher" => Some(DebugFlag::Dispatch),
            _ => None,
        }
    }

    /// ERROR through INFO map to 1, DEBUG to 2 and TRACE to 3.
    const fn level_to_verbosity_level(level: &Level) -> u8 {
        match *level {
            Level::ERROR | Level::WARN | Level::INFO => 1,
            Level::DEBUG => 2,
            Level::TRACE => 3,
        }
    }
}

impl<S> Layer<S> for MbLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let Some(flag) = Self::target_to_debug_flag(metadata.target()) else {
            return;
        };

        let verbosity_level = Self::level_to_verbosity_level(metadata.level());
        if !debug_gte(flag, verbosity_level) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        if let Some(message) = visitor.message {
            emit_debug(flag, verbosity_level, message);
        }
    }
}

/// Captures the `message` field of an event.
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        }
    }
}

/// Install a global subscriber carrying [`MbLayer`] and configure this thread.
///
/// Panics if a global subscriber was already installed.
pub fn init_tracing(config: VerbosityConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    super::thread_local::init(config);

    tracing_subscriber::registry().with(MbLayer::new()).init();
}

/// Like [`init_tracing`], with an additional filter layer such as `EnvFilter`.
pub fn init_tracing_with_filter<F>(config: VerbosityConfig, filter: F)
where
    F: Layer<tracing_subscriber::Registry> + Send + Sync + 'static,
{
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    super::thread_local::init(config);

    tracing_subscriber::registry()
        .with(filter)
        .with(MbLayer::new())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drain_events;
    use tracing_subscriber::layer::SubscriberExt;

    #[test]
    fn targets_map_by_last_segment() {
        assert_eq!(
            MbLayer::target_to_debug_flag("multibuffer::sched"),
            Some(DebugFlag::Sched)
        );
        assert_eq!(
            MbLayer::target_to_debug_flag("multibuffer::ctx"),
            Some(DebugFlag::Ctx)
        );
        assert_eq!(
            MbLayer::target_to_debug_flag("kernels::dispatcher"),
            Some(DebugFlag::Dispatch)
        );
        assert_eq!(MbLayer::target_to_debug_flag("multibuffer::unscheduled"), None);
        assert_eq!(MbLayer::target_to_debug_flag("unknown"), None);
    }

    #[test]
    fn tracing_levels_map_to_verbosity() {
        assert_eq!(MbLayer::level_to_verbosity_level(&Level::ERROR), 1);
        assert_eq!(MbLayer::level_to_verbosity_level(&Level::INFO), 1);
        assert_eq!(MbLayer::level_to_verbosity_level(&Level::DEBUG), 2);
        assert_eq!(MbLayer::level_to_verbosity_level(&Level::TRACE), 3);
    }

    #[test]
    fn events_are_recorded_when_level_allows() {
        let mut config = VerbosityConfig::default();
        config.debug.sched = 2;
        crate::init(config);
        drain_events();

        let subscriber = tracing_subscriber::registry().with(MbLayer::new());
        tracing::subscriber::with_default(subscriber, || {
            crate::trace_sched!("advanced {} lanes", 4);
            tracing::trace!(target: "multibuffer::sched", "too detailed");
            tracing::info!(target: "multibuffer::ctx", "ctx disabled");
        });

        let events = drain_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].flag, DebugFlag::Sched);
        assert_eq!(events[0].level, 2);
        assert_eq!(events[0].message, "advanced 4 lanes");
    }
}
