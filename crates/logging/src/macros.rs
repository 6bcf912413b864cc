//! crates/logging/src/macros.rs
//! The level-gated `debug_log!` macro.

/// Record a debug diagnostic when the flag's configured level is high enough.
///
/// The first argument names a [`DebugFlag`](crate::DebugFlag) variant, the
/// second is the level the message belongs to, and the rest is a
/// [`format!`] argument list. The message is only rendered when
/// [`debug_gte`](crate::debug_gte) passes.
///
/// ```
/// use logging::{debug_log, drain_events, init, VerbosityConfig};
///
/// let mut config = VerbosityConfig::default();
/// config.debug.sched = 2;
/// init(config);
///
/// debug_log!(Sched, 1, "admitted job into lane {}", 3);
/// debug_log!(Sched, 3, "too detailed");
///
/// let events = drain_events();
/// assert_eq!(events.len(), 1);
/// assert_eq!(events[0].message, "admitted job into lane 3");
/// ```
#[macro_export]
macro_rules! debug_log {
    ($flag:ident, $level:expr, $($arg:tt)+) => {{
        let level: u8 = $level;
        if $crate::debug_gte($crate::DebugFlag::$flag, level) {
            $crate::emit_debug($crate::DebugFlag::$flag, level, ::std::format!($($arg)+));
        }
    }};
}
