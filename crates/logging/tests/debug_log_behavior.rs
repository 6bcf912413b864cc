//! Integration tests for debug log macro behavior at different levels.
//!
//! These tests verify that the `debug_log!` macro correctly emits or suppresses
//! diagnostic messages based on the configured verbosity levels.

use logging::{DebugFlag, DiagnosticEvent, VerbosityConfig, debug_log, drain_events, init};

// ============================================================================
// Basic Debug Log Emission Tests
// ============================================================================

/// Verifies debug_log emits message when flag level is sufficient.
#[test]
fn debug_log_emits_when_level_sufficient() {
    let mut config = VerbosityConfig::default();
    config.debug.sched = 2;
    init(config);
    drain_events();

    debug_log!(Sched, 1, "test message");

    let events = drain_events();
    assert_eq!(
        events,
        vec![DiagnosticEvent {
            flag: DebugFlag::Sched,
            level: 1,
            message: "test message".to_string(),
        }]
    );
}

/// Verifies debug_log suppresses message when level is insufficient.
#[test]
fn debug_log_suppresses_when_level_insufficient() {
    let mut config = VerbosityConfig::default();
    config.debug.sched = 1;
    init(config);
    drain_events();

    debug_log!(Sched, 2, "should not appear");

    assert!(drain_events().is_empty());
}

/// Verifies debug_log emits message when level exactly matches.
#[test]
fn debug_log_emits_when_level_exact_match() {
    let mut config = VerbosityConfig::default();
    config.debug.ctx = 3;
    init(config);
    drain_events();

    debug_log!(Ctx, 3, "exact match");

    let events = drain_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].message, "exact match");
}

/// Verifies the message is not formatted when the flag is disabled.
#[test]
fn debug_log_skips_formatting_when_disabled() {
    init(VerbosityConfig::default());
    drain_events();

    struct Tracked(std::cell::Cell<bool>);

    impl std::fmt::Display for Tracked {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            self.0.set(true);
            f.write_str("tracked")
        }
    }

    let tracked = Tracked(std::cell::Cell::new(false));
    debug_log!(Dispatch, 1, "{}", tracked);

    assert!(!tracked.0.get());
    assert!(drain_events().is_empty());
}

// ============================================================================
// Debug Flag Category Tests
// ============================================================================

/// Verifies each debug flag category emits independently.
#[test]
fn debug_log_flags_are_independent() {
    let mut config = VerbosityConfig::default();
    config.debug.sched = 2;
    config.debug.ctx = 0;
    config.debug.dispatch = 1;
    init(config);
    drain_events();

    debug_log!(Sched, 1, "sched");
    debug_log!(Ctx, 1, "ctx");
    debug_log!(Dispatch, 1, "dispatch");
    debug_log!(Dispatch, 2, "dispatch detail");

    let flags: Vec<DebugFlag> = drain_events().into_iter().map(|e| e.flag).collect();
    assert_eq!(flags, [DebugFlag::Sched, DebugFlag::Dispatch]);
}

/// Verifies format arguments are rendered into the message.
#[test]
fn debug_log_formats_arguments() {
    let mut config = VerbosityConfig::default();
    config.debug.sched = 1;
    init(config);
    drain_events();

    let lanes = 8;
    debug_log!(Sched, 1, "advance {} lanes by {blocks} blocks", lanes, blocks = 3);

    let events = drain_events();
    assert_eq!(events[0].message, "advance 8 lanes by 3 blocks");
}

// ============================================================================
// Flag Token Tests
// ============================================================================

/// Verifies flag tokens applied at runtime take effect immediately.
#[test]
fn apply_debug_flag_enables_emission() {
    init(VerbosityConfig::default());
    drain_events();

    debug_log!(Sched, 2, "before");
    logging::apply_debug_flag("sched2").unwrap();
    debug_log!(Sched, 2, "after");

    let events = drain_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].message, "after");
}

/// Verifies verbose levels map onto flag levels.
#[test]
fn verbose_level_gates_categories() {
    init(VerbosityConfig::from_verbose_level(1));
    drain_events();

    debug_log!(Dispatch, 1, "dispatch");
    debug_log!(Sched, 1, "sched");

    let events = drain_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].flag, DebugFlag::Dispatch);
}
