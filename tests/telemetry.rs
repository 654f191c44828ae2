//! Behavior coverage for telemetry setup helpers.

use agentloom::telemetry::{self, FormatterMode};

#[test]
fn test_plain_mode_is_never_colored() {
    assert!(!FormatterMode::Plain.is_colored());
}

#[test]
fn test_colored_mode_is_always_colored() {
    assert!(FormatterMode::Colored.is_colored());
}

#[test]
fn test_auto_detect_resolves_to_a_concrete_mode() {
    let resolved = FormatterMode::auto_detect();
    assert!(
        matches!(resolved, FormatterMode::Colored | FormatterMode::Plain),
        "auto detection must settle on a concrete mode, got {resolved:?}"
    );
}

#[test]
fn test_init_for_tests_is_idempotent() {
    telemetry::init_for_tests();
    telemetry::init_for_tests();
    // The warn-level filter installed above swallows this without panicking.
    tracing::debug!("suppressed by the test filter");
}
