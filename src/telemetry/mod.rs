//! Tracing subscriber setup for applications and tests.
//!
//! Library code only ever emits through [`tracing`] macros; this module is
//! where a binary (or test harness) decides how those events are rendered.
//! [`init`] installs the global subscriber once at startup, filtered by the
//! `AGENTLOOM_LOG` environment variable, with [`tracing_error`]'s
//! `ErrorLayer` so diagnostic reports carry span context.

use std::io::IsTerminal;

use miette::Diagnostic;
use thiserror::Error;
use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding the log filter directive.
pub const LOG_ENV_VAR: &str = "AGENTLOOM_LOG";

/// Filter applied when `AGENTLOOM_LOG` is unset or unparseable.
pub const DEFAULT_FILTER: &str = "info";

/// Color mode for log output.
///
/// Controls whether ANSI color codes are included in formatted output:
/// - [`FormatterMode::Auto`]: Automatically detects TTY capability via `stderr.is_terminal()`
/// - [`FormatterMode::Colored`]: Always include color codes (for forced color output)
/// - [`FormatterMode::Plain`]: Never include color codes (for logs/files)
///
/// # Examples
/// ```
/// use agentloom::telemetry::FormatterMode;
///
/// // Auto-detect based on TTY
/// let mode = FormatterMode::auto_detect();
///
/// // Force plain output for logging
/// let mode = FormatterMode::Plain;
/// assert!(!mode.is_colored());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatterMode {
    /// Auto-detect TTY capability (checks `stderr.is_terminal()`)
    #[default]
    Auto,
    /// Always include ANSI color codes
    Colored,
    /// Never include ANSI color codes
    Plain,
}

impl FormatterMode {
    /// Auto-detect color mode based on stderr TTY capability.
    ///
    /// Returns `FormatterMode::Colored` if stderr is a terminal, otherwise `FormatterMode::Plain`.
    pub fn auto_detect() -> Self {
        if std::io::stderr().is_terminal() {
            FormatterMode::Colored
        } else {
            FormatterMode::Plain
        }
    }

    /// Returns true if this mode should use colored output.
    ///
    /// For `Auto` mode, performs TTY detection on each call.
    pub fn is_colored(&self) -> bool {
        match self {
            FormatterMode::Auto => std::io::stderr().is_terminal(),
            FormatterMode::Colored => true,
            FormatterMode::Plain => false,
        }
    }
}

/// Subscriber installation failures.
#[derive(Debug, Error, Diagnostic)]
pub enum TelemetryError {
    #[error("global tracing subscriber already installed: {0}")]
    #[diagnostic(
        code(agentloom::telemetry::init),
        help("Call init once, at process startup; tests should use init_for_tests.")
    )]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Install the global subscriber with auto-detected colors.
///
/// Events go to stderr, filtered by `AGENTLOOM_LOG` (defaulting to `info`).
///
/// # Errors
///
/// [`TelemetryError::Init`] when a global subscriber is already set.
pub fn init() -> Result<(), TelemetryError> {
    init_with_mode(FormatterMode::Auto)
}

/// Install the global subscriber with an explicit color mode.
///
/// # Errors
///
/// [`TelemetryError::Init`] when a global subscriber is already set.
pub fn init_with_mode(mode: FormatterMode) -> Result<(), TelemetryError> {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(mode.is_colored()),
        )
        .with(ErrorLayer::default())
        .try_init()?;
    Ok(())
}

/// Quiet, idempotent setup for tests.
///
/// Shows warnings and errors only, captured by the test harness; calling it
/// from every test is safe because repeat installations are ignored.
pub fn init_for_tests() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new("warn"))
        .with(fmt::layer().with_ansi(false).with_test_writer())
        .with(ErrorLayer::default())
        .try_init();
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
