//! Simulator tuning resolved from explicit values or the environment.

use std::time::Duration;

use tracing::warn;

/// Dwell applied between node transitions when nothing else is configured.
pub const DEFAULT_DWELL_MS: u64 = 1500;

/// Environment variable read by [`SimulatorConfig::from_env`].
pub const DWELL_ENV_VAR: &str = "AGENTLOOM_DWELL_MS";

/// How long a node stays `running` before it flips to `success`.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use agentloom::simulator::SimulatorConfig;
///
/// let config = SimulatorConfig::default().with_dwell(Duration::from_millis(50));
/// assert_eq!(config.dwell(), Duration::from_millis(50));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimulatorConfig {
    dwell: Duration,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            dwell: Duration::from_millis(DEFAULT_DWELL_MS),
        }
    }
}

impl SimulatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the dwell from `AGENTLOOM_DWELL_MS` (millis), honoring a
    /// local `.env` file. Missing, unparseable, or zero values fall back to
    /// [`DEFAULT_DWELL_MS`].
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let raw = std::env::var(DWELL_ENV_VAR).ok();
        Self {
            dwell: Self::resolve_dwell(raw.as_deref()),
        }
    }

    /// Override the dwell explicitly, bypassing the environment.
    #[must_use]
    pub fn with_dwell(mut self, dwell: Duration) -> Self {
        self.dwell = dwell;
        self
    }

    pub fn dwell(&self) -> Duration {
        self.dwell
    }

    fn resolve_dwell(raw: Option<&str>) -> Duration {
        let default = Duration::from_millis(DEFAULT_DWELL_MS);
        let Some(raw) = raw else {
            return default;
        };
        match raw.trim().parse::<u64>() {
            Ok(0) => default,
            Ok(ms) => Duration::from_millis(ms),
            Err(_) => {
                warn!(value = raw, var = DWELL_ENV_VAR, "ignoring unparseable dwell override");
                default
            }
        }
    }
}
