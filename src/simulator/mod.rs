//! Time-boxed execution simulation over shared workflow graphs.
//!
//! The simulator animates a canvas without doing any real work: it walks the
//! node list in array order, holding each node `running` for a configurable
//! dwell before flipping it to `success`, and animates the edges touching
//! the active node. Renderers poll the shared graph or subscribe to
//! [`SimulatorEvent`](crate::events::SimulatorEvent)s; a handle cancels the
//! run and wipes all transient state at any point.
//!
//! # Architecture
//!
//! - **[`Simulator`]** - Spawns walking tasks; holds config and clock
//! - **[`SimulationHandle`]** - Observe, subscribe to, or cancel one run
//! - **[`SimulatorClock`]** - Timer seam so tests can drive time
//! - **[`SimulatorConfig`]** - Dwell tuning, environment-resolvable
//!
//! # Usage Example
//!
//! ```rust,no_run
//! use agentloom::patterns::{GenerateOptions, Generator, PatternRegistry};
//! use agentloom::simulator::{Simulator, SimulatorConfig};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let registry = PatternRegistry::default();
//! let graph = Generator::new(&registry)
//!     .generate("tool-use", &GenerateOptions::default())
//!     .into_shared();
//!
//! let handle = Simulator::new(SimulatorConfig::from_env()).start(graph);
//! let outcome = handle.join().await.unwrap();
//! assert!(outcome.is_completed());
//! # }
//! ```

mod clock;
mod config;
mod run;

pub use clock::{SimulatorClock, TokioClock};
pub use config::{DEFAULT_DWELL_MS, DWELL_ENV_VAR, SimulatorConfig};
pub use run::{SimulationHandle, SimulationOutcome, Simulator, SimulatorError};
