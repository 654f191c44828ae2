//! Sequential, cancellable status walk over a shared workflow graph.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use miette::Diagnostic;
use thiserror::Error;
use tokio::sync::Notify;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, instrument};

use crate::events::SimulatorEvent;
use crate::graph::SharedGraph;

use super::clock::{SimulatorClock, TokioClock};
use super::config::SimulatorConfig;

/// How a simulation run ended.
///
/// A run cannot fail; it either visits every node or is cancelled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimulationOutcome {
    /// Every node was visited; statuses keep their final values.
    Completed,
    /// The run was cancelled and all transient state wiped.
    Cancelled,
}

impl SimulationOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, SimulationOutcome::Completed)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, SimulationOutcome::Cancelled)
    }
}

/// Runtime plumbing errors; the simulated walk itself cannot fail.
#[derive(Debug, Error, Diagnostic)]
pub enum SimulatorError {
    #[error("simulation task join error: {0}")]
    #[diagnostic(code(agentloom::simulator::join))]
    Join(#[from] JoinError),
}

/// State shared between the handle and the walking task.
///
/// These are explicit fields rather than closure captures so the handle can
/// observe and steer a run that is already in flight.
#[derive(Debug)]
struct RunState {
    cancelled: AtomicBool,
    current_index: AtomicUsize,
    wake: Notify,
}

/// Drives time-boxed status walks over shared graphs.
///
/// The simulator visits nodes in **array order** of the graph's node list,
/// not topological order, so cyclic patterns terminate like any other. Each
/// visited node turns `running` (animating its incident edges), dwells, then
/// turns `success` before the next node starts.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use agentloom::patterns::{GenerateOptions, Generator, PatternRegistry};
/// use agentloom::simulator::{SimulationOutcome, Simulator, SimulatorConfig};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let registry = PatternRegistry::default();
/// let generator = Generator::new(&registry);
/// let graph = generator
///     .generate("react", &GenerateOptions::default())
///     .into_shared();
///
/// let simulator = Simulator::new(SimulatorConfig::new().with_dwell(Duration::from_millis(1)));
/// let handle = simulator.start(graph.clone());
///
/// let outcome = handle.join().await.unwrap();
/// assert_eq!(outcome, SimulationOutcome::Completed);
/// assert!(graph.read().edges().iter().all(|edge| !edge.animated));
/// # }
/// ```
pub struct Simulator {
    config: SimulatorConfig,
    clock: Arc<dyn SimulatorClock>,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(SimulatorConfig::default())
    }
}

impl Simulator {
    /// Create a simulator that dwells on the tokio timer.
    pub fn new(config: SimulatorConfig) -> Self {
        Self::with_clock(config, Arc::new(TokioClock))
    }

    /// Create a simulator with an injected clock, for tests that drive time.
    pub fn with_clock(config: SimulatorConfig, clock: Arc<dyn SimulatorClock>) -> Self {
        Self { config, clock }
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Spawn a walk over `graph` and return a handle to observe or cancel it.
    #[instrument(skip_all, fields(dwell_ms = self.config.dwell().as_millis() as u64))]
    pub fn start(&self, graph: SharedGraph) -> SimulationHandle {
        let state = Arc::new(RunState {
            cancelled: AtomicBool::new(false),
            current_index: AtomicUsize::new(0),
            wake: Notify::new(),
        });
        let (events_tx, events_rx) = flume::unbounded();

        let task = tokio::spawn(run_walk(
            Arc::clone(&graph),
            Arc::clone(&state),
            Arc::clone(&self.clock),
            self.config.dwell(),
            events_tx.clone(),
        ));

        SimulationHandle {
            graph,
            state,
            events: events_rx,
            events_tx,
            task,
        }
    }
}

/// Observer and controller for one in-flight simulation run.
///
/// Dropping the handle detaches the run; it keeps walking to completion.
pub struct SimulationHandle {
    graph: SharedGraph,
    state: Arc<RunState>,
    events: flume::Receiver<SimulatorEvent>,
    events_tx: flume::Sender<SimulatorEvent>,
    task: JoinHandle<SimulationOutcome>,
}

impl SimulationHandle {
    /// Array index of the node the walk is currently visiting.
    pub fn current_index(&self) -> usize {
        self.state.current_index.load(Ordering::SeqCst)
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.cancelled.load(Ordering::SeqCst)
    }

    /// Cloneable receiver of progress events for this run.
    pub fn events(&self) -> flume::Receiver<SimulatorEvent> {
        self.events.clone()
    }

    /// Stop the run and wipe all transient graph state.
    ///
    /// Takes effect synchronously: when this returns, every node status is
    /// cleared, every edge animation is off, and the walking task will not
    /// apply any further transition. Cancelling a finished run resets its
    /// transient state the same way; cancelling twice is a no-op.
    pub fn cancel(&self) {
        if self.state.cancelled.swap(true, Ordering::SeqCst) {
            return;
        }
        {
            let mut graph = self.graph.write();
            graph.clear_transient();
            let _ = self.events_tx.send(SimulatorEvent::run_cancelled());
        }
        // A stored permit wakes a dwell that starts after this call too.
        self.state.wake.notify_one();
        debug!("simulation cancelled");
    }

    /// Wait for the walking task and report how the run ended.
    ///
    /// # Errors
    ///
    /// Returns [`SimulatorError::Join`] if the task was aborted or panicked.
    pub async fn join(self) -> Result<SimulationOutcome, SimulatorError> {
        Ok(self.task.await?)
    }
}

/// The walk itself. Every graph touch happens under the graph lock with a
/// cancellation re-check inside the same scope, so a cancel that has wiped
/// state can never be overwritten by a stale transition.
#[instrument(skip_all)]
async fn run_walk(
    graph: SharedGraph,
    state: Arc<RunState>,
    clock: Arc<dyn SimulatorClock>,
    dwell: Duration,
    events: flume::Sender<SimulatorEvent>,
) -> SimulationOutcome {
    let node_count = {
        let graph = graph.read();
        if state.cancelled.load(Ordering::SeqCst) {
            return SimulationOutcome::Cancelled;
        }
        let count = graph.node_count();
        let _ = events.send(SimulatorEvent::run_started(count));
        count
    };
    debug!(node_count, "simulation started");

    for index in 0..node_count {
        state.current_index.store(index, Ordering::SeqCst);

        let node_id = {
            let mut graph = graph.write();
            if state.cancelled.load(Ordering::SeqCst) {
                return SimulationOutcome::Cancelled;
            }
            match graph.mark_running(index) {
                Some(id) => {
                    let _ = events.send(SimulatorEvent::node_started(index, id.clone()));
                    id
                }
                // Concurrent edits shrank the node list; nothing left to visit.
                None => break,
            }
        };
        debug!(index, node = %node_id, "node running");

        tokio::select! {
            () = clock.sleep(dwell) => {}
            () = state.wake.notified() => {}
        }

        {
            let mut graph = graph.write();
            if state.cancelled.load(Ordering::SeqCst) {
                return SimulationOutcome::Cancelled;
            }
            graph.mark_success(index);
            let _ = events.send(SimulatorEvent::node_succeeded(index, node_id));
        }
    }

    {
        let mut graph = graph.write();
        if state.cancelled.load(Ordering::SeqCst) {
            return SimulationOutcome::Cancelled;
        }
        graph.clear_animations();
        let _ = events.send(SimulatorEvent::run_completed());
    }
    debug!("simulation completed");
    SimulationOutcome::Completed
}
