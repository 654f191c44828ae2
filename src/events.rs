//! Simulator progress events for external renderers.
//!
//! Events describe the walk, not the work: they carry node ids and array
//! indices only, never configs or payload data. Delivery is an unbounded
//! [`flume`] channel handed out by
//! [`SimulationHandle::events`](crate::simulator::SimulationHandle::events);
//! with no subscriber the sends are simply dropped.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::graph::NodeId;

/// One step of simulation progress.
///
/// # Examples
///
/// ```rust
/// use agentloom::events::SimulatorEvent;
///
/// let event = SimulatorEvent::node_started(2, "tool-1".into());
/// assert_eq!(event.kind_label(), "node-started");
/// assert_eq!(event.node_id().map(|n| n.as_str()), Some("tool-1"));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum SimulatorEvent {
    /// The walk is about to visit `node_count` nodes in array order.
    RunStarted { node_count: usize },
    /// The node at `index` turned running; its incident edges animate.
    NodeStarted { index: usize, node: NodeId },
    /// The node at `index` finished its dwell and turned successful.
    NodeSucceeded { index: usize, node: NodeId },
    /// The walk visited every node; edge animations are cleared.
    RunCompleted,
    /// The run was cancelled and all transient state wiped.
    RunCancelled,
}

impl SimulatorEvent {
    pub fn run_started(node_count: usize) -> Self {
        SimulatorEvent::RunStarted { node_count }
    }

    pub fn node_started(index: usize, node: NodeId) -> Self {
        SimulatorEvent::NodeStarted { index, node }
    }

    pub fn node_succeeded(index: usize, node: NodeId) -> Self {
        SimulatorEvent::NodeSucceeded { index, node }
    }

    pub fn run_completed() -> Self {
        SimulatorEvent::RunCompleted
    }

    pub fn run_cancelled() -> Self {
        SimulatorEvent::RunCancelled
    }

    /// Stable kebab-case label of the event kind.
    #[must_use]
    pub fn kind_label(&self) -> &'static str {
        match self {
            SimulatorEvent::RunStarted { .. } => "run-started",
            SimulatorEvent::NodeStarted { .. } => "node-started",
            SimulatorEvent::NodeSucceeded { .. } => "node-succeeded",
            SimulatorEvent::RunCompleted => "run-completed",
            SimulatorEvent::RunCancelled => "run-cancelled",
        }
    }

    /// The node this event concerns, for the per-node kinds.
    #[must_use]
    pub fn node_id(&self) -> Option<&NodeId> {
        match self {
            SimulatorEvent::NodeStarted { node, .. } | SimulatorEvent::NodeSucceeded { node, .. } => {
                Some(node)
            }
            _ => None,
        }
    }

    /// Convert to a normalized JSON object for log or socket sinks.
    ///
    /// The shape is `{"type", "timestamp", "metadata"}` with the
    /// variant-specific fields under `metadata`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use agentloom::events::SimulatorEvent;
    ///
    /// let json = SimulatorEvent::node_succeeded(0, "input-1".into()).to_json_value();
    /// assert_eq!(json["type"], "node-succeeded");
    /// assert_eq!(json["metadata"]["node"], "input-1");
    /// assert_eq!(json["metadata"]["index"], 0);
    /// ```
    #[must_use]
    pub fn to_json_value(&self) -> Value {
        let mut metadata = serde_json::Map::new();
        match self {
            SimulatorEvent::RunStarted { node_count } => {
                metadata.insert("node_count".to_string(), json!(node_count));
            }
            SimulatorEvent::NodeStarted { index, node }
            | SimulatorEvent::NodeSucceeded { index, node } => {
                metadata.insert("index".to_string(), json!(index));
                metadata.insert("node".to_string(), json!(node.as_str()));
            }
            SimulatorEvent::RunCompleted | SimulatorEvent::RunCancelled => {}
        }
        json!({
            "type": self.kind_label(),
            "timestamp": Utc::now(),
            "metadata": Value::Object(metadata),
        })
    }
}
