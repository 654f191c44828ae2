//! Node identity and value type for workflow graphs.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::graph::config::NodeConfig;
use crate::types::{ExecutionMode, NodeKind, NodeStatus, Position};

/// Opaque node identifier, unique within one graph.
///
/// Generated ids look like `input-1` or `observe-3` (template local id plus a
/// generation suffix); user-created nodes may use any non-empty string. The
/// newtype keeps node ids from being confused with edge ids or labels.
///
/// # Examples
///
/// ```rust
/// use agentloom::graph::NodeId;
///
/// let id = NodeId::new("input-1");
/// assert_eq!(id.as_str(), "input-1");
/// assert_eq!(id, NodeId::from("input-1"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A single node on the workflow canvas.
///
/// Nodes are pure data: identity, vocabulary fields, display strings, a
/// position, and a kind-specific [`NodeConfig`]. The transient `status` field
/// belongs to the execution preview and is reset rather than persisted with
/// meaning.
///
/// Uniqueness of ids and referential integrity of edges are enforced by
/// [`WorkflowGraph`](crate::graph::WorkflowGraph), not by `Node` itself.
///
/// # Examples
///
/// ```rust
/// use agentloom::graph::Node;
/// use agentloom::types::{ExecutionMode, NodeKind, Position};
///
/// let node = Node::new("analyze-1", NodeKind::ModelCall, "Task Analysis")
///     .with_description("Analyze task requirements")
///     .with_position(Position::new(300.0, 100.0))
///     .with_execution_mode(ExecutionMode::Hybrid);
///
/// assert_eq!(node.kind, NodeKind::ModelCall);
/// assert!(node.status.is_idle());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub config: NodeConfig,
    #[serde(default)]
    pub execution_mode: ExecutionMode,
    #[serde(default)]
    pub status: NodeStatus,
}

impl Node {
    /// Create a node with the default config for its kind and no simulation
    /// state.
    pub fn new(id: impl Into<NodeId>, kind: NodeKind, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            label: label.into(),
            description: String::new(),
            position: Position::default(),
            config: NodeConfig::default_for(kind),
            execution_mode: ExecutionMode::default(),
            status: NodeStatus::default(),
        }
    }

    /// Set the display description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Place the node at an explicit canvas position.
    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Replace the kind-default config.
    #[must_use]
    pub fn with_config(mut self, config: NodeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the execution mode marker.
    #[must_use]
    pub fn with_execution_mode(mut self, mode: ExecutionMode) -> Self {
        self.execution_mode = mode;
        self
    }
}
