//! Edge identity and value type for workflow graphs.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::graph::node::NodeId;

/// Opaque edge identifier, unique within one graph.
///
/// Generated ids look like `e1-1` (template ordinal plus a generation
/// suffix).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(String);

impl EdgeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EdgeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for EdgeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for EdgeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A directed connection between two nodes.
///
/// `source` and `target` are node ids and must both resolve within the owning
/// graph; [`WorkflowGraph`](crate::graph::WorkflowGraph) rejects edges that
/// would dangle. Graphs are multigraphs: several edges may connect the same
/// pair of nodes, and self-loops are legal (feedback edges in reflective
/// patterns).
///
/// `label` names the data or control handed off ("query", "context",
/// "iterate"); the transient `animated` flag is owned by the execution
/// preview.
///
/// # Examples
///
/// ```rust
/// use agentloom::graph::Edge;
///
/// let edge = Edge::new("e1-1", "input-1", "analyze-1").with_label("task");
/// assert!(edge.touches(&"input-1".into()));
/// assert!(!edge.is_self_loop());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub animated: bool,
}

impl Edge {
    /// Create an unlabeled edge. Integrity of the endpoints is checked when
    /// the edge is added to a graph.
    pub fn new(
        id: impl Into<EdgeId>,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            label: String::new(),
            animated: false,
        }
    }

    /// Name the handoff this edge carries.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Returns `true` when `node` is either endpoint.
    #[must_use]
    pub fn touches(&self, node: &NodeId) -> bool {
        self.source == *node || self.target == *node
    }

    /// Returns `true` when both endpoints are the same node.
    #[must_use]
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}
