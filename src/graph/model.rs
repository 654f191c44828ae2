//! The workflow graph container and its integrity-checked mutation API.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::graph::config::NodeConfig;
use crate::graph::edge::{Edge, EdgeId};
use crate::graph::error::GraphError;
use crate::graph::node::{Node, NodeId};
use crate::types::{NodeStatus, Position};

/// A workflow graph behind a lock, shared between the editing surface, the
/// execution simulator, and the (external) renderer.
pub type SharedGraph = Arc<RwLock<WorkflowGraph>>;

/// A directed multigraph of workflow nodes.
///
/// `WorkflowGraph` owns the node and edge arrays and is the only place
/// allowed to mutate them, so the two structural invariants hold everywhere
/// downstream:
///
/// - node and edge ids are unique within the graph;
/// - every edge's `source` and `target` resolve to a node in the same graph
///   (no dangling edges).
///
/// Array order is meaningful: the execution simulator visits nodes in
/// exactly the order they appear in `nodes()`, and generated graphs keep
/// their template order.
///
/// # Examples
///
/// ```rust
/// use agentloom::graph::{Edge, Node, WorkflowGraph};
/// use agentloom::types::NodeKind;
///
/// let mut graph = WorkflowGraph::new();
/// graph.add_node(Node::new("in-1", NodeKind::Input, "Input"))?;
/// graph.add_node(Node::new("out-1", NodeKind::Output, "Output"))?;
/// graph.add_edge(Edge::new("e1-1", "in-1", "out-1").with_label("result"))?;
///
/// assert_eq!(graph.node_count(), 2);
/// assert!(graph.validate().is_ok());
///
/// // Dangling edges are rejected up front.
/// let err = graph.add_edge(Edge::new("e2-1", "in-1", "missing"));
/// assert!(err.is_err());
/// # Ok::<(), agentloom::graph::GraphError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl WorkflowGraph {
    /// Create an empty graph (the blank canvas).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a graph from prebuilt parts, validating id uniqueness and
    /// referential integrity in one pass. Used by the import path and by
    /// anything reconstructing a graph from stored records.
    pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self, GraphError> {
        let graph = Self { nodes, edges };
        graph.validate()?;
        Ok(graph)
    }

    /// Assemble a graph from parts the caller already knows satisfy the
    /// invariants (expansion of a registry-validated template). Checked in
    /// debug builds only.
    pub(crate) fn from_validated_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        let graph = Self { nodes, edges };
        debug_assert!(graph.validate().is_ok());
        graph
    }

    // ========================================================================
    // Read access
    // ========================================================================

    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == *id)
    }

    #[must_use]
    pub fn edge(&self, id: &EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == *id)
    }

    #[must_use]
    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.node(id).is_some()
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Edges pointing backwards in node array order, self-loops included.
    ///
    /// A generated pattern is cyclic exactly when this is non-empty; the
    /// reasoning-acting and self-reflection templates produce one such edge,
    /// all other built-ins none.
    #[must_use]
    pub fn back_edges(&self) -> Vec<&Edge> {
        self.edges
            .iter()
            .filter(|e| {
                let src = self.node_index(&e.source);
                let tgt = self.node_index(&e.target);
                match (src, tgt) {
                    (Some(s), Some(t)) => t <= s,
                    _ => false,
                }
            })
            .collect()
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Append a node.
    ///
    /// Fails with [`GraphError::DuplicateNode`] if the id is already taken;
    /// the graph is unchanged on error.
    pub fn add_node(&mut self, node: Node) -> Result<(), GraphError> {
        if self.contains_node(&node.id) {
            return Err(GraphError::DuplicateNode { id: node.id });
        }
        self.nodes.push(node);
        Ok(())
    }

    /// Append an edge, checking both endpoints resolve first.
    ///
    /// Parallel edges between the same pair and self-loops are allowed; a
    /// reused edge id or an unresolvable endpoint is rejected and the graph
    /// is unchanged.
    pub fn add_edge(&mut self, edge: Edge) -> Result<(), GraphError> {
        if self.edge(&edge.id).is_some() {
            return Err(GraphError::DuplicateEdge { id: edge.id });
        }
        for endpoint in [&edge.source, &edge.target] {
            if !self.contains_node(endpoint) {
                return Err(GraphError::DanglingEdge {
                    edge: edge.id.clone(),
                    node: endpoint.clone(),
                });
            }
        }
        self.edges.push(edge);
        Ok(())
    }

    /// Remove a node and every edge touching it.
    ///
    /// Cascading keeps the no-dangling-edges invariant without making the
    /// caller delete edges first. Returns the removed node.
    pub fn remove_node(&mut self, id: &NodeId) -> Result<Node, GraphError> {
        let index = self
            .node_index(id)
            .ok_or_else(|| GraphError::UnknownNode { id: id.clone() })?;
        let node = self.nodes.remove(index);
        self.edges.retain(|e| !e.touches(id));
        Ok(node)
    }

    /// Remove an edge by id, returning it.
    pub fn remove_edge(&mut self, id: &EdgeId) -> Result<Edge, GraphError> {
        let index = self
            .edges
            .iter()
            .position(|e| e.id == *id)
            .ok_or_else(|| GraphError::UnknownEdge { id: id.clone() })?;
        Ok(self.edges.remove(index))
    }

    /// Move a node to `to`, snapped to the canvas grid. Returns the snapped
    /// position actually applied.
    pub fn move_node(&mut self, id: &NodeId, to: Position) -> Result<Position, GraphError> {
        let snapped = to.snapped();
        let node = self
            .node_mut(id)
            .ok_or_else(|| GraphError::UnknownNode { id: id.clone() })?;
        node.position = snapped;
        Ok(snapped)
    }

    /// Apply editor-supplied config JSON to a node.
    ///
    /// A parse failure leaves the node's previous config in place and is
    /// reported to the caller; nothing is partially applied.
    pub fn update_node_config(&mut self, id: &NodeId, json: &str) -> Result<(), GraphError> {
        let kind = self
            .node(id)
            .ok_or_else(|| GraphError::UnknownNode { id: id.clone() })?
            .kind;
        let parsed = NodeConfig::from_json_str(kind, json)?;
        if let Some(node) = self.node_mut(id) {
            node.config = parsed;
        }
        Ok(())
    }

    /// Absorb every node and edge of `other` into this graph.
    ///
    /// Validated up front as one unit: if any incoming node id collides or
    /// any incoming edge would dangle, nothing is absorbed. This is the
    /// "generate another pattern onto the same canvas" path, which is why
    /// generated ids carry a fresh suffix per generation.
    pub fn merge(&mut self, other: WorkflowGraph) -> Result<(), GraphError> {
        for node in &other.nodes {
            if self.contains_node(&node.id) {
                return Err(GraphError::DuplicateNode {
                    id: node.id.clone(),
                });
            }
        }
        for edge in &other.edges {
            if self.edge(&edge.id).is_some() {
                return Err(GraphError::DuplicateEdge {
                    id: edge.id.clone(),
                });
            }
            for endpoint in [&edge.source, &edge.target] {
                if !self.contains_node(endpoint) && !other.contains_node(endpoint) {
                    return Err(GraphError::DanglingEdge {
                        edge: edge.id.clone(),
                        node: endpoint.clone(),
                    });
                }
            }
        }
        self.nodes.extend(other.nodes);
        self.edges.extend(other.edges);
        Ok(())
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Check id uniqueness and referential integrity over the whole graph.
    ///
    /// Mutation methods maintain these invariants incrementally; `validate`
    /// exists for graphs assembled from external records.
    pub fn validate(&self) -> Result<(), GraphError> {
        for (i, node) in self.nodes.iter().enumerate() {
            if self.nodes[..i].iter().any(|n| n.id == node.id) {
                return Err(GraphError::DuplicateNode {
                    id: node.id.clone(),
                });
            }
        }
        for (i, edge) in self.edges.iter().enumerate() {
            if self.edges[..i].iter().any(|e| e.id == edge.id) {
                return Err(GraphError::DuplicateEdge {
                    id: edge.id.clone(),
                });
            }
            for endpoint in [&edge.source, &edge.target] {
                if !self.contains_node(endpoint) {
                    return Err(GraphError::DanglingEdge {
                        edge: edge.id.clone(),
                        node: endpoint.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    // ========================================================================
    // Transient simulation state
    // ========================================================================

    /// Reset every node status to none and every edge to unanimated.
    ///
    /// This is what cancellation (and the stop control generally) applies.
    pub fn clear_transient(&mut self) {
        for node in &mut self.nodes {
            node.status = NodeStatus::Idle;
        }
        self.clear_animations();
    }

    /// Clear only the edge animation flags, keeping node statuses. Applied
    /// when a simulation run completes.
    pub fn clear_animations(&mut self) {
        for edge in &mut self.edges {
            edge.animated = false;
        }
    }

    /// Mark the node at `index` running and animate its incident edges.
    ///
    /// Any other node still marked running is demoted to success, so at most
    /// one node is ever running. Returns the node's id, or `None` when the
    /// index is out of range.
    pub(crate) fn mark_running(&mut self, index: usize) -> Option<NodeId> {
        if index >= self.nodes.len() {
            return None;
        }
        for (i, node) in self.nodes.iter_mut().enumerate() {
            if i == index {
                node.status = NodeStatus::Running;
            } else if node.status.is_running() {
                node.status = NodeStatus::Success;
            }
        }
        let id = self.nodes[index].id.clone();
        for edge in &mut self.edges {
            if edge.touches(&id) {
                edge.animated = true;
            }
        }
        Some(id)
    }

    /// Mark the node at `index` successful. Returns its id, or `None` when
    /// the index is out of range.
    pub(crate) fn mark_success(&mut self, index: usize) -> Option<NodeId> {
        let node = self.nodes.get_mut(index)?;
        node.status = NodeStatus::Success;
        Some(node.id.clone())
    }

    /// Wrap this graph for sharing with the simulator and renderer.
    #[must_use]
    pub fn into_shared(self) -> SharedGraph {
        Arc::new(RwLock::new(self))
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn node_index(&self, id: &NodeId) -> Option<usize> {
        self.nodes.iter().position(|n| n.id == *id)
    }

    fn node_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == *id)
    }
}
