//! Error taxonomy for graph construction and mutation.
//!
//! Every variant carries the ids involved so callers can point at the
//! offending element without re-deriving it, and a `help` hint describing
//! the usual way out.

use miette::Diagnostic;
use thiserror::Error;

use crate::graph::config::ConfigError;
use crate::graph::edge::EdgeId;
use crate::graph::node::NodeId;

/// Failure modes of [`WorkflowGraph`](crate::graph::WorkflowGraph)
/// construction and mutation.
///
/// All mutation methods are fail-fast: on error the graph is exactly as it
/// was before the call.
#[derive(Debug, Error, Diagnostic)]
pub enum GraphError {
    /// A node with this id already exists in the graph.
    #[error("node id '{id}' is already present in the graph")]
    #[diagnostic(
        code(agentloom::graph::duplicate_node),
        help("node ids must be unique per graph; pick a fresh id or remove the existing node first")
    )]
    DuplicateNode { id: NodeId },

    /// An edge with this id already exists in the graph.
    #[error("edge id '{id}' is already present in the graph")]
    #[diagnostic(
        code(agentloom::graph::duplicate_edge),
        help("edge ids must be unique per graph; parallel edges are fine but need distinct ids")
    )]
    DuplicateEdge { id: EdgeId },

    /// An edge references a node id that does not resolve in this graph.
    #[error("edge '{edge}' references unknown node '{node}'")]
    #[diagnostic(
        code(agentloom::graph::dangling_edge),
        help("add the node before the edge, or fix the endpoint id")
    )]
    DanglingEdge { edge: EdgeId, node: NodeId },

    /// A lookup or mutation targeted a node id not present in the graph.
    #[error("no node with id '{id}' in the graph")]
    #[diagnostic(code(agentloom::graph::unknown_node))]
    UnknownNode { id: NodeId },

    /// A lookup or mutation targeted an edge id not present in the graph.
    #[error("no edge with id '{id}' in the graph")]
    #[diagnostic(code(agentloom::graph::unknown_edge))]
    UnknownEdge { id: EdgeId },

    /// A node config edit could not be applied; the node keeps its previous
    /// config.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}
