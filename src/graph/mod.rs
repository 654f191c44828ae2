//! Workflow graph model: nodes, edges, per-kind configuration, and the
//! integrity-checked [`WorkflowGraph`] container.
//!
//! The graph is a directed multigraph kept in insertion order. Order is part
//! of the model, not an implementation detail: the execution simulator walks
//! nodes in array order, which is what lets cyclic patterns preview without
//! any topological sort.
//!
//! All mutation goes through [`WorkflowGraph`], which maintains two
//! invariants at every step:
//!
//! - node and edge ids are unique;
//! - every edge endpoint resolves to a node in the same graph.
//!
//! ```rust
//! use agentloom::graph::{Edge, Node, WorkflowGraph};
//! use agentloom::types::NodeKind;
//!
//! let mut graph = WorkflowGraph::new();
//! graph.add_node(Node::new("ask-1", NodeKind::Input, "User Input"))?;
//! graph.add_node(Node::new("llm-1", NodeKind::ModelCall, "Reason"))?;
//! graph.add_edge(Edge::new("e1-1", "ask-1", "llm-1").with_label("prompt"))?;
//!
//! assert_eq!(graph.back_edges().len(), 0);
//! # Ok::<(), agentloom::graph::GraphError>(())
//! ```

mod config;
mod edge;
mod error;
mod model;
mod node;

pub use config::{AgentConfig, ConfigError, ConfigMap, ModelConfig, NodeConfig, ToolConfig};
pub use edge::{Edge, EdgeId};
pub use error::GraphError;
pub use model::{SharedGraph, WorkflowGraph};
pub use node::{Node, NodeId};
