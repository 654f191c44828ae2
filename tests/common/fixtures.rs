#![allow(dead_code)]

use agentloom::graph::{Edge, Node, WorkflowGraph};
use agentloom::patterns::{GenerateOptions, Generator, PatternRegistry};
use agentloom::types::NodeKind;

/// Expand a built-in catalog pattern with default options.
pub fn generate(pattern: &str) -> WorkflowGraph {
    let registry = PatternRegistry::default();
    Generator::new(&registry).generate(pattern, &GenerateOptions::default())
}

/// Minimal hand-built three-node chain: input -> model -> output.
pub fn linear_graph() -> WorkflowGraph {
    let mut graph = WorkflowGraph::new();
    graph
        .add_node(Node::new("input-1", NodeKind::Input, "User Query"))
        .unwrap();
    graph
        .add_node(Node::new("model-1", NodeKind::ModelCall, "Draft Answer"))
        .unwrap();
    graph
        .add_node(Node::new("output-1", NodeKind::Output, "Final Answer"))
        .unwrap();
    graph
        .add_edge(Edge::new("e1", "input-1", "model-1").with_label("query"))
        .unwrap();
    graph
        .add_edge(Edge::new("e2", "model-1", "output-1").with_label("answer"))
        .unwrap();
    graph
}
