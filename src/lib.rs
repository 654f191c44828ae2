//! # Agentloom: Workflow Canvas Model & Execution Preview
//!
//! Agentloom is the data model behind an agentic-workflow marketplace canvas:
//! pattern-templated graph generation, interactive graph editing, a time-boxed
//! execution preview, and a 30-step publication review.
//!
//! ## Core Concepts
//!
//! - **Graphs**: Nodes and labeled edges with canvas positions and transient preview state
//! - **Patterns**: A validated catalog of agentic topologies (ReAct, CodeAct, RAG, ...)
//! - **Generation**: Deterministic expansion of a pattern into a ready-to-render graph
//! - **Simulation**: A cancellable timed walk that animates statuses without doing work
//! - **Publication**: Versioned workflow records gated by a 30-step approval pipeline
//!
//! ## Quick Start
//!
//! ### Generating a workflow from a pattern
//!
//! ```
//! use agentloom::patterns::{GenerateOptions, Generator, PatternRegistry};
//!
//! let registry = PatternRegistry::default();
//! let generator = Generator::new(&registry);
//!
//! let graph = generator.generate("react", &GenerateOptions::default());
//! assert_eq!(graph.node_count(), 7);
//!
//! // Every generated edge resolves against the generated node list.
//! assert!(graph.edges().iter().all(|edge| {
//!     graph.contains_node(&edge.source) && graph.contains_node(&edge.target)
//! }));
//! ```
//!
//! ### Editing a graph by hand
//!
//! ```
//! use agentloom::graph::{Edge, GraphError, Node, NodeId, WorkflowGraph};
//! use agentloom::types::{NodeKind, Position};
//!
//! # fn main() -> Result<(), GraphError> {
//! let mut graph = WorkflowGraph::new();
//! graph.add_node(Node::new("input-1", NodeKind::Input, "User Query"))?;
//! graph.add_node(Node::new("model-1", NodeKind::ModelCall, "Draft Answer"))?;
//! graph.add_edge(Edge::new("e1", "input-1", "model-1").with_label("query"))?;
//!
//! // Dragged nodes snap to the canvas grid.
//! let landed = graph.move_node(&NodeId::new("model-1"), Position::new(305.0, 98.0))?;
//! assert_eq!(landed, Position::new(300.0, 100.0));
//! # Ok(())
//! # }
//! ```
//!
//! ### Reviewing and publishing
//!
//! ```
//! use agentloom::agent::{AgentError, WorkflowAgent, WorkflowStatus};
//! use agentloom::approval::Decision;
//! use agentloom::graph::WorkflowGraph;
//!
//! # fn main() -> Result<(), AgentError> {
//! let mut agent = WorkflowAgent::new(
//!     "Research Assistant",
//!     "Finds and summarizes sources",
//!     WorkflowGraph::new(),
//!     "dana",
//! );
//!
//! agent.submit_for_approval("dana")?;
//! for step in 1..=30 {
//!     agent.record_decision(&format!("step-{step}"), Decision::Approved, "kim", None)?;
//! }
//! assert_eq!(agent.status(), WorkflowStatus::Approved);
//!
//! agent.publish("dana")?;
//! assert_eq!(agent.status(), WorkflowStatus::Published);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Guide
//!
//! - [`types`] - Node kinds, execution modes, statuses, and canvas positions
//! - [`graph`] - Workflow graph model with integrity-checked mutation
//! - [`patterns`] - Pattern catalog, registry, and the workflow generator
//! - [`simulator`] - Timed execution preview over a shared graph
//! - [`events`] - Progress events emitted while a preview runs
//! - [`approval`] - The 30-step, three-stage publication review pipeline
//! - [`agent`] - Marketplace workflow records, versions, and audit trail
//! - [`export`] - Downloadable workflow documents and re-import
//! - [`telemetry`] - Tracing subscriber setup for binaries and tests

pub mod agent;
pub mod approval;
pub mod events;
pub mod export;
pub mod graph;
pub mod patterns;
pub mod simulator;
pub mod telemetry;
pub mod types;
