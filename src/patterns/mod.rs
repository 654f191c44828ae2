//! Agentic pattern library and graph generation.
//!
//! Patterns are the starting points of the workshop: named blueprints
//! (reasoning-acting, retrieval-augmented generation, multi-agent
//! coordination, code generation, tool use, self-reflection) that expand
//! into ready-to-edit workflow graphs.
//!
//! # Core Concepts
//!
//! - **Templates**: abstract node/edge blueprints with local ids and logical
//!   layout slots ([`PatternTemplate`]).
//! - **Registry**: a validated, injectable catalog of templates
//!   ([`PatternRegistry`]; `Default` is the built-in six).
//! - **Generator**: expands a pattern id into a concrete
//!   [`WorkflowGraph`](crate::graph::WorkflowGraph) with unique ids and
//!   canvas coordinates ([`Generator`]).
//! - **Recommendation**: maps an authoring brief to a catalog id by keyword
//!   precedence ([`recommend_pattern`]).
//!
//! # Quick Start
//!
//! ```rust
//! use agentloom::patterns::{catalog, GenerateOptions, Generator, PatternRegistry};
//! use agentloom::types::ExecutionMode;
//!
//! let registry = PatternRegistry::default();
//! let generator = Generator::new(&registry);
//!
//! let options = GenerateOptions::new().with_execution_mode(ExecutionMode::Hybrid);
//! let graph = generator.generate(catalog::REACT, &options);
//!
//! assert_eq!(graph.node_count(), 7);
//! // The reasoning-acting pattern loops back from its decision node.
//! assert_eq!(graph.back_edges().len(), 1);
//! ```

pub mod catalog;
mod generator;
mod registry;
mod template;

pub use generator::{
    GenerateOptions, GeneratedWorkflow, Generator, PatternBrief, recommend_pattern,
};
pub use registry::PatternRegistry;
pub use template::{
    BASELINE_Y, COLUMN_SPACING, EdgeSpec, LANE_SPACING, LEFT_MARGIN, NodeSpec, PatternTemplate,
    TemplateError, position_for,
};

#[cfg(test)]
mod tests;
