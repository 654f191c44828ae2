//! Pattern templates: the canonical node/edge blueprints behind the catalog.
//!
//! A template describes one agentic pattern abstractly. Node specs use local
//! ids ("input", "thought") and logical layout slots (column, lane); the
//! generator turns them into concrete [`Node`](crate::graph::Node)s with
//! unique ids and canvas coordinates. Edge specs reference local ids and
//! carry the semantic handoff label.
//!
//! Templates are validated when inserted into a
//! [`PatternRegistry`](crate::patterns::PatternRegistry), so every template
//! the generator can see is structurally sound: unique locals, resolvable
//! endpoints, a single entry column, and either no back-edge (pipeline
//! patterns) or exactly one returning to a non-initial node (feedback
//! patterns).

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{NodeKind, Position};

/// Horizontal slot width of generated layouts.
pub const COLUMN_SPACING: f64 = 250.0;
/// Left margin of the first column.
pub const LEFT_MARGIN: f64 = 50.0;
/// Vertical baseline shared by single-lane patterns.
pub const BASELINE_Y: f64 = 100.0;
/// Vertical offset per lane for parallel branches.
pub const LANE_SPACING: f64 = 100.0;

/// Canvas position for a logical layout slot.
///
/// `x = 50 + 250 * column`, `y = 100 + 100 * lane`. Lane 0 is the baseline;
/// negative lanes sit above it.
#[must_use]
pub fn position_for(column: u32, lane: i32) -> Position {
    Position::new(
        LEFT_MARGIN + COLUMN_SPACING * f64::from(column),
        BASELINE_Y + LANE_SPACING * f64::from(lane),
    )
}

/// Blueprint for one node of a pattern.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    /// Template-local id, unique within the template ("input", "observe").
    pub local_id: String,
    pub kind: NodeKind,
    pub label: String,
    pub description: String,
    /// Horizontal layout slot, left to right.
    pub column: u32,
    /// Vertical branch offset; 0 for the baseline.
    #[serde(default)]
    pub lane: i32,
    /// Model name hint applied to the generated node's config.
    #[serde(default)]
    pub model: Option<String>,
}

impl NodeSpec {
    pub fn new(
        local_id: impl Into<String>,
        kind: NodeKind,
        label: impl Into<String>,
        description: impl Into<String>,
        column: u32,
    ) -> Self {
        Self {
            local_id: local_id.into(),
            kind,
            label: label.into(),
            description: description.into(),
            column,
            lane: 0,
            model: None,
        }
    }

    /// Offset this node into a parallel branch lane.
    #[must_use]
    pub fn in_lane(mut self, lane: i32) -> Self {
        self.lane = lane;
        self
    }

    /// Attach a model name hint (model-call nodes).
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// The canvas position this spec lays out to.
    #[must_use]
    pub fn position(&self) -> Position {
        position_for(self.column, self.lane)
    }
}

/// Blueprint for one edge of a pattern, endpoints by local id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub from: String,
    pub to: String,
    /// Semantic handoff name ("query", "results", "iterate").
    pub label: String,
}

impl EdgeSpec {
    pub fn new(from: impl Into<String>, to: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: label.into(),
        }
    }
}

/// A named agentic pattern: display metadata plus the node/edge blueprint
/// the generator materializes.
///
/// Build fluently, then hand to a registry which runs [`validate`]:
///
/// ```rust
/// use agentloom::patterns::{EdgeSpec, NodeSpec, PatternTemplate};
/// use agentloom::types::NodeKind;
///
/// let template = PatternTemplate::new(
///     "echo",
///     "Echo",
///     "Pass input straight through",
///     "Smoke tests",
/// )
/// .with_node(NodeSpec::new("input", NodeKind::Input, "Input", "Receive", 0))
/// .with_node(NodeSpec::new("output", NodeKind::Output, "Output", "Return", 1))
/// .with_edge(EdgeSpec::new("input", "output", "echo"));
///
/// assert!(template.validate().is_ok());
/// assert!(!template.is_cyclic());
/// ```
///
/// [`validate`]: PatternTemplate::validate
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatternTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub use_case: String,
    nodes: Vec<NodeSpec>,
    edges: Vec<EdgeSpec>,
}

impl PatternTemplate {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        use_case: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            use_case: use_case.into(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Append a node spec.
    #[must_use]
    pub fn with_node(mut self, node: NodeSpec) -> Self {
        self.nodes.push(node);
        self
    }

    /// Append an edge spec. Template order is generation order.
    #[must_use]
    pub fn with_edge(mut self, edge: EdgeSpec) -> Self {
        self.edges.push(edge);
        self
    }

    #[must_use]
    pub fn nodes(&self) -> &[NodeSpec] {
        &self.nodes
    }

    #[must_use]
    pub fn edges(&self) -> &[EdgeSpec] {
        &self.edges
    }

    fn node_position(&self, local: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.local_id == local)
    }

    /// Edge specs whose target sits at or before their source in node spec
    /// order. Feedback patterns have exactly one of these.
    #[must_use]
    pub fn back_edges(&self) -> Vec<&EdgeSpec> {
        self.edges
            .iter()
            .filter(|e| {
                match (self.node_position(&e.from), self.node_position(&e.to)) {
                    (Some(from), Some(to)) => to <= from,
                    _ => false,
                }
            })
            .collect()
    }

    /// Returns `true` when the template carries a feedback edge.
    #[must_use]
    pub fn is_cyclic(&self) -> bool {
        !self.back_edges().is_empty()
    }

    /// Check the structural invariants every registered template satisfies.
    ///
    /// - at least one node, unique local ids, edge endpoints resolve;
    /// - exactly one leftmost node (unique minimum column, the entry);
    /// - either no back-edge and a unique rightmost node (pipeline shape),
    ///   or exactly one back-edge returning to a non-initial node (feedback
    ///   shape).
    pub fn validate(&self) -> Result<(), TemplateError> {
        if self.nodes.is_empty() {
            return Err(TemplateError::Empty {
                template: self.id.clone(),
            });
        }
        for (i, node) in self.nodes.iter().enumerate() {
            if self.nodes[..i].iter().any(|n| n.local_id == node.local_id) {
                return Err(TemplateError::DuplicateLocal {
                    template: self.id.clone(),
                    local: node.local_id.clone(),
                });
            }
        }
        for edge in &self.edges {
            for endpoint in [&edge.from, &edge.to] {
                if self.node_position(endpoint).is_none() {
                    return Err(TemplateError::UnresolvedEndpoint {
                        template: self.id.clone(),
                        local: endpoint.clone(),
                    });
                }
            }
        }

        let min_column = self.nodes.iter().map(|n| n.column).min().unwrap_or(0);
        let entries: Vec<&NodeSpec> = self
            .nodes
            .iter()
            .filter(|n| n.column == min_column)
            .collect();
        if entries.len() != 1 {
            return Err(TemplateError::AmbiguousEntry {
                template: self.id.clone(),
                found: entries.len(),
            });
        }
        let entry_local = entries[0].local_id.clone();

        let back = self.back_edges();
        match back.len() {
            0 => {
                let max_column = self.nodes.iter().map(|n| n.column).max().unwrap_or(0);
                let exits = self.nodes.iter().filter(|n| n.column == max_column).count();
                if exits != 1 {
                    return Err(TemplateError::AmbiguousExit {
                        template: self.id.clone(),
                        found: exits,
                    });
                }
            }
            1 => {
                if back[0].to == entry_local {
                    return Err(TemplateError::BackEdgeToEntry {
                        template: self.id.clone(),
                    });
                }
            }
            found => {
                return Err(TemplateError::TooManyBackEdges {
                    template: self.id.clone(),
                    found,
                });
            }
        }
        Ok(())
    }
}

/// Structural defects a template can carry. Registry insertion rejects all
/// of them, so generation never sees a malformed template.
#[derive(Debug, Error, Diagnostic)]
pub enum TemplateError {
    #[error("template '{template}' has no nodes")]
    #[diagnostic(code(agentloom::patterns::empty_template))]
    Empty { template: String },

    #[error("template '{template}' declares local id '{local}' more than once")]
    #[diagnostic(
        code(agentloom::patterns::duplicate_local),
        help("local ids are the template's node names and must be unique")
    )]
    DuplicateLocal { template: String, local: String },

    #[error("template '{template}' has an edge referencing unknown local '{local}'")]
    #[diagnostic(
        code(agentloom::patterns::unresolved_endpoint),
        help("declare the node spec before wiring edges to it")
    )]
    UnresolvedEndpoint { template: String, local: String },

    #[error("template '{template}' has {found} entry nodes in its leftmost column, expected 1")]
    #[diagnostic(
        code(agentloom::patterns::ambiguous_entry),
        help("exactly one node must occupy the minimum column")
    )]
    AmbiguousEntry { template: String, found: usize },

    #[error("template '{template}' has {found} exit nodes in its rightmost column, expected 1")]
    #[diagnostic(
        code(agentloom::patterns::ambiguous_exit),
        help("pipeline templates converge on a single output node")
    )]
    AmbiguousExit { template: String, found: usize },

    #[error("template '{template}' has {found} back-edges, at most 1 is allowed")]
    #[diagnostic(
        code(agentloom::patterns::too_many_back_edges),
        help("feedback templates carry exactly one loop edge")
    )]
    TooManyBackEdges { template: String, found: usize },

    #[error("template '{template}' loops back to its entry node")]
    #[diagnostic(
        code(agentloom::patterns::back_edge_to_entry),
        help("feedback returns to an intermediate node, not the input")
    )]
    BackEdgeToEntry { template: String },

    #[error("a template with id '{template}' is already registered")]
    #[diagnostic(
        code(agentloom::patterns::duplicate_template),
        help("registry ids are unique; pick a different id or build a fresh registry")
    )]
    DuplicateTemplate { template: String },
}
