//! Workflow interchange documents for download and re-import.
//!
//! The export format is the flat JSON document users download from the
//! canvas: node kinds become `type` tokens, edge labels become `condition`
//! strings, and a metadata block records provenance. Import runs the same
//! mapping in reverse and re-validates graph integrity, so a tampered
//! document cannot smuggle dangling edges or unknown kinds back in.

use chrono::{DateTime, Utc};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::graph::{Edge, GraphError, Node, NodeConfig, WorkflowGraph};
use crate::types::{NodeKind, Position, TypesError};

/// Interchange format tag written into every export.
pub const EXPORT_FORMAT: &str = "langgraph";

/// Version of the export document layout.
pub const EXPORT_VERSION: &str = "1.0.0";

/// A node as it appears in the export document.
///
/// Display labels and transient simulation state are intentionally absent;
/// the document describes structure, not presentation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub config: NodeConfig,
    pub position: Position,
}

/// An edge as it appears in the export document.
///
/// Edge ids are dropped; `condition` carries the edge label, with empty
/// labels normalized to `"default"`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportEdge {
    pub source: String,
    pub target: String,
    pub condition: String,
}

/// Provenance block of an export document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub name: String,
    pub description: String,
    pub exported_at: DateTime<Utc>,
    pub format: String,
    pub version: String,
}

/// Import failures; the export side cannot fail.
#[derive(Debug, Error, Diagnostic)]
pub enum ExportError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Types(#[from] TypesError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Graph(#[from] GraphError),
}

/// The downloadable workflow document.
///
/// # Examples
///
/// ```rust
/// use agentloom::export::WorkflowExport;
/// use agentloom::graph::{Edge, Node, WorkflowGraph};
/// use agentloom::types::NodeKind;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut graph = WorkflowGraph::new();
/// graph.add_node(Node::new("input-1", NodeKind::Input, "User Query"))?;
/// graph.add_node(Node::new("output-1", NodeKind::Output, "Answer"))?;
/// graph.add_edge(Edge::new("e1", "input-1", "output-1"))?;
///
/// let export = WorkflowExport::from_graph("My Flow", "demo", &graph);
/// assert_eq!(export.suggested_filename(), "my-flow-langgraph.json");
/// assert_eq!(export.edges[0].condition, "default");
///
/// let restored = export.into_graph()?;
/// assert_eq!(restored.node_count(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkflowExport {
    pub name: String,
    pub description: String,
    pub nodes: Vec<ExportNode>,
    pub edges: Vec<ExportEdge>,
    pub metadata: ExportMetadata,
}

impl WorkflowExport {
    /// Flatten `graph` into a downloadable document stamped with now.
    pub fn from_graph(
        name: impl Into<String>,
        description: impl Into<String>,
        graph: &WorkflowGraph,
    ) -> Self {
        let name = name.into();
        let description = description.into();
        let nodes = graph
            .nodes()
            .iter()
            .map(|node| ExportNode {
                id: node.id.as_str().to_string(),
                kind: node.kind.as_str().to_string(),
                config: node.config.clone(),
                position: node.position,
            })
            .collect();
        let edges = graph
            .edges()
            .iter()
            .map(|edge| ExportEdge {
                source: edge.source.as_str().to_string(),
                target: edge.target.as_str().to_string(),
                condition: if edge.label.is_empty() {
                    "default".to_string()
                } else {
                    edge.label.clone()
                },
            })
            .collect();
        Self {
            metadata: ExportMetadata {
                name: name.clone(),
                description: description.clone(),
                exported_at: Utc::now(),
                format: EXPORT_FORMAT.to_string(),
                version: EXPORT_VERSION.to_string(),
            },
            name,
            description,
            nodes,
            edges,
        }
    }

    /// Rebuild a validated graph from this document.
    ///
    /// Edge ids are regenerated as `e1..eN` in document order. Imported
    /// nodes use their id as the display label, since the document does not
    /// carry labels. `condition` strings come back verbatim as edge labels.
    ///
    /// # Errors
    ///
    /// [`TypesError::UnknownKind`] for a `type` outside the vocabulary;
    /// [`GraphError`] when ids collide or an edge endpoint does not resolve.
    pub fn into_graph(self) -> Result<WorkflowGraph, ExportError> {
        let mut nodes = Vec::with_capacity(self.nodes.len());
        for exported in self.nodes {
            let kind: NodeKind = exported.kind.parse()?;
            let label = exported.id.clone();
            nodes.push(
                Node::new(exported.id, kind, label)
                    .with_position(exported.position)
                    .with_config(exported.config),
            );
        }
        let edges = self
            .edges
            .into_iter()
            .enumerate()
            .map(|(index, exported)| {
                Edge::new(format!("e{}", index + 1), exported.source, exported.target)
                    .with_label(exported.condition)
            })
            .collect();
        Ok(WorkflowGraph::from_parts(nodes, edges)?)
    }

    /// Download filename derived from the workflow name.
    #[must_use]
    pub fn suggested_filename(&self) -> String {
        let slug = self
            .name
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-");
        format!("{slug}-langgraph.json")
    }

    /// Pretty-printed JSON, ready to write to the download file.
    ///
    /// # Errors
    ///
    /// Propagates the underlying serializer error.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
