//! Pattern expansion: template in, laid-out workflow graph out.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::graph::{Edge, Node, NodeConfig, WorkflowGraph};
use crate::patterns::catalog;
use crate::patterns::registry::PatternRegistry;
use crate::types::ExecutionMode;

/// Optional knobs for one generation call.
///
/// `execution_mode` is applied uniformly to every generated node; `domain`
/// and `task` are presentation hints that only influence derived workflow
/// names, never node content.
#[derive(Clone, Debug, Default)]
pub struct GenerateOptions {
    pub execution_mode: Option<ExecutionMode>,
    pub domain: Option<String>,
    pub task: Option<String>,
}

impl GenerateOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_execution_mode(mut self, mode: ExecutionMode) -> Self {
        self.execution_mode = Some(mode);
        self
    }

    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    #[must_use]
    pub fn with_task(mut self, task: impl Into<String>) -> Self {
        self.task = Some(task.into());
        self
    }
}

/// A generated graph plus the derived display fields callers save or
/// publish alongside it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneratedWorkflow {
    pub name: String,
    pub description: String,
    pub pattern: String,
    pub graph: WorkflowGraph,
}

/// Structured answers from the authoring wizard, used to recommend a
/// pattern before generating.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternBrief {
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub task: String,
    #[serde(default)]
    pub data_tools: String,
    #[serde(default)]
    pub business_goal: String,
    #[serde(default)]
    pub execution_mode: ExecutionMode,
}

impl PatternBrief {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    #[must_use]
    pub fn with_task(mut self, task: impl Into<String>) -> Self {
        self.task = task.into();
        self
    }

    #[must_use]
    pub fn with_data_tools(mut self, data_tools: impl Into<String>) -> Self {
        self.data_tools = data_tools.into();
        self
    }

    #[must_use]
    pub fn with_business_goal(mut self, business_goal: impl Into<String>) -> Self {
        self.business_goal = business_goal.into();
        self
    }

    #[must_use]
    pub fn with_execution_mode(mut self, mode: ExecutionMode) -> Self {
        self.execution_mode = mode;
        self
    }
}

/// Recommend a catalog pattern for an authoring brief.
///
/// Keyword matching is case-insensitive and checked in precedence order:
/// code-shaped tasks win over collaboration, collaboration over retrieval,
/// and so on down to the reasoning-acting default.
#[must_use]
pub fn recommend_pattern(brief: &PatternBrief) -> &'static str {
    let task = brief.task.to_lowercase();
    let tools = brief.data_tools.to_lowercase();
    let goal = brief.business_goal.to_lowercase();

    if task.contains("code") || task.contains("programming") {
        catalog::CODEACT
    } else if task.contains("multi") || goal.contains("collaborate") {
        catalog::MULTI_AGENT
    } else if tools.contains("database") || task.contains("research") {
        catalog::RAG
    } else if tools.contains("api") || tools.contains("tool") {
        catalog::TOOL_USE
    } else if goal.contains("improve") || goal.contains("learn") {
        catalog::SELF_REFLECTION
    } else {
        catalog::REACT
    }
}

/// Expands pattern templates into concrete workflow graphs.
///
/// The generator borrows its registry, so the template set is fixed for the
/// generator's lifetime. Generation is deterministic apart from the id
/// suffix: a per-generator counter (starting at 1) stamped into every node
/// and edge id, which keeps repeated generations onto the same canvas
/// collision-free.
///
/// # Examples
///
/// ```rust
/// use agentloom::patterns::{catalog, GenerateOptions, Generator, PatternRegistry};
///
/// let registry = PatternRegistry::default();
/// let generator = Generator::new(&registry);
///
/// let graph = generator.generate(catalog::TOOL_USE, &GenerateOptions::new());
/// assert_eq!(graph.node_count(), 6);
/// assert_eq!(graph.nodes()[0].id.as_str(), "input-1");
///
/// // Unknown ids degrade to an empty canvas.
/// let empty = generator.generate("no-such-pattern", &GenerateOptions::new());
/// assert!(empty.is_empty());
/// ```
#[derive(Debug)]
pub struct Generator<'a> {
    registry: &'a PatternRegistry,
    next_suffix: AtomicU64,
}

impl<'a> Generator<'a> {
    #[must_use]
    pub fn new(registry: &'a PatternRegistry) -> Self {
        Self {
            registry,
            next_suffix: AtomicU64::new(1),
        }
    }

    /// The registry this generator expands from.
    #[must_use]
    pub fn registry(&self) -> &PatternRegistry {
        self.registry
    }

    /// Expand `pattern_id` into a laid-out graph.
    ///
    /// Unknown ids produce an empty graph rather than an error, so a blank
    /// canvas is always safe to render. Cannot fail otherwise: every
    /// registered template is pre-validated.
    #[instrument(skip(self, options))]
    pub fn generate(&self, pattern_id: &str, options: &GenerateOptions) -> WorkflowGraph {
        let Some(template) = self.registry.get(pattern_id) else {
            warn!("unknown pattern id, generating empty graph");
            return WorkflowGraph::new();
        };
        let suffix = self.next_suffix.fetch_add(1, Ordering::Relaxed);
        let mode = options.execution_mode.unwrap_or_default();

        let nodes: Vec<Node> = template
            .nodes()
            .iter()
            .map(|spec| {
                let config = match &spec.model {
                    Some(model) => NodeConfig::model_named(model),
                    None => NodeConfig::default_for(spec.kind),
                };
                Node::new(
                    format!("{}-{suffix}", spec.local_id),
                    spec.kind,
                    &spec.label,
                )
                .with_description(&spec.description)
                .with_position(spec.position())
                .with_config(config)
                .with_execution_mode(mode)
            })
            .collect();

        let edges: Vec<Edge> = template
            .edges()
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                Edge::new(
                    format!("e{}-{suffix}", i + 1),
                    format!("{}-{suffix}", spec.from),
                    format!("{}-{suffix}", spec.to),
                )
                .with_label(&spec.label)
            })
            .collect();

        debug!(
            suffix,
            nodes = nodes.len(),
            edges = edges.len(),
            "expanded pattern template"
        );
        WorkflowGraph::from_validated_parts(nodes, edges)
    }

    /// Expand a pattern and derive the display fields saved with it.
    ///
    /// The name is "{domain} {task} Agent" when both hints are present,
    /// falling back to "{pattern name} Workflow"; the description falls
    /// back to the pattern's own.
    pub fn generate_workflow(
        &self,
        pattern_id: &str,
        options: &GenerateOptions,
    ) -> GeneratedWorkflow {
        let graph = self.generate(pattern_id, options);
        let (pattern_name, pattern_description) = match self.registry.get(pattern_id) {
            Some(template) => (template.name.clone(), template.description.clone()),
            None => (pattern_id.to_string(), String::new()),
        };
        let name = match (options.domain.as_deref(), options.task.as_deref()) {
            (Some(domain), Some(task)) if !domain.is_empty() && !task.is_empty() => {
                format!("{domain} {task} Agent")
            }
            _ => format!("{pattern_name} Workflow"),
        };
        GeneratedWorkflow {
            name,
            description: pattern_description,
            pattern: pattern_id.to_string(),
            graph,
        }
    }

    /// Recommend a pattern for `brief` and generate it in one step, naming
    /// the workflow from the brief's answers.
    pub fn generate_from_brief(&self, brief: &PatternBrief) -> GeneratedWorkflow {
        let pattern_id = recommend_pattern(brief);
        debug!(pattern = pattern_id, "recommended pattern for brief");
        let options = GenerateOptions::new()
            .with_execution_mode(brief.execution_mode)
            .with_domain(brief.domain.clone())
            .with_task(brief.task.clone());
        let mut workflow = self.generate_workflow(pattern_id, &options);
        if !brief.business_goal.is_empty() {
            workflow.description = brief.business_goal.clone();
        }
        workflow
    }
}
