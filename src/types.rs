//! Core vocabulary types for agentloom workflow graphs.
//!
//! This module defines the closed sets of values that describe what a node
//! *is* (its kind), how it is meant to run (its execution mode), and what the
//! execution preview is currently showing for it (its transient status), plus
//! the canvas position type shared by the generator and interactive editing.
//!
//! # Key Types
//!
//! - [`NodeKind`]: Functional category of a graph node (model call, tool call,
//!   condition, ...), distinct from its display label
//! - [`ExecutionMode`]: Human-in-loop / autonomous / hybrid marker
//! - [`NodeStatus`]: Transient per-node state driven by the simulator
//! - [`Position`]: 2D canvas coordinate with grid snapping for interactive moves
//!
//! # Examples
//!
//! ```rust
//! use agentloom::types::{NodeKind, NodeStatus, Position};
//!
//! let kind = NodeKind::ModelCall;
//! assert_eq!(kind.as_str(), "model-call");
//! assert_eq!("model-call".parse::<NodeKind>().unwrap(), kind);
//!
//! // Statuses start out unset and are only flipped by the simulator.
//! assert_eq!(NodeStatus::default(), NodeStatus::Idle);
//!
//! // Interactive moves snap to the canvas grid.
//! let snapped = Position::new(47.0, 112.0).snapped();
//! assert_eq!((snapped.x, snapped.y), (40.0, 120.0));
//! ```

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Functional category of a node within a workflow graph.
///
/// The set is closed: persistence and the export format use the kebab-case
/// token strings below, and decoding any other string is an error rather than
/// an escape hatch. Renderers map each kind to an icon/color; the simulator
/// treats all kinds uniformly.
///
/// # Examples
///
/// ```rust
/// use agentloom::types::NodeKind;
///
/// assert_eq!(NodeKind::ToolCall.as_str(), "tool-call");
/// assert_eq!("condition".parse::<NodeKind>().unwrap(), NodeKind::Condition);
/// assert!("desk-lamp".parse::<NodeKind>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    /// Entry point receiving the user's query or task.
    Input,

    /// Terminal node returning the final result.
    Output,

    /// A call into an LLM (reasoning, generation, synthesis).
    ModelCall,

    /// A call into an external tool or MCP server.
    ToolCall,

    /// A handoff to another agent (agent-to-agent coordination).
    AgentCall,

    /// Branching decision point.
    Condition,

    /// Bounded repetition over a sub-path.
    Loop,

    /// Prompt/template expansion step.
    Template,

    /// Observability tap; records what flows through it.
    Log,
}

impl NodeKind {
    /// Every kind, in display order. Handy for palettes and exhaustive tests.
    pub const ALL: [NodeKind; 9] = [
        NodeKind::Input,
        NodeKind::Output,
        NodeKind::ModelCall,
        NodeKind::ToolCall,
        NodeKind::AgentCall,
        NodeKind::Condition,
        NodeKind::Loop,
        NodeKind::Template,
        NodeKind::Log,
    ];

    /// The persisted token form of this kind (kebab-case, matches serde).
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Input => "input",
            NodeKind::Output => "output",
            NodeKind::ModelCall => "model-call",
            NodeKind::ToolCall => "tool-call",
            NodeKind::AgentCall => "agent-call",
            NodeKind::Condition => "condition",
            NodeKind::Loop => "loop",
            NodeKind::Template => "template",
            NodeKind::Log => "log",
        }
    }

    /// Returns `true` for the graph boundary kinds (input/output).
    #[must_use]
    pub fn is_boundary(&self) -> bool {
        matches!(self, Self::Input | Self::Output)
    }

    /// Returns `true` for kinds that stand for an outbound call
    /// (model, tool, or agent).
    #[must_use]
    pub fn is_call(&self) -> bool {
        matches!(self, Self::ModelCall | Self::ToolCall | Self::AgentCall)
    }

    /// Returns `true` for control-flow kinds (condition/loop).
    #[must_use]
    pub fn is_control(&self) -> bool {
        matches!(self, Self::Condition | Self::Loop)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "input" => Ok(NodeKind::Input),
            "output" => Ok(NodeKind::Output),
            "model-call" => Ok(NodeKind::ModelCall),
            "tool-call" => Ok(NodeKind::ToolCall),
            "agent-call" => Ok(NodeKind::AgentCall),
            "condition" => Ok(NodeKind::Condition),
            "loop" => Ok(NodeKind::Loop),
            "template" => Ok(NodeKind::Template),
            "log" => Ok(NodeKind::Log),
            other => Err(TypesError::UnknownKind {
                value: other.to_string(),
            }),
        }
    }
}

/// How a node is intended to run once the workflow leaves the canvas.
///
/// Purely informational inside this crate: the execution preview never changes
/// its timing based on the mode. Generators apply one mode uniformly across
/// all nodes they emit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExecutionMode {
    /// A human reviews or drives every step.
    HumanInLoop,

    /// Runs end to end without intervention.
    #[default]
    Autonomous,

    /// Autonomous with human checkpoints at selected steps.
    Hybrid,
}

impl ExecutionMode {
    /// The persisted token form of this mode (kebab-case, matches serde).
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionMode::HumanInLoop => "human-in-loop",
            ExecutionMode::Autonomous => "autonomous",
            ExecutionMode::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transient per-node state shown on the canvas during an execution preview.
///
/// Only the simulator writes these: a run walks each node through
/// `Running` to `Success`, completion keeps the final values, and
/// cancellation resets everything to [`Idle`](Self::Idle). `Pending` and
/// `Error` complete the render vocabulary for externally supplied state.
///
/// Serialized as `"none"`, `"pending"`, `"running"`, `"success"`, `"error"`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    /// No simulation state; the resting default.
    #[default]
    #[serde(rename = "none")]
    Idle,

    /// Queued for a future step.
    Pending,

    /// The node the walk is currently dwelling on.
    Running,

    /// Visited and completed.
    Success,

    /// Failed (never produced by the preview walk itself).
    Error,
}

impl NodeStatus {
    /// Returns `true` while the simulator is dwelling on this node.
    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }

    /// Returns `true` when no simulation state is set.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            NodeStatus::Idle => "none",
            NodeStatus::Pending => "pending",
            NodeStatus::Running => "running",
            NodeStatus::Success => "success",
            NodeStatus::Error => "error",
        };
        f.write_str(token)
    }
}

/// Side length of the canvas snap grid, in logical units.
pub const GRID_UNIT: f64 = 20.0;

/// A 2D canvas coordinate.
///
/// Generator layout produces positions directly from its spacing constants;
/// interactive moves go through [`snapped`](Self::snapped) so dragged nodes
/// land on the [`GRID_UNIT`] grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// This position rounded to the nearest grid intersection.
    ///
    /// ```rust
    /// use agentloom::types::Position;
    ///
    /// assert_eq!(Position::new(49.0, 111.0).snapped(), Position::new(40.0, 120.0));
    /// assert_eq!(Position::new(-9.0, 10.0).snapped(), Position::new(-0.0, 20.0));
    /// ```
    #[must_use]
    pub fn snapped(self) -> Self {
        Self {
            x: (self.x / GRID_UNIT).round() * GRID_UNIT,
            y: (self.y / GRID_UNIT).round() * GRID_UNIT,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(f64, f64)> for Position {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Errors from decoding vocabulary tokens.
#[derive(Debug, Error, Diagnostic)]
pub enum TypesError {
    /// A node-kind token outside the closed set.
    #[error("unknown node kind: {value:?}")]
    #[diagnostic(
        code(agentloom::types::unknown_kind),
        help(
            "valid kinds: input, output, model-call, tool-call, agent-call, condition, loop, template, log"
        )
    )]
    UnknownKind { value: String },
}
