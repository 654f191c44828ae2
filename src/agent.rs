//! Marketplace-facing workflow records.
//!
//! A [`WorkflowAgent`] wraps one graph for publication: it owns the version
//! history, the 30-step approval pipeline, and an audit trail of every
//! lifecycle action. The graph is authored first (typically by the
//! [`patterns`](crate::patterns) generator), then submitted for approval,
//! and can be published once every review step approves.
//!
//! # Lifecycle
//!
//! `Draft → PendingApproval → {Approved, Rejected}`, with a separate
//! explicit publish step from `Approved` to `Published`. The approval
//! pipeline is created whole at submission and drives the status from then
//! on.
//!
//! # Examples
//!
//! ```rust
//! use agentloom::agent::{WorkflowAgent, WorkflowStatus};
//! use agentloom::approval::Decision;
//! use agentloom::graph::WorkflowGraph;
//!
//! # fn main() -> Result<(), agentloom::agent::AgentError> {
//! let mut agent = WorkflowAgent::new(
//!     "Support Triage",
//!     "Routes inbound tickets to the right queue",
//!     WorkflowGraph::new(),
//!     "dana",
//! );
//! assert_eq!(agent.status(), WorkflowStatus::Draft);
//!
//! agent.submit_for_approval("dana")?;
//! assert_eq!(agent.status(), WorkflowStatus::PendingApproval);
//!
//! agent.record_decision("step-1", Decision::Approved, "kim", None)?;
//! assert_eq!(agent.status(), WorkflowStatus::PendingApproval);
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::approval::{ApprovalError, ApprovalPipeline, ApprovalStatus, Decision};
use crate::graph::WorkflowGraph;
use crate::patterns::GeneratedWorkflow;

/// Attribution used when no acting user is supplied.
pub const DEFAULT_USER: &str = "Current User";

/// Version label assigned to a freshly created record.
pub const INITIAL_VERSION: &str = "1.0.0";

/// Publication lifecycle of a [`WorkflowAgent`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkflowStatus {
    #[default]
    Draft,
    #[serde(rename = "Pending Approval")]
    PendingApproval,
    Approved,
    Rejected,
    Published,
}

impl WorkflowStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowStatus::Draft => "Draft",
            WorkflowStatus::PendingApproval => "Pending Approval",
            WorkflowStatus::Approved => "Approved",
            WorkflowStatus::Rejected => "Rejected",
            WorkflowStatus::Published => "Published",
        }
    }
}

impl std::fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata snapshot frozen when a record is submitted for approval.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowVersion {
    pub version: String,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub changes: String,
    pub is_active: bool,
}

/// One recorded lifecycle action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: String,
    pub action: String,
    pub user: String,
    pub timestamp: DateTime<Utc>,
    pub details: String,
}

/// Lifecycle misuse on a [`WorkflowAgent`].
#[derive(Debug, Error, Diagnostic)]
pub enum AgentError {
    #[error("only draft workflows can be submitted for approval (status: {status})")]
    #[diagnostic(
        code(agentloom::agent::not_draft),
        help("A workflow is submitted once; edit a draft copy to change it.")
    )]
    NotDraft { status: WorkflowStatus },

    #[error("workflow has not been submitted for approval")]
    #[diagnostic(
        code(agentloom::agent::not_submitted),
        help("Call submit_for_approval before recording review decisions.")
    )]
    NotSubmitted,

    #[error("only approved workflows can be published (status: {status})")]
    #[diagnostic(
        code(agentloom::agent::not_approved),
        help("All 30 approval steps must approve before publication.")
    )]
    NotApproved { status: WorkflowStatus },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Approval(#[from] ApprovalError),
}

/// A workflow record as the marketplace sees it.
///
/// Owns one [`WorkflowGraph`] plus everything publication needs: version
/// history, the approval pipeline, and the audit trail. Serializes with
/// camelCase field names so records round-trip with external stores.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowAgent {
    id: Uuid,
    name: String,
    description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pattern: Option<String>,
    status: WorkflowStatus,
    current_version: String,
    versions: Vec<WorkflowVersion>,
    workflow: WorkflowGraph,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    approval: Option<ApprovalPipeline>,
    audit_trail: Vec<AuditEntry>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl WorkflowAgent {
    /// Create a draft record around `workflow`, attributed to `created_by`.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        workflow: WorkflowGraph,
        created_by: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        let mut agent = Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            pattern: None,
            status: WorkflowStatus::Draft,
            current_version: INITIAL_VERSION.to_string(),
            versions: Vec::new(),
            workflow,
            approval: None,
            audit_trail: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        agent.record_audit("Created", created_by.into(), "Workflow record created".to_string());
        agent
    }

    /// Tag the record with the catalog pattern it was generated from.
    #[must_use]
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    // =========================================================================
    // Read access
    // =========================================================================

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    pub fn status(&self) -> WorkflowStatus {
        self.status
    }

    pub fn current_version(&self) -> &str {
        &self.current_version
    }

    pub fn versions(&self) -> &[WorkflowVersion] {
        &self.versions
    }

    pub fn workflow(&self) -> &WorkflowGraph {
        &self.workflow
    }

    /// Mutable access to the owned graph for authoring-time edits.
    ///
    /// The graph's own mutation API keeps referential integrity, so edits
    /// here cannot leave dangling edges behind.
    pub fn workflow_mut(&mut self) -> &mut WorkflowGraph {
        &mut self.workflow
    }

    pub fn approval(&self) -> Option<&ApprovalPipeline> {
        self.approval.as_ref()
    }

    pub fn audit_trail(&self) -> &[AuditEntry] {
        &self.audit_trail
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Freeze the current version and open the 30-step review.
    ///
    /// The version snapshot and the full pipeline are created together, so
    /// a submitted record always carries a complete, all-Pending pipeline.
    ///
    /// # Errors
    ///
    /// [`AgentError::NotDraft`] unless the record is still a draft.
    pub fn submit_for_approval(&mut self, submitted_by: impl Into<String>) -> Result<(), AgentError> {
        if self.status != WorkflowStatus::Draft {
            return Err(AgentError::NotDraft { status: self.status });
        }
        let submitted_by = submitted_by.into();
        let changes = if self.versions.is_empty() {
            "Initial version"
        } else {
            "Resubmission"
        };
        for version in &mut self.versions {
            version.is_active = false;
        }
        self.versions.push(WorkflowVersion {
            version: self.current_version.clone(),
            created_at: Utc::now(),
            created_by: submitted_by.clone(),
            changes: changes.to_string(),
            is_active: true,
        });
        self.approval = Some(ApprovalPipeline::new());
        self.status = WorkflowStatus::PendingApproval;
        self.record_audit(
            "Submitted for approval",
            submitted_by,
            format!("Version {} entered the 30-step review", self.current_version),
        );
        Ok(())
    }

    /// Record one reviewer decision and reflect the new aggregate status.
    ///
    /// Routes through the pipeline, so per-step rules apply unchanged: a
    /// decided step stays decided and an unknown id is rejected. Returns
    /// the recomputed aggregate.
    ///
    /// # Errors
    ///
    /// [`AgentError::NotSubmitted`] if no pipeline exists yet, otherwise
    /// any [`ApprovalError`] from the pipeline itself.
    pub fn record_decision(
        &mut self,
        step_id: &str,
        decision: Decision,
        reviewer: impl Into<String>,
        notes: Option<String>,
    ) -> Result<ApprovalStatus, AgentError> {
        let Some(pipeline) = self.approval.as_mut() else {
            return Err(AgentError::NotSubmitted);
        };
        let reviewer = reviewer.into();
        let step_number = pipeline
            .record_decision(step_id, decision, reviewer.clone(), notes)?
            .step_number;
        let aggregate = pipeline.aggregate_status();
        self.status = match aggregate {
            ApprovalStatus::Pending => WorkflowStatus::PendingApproval,
            ApprovalStatus::Approved => WorkflowStatus::Approved,
            ApprovalStatus::Rejected => WorkflowStatus::Rejected,
        };
        let action = match decision {
            Decision::Approved => "Step approved",
            Decision::Rejected => "Step rejected",
        };
        self.record_audit(action, reviewer, format!("Step {step_number} of 30 ({step_id})"));
        Ok(aggregate)
    }

    /// Release an approved workflow to the marketplace.
    ///
    /// # Errors
    ///
    /// [`AgentError::NotApproved`] unless every review step has approved.
    pub fn publish(&mut self, published_by: impl Into<String>) -> Result<(), AgentError> {
        if self.status != WorkflowStatus::Approved {
            return Err(AgentError::NotApproved { status: self.status });
        }
        self.status = WorkflowStatus::Published;
        self.record_audit(
            "Published",
            published_by.into(),
            format!("Version {} released to the marketplace", self.current_version),
        );
        Ok(())
    }

    fn record_audit(&mut self, action: &str, user: String, details: String) {
        let entry = AuditEntry {
            id: format!("audit-{}", Uuid::new_v4()),
            action: action.to_string(),
            user,
            timestamp: Utc::now(),
            details,
        };
        debug!(action, user = %entry.user, "audit entry recorded");
        self.updated_at = entry.timestamp;
        self.audit_trail.push(entry);
    }
}

impl From<GeneratedWorkflow> for WorkflowAgent {
    /// Wrap a generator result as a draft record attributed to
    /// [`DEFAULT_USER`].
    fn from(generated: GeneratedWorkflow) -> Self {
        WorkflowAgent::new(generated.name, generated.description, generated.graph, DEFAULT_USER)
            .with_pattern(generated.pattern)
    }
}
