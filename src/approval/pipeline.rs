//! The 30-step approval pipeline and its aggregate derivation.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::approval::step::{ApprovalCategory, ApprovalStatus, ApprovalStep, Decision};

/// Fixed pipeline cardinality: ten steps per tier, three tiers.
pub const STEP_COUNT: u8 = 30;

/// The ordered, fixed-cardinality approval pipeline gating publication.
///
/// Created atomically with all 30 steps pending; never resized. Steps are
/// decided one at a time, each decision terminal. The aggregate is derived
/// on demand and never stored: one rejection fails the workflow outright,
/// and approval requires every step.
///
/// Serializes as the bare step array (the stored `approvalSteps` record);
/// deserialization re-validates the shape and rejects anything that is not
/// exactly steps 1..=30 with tier-matched categories.
///
/// # Examples
///
/// ```rust
/// use agentloom::approval::{ApprovalPipeline, ApprovalStatus, Decision};
///
/// let mut pipeline = ApprovalPipeline::new();
/// assert_eq!(pipeline.aggregate_status(), ApprovalStatus::Pending);
///
/// pipeline.record_decision("step-1", Decision::Approved, "dana", None)?;
/// assert_eq!(pipeline.decided_count(), 1);
///
/// // Deciding a decided step fails and changes nothing.
/// let err = pipeline.record_decision("step-1", Decision::Rejected, "lee", None);
/// assert!(err.is_err());
/// assert_eq!(pipeline.aggregate_status(), ApprovalStatus::Pending);
/// # Ok::<(), agentloom::approval::ApprovalError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ApprovalStep>", into = "Vec<ApprovalStep>")]
pub struct ApprovalPipeline {
    steps: Vec<ApprovalStep>,
}

impl Default for ApprovalPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl ApprovalPipeline {
    /// A fresh pipeline: steps `step-1`..`step-30`, all pending, created in
    /// one shot.
    #[must_use]
    pub fn new() -> Self {
        let steps = (1..=STEP_COUNT).filter_map(ApprovalStep::new).collect();
        Self { steps }
    }

    /// Record a reviewer's decision on a pending step.
    ///
    /// Fails with [`ApprovalError::UnknownStep`] when the id does not
    /// resolve and [`ApprovalError::InvalidTransition`] when the step was
    /// already decided; the pipeline is unchanged on error and the caller
    /// is informed synchronously. On success the step gets its status,
    /// reviewer, decision timestamp, and notes in one update.
    pub fn record_decision(
        &mut self,
        step_id: &str,
        decision: Decision,
        reviewer: impl Into<String>,
        notes: Option<String>,
    ) -> Result<&ApprovalStep, ApprovalError> {
        let index = self
            .steps
            .iter()
            .position(|s| s.id == step_id)
            .ok_or_else(|| ApprovalError::UnknownStep {
                step: step_id.to_string(),
            })?;
        let status = self.steps[index].status;
        if status.is_decided() {
            return Err(ApprovalError::InvalidTransition {
                step: step_id.to_string(),
                status,
            });
        }
        self.steps[index].apply(decision, reviewer.into(), notes);
        let step = &self.steps[index];
        debug!(
            step = %step.id,
            status = %step.status,
            "recorded approval decision"
        );
        Ok(step)
    }

    /// Derive the pipeline's aggregate status.
    ///
    /// Any rejected step rejects the workflow regardless of the rest; all
    /// 30 approved approves it; anything else is still pending. Recomputed
    /// from the steps every call, never cached.
    #[must_use]
    pub fn aggregate_status(&self) -> ApprovalStatus {
        if self
            .steps
            .iter()
            .any(|s| s.status == ApprovalStatus::Rejected)
        {
            ApprovalStatus::Rejected
        } else if self
            .steps
            .iter()
            .all(|s| s.status == ApprovalStatus::Approved)
        {
            ApprovalStatus::Approved
        } else {
            ApprovalStatus::Pending
        }
    }

    /// Decided steps over total, in 0.0..=1.0.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.decided_count() as f64 / f64::from(STEP_COUNT)
    }

    #[must_use]
    pub fn decided_count(&self) -> usize {
        self.steps.iter().filter(|s| s.status.is_decided()).count()
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.steps.len() - self.decided_count()
    }

    /// All 30 steps in pipeline order.
    #[must_use]
    pub fn steps(&self) -> &[ApprovalStep] {
        &self.steps
    }

    #[must_use]
    pub fn step(&self, step_id: &str) -> Option<&ApprovalStep> {
        self.steps.iter().find(|s| s.id == step_id)
    }

    /// The contiguous slice of steps owned by one tier.
    #[must_use]
    pub fn category_steps(&self, category: ApprovalCategory) -> &[ApprovalStep] {
        let range = category.step_range();
        let start = usize::from(*range.start()) - 1;
        let end = usize::from(*range.end());
        &self.steps[start..end]
    }

    /// The three fixed tier buckets, in pipeline order.
    #[must_use]
    pub fn by_category(&self) -> [(ApprovalCategory, &[ApprovalStep]); 3] {
        ApprovalCategory::ALL.map(|category| (category, self.category_steps(category)))
    }
}

impl TryFrom<Vec<ApprovalStep>> for ApprovalPipeline {
    type Error = ApprovalError;

    fn try_from(steps: Vec<ApprovalStep>) -> Result<Self, Self::Error> {
        validate_shape(&steps)?;
        Ok(Self { steps })
    }
}

impl From<ApprovalPipeline> for Vec<ApprovalStep> {
    fn from(pipeline: ApprovalPipeline) -> Self {
        pipeline.steps
    }
}

/// Shape invariants for stored pipelines: exactly 30 steps, ids and numbers
/// `step-1`..`step-30` in order, categories matching their tier ranges.
fn validate_shape(steps: &[ApprovalStep]) -> Result<(), ApprovalError> {
    if steps.len() != usize::from(STEP_COUNT) {
        return Err(ApprovalError::MalformedPipeline {
            reason: format!("expected {STEP_COUNT} steps, found {}", steps.len()),
        });
    }
    for (i, step) in steps.iter().enumerate() {
        let number = i as u8 + 1;
        if step.step_number != number {
            return Err(ApprovalError::MalformedPipeline {
                reason: format!(
                    "step at position {i} is numbered {}, expected {number}",
                    step.step_number
                ),
            });
        }
        let expected_id = format!("step-{number}");
        if step.id != expected_id {
            return Err(ApprovalError::MalformedPipeline {
                reason: format!("step {number} has id '{}', expected '{expected_id}'", step.id),
            });
        }
        if ApprovalCategory::for_step(number) != Some(step.category) {
            return Err(ApprovalError::MalformedPipeline {
                reason: format!("step {number} is categorized {}", step.category),
            });
        }
    }
    Ok(())
}

/// Failure modes of approval pipeline operations. Decisions are strict:
/// terminal steps are never silently overwritten.
#[derive(Debug, Error, Diagnostic)]
pub enum ApprovalError {
    /// The targeted step was already decided.
    #[error("step '{step}' was already decided ({status})")]
    #[diagnostic(
        code(agentloom::approval::invalid_transition),
        help("decisions are terminal; only pending steps can be approved or rejected")
    )]
    InvalidTransition { step: String, status: ApprovalStatus },

    /// No step with this id exists in the pipeline.
    #[error("no step with id '{step}' in the pipeline")]
    #[diagnostic(code(agentloom::approval::unknown_step))]
    UnknownStep { step: String },

    /// A stored pipeline failed shape validation on deserialization.
    #[error("malformed approval pipeline: {reason}")]
    #[diagnostic(
        code(agentloom::approval::malformed_pipeline),
        help("pipelines are exactly 30 steps numbered 1..=30 with tier-matched categories")
    )]
    MalformedPipeline { reason: String },
}
