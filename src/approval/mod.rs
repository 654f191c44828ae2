//! The 30-step, three-tier approval state machine gating workflow
//! publication.
//!
//! A pipeline is created atomically with every step pending, then decided
//! one step at a time by reviewers. Per-step transitions are strictly
//! `Pending -> Approved` or `Pending -> Rejected`, both terminal; the
//! workflow-level aggregate is derived from the steps on demand.
//!
//! ```rust
//! use agentloom::approval::{ApprovalPipeline, ApprovalStatus, Decision};
//!
//! let mut pipeline = ApprovalPipeline::new();
//! pipeline.record_decision("step-15", Decision::Rejected, "quinn", None)?;
//!
//! // One rejection fails the workflow regardless of the other 29 steps.
//! assert_eq!(pipeline.aggregate_status(), ApprovalStatus::Rejected);
//! # Ok::<(), agentloom::approval::ApprovalError>(())
//! ```

mod pipeline;
mod step;

pub use pipeline::{ApprovalError, ApprovalPipeline, STEP_COUNT};
pub use step::{ApprovalCategory, ApprovalStatus, ApprovalStep, Decision};

#[cfg(test)]
mod tests;
