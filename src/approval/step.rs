//! Approval step value types: tiers, statuses, decisions, and the step
//! record itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// Review tier of an approval step, derived purely from the step number.
///
/// A pipeline is 30 steps in three fixed tiers of ten: Builder reviews come
/// first, then Manager, then Admin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApprovalCategory {
    Builder,
    Manager,
    Admin,
}

impl ApprovalCategory {
    /// All tiers, in pipeline order.
    pub const ALL: [ApprovalCategory; 3] = [
        ApprovalCategory::Builder,
        ApprovalCategory::Manager,
        ApprovalCategory::Admin,
    ];

    /// The tier owning `step_number`, or `None` outside 1..=30.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use agentloom::approval::ApprovalCategory;
    ///
    /// assert_eq!(ApprovalCategory::for_step(1), Some(ApprovalCategory::Builder));
    /// assert_eq!(ApprovalCategory::for_step(11), Some(ApprovalCategory::Manager));
    /// assert_eq!(ApprovalCategory::for_step(30), Some(ApprovalCategory::Admin));
    /// assert_eq!(ApprovalCategory::for_step(31), None);
    /// ```
    #[must_use]
    pub fn for_step(step_number: u8) -> Option<Self> {
        match step_number {
            1..=10 => Some(ApprovalCategory::Builder),
            11..=20 => Some(ApprovalCategory::Manager),
            21..=30 => Some(ApprovalCategory::Admin),
            _ => None,
        }
    }

    /// The step numbers this tier owns.
    #[must_use]
    pub fn step_range(self) -> RangeInclusive<u8> {
        match self {
            ApprovalCategory::Builder => 1..=10,
            ApprovalCategory::Manager => 11..=20,
            ApprovalCategory::Admin => 21..=30,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ApprovalCategory::Builder => "Builder",
            ApprovalCategory::Manager => "Manager",
            ApprovalCategory::Admin => "Admin",
        }
    }
}

impl fmt::Display for ApprovalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of a single approval step. Also serves as the pipeline's derived
/// aggregate, where `Pending` reads as "still in review".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApprovalStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    #[must_use]
    pub fn is_pending(self) -> bool {
        matches!(self, ApprovalStatus::Pending)
    }

    /// Approved or Rejected; both are terminal.
    #[must_use]
    pub fn is_decided(self) -> bool {
        !self.is_pending()
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "Pending",
            ApprovalStatus::Approved => "Approved",
            ApprovalStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reviewer's verdict on one pending step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Approved,
    Rejected,
}

impl From<Decision> for ApprovalStatus {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Approved => ApprovalStatus::Approved,
            Decision::Rejected => ApprovalStatus::Rejected,
        }
    }
}

/// One step of the 30-step approval pipeline.
///
/// `id` is `step-{n}` and `category` is derived from the step number; both
/// are structural and re-validated when a pipeline is deserialized. The
/// reviewer fields stay empty until a decision is recorded. `required` is
/// always true for generated pipelines and kept for record compatibility.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalStep {
    pub id: String,
    pub step_number: u8,
    pub category: ApprovalCategory,
    #[serde(default)]
    pub status: ApprovalStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub required: bool,
}

impl ApprovalStep {
    /// A fresh pending step for `step_number`, or `None` outside 1..=30.
    #[must_use]
    pub fn new(step_number: u8) -> Option<Self> {
        let category = ApprovalCategory::for_step(step_number)?;
        Some(Self {
            id: format!("step-{step_number}"),
            step_number,
            category,
            status: ApprovalStatus::Pending,
            reviewer_name: None,
            timestamp: None,
            notes: None,
            required: true,
        })
    }

    pub(crate) fn apply(&mut self, decision: Decision, reviewer: String, notes: Option<String>) {
        self.status = decision.into();
        self.reviewer_name = Some(reviewer);
        self.timestamp = Some(Utc::now());
        self.notes = notes;
    }
}
