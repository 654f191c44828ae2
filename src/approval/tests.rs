//! Test suite for the approval pipeline state machine.
//!
//! Covers atomic creation, tier derivation, terminal decisions, aggregate
//! derivation, progress accounting, and stored-record validation.

use super::{
    ApprovalCategory, ApprovalError, ApprovalPipeline, ApprovalStatus, ApprovalStep, Decision,
    STEP_COUNT,
};

#[test]
/// A fresh pipeline is exactly 30 pending steps, step-1 through
/// step-30, tiered ten-ten-ten.
fn test_new_pipeline_shape() {
    let pipeline = ApprovalPipeline::new();
    assert_eq!(pipeline.steps().len(), usize::from(STEP_COUNT));
    for (i, step) in pipeline.steps().iter().enumerate() {
        let number = i as u8 + 1;
        assert_eq!(step.id, format!("step-{number}"));
        assert_eq!(step.step_number, number);
        assert_eq!(step.category, ApprovalCategory::for_step(number).unwrap());
        assert_eq!(step.status, ApprovalStatus::Pending);
        assert!(step.required);
        assert!(step.reviewer_name.is_none());
        assert!(step.timestamp.is_none());
    }
    assert_eq!(pipeline.aggregate_status(), ApprovalStatus::Pending);
    assert_eq!(pipeline.progress(), 0.0);
}

#[test]
/// Tier buckets are fixed and derived from step numbers alone.
fn test_category_buckets() {
    let pipeline = ApprovalPipeline::new();
    let buckets = pipeline.by_category();
    assert_eq!(buckets[0].0, ApprovalCategory::Builder);
    assert_eq!(buckets[1].0, ApprovalCategory::Manager);
    assert_eq!(buckets[2].0, ApprovalCategory::Admin);
    for (category, steps) in buckets {
        assert_eq!(steps.len(), 10);
        assert!(steps.iter().all(|s| s.category == category));
    }
    assert_eq!(
        pipeline.category_steps(ApprovalCategory::Manager)[0].id,
        "step-11"
    );
}

#[test]
/// Approving a pending step records reviewer, timestamp, and notes.
fn test_record_decision_success() {
    let mut pipeline = ApprovalPipeline::new();
    let step = pipeline
        .record_decision(
            "step-3",
            Decision::Approved,
            "dana",
            Some("looks good".to_string()),
        )
        .unwrap();
    assert_eq!(step.status, ApprovalStatus::Approved);
    assert_eq!(step.reviewer_name.as_deref(), Some("dana"));
    assert_eq!(step.notes.as_deref(), Some("looks good"));
    assert!(step.timestamp.is_some());
    assert_eq!(pipeline.decided_count(), 1);
    assert_eq!(pipeline.remaining(), 29);
}

#[test]
/// Decisions are terminal: re-deciding fails synchronously and leaves
/// the step exactly as it was.
fn test_decided_steps_are_terminal() {
    let mut pipeline = ApprovalPipeline::new();
    pipeline
        .record_decision("step-5", Decision::Approved, "dana", None)
        .unwrap();

    let err = pipeline
        .record_decision("step-5", Decision::Rejected, "lee", None)
        .unwrap_err();
    assert!(matches!(err, ApprovalError::InvalidTransition { .. }));

    let step = pipeline.step("step-5").unwrap();
    assert_eq!(step.status, ApprovalStatus::Approved);
    assert_eq!(step.reviewer_name.as_deref(), Some("dana"));
}

#[test]
/// Unknown step ids are rejected without touching the pipeline.
fn test_unknown_step() {
    let mut pipeline = ApprovalPipeline::new();
    let err = pipeline
        .record_decision("step-31", Decision::Approved, "dana", None)
        .unwrap_err();
    assert!(matches!(err, ApprovalError::UnknownStep { .. }));
    assert_eq!(pipeline.decided_count(), 0);
}

#[test]
/// 29 approvals leave the aggregate pending; the 30th flips it to
/// approved.
fn test_aggregate_requires_all_thirty() {
    let mut pipeline = ApprovalPipeline::new();
    for n in 1..=29u8 {
        pipeline
            .record_decision(&format!("step-{n}"), Decision::Approved, "dana", None)
            .unwrap();
        assert_eq!(pipeline.aggregate_status(), ApprovalStatus::Pending);
    }
    assert_eq!(pipeline.progress(), 29.0 / 30.0);

    pipeline
        .record_decision("step-30", Decision::Approved, "dana", None)
        .unwrap();
    assert_eq!(pipeline.aggregate_status(), ApprovalStatus::Approved);
    assert_eq!(pipeline.progress(), 1.0);
}

#[test]
/// One rejection fails the workflow; later decisions on other pending
/// steps still record individually but cannot change the aggregate, and
/// the rejected step itself stays closed.
fn test_single_rejection_is_fatal() {
    let mut pipeline = ApprovalPipeline::new();
    pipeline
        .record_decision("step-15", Decision::Rejected, "quinn", None)
        .unwrap();
    assert_eq!(pipeline.aggregate_status(), ApprovalStatus::Rejected);

    for n in 16..=30u8 {
        pipeline
            .record_decision(&format!("step-{n}"), Decision::Approved, "dana", None)
            .unwrap();
    }
    assert_eq!(pipeline.aggregate_status(), ApprovalStatus::Rejected);
    assert!(
        pipeline
            .record_decision("step-15", Decision::Approved, "dana", None)
            .is_err()
    );
}

#[test]
/// Aggregate derivation is pure: recomputing without changes returns
/// the same value.
fn test_aggregate_idempotent() {
    let mut pipeline = ApprovalPipeline::new();
    pipeline
        .record_decision("step-1", Decision::Approved, "dana", None)
        .unwrap();
    let first = pipeline.aggregate_status();
    assert_eq!(pipeline.aggregate_status(), first);
    assert_eq!(pipeline.aggregate_status(), first);
}

#[test]
/// Pipelines round-trip as the bare step array.
fn test_pipeline_serde_round_trip() {
    let mut pipeline = ApprovalPipeline::new();
    pipeline
        .record_decision("step-2", Decision::Approved, "dana", Some("ok".into()))
        .unwrap();

    let json = serde_json::to_value(&pipeline).unwrap();
    assert!(json.is_array());
    assert_eq!(json[1]["status"], "Approved");
    assert_eq!(json[1]["reviewerName"], "dana");
    assert_eq!(json[10]["category"], "Manager");

    let restored: ApprovalPipeline = serde_json::from_value(json).unwrap();
    assert_eq!(restored, pipeline);
}

#[test]
/// Stored pipelines that are the wrong size, misnumbered, or
/// miscategorized fail deserialization.
fn test_malformed_pipelines_rejected() {
    let short: Result<ApprovalPipeline, _> =
        serde_json::from_value(serde_json::to_value(vec![ApprovalStep::new(1).unwrap()]).unwrap());
    assert!(short.is_err());

    let mut steps: Vec<ApprovalStep> = (1..=30).filter_map(ApprovalStep::new).collect();
    steps.swap(0, 1);
    let swapped: Result<ApprovalPipeline, _> =
        serde_json::from_value(serde_json::to_value(steps).unwrap());
    assert!(swapped.is_err());

    let mut steps: Vec<ApprovalStep> = (1..=30).filter_map(ApprovalStep::new).collect();
    steps[4].category = ApprovalCategory::Admin;
    let miscategorized: Result<ApprovalPipeline, _> =
        serde_json::from_value(serde_json::to_value(steps).unwrap());
    assert!(miscategorized.is_err());
}
