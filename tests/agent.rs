//! Lifecycle tests for marketplace workflow records: submission, review
//! routing, publication, and persistence.

use agentloom::agent::{AgentError, DEFAULT_USER, WorkflowAgent, WorkflowStatus};
use agentloom::approval::{ApprovalStatus, Decision, STEP_COUNT};
use agentloom::patterns::{GenerateOptions, Generator, PatternRegistry};

mod common;
use common::*;

fn draft_agent() -> WorkflowAgent {
    WorkflowAgent::new("Invoice Triage", "Sorts inbound invoices", linear_graph(), "dana")
}

#[test]
fn test_new_agent_is_draft_with_created_audit() {
    let agent = draft_agent();

    assert_eq!(agent.status(), WorkflowStatus::Draft);
    assert_eq!(agent.current_version(), "1.0.0");
    assert!(agent.versions().is_empty());
    assert!(agent.approval().is_none());

    let trail = agent.audit_trail();
    assert_eq!(trail.len(), 1);
    assert_eq!(trail[0].action, "Created");
    assert_eq!(trail[0].user, "dana");
    assert!(trail[0].id.starts_with("audit-"));
}

#[test]
fn test_submit_freezes_version_and_opens_pipeline() {
    let mut agent = draft_agent();
    agent.submit_for_approval("dana").unwrap();

    assert_eq!(agent.status(), WorkflowStatus::PendingApproval);

    let versions = agent.versions();
    assert_eq!(versions.len(), 1);
    assert_eq!(versions[0].version, "1.0.0");
    assert_eq!(versions[0].created_by, "dana");
    assert_eq!(versions[0].changes, "Initial version");
    assert!(versions[0].is_active);

    let pipeline = agent.approval().expect("pipeline created at submission");
    assert_eq!(pipeline.steps().len(), usize::from(STEP_COUNT));
    assert!(pipeline.steps().iter().all(|step| step.status.is_pending()));

    assert_eq!(agent.audit_trail().last().unwrap().action, "Submitted for approval");
}

#[test]
fn test_unanimous_approval_then_publish() {
    let mut agent = draft_agent();
    agent.submit_for_approval("dana").unwrap();

    for step in 1..=29 {
        let aggregate = agent
            .record_decision(&format!("step-{step}"), Decision::Approved, "kim", None)
            .unwrap();
        assert_eq!(aggregate, ApprovalStatus::Pending);
        assert_eq!(agent.status(), WorkflowStatus::PendingApproval);
    }

    let aggregate = agent
        .record_decision("step-30", Decision::Approved, "kim", None)
        .unwrap();
    assert_eq!(aggregate, ApprovalStatus::Approved);
    assert_eq!(agent.status(), WorkflowStatus::Approved);

    agent.publish("dana").unwrap();
    assert_eq!(agent.status(), WorkflowStatus::Published);
    assert_eq!(agent.audit_trail().last().unwrap().action, "Published");
}

#[test]
fn test_rejection_is_fatal_for_the_aggregate() {
    let mut agent = draft_agent();
    agent.submit_for_approval("dana").unwrap();

    let aggregate = agent
        .record_decision(
            "step-15",
            Decision::Rejected,
            "kim",
            Some("Tool config incomplete".to_string()),
        )
        .unwrap();
    assert_eq!(aggregate, ApprovalStatus::Rejected);
    assert_eq!(agent.status(), WorkflowStatus::Rejected);

    // Remaining pending steps stay individually decidable, but the
    // aggregate never recovers.
    for step in 16..=30 {
        agent
            .record_decision(&format!("step-{step}"), Decision::Approved, "kim", None)
            .unwrap();
        assert_eq!(agent.status(), WorkflowStatus::Rejected);
    }

    assert!(matches!(
        agent.publish("dana"),
        Err(AgentError::NotApproved { .. })
    ));
}

#[test]
fn test_lifecycle_misuse_is_rejected() {
    let mut agent = draft_agent();

    assert!(matches!(
        agent.record_decision("step-1", Decision::Approved, "kim", None),
        Err(AgentError::NotSubmitted)
    ));
    assert!(matches!(agent.publish("dana"), Err(AgentError::NotApproved { .. })));

    agent.submit_for_approval("dana").unwrap();
    assert!(matches!(
        agent.submit_for_approval("dana"),
        Err(AgentError::NotDraft { .. })
    ));

    // A decided step cannot be decided again; the agent surfaces the
    // pipeline error and records nothing new.
    agent
        .record_decision("step-1", Decision::Approved, "kim", None)
        .unwrap();
    let before = agent.audit_trail().len();
    assert!(matches!(
        agent.record_decision("step-1", Decision::Rejected, "kim", None),
        Err(AgentError::Approval(_))
    ));
    assert_eq!(agent.audit_trail().len(), before);
}

#[test]
fn test_from_generated_workflow_carries_pattern_tag() {
    let registry = PatternRegistry::default();
    let generator = Generator::new(&registry);
    let generated = generator.generate_workflow(
        "rag",
        &GenerateOptions::new()
            .with_domain("Support")
            .with_task("Research"),
    );

    let agent = WorkflowAgent::from(generated);
    assert_eq!(agent.name(), "Support Research Agent");
    assert_eq!(agent.pattern(), Some("rag"));
    assert_eq!(agent.workflow().node_count(), 7);
    assert_eq!(agent.audit_trail()[0].user, DEFAULT_USER);
}

#[test]
fn test_agent_round_trips_through_json() {
    let mut agent = draft_agent();
    agent.submit_for_approval("dana").unwrap();
    agent
        .record_decision("step-1", Decision::Approved, "kim", Some("ok".to_string()))
        .unwrap();

    let json = serde_json::to_value(&agent).unwrap();
    assert_eq!(json["status"], "Pending Approval");
    assert_eq!(json["currentVersion"], "1.0.0");
    assert!(json["auditTrail"].is_array());
    assert_eq!(json["versions"][0]["createdBy"], "dana");
    assert_eq!(json["approval"][0]["status"], "Approved");

    let restored: WorkflowAgent = serde_json::from_value(json).unwrap();
    assert_eq!(restored, agent);
}
