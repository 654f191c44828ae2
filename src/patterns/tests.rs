//! Test suite for the pattern library and generator.
//!
//! Covers template validation, catalog shape, expansion determinism, id
//! suffix freshness, layout math, and brief-based recommendation.

use super::{
    catalog, EdgeSpec, GenerateOptions, Generator, NodeSpec, PatternBrief, PatternRegistry,
    PatternTemplate, position_for, recommend_pattern,
};
use crate::types::{ExecutionMode, NodeKind, Position};

fn linear(id: &str) -> PatternTemplate {
    PatternTemplate::new(id, "Linear", "Two-step pipeline", "Testing")
        .with_node(NodeSpec::new("a", NodeKind::Input, "In", "start", 0))
        .with_node(NodeSpec::new("b", NodeKind::Output, "Out", "finish", 1))
        .with_edge(EdgeSpec::new("a", "b", "flow"))
}

#[test]
/// Verifies every built-in pattern is registered under its catalog id
/// and in display order.
fn test_builtin_catalog_complete() {
    let registry = PatternRegistry::default();
    assert_eq!(registry.len(), 6);
    assert_eq!(registry.ids(), &catalog::BUILTIN_IDS);
    for id in catalog::BUILTIN_IDS {
        assert!(registry.contains(id), "missing catalog pattern {id}");
    }
}

#[test]
/// The feedback set is exactly the reasoning-acting and self-reflection
/// patterns; every other built-in is a straight pipeline.
fn test_builtin_cyclicity() {
    let registry = PatternRegistry::default();
    for template in registry.iter() {
        let back = template.back_edges();
        match template.id.as_str() {
            catalog::REACT | catalog::SELF_REFLECTION => {
                assert_eq!(back.len(), 1, "{} should loop once", template.id);
                let entry = &template.nodes()[0].local_id;
                assert_ne!(&back[0].to, entry, "{} loops to its entry", template.id);
            }
            _ => assert!(back.is_empty(), "{} should be acyclic", template.id),
        }
    }
}

#[test]
/// Registration validates: duplicate locals, unresolved endpoints, and
/// duplicate template ids are all rejected.
fn test_registry_rejects_malformed() {
    let doubled = PatternTemplate::new("bad", "Bad", "", "")
        .with_node(NodeSpec::new("a", NodeKind::Input, "In", "", 0))
        .with_node(NodeSpec::new("a", NodeKind::Output, "Out", "", 1));
    assert!(PatternRegistry::empty().with_pattern(doubled).is_err());

    let dangling = PatternTemplate::new("bad", "Bad", "", "")
        .with_node(NodeSpec::new("a", NodeKind::Input, "In", "", 0))
        .with_node(NodeSpec::new("b", NodeKind::Output, "Out", "", 1))
        .with_edge(EdgeSpec::new("a", "ghost", "flow"));
    assert!(PatternRegistry::empty().with_pattern(dangling).is_err());

    let mut registry = PatternRegistry::empty();
    registry.register(linear("once")).unwrap();
    assert!(registry.register(linear("once")).is_err());
    assert_eq!(registry.len(), 1);
}

#[test]
/// Templates with two leftmost nodes, two rightmost nodes (without a
/// loop), or more than one loop edge fail validation.
fn test_template_shape_invariants() {
    let two_entries = PatternTemplate::new("bad", "Bad", "", "")
        .with_node(NodeSpec::new("a", NodeKind::Input, "In", "", 0))
        .with_node(NodeSpec::new("b", NodeKind::Input, "In2", "", 0))
        .with_node(NodeSpec::new("c", NodeKind::Output, "Out", "", 1))
        .with_edge(EdgeSpec::new("a", "c", ""))
        .with_edge(EdgeSpec::new("b", "c", ""));
    assert!(two_entries.validate().is_err());

    let two_exits = PatternTemplate::new("bad", "Bad", "", "")
        .with_node(NodeSpec::new("a", NodeKind::Input, "In", "", 0))
        .with_node(NodeSpec::new("b", NodeKind::Output, "Out", "", 1))
        .with_node(NodeSpec::new("c", NodeKind::Output, "Out2", "", 1))
        .with_edge(EdgeSpec::new("a", "b", ""))
        .with_edge(EdgeSpec::new("a", "c", ""));
    assert!(two_exits.validate().is_err());

    let two_loops = PatternTemplate::new("bad", "Bad", "", "")
        .with_node(NodeSpec::new("a", NodeKind::Input, "In", "", 0))
        .with_node(NodeSpec::new("b", NodeKind::ModelCall, "Mid", "", 1))
        .with_node(NodeSpec::new("c", NodeKind::Output, "Out", "", 2))
        .with_edge(EdgeSpec::new("a", "b", ""))
        .with_edge(EdgeSpec::new("b", "c", ""))
        .with_edge(EdgeSpec::new("c", "b", "loop1"))
        .with_edge(EdgeSpec::new("b", "b", "loop2"));
    assert!(two_loops.validate().is_err());

    let loop_to_entry = PatternTemplate::new("bad", "Bad", "", "")
        .with_node(NodeSpec::new("a", NodeKind::Input, "In", "", 0))
        .with_node(NodeSpec::new("b", NodeKind::Output, "Out", "", 1))
        .with_edge(EdgeSpec::new("a", "b", ""))
        .with_edge(EdgeSpec::new("b", "a", "restart"));
    assert!(loop_to_entry.validate().is_err());
}

#[test]
/// Expanding the tool-use pattern yields the documented six-node
/// pipeline with five labeled edges.
fn test_tool_use_topology() {
    let registry = PatternRegistry::default();
    let generator = Generator::new(&registry);
    let graph = generator.generate(catalog::TOOL_USE, &GenerateOptions::new());

    let kinds: Vec<NodeKind> = graph.nodes().iter().map(|n| n.kind).collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::Input,
            NodeKind::ModelCall,
            NodeKind::Condition,
            NodeKind::ToolCall,
            NodeKind::ModelCall,
            NodeKind::Output,
        ]
    );
    let labels: Vec<&str> = graph.edges().iter().map(|e| e.label.as_str()).collect();
    assert_eq!(
        labels,
        vec!["task", "requirements", "tools", "raw_results", "processed"]
    );
    assert!(graph.back_edges().is_empty());
    assert!(graph.validate().is_ok());
}

#[test]
/// First generation reproduces the canonical ids; later generations get
/// fresh suffixes so both expansions can share a canvas.
fn test_generation_suffixes_fresh() {
    let registry = PatternRegistry::default();
    let generator = Generator::new(&registry);

    let first = generator.generate(catalog::REACT, &GenerateOptions::new());
    assert_eq!(first.nodes()[0].id.as_str(), "input-1");
    assert_eq!(first.edges()[0].id.as_str(), "e1-1");

    let second = generator.generate(catalog::REACT, &GenerateOptions::new());
    assert_eq!(second.nodes()[0].id.as_str(), "input-2");

    let mut canvas = first;
    canvas.merge(second).unwrap();
    assert_eq!(canvas.node_count(), 14);
    assert!(canvas.validate().is_ok());
}

#[test]
/// Two expansions of the same pattern are structurally identical: same
/// kinds, labels, positions, and edge topology; only id suffixes vary.
fn test_generation_deterministic() {
    let registry = PatternRegistry::default();
    let generator = Generator::new(&registry);
    let options = GenerateOptions::new().with_execution_mode(ExecutionMode::HumanInLoop);

    for id in catalog::BUILTIN_IDS {
        let a = generator.generate(id, &options);
        let b = generator.generate(id, &options);
        assert_eq!(a.node_count(), b.node_count(), "{id}");
        for (na, nb) in a.nodes().iter().zip(b.nodes()) {
            assert_eq!(na.kind, nb.kind);
            assert_eq!(na.label, nb.label);
            assert_eq!(na.position, nb.position);
            assert_eq!(na.config, nb.config);
            assert_eq!(na.execution_mode, ExecutionMode::HumanInLoop);
        }
        let topo = |g: &crate::graph::WorkflowGraph| -> Vec<(String, String)> {
            g.edges()
                .iter()
                .map(|e| {
                    let strip = |s: &str| s.rsplit_once('-').map(|(l, _)| l.to_string());
                    (
                        strip(e.source.as_str()).unwrap_or_default(),
                        strip(e.target.as_str()).unwrap_or_default(),
                    )
                })
                .collect()
        };
        assert_eq!(topo(&a), topo(&b), "{id}");
    }
}

#[test]
/// Generated layout follows the fixed column/lane grid: 250 apart from
/// x = 50, baseline y = 100, specialist branches offset by 100.
fn test_layout_positions() {
    let registry = PatternRegistry::default();
    let generator = Generator::new(&registry);
    let graph = generator.generate(catalog::MULTI_AGENT, &GenerateOptions::new());

    let pos = |local: &str| -> Position {
        graph
            .nodes()
            .iter()
            .find(|n| n.id.as_str() == format!("{local}-1"))
            .map(|n| n.position)
            .unwrap()
    };
    assert_eq!(pos("input"), Position::new(50.0, 100.0));
    assert_eq!(pos("coordinator"), Position::new(300.0, 100.0));
    assert_eq!(pos("agent1"), Position::new(550.0, 0.0));
    assert_eq!(pos("agent2"), Position::new(550.0, 200.0));
    assert_eq!(pos("synthesizer"), Position::new(800.0, 100.0));
    assert_eq!(pos("output"), Position::new(1300.0, 100.0));

    assert_eq!(position_for(0, 0), Position::new(50.0, 100.0));
    assert_eq!(position_for(3, -1), Position::new(800.0, 0.0));
}

#[test]
/// Unknown pattern ids degrade to an empty graph instead of erroring.
fn test_unknown_pattern_yields_empty_graph() {
    let registry = PatternRegistry::default();
    let generator = Generator::new(&registry);
    let graph = generator.generate("definitely-not-a-pattern", &GenerateOptions::new());
    assert!(graph.is_empty());
}

#[test]
/// Model hints land in the generated node's config; nodes without a
/// hint keep their kind default.
fn test_model_hints_applied() {
    let registry = PatternRegistry::default();
    let generator = Generator::new(&registry);
    let graph = generator.generate(catalog::REACT, &GenerateOptions::new());

    let thought = graph.node(&"thought-1".into()).unwrap();
    match &thought.config {
        crate::graph::NodeConfig::Model(m) => assert_eq!(m.model_name, "gpt-4o"),
        other => panic!("expected model config, got {other:?}"),
    }
    let tool = graph.node(&"tool-1".into()).unwrap();
    assert!(matches!(tool.config, crate::graph::NodeConfig::Tool(_)));
}

#[test]
/// Brief keywords recommend patterns in precedence order, with the
/// reasoning-acting pattern as the fallback.
fn test_recommendation_precedence() {
    let rec = |brief: PatternBrief| recommend_pattern(&brief);

    assert_eq!(
        rec(PatternBrief::new().with_task("Code Generation")),
        catalog::CODEACT
    );
    assert_eq!(
        rec(PatternBrief::new().with_task("Multi-step Research")),
        catalog::MULTI_AGENT,
        "task keywords outrank tool keywords"
    );
    assert_eq!(
        rec(PatternBrief::new().with_business_goal("teams collaborate better")),
        catalog::MULTI_AGENT
    );
    assert_eq!(
        rec(PatternBrief::new().with_data_tools("Postgres Database")),
        catalog::RAG
    );
    assert_eq!(
        rec(PatternBrief::new().with_task("Research assistant")),
        catalog::RAG
    );
    assert_eq!(
        rec(PatternBrief::new().with_data_tools("REST API")),
        catalog::TOOL_USE
    );
    assert_eq!(
        rec(PatternBrief::new().with_business_goal("learn from mistakes")),
        catalog::SELF_REFLECTION
    );
    assert_eq!(rec(PatternBrief::new()), catalog::REACT);

    // Code tasks win even when tool keywords are present.
    assert_eq!(
        rec(PatternBrief::new()
            .with_task("Programming helper")
            .with_data_tools("API")),
        catalog::CODEACT
    );
}

#[test]
/// Derived names prefer the brief's domain and task, falling back to
/// the pattern display name.
fn test_generated_workflow_naming() {
    let registry = PatternRegistry::default();
    let generator = Generator::new(&registry);

    let named = generator.generate_workflow(
        catalog::RAG,
        &GenerateOptions::new()
            .with_domain("Finance")
            .with_task("Research"),
    );
    assert_eq!(named.name, "Finance Research Agent");
    assert_eq!(named.description, "Retrieval-Augmented Generation with agency");
    assert_eq!(named.pattern, catalog::RAG);

    let fallback = generator.generate_workflow(catalog::REACT, &GenerateOptions::new());
    assert_eq!(fallback.name, "ReAct Workflow");
}

#[test]
/// The brief path recommends, generates, and names in one step, using
/// the business goal as the description when present.
fn test_generate_from_brief() {
    let registry = PatternRegistry::default();
    let generator = Generator::new(&registry);

    let brief = PatternBrief::new()
        .with_domain("Support")
        .with_task("Research")
        .with_business_goal("Answer customer questions from our docs")
        .with_execution_mode(ExecutionMode::HumanInLoop);
    let workflow = generator.generate_from_brief(&brief);

    assert_eq!(workflow.pattern, catalog::RAG);
    assert_eq!(workflow.name, "Support Research Agent");
    assert_eq!(workflow.description, "Answer customer questions from our docs");
    assert!(
        workflow
            .graph
            .nodes()
            .iter()
            .all(|n| n.execution_mode == ExecutionMode::HumanInLoop)
    );
}
