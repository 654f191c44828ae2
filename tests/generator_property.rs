#[macro_use]
extern crate proptest;

use proptest::prelude::{Strategy, prop};

use agentloom::patterns::catalog::BUILTIN_IDS;
use agentloom::patterns::{
    EdgeSpec, GenerateOptions, Generator, NodeSpec, PatternRegistry, PatternTemplate,
};
use agentloom::types::NodeKind;

mod common;
use common::*;

/// Strip the generation suffix from a generated id ("thought-3" -> "thought").
fn stem(id: &str) -> &str {
    id.rsplit_once('-').map_or(id, |(head, _)| head)
}

fn kind_strategy() -> impl Strategy<Value = NodeKind> {
    prop::sample::select(NodeKind::ALL.to_vec())
}

/// Synthetic linear templates: a chain of 3..=8 nodes with labeled hops and
/// an optional single back edge into the middle (or a terminal self-loop).
fn chain_template_strategy() -> impl Strategy<Value = PatternTemplate> {
    (3usize..=8)
        .prop_flat_map(|len| {
            (
                prop::collection::vec(kind_strategy(), len),
                prop::option::of(1..len),
            )
        })
        .prop_map(|(kinds, back_target)| {
            let len = kinds.len();
            let mut template =
                PatternTemplate::new("chain", "Chain", "Synthetic linear chain", "Testing");
            for (i, kind) in kinds.into_iter().enumerate() {
                template = template.with_node(NodeSpec::new(
                    format!("n{i}"),
                    kind,
                    format!("Step {i}"),
                    format!("Synthetic step {i}"),
                    u32::try_from(i).unwrap(),
                ));
            }
            for i in 0..len - 1 {
                template = template.with_edge(EdgeSpec::new(
                    format!("n{i}"),
                    format!("n{}", i + 1),
                    format!("hop-{i}"),
                ));
            }
            if let Some(target) = back_target {
                template = template.with_edge(EdgeSpec::new(
                    format!("n{}", len - 1),
                    format!("n{target}"),
                    "loop",
                ));
            }
            template
        })
}

proptest! {
    #[test]
    fn prop_generated_edges_resolve(template in chain_template_strategy()) {
        let registry = PatternRegistry::empty().with_pattern(template.clone()).unwrap();
        let generator = Generator::new(&registry);
        let graph = generator.generate(&template.id, &GenerateOptions::default());

        prop_assert_eq!(graph.node_count(), template.nodes().len());
        prop_assert_eq!(graph.edge_count(), template.edges().len());
        for edge in graph.edges() {
            prop_assert!(graph.contains_node(&edge.source));
            prop_assert!(graph.contains_node(&edge.target));
        }
    }

    #[test]
    fn prop_generation_is_deterministic_modulo_suffix(template in chain_template_strategy()) {
        let registry = PatternRegistry::empty().with_pattern(template.clone()).unwrap();
        let generator = Generator::new(&registry);
        let first = generator.generate(&template.id, &GenerateOptions::default());
        let second = generator.generate(&template.id, &GenerateOptions::default());

        let first_nodes: Vec<_> = first
            .nodes()
            .iter()
            .map(|n| (n.kind, n.label.clone(), n.position))
            .collect();
        let second_nodes: Vec<_> = second
            .nodes()
            .iter()
            .map(|n| (n.kind, n.label.clone(), n.position))
            .collect();
        prop_assert_eq!(first_nodes, second_nodes);

        for (a, b) in first.edges().iter().zip(second.edges()) {
            prop_assert_eq!(stem(a.source.as_str()), stem(b.source.as_str()));
            prop_assert_eq!(stem(a.target.as_str()), stem(b.target.as_str()));
            prop_assert_eq!(&a.label, &b.label);
        }
    }

    #[test]
    fn prop_removal_never_leaves_dangling(
        pattern in prop::sample::select(BUILTIN_IDS.to_vec()),
        seed in 0usize..16,
    ) {
        let mut graph = generate(pattern);
        let victim = graph.nodes()[seed % graph.node_count()].id.clone();
        let removed = graph.remove_node(&victim).unwrap();

        prop_assert!(!graph.contains_node(&victim));
        for edge in graph.edges() {
            prop_assert!(graph.contains_node(&edge.source));
            prop_assert!(graph.contains_node(&edge.target));
        }
        prop_assert_eq!(removed.id, victim);
    }
}
