use agentloom::graph::WorkflowGraph;
use agentloom::types::NodeStatus;

#[allow(dead_code)]
pub fn assert_all_idle(graph: &WorkflowGraph) {
    for node in graph.nodes() {
        assert_eq!(
            node.status,
            NodeStatus::Idle,
            "expected node {} to be idle, got {}",
            node.id,
            node.status
        );
    }
    for edge in graph.edges() {
        assert!(!edge.animated, "expected edge {} to be still", edge.id);
    }
}

#[allow(dead_code)]
pub fn assert_endpoints_resolve(graph: &WorkflowGraph) {
    for edge in graph.edges() {
        assert!(
            graph.contains_node(&edge.source),
            "edge {} has unknown source {}",
            edge.id,
            edge.source
        );
        assert!(
            graph.contains_node(&edge.target),
            "edge {} has unknown target {}",
            edge.id,
            edge.target
        );
    }
}
