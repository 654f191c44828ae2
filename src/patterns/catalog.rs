//! Built-in pattern catalog.
//!
//! Six canonical agentic patterns, encoded as validated templates. Node and
//! edge wording matches the workshop palette so generated canvases read the
//! same as hand-built ones. The reasoning-acting and self-reflection
//! patterns carry a feedback edge; the rest are straight pipelines.

use crate::patterns::template::{EdgeSpec, NodeSpec, PatternTemplate};
use crate::types::NodeKind;

/// Reasoning-acting loop (think, act, observe, repeat).
pub const REACT: &str = "react";
/// Code generation and execution.
pub const CODEACT: &str = "codeact";
/// Tool integration over MCP-style servers.
pub const TOOL_USE: &str = "tool-use";
/// Iterative self-evaluation and improvement.
pub const SELF_REFLECTION: &str = "self-reflection";
/// Coordinator with parallel specialist agents.
pub const MULTI_AGENT: &str = "multi-agent";
/// Retrieval-augmented generation.
pub const RAG: &str = "rag";

/// Catalog ids in display order.
pub const BUILTIN_IDS: [&str; 6] = [REACT, CODEACT, TOOL_USE, SELF_REFLECTION, MULTI_AGENT, RAG];

/// All built-in templates, in display order.
pub(crate) fn builtin() -> Vec<PatternTemplate> {
    vec![
        react(),
        codeact(),
        tool_use(),
        self_reflection(),
        multi_agent(),
        rag(),
    ]
}

fn react() -> PatternTemplate {
    PatternTemplate::new(
        REACT,
        "ReAct",
        "Reasoning and Acting in language models",
        "Question answering, fact verification, interactive decision making",
    )
    .with_node(NodeSpec::new(
        "input",
        NodeKind::Input,
        "User Input",
        "Receive user query or task",
        0,
    ))
    .with_node(
        NodeSpec::new(
            "thought",
            NodeKind::ModelCall,
            "Thought Process",
            "Analyze and reason about the task",
            1,
        )
        .with_model("gpt-4o"),
    )
    .with_node(NodeSpec::new(
        "action",
        NodeKind::Condition,
        "Action Selection",
        "Choose appropriate action",
        2,
    ))
    .with_node(NodeSpec::new(
        "tool",
        NodeKind::ToolCall,
        "Tool Execution",
        "Execute selected tool/action",
        3,
    ))
    .with_node(
        NodeSpec::new(
            "observe",
            NodeKind::ModelCall,
            "Observation",
            "Analyze results and observations",
            4,
        )
        .with_model("gpt-4o"),
    )
    .with_node(NodeSpec::new(
        "decision",
        NodeKind::Condition,
        "Continue/Finish",
        "Decide if task is complete",
        5,
    ))
    .with_node(NodeSpec::new(
        "output",
        NodeKind::Output,
        "Final Output",
        "Return final result to user",
        6,
    ))
    .with_edge(EdgeSpec::new("input", "thought", "query"))
    .with_edge(EdgeSpec::new("thought", "action", "reasoning"))
    .with_edge(EdgeSpec::new("action", "tool", "execute"))
    .with_edge(EdgeSpec::new("tool", "observe", "results"))
    .with_edge(EdgeSpec::new("observe", "decision", "analysis"))
    .with_edge(EdgeSpec::new("decision", "output", "complete"))
    .with_edge(EdgeSpec::new("decision", "thought", "continue"))
}

fn codeact() -> PatternTemplate {
    PatternTemplate::new(
        CODEACT,
        "CodeAct",
        "Code generation and execution agent",
        "Code generation, debugging, automated programming tasks",
    )
    .with_node(NodeSpec::new(
        "input",
        NodeKind::Input,
        "Code Request",
        "Programming task or requirement",
        0,
    ))
    .with_node(
        NodeSpec::new(
            "plan",
            NodeKind::ModelCall,
            "Code Planning",
            "Plan code structure and approach",
            1,
        )
        .with_model("gpt-4o"),
    )
    .with_node(
        NodeSpec::new(
            "generate",
            NodeKind::ModelCall,
            "Code Generation",
            "Generate code implementation",
            2,
        )
        .with_model("gpt-4o"),
    )
    .with_node(NodeSpec::new(
        "execute",
        NodeKind::ToolCall,
        "Code Execution",
        "Execute generated code",
        3,
    ))
    .with_node(NodeSpec::new(
        "validate",
        NodeKind::Condition,
        "Validation",
        "Validate code execution results",
        4,
    ))
    .with_node(NodeSpec::new(
        "output",
        NodeKind::Output,
        "Code Output",
        "Return final code and results",
        5,
    ))
    .with_edge(EdgeSpec::new("input", "plan", "requirements"))
    .with_edge(EdgeSpec::new("plan", "generate", "plan"))
    .with_edge(EdgeSpec::new("generate", "execute", "code"))
    .with_edge(EdgeSpec::new("execute", "validate", "results"))
    .with_edge(EdgeSpec::new("validate", "output", "success"))
}

fn tool_use() -> PatternTemplate {
    PatternTemplate::new(
        TOOL_USE,
        "Tool Use (MCP)",
        "Model Context Protocol for tool integration",
        "API integration, external tool usage, system interactions",
    )
    .with_node(NodeSpec::new(
        "input",
        NodeKind::Input,
        "Task Input",
        "Receive task requiring tool usage",
        0,
    ))
    .with_node(
        NodeSpec::new(
            "analyze",
            NodeKind::ModelCall,
            "Task Analysis",
            "Analyze task requirements",
            1,
        )
        .with_model("gpt-4o"),
    )
    .with_node(NodeSpec::new(
        "select",
        NodeKind::Condition,
        "Tool Selection",
        "Select appropriate MCP tools",
        2,
    ))
    .with_node(NodeSpec::new(
        "execute",
        NodeKind::ToolCall,
        "Tool Execution",
        "Execute selected MCP tools",
        3,
    ))
    .with_node(
        NodeSpec::new(
            "process",
            NodeKind::ModelCall,
            "Result Processing",
            "Process and interpret tool results",
            4,
        )
        .with_model("gpt-4o"),
    )
    .with_node(NodeSpec::new(
        "output",
        NodeKind::Output,
        "Final Result",
        "Return processed results",
        5,
    ))
    .with_edge(EdgeSpec::new("input", "analyze", "task"))
    .with_edge(EdgeSpec::new("analyze", "select", "requirements"))
    .with_edge(EdgeSpec::new("select", "execute", "tools"))
    .with_edge(EdgeSpec::new("execute", "process", "raw_results"))
    .with_edge(EdgeSpec::new("process", "output", "processed"))
}

fn self_reflection() -> PatternTemplate {
    PatternTemplate::new(
        SELF_REFLECTION,
        "Self-Reflection",
        "Self-improving agent with reflection loops",
        "Iterative improvement, self-correction, learning from mistakes",
    )
    .with_node(NodeSpec::new(
        "input",
        NodeKind::Input,
        "Initial Task",
        "Receive task for iterative improvement",
        0,
    ))
    .with_node(
        NodeSpec::new(
            "attempt",
            NodeKind::ModelCall,
            "Initial Attempt",
            "First attempt at solving the task",
            1,
        )
        .with_model("gpt-4o"),
    )
    .with_node(
        NodeSpec::new(
            "evaluate",
            NodeKind::ModelCall,
            "Self-Evaluation",
            "Evaluate attempt quality and identify issues",
            2,
        )
        .with_model("gpt-4o"),
    )
    .with_node(
        NodeSpec::new(
            "reflect",
            NodeKind::ModelCall,
            "Reflection",
            "Reflect on mistakes and improvements",
            3,
        )
        .with_model("gpt-4o"),
    )
    .with_node(
        NodeSpec::new(
            "improve",
            NodeKind::ModelCall,
            "Improvement",
            "Generate improved solution",
            4,
        )
        .with_model("gpt-4o"),
    )
    .with_node(NodeSpec::new(
        "check",
        NodeKind::Condition,
        "Quality Check",
        "Check if solution meets standards",
        5,
    ))
    .with_node(NodeSpec::new(
        "output",
        NodeKind::Output,
        "Final Solution",
        "Return refined solution",
        6,
    ))
    .with_edge(EdgeSpec::new("input", "attempt", "task"))
    .with_edge(EdgeSpec::new("attempt", "evaluate", "solution"))
    .with_edge(EdgeSpec::new("evaluate", "reflect", "evaluation"))
    .with_edge(EdgeSpec::new("reflect", "improve", "insights"))
    .with_edge(EdgeSpec::new("improve", "check", "improved"))
    .with_edge(EdgeSpec::new("check", "output", "approved"))
    .with_edge(EdgeSpec::new("check", "evaluate", "iterate"))
}

fn multi_agent() -> PatternTemplate {
    PatternTemplate::new(
        MULTI_AGENT,
        "Multi-Agent Workflow",
        "Collaborative multi-agent systems",
        "Complex problem solving, role-based collaboration, distributed tasks",
    )
    .with_node(NodeSpec::new(
        "input",
        NodeKind::Input,
        "Complex Task",
        "Receive complex multi-faceted task",
        0,
    ))
    .with_node(NodeSpec::new(
        "coordinator",
        NodeKind::AgentCall,
        "Task Coordinator",
        "Coordinate and distribute subtasks",
        1,
    ))
    .with_node(
        NodeSpec::new(
            "agent1",
            NodeKind::AgentCall,
            "Specialist Agent 1",
            "Handle specialized subtask 1",
            2,
        )
        .in_lane(-1),
    )
    .with_node(
        NodeSpec::new(
            "agent2",
            NodeKind::AgentCall,
            "Specialist Agent 2",
            "Handle specialized subtask 2",
            2,
        )
        .in_lane(1),
    )
    .with_node(
        NodeSpec::new(
            "synthesizer",
            NodeKind::ModelCall,
            "Result Synthesizer",
            "Combine and synthesize agent results",
            3,
        )
        .with_model("gpt-4o"),
    )
    .with_node(NodeSpec::new(
        "validator",
        NodeKind::Condition,
        "Quality Validator",
        "Validate synthesized results",
        4,
    ))
    .with_node(NodeSpec::new(
        "output",
        NodeKind::Output,
        "Unified Output",
        "Return comprehensive solution",
        5,
    ))
    .with_edge(EdgeSpec::new("input", "coordinator", "task"))
    .with_edge(EdgeSpec::new("coordinator", "agent1", "subtask_1"))
    .with_edge(EdgeSpec::new("coordinator", "agent2", "subtask_2"))
    .with_edge(EdgeSpec::new("agent1", "synthesizer", "result_1"))
    .with_edge(EdgeSpec::new("agent2", "synthesizer", "result_2"))
    .with_edge(EdgeSpec::new("synthesizer", "validator", "synthesis"))
    .with_edge(EdgeSpec::new("validator", "output", "validated"))
}

fn rag() -> PatternTemplate {
    PatternTemplate::new(
        RAG,
        "Agentic RAG",
        "Retrieval-Augmented Generation with agency",
        "Knowledge retrieval, document QA, contextual responses",
    )
    .with_node(NodeSpec::new(
        "input",
        NodeKind::Input,
        "User Query",
        "Receive user question or information need",
        0,
    ))
    .with_node(
        NodeSpec::new(
            "analyze",
            NodeKind::ModelCall,
            "Query Analysis",
            "Analyze query intent and requirements",
            1,
        )
        .with_model("gpt-4o"),
    )
    .with_node(NodeSpec::new(
        "retrieve",
        NodeKind::ToolCall,
        "Knowledge Retrieval",
        "Retrieve relevant documents/context",
        2,
    ))
    .with_node(
        NodeSpec::new(
            "rank",
            NodeKind::ModelCall,
            "Context Ranking",
            "Rank and filter retrieved context",
            3,
        )
        .with_model("gpt-4o"),
    )
    .with_node(
        NodeSpec::new(
            "generate",
            NodeKind::ModelCall,
            "Response Generation",
            "Generate contextual response",
            4,
        )
        .with_model("gpt-4o"),
    )
    .with_node(NodeSpec::new(
        "verify",
        NodeKind::Condition,
        "Fact Verification",
        "Verify response accuracy",
        5,
    ))
    .with_node(NodeSpec::new(
        "output",
        NodeKind::Output,
        "Verified Answer",
        "Return verified, contextual answer",
        6,
    ))
    .with_edge(EdgeSpec::new("input", "analyze", "query"))
    .with_edge(EdgeSpec::new("analyze", "retrieve", "search_terms"))
    .with_edge(EdgeSpec::new("retrieve", "rank", "documents"))
    .with_edge(EdgeSpec::new("rank", "generate", "context"))
    .with_edge(EdgeSpec::new("generate", "verify", "response"))
    .with_edge(EdgeSpec::new("verify", "output", "verified"))
}
